//! Natural-language front end: turns free text into a contract command
//! with the help of a hosted chat model.

pub mod command;
pub mod deepseek;

pub use command::{Action, Command};
pub use deepseek::{ChatError, DeepSeekClient};
