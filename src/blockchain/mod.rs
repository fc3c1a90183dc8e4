// src/blockchain/mod.rs

pub mod clarity;
pub mod client;
pub use client::StacksClient;

pub mod models;
pub mod services;
