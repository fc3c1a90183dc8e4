// src/blockchain/services/mod.rs

pub mod contract;
