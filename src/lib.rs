pub mod account;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod platform;
pub mod storage;
