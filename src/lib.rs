pub mod cli;
pub mod client;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod meat_prompt;
pub mod scanner;
