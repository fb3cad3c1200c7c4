pub mod cli;
pub mod config;
pub mod error;
pub mod generate;
pub mod studio;
pub mod transport;
