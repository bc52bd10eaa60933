pub mod cli;
pub mod config;
pub mod display;
pub mod log;
pub mod seen;
