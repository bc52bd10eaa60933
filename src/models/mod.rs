pub mod job;
pub mod serpapi;
