pub mod dates;
pub mod jobs;
