pub mod config;
pub mod logging;

pub mod credential;
pub mod day;
pub mod download;
pub mod error;
pub mod fetch;
pub mod storage;

pub use error::AocError;
