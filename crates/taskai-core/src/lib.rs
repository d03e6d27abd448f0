pub mod commitment;
pub mod config;
pub mod error;
pub mod io;
pub mod ladder;
pub mod paths;
pub mod reminder;
pub mod seed;
pub mod store;
pub mod template;
pub mod types;
pub mod urgency;

pub use error::{Result, TaskaiError};
