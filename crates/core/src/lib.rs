//! Tutor Core Library
//!
//! Foundational utilities shared by every tutor crate:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management
//! - Course metadata

pub mod config;
pub mod course;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::AppConfig;
pub use course::CourseInfo;
pub use error::{AppError, AppResult};
