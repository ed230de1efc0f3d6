//! Configuration module for Finance Diary
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::DiaryPaths;
pub use settings::Settings;
