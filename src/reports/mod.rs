//! Reports module for Finance Diary
//!
//! The monthly report engine and the relative "since" range built on it.

pub mod monthly;
pub mod since;

pub use monthly::Report;
pub use since::{months_in_range, SincePeriod};
