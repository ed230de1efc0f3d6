//! Display formatting for terminal output
//!
//! Renders balances and monthly reports as text tables.

pub mod account;
pub mod report;

pub use account::format_balances;
pub use report::{format_monthly_report, format_report_months};
