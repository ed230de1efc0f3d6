//! Account display formatting
//!
//! Balances are shown as a single row: one column per account, then the total.

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::models::{total_balance, Account};

/// Format current balances as a one-row table
pub fn format_balances(accounts: &[Account]) -> String {
    if accounts.is_empty() {
        return "No accounts found.".to_string();
    }

    let mut header: Vec<String> = accounts.iter().map(|a| a.name().to_string()).collect();
    header.push("Total".to_string());

    let mut row: Vec<String> = accounts
        .iter()
        .map(|a| a.current_amount().to_string())
        .collect();
    row.push(total_balance(accounts).to_string());

    let mut builder = Builder::default();
    builder.push_record(header);
    builder.push_record(row);

    let mut table = builder.build();
    table.with(Style::ascii());
    table.to_string()
}
