//! Report display formatting
//!
//! Each month is rendered as one table: a row per operation followed by a
//! summary row holding the month-end balance of every account.

use chrono::NaiveDate;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::models::format_display_date;
use crate::reports::Report;

const FIXED_COLUMNS: [&str; 4] = ["Date", "Reason", "Type", "Amount"];

/// Format one month of a report
///
/// `report` should already be filtered with
/// [`Report::filter_by_month_and_year`]; `date_format` is a strftime pattern.
/// A pattern that cannot render falls back to `dd/mm/yyyy`.
pub fn format_monthly_report(report: &Report, month: u32, year: i32, date_format: &str) -> String {
    let title = NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first| first.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{:02}/{}", month, year));

    let account_count = report.accounts().len();
    let blanks = || std::iter::repeat(String::new()).take(account_count + 1);

    let mut builder = Builder::default();

    let mut header: Vec<String> = FIXED_COLUMNS.iter().map(|c| c.to_string()).collect();
    header.extend(report.accounts().iter().map(|a| a.name().to_string()));
    header.push("Total".to_string());
    builder.push_record(header);

    for op in report.finance_operations() {
        let mut row = vec![
            format_display_date(&op.date(), date_format),
            op.reason().to_string(),
            op.operation_type().sign().to_string(),
            op.amount().to_string(),
        ];
        row.extend(blanks());
        builder.push_record(row);
    }

    for op in report.neutral_operations() {
        let mut row = vec![
            format_display_date(&op.date(), date_format),
            format!(
                "{} ({} -> {})",
                op.reason(),
                op.source_account(),
                op.destination_account()
            ),
            "N".to_string(),
            op.amount().to_string(),
        ];
        row.extend(blanks());
        builder.push_record(row);
    }

    let mut summary = vec![String::new(); FIXED_COLUMNS.len()];
    summary.extend(
        report
            .accounts()
            .iter()
            .map(|a| a.current_amount().to_string()),
    );
    summary.push(report.total().to_string());
    builder.push_record(summary);

    let mut table = builder.build();
    table.with(Style::ascii());
    format!("{}\n{}", title, table)
}

/// Format consecutive months of the same report
pub fn format_report_months(report: &Report, months: &[(u32, i32)], date_format: &str) -> String {
    months
        .iter()
        .map(|&(month, year)| {
            let monthly = report.filter_by_month_and_year(month, year);
            format_monthly_report(&monthly, month, year, date_format)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
