//! Shell commands
//!
//! Every shell line is parsed by clap into a [`ShellCommand`] and executed
//! against the ledger.

use std::io::Write;

use chrono::Local;
use clap::{Args, Parser, Subcommand};

use crate::config::settings::Settings;
use crate::display::{format_balances, format_report_months};
use crate::error::DiaryResult;
use crate::ledger::Ledger;
use crate::models::OperationType;
use crate::reports::{months_in_range, SincePeriod};
use crate::storage::LedgerStore;

/// One line of shell input
#[derive(Parser, Debug)]
#[command(
    name = "diary",
    no_binary_name = true,
    disable_version_flag = true,
    override_usage = "<COMMAND> [ARGS]"
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Arguments shared by deposits and withdrawals
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct FinanceArgs {
    /// Amount (positive)
    #[arg(allow_negative_numbers = true)]
    pub amount: i64,
    /// Operation date (e.g. 24/06/2020 or 2020-06-24)
    #[arg(short, long)]
    pub date: String,
    /// One to three kinds, comma separated (e.g. Food,Friends)
    #[arg(short = 'k', long = "kind", required = true, value_delimiter = ',')]
    pub kinds: Vec<String>,
    /// Free text reason
    #[arg(short, long)]
    pub reason: String,
}

/// Shell subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Register a new account
    Register {
        /// Account name
        name: String,
        /// Initial amount
        #[arg(default_value_t = 0, allow_negative_numbers = true)]
        initial_amount: i64,
    },
    /// Deposit into the default account
    Deposit(FinanceArgs),
    /// Withdraw from the default account
    Withdraw(FinanceArgs),
    /// Move money between two accounts
    Move {
        /// Amount (positive)
        #[arg(allow_negative_numbers = true)]
        amount: i64,
        /// Operation date
        #[arg(short, long)]
        date: String,
        /// Source account
        #[arg(short, long)]
        source: String,
        /// Destination account
        #[arg(short = 't', long = "to", alias = "dest")]
        destination: String,
        /// Free text reason
        #[arg(short, long)]
        reason: String,
    },
    /// Show account balances or the monthly report
    Get {
        /// What to show (accounts, report)
        object: String,
        /// Report range: N or Nm months, Ny years; all history when omitted
        #[arg(long, default_value = "")]
        since: String,
    },
    /// Save all changes
    Save,
}

/// What `get` shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Balances,
    Report,
}

impl ObjectType {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "cash" | "cash-register" | "cash register" | "register" | "registers" | "status"
            | "accounts" => Some(Self::Balances),
            "report" | "reports" => Some(Self::Report),
            _ => None,
        }
    }
}

/// Whether a command went through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Rejected,
}

/// Run one parsed command, writing any table output to `out`
pub async fn execute<S, W>(
    ledger: &mut Ledger<S>,
    settings: &Settings,
    command: ShellCommand,
    out: &mut W,
) -> DiaryResult<Outcome>
where
    S: LedgerStore,
    W: Write,
{
    let accepted = match command {
        ShellCommand::Register {
            name,
            initial_amount,
        } => ledger.add_account(&name, initial_amount),
        ShellCommand::Deposit(args) => add_finance(ledger, OperationType::Deposit, &args),
        ShellCommand::Withdraw(args) => add_finance(ledger, OperationType::Withdraw, &args),
        ShellCommand::Move {
            amount,
            date,
            source,
            destination,
            reason,
        } => ledger.add_neutral_operation(&date, amount, &source, &destination, &reason),
        ShellCommand::Get { object, since } => match ObjectType::parse(&object) {
            Some(ObjectType::Balances) => {
                writeln!(out, "{}", format_balances(&ledger.list_accounts()))?;
                true
            }
            Some(ObjectType::Report) => {
                let period = SincePeriod::parse(&since)?;
                let today = Local::now().date_naive();
                let start = period.start_date(today, settings.report_start);
                let months = months_in_range(start, today);
                let report = ledger.report();
                writeln!(
                    out,
                    "{}",
                    format_report_months(&report, &months, &settings.display_date_format)
                )?;
                true
            }
            None => {
                tracing::warn!("Object type {} did not match", object);
                false
            }
        },
        ShellCommand::Save => {
            ledger.save().await?;
            writeln!(out, "Saved.")?;
            true
        }
    };

    Ok(if accepted {
        Outcome::Done
    } else {
        Outcome::Rejected
    })
}

fn add_finance<S: LedgerStore>(
    ledger: &mut Ledger<S>,
    operation_type: OperationType,
    args: &FinanceArgs,
) -> bool {
    ledger.add_finance_operation(
        &args.date,
        &operation_type.to_string(),
        args.amount,
        &args.kinds,
        &args.reason,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::tokenize::tokenize;
    use crate::config::paths::DiaryPaths;
    use crate::storage::{initialize_storage, CsvStore};
    use tempfile::TempDir;

    fn parse(line: &str) -> Result<ShellCommand, clap::Error> {
        ShellLine::try_parse_from(tokenize(line)).map(|parsed| parsed.command)
    }

    async fn create_test_ledger() -> (TempDir, Ledger<CsvStore>) {
        let temp_dir = TempDir::new().unwrap();
        let paths = DiaryPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths, "Default Account", 0).await.unwrap();
        let ledger = Ledger::load(CsvStore::new(paths), "Default Account").unwrap();
        (temp_dir, ledger)
    }

    #[test]
    fn test_parse_deposit() {
        let command = parse(r#"deposit 500 -d 24/06/2020 -k Friends,Food -r "dinner out""#).unwrap();
        assert_eq!(
            command,
            ShellCommand::Deposit(FinanceArgs {
                amount: 500,
                date: "24/06/2020".into(),
                kinds: vec!["Friends".into(), "Food".into()],
                reason: "dinner out".into(),
            })
        );
    }

    #[test]
    fn test_parse_negative_amount_reaches_validation() {
        let command = parse("withdraw -5 -d 24/06/2020 -k Food -r lunch").unwrap();
        assert!(matches!(command, ShellCommand::Withdraw(FinanceArgs { amount: -5, .. })));
    }

    #[test]
    fn test_parse_move() {
        let command =
            parse(r#"move 400 -d 21/06/2020 -s cash1 -t "Default Account" -r atm"#).unwrap();
        assert_eq!(
            command,
            ShellCommand::Move {
                amount: 400,
                date: "21/06/2020".into(),
                source: "cash1".into(),
                destination: "Default Account".into(),
                reason: "atm".into(),
            }
        );
    }

    #[test]
    fn test_parse_register_default_amount() {
        assert_eq!(
            parse("register cash1").unwrap(),
            ShellCommand::Register {
                name: "cash1".into(),
                initial_amount: 0
            }
        );
    }

    #[test]
    fn test_parse_missing_required_option() {
        assert!(parse("deposit 500 -d 24/06/2020 -r lunch").is_err());
        assert!(parse("launch").is_err());
    }

    #[test]
    fn test_object_type_aliases() {
        for alias in ["cash", "Cash-Register", "registers", "STATUS", "accounts"] {
            assert_eq!(ObjectType::parse(alias), Some(ObjectType::Balances));
        }
        assert_eq!(ObjectType::parse("Reports"), Some(ObjectType::Report));
        assert_eq!(ObjectType::parse("budget"), None);
    }

    #[tokio::test]
    async fn test_execute_get_accounts() {
        let (_temp_dir, mut ledger) = create_test_ledger().await;
        let settings = Settings::default();
        let mut out = Vec::new();

        let outcome = execute(
            &mut ledger,
            &settings,
            parse("register cash1 2000").unwrap(),
            &mut out,
        )
        .await
        .unwrap();
        assert_eq!(outcome, Outcome::Done);

        execute(&mut ledger, &settings, parse("get status").unwrap(), &mut out)
            .await
            .unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("cash1"));
        assert!(output.contains("2000"));
    }

    #[tokio::test]
    async fn test_execute_rejected_operation() {
        let (_temp_dir, mut ledger) = create_test_ledger().await;
        let settings = Settings::default();
        let mut out = Vec::new();

        let outcome = execute(
            &mut ledger,
            &settings,
            parse("deposit 500 -d 24/06/2020 -k Groceries -r lunch").unwrap(),
            &mut out,
        )
        .await
        .unwrap();
        assert_eq!(outcome, Outcome::Rejected);
        assert!(ledger.finance_operations().is_empty());
    }

    #[tokio::test]
    async fn test_execute_bad_since_is_an_error() {
        let (_temp_dir, mut ledger) = create_test_ledger().await;
        let settings = Settings::default();
        let mut out = Vec::new();

        let result = execute(
            &mut ledger,
            &settings,
            parse("get report --since 3w").unwrap(),
            &mut out,
        )
        .await;
        assert!(result.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn test_execute_report_since() {
        let (_temp_dir, mut ledger) = create_test_ledger().await;
        let settings = Settings::default();
        let mut out = Vec::new();

        let today = Local::now().date_naive().format("%d/%m/%Y").to_string();
        let line = format!("deposit 500 -d {} -k Salary -r pay", today);
        execute(&mut ledger, &settings, parse(&line).unwrap(), &mut out)
            .await
            .unwrap();

        execute(
            &mut ledger,
            &settings,
            parse("get report --since 1").unwrap(),
            &mut out,
        )
        .await
        .unwrap();
        let output = String::from_utf8(out).unwrap();
        assert_eq!(output.matches("Total").count(), 2);
        assert!(output.contains("pay"));
    }
}
