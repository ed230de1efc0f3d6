//! CLI command handlers
//!
//! The interactive shell: line tokenizing, clap parsing of each line and
//! dispatch onto the ledger.

pub mod commands;
pub mod shell;
pub mod tokenize;

pub use commands::{execute, ObjectType, Outcome, ShellCommand, ShellLine};
pub use shell::{is_exit_word, run_shell};
pub use tokenize::tokenize;
