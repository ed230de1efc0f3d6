//! Operation models
//!
//! A [`FinanceOperation`] moves money into or out of the default account and
//! carries one to three category tags. A [`NeutralOperation`] moves money
//! between two named accounts and leaves the total untouched.
//!
//! Both are validated on construction and immutable afterwards.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

use super::account::normalize_name;
use super::amount::Amount;
use super::date::parse_operation_date;
use super::ids::OperationId;
use crate::error::ValidationError;

/// Most tags a finance operation can carry
pub const MAX_OPERATION_KINDS: usize = 3;

/// Direction of a finance operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    /// Money entering the default account
    Deposit,
    /// Money leaving the default account
    Withdraw,
}

impl OperationType {
    /// Sign used in report rows
    pub fn sign(&self) -> char {
        match self {
            Self::Deposit => '+',
            Self::Withdraw => '-',
        }
    }
}

impl FromStr for OperationType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deposit" => Ok(Self::Deposit),
            "withdraw" | "withdrawal" => Ok(Self::Withdraw),
            _ => Err(ValidationError::InvalidOperationType(s.to_string())),
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit => write!(f, "Deposit"),
            Self::Withdraw => write!(f, "Withdraw"),
        }
    }
}

/// Closed set of category tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Study,
    Food,
    Fun,
    CreditCard,
    BankWithdrawal,
    Salary,
    Friends,
    Miluim,
    Commission,
    Family,
    Insurance,
    Trip,
    Shopping,
}

impl OperationKind {
    /// Every recognized tag, in declaration order
    pub const ALL: [OperationKind; 13] = [
        Self::Study,
        Self::Food,
        Self::Fun,
        Self::CreditCard,
        Self::BankWithdrawal,
        Self::Salary,
        Self::Friends,
        Self::Miluim,
        Self::Commission,
        Self::Family,
        Self::Insurance,
        Self::Trip,
        Self::Shopping,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Study => "Study",
            Self::Food => "Food",
            Self::Fun => "Fun",
            Self::CreditCard => "CreditCard",
            Self::BankWithdrawal => "BankWithdrawal",
            Self::Salary => "Salary",
            Self::Friends => "Friends",
            Self::Miluim => "Miluim",
            Self::Commission => "Commission",
            Self::Family => "Family",
            Self::Insurance => "Insurance",
            Self::Trip => "Trip",
            Self::Shopping => "Shopping",
        }
    }
}

impl FromStr for OperationKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['-', '_', ' '], "").to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().to_lowercase() == wanted)
            .ok_or_else(|| ValidationError::InvalidOperationKind(s.to_string()))
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One to three category tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationKinds(Vec<OperationKind>);

impl OperationKinds {
    /// Parse tags, rejecting unknown names and counts outside 1..=3
    pub fn parse<S: AsRef<str>>(tags: &[S]) -> Result<Self, ValidationError> {
        if tags.is_empty() || tags.len() > MAX_OPERATION_KINDS {
            let joined = tags.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",");
            return Err(ValidationError::InvalidOperationKind(joined));
        }

        let kinds = tags
            .iter()
            .map(|tag| tag.as_ref().parse())
            .collect::<Result<Vec<OperationKind>, _>>()?;

        Ok(Self(kinds))
    }

    pub fn as_slice(&self) -> &[OperationKind] {
        &self.0
    }

    pub fn contains(&self, kind: OperationKind) -> bool {
        self.0.contains(&kind)
    }
}

impl fmt::Display for OperationKinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(OperationKind::as_str).collect();
        f.write_str(&names.join("|"))
    }
}

/// Strip surrounding quotes and whitespace, rejecting empty text
fn validate_reason(reason: &str) -> Result<String, ValidationError> {
    let reason = reason.trim().trim_matches(|c: char| c == '"' || c == '\'').trim();
    if reason.is_empty() {
        return Err(ValidationError::InvalidReason);
    }
    Ok(reason.to_string())
}

fn validate_date(date: &str) -> Result<NaiveDateTime, ValidationError> {
    parse_operation_date(date).ok_or_else(|| ValidationError::InvalidDate(date.to_string()))
}

/// Deposit or withdrawal against the default account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinanceOperation {
    id: OperationId,
    date: NaiveDateTime,
    operation_type: OperationType,
    amount: Amount,
    kinds: OperationKinds,
    reason: String,
}

impl FinanceOperation {
    /// Validate raw input and build the operation
    ///
    /// Checks run in order: date, operation type, amount, kinds, reason.
    /// The first failure is returned.
    pub fn new<S: AsRef<str>>(
        id: OperationId,
        date: &str,
        operation_type: &str,
        amount: i64,
        kinds: &[S],
        reason: &str,
    ) -> Result<Self, ValidationError> {
        let date = validate_date(date)?;
        let operation_type: OperationType = operation_type.parse()?;
        let amount = Amount::new(amount)?;
        let kinds = OperationKinds::parse(kinds)?;
        let reason = validate_reason(reason)?;

        Ok(Self {
            id,
            date,
            operation_type,
            amount,
            kinds,
            reason,
        })
    }

    pub fn id(&self) -> OperationId {
        self.id
    }

    pub fn date(&self) -> NaiveDateTime {
        self.date
    }

    pub fn operation_type(&self) -> OperationType {
        self.operation_type
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn kinds(&self) -> &OperationKinds {
        &self.kinds
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Transfer between two named accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeutralOperation {
    id: OperationId,
    date: NaiveDateTime,
    amount: Amount,
    source_account: String,
    destination_account: String,
    reason: String,
}

impl NeutralOperation {
    /// Validate raw input and build the transfer
    ///
    /// Checks run in order: date, amount, account names, reason. Whether the
    /// accounts exist is the ledger's concern, not the model's.
    pub fn new(
        id: OperationId,
        date: &str,
        amount: i64,
        source_account: &str,
        destination_account: &str,
        reason: &str,
    ) -> Result<Self, ValidationError> {
        let date = validate_date(date)?;
        let amount = Amount::new(amount)?;

        let source_account = source_account.trim();
        let destination_account = destination_account.trim();
        if source_account.is_empty() || destination_account.is_empty() {
            return Err(ValidationError::EmptyAccountName);
        }
        if normalize_name(source_account) == normalize_name(destination_account) {
            return Err(ValidationError::SameAccount(destination_account.to_string()));
        }

        let reason = validate_reason(reason)?;

        Ok(Self {
            id,
            date,
            amount,
            source_account: source_account.to_string(),
            destination_account: destination_account.to_string(),
            reason,
        })
    }

    pub fn id(&self) -> OperationId {
        self.id
    }

    pub fn date(&self) -> NaiveDateTime {
        self.date
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn source_account(&self) -> &str {
        &self.source_account
    }

    pub fn destination_account(&self) -> &str {
        &self.destination_account
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}
