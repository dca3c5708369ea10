//! Core types and data structures for the bookkeeping engine

use bigdecimal::rounding::RoundingMode;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier for a company (tenant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CompanyId(pub Uuid);

impl CompanyId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CompanyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier for an account within a company's chart of accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(pub Uuid);

impl AccountId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier for a posted voucher. Assigned sequentially by the store so
/// that ascending voucher id reproduces insertion order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct VoucherId(pub u64);

impl fmt::Display for VoucherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Round a monetary value to two decimal places, half-up.
///
/// Every amount the engine stores or sums passes through this single
/// quantization point; reports never re-round with a different policy.
pub fn quantize(amount: &BigDecimal) -> BigDecimal {
    amount.with_scale_round(2, RoundingMode::HalfUp)
}

/// Side of a voucher line in double-entry bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntrySide {
    /// Debit entry - increases Assets and Expenses, decreases Liabilities, Equity, and Income
    Debit,
    /// Credit entry - increases Liabilities, Equity, and Income, decreases Assets and Expenses
    Credit,
}

/// The five account groups recognized by the report builders.
///
/// `Account::group` itself is free text; anything that does not parse into
/// one of these five (case-insensitively) is tolerated in the chart and the
/// trial balance but ignored by the P&L and balance-sheet classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountGroup {
    Assets,
    Liabilities,
    Income,
    Expense,
    Equity,
}

impl AccountGroup {
    /// Parse a free-text group label, case-insensitively.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "assets" => Some(Self::Assets),
            "liabilities" => Some(Self::Liabilities),
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            "equity" => Some(Self::Equity),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assets => "Assets",
            Self::Liabilities => "Liabilities",
            Self::Income => "Income",
            Self::Expense => "Expense",
            Self::Equity => "Equity",
        }
    }
}

impl fmt::Display for AccountGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A company (tenant) with its fiscal-year configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    /// Fiscal year start month, 1-12.
    pub fy_start_month: u32,
    /// Fiscal year start day, 1-31. Days invalid for a given month are
    /// clamped to month-end when windows are resolved, never rejected.
    pub fy_start_day: u32,
    /// Reporting currency code, e.g. "INR".
    pub currency: String,
}

impl Company {
    /// Create a company. Out-of-range fiscal start values are clamped into
    /// 1-12 / 1-31 so every configuration yields a valid fiscal window.
    pub fn new(
        name: impl Into<String>,
        fy_start_month: u32,
        fy_start_day: u32,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            id: CompanyId::new(),
            name: name.into(),
            fy_start_month: fy_start_month.clamp(1, 12),
            fy_start_day: fy_start_day.clamp(1, 31),
            currency: currency.into(),
        }
    }
}

/// An account in a company's chart of accounts. Balances are always derived
/// from posted voucher lines, never stored on the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub company_id: CompanyId,
    /// Unique within the company, case-insensitively.
    pub name: String,
    /// Free-text group label; see [`AccountGroup`].
    pub group: String,
}

impl Account {
    pub fn new(company_id: CompanyId, name: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            id: AccountId::new(),
            company_id,
            name: name.into(),
            group: group.into(),
        }
    }

    /// The recognized group of this account, if its label parses.
    pub fn recognized_group(&self) -> Option<AccountGroup> {
        AccountGroup::parse(&self.group)
    }
}

/// A single debit or credit posting within a voucher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoucherLine {
    pub account_id: AccountId,
    /// Strictly positive, two-decimal amount.
    pub amount: BigDecimal,
    pub side: EntrySide,
    pub narration: Option<String>,
}

impl VoucherLine {
    pub fn new(
        account_id: AccountId,
        side: EntrySide,
        amount: BigDecimal,
        narration: Option<String>,
    ) -> Self {
        Self {
            account_id,
            amount: quantize(&amount),
            side,
            narration,
        }
    }

    pub fn debit(account_id: AccountId, amount: BigDecimal, narration: Option<String>) -> Self {
        Self::new(account_id, EntrySide::Debit, amount, narration)
    }

    pub fn credit(account_id: AccountId, amount: BigDecimal, narration: Option<String>) -> Self {
        Self::new(account_id, EntrySide::Credit, amount, narration)
    }

    pub fn is_debit(&self) -> bool {
        self.side == EntrySide::Debit
    }
}

/// An atomic, balanced batch of ledger postings dated as one transaction.
/// Exists only after passing validation; immutable once posted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    pub id: VoucherId,
    pub company_id: CompanyId,
    pub date: NaiveDate,
    pub narration: Option<String>,
    pub lines: Vec<VoucherLine>,
}

impl Voucher {
    pub fn total_debits(&self) -> BigDecimal {
        quantize(
            &self
                .lines
                .iter()
                .filter(|l| l.is_debit())
                .map(|l| &l.amount)
                .sum::<BigDecimal>(),
        )
    }

    pub fn total_credits(&self) -> BigDecimal {
        quantize(
            &self
                .lines
                .iter()
                .filter(|l| !l.is_debit())
                .map(|l| &l.amount)
                .sum::<BigDecimal>(),
        )
    }
}

/// Errors surfaced by the engine.
///
/// Voucher validation failures are user-correctable and carry the offending
/// values; `LedgerIntegrity` is distinct because it can only arise when the
/// validator was bypassed on the write path.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("company not found: {0}")]
    CompanyNotFound(CompanyId),
    #[error("account not found: {0}")]
    AccountNotFound(AccountId),
    #[error("voucher not found: {0}")]
    VoucherNotFound(VoucherId),
    #[error("voucher must have at least two lines (double-entry)")]
    TooFewLines,
    #[error("account {account} does not belong to company {company}")]
    CrossCompanyAccount {
        account: AccountId,
        company: CompanyId,
    },
    #[error("line amount must be a positive two-decimal value, got {0}")]
    InvalidAmount(BigDecimal),
    #[error("voucher is not balanced: debits = {debits}, credits = {credits}")]
    Unbalanced {
        debits: BigDecimal,
        credits: BigDecimal,
    },
    #[error("ledger out of balance: debits = {debits}, credits = {credits}")]
    LedgerIntegrity {
        debits: BigDecimal,
        credits: BigDecimal,
    },
    #[error("validation error: {0}")]
    Validation(String),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
