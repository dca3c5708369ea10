//! Storage abstraction for the bookkeeping engine

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::*;

/// Date bound applied to line aggregation.
///
/// This is the one parameterized filter every consumer of
/// [`LedgerStore::sum_line_amounts`] shares: the ledger view, the trial
/// balance, the P&L and the balance sheet all aggregate through it, so there
/// is a single arithmetic path and a single rounding policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateFilter {
    /// No date restriction.
    #[default]
    AllTime,
    /// Voucher date `<=` the given cutoff (inclusive).
    UpTo(NaiveDate),
    /// Voucher date within `[start, end]` (inclusive on both ends).
    Between(NaiveDate, NaiveDate),
}

impl DateFilter {
    pub fn matches(&self, date: NaiveDate) -> bool {
        match self {
            Self::AllTime => true,
            Self::UpTo(cutoff) => date <= *cutoff,
            Self::Between(start, end) => date >= *start && date <= *end,
        }
    }
}

/// One posted line of an account's ledger, flattened for statement rendering.
/// Carries the owning voucher's date and id so rows can be ordered by
/// `(date, voucher id)` ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostedLine {
    pub date: NaiveDate,
    pub voucher_id: VoucherId,
    /// Voucher narration, falling back to the line's own narration.
    pub narration: Option<String>,
    pub amount: BigDecimal,
    pub side: EntrySide,
}

/// Storage abstraction for the ledger.
///
/// The engine works against this trait so any backend (SQL, key-value,
/// in-memory) can host the books. Implementations must make
/// [`append_voucher`](Self::append_voucher) atomic: a reader sees either the
/// whole voucher or none of it, never a partial set of lines.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Persist a company.
    async fn save_company(&mut self, company: &Company) -> EngineResult<()>;

    /// Fetch a company by id.
    async fn get_company(&self, company_id: CompanyId) -> EngineResult<Option<Company>>;

    /// List all companies, ordered by name.
    async fn list_companies(&self) -> EngineResult<Vec<Company>>;

    /// Persist an account (create or update).
    async fn save_account(&mut self, account: &Account) -> EngineResult<()>;

    /// Fetch an account by id, regardless of company.
    async fn get_account(&self, account_id: AccountId) -> EngineResult<Option<Account>>;

    /// List a company's accounts ordered by `(group, name)`, optionally
    /// restricted to one recognized group (matched case-insensitively).
    async fn list_accounts(
        &self,
        company_id: CompanyId,
        group: Option<AccountGroup>,
    ) -> EngineResult<Vec<Account>>;

    /// Atomically persist a voucher and all of its lines, assigning the next
    /// voucher id. Callers must have validated the voucher beforehand.
    async fn append_voucher(
        &mut self,
        company_id: CompanyId,
        date: NaiveDate,
        narration: Option<String>,
        lines: Vec<VoucherLine>,
    ) -> EngineResult<Voucher>;

    /// Fetch a voucher by id, scoped to a company.
    async fn get_voucher(
        &self,
        company_id: CompanyId,
        voucher_id: VoucherId,
    ) -> EngineResult<Option<Voucher>>;

    /// Sum the amounts of one account's lines on one side, subject to a date
    /// bound. The primitive behind every balance and report in the engine;
    /// returns a two-decimal value, `0.00` when nothing matches.
    async fn sum_line_amounts(
        &self,
        company_id: CompanyId,
        account_id: AccountId,
        side: EntrySide,
        filter: DateFilter,
    ) -> EngineResult<BigDecimal>;

    /// All posted lines for one account, ordered by `(date, voucher id)`
    /// ascending with insertion order breaking date ties.
    async fn account_lines(
        &self,
        company_id: CompanyId,
        account_id: AccountId,
    ) -> EngineResult<Vec<PostedLine>>;
}
