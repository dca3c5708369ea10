//! Account balance aggregation and ledger statements
//!
//! `account_balance` is the single arithmetic primitive behind every report:
//! net debits minus credits, debit-positive. Nothing else in the crate sums
//! line amounts with its own rounding.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::traits::{DateFilter, LedgerStore};
use crate::types::*;

/// Net balance of one account: `total debits - total credits`, restricted to
/// vouchers dated `<= as_of` when a cutoff is given. Positive means a net
/// debit balance; an account with no postings yields exactly `0.00`.
pub async fn account_balance<S: LedgerStore>(
    store: &S,
    company_id: CompanyId,
    account_id: AccountId,
    as_of: Option<NaiveDate>,
) -> EngineResult<BigDecimal> {
    let filter = match as_of {
        Some(cutoff) => DateFilter::UpTo(cutoff),
        None => DateFilter::AllTime,
    };
    ranged_balance(store, company_id, account_id, filter).await
}

/// Net debit balance over an arbitrary date filter. The statement builders
/// use this with `DateFilter::Between` for period figures.
pub async fn ranged_balance<S: LedgerStore>(
    store: &S,
    company_id: CompanyId,
    account_id: AccountId,
    filter: DateFilter,
) -> EngineResult<BigDecimal> {
    let debits = store
        .sum_line_amounts(company_id, account_id, EntrySide::Debit, filter)
        .await?;
    let credits = store
        .sum_line_amounts(company_id, account_id, EntrySide::Credit, filter)
        .await?;
    Ok(quantize(&(debits - credits)))
}

/// One row of an account's ledger statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub date: NaiveDate,
    pub voucher_id: VoucherId,
    pub narration: Option<String>,
    /// Set when the line was a debit, `None` otherwise.
    pub debit: Option<BigDecimal>,
    /// Set when the line was a credit, `None` otherwise.
    pub credit: Option<BigDecimal>,
    /// Left-to-right fold of `+debit / -credit` over the rows so far.
    pub running_balance: BigDecimal,
}

/// Build an account's ledger statement: every posted line in
/// `(date, voucher id)` order with a running balance.
pub async fn ledger_rows<S: LedgerStore>(
    store: &S,
    company_id: CompanyId,
    account_id: AccountId,
) -> EngineResult<Vec<LedgerRow>> {
    let lines = store.account_lines(company_id, account_id).await?;

    let mut running = quantize(&BigDecimal::from(0));
    let mut rows = Vec::with_capacity(lines.len());
    for line in lines {
        let (debit, credit) = match line.side {
            EntrySide::Debit => {
                running = quantize(&(&running + &line.amount));
                (Some(line.amount), None)
            }
            EntrySide::Credit => {
                running = quantize(&(&running - &line.amount));
                (None, Some(line.amount))
            }
        };
        rows.push(LedgerRow {
            date: line.date,
            voucher_id: line.voucher_id,
            narration: line.narration,
            debit,
            credit,
            running_balance: running.clone(),
        });
    }
    Ok(rows)
}
