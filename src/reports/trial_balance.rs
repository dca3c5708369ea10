//! Trial balance construction

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::ledger::balance::account_balance;
use crate::traits::LedgerStore;
use crate::types::*;

/// One account's net balance, classified into a debit or credit column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    pub account: Account,
    pub debit: Option<BigDecimal>,
    pub credit: Option<BigDecimal>,
}

/// A trial balance: every account's net balance with column totals.
///
/// For a ledger written only through the validator the two totals are equal;
/// a divergence is a data-integrity condition, not a user mistake, and is
/// surfaced via [`check_integrity`](Self::check_integrity) rather than
/// silently adjusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialBalance {
    pub rows: Vec<TrialBalanceRow>,
    pub total_debit: BigDecimal,
    pub total_credit: BigDecimal,
}

impl TrialBalance {
    pub fn is_balanced(&self) -> bool {
        self.total_debit == self.total_credit
    }

    /// Error with [`EngineError::LedgerIntegrity`] if the columns diverge.
    pub fn check_integrity(&self) -> EngineResult<()> {
        if self.is_balanced() {
            Ok(())
        } else {
            Err(EngineError::LedgerIntegrity {
                debits: self.total_debit.clone(),
                credits: self.total_credit.clone(),
            })
        }
    }
}

/// Build the trial balance for a company over all posted vouchers.
///
/// Accounts are listed in `(group, name)` order. A non-negative net balance
/// lands in the debit column; a negative one is negated into the credit
/// column. Accounts with no postings appear with a `0.00` debit entry.
pub async fn build_trial_balance<S: LedgerStore>(
    store: &S,
    company_id: CompanyId,
) -> EngineResult<TrialBalance> {
    let accounts = store.list_accounts(company_id, None).await?;

    let mut rows = Vec::with_capacity(accounts.len());
    let mut total_debit = quantize(&BigDecimal::from(0));
    let mut total_credit = quantize(&BigDecimal::from(0));

    for account in accounts {
        let net = account_balance(store, company_id, account.id, None).await?;
        let (debit, credit) = if net >= BigDecimal::from(0) {
            total_debit = quantize(&(&total_debit + &net));
            (Some(net), None)
        } else {
            let flipped = quantize(&-net);
            total_credit = quantize(&(&total_credit + &flipped));
            (None, Some(flipped))
        };
        rows.push(TrialBalanceRow {
            account,
            debit,
            credit,
        });
    }

    Ok(TrialBalance {
        rows,
        total_debit,
        total_credit,
    })
}
