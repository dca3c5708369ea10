//! Income statement (profit and loss) construction

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ledger::balance::ranged_balance;
use crate::traits::{DateFilter, LedgerStore};
use crate::types::*;

/// One account's contribution to an income or expense section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementRow {
    pub account: Account,
    pub amount: BigDecimal,
}

/// An income statement over an inclusive date range.
///
/// Per-account amounts are reported as computed, including negative values
/// from contra-postings. The section totals accumulate only the non-negative
/// rows, so a mis-posted account displays its negative figure without
/// deflating the total it sits under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatement {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub income: Vec<StatementRow>,
    pub expenses: Vec<StatementRow>,
    pub total_income: BigDecimal,
    pub total_expense: BigDecimal,
    /// `total_income - total_expense`.
    pub net_profit: BigDecimal,
}

/// Build the income statement for `[start, end]`.
///
/// Income accounts accrue on the credit side (`credits - debits`); expense
/// accounts on the debit side (`debits - credits`). Only accounts whose
/// group parses as `Income` or `Expense` participate.
pub async fn build_income_statement<S: LedgerStore>(
    store: &S,
    company_id: CompanyId,
    start: NaiveDate,
    end: NaiveDate,
) -> EngineResult<IncomeStatement> {
    let filter = DateFilter::Between(start, end);
    let zero = BigDecimal::from(0);

    let mut income = Vec::new();
    let mut total_income = quantize(&zero);
    for account in store
        .list_accounts(company_id, Some(AccountGroup::Income))
        .await?
    {
        let amount = quantize(&-ranged_balance(store, company_id, account.id, filter).await?);
        if amount > zero {
            total_income = quantize(&(&total_income + &amount));
        }
        income.push(StatementRow { account, amount });
    }

    let mut expenses = Vec::new();
    let mut total_expense = quantize(&zero);
    for account in store
        .list_accounts(company_id, Some(AccountGroup::Expense))
        .await?
    {
        let amount = ranged_balance(store, company_id, account.id, filter).await?;
        if amount > zero {
            total_expense = quantize(&(&total_expense + &amount));
        }
        expenses.push(StatementRow { account, amount });
    }

    let net_profit = quantize(&(&total_income - &total_expense));
    Ok(IncomeStatement {
        start,
        end,
        income,
        expenses,
        total_income,
        total_expense,
        net_profit,
    })
}
