//! Balance sheet construction with retained-earnings rollup

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fiscal::fiscal_window;
use crate::ledger::balance::account_balance;
use crate::reports::income_statement::build_income_statement;
use crate::traits::LedgerStore;
use crate::types::*;

/// Label used for the synthetic equity row carrying the fiscal year's net
/// profit.
pub const RETAINED_EARNINGS_LABEL: &str = "Retained Earnings (FY Net)";

/// One balance-sheet row. `account` is `None` for the synthetic
/// retained-earnings row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetRow {
    pub account: Option<Account>,
    pub label: String,
    pub amount: BigDecimal,
}

impl SheetRow {
    fn for_account(account: Account, amount: BigDecimal) -> Self {
        Self {
            label: account.name.clone(),
            account: Some(account),
            amount,
        }
    }

    fn synthetic(label: &str, amount: BigDecimal) -> Self {
        Self {
            account: None,
            label: label.to_string(),
            amount,
        }
    }
}

/// A balance sheet as of a cutoff date.
///
/// In a fully and correctly posted ledger,
/// `total_assets == total_liabilities + total_equity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    pub as_of: NaiveDate,
    pub assets: Vec<SheetRow>,
    pub liabilities: Vec<SheetRow>,
    pub equity: Vec<SheetRow>,
    pub total_assets: BigDecimal,
    pub total_liabilities: BigDecimal,
    pub total_equity: BigDecimal,
}

/// Build the balance sheet as of `as_of`.
///
/// Asset balances are debit-positive and carried as computed; liability and
/// equity balances are sign-flipped to credit-positive for presentation.
/// Each section total accumulates only the non-negative rows. The current
/// fiscal year's net profit is then folded into equity as a synthetic
/// retained-earnings row, without the non-negative clamp, so a loss
/// legitimately reduces equity.
///
/// The fiscal window is derived from `as_of` (not "today"), keeping
/// historical snapshots correct.
pub async fn build_balance_sheet<S: LedgerStore>(
    store: &S,
    company: &Company,
    as_of: NaiveDate,
) -> EngineResult<BalanceSheet> {
    let zero = BigDecimal::from(0);

    let mut assets = Vec::new();
    let mut total_assets = quantize(&zero);
    for account in store
        .list_accounts(company.id, Some(AccountGroup::Assets))
        .await?
    {
        let balance = account_balance(store, company.id, account.id, Some(as_of)).await?;
        if balance > zero {
            total_assets = quantize(&(&total_assets + &balance));
        }
        assets.push(SheetRow::for_account(account, balance));
    }

    let mut liabilities = Vec::new();
    let mut total_liabilities = quantize(&zero);
    for account in store
        .list_accounts(company.id, Some(AccountGroup::Liabilities))
        .await?
    {
        let balance = quantize(&-account_balance(store, company.id, account.id, Some(as_of)).await?);
        if balance > zero {
            total_liabilities = quantize(&(&total_liabilities + &balance));
        }
        liabilities.push(SheetRow::for_account(account, balance));
    }

    let mut equity = Vec::new();
    let mut total_equity = quantize(&zero);
    for account in store
        .list_accounts(company.id, Some(AccountGroup::Equity))
        .await?
    {
        let balance = quantize(&-account_balance(store, company.id, account.id, Some(as_of)).await?);
        if balance > zero {
            total_equity = quantize(&(&total_equity + &balance));
        }
        equity.push(SheetRow::for_account(account, balance));
    }

    // Fold the fiscal year's net result into equity.
    let window = fiscal_window(company, as_of);
    let statement = build_income_statement(store, company.id, window.start, window.end).await?;
    if statement.net_profit != zero {
        total_equity = quantize(&(&total_equity + &statement.net_profit));
        equity.push(SheetRow::synthetic(
            RETAINED_EARNINGS_LABEL,
            statement.net_profit,
        ));
    }

    Ok(BalanceSheet {
        as_of,
        assets,
        liabilities,
        equity,
        total_assets,
        total_liabilities,
        total_equity,
    })
}
