//! Main ledger facade coordinating companies, accounts, vouchers and reports

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::collections::HashMap;

use crate::fiscal::{fiscal_window, FiscalWindow};
use crate::ledger::balance::{self, LedgerRow};
use crate::ledger::voucher::{validate_draft, VoucherDraft};
use crate::reports::{
    build_balance_sheet, build_income_statement, build_trial_balance, BalanceSheet,
    IncomeStatement, TrialBalance,
};
use crate::traits::LedgerStore;
use crate::types::*;
use crate::utils::validation::{validate_account_name, validate_company_name, validate_narration};

/// Starter chart of accounts seeded for a new company: `(name, group)`.
const DEFAULT_CHART: &[(&str, &str)] = &[
    ("Cash", "Assets"),
    ("Bank", "Assets"),
    ("Sundry Debtors", "Assets"),
    ("Sundry Creditors", "Liabilities"),
    ("Capital", "Equity"),
    ("Sales", "Income"),
    ("Purchase", "Expense"),
    ("Rent", "Expense"),
    ("GST Payable", "Liabilities"),
];

/// The bookkeeping engine over a storage backend.
///
/// Every operation takes the company id explicitly; there is no ambient
/// "current company". Reports are pure functions of the posted vouchers:
/// repeated calls over unchanged data return identical results.
pub struct Ledger<S: LedgerStore> {
    store: S,
}

impl<S: LedgerStore> Ledger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store, e.g. for backup exports.
    pub fn store(&self) -> &S {
        &self.store
    }

    // Company administration

    /// Create a company. Name must be non-empty and unique
    /// (case-insensitively); degenerate fiscal-start values are clamped.
    pub async fn create_company(
        &mut self,
        name: &str,
        fy_start_month: u32,
        fy_start_day: u32,
        currency: &str,
    ) -> EngineResult<Company> {
        validate_company_name(name)?;
        let lowered = name.trim().to_lowercase();
        if self
            .store
            .list_companies()
            .await?
            .iter()
            .any(|c| c.name.to_lowercase() == lowered)
        {
            return Err(EngineError::Validation(format!(
                "company name '{}' already exists",
                name.trim()
            )));
        }

        let company = Company::new(name.trim(), fy_start_month, fy_start_day, currency);
        self.store.save_company(&company).await?;
        Ok(company)
    }

    pub async fn company(&self, company_id: CompanyId) -> EngineResult<Company> {
        self.store
            .get_company(company_id)
            .await?
            .ok_or(EngineError::CompanyNotFound(company_id))
    }

    pub async fn list_companies(&self) -> EngineResult<Vec<Company>> {
        self.store.list_companies().await
    }

    /// The fiscal-year window containing `reference` for a company.
    pub async fn fiscal_window_for(
        &self,
        company_id: CompanyId,
        reference: NaiveDate,
    ) -> EngineResult<FiscalWindow> {
        let company = self.company(company_id).await?;
        Ok(fiscal_window(&company, reference))
    }

    // Chart of accounts administration

    /// Create an account. Names are unique within the company,
    /// case-insensitively; the group label is stored as given.
    pub async fn create_account(
        &mut self,
        company_id: CompanyId,
        name: &str,
        group: &str,
    ) -> EngineResult<Account> {
        self.company(company_id).await?;
        validate_account_name(name)?;
        self.ensure_name_free(company_id, name, None).await?;

        let account = Account::new(company_id, name.trim(), group.trim());
        self.store.save_account(&account).await?;
        Ok(account)
    }

    /// Rename and/or regroup an existing account.
    pub async fn update_account(
        &mut self,
        company_id: CompanyId,
        account_id: AccountId,
        name: &str,
        group: &str,
    ) -> EngineResult<Account> {
        let mut account = self.account(company_id, account_id).await?;
        validate_account_name(name)?;
        self.ensure_name_free(company_id, name, Some(account_id))
            .await?;

        account.name = name.trim().to_string();
        account.group = group.trim().to_string();
        self.store.save_account(&account).await?;
        Ok(account)
    }

    /// Fetch an account, erroring if it is missing or belongs to another
    /// company.
    pub async fn account(
        &self,
        company_id: CompanyId,
        account_id: AccountId,
    ) -> EngineResult<Account> {
        let account = self
            .store
            .get_account(account_id)
            .await?
            .ok_or(EngineError::AccountNotFound(account_id))?;
        if account.company_id != company_id {
            return Err(EngineError::CrossCompanyAccount {
                account: account_id,
                company: company_id,
            });
        }
        Ok(account)
    }

    /// List a company's accounts ordered by `(group, name)`.
    pub async fn list_accounts(
        &self,
        company_id: CompanyId,
        group: Option<AccountGroup>,
    ) -> EngineResult<Vec<Account>> {
        self.store.list_accounts(company_id, group).await
    }

    /// Seed the starter chart of accounts for a freshly created company.
    pub async fn seed_default_accounts(
        &mut self,
        company_id: CompanyId,
    ) -> EngineResult<Vec<Account>> {
        let mut accounts = Vec::with_capacity(DEFAULT_CHART.len());
        for (name, group) in DEFAULT_CHART {
            accounts.push(self.create_account(company_id, name, group).await?);
        }
        Ok(accounts)
    }

    async fn ensure_name_free(
        &self,
        company_id: CompanyId,
        name: &str,
        except: Option<AccountId>,
    ) -> EngineResult<()> {
        let lowered = name.trim().to_lowercase();
        let clash = self
            .store
            .list_accounts(company_id, None)
            .await?
            .into_iter()
            .any(|a| a.name.to_lowercase() == lowered && Some(a.id) != except);
        if clash {
            return Err(EngineError::Validation(format!(
                "account name '{}' already exists for this company",
                name.trim()
            )));
        }
        Ok(())
    }

    // Voucher posting and retrieval

    /// Validate and atomically post a voucher draft.
    ///
    /// Runs the double-entry checks in order (line count, account ownership,
    /// amounts, balance) and only then hands the lines to the store; on any
    /// rejection nothing is written.
    pub async fn post_voucher(
        &mut self,
        company_id: CompanyId,
        draft: VoucherDraft,
    ) -> EngineResult<Voucher> {
        self.company(company_id).await?;
        if let Some(narration) = &draft.narration {
            validate_narration(narration)?;
        }

        let mut accounts = HashMap::new();
        for line in &draft.lines {
            if let Some(account) = self.store.get_account(line.account_id).await? {
                accounts.insert(account.id, account);
            }
        }
        validate_draft(&draft, company_id, &accounts)?;

        self.store
            .append_voucher(company_id, draft.date, draft.narration, draft.lines)
            .await
    }

    pub async fn voucher(
        &self,
        company_id: CompanyId,
        voucher_id: VoucherId,
    ) -> EngineResult<Voucher> {
        self.store
            .get_voucher(company_id, voucher_id)
            .await?
            .ok_or(EngineError::VoucherNotFound(voucher_id))
    }

    // Balances and reports

    /// Net debit balance of an account, optionally bounded by `as_of`.
    pub async fn account_balance(
        &self,
        company_id: CompanyId,
        account_id: AccountId,
        as_of: Option<NaiveDate>,
    ) -> EngineResult<BigDecimal> {
        self.account(company_id, account_id).await?;
        balance::account_balance(&self.store, company_id, account_id, as_of).await
    }

    /// An account's ledger statement with running balances.
    pub async fn account_ledger(
        &self,
        company_id: CompanyId,
        account_id: AccountId,
    ) -> EngineResult<Vec<LedgerRow>> {
        self.account(company_id, account_id).await?;
        balance::ledger_rows(&self.store, company_id, account_id).await
    }

    /// Trial balance over all posted vouchers.
    pub async fn trial_balance(&self, company_id: CompanyId) -> EngineResult<TrialBalance> {
        self.company(company_id).await?;
        build_trial_balance(&self.store, company_id).await
    }

    /// Income statement over an explicit inclusive date range.
    pub async fn income_statement(
        &self,
        company_id: CompanyId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<IncomeStatement> {
        self.company(company_id).await?;
        build_income_statement(&self.store, company_id, start, end).await
    }

    /// Income statement over the fiscal year containing `reference`.
    pub async fn fiscal_year_statement(
        &self,
        company_id: CompanyId,
        reference: NaiveDate,
    ) -> EngineResult<IncomeStatement> {
        let company = self.company(company_id).await?;
        let window = fiscal_window(&company, reference);
        build_income_statement(&self.store, company_id, window.start, window.end).await
    }

    /// Balance sheet as of a cutoff date, with the fiscal year's net profit
    /// rolled into equity.
    pub async fn balance_sheet(
        &self,
        company_id: CompanyId,
        as_of: NaiveDate,
    ) -> EngineResult<BalanceSheet> {
        let company = self.company(company_id).await?;
        build_balance_sheet(&self.store, &company, as_of).await
    }
}
