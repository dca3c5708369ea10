//! In-memory store implementation for testing and development

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

#[derive(Debug, Default)]
struct Inner {
    companies: HashMap<CompanyId, Company>,
    accounts: HashMap<AccountId, Account>,
    // Keyed by voucher id so iteration order is insertion order.
    vouchers: BTreeMap<VoucherId, Voucher>,
    next_voucher_id: u64,
}

/// In-memory [`LedgerStore`] backed by a single `RwLock`, so a voucher
/// append is atomic with respect to every reader.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all data (useful between tests).
    pub fn clear(&self) {
        let mut inner = self.inner.write().unwrap();
        inner.companies.clear();
        inner.accounts.clear();
        inner.vouchers.clear();
        inner.next_voucher_id = 0;
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn save_company(&mut self, company: &Company) -> EngineResult<()> {
        self.inner
            .write()
            .unwrap()
            .companies
            .insert(company.id, company.clone());
        Ok(())
    }

    async fn get_company(&self, company_id: CompanyId) -> EngineResult<Option<Company>> {
        Ok(self.inner.read().unwrap().companies.get(&company_id).cloned())
    }

    async fn list_companies(&self) -> EngineResult<Vec<Company>> {
        let mut companies: Vec<Company> = self
            .inner
            .read()
            .unwrap()
            .companies
            .values()
            .cloned()
            .collect();
        companies.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(companies)
    }

    async fn save_account(&mut self, account: &Account) -> EngineResult<()> {
        self.inner
            .write()
            .unwrap()
            .accounts
            .insert(account.id, account.clone());
        Ok(())
    }

    async fn get_account(&self, account_id: AccountId) -> EngineResult<Option<Account>> {
        Ok(self.inner.read().unwrap().accounts.get(&account_id).cloned())
    }

    async fn list_accounts(
        &self,
        company_id: CompanyId,
        group: Option<AccountGroup>,
    ) -> EngineResult<Vec<Account>> {
        let mut accounts: Vec<Account> = self
            .inner
            .read()
            .unwrap()
            .accounts
            .values()
            .filter(|a| a.company_id == company_id)
            .filter(|a| group.is_none() || a.recognized_group() == group)
            .cloned()
            .collect();
        accounts.sort_by(|a, b| {
            (a.group.to_lowercase(), a.name.to_lowercase())
                .cmp(&(b.group.to_lowercase(), b.name.to_lowercase()))
        });
        Ok(accounts)
    }

    async fn append_voucher(
        &mut self,
        company_id: CompanyId,
        date: NaiveDate,
        narration: Option<String>,
        lines: Vec<VoucherLine>,
    ) -> EngineResult<Voucher> {
        let mut inner = self.inner.write().unwrap();
        inner.next_voucher_id += 1;
        let voucher = Voucher {
            id: VoucherId(inner.next_voucher_id),
            company_id,
            date,
            narration,
            lines,
        };
        inner.vouchers.insert(voucher.id, voucher.clone());
        Ok(voucher)
    }

    async fn get_voucher(
        &self,
        company_id: CompanyId,
        voucher_id: VoucherId,
    ) -> EngineResult<Option<Voucher>> {
        Ok(self
            .inner
            .read()
            .unwrap()
            .vouchers
            .get(&voucher_id)
            .filter(|v| v.company_id == company_id)
            .cloned())
    }

    async fn sum_line_amounts(
        &self,
        company_id: CompanyId,
        account_id: AccountId,
        side: EntrySide,
        filter: DateFilter,
    ) -> EngineResult<BigDecimal> {
        let inner = self.inner.read().unwrap();
        let total: BigDecimal = inner
            .vouchers
            .values()
            .filter(|v| v.company_id == company_id && filter.matches(v.date))
            .flat_map(|v| v.lines.iter())
            .filter(|l| l.account_id == account_id && l.side == side)
            .map(|l| &l.amount)
            .sum();
        Ok(quantize(&total))
    }

    async fn account_lines(
        &self,
        company_id: CompanyId,
        account_id: AccountId,
    ) -> EngineResult<Vec<PostedLine>> {
        let inner = self.inner.read().unwrap();
        let mut lines: Vec<PostedLine> = inner
            .vouchers
            .values()
            .filter(|v| v.company_id == company_id)
            .flat_map(|v| {
                v.lines
                    .iter()
                    .filter(|l| l.account_id == account_id)
                    .map(move |l| PostedLine {
                        date: v.date,
                        voucher_id: v.id,
                        narration: v.narration.clone().or_else(|| l.narration.clone()),
                        amount: l.amount.clone(),
                        side: l.side,
                    })
            })
            .collect();
        // Stable sort by date keeps voucher-id (insertion) order within a day.
        lines.sort_by_key(|l| l.date);
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn amount(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[tokio::test]
    async fn voucher_ids_are_sequential() {
        let mut store = MemoryStore::new();
        let co = Company::new("Acme", 4, 1, "INR");
        store.save_company(&co).await.unwrap();
        let cash = Account::new(co.id, "Cash", "Assets");
        let sales = Account::new(co.id, "Sales", "Income");
        store.save_account(&cash).await.unwrap();
        store.save_account(&sales).await.unwrap();

        for i in 1..=3u64 {
            let v = store
                .append_voucher(
                    co.id,
                    d(2024, 4, 1),
                    None,
                    vec![
                        VoucherLine::debit(cash.id, amount("10.00"), None),
                        VoucherLine::credit(sales.id, amount("10.00"), None),
                    ],
                )
                .await
                .unwrap();
            assert_eq!(v.id, VoucherId(i));
        }
    }

    #[tokio::test]
    async fn account_lines_order_by_date_then_voucher_id() {
        let mut store = MemoryStore::new();
        let co = Company::new("Acme", 4, 1, "INR");
        store.save_company(&co).await.unwrap();
        let cash = Account::new(co.id, "Cash", "Assets");
        let sales = Account::new(co.id, "Sales", "Income");
        store.save_account(&cash).await.unwrap();
        store.save_account(&sales).await.unwrap();

        // Posted out of date order; second and third share a date.
        for (date, amt) in [
            (d(2024, 4, 5), "30.00"),
            (d(2024, 4, 1), "10.00"),
            (d(2024, 4, 1), "20.00"),
        ] {
            store
                .append_voucher(
                    co.id,
                    date,
                    None,
                    vec![
                        VoucherLine::debit(cash.id, amount(amt), None),
                        VoucherLine::credit(sales.id, amount(amt), None),
                    ],
                )
                .await
                .unwrap();
        }

        let lines = store.account_lines(co.id, cash.id).await.unwrap();
        let order: Vec<(NaiveDate, u64)> = lines.iter().map(|l| (l.date, l.voucher_id.0)).collect();
        assert_eq!(
            order,
            vec![(d(2024, 4, 1), 2), (d(2024, 4, 1), 3), (d(2024, 4, 5), 1)]
        );
    }

    #[tokio::test]
    async fn sums_are_scoped_by_company_and_side() {
        let mut store = MemoryStore::new();
        let acme = Company::new("Acme", 4, 1, "INR");
        let globex = Company::new("Globex", 1, 1, "USD");
        store.save_company(&acme).await.unwrap();
        store.save_company(&globex).await.unwrap();

        let acme_cash = Account::new(acme.id, "Cash", "Assets");
        let acme_sales = Account::new(acme.id, "Sales", "Income");
        store.save_account(&acme_cash).await.unwrap();
        store.save_account(&acme_sales).await.unwrap();

        store
            .append_voucher(
                acme.id,
                d(2024, 4, 1),
                None,
                vec![
                    VoucherLine::debit(acme_cash.id, amount("500.00"), None),
                    VoucherLine::credit(acme_sales.id, amount("500.00"), None),
                ],
            )
            .await
            .unwrap();

        let dr = store
            .sum_line_amounts(acme.id, acme_cash.id, EntrySide::Debit, DateFilter::AllTime)
            .await
            .unwrap();
        assert_eq!(dr, amount("500.00"));

        // The other company sees nothing for the same account id.
        let other = store
            .sum_line_amounts(globex.id, acme_cash.id, EntrySide::Debit, DateFilter::AllTime)
            .await
            .unwrap();
        assert_eq!(other, amount("0.00"));
    }
}
