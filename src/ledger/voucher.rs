//! Voucher drafting and double-entry validation

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::collections::HashMap;

use crate::types::*;

/// An unposted voucher: the unit of work handed to
/// [`Ledger::post_voucher`](crate::ledger::Ledger::post_voucher). Drafts
/// carry no id; ids are assigned by the store on the atomic append.
#[derive(Debug, Clone, PartialEq)]
pub struct VoucherDraft {
    pub date: NaiveDate,
    pub narration: Option<String>,
    pub lines: Vec<VoucherLine>,
}

impl VoucherDraft {
    pub fn new(date: NaiveDate, narration: Option<String>, lines: Vec<VoucherLine>) -> Self {
        Self {
            date,
            narration,
            lines,
        }
    }

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

/// Builder for assembling voucher drafts line by line.
#[derive(Debug)]
pub struct VoucherBuilder {
    draft: VoucherDraft,
}

impl VoucherBuilder {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            draft: VoucherDraft::new(date, None, Vec::new()),
        }
    }

    pub fn narration(mut self, narration: impl Into<String>) -> Self {
        self.draft.narration = Some(narration.into());
        self
    }

    /// Add a debit line.
    pub fn debit(mut self, account_id: AccountId, amount: BigDecimal) -> Self {
        self.draft
            .lines
            .push(VoucherLine::debit(account_id, amount, None));
        self
    }

    /// Add a credit line.
    pub fn credit(mut self, account_id: AccountId, amount: BigDecimal) -> Self {
        self.draft
            .lines
            .push(VoucherLine::credit(account_id, amount, None));
        self
    }

    /// Add a pre-built line (e.g. one carrying its own narration).
    pub fn line(mut self, line: VoucherLine) -> Self {
        self.draft.lines.push(line);
        self
    }

    pub fn build(self) -> VoucherDraft {
        self.draft
    }
}

/// Validate a draft against the double-entry rules, short-circuiting on the
/// first failure in this order:
///
/// 1. at least two lines;
/// 2. every line's account exists and belongs to `company_id`;
/// 3. every amount is a positive two-decimal value;
/// 4. total debits equal total credits exactly.
///
/// `accounts` must contain the resolved account for every line that has one;
/// lines whose account is absent from the map are rejected as unknown.
pub fn validate_draft(
    draft: &VoucherDraft,
    company_id: CompanyId,
    accounts: &HashMap<AccountId, Account>,
) -> EngineResult<()> {
    if draft.lines.len() < 2 {
        return Err(EngineError::TooFewLines);
    }

    for line in &draft.lines {
        let account = accounts
            .get(&line.account_id)
            .ok_or(EngineError::AccountNotFound(line.account_id))?;
        if account.company_id != company_id {
            return Err(EngineError::CrossCompanyAccount {
                account: line.account_id,
                company: company_id,
            });
        }
    }

    for line in &draft.lines {
        if line.amount <= BigDecimal::from(0) || quantize(&line.amount) != line.amount {
            return Err(EngineError::InvalidAmount(line.amount.clone()));
        }
    }

    let debits = draft.total_debits();
    let credits = draft.total_credits();
    if debits != credits {
        return Err(EngineError::Unbalanced { debits, credits });
    }

    Ok(())
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

    struct Fixture {
        company_id: CompanyId,
        cash: Account,
        sales: Account,
        accounts: HashMap<AccountId, Account>,
    }

    fn fixture() -> Fixture {
        let company_id = CompanyId::new();
        let cash = Account::new(company_id, "Cash", "Assets");
        let sales = Account::new(company_id, "Sales", "Income");
        let accounts = HashMap::from([(cash.id, cash.clone()), (sales.id, sales.clone())]);
        Fixture {
            company_id,
            cash,
            sales,
            accounts,
        }
    }

    #[test]
    fn balanced_draft_passes() {
        let fx = fixture();
        let draft = VoucherBuilder::new(d(2024, 4, 1))
            .narration("Cash sale")
            .debit(fx.cash.id, amount("100.00"))
            .credit(fx.sales.id, amount("100.00"))
            .build();
        assert_eq!(validate_draft(&draft, fx.company_id, &fx.accounts), Ok(()));
    }

    #[test]
    fn single_line_is_rejected_first() {
        let fx = fixture();
        // Even with a bad amount, the line-count check fires before any other.
        let draft = VoucherBuilder::new(d(2024, 4, 1))
            .debit(fx.cash.id, amount("-100.00"))
            .build();
        assert_eq!(
            validate_draft(&draft, fx.company_id, &fx.accounts),
            Err(EngineError::TooFewLines)
        );
    }

    #[test]
    fn unbalanced_draft_reports_both_totals() {
        let fx = fixture();
        let draft = VoucherBuilder::new(d(2024, 4, 1))
            .debit(fx.cash.id, amount("100.00"))
            .credit(fx.sales.id, amount("90.00"))
            .build();
        assert_eq!(
            validate_draft(&draft, fx.company_id, &fx.accounts),
            Err(EngineError::Unbalanced {
                debits: amount("100.00"),
                credits: amount("90.00"),
            })
        );
    }

    #[test]
    fn cross_company_account_is_rejected_before_amounts() {
        let fx = fixture();
        let other = Account::new(CompanyId::new(), "Cash", "Assets");
        let mut accounts = fx.accounts.clone();
        accounts.insert(other.id, other.clone());

        let draft = VoucherBuilder::new(d(2024, 4, 1))
            .debit(other.id, amount("-5.00"))
            .credit(fx.sales.id, amount("100.00"))
            .build();
        assert_eq!(
            validate_draft(&draft, fx.company_id, &accounts),
            Err(EngineError::CrossCompanyAccount {
                account: other.id,
                company: fx.company_id,
            })
        );
    }

    #[test]
    fn unknown_account_is_rejected() {
        let fx = fixture();
        let ghost = AccountId::new();
        let draft = VoucherBuilder::new(d(2024, 4, 1))
            .debit(ghost, amount("100.00"))
            .credit(fx.sales.id, amount("100.00"))
            .build();
        assert_eq!(
            validate_draft(&draft, fx.company_id, &fx.accounts),
            Err(EngineError::AccountNotFound(ghost))
        );
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        let fx = fixture();
        for bad in ["0.00", "-10.00"] {
            let draft = VoucherDraft::new(
                d(2024, 4, 1),
                None,
                vec![
                    VoucherLine {
                        account_id: fx.cash.id,
                        amount: amount(bad),
                        side: EntrySide::Debit,
                        narration: None,
                    },
                    VoucherLine::credit(fx.sales.id, amount("10.00"), None),
                ],
            );
            assert_eq!(
                validate_draft(&draft, fx.company_id, &fx.accounts),
                Err(EngineError::InvalidAmount(amount(bad)))
            );
        }
    }

    #[test]
    fn sub_cent_precision_is_rejected() {
        let fx = fixture();
        // A hand-built line that bypassed quantization.
        let draft = VoucherDraft::new(
            d(2024, 4, 1),
            None,
            vec![
                VoucherLine {
                    account_id: fx.cash.id,
                    amount: amount("10.005"),
                    side: EntrySide::Debit,
                    narration: None,
                },
                VoucherLine::credit(fx.sales.id, amount("10.01"), None),
            ],
        );
        assert_eq!(
            validate_draft(&draft, fx.company_id, &fx.accounts),
            Err(EngineError::InvalidAmount(amount("10.005")))
        );
    }

    #[test]
    fn builder_quantizes_amounts_half_up() {
        let fx = fixture();
        let draft = VoucherBuilder::new(d(2024, 4, 1))
            .debit(fx.cash.id, amount("10.005"))
            .credit(fx.sales.id, amount("10.01"))
            .build();
        assert_eq!(draft.lines[0].amount, amount("10.01"));
        assert_eq!(validate_draft(&draft, fx.company_id, &fx.accounts), Ok(()));
    }
}
