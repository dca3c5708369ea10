//! Year-end reporting example: post a year of vouchers, then print the
//! trial balance, P&L and balance sheet.

use bigdecimal::BigDecimal;
use bookkeeping_core::utils::MemoryStore;
use bookkeeping_core::{Ledger, VoucherBuilder};
use chrono::NaiveDate;
use std::str::FromStr;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn amount(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).expect("valid amount")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut ledger = Ledger::new(MemoryStore::new());

    // A company with an April-to-March fiscal year.
    let company = ledger.create_company("Acme Traders", 4, 1, "INR").await?;
    let accounts = ledger.seed_default_accounts(company.id).await?;
    let by_name = |name: &str| {
        accounts
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.id)
            .expect("seeded account")
    };
    let cash = by_name("Cash");
    let capital = by_name("Capital");
    let sales = by_name("Sales");
    let purchase = by_name("Purchase");
    let rent = by_name("Rent");

    // A year of activity.
    let postings = [
        (date(2024, 4, 1), cash, capital, "50000.00", "Opening capital"),
        (date(2024, 5, 2), purchase, cash, "12000.00", "Stock purchase"),
        (date(2024, 6, 15), cash, sales, "21500.00", "Counter sales"),
        (date(2024, 9, 1), rent, cash, "6000.00", "Shop rent H1"),
        (date(2025, 1, 20), cash, sales, "18250.00", "Counter sales"),
        (date(2025, 3, 1), rent, cash, "6000.00", "Shop rent H2"),
    ];
    for (d, dr, cr, amt, memo) in postings {
        ledger
            .post_voucher(
                company.id,
                VoucherBuilder::new(d)
                    .narration(memo)
                    .debit(dr, amount(amt))
                    .credit(cr, amount(amt))
                    .build(),
            )
            .await?;
    }

    // Trial balance over everything posted.
    let tb = ledger.trial_balance(company.id).await?;
    println!("Trial Balance ({})", company.name);
    for row in &tb.rows {
        println!(
            "  {:<20} {:>12} {:>12}",
            row.account.name,
            row.debit.as_ref().map(|v| v.to_string()).unwrap_or_default(),
            row.credit.as_ref().map(|v| v.to_string()).unwrap_or_default(),
        );
    }
    println!(
        "  {:<20} {:>12} {:>12}  balanced: {}\n",
        "Total",
        tb.total_debit,
        tb.total_credit,
        tb.is_balanced()
    );

    // P&L for the fiscal year containing year-end.
    let year_end = date(2025, 3, 31);
    let stmt = ledger.fiscal_year_statement(company.id, year_end).await?;
    println!("Profit & Loss {} to {}", stmt.start, stmt.end);
    println!("  Total income : {}", stmt.total_income);
    println!("  Total expense: {}", stmt.total_expense);
    println!("  Net profit   : {}\n", stmt.net_profit);

    // Balance sheet as of year-end, with retained earnings folded in.
    let sheet = ledger.balance_sheet(company.id, year_end).await?;
    println!("Balance Sheet as of {}", sheet.as_of);
    println!("  Assets      : {}", sheet.total_assets);
    println!("  Liabilities : {}", sheet.total_liabilities);
    println!("  Equity      : {}", sheet.total_equity);
    for row in sheet.equity.iter().filter(|r| r.account.is_none()) {
        println!("    {} = {}", row.label, row.amount);
    }

    Ok(())
}
