//! # Bookkeeping Core
//!
//! The accounting engine of a multi-company double-entry bookkeeping
//! application: fiscal-year window resolution, voucher validation, account
//! balance aggregation and financial reports.
//!
//! ## Features
//!
//! - **Double-entry vouchers**: ordered validation (line count, account
//!   ownership, amounts, balance) gating an atomic append
//! - **Fiscal calendars**: per-company `(month, day)` fiscal-year starts
//!   with graceful clamping of invalid days (Feb 29, day 31 in short months)
//! - **Balances**: one debit-positive aggregation primitive shared by every
//!   report, with exact two-decimal half-up arithmetic
//! - **Reports**: trial balance, income statement and balance sheet with a
//!   retained-earnings rollup of the fiscal year's net profit
//! - **Storage abstraction**: database-agnostic via the [`LedgerStore`]
//!   trait; an in-memory store ships for tests and demos
//!
//! ## Quick start
//!
//! ```rust
//! use bookkeeping_core::{Ledger, VoucherBuilder, utils::MemoryStore};
//! use bigdecimal::BigDecimal;
//! use chrono::NaiveDate;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), bookkeeping_core::EngineError> {
//! let mut ledger = Ledger::new(MemoryStore::new());
//! let company = ledger.create_company("Acme Traders", 4, 1, "INR").await?;
//! let cash = ledger.create_account(company.id, "Cash", "Assets").await?;
//! let sales = ledger.create_account(company.id, "Sales", "Income").await?;
//!
//! let draft = VoucherBuilder::new(NaiveDate::from_ymd_opt(2024, 4, 10).unwrap())
//!     .narration("Opening sale")
//!     .debit(cash.id, BigDecimal::from(1000))
//!     .credit(sales.id, BigDecimal::from(1000))
//!     .build();
//! ledger.post_voucher(company.id, draft).await?;
//!
//! let trial_balance = ledger.trial_balance(company.id).await?;
//! assert!(trial_balance.is_balanced());
//! # Ok(())
//! # }
//! ```

pub mod fiscal;
pub mod ledger;
pub mod reports;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use fiscal::{fiscal_window, FiscalWindow};
pub use ledger::*;
pub use reports::*;
pub use traits::*;
pub use types::*;
