//! Report builders: trial balance, income statement, balance sheet

pub mod balance_sheet;
pub mod income_statement;
pub mod trial_balance;

pub use balance_sheet::*;
pub use income_statement::*;
pub use trial_balance::*;
