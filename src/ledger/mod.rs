//! Ledger module: facade, voucher validation and balance aggregation

pub mod balance;
pub mod core;
pub mod voucher;

pub use self::core::*;
pub use balance::*;
pub use voucher::*;
