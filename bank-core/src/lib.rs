//! Core banking ledger: customers, accounts and balance movements
//!
//! A port of a classic single-branch bank system. All money is integer
//! cents, identifiers are store-assigned and monotonic, and every
//! multi-row mutation is atomic. A single writer serialises
//! read-modify-write sequences, so concurrent debits, credits and
//! transfers never lose updates.
//!
//! Customer creation performs a credit check through the bounded worker
//! pool in the `credit-bureau` crate; when the check cannot answer in
//! time the customer is created anyway, with a fallback score.
//!
//! # Modules
//!
//! - [`types`] - customers, accounts, titles, account types
//! - [`store`] - RocksDB-backed persistence ([`store::BankStore`])
//! - [`services`] - the business operations ([`BankService`])
//! - [`config`] - TOML / environment configuration
//! - [`metrics`] - Prometheus collectors
//! - [`error`] - the error taxonomy

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod metrics;
pub mod services;
pub mod store;
pub mod types;

pub use config::{Config, CreditCheckConfig, RocksDbConfig};
pub use error::{Error, Result};
pub use metrics::Metrics;
pub use services::BankService;
pub use store::{BankStore, Storage};
pub use types::{
    Account, AccountType, AccountUpdate, Cents, Customer, CustomerUpdate, NewAccount, NewCustomer,
    Title, TransferReceipt,
};
