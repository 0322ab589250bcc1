//! Error types for the banking core

use crate::types::AccountType;
use thiserror::Error;

/// Result type for banking operations
pub type Result<T> = std::result::Result<T, Error>;

/// Banking errors
///
/// Every failure surfaces as one stable, distinguishable variant so the
/// presentation layer can keep the legacy per-fail-code messages.
#[derive(Debug, Error)]
pub enum Error {
    /// Customer row does not exist
    #[error("Customer {0} not found")]
    CustomerNotFound(u64),

    /// Account row does not exist
    #[error("Account {0} not found")]
    AccountNotFound(u64),

    /// Malformed field on a create or update request
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Title outside the fixed enumeration
    #[error("Invalid title: '{0}'")]
    InvalidTitle(String),

    /// Account type outside the fixed enumeration
    #[error("Invalid account type: '{0}'")]
    InvalidAccountType(String),

    /// Debit attempted on a MORTGAGE or LOAN account (legacy fail code 4)
    #[error("Cannot debit {0} account")]
    DebitRestricted(AccountType),

    /// Amount outside the allowed range
    #[error("Invalid amount: {0}")]
    InvalidAmount(i64),

    /// Credit check pool is overloaded
    #[error("Credit check unavailable")]
    CreditCheckUnavailable,

    /// Storage error (RocksDB)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Concurrency error (dispatcher gone, response channel dropped)
    #[error("Concurrency error: {0}")]
    Concurrency(String),
}

impl From<rocksdb::Error> for Error {
    fn from(err: rocksdb::Error) -> Self {
        Error::Storage(err.to_string())
    }
}

impl From<credit_bureau::Error> for Error {
    fn from(err: credit_bureau::Error) -> Self {
        match err {
            credit_bureau::Error::QueueFull => Error::CreditCheckUnavailable,
            credit_bureau::Error::Closed => {
                Error::Concurrency("credit bureau closed".to_string())
            }
        }
    }
}
