//! Credit Bureau for the banking core
//!
//! Simulates the external credit agencies consulted once at customer
//! creation: a fixed pool of workers behind a bounded queue, producing
//! deterministic mock scores in the legacy 1-999 range.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod bureau;
pub mod error;
pub mod score;

pub use bureau::{spawn_credit_bureau, BureauConfig, CreditBureau, PendingScore};
pub use error::{Error, Result};
pub use score::{agency_score, composite_score, Applicant, AGENCY_COUNT};
