//! Core types for the banking ledger
//!
//! All money is whole-cent integers and all interest rates are integer
//! hundredths of a percent; floating point never appears in calculation
//! or storage.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Monetary amount in whole cents (signed; balances may go negative)
pub type Cents = i64;

/// Customer titles the legacy system accepts, the empty title included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Title {
    /// Mr
    Mr,
    /// Mrs
    Mrs,
    /// Miss
    Miss,
    /// Ms
    Ms,
    /// Dr
    Dr,
    /// Drs
    Drs,
    /// Professor
    Professor,
    /// Lord
    Lord,
    /// Sir
    Sir,
    /// Lady
    Lady,
    /// No title; the legacy record permits an empty title field
    #[serde(rename = "")]
    Blank,
}

impl Title {
    /// Every valid title, in legacy copybook order
    pub const ALL: [Title; 11] = [
        Title::Mr,
        Title::Mrs,
        Title::Miss,
        Title::Ms,
        Title::Dr,
        Title::Drs,
        Title::Professor,
        Title::Lord,
        Title::Sir,
        Title::Lady,
        Title::Blank,
    ];

    /// Exact legacy string form
    pub fn as_str(&self) -> &'static str {
        match self {
            Title::Mr => "Mr",
            Title::Mrs => "Mrs",
            Title::Miss => "Miss",
            Title::Ms => "Ms",
            Title::Dr => "Dr",
            Title::Drs => "Drs",
            Title::Professor => "Professor",
            Title::Lord => "Lord",
            Title::Sir => "Sir",
            Title::Lady => "Lady",
            Title::Blank => "",
        }
    }

    /// Parse from the exact legacy string (case-sensitive)
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|title| title.as_str() == s)
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Account types, fixed at compile time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    /// Current account
    Current,
    /// Savings account
    Savings,
    /// Mortgage account (debit restricted)
    Mortgage,
    /// Loan account (debit restricted)
    Loan,
    /// Individual savings account
    Isa,
}

impl AccountType {
    /// Every valid account type
    pub const ALL: [AccountType; 5] = [
        AccountType::Current,
        AccountType::Savings,
        AccountType::Mortgage,
        AccountType::Loan,
        AccountType::Isa,
    ];

    /// Exact legacy string form
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Current => "CURRENT",
            AccountType::Savings => "SAVINGS",
            AccountType::Mortgage => "MORTGAGE",
            AccountType::Loan => "LOAN",
            AccountType::Isa => "ISA",
        }
    }

    /// Parse from the exact legacy string (case-sensitive)
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|ty| ty.as_str() == s)
    }

    /// Default interest rate in hundredths of a percent (250 = 2.50%)
    pub fn default_interest_rate(&self) -> i64 {
        match self {
            AccountType::Current => 0,
            AccountType::Savings => 150,
            AccountType::Mortgage => 450,
            AccountType::Loan => 750,
            AccountType::Isa => 250,
        }
    }

    /// Default overdraft limit in cents
    pub fn default_overdraft_limit(&self) -> Cents {
        0
    }

    /// MORTGAGE and LOAN accounts refuse debits
    pub fn debit_restricted(&self) -> bool {
        matches!(self, AccountType::Mortgage | AccountType::Loan)
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Validate a title string against the fixed enumeration
pub fn validate_title(title: &str) -> Result<Title> {
    Title::parse(title).ok_or_else(|| Error::InvalidTitle(title.to_string()))
}

/// Validate an account type string against the fixed enumeration
pub fn validate_account_type(account_type: &str) -> Result<AccountType> {
    AccountType::parse(account_type)
        .ok_or_else(|| Error::InvalidAccountType(account_type.to_string()))
}

/// Amounts that must be strictly positive (transfer amounts)
pub fn validate_positive_amount(amount: Cents) -> Result<()> {
    if amount <= 0 {
        return Err(Error::InvalidAmount(amount));
    }
    Ok(())
}

/// Interest rates are non-negative hundredths of a percent
pub fn validate_interest_rate(rate: i64) -> Result<()> {
    if rate < 0 {
        return Err(Error::InvalidAmount(rate));
    }
    Ok(())
}

/// A customer row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Store-assigned identifier, immutable after creation
    pub customer_number: u64,

    /// Title from the fixed enumeration
    pub title: Title,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Postal address
    pub address: String,

    /// Date of birth, when supplied
    pub date_of_birth: Option<NaiveDate>,

    /// Score set once at creation (0 = check was unavailable)
    pub credit_score: u16,

    /// Date the credit score was set
    pub score_reviewed: NaiveDate,
}

impl Customer {
    /// Full name as the legacy record holds it, title first
    pub fn full_name(&self) -> String {
        match self.title {
            Title::Blank => format!("{} {}", self.first_name, self.last_name),
            title => format!("{} {} {}", title, self.first_name, self.last_name),
        }
    }
}

/// An account row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Store-assigned identifier
    pub account_number: u64,

    /// Owning customer; always references an existing row
    pub customer_number: u64,

    /// Account type
    pub account_type: AccountType,

    /// Balance in cents; the legacy system lets this go negative
    pub balance: Cents,

    /// Interest rate in hundredths of a percent
    pub interest_rate: i64,

    /// Informational only: not enforced by transfer or debit paths
    pub overdraft_limit: Cents,

    /// Date the account was opened
    pub opened: NaiveDate,
}

/// Fields for customer creation; the title arrives as the raw legacy string
#[derive(Debug, Clone, Default)]
pub struct NewCustomer {
    /// Title string, validated against the fixed enumeration
    pub title: String,

    /// First name (required non-empty)
    pub first_name: String,

    /// Last name (required non-empty)
    pub last_name: String,

    /// Postal address (required non-empty)
    pub address: String,

    /// Date of birth
    pub date_of_birth: Option<NaiveDate>,
}

/// Editable customer fields; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct CustomerUpdate {
    /// New title string
    pub title: Option<String>,

    /// New first name
    pub first_name: Option<String>,

    /// New last name
    pub last_name: Option<String>,

    /// New address
    pub address: Option<String>,
}

/// Validated customer patch applied by the store
#[derive(Debug, Clone, Default)]
pub struct CustomerPatch {
    /// New title
    pub title: Option<Title>,

    /// New first name
    pub first_name: Option<String>,

    /// New last name
    pub last_name: Option<String>,

    /// New address
    pub address: Option<String>,
}

/// Fields for account creation
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Owning customer
    pub customer_number: u64,

    /// Account type string, validated against the fixed enumeration
    pub account_type: String,

    /// Interest rate; defaulted by type when `None`
    pub interest_rate: Option<i64>,

    /// Overdraft limit; defaulted by type when `None`
    pub overdraft_limit: Option<Cents>,
}

/// Editable account fields; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    /// New account type string
    pub account_type: Option<String>,

    /// New interest rate
    pub interest_rate: Option<i64>,

    /// New overdraft limit
    pub overdraft_limit: Option<Cents>,
}

/// Validated account patch applied by the store
#[derive(Debug, Clone, Default)]
pub struct AccountPatch {
    /// New account type
    pub account_type: Option<AccountType>,

    /// New interest rate
    pub interest_rate: Option<i64>,

    /// New overdraft limit
    pub overdraft_limit: Option<Cents>,
}

/// Balances after a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    /// New balance of the source account
    pub from_balance: Cents,

    /// New balance of the destination account
    pub to_balance: Cents,
}
