//! Banking service layer — the 11 business operations
//!
//! Each operation orchestrates the store (and, for customer creation,
//! the credit bureau) and surfaces the legacy error kinds unchanged.
//! Nothing here caches balances: the store is the single source of
//! truth and its atomic primitives carry every multi-row mutation, so
//! an operation that fails has no partial side effects.
//!
//! # Example
//!
//! ```no_run
//! use bank_core::{BankService, Config, NewCustomer};
//!
//! #[tokio::main]
//! async fn main() -> bank_core::Result<()> {
//!     let service = BankService::open(Config::default()).await?;
//!
//!     let customer = service
//!         .create_customer(NewCustomer {
//!             title: "Mr".to_string(),
//!             first_name: "John".to_string(),
//!             last_name: "Smith".to_string(),
//!             address: "1 Oak Avenue".to_string(),
//!             date_of_birth: None,
//!         })
//!         .await?;
//!
//!     println!("customer {} created", customer.customer_number);
//!     Ok(())
//! }
//! ```

use crate::config::Config;
use crate::error::{Error, Result};
use crate::metrics::Metrics;
use crate::store::{BankStore, Storage};
use crate::types::{
    validate_account_type, validate_interest_rate, validate_positive_amount, validate_title,
    Account, AccountPatch, AccountUpdate, Cents, Customer, CustomerPatch, CustomerUpdate,
    NewAccount, NewCustomer, TransferReceipt,
};
use chrono::Utc;
use credit_bureau::{spawn_credit_bureau, Applicant, CreditBureau};
use std::sync::Arc;
use tokio::time::Duration;

/// Legacy sentinel: a customer inquiry at or above this number returns
/// the highest-numbered customer.
const LAST_CUSTOMER_SENTINEL: u64 = 9_999_999_999;

/// Legacy sentinel: an account inquiry at or above this number returns
/// the highest-numbered account.
const LAST_ACCOUNT_SENTINEL: u64 = 99_999_999;

/// Stages of a cascade delete, in order; terminal on success or first failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CascadeStage {
    Pending,
    AccountsCleared,
    CustomerRemoved,
}

/// Banking service
pub struct BankService<S: BankStore> {
    store: Arc<S>,
    bureau: CreditBureau,
    config: Config,
    metrics: Metrics,
}

impl BankService<Storage> {
    /// Open the store at the configured path and spawn the credit bureau
    pub async fn open(config: Config) -> Result<Self> {
        let store = Arc::new(Storage::open(&config)?);
        Self::with_store(store, config)
    }
}

impl<S: BankStore> BankService<S> {
    /// Build a service over an existing store
    ///
    /// Must be called from within a Tokio runtime: the credit bureau
    /// dispatcher is spawned here.
    pub fn with_store(store: Arc<S>, config: Config) -> Result<Self> {
        let bureau = spawn_credit_bureau(config.credit.bureau.clone());
        let metrics =
            Metrics::new().map_err(|e| Error::Config(format!("Metrics setup failed: {}", e)))?;
        Ok(Self {
            store,
            bureau,
            config,
            metrics,
        })
    }

    /// Look up a customer
    ///
    /// Legacy inquiry sentinels apply: number 0 returns a random customer
    /// and a number at or past the field maximum returns the last one.
    pub fn get_customer(&self, number: u64) -> Result<Customer> {
        if number == 0 {
            self.store
                .random_customer()?
                .ok_or(Error::CustomerNotFound(number))
        } else if number >= LAST_CUSTOMER_SENTINEL {
            self.store
                .last_customer()?
                .ok_or(Error::CustomerNotFound(number))
        } else {
            self.store.get_customer(number)
        }
    }

    /// Look up an account
    pub fn get_account(&self, number: u64) -> Result<Account> {
        if number >= LAST_ACCOUNT_SENTINEL {
            self.store
                .last_account()?
                .ok_or(Error::AccountNotFound(number))
        } else {
            self.store.get_account(number)
        }
    }

    /// Accounts owned by a customer, ascending, truncated at the page size
    pub fn get_accounts_by_customer(&self, customer_number: u64) -> Result<Vec<Account>> {
        // Fails with CustomerNotFound when the owner is absent
        self.store.get_customer(customer_number)?;
        self.store
            .get_accounts_by_customer(customer_number, self.config.accounts_page_size)
    }

    /// Create a customer after an asynchronous credit check
    ///
    /// The check is bounded by the configured timeout; when it does not
    /// answer in time the customer is still created, with the fallback
    /// score, and the late result is discarded.
    pub async fn create_customer(&self, new: NewCustomer) -> Result<Customer> {
        let title = validate_title(&new.title)?;
        if new.first_name.trim().is_empty() || new.last_name.trim().is_empty() {
            return Err(Error::Validation(
                "First and last name are required".to_string(),
            ));
        }
        if new.address.trim().is_empty() {
            return Err(Error::Validation("Address is required".to_string()));
        }

        let credit_score = self.resolve_credit_score(&new).await?;

        let number = self.store.insert_customer(Customer {
            customer_number: 0, // assigned by the store
            title,
            first_name: new.first_name,
            last_name: new.last_name,
            address: new.address,
            date_of_birth: new.date_of_birth,
            credit_score,
            score_reviewed: Utc::now().date_naive(),
        })?;

        self.metrics.customers_created.inc();
        tracing::info!(customer_number = number, credit_score, "Customer created");
        self.store.get_customer(number)
    }

    /// Open an account for an existing customer
    ///
    /// The balance always starts at zero; rate and overdraft default by
    /// account type when not supplied.
    pub fn create_account(&self, new: NewAccount) -> Result<Account> {
        let account_type = validate_account_type(&new.account_type)?;
        self.store.get_customer(new.customer_number)?;

        let interest_rate = new
            .interest_rate
            .unwrap_or_else(|| account_type.default_interest_rate());
        validate_interest_rate(interest_rate)?;
        let overdraft_limit = new
            .overdraft_limit
            .unwrap_or_else(|| account_type.default_overdraft_limit());

        let number = self.store.insert_account(Account {
            account_number: 0, // assigned by the store
            customer_number: new.customer_number,
            account_type,
            balance: 0,
            interest_rate,
            overdraft_limit,
            opened: Utc::now().date_naive(),
        })?;

        self.metrics.accounts_created.inc();
        tracing::info!(
            account_number = number,
            customer_number = new.customer_number,
            account_type = %account_type,
            "Account created"
        );
        self.store.get_account(number)
    }

    /// Update customer title, name or address; the credit score is not editable
    pub fn update_customer(&self, number: u64, update: CustomerUpdate) -> Result<Customer> {
        let title = update.title.as_deref().map(validate_title).transpose()?;

        let patch = CustomerPatch {
            title,
            first_name: update.first_name,
            last_name: update.last_name,
            address: update.address,
        };
        self.store.update_customer(number, &patch)?;
        self.store.get_customer(number)
    }

    /// Update account type, rate or overdraft limit
    pub fn update_account(&self, number: u64, update: AccountUpdate) -> Result<Account> {
        let account_type = update
            .account_type
            .as_deref()
            .map(validate_account_type)
            .transpose()?;
        if let Some(rate) = update.interest_rate {
            validate_interest_rate(rate)?;
        }

        let patch = AccountPatch {
            account_type,
            interest_rate: update.interest_rate,
            overdraft_limit: update.overdraft_limit,
        };
        self.store.update_account(number, &patch)?;
        self.store.get_account(number)
    }

    /// Close an account
    pub fn delete_account(&self, number: u64) -> Result<()> {
        self.store.delete_account(number)?;
        tracing::info!(account_number = number, "Account deleted");
        Ok(())
    }

    /// Delete a customer and every account they own
    ///
    /// Two-stage sequence: every account row is removed in one atomic
    /// unit, then the customer row. A first-stage failure surfaces the
    /// underlying error and leaves the customer (and, by atomicity,
    /// every account) in place.
    pub fn delete_customer(&self, number: u64) -> Result<()> {
        self.store.get_customer(number)?;
        tracing::debug!(customer_number = number, stage = ?CascadeStage::Pending, "Cascade delete");

        let removed = self.store.delete_accounts_by_customer(number)?;
        tracing::debug!(
            customer_number = number,
            removed,
            stage = ?CascadeStage::AccountsCleared,
            "Cascade delete"
        );

        self.store.delete_customer(number)?;
        tracing::info!(
            customer_number = number,
            removed_accounts = removed,
            stage = ?CascadeStage::CustomerRemoved,
            "Customer deleted"
        );
        Ok(())
    }

    /// Move funds between two accounts
    ///
    /// No balance-sufficiency check: the source may go negative, exactly
    /// as the legacy transfer behaves.
    pub fn transfer_funds(
        &self,
        from_account: u64,
        to_account: u64,
        amount: Cents,
    ) -> Result<TransferReceipt> {
        validate_positive_amount(amount)?;

        let receipt = self.store.transfer_balance(from_account, to_account, amount)?;
        self.metrics.movements_total.inc();
        tracing::info!(from_account, to_account, amount, "Transfer applied");
        Ok(receipt)
    }

    /// Apply a signed balance adjustment: positive credits, negative debits
    ///
    /// Debits are refused on MORTGAGE and LOAN accounts (legacy fail
    /// code 4); the store evaluates the restriction atomically with the
    /// adjustment. There is no funds check; balances may go negative.
    pub fn debit_credit(&self, account_number: u64, amount: Cents) -> Result<Cents> {
        let balance = self.store.adjust_balance(account_number, amount)?;
        self.metrics.movements_total.inc();
        tracing::debug!(account_number, amount, balance, "Balance adjusted");
        Ok(balance)
    }

    /// Metrics collector, for scraping
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    async fn resolve_credit_score(&self, new: &NewCustomer) -> Result<u16> {
        let applicant = Applicant::new(
            format!("{} {}", new.first_name, new.last_name),
            new.address.clone(),
        );
        // Queue overflow surfaces as CreditCheckUnavailable
        let pending = self.bureau.submit(applicant)?;

        let timeout = Duration::from_millis(self.config.credit.timeout_ms);
        let timer = self.metrics.credit_check_duration.start_timer();
        let score = match tokio::time::timeout(timeout, pending.wait()).await {
            Ok(Ok(score)) => score,
            Ok(Err(err)) => {
                // Bureau dropped the job; fall back the same way a timeout does
                tracing::warn!(%err, "Credit check failed, using fallback score");
                self.metrics.credit_fallbacks.inc();
                self.config.credit.fallback_score
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.config.credit.timeout_ms,
                    "Credit check timed out, using fallback score"
                );
                self.metrics.credit_fallbacks.inc();
                self.config.credit.fallback_score
            }
        };
        timer.observe_duration();
        Ok(score)
    }
}
