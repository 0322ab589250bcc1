//! Data access layer over RocksDB
//!
//! # Column Families
//!
//! - `customers` - customer rows (key: customer number, u64 big-endian)
//! - `accounts` - account rows (key: account number, u64 big-endian)
//! - `account_index` - customer number || account number -> empty
//! - `meta` - identifier sequences
//!
//! Big-endian keys make RocksDB iteration order equal ascending number
//! order, which is the order the legacy inquiries return rows in. Every
//! multi-row mutation goes through one WriteBatch and every
//! read-modify-write holds the write lock, so partial application is
//! never observable.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{Account, AccountPatch, Cents, Customer, CustomerPatch, TransferReceipt};
use parking_lot::Mutex;
use rand::Rng;
use rocksdb::{
    ColumnFamily, ColumnFamilyDescriptor, Direction, IteratorMode, Options, WriteBatch, DB,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Column family names
const CF_CUSTOMERS: &str = "customers";
const CF_ACCOUNTS: &str = "accounts";
const CF_ACCOUNT_INDEX: &str = "account_index";
const CF_META: &str = "meta";

/// Sequence rows in the meta column family
const SEQ_CUSTOMER: &[u8] = b"customer_seq";
const SEQ_ACCOUNT: &[u8] = b"account_seq";

/// Store interface the service layer depends on
///
/// Each operation is a single atomic unit: it either fully commits or
/// leaves the store untouched. Identifier assignment belongs entirely to
/// the store; callers never maintain counters of their own.
pub trait BankStore: Send + Sync {
    /// Fetch one customer
    fn get_customer(&self, number: u64) -> Result<Customer>;

    /// Fetch the highest-numbered customer, if any
    fn last_customer(&self) -> Result<Option<Customer>>;

    /// Fetch a uniformly random customer, if any
    fn random_customer(&self) -> Result<Option<Customer>>;

    /// Fetch one account
    fn get_account(&self, number: u64) -> Result<Account>;

    /// Fetch the highest-numbered account, if any
    fn last_account(&self) -> Result<Option<Account>>;

    /// Accounts owned by a customer, ascending by number, truncated at `limit`
    fn get_accounts_by_customer(&self, customer_number: u64, limit: usize)
        -> Result<Vec<Account>>;

    /// Insert a customer, assigning and returning the next customer number
    ///
    /// The row's `customer_number` field is replaced with the assigned
    /// identifier.
    fn insert_customer(&self, customer: Customer) -> Result<u64>;

    /// Insert an account, assigning and returning the next account number
    ///
    /// Fails with `CustomerNotFound` if the owning customer is gone by the
    /// time the write lock is held.
    fn insert_account(&self, account: Account) -> Result<u64>;

    /// Apply a customer patch
    fn update_customer(&self, number: u64, patch: &CustomerPatch) -> Result<()>;

    /// Apply an account patch
    fn update_account(&self, number: u64, patch: &AccountPatch) -> Result<()>;

    /// Delete one account
    fn delete_account(&self, number: u64) -> Result<()>;

    /// Delete every account owned by a customer in one atomic unit
    ///
    /// Returns the number of accounts removed (possibly zero).
    fn delete_accounts_by_customer(&self, customer_number: u64) -> Result<usize>;

    /// Delete one customer row
    fn delete_customer(&self, number: u64) -> Result<()>;

    /// Atomic read-modify-write of one balance; `delta` may be negative
    ///
    /// A negative `delta` on a debit-restricted account type fails with
    /// `DebitRestricted`. The restriction is evaluated on the row as read
    /// under the write lock, so a concurrent type change cannot let a
    /// debit slip through.
    fn adjust_balance(&self, number: u64, delta: Cents) -> Result<Cents>;

    /// Atomic two-account balance mutation
    ///
    /// Both adjustments commit together or neither is applied. No
    /// balance-sufficiency check is performed.
    fn transfer_balance(&self, from: u64, to: u64, amount: Cents) -> Result<TransferReceipt>;
}

/// RocksDB-backed store
pub struct Storage {
    db: Arc<DB>,

    /// Serialises every read-modify-write sequence. A single writer means
    /// transfer lock ordering is moot: no deadlock is possible.
    write_lock: Mutex<()>,
}

impl Storage {
    /// Open or create the database
    pub fn open(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;

        let mut db_opts = Options::default();
        db_opts.create_if_missing(true);
        db_opts.create_missing_column_families(true);
        db_opts.set_write_buffer_size(config.rocksdb.write_buffer_size_mb * 1024 * 1024);
        db_opts.set_max_write_buffer_number(config.rocksdb.max_write_buffer_number);
        db_opts.set_max_background_jobs(config.rocksdb.max_background_jobs);

        let cf_descriptors = vec![
            ColumnFamilyDescriptor::new(CF_CUSTOMERS, Options::default()),
            ColumnFamilyDescriptor::new(CF_ACCOUNTS, Options::default()),
            ColumnFamilyDescriptor::new(CF_ACCOUNT_INDEX, Options::default()),
            ColumnFamilyDescriptor::new(CF_META, Options::default()),
        ];

        let db = DB::open_cf_descriptors(&db_opts, &config.data_dir, cf_descriptors)?;

        tracing::info!(path = %config.data_dir.display(), "Opened bank store");

        Ok(Self {
            db: Arc::new(db),
            write_lock: Mutex::new(()),
        })
    }

    fn cf_handle(&self, name: &str) -> Result<&ColumnFamily> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| Error::Storage(format!("Column family {} not found", name)))
    }

    fn row_key(number: u64) -> [u8; 8] {
        number.to_be_bytes()
    }

    fn index_key(customer_number: u64, account_number: u64) -> [u8; 16] {
        let mut key = [0u8; 16];
        key[..8].copy_from_slice(&customer_number.to_be_bytes());
        key[8..].copy_from_slice(&account_number.to_be_bytes());
        key
    }

    /// Bump a sequence row inside `batch`; caller holds the write lock
    fn next_number(&self, batch: &mut WriteBatch, seq: &[u8]) -> Result<u64> {
        let cf = self.cf_handle(CF_META)?;
        let current = match self.db.get_cf(cf, seq)? {
            Some(bytes) => u64::from_be_bytes(
                bytes
                    .as_slice()
                    .try_into()
                    .map_err(|_| Error::Storage("Corrupt sequence row".to_string()))?,
            ),
            None => 0,
        };
        let next = current + 1;
        batch.put_cf(cf, seq, next.to_be_bytes());
        Ok(next)
    }

    fn read_customer(&self, number: u64) -> Result<Option<Customer>> {
        let cf = self.cf_handle(CF_CUSTOMERS)?;
        match self.db.get_cf(cf, Self::row_key(number))? {
            Some(value) => Ok(Some(bincode::deserialize(&value)?)),
            None => Ok(None),
        }
    }

    fn read_account(&self, number: u64) -> Result<Option<Account>> {
        let cf = self.cf_handle(CF_ACCOUNTS)?;
        match self.db.get_cf(cf, Self::row_key(number))? {
            Some(value) => Ok(Some(bincode::deserialize(&value)?)),
            None => Ok(None),
        }
    }

    fn put_account(&self, batch: &mut WriteBatch, account: &Account) -> Result<()> {
        let cf = self.cf_handle(CF_ACCOUNTS)?;
        batch.put_cf(
            cf,
            Self::row_key(account.account_number),
            bincode::serialize(account)?,
        );
        Ok(())
    }

    /// Highest-keyed row of a column family
    fn last_row<T: DeserializeOwned>(&self, cf_name: &str) -> Result<Option<T>> {
        let cf = self.cf_handle(cf_name)?;
        match self.db.iterator_cf(cf, IteratorMode::End).next() {
            Some(item) => {
                let (_, value) = item?;
                Ok(Some(bincode::deserialize(&value)?))
            }
            None => Ok(None),
        }
    }

    /// Account numbers owned by a customer, ascending
    fn owned_account_numbers(&self, customer_number: u64, limit: usize) -> Result<Vec<u64>> {
        let cf = self.cf_handle(CF_ACCOUNT_INDEX)?;
        let prefix = customer_number.to_be_bytes();

        let mut numbers = Vec::new();
        let iter = self
            .db
            .iterator_cf(cf, IteratorMode::From(&prefix, Direction::Forward));
        for item in iter {
            let (key, _) = item?;
            if key.len() < 16 || key[..8] != prefix {
                break;
            }
            let account_bytes: [u8; 8] = key[8..16]
                .try_into()
                .map_err(|_| Error::Storage("Corrupt index key".to_string()))?;
            numbers.push(u64::from_be_bytes(account_bytes));
            if numbers.len() >= limit {
                break;
            }
        }
        Ok(numbers)
    }
}

impl BankStore for Storage {
    fn get_customer(&self, number: u64) -> Result<Customer> {
        self.read_customer(number)?
            .ok_or(Error::CustomerNotFound(number))
    }

    fn last_customer(&self) -> Result<Option<Customer>> {
        self.last_row(CF_CUSTOMERS)
    }

    fn random_customer(&self) -> Result<Option<Customer>> {
        let cf = self.cf_handle(CF_CUSTOMERS)?;

        let mut count = 0usize;
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            item?;
            count += 1;
        }
        if count == 0 {
            return Ok(None);
        }

        let pick = rand::thread_rng().gen_range(0..count);
        for (i, item) in self.db.iterator_cf(cf, IteratorMode::Start).enumerate() {
            let (_, value) = item?;
            if i == pick {
                return Ok(Some(bincode::deserialize(&value)?));
            }
        }
        Ok(None)
    }

    fn get_account(&self, number: u64) -> Result<Account> {
        self.read_account(number)?
            .ok_or(Error::AccountNotFound(number))
    }

    fn last_account(&self) -> Result<Option<Account>> {
        self.last_row(CF_ACCOUNTS)
    }

    fn get_accounts_by_customer(
        &self,
        customer_number: u64,
        limit: usize,
    ) -> Result<Vec<Account>> {
        let numbers = self.owned_account_numbers(customer_number, limit)?;

        let mut accounts = Vec::with_capacity(numbers.len());
        for number in numbers {
            // The index and the row are written in one batch, so a dangling
            // entry means the store is corrupt, not merely stale.
            let account = self
                .read_account(number)?
                .ok_or_else(|| Error::Storage(format!("Index points at missing account {}", number)))?;
            accounts.push(account);
        }
        Ok(accounts)
    }

    fn insert_customer(&self, mut customer: Customer) -> Result<u64> {
        let _guard = self.write_lock.lock();

        let mut batch = WriteBatch::default();
        let number = self.next_number(&mut batch, SEQ_CUSTOMER)?;
        customer.customer_number = number;

        let cf = self.cf_handle(CF_CUSTOMERS)?;
        batch.put_cf(cf, Self::row_key(number), bincode::serialize(&customer)?);
        self.db.write(batch)?;

        tracing::debug!(customer_number = number, "Customer row inserted");
        Ok(number)
    }

    fn insert_account(&self, mut account: Account) -> Result<u64> {
        let _guard = self.write_lock.lock();

        // Re-check ownership under the lock so a concurrent cascade delete
        // cannot leave this row orphaned.
        if self.read_customer(account.customer_number)?.is_none() {
            return Err(Error::CustomerNotFound(account.customer_number));
        }

        let mut batch = WriteBatch::default();
        let number = self.next_number(&mut batch, SEQ_ACCOUNT)?;
        account.account_number = number;

        self.put_account(&mut batch, &account)?;
        let cf_index = self.cf_handle(CF_ACCOUNT_INDEX)?;
        batch.put_cf(
            cf_index,
            Self::index_key(account.customer_number, number),
            b"",
        );
        self.db.write(batch)?;

        tracing::debug!(
            account_number = number,
            customer_number = account.customer_number,
            "Account row inserted"
        );
        Ok(number)
    }

    fn update_customer(&self, number: u64, patch: &CustomerPatch) -> Result<()> {
        let _guard = self.write_lock.lock();

        let mut customer = self
            .read_customer(number)?
            .ok_or(Error::CustomerNotFound(number))?;

        if let Some(title) = patch.title {
            customer.title = title;
        }
        if let Some(ref first_name) = patch.first_name {
            customer.first_name = first_name.clone();
        }
        if let Some(ref last_name) = patch.last_name {
            customer.last_name = last_name.clone();
        }
        if let Some(ref address) = patch.address {
            customer.address = address.clone();
        }

        let cf = self.cf_handle(CF_CUSTOMERS)?;
        self.db
            .put_cf(cf, Self::row_key(number), bincode::serialize(&customer)?)?;
        Ok(())
    }

    fn update_account(&self, number: u64, patch: &AccountPatch) -> Result<()> {
        let _guard = self.write_lock.lock();

        let mut account = self
            .read_account(number)?
            .ok_or(Error::AccountNotFound(number))?;

        if let Some(account_type) = patch.account_type {
            account.account_type = account_type;
        }
        if let Some(interest_rate) = patch.interest_rate {
            account.interest_rate = interest_rate;
        }
        if let Some(overdraft_limit) = patch.overdraft_limit {
            account.overdraft_limit = overdraft_limit;
        }

        let cf = self.cf_handle(CF_ACCOUNTS)?;
        self.db
            .put_cf(cf, Self::row_key(number), bincode::serialize(&account)?)?;
        Ok(())
    }

    fn delete_account(&self, number: u64) -> Result<()> {
        let _guard = self.write_lock.lock();

        let account = self
            .read_account(number)?
            .ok_or(Error::AccountNotFound(number))?;

        let mut batch = WriteBatch::default();
        batch.delete_cf(self.cf_handle(CF_ACCOUNTS)?, Self::row_key(number));
        batch.delete_cf(
            self.cf_handle(CF_ACCOUNT_INDEX)?,
            Self::index_key(account.customer_number, number),
        );
        self.db.write(batch)?;

        tracing::debug!(account_number = number, "Account row deleted");
        Ok(())
    }

    fn delete_accounts_by_customer(&self, customer_number: u64) -> Result<usize> {
        let _guard = self.write_lock.lock();

        let numbers = self.owned_account_numbers(customer_number, usize::MAX)?;

        let mut batch = WriteBatch::default();
        let cf_accounts = self.cf_handle(CF_ACCOUNTS)?;
        let cf_index = self.cf_handle(CF_ACCOUNT_INDEX)?;
        for &number in &numbers {
            batch.delete_cf(cf_accounts, Self::row_key(number));
            batch.delete_cf(cf_index, Self::index_key(customer_number, number));
        }
        self.db.write(batch)?;

        tracing::debug!(
            customer_number,
            removed = numbers.len(),
            "Customer accounts cleared"
        );
        Ok(numbers.len())
    }

    fn delete_customer(&self, number: u64) -> Result<()> {
        let _guard = self.write_lock.lock();

        if self.read_customer(number)?.is_none() {
            return Err(Error::CustomerNotFound(number));
        }

        let cf = self.cf_handle(CF_CUSTOMERS)?;
        self.db.delete_cf(cf, Self::row_key(number))?;

        tracing::debug!(customer_number = number, "Customer row deleted");
        Ok(())
    }

    fn adjust_balance(&self, number: u64, delta: Cents) -> Result<Cents> {
        let _guard = self.write_lock.lock();

        let mut account = self
            .read_account(number)?
            .ok_or(Error::AccountNotFound(number))?;

        if delta < 0 && account.account_type.debit_restricted() {
            return Err(Error::DebitRestricted(account.account_type));
        }

        account.balance = account
            .balance
            .checked_add(delta)
            .ok_or(Error::InvalidAmount(delta))?;

        let cf = self.cf_handle(CF_ACCOUNTS)?;
        self.db
            .put_cf(cf, Self::row_key(number), bincode::serialize(&account)?)?;
        Ok(account.balance)
    }

    fn transfer_balance(&self, from: u64, to: u64, amount: Cents) -> Result<TransferReceipt> {
        if from == to {
            return Err(Error::Validation(
                "Cannot transfer to the same account".to_string(),
            ));
        }

        let _guard = self.write_lock.lock();

        // Verify both rows before writing either: one transaction boundary.
        let mut from_account = self.read_account(from)?.ok_or(Error::AccountNotFound(from))?;
        let mut to_account = self.read_account(to)?.ok_or(Error::AccountNotFound(to))?;

        from_account.balance = from_account
            .balance
            .checked_sub(amount)
            .ok_or(Error::InvalidAmount(amount))?;
        to_account.balance = to_account
            .balance
            .checked_add(amount)
            .ok_or(Error::InvalidAmount(amount))?;

        let mut batch = WriteBatch::default();
        self.put_account(&mut batch, &from_account)?;
        self.put_account(&mut batch, &to_account)?;
        self.db.write(batch)?;

        Ok(TransferReceipt {
            from_balance: from_account.balance,
            to_balance: to_account.balance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccountType, Title};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn test_storage() -> (Storage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.data_dir = temp_dir.path().to_path_buf();
        (Storage::open(&config).unwrap(), temp_dir)
    }

    fn test_customer() -> Customer {
        Customer {
            customer_number: 0,
            title: Title::Mr,
            first_name: "John".to_string(),
            last_name: "Smith".to_string(),
            address: "1 Oak Avenue".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 15),
            credit_score: 500,
            score_reviewed: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    fn test_account(customer_number: u64) -> Account {
        Account {
            account_number: 0,
            customer_number,
            account_type: AccountType::Current,
            balance: 0,
            interest_rate: 0,
            overdraft_limit: 0,
            opened: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_insert_and_get_customer() {
        let (storage, _temp) = test_storage();

        let number = storage.insert_customer(test_customer()).unwrap();
        assert_eq!(number, 1);

        let customer = storage.get_customer(number).unwrap();
        assert_eq!(customer.customer_number, 1);
        assert_eq!(customer.first_name, "John");
        assert_eq!(customer.credit_score, 500);
    }

    #[test]
    fn test_sequences_are_monotonic() {
        let (storage, _temp) = test_storage();

        assert_eq!(storage.insert_customer(test_customer()).unwrap(), 1);
        assert_eq!(storage.insert_customer(test_customer()).unwrap(), 2);
        assert_eq!(storage.insert_customer(test_customer()).unwrap(), 3);

        assert_eq!(storage.insert_account(test_account(1)).unwrap(), 1);
        assert_eq!(storage.insert_account(test_account(2)).unwrap(), 2);
    }

    #[test]
    fn test_get_customer_not_found() {
        let (storage, _temp) = test_storage();
        assert!(matches!(
            storage.get_customer(42),
            Err(Error::CustomerNotFound(42))
        ));
    }

    #[test]
    fn test_insert_account_requires_customer() {
        let (storage, _temp) = test_storage();
        assert!(matches!(
            storage.insert_account(test_account(9)),
            Err(Error::CustomerNotFound(9))
        ));
    }

    #[test]
    fn test_accounts_by_customer_ordered_and_limited() {
        let (storage, _temp) = test_storage();

        let cust = storage.insert_customer(test_customer()).unwrap();
        let other = storage.insert_customer(test_customer()).unwrap();

        for _ in 0..5 {
            storage.insert_account(test_account(cust)).unwrap();
        }
        storage.insert_account(test_account(other)).unwrap();

        let accounts = storage.get_accounts_by_customer(cust, 20).unwrap();
        assert_eq!(accounts.len(), 5);
        let numbers: Vec<u64> = accounts.iter().map(|a| a.account_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);

        let limited = storage.get_accounts_by_customer(cust, 3).unwrap();
        assert_eq!(limited.len(), 3);
        assert_eq!(limited[2].account_number, 3);
    }

    #[test]
    fn test_update_customer_patch() {
        let (storage, _temp) = test_storage();
        let number = storage.insert_customer(test_customer()).unwrap();

        let patch = CustomerPatch {
            title: Some(Title::Dr),
            address: Some("9 Elm Street".to_string()),
            ..CustomerPatch::default()
        };
        storage.update_customer(number, &patch).unwrap();

        let customer = storage.get_customer(number).unwrap();
        assert_eq!(customer.title, Title::Dr);
        assert_eq!(customer.address, "9 Elm Street");
        // Untouched fields survive
        assert_eq!(customer.first_name, "John");
    }

    #[test]
    fn test_adjust_balance() {
        let (storage, _temp) = test_storage();
        let cust = storage.insert_customer(test_customer()).unwrap();
        let acct = storage.insert_account(test_account(cust)).unwrap();

        assert_eq!(storage.adjust_balance(acct, 5000).unwrap(), 5000);
        assert_eq!(storage.adjust_balance(acct, -2000).unwrap(), 3000);
        assert_eq!(storage.adjust_balance(acct, -9000).unwrap(), -6000);
        assert_eq!(storage.get_account(acct).unwrap().balance, -6000);
    }

    #[test]
    fn test_adjust_balance_blocks_restricted_debits() {
        let (storage, _temp) = test_storage();
        let cust = storage.insert_customer(test_customer()).unwrap();
        let acct = storage.insert_account(test_account(cust)).unwrap();
        storage.adjust_balance(acct, 5000).unwrap();

        // Switching the type to a restricted one must take effect on the
        // very next debit: the check reads the row under the lock.
        let patch = AccountPatch {
            account_type: Some(AccountType::Mortgage),
            ..AccountPatch::default()
        };
        storage.update_account(acct, &patch).unwrap();

        assert!(matches!(
            storage.adjust_balance(acct, -100),
            Err(Error::DebitRestricted(AccountType::Mortgage))
        ));
        // Credits still land, and the balance is untouched by the refusal
        assert_eq!(storage.adjust_balance(acct, 1000).unwrap(), 6000);
    }

    #[test]
    fn test_transfer_balance_atomic() {
        let (storage, _temp) = test_storage();
        let cust = storage.insert_customer(test_customer()).unwrap();
        let a = storage.insert_account(test_account(cust)).unwrap();
        let b = storage.insert_account(test_account(cust)).unwrap();
        storage.adjust_balance(a, 10_000).unwrap();

        let receipt = storage.transfer_balance(a, b, 4000).unwrap();
        assert_eq!(receipt.from_balance, 6000);
        assert_eq!(receipt.to_balance, 4000);

        // Missing destination leaves the source untouched
        let err = storage.transfer_balance(a, 99, 1000).unwrap_err();
        assert!(matches!(err, Error::AccountNotFound(99)));
        assert_eq!(storage.get_account(a).unwrap().balance, 6000);
    }

    #[test]
    fn test_transfer_to_self_rejected() {
        let (storage, _temp) = test_storage();
        let cust = storage.insert_customer(test_customer()).unwrap();
        let a = storage.insert_account(test_account(cust)).unwrap();

        assert!(matches!(
            storage.transfer_balance(a, a, 100),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_delete_accounts_by_customer() {
        let (storage, _temp) = test_storage();
        let cust = storage.insert_customer(test_customer()).unwrap();
        for _ in 0..3 {
            storage.insert_account(test_account(cust)).unwrap();
        }

        let removed = storage.delete_accounts_by_customer(cust).unwrap();
        assert_eq!(removed, 3);
        assert!(storage.get_accounts_by_customer(cust, 20).unwrap().is_empty());

        // Idempotent on an already-empty customer
        assert_eq!(storage.delete_accounts_by_customer(cust).unwrap(), 0);
    }

    #[test]
    fn test_delete_account_removes_index_entry() {
        let (storage, _temp) = test_storage();
        let cust = storage.insert_customer(test_customer()).unwrap();
        let acct = storage.insert_account(test_account(cust)).unwrap();

        storage.delete_account(acct).unwrap();
        assert!(matches!(
            storage.get_account(acct),
            Err(Error::AccountNotFound(_))
        ));
        assert!(storage.get_accounts_by_customer(cust, 20).unwrap().is_empty());

        assert!(matches!(
            storage.delete_account(acct),
            Err(Error::AccountNotFound(_))
        ));
    }

    #[test]
    fn test_last_and_random_lookups() {
        let (storage, _temp) = test_storage();
        assert!(storage.last_customer().unwrap().is_none());
        assert!(storage.random_customer().unwrap().is_none());
        assert!(storage.last_account().unwrap().is_none());

        for _ in 0..4 {
            storage.insert_customer(test_customer()).unwrap();
        }
        storage.insert_account(test_account(2)).unwrap();
        storage.insert_account(test_account(3)).unwrap();

        assert_eq!(storage.last_customer().unwrap().unwrap().customer_number, 4);
        assert_eq!(storage.last_account().unwrap().unwrap().account_number, 2);

        let random = storage.random_customer().unwrap().unwrap();
        assert!((1..=4).contains(&random.customer_number));
    }
}
