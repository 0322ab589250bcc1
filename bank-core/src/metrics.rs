//! Metrics collection for observability
//!
//! # Metrics
//!
//! - `bank_customers_created_total` - customers created
//! - `bank_accounts_created_total` - accounts opened
//! - `bank_movements_total` - balance movements (debits, credits, transfers)
//! - `bank_credit_fallbacks_total` - credit checks resolved by the fallback score
//! - `bank_credit_check_duration_seconds` - credit check wait time

use prometheus::{Histogram, HistogramOpts, IntCounter, Opts, Registry};
use std::sync::Arc;

/// Metrics collector
///
/// Collectors live only in the per-instance registry, never the
/// process-global one, so independent service instances (and parallel
/// tests) do not collide on metric names.
#[derive(Clone)]
pub struct Metrics {
    /// Customers created
    pub customers_created: IntCounter,

    /// Accounts opened
    pub accounts_created: IntCounter,

    /// Balance movements applied
    pub movements_total: IntCounter,

    /// Credit checks resolved by the fallback score
    pub credit_fallbacks: IntCounter,

    /// Credit check wait time
    pub credit_check_duration: Histogram,

    /// Prometheus registry
    pub registry: Arc<Registry>,
}

impl Metrics {
    /// Create a collector with its own registry
    pub fn new() -> prometheus::Result<Self> {
        let registry = Arc::new(Registry::new());

        let customers_created = IntCounter::with_opts(Opts::new(
            "bank_customers_created_total",
            "Customers created",
        ))?;
        registry.register(Box::new(customers_created.clone()))?;

        let accounts_created = IntCounter::with_opts(Opts::new(
            "bank_accounts_created_total",
            "Accounts opened",
        ))?;
        registry.register(Box::new(accounts_created.clone()))?;

        let movements_total = IntCounter::with_opts(Opts::new(
            "bank_movements_total",
            "Balance movements applied",
        ))?;
        registry.register(Box::new(movements_total.clone()))?;

        let credit_fallbacks = IntCounter::with_opts(Opts::new(
            "bank_credit_fallbacks_total",
            "Credit checks resolved by the fallback score",
        ))?;
        registry.register(Box::new(credit_fallbacks.clone()))?;

        let credit_check_duration = Histogram::with_opts(
            HistogramOpts::new(
                "bank_credit_check_duration_seconds",
                "Credit check wait time",
            )
            .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        )?;
        registry.register(Box::new(credit_check_duration.clone()))?;

        Ok(Self {
            customers_created,
            accounts_created,
            movements_total,
            credit_fallbacks,
            credit_check_duration,
            registry,
        })
    }

    /// Get metrics registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
