//! Bounded worker pool simulating the external credit agencies
//!
//! The legacy arrangement was five independently scheduled agency
//! transactions per check, each with its own random delay. Here a single
//! dispatcher task drains a bounded job queue and runs at most
//! `agencies` scoring tasks at a time; callers hold a oneshot-backed
//! [`PendingScore`] and decide how long to wait for it. A receiver
//! dropped on timeout simply discards the late result.

use crate::error::{Error, Result};
use crate::score::{composite_score, Applicant};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, Semaphore};
use tokio::time::Duration;

/// Worker pool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BureauConfig {
    /// Concurrent scoring jobs (legacy: five parallel agencies)
    pub agencies: usize,

    /// Jobs accepted into the queue beyond the in-flight ones
    pub queue_depth: usize,

    /// Upper bound for the simulated per-job agency delay
    pub max_delay_ms: u64,
}

impl Default for BureauConfig {
    fn default() -> Self {
        Self {
            agencies: 5,
            queue_depth: 32,
            max_delay_ms: 300,
        }
    }
}

/// A queued scoring job
struct Job {
    applicant: Applicant,
    response: oneshot::Sender<u16>,
}

/// Handle for submitting scoring jobs
#[derive(Clone)]
pub struct CreditBureau {
    jobs: mpsc::Sender<Job>,
}

/// An in-flight credit check
pub struct PendingScore {
    response: oneshot::Receiver<u16>,
}

impl PendingScore {
    /// Wait for the score
    pub async fn wait(self) -> Result<u16> {
        self.response.await.map_err(|_| Error::Closed)
    }
}

impl CreditBureau {
    /// Submit a scoring job without blocking
    pub fn submit(&self, applicant: Applicant) -> Result<PendingScore> {
        let (tx, rx) = oneshot::channel();
        self.jobs
            .try_send(Job {
                applicant,
                response: tx,
            })
            .map_err(|err| match err {
                mpsc::error::TrySendError::Full(_) => Error::QueueFull,
                mpsc::error::TrySendError::Closed(_) => Error::Closed,
            })?;
        Ok(PendingScore { response: rx })
    }
}

/// Spawn the dispatcher task and return its handle
pub fn spawn_credit_bureau(config: BureauConfig) -> CreditBureau {
    let (tx, mut rx) = mpsc::channel::<Job>(config.queue_depth.max(1));
    let permits = Arc::new(Semaphore::new(config.agencies.max(1)));
    let max_delay_ms = config.max_delay_ms;

    tokio::spawn(async move {
        while let Some(job) = rx.recv().await {
            let permit = match permits.clone().acquire_owned().await {
                Ok(permit) => permit,
                // Semaphore is never closed; bail out rather than spin
                Err(_) => break,
            };

            tokio::spawn(async move {
                let _permit = permit;

                let delay_ms = if max_delay_ms == 0 {
                    0
                } else {
                    rand::thread_rng().gen_range(0..=max_delay_ms)
                };
                if delay_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }

                let score = composite_score(&job.applicant);
                tracing::debug!(score, name = %job.applicant.name, "credit check complete");

                // Receiver may have timed out; the late result is discarded
                let _ = job.response.send(score);
            });
        }

        tracing::debug!("credit bureau dispatcher stopped");
    });

    CreditBureau { jobs: tx }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config() -> BureauConfig {
        BureauConfig {
            max_delay_ms: 0,
            ..BureauConfig::default()
        }
    }

    #[tokio::test]
    async fn test_submit_and_wait() {
        let bureau = spawn_credit_bureau(fast_config());

        let applicant = Applicant::new("Mr John Smith", "1 Oak Avenue");
        let expected = composite_score(&applicant);

        let score = bureau.submit(applicant).unwrap().wait().await.unwrap();
        assert_eq!(score, expected);
        assert!((1..=999).contains(&score));
    }

    #[tokio::test]
    async fn test_repeat_checks_agree() {
        let bureau = spawn_credit_bureau(fast_config());

        let applicant = Applicant::new("Mrs Jane Doe", "42 Elm Street");
        let first = bureau
            .submit(applicant.clone())
            .unwrap()
            .wait()
            .await
            .unwrap();
        let second = bureau.submit(applicant).unwrap().wait().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_many_jobs_complete() {
        let bureau = spawn_credit_bureau(fast_config());

        let mut pending = Vec::new();
        for i in 0..10 {
            let applicant = Applicant::new(format!("Mr Customer {i}"), "High Street");
            pending.push(bureau.submit(applicant).unwrap());
        }

        for handle in pending {
            let score = handle.wait().await.unwrap();
            assert!((1..=999).contains(&score));
        }
    }

    #[tokio::test]
    async fn test_queue_full_rejected() {
        // One slow worker, a one-slot queue: the dispatcher can hold at
        // most one dequeued job while one is in flight, so four rapid
        // submissions must overflow.
        let bureau = spawn_credit_bureau(BureauConfig {
            agencies: 1,
            queue_depth: 1,
            max_delay_ms: 5_000,
        });

        let mut saw_full = false;
        for i in 0..4 {
            let applicant = Applicant::new(format!("Mr Rush {i}"), "Queue Lane");
            match bureau.submit(applicant) {
                Ok(_) => {}
                Err(Error::QueueFull) => {
                    saw_full = true;
                    break;
                }
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert!(saw_full);
    }
}
