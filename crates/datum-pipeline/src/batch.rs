//! Batch processing
//!
//! Records of a batch are independent: each runs on a blocking worker with its
//! own context, at most `max_concurrency` at a time, and outcomes are merged
//! back in input order whatever order the workers finish in.

use std::sync::Arc;

use datum_ir::Value;
use datum_types::Datum;
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::pipeline::{Pipeline, RecordOutcome, RecordReport};
use crate::{AcceptancePolicy, Error, Result};

/// Outcomes of a batch in input order, with the policy applied
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub records: Vec<RecordOutcome>,
    pub policy: AcceptancePolicy,
}

impl BatchOutcome {
    #[must_use]
    pub fn accepted_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_accepted()).count()
    }

    #[must_use]
    pub fn rejected_count(&self) -> usize {
        self.records.len() - self.accepted_count()
    }

    /// Whether the batch as a whole may be committed
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        match self.policy {
            AcceptancePolicy::Partial => true,
            AcceptancePolicy::FailAll => self.rejected_count() == 0,
        }
    }

    /// Records that survive the policy
    #[must_use]
    pub fn committed(&self) -> Vec<&Datum> {
        if !self.is_accepted() {
            return Vec::new();
        }
        self.records
            .iter()
            .filter(|r| r.is_accepted())
            .filter_map(|r| r.datum.as_ref())
            .collect()
    }

    #[must_use]
    pub fn report(&self) -> BatchReport {
        BatchReport {
            accepted: self.is_accepted(),
            accepted_count: self.accepted_count(),
            rejected_count: self.rejected_count(),
            records: self.records.iter().map(RecordOutcome::report).collect(),
        }
    }
}

/// Wire shape of a [`BatchOutcome`]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub accepted: bool,
    pub accepted_count: usize,
    pub rejected_count: usize,
    pub records: Vec<RecordReport>,
}

impl Pipeline {
    /// Process `sources` concurrently and apply the acceptance policy.
    ///
    /// Accepted records are handed to the configured store once the batch as
    /// a whole is accepted, and replaced by the stored version.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Batch`] when a worker fails to complete and propagates
    /// store failures.
    pub async fn process_batch(&self, sources: Vec<Value>) -> Result<BatchOutcome> {
        let total = sources.len();
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency.max(1)));
        let mut workers = JoinSet::new();

        for (index, source) in sources.into_iter().enumerate() {
            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .map_err(|e| Error::Batch(format!("semaphore closed: {e}")))?;
            let pipeline = self.clone();
            workers.spawn_blocking(move || {
                let _permit = permit;
                pipeline.process_at(index, &source)
            });
        }

        let mut slots: Vec<Option<RecordOutcome>> = (0..total).map(|_| None).collect();
        while let Some(joined) = workers.join_next().await {
            let outcome = joined.map_err(|e| Error::Batch(format!("worker failed: {e}")))?;
            let index = outcome.index;
            slots[index] = Some(outcome);
        }
        let records: Vec<RecordOutcome> = slots.into_iter().flatten().collect();
        if records.len() != total {
            return Err(Error::Batch(format!(
                "expected {total} outcomes, collected {}",
                records.len()
            )));
        }

        let mut batch = BatchOutcome {
            records,
            policy: self.config.acceptance_policy,
        };
        info!(
            total,
            accepted = batch.accepted_count(),
            rejected = batch.rejected_count(),
            policy = ?batch.policy,
            committed = batch.is_accepted(),
            "batch processed"
        );

        if batch.is_accepted() {
            self.commit(&mut batch)?;
        }
        Ok(batch)
    }

    fn commit(&self, batch: &mut BatchOutcome) -> Result<()> {
        let Some(store) = &self.store else {
            return Ok(());
        };
        for record in batch.records.iter_mut().filter(|r| r.is_accepted()) {
            if let Some(datum) = record.datum.take() {
                let stored = store.store(datum)?;
                debug!(index = record.index, id = ?stored.base().id, "record committed");
                record.datum = Some(stored);
            }
        }
        Ok(())
    }
}
