//! Per-record orchestration
//!
//! A [`Pipeline`] turns one untyped source into a [`RecordOutcome`]: decode
//! through the variant registries, report unconsumed keys, validate with the
//! record's meta attached, and normalize only when nothing was reported.
//! Every record gets its own [`ValidationContext`].

use std::sync::Arc;

use datum_ir::Value;
use datum_structure::{Normalizable, Normalizer, UnparsedKeys, Validatable, Validator};
use datum_types::{Datum, DatumDecoder};
use datum_validation::{ValidationContext, ValidationIssue, ValidationReporter, ValidationResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::store::DatumStore;
use crate::{AcceptancePolicy, Result, StrictnessLevel};

/// Configuration for the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// How a batch treats its rejected records
    pub acceptance_policy: AcceptancePolicy,
    /// Whether warnings reject a record
    pub strictness: StrictnessLevel,
    /// Report unconsumed keys as errors rather than warnings
    pub reject_unknown_fields: bool,
    /// Upper bound on records processed at once by a batch
    pub max_concurrency: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            acceptance_policy: AcceptancePolicy::default(),
            strictness: StrictnessLevel::default(),
            reject_unknown_fields: true,
            max_concurrency: 4,
        }
    }
}

impl PipelineConfig {
    #[must_use]
    pub fn unparsed_keys(&self) -> UnparsedKeys {
        if self.reject_unknown_fields {
            UnparsedKeys::Error
        } else {
            UnparsedKeys::Warning
        }
    }
}

/// Final disposition of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Accepted,
    Rejected,
}

/// Result of running one source through the pipeline
#[derive(Debug, Clone)]
pub struct RecordOutcome {
    /// Position of the source in its batch
    pub index: usize,
    pub status: RecordStatus,
    /// The decoded record, normalized when accepted
    pub datum: Option<Datum>,
    pub result: ValidationResult,
}

impl RecordOutcome {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.status == RecordStatus::Accepted
    }

    /// Serializable summary with JSON:API error and warning entries
    #[must_use]
    pub fn report(&self) -> RecordReport {
        let reporter = ValidationReporter::new();
        RecordReport {
            index: self.index,
            status: self.status,
            errors: reporter.report(&self.result).errors,
            warnings: reporter.report_warnings(&self.result).errors,
        }
    }
}

/// Wire shape of a [`RecordOutcome`]
#[derive(Debug, Clone, Serialize)]
pub struct RecordReport {
    pub index: usize,
    pub status: RecordStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationIssue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ValidationIssue>,
}

/// Decode, validate and normalize orchestration
#[derive(Clone)]
pub struct Pipeline {
    pub(crate) config: PipelineConfig,
    decoder: Arc<DatumDecoder>,
    pub(crate) store: Option<Arc<dyn DatumStore>>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("decoder", &self.decoder)
            .field("store", &self.store.is_some())
            .finish()
    }
}

impl Pipeline {
    /// Create a pipeline over every known datum family.
    ///
    /// # Errors
    ///
    /// Returns an error when a variant registry fails to build.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        Ok(Self {
            config,
            decoder: Arc::new(DatumDecoder::new()?),
            store: None,
        })
    }

    /// Create a pipeline with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error when a variant registry fails to build.
    pub fn with_defaults() -> Result<Self> {
        Self::new(PipelineConfig::default())
    }

    /// Hand accepted batch records to `store`
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn DatumStore>) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    #[must_use]
    pub fn decoder(&self) -> &DatumDecoder {
        &self.decoder
    }

    /// Run a single source through decode, validate and normalize
    #[must_use]
    pub fn process(&self, source: &Value) -> RecordOutcome {
        self.process_at(0, source)
    }

    pub(crate) fn process_at(&self, index: usize, source: &Value) -> RecordOutcome {
        let context = ValidationContext::new();
        let mut datum = self
            .decoder
            .decode_value(&context, source, self.config.unparsed_keys());

        if let Some(datum) = &mut datum {
            let scoped = context.with_meta(datum.meta());
            datum.validate(&Validator::new(scoped.clone()));
            if !context.has_error() {
                datum.normalize(&Normalizer::new(scoped));
            }
        }

        let result = context.result();
        let accepted = datum.is_some()
            && self
                .config
                .strictness
                .accepts(result.has_errors(), result.has_warnings());
        let status = if accepted {
            RecordStatus::Accepted
        } else {
            RecordStatus::Rejected
        };

        debug!(
            index,
            status = ?status,
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "record processed"
        );

        RecordOutcome {
            index,
            status,
            datum,
            result,
        }
    }
}
