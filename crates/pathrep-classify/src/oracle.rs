//! The external classification oracle boundary.
//!
//! The pipeline only ever sees the [`CategoryOracle`] trait; the default
//! implementation is a no-op so the pipeline is fully testable without any
//! live dependency.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use pathrep_model::{Category, Record};

use crate::rules::CategoryRules;

/// Identity of an unresolved test for oracle lookup.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TestKey {
    pub test_name: String,
    pub subgroup: String,
}

impl TestKey {
    #[must_use]
    pub fn new(test_name: impl Into<String>, subgroup: impl Into<String>) -> Self {
        Self {
            test_name: test_name.into(),
            subgroup: subgroup.into(),
        }
    }

    #[must_use]
    pub fn for_record(record: &Record) -> Self {
        Self::new(record.test_name.clone(), record.subgroup.clone())
    }
}

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("oracle api error (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("malformed oracle response: {0}")]
    Malformed(String),
}

pub type OracleResult<T> = std::result::Result<T, OracleError>;

/// Best-effort batch classifier for tests the rule table could not place.
///
/// The contract is narrow: one batch in, a partial mapping out. No coverage
/// guarantee; callers must treat every key as possibly absent.
pub trait CategoryOracle {
    fn classify_batch(
        &self,
        batch: &[TestKey],
        rules: &CategoryRules,
    ) -> OracleResult<BTreeMap<TestKey, Category>>;
}

/// Oracle used when no external service is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopOracle;

impl CategoryOracle for NoopOracle {
    fn classify_batch(
        &self,
        _batch: &[TestKey],
        _rules: &CategoryRules,
    ) -> OracleResult<BTreeMap<TestKey, Category>> {
        Ok(BTreeMap::new())
    }
}
