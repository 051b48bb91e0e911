//! Fallback resolution for rule-unresolved tests.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use pathrep_model::{Category, ClassificationSource};

use crate::oracle::{CategoryOracle, TestKey};
use crate::rules::CategoryRules;

/// Resolve every unresolved key to a category.
///
/// Makes at most one oracle attempt for the whole batch. Any oracle failure
/// degrades to the empty mapping; keys the oracle did not answer get the
/// configured default category. The returned mapping is total over the
/// input keys, so classification totality holds regardless of oracle
/// availability.
pub fn resolve(
    unresolved: &[TestKey],
    oracle: &dyn CategoryOracle,
    rules: &CategoryRules,
) -> BTreeMap<TestKey, (Category, ClassificationSource)> {
    let mut resolved = BTreeMap::new();
    if unresolved.is_empty() {
        return resolved;
    }
    let oracle_mapping = match oracle.classify_batch(unresolved, rules) {
        Ok(mapping) => mapping,
        Err(error) => {
            warn!(
                batch_size = unresolved.len(),
                error = %error,
                "oracle unavailable, unresolved tests fall back to the default category"
            );
            BTreeMap::new()
        }
    };
    for key in unresolved {
        let entry = match oracle_mapping.get(key) {
            Some(category) => (*category, ClassificationSource::Oracle),
            None => (rules.default_category(), ClassificationSource::Default),
        };
        resolved.insert(key.clone(), entry);
    }
    debug!(
        batch_size = unresolved.len(),
        oracle_resolved = oracle_mapping.len(),
        defaulted = resolved
            .values()
            .filter(|(_, source)| *source == ClassificationSource::Default)
            .count(),
        "fallback resolution complete"
    );
    resolved
}
