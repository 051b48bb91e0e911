//! HTTP chat-completion oracle.
//!
//! Sends the full unresolved batch in a single blocking request with a fixed
//! timeout and parses one `TestName,Subgroup,Category` line per decision.
//! Bad lines are skipped individually; transport and API failures surface as
//! [`OracleError`] for the resolver to absorb.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::{Value, json};
use tracing::debug;

use pathrep_model::Category;

use crate::oracle::{CategoryOracle, OracleError, OracleResult, TestKey};
use crate::rules::CategoryRules;

/// Default chat-completions endpoint.
const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default model for batch categorization.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// HTTP request timeout; the one place unbounded latency could enter the run.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Response token budget per batch.
const MAX_TOKENS: u32 = 800;

/// Explicit oracle configuration.
///
/// Built by the caller (the CLI reads `OPENAI_API_KEY`); the pipeline never
/// reads ambient environment state itself.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

impl OracleConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Chat-completion backed [`CategoryOracle`].
pub struct ChatOracle {
    client: Client,
    config: OracleConfig,
}

impl ChatOracle {
    pub fn new(config: OracleConfig) -> OracleResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(OracleError::Network)?;
        Ok(Self { client, config })
    }

    fn build_prompt(batch: &[TestKey], rules: &CategoryRules) -> String {
        let categories: Vec<&str> = rules
            .rules()
            .iter()
            .map(|rule| rule.category.label())
            .collect();
        let mut prompt = format!(
            "Categories: {}.\n\
             Assign each test to the best category.\n\
             Return CSV: TestName,Subgroup,Category\n\
             Tests:\n",
            categories.join(", ")
        );
        for key in batch {
            prompt.push_str(&format!(
                "- Test: {}, Subgroup: {}\n",
                key.test_name, key.subgroup
            ));
        }
        prompt
    }
}

impl CategoryOracle for ChatOracle {
    fn classify_batch(
        &self,
        batch: &[TestKey],
        rules: &CategoryRules,
    ) -> OracleResult<BTreeMap<TestKey, Category>> {
        if batch.is_empty() {
            return Ok(BTreeMap::new());
        }
        let prompt = Self::build_prompt(batch, rules);
        let body = json!({
            "model": self.config.model,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": MAX_TOKENS,
            "temperature": 0,
        });
        debug!(
            batch_size = batch.len(),
            model = %self.config.model,
            "requesting oracle classification"
        );
        let response = self
            .client
            .post(&self.config.api_url)
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .map_err(OracleError::Network)?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(OracleError::Api { status, message });
        }
        let payload: Value = response.json().map_err(OracleError::Network)?;
        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| OracleError::Malformed("missing message content".to_string()))?;
        let mapping = parse_decision_lines(content, rules);
        debug!(
            batch_size = batch.len(),
            resolved = mapping.len(),
            "oracle response parsed"
        );
        Ok(mapping)
    }
}

/// Parse decision lines from the oracle response text.
///
/// Each useful line is `TestName,Subgroup,Category`. Lines that do not split
/// into three fields or name a category outside the rule table are dropped
/// one by one; a partially garbled response still yields a partial mapping.
#[must_use]
pub fn parse_decision_lines(content: &str, rules: &CategoryRules) -> BTreeMap<TestKey, Category> {
    let mut mapping = BTreeMap::new();
    for line in content.lines() {
        let parts: Vec<&str> = line.split(',').map(str::trim).collect();
        let [test_name, subgroup, category] = parts.as_slice() else {
            continue;
        };
        let Some(category) = Category::from_label(category) else {
            continue;
        };
        let in_table = rules.rules().iter().any(|rule| rule.category == category);
        if !in_table {
            continue;
        }
        mapping.insert(TestKey::new(*test_name, *subgroup), category);
    }
    mapping
}
