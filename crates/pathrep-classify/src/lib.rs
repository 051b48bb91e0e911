pub mod chat;
pub mod oracle;
pub mod resolver;
pub mod rules;

pub use chat::{ChatOracle, OracleConfig, parse_decision_lines};
pub use oracle::{CategoryOracle, NoopOracle, OracleError, OracleResult, TestKey};
pub use resolver::resolve;
pub use rules::{CategoryRule, CategoryRules};
