//! Parse result types

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::TapError;

/// Placeholder rendered for a diagnostic field that the producer did not emit
pub const UNDEFINED: &str = "undefined";

/// Finalized outcome of reading a complete TAP stream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseResult {
    /// Number of test points seen
    pub count: usize,
    /// Test points that passed
    pub pass: usize,
    /// Test points that failed (including todo failures)
    pub fail: usize,
    /// Test points carrying a SKIP directive
    pub skip: usize,
    /// Test points carrying a TODO directive
    pub todo: usize,
    /// The plan line, if one was seen
    pub plan: Option<Plan>,
    /// Reason given on a `Bail out!` line
    pub bailout: Option<String>,
    /// Failed test points in stream order
    pub failures: Vec<FailureRecord>,
}

impl ParseResult {
    /// Create a result from a test count and a failure list
    ///
    /// The pass/fail counters are derived; no plan or bail-out is recorded.
    #[must_use]
    pub fn new(count: usize, failures: Vec<FailureRecord>) -> Self {
        Self {
            count,
            pass: count.saturating_sub(failures.len()),
            fail: failures.len(),
            failures,
            ..Self::default()
        }
    }

    /// Check if any test point failed
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Check if the run succeeded: no failures and no bail-out
    #[must_use]
    pub fn ok(&self) -> bool {
        !self.has_failures() && self.bailout.is_none()
    }
}

/// A `1..N` plan line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// First test number (normally 1)
    pub start: usize,
    /// Last test number
    pub end: usize,
    /// Reason given for skipping everything (`1..0 # reason`)
    pub skip_reason: Option<String>,
}

/// A single failed test point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    /// 0-based index into the full test sequence
    pub id: usize,
    /// Test point description
    pub name: String,
    /// Diagnostics from the YAML block following the test point
    #[serde(default)]
    pub diagnostics: Diagnostics,
}

impl FailureRecord {
    /// Create a failure record
    #[must_use]
    pub fn new(id: usize, name: impl Into<String>, diagnostics: Diagnostics) -> Self {
        Self {
            id,
            name: name.into(),
            diagnostics,
        }
    }
}

/// Assertion diagnostics attached to a failed test point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Diagnostics {
    /// Comparison operator (`equal`, `deepEqual`, `ok`, ...)
    pub operator: String,
    /// Expected value
    pub expected: String,
    /// Actual value
    pub actual: String,
    /// Source location of the assertion
    pub at: String,
    /// Raw stack trace
    pub stack: String,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self {
            operator: UNDEFINED.to_string(),
            expected: UNDEFINED.to_string(),
            actual: UNDEFINED.to_string(),
            at: UNDEFINED.to_string(),
            stack: UNDEFINED.to_string(),
        }
    }
}

impl Diagnostics {
    /// Create diagnostics from explicit values
    #[must_use]
    pub fn new(
        operator: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
        at: impl Into<String>,
        stack: impl Into<String>,
    ) -> Self {
        Self {
            operator: operator.into(),
            expected: expected.into(),
            actual: actual.into(),
            at: at.into(),
            stack: stack.into(),
        }
    }

    /// Parse a dedented YAML diagnostics block
    ///
    /// Keys other than the five known fields are ignored. A block that is
    /// not a mapping yields default diagnostics.
    ///
    /// # Errors
    ///
    /// Returns `TapError::Diagnostics` if the block is not valid YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, TapError> {
        let value: Value = serde_yaml::from_str(yaml)?;
        let Value::Mapping(map) = value else {
            return Ok(Self::default());
        };

        let field = |key: &str| render_value(map.get(key));
        Ok(Self {
            operator: field("operator"),
            expected: field("expected"),
            actual: field("actual"),
            at: field("at"),
            stack: field("stack"),
        })
    }
}

/// Render a YAML scalar the way it reads in the source block
fn render_value(value: Option<&Value>) -> String {
    match value {
        None => UNDEFINED.to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| UNDEFINED.to_string()),
    }
}
