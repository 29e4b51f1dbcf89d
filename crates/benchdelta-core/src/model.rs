use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::errors::ReportError;

/// Module sections that carry endpoint metrics, in flattening order.
pub const SECTIONS: [Section; 3] = [Section::ApiCore, Section::ApiWrite, Section::UiPages];

/// Key of the module holding edge-case check results.
pub const EDGE_CHECKS_MODULE: &str = "edgeChecks";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Section {
    #[serde(rename = "apiCore")]
    ApiCore,
    #[serde(rename = "apiWrite")]
    ApiWrite,
    #[serde(rename = "uiPages")]
    UiPages,
}

impl Section {
    /// Key of the section under `modules`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApiCore => "apiCore",
            Self::ApiWrite => "apiWrite",
            Self::UiPages => "uiPages",
        }
    }

    /// Human readable heading.
    pub fn title(&self) -> &'static str {
        match self {
            Self::ApiCore => "API Core",
            Self::ApiWrite => "API Write",
            Self::UiPages => "UI Pages",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which run of a comparison a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Current,
    Baseline,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => f.write_str("current"),
            Self::Baseline => f.write_str("baseline"),
        }
    }
}

/// A parsed benchmark run report.
///
/// The document is kept as JSON; only the root, `metadata` and `modules`
/// shapes are checked on construction. Section contents are checked lazily by
/// [`crate::flatten_metrics`] and [`Report::edge_checks`].
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    doc: Value,
}

impl Report {
    pub fn from_value(doc: Value) -> Result<Self, ReportError> {
        let Some(root) = doc.as_object() else {
            return Err(ReportError::invalid_structure("$", "an object", &doc));
        };
        for key in ["metadata", "modules"] {
            match root.get(key) {
                None | Some(Value::Null) | Some(Value::Object(_)) => {}
                Some(other) => {
                    return Err(ReportError::invalid_structure(key, "an object", other));
                }
            }
        }
        Ok(Self { doc })
    }

    pub fn as_value(&self) -> &Value {
        &self.doc
    }

    pub fn into_value(self) -> Value {
        self.doc
    }

    pub fn metadata(&self) -> Option<&Map<String, Value>> {
        self.doc.get("metadata").and_then(Value::as_object)
    }

    /// Metadata value rendered as text; `None` when absent or null.
    pub fn metadata_str(&self, key: &str) -> Option<String> {
        self.metadata()
            .and_then(|meta| meta.get(key))
            .and_then(value_text)
    }

    pub fn run_id(&self) -> String {
        self.metadata_str("runId")
            .unwrap_or_else(|| "unknown".to_string())
    }

    pub fn modules(&self) -> Option<&Map<String, Value>> {
        self.doc.get("modules").and_then(Value::as_object)
    }

    /// Flattened endpoint metrics of the three metric sections.
    pub fn metrics(&self) -> Result<Vec<MetricRecord>, ReportError> {
        crate::flatten::flatten_metrics(&self.doc)
    }

    /// Entries of `modules.edgeChecks.checks`; empty when the module is absent.
    pub fn edge_checks(&self) -> Result<Vec<EdgeCheck>, ReportError> {
        let Some(module) = self.modules().and_then(|m| m.get(EDGE_CHECKS_MODULE)) else {
            return Ok(Vec::new());
        };
        let location = format!("modules.{EDGE_CHECKS_MODULE}");
        let module = match module {
            Value::Null => return Ok(Vec::new()),
            Value::Object(map) => map,
            other => return Err(ReportError::invalid_structure(location, "an object", other)),
        };
        let checks = match module.get("checks") {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(ReportError::invalid_structure(
                    format!("{location}.checks"),
                    "an array",
                    other,
                ))
            }
        };

        checks
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let obj = item.as_object().ok_or_else(|| {
                    ReportError::invalid_structure(
                        format!("{location}.checks[{i}]"),
                        "an object",
                        item,
                    )
                })?;
                Ok(EdgeCheck {
                    name: obj.get("name").and_then(value_text).unwrap_or_default(),
                    passed: obj.get("passed").and_then(Value::as_bool).unwrap_or(false),
                    details: obj
                        .get("details")
                        .cloned()
                        .unwrap_or_else(|| Value::Object(Map::new())),
                })
            })
            .collect()
    }
}

/// One endpoint's measurements within a report section.
///
/// Holds a shallow copy of the source `endpointMetrics` entry. Accessors
/// coerce absent or malformed numbers to zero and absent strings to `None`;
/// the entry itself is never rewritten.
///
/// Serializes as the entry's fields plus a `section` tag. The tag replaces
/// any `section` key the entry carries.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord {
    pub section: Section,
    fields: Map<String, Value>,
}

const SECTION_TAG: &str = "section";

impl Serialize for MetricRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.fields.len() + usize::from(!self.fields.contains_key(SECTION_TAG));
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry(SECTION_TAG, &self.section)?;
        for (key, value) in &self.fields {
            if key.as_str() != SECTION_TAG {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

impl MetricRecord {
    pub fn new(section: Section, fields: Map<String, Value>) -> Self {
        Self { section, fields }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.fields.get(key).and_then(value_text)
    }

    /// Numeric field; numbers and numeric strings are accepted.
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.fields.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    pub fn endpoint_name(&self) -> Option<String> {
        self.text("endpointName")
    }

    pub fn path(&self) -> Option<String> {
        self.text("path")
    }

    pub fn tier(&self) -> Option<String> {
        self.text("tier")
    }

    pub fn method(&self) -> Option<String> {
        self.text("method")
    }

    pub fn p95_ms(&self) -> f64 {
        self.number("p95Ms").unwrap_or(0.0)
    }

    pub fn avg_ms(&self) -> f64 {
        self.number("avgMs").unwrap_or(0.0)
    }

    pub fn throughput_rps(&self) -> f64 {
        self.number("throughputRps").unwrap_or(0.0)
    }

    pub fn error_rate_pct(&self) -> f64 {
        self.number("errorRatePct").unwrap_or(0.0)
    }

    /// Status code counts. Counts that are not non-negative integers (or
    /// integer strings) are dropped; fractional counts truncate.
    pub fn statuses(&self) -> BTreeMap<String, u64> {
        let Some(Value::Object(map)) = self.fields.get("statuses") else {
            return BTreeMap::new();
        };
        map.iter()
            .filter_map(|(code, count)| status_count(count).map(|n| (code.clone(), n)))
            .collect()
    }

    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey {
            endpoint_name: self.endpoint_name(),
            path: self.path(),
            tier: self.tier(),
        }
    }
}

fn status_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .map(|v| v.trunc() as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

/// Text form of a scalar JSON value. Strings are returned verbatim.
pub(crate) fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Join key between runs: `(endpointName, path, tier)`.
///
/// Ordering is field-wise string order; an absent component sorts before any
/// present one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityKey {
    pub endpoint_name: Option<String>,
    pub path: Option<String>,
    pub tier: Option<String>,
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{}::{}",
            self.endpoint_name.as_deref().unwrap_or(""),
            self.path.as_deref().unwrap_or(""),
            self.tier.as_deref().unwrap_or("")
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Improved,
    Regressed,
    Neutral,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Improved => "improved",
            Self::Regressed => "regressed",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One joined endpoint of a baseline comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub endpoint_name: String,
    pub tier: String,
    pub path: Option<String>,
    pub p95_before_ms: f64,
    pub p95_after_ms: f64,
    pub p95_delta_pct: f64,
    pub throughput_before_rps: f64,
    pub throughput_after_rps: f64,
    pub throughput_delta_pct: f64,
    pub error_rate_before_pct: f64,
    pub error_rate_after_pct: f64,
    pub error_rate_delta_pct: f64,
    pub status: Classification,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeCheck {
    pub name: String,
    pub passed: bool,
    pub details: Value,
}
