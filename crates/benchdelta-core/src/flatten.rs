use serde_json::Value;

use crate::errors::ReportError;
use crate::model::{MetricRecord, SECTIONS};

/// Flatten the endpoint metrics of a report document.
///
/// Visits `apiCore`, `apiWrite` and `uiPages` in that order and emits every
/// `endpointMetrics` entry in input order, tagged with its section. Absent
/// sections contribute nothing. Only values of the wrong JSON kind where a
/// mapping or list is required are rejected.
pub fn flatten_metrics(doc: &Value) -> Result<Vec<MetricRecord>, ReportError> {
    let root = doc
        .as_object()
        .ok_or_else(|| ReportError::invalid_structure("$", "an object", doc))?;

    let modules = match root.get("modules") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Object(map)) => map,
        Some(other) => return Err(ReportError::invalid_structure("modules", "an object", other)),
    };

    let mut records = Vec::new();
    for section in SECTIONS {
        let location = format!("modules.{section}");
        let module = match modules.get(section.as_str()) {
            None | Some(Value::Null) => continue,
            Some(Value::Object(map)) => map,
            Some(other) => return Err(ReportError::invalid_structure(location, "an object", other)),
        };

        let entries = match module.get("endpointMetrics") {
            None | Some(Value::Null) => continue,
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(ReportError::invalid_structure(
                    format!("{location}.endpointMetrics"),
                    "an array",
                    other,
                ))
            }
        };

        for (i, entry) in entries.iter().enumerate() {
            let fields = entry.as_object().ok_or_else(|| {
                ReportError::invalid_structure(
                    format!("{location}.endpointMetrics[{i}]"),
                    "an object",
                    entry,
                )
            })?;
            records.push(MetricRecord::new(section, fields.clone()));
        }
    }

    Ok(records)
}
