//! Report normalizers: pure functions from raw scanner JSON to typed
//! reports.
//!
//! Each normalizer commits to a single schema. Missing required fields and
//! unrecognized enumeration values fail with a [`SchemaError`] naming the
//! offending path or value; nothing is silently coerced. For the inventory
//! report this deployment commits to the nested `source.metadata.imageSize`
//! contract.

use std::collections::HashSet;

use serde_json::Value;

use super::domain::{Component, Severity, Vulnerability};
use crate::shared::error::SchemaError;

/// The typed form of an inventory (syft) report.
#[derive(Debug, Clone)]
pub struct InventoryReport {
    pub components: Vec<Component>,
    pub image_size_bytes: u64,
    pub distro: String,
}

/// Parses a vulnerability (grype) report into a deduplicated list of
/// vulnerabilities.
///
/// Requires a top-level `matches` array; each match requires
/// `vulnerability.id`, `vulnerability.severity`, `vulnerability.fix.state`
/// and `artifact.{name, version, type}`. Duplicate vulnerabilities (by
/// identity) collapse, first occurrence wins, input order otherwise
/// preserved.
pub fn parse_vulnerability_report(doc: &Value) -> Result<Vec<Vulnerability>, SchemaError> {
    let matches = array_field(doc, "matches", "matches")?;

    let mut seen = HashSet::new();
    let mut vulnerabilities = Vec::new();
    for (idx, entry) in matches.iter().enumerate() {
        let vulnerability = vulnerability_from_match(entry, idx)?;
        if seen.insert(vulnerability.clone()) {
            vulnerabilities.push(vulnerability);
        }
    }
    Ok(vulnerabilities)
}

fn vulnerability_from_match(entry: &Value, idx: usize) -> Result<Vulnerability, SchemaError> {
    let path = |suffix: &str| format!("matches[{}].{}", idx, suffix);

    let vulnerability = field(entry, "vulnerability", &path("vulnerability"))?;
    let id = str_field(vulnerability, "id", &path("vulnerability.id"))?;
    let raw_severity = str_field(vulnerability, "severity", &path("vulnerability.severity"))?;
    let severity: Severity = raw_severity
        .parse()
        .map_err(|value| SchemaError::UnknownSeverity { value })?;
    let fix = field(vulnerability, "fix", &path("vulnerability.fix"))?;
    let fix_state = str_field(fix, "state", &path("vulnerability.fix.state"))?;

    let artifact = field(entry, "artifact", &path("artifact"))?;
    let component = component_from_value(artifact, &path("artifact"))?;

    Ok(Vulnerability::new(
        id.to_string(),
        severity,
        fix_state,
        component,
    ))
}

/// Parses an inventory (syft) report into components, image size, and the
/// OS distribution id.
///
/// Requires a top-level `artifacts` array (each artifact with `name`,
/// `version`, `type`) and the nested `source.metadata.imageSize` path.
/// `distro.id` is informational and defaults to `"unknown"` when absent.
pub fn parse_inventory_report(doc: &Value) -> Result<InventoryReport, SchemaError> {
    let artifacts = array_field(doc, "artifacts", "artifacts")?;

    let mut components = Vec::with_capacity(artifacts.len());
    for (idx, artifact) in artifacts.iter().enumerate() {
        components.push(component_from_value(
            artifact,
            &format!("artifacts[{}]", idx),
        )?);
    }

    let image_size_bytes = nested_u64(doc, &["source", "metadata", "imageSize"])?;

    let distro = doc
        .get("distro")
        .and_then(|d| d.get("id"))
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();

    Ok(InventoryReport {
        components,
        image_size_bytes,
        distro,
    })
}

fn component_from_value(value: &Value, path: &str) -> Result<Component, SchemaError> {
    let name = str_field(value, "name", &format!("{}.name", path))?;
    let version = str_field(value, "version", &format!("{}.version", path))?;
    let kind = str_field(value, "type", &format!("{}.type", path))?;
    Ok(Component::new(name.to_string(), version.to_string(), kind))
}

fn field<'a>(value: &'a Value, key: &str, path: &str) -> Result<&'a Value, SchemaError> {
    value.get(key).ok_or_else(|| SchemaError::MissingField {
        path: path.to_string(),
    })
}

fn str_field<'a>(value: &'a Value, key: &str, path: &str) -> Result<&'a str, SchemaError> {
    field(value, key, path)?
        .as_str()
        .ok_or_else(|| SchemaError::InvalidStructure {
            message: format!("{} is not a string", path),
        })
}

fn array_field<'a>(value: &'a Value, key: &str, path: &str) -> Result<&'a Vec<Value>, SchemaError> {
    field(value, key, path)?
        .as_array()
        .ok_or_else(|| SchemaError::InvalidStructure {
            message: format!("{} is not an array", path),
        })
}

/// Walks a nested object path, reporting the full dotted path on any
/// missing link so the failure names the committed contract.
fn nested_u64(doc: &Value, segments: &[&str]) -> Result<u64, SchemaError> {
    let dotted = segments.join(".");
    let mut current = doc;
    for segment in segments {
        current = current
            .get(segment)
            .ok_or_else(|| SchemaError::MissingField {
                path: dotted.clone(),
            })?;
    }
    current.as_u64().ok_or_else(|| SchemaError::InvalidStructure {
        message: format!("{} is not an unsigned integer", dotted),
    })
}
