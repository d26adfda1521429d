//! Raw Attribution Output - Tagged explainer shapes
//!
//! Explainer libraries change their output shape across versions, model
//! types and class counts: sometimes a per-class list of arrays, sometimes
//! a single tensor of rank 1, 2 or 3. Instead of sprinkling runtime rank
//! checks through the pipeline, every raw output is tagged into this closed
//! variant set at the oracle boundary. The extractor then dispatches over
//! the tags and nothing else.

use ndarray::{Array1, Array2, Array3};
use serde_json::Value;

use super::ScoringError;

/// One per-class entry of a class-indexed attribution list
#[derive(Debug, Clone, PartialEq)]
pub enum ClassArray {
    /// Per-feature values for a single instance
    Rank1(Array1<f64>),
    /// Samples × features matrix
    Rank2(Array2<f64>),
}

/// Raw explainer output, tagged by runtime shape
#[derive(Debug, Clone, PartialEq)]
pub enum RawAttribution {
    /// Class-indexed list (binary classification returns two entries)
    ClassList(Vec<ClassArray>),
    /// Per-feature values for a single instance
    Rank1(Array1<f64>),
    /// Samples × features matrix
    Rank2(Array2<f64>),
    /// Instance × feature × class tensor
    Rank3(Array3<f64>),
}

impl RawAttribution {
    /// Tag a sidecar JSON envelope into the variant set.
    ///
    /// JSON erases the distinction between a per-class *list* of arrays and
    /// a single 2-D array, so the sidecar wraps its payload as
    /// `{"format": "class_list" | "array", "values": ...}` and the format
    /// field carries the tag. Scalars, ragged nesting, non-numeric entries
    /// and rank ≥ 4 tensors are rejected as unrecognized.
    pub fn from_json(envelope: &Value) -> Result<Self, ScoringError> {
        let format = envelope
            .get("format")
            .and_then(Value::as_str)
            .ok_or_else(|| unrecognized("envelope without a 'format' tag"))?;
        let values = envelope
            .get("values")
            .ok_or_else(|| unrecognized("envelope without a 'values' payload"))?;

        match format {
            "class_list" => {
                let entries = values
                    .as_array()
                    .ok_or_else(|| unrecognized("class_list payload is not an array"))?;
                let mut classes = Vec::with_capacity(entries.len());
                for entry in entries {
                    classes.push(parse_class_array(entry)?);
                }
                Ok(RawAttribution::ClassList(classes))
            }
            "array" => match json_depth(values) {
                Some(1) => Ok(RawAttribution::Rank1(parse_rank1(values)?)),
                Some(2) => Ok(RawAttribution::Rank2(parse_rank2(values)?)),
                Some(3) => Ok(RawAttribution::Rank3(parse_rank3(values)?)),
                Some(depth) => Err(unrecognized(&format!(
                    "array payload of rank {} (supported: 1-3)",
                    depth
                ))),
                None => Err(unrecognized("array payload is not a numeric array")),
            },
            other => Err(unrecognized(&format!("unknown format tag '{}'", other))),
        }
    }
}

fn unrecognized(detail: &str) -> ScoringError {
    ScoringError::UnrecognizedShape(detail.to_string())
}

/// Nesting depth of a numeric JSON value: 0 for a bare number, 1 for a flat
/// array, and so on. `None` for anything that is not an array (scalars
/// included - a scalar is depth 0 and never a valid payload).
fn json_depth(value: &Value) -> Option<usize> {
    match value {
        Value::Array(items) => match items.first() {
            Some(first) => json_depth(first).map(|d| d + 1).or_else(|| {
                if first.is_number() {
                    Some(1)
                } else {
                    None
                }
            }),
            // Empty arrays are flat: downstream length validation reports them
            None => Some(1),
        },
        _ => None,
    }
}

fn parse_class_array(entry: &Value) -> Result<ClassArray, ScoringError> {
    match json_depth(entry) {
        Some(1) => Ok(ClassArray::Rank1(parse_rank1(entry)?)),
        Some(2) => Ok(ClassArray::Rank2(parse_rank2(entry)?)),
        _ => Err(unrecognized(
            "class_list entry is not a rank-1 or rank-2 numeric array",
        )),
    }
}

fn parse_rank1(value: &Value) -> Result<Array1<f64>, ScoringError> {
    let items = value
        .as_array()
        .ok_or_else(|| unrecognized("expected a numeric array"))?;
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        out.push(
            item.as_f64()
                .ok_or_else(|| unrecognized("non-numeric attribution entry"))?,
        );
    }
    Ok(Array1::from_vec(out))
}

fn parse_rank2(value: &Value) -> Result<Array2<f64>, ScoringError> {
    let rows = value
        .as_array()
        .ok_or_else(|| unrecognized("expected a matrix"))?;
    let mut width = None;
    let mut flat = Vec::new();
    for row in rows {
        let parsed = parse_rank1(row)?;
        match width {
            None => width = Some(parsed.len()),
            Some(w) if w != parsed.len() => {
                return Err(unrecognized("ragged attribution matrix"));
            }
            Some(_) => {}
        }
        flat.extend(parsed);
    }
    let width = width.unwrap_or(0);
    Array2::from_shape_vec((rows.len(), width), flat)
        .map_err(|e| unrecognized(&format!("matrix shape error: {}", e)))
}

fn parse_rank3(value: &Value) -> Result<Array3<f64>, ScoringError> {
    let planes = value
        .as_array()
        .ok_or_else(|| unrecognized("expected a rank-3 tensor"))?;
    let mut dims = None;
    let mut flat = Vec::new();
    for plane in planes {
        let parsed = parse_rank2(plane)?;
        let shape = (parsed.nrows(), parsed.ncols());
        match dims {
            None => dims = Some(shape),
            Some(d) if d != shape => {
                return Err(unrecognized("ragged attribution tensor"));
            }
            Some(_) => {}
        }
        flat.extend(parsed);
    }
    let (rows, cols) = dims.unwrap_or((0, 0));
    Array3::from_shape_vec((planes.len(), rows, cols), flat)
        .map_err(|e| unrecognized(&format!("tensor shape error: {}", e)))
}
