//! Opinion: one strategy's structured reading of one model response

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Structural shape of the response an [`Opinion`] was read from
///
/// Only [`OpinionShape::WellFormed`] opinions can pass schema validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpinionShape {
    /// An object carrying the label field with a string or null value
    WellFormed,
    /// An object without the label field
    MissingLabelField,
    /// The label field holds something other than a string or null
    LabelNotString,
    /// Valid structured output, but not an object
    NotAnObject,
}

impl OpinionShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpinionShape::WellFormed => "well_formed",
            OpinionShape::MissingLabelField => "missing_label_field",
            OpinionShape::LabelNotString => "label_not_string",
            OpinionShape::NotAnObject => "not_an_object",
        }
    }
}

/// A single strategy's opinion about which category applies
///
/// `label` is `None` both when the strategy explicitly answered "no category"
/// and when the response could not be read at all; [`Opinion::shape`] tells
/// the two apart. A present label is NOT guaranteed to belong to the
/// category set. Run it through the schema validator before trusting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opinion {
    label: Option<String>,
    shape: OpinionShape,
    /// Any other fields of a structured response (e.g. "reasoning")
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    extra: Map<String, Value>,
}

impl Opinion {
    /// A well-formed opinion naming a label
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            shape: OpinionShape::WellFormed,
            extra: Map::new(),
        }
    }

    /// A well-formed opinion that names no label
    pub fn unlabeled() -> Self {
        Self {
            label: None,
            shape: OpinionShape::WellFormed,
            extra: Map::new(),
        }
    }

    /// An opinion read from output whose structure is wrong
    pub fn malformed(shape: OpinionShape) -> Self {
        Self {
            label: None,
            shape,
            extra: Map::new(),
        }
    }

    /// Read an opinion out of a parsed structured response
    ///
    /// `label_field` is the key expected to carry the label (`call_type` by
    /// default). Remaining keys are kept as extra fields.
    pub fn from_json(value: Value, label_field: &str) -> Self {
        let Value::Object(mut map) = value else {
            return Self::malformed(OpinionShape::NotAnObject);
        };

        match map.remove(label_field) {
            None => Self {
                label: None,
                shape: OpinionShape::MissingLabelField,
                extra: map,
            },
            Some(Value::Null) => Self {
                label: None,
                shape: OpinionShape::WellFormed,
                extra: map,
            },
            Some(Value::String(label)) => Self {
                label: Some(label),
                shape: OpinionShape::WellFormed,
                extra: map,
            },
            Some(other) => {
                map.insert(label_field.to_string(), other);
                Self {
                    label: None,
                    shape: OpinionShape::LabelNotString,
                    extra: map,
                }
            }
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn shape(&self) -> OpinionShape {
        self.shape
    }

    pub fn is_well_formed(&self) -> bool {
        self.shape == OpinionShape::WellFormed
    }

    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}
