//! Model types and data structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary classification outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// Not spam (0)
    Ham,
    /// Spam (1)
    Spam,
}

impl Label {
    /// Both labels, in tie-break order
    pub const ALL: [Label; 2] = [Label::Ham, Label::Spam];

    /// Numeric encoding: 0 = not-spam, 1 = spam
    pub fn as_u8(self) -> u8 {
        match self {
            Label::Ham => 0,
            Label::Spam => 1,
        }
    }

    /// Decode the numeric encoding
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Label::Ham),
            1 => Some(Label::Spam),
            _ => None,
        }
    }

    /// Decode a dataset label ("ham" / "spam", case-insensitive)
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ham" | "0" => Some(Label::Ham),
            "spam" | "1" => Some(Label::Spam),
            _ => None,
        }
    }

    /// Position in per-class arrays
    pub fn index(self) -> usize {
        self.as_u8() as usize
    }

    pub fn is_spam(self) -> bool {
        self == Label::Spam
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Ham => write!(f, "Ham (Not Spam)"),
            Label::Spam => write!(f, "Spam"),
        }
    }
}

/// A cleaned dataset row
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabeledMessage {
    pub label: Label,
    pub text: String,
}

impl LabeledMessage {
    pub fn new(label: Label, text: impl Into<String>) -> Self {
        Self {
            label,
            text: text.into(),
        }
    }
}

/// Fixed-length numeric representation of a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector(pub Vec<f64>);

impl FeatureVector {
    /// All-zero vector of the given dimension
    pub fn zeros(dimension: usize) -> Self {
        Self(vec![0.0; dimension])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Indices and values of the non-zero dimensions
    pub fn non_zero(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.0
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, value)| *value != 0.0)
    }
}
