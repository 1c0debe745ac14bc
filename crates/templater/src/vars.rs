//! Template variables and how the sources are merged.
//!
//! Variables come from three places, applied in this order with later writes
//! replacing earlier ones:
//!
//! 1. built-ins: `content`, `TEMPLATE`, `INPUT`
//! 2. the input file's header (see [`crate::header`])
//! 3. `-V key=value` overrides, in command-line order

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Serialize;

/// Built-in variable holding the full input text.
pub const CONTENT_VAR: &str = "content";
/// Built-in variable holding the template path as given.
pub const TEMPLATE_VAR: &str = "TEMPLATE";
/// Built-in variable holding the input path as given.
pub const INPUT_VAR: &str = "INPUT";

/// A variable's value: a single string or a list of strings.
///
/// Serialized untagged, so templates see a plain string or a plain sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum VarValue {
    Scalar(String),
    List(Vec<String>),
}

impl VarValue {
    pub fn scalar(value: impl Into<String>) -> Self {
        VarValue::Scalar(value.into())
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            VarValue::Scalar(value) => Some(value),
            VarValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            VarValue::List(items) => Some(items),
            VarValue::Scalar(_) => None,
        }
    }
}

impl From<&str> for VarValue {
    fn from(value: &str) -> Self {
        VarValue::Scalar(value.to_string())
    }
}

impl From<String> for VarValue {
    fn from(value: String) -> Self {
        VarValue::Scalar(value)
    }
}

impl From<Vec<String>> for VarValue {
    fn from(items: Vec<String>) -> Self {
        VarValue::List(items)
    }
}

/// Name-to-value mapping handed to the template. Last write wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Variables(BTreeMap<String, VarValue>);

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in variables every render receives.
    pub fn builtins(content: &str, template: &str, input: &str) -> Self {
        let mut vars = Self::new();
        vars.insert(CONTENT_VAR, content);
        vars.insert(TEMPLATE_VAR, template);
        vars.insert(INPUT_VAR, input);
        vars
    }

    /// Sets `key`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<VarValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&VarValue> {
        self.0.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut VarValue> {
        self.0.get_mut(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copies every variable from `other` over this mapping.
    pub fn merge(&mut self, other: Variables) {
        self.0.extend(other.0);
    }

    /// Applies overrides in order.
    pub fn apply_overrides<'a>(&mut self, overrides: impl IntoIterator<Item = &'a Override>) {
        for item in overrides {
            self.insert(item.key.clone(), item.value.clone());
        }
    }
}

/// Builds the final mapping: built-ins, then header, then overrides.
pub fn merge_variables(builtins: Variables, header: Variables, overrides: &[Override]) -> Variables {
    let mut vars = builtins;
    vars.merge(header);
    vars.apply_overrides(overrides);
    vars
}

/// Errors from parsing a `-V` override.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OverrideError {
    /// The argument does not contain exactly one `=`.
    #[error("expected KEY=VALUE with exactly one '=', got {0:?}")]
    Malformed(String),

    /// Nothing before the `=`.
    #[error("override {0:?} has an empty key")]
    EmptyKey(String),
}

/// A `key=value` variable supplied on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Override {
    pub key: String,
    pub value: String,
}

impl Override {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl FromStr for Override {
    type Err = OverrideError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let mut parts = trimmed.split('=');
        let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(OverrideError::Malformed(raw.to_string()));
        };
        if key.is_empty() {
            return Err(OverrideError::EmptyKey(raw.to_string()));
        }
        Ok(Override::new(key, value))
    }
}
