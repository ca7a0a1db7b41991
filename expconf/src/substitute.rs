//! `${name}` variable substitution.
//!
//! Variables come from the reserved [`VARIABLES_KEY`] block of the merged
//! document. A string that is exactly one token takes the variable's typed
//! value; tokens embedded in longer strings are replaced by the variable's
//! text form. Unknown tokens are left as written.

use std::borrow::Cow;
use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::{Error, Result};
use crate::value::{Mapping, Value};

/// Reserved key holding the variables block.
pub const VARIABLES_KEY: &str = "__variables__";

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{(\w+)\}").expect("valid variable token regex"));

/// Replaces `${name}` tokens throughout a document.
///
/// # Examples
///
/// ```
/// use expconf::{Mapping, Value, VariableSubstitutor};
/// use serde_json::json;
///
/// let mut vars = Mapping::new();
/// vars.insert("n".to_string(), Value::Int(4));
/// let substitutor = VariableSubstitutor::new(vars);
///
/// let mut doc = Value::from(json!({"workers": "${n}", "tag": "run-${n}"}));
/// substitutor.apply(&mut doc);
/// assert_eq!(doc.pointer("workers"), Some(&Value::Int(4)));
/// assert_eq!(doc.pointer("tag"), Some(&Value::from("run-4")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct VariableSubstitutor {
    variables: Mapping,
    tokens: HashMap<String, Value>,
}

impl VariableSubstitutor {
    /// Create a substitutor from a name → value mapping.
    #[must_use]
    pub fn new(variables: Mapping) -> Self {
        let tokens = variables
            .iter()
            .map(|(name, value)| (format!("${{{name}}}"), value.clone()))
            .collect();
        Self { variables, tokens }
    }

    /// Create a substitutor from the variables block of `document`.
    ///
    /// A missing or null block yields a substitutor with no variables.
    ///
    /// # Errors
    ///
    /// Returns `InvalidVariables` if the block is not a mapping.
    pub fn from_document(document: &Mapping) -> Result<Self> {
        match document.get(VARIABLES_KEY) {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(Value::Mapping(variables)) => Ok(Self::new(variables.clone())),
            Some(other) => Err(Error::InvalidVariables {
                reason: format!("{VARIABLES_KEY} must be a mapping, found {}", other.kind()),
            }),
        }
    }

    /// The variables in declaration order.
    #[must_use]
    pub fn variables(&self) -> &Mapping {
        &self.variables
    }

    /// Returns true if there are no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Substitute every string scalar in `value`, in place.
    ///
    /// Substituted text is not scanned again.
    pub fn apply(&self, value: &mut Value) {
        if self.is_empty() {
            return;
        }
        self.visit(value);
    }

    /// Substitute a single string.
    #[must_use]
    pub fn substitute_str(&self, text: &str) -> Value {
        if let Some(value) = self.tokens.get(text) {
            return value.clone();
        }
        match self.replace_tokens(text) {
            Cow::Borrowed(_) => Value::from(text),
            Cow::Owned(replaced) => Value::String(replaced),
        }
    }

    fn visit(&self, value: &mut Value) {
        match value {
            Value::String(text) => {
                if let Some(typed) = self.tokens.get(text.as_str()).cloned() {
                    *value = typed;
                    return;
                }
                let replaced = match self.replace_tokens(text) {
                    Cow::Owned(replaced) => Some(replaced),
                    Cow::Borrowed(_) => None,
                };
                if let Some(replaced) = replaced {
                    *text = replaced;
                }
            }
            Value::Sequence(items) => items.iter_mut().for_each(|item| self.visit(item)),
            Value::Mapping(map) => map.values_mut().for_each(|item| self.visit(item)),
            Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) => {}
        }
    }

    fn replace_tokens<'t>(&self, text: &'t str) -> Cow<'t, str> {
        TOKEN_RE.replace_all(text, |caps: &Captures<'_>| match self.variables.get(&caps[1]) {
            Some(value) => value.to_template_string(),
            None => caps[0].to_string(),
        })
    }
}
