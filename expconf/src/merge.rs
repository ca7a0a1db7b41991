//! Deep merging of configuration documents.
//!
//! Documents are folded left to right: every later document is merged as an
//! update into the accumulated base.
//!
//! # Merging Rules
//!
//! For every key of the update:
//! - A key ending in [`ENFORCE_MARKER`] always replaces the base value
//! - Values of different kinds (including a missing base value) replace
//! - Two mappings merge recursively
//! - Two sequences concatenate, base items first
//! - Any other pair of scalars replaces
//!
//! Replacing under a key also drops the marked spelling of that key from the
//! base, so the marker never appears twice for the same key.

use crate::error::{Error, Result};
use crate::value::{Mapping, Value, ValueKind};

/// Key suffix requesting wholesale replacement instead of a merge.
pub const ENFORCE_MARKER: char = '!';

/// Default nesting depth after which merging stops descending.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Split a key into its bare form and whether it carried the marker.
///
/// Any number of trailing markers is stripped.
///
/// # Examples
///
/// ```
/// use expconf::merge::parse_key;
///
/// assert_eq!(parse_key("layers!"), ("layers", true));
/// assert_eq!(parse_key("layers"), ("layers", false));
/// ```
#[must_use]
pub fn parse_key(key: &str) -> (&str, bool) {
    let bare = key.trim_end_matches(ENFORCE_MARKER);
    (bare, bare.len() != key.len())
}

/// The marked spelling of a bare key.
#[must_use]
pub fn marked_key(bare: &str) -> String {
    format!("{bare}{ENFORCE_MARKER}")
}

/// What to do with one key of an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeAction {
    /// The update value replaces the base value.
    Replace,
    /// Both values are mappings; merge them recursively.
    Recurse,
    /// Both values are sequences; append the update's items.
    Concat,
}

/// Choose the merge action for one key.
///
/// `base` is `None` when the base has no value under the key.
///
/// # Examples
///
/// ```
/// use expconf::merge::{merge_action, MergeAction};
/// use expconf::ValueKind;
///
/// assert_eq!(
///     merge_action(false, Some(ValueKind::Sequence), ValueKind::Sequence),
///     MergeAction::Concat
/// );
/// assert_eq!(
///     merge_action(true, Some(ValueKind::Sequence), ValueKind::Sequence),
///     MergeAction::Replace
/// );
/// assert_eq!(
///     merge_action(false, Some(ValueKind::Mapping), ValueKind::Sequence),
///     MergeAction::Replace
/// );
/// ```
#[must_use]
pub fn merge_action(enforced: bool, base: Option<ValueKind>, update: ValueKind) -> MergeAction {
    match (enforced, base, update) {
        (false, Some(ValueKind::Mapping), ValueKind::Mapping) => MergeAction::Recurse,
        (false, Some(ValueKind::Sequence), ValueKind::Sequence) => MergeAction::Concat,
        _ => MergeAction::Replace,
    }
}

/// Merges configuration documents.
///
/// # Examples
///
/// ```
/// use expconf::{ConfigMerger, Value};
/// use serde_json::json;
///
/// let Value::Mapping(mut base) = Value::from(json!({"lr": 0.1, "tags": ["a"]})) else {
///     unreachable!()
/// };
/// let Value::Mapping(update) = Value::from(json!({"lr": 0.2, "tags": ["b"]})) else {
///     unreachable!()
/// };
///
/// ConfigMerger::new().merge_into(&mut base, update).unwrap();
/// assert_eq!(base["lr"], Value::Float(0.2));
/// assert_eq!(base["tags"], Value::from(json!(["a", "b"])));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigMerger {
    max_depth: usize,
    strict: bool,
}

impl Default for ConfigMerger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigMerger {
    /// Create a lenient merger with [`DEFAULT_MAX_DEPTH`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            strict: false,
        }
    }

    /// Set the nesting depth after which subtrees are left unmerged.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Fail with `RecursionLimitExceeded` instead of logging a warning.
    #[must_use]
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// The configured maximum depth.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Merge `update` into `base` in place.
    ///
    /// `update` is consumed; `base` is the only document mutated.
    ///
    /// # Errors
    ///
    /// In strict mode, returns `RecursionLimitExceeded` when the depth guard
    /// trips. `base` is then left partially merged. A lenient merger never
    /// fails.
    pub fn merge_into(&self, base: &mut Mapping, update: Mapping) -> Result<()> {
        self.merge_at(base, update, 0, "")
    }

    /// Merge `update` into `base`, returning the result.
    ///
    /// # Errors
    ///
    /// See [`merge_into`](Self::merge_into).
    pub fn merge(&self, mut base: Mapping, update: Mapping) -> Result<Mapping> {
        self.merge_into(&mut base, update)?;
        Ok(base)
    }

    /// Fold `documents` left to right, the first one being the base.
    ///
    /// # Errors
    ///
    /// See [`merge_into`](Self::merge_into).
    pub fn merge_all<I>(&self, documents: I) -> Result<Mapping>
    where
        I: IntoIterator<Item = Mapping>,
    {
        let mut documents = documents.into_iter();
        let Some(mut base) = documents.next() else {
            return Ok(Mapping::new());
        };
        for update in documents {
            self.merge_into(&mut base, update)?;
        }
        Ok(base)
    }

    fn merge_at(&self, base: &mut Mapping, update: Mapping, depth: usize, path: &str) -> Result<()> {
        if depth > self.max_depth {
            let err = Error::RecursionLimitExceeded {
                depth: self.max_depth,
                key: path.to_string(),
            };
            if self.strict {
                return Err(err);
            }
            log::warn!("{err}; keeping the base value");
            return Ok(());
        }

        for (raw_key, update_value) in update {
            let (key, enforced) = parse_key(&raw_key);
            let base_kind = lookup(base, key).map(Value::kind);

            let merged = match merge_action(enforced, base_kind, update_value.kind()) {
                MergeAction::Replace => {
                    if enforced {
                        log::trace!("forced replacement of '{}'", join_path(path, key));
                    }
                    update_value
                }
                MergeAction::Recurse | MergeAction::Concat => {
                    match (take_existing(base, key), update_value) {
                        (Value::Mapping(mut inner), Value::Mapping(update_inner)) => {
                            let child_path = join_path(path, key);
                            self.merge_at(&mut inner, update_inner, depth + 1, &child_path)?;
                            Value::Mapping(inner)
                        }
                        (Value::Sequence(mut items), Value::Sequence(extra)) => {
                            items.extend(extra);
                            Value::Sequence(items)
                        }
                        (_, update_value) => update_value,
                    }
                }
            };

            set_key(base, key, merged);
        }

        Ok(())
    }
}

/// The base value under `key`, preferring the bare spelling.
fn lookup<'a>(base: &'a Mapping, key: &str) -> Option<&'a Value> {
    base.get(key).or_else(|| base.get(&marked_key(key)))
}

/// Move the base value under `key` out of the mapping.
///
/// A bare entry keeps its slot (holding null until [`set_key`] refills it);
/// a marked entry is removed.
fn take_existing(base: &mut Mapping, key: &str) -> Value {
    if let Some(slot) = base.get_mut(key) {
        return std::mem::take(slot);
    }
    base.shift_remove(&marked_key(key)).unwrap_or_default()
}

fn set_key(base: &mut Mapping, key: &str, value: Value) {
    base.shift_remove(&marked_key(key));
    base.insert(key.to_string(), value);
}

fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}
