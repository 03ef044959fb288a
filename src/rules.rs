//! ## Encoding Rules
//!
//! A [`RuleSet`] maps column names to [`ColumnRule`]s. A column rule maps category labels
//! to strictly positive integer codes. Code `0` is reserved for labels a rule does not know
//! (see [`UNSEEN_CODE`]).
//!
//! Rules are plain values: derive them once, keep them, and hand them back to
//! [`crate::transformers::categorical_rules::encode`] to encode new data the same way.
//!
//! ### Example
//!
//! ```rust
//! use rule_encoder::rules::{ColumnRule, RuleSet};
//!
//! let size = ColumnRule::from_pairs(vec![("small", 3), ("medium", 2), ("large", 1)]).unwrap();
//! let rules: RuleSet = vec![("size".to_string(), size)].into_iter().collect();
//! assert_eq!(rules.get("size").unwrap().lookup("large"), 1);
//! assert_eq!(rules.get("size").unwrap().lookup("huge"), 0);
//! ```

use crate::exceptions::{RuleEncoderError, RuleEncoderResult};
use indexmap::IndexMap;
use std::collections::HashSet;

/// Code produced for labels that a rule does not contain.
pub const UNSEEN_CODE: i64 = 0;

/// Code given to the first category of a derived rule.
pub const FIRST_CODE: i64 = 1;

/// Immutable label-to-code mapping for a single column.
///
/// Entries keep their insertion order; for derived rules that is also code order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnRule {
    codes: IndexMap<String, i64>,
}

impl ColumnRule {
    /// Build a rule from hand-authored `(label, code)` pairs.
    ///
    /// Codes must be strictly positive and unique; labels must be unique.
    pub fn from_pairs<I, S>(pairs: I) -> RuleEncoderResult<Self>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let mut codes: IndexMap<String, i64> = IndexMap::new();
        let mut seen_codes = HashSet::new();
        for (label, code) in pairs {
            let label = label.into();
            if code <= UNSEEN_CODE {
                return Err(RuleEncoderError::InvalidParameter(format!(
                    "Code for label '{}' must be positive, got {}",
                    label, code
                )));
            }
            if !seen_codes.insert(code) {
                return Err(RuleEncoderError::InvalidParameter(format!(
                    "Code {} is assigned to more than one label",
                    code
                )));
            }
            if codes.contains_key(&label) {
                return Err(RuleEncoderError::InvalidParameter(format!(
                    "Label '{}' appears more than once",
                    label
                )));
            }
            codes.insert(label, code);
        }
        Ok(Self { codes })
    }

    /// Build a rule that codes labels `1..=K` by their position.
    ///
    /// Repeated labels keep the code of their first position.
    pub fn from_ordered_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut codes: IndexMap<String, i64> = IndexMap::new();
        for label in labels {
            let next = FIRST_CODE + codes.len() as i64;
            codes.entry(label.into()).or_insert(next);
        }
        Self { codes }
    }

    /// Code for `label`, if the rule knows it.
    pub fn code_of(&self, label: &str) -> Option<i64> {
        self.codes.get(label).copied()
    }

    /// Code for `label`, falling back to [`UNSEEN_CODE`].
    pub fn lookup(&self, label: &str) -> i64 {
        self.code_of(label).unwrap_or(UNSEEN_CODE)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate `(label, code)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.codes.iter().map(|(label, code)| (label.as_str(), *code))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.codes.keys().map(String::as_str)
    }

    /// Largest code in the rule, or `None` for an empty rule.
    pub fn max_code(&self) -> Option<i64> {
        self.codes.values().copied().max()
    }
}

/// Column rules for a dataset, keyed by column name in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleSet {
    rules: IndexMap<String, ColumnRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule for `column`. An existing rule for the same column is replaced in place.
    pub fn insert(&mut self, column: impl Into<String>, rule: ColumnRule) {
        self.rules.insert(column.into(), rule);
    }

    pub fn get(&self, column: &str) -> Option<&ColumnRule> {
        self.rules.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.rules.contains_key(column)
    }

    /// Column names in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnRule)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<(String, ColumnRule)> for RuleSet {
    fn from_iter<T: IntoIterator<Item = (String, ColumnRule)>>(iter: T) -> Self {
        let mut rules = RuleSet::new();
        for (column, rule) in iter {
            rules.insert(column, rule);
        }
        rules
    }
}
