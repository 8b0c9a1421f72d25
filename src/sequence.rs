use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::RuleError;
use crate::rule::Rule;

/// Ordered list of rules applied one per generation in rotation.
///
/// Never empty: every constructor and edit keeps at least one rule around, so
/// [`RuleSequence::at`] always has something to return.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Rule>", into = "Vec<Rule>"))]
pub struct RuleSequence {
    rules: Vec<Rule>,
}

impl RuleSequence {
    pub fn new(rules: Vec<Rule>) -> Result<Self, RuleError> {
        if rules.is_empty() {
            return Err(RuleError::EmptySequence);
        }
        Ok(Self { rules })
    }

    /// A sequence that always yields `rule`.
    pub fn single(rule: Rule) -> Self {
        Self { rules: vec![rule] }
    }

    /// Rule to apply when stepping from `generation` to `generation + 1`.
    pub fn at(&self, generation: u64) -> &Rule {
        let index = (generation % self.rules.len() as u64) as usize;
        &self.rules[index]
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Always `false`; provided for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Appends a rule to the end of the rotation.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Removes and returns the rule at `index`. The last remaining rule cannot
    /// be removed.
    pub fn remove(&mut self, index: usize) -> Result<Rule, RuleError> {
        if index >= self.rules.len() {
            return Err(RuleError::IndexOutOfRange {
                index,
                len: self.rules.len(),
            });
        }
        if self.rules.len() == 1 {
            return Err(RuleError::EmptySequence);
        }
        Ok(self.rules.remove(index))
    }

    /// Mutable access to one rule, for author-time edits of its tables.
    pub fn rule_mut(&mut self, index: usize) -> Result<&mut Rule, RuleError> {
        let len = self.rules.len();
        self.rules
            .get_mut(index)
            .ok_or(RuleError::IndexOutOfRange { index, len })
    }
}

impl Default for RuleSequence {
    fn default() -> Self {
        Self::single(Rule::default())
    }
}

impl TryFrom<Vec<Rule>> for RuleSequence {
    type Error = RuleError;

    fn try_from(rules: Vec<Rule>) -> Result<Self, Self::Error> {
        Self::new(rules)
    }
}

impl From<RuleSequence> for Vec<Rule> {
    fn from(sequence: RuleSequence) -> Self {
        sequence.rules
    }
}

impl<'a> IntoIterator for &'a RuleSequence {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Formats as rule labels joined by `;`, e.g. `B3/S23;B36/S23`.
impl fmt::Display for RuleSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{rule}")?;
        }
        Ok(())
    }
}

impl FromStr for RuleSequence {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rules = s
            .split(';')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<Rule>, _>>()?;
        Self::new(rules)
    }
}
