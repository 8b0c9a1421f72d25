use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::RuleError;

/// Number of entries in each transition table (neighbor counts 0 through 8).
pub const TABLE_LEN: usize = 9;

/// Largest neighbor count a Moore neighborhood can produce.
pub const MAX_NEIGHBORS: u8 = 8;

/// Transition rules for a Life-like automaton. Standard Conway is B3/S23.
///
/// Each table is indexed by the number of living neighbors. A disabled table
/// is never consulted and cells in that state keep it, so equality and
/// hashing ignore its contents.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rule {
    /// Entry `i` set means a live cell with `i` neighbors stays alive.
    pub alive: [bool; TABLE_LEN],
    /// Entry `i` set means a dead cell with `i` neighbors becomes alive.
    pub dead: [bool; TABLE_LEN],
    /// Consult `alive` for live cells; otherwise they never die.
    pub use_alive_rule: bool,
    /// Consult `dead` for dead cells; otherwise they are never born.
    pub use_dead_rule: bool,
}

impl Rule {
    /// Builds a rule from both tables with both of them enabled.
    pub fn new(alive: [bool; TABLE_LEN], dead: [bool; TABLE_LEN]) -> Self {
        Self {
            alive,
            dead,
            use_alive_rule: true,
            use_dead_rule: true,
        }
    }

    /// Builds a rule from tables of unchecked length, e.g. ones coming from an
    /// external asset. Both tables must hold exactly nine entries.
    pub fn from_tables(alive: &[bool], dead: &[bool]) -> Result<Self, RuleError> {
        let alive: [bool; TABLE_LEN] = alive.try_into().map_err(|_| RuleError::TableLength {
            table: "alive",
            len: alive.len(),
        })?;
        let dead: [bool; TABLE_LEN] = dead.try_into().map_err(|_| RuleError::TableLength {
            table: "dead",
            len: dead.len(),
        })?;
        Ok(Self::new(alive, dead))
    }

    /// Standard Conway's Game of Life: B3/S23
    pub fn conway() -> Self {
        Self::new(table(&[2, 3]), table(&[3]))
    }

    /// HighLife: B36/S23 - known for its replicator pattern
    pub fn highlife() -> Self {
        Self::new(table(&[2, 3]), table(&[3, 6]))
    }

    /// Day & Night: B3678/S34678 - symmetric under on/off inversion
    pub fn day_and_night() -> Self {
        Self::new(table(&[3, 4, 6, 7, 8]), table(&[3, 6, 7, 8]))
    }

    /// Seeds: B2/S (no survival) - every cell dies, only birth
    pub fn seeds() -> Self {
        Self::new([false; TABLE_LEN], table(&[2]))
    }

    /// Life without Death: B3/S012345678 - cells never die
    pub fn life_without_death() -> Self {
        Self::new([true; TABLE_LEN], table(&[3]))
    }

    /// Returns a copy with the alive table switched on or off.
    pub fn with_alive_rule(mut self, enabled: bool) -> Self {
        self.use_alive_rule = enabled;
        self
    }

    /// Returns a copy with the dead table switched on or off.
    pub fn with_dead_rule(mut self, enabled: bool) -> Self {
        self.use_dead_rule = enabled;
        self
    }

    /// Sets whether a live cell with `count` neighbors stays alive.
    pub fn set_alive(&mut self, count: u8, stays_alive: bool) {
        check_count(count);
        self.alive[count as usize] = stays_alive;
    }

    /// Sets whether a dead cell with `count` neighbors becomes alive.
    pub fn set_dead(&mut self, count: u8, becomes_alive: bool) {
        check_count(count);
        self.dead[count as usize] = becomes_alive;
    }

    /// Next state of a cell given its current state and living neighbor count.
    ///
    /// # Panics
    ///
    /// If `count` is greater than 8.
    #[inline]
    pub fn next_state(&self, alive: bool, count: u8) -> bool {
        check_count(count);
        let count = count as usize;
        if alive {
            !self.use_alive_rule || self.alive[count]
        } else {
            self.use_dead_rule && self.dead[count]
        }
    }

    /// Formats the rule as a B/S label, e.g. `B3/S23`.
    ///
    /// A disabled table is written as `-`, so `B3/S-` describes a rule whose
    /// live cells never die.
    pub fn label(&self) -> String {
        format!(
            "B{}/S{}",
            format_table(&self.dead, self.use_dead_rule),
            format_table(&self.alive, self.use_alive_rule)
        )
    }
}

impl Rule {
    fn effective_alive(&self) -> Option<&[bool; TABLE_LEN]> {
        self.use_alive_rule.then_some(&self.alive)
    }

    fn effective_dead(&self) -> Option<&[bool; TABLE_LEN]> {
        self.use_dead_rule.then_some(&self.dead)
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.effective_alive() == other.effective_alive()
            && self.effective_dead() == other.effective_dead()
    }
}

impl Eq for Rule {}

impl Hash for Rule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.effective_alive().hash(state);
        self.effective_dead().hash(state);
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self::conway()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Parses a B/S label back into a `Rule`.
///
/// Accepted formats: `B36/S23`, `B2/S` (empty table), `B3/S-` (disabled table).
impl FromStr for Rule {
    type Err = RuleError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let trimmed = label.trim();
        let (birth, survival) = trimmed
            .split_once('/')
            .ok_or_else(|| RuleError::label(label, "expected B<counts>/S<counts>"))?;
        let birth = birth
            .strip_prefix('B')
            .ok_or_else(|| RuleError::label(label, "birth part must start with 'B'"))?;
        let survival = survival
            .strip_prefix('S')
            .ok_or_else(|| RuleError::label(label, "survival part must start with 'S'"))?;

        let dead = parse_table(birth).map_err(|reason| RuleError::label(label, reason))?;
        let alive = parse_table(survival).map_err(|reason| RuleError::label(label, reason))?;

        Ok(Rule {
            alive: alive.unwrap_or([false; TABLE_LEN]),
            dead: dead.unwrap_or([false; TABLE_LEN]),
            use_alive_rule: alive.is_some(),
            use_dead_rule: dead.is_some(),
        })
    }
}

#[inline]
fn check_count(count: u8) {
    assert!(
        count <= MAX_NEIGHBORS,
        "neighbor count {count} outside 0..={MAX_NEIGHBORS}"
    );
}

/// Build a table with entries set for each listed neighbor count.
fn table(counts: &[u8]) -> [bool; TABLE_LEN] {
    let mut out = [false; TABLE_LEN];
    for &count in counts {
        out[count as usize] = true;
    }
    out
}

fn format_table(table: &[bool; TABLE_LEN], enabled: bool) -> String {
    if !enabled {
        return "-".to_string();
    }
    table
        .iter()
        .enumerate()
        .filter(|&(_, &on)| on)
        .map(|(count, _)| count.to_string())
        .collect()
}

/// `None` means the table is disabled (`-`).
fn parse_table(s: &str) -> Result<Option<[bool; TABLE_LEN]>, &'static str> {
    if s == "-" {
        return Ok(None);
    }
    let mut out = [false; TABLE_LEN];
    for ch in s.chars() {
        let count = ch.to_digit(10).ok_or("neighbor counts must be digits")?;
        if count > MAX_NEIGHBORS as u32 {
            return Err("neighbor counts must be between 0 and 8");
        }
        out[count as usize] = true;
    }
    Ok(Some(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conway_tables() {
        let rule = Rule::conway();
        for count in 0..=8u8 {
            assert_eq!(rule.next_state(true, count), count == 2 || count == 3);
            assert_eq!(rule.next_state(false, count), count == 3);
        }
        assert_eq!(Rule::default(), rule);
    }

    #[test]
    fn disabled_alive_table_keeps_cells_alive() {
        let rule = Rule::seeds().with_alive_rule(false);
        for count in 0..=8u8 {
            assert!(rule.next_state(true, count));
        }
        // Dead table is untouched.
        assert!(rule.next_state(false, 2));
        assert!(!rule.next_state(false, 3));
    }

    #[test]
    fn disabled_dead_table_keeps_cells_dead() {
        let rule = Rule::new([true; TABLE_LEN], [true; TABLE_LEN]).with_dead_rule(false);
        for count in 0..=8u8 {
            assert!(!rule.next_state(false, count));
        }
    }

    #[test]
    fn set_entries() {
        let mut rule = Rule::new([false; TABLE_LEN], [false; TABLE_LEN]);
        rule.set_alive(8, true);
        rule.set_dead(0, true);
        assert!(rule.next_state(true, 8));
        assert!(!rule.next_state(true, 7));
        assert!(rule.next_state(false, 0));
        assert_eq!(rule.label(), "B0/S8");
    }

    #[test]
    #[should_panic(expected = "neighbor count 9")]
    fn count_out_of_range_panics() {
        Rule::conway().next_state(true, 9);
    }

    #[test]
    #[should_panic]
    fn set_out_of_range_panics() {
        let mut rule = Rule::conway();
        rule.set_dead(9, true);
    }

    #[test]
    fn from_tables_checks_length() {
        let err = Rule::from_tables(&[false; 8], &[false; 9]).unwrap_err();
        assert_eq!(err, RuleError::TableLength { table: "alive", len: 8 });

        let err = Rule::from_tables(&[false; 9], &[false; 10]).unwrap_err();
        assert_eq!(err, RuleError::TableLength { table: "dead", len: 10 });

        let mut alive = vec![false; 9];
        alive[2] = true;
        alive[3] = true;
        let mut dead = vec![false; 9];
        dead[3] = true;
        assert_eq!(Rule::from_tables(&alive, &dead).unwrap(), Rule::conway());
    }

    #[test]
    fn preset_labels() {
        assert_eq!(Rule::conway().label(), "B3/S23");
        assert_eq!(Rule::highlife().label(), "B36/S23");
        assert_eq!(Rule::day_and_night().label(), "B3678/S34678");
        assert_eq!(Rule::seeds().label(), "B2/S");
        assert_eq!(Rule::life_without_death().label(), "B3/S012345678");
        assert_eq!(Rule::conway().with_alive_rule(false).to_string(), "B3/S-");
    }

    #[test]
    fn parse_labels() {
        assert_eq!("B3/S23".parse::<Rule>().unwrap(), Rule::conway());
        assert_eq!(" B36/S23 ".parse::<Rule>().unwrap(), Rule::highlife());
        assert_eq!("B2/S".parse::<Rule>().unwrap(), Rule::seeds());

        let rule: Rule = "B-/S23".parse().unwrap();
        assert!(!rule.use_dead_rule);
        assert!(rule.use_alive_rule);
        assert_eq!(rule.label(), "B-/S23");
    }

    #[test]
    fn disabled_tables_roundtrip_through_label() {
        let rules = [
            Rule::conway().with_dead_rule(false),
            Rule::highlife().with_alive_rule(false),
            Rule::day_and_night().with_alive_rule(false).with_dead_rule(false),
        ];
        for rule in rules {
            let parsed: Rule = rule.to_string().parse().unwrap();
            assert_eq!(parsed, rule, "label {rule}");
        }
    }

    #[test]
    fn disabled_table_contents_ignored_by_eq_and_hash() {
        use std::collections::hash_map::DefaultHasher;

        let hash = |rule: &Rule| {
            let mut h = DefaultHasher::new();
            rule.hash(&mut h);
            h.finish()
        };
        let a = Rule::conway().with_alive_rule(false);
        let mut b = Rule::seeds().with_alive_rule(false);
        b.dead = Rule::conway().dead;
        assert_eq!(a, b);
        assert_eq!(hash(&a), hash(&b));

        // Re-enabling exposes the differing tables again.
        assert_ne!(a.with_alive_rule(true), b.with_alive_rule(true));
    }

    #[test]
    fn parse_invalid_labels() {
        for label in ["", "nonsense", "X3/Y2", "B9/S23", "B3/Sx", "S23/B3"] {
            assert!(
                matches!(label.parse::<Rule>(), Err(RuleError::InvalidLabel { .. })),
                "{label:?} should not parse"
            );
        }
    }
}
