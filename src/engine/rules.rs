//! Birth/survive transition tables and B/S rule notation

use std::fmt;
use std::str::FromStr;

use crate::io::error::{LifeError, invalid_parameter};

/// Per neighbor count (0..=8), whether the transition fires
pub type RuleTable = [bool; 9];

/// A birth table and a survive table
///
/// Standard Conway is `B3/S23`: a dead cell with three neighbors is born,
/// a live cell with two or three neighbors survives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rule {
    /// Whether a dead cell with `i` neighbors becomes alive
    pub birth: RuleTable,
    /// Whether a live cell with `i` neighbors stays alive
    pub survive: RuleTable,
}

impl Default for Rule {
    fn default() -> Self {
        Self::conway()
    }
}

impl Rule {
    /// Build a rule from the neighbor counts that trigger each transition
    ///
    /// Counts above 8 are ignored.
    pub fn from_counts(birth: &[usize], survive: &[usize]) -> Self {
        let mut rule = Self {
            birth: [false; 9],
            survive: [false; 9],
        };
        for &count in birth {
            if let Some(slot) = rule.birth.get_mut(count) {
                *slot = true;
            }
        }
        for &count in survive {
            if let Some(slot) = rule.survive.get_mut(count) {
                *slot = true;
            }
        }
        rule
    }

    /// Conway's Game of Life: B3/S23
    pub fn conway() -> Self {
        Self::from_counts(&[3], &[2, 3])
    }

    /// HighLife: B36/S23, known for its replicator
    pub fn high_life() -> Self {
        Self::from_counts(&[3, 6], &[2, 3])
    }

    /// Seeds: B2/S, every live cell dies each generation
    pub fn seeds() -> Self {
        Self::from_counts(&[2], &[])
    }

    /// Day & Night: B3678/S34678, symmetric under on/off inversion
    pub fn day_and_night() -> Self {
        Self::from_counts(&[3, 6, 7, 8], &[3, 4, 6, 7, 8])
    }

    /// Whether a dead cell is born into an empty neighborhood
    ///
    /// Such rules make the whole empty field flash every other generation.
    pub const fn is_strobing(&self) -> bool {
        self.birth[0]
    }
}

/// Invert a rule over the first `neighborhood_size + 1` counts
///
/// With `n` enabled offsets, the new birth entry at `n - i` is the negated
/// survive entry at `i`, and the new survive entry at `n - i` is the negated
/// birth entry at `i`. Entries above `n` keep their value. `n` is capped at 8.
pub fn reverse(
    birth: &RuleTable,
    survive: &RuleTable,
    neighborhood_size: usize,
) -> (RuleTable, RuleTable) {
    let n = neighborhood_size.min(8);
    let mut new_birth = *birth;
    let mut new_survive = *survive;

    for i in 0..=n {
        let (Some(&old_birth), Some(&old_survive)) = (birth.get(i), survive.get(i)) else {
            continue;
        };
        if let Some(slot) = new_birth.get_mut(n - i) {
            *slot = !old_survive;
        }
        if let Some(slot) = new_survive.get_mut(n - i) {
            *slot = !old_birth;
        }
    }

    (new_birth, new_survive)
}

fn write_counts(f: &mut fmt::Formatter<'_>, table: &RuleTable) -> fmt::Result {
    for (count, _) in table.iter().enumerate().filter(|&(_, &on)| on) {
        write!(f, "{count}")?;
    }
    Ok(())
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("B")?;
        write_counts(f, &self.birth)?;
        f.write_str("/S")?;
        write_counts(f, &self.survive)
    }
}

fn parse_counts(text: &str, prefix: char, original: &str) -> Result<RuleTable, LifeError> {
    let mut chars = text.chars();
    if chars
        .next()
        .map(|c| c.to_ascii_uppercase())
        .is_none_or(|c| c != prefix)
    {
        return Err(invalid_parameter(
            "rule",
            &original,
            &format!("expected '{prefix}' section"),
        ));
    }

    let mut table = [false; 9];
    for ch in chars {
        let count = ch
            .to_digit(10)
            .filter(|&d| d <= 8)
            .ok_or_else(|| {
                invalid_parameter(
                    "rule",
                    &original,
                    &format!("'{ch}' is not a neighbor count between 0 and 8"),
                )
            })?;
        if let Some(slot) = table.get_mut(count as usize) {
            *slot = true;
        }
    }
    Ok(table)
}

impl FromStr for Rule {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (birth_part, survive_part) = trimmed
            .split_once('/')
            .ok_or_else(|| invalid_parameter("rule", &s, &"expected B<counts>/S<counts>"))?;

        Ok(Self {
            birth: parse_counts(birth_part.trim(), 'B', s)?,
            survive: parse_counts(survive_part.trim(), 'S', s)?,
        })
    }
}
