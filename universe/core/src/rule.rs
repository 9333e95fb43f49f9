//! Birth/survival rules
//!
//! Rules use the common `B<digits>/S<digits>` notation, e.g. `B3/S23` for
//! Conway's Game of Life or `B36/S23` for HighLife.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors produced while parsing a rule string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The string is not of the form `B.../S...`
    #[error("Rule must look like B3/S23, got {0:?}")]
    Malformed(String),

    /// A neighbour count outside 0..=8
    #[error("Neighbour count {0} is out of range 0-8")]
    OutOfRange(char),
}

/// Outer-totalistic rule over the Moore neighbourhood
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rule {
    born: [bool; 9],
    survive: [bool; 9],
}

impl Rule {
    /// Conway's Game of Life, `B3/S23`
    pub const fn conway() -> Self {
        let mut born = [false; 9];
        let mut survive = [false; 9];
        born[3] = true;
        survive[2] = true;
        survive[3] = true;
        Self { born, survive }
    }

    /// Next state of a cell given its current state and live neighbours
    pub fn next(&self, alive: bool, neighbours: usize) -> bool {
        let table = if alive { &self.survive } else { &self.born };
        table.get(neighbours).copied().unwrap_or(false)
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self::conway()
    }
}

fn parse_counts(part: &str, prefix: char, input: &str) -> Result<[bool; 9], RuleError> {
    let digits = part
        .strip_prefix(prefix)
        .or_else(|| part.strip_prefix(prefix.to_ascii_lowercase()))
        .ok_or_else(|| RuleError::Malformed(input.to_string()))?;

    let mut counts = [false; 9];
    for c in digits.chars() {
        let n = c
            .to_digit(10)
            .ok_or_else(|| RuleError::Malformed(input.to_string()))?;
        let slot = counts.get_mut(n as usize).ok_or(RuleError::OutOfRange(c))?;
        *slot = true;
    }
    Ok(counts)
}

impl FromStr for Rule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (born, survive) = trimmed
            .split_once('/')
            .ok_or_else(|| RuleError::Malformed(s.to_string()))?;
        Ok(Self {
            born: parse_counts(born, 'B', s)?,
            survive: parse_counts(survive, 'S', s)?,
        })
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("B")?;
        for (n, _) in self.born.iter().enumerate().filter(|(_, on)| **on) {
            write!(f, "{n}")?;
        }
        f.write_str("/S")?;
        for (n, _) in self.survive.iter().enumerate().filter(|(_, on)| **on) {
            write!(f, "{n}")?;
        }
        Ok(())
    }
}
