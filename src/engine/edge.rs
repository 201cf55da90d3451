//! Edge-of-grid policy for coordinates outside the stored cells

use std::fmt;
use std::str::FromStr;

use crate::engine::grid::{ALIVE, Cell, DEAD};
use crate::io::error::{LifeError, invalid_parameter};

/// How the grid answers reads and writes outside its bounds
///
/// # Examples
///
/// ```
/// use lifegrid::engine::{EdgeBehavior, Grid};
///
/// let mut grid = Grid::new(3, 3).unwrap();
/// grid.set(2, 2, 1);
///
/// // Wrap: the grid is a torus.
/// assert_eq!(grid.get(-1, -1), grid.get(2, 2));
///
/// // AlwaysOn: everything outside is alive, whatever is stored.
/// grid.edge_behavior = EdgeBehavior::AlwaysOn;
/// assert!(grid.is_alive(-1, 5));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgeBehavior {
    /// Out-of-grid cells read as dead; writes there are dropped
    AlwaysOff,
    /// Out-of-grid cells read as alive; writes there are dropped
    AlwaysOn,
    /// Out-of-grid coordinates wrap to the opposite side (torus)
    #[default]
    Wrap,
}

impl EdgeBehavior {
    /// Every policy, in cycling order
    pub const ALL: [Self; 3] = [Self::AlwaysOff, Self::AlwaysOn, Self::Wrap];

    /// Value of a cell outside the grid, or `None` when the coordinate wraps
    ///
    /// This is the only place where the policy tag turns into a cell value.
    pub const fn synthetic_cell(self) -> Option<Cell> {
        match self {
            Self::AlwaysOff => Some(DEAD),
            Self::AlwaysOn => Some(ALIVE),
            Self::Wrap => None,
        }
    }

    /// Policy that follows this one: off, on, wrap, off
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::AlwaysOff => Self::AlwaysOn,
            Self::AlwaysOn => Self::Wrap,
            Self::Wrap => Self::AlwaysOff,
        }
    }

    /// Human-readable label
    pub const fn label(self) -> &'static str {
        match self {
            Self::AlwaysOff => "Always off",
            Self::AlwaysOn => "Always on",
            Self::Wrap => "Wrap",
        }
    }
}

impl fmt::Display for EdgeBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AlwaysOff => "always-off",
            Self::AlwaysOn => "always-on",
            Self::Wrap => "wrap",
        };
        f.write_str(name)
    }
}

impl FromStr for EdgeBehavior {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "always-off" | "off" => Ok(Self::AlwaysOff),
            "always-on" | "on" => Ok(Self::AlwaysOn),
            "wrap" => Ok(Self::Wrap),
            _ => Err(invalid_parameter(
                "edge",
                &s,
                &"expected always-off, always-on or wrap",
            )),
        }
    }
}

/// Modulus whose result lies in `[0, b)` for either sign of `a`
///
/// `b` must be positive.
pub const fn positive_mod(a: i32, b: i32) -> i32 {
    a.rem_euclid(b)
}
