use std::fmt;

use crate::error::{Error, Result};

/// Smallest accepted bcrypt cost factor.
pub const MIN_COST: u32 = 4;
/// Largest accepted bcrypt cost factor.
pub const MAX_COST: u32 = 31;
/// Cost substituted for out-of-range requests.
pub const DEFAULT_COST: u32 = 12;

/// A bcrypt work factor; the primitive runs `2^cost` key expansion rounds.
///
/// A `Cost` is always inside `MIN_COST..=MAX_COST`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cost(u32);

impl Default for Cost {
    fn default() -> Self {
        Self(DEFAULT_COST)
    }
}

impl Cost {
    /// Builds a cost factor, replacing any out-of-range value with
    /// [`DEFAULT_COST`]. Boundary values are kept.
    ///
    /// This permissive policy matches what C bcrypt wrappers have always done.
    /// Use [`Cost::strict`] to reject such values instead.
    pub fn new(value: i64) -> Self {
        match Self::strict(value) {
            Ok(cost) => cost,
            Err(_) => {
                log::warn!("cost factor {value} out of range, using {DEFAULT_COST}");
                Self::default()
            }
        }
    }

    /// Builds a cost factor, failing with [`Error::CostOutOfRange`] when the
    /// value is outside the valid range.
    pub fn strict(value: i64) -> Result<Self> {
        if (i64::from(MIN_COST)..=i64::from(MAX_COST)).contains(&value) {
            Ok(Self(value as u32))
        } else {
            Err(Error::CostOutOfRange(value))
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_uses_default() {
        assert_eq!(Cost::new(0).get(), DEFAULT_COST);
        assert_eq!(Cost::new(3).get(), DEFAULT_COST);
        assert_eq!(Cost::new(32).get(), DEFAULT_COST);
        assert_eq!(Cost::new(100).get(), DEFAULT_COST);
        assert_eq!(Cost::new(-7).get(), DEFAULT_COST);
    }

    #[test]
    fn boundaries_are_kept() {
        assert_eq!(Cost::new(4).get(), 4);
        assert_eq!(Cost::new(31).get(), 31);
    }

    #[test]
    fn strict_rejects_out_of_range() {
        assert!(matches!(Cost::strict(3), Err(Error::CostOutOfRange(3))));
        assert!(matches!(Cost::strict(32), Err(Error::CostOutOfRange(32))));
        assert_eq!(Cost::strict(10).unwrap().get(), 10);
    }

    #[test]
    fn displays_two_digits() {
        assert_eq!(Cost::new(5).to_string(), "05");
        assert_eq!(Cost::new(12).to_string(), "12");
    }
}
