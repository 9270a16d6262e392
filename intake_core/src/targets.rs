//! Macro gram targets.
//!
//! Targets are direct user input bounded by a display cap, not a
//! nutritionally-derived split from the calorie budget. The flat 21 g
//! default is the initial suggestion shown before the user adjusts.

use crate::MacroTargets;

/// Clamp a requested macro gram value into `[0, cap]`.
pub fn clamp_macro_grams(value: i64, cap: u32) -> u32 {
    value.clamp(0, cap as i64) as u32
}

/// Initial macro suggestion before user adjustment.
pub fn default_macro_split() -> MacroTargets {
    MacroTargets {
        protein: 21,
        carbs: 21,
        fat: 21,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_within_range() {
        assert_eq!(clamp_macro_grams(30, 47), 30);
    }

    #[test]
    fn test_clamp_above_cap() {
        assert_eq!(clamp_macro_grams(90, 47), 47);
    }

    #[test]
    fn test_clamp_negative() {
        assert_eq!(clamp_macro_grams(-10, 47), 0);
    }

    #[test]
    fn test_default_split() {
        let split = default_macro_split();
        assert_eq!(split.protein, 21);
        assert_eq!(split.carbs, 21);
        assert_eq!(split.fat, 21);
    }
}
