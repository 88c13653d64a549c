//! Formality matching on the seven-level scale.
use whatrobe_core::Formality;

/// Distance between two levels, in scale steps.
pub fn gap(a: Formality, b: Formality) -> u8 {
    a.rank().abs_diff(b.rank())
}

/// Levels at most `tolerance` steps apart can be worn together.
pub fn within(a: Formality, b: Formality, tolerance: u8) -> bool {
    gap(a, b) <= tolerance
}
