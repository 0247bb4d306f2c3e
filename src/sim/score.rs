//! Score counter and its text form

use serde::{Deserialize, Serialize};

use crate::consts::{SCORE_DIGITS, SCORE_DISPLAY_MAX};

/// Running score. The stored value is never clamped; only the text is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    value: i64,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, points: i64) {
        self.value = self.value.saturating_add(points);
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// Text for the 3D score label: clamped to 0..=9999, zero-padded to 4 digits
    pub fn render(&self) -> String {
        let shown = self.value.clamp(0, SCORE_DISPLAY_MAX);
        format!("{:0width$}", shown, width = SCORE_DIGITS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_pads() {
        let mut score = Score::new();
        assert_eq!(score.render(), "0000");
        score.add(10);
        assert_eq!(score.render(), "0010");
        score.add(1224);
        assert_eq!(score.render(), "1234");
    }

    #[test]
    fn test_render_clamps_but_value_does_not() {
        let mut score = Score::new();
        score.add(-5);
        assert_eq!(score.value(), -5);
        assert_eq!(score.render(), "0000");

        let mut score = Score::new();
        score.add(15000);
        assert_eq!(score.value(), 15000);
        assert_eq!(score.render(), "9999");
    }

    #[test]
    fn test_repeated_hits_accumulate() {
        let mut score = Score::new();
        for _ in 0..37 {
            score.add(10);
        }
        assert_eq!(score.value(), 370);
    }
}
