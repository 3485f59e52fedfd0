//! Difficulty curve: scroll speed as a step function of score

use crate::consts::{BASE_SPEED, SPEED_INCREMENT, SPEED_STEP_SCORE};

/// Scroll speed (pixels per tick) for a given score
#[inline]
pub fn speed(score: u32) -> f32 {
    BASE_SPEED + (score / SPEED_STEP_SCORE) as f32 * SPEED_INCREMENT
}

/// HUD formatting, one decimal place
pub fn format_speed(speed: f32) -> String {
    format!("{:.1}", speed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_steps() {
        assert_eq!(speed(0), 20.0);
        assert_eq!(speed(4), 20.0);
        assert_eq!(speed(5), 20.5);
        assert_eq!(speed(9), 20.5);
        assert_eq!(speed(10), 21.0);
        assert_eq!(speed(100), 30.0);
    }

    #[test]
    fn test_format_speed() {
        assert_eq!(format_speed(speed(0)), "20.0");
        assert_eq!(format_speed(speed(5)), "20.5");
    }
}
