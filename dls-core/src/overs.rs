//! Conversion between the cricket "overs.balls" decimal notation and ball counts
//!
//! Overs are written with the ball count within the over as the first decimal
//! digit, e.g. `10.3` is 10 overs and 3 balls (63 balls in total). Only the
//! digits 0-5 are meaningful; 6-9 are out of domain and are not re-validated
//! here (a known input-trust boundary - callers supply well-formed overs).

/// Balls bowled in one over
pub const BALLS_PER_OVER: u32 = 6;

/// Convert overs in decimal notation to a total ball count
///
/// The fractional part, multiplied by 10 and rounded to the nearest integer,
/// is the ball count within the over.
pub fn overs_to_balls(overs: f64) -> u32 {
    let whole_overs = overs.trunc();
    let balls_in_over = ((overs - whole_overs) * 10.0).round() as u32;
    whole_overs as u32 * BALLS_PER_OVER + balls_in_over
}

/// Convert a total ball count back to overs in decimal notation
pub fn balls_to_overs(balls: u32) -> f64 {
    (balls / BALLS_PER_OVER) as f64 + (balls % BALLS_PER_OVER) as f64 * 0.1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_overs() {
        assert_eq!(overs_to_balls(0.0), 0);
        assert_eq!(overs_to_balls(1.0), 6);
        assert_eq!(overs_to_balls(20.0), 120);
        assert_eq!(overs_to_balls(50.0), 300);
    }

    #[test]
    fn test_partial_overs() {
        assert_eq!(overs_to_balls(10.3), 63);
        assert_eq!(overs_to_balls(0.5), 5);
        assert_eq!(overs_to_balls(19.1), 115);
    }

    #[test]
    fn test_balls_to_overs() {
        assert_eq!(balls_to_overs(0), 0.0);
        assert_eq!(balls_to_overs(6), 1.0);
        assert_eq!(balls_to_overs(120), 20.0);
        assert!((balls_to_overs(63) - 10.3).abs() < 1e-9);
    }

    #[test]
    fn test_round_trip_for_valid_ball_digits() {
        // Round-trip law holds for ball digits 0-5 (6-9 are out of domain)
        for whole in 0..=50u32 {
            for digit in 0..=5u32 {
                let overs = whole as f64 + digit as f64 * 0.1;
                let balls = overs_to_balls(overs);
                assert_eq!(balls, whole * BALLS_PER_OVER + digit);
                assert!((balls_to_overs(balls) - overs).abs() < 1e-9);
            }
        }
    }
}
