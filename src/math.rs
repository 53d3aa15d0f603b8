#[allow(unused_imports)]
use core_maths::CoreFloat;

/// Normalizes an angle in degrees to the range [0, 360).
///
/// This function takes any angle value (positive or negative) and converts it
/// to an equivalent angle in the range [0, 360). Values outside this range
/// are wrapped around using modulo arithmetic.
///
/// # Arguments
///
/// * `degrees` - The angle in degrees to normalize
///
/// # Returns
///
/// The normalized angle in degrees, in the range [0, 360)
pub(crate) fn normalize_degrees_360(degrees: f64) -> f64 {
    floored_mod(degrees, 360.0)
}

/// Normalizes a clock value in hours to the range [0, 24).
pub(crate) fn normalize_hours_24(hours: f64) -> f64 {
    floored_mod(hours, 24.0)
}

/// Normalizes an hour angle (in hours) to the range [-12, 12].
///
/// Hour angles returned by `acos` already sit in [0, 12], but values derived
/// from differences of clock times can wrap by a full day.
pub(crate) fn normalize_hour_angle(hours: f64) -> f64 {
    let mut limited = floored_mod(hours, 24.0);
    if limited > 12.0 {
        limited -= 24.0;
    }
    limited
}

/// Sine of an angle given in degrees.
pub(crate) fn dsin(degrees: f64) -> f64 {
    degrees.to_radians().sin()
}

/// Cosine of an angle given in degrees.
pub(crate) fn dcos(degrees: f64) -> f64 {
    degrees.to_radians().cos()
}

/// Tangent of an angle given in degrees.
pub(crate) fn dtan(degrees: f64) -> f64 {
    degrees.to_radians().tan()
}

/// Arcsine in degrees.
pub(crate) fn darcsin(x: f64) -> f64 {
    x.asin().to_degrees()
}

/// Arccosine in degrees.
pub(crate) fn darccos(x: f64) -> f64 {
    x.acos().to_degrees()
}

/// Arc-cotangent in degrees, for positive `x`.
pub(crate) fn darccot(x: f64) -> f64 {
    (1.0 / x).atan().to_degrees()
}

/// Two-argument arctangent in degrees.
pub(crate) fn darctan2(y: f64, x: f64) -> f64 {
    y.atan2(x).to_degrees()
}

/// Computes the floored modulo operation (Python-style modulo).
///
/// Unlike Rust's `%` operator which can return negative values, this function
/// always returns a non-negative result in the range [0, m). This matches
/// Python's modulo behavior and is useful for normalizing values to a positive range.
///
/// # Arguments
///
/// * `x` - The dividend
/// * `m` - The modulus (must be positive)
///
/// # Returns
///
/// The remainder `x mod m` in the range [0, m)
///
/// # Examples
///
/// ```
/// # fn floored_mod(x: f64, m: f64) -> f64 { ((x % m) + m) % m }
/// assert_eq!(floored_mod(7.0, 3.0), 1.0);
/// assert_eq!(floored_mod(-7.0, 3.0), 2.0);  // Unlike -7 % 3 which would be -1
/// assert_eq!(floored_mod(0.5, 1.0), 0.5);
/// assert_eq!(floored_mod(1.5, 1.0), 0.5);
/// ```
pub(crate) fn floored_mod(x: f64, m: f64) -> f64 {
    ((x % m) + m) % m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degrees_wrap_into_a_single_turn() {
        assert_eq!(normalize_degrees_360(370.0), 10.0);
        assert_eq!(normalize_degrees_360(-90.0), 270.0);
        assert_eq!(normalize_degrees_360(360.0), 0.0);
        assert_eq!(normalize_degrees_360(-1e-17), 0.0);
    }

    #[test]
    fn hour_angles_stay_within_half_a_day() {
        assert_eq!(normalize_hour_angle(13.0), -11.0);
        assert_eq!(normalize_hour_angle(-13.0), 11.0);
        assert_eq!(normalize_hour_angle(12.0), 12.0);
        assert_eq!(normalize_hour_angle(-3.5), -3.5);
    }

    #[test]
    fn hours_wrap_into_a_single_day() {
        assert_eq!(normalize_hours_24(25.5), 1.5);
        assert_eq!(normalize_hours_24(-0.5), 23.5);
    }

    #[test]
    fn arccot_matches_its_definition() {
        assert!((darccot(1.0) - 45.0).abs() < 1e-12);
        assert!((dtan(45.0) - 1.0).abs() < 1e-12);
        assert!((darcsin(dsin(30.0)) - 30.0).abs() < 1e-12);
        assert!((darccos(dcos(60.0)) - 60.0).abs() < 1e-12);
        assert!((darctan2(1.0, 1.0) - 45.0).abs() < 1e-12);
    }
}
