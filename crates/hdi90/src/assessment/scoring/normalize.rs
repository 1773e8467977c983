/// Floor applied to every domain score so the geometric mean never collapses to zero.
pub const EPSILON: f64 = 1e-4;

/// Map `x` onto `[0, 1]` relative to `[min, max]`.
///
/// NaN maps to 0. A degenerate range (`min == max`) maps to 1 when `x > min` and to 0
/// otherwise. Inverted scales are expressed by the caller, e.g. `normalize(9.0 - hba1c, 4.5, 9.0)`.
pub fn normalize(x: f64, min: f64, max: f64) -> f64 {
    if x.is_nan() {
        return 0.0;
    }
    if min == max {
        return if x > min { 1.0 } else { 0.0 };
    }
    let ratio = (x - min) / (max - min);
    if ratio.is_nan() {
        return 0.0;
    }
    ratio.clamp(0.0, 1.0)
}

pub fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Clamp to `[0, 1]`, sending NaN to 0.
pub fn unit(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// `(∏ max(v, floor))^(1/n)`. An empty slice yields the floor.
pub fn geometric_mean_with_floor(values: &[f64], floor: f64) -> f64 {
    if values.is_empty() {
        return floor;
    }
    let product: f64 = values.iter().map(|value| value.max(floor)).product();
    product.powf(1.0 / values.len() as f64)
}

pub fn geometric_mean(values: &[f64]) -> f64 {
    geometric_mean_with_floor(values, EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn nan_inputs_normalize_to_zero() {
        for (min, max) in [(0.0, 10.0), (5.0, 5.0), (10.0, 0.0), (-3.0, 3.0)] {
            assert_eq!(normalize(f64::NAN, min, max), 0.0);
        }
    }

    #[test]
    fn bounds_map_to_zero_and_one() {
        assert_eq!(normalize(3.0, 3.0, 15.0), 0.0);
        assert_eq!(normalize(15.0, 3.0, 15.0), 1.0);
        assert!((normalize(9.0, 3.0, 15.0) - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn results_stay_in_unit_interval() {
        let samples = [-1e9, -42.5, -1.0, 0.0, 0.3, 7.0, 99.9, 1e12, f64::INFINITY];
        for x in samples {
            for (min, max) in [(0.0, 10.0), (40.0, 260.0), (-5.0, 5.0), (10.0, 0.0)] {
                let value = normalize(x, min, max);
                assert!((0.0..=1.0).contains(&value), "normalize({x}, {min}, {max}) = {value}");
            }
        }
    }

    #[test]
    fn degenerate_range_is_a_step_function() {
        assert_eq!(normalize(5.000_001, 5.0, 5.0), 1.0);
        assert_eq!(normalize(5.0, 5.0, 5.0), 0.0);
        assert_eq!(normalize(-2.0, 5.0, 5.0), 0.0);
    }

    #[test]
    fn unit_clamps_and_absorbs_nan() {
        assert_eq!(unit(f64::NAN), 0.0);
        assert_eq!(unit(-0.2), 0.0);
        assert_eq!(unit(1.7), 1.0);
        assert_eq!(unit(0.25), 0.25);
        assert_eq!(flag(true), 1.0);
        assert_eq!(flag(false), 0.0);
    }

    #[test]
    fn geometric_mean_is_order_independent() {
        let forward = geometric_mean(&[0.2, 0.5, 0.7, 0.9]);
        let shuffled = geometric_mean(&[0.9, 0.2, 0.7, 0.5]);
        assert!((forward - shuffled).abs() < TOLERANCE);
    }

    #[test]
    fn geometric_mean_of_equal_values_is_that_value() {
        for value in [0.001, 0.25, 0.5, 0.999, 1.0] {
            let mean = geometric_mean(&[value; 4]);
            assert!((mean - value).abs() < TOLERANCE, "{value} -> {mean}");
        }
    }

    #[test]
    fn geometric_mean_floors_zero_and_nan_factors() {
        let mean = geometric_mean(&[0.0, f64::NAN, 1.0, 1.0]);
        assert!((mean - EPSILON.sqrt()).abs() < TOLERANCE);
        assert_eq!(geometric_mean(&[]), EPSILON);
    }

    #[test]
    fn raising_the_weakest_factor_helps_most() {
        let base = geometric_mean(&[0.2, 0.8, 0.8, 0.8]);
        let lift_low = geometric_mean(&[0.3, 0.8, 0.8, 0.8]) - base;

        let base_rotated = geometric_mean(&[0.8, 0.8, 0.8, 0.2]);
        let lift_high = geometric_mean(&[0.9, 0.8, 0.8, 0.2]) - base_rotated;

        assert!(lift_low > lift_high, "{lift_low} <= {lift_high}");
    }
}
