//! Throttle range and injector pressure-drop calibration.

/// Lowest minimum-throttle setting current injector technology supports.
pub const MIN_THROTTLE_LIMIT: f64 = 0.1;

/// One key of a cubic Hermite curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveKey {
    pub time: f64,
    pub value: f64,
    pub in_tangent: f64,
    pub out_tangent: f64,
}

/// Piecewise cubic Hermite curve over keys sorted by time.
///
/// Between two keys the curve uses the left key's out-tangent and the right
/// key's in-tangent; outside the key range it holds the end values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HermiteCurve {
    keys: &'static [CurveKey],
}

impl HermiteCurve {
    pub const fn new(keys: &'static [CurveKey]) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &'static [CurveKey] {
        self.keys
    }

    pub fn evaluate(&self, time: f64) -> f64 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };
        if time <= first.time {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }

        for pair in self.keys.windows(2) {
            let (k0, k1) = (pair[0], pair[1]);
            if time > k1.time {
                continue;
            }
            let dt = k1.time - k0.time;
            let s = (time - k0.time) / dt;
            let s2 = s * s;
            let s3 = s2 * s;
            let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
            let h10 = s3 - 2.0 * s2 + s;
            let h01 = -2.0 * s3 + 3.0 * s2;
            let h11 = s3 - s2;
            return h00 * k0.value
                + h10 * dt * k0.out_tangent
                + h01 * k1.value
                + h11 * dt * k1.in_tangent;
        }
        last.value
    }
}

const THROTTLE_INJECTOR_KEYS: [CurveKey; 2] = [
    CurveKey {
        time: 0.1,
        value: 0.67,
        in_tangent: -0.65,
        out_tangent: -0.65,
    },
    CurveKey {
        time: 1.0,
        value: 0.2,
        in_tangent: 0.0,
        out_tangent: 0.0,
    },
];

/// Injector pressure-drop ratio as a function of minimum throttle.
///
/// Deeper throttling needs a stiffer injector.
pub const THROTTLE_INJECTOR_CURVE: HermiteCurve = HermiteCurve::new(&THROTTLE_INJECTOR_KEYS);

/// Clamp a requested minimum throttle into `[MIN_THROTTLE_LIMIT, 1]`.
pub fn clamp_min_throttle(min_throttle: f64) -> (f64, bool) {
    pe_core::numeric::clamp_to_range(min_throttle, MIN_THROTTLE_LIMIT, 1.0)
}

/// Injector pressure-drop ratio for a minimum throttle setting.
pub fn injector_drop_for_throttle(min_throttle: f64) -> f64 {
    THROTTLE_INJECTOR_CURVE.evaluate(min_throttle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_hits_anchor_points() {
        assert!((injector_drop_for_throttle(0.1) - 0.67).abs() < 1e-12);
        assert!((injector_drop_for_throttle(1.0) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn curve_holds_end_values_outside_range() {
        assert_eq!(injector_drop_for_throttle(0.0), 0.67);
        assert_eq!(injector_drop_for_throttle(2.0), 0.2);
    }

    #[test]
    fn midpoint_matches_hermite_basis() {
        // s = 0.5: h00 = h01 = 0.5, h10 = 0.125, h11 = -0.125
        let expected = 0.5 * 0.67 + 0.125 * 0.9 * -0.65 + 0.5 * 0.2;
        assert!((injector_drop_for_throttle(0.55) - expected).abs() < 1e-12);
    }

    #[test]
    fn deeper_throttling_needs_larger_drop() {
        let mut previous = injector_drop_for_throttle(1.0);
        for step in 1..=9 {
            let throttle = 1.0 - 0.1 * step as f64;
            let drop = injector_drop_for_throttle(throttle);
            assert!(drop > previous, "throttle {throttle}");
            previous = drop;
        }
    }

    #[test]
    fn throttle_clamp() {
        assert_eq!(clamp_min_throttle(0.05), (0.1, true));
        assert_eq!(clamp_min_throttle(1.5), (1.0, true));
        assert_eq!(clamp_min_throttle(0.5), (0.5, false));
    }
}
