//! Isentropic nozzle flow relations.

use crate::common::{check_finite, check_gamma, check_positive};
use crate::error::{ComponentError, ComponentResult};
use pe_solver::{BrentConfig, brent_solve};

/// Upper end of the supersonic Mach search range.
///
/// At gamma = 1.67 this covers area ratios past 7000; lower gammas reach far more.
pub const MAX_SUPERSONIC_MACH: f64 = 50.0;

/// Lower end of the supersonic search range, just above the sonic point.
const MIN_SUPERSONIC_MACH: f64 = 1.0 + 1e-9;

/// Isentropic area ratio `A/A*` at Mach `mach`.
///
/// ```text
/// A/A* = (1/M) · [(2/(γ+1))·(1 + (γ-1)/2·M²)]^((γ+1)/(2(γ-1)))
/// ```
pub fn area_ratio_from_mach(mach: f64, gamma: f64) -> ComponentResult<f64> {
    let mach = check_positive(mach, "Mach number must be positive")?;
    let gamma = check_gamma(gamma)?;
    let ratio = area_ratio_unchecked(mach, gamma);
    check_finite(ratio, "area ratio")
}

fn area_ratio_unchecked(mach: f64, gamma: f64) -> f64 {
    let exponent = (gamma + 1.0) / (2.0 * (gamma - 1.0));
    let base = 2.0 / (gamma + 1.0) * (1.0 + 0.5 * (gamma - 1.0) * mach * mach);
    base.powf(exponent) / mach
}

/// Parameters of the inverse area-ratio residual.
struct AreaRatioTarget {
    area_ratio: f64,
    gamma: f64,
}

fn area_ratio_residual(mach: f64, target: &AreaRatioTarget) -> f64 {
    area_ratio_unchecked(mach, target.gamma) - target.area_ratio
}

/// Supersonic Mach number with isentropic area ratio `area_ratio`.
///
/// The subsonic root is never returned. An area ratio of exactly 1 gives Mach 1.
pub fn mach_from_area_ratio(area_ratio: f64, gamma: f64) -> ComponentResult<f64> {
    let area_ratio = check_finite(area_ratio, "area ratio")?;
    let gamma = check_gamma(gamma)?;
    if area_ratio < 1.0 {
        return Err(ComponentError::InvalidArg {
            what: "area ratio must be at least 1",
        });
    }
    if area_ratio == 1.0 {
        return Ok(1.0);
    }

    let target = AreaRatioTarget { area_ratio, gamma };
    let config = BrentConfig {
        abs_tol: 1e-10,
        max_iterations: 200,
    };
    let solution = brent_solve(
        area_ratio_residual,
        &target,
        MIN_SUPERSONIC_MACH,
        MAX_SUPERSONIC_MACH,
        &config,
    )?;
    Ok(solution.x)
}

/// Static temperature ratio `T2/T1` between two stations of the same isentropic flow.
pub fn isentropic_temperature_ratio(mach_1: f64, mach_2: f64, gamma: f64) -> ComponentResult<f64> {
    let gamma = check_gamma(gamma)?;
    check_finite(mach_1, "Mach number")?;
    check_finite(mach_2, "Mach number")?;
    let half = 0.5 * (gamma - 1.0);
    Ok((1.0 + half * mach_1 * mach_1) / (1.0 + half * mach_2 * mach_2))
}

/// Static pressure ratio `p2/p1`, `(T2/T1)^(γ/(γ-1))`.
pub fn isentropic_pressure_ratio(mach_1: f64, mach_2: f64, gamma: f64) -> ComponentResult<f64> {
    let t_ratio = isentropic_temperature_ratio(mach_1, mach_2, gamma)?;
    Ok(pressure_ratio_from_temperature_ratio(t_ratio, gamma))
}

pub(crate) fn pressure_ratio_from_temperature_ratio(t_ratio: f64, gamma: f64) -> f64 {
    t_ratio.powf(gamma / (gamma - 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sonic_area_ratio_is_one() {
        let ratio = area_ratio_from_mach(1.0, 1.4).unwrap();
        assert!((ratio - 1.0).abs() < 1e-12);
    }

    #[test]
    fn textbook_value_for_air() {
        // M = 2, gamma = 1.4: A/A* = 1.6875
        let ratio = area_ratio_from_mach(2.0, 1.4).unwrap();
        assert!((ratio - 1.6875).abs() < 1e-9);
    }

    #[test]
    fn inverse_returns_supersonic_branch() {
        let mach = mach_from_area_ratio(1.6875, 1.4).unwrap();
        assert!((mach - 2.0).abs() < 1e-8);
    }

    #[test]
    fn unit_area_ratio_is_sonic() {
        assert_eq!(mach_from_area_ratio(1.0, 1.2).unwrap(), 1.0);
    }

    #[test]
    fn rejects_sub_unity_area_ratio() {
        assert!(matches!(
            mach_from_area_ratio(0.9, 1.2),
            Err(ComponentError::InvalidArg { .. })
        ));
    }

    #[test]
    fn rejects_bad_gamma_and_mach() {
        assert!(area_ratio_from_mach(2.0, 1.0).is_err());
        assert!(area_ratio_from_mach(0.0, 1.2).is_err());
        assert!(mach_from_area_ratio(10.0, 0.9).is_err());
    }

    #[test]
    fn isentropic_ratios_between_stations() {
        // Same station: unity
        assert_eq!(isentropic_temperature_ratio(2.0, 2.0, 1.2).unwrap(), 1.0);

        let t = isentropic_temperature_ratio(0.0, 2.0, 1.4).unwrap();
        assert!((t - 1.0 / 1.8).abs() < 1e-12);

        let p = isentropic_pressure_ratio(0.0, 2.0, 1.4).unwrap();
        assert!((p - (1.0_f64 / 1.8).powf(3.5)).abs() < 1e-12);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn mach_round_trip(mach in 1.05_f64..8.0, gamma in 1.1_f64..1.67) {
                let ratio = area_ratio_from_mach(mach, gamma).unwrap();
                let back = mach_from_area_ratio(ratio, gamma).unwrap();
                prop_assert!((back - mach).abs() < 1e-6, "mach {mach} back {back}");
            }

            #[test]
            fn area_ratio_increases_with_supersonic_mach(
                mach in 1.01_f64..10.0,
                step in 0.01_f64..2.0,
                gamma in 1.1_f64..1.67,
            ) {
                let a = area_ratio_from_mach(mach, gamma).unwrap();
                let b = area_ratio_from_mach(mach + step, gamma).unwrap();
                prop_assert!(b > a);
            }
        }
    }
}
