//! Empirical chamber and nozzle sizing.

use crate::chamber::circle_diameter;
use crate::common::check_positive;
use crate::error::ComponentResult;
use pe_core::units::{Area, Length, Mass, Pressure, Volume, in_mpa, kg, m, m2, m3};
use pe_properties::{MaterialLibrary, StructuralMaterial};
use pe_properties::material::DEFAULT_MATERIAL;
use std::f64::consts::PI;

/// Design constants of the sizing correlations.
#[derive(Clone, Debug, PartialEq)]
pub struct SizingParameters {
    /// Characteristic length L* = V_c / A_t
    pub characteristic_length: Length,
    /// Wall material, looked up in the material library
    pub material: String,
    /// Nozzle wall half angle [deg]
    pub nozzle_half_angle_deg: f64,
    /// Empirical correction applied to both masses
    pub correction_factor: f64,
    /// Structural safety factor on ultimate strength
    pub safety_factor: f64,
}

impl Default for SizingParameters {
    fn default() -> Self {
        Self {
            characteristic_length: m(1.27),
            material: DEFAULT_MATERIAL.to_string(),
            nozzle_half_angle_deg: 15.0,
            correction_factor: 1.52,
            safety_factor: 2.0,
        }
    }
}

impl SizingParameters {
    pub fn validate(&self) -> ComponentResult<()> {
        check_positive(
            self.characteristic_length.value,
            "characteristic length must be positive",
        )?;
        check_positive(self.nozzle_half_angle_deg, "nozzle half angle must be positive")?;
        check_positive(self.correction_factor, "correction factor must be positive")?;
        check_positive(self.safety_factor, "safety factor must be positive")?;
        Ok(())
    }
}

/// Chamber and nozzle dimensions and masses.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometrySizing {
    pub chamber_area: Area,
    pub chamber_diameter: Length,
    pub chamber_volume: Volume,
    pub chamber_length: Length,
    pub chamber_mass: Mass,
    pub nozzle_mass: Mass,
    pub material: StructuralMaterial,
}

/// Chamber cross-section from throat area.
///
/// ```text
/// A_cc = [8·(d_t[cm])^-0.6 + 1.25] · A_t,   d_t[cm] = 200·sqrt(A_t/π)
/// ```
pub fn chamber_area(throat_area: Area) -> Area {
    let throat_diameter_cm = (throat_area.value / PI).sqrt() * 200.0;
    m2((8.0 * throat_diameter_cm.powf(-0.6) + 1.25) * throat_area.value)
}

/// Size the chamber and nozzle for a throat, area ratio and chamber pressure.
pub fn size_engine(
    throat_area: Area,
    area_ratio: f64,
    chamber_pressure: Pressure,
    params: &SizingParameters,
    materials: &dyn MaterialLibrary,
) -> ComponentResult<GeometrySizing> {
    params.validate()?;
    check_positive(throat_area.value, "throat area must be positive")?;
    check_positive(area_ratio, "area ratio must be positive")?;
    let p_mpa = check_positive(in_mpa(chamber_pressure), "chamber pressure must be positive")?;
    let material = materials.lookup(&params.material)?;

    let at = throat_area.value;
    let area = chamber_area(throat_area);
    let diameter = circle_diameter(area).value;
    let volume = at * params.characteristic_length.value;
    let length = volume / area.value;

    let factor = material.sizing_factor(params.safety_factor);
    let chamber_mass =
        factor * p_mpa * volume * (2.0 * diameter + 1.0 / length) * params.correction_factor;

    let half_angle = params.nozzle_half_angle_deg.to_radians();
    let nozzle_mass = (area_ratio - 1.0) / half_angle.sin()
        * at
        * p_mpa
        * diameter
        * factor
        * 0.5
        * params.correction_factor;

    Ok(GeometrySizing {
        chamber_area: area,
        chamber_diameter: m(diameter),
        chamber_volume: m3(volume),
        chamber_length: m(length),
        chamber_mass: kg(chamber_mass),
        nozzle_mass: kg(nozzle_mass),
        material,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chamber::circle_area;
    use crate::error::ComponentError;
    use pe_core::units::mpa;
    use pe_properties::{PropertyError, StandardMaterials};

    fn sizing(pressure: f64) -> GeometrySizing {
        size_engine(
            circle_area(m(0.1)),
            30.0,
            mpa(pressure),
            &SizingParameters::default(),
            &StandardMaterials,
        )
        .unwrap()
    }

    #[test]
    fn chamber_is_wider_than_throat() {
        let g = sizing(10.0);
        assert!(g.chamber_diameter.value > 0.1);
        assert!(g.chamber_length.value > 0.0);
        let volume = g.chamber_area.value * g.chamber_length.value;
        assert!((volume - g.chamber_volume.value).abs() < 1e-12);
    }

    #[test]
    fn chamber_area_correlation() {
        // d_t = 10 cm
        let at = circle_area(m(0.1));
        let expected = (8.0 * 10.0_f64.powf(-0.6) + 1.25) * at.value;
        assert!((chamber_area(at).value - expected).abs() < 1e-12);
    }

    #[test]
    fn doubling_pressure_doubles_masses() {
        let base = sizing(5.0);
        let doubled = sizing(10.0);
        assert!(doubled.chamber_mass.value > base.chamber_mass.value);
        assert!((doubled.chamber_mass.value / base.chamber_mass.value - 2.0).abs() < 1e-9);
        assert!((doubled.nozzle_mass.value / base.nozzle_mass.value - 2.0).abs() < 1e-9);
    }

    #[test]
    fn unit_area_ratio_has_no_nozzle_mass() {
        let g = size_engine(
            circle_area(m(0.1)),
            1.0,
            mpa(10.0),
            &SizingParameters::default(),
            &StandardMaterials,
        )
        .unwrap();
        assert_eq!(g.nozzle_mass.value, 0.0);
    }

    #[test]
    fn unknown_material_is_reported() {
        let params = SizingParameters {
            material: "Unobtainium".into(),
            ..SizingParameters::default()
        };
        let err = size_engine(circle_area(m(0.1)), 30.0, mpa(10.0), &params, &StandardMaterials)
            .unwrap_err();
        assert_eq!(
            err,
            ComponentError::Properties(PropertyError::UnknownMaterial {
                name: "Unobtainium".into()
            })
        );
    }
}
