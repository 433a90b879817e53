//! Main combustion chamber: throat geometry and choked mass flow.

use crate::common::{check_finite, check_positive};
use crate::error::ComponentResult;
use pe_core::constants::R_UNIVERSAL;
use pe_core::units::{Area, Length, MassRate, Pressure, kgps, m, m2};
use pe_properties::{CombustionGasState, PropellantModel};
use std::f64::consts::PI;

/// Main chamber operating point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CombustionChamber {
    pub of_ratio: f64,
    pub chamber_pressure: Pressure,
    /// Nozzle exit area over throat area
    pub area_ratio: f64,
    pub throat_diameter: Length,
}

/// Chamber mass flow split by propellant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChamberFlow {
    pub total: MassRate,
    pub oxidizer: MassRate,
    pub fuel: MassRate,
}

impl ChamberFlow {
    /// Split a total flow at `of_ratio`: fuel = ṁ/(OF+1), oxidizer = fuel·OF.
    pub fn split(total: MassRate, of_ratio: f64) -> Self {
        let fuel = total.value / (of_ratio + 1.0);
        Self {
            total,
            oxidizer: kgps(fuel * of_ratio),
            fuel: kgps(fuel),
        }
    }
}

/// Everything the chamber step produces.
#[derive(Clone, Debug, PartialEq)]
pub struct ChamberSolution {
    pub gas: CombustionGasState,
    pub throat_area: Area,
    pub exit_area: Area,
    pub exit_diameter: Length,
    pub flow: ChamberFlow,
}

/// Area of a circle of diameter `diameter`.
pub fn circle_area(diameter: Length) -> Area {
    m2(0.25 * PI * diameter.value * diameter.value)
}

/// Diameter of a circle of area `area`.
pub fn circle_diameter(area: Area) -> Length {
    m((area.value / (0.25 * PI)).sqrt())
}

/// Choked mass flow through a throat of area `throat_area`.
///
/// ```text
/// ṁ = A_t · p_c · sqrt[ γ·Mw/(R·T_c) · (2/(γ+1))^((γ+1)/(γ-1)) ]
/// ```
pub fn choked_mass_flow(throat_area: Area, gas: &CombustionGasState) -> ComponentResult<MassRate> {
    let gamma = gas.gamma;
    let choke_term = (2.0 / (gamma + 1.0)).powf((gamma + 1.0) / (gamma - 1.0));
    let flow_function =
        gamma * gas.molar_mass / (R_UNIVERSAL * gas.chamber_temperature.value) * choke_term;
    let mdot = flow_function.sqrt() * gas.chamber_pressure.value * throat_area.value;
    Ok(kgps(check_finite(mdot, "choked mass flow")?))
}

impl CombustionChamber {
    pub fn validate(&self) -> ComponentResult<()> {
        check_positive(self.of_ratio, "O/F ratio must be positive")?;
        check_positive(self.chamber_pressure.value, "chamber pressure must be positive")?;
        check_positive(self.throat_diameter.value, "throat diameter must be positive")?;
        check_positive(self.area_ratio, "area ratio must be positive")?;
        Ok(())
    }

    /// Look up the chamber gas and compute geometry and choked flow.
    pub fn evaluate(&self, model: &dyn PropellantModel) -> ComponentResult<ChamberSolution> {
        self.validate()?;

        let throat_area = circle_area(self.throat_diameter);
        let exit_area = m2(throat_area.value * self.area_ratio);
        let gas = model.state_at_ratio_and_pressure(self.of_ratio, self.chamber_pressure)?;
        let total = choked_mass_flow(throat_area, &gas)?;

        tracing::trace!(
            mixture = model.name(),
            of_ratio = self.of_ratio,
            chamber_temperature = gas.chamber_temperature.value,
            mass_flow = total.value,
            "chamber evaluated"
        );

        Ok(ChamberSolution {
            gas,
            throat_area,
            exit_area,
            exit_diameter: circle_diameter(exit_area),
            flow: ChamberFlow::split(total, self.of_ratio),
        })
    }
}
