//! Engine calculator: owns one configuration and its derived state.
//!
//! Every recompute runs the same fixed pipeline:
//!
//! 1. Main chamber: gas lookup, throat geometry, choked flow.
//! 2. Power cycle: turbine drive flow added to the total flow.
//! 3. Nozzle expansion on the total flow.
//! 4. Chamber and nozzle sizing.
//!
//! The pipeline result is published atomically together with the configuration
//! that produced it. A failed recompute leaves configuration, cycle, snapshot,
//! revision and clamp records exactly as they were.

use crate::config::{
    ClampedInput, ConfigField, EngineConfiguration, FeedSystem, clamp_configuration,
};
use crate::cycle::{CycleInputs, PowerCycle};
use crate::error::EngineResult;
use crate::gas_generator::overall_of_ratio;
use crate::state::{EngineSnapshot, MassFlowState, PerformanceResult, TurbineCycleState};
use crate::throttle::{clamp_min_throttle, injector_drop_for_throttle};
use pe_components::{
    CombustionChamber, GeometrySizing, NozzleExpansion, SizingParameters, size_engine,
};
use pe_core::units::{Length, Pressure, in_mpa, kgps};
use pe_properties::{MaterialLibrary, SharedPropellant, StandardMaterials};
use std::sync::Arc;

/// Whether a setter triggered a recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    /// Inputs matched the current state; nothing was recomputed
    Unchanged,
    /// Derived state was replaced; carries the new revision
    Updated { revision: u64 },
}

impl Recompute {
    pub fn changed(&self) -> bool {
        matches!(self, Recompute::Updated { .. })
    }
}

/// Fields clamped by [`EngineCalculator::set_engine_properties`].
const PROPERTY_FIELDS: [ConfigField; 3] = [
    ConfigField::OfRatio,
    ConfigField::ChamberPressure,
    ConfigField::AreaRatio,
];

/// State a recompute commits if the pipeline succeeds.
struct Pending {
    config: EngineConfiguration,
    cycle: PowerCycle,
    feed: FeedSystem,
    min_throttle: f64,
}

/// Clamp records produced by one setter, replacing the records of `owned`.
struct ClampUpdate {
    owned: &'static [ConfigField],
    clamps: Vec<ClampedInput>,
}

/// Liquid bipropellant engine calculator.
pub struct EngineCalculator {
    cycle: PowerCycle,
    feed: FeedSystem,
    sizing: SizingParameters,
    materials: Arc<dyn MaterialLibrary>,
    min_throttle: f64,
    snapshot: Option<EngineSnapshot>,
    revision: u64,
    clamps: Vec<ClampedInput>,
}

impl std::fmt::Debug for EngineCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineCalculator")
            .field("cycle", &self.cycle.calculator_type())
            .field("revision", &self.revision)
            .field("configuration", &self.configuration())
            .finish()
    }
}

impl EngineCalculator {
    pub fn new(cycle: PowerCycle) -> Self {
        Self {
            cycle,
            feed: FeedSystem::default(),
            sizing: SizingParameters::default(),
            materials: Arc::new(StandardMaterials),
            min_throttle: 1.0,
            snapshot: None,
            revision: 0,
            clamps: Vec::new(),
        }
    }

    /// Calculator with a gas-generator cycle at default design constants.
    pub fn gas_generator() -> Self {
        Self::new(PowerCycle::default())
    }

    pub fn with_feed_system(mut self, feed: FeedSystem) -> Self {
        self.feed = feed;
        self
    }

    pub fn with_sizing(mut self, sizing: SizingParameters) -> Self {
        self.sizing = sizing;
        self
    }

    pub fn with_materials(mut self, materials: Arc<dyn MaterialLibrary>) -> Self {
        self.materials = materials;
        self
    }

    /// Construct and run the first recompute.
    pub fn with_engine(
        cycle: PowerCycle,
        mixture: SharedPropellant,
        of_ratio: f64,
        chamber_pressure: Pressure,
        area_ratio: f64,
        throat_diameter: Length,
    ) -> EngineResult<Self> {
        let mut calculator = Self::new(cycle);
        calculator.set_engine_properties(
            mixture,
            of_ratio,
            chamber_pressure,
            area_ratio,
            throat_diameter,
        )?;
        Ok(calculator)
    }

    pub fn calculator_type(&self) -> &'static str {
        self.cycle.calculator_type()
    }

    pub fn cycle(&self) -> &PowerCycle {
        &self.cycle
    }

    pub fn feed_system(&self) -> &FeedSystem {
        &self.feed
    }

    pub fn sizing(&self) -> &SizingParameters {
        &self.sizing
    }

    /// Current injector pressure-drop ratio.
    pub fn injector_drop_ratio(&self) -> f64 {
        self.feed.injector_drop_ratio
    }

    pub fn min_throttle(&self) -> f64 {
        self.min_throttle
    }

    /// Revision of the published snapshot; 0 before the first recompute.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Clamped inputs behind the current state.
    ///
    /// Each field keeps the record of the last successful setter that owns it:
    /// O/F, chamber pressure and area ratio from `set_engine_properties`, the
    /// minimum throttle from `set_min_throttle`.
    pub fn clamps(&self) -> &[ClampedInput] {
        &self.clamps
    }

    pub fn snapshot(&self) -> Option<&EngineSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn configuration(&self) -> Option<&EngineConfiguration> {
        self.snapshot.as_ref().map(|s| &s.configuration)
    }

    pub fn performance(&self) -> Option<&PerformanceResult> {
        self.snapshot.as_ref().map(|s| &s.performance)
    }

    pub fn mass_flow(&self) -> Option<&MassFlowState> {
        self.snapshot.as_ref().map(|s| &s.mass_flow)
    }

    pub fn turbine(&self) -> Option<&TurbineCycleState> {
        self.snapshot.as_ref().and_then(|s| s.turbine.as_ref())
    }

    pub fn geometry(&self) -> Option<&GeometrySizing> {
        self.snapshot.as_ref().map(|s| &s.geometry)
    }

    /// The single configuration entry point.
    ///
    /// Inputs are clamped to the mixture's limits. If the clamped configuration
    /// equals the current one nothing is recomputed.
    pub fn set_engine_properties(
        &mut self,
        mixture: SharedPropellant,
        of_ratio: f64,
        chamber_pressure: Pressure,
        area_ratio: f64,
        throat_diameter: Length,
    ) -> EngineResult<Recompute> {
        let (candidate, clamps) =
            clamp_configuration(mixture, of_ratio, chamber_pressure, area_ratio, throat_diameter)?;
        let update = ClampUpdate {
            owned: &PROPERTY_FIELDS,
            clamps,
        };

        if self.configuration() == Some(&candidate) {
            tracing::trace!("configuration unchanged, recompute skipped");
            self.merge_clamps(update);
            return Ok(Recompute::Unchanged);
        }
        let pending = Pending {
            config: candidate,
            cycle: self.cycle,
            feed: self.feed,
            min_throttle: self.min_throttle,
        };
        self.publish(pending, update)
    }

    /// Replace the power cycle and recompute the current configuration.
    ///
    /// The cycle is kept only if the recompute succeeds. Before the first
    /// configuration it is stored without a recompute.
    pub fn set_cycle(&mut self, cycle: PowerCycle) -> EngineResult<Recompute> {
        if cycle == self.cycle {
            return Ok(Recompute::Unchanged);
        }
        let Some(config) = self.configuration().cloned() else {
            self.cycle = cycle;
            return Ok(Recompute::Unchanged);
        };
        let pending = Pending {
            config,
            cycle,
            feed: self.feed,
            min_throttle: self.min_throttle,
        };
        self.publish(
            pending,
            ClampUpdate {
                owned: &[],
                clamps: Vec::new(),
            },
        )
    }

    /// Set the minimum throttle and re-derive the injector pressure drop.
    ///
    /// The value is clamped to `[0.1, 1]`. An unchanged value is a no-op; until the
    /// first effective call the injector keeps its default drop.
    pub fn set_min_throttle(&mut self, min_throttle: f64) -> EngineResult<Recompute> {
        if !min_throttle.is_finite() {
            return Err(crate::error::EngineError::InvalidArg {
                what: "minimum throttle must be finite",
            });
        }
        let (applied, clamped) = clamp_min_throttle(min_throttle);
        let mut clamps = Vec::new();
        ClampedInput::record(
            &mut clamps,
            ConfigField::MinThrottle,
            min_throttle,
            applied,
            clamped,
        );
        let update = ClampUpdate {
            owned: &[ConfigField::MinThrottle],
            clamps,
        };

        if applied == self.min_throttle {
            self.merge_clamps(update);
            return Ok(Recompute::Unchanged);
        }

        let feed = FeedSystem {
            injector_drop_ratio: injector_drop_for_throttle(applied),
            ..self.feed
        };
        match self.configuration().cloned() {
            Some(config) => {
                let pending = Pending {
                    config,
                    cycle: self.cycle,
                    feed,
                    min_throttle: applied,
                };
                self.publish(pending, update)
            }
            None => {
                self.feed = feed;
                self.min_throttle = applied;
                self.merge_clamps(update);
                Ok(Recompute::Unchanged)
            }
        }
    }

    fn merge_clamps(&mut self, update: ClampUpdate) {
        self.clamps.retain(|c| !update.owned.contains(&c.field));
        self.clamps.extend(update.clamps);
    }

    /// Recompute and commit on success only.
    fn publish(&mut self, pending: Pending, clamps: ClampUpdate) -> EngineResult<Recompute> {
        let config = &pending.config;
        tracing::debug!(
            calculator = pending.cycle.calculator_type(),
            mixture = config.mixture_name(),
            of_ratio = config.of_ratio,
            chamber_pressure_mpa = in_mpa(config.chamber_pressure),
            area_ratio = config.area_ratio,
            throat_diameter = config.throat_diameter.value,
            "recompute started"
        );

        let revision = self.revision + 1;
        match self.run_pipeline(&pending, revision) {
            Ok(snapshot) => {
                tracing::debug!(
                    revision,
                    thrust_vacuum = snapshot.performance.thrust_vacuum.value,
                    isp_vacuum = snapshot.performance.isp_vacuum.value,
                    "recompute finished"
                );
                self.snapshot = Some(snapshot);
                self.cycle = pending.cycle;
                self.feed = pending.feed;
                self.min_throttle = pending.min_throttle;
                self.revision = revision;
                self.merge_clamps(clamps);
                Ok(Recompute::Updated { revision })
            }
            Err(err) => {
                tracing::warn!(error = %err, "recompute failed, previous results kept");
                Err(err)
            }
        }
    }

    fn run_pipeline(&self, pending: &Pending, revision: u64) -> EngineResult<EngineSnapshot> {
        let Pending {
            config,
            cycle,
            feed,
            min_throttle,
        } = pending;
        let mixture = config.mixture.as_ref();

        let chamber = CombustionChamber {
            of_ratio: config.of_ratio,
            chamber_pressure: config.chamber_pressure,
            area_ratio: config.area_ratio,
            throat_diameter: config.throat_diameter,
        }
        .evaluate(mixture)?;

        let outcome = cycle.compute_cycle(&CycleInputs {
            mixture,
            chamber: &chamber,
            of_ratio: config.of_ratio,
            chamber_pressure: config.chamber_pressure,
            feed,
        })?;

        let total = kgps(chamber.flow.total.value + outcome.additional_mass_flow.value);
        let mass_flow = MassFlowState {
            chamber_total: chamber.flow.total,
            chamber_oxidizer: chamber.flow.oxidizer,
            chamber_fuel: chamber.flow.fuel,
            total,
            overall_of_ratio: overall_of_ratio(
                config.of_ratio,
                chamber.flow.total,
                outcome.additional_of_ratio,
                outcome.additional_mass_flow,
            ),
        };

        let nozzle = NozzleExpansion {
            area_ratio: config.area_ratio,
            exit_area: chamber.exit_area,
            mass_flow: total,
            min_throttle: *min_throttle,
        }
        .evaluate(&chamber.gas)?;

        let geometry = size_engine(
            chamber.throat_area,
            config.area_ratio,
            config.chamber_pressure,
            &self.sizing,
            self.materials.as_ref(),
        )?;

        Ok(EngineSnapshot {
            revision,
            configuration: config.clone(),
            min_throttle: *min_throttle,
            injector_drop_ratio: feed.injector_drop_ratio,
            mass_flow,
            turbine: outcome.turbine,
            performance: PerformanceResult {
                thrust_vacuum: nozzle.thrust_vacuum,
                thrust_sea_level: nozzle.thrust_sea_level,
                isp_vacuum: nozzle.isp_vacuum,
                isp_sea_level: nozzle.isp_sea_level,
                exit_pressure: nozzle.exit.pressure,
                exit_temperature: nozzle.exit.temperature,
                exit_mach: nozzle.exit.mach,
                exhaust_velocity: nozzle.exit.velocity,
                throat_area: chamber.throat_area,
                exit_area: chamber.exit_area,
                nozzle_diameter: chamber.exit_diameter,
                min_thrust_vacuum: nozzle.min_thrust_vacuum,
            },
            chamber_gas: chamber.gas,
            geometry,
        })
    }
}
