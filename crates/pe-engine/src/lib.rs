//! pe-engine: liquid bipropellant engine calculators.
//!
//! An [`EngineCalculator`] holds one engine configuration (mixture, O/F ratio,
//! chamber pressure, area ratio, throat diameter) and the state derived from it:
//! chamber gas, mass flows, turbopump operating point, nozzle performance and
//! structural sizing. The [`PowerCycle`] selects how turbine drive flow is
//! accounted for.
//!
//! # Example
//!
//! ```no_run
//! use pe_engine::{EngineCalculator, PowerCycle};
//! use pe_core::units::{m, mpa};
//! use pe_properties::MixtureCatalog;
//!
//! let kerolox = MixtureCatalog::builtin().model("Kerosene_Lox").unwrap();
//! let mut calc = EngineCalculator::new(PowerCycle::default());
//! calc.set_engine_properties(kerolox, 2.3, mpa(7.0), 16.0, m(0.2)).unwrap();
//! let perf = calc.performance().unwrap();
//! println!("Isp vac {:.1} s, SL {:.1} s", perf.isp_vacuum.value, perf.isp_sea_level.value);
//! ```

pub mod calculator;
pub mod config;
pub mod cycle;
pub mod error;
pub mod gas_generator;
pub mod host;
pub mod state;
pub mod throttle;

pub use calculator::{EngineCalculator, Recompute};
pub use config::{ClampedInput, ConfigField, EngineConfiguration, FeedSystem};
pub use cycle::{CycleInputs, CycleOutcome, PowerCycle};
pub use error::{EngineError, EngineResult};
pub use gas_generator::{GasGeneratorCycle, GasGeneratorSolution, overall_of_ratio};
pub use host::{PersistedEngineFields, ProceduralEngine};
pub use state::{EngineSnapshot, MassFlowState, PerformanceResult, TurbineCycleState};
pub use throttle::{
    CurveKey, HermiteCurve, MIN_THROTTLE_LIMIT, THROTTLE_INJECTOR_CURVE, clamp_min_throttle,
    injector_drop_for_throttle,
};
