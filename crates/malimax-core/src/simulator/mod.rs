pub mod baseline;
pub mod loan;
pub mod presets;
pub mod projection;
pub mod simulation;
pub mod summary;

pub use baseline::{compute_trend_baseline, TrendBaseline, TRAILING_WINDOW_MONTHS};
pub use loan::monthly_loan_payment;
pub use presets::{scenario_presets, PresetInfo, ScenarioPreset};
pub use projection::{
    project_scenario, ImpactDeltas, ProjectionPoint, ScenarioParameters, ScenarioResult,
    BALANCE_HORIZON_MONTHS, PROJECTION_HORIZON_MONTHS,
};
pub use simulation::{run_simulation, SimulationInput};
pub use summary::ScenarioSummary;
