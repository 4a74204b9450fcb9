mod comparison;
mod engine;
mod types;

pub use comparison::compare;
pub use engine::{adjusted_rate, is_crisis_year, real_growth_factor, simulate};
pub use types::{
    CRISIS_INTERVAL_YEARS, CRISIS_RATE_PENALTY, ComparisonDataset, ComparisonRecord,
    MONTHS_PER_YEAR, RETIREMENT_PAYOUT_MONTHS, SimulationParameters, SimulationResult, Strategy,
    YearlyRecord,
};
