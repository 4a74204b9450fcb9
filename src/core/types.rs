use serde::Serialize;

pub const MONTHS_PER_YEAR: f64 = 12.0;
/// Payout horizon used for the monthly pension estimate (20 years of retirement).
pub const RETIREMENT_PAYOUT_MONTHS: f64 = 240.0;
pub const CRISIS_INTERVAL_YEARS: u32 = 10;
/// Percentage points removed from the adjusted rate in a crisis year.
pub const CRISIS_RATE_PENALTY: f64 = 5.0;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    FixedIncome,
    VariableIncome,
    Mixed,
}

impl Strategy {
    /// Comparison order.
    pub const ALL: [Strategy; 3] = [
        Strategy::FixedIncome,
        Strategy::VariableIncome,
        Strategy::Mixed,
    ];

    /// Percentage points added to the base annual return.
    pub fn rate_adjustment(self) -> f64 {
        match self {
            Strategy::FixedIncome => -1.0,
            Strategy::VariableIncome => 2.0,
            Strategy::Mixed => 0.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Strategy::FixedIncome => "Renta fija",
            Strategy::VariableIncome => "Renta variable",
            Strategy::Mixed => "Mixta",
        }
    }
}

/// Inputs for a single deterministic run. Rates are in percent (7.0 means 7 %).
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParameters {
    pub initial_balance: f64,
    pub monthly_contribution: f64,
    pub annual_return_rate: f64,
    pub annual_inflation_rate: f64,
    pub horizon_years: u32,
    pub strategy: Strategy,
    pub include_crisis: bool,
}

impl SimulationParameters {
    pub fn with_strategy(self, strategy: Strategy) -> Self {
        Self { strategy, ..self }
    }

    pub fn annual_contribution(&self) -> f64 {
        self.monthly_contribution * MONTHS_PER_YEAR
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyRecord {
    pub year: u32,
    pub accumulated_balance: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub years: Vec<YearlyRecord>,
    pub final_balance: f64,
    pub total_contributed: f64,
    pub total_return: f64,
    pub estimated_monthly_pension: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRecord {
    pub strategy: Strategy,
    pub year: u32,
    pub accumulated_balance: f64,
}

/// Records of one run per strategy, grouped in `Strategy::ALL` order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ComparisonDataset {
    pub records: Vec<ComparisonRecord>,
}

impl ComparisonDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records_for(&self, strategy: Strategy) -> impl Iterator<Item = &ComparisonRecord> {
        self.records.iter().filter(move |r| r.strategy == strategy)
    }
}
