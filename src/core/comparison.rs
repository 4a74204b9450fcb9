use super::engine::simulate;
use super::types::{ComparisonDataset, ComparisonRecord, SimulationParameters, Strategy};

/// Runs every strategy over the same inputs. The `strategy` field of `params` is ignored.
pub fn compare(params: SimulationParameters) -> ComparisonDataset {
    let mut records = Vec::with_capacity(Strategy::ALL.len() * params.horizon_years as usize);
    for strategy in Strategy::ALL {
        let result = simulate(params.with_strategy(strategy));
        records.extend(result.years.iter().map(|record| ComparisonRecord {
            strategy,
            year: record.year,
            accumulated_balance: record.accumulated_balance,
        }));
    }
    ComparisonDataset { records }
}
