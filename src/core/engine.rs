use super::types::{
    CRISIS_INTERVAL_YEARS, CRISIS_RATE_PENALTY, RETIREMENT_PAYOUT_MONTHS, SimulationParameters,
    SimulationResult, YearlyRecord,
};

pub fn is_crisis_year(year: u32) -> bool {
    year > 0 && year % CRISIS_INTERVAL_YEARS == 0
}

/// Nominal rate in percent applied in `year`, after the strategy tilt and any crisis penalty.
pub fn adjusted_rate(params: &SimulationParameters, year: u32) -> f64 {
    let mut rate = params.annual_return_rate + params.strategy.rate_adjustment();
    if params.include_crisis && is_crisis_year(year) {
        rate -= CRISIS_RATE_PENALTY;
    }
    rate
}

pub fn real_growth_factor(adjusted_rate: f64, inflation_rate: f64) -> f64 {
    1.0 + (adjusted_rate - inflation_rate) / 100.0
}

pub fn simulate(params: SimulationParameters) -> SimulationResult {
    let annual_contribution = params.annual_contribution();
    let mut balance = params.initial_balance;
    let mut years = Vec::with_capacity(params.horizon_years as usize);

    for year in 1..=params.horizon_years {
        let growth = real_growth_factor(adjusted_rate(&params, year), params.annual_inflation_rate);
        // Contribution lands after the year's compounding.
        balance = balance * growth + annual_contribution;
        years.push(YearlyRecord {
            year,
            accumulated_balance: balance,
        });
    }

    let total_contributed =
        params.initial_balance + annual_contribution * f64::from(params.horizon_years);

    SimulationResult {
        years,
        final_balance: balance,
        total_contributed,
        total_return: balance - total_contributed,
        estimated_monthly_pension: balance / RETIREMENT_PAYOUT_MONTHS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Strategy;
    use proptest::prelude::{any, prop_assert, prop_assert_eq, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn sample_params() -> SimulationParameters {
        SimulationParameters {
            initial_balance: 100_000.0,
            monthly_contribution: 5_000.0,
            annual_return_rate: 7.0,
            annual_inflation_rate: 3.0,
            horizon_years: 30,
            strategy: Strategy::Mixed,
            include_crisis: false,
        }
    }

    fn strategy_from_index(index: u8) -> Strategy {
        Strategy::ALL[usize::from(index % 3)]
    }

    #[test]
    fn single_year_mixed_run_matches_hand_calculation() {
        let mut params = sample_params();
        params.horizon_years = 1;

        let result = simulate(params);
        assert_eq!(result.years.len(), 1);
        assert_eq!(result.years[0].year, 1);
        assert_approx(result.years[0].accumulated_balance, 164_000.0);
        assert_approx(result.final_balance, 164_000.0);
        assert_approx(result.total_contributed, 160_000.0);
        assert_approx(result.total_return, 4_000.0);
        assert_approx(result.estimated_monthly_pension, 164_000.0 / 240.0);
    }

    #[test]
    fn strategy_adjusts_base_rate() {
        let mut params = sample_params();
        params.strategy = Strategy::FixedIncome;
        assert_approx(adjusted_rate(&params, 1), 6.0);
        params.strategy = Strategy::VariableIncome;
        assert_approx(adjusted_rate(&params, 1), 9.0);
        params.strategy = Strategy::Mixed;
        assert_approx(adjusted_rate(&params, 1), 7.0);
    }

    #[test]
    fn crisis_penalty_hits_every_tenth_year_only() {
        let mut params = sample_params();
        params.strategy = Strategy::VariableIncome;
        params.include_crisis = true;

        assert_approx(adjusted_rate(&params, 9), 9.0);
        assert_approx(adjusted_rate(&params, 10), 4.0);
        assert_approx(adjusted_rate(&params, 11), 9.0);
        assert_approx(adjusted_rate(&params, 20), 4.0);
        assert_approx(adjusted_rate(&params, 30), 4.0);
        assert!(!is_crisis_year(0));
    }

    #[test]
    fn zero_horizon_keeps_initial_balance() {
        let mut params = sample_params();
        params.horizon_years = 0;

        let result = simulate(params);
        assert!(result.years.is_empty());
        assert_approx(result.final_balance, 100_000.0);
        assert_approx(result.total_contributed, 100_000.0);
        assert_approx(result.total_return, 0.0);
        assert_approx(result.estimated_monthly_pension, 100_000.0 / 240.0);
    }

    #[test]
    fn negative_real_return_shrinks_balance_without_contributions() {
        let mut params = sample_params();
        params.monthly_contribution = 0.0;
        params.annual_return_rate = 1.0;
        params.annual_inflation_rate = 6.0;
        params.strategy = Strategy::FixedIncome;
        params.horizon_years = 5;

        let result = simulate(params);
        for pair in result.years.windows(2) {
            assert!(pair[1].accumulated_balance < pair[0].accumulated_balance);
        }
        assert_approx(result.final_balance, 100_000.0 * 0.94_f64.powi(5));
        assert!(result.total_return < 0.0);
    }

    #[test]
    fn total_contributed_counts_every_year_of_contributions() {
        let result = simulate(sample_params());
        assert_approx(result.total_contributed, 100_000.0 + 5_000.0 * 12.0 * 30.0);
        assert_approx(
            result.total_return,
            result.final_balance - result.total_contributed,
        );
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn prop_simulate_is_deterministic(
            initial in 0u32..2_000_000,
            monthly in 0u32..20_000,
            return_bp in 0u32..1500,
            inflation_bp in 0u32..1000,
            years in 0u32..60,
            strategy in any::<u8>(),
            crisis in any::<bool>()
        ) {
            let params = SimulationParameters {
                initial_balance: f64::from(initial),
                monthly_contribution: f64::from(monthly),
                annual_return_rate: f64::from(return_bp) / 100.0,
                annual_inflation_rate: f64::from(inflation_bp) / 100.0,
                horizon_years: years,
                strategy: strategy_from_index(strategy),
                include_crisis: crisis,
            };

            let first = simulate(params);
            let second = simulate(params);
            prop_assert_eq!(first.years.len(), second.years.len());
            for (a, b) in first.years.iter().zip(&second.years) {
                prop_assert_eq!(a.year, b.year);
                prop_assert_eq!(a.accumulated_balance.to_bits(), b.accumulated_balance.to_bits());
            }
            prop_assert_eq!(first.total_return.to_bits(), second.total_return.to_bits());
            prop_assert_eq!(
                first.estimated_monthly_pension.to_bits(),
                second.estimated_monthly_pension.to_bits()
            );
        }

        #[test]
        fn prop_years_run_one_through_horizon(
            years in 0u32..80,
            strategy in any::<u8>(),
            crisis in any::<bool>()
        ) {
            let mut params = sample_params();
            params.horizon_years = years;
            params.strategy = strategy_from_index(strategy);
            params.include_crisis = crisis;

            let result = simulate(params);
            prop_assert_eq!(result.years.len(), years as usize);
            for (index, record) in result.years.iter().enumerate() {
                prop_assert_eq!(record.year, index as u32 + 1);
            }
        }

        #[test]
        fn prop_variable_beats_mixed_beats_fixed_without_crisis(
            initial in 0u32..2_000_000,
            monthly in 0u32..20_000,
            return_bp in 0u32..1500,
            inflation_bp in 0u32..1000,
            years in 1u32..41
        ) {
            let base = SimulationParameters {
                initial_balance: f64::from(initial),
                monthly_contribution: f64::from(monthly),
                annual_return_rate: f64::from(return_bp) / 100.0,
                annual_inflation_rate: f64::from(inflation_bp) / 100.0,
                horizon_years: years,
                strategy: Strategy::Mixed,
                include_crisis: false,
            };

            let fixed = simulate(base.with_strategy(Strategy::FixedIncome));
            let variable = simulate(base.with_strategy(Strategy::VariableIncome));
            let mixed = simulate(base);

            for ((f, v), m) in fixed.years.iter().zip(&variable.years).zip(&mixed.years) {
                prop_assert!(v.accumulated_balance >= m.accumulated_balance);
                prop_assert!(m.accumulated_balance >= f.accumulated_balance);
            }
        }

        #[test]
        fn prop_crisis_only_changes_tenth_year_onwards(
            initial in 0u32..2_000_000,
            monthly in 0u32..20_000,
            return_bp in 0u32..1500,
            inflation_bp in 0u32..1000,
            years in 10u32..41,
            strategy in any::<u8>()
        ) {
            let calm = SimulationParameters {
                initial_balance: f64::from(initial),
                monthly_contribution: f64::from(monthly),
                annual_return_rate: f64::from(return_bp) / 100.0,
                annual_inflation_rate: f64::from(inflation_bp) / 100.0,
                horizon_years: years,
                strategy: strategy_from_index(strategy),
                include_crisis: false,
            };
            let stressed = SimulationParameters { include_crisis: true, ..calm };

            let calm_run = simulate(calm);
            let stressed_run = simulate(stressed);

            for year in 1..=years {
                let delta = adjusted_rate(&calm, year) - adjusted_rate(&stressed, year);
                let expected = if year % 10 == 0 { CRISIS_RATE_PENALTY } else { 0.0 };
                prop_assert!((delta - expected).abs() <= 1e-9);
            }

            for index in 0..9 {
                prop_assert_eq!(
                    calm_run.years[index].accumulated_balance.to_bits(),
                    stressed_run.years[index].accumulated_balance.to_bits()
                );
            }

            let year_nine = calm_run.years[8].accumulated_balance;
            let expected_year_ten = year_nine
                * real_growth_factor(adjusted_rate(&stressed, 10), stressed.annual_inflation_rate)
                + stressed.annual_contribution();
            let actual_year_ten = stressed_run.years[9].accumulated_balance;
            prop_assert!((actual_year_ten - expected_year_ten).abs() <= 1e-6 * expected_year_ten.abs().max(1.0));
        }

        #[test]
        fn prop_monthly_pension_is_final_balance_over_240(
            initial in 0u32..2_000_000,
            monthly in 0u32..20_000,
            years in 1u32..41,
            strategy in any::<u8>(),
            crisis in any::<bool>()
        ) {
            let mut params = sample_params();
            params.initial_balance = f64::from(initial);
            params.monthly_contribution = f64::from(monthly);
            params.horizon_years = years;
            params.strategy = strategy_from_index(strategy);
            params.include_crisis = crisis;

            let result = simulate(params);
            let last = result.years.last().map(|r| r.accumulated_balance).unwrap_or(f64::NAN);
            prop_assert_eq!(last.to_bits(), result.final_balance.to_bits());
            prop_assert!((result.estimated_monthly_pension - last / 240.0).abs() <= 1e-9 * last.abs().max(1.0));
        }
    }
}
