//! End-to-end dispatch scenarios exercising the full
//! build-solve-extract pipeline.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use dispatch_optimizer::{solve, BatteryParameters, CostParameters, DispatchSchedule};
use rstest::rstest;

// Solver feasibility tolerance is 1e-6; assertions leave headroom.
const EPS: f64 = 1e-3;

fn lossless_battery(input_soc: f64, final_soc: f64, time_frequency_h: f64) -> BatteryParameters {
    BatteryParameters {
        capacity_mw: 1.0,
        volume_mwh: 1.0,
        efficiency: 1.0,
        input_soc,
        final_soc,
        time_frequency_h,
    }
}

fn free_costs() -> CostParameters {
    CostParameters {
        charge_cost: 0.0,
        discharge_cost: 0.0,
        activation: 0.0,
    }
}

fn assert_schedule_invariants(schedule: &DispatchSchedule, battery: &BatteryParameters) {
    for (i, soc) in schedule.soc_fraction.iter().enumerate() {
        assert!(
            (-EPS..=1.0 + EPS).contains(soc),
            "soc fraction out of [0,1] at period {}: {}",
            i,
            soc
        );
    }
    for (i, c) in schedule.charge_mw.iter().enumerate() {
        assert!(
            (-EPS..=battery.capacity_mw + EPS).contains(c),
            "charge out of bounds at period {}: {}",
            i,
            c
        );
    }
    for (i, d) in schedule.discharge_mw.iter().enumerate() {
        assert!(
            (-EPS..=battery.capacity_mw + EPS).contains(d),
            "discharge out of bounds at period {}: {}",
            i,
            d
        );
    }
    assert_abs_diff_eq!(schedule.soc_fraction[0], battery.input_soc, epsilon = EPS);
    assert_abs_diff_eq!(
        *schedule.soc_fraction.last().unwrap(),
        battery.final_soc,
        epsilon = EPS
    );
    assert_abs_diff_eq!(*schedule.discharge_mw.last().unwrap(), 0.0, epsilon = EPS);
}

#[test]
fn generic_scenario_honors_all_invariants() {
    let battery = BatteryParameters::default();
    let costs = CostParameters {
        charge_cost: 1.0,
        discharge_cost: 1.0,
        activation: 1.0,
    };
    let prices = [20.0, 60.0, 15.0, 55.0, 30.0, 45.0];

    let schedule = solve(&battery, &costs, &prices).unwrap();
    assert!(
        schedule.diagnostics.success,
        "solver failed: {}",
        schedule.diagnostics.message
    );
    assert_schedule_invariants(&schedule, &battery);
}

#[rstest]
#[case(10.0)]
#[case(30.0)]
#[case(100.0)]
fn flat_prices_with_positive_costs_stay_idle(#[case] price: f64) {
    let battery = BatteryParameters::default();
    let costs = CostParameters::default();
    let prices = vec![price; 6];

    let schedule = solve(&battery, &costs, &prices).unwrap();
    assert!(
        schedule.diagnostics.success,
        "solver failed: {}",
        schedule.diagnostics.message
    );

    for i in 0..prices.len() {
        assert_abs_diff_eq!(schedule.charge_mw[i], 0.0, epsilon = EPS);
        assert_abs_diff_eq!(schedule.discharge_mw[i], 0.0, epsilon = EPS);
        assert_abs_diff_eq!(schedule.soc_fraction[i], battery.input_soc, epsilon = EPS);
    }
    assert_abs_diff_eq!(schedule.diagnostics.objective, 0.0, epsilon = 1e-2);
}

#[test]
fn alternating_prices_capture_the_spread() {
    let battery = lossless_battery(0.0, 0.0, 0.5);
    let prices = [10.0, 50.0, 10.0, 50.0];

    let schedule = solve(&battery, &free_costs(), &prices).unwrap();
    assert!(
        schedule.diagnostics.success,
        "solver failed: {}",
        schedule.diagnostics.message
    );
    assert_schedule_invariants(&schedule, &battery);

    // Fill at the cheap opening period, dump into the first expensive one;
    // the final expensive period is blocked by the no-final-discharge rule.
    assert!(
        schedule.charge_mw[0] > 0.9,
        "expected full charge in period 0, got {}",
        schedule.charge_mw[0]
    );
    assert!(
        schedule.discharge_mw[1] > 0.9,
        "expected full discharge in period 1, got {}",
        schedule.discharge_mw[1]
    );
    assert!(
        schedule.diagnostics.objective < 0.0,
        "arbitrage should be profitable, objective {}",
        schedule.diagnostics.objective
    );
    // 0.5 MWh bought at 10, sold at 50
    assert_abs_diff_eq!(schedule.diagnostics.objective, -20.0, epsilon = 0.1);
}

#[test]
fn lossless_objective_matches_recomputed_cashflow() {
    let battery = lossless_battery(0.0, 0.0, 0.5);
    let prices = [10.0, 50.0, 10.0, 50.0];

    let schedule = solve(&battery, &free_costs(), &prices).unwrap();
    assert!(schedule.diagnostics.success);

    let mw_to_mwh = battery.time_frequency_h;
    let revenue: f64 = schedule
        .discharge_mw
        .iter()
        .zip(&prices)
        .map(|(d, p)| d * mw_to_mwh * p)
        .sum();
    let outlay: f64 = schedule
        .charge_mw
        .iter()
        .zip(&prices)
        .map(|(c, p)| c * mw_to_mwh * p)
        .sum();

    assert_relative_eq!(
        -schedule.diagnostics.objective,
        revenue - outlay,
        epsilon = 1e-9,
        max_relative = 1e-9
    );
}

#[test]
fn soc_recurrence_holds_at_every_transition() {
    let battery = BatteryParameters::default();
    let costs = CostParameters {
        charge_cost: 1.0,
        discharge_cost: 1.0,
        activation: 0.0,
    };
    let prices = [25.0, 70.0, 20.0, 65.0, 35.0];

    let schedule = solve(&battery, &costs, &prices).unwrap();
    assert!(schedule.diagnostics.success);

    // soc_step in volume units equals the period length in hours
    let soc_step = battery.time_frequency_h;
    for i in 0..prices.len() - 1 {
        let lhs = (schedule.soc_fraction[i + 1] - schedule.soc_fraction[i]) * battery.volume_mwh;
        let rhs = schedule.charge_mw[i] * battery.efficiency * soc_step
            - schedule.discharge_mw[i] * soc_step;
        assert_abs_diff_eq!(lhs, rhs, epsilon = 1e-4);
    }
}

#[test]
fn monotonic_prices_charge_early_discharge_late() {
    let battery = lossless_battery(0.0, 0.0, 1.0);
    let prices = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0];

    let schedule = solve(&battery, &free_costs(), &prices).unwrap();
    assert!(
        schedule.diagnostics.success,
        "solver failed: {}",
        schedule.diagnostics.message
    );
    assert_schedule_invariants(&schedule, &battery);

    // With a 1 MW / 1 MWh battery and hourly periods one full cycle fits:
    // buy the cheapest period, sell the dearest period still allowed to
    // discharge (the second-to-last).
    assert!(
        schedule.charge_mw[0] > 0.9,
        "expected charging concentrated in period 0, got {}",
        schedule.charge_mw[0]
    );
    assert!(
        schedule.discharge_mw[4] > 0.9,
        "expected discharge concentrated in period 4, got {}",
        schedule.discharge_mw[4]
    );
    // 1 MWh bought at 10 and sold at 50
    assert_abs_diff_eq!(schedule.diagnostics.objective, -40.0, epsilon = 0.1);
}

#[test]
fn volume_larger_than_one_keeps_endpoints_feasible() {
    // Regression guard for the volume-scaling of the start/end targets
    let battery = BatteryParameters {
        capacity_mw: 2.0,
        volume_mwh: 4.0,
        efficiency: 1.0,
        input_soc: 0.25,
        final_soc: 0.75,
        time_frequency_h: 1.0,
    };
    let prices = [10.0, 40.0, 5.0, 35.0, 15.0];

    let schedule = solve(&battery, &free_costs(), &prices).unwrap();
    assert!(
        schedule.diagnostics.success,
        "solver failed: {}",
        schedule.diagnostics.message
    );
    assert_schedule_invariants(&schedule, &battery);
}

#[test]
fn invalid_parameters_are_rejected_before_solving() {
    let battery = BatteryParameters {
        capacity_mw: 0.0,
        ..Default::default()
    };
    assert!(solve(&battery, &CostParameters::default(), &[1.0, 2.0]).is_err());

    let battery = BatteryParameters::default();
    assert!(solve(&battery, &CostParameters::default(), &[1.0]).is_err());
}
