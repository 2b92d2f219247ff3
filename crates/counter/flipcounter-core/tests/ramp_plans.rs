use flipcounter_core::{plan_ramp, RampPlan};
use flipcounter_test_fixtures::ramps;

/// it should reproduce every recorded planning scenario exactly
#[test]
fn fixture_scenarios_plan_as_recorded() {
    let mut names = ramps::keys();
    names.sort();
    assert!(!names.is_empty(), "manifest lists ramp fixtures");

    for name in names {
        let scenario = ramps::scenario(&name).expect("fixture loads");
        let plan = plan_ramp(
            scenario.start,
            scenario.target,
            scenario.pace_ms,
            scenario.duration_s,
        )
        .unwrap_or_else(|| panic!("fixture '{name}' has a positive diff"));
        assert_eq!(
            plan,
            RampPlan {
                increment: scenario.expect.increment,
                pace_ms: scenario.expect.pace_ms,
                cycles_remaining: scenario.expect.cycles,
            },
            "fixture '{name}'"
        );
    }
}

#[test]
fn a_plan_always_exists_for_positive_diffs() {
    for target in [1i64, 2, 5, 17, 97, 100, 999, 12345] {
        for pace in [10u64, 80, 250, 500, 2000] {
            for duration in [1u64, 5, 10, 60] {
                let plan = plan_ramp(0, target, pace, duration);
                assert!(
                    plan.is_some(),
                    "no plan for target={target} pace={pace} duration={duration}"
                );
            }
        }
    }
}

#[test]
fn planned_pace_never_undercuts_the_desired_pace() {
    // The search only ever raises the pace from its initial guess.
    for target in [3i64, 40, 97, 500] {
        for pace in [50u64, 300, 700] {
            let plan = plan_ramp(0, target, pace, 10).expect("positive diff");
            assert!(plan.pace_ms >= pace);
        }
    }
}

/// it should absorb degenerate pace/duration pairs instead of failing
#[test]
fn zero_pace_and_zero_duration_still_produce_a_plan() {
    let plan = plan_ramp(0, 10, 0, 0).expect("positive diff always plans");
    assert!(plan.pace_ms >= 1);
    assert!(plan.increment >= 1);
}

#[test]
fn absurd_durations_do_not_overflow_the_budget() {
    assert!(plan_ramp(0, 10, 500, u64::MAX).is_some());
}

#[test]
fn raw_fixture_json_carries_the_expected_shape() {
    let raw = ramps::json("even-split").expect("fixture reads");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("fixture parses");
    assert_eq!(value["expect"]["increment"], 10);
    assert_eq!(value["expect"]["pace_ms"], 500);
    assert_eq!(value["expect"]["cycles"], 10);
}

#[test]
fn backwards_and_zero_diffs_are_rejected() {
    assert_eq!(plan_ramp(100, 100, 500, 5), None);
    assert_eq!(plan_ramp(100, 20, 500, 5), None);
}

#[test]
fn planned_cycles_reach_close_to_the_target() {
    // Within the hard-acceptance constraints the plan lands within 5 of
    // the diff without overshooting.
    let plan = plan_ramp(0, 97, 500, 5).expect("positive diff");
    let reach = plan.increment * i64::from(plan.cycles_remaining);
    assert!(reach <= 97);
    assert!((97 - reach).abs() <= 5);
    assert!(u64::from(plan.cycles_remaining) * plan.pace_ms <= 5000);
}
