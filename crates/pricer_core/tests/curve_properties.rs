//! Property-based tests for survival and discount curves.

use pricer_core::market_data::curves::{CreditCurve, DiscountCurve, FlatCurve, SurvivalCurve};
use proptest::prelude::*;

/// Strategy: 1..8 segments with positive durations and hazards in [0, 2].
fn survival_curve() -> impl Strategy<Value = SurvivalCurve<f64>> {
    prop::collection::vec((0.05_f64..5.0, 0.0_f64..2.0), 1..8).prop_map(|pillars| {
        let mut curve = SurvivalCurve::new();
        let mut end = 0.0;
        for (duration, hazard) in pillars {
            end += duration;
            curve
                .append_segment(end, hazard)
                .expect("strategy builds increasing segments");
        }
        curve
    })
}

proptest! {
    #[test]
    fn survival_is_one_at_origin(curve in survival_curve()) {
        prop_assert_eq!(curve.survival_probability(0.0).unwrap(), 1.0);
    }

    #[test]
    fn survival_is_bounded_and_non_increasing(
        curve in survival_curve(),
        mut times in prop::collection::vec(0.0_f64..60.0, 2..20),
    ) {
        times.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let mut prev = 1.0;
        for t in times {
            let s = curve.survival_probability(t).unwrap();
            prop_assert!((0.0..=1.0).contains(&s));
            prop_assert!(s <= prev + 1e-15);
            prev = s;
        }
    }

    #[test]
    fn appending_never_changes_earlier_survival(
        curve in survival_curve(),
        extra in 0.1_f64..5.0,
        hazard in 0.0_f64..1.0,
        fraction in 0.0_f64..1.0,
    ) {
        let horizon = curve.horizon().unwrap();
        let extended = curve.with_segment(horizon + extra, hazard).unwrap();
        let t = horizon * fraction;
        prop_assert_eq!(
            curve.survival_probability(t).unwrap(),
            extended.survival_probability(t).unwrap()
        );
    }

    #[test]
    fn flat_discount_factor_in_unit_interval(rate in 0.0_f64..0.2, t in 0.0_f64..50.0) {
        let df = FlatCurve::new(rate).discount_factor(t).unwrap();
        prop_assert!(df > 0.0 && df <= 1.0);
    }
}
