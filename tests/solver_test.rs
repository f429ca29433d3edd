//! Integration tests for the fixed-point solver.

use ebsl_core::{
    equation::{synthesize_equations, EvaluationContext, ReferralContext},
    error::EbslError,
    opinion::Evidence,
    referral::{DirectReferralEvidence, Link},
    solver::{
        chebyshev_distance, euclidean_distance, solve_equations, SolverOptions, SumDistance,
    },
};
use std::{cell::Cell, rc::Rc};
use test_log::test;

fn evidence_map(entries: &[(u64, u64, f64, f64)]) -> DirectReferralEvidence {
    entries
        .iter()
        .map(|&(from, to, positive, negative)| {
            (Link::new(from, to), Evidence::new(positive, negative))
        })
        .collect()
}

fn solved_context(entries: &[(u64, u64, f64, f64)], options: SolverOptions) -> ReferralContext {
    let direct = evidence_map(entries).to_opinions(2);
    let equations = synthesize_equations(direct.links());
    let mut context = ReferralContext::new(direct);
    solve_equations(&mut context, &equations, options).unwrap();
    context
}

fn assert_final(context: &ReferralContext, expected: &[(u64, u64, f64, f64, f64)], tolerance: f64) {
    assert_eq!(context.final_opinions().len(), expected.len());
    for &(from, to, belief, disbelief, uncertainty) in expected {
        let opinion = context
            .final_opinions()
            .get(&Link::new(from, to))
            .unwrap_or_else(|| panic!("missing R[{from},{to}]"));
        assert!(
            (opinion.belief - belief).abs() < tolerance
                && (opinion.disbelief - disbelief).abs() < tolerance
                && (opinion.uncertainty - uncertainty).abs() < tolerance,
            "R[{from},{to}] = {opinion} differs from ({belief}, {disbelief}, {uncertainty})"
        );
    }
}

#[test]
fn test_convergence_with_back_edge() {
    let context = solved_context(
        &[(1, 2, 2.0, 2.0), (2, 3, 2.0, 2.0), (3, 2, 2.0, 2.0)],
        SolverOptions::default(),
    );
    assert_final(
        &context,
        &[
            (1, 2, 0.3535533905932738, 0.3535533905932738, 0.2928932188134525),
            (1, 3, 0.20710678118654752, 0.20710678118654752, 0.585786437626905),
            (2, 3, 1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0),
            (3, 2, 1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0),
        ],
        1e-12,
    );
}

#[test]
fn test_convergence_on_diamond_dag() {
    let context = solved_context(
        &[
            (1, 2, 400.0, 300.0),
            (2, 3, 10.0, 5.0),
            (3, 4, 500.0, 0.0),
            (3, 5, 500.0, 0.0),
            (4, 5, 500.0, 0.0),
            (4, 6, 500.0, 0.0),
            (5, 6, 500.0, 0.0),
            (6, 7, 5.0, 5.0),
        ],
        SolverOptions::default(),
    );
    assert_final(
        &context,
        &[
            (1, 2, 0.5698005698005698, 0.42735042735042733, 0.002849002849002849),
            (1, 3, 0.5402485143165856, 0.2701242571582928, 0.18962722852512154),
            (1, 4, 0.9926504163175847, 0.0, 0.007349583682415396),
            (1, 5, 0.9973973565077897, 0.0, 0.002602643492210305),
            (1, 6, 0.9979940300054436, 0.0, 0.0020059699945565415),
            (1, 7, 0.4165271299394158, 0.4165271299394158, 0.1669457401211684),
            (2, 3, 0.5882352941176471, 0.29411764705882354, 0.11764705882352941),
            (2, 4, 0.9932459276916965, 0.0, 0.006754072308303535),
            (2, 5, 0.9974771066695858, 0.0, 0.0025228933304143578),
            (2, 6, 0.9979947090743448, 0.0, 0.0020052909256551574),
            (2, 7, 0.4165271772550089, 0.4165271772550089, 0.16694564548998223),
            (3, 4, 0.9960159362549801, 0.0, 0.00398406374501992),
            (3, 5, 0.998000015936128, 0.0, 0.001999984063872001),
            (3, 6, 0.9979980139820138, 0.0, 0.0020019860179862087),
            (3, 7, 0.4165274075308264, 0.4165274075308264, 0.16694518493834723),
            (4, 5, 0.9960159362549801, 0.0, 0.00398406374501992),
            (4, 6, 0.998000015936128, 0.0, 0.001999984063872001),
            (4, 7, 0.4165275470202235, 0.4165275470202235, 0.16694490595955308),
            (5, 6, 0.9960159362549801, 0.0, 0.00398406374501992),
            (5, 7, 0.4163890739506996, 0.4163890739506996, 0.1672218520986009),
            (6, 7, 0.4166666666666667, 0.4166666666666667, 0.16666666666666666),
        ],
        1e-9,
    );
}

#[test]
fn test_positive_tolerance_stops_early() {
    let entries = [(1u64, 2u64, 2.0, 2.0), (2, 3, 2.0, 2.0), (3, 2, 2.0, 2.0)];
    let epochs = Rc::new(Cell::new(0usize));
    let seen = epochs.clone();

    let options = SolverOptions::default()
        .with_tolerance(1e-6)
        .on_epoch_end(move |_, _| {
            seen.set(seen.get() + 1);
            Ok(())
        });
    solved_context(&entries, options);

    let ran = epochs.get();
    assert!(ran > 0 && ran < 100, "expected early stop, ran {ran} epochs");
}

#[test]
fn test_zero_tolerance_runs_to_the_cap() {
    let entries = [(1u64, 2u64, 2.0, 2.0), (2, 3, 2.0, 2.0), (3, 2, 2.0, 2.0)];
    let epochs = Rc::new(Cell::new(0usize));
    let seen = epochs.clone();

    let options = SolverOptions::default()
        .with_max_epochs(7)
        .unwrap()
        .on_epoch_end(move |_, _| {
            seen.set(seen.get() + 1);
            Ok(())
        });
    solved_context(&entries, options);

    assert_eq!(epochs.get(), 7);
}

#[test]
fn test_zero_epoch_cap_is_rejected() {
    assert_eq!(
        SolverOptions::default().with_max_epochs(0).err(),
        Some(EbslError::EpochMustBePositive)
    );
}

#[test]
fn test_epoch_start_callback_cancels_the_solve() {
    let direct = evidence_map(&[(1, 2, 2.0, 2.0), (2, 3, 2.0, 2.0)]).to_opinions(2);
    let equations = synthesize_equations(direct.links());
    let mut context = ReferralContext::new(direct);

    let options = SolverOptions::default().on_epoch_start(|epoch| {
        if epoch > 2 {
            Err(EbslError::Cancelled("enough".to_string()))
        } else {
            Ok(())
        }
    });
    let result = solve_equations(&mut context, &equations, options);

    assert_eq!(result, Err(EbslError::Cancelled("enough".to_string())));
    // Two full epochs ran before the abort, so R is populated.
    assert_eq!(context.final_opinions().len(), equations.len());
}

#[test]
fn test_epoch_end_callback_observes_decreasing_error() {
    let entries = [(1u64, 2u64, 2.0, 2.0), (2, 3, 2.0, 2.0), (3, 2, 2.0, 2.0)];
    let errors = Rc::new(Cell::new(Vec::new()));
    let sink = errors.clone();

    let options = SolverOptions::default()
        .with_max_epochs(10)
        .unwrap()
        .on_epoch_end(move |_, error| {
            let mut seen = sink.take();
            seen.push(error);
            sink.set(seen);
            Ok(())
        });
    solved_context(&entries, options);

    let seen = errors.take();
    assert_eq!(seen.len(), 10);
    assert!(
        seen.last().unwrap() < seen.first().unwrap(),
        "epoch error should shrink: {seen:?}"
    );
}

#[test]
fn test_alternative_distances_reach_the_same_fixed_point() {
    let entries = [(1u64, 2u64, 2.0, 2.0), (2, 3, 2.0, 2.0), (3, 2, 2.0, 2.0)];
    let baseline = solved_context(&entries, SolverOptions::default());

    for options in [
        SolverOptions::default().with_distance(chebyshev_distance),
        SolverOptions::default().with_distance(euclidean_distance),
        SolverOptions::default().with_aggregator(SumDistance::default()),
    ] {
        let context = solved_context(&entries, options);
        for (link, opinion) in context.final_opinions().iter() {
            let reference = baseline.final_opinions().get(link).unwrap();
            assert!(
                (opinion.belief - reference.belief).abs() < 1e-9,
                "distance variant diverged on {link}"
            );
        }
    }
}

#[test]
fn test_custom_discount_policy_is_honored() {
    struct Pessimistic(ReferralContext);

    impl EvaluationContext for Pessimistic {
        fn direct(&self, link: &Link) -> Result<ebsl_core::opinion::Opinion, EbslError> {
            self.0.direct(link)
        }
        fn final_referral(&self, link: &Link) -> ebsl_core::opinion::Opinion {
            self.0.final_referral(link)
        }
        fn discount(&self, opinion: &ebsl_core::opinion::Opinion) -> f64 {
            (opinion.belief - opinion.disbelief).max(0.0)
        }
    }

    let direct = evidence_map(&[(1, 2, 4.0, 1.0)]).to_opinions(2);
    let context = Pessimistic(ReferralContext::new(direct));

    let opinion = context.direct(&Link::new(1, 2)).unwrap();
    let alpha = context.discount(&opinion);
    assert!((alpha - (opinion.belief - opinion.disbelief)).abs() < 1e-12);
}
