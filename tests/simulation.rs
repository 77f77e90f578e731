use core::num::NonZeroUsize;
use dna_sat::sat::assignment::Assignment;
use dna_sat::sat::cnf::Cnf;
use dna_sat::sat::dimacs::{parse_dimacs, parse_text};
use dna_sat::sat::library::EXAMPLES;
use dna_sat::simulation::engine::deduplicate;
use dna_sat::simulation::operators::{amplify, select_by_clause};
use dna_sat::simulation::population::{generate_full, generate_sample};
use dna_sat::simulation::rng::RngKind;
use dna_sat::simulation::strand::Population;
use dna_sat::simulation::{GenerationMode, SimulationConfig, Step, StepKind, simulate};
use rustc_hash::FxHashSet;

fn cnf(clauses: &[&[i32]], num_vars: usize) -> Cnf {
    Cnf::new(clauses.iter().map(|c| c.iter().copied()), num_vars).unwrap()
}

fn factor(k: usize) -> NonZeroUsize {
    NonZeroUsize::new(k).unwrap()
}

fn kinds(steps: &[Step]) -> Vec<&'static str> {
    steps.iter().map(|s| s.kind().name()).collect()
}

#[test]
fn full_enumeration_is_complete_and_distinct() {
    for n in 1..=15 {
        let pool = generate_full(n);
        assert_eq!(pool.len(), 1 << n);
        let distinct: FxHashSet<&[_]> = pool.iter().map(|s| s.tokens()).collect();
        assert_eq!(distinct.len(), 1 << n, "n = {n}");
    }
}

#[test]
fn sampling_is_reproducible() {
    let size = factor(500);
    let a = generate_sample(9, size, 2024);
    let b = generate_sample(9, size, 2024);
    let render = |p: &dna_sat::simulation::strand::StrandPool| {
        p.iter().map(ToString::to_string).collect::<Vec<_>>()
    };
    assert_eq!(render(&a), render(&b));
    assert_eq!(a.len(), 500);
}

#[test]
fn selection_never_grows_the_population() {
    let pool = generate_sample(6, factor(300), 3);
    let formula = cnf(&[&[1, -2, 3], &[-4], &[5, 6], &[-1, -6], &[2, 4, -5]], 6);
    let mut pop: Population = pool.ids().collect();
    for clause in formula.iter() {
        let next = select_by_clause(&pool, &pop, clause);
        assert!(next.len() <= pop.len());
        assert!(next.iter().all(|&id| pool[id].satisfies(clause)));
        pop = next;
    }
}

#[test]
fn amplification_repeats_in_order() {
    let pool = generate_full(3);
    let pop: Population = pool.ids().rev().collect();
    for k in 1..=4 {
        let out = amplify(&pop, factor(k));
        assert_eq!(out.len(), pop.len() * k);
        for (i, &id) in out.iter().enumerate() {
            assert_eq!(pool[id], pool[pop[i / k]]);
        }
    }
}

#[test]
fn deduplication_counts_distinct_sequences() {
    let pool = generate_sample(4, factor(200), 11);
    let pop: Population = pool.ids().collect();
    let assignments = deduplicate(&pool, &pop);
    let distinct: FxHashSet<&[_]> = pool.iter().map(|s| s.tokens()).collect();

    assert!(assignments.len() <= pop.len());
    assert_eq!(assignments.len(), distinct.len());
    assert!(assignments.len() <= 16);

    let amplified = amplify(&pop, factor(3));
    assert_eq!(deduplicate(&pool, &amplified), assignments);
}

#[test]
fn two_variable_formula_has_one_model() {
    let formula = cnf(&[&[1, 2], &[-1, -2], &[1, -2]], 2);
    let config = SimulationConfig::default().with_amplification_factor(factor(1));
    let result = simulate(&formula, config);

    assert!(result.satisfiable());
    assert_eq!(result.assignments().len(), 1);
    let model = &result.assignments()[0];
    assert_eq!(model.get(1), Some(true));
    assert_eq!(model.get(2), Some(false));

    let by_hand: Vec<Assignment> = [[false, false], [true, false], [false, true], [true, true]]
        .into_iter()
        .map(|v| Assignment::new(v.to_vec()))
        .filter(|a| formula.verify(a))
        .collect();
    assert_eq!(by_hand, result.assignments());
}

#[test]
fn contradiction_empties_the_population() {
    let formula = cnf(&[&[1], &[-1]], 1);
    let result = simulate(&formula, SimulationConfig::default());

    assert!(!result.satisfiable());
    assert_eq!(result.final_population_size(), 0);
    assert!(result.assignments().is_empty());
    assert_eq!(result.steps().last().map(Step::size), Some(0));
}

#[test]
fn sizes_shrink_on_select_and_double_on_amplify() {
    let formula = cnf(&[&[1, 2, 3], &[-1, -2], &[-2, -3], &[1, -3]], 3);
    let result = simulate(&formula, SimulationConfig::default().with_amplification_factor(factor(2)));

    assert!(result.satisfiable());
    assert!(!result.assignments().is_empty());
    for pair in result.steps().windows(2) {
        let (before, after) = (&pair[0], &pair[1]);
        match after.kind() {
            StepKind::Select { .. } => assert!(after.size() <= before.size()),
            StepKind::Amplify { .. } => assert_eq!(after.size(), before.size() * 2),
            StepKind::Init { .. } => panic!("init must come first"),
        }
    }
    for a in result.assignments() {
        assert!(formula.verify(a));
    }
}

#[test]
fn trace_shape_holds_for_every_example() {
    for example in EXAMPLES {
        let formula = example.to_cnf().unwrap();
        for k in [1, 2, 3] {
            let result = simulate(
                &formula,
                SimulationConfig::default().with_amplification_factor(factor(k)),
            );
            let steps = result.steps();
            assert!(steps.len() <= 1 + 2 * formula.len(), "{}", example.name);
            assert_eq!(kinds(steps)[0], "init");
            assert_eq!(
                kinds(steps).iter().filter(|&&name| name == "init").count(),
                1,
                "{}",
                example.name
            );

            let mut expected_clause = 0;
            let mut i = 1;
            while i < steps.len() {
                let StepKind::Select { clause_index, .. } = steps[i].kind() else {
                    panic!("{}: expected select at step {i}", example.name);
                };
                assert_eq!(*clause_index, expected_clause);
                expected_clause += 1;
                if steps[i].size() == 0 {
                    assert_eq!(i, steps.len() - 1, "nothing follows an empty population");
                    break;
                }
                i += 1;
                if k > 1 {
                    assert_eq!(steps[i].kind().name(), "amplify");
                    i += 1;
                }
            }
            assert!(steps.iter().enumerate().all(|(n, s)| s.index() == n));
        }
    }
}

#[test]
fn sampled_runs_are_deterministic_and_sound() {
    let formula = EXAMPLES
        .iter()
        .find(|e| e.name == "largesat")
        .unwrap()
        .to_cnf()
        .unwrap();
    for rng in [RngKind::Lcg, RngKind::Fastrand] {
        let config = SimulationConfig::default()
            .with_mode(GenerationMode::Sample)
            .with_sample_size(factor(256))
            .with_seed(7)
            .with_rng(rng);
        let a = simulate(&formula, config);
        let b = simulate(&formula, config);

        assert_eq!(a.assignments(), b.assignments());
        assert_eq!(
            a.steps().iter().map(Step::size).collect::<Vec<_>>(),
            b.steps().iter().map(Step::size).collect::<Vec<_>>()
        );
        assert!(!a.exhaustive());
        assert!(a.assignments().iter().all(|m| formula.verify(m)));
    }
}

#[test]
fn text_input_runs_end_to_end() {
    let formula = parse_text("1 2 3\n-1 -2\n-2 -3\n1 -3", None).unwrap();
    let result = simulate(&formula, SimulationConfig::default());
    let models: Vec<Vec<i32>> = result.assignments().iter().map(Assignment::to_literals).collect();
    assert_eq!(models, vec![vec![1, -2, -3], vec![-1, 2, -3], vec![1, -2, 3]]);
}

#[test]
fn dimacs_clauses_sharing_a_line_keep_their_verdict() {
    let formula = parse_dimacs("p cnf 1 2\n1 0 -1 0\n".as_bytes(), None).unwrap();
    let result = simulate(&formula, SimulationConfig::default());
    assert_eq!(formula.len(), 2);
    assert!(!result.satisfiable());
    assert!(result.exhaustive());

    let spanning = parse_dimacs("p cnf 3 1\n1 2\n3 0\n".as_bytes(), None).unwrap();
    let result = simulate(&spanning, SimulationConfig::default());
    assert_eq!(spanning.len(), 1);
    assert_eq!(result.assignments().len(), 7);
}
