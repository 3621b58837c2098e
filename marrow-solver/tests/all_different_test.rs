#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

use marrow_solver::constraints;
use marrow_solver::constraints::AllDifferentConsistency;
use marrow_solver::rand::rngs::SmallRng;
use marrow_solver::rand::Rng;
use marrow_solver::rand::SeedableRng;
use marrow_solver::variables::DomainId;
use marrow_solver::Solver;

const MAX_VALUE: i32 = 6;

/// A non-empty random subset of `0..=MAX_VALUE` for every variable.
fn random_domains(rng: &mut SmallRng) -> Vec<Vec<i32>> {
    let num_variables = rng.gen_range(2..=5);
    (0..num_variables)
        .map(|_| loop {
            let values = (0..=MAX_VALUE)
                .filter(|_| rng.gen_bool(0.45))
                .collect::<Vec<_>>();
            if !values.is_empty() {
                break values;
            }
        })
        .collect()
}

/// The root domains after posting the all-different constraint, or `None` on a root conflict.
fn root_fixpoint(
    domains: &[Vec<i32>],
    consistency: AllDifferentConsistency,
) -> Option<Vec<Vec<i32>>> {
    let mut solver = Solver::default();
    let variables = domains
        .iter()
        .map(|values| solver.new_sparse_integer(values.clone()))
        .collect::<Vec<DomainId>>();

    solver
        .add_constraint(constraints::all_different(variables.clone(), consistency))
        .post()
        .ok()?;

    Some(
        variables
            .iter()
            .map(|variable| {
                (0..=MAX_VALUE)
                    .filter(|&value| solver.contains(variable, value))
                    .collect()
            })
            .collect(),
    )
}

/// For every variable, the values it takes in some solution.
fn supported_values(domains: &[Vec<i32>]) -> Vec<Vec<i32>> {
    fn extend(
        domains: &[Vec<i32>],
        assignment: &mut Vec<i32>,
        supported: &mut [Vec<i32>],
    ) {
        if assignment.len() == domains.len() {
            for (values, &value) in supported.iter_mut().zip(assignment.iter()) {
                if !values.contains(&value) {
                    values.push(value);
                }
            }
            return;
        }

        for &value in &domains[assignment.len()] {
            if !assignment.contains(&value) {
                assignment.push(value);
                extend(domains, assignment, supported);
                let _ = assignment.pop();
            }
        }
    }

    let mut supported = vec![Vec::new(); domains.len()];
    extend(domains, &mut Vec::new(), &mut supported);
    for values in supported.iter_mut() {
        values.sort_unstable();
    }
    supported
}

#[test]
fn pairwise_and_value_consistency_reach_the_same_fixpoint() {
    let mut rng = SmallRng::seed_from_u64(7);

    for _ in 0..300 {
        let domains = random_domains(&mut rng);

        assert_eq!(
            root_fixpoint(&domains, AllDifferentConsistency::Pairwise),
            root_fixpoint(&domains, AllDifferentConsistency::Value),
            "domains {domains:?}"
        );
    }
}

#[test]
fn no_consistency_removes_a_supported_value() {
    let mut rng = SmallRng::seed_from_u64(13);

    for _ in 0..300 {
        let domains = random_domains(&mut rng);
        let supported = supported_values(&domains);
        let has_solution = supported.iter().all(|values| !values.is_empty());

        for consistency in [
            AllDifferentConsistency::Pairwise,
            AllDifferentConsistency::Value,
            AllDifferentConsistency::Bounds,
        ] {
            match root_fixpoint(&domains, consistency) {
                Some(fixpoint) => {
                    for (kept, needed) in fixpoint.iter().zip(supported.iter()) {
                        assert!(
                            needed.iter().all(|value| kept.contains(value)),
                            "{consistency:?} removed a supported value from {domains:?}"
                        );
                    }
                }
                None => assert!(
                    !has_solution,
                    "{consistency:?} failed on the satisfiable {domains:?}"
                ),
            }
        }
    }
}

#[test]
fn bounds_consistency_detects_a_hall_interval() {
    let domains = [vec![1, 2], vec![1, 2], vec![1, 2, 3]];

    assert_eq!(
        Some(vec![vec![1, 2], vec![1, 2], vec![3]]),
        root_fixpoint(&domains, AllDifferentConsistency::Bounds)
    );
    assert_eq!(
        Some(domains.to_vec()),
        root_fixpoint(&domains, AllDifferentConsistency::Value)
    );
}

#[test]
fn bounds_consistency_detects_pigeonholes() {
    let domains = [vec![0, 1], vec![0, 1], vec![0, 1]];

    assert_eq!(None, root_fixpoint(&domains, AllDifferentConsistency::Bounds));
    assert!(root_fixpoint(&domains, AllDifferentConsistency::Pairwise).is_some());
}
