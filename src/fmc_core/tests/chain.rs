use cube_sim::{Algorithm, Cube};
use fmc_core::{
    ChainInsertion, MoveCount, Phase, SolutionForm,
    accounting::account,
    chain::{Scramble, ScrambleId, SubmissionId, SubmissionStore, compute_contribution, flatten_phases},
    dr::describe,
    legality::check_boundary,
    phase::classify,
};
use log::info;

const SCRAMBLE: &str = "R2 B2 D2 L2 F2 U2 R2 U F2 R2 U' R U' R' F'";

const STAGES: [(&str, Phase); 4] = [
    ("F // eo", Phase::Eo),
    ("R U R' // dr", Phase::Dr),
    ("U R2 F2 U // htr", Phase::Htr),
    ("U2 R2 U2 F2 L2 D2 B2 R2", Phase::Finished),
];

fn scramble() -> Scramble {
    Scramble {
        id: ScrambleId(7),
        scramble: SCRAMBLE.to_owned(),
    }
}

fn regular(solution: &str) -> SolutionForm {
    SolutionForm::Regular {
        solution: solution.to_owned(),
    }
}

fn build_chain() -> (SubmissionStore, Option<SubmissionId>) {
    let mut store = SubmissionStore::new();
    let mut leaf = None;

    for (solution, phase) in STAGES {
        leaf = Some(store.insert(ScrambleId(7), leaf, solution, phase).unwrap());
    }

    (store, leaf)
}

#[test_log::test]
fn every_stage_reaches_its_phase() {
    let (store, _) = build_chain();
    let mut tree = None;

    for (i, (solution, phase)) in STAGES.into_iter().enumerate() {
        let computed = compute_contribution(&scramble(), &store, tree, &regular(solution)).unwrap();
        info!("{solution:?}: {} {}", computed.phase, computed.status);

        assert_eq!(computed.phase, phase, "{solution}");
        tree = Some(SubmissionId(i));
    }
}

#[test_log::test]
fn flattened_chain() {
    let (store, leaf) = build_chain();
    let phases = flatten_phases(&store, &scramble(), leaf).unwrap();

    let rows = phases
        .iter()
        .map(|entry| {
            (
                entry.phase,
                entry.status.as_str(),
                entry.accounting.moves.to_string(),
                entry.accounting.cumulative_moves.to_string(),
                entry.accounting.cancel_moves.to_string(),
            )
        })
        .collect::<Vec<_>>();

    let row = |phase, status, moves: &str, cumulative: &str, cancel: &str| {
        (
            phase,
            status,
            moves.to_owned(),
            cumulative.to_owned(),
            cancel.to_owned(),
        )
    };

    assert_eq!(
        rows,
        [
            row(Phase::Eo, "FB", "1", "1", "0"),
            row(Phase::Dr, "UD", "3", "4", "0"),
            row(Phase::Htr, "", "4", "8", "0"),
            row(Phase::Finished, "", "8", "15", "1"),
        ]
    );
}

#[test_log::test]
fn boundaries_of_the_chain() {
    let legal = STAGES[..3]
        .iter()
        .map(|&(solution, phase)| {
            let algorithm = fmc_core::notation::parse(solution).unwrap();
            check_boundary(phase, &algorithm).unwrap()
        })
        .collect::<Vec<_>>();

    // R U R' ends on a counter-clockwise quarter turn
    assert_eq!(legal, [true, false, true]);
}

#[test_log::test]
fn oriented_edges_after_r_u_r_prime_u_prime() {
    let cube = Cube::from(&Algorithm::parse("R U R' U'").unwrap());

    // The state is edge oriented on FB, so it is not left scrambled
    assert_eq!(classify(&cube), Phase::Eo);
    assert_eq!(classify(&Cube::from(&Algorithm::parse("R U F").unwrap())), Phase::Scrambled);
}

#[test_log::test]
fn full_cancellation() {
    let contribution = account("R U", &regular("U' R'")).unwrap();

    assert_eq!(contribution.accounting.moves, MoveCount::from_hundredths(200));
    assert_eq!(contribution.accounting.cumulative_moves, MoveCount::ZERO);
    assert_eq!(contribution.accounting.cancel_moves, MoveCount::from_hundredths(400));
    assert!(contribution.skeleton.is_empty());
}

#[test_log::test]
fn parity_dr_with_two_bad_corners() {
    let description = describe(&Cube::from(&Algorithm::parse("U R2 U R2 U").unwrap()));

    assert_eq!(description.corners, 2);
    assert!(description.parity);
    assert_eq!(description.quarter_turns, 3);
}

#[test_log::test]
fn insertion_into_a_skeleton() {
    let contribution = account(
        "R U R' U'",
        &SolutionForm::Insertions {
            insertions: vec![ChainInsertion {
                skeleton: "R U R' U'".to_owned(),
                insert_place: 2,
                insertion: "D".to_owned(),
            }],
            inverse: false,
        },
    )
    .unwrap();

    assert_eq!(contribution.accounting.moves.hundredths(), 100);
    assert_eq!(contribution.accounting.cumulative_moves.hundredths(), 500);
    assert_eq!(contribution.accounting.cancel_moves.hundredths(), 0);
    assert_eq!(contribution.skeleton.to_string(), "R U D R' U'");
}
