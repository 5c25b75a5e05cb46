use cube_sim::{Algorithm, Axis, Cube};
use log::info;

const SCRAMBLE: &str = "R' U' F D2 L2 F R2 U2 R2 B D2 L2 F' D R' U B L' F2 R' F' U' R' U' F";

fn cube(text: &str) -> Cube {
    Cube::from(&Algorithm::parse(text).unwrap())
}

#[test_log::test]
fn scramble_is_not_reduced() {
    let cube = cube(SCRAMBLE);
    info!("{}", cube.to_facelet_string());

    assert!(cube.edge_orientation_status().is_empty());
    assert!(cube.domino_reduction_status().is_empty());
    assert!(!cube.is_half_turn_reduction_solved());
    assert!(!cube.best_placement().is_solved());
}

#[test_log::test]
fn scramble_then_inverse_is_solved() {
    let scramble = Algorithm::parse(SCRAMBLE).unwrap();

    let mut cube = Cube::from(&scramble);
    cube.twist(&scramble.inverse());
    assert!(cube.is_solved());

    // An inverse section applies its moves inverted and in reverse
    let mut niss = Cube::from(&scramble);
    niss.twist(&Algorithm::parse(&format!("({SCRAMBLE})")).unwrap());
    assert!(niss.is_solved());
}

#[test_log::test]
fn domino_reduction_sequences() {
    for text in ["U R2 F2 U", "U R2 U B2 U2 F2 D", "U D"] {
        assert_eq!(cube(text).domino_reduction_status(), [Axis::Ud], "{text}");
        assert!(!cube(text).is_half_turn_reduction_solved(), "{text}");
    }

    for text in ["R2 U2 F2", "R2 U2 F2 L2 D2 B2 R2"] {
        assert!(cube(text).is_half_turn_reduction_solved(), "{text}");
    }
}

#[test_log::test]
fn rotated_domino_reduction_is_still_found() {
    assert_eq!(cube("U R2 F2 U x").domino_reduction_status(), [Axis::Ud]);
}
