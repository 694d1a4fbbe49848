mod common;

use checkerbot::search::eval::{score, Evaluate, Material, MAX_SCORE, WIN_SCORE};
use checkerbot::{Board, EngineError, ScoringMode, Side};
use common::board;

fn close(a: f64, b: f64) -> bool { (a - b).abs() < 1e-9 }

#[test]
fn startpos_is_balanced_in_both_modes() {
    let b = Board::startpos();
    for mode in [ScoringMode::NumberOnly, ScoringMode::NumberAndPotential] {
        assert!(close(score(&b, Side::White, mode), 1.0));
        assert!(close(score(&b, Side::Black, mode), 1.0));
    }
}

#[test]
fn wiped_out_side_gets_the_max_sentinel_and_the_other_zero() {
    let b = board("
        ........
        ........
        ........
        ........
        ........
        w.......
        .w......
        w.......");
    for mode in [ScoringMode::NumberOnly, ScoringMode::NumberAndPotential] {
        assert_eq!(score(&b, Side::Black, mode), MAX_SCORE);
        assert_eq!(score(&b, Side::White, mode), WIN_SCORE);
    }
}

#[test]
fn king_weight_depends_on_mode() {
    let b = board("
        ........
        ........
        .b.b....
        ........
        ........
        ........
        ........
        W.......");
    let plain = Material::new(ScoringMode::NumberOnly);
    assert!(close(plain.score(&b, Side::White), 2.0 / 4.0));
    assert!(close(plain.score(&b, Side::Black), 4.0 / 2.0));
    let potential = Material::new(ScoringMode::NumberAndPotential);
    // Black men on row 2 have advanced two rows each.
    assert!(close(potential.strength(&b, Side::Black), 2.0 * 1.1));
    assert!(close(potential.strength(&b, Side::White), 5.0));
}

#[test]
fn advanced_men_count_for_more_under_potential_scoring() {
    let b = board("
        ........
        ..b.....
        ........
        .w......
        ........
        ........
        ........
        ........");
    assert!(close(score(&b, Side::White, ScoringMode::NumberOnly), 1.0));
    // white: 1 + 0.05 * 4, black: 1 + 0.05 * 1
    assert!(close(score(&b, Side::White, ScoringMode::NumberAndPotential), 1.05 / 1.2));
    let white = score(&b, Side::White, ScoringMode::NumberAndPotential);
    let black = score(&b, Side::Black, ScoringMode::NumberAndPotential);
    assert!(white < black);
}

#[test]
fn unknown_scoring_mode_is_a_configuration_error() {
    assert_eq!("NumberAndPotential".parse::<ScoringMode>().unwrap(), ScoringMode::NumberAndPotential);
    assert!(matches!("Fancy".parse::<ScoringMode>(), Err(EngineError::Configuration(_))));
}
