mod common;

use checkerbot::movegen::{has_capture, legal_turns};
use checkerbot::{apply_move, legal_moves, legal_moves_for_square, Board, Move, Side};
use common::{board, random_positions, sq};
use pretty_assertions::assert_eq;

fn sorted(mut moves: Vec<Move>) -> Vec<String> {
    let mut names: Vec<String> = moves.drain(..).map(|m| m.to_string()).collect();
    names.sort();
    names
}

#[test]
fn startpos_white_has_seven_forward_steps() {
    let set = legal_moves(&Board::startpos(), Side::White);
    assert!(!set.must_capture);
    assert_eq!(
        sorted(set.moves),
        vec!["a3-b4", "c3-b4", "c3-d4", "e3-d4", "e3-f4", "g3-f4", "g3-h4"]
    );
    assert_eq!(set_origins_rows(&Board::startpos(), Side::White), vec![5]);
}

fn set_origins_rows(b: &Board, side: Side) -> Vec<u8> {
    let mut rows: Vec<u8> = legal_moves(b, side).origins().iter().map(|s| s.row()).collect();
    rows.sort();
    rows.dedup();
    rows
}

#[test]
fn startpos_black_mirrors_white() {
    let set = legal_moves(&Board::startpos(), Side::Black);
    assert!(!set.must_capture);
    assert_eq!(set.len(), 7);
    assert_eq!(set_origins_rows(&Board::startpos(), Side::Black), vec![2]);
}

#[test]
fn capture_excludes_unrelated_simple_moves() {
    let b = board("
        ........
        ........
        ........
        ........
        ...b....
        ..w.....
        ........
        ......w.");
    let set = legal_moves(&b, Side::White);
    assert!(set.must_capture);
    assert_eq!(set.moves, vec![Move::capture(sq("c3"), sq("e5"), sq("d4"))]);
    // The g1 man on its own would still step.
    assert!(!legal_moves_for_square(&b, sq("g1")).must_capture);
    assert_eq!(legal_moves_for_square(&b, sq("g1")).len(), 2);
}

#[test]
fn king_captures_from_a_distance_but_never_over_two_pieces() {
    let b = board("
        ...B....
        ........
        .w......
        w.....w.
        ........
        ........
        ........
        ........");
    let set = legal_moves_for_square(&b, sq("d8"));
    assert!(set.must_capture);
    assert_eq!(set.moves, vec![Move::capture(sq("d8"), sq("h4"), sq("g5"))]);
    assert_eq!(legal_moves(&b, Side::Black).moves, set.moves);
}

#[test]
fn king_may_land_on_any_empty_square_beyond_the_victim() {
    let b = board("
        .B......
        ........
        ........
        ....w...
        ........
        ........
        ........
        ........");
    let set = legal_moves_for_square(&b, sq("b8"));
    assert_eq!(sorted(set.moves), vec!["b8xf4", "b8xg3", "b8xh2"]);
}

#[test]
fn king_ray_is_blocked_by_own_piece_and_by_a_second_piece() {
    let b = board("
        .B......
        ..b.....
        ........
        ....w...
        .....w..
        ........
        ........
        ........");
    // c7 is black's own man; the a7 ray is the only way out.
    let set = legal_moves_for_square(&b, sq("b8"));
    assert!(!set.must_capture);
    assert_eq!(sorted(set.moves), vec!["b8-a7"]);

    let b = board("
        .B......
        ........
        ........
        ....w...
        .....b..
        ........
        ........
        ........");
    // Own man behind the victim leaves no landing square.
    assert!(!legal_moves_for_square(&b, sq("b8")).must_capture);
}

#[test]
fn men_capture_backward() {
    let b = board("
        ........
        ........
        ........
        ........
        ...w....
        ..b.....
        ........
        ........");
    let set = legal_moves(&b, Side::White);
    assert!(set.must_capture);
    assert_eq!(set.moves, vec![Move::capture(sq("d4"), sq("b2"), sq("c3"))]);
}

#[test]
fn men_step_only_forward() {
    let b = board("
        ........
        ........
        ........
        ........
        ...w....
        ........
        ........
        ........");
    assert_eq!(sorted(legal_moves(&b, Side::White).moves), vec!["d4-c5", "d4-e5"]);
    let b = board("
        ........
        ........
        ........
        ........
        ...b....
        ........
        ........
        ........");
    assert_eq!(sorted(legal_moves(&b, Side::Black).moves), vec!["d4-c3", "d4-e3"]);
}

#[test]
fn king_slides_until_the_first_piece() {
    let b = board("
        ........
        ........
        ........
        ........
        ........
        ........
        ........
        W.......");
    assert_eq!(legal_moves(&b, Side::White).len(), 7);
}

#[test]
fn capture_chains_expand_into_whole_turns() {
    let b = board("
        .b......
        ........
        .....b..
        ........
        .b.b....
        ..w.....
        ........
        ........");
    let mut names: Vec<String> = legal_turns(&b, Side::White).iter().map(|(t, _)| t.to_string()).collect();
    names.sort();
    assert_eq!(names, vec!["c3xa5", "c3xe5xg7"]);
}

#[test]
fn mandatory_capture_holds_across_random_positions() {
    for (b, side) in random_positions(7, 20, 60) {
        let set = legal_moves(&b, side);
        let any_capture = b.pieces(side).any(|s| legal_moves_for_square(&b, s).must_capture);
        assert_eq!(set.must_capture, any_capture, "{b:?}");
        assert_eq!(has_capture(&b, side), any_capture);
        if set.must_capture {
            assert!(set.iter().all(|m| m.is_capture()), "{b:?}");
        }
    }
}

#[test]
fn every_capture_removes_one_opposing_piece_on_the_line() {
    for (b, side) in random_positions(11, 20, 60) {
        for mv in legal_moves(&b, side).iter().filter(|m| m.is_capture()) {
            let after = apply_move(&b, *mv).expect("generated moves apply");
            assert_eq!(after.count(side.opponent()), b.count(side.opponent()) - 1);
            assert_eq!(after.count(side), b.count(side));
            let cap = mv.captured.unwrap();
            let (dr, dc) = (mv.to.row() as i8 - mv.from.row() as i8, mv.to.col() as i8 - mv.from.col() as i8);
            let (cr, cc) = (cap.row() as i8 - mv.from.row() as i8, cap.col() as i8 - mv.from.col() as i8);
            assert_eq!(cr.abs(), cc.abs());
            assert!(cr.signum() == dr.signum() && cc.signum() == dc.signum() && cr.abs() < dr.abs());
        }
    }
}
