mod common;

use common::{board, dests, names, random_game, sq};
use engine::{Board, MoveFilter, Movement, Player, is_in_check, possible_moves, possible_positions};

const CANNON_BOARD: &str = "
  A B C D E F G H I
0 . . . a g * . . .
1 . . . * a * . . .
2 . . . * * * . . .
3 . . . . . S . . .
4 - - - - S - - - -
5 R - R H c c h - -
6 . . . . h . . . .
7 . . . * * * . . .
8 . . . * A H . . .
9 . . . * G A . . .
";

const SOLDIER_BOARD_RED: &str = "
0 . . . a g * . . .
1 . . . * a * . . .
2 . H . * * * . . .
3 R S R r S c h . .
4 - - - - - - S - S
5 S - - - - - - - -
6 . . . . . . . . .
7 . . . * * * . . .
8 . . . * A * . . .
9 . . . G * A . . .
";

const SOLDIER_BOARD_BLACK: &str = "
0 . . . a * g . . .
1 . . . * a * . . .
2 . . . * * * . . .
3 . . . . . . . . .
4 - - - - - - - - s
5 s C s H - - - - -
6 . . . C s R r s r
7 . . . * * * . h .
8 . . . * A * . . .
9 . . . G * A . . .
";

const GENERAL_BOARD: &str = "
0 . . . a * g . . .
1 . . . * H * . . .
2 . . . * * * . . .
3 . . . . . . . . .
4 - - - - - - - - -
5 - - - - - - - - -
6 . . . . . . . . .
7 . . . * * * . . .
8 . . . * * * . . .
9 . . . * G * . . .
";

fn mv(s: &str) -> Movement {
    s.parse().unwrap()
}

#[test]
fn starting_position_has_44_moves_each() {
    let start = Board::starting();
    let red = possible_moves(&start, Player::Red, MoveFilter::AllowSelfCheck);
    assert_eq!(red.len(), 44);
    for m in [
        "A6A5", "B7E7", "B7B0", "E9E8", "D9E8", "C9A7", "C9E7", "B9A7", "B9C7", "A9A8", "A9A7",
    ] {
        assert!(red.contains(&mv(m)), "missing {m}");
    }
    assert!(!red.contains(&mv("B7B2")));

    let black = possible_moves(&start, Player::Black, MoveFilter::AllowSelfCheck);
    assert_eq!(black.len(), 44);
    assert!(black.contains(&mv("B2B9")));
    assert!(black.contains(&mv("A3A4")));
}

#[test]
fn moves_are_deterministic_and_row_major() {
    let start = Board::starting();
    let first = possible_moves(&start, Player::Red, MoveFilter::AllowSelfCheck);
    let second = possible_moves(&start, Player::Red, MoveFilter::AllowSelfCheck);
    assert_eq!(first, second);
    let origins: Vec<usize> = first.iter().map(|m| m.origin()).collect();
    assert!(origins.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn cannon_on_starting_board() {
    let start = Board::starting();
    assert_eq!(
        dests(&start, "B2", MoveFilter::AllowSelfCheck),
        names(&["B1", "B3", "B4", "B5", "B6", "B9", "A2", "C2", "D2", "E2", "F2", "G2"])
    );
}

#[test]
fn cannon_screens() {
    let b = board(CANNON_BOARD);
    assert_eq!(dests(&b, "E5", MoveFilter::AllowSelfCheck), names(&["C5", "E8"]));
    assert_eq!(
        dests(&b, "F5", MoveFilter::AllowSelfCheck),
        names(&["D5", "F4", "F6", "F7", "F9"])
    );
}

#[test]
fn red_soldiers() {
    let b = board(SOLDIER_BOARD_RED);
    assert_eq!(dests(&b, "A5", MoveFilter::AllowSelfCheck), names(&["A4"]));
    assert_eq!(dests(&b, "I4", MoveFilter::AllowSelfCheck), names(&["I3", "H4"]));
    assert_eq!(dests(&b, "G4", MoveFilter::AllowSelfCheck), names(&["G3", "F4", "H4"]));
    assert_eq!(dests(&b, "E3", MoveFilter::AllowSelfCheck), names(&["E2", "D3", "F3"]));
    assert!(dests(&b, "B3", MoveFilter::AllowSelfCheck).is_empty());
}

#[test]
fn red_soldier_must_answer_check() {
    // The chariot on D3 attacks the red general on D9; only taking it helps.
    let b = board(SOLDIER_BOARD_RED);
    assert_eq!(dests(&b, "E3", MoveFilter::AvoidSelfCheck), names(&["D3"]));
}

#[test]
fn black_soldiers() {
    let b = board(SOLDIER_BOARD_BLACK);
    assert_eq!(dests(&b, "I4", MoveFilter::AllowSelfCheck), names(&["I5"]));
    assert_eq!(dests(&b, "A5", MoveFilter::AllowSelfCheck), names(&["A6", "B5"]));
    assert_eq!(dests(&b, "C5", MoveFilter::AllowSelfCheck), names(&["C6", "B5", "D5"]));
    assert_eq!(dests(&b, "E6", MoveFilter::AllowSelfCheck), names(&["E7", "D6", "F6"]));
    assert_eq!(dests(&b, "E6", MoveFilter::AvoidSelfCheck), names(&["F6"]));
    assert!(dests(&b, "H6", MoveFilter::AllowSelfCheck).is_empty());
}

#[test]
fn generals_stay_in_palace_and_avoid_facing() {
    let b = board(GENERAL_BOARD);
    assert_eq!(dests(&b, "F0", MoveFilter::AllowSelfCheck), names(&["F1", "E0"]));
    assert_eq!(dests(&b, "F0", MoveFilter::AvoidSelfCheck), names(&["F1", "E0"]));
    assert_eq!(dests(&b, "E9", MoveFilter::AllowSelfCheck), names(&["E8", "D9", "F9"]));
    assert_eq!(dests(&b, "E9", MoveFilter::AvoidSelfCheck), names(&["E8", "D9"]));
}

#[test]
fn flying_general_capture_is_a_move() {
    let b = board(
        "
0 . . . g * a . . .
1 . . . * * * . . .
2 . . . * * * . . .
3 . . . . . . . . .
4 - - - - - - - - -
5 - - - - - - - - -
6 . . . . . . . . .
7 . . . * * * . . .
8 . . . * * * . . .
9 . . . G * A . . .
",
    );
    let red = possible_positions(&b, sq("D9"), MoveFilter::AvoidSelfCheck);
    assert_eq!(red[0], sq("D0"));
    let black = possible_positions(&b, sq("D0"), MoveFilter::AvoidSelfCheck);
    assert_eq!(black[0], sq("D9"));
}

#[test]
fn taking_the_general_survives_the_self_check_filter() {
    // The cannon checks through the advisor on E8. Taking E0 leaves that
    // check standing, yet the capture is kept.
    let b = board(
        "
0 R . . * g * . . .
1 . . . * * * . . .
2 . . . * * * . . .
3 . . . . . . . . .
4 - - - - - - - - -
5 - - - - - - - - -
6 . . . . c . . . .
7 . . . * * * . . .
8 . . . * A * . . .
9 . . . * G * . . .
",
    );
    assert!(is_in_check(&b, Player::Red));
    let mut after = b.clone();
    after.move_piece(Movement::new(sq("A0"), sq("E0")));
    assert!(is_in_check(&after, Player::Red));

    assert_eq!(dests(&b, "A0", MoveFilter::AvoidSelfCheck), names(&["E0"]));
    assert!(dests(&b, "A0", MoveFilter::AllowSelfCheck).len() > 1);
}

#[test]
fn avoiding_self_check_only_narrows() {
    for seed in 0..4 {
        for b in random_game(seed, 120).iter().step_by(7) {
            for player in [Player::Red, Player::Black] {
                for (from, _) in b.pieces(player) {
                    let all = possible_positions(b, from, MoveFilter::AllowSelfCheck);
                    let legal = possible_positions(b, from, MoveFilter::AvoidSelfCheck);
                    assert!(legal.len() <= all.len());
                    assert!(legal.iter().all(|&to| all.contains(to)));
                }
            }
        }
    }
}
