use zero_chess::encode::EncoderVersion;
use zero_chess::eval::cache::CachedEvaluator;
use zero_chess::eval::StubEvaluator;
use zero_chess::position::movegen::generate_legal_moves;
use zero_chess::position::{fen, Position};
use zero_chess::search::{select_move, SearchBudget, SearchConfig};
use zero_chess::sync::StopFlag;
use zero_chess::types::{Color, Move, Piece, Square};

#[test]
fn startpos_select_move_returns_a_legal_move_within_budget() {
    let pos = Position::startpos();
    let legal: Vec<Move> = generate_legal_moves(&pos).iter().copied().collect();

    let mut cache = CachedEvaluator::new(StubEvaluator::new(0.0), EncoderVersion::V1, 1024);
    let mut config = SearchConfig::default();
    config.num_rounds = 32;
    let stop = StopFlag::new();

    let outcome = select_move(&pos, &mut cache, &config, &stop, SearchBudget::default()).unwrap();

    assert!(legal.contains(&outcome.best_move));
    assert!(outcome.rounds > 0);
}

#[test]
fn startpos_draws_by_repetition_after_two_round_trips() {
    let mut pos = Position::startpos();
    let round_trip = ["g1f3", "b8c6", "f3g1", "c6b8"];
    for _ in 0..2 {
        for mv_str in round_trip {
            let mv = fen::parse_move_string(&pos, mv_str).expect("round-trip move should be legal");
            pos.make_move(mv);
        }
    }
    assert!(pos.is_over());
    assert_eq!(pos.winner(), Some(Color::Both));
}

#[test]
fn move_to_string_includes_promotion_suffix() {
    let mv = Move {
        from: Square(2),
        to: Square(18),
        captured: Piece::None,
        promotion: Piece::WR,
        flag: zero_chess::types::MoveFlag::None,
    };
    assert_eq!(mv.to_string(), "c1c3r");
}
