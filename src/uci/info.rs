use crate::search::SearchOutcome;
use crate::types::Move;

/// `cp = round(111.7146 * tan(1.5621 * q))`, the inverse of the sigmoid the
/// evaluator's value head was trained against, mapping `q in (-1, 1)` back to
/// a conventional centipawn score.
pub fn q_to_centipawns(q: f32) -> i32 {
    (111.7146 * (1.5621 * q).tan()).round() as i32
}

/// One `info ...` line per completed `go`, per the reference behavior of
/// always emitting on `select_move` return regardless of whether the search
/// was stopped early.
pub fn format_info_line(outcome: &SearchOutcome, elapsed_ms: u64, best_move: Move) -> String {
    let avg_depth = if outcome.rounds > 0 {
        outcome.cumulative_depth / outcome.rounds as u64
    } else {
        0
    };
    let nps = if elapsed_ms > 0 {
        outcome.nodes * 1000 / elapsed_ms
    } else {
        outcome.nodes
    };
    format!(
        "info depth {} seldepth {} time {} nodes {} score cp {} nps {} pv {}",
        avg_depth,
        outcome.seldepth,
        elapsed_ms,
        outcome.nodes,
        q_to_centipawns(outcome.q),
        nps,
        best_move
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_q_maps_to_zero_centipawns() {
        assert_eq!(q_to_centipawns(0.0), 0);
    }

    #[test]
    fn positive_q_maps_to_positive_centipawns() {
        assert!(q_to_centipawns(0.5) > 0);
    }
}
