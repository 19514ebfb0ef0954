use std::collections::{HashMap, VecDeque};

use crate::encode::{self, policy, EncoderVersion};
use crate::error::Result;
use crate::position::Position;
use crate::types::Move;

use super::Evaluator;

#[derive(Debug, Clone)]
pub struct EvalResult {
    pub priors: HashMap<Move, f32>,
    pub value: f32,
}

fn mix(x: u64) -> u64 {
    // A small splitmix64-style finisher; only needs to scatter repetition
    // count and fifty-move count into the high bits of the cache key, not
    // to be cryptographically strong.
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn cache_key(pos: &Position) -> u64 {
    pos.hash ^ mix(pos.repetition_count() as u64) ^ mix(pos.fifty as u64)
}

/// Wraps an `Evaluator` with a fixed-capacity FIFO cache and the
/// softmax-over-legal-moves renormalization described for the encoder's
/// policy output.
pub struct CachedEvaluator<E: Evaluator> {
    inner: E,
    version: EncoderVersion,
    capacity: usize,
    map: HashMap<u64, EvalResult>,
    order: VecDeque<u64>,
    pub disable_underpromotion: bool,
    pub policy_softmax_temp: f32,
}

impl<E: Evaluator> CachedEvaluator<E> {
    pub fn new(inner: E, version: EncoderVersion, capacity: usize) -> CachedEvaluator<E> {
        CachedEvaluator {
            inner,
            version,
            capacity,
            map: HashMap::new(),
            order: VecDeque::new(),
            disable_underpromotion: true,
            policy_softmax_temp: 1.0,
        }
    }

    pub fn evaluate(&mut self, pos: &Position) -> Result<EvalResult> {
        let key = cache_key(pos);
        if let Some(hit) = self.map.get(&key) {
            return Ok(hit.clone());
        }

        let tensor = encode::encode(pos, self.version);
        let (policy_tensor, value) = self.inner.evaluate(&tensor).map_err(|e| {
            log::error!("evaluator failure: {e}");
            e
        })?;

        let decoded = policy::decode_legal_moves(pos, self.version);
        let mut raw: HashMap<Move, f32> = HashMap::new();
        for (mv, &(plane, rank, file)) in decoded.iter() {
            if self.disable_underpromotion && is_disabled_underpromotion(mv) {
                continue;
            }
            raw.insert(*mv, policy_tensor.get(plane, rank, file));
        }
        let priors = softmax_renormalize(raw, self.policy_softmax_temp);

        let result = EvalResult { priors, value };
        self.map.insert(key, result.clone());
        self.order.push_back(key);
        if self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.map.remove(&oldest);
            }
        }
        Ok(result)
    }
}

fn is_disabled_underpromotion(mv: &Move) -> bool {
    use crate::types::Piece;
    matches!(
        mv.promotion,
        Piece::WN | Piece::BN | Piece::WB | Piece::BB | Piece::WR | Piece::BR
    )
}

fn softmax_renormalize(raw: HashMap<Move, f32>, temp: f32) -> HashMap<Move, f32> {
    if raw.is_empty() {
        return raw;
    }
    let max = raw
        .values()
        .cloned()
        .fold(f32::NEG_INFINITY, f32::max);
    let mut exps: HashMap<Move, f32> = HashMap::with_capacity(raw.len());
    let mut sum = 0.0f32;
    for (mv, v) in raw {
        let e = ((v - max) / temp).exp();
        sum += e;
        exps.insert(mv, e);
    }
    if sum > 0.0 {
        for v in exps.values_mut() {
            *v /= sum;
        }
    }
    exps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::StubEvaluator;
    use crate::position::Position;

    #[test]
    fn hit_returns_same_result_without_calling_evaluator_again() {
        let mut cache = CachedEvaluator::new(StubEvaluator::new(0.5), EncoderVersion::V1, 16);
        let pos = Position::startpos();
        let first = cache.evaluate(&pos).unwrap();
        let second = cache.evaluate(&pos).unwrap();
        assert_eq!(first.value, second.value);
        assert_eq!(first.priors.len(), second.priors.len());
    }

    #[test]
    fn priors_sum_to_one_over_legal_moves() {
        let mut cache = CachedEvaluator::new(StubEvaluator::new(0.0), EncoderVersion::V1, 16);
        let pos = Position::startpos();
        let result = cache.evaluate(&pos).unwrap();
        let sum: f32 = result.priors.values().sum();
        assert!((sum - 1.0).abs() < 1e-4);
    }

    #[test]
    fn fifo_eviction_drops_oldest_entry() {
        let mut cache = CachedEvaluator::new(StubEvaluator::new(0.0), EncoderVersion::V1, 1);
        let mut pos = Position::startpos();
        cache.evaluate(&pos).unwrap();
        let first_key = cache_key(&pos);
        let mv = crate::position::fen::parse_move_string(&pos, "e2e4").unwrap();
        pos.make_move(mv);
        cache.evaluate(&pos).unwrap();
        assert!(!cache.map.contains_key(&first_key));
    }
}
