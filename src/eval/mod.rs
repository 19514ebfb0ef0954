pub mod cache;

use crate::encode::Tensor3;
use crate::error::Result;

/// External neural-network boundary: given an encoded input tensor, returns
/// a raw `(73, 8, 8)` policy tensor and a scalar value in `[-1, 1]`. The
/// model itself and its file format are out of scope for this crate.
pub trait Evaluator {
    fn evaluate(&self, input: &Tensor3) -> Result<(Tensor3, f32)>;
}

/// A fixed-output evaluator used for tests and as a placeholder before a
/// real `OnnxInference`-style evaluator is wired in. Named to mirror the
/// `{OnnxInference, Stub}` capability split called out in the design notes.
pub struct StubEvaluator {
    pub value: f32,
}

impl StubEvaluator {
    pub fn new(value: f32) -> StubEvaluator {
        StubEvaluator { value }
    }
}

impl Evaluator for StubEvaluator {
    fn evaluate(&self, _input: &Tensor3) -> Result<(Tensor3, f32)> {
        let mut policy = Tensor3::zeros(73);
        for c in 0..73 {
            policy.fill_channel(c, 1.0);
        }
        Ok((policy, self.value))
    }
}
