#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeManagerKind {
    Simple,
    FixedPercentage { percentage: f32 },
}

impl Default for TimeManagerKind {
    fn default() -> Self {
        TimeManagerKind::Simple
    }
}

const MOVE_OVERHEAD_MS: u64 = 250;

/// Derives a search budget in milliseconds from time-left/increment/ply,
/// per the configured policy. `move_time_ms`, if given, overrides both.
pub fn budget_ms(
    kind: TimeManagerKind,
    time_left_ms: u64,
    increment_ms: u64,
    ply: u32,
    move_time_ms: Option<u64>,
) -> u64 {
    if let Some(mt) = move_time_ms {
        return mt;
    }
    let available = time_left_ms.saturating_sub(MOVE_OVERHEAD_MS) as f64;
    match kind {
        TimeManagerKind::Simple => {
            let ratio = if time_left_ms > 0 {
                increment_ms as f64 / time_left_ms as f64
            } else {
                0.0
            };
            let base = 1.4;
            let per_ply = 0.049;
            let incr_factor = 1.5;
            let frac = (base + ply as f64 * per_ply) / 100.0 + ratio * incr_factor;
            available.min(available * frac).max(0.0) as u64
        }
        TimeManagerKind::FixedPercentage { percentage } => {
            (available * percentage as f64 / 100.0).max(0.0) as u64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_time_overrides_policy() {
        assert_eq!(
            budget_ms(TimeManagerKind::Simple, 60_000, 0, 1, Some(500)),
            500
        );
    }

    #[test]
    fn fixed_percentage_matches_formula() {
        let budget = budget_ms(
            TimeManagerKind::FixedPercentage { percentage: 5.0 },
            10_250,
            0,
            1,
            None,
        );
        assert_eq!(budget, 500);
    }

    #[test]
    fn simple_policy_never_exceeds_available_time() {
        let budget = budget_ms(TimeManagerKind::Simple, 300_000, 0, 1, None);
        assert!(budget <= 300_000 - MOVE_OVERHEAD_MS);
    }
}
