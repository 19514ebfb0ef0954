use crate::error::{ChessError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FpuMode {
    Absolute(f32),
    /// `node.expected_value_avg - fpu_value * sqrt(sum of visited priors)`.
    Reduction(f32),
}

impl Default for FpuMode {
    fn default() -> Self {
        FpuMode::Reduction(0.25)
    }
}

pub const DIRICHLET_CONCENTRATION: f64 = 0.03;
pub const DIRICHLET_WEIGHT: f32 = 0.25;

/// Tunable PUCT-search parameters, mutated at runtime via `setoption`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    pub num_rounds: u32,
    pub num_visits: u32,
    pub cpuct: f32,
    pub cpuct_factor: f32,
    pub cpuct_base: f32,
    pub fpu: FpuMode,
    pub add_noise: bool,
    pub disable_underpromotion: bool,
    pub policy_softmax_temp: f32,
    pub num_randomized_moves: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            num_rounds: 800,
            num_visits: 0,
            cpuct: 3.0,
            cpuct_factor: 0.0,
            cpuct_base: 19_652.0,
            fpu: FpuMode::default(),
            add_noise: false,
            disable_underpromotion: true,
            policy_softmax_temp: 1.0,
            num_randomized_moves: 0,
        }
    }
}

impl SearchConfig {
    /// Applies a UCI `setoption name playouts value <n>` / `name noise value
    /// <bool>`-style update. Returns `InvalidOption` for an out-of-range
    /// value, leaving `self` unchanged.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "playouts" => {
                let n: u32 = value
                    .parse()
                    .map_err(|_| ChessError::InvalidOption(value.to_string()))?;
                if !(1..=100_000).contains(&n) {
                    return Err(ChessError::InvalidOption(value.to_string()));
                }
                self.num_rounds = n;
                Ok(())
            }
            "noise" => {
                let b: bool = value
                    .parse()
                    .map_err(|_| ChessError::InvalidOption(value.to_string()))?;
                self.add_noise = b;
                Ok(())
            }
            _ => Err(ChessError::InvalidOption(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playouts_option_updates_round_budget() {
        let mut cfg = SearchConfig::default();
        cfg.set_option("playouts", "400").unwrap();
        assert_eq!(cfg.num_rounds, 400);
    }

    #[test]
    fn out_of_range_playouts_is_rejected_and_leaves_config_unchanged() {
        let mut cfg = SearchConfig::default();
        let before = cfg;
        assert!(cfg.set_option("playouts", "0").is_err());
        assert_eq!(cfg, before);
    }
}
