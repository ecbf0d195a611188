//! Workload model and skewed generator
//!
//! A workload is an initial array plus a stream of `Range` / `Update`
//! operations. Most reads hit a small pool of hot intervals, which is what
//! makes caching worthwhile; a small share of writes keeps invalidation busy.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One operation record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum Op<T> {
    /// Sum over the inclusive interval `[left, right]`
    Range {
        /// Left bound
        left: usize,
        /// Right bound
        right: usize,
    },
    /// Write `value` at `index`
    Update {
        /// Target index
        index: usize,
        /// New value
        value: T,
    },
}

/// Workload generator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadConfig {
    /// Backing array length
    pub array_len: usize,
    /// Number of operations
    pub queries: usize,
    /// Number of distinct hot intervals
    pub hot_pool: usize,
    /// Probability that a read targets a hot interval
    pub p_hot: f64,
    /// Probability that an operation is a write
    pub p_update: f64,
    /// Smallest generated value
    pub min_value: i64,
    /// Largest generated value
    pub max_value: i64,
    /// RNG seed
    pub seed: u64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            array_len: 100_000,
            queries: 50_000,
            hot_pool: 30,
            p_hot: 0.95,
            p_update: 0.03,
            min_value: 1,
            max_value: 100,
            seed: 42,
        }
    }
}

impl WorkloadConfig {
    /// Reject settings the generator cannot honor
    pub fn validate(&self) -> Result<()> {
        if self.array_len == 0 {
            return Err(Error::InvalidConfig("array_len must be greater than 0".into()));
        }
        if self.hot_pool == 0 {
            return Err(Error::InvalidConfig("hot_pool must be greater than 0".into()));
        }
        for (name, p) in [("p_hot", self.p_hot), ("p_update", self.p_update)] {
            if !(0.0..=1.0).contains(&p) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, p
                )));
            }
        }
        if self.min_value > self.max_value {
            return Err(Error::InvalidConfig(format!(
                "min_value {} exceeds max_value {}",
                self.min_value, self.max_value
            )));
        }
        Ok(())
    }
}

/// Initial array plus the operations to replay against it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workload {
    /// Array contents before the first operation
    pub initial: Vec<i64>,
    /// Operation stream
    pub ops: Vec<Op<i64>>,
}

impl Workload {
    /// Generate a reproducible workload from `config`
    ///
    /// # Arguments
    /// * `config` - Generator settings (validated first)
    ///
    /// # Returns
    /// * `Result<Workload>` - Same seed, same workload
    pub fn generate(config: &WorkloadConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let initial = random_array(config, &mut rng);

        let n = config.array_len;
        let hot: Vec<(usize, usize)> = (0..config.hot_pool)
            .map(|_| (rng.gen_range(0..=n / 2), rng.gen_range(n / 2..n)))
            .collect();

        let mut ops = Vec::with_capacity(config.queries);
        for _ in 0..config.queries {
            if rng.gen_bool(config.p_update) {
                ops.push(Op::Update {
                    index: rng.gen_range(0..n),
                    value: rng.gen_range(config.min_value..=config.max_value),
                });
            } else if rng.gen_bool(config.p_hot) {
                let (left, right) = hot[rng.gen_range(0..hot.len())];
                ops.push(Op::Range { left, right });
            } else {
                let left = rng.gen_range(0..n);
                let right = rng.gen_range(left..n);
                ops.push(Op::Range { left, right });
            }
        }

        Ok(Self { initial, ops })
    }

    /// Number of `Range` operations
    pub fn range_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Range { .. }))
            .count()
    }

    /// Number of `Update` operations
    pub fn update_count(&self) -> usize {
        self.ops.len() - self.range_count()
    }
}

/// Fill an array of `config.array_len` uniform values
pub fn random_array<R: Rng>(config: &WorkloadConfig, rng: &mut R) -> Vec<i64> {
    (0..config.array_len)
        .map(|_| rng.gen_range(config.min_value..=config.max_value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> WorkloadConfig {
        WorkloadConfig {
            array_len: 200,
            queries: 1_000,
            hot_pool: 5,
            seed: 7,
            ..WorkloadConfig::default()
        }
    }

    #[test]
    fn test_generate_is_reproducible() {
        let a = Workload::generate(&small_config()).unwrap();
        let b = Workload::generate(&small_config()).unwrap();
        assert_eq!(a, b);

        let other = Workload::generate(&WorkloadConfig { seed: 8, ..small_config() }).unwrap();
        assert_ne!(a.ops, other.ops);
    }

    #[test]
    fn test_generate_bounds() {
        let config = small_config();
        let workload = Workload::generate(&config).unwrap();

        assert_eq!(workload.initial.len(), config.array_len);
        assert_eq!(workload.ops.len(), config.queries);
        assert!(workload.initial.iter().all(|v| (1..=100).contains(v)));

        for op in &workload.ops {
            match *op {
                Op::Range { left, right } => {
                    assert!(left <= right && right < config.array_len);
                }
                Op::Update { index, value } => {
                    assert!(index < config.array_len);
                    assert!((1..=100).contains(&value));
                }
            }
        }
        assert_eq!(
            workload.range_count() + workload.update_count(),
            config.queries
        );
    }

    #[test]
    fn test_generate_skew() {
        let config = WorkloadConfig { p_update: 0.0, ..small_config() };
        let workload = Workload::generate(&config).unwrap();

        let mut distinct: Vec<_> = workload.ops.clone();
        distinct.sort_by_key(|op| match *op {
            Op::Range { left, right } => (left, right),
            Op::Update { index, .. } => (index, index),
        });
        distinct.dedup();

        // Hot reads collapse onto a handful of intervals
        assert_eq!(workload.update_count(), 0);
        assert!(distinct.len() < config.queries / 4);
    }

    #[test]
    fn test_generate_rejects_empty_hot_pool() {
        let config = WorkloadConfig { hot_pool: 0, ..WorkloadConfig::default() };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
        assert!(Workload::generate(&config).is_err());
    }

    #[test]
    fn test_generate_all_cold_reads() {
        let config = WorkloadConfig { p_hot: 0.0, p_update: 0.0, ..small_config() };
        let workload = Workload::generate(&config).unwrap();
        assert_eq!(workload.range_count(), config.queries);
    }

    #[test]
    fn test_validate() {
        assert!(WorkloadConfig::default().validate().is_ok());

        let bad = WorkloadConfig { array_len: 0, ..WorkloadConfig::default() };
        assert!(matches!(bad.validate(), Err(Error::InvalidConfig(_))));

        let bad = WorkloadConfig { p_hot: 1.5, ..WorkloadConfig::default() };
        assert!(matches!(bad.validate(), Err(Error::InvalidConfig(_))));

        let bad = WorkloadConfig { min_value: 10, max_value: 1, ..WorkloadConfig::default() };
        assert!(Workload::generate(&bad).is_err());
    }

    #[test]
    fn test_config_json_defaults() {
        let config: WorkloadConfig =
            serde_json::from_str(r#"{ "array_len": 10, "seed": 3 }"#).unwrap();
        assert_eq!(config.array_len, 10);
        assert_eq!(config.seed, 3);
        assert_eq!(config.queries, WorkloadConfig::default().queries);
    }

    #[test]
    fn test_op_json() {
        let op: Op<i64> = serde_json::from_str(r#"{ "op": "Update", "index": 2, "value": 100 }"#).unwrap();
        assert_eq!(op, Op::Update { index: 2, value: 100 });
    }
}
