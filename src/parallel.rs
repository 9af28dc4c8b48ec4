//! Parallel point folds using Rayon
//!
//! `PubKGen` and the offline half of decryption are both maps over an index
//! range (one scalar multiplication per index) followed by a fold with point
//! addition. Since the fold is commutative and associative, the result does
//! not depend on how the range is split or which worker finishes first.

use ark_ff::Zero;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::Result;
use crate::group::{Point, Scalar};
use crate::util::ensure_len;

/// A dedicated Rayon pool for the point folds.
pub struct WorkerPool {
    pool: ThreadPool,
}

impl WorkerPool {
    /// Build a pool with `workers` threads, or one per available core.
    pub fn new(workers: Option<usize>) -> Result<Self> {
        let threads = workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        });
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("fas-fold-{i}"))
            .build()?;
        Ok(Self { pool })
    }

    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Parallel `Σ coeffs[i]·points[i]`
    ///
    /// # Arguments
    /// * `points` - Group elements, one per index
    /// * `coeffs` - Scalars of the same length
    ///
    /// # Returns
    /// * `Point` - The folded sum; identical for any pool size
    ///
    /// The index range is cut into one contiguous chunk per worker. Each
    /// worker folds its own chunk; partial sums are then reduced by point
    /// addition.
    pub fn linear_combination(&self, points: &[Point], coeffs: &[Scalar]) -> Result<Point> {
        ensure_len("coefficient vector", coeffs, points.len())?;
        if points.is_empty() {
            return Ok(Point::zero());
        }

        let chunk = points.len().div_ceil(self.workers()).max(1);

        let sum = self.pool.install(|| {
            points
                .par_chunks(chunk)
                .zip(coeffs.par_chunks(chunk))
                .map(|(ps, cs)| {
                    ps.iter()
                        .zip(cs.iter())
                        .fold(Point::zero(), |acc, (p, c)| acc + *p * *c)
                })
                .reduce(Point::zero, |a, b| a + b)
        });

        Ok(sum)
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("workers", &self.workers())
            .finish()
    }
}
