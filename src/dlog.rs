use std::collections::HashMap;

use ark_ec::CurveGroup;
use ark_ff::Zero;
use tracing::{debug, trace};

use crate::error::{FasError, Result};
use crate::group::{affine_to_bytes, generator, point_to_bytes, Point, POINT_LEN};

/// Largest baby-step table [`DlogTable::new`] will try to build. Covers
/// bounds up to `2^56`.
pub const MAX_BABY_STEPS: u64 = 1 << 28;

/// Baby-step table for discrete logs base `G` in `[0, bound)`.
///
/// Holds `m = ⌈√bound⌉` baby steps `j·G` keyed by their compressed encoding.
/// Building it costs `O(√bound)` time and space; each [`DlogTable::solve`]
/// then takes at most `m` giant steps. Keep one table around to amortise the
/// precomputation over many decryptions with the same bound.
pub struct DlogTable {
    bound: u64,
    m: u64,
    baby_steps: HashMap<[u8; POINT_LEN], u64>,
    /// `-m·G`
    giant_stride: Point,
}

impl DlogTable {
    /// Build the table for `[0, bound)`.
    ///
    /// Fails with `FasError::InvalidConfig` when `⌈√bound⌉` exceeds
    /// [`MAX_BABY_STEPS`] or the table cannot be allocated.
    pub fn new(bound: u64) -> Result<Self> {
        let m = ceil_sqrt(bound);
        if m > MAX_BABY_STEPS {
            return Err(FasError::InvalidConfig(format!(
                "bound {bound} needs {m} baby steps, limit is {MAX_BABY_STEPS}"
            )));
        }
        let alloc_err = |_| FasError::InvalidConfig(format!("cannot allocate {m} baby steps"));

        // Baby steps: j·G for j = 0..m
        let mut steps = Vec::new();
        steps.try_reserve_exact(m as usize).map_err(alloc_err)?;
        let mut current = Point::zero();
        for _ in 0..m {
            steps.push(current);
            current += generator();
        }
        // current = m·G
        let affine = Point::normalize_batch(&steps);

        let mut baby_steps = HashMap::new();
        baby_steps.try_reserve(m as usize).map_err(alloc_err)?;
        for (j, p) in affine.iter().enumerate() {
            baby_steps.insert(affine_to_bytes(p), j as u64);
        }

        debug!(bound, m, "built baby-step table");

        Ok(Self {
            bound,
            m,
            baby_steps,
            giant_stride: -current,
        })
    }

    pub fn bound(&self) -> u64 {
        self.bound
    }

    /// Find `v ∈ [0, bound)` with `v·G = target`
    ///
    /// # Returns
    /// * `Ok(v)` - The discrete log
    /// * `Err(FasError::NotFoundInBound)` - No such `v`: the value is out of
    ///   range or the inputs were inconsistent
    pub fn solve(&self, target: &Point) -> Result<u64> {
        let mut gamma = *target;

        for i in 0..self.m {
            if let Some(&j) = self.baby_steps.get(&point_to_bytes(&gamma)) {
                // Logs below m² are unique, so the first hit is the answer.
                let v = i * self.m + j;
                if v < self.bound {
                    trace!(v, giant_steps = i, "discrete log found");
                    return Ok(v);
                }
                break;
            }
            gamma += self.giant_stride;
        }

        debug!(bound = self.bound, "discrete log not found within bound");
        Err(FasError::NotFoundInBound { bound: self.bound })
    }
}

/// One-shot bounded discrete log. Builds a fresh table.
pub fn solve_bounded(target: &Point, bound: u64) -> Result<u64> {
    DlogTable::new(bound)?.solve(target)
}

fn ceil_sqrt(x: u64) -> u64 {
    let mut r = (x as f64).sqrt() as u64;
    while r.saturating_mul(r) > x {
        r -= 1;
    }
    while r.saturating_mul(r) < x {
        r += 1;
    }
    r
}
