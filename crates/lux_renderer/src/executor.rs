//! Parallel sample execution.
//!
//! Every sample-per-pixel pass is an independent job. Jobs run on a
//! dedicated rayon pool in batches no larger than the worker cap, and each
//! publishes its full-image result into its own slot of a [`SampleStore`].
//! Averaging walks the slots in index order, so the final image does not
//! depend on which worker finished first.

use std::sync::OnceLock;

use log::debug;
use lux_core::ColorBatch;
use rayon::prelude::*;

use crate::error::{RenderError, RenderResult};

/// Runs sample jobs on a bounded thread pool.
#[derive(Debug, Clone, Copy)]
pub struct SampleExecutor {
    max_workers: usize,
}

impl SampleExecutor {
    /// Create an executor running at most `max_workers` jobs at once.
    pub fn new(max_workers: usize) -> Self {
        Self {
            max_workers: max_workers.max(1),
        }
    }

    /// Four workers per available CPU.
    pub fn default_worker_cap() -> usize {
        4 * std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Run `samples` jobs and return the mean of their results.
    ///
    /// `pixels` is the length every job must return. The first failing job
    /// aborts the run.
    pub fn run<F>(&self, samples: usize, pixels: usize, job: F) -> RenderResult<ColorBatch>
    where
        F: Fn(usize) -> RenderResult<ColorBatch> + Send + Sync,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .thread_name(|i| format!("lux-sample-{}", i))
            .build()?;

        let store = SampleStore::new(samples, pixels);
        for start in (0..samples).step_by(self.max_workers) {
            let end = (start + self.max_workers).min(samples);
            debug!("Running samples {}..{} of {}", start, end, samples);

            pool.install(|| {
                (start..end).into_par_iter().try_for_each(|index| {
                    let colors = job(index)?;
                    store.publish(index, colors)
                })
            })?;
        }

        store.average()
    }
}

impl Default for SampleExecutor {
    fn default() -> Self {
        Self::new(Self::default_worker_cap())
    }
}

/// One write-once slot per sample.
#[derive(Debug)]
pub struct SampleStore {
    slots: Vec<OnceLock<ColorBatch>>,
    pixels: usize,
}

impl SampleStore {
    pub fn new(samples: usize, pixels: usize) -> Self {
        Self {
            slots: (0..samples).map(|_| OnceLock::new()).collect(),
            pixels,
        }
    }

    /// Store the result of sample `index`. Each slot accepts one result.
    pub fn publish(&self, index: usize, colors: ColorBatch) -> RenderResult<()> {
        if colors.len() != self.pixels {
            return Err(RenderError::SampleSize {
                index,
                got: colors.len(),
                expected: self.pixels,
            });
        }
        let slot = self
            .slots
            .get(index)
            .ok_or(RenderError::SampleOutOfRange(index))?;
        slot.set(colors)
            .map_err(|_| RenderError::DuplicateSample(index))
    }

    /// Mean of every published sample, summed in index order.
    pub fn average(self) -> RenderResult<ColorBatch> {
        let count = self.slots.len();
        let mut sum = ColorBatch::zeros(self.pixels);
        for (index, slot) in self.slots.into_iter().enumerate() {
            let colors = slot.into_inner().ok_or(RenderError::MissingSample(index))?;
            sum += &colors;
        }
        if count == 0 {
            return Ok(sum);
        }
        Ok(sum * (1.0 / count as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lux_math::DVec3;

    #[test]
    fn test_average_is_order_independent() {
        let forward = SampleStore::new(3, 2);
        let backward = SampleStore::new(3, 2);
        let values = [1.0, 2.0, 6.0];

        for (i, &v) in values.iter().enumerate() {
            forward.publish(i, ColorBatch::splat(DVec3::splat(v), 2)).unwrap();
        }
        for (i, &v) in values.iter().enumerate().rev() {
            backward.publish(i, ColorBatch::splat(DVec3::splat(v), 2)).unwrap();
        }

        let a = forward.average().unwrap();
        let b = backward.average().unwrap();
        assert_eq!(a, b);
        assert!((a.get(1) - DVec3::splat(3.0)).length() < 1e-12);
    }

    #[test]
    fn test_missing_and_duplicate_samples() {
        let store = SampleStore::new(2, 1);
        store.publish(0, ColorBatch::zeros(1)).unwrap();
        assert!(matches!(
            store.publish(0, ColorBatch::zeros(1)),
            Err(RenderError::DuplicateSample(0))
        ));
        assert!(matches!(
            store.publish(1, ColorBatch::zeros(3)),
            Err(RenderError::SampleSize { index: 1, .. })
        ));
        assert!(matches!(store.average(), Err(RenderError::MissingSample(1))));
    }

    #[test]
    fn test_run_in_batches() {
        let executor = SampleExecutor::new(2);
        let mean = executor
            .run(5, 3, |index| Ok(ColorBatch::splat(DVec3::splat(index as f64), 3)))
            .unwrap();
        // (0 + 1 + 2 + 3 + 4) / 5
        assert!((mean.get(2) - DVec3::splat(2.0)).length() < 1e-12);
    }

    #[test]
    fn test_first_error_aborts() {
        let executor = SampleExecutor::new(4);
        let result = executor.run(8, 1, |index| {
            if index == 5 {
                Err(RenderError::InvalidConfig("boom".to_string()))
            } else {
                Ok(ColorBatch::zeros(1))
            }
        });
        assert!(matches!(result, Err(RenderError::InvalidConfig(_))));
    }

    #[test]
    fn test_default_cap_is_positive() {
        assert!(SampleExecutor::default_worker_cap() >= 4);
        assert_eq!(SampleExecutor::new(0).max_workers(), 1);
    }
}
