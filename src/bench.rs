//! Adaptive throughput measurement
//!
//! Steps are run in batches. After each batch the batch size is rescaled so that the next
//! one takes about one second of wall-clock time.

use std::time::{Duration, Instant};

/// Result of one measured batch
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Throughput {
	pub steps: usize,
	pub elapsed: Duration,
	/// Steps per second
	pub steps_per_second: f64,
	/// Steps per second times N², a proxy for pair interactions per second
	pub interactions_per_second: f64,
}

impl Throughput {
	pub fn new(steps: usize, elapsed: Duration, count: usize) -> Self {
		let secs = elapsed.as_secs_f64().max(f64::MIN_POSITIVE);
		let steps_per_second = steps as f64 / secs;
		let n = count as f64;
		Self {
			steps,
			elapsed,
			steps_per_second,
			interactions_per_second: steps_per_second * n * n,
		}
	}
}

impl std::fmt::Display for Throughput {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"{:.2e} g/s | {:.2e} OPS",
			self.steps_per_second, self.interactions_per_second
		)
	}
}

/// Batch size for the next batch, given the last one and its duration in seconds
pub fn next_interval(interval: usize, elapsed: f64) -> usize {
	if elapsed.is_nan() || elapsed <= 0.0 {
		return interval.saturating_mul(2).max(1);
	}
	let next = interval as f64 / elapsed;
	if next >= usize::MAX as f64 {
		usize::MAX
	} else {
		(next as usize).max(1)
	}
}

/// Adaptive batch runner
#[derive(Clone, Debug)]
pub struct Benchmark {
	interval: usize,
	count: usize,
}

impl Benchmark {
	/// `count` is the particle count, used for the interaction rate
	pub fn new(count: usize) -> Self {
		Self { interval: 1, count }
	}

	/// Steps the next batch will run
	pub fn interval(&self) -> usize {
		self.interval
	}

	/// Runs one batch of `step` calls and rescales the next batch
	pub fn batch(&mut self, mut step: impl FnMut()) -> Throughput {
		let steps = self.interval;
		let start = Instant::now();
		for _ in 0..steps {
			step();
		}
		let elapsed = start.elapsed();
		self.interval = next_interval(steps, elapsed.as_secs_f64());
		let report = Throughput::new(steps, elapsed, self.count);
		log::debug!("{} steps: {}", steps, report);
		report
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_next_interval() {
		assert_eq!(next_interval(1, 0.5), 2);
		assert_eq!(next_interval(10, 2.0), 5);
		assert_eq!(next_interval(1, 3.0), 1);
		assert_eq!(next_interval(100, 1.0), 100);
		assert_eq!(next_interval(4, 0.0), 8);
		assert_eq!(next_interval(usize::MAX, 1e-9), usize::MAX);
	}

	#[test]
	fn test_throughput() {
		let t = Throughput::new(10, Duration::from_millis(500), 100);
		assert!((t.steps_per_second - 20.0).abs() < 1e-9);
		assert!((t.interactions_per_second - 200_000.0).abs() < 1e-3);
		assert_eq!(t.to_string(), "2.00e1 g/s | 2.00e5 OPS");
	}

	#[test]
	fn test_batch_runs_interval() {
		let mut bench = Benchmark::new(8);
		let mut calls = 0;
		let report = bench.batch(|| calls += 1);
		assert_eq!(calls, 1);
		assert_eq!(report.steps, 1);
		assert!(bench.interval() >= 1);
	}
}
