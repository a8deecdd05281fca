//! Data-parallel execution of a step
//!
//! Each phase is a fork-join parallel-for over contiguous index ranges, one range per
//! worker. A worker writes only to its own range and reads the shared position snapshot,
//! so no locking is needed within a phase. Returning from the parallel-for is the barrier
//! between the phases.

use crate::{
	error::*,
	forces::{self, gravity},
	layout::*,
	util::*,
};

use rayon::prelude::*;

/// Where a step currently is
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
	Idle,
	AccumulatingForces,
	IntegratingPositions,
}

/// Fixed-size worker pool running steps
pub struct Scheduler {
	pool: rayon::ThreadPool,
	workers: usize,
	phase: Phase,
}

impl Scheduler {
	/// Spawns `workers` threads
	pub fn new(workers: usize) -> Result<Self> {
		if workers == 0 {
			return Err(Error::InvalidWorkers(workers));
		}
		let pool = rayon::ThreadPoolBuilder::new()
			.num_threads(workers)
			.thread_name(|i| format!("planets-worker-{}", i))
			.build()?;
		log::debug!("Scheduler started with {} workers", workers);
		Ok(Self {
			pool,
			workers,
			phase: Phase::Idle,
		})
	}

	/// One worker per available core
	pub fn with_available_parallelism() -> Result<Self> {
		Self::new(std::thread::available_parallelism().map_or(1, |n| n.get()))
	}

	pub fn workers(&self) -> usize {
		self.workers
	}

	pub fn phase(&self) -> Phase {
		self.phase
	}

	/// Length of the contiguous range owned by each worker
	pub fn chunk_len(&self, count: usize) -> usize {
		count.div_ceil(self.workers).max(1)
	}

	fn enter(&mut self, phase: Phase) {
		log::trace!("{:?} -> {:?}", self.phase, phase);
		self.phase = phase;
	}

	/// Advances the store by one step
	///
	/// Same contract as [`Store::step`]. Only summation order may differ between worker counts.
	pub fn step<T: Coord>(&mut self, store: &mut Store<T>) {
		let chunk = self.chunk_len(store.len());
		let (gravity, softening) = (store.settings.gravity, store.settings.softening);
		let Store {
			storage, scratch, ..
		} = store;

		self.enter(Phase::AccumulatingForces);
		self.pool.install(|| match storage {
			Storage::Aos(bodies) => {
				let snapshot = &bodies[..];
				scratch
					.par_chunks_mut(chunk)
					.enumerate()
					.for_each(|(w, out)| {
						gravity::accumulate_records(snapshot, w * chunk, out, gravity, softening)
					});
				bodies
					.par_chunks_mut(chunk)
					.zip(scratch.par_chunks(chunk))
					.for_each(|(bodies, acc)| forces::kick_records(bodies, acc));
			}
			Storage::Soa(Columns { x, y, vx, vy }) => {
				let (x, y) = (&x[..], &y[..]);
				vx.par_chunks_mut(chunk)
					.zip(vy.par_chunks_mut(chunk))
					.enumerate()
					.for_each(|(w, (vx, vy))| {
						gravity::accumulate_columns(x, y, w * chunk, vx, vy, gravity, softening)
					});
			}
		});

		self.enter(Phase::IntegratingPositions);
		self.pool.install(|| match storage {
			Storage::Aos(bodies) => bodies
				.par_chunks_mut(chunk)
				.for_each(|bodies| forces::drift_records(bodies)),
			Storage::Soa(Columns { x, y, vx, vy }) => x
				.par_chunks_mut(chunk)
				.zip(y.par_chunks_mut(chunk))
				.zip(vx.par_chunks(chunk))
				.zip(vy.par_chunks(chunk))
				.for_each(|(((x, y), vx), vy)| forces::drift_columns(x, y, vx, vy)),
		});

		self.enter(Phase::Idle);
	}
}

impl std::fmt::Debug for Scheduler {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Scheduler")
			.field("workers", &self.workers)
			.field("phase", &self.phase)
			.finish()
	}
}
