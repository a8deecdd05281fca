//! Brute-force 2D gravitational N-body simulation
//!
//! A [`Store`] owns a fixed population of unit-mass particles in either memory [`Layout`],
//! in single or double precision (the `T` parameter). [`Store::step`] advances it by one
//! unit time step on the calling thread; [`Scheduler::step`] does the same on a worker pool.

mod error;
mod forces;
#[cfg(feature = "rand")]
mod init;
mod layout;
mod util;

pub mod bench;
pub mod config;
#[cfg(feature = "rand")]
pub mod driver;
pub mod scheduler;

pub use error::{Error, Result};
pub use forces::gravity::{pull_columns, pull_records};
pub use layout::{Columns, Layout, Particle, Settings, Storage, Store};
pub use scheduler::{Phase, Scheduler};
pub use util::{tangential_velocity, Coord, Precision};

impl<T: Coord> Store<T> {
	/// Allocates zeroed storage for `settings.count` particles
	pub fn create(settings: Settings<T>) -> Result<Self> {
		settings.validate()?;
		let storage = layout::Storage::zeroed(settings.layout, settings.count)?;
		let scratch = match settings.layout {
			Layout::Aos => layout::zeroed_vec(settings.count, [T::zero(); 2])?,
			Layout::Soa => Vec::new(),
		};
		log::debug!(
			"Allocated {} particles ({}, {})",
			settings.count,
			settings.layout,
			T::PRECISION
		);
		Ok(Self {
			storage,
			scratch,
			settings,
		})
	}

	/// Allocates and populates with `settings.seed`
	#[cfg(feature = "rand")]
	pub fn new(settings: Settings<T>) -> Result<Self>
	where
		T: rand::distributions::uniform::SampleUniform,
	{
		let seed = settings.seed;
		let mut store = Self::create(settings)?;
		store.populate(seed);
		Ok(store)
	}

	/// Frees all storage
	pub fn release(self) {
		log::debug!("Released {} particles", self.len());
	}

	pub fn settings(&self) -> &Settings<T> {
		&self.settings
	}

	pub fn layout(&self) -> Layout {
		self.storage.layout()
	}

	pub fn len(&self) -> usize {
		self.storage.len()
	}

	pub fn is_empty(&self) -> bool {
		self.storage.is_empty()
	}

	pub fn position(&self, i: usize) -> [T; 2] {
		self.storage.position(i)
	}

	pub fn velocity(&self, i: usize) -> [T; 2] {
		self.storage.velocity(i)
	}

	pub fn set_position(&mut self, i: usize, pos: [T; 2]) {
		self.storage.set_position(i, pos)
	}

	pub fn set_velocity(&mut self, i: usize, vel: [T; 2]) {
		self.storage.set_velocity(i, vel)
	}

	/// Positions in particle order
	pub fn positions(&self) -> impl ExactSizeIterator<Item = [T; 2]> + '_ {
		(0..self.len()).map(move |i| self.storage.position(i))
	}

	pub fn positions_snapshot(&self) -> Vec<[T; 2]> {
		self.positions().collect()
	}

	/// Acceleration each particle would receive from the next step, without stepping
	pub fn accelerations(&self) -> Vec<[T; 2]> {
		let (gravity, softening) = (self.settings.gravity, self.settings.softening);
		match &self.storage {
			Storage::Aos(bodies) => {
				let mut out = vec![[T::zero(); 2]; bodies.len()];
				forces::gravity::accumulate_records(bodies, 0, &mut out, gravity, softening);
				out
			}
			Storage::Soa(Columns { x, y, .. }) => x
				.iter()
				.zip(y.iter())
				.map(|(&xi, &yi)| pull_columns(xi, yi, x, y, gravity, softening))
				.collect(),
		}
	}

	/// Advances every particle by one unit time step
	///
	/// All velocities are updated from the positions at step start, then all positions from
	/// the updated velocities.
	pub fn step(&mut self) {
		self.accumulate();
		self.drift();
	}
}
