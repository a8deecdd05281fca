//! Driving loop between a store and whatever consumes it
//!
//! The loop steps the store, hands it to a [`Presenter`] and acts on the returned
//! [`Control`]. Quitting ends the loop with an [`Exit`] and releases the store in order.

use crate::{error::*, layout::*, scheduler::Scheduler, util::*};

/// Request from a presenter
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Control {
	Continue,
	/// Re-populate the store with a fresh seed
	Reset,
	/// Stop stepping and release the store
	Quit,
}

/// Consumer of the state after each step
pub trait Presenter<T> {
	fn present(&mut self, store: &Store<T>) -> Control;
}

impl<T, F: FnMut(&Store<T>) -> Control> Presenter<T> for F {
	fn present(&mut self, store: &Store<T>) -> Control {
		self(store)
	}
}

/// How steps are executed
#[derive(Debug)]
pub enum Executor {
	Serial,
	Parallel(Scheduler),
}

impl Executor {
	/// Serial for `None`, a pool of `workers` threads otherwise
	pub fn new(workers: Option<usize>) -> Result<Self> {
		Ok(match workers {
			None => Executor::Serial,
			Some(workers) => Executor::Parallel(Scheduler::new(workers)?),
		})
	}

	pub fn step<T: Coord>(&mut self, store: &mut Store<T>) {
		match self {
			Executor::Serial => store.step(),
			Executor::Parallel(scheduler) => scheduler.step(store),
		}
	}
}

/// How a run ended
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Exit {
	pub steps: u64,
	pub resets: u64,
}

/// A store together with the executor stepping it
#[derive(Debug)]
pub struct Simulation<T> {
	store: Store<T>,
	executor: Executor,
	steps: u64,
	resets: u64,
}

impl<T> Simulation<T>
where
	T: Coord + rand::distributions::uniform::SampleUniform,
{
	/// Builds and populates a store
	pub fn new(settings: Settings<T>, executor: Executor) -> Result<Self> {
		Ok(Self {
			store: Store::new(settings)?,
			executor,
			steps: 0,
			resets: 0,
		})
	}

	pub fn store(&self) -> &Store<T> {
		&self.store
	}

	pub fn steps(&self) -> u64 {
		self.steps
	}

	pub fn step(&mut self) {
		self.executor.step(&mut self.store);
		self.steps += 1;
	}

	/// Re-populates the store, each reset with a new seed derived from the settings seed
	pub fn reset(&mut self) {
		self.resets += 1;
		let seed = self.store.settings.seed.wrapping_add(1);
		log::debug!("Reset #{} with seed {}", self.resets, seed);
		self.store.reset(seed);
	}

	/// Replaces the store with a new one built from `settings`
	///
	/// On error the current store is kept.
	pub fn reconfigure(&mut self, settings: Settings<T>) -> Result<()> {
		let store = Store::new(settings)?;
		log::debug!(
			"Reconfigured to {} particles ({}, {})",
			store.len(),
			store.layout(),
			T::PRECISION
		);
		std::mem::replace(&mut self.store, store).release();
		self.steps = 0;
		self.resets = 0;
		Ok(())
	}

	/// Steps until the presenter quits
	pub fn run<P: Presenter<T>>(mut self, presenter: &mut P) -> Exit {
		loop {
			match presenter.present(&self.store) {
				Control::Continue => self.step(),
				Control::Reset => self.reset(),
				Control::Quit => break,
			}
		}
		let exit = Exit {
			steps: self.steps,
			resets: self.resets,
		};
		self.store.release();
		exit
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn settings() -> Settings<f64> {
		Settings {
			count: 32,
			seed: 5,
			..Settings::default()
		}
	}

	#[test]
	fn test_run_until_quit() {
		let sim = Simulation::new(settings(), Executor::Serial).unwrap();
		let mut frames = 0;
		let exit = sim.run(&mut |store: &Store<f64>| {
			assert_eq!(store.len(), 32);
			frames += 1;
			match frames {
				3 => Control::Reset,
				6 => Control::Quit,
				_ => Control::Continue,
			}
		});
		assert_eq!(exit, Exit { steps: 4, resets: 1 });
	}

	#[test]
	fn test_reset_draws_new_configuration() {
		let mut sim = Simulation::new(settings(), Executor::new(Some(2)).unwrap()).unwrap();
		let first = sim.store().positions_snapshot();
		sim.step();
		sim.reset();
		assert_eq!(sim.store().settings().seed, 6);
		assert_ne!(sim.store().positions_snapshot(), first);
		sim.reset();
		assert_eq!(sim.store().settings().seed, 7);
	}

	#[test]
	fn test_reconfigure() {
		let mut sim = Simulation::new(settings(), Executor::Serial).unwrap();
		sim.step();
		sim.reconfigure(Settings {
			count: 10,
			layout: Layout::Aos,
			..settings()
		})
		.unwrap();
		assert_eq!(sim.store().len(), 10);
		assert_eq!(sim.store().layout(), Layout::Aos);
		assert_eq!(sim.steps(), 0);

		let err = sim.reconfigure(Settings {
			softening: -1.0,
			..settings()
		});
		assert!(matches!(err, Err(Error::InvalidSoftening(_))));
		assert_eq!(sim.store().len(), 10);
	}

	#[test]
	fn test_executors_agree() {
		let mut serial = Simulation::new(settings(), Executor::Serial).unwrap();
		let mut parallel = Simulation::new(settings(), Executor::new(Some(3)).unwrap()).unwrap();
		for _ in 0..5 {
			serial.step();
			parallel.step();
		}
		for (a, b) in serial
			.store()
			.positions()
			.zip(parallel.store().positions())
		{
			assert!((a[0] - b[0]).abs() < 1e-10 * a[0].abs().max(1.0));
			assert!((a[1] - b[1]).abs() < 1e-10 * a[1].abs().max(1.0));
		}
	}
}
