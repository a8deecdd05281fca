use crate::{layout::*, util::*};

use rand::{rngs::StdRng, SeedableRng};

impl<T> Store<T>
where
	T: Coord + rand::distributions::uniform::SampleUniform,
{
	/// Fills the store with a roughly orbiting configuration around the world center
	///
	/// Every particle draws, in order, its position then its two jitter components from a
	/// generator seeded with `seed`, so equal seeds give equal stores whatever the layout.
	pub fn populate(&mut self, seed: u64) {
		let mut rng = StdRng::seed_from_u64(seed);
		let Settings {
			width,
			height,
			gravity,
			jitter,
			..
		} = self.settings;
		let two = T::one() + T::one();
		let (cx, cy) = (width / two, height / two);

		for i in 0..self.storage.len() {
			let pos = sample_in_rect(&mut rng, width, height);
			let [tx, ty] = tangential_velocity(pos[0] - cx, pos[1] - cy, gravity);
			let jx = sample_symmetric(&mut rng, jitter);
			let jy = sample_symmetric(&mut rng, jitter);
			self.storage.set_position(i, pos);
			self.storage.set_velocity(i, [tx + jx, ty + jy]);
		}
		log::debug!(
			"Populated {} particles ({}, {}) with seed {}",
			self.storage.len(),
			self.storage.layout(),
			T::PRECISION,
			seed
		);
	}

	/// Re-populates in place, keeping the particle count
	pub fn reset(&mut self, seed: u64) {
		self.settings.seed = seed;
		self.populate(seed);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn settings(layout: Layout) -> Settings<f64> {
		Settings {
			count: 500,
			layout,
			seed: 42,
			..Settings::default()
		}
	}

	#[test]
	fn test_populate_in_bounds() {
		let store = Store::new(settings(Layout::Aos)).unwrap();
		for [x, y] in store.positions() {
			assert!((0.0..1366.0).contains(&x));
			assert!((0.0..768.0).contains(&y));
		}
	}

	#[test]
	fn test_populate_deterministic() {
		let a = Store::new(settings(Layout::Soa)).unwrap();
		let b = Store::new(settings(Layout::Soa)).unwrap();
		assert_eq!(a.storage, b.storage);

		let mut other = settings(Layout::Soa);
		other.seed = 43;
		let c = Store::new(other).unwrap();
		assert_ne!(a.positions_snapshot(), c.positions_snapshot());
	}

	#[test]
	fn test_populate_layout_independent() {
		let aos = Store::new(settings(Layout::Aos)).unwrap();
		let soa = Store::new(settings(Layout::Soa)).unwrap();
		for i in 0..aos.len() {
			assert_eq!(aos.position(i), soa.position(i));
			assert_eq!(aos.velocity(i), soa.velocity(i));
		}
	}

	#[test]
	fn test_velocity_is_tangential_plus_jitter() {
		let mut s = settings(Layout::Aos);
		s.jitter = 0.0;
		let store = Store::new(s).unwrap();
		for i in 0..store.len() {
			let [x, y] = store.position(i);
			let [vx, vy] = store.velocity(i);
			let (dx, dy) = (x - 683.0, y - 384.0);
			assert!((vx * dx + vy * dy).abs() < 1e-9);
			let distance = (dx * dx + dy * dy).sqrt();
			let speed = (vx * vx + vy * vy).sqrt();
			// |v| = 0.1 G r / sqrt(r)
			assert!((speed - 0.1 * distance.sqrt()).abs() < 1e-9);
		}
	}

	#[test]
	fn test_jitter_bounds() {
		let mut s = settings(Layout::Soa);
		s.gravity = 0.0;
		let store = Store::new(s).unwrap();
		for i in 0..store.len() {
			let [vx, vy] = store.velocity(i);
			assert!(vx.abs() <= 0.2 && vy.abs() <= 0.2);
		}
	}

	#[test]
	fn test_reset_keeps_count() {
		let mut store = Store::new(settings(Layout::Aos)).unwrap();
		let before = store.positions_snapshot();
		for _ in 0..3 {
			store.step();
		}
		store.reset(7);
		assert_eq!(store.len(), 500);
		assert_eq!(store.settings().seed, 7);
		assert_ne!(store.positions_snapshot(), before);
		for [x, y] in store.positions() {
			assert!((0.0..1366.0).contains(&x));
			assert!((0.0..768.0).contains(&y));
		}
	}
}
