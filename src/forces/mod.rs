pub mod gravity;

use crate::{layout::*, util::*};

use itertools::izip;

/// Phase A tail for records: adds precomputed accelerations to velocities
pub fn kick_records<T: Coord>(bodies: &mut [Particle<T>], accelerations: &[[T; 2]]) {
	for (body, acc) in bodies.iter_mut().zip(accelerations.iter()) {
		body.vel[0] += acc[0];
		body.vel[1] += acc[1];
	}
}

/// Phase B for records: explicit Euler with unit time step
pub fn drift_records<T: Coord>(bodies: &mut [Particle<T>]) {
	for body in bodies {
		body.pos[0] += body.vel[0];
		body.pos[1] += body.vel[1];
	}
}

/// Phase B for columns
pub fn drift_columns<T: Coord>(x: &mut [T], y: &mut [T], vx: &[T], vy: &[T]) {
	for (x, y, vx, vy) in izip!(x, y, vx, vy) {
		*x += *vx;
		*y += *vy;
	}
}

impl<T: Coord> Store<T> {
	/// Phase A on the calling thread
	pub(crate) fn accumulate(&mut self) {
		let (gravity, softening) = (self.settings.gravity, self.settings.softening);
		match &mut self.storage {
			Storage::Aos(bodies) => {
				gravity::accumulate_records(bodies, 0, &mut self.scratch, gravity, softening);
				kick_records(bodies, &self.scratch);
			}
			Storage::Soa(Columns { x, y, vx, vy }) => {
				gravity::accumulate_columns(x, y, 0, vx, vy, gravity, softening);
			}
		}
	}

	/// Phase B on the calling thread
	pub(crate) fn drift(&mut self) {
		match &mut self.storage {
			Storage::Aos(bodies) => drift_records(bodies),
			Storage::Soa(Columns { x, y, vx, vy }) => drift_columns(x, y, vx, vy),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_kick_then_drift() {
		let mut bodies = vec![
			Particle {
				pos: [1.0f64, 2.0],
				vel: [0.5, -0.5],
			};
			2
		];
		kick_records(&mut bodies, &[[0.25, 0.25], [-0.5, 0.5]]);
		assert_eq!(bodies[0].vel, [0.75, -0.25]);
		assert_eq!(bodies[1].vel, [0.0, 0.0]);
		drift_records(&mut bodies);
		assert_eq!(bodies[0].pos, [1.75, 1.75]);
		assert_eq!(bodies[1].pos, [1.0, 2.0]);
	}

	#[test]
	fn test_drift_columns() {
		let (mut x, mut y) = (vec![0.0f32, 1.0], vec![2.0f32, 3.0]);
		drift_columns(&mut x, &mut y, &[1.0, -1.0], &[0.5, 0.0]);
		assert_eq!(x, [1.0, 0.0]);
		assert_eq!(y, [2.5, 3.0]);
	}
}
