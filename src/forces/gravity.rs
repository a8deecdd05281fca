use crate::{layout::Particle, util::*};

use itertools::izip;

/// Softened acceleration pulling a unit mass at `(xi, yi)` toward every body of the columns
///
/// The self term is included: its displacement is zero, so it adds exactly zero.
#[inline]
pub fn pull_columns<T: Coord>(xi: T, yi: T, xs: &[T], ys: &[T], gravity: T, softening: T) -> [T; 2] {
	let mut a_x = T::zero();
	let mut a_y = T::zero();
	for (&xj, &yj) in xs.iter().zip(ys.iter()) {
		let dx = xj - xi;
		let dy = yj - yi;
		let dist_sq = dx * dx + dy * dy + softening;
		let inv_dist = dist_sq.sqrt().recip();
		let inv_dist3 = inv_dist * inv_dist * inv_dist;
		a_x += inv_dist3 * dx * gravity;
		a_y += inv_dist3 * dy * gravity;
	}
	[a_x, a_y]
}

/// Same as [`pull_columns`] over particle records
#[inline]
pub fn pull_records<T: Coord>(pos: [T; 2], bodies: &[Particle<T>], gravity: T, softening: T) -> [T; 2] {
	let mut a_x = T::zero();
	let mut a_y = T::zero();
	for body in bodies {
		let dx = body.pos[0] - pos[0];
		let dy = body.pos[1] - pos[1];
		let dist_sq = dx * dx + dy * dy + softening;
		let inv_dist = dist_sq.sqrt().recip();
		let inv_dist3 = inv_dist * inv_dist * inv_dist;
		a_x += inv_dist3 * dx * gravity;
		a_y += inv_dist3 * dy * gravity;
	}
	[a_x, a_y]
}

/// Phase A over the index range `start..start + vx.len()` of a column store
///
/// `x` and `y` are the full position columns as they stood at phase start.
pub fn accumulate_columns<T: Coord>(
	x: &[T],
	y: &[T],
	start: usize,
	vx: &mut [T],
	vy: &mut [T],
	gravity: T,
	softening: T,
) {
	for (xi, yi, vx, vy) in izip!(&x[start..], &y[start..], vx.iter_mut(), vy.iter_mut()) {
		let [a_x, a_y] = pull_columns(*xi, *yi, x, y, gravity, softening);
		*vx += a_x;
		*vy += a_y;
	}
}

/// Phase A accelerations for the index range `start..start + out.len()` of a record store
pub fn accumulate_records<T: Coord>(
	bodies: &[Particle<T>],
	start: usize,
	out: &mut [[T; 2]],
	gravity: T,
	softening: T,
) {
	for (body, acc) in bodies[start..].iter().zip(out.iter_mut()) {
		*acc = pull_records(body.pos, bodies, gravity, softening);
	}
}
