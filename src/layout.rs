use crate::{error::*, util::*};

use serde::Deserialize;

/// Physical grouping of particle attributes in memory
///
/// Both layouts produce the same trajectories; only cache behavior differs.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
	/// One `Particle` record per particle
	Aos,
	/// Four parallel columns `x`, `y`, `vx`, `vy`
	#[default]
	Soa,
}

impl std::fmt::Display for Layout {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			Self::Aos => "aos",
			Self::Soa => "soa",
		})
	}
}

impl std::str::FromStr for Layout {
	type Err = String;
	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s {
			"aos" => Ok(Self::Aos),
			"soa" => Ok(Self::Soa),
			_ => Err(format!("unknown layout `{}`", s)),
		}
	}
}

/// Settings for the simulated world
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(
	default,
	deny_unknown_fields,
	bound(deserialize = "T: Coord + Deserialize<'de>")
)]
pub struct Settings<T> {
	/// Number of particles
	pub count: usize,
	/// World width, positions are drawn in `[0, width)`
	pub width: T,
	/// World height, positions are drawn in `[0, height)`
	pub height: T,
	/// Gravitational constant
	pub gravity: T,
	/// Added to every squared distance, must be positive
	pub softening: T,
	/// Half-width of the uniform velocity noise added at population
	pub jitter: T,
	/// Seed of the initial configuration
	pub seed: u64,
	/// Memory layout of the store
	pub layout: Layout,
}

impl<T: Coord> Default for Settings<T> {
	fn default() -> Self {
		Self {
			count: 8092,
			width: T::cast(1366.0),
			height: T::cast(768.0),
			gravity: T::one(),
			softening: T::cast(6.0),
			jitter: T::cast(0.2),
			seed: 0,
			layout: Layout::default(),
		}
	}
}

impl<T: Coord> Settings<T> {
	/// Check whether the settings are valid
	pub fn validate(&self) -> Result<()> {
		let (width, height) = (self.width.widen(), self.height.widen());
		if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
			return Err(Error::InvalidDimensions { width, height });
		}
		if !(self.softening.widen().is_finite() && self.softening > T::zero()) {
			return Err(Error::InvalidSoftening(self.softening.widen()));
		}
		if !self.gravity.widen().is_finite() {
			return Err(Error::InvalidGravity(self.gravity.widen()));
		}
		// The jitter range spans 2J, which must stay representable
		if !((self.jitter + self.jitter).widen().is_finite() && self.jitter >= T::zero()) {
			return Err(Error::InvalidJitter(self.jitter.widen()));
		}
		Ok(())
	}

	/// Same settings in another precision
	pub fn cast<U: Coord>(&self) -> Settings<U> {
		Settings {
			count: self.count,
			width: U::cast(self.width.widen()),
			height: U::cast(self.height.widen()),
			gravity: U::cast(self.gravity.widen()),
			softening: U::cast(self.softening.widen()),
			jitter: U::cast(self.jitter.widen()),
			seed: self.seed,
			layout: self.layout,
		}
	}
}

/// One particle record, unit mass
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle<T> {
	pub pos: [T; 2],
	pub vel: [T; 2],
}

impl<T: Coord> Default for Particle<T> {
	fn default() -> Self {
		Particle {
			pos: [T::zero(); 2],
			vel: [T::zero(); 2],
		}
	}
}

/// Parallel coordinate columns, indexed by particle id
#[derive(Clone, Debug, PartialEq)]
pub struct Columns<T> {
	pub x: Vec<T>,
	pub y: Vec<T>,
	pub vx: Vec<T>,
	pub vy: Vec<T>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Storage<T> {
	Aos(Vec<Particle<T>>),
	Soa(Columns<T>),
}

impl<T: Coord> Storage<T> {
	/// Zeroed storage for `count` particles
	///
	/// Fails without leaking partial storage if any sequence cannot be reserved.
	pub(crate) fn zeroed(layout: Layout, count: usize) -> Result<Self> {
		Ok(match layout {
			Layout::Aos => Storage::Aos(zeroed_vec(count, Particle::default())?),
			Layout::Soa => Storage::Soa(Columns {
				x: zeroed_vec(count, T::zero())?,
				y: zeroed_vec(count, T::zero())?,
				vx: zeroed_vec(count, T::zero())?,
				vy: zeroed_vec(count, T::zero())?,
			}),
		})
	}

	pub fn layout(&self) -> Layout {
		match self {
			Storage::Aos(_) => Layout::Aos,
			Storage::Soa(_) => Layout::Soa,
		}
	}

	pub fn len(&self) -> usize {
		match self {
			Storage::Aos(particles) => particles.len(),
			Storage::Soa(columns) => columns.x.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn position(&self, i: usize) -> [T; 2] {
		match self {
			Storage::Aos(particles) => particles[i].pos,
			Storage::Soa(columns) => [columns.x[i], columns.y[i]],
		}
	}

	pub fn velocity(&self, i: usize) -> [T; 2] {
		match self {
			Storage::Aos(particles) => particles[i].vel,
			Storage::Soa(columns) => [columns.vx[i], columns.vy[i]],
		}
	}

	pub fn set_position(&mut self, i: usize, pos: [T; 2]) {
		match self {
			Storage::Aos(particles) => particles[i].pos = pos,
			Storage::Soa(columns) => {
				columns.x[i] = pos[0];
				columns.y[i] = pos[1];
			}
		}
	}

	pub fn set_velocity(&mut self, i: usize, vel: [T; 2]) {
		match self {
			Storage::Aos(particles) => particles[i].vel = vel,
			Storage::Soa(columns) => {
				columns.vx[i] = vel[0];
				columns.vy[i] = vel[1];
			}
		}
	}
}

pub(crate) fn zeroed_vec<V: Clone>(count: usize, zero: V) -> Result<Vec<V>> {
	let mut v = Vec::new();
	v.try_reserve_exact(count)?;
	v.resize(count, zero);
	Ok(v)
}

/// Fixed-size population of particles with its world settings
///
/// Owned by the driving loop. Stepping borrows it mutably for the duration of one step.
#[derive(Clone, Debug)]
pub struct Store<T> {
	pub(crate) storage: Storage<T>,
	/// Per-particle acceleration buffer, only used by the AoS layout
	pub(crate) scratch: Vec<[T; 2]>,
	pub(crate) settings: Settings<T>,
}
