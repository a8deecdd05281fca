use num_traits::{cast::FromPrimitive, real::Real, sign::Signed, ToPrimitive};
#[cfg(feature = "rand")]
use rand::Rng;
use serde::Deserialize;
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

/// Floating-point precision of a store
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
	/// `f32`, favors throughput
	#[default]
	Single,
	/// `f64`, favors reproducibility
	Double,
}

impl std::fmt::Display for Precision {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			Self::Single => "single",
			Self::Double => "double",
		})
	}
}

impl std::str::FromStr for Precision {
	type Err = String;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"single" | "f32" => Ok(Self::Single),
			"double" | "f64" => Ok(Self::Double),
			_ => Err(format!("unknown precision `{}`", s)),
		}
	}
}

/// Scalar type of every coordinate
pub trait Coord:
	AddAssign<Self>
	+ DivAssign<Self>
	+ FromPrimitive
	+ ToPrimitive
	+ Real
	+ Signed
	+ SubAssign<Self>
	+ MulAssign<Self>
	+ std::iter::Sum
	+ std::fmt::Debug
	+ Send
	+ Sync
	+ 'static
{
	const PRECISION: Precision;

	/// Lossy conversion from a double literal
	fn cast(v: f64) -> Self;

	fn widen(self) -> f64 {
		self.to_f64().unwrap_or(f64::NAN)
	}
}

impl Coord for f32 {
	const PRECISION: Precision = Precision::Single;

	fn cast(v: f64) -> Self {
		v as f32
	}
}

impl Coord for f64 {
	const PRECISION: Precision = Precision::Double;

	fn cast(v: f64) -> Self {
		v
	}
}

/// Tangential orbital velocity around the world center
///
/// `(dx, dy)` is the displacement from the center. The divisor is the square root of the
/// Euclidean distance, i.e. a fourth root of the squared displacement. The center itself
/// gets no tangential component.
pub fn tangential_velocity<T: Coord>(dx: T, dy: T, gravity: T) -> [T; 2] {
	let distance = (dx * dx + dy * dy).sqrt();
	if distance.is_zero() {
		return [T::zero(); 2];
	}
	let root = distance.sqrt();
	let k = T::cast(0.1);
	[-dy / root * gravity * k, dx / root * gravity * k]
}

/// Uniform random point in `[0, width) × [0, height)`
#[cfg(feature = "rand")]
pub fn sample_in_rect<T, R: Rng>(rng: &mut R, width: T, height: T) -> [T; 2]
where
	T: Coord + rand::distributions::uniform::SampleUniform,
{
	[
		rng.gen_range(T::zero()..width),
		rng.gen_range(T::zero()..height),
	]
}

/// Uniform random value in `[-ray, ray]`
#[cfg(feature = "rand")]
pub fn sample_symmetric<T, R: Rng>(rng: &mut R, ray: T) -> T
where
	T: Coord + rand::distributions::uniform::SampleUniform,
{
	rng.gen_range(-ray..=ray)
}
