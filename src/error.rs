use std::{collections::TryReserveError, fmt};

pub type Result<T> = std::result::Result<T, Error>;

/// Failure to build a store or a scheduler
///
/// Stepping never fails: once a store exists, every state it can reach is valid.
#[derive(Debug)]
pub enum Error {
	/// World width and height must be finite and positive
	InvalidDimensions { width: f64, height: f64 },
	/// Softening must be finite and positive
	InvalidSoftening(f64),
	/// Gravitational constant must be finite
	InvalidGravity(f64),
	/// Jitter must be finite and non-negative
	InvalidJitter(f64),
	/// A scheduler needs at least one worker
	InvalidWorkers(usize),
	/// Particle storage could not be reserved
	Allocation(TryReserveError),
	/// Worker pool could not be spawned
	ThreadPool(rayon::ThreadPoolBuildError),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::InvalidDimensions { width, height } => {
				write!(f, "invalid world size {}x{}", width, height)
			}
			Self::InvalidSoftening(v) => write!(f, "softening must be positive, got {}", v),
			Self::InvalidGravity(v) => write!(f, "gravitational constant must be finite, got {}", v),
			Self::InvalidJitter(v) => write!(f, "jitter must be non-negative, got {}", v),
			Self::InvalidWorkers(v) => write!(f, "worker count must be at least 1, got {}", v),
			Self::Allocation(e) => write!(f, "cannot allocate particle storage: {}", e),
			Self::ThreadPool(e) => write!(f, "cannot build worker pool: {}", e),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Allocation(e) => Some(e),
			Self::ThreadPool(e) => Some(e),
			_ => None,
		}
	}
}

impl From<TryReserveError> for Error {
	fn from(e: TryReserveError) -> Self {
		Self::Allocation(e)
	}
}

impl From<rayon::ThreadPoolBuildError> for Error {
	fn from(e: rayon::ThreadPoolBuildError) -> Self {
		Self::ThreadPool(e)
	}
}
