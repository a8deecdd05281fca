//! Scenario configuration loaded from YAML
//!
//! ```yaml
//! precision: double   # single | double
//! workers: 8          # omit to step on the calling thread
//! world:
//!   count: 8092
//!   width: 1366.0
//!   height: 768.0
//!   gravity: 1.0
//!   softening: 6.0
//!   jitter: 0.2
//!   seed: 42
//!   layout: soa       # aos | soa
//! ```
//!
//! Every key is optional and falls back to its default. The world block is read in double
//! precision and cast to the selected precision when the store is built.

use crate::{error::*, layout::Settings, util::*};

use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
	/// Floating-point precision of the store
	pub precision: Precision,
	/// Worker count of the scheduler, `None` for serial stepping
	pub workers: Option<usize>,
	/// World settings
	pub world: Settings<f64>,
}

impl ScenarioConfig {
	/// World settings in the precision `T`, validated
	pub fn settings<T: Coord>(&self) -> Result<Settings<T>> {
		let settings = self.world.cast::<T>();
		settings.validate()?;
		Ok(settings)
	}
}
