//! Everything needed to place a dimension pot in the world
//!

use crate::prelude::*;
use bevy::prelude::*;

#[derive(Bundle)]
pub struct DimensionPotBundle {
	name: Name,
	pot_state: PotState,
	transform: Transform,
}

impl DimensionPotBundle {
	/// Create a new instance of [DimensionPotBundle] with the default [PotConfig] at `translation`
	pub fn new(translation: Vec3) -> Self {
		DimensionPotBundle::with_config(PotConfig::default(), translation)
	}
	/// Create a new instance of [DimensionPotBundle] from an authored [PotConfig]
	pub fn with_config(config: PotConfig, translation: Vec3) -> Self {
		DimensionPotBundle {
			name: Name::new("dimension pot"),
			pot_state: PotState::new(config),
			transform: Transform::from_translation(translation),
		}
	}
	/// Create a new instance of [DimensionPotBundle] where the [PotConfig] is read from disk
	pub fn from_ron(path: &str, translation: Vec3) -> Result<Self, LoadError> {
		Ok(DimensionPotBundle::with_config(
			PotConfig::from_ron(path)?,
			translation,
		))
	}
}
