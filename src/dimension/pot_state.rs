//! The [PotState] carried by every dimension pot, recording the handles to
//! its pocket world and portals alongside the authored [PotConfig]
//!

use crate::prelude::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// An audible cue, a path to an audio resource and the volume adjustment in decibels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundSpecifier {
	/// Path of the audio resource
	path: String,
	/// Volume adjustment in decibels
	#[serde(default)]
	volume: f32,
}

impl SoundSpecifier {
	/// Create a new instance of [SoundSpecifier]
	pub fn new(path: &str, volume: f32) -> Self {
		SoundSpecifier {
			path: path.to_string(),
			volume,
		}
	}
	pub fn get_path(&self) -> &str {
		&self.path
	}
	pub fn get_volume(&self) -> f32 {
		self.volume
	}
}

/// Authored configuration of a pot. Supplied when the pot is defined and never
/// computed or modified afterwards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PotConfig {
	/// Path of the world definition loaded into the pocket dimension, relative
	/// to the asset root of the [crate::prelude::WorldManager]
	world_path: String,
	/// Prototype spawned on the pot while it is open
	pot_portal_prototype: String,
	/// Prototype spawned once inside the pocket dimension
	dimension_portal_prototype: String,
	/// Played when the pot portal opens
	open_sound: SoundSpecifier,
	/// Played when the pot portal closes
	close_sound: SoundSpecifier,
}

impl Default for PotConfig {
	fn default() -> Self {
		PotConfig {
			world_path: "maps/pocket_dimension.ron".to_string(),
			pot_portal_prototype: "PortalRed".to_string(),
			dimension_portal_prototype: "PortalBlue".to_string(),
			open_sound: SoundSpecifier::new("/Audio/Machines/high_tech_confirm.ogg", -2.0),
			close_sound: SoundSpecifier::new("/Audio/Machines/button.ogg", 0.0),
		}
	}
}

impl PotConfig {
	/// Create a [PotConfig] with the default prototypes and sounds which
	/// loads the world definition found at `world_path`
	pub fn with_world_path(world_path: &str) -> Self {
		PotConfig {
			world_path: world_path.to_string(),
			..default()
		}
	}
	/// Override the pair of portal prototypes, `pot` is spawned on the pot and `dimension` inside the pocket world
	pub fn with_prototypes(mut self, pot: &str, dimension: &str) -> Self {
		self.pot_portal_prototype = pot.to_string();
		self.dimension_portal_prototype = dimension.to_string();
		self
	}
	/// Override the open and close sound cues
	pub fn with_sounds(mut self, open: SoundSpecifier, close: SoundSpecifier) -> Self {
		self.open_sound = open;
		self.close_sound = close;
		self
	}
	/// Read a [PotConfig] from a `ron` file
	pub fn from_ron(path: &str) -> Result<Self, LoadError> {
		read_ron_file(std::path::Path::new(path))
	}
	pub fn get_world_path(&self) -> &str {
		&self.world_path
	}
	pub fn get_pot_portal_prototype(&self) -> &str {
		&self.pot_portal_prototype
	}
	pub fn get_dimension_portal_prototype(&self) -> &str {
		&self.dimension_portal_prototype
	}
	pub fn get_open_sound(&self) -> &SoundSpecifier {
		&self.open_sound
	}
	pub fn get_close_sound(&self) -> &SoundSpecifier {
		&self.close_sound
	}
}

/// Which state the portal link of a pot is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PotPhase {
	/// Never activated, no pocket world exists yet
	Uninitialized,
	/// No pot portal, the pot itself is linked to the dimension portal
	Closed,
	/// The pot portal exists and is linked to the dimension portal
	Open,
}

/// Per-pot record of the pocket world and the two portals. The pocket world
/// and the dimension portal are created together on the first activation and
/// live exactly as long as the pot, the pot portal only exists while open
#[derive(Component, Debug, Default)]
pub struct PotState {
	/// Ambient entity of the pocket world instance, owned by this pot alone
	pocket_world: Option<Entity>,
	/// The portal attached to the pot, present iff the pot is open
	pot_portal: Option<Entity>,
	/// The permanent portal inside the pocket world
	dimension_portal: Option<Entity>,
	/// Authored configuration
	config: PotConfig,
}

impl PotState {
	/// Create a new uninitialized [PotState]
	pub fn new(config: PotConfig) -> Self {
		PotState {
			config,
			..default()
		}
	}
	pub fn get_pocket_world(&self) -> Option<Entity> {
		self.pocket_world
	}
	pub fn get_pot_portal(&self) -> Option<Entity> {
		self.pot_portal
	}
	pub fn get_dimension_portal(&self) -> Option<Entity> {
		self.dimension_portal
	}
	pub fn get_config(&self) -> &PotConfig {
		&self.config
	}
	/// Record the pocket world and its portal in one step so nothing ever
	/// observes one without the other
	pub(crate) fn set_pocket_dimension(&mut self, pocket_world: Entity, dimension_portal: Entity) {
		self.pocket_world = Some(pocket_world);
		self.dimension_portal = Some(dimension_portal);
	}
	pub(crate) fn set_pot_portal(&mut self, portal: Option<Entity>) {
		self.pot_portal = portal;
	}
	/// Derive the [PotPhase] from which handles are present
	pub fn phase(&self) -> PotPhase {
		match (self.dimension_portal, self.pot_portal) {
			(None, _) => PotPhase::Uninitialized,
			(Some(_), None) => PotPhase::Closed,
			(Some(_), Some(_)) => PotPhase::Open,
		}
	}
}

// #[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn default_config() {
		let config = PotConfig::default();
		assert_eq!("maps/pocket_dimension.ron", config.get_world_path());
		assert_eq!("PortalRed", config.get_pot_portal_prototype());
		assert_eq!("PortalBlue", config.get_dimension_portal_prototype());
		assert_eq!(-2.0, config.get_open_sound().get_volume());
	}
	#[test]
	fn new_state_is_uninitialized() {
		let state = PotState::new(PotConfig::default());
		assert_eq!(PotPhase::Uninitialized, state.phase());
		assert!(state.get_pocket_world().is_none());
		assert!(state.get_dimension_portal().is_none());
	}
	#[test]
	fn phase_follows_handles() {
		let mut state = PotState::default();
		state.set_pocket_dimension(Entity::from_raw(1), Entity::from_raw(2));
		assert_eq!(PotPhase::Closed, state.phase());
		state.set_pot_portal(Some(Entity::from_raw(3)));
		assert_eq!(PotPhase::Open, state.phase());
		state.set_pot_portal(None);
		assert_eq!(PotPhase::Closed, state.phase());
	}
	#[test]
	fn config_from_ron_str() {
		let data = r#"(
			world_path: "maps/other.ron",
			open_sound: (path: "/Audio/open.ogg"),
		)"#;
		let config: PotConfig = ron::de::from_str(data).unwrap();
		assert_eq!("maps/other.ron", config.get_world_path());
		assert_eq!("/Audio/open.ogg", config.get_open_sound().get_path());
		assert_eq!(0.0, config.get_open_sound().get_volume());
		assert_eq!("PortalRed", config.get_pot_portal_prototype());
	}
	#[test]
	fn config_from_ron_file() {
		let path = env!("CARGO_MANIFEST_DIR").to_string() + "/assets/pot_config.ron";
		let config = PotConfig::from_ron(&path).unwrap();
		assert_eq!("maps/pocket_dimension.ron", config.get_world_path());
		assert_eq!("PortalBlue", config.get_dimension_portal_prototype());
	}
}
