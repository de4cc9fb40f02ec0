//! Creating isolated world instances and populating them from world
//! definitions authored in `ron`
//!
//! A world instance is an ambient entity carrying [WorldInstance], every root
//! entity of a loaded definition becomes a child of it so that despawning the
//! ambient entity destroys the whole world
//!

use std::{
	collections::HashMap,
	path::{Path, PathBuf},
};

use bevy::prelude::*;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

/// Failure to read an authored `ron` resource
#[derive(Debug, Error)]
pub enum LoadError {
	/// The resource could not be opened
	#[error("Unable to open {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	/// The resource was found but is not valid for the expected type
	#[error("Unable to parse {path}: {source}")]
	Parse {
		path: PathBuf,
		#[source]
		source: ron::error::SpannedError,
	},
}

/// Deserialise a `ron` file at `path`
pub fn read_ron_file<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
	let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
		path: path.to_path_buf(),
		source,
	})?;
	ron::de::from_reader(file).map_err(|source| LoadError::Parse {
		path: path.to_path_buf(),
		source,
	})
}

/// Marks an entity as a surface which can be walked on and host a portal
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SpatialGrid {
	/// Length of each tile side
	tile_size: f32,
}

impl SpatialGrid {
	pub fn new(tile_size: f32) -> Self {
		SpatialGrid { tile_size }
	}
	pub fn get_tile_size(&self) -> f32 {
		self.tile_size
	}
}

/// Whether gravity applies within a world instance
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gravity {
	pub enabled: bool,
}

/// The ambient entity of an isolated world instance
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldInstance {
	/// Unique id handed out by the [WorldManager]
	id: u32,
}

impl WorldInstance {
	pub fn get_id(&self) -> u32 {
		self.id
	}
}

/// A grid carried by a root entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridDefinition {
	pub tile_size: f32,
}

/// Any entity placed upon a root, positioned relative to the root's origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDefinition {
	pub name: String,
	#[serde(default)]
	pub offset: [f32; 3],
}

/// A top-level entity of a world definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootDefinition {
	pub name: String,
	#[serde(default)]
	pub origin: [f32; 3],
	#[serde(default)]
	pub grid: Option<GridDefinition>,
	#[serde(default)]
	pub entities: Vec<EntityDefinition>,
}

/// The serialised form of a world
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldDefinition {
	/// When present the ambient entity carries [Gravity] set to this value
	pub gravity: Option<bool>,
	pub roots: Vec<RootDefinition>,
}

/// Creates world instances and resolves world definitions, either registered
/// in memory or read from disk beneath `asset_root`
#[derive(Resource, Debug)]
pub struct WorldManager {
	/// Directory that world definition paths are relative to
	asset_root: PathBuf,
	/// Definitions registered at runtime, these take precedence over files
	definitions: HashMap<String, WorldDefinition>,
	/// Id given to the next world instance
	next_world_id: u32,
}

impl Default for WorldManager {
	fn default() -> Self {
		WorldManager::new("assets")
	}
}

impl WorldManager {
	/// Create a new instance of [WorldManager] resolving files from `asset_root`
	pub fn new(asset_root: impl Into<PathBuf>) -> Self {
		WorldManager {
			asset_root: asset_root.into(),
			definitions: HashMap::new(),
			next_world_id: 1,
		}
	}
	pub fn get_asset_root(&self) -> &Path {
		&self.asset_root
	}
	/// Make `definition` available under `path` without touching the disk
	pub fn register_definition(&mut self, path: &str, definition: WorldDefinition) {
		self.definitions.insert(path.to_string(), definition);
	}
	/// Find the [WorldDefinition] for `path`
	pub fn resolve(&self, path: &str) -> Result<WorldDefinition, LoadError> {
		if let Some(definition) = self.definitions.get(path) {
			return Ok(definition.clone());
		}
		read_ron_file(&self.asset_root.join(path.trim_start_matches('/')))
	}
	/// Hand out a fresh world id
	fn allocate_id(&mut self) -> u32 {
		let id = self.next_world_id;
		self.next_world_id += 1;
		id
	}
}

/// Spawn an empty world instance and return its ambient entity
pub fn create_world(world: &mut World) -> Entity {
	let id = world.resource_mut::<WorldManager>().allocate_id();
	let instance = world
		.spawn((
			Name::new(format!("World {}", id)),
			WorldInstance { id },
			Transform::default(),
		))
		.id();
	debug!("Created world {} as {:?}", id, instance);
	instance
}

/// Load the world definition at `path` into the world `instance`, returning
/// the root entities that were spawned
pub fn load_world(world: &mut World, instance: Entity, path: &str) -> Result<Vec<Entity>, LoadError> {
	let definition = world.resource::<WorldManager>().resolve(path)?;
	if let Some(enabled) = definition.gravity {
		world.entity_mut(instance).insert(Gravity { enabled });
	}
	let mut roots = Vec::with_capacity(definition.roots.len());
	for root_def in definition.roots.iter() {
		let mut root = world.spawn((
			Name::new(root_def.name.clone()),
			Transform::from_translation(Vec3::from_array(root_def.origin)),
		));
		if let Some(grid) = &root_def.grid {
			root.insert(SpatialGrid::new(grid.tile_size));
		}
		let root = root.id();
		for entity_def in root_def.entities.iter() {
			let child = world
				.spawn((
					Name::new(entity_def.name.clone()),
					Transform::from_translation(Vec3::from_array(entity_def.offset)),
				))
				.id();
			world.entity_mut(root).add_child(child);
		}
		world.entity_mut(instance).add_child(root);
		roots.push(root);
	}
	debug!("Loaded {} roots from {} into {:?}", roots.len(), path, instance);
	Ok(roots)
}

// #[rustfmt::skip]
#[cfg(test)]
mod tests {
	use super::*;

	fn station() -> WorldDefinition {
		WorldDefinition {
			gravity: Some(false),
			roots: vec![
				RootDefinition {
					name: "Debris".to_string(),
					origin: [4.0, 0.0, 0.0],
					grid: None,
					entities: vec![],
				},
				RootDefinition {
					name: "Floor".to_string(),
					origin: [1.0, 2.0, 0.0],
					grid: Some(GridDefinition { tile_size: 1.0 }),
					entities: vec![EntityDefinition {
						name: "Crate".to_string(),
						offset: [0.5, 0.5, 0.0],
					}],
				},
			],
		}
	}

	#[test]
	fn world_ids_are_unique() {
		let mut world = World::new();
		world.insert_resource(WorldManager::default());
		let a = create_world(&mut world);
		let b = create_world(&mut world);
		let id_a = world.get::<WorldInstance>(a).unwrap().get_id();
		let id_b = world.get::<WorldInstance>(b).unwrap().get_id();
		assert_ne!(id_a, id_b);
	}
	#[test]
	fn load_registered_definition() {
		let mut world = World::new();
		let mut manager = WorldManager::default();
		manager.register_definition("maps/station.ron", station());
		world.insert_resource(manager);
		let instance = create_world(&mut world);
		let roots = load_world(&mut world, instance, "maps/station.ron").unwrap();
		assert_eq!(2, roots.len());
		assert!(world.get::<SpatialGrid>(roots[0]).is_none());
		assert_eq!(
			Some(1.0),
			world.get::<SpatialGrid>(roots[1]).map(|g| g.get_tile_size())
		);
		let origin = world.get::<Transform>(roots[1]).unwrap().translation;
		assert_eq!(Vec3::new(1.0, 2.0, 0.0), origin);
		assert_eq!(Some(&Gravity { enabled: false }), world.get::<Gravity>(instance));
		let children = world.get::<Children>(instance).unwrap();
		assert_eq!(2, children.len());
		assert_eq!(1, world.get::<Children>(roots[1]).unwrap().len());
	}
	#[test]
	fn load_from_disk() {
		let mut world = World::new();
		world.insert_resource(WorldManager::new(
			env!("CARGO_MANIFEST_DIR").to_string() + "/assets",
		));
		let instance = create_world(&mut world);
		let roots = load_world(&mut world, instance, "maps/pocket_dimension.ron").unwrap();
		assert!(roots
			.iter()
			.any(|root| world.get::<SpatialGrid>(*root).is_some()));
	}
	#[test]
	fn missing_file_is_io_error() {
		let mut world = World::new();
		world.insert_resource(WorldManager::new(
			env!("CARGO_MANIFEST_DIR").to_string() + "/assets",
		));
		let instance = create_world(&mut world);
		let result = load_world(&mut world, instance, "maps/does_not_exist.ron");
		assert!(matches!(result, Err(LoadError::Io { .. })));
	}
	#[test]
	fn malformed_file_is_parse_error() {
		let mut world = World::new();
		world.insert_resource(WorldManager::new(
			env!("CARGO_MANIFEST_DIR").to_string() + "/assets",
		));
		let instance = create_world(&mut world);
		let result = load_world(&mut world, instance, "maps/malformed.ron");
		assert!(matches!(result, Err(LoadError::Parse { .. })));
	}
}
