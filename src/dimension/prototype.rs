//! Named entity templates which can be spawned by id
//!

use std::collections::HashMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Marks an entity as a portal
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Portal;

/// The id of the prototype an entity was spawned from
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Prototype(String);

impl Prototype {
	pub fn get(&self) -> &str {
		&self.0
	}
}

/// Describes what an entity spawned from a prototype looks like
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrototypeDefinition {
	/// Display name given to spawned entities
	pub name: String,
	/// Whether spawned entities are portals
	#[serde(default)]
	pub portal: bool,
}

/// Registry of [PrototypeDefinition] keyed by prototype id
#[derive(Resource, Debug, Clone)]
pub struct Prototypes(HashMap<String, PrototypeDefinition>);

impl Default for Prototypes {
	fn default() -> Self {
		let mut prototypes = Prototypes(HashMap::new());
		prototypes.insert(
			"PortalRed",
			PrototypeDefinition {
				name: "red portal".to_string(),
				portal: true,
			},
		);
		prototypes.insert(
			"PortalBlue",
			PrototypeDefinition {
				name: "blue portal".to_string(),
				portal: true,
			},
		);
		prototypes
	}
}

impl Prototypes {
	pub fn insert(&mut self, id: &str, definition: PrototypeDefinition) {
		self.0.insert(id.to_string(), definition);
	}
	pub fn get(&self, id: &str) -> Option<&PrototypeDefinition> {
		self.0.get(id)
	}
}

/// Spawn the prototype `id` at `translation`, relative to `parent` if one is
/// given. An unknown id still spawns a bare entity tagged with the id
pub fn spawn_prototype(
	world: &mut World,
	id: &str,
	parent: Option<Entity>,
	translation: Vec3,
) -> Entity {
	let definition = world.resource::<Prototypes>().get(id).cloned();
	let name = match &definition {
		Some(d) => d.name.clone(),
		None => {
			warn!("Unknown prototype {}, spawning it bare", id);
			id.to_string()
		}
	};
	let mut entity = world.spawn((
		Name::new(name),
		Prototype(id.to_string()),
		Transform::from_translation(translation),
	));
	if definition.is_some_and(|d| d.portal) {
		entity.insert(Portal);
	}
	let entity = entity.id();
	if let Some(parent) = parent {
		world.entity_mut(parent).add_child(entity);
	}
	entity
}
