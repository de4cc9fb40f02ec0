//! A symmetric relation between pairs of entities used by teleporting logic
//! to decide which entities lead to which
//!

use std::collections::HashSet;

use bevy::prelude::*;

/// The set of entities this entity is linked to. Every link is stored on both
/// sides
#[derive(Component, Debug, Default)]
pub struct LinkedEntities {
	/// Link partners
	links: HashSet<Entity>,
}

impl LinkedEntities {
	pub fn get(&self) -> &HashSet<Entity> {
		&self.links
	}
	pub fn contains(&self, entity: Entity) -> bool {
		self.links.contains(&entity)
	}
}

/// Emitted whenever a new link is made between `a` and `b`
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventEntitiesLinked {
	pub a: Entity,
	pub b: Entity,
}

/// Emitted whenever the link between `a` and `b` is removed
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventEntitiesUnlinked {
	pub a: Entity,
	pub b: Entity,
}

/// Link `a` and `b` in both directions. Returns `false` when either entity
/// doesn't exist, when `a` and `b` are the same or when they are already linked
pub fn try_link(world: &mut World, a: Entity, b: Entity) -> bool {
	if a == b || world.get_entity(a).is_err() || world.get_entity(b).is_err() {
		return false;
	}
	if is_linked(world, a, b) {
		return false;
	}
	for (this, other) in [(a, b), (b, a)] {
		let mut entity = world.entity_mut(this);
		match entity.get_mut::<LinkedEntities>() {
			Some(mut linked) => {
				linked.links.insert(other);
			}
			None => {
				let mut linked = LinkedEntities::default();
				linked.links.insert(other);
				entity.insert(linked);
			}
		}
	}
	world.send_event(EventEntitiesLinked { a, b });
	true
}

/// Remove the link between `a` and `b`. Returns `false` if there was none
pub fn try_unlink(world: &mut World, a: Entity, b: Entity) -> bool {
	if !is_linked(world, a, b) {
		return false;
	}
	for (this, other) in [(a, b), (b, a)] {
		if let Some(mut linked) = world.get_mut::<LinkedEntities>(this) {
			linked.links.remove(&other);
		}
	}
	world.send_event(EventEntitiesUnlinked { a, b });
	true
}

/// Whether `a` is linked to `b`
pub fn is_linked(world: &World, a: Entity, b: Entity) -> bool {
	world
		.get::<LinkedEntities>(a)
		.is_some_and(|linked| linked.contains(b))
}

/// When a linked entity is despawned (or loses its links) drop it from the
/// sets of its partners
#[cfg(not(tarpaulin_include))]
pub fn on_linked_removed(
	trigger: Trigger<OnRemove, LinkedEntities>,
	mut q_links: Query<&mut LinkedEntities>,
) {
	let removed = trigger.target();
	let partners: Vec<Entity> = match q_links.get(removed) {
		Ok(linked) => linked.links.iter().copied().collect(),
		Err(_) => return,
	};
	for partner in partners {
		if let Ok(mut linked) = q_links.get_mut(partner) {
			linked.links.remove(&removed);
		}
	}
}
