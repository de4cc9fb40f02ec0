//! Deferred destruction of entities. Anything queued for deletion stays alive
//! until the end of the frame so handles held earlier in the frame remain valid
//!

use bevy::prelude::*;

/// Entities scheduled to be despawned (with their descendants) in [Last]
#[derive(Resource, Debug, Default)]
pub struct DeletionQueue(Vec<Entity>);

impl DeletionQueue {
	/// Schedule `entity` for deletion, queueing the same entity twice is harmless
	pub fn queue(&mut self, entity: Entity) {
		if !self.0.contains(&entity) {
			self.0.push(entity);
		}
	}
	pub fn contains(&self, entity: Entity) -> bool {
		self.0.contains(&entity)
	}
	pub fn len(&self) -> usize {
		self.0.len()
	}
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// Schedule `entity` for deletion
pub fn queue_del(world: &mut World, entity: Entity) {
	world.resource_mut::<DeletionQueue>().queue(entity);
}

/// Despawn everything in the [DeletionQueue]. Removal observers may queue
/// more entities while this runs so keep draining until it stays empty
pub fn process_deletion_queue(world: &mut World) {
	loop {
		let batch = std::mem::take(&mut world.resource_mut::<DeletionQueue>().0);
		if batch.is_empty() {
			break;
		}
		for entity in batch {
			// may already be gone as the descendant of something despawned earlier
			if let Ok(entity_mut) = world.get_entity_mut(entity) {
				trace!("Deleting {:?}", entity);
				entity_mut.despawn();
			}
		}
	}
}
