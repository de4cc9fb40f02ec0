//! Behaviour of a dimension pot. The first activation creates the pocket
//! world and its permanent portal, every activation then toggles the portal
//! on the pot itself:
//!
//! ```text
//!                 success
//! Uninitialized ----------> Open <----> Closed
//!       |
//!       | world fails to load / has no grid
//!       v
//!   pot deleted
//! ```
//!
//! Whichever of the pot and its portal is not open gets linked to the
//! dimension portal, so an occupant of the pocket world can always leave
//!

use crate::prelude::*;
use bevy::prelude::*;
use thiserror::Error;

/// Reasons a pocket dimension could not be created. Both indicate a mistake
/// in authored content and lead to the pot being deleted
#[derive(Debug, Error)]
pub enum PocketDimensionError {
	/// The world definition could not be loaded
	#[error("Failed to load pocket dimension map {path}: {source}")]
	Load {
		path: String,
		#[source]
		source: LoadError,
	},
	/// The world definition has no root with a [SpatialGrid] to put the portal on
	#[error("Pocket dimension {path} had no grids!")]
	NoGrid { path: String },
}

/// Activate the pot `owner`, creating its pocket dimension if need be and then
/// toggling the pot portal
pub fn activate(world: &mut World, owner: Entity) {
	let Some(pot) = world.get::<PotState>(owner) else {
		warn!("Tried to activate {:?} which is not a dimension pot", owner);
		return;
	};
	let config = pot.get_config().clone();
	let dimension_portal = match pot.get_dimension_portal() {
		Some(portal) => portal,
		None => match create_pocket_dimension(world, owner, &config) {
			Ok(portal) => portal,
			Err(e) => {
				error!("{}", e);
				queue_del(world, owner);
				return;
			}
		},
	};
	toggle_pot_portal(world, owner, dimension_portal, &config);
}

/// Create the pocket world of `owner` and spawn the permanent portal on its
/// first grid, returning the portal. On failure the new world is queued for
/// deletion and the [PotState] is left untouched
fn create_pocket_dimension(
	world: &mut World,
	owner: Entity,
	config: &PotConfig,
) -> Result<Entity, PocketDimensionError> {
	let path = config.get_world_path().to_string();
	let instance = create_world(world);
	let roots = match load_world(world, instance, &path) {
		Ok(roots) => roots,
		Err(source) => {
			queue_del(world, instance);
			return Err(PocketDimensionError::Load { path, source });
		}
	};
	// pocket dimensions always have gravity whatever the map says
	if let Some(mut gravity) = world.get_mut::<Gravity>(instance) {
		gravity.enabled = true;
	}
	let Some(grid) = roots
		.iter()
		.copied()
		.find(|root| world.get::<SpatialGrid>(*root).is_some())
	else {
		queue_del(world, instance);
		return Err(PocketDimensionError::NoGrid { path });
	};
	let origin = world
		.get::<Transform>(grid)
		.map(|t| t.translation)
		.unwrap_or_default();
	let dimension_portal = spawn_prototype(
		world,
		config.get_dimension_portal_prototype(),
		Some(instance),
		origin,
	);
	let world_id = world
		.get::<WorldInstance>(instance)
		.map(|w| w.get_id())
		.unwrap_or_default();
	info!(
		"Created pocket dimension on grid {:?} of world {}",
		grid, world_id
	);
	// if someone closes your portal you can use the one inside to escape
	try_link(world, owner, dimension_portal);
	if let Some(mut pot) = world.get_mut::<PotState>(owner) {
		pot.set_pocket_dimension(instance, dimension_portal);
	}
	Ok(dimension_portal)
}

/// Open the pot portal if it is closed or close it if it is open
fn toggle_pot_portal(
	world: &mut World,
	owner: Entity,
	dimension_portal: Entity,
	config: &PotConfig,
) {
	let Some(pot) = world.get::<PotState>(owner) else {
		return;
	};
	match pot.get_pot_portal() {
		Some(pot_portal) => {
			try_unlink(world, dimension_portal, pot_portal);
			queue_del(world, pot_portal);
			if let Some(mut pot) = world.get_mut::<PotState>(owner) {
				pot.set_pot_portal(None);
			}
			play_sound(world, config.get_close_sound(), owner);
			// anyone stuck inside can now use the dimension portal to get back to the pot
			try_link(world, owner, dimension_portal);
			debug!("Closed pot portal of {:?}", owner);
		}
		None => {
			// spawned as a child at the local origin so it sits on and moves with the pot
			let pot_portal = spawn_prototype(
				world,
				config.get_pot_portal_prototype(),
				Some(owner),
				Vec3::ZERO,
			);
			// destroying it from outside must be noticed whatever the prototype says
			world.entity_mut(pot_portal).insert(Portal);
			try_link(world, dimension_portal, pot_portal);
			if let Some(mut pot) = world.get_mut::<PotState>(owner) {
				pot.set_pot_portal(Some(pot_portal));
			}
			play_sound(world, config.get_open_sound(), owner);
			try_unlink(world, owner, dimension_portal);
			debug!("Opened pot portal {:?} on {:?}", pot_portal, owner);
		}
	}
}

/// Queue deletion of everything a pot owns when its [PotState] goes away,
/// links are dropped along with the deleted entities
#[cfg(not(tarpaulin_include))]
pub fn on_pot_removed(
	trigger: Trigger<OnRemove, PotState>,
	q_pots: Query<&PotState>,
	mut deletion_queue: ResMut<DeletionQueue>,
) {
	let Ok(pot) = q_pots.get(trigger.target()) else {
		return;
	};
	if let Some(pocket_world) = pot.get_pocket_world() {
		// everything inside will be destroyed too
		deletion_queue.queue(pocket_world);
	}
	if let Some(pot_portal) = pot.get_pot_portal() {
		deletion_queue.queue(pot_portal);
	}
}

/// When a pot portal is destroyed by anything other than closing it, mark
/// the pot closed and link the pot back to the dimension portal so the pocket
/// world can still be left
#[cfg(not(tarpaulin_include))]
pub fn on_pot_portal_removed(
	trigger: Trigger<OnRemove, Portal>,
	mut q_pots: Query<(Entity, &mut PotState)>,
	mut commands: Commands,
) {
	let portal = trigger.target();
	for (owner, mut pot) in q_pots.iter_mut() {
		if pot.get_pot_portal() != Some(portal) {
			continue;
		}
		pot.set_pot_portal(None);
		debug!("Pot portal {:?} of {:?} was destroyed", portal, owner);
		if let Some(dimension_portal) = pot.get_dimension_portal() {
			// fails harmlessly when the pot itself is being despawned
			commands.queue(move |world: &mut World| {
				try_link(world, owner, dimension_portal);
			});
		}
	}
}
