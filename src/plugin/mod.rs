//! Defines the Bevy [Plugin] for dimension pots
//!

use std::path::PathBuf;

use crate::prelude::*;
use bevy::prelude::*;

pub mod deletion_layer;
pub mod interaction_layer;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum OrderingSet {
	/// Answer queries for secondary actions
	Offer,
	/// Act upon selected secondary actions
	Activate,
}

/// Registers the resources, events, observers and systems driving dimension
/// pots. World definitions are resolved beneath `asset_root`
pub struct DimensionPotPlugin {
	/// Directory world definition paths are relative to
	pub asset_root: PathBuf,
}

impl Default for DimensionPotPlugin {
	fn default() -> Self {
		DimensionPotPlugin {
			asset_root: PathBuf::from("assets"),
		}
	}
}

impl Plugin for DimensionPotPlugin {
	#[cfg(not(tarpaulin_include))]
	fn build(&self, app: &mut App) {
		app.insert_resource(WorldManager::new(self.asset_root.clone()))
			.init_resource::<Prototypes>()
			.init_resource::<DeletionQueue>()
			.add_event::<interaction_layer::EventSecondaryActionsQuery>()
			.add_event::<interaction_layer::EventSecondaryActionOffered>()
			.add_event::<interaction_layer::EventSecondaryActionSelected>()
			.add_event::<EventEntitiesLinked>()
			.add_event::<EventEntitiesUnlinked>()
			.add_event::<EventPlaySound>()
			.add_observer(on_pot_removed)
			.add_observer(on_pot_portal_removed)
			.add_observer(on_linked_removed)
			.configure_sets(Update, (OrderingSet::Offer, OrderingSet::Activate).chain())
			.add_systems(
				Update,
				(
					interaction_layer::offer_toggle_portal_action.in_set(OrderingSet::Offer),
					interaction_layer::handle_toggle_portal_selection
						.in_set(OrderingSet::Activate),
				),
			)
			.add_systems(Last, deletion_layer::process_deletion_queue);
	}
}
