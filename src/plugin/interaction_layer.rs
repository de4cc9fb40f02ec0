//! Offering the toggle action of a dimension pot to a user and reacting when
//! they select it
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Marks an entity as able to manipulate objects
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Hands;

/// Secondary actions an object can offer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondaryAction {
	/// Open or close the portal of a dimension pot
	TogglePortal,
}

impl SecondaryAction {
	/// Label shown to the user
	pub fn get_text(&self) -> &'static str {
		match self {
			SecondaryAction::TogglePortal => "Toggle portal",
		}
	}
}

/// Who is interacting with what. Access and interaction capability are
/// decided by the interaction layer before the event is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionContext {
	/// The entity interacting
	pub user: Entity,
	/// The object being interacted with
	pub target: Entity,
	/// Whether `user` can reach `target`
	pub can_access: bool,
	/// Whether `user` is currently able to interact at all
	pub can_interact: bool,
}

/// Asks which secondary actions the target offers the user
#[derive(Event, Debug, Clone, Copy)]
pub struct EventSecondaryActionsQuery(pub InteractionContext);

/// A secondary action available to the user of a [EventSecondaryActionsQuery]
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSecondaryActionOffered {
	pub user: Entity,
	pub target: Entity,
	pub action: SecondaryAction,
}

/// The user has picked `action` on the target
#[derive(Event, Debug, Clone, Copy)]
pub struct EventSecondaryActionSelected {
	pub context: InteractionContext,
	pub action: SecondaryAction,
}

/// Whether the user of `context` may toggle a pot
fn can_toggle(
	context: &InteractionContext,
	q_pots: &Query<(), With<PotState>>,
	q_hands: &Query<(), With<Hands>>,
) -> bool {
	context.can_access
		&& context.can_interact
		&& q_pots.contains(context.target)
		&& q_hands.contains(context.user)
}

/// Offer [SecondaryAction::TogglePortal] for every queried dimension pot the
/// user can reach, interact with and has hands for
#[cfg(not(tarpaulin_include))]
pub fn offer_toggle_portal_action(
	mut events: EventReader<EventSecondaryActionsQuery>,
	q_pots: Query<(), With<PotState>>,
	q_hands: Query<(), With<Hands>>,
	mut event_offered: EventWriter<EventSecondaryActionOffered>,
) {
	for EventSecondaryActionsQuery(context) in events.read() {
		if can_toggle(context, &q_pots, &q_hands) {
			event_offered.write(EventSecondaryActionOffered {
				user: context.user,
				target: context.target,
				action: SecondaryAction::TogglePortal,
			});
		}
	}
}

/// Activate the pot of every selected [SecondaryAction::TogglePortal]
#[cfg(not(tarpaulin_include))]
pub fn handle_toggle_portal_selection(
	mut events: EventReader<EventSecondaryActionSelected>,
	q_pots: Query<(), With<PotState>>,
	q_hands: Query<(), With<Hands>>,
	mut commands: Commands,
) {
	for event in events.read() {
		if event.action != SecondaryAction::TogglePortal {
			continue;
		}
		if !can_toggle(&event.context, &q_pots, &q_hands) {
			debug!(
				"{:?} cannot toggle the portal of {:?}",
				event.context.user, event.context.target
			);
			continue;
		}
		let owner = event.context.target;
		commands.queue(move |world: &mut World| activate(world, owner));
	}
}
