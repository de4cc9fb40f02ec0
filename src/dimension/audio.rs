//! Requests to play a sound, left for an audio backend to pick up
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Play `sound` at the location of `source`
#[derive(Event, Debug, Clone)]
pub struct EventPlaySound {
	pub sound: SoundSpecifier,
	pub source: Entity,
}

/// Queue `sound` to be played at `source`
pub fn play_sound(world: &mut World, sound: &SoundSpecifier, source: Entity) {
	debug!("Playing {} at {:?}", sound.get_path(), source);
	world.send_event(EventPlaySound {
		sound: sound.clone(),
		source,
	});
}
