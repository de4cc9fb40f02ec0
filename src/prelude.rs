//! `use bevy_dimension_pot::prelude::*;` to import common structures and methods
//!

#[doc(hidden)]
pub use crate::dimension::{
	audio::*, controller::*, link::*, pot_state::*, prototype::*, world_loader::*, *,
};

#[doc(hidden)]
pub use crate::{
	bundle::*,
	plugin::{deletion_layer::*, interaction_layer::*, *},
};
