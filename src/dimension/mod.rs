//! A dimension pot is an object which leads into its own private pocket
//! dimension.
//!
//! On first use the pot creates a new, isolated world instance from a world
//! definition and spawns a permanent portal on the first grid it finds. From
//! then on each use toggles a second portal sitting on the pot. While that
//! portal is open it is linked to the one inside the pocket dimension, while
//! it is closed the pot itself is linked instead so nobody can be trapped
//! inside.
//!
//! Definitions:
//!
//! * Pocket world - an isolated world instance owned by a single pot, destroyed along with it
//! * Pot portal - the portal attached to the pot, present only while open
//! * Dimension portal - the portal inside the pocket world, created once
//! * Link - a symmetric relation between two entities used to decide where teleporting leads
//! * Grid - a root entity of a world definition that can be walked on and host a portal
//!

pub mod audio;
pub mod controller;
pub mod link;
pub mod pot_state;
pub mod prototype;
pub mod world_loader;
