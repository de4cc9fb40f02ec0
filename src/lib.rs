//! This is a plugin for Bevy game engine to create pots which lead into their
//! own pocket dimension through a pair of linked portals
//!

pub mod bundle;
pub mod dimension;
pub mod plugin;

pub mod prelude;
