//! Core simulation types shared across the Wildwood workspace.
//!
//! A [`World`] holds the grid and its entities, an [`EventScheduler`] keeps
//! their pending actions in timestamp order, and a [`Simulation`] drives both
//! forward while applying the per-kind behavior rules.

pub mod behavior;
pub mod entity;
pub mod scheduler;
pub mod sprite;
pub mod world;

pub use behavior::Simulation;
pub use entity::{Entity, EntityId, EntityKind, Passenger, Species};
pub use scheduler::{Action, DueEvent, EventScheduler};
pub use sprite::{SpriteLibrary, SpriteSet};
pub use world::{Background, World, WorldError};

pub use wildwood_path::Point;
