//! Simulation engine for SKIRMISH.
//!
//! Owns the hecs ECS world, the entity registry and the event bus, runs
//! systems at a fixed tick rate, and produces `SimSnapshot`s for the
//! surrounding application.

pub mod bus;
pub mod context;
pub mod engine;
pub mod registry;
pub mod systems;
pub mod world_setup;

pub use skirmish_core as core;
pub use bus::{EventBus, HandlerCx, Stage, Subscription};
pub use engine::{SimConfig, SimulationEngine};
