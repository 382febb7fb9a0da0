//! The simulation context handed to every system and event handler.

use hecs::World;

use skirmish_core::types::SimTime;

use crate::registry::EntityRegistry;

/// Long-lived simulation state. One per simulation instance; systems and
/// handlers receive it by reference instead of reaching for globals.
#[derive(Default)]
pub struct SimContext {
    pub world: World,
    pub registry: EntityRegistry,
    pub time: SimTime,
}

impl SimContext {
    pub fn new() -> Self {
        Self::default()
    }
}
