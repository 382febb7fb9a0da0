//! Errors surfaced to callers of the simulation.
//!
//! Only programming errors are errors. Expected simulation no-ops (damaging
//! a corpse, re-opening an open hitbox, ...) are reported through the
//! outcome enums in [`crate::outcomes`].

use thiserror::Error;

use crate::types::EntityId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// The identifier was never issued or the entity has been despawned.
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),
    /// The entity exists but lacks the subsystem the call needs.
    #[error("entity {entity} has no {component} component")]
    MissingComponent {
        entity: EntityId,
        component: &'static str,
    },
    /// A scenario or configuration file could not be used.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type SimResult<T> = Result<T, SimError>;
