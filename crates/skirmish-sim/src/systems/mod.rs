//! ECS systems that operate on the simulation world.
//!
//! Each module owns one subsystem: pure transition functions on its
//! components, a per-tick `run` where the subsystem advances with time, and
//! a `wire` function that subscribes the entity's own reactions to the
//! event bus at `Stage::Core`.

pub mod attack;
pub mod chase;
pub mod cleanup;
pub mod contact;
pub mod health;
pub mod kinematics;
pub mod motor;
pub mod orientation;
pub mod snapshot;
pub mod speed;
