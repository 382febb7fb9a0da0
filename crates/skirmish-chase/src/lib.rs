//! Movement decisions for SKIRMISH agents.
//!
//! Implements the proximity chase state machine, exponential velocity and
//! yaw smoothing, and the input-driven player motor.

pub mod blend;
pub mod fsm;
pub mod motor;

pub use skirmish_core as core;

#[cfg(test)]
mod tests;
