//! Core types and definitions for the SKIRMISH combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, spawn configuration, state snapshots, events,
//! outcomes and constants. It has no dependency on the ECS or any runtime.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod outcomes;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
