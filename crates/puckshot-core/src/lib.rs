//! Core types and definitions for PUCKSHOT.
//!
//! This crate defines the vocabulary shared across all other crates:
//! commands, events, configuration, state snapshots, and constants.
//! It has no dependency on the simulation runtime or any host framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
