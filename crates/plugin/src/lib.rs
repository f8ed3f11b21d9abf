//! Minecraft library plugin.
//!
//! This crate holds the plugin's **business logic**. It has no transport of
//! its own: the embedding application implements [`Host`] and drives the
//! plugin by calling its lifecycle methods and [`MinecraftPlugin::tick`] at
//! a fixed cadence.
//!
//! # Per-tick reconciliation
//!
//! Each tick harvests a finished background process scan, re-arms at most
//! one new scan, fires due launch actions, then derives every owned game's
//! [`LocalGameState`](minegate_protocol::LocalGameState) and notifies the
//! host only when it changed.

pub mod config;
pub mod credentials;
pub mod error;
pub mod host;
pub mod launch;
pub mod plugin;
pub mod reconcile;
pub mod secondary;

pub use config::PluginConfig;
pub use credentials::Credentials;
pub use error::PluginError;
pub use host::Host;
pub use launch::{LaunchAction, LaunchDebouncer};
pub use plugin::{AuthOutcome, MinecraftPlugin, SizeContext};
pub use reconcile::{Cause, Probe, Reconciler, Transition, classify};
pub use secondary::SecondaryManager;
