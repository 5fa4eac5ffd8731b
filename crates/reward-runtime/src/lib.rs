//! # Reward Runtime
//!
//! Assembles the reward core from its components.
//!
//! ## Modular Structure
//!
//! - `config` - `RuntimeConfig` (TOML file + `RC_*` environment overrides)
//! - `container` - `RewardContainer`, owning the store, the snapshot
//!   refresher and both workflows
//! - `telemetry` - tracing subscriber installation
//!
//! ## Startup Sequence
//!
//! 1. Load and validate configuration
//! 2. Install logging
//! 3. Open the data directory (process lock) and load every table
//! 4. Build the claim and booster services over the shared store and cache
//! 5. Spawn the snapshot refresher
//!
//! The chat front-end and the concrete collaborator clients live outside
//! this crate and are handed in as [`container::Collaborators`].

pub mod config;
pub mod container;
pub mod telemetry;

pub use config::{ConfigError, RuntimeConfig};
pub use container::{Collaborators, RewardContainer};
pub use telemetry::init_tracing;
