//! Solidarity: report people and animals in need, and track volunteer impact.
//!
//! The [`stats`] engine and [`clock`] utilities are pure functions over case
//! and activity snapshots. The rest of the crate feeds them: [`storage`] keeps
//! the local case and activity logs and volunteer profiles, [`notify`] alerts
//! about nearby cases, [`directory`] searches volunteers, and [`cli`] is the
//! command-line surface.

pub mod browse;
pub mod cli;
pub mod clock;
pub mod config;
pub mod directory;
pub mod geo;
pub mod identity;
pub mod logging;
pub mod model;
pub mod notify;
pub mod stats;
pub mod storage;
