//! Player plugin dependency resolver.
//!
//! Decides which player plugins cannot work for a requested plugin list and
//! the order in which the rest are registered. The `plugin-deps` binary wraps
//! this library for release checks and ad hoc resolution.

pub mod config;
pub mod plugin;

pub use config::Config;
pub use plugin::{PluginError, PluginName, PluginSelection, RegistrationPlan, Resolver, RuleSet};
