//! Player plugin dependency resolution.
//!
//! This module handles:
//! - The closed set of plugin names the player build ships
//! - Dependency rule tables (built-in or loaded from TOML)
//! - Ordering rules into a dependency chain, rejecting cycles
//! - Computing disabled plugins and registration order per mount
//! - Sourcing and editing the desired plugin list

mod chain;
mod error;
mod name;
mod resolver;
mod rules;
mod selection;

pub use chain::DependencyChain;
pub use error::PluginError;
pub use name::PluginName;
pub use resolver::{RegistrationPlan, Resolver, SkipReason};
pub use rules::{Rule, RuleSet};
pub use selection::{DEFAULT_PLUGINS, PluginSelection, parse_plugin_list};
