//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::plugin::{PluginError, PluginName, PluginSelection, RuleSet};

/// Resolver configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// TOML rule table to use instead of the built-in one (PLUGIN_RULES_FILE).
    pub rules_file: Option<PathBuf>,

    /// Comma-separated plugin list requested for this run, like the `plugins`
    /// URL parameter. Only set from the command line.
    pub requested_plugins: Option<String>,

    /// Comma-separated plugin list standing in for the persisted selection
    /// (PERSISTED_PLUGINS). When unset or blank, the built-in defaults apply.
    pub persisted_plugins: Option<String>,

    /// Plugins never registered by this deployment (PLUGIN_EXCLUDE, comma-separated).
    pub exclude: Vec<PluginName>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through `var`, which returns the value of a variable if set.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let rules_file = var("PLUGIN_RULES_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let persisted_plugins = var("PERSISTED_PLUGINS").filter(|v| !v.trim().is_empty());

        let exclude = var("PLUGIN_EXCLUDE")
            .map(|v| parse_exclude_list(&v))
            .transpose()
            .context("PLUGIN_EXCLUDE must list known plugin names")?
            .unwrap_or_default();

        Ok(Self {
            rules_file,
            requested_plugins: None,
            persisted_plugins,
            exclude,
        })
    }

    /// Apply command-line values on top of the environment.
    ///
    /// `rules` replaces PLUGIN_RULES_FILE, `plugins` is requested ahead of the
    /// persisted list, and `exclude` replaces PLUGIN_EXCLUDE. Excluded names
    /// are checked as strictly as the environment variable.
    pub fn with_overrides(
        mut self,
        rules: Option<PathBuf>,
        plugins: Option<String>,
        exclude: Option<&str>,
    ) -> Result<Self> {
        if let Some(rules) = rules {
            self.rules_file = Some(rules);
        }
        if plugins.is_some() {
            self.requested_plugins = plugins;
        }
        if let Some(list) = exclude {
            self.exclude =
                parse_exclude_list(list).context("--exclude must list known plugin names")?;
        }
        Ok(self)
    }

    /// The desired plugin list: requested, else persisted, else defaults.
    pub fn selection(&self) -> PluginSelection {
        PluginSelection::from_sources(
            self.requested_plugins.as_deref(),
            self.persisted_plugins.as_deref(),
        )
    }

    /// The rule table this configuration points at.
    pub fn load_rules(&self) -> Result<RuleSet> {
        match &self.rules_file {
            Some(path) => {
                let rules = RuleSet::load(path)?;
                info!(path = %path.display(), rules = rules.len(), "Loaded rule table");
                Ok(rules)
            }
            None => Ok(RuleSet::builtin()),
        }
    }
}

/// Parse a comma-separated exclude list, rejecting unknown names.
fn parse_exclude_list(input: &str) -> Result<Vec<PluginName>, PluginError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<PluginName>)
        .collect()
}
