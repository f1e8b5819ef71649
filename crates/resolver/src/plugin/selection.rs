//! The desired plugin list and where it comes from.
//!
//! A player mount asks for plugins through the `plugins` URL parameter, which
//! overrides the list persisted from a previous session, which overrides the
//! defaults. All sources are comma-separated plugin names.

use tracing::warn;

use super::name::PluginName;

/// Plugins enabled when nothing else is configured.
pub const DEFAULT_PLUGINS: &[PluginName] = &[
    PluginName::MediaControl,
    PluginName::LevelSelector,
    PluginName::BottomGear,
    PluginName::ErrorScreen,
    PluginName::Poster,
];

/// Parse a comma-separated plugin list.
///
/// Entries are trimmed and empty ones dropped. Unknown names are logged and
/// dropped. Repeated names keep their first position.
pub fn parse_plugin_list(input: &str) -> Vec<PluginName> {
    let mut plugins = Vec::new();
    for entry in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match entry.parse::<PluginName>() {
            Ok(plugin) if !plugins.contains(&plugin) => plugins.push(plugin),
            Ok(_) => {}
            Err(e) => warn!(error = %e, "ignoring plugin name"),
        }
    }
    plugins
}

/// An ordered, duplicate-free list of desired plugins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginSelection {
    plugins: Vec<PluginName>,
}

impl Default for PluginSelection {
    fn default() -> Self {
        Self {
            plugins: DEFAULT_PLUGINS.to_vec(),
        }
    }
}

impl PluginSelection {
    /// Select exactly `plugins`, dropping repeats.
    pub fn new(plugins: impl IntoIterator<Item = PluginName>) -> Self {
        let mut selection = Self {
            plugins: Vec::new(),
        };
        for plugin in plugins {
            if !selection.contains(plugin) {
                selection.plugins.push(plugin);
            }
        }
        selection
    }

    /// Pick the list from the URL parameter, else the persisted value, else
    /// the defaults.
    ///
    /// A present but empty URL parameter selects no plugins.
    pub fn from_sources(query: Option<&str>, persisted: Option<&str>) -> Self {
        match query.or(persisted) {
            Some(list) => Self {
                plugins: parse_plugin_list(list),
            },
            None => Self::default(),
        }
    }

    /// Add `plugin`. Returns `false` if it was already selected.
    ///
    /// `nerd_stats` brings `clappr_stats` along, since the overlay reads its
    /// numbers from the stats collector.
    pub fn add(&mut self, plugin: PluginName) -> bool {
        if self.contains(plugin) {
            return false;
        }
        self.plugins.push(plugin);
        if plugin == PluginName::NerdStats && !self.contains(PluginName::ClapprStats) {
            self.plugins.push(PluginName::ClapprStats);
        }
        true
    }

    /// Remove `plugin`. Returns `false` if it was not selected.
    ///
    /// Removing `clappr_stats` also removes `nerd_stats`.
    pub fn remove(&mut self, plugin: PluginName) -> bool {
        let Some(idx) = self.plugins.iter().position(|p| *p == plugin) else {
            return false;
        };
        self.plugins.remove(idx);
        if plugin == PluginName::ClapprStats {
            self.plugins.retain(|p| *p != PluginName::NerdStats);
        }
        true
    }

    /// Go back to [`DEFAULT_PLUGINS`].
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn contains(&self, plugin: PluginName) -> bool {
        self.plugins.contains(&plugin)
    }

    pub fn as_slice(&self) -> &[PluginName] {
        &self.plugins
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// The comma-joined form stored between sessions.
    pub fn to_persisted(&self) -> String {
        self.plugins
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}
