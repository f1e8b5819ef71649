//! Dependency rule tables.
//!
//! A rule says "plugin X only works when plugins Y, Z are active". Each
//! release ships one table, either the built-in one or a TOML file:
//!
//! ```toml
//! [[rule]]
//! plugin = "level_selector"
//! depends_on = ["media_control", "bottom_gear"]
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::error::PluginError;
use super::name::PluginName;

/// One plugin and the plugins it depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub plugin: PluginName,
    pub depends_on: Vec<PluginName>,
}

/// An ordered, immutable set of dependency rules.
///
/// Declaration order is kept: it decides the chain order of plugins that
/// become ready in the same pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

#[derive(Debug, Deserialize)]
struct RawRuleTable {
    #[serde(default)]
    rule: Vec<RawRule>,
}

#[derive(Debug, Deserialize)]
struct RawRule {
    plugin: String,
    #[serde(default)]
    depends_on: Vec<String>,
}

impl RuleSet {
    /// Build a rule set from `(plugin, dependencies)` pairs.
    ///
    /// A plugin declared more than once has its dependency lists merged.
    pub fn new<I, D>(rules: I) -> Self
    where
        I: IntoIterator<Item = (PluginName, D)>,
        D: IntoIterator<Item = PluginName>,
    {
        let mut set = Self::default();
        for (plugin, deps) in rules {
            set.insert(plugin, deps);
        }
        set
    }

    /// The rule table of the current player release.
    pub fn builtin() -> Self {
        use PluginName::*;

        Self::new([
            (AudioSelector, vec![MediaControl]),
            (BottomGear, vec![MediaControl]),
            (Cc, vec![MediaControl]),
            (Clips, vec![MediaControl]),
            (DvrControls, vec![MediaControl]),
            (LevelSelector, vec![MediaControl, BottomGear]),
            (Multicamera, vec![MediaControl]),
            (NerdStats, vec![MediaControl, BottomGear, ClapprStats]),
            (Pip, vec![MediaControl]),
            (PlaybackRate, vec![MediaControl, BottomGear]),
            (SeekTime, vec![MediaControl]),
            (Share, vec![MediaControl]),
            (Thumbnails, vec![MediaControl]),
        ])
    }

    /// Read and parse a TOML rule table from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read rule table: {}", path.display()))?;

        Self::parse_str(&content)
            .with_context(|| format!("invalid rule table at {}", path.display()))
    }

    /// Parse a TOML rule table.
    pub fn parse_str(content: &str) -> Result<Self, PluginError> {
        let raw: RawRuleTable =
            toml::from_str(content).map_err(|e| PluginError::InvalidRuleTable {
                details: e.message().to_string(),
            })?;

        let mut set = Self::default();
        for (index, rule) in raw.rule.into_iter().enumerate() {
            let wrap = |e| PluginError::invalid_rule(index, e);
            let plugin = rule.plugin.parse::<PluginName>().map_err(wrap)?;
            let deps = rule
                .depends_on
                .iter()
                .map(|d| d.parse::<PluginName>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(wrap)?;
            set.insert(plugin, deps);
        }
        Ok(set)
    }

    fn insert(&mut self, plugin: PluginName, deps: impl IntoIterator<Item = PluginName>) {
        let idx = match self.rules.iter().position(|r| r.plugin == plugin) {
            Some(idx) => idx,
            None => {
                self.rules.push(Rule {
                    plugin,
                    depends_on: Vec::new(),
                });
                self.rules.len() - 1
            }
        };
        let rule = &mut self.rules[idx];
        for dep in deps {
            if !rule.depends_on.contains(&dep) {
                rule.depends_on.push(dep);
            }
        }
    }

    /// Dependencies declared for `plugin`, if it has a rule.
    pub fn dependencies(&self, plugin: PluginName) -> Option<&[PluginName]> {
        self.rules
            .iter()
            .find(|r| r.plugin == plugin)
            .map(|r| r.depends_on.as_slice())
    }

    /// Whether `plugin` has a rule of its own.
    pub fn contains(&self, plugin: PluginName) -> bool {
        self.rules.iter().any(|r| r.plugin == plugin)
    }

    /// Rules in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use PluginName::*;

    #[test]
    fn builtin_declares_media_control_for_every_control() {
        let rules = RuleSet::builtin();
        for rule in &rules {
            assert!(
                rule.depends_on.contains(&MediaControl),
                "{} should depend on media_control",
                rule.plugin
            );
        }
        assert!(!rules.contains(MediaControl));
    }

    #[test]
    fn duplicate_declarations_merge() {
        let rules = RuleSet::new([
            (NerdStats, vec![MediaControl]),
            (BottomGear, vec![MediaControl]),
            (NerdStats, vec![ClapprStats, MediaControl]),
        ]);
        assert_eq!(rules.len(), 2);
        assert_eq!(
            rules.dependencies(NerdStats).unwrap(),
            &[MediaControl, ClapprStats]
        );
        assert_eq!(rules.iter().next().unwrap().plugin, NerdStats);
    }

    #[test]
    fn parse_valid_table() {
        let toml = r#"
[[rule]]
plugin = "bottom_gear"
depends_on = ["media_control"]

[[rule]]
plugin = "level_selector"
depends_on = ["media_control", "bottom_gear"]

[[rule]]
plugin = "poster"
"#;

        let rules = RuleSet::parse_str(toml).unwrap();
        assert_eq!(rules.len(), 3);
        assert_eq!(
            rules.dependencies(LevelSelector).unwrap(),
            &[MediaControl, BottomGear]
        );
        assert_eq!(rules.dependencies(Poster).unwrap(), &[] as &[PluginName]);
        assert_eq!(rules.dependencies(Share), None);
    }

    #[test]
    fn parse_empty_table() {
        let rules = RuleSet::parse_str("").unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn reject_unknown_dependency() {
        let toml = r#"
[[rule]]
plugin = "bottom_gear"
depends_on = ["media_control"]

[[rule]]
plugin = "share"
depends_on = ["logo"]
"#;

        let err = RuleSet::parse_str(toml).unwrap_err();
        assert_eq!(
            err,
            PluginError::invalid_rule(1, PluginError::unknown_plugin("logo"))
        );
    }

    #[test]
    fn reject_unknown_subject() {
        let toml = r#"
[[rule]]
plugin = "logo"
"#;

        let err = RuleSet::parse_str(toml).unwrap_err();
        assert!(err.to_string().contains("unknown plugin 'logo'"));
    }

    #[test]
    fn reject_malformed_toml() {
        let err = RuleSet::parse_str("[[rule]]\nplugin = 3\n").unwrap_err();
        assert!(matches!(err, PluginError::InvalidRuleTable { .. }));
    }

    #[test]
    fn load_missing_file_names_path() {
        let err = RuleSet::load(Path::new("/nonexistent/rules.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/rules.toml"));
    }
}
