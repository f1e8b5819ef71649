//! Plugin resolution error types with clear, actionable messages.
//!
//! Every variant names the plugin or rule involved so a broken rule table
//! can be fixed without a debugger.

use thiserror::Error;

/// Errors raised while building or loading dependency rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PluginError {
    /// A string does not name any plugin known to this build.
    #[error("unknown plugin '{name}'")]
    UnknownPlugin { name: String },

    /// A rule declares an unknown plugin, either as the subject or a dependency.
    #[error("rule #{index}: {source}")]
    InvalidRule {
        index: usize,
        #[source]
        source: Box<PluginError>,
    },

    /// The rule table could not be parsed.
    #[error("failed to parse rule table: {details}")]
    InvalidRuleTable { details: String },

    /// The rule table contains a dependency cycle.
    #[error("circular dependency detected: {cycle}")]
    CircularDependency { cycle: String },
}

impl PluginError {
    /// Create an unknown plugin error.
    pub fn unknown_plugin(name: impl Into<String>) -> Self {
        Self::UnknownPlugin { name: name.into() }
    }

    /// Wrap an error with the position of the rule that caused it.
    pub fn invalid_rule(index: usize, source: PluginError) -> Self {
        Self::InvalidRule {
            index,
            source: Box::new(source),
        }
    }

    /// Create a circular dependency error from the plugins forming the cycle.
    ///
    /// The first plugin is repeated at the end so the message reads as a loop.
    pub fn circular_dependency<T: std::fmt::Display>(cycle: &[T]) -> Self {
        let mut parts: Vec<String> = cycle.iter().map(ToString::to_string).collect();
        if let Some(first) = parts.first().cloned() {
            parts.push(first);
        }
        Self::CircularDependency {
            cycle: parts.join(" -> "),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn circular_dependency_message_closes_loop() {
        let err = PluginError::circular_dependency(&["a", "b"]);
        assert_eq!(err.to_string(), "circular dependency detected: a -> b -> a");
    }

    #[test]
    fn self_dependency_message() {
        let err = PluginError::circular_dependency(&["share"]);
        assert_eq!(
            err.to_string(),
            "circular dependency detected: share -> share"
        );
    }

    #[test]
    fn invalid_rule_includes_index_and_cause() {
        let err = PluginError::invalid_rule(3, PluginError::unknown_plugin("logo"));
        assert_eq!(err.to_string(), "rule #3: unknown plugin 'logo'");
    }
}
