//! Per-mount plugin resolution.
//!
//! The [`Resolver`] is built once per process from a rule table and answers,
//! for any desired plugin list, which plugins cannot work and in what order
//! the rest must be registered with the player.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use super::chain::DependencyChain;
use super::error::PluginError;
use super::name::PluginName;
use super::rules::RuleSet;

/// Resolves desired plugin lists against a fixed dependency chain.
#[derive(Debug, Clone)]
pub struct Resolver {
    chain: DependencyChain,
}

/// Why a desired plugin is not registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The caller asked for the plugin to be left out of this mount.
    Excluded,
    /// A dependency is missing or itself disabled.
    Disabled,
}

/// What to register for one player mount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationPlan {
    /// Plugins to register, in registration order.
    pub register: Vec<PluginName>,
    /// Desired plugins left out, in registration order.
    pub skipped: Vec<(PluginName, SkipReason)>,
}

impl Resolver {
    /// Build a resolver for `rules`.
    ///
    /// # Errors
    /// Fails if the rule table contains a dependency cycle.
    pub fn new(rules: &RuleSet) -> Result<Self, PluginError> {
        Ok(Self::from_chain(DependencyChain::build(rules)?))
    }

    /// Build a resolver for the built-in rule table.
    pub fn builtin() -> Result<Self, PluginError> {
        Self::new(&RuleSet::builtin())
    }

    pub fn from_chain(chain: DependencyChain) -> Self {
        Self { chain }
    }

    pub fn chain(&self) -> &DependencyChain {
        &self.chain
    }

    /// Plugins from the chain that cannot work with `desired`.
    ///
    /// A chained plugin is disabled when any dependency is missing from
    /// `desired` or was itself disabled earlier in the chain. Chain order
    /// guarantees a dependency is decided before its dependents. Plugins
    /// without rules are never reported, desired or not.
    pub fn disabled_plugins(&self, desired: &[PluginName]) -> Vec<PluginName> {
        let desired: HashSet<PluginName> = desired.iter().copied().collect();
        let mut disabled: Vec<PluginName> = Vec::new();

        for (plugin, deps) in self.chain.entries() {
            let blocked = deps
                .iter()
                .copied()
                .find(|dep| !desired.contains(dep) || disabled.contains(dep));
            if let Some(dep) = blocked {
                debug!(plugin = %plugin, dependency = %dep, "plugin disabled");
                disabled.push(*plugin);
            }
        }

        disabled
    }

    /// The order in which to register `desired` with the player.
    ///
    /// Plugins without rules come first, in the caller's order. Plugins with
    /// rules follow in chain order, once each.
    pub fn registration_order(&self, desired: &[PluginName]) -> Vec<PluginName> {
        let (dependent, mut order): (Vec<PluginName>, Vec<PluginName>) = desired
            .iter()
            .copied()
            .partition(|p| self.chain.contains(*p));

        order.extend(self.chain.plugins().filter(|p| dependent.contains(p)));
        order
    }

    /// The registration plan for one player mount.
    ///
    /// Walks the registration order, leaving out `exclude`d plugins first and
    /// then disabled ones.
    pub fn plan(&self, desired: &[PluginName], exclude: &[PluginName]) -> RegistrationPlan {
        let disabled = self.disabled_plugins(desired);
        let mut plan = RegistrationPlan::default();

        for plugin in self.registration_order(desired) {
            if exclude.contains(&plugin) {
                plan.skipped.push((plugin, SkipReason::Excluded));
            } else if disabled.contains(&plugin) {
                plan.skipped.push((plugin, SkipReason::Disabled));
            } else {
                plan.register.push(plugin);
            }
        }

        plan
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use PluginName::*;

    fn sample() -> Resolver {
        Resolver::new(&RuleSet::new([
            (BottomGear, vec![MediaControl]),
            (LevelSelector, vec![MediaControl, BottomGear]),
            (NerdStats, vec![MediaControl, BottomGear, ClapprStats]),
        ]))
        .unwrap()
    }

    #[test]
    fn registration_order_puts_independent_first() {
        let order = sample().registration_order(&[
            LevelSelector,
            NerdStats,
            ClapprStats,
            BottomGear,
            MediaControl,
        ]);
        assert_eq!(
            order,
            vec![ClapprStats, MediaControl, BottomGear, LevelSelector, NerdStats]
        );
    }

    #[test]
    fn registration_order_keeps_independent_duplicates() {
        let order = sample().registration_order(&[Poster, BottomGear, Poster, BottomGear]);
        assert_eq!(order, vec![Poster, Poster, BottomGear]);
    }

    #[test]
    fn registration_order_is_idempotent() {
        let resolver = sample();
        let desired = [NerdStats, Spinner, MediaControl, LevelSelector];
        assert_eq!(
            resolver.registration_order(&desired),
            resolver.registration_order(&desired)
        );
    }

    #[test]
    fn disabled_propagates_transitively() {
        let disabled = sample().disabled_plugins(&[LevelSelector, BottomGear]);
        assert_eq!(disabled, vec![BottomGear, LevelSelector, NerdStats]);
    }

    #[test]
    fn disabled_through_disabled_dependency_only() {
        let resolver = Resolver::new(&RuleSet::new([
            (BottomGear, vec![MediaControl]),
            (LevelSelector, vec![BottomGear]),
        ]))
        .unwrap();
        // bottom_gear is desired but disabled, so level_selector is too.
        let disabled = resolver.disabled_plugins(&[LevelSelector, BottomGear]);
        assert_eq!(disabled, vec![BottomGear, LevelSelector]);
    }

    #[test]
    fn satisfied_dependencies_disable_nothing_desired() {
        let disabled = sample().disabled_plugins(&[LevelSelector, MediaControl, BottomGear]);
        assert!(!disabled.contains(&LevelSelector));
        assert!(!disabled.contains(&MediaControl));
        assert!(!disabled.contains(&BottomGear));
        // nerd_stats was not asked for and lacks clappr_stats.
        assert_eq!(disabled, vec![NerdStats]);
    }

    #[test]
    fn empty_desired_disables_every_rule_with_dependencies() {
        let resolver = Resolver::new(&RuleSet::new([
            (BottomGear, vec![MediaControl]),
            (Poster, vec![]),
        ]))
        .unwrap();
        assert_eq!(resolver.disabled_plugins(&[]), vec![BottomGear]);
    }

    #[test]
    fn plan_skips_excluded_before_disabled() {
        let plan = sample().plan(
            &[Poster, LevelSelector, NerdStats, BottomGear, MediaControl],
            &[Poster, NerdStats],
        );
        assert_eq!(plan.register, vec![MediaControl, BottomGear, LevelSelector]);
        assert_eq!(
            plan.skipped,
            vec![(Poster, SkipReason::Excluded), (NerdStats, SkipReason::Excluded)]
        );
    }

    #[test]
    fn plan_reports_disabled() {
        let plan = sample().plan(&[ErrorScreen, LevelSelector, BottomGear], &[]);
        assert_eq!(plan.register, vec![ErrorScreen]);
        assert_eq!(
            plan.skipped,
            vec![
                (BottomGear, SkipReason::Disabled),
                (LevelSelector, SkipReason::Disabled)
            ]
        );
    }

    #[test]
    fn plan_serializes_for_cli_output() {
        let plan = sample().plan(&[MediaControl, Share], &[Share]);
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "register": ["media_control"],
                "skipped": [["share", "excluded"]],
            })
        );
    }

    #[test]
    fn builtin_resolver_builds() {
        let resolver = Resolver::builtin().unwrap();
        assert_eq!(resolver.chain().len(), RuleSet::builtin().len());
    }
}
