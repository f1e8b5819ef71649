//! Plugin resolver test utilities.
//!
//! Fixtures and assertion helpers shared by the resolver integration tests.

use plugin_deps::plugin::{PluginName, RuleSet};

/// The three-rule table used in most ordering scenarios:
/// the settings gear, the quality selector inside it, and the stats overlay.
pub fn gear_rules() -> RuleSet {
    use PluginName::*;

    RuleSet::new([
        (BottomGear, vec![MediaControl]),
        (LevelSelector, vec![MediaControl, BottomGear]),
        (NerdStats, vec![MediaControl, BottomGear, ClapprStats]),
    ])
}

/// Parse plugin names, panicking on unknown ones.
pub fn plugins(names: &[&str]) -> Vec<PluginName> {
    names
        .iter()
        .map(|n| match n.parse() {
            Ok(p) => p,
            Err(e) => panic!("bad fixture: {e}"),
        })
        .collect()
}

/// Position of `plugin` in `order`, panicking if absent.
pub fn position_of(order: &[PluginName], plugin: PluginName) -> usize {
    match order.iter().position(|p| *p == plugin) {
        Some(pos) => pos,
        None => panic!("{plugin} missing from {order:?}"),
    }
}

/// Assert `first` comes strictly before `second` in `order`.
pub fn assert_before(order: &[PluginName], first: PluginName, second: PluginName) {
    let a = position_of(order, first);
    let b = position_of(order, second);
    assert!(
        a < b,
        "expected {first} (at {a}) before {second} (at {b}) in {order:?}"
    );
}
