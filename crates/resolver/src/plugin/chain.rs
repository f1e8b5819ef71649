//! Dependency chain construction.
//!
//! The chain is the rule table reordered so that every plugin comes after
//! the rule-declared plugins it depends on. Dependencies without a rule of
//! their own (e.g. `media_control`) are leaves and never block anything.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use super::error::PluginError;
use super::name::PluginName;
use super::rules::RuleSet;

/// A topologically ordered projection of a [`RuleSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyChain {
    entries: Vec<(PluginName, Vec<PluginName>)>,
}

impl DependencyChain {
    /// Order the rules so dependencies come first.
    ///
    /// Works in passes over a queue seeded with the rule keys in declaration
    /// order. A plugin joins the chain once each of its dependencies is either
    /// a leaf or already chained, including plugins chained earlier in the
    /// same pass. A pass that chains nothing means the rest is blocked by a
    /// cycle, which is then located and reported.
    ///
    /// # Errors
    /// Returns [`PluginError::CircularDependency`] naming the plugins in one
    /// of the cycles.
    pub fn build(rules: &RuleSet) -> Result<Self, PluginError> {
        let mut chained: HashSet<PluginName> = HashSet::with_capacity(rules.len());
        let mut entries = Vec::with_capacity(rules.len());
        let mut queue: VecDeque<_> = rules.iter().collect();
        let mut pass = 0;

        while !queue.is_empty() {
            pass += 1;
            let before = entries.len();

            for rule in std::mem::take(&mut queue) {
                let ready = rule
                    .depends_on
                    .iter()
                    .all(|dep| !rules.contains(*dep) || chained.contains(dep));
                if ready {
                    chained.insert(rule.plugin);
                    entries.push((rule.plugin, rule.depends_on.clone()));
                } else {
                    queue.push_back(rule);
                }
            }

            debug!(
                pass,
                chained = entries.len() - before,
                pending = queue.len(),
                "dependency chain pass"
            );

            if entries.len() == before {
                let pending: Vec<PluginName> = queue.iter().map(|r| r.plugin).collect();
                return Err(PluginError::circular_dependency(&find_cycle(
                    rules, &pending,
                )));
            }
        }

        Ok(Self { entries })
    }

    /// Chain entries in dependency order.
    pub fn entries(&self) -> &[(PluginName, Vec<PluginName>)] {
        &self.entries
    }

    /// Chained plugins in dependency order.
    pub fn plugins(&self) -> impl Iterator<Item = PluginName> + '_ {
        self.entries.iter().map(|(p, _)| *p)
    }

    /// Whether `plugin` has declared dependencies.
    pub fn contains(&self, plugin: PluginName) -> bool {
        self.entries.iter().any(|(p, _)| *p == plugin)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Find one cycle among `pending`, the plugins a stalled pass could not chain.
///
/// Every pending plugin waits on another pending plugin, so a depth-first walk
/// restricted to them always closes a loop.
fn find_cycle(rules: &RuleSet, pending: &[PluginName]) -> Vec<PluginName> {
    let mut marks: HashMap<PluginName, Mark> = HashMap::new();
    let mut stack: Vec<PluginName> = Vec::new();

    for &start in pending {
        if !marks.contains_key(&start)
            && let Some(cycle) = visit(rules, pending, start, &mut marks, &mut stack)
        {
            return cycle;
        }
    }

    pending.to_vec()
}

fn visit(
    rules: &RuleSet,
    pending: &[PluginName],
    plugin: PluginName,
    marks: &mut HashMap<PluginName, Mark>,
    stack: &mut Vec<PluginName>,
) -> Option<Vec<PluginName>> {
    match marks.get(&plugin) {
        Some(Mark::Done) => return None,
        Some(Mark::Visiting) => {
            let start = stack.iter().position(|p| *p == plugin).unwrap_or(0);
            return Some(stack[start..].to_vec());
        }
        None => {}
    }

    marks.insert(plugin, Mark::Visiting);
    stack.push(plugin);

    for dep in rules.dependencies(plugin).unwrap_or_default() {
        if pending.contains(dep)
            && let Some(cycle) = visit(rules, pending, *dep, marks, stack)
        {
            return Some(cycle);
        }
    }

    stack.pop();
    marks.insert(plugin, Mark::Done);
    None
}
