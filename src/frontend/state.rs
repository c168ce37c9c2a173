//! State tables
//!
//! A state table maps state names to ordered rule lists. Declaration order
//! is significant: the first rule that matches at the cursor wins.

use std::collections::HashMap;

use crate::frontend::rule::{Rule, RuleDef, StateId};
use crate::utils::{Error, Result};

/// Name of the state every scan starts in
pub const ROOT: &str = "root";

/// Declarative form of a state
#[derive(Debug, Clone)]
pub struct StateDef {
    pub name: &'static str,
    pub rules: Vec<RuleDef>,
}

impl StateDef {
    pub fn new(name: &'static str, rules: Vec<RuleDef>) -> Self {
        Self { name, rules }
    }
}

/// A compiled, immutable state table
#[derive(Debug)]
pub struct StateTable {
    names: Vec<&'static str>,
    rules: Vec<Vec<Rule>>,
    root: StateId,
}

impl StateTable {
    /// Compile and validate a set of state declarations.
    ///
    /// Fails on duplicate states, a missing `root`, pushes to undeclared
    /// states, invalid patterns and out-of-range capture groups.
    pub fn build(defs: Vec<StateDef>) -> Result<Self> {
        let mut index: HashMap<&'static str, StateId> = HashMap::new();
        for (i, def) in defs.iter().enumerate() {
            if index.insert(def.name, StateId(i)).is_some() {
                return Err(Error::DuplicateState(def.name));
            }
        }
        let root = *index.get(ROOT).ok_or(Error::MissingRoot(ROOT))?;

        let mut names = Vec::with_capacity(defs.len());
        let mut rules = Vec::with_capacity(defs.len());
        for def in defs {
            let compiled = def
                .rules
                .into_iter()
                .map(|rule| Rule::compile(def.name, rule, |target| index.get(target).copied()))
                .collect::<Result<Vec<_>>>()?;
            log::debug!("compiled state `{}` with {} rules", def.name, compiled.len());
            names.push(def.name);
            rules.push(compiled);
        }

        Ok(Self { names, rules, root })
    }

    /// The state scanning starts in
    pub fn root(&self) -> StateId {
        self.root
    }

    /// Ordered rules of a state
    pub fn rules(&self, state: StateId) -> &[Rule] {
        &self.rules[state.0]
    }

    pub fn name(&self, state: StateId) -> &'static str {
        self.names[state.0]
    }

    /// Look a state up by name
    pub fn id(&self, name: &str) -> Option<StateId> {
        self.names.iter().position(|n| *n == name).map(StateId)
    }

    /// Number of declared states
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
