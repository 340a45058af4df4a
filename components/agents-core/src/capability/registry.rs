//! Case-insensitive lookup table for capabilities.

use crate::capability::Capability;
use std::collections::HashMap;
use std::sync::Arc;

/// Capabilities keyed by upper-cased name.
///
/// Registering two capabilities whose names differ only by case keeps the
/// later one.
#[derive(Clone, Default)]
pub struct CapabilityTable {
    by_name: HashMap<String, Arc<dyn Capability>>,
}

impl std::fmt::Debug for CapabilityTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityTable")
            .field("capabilities", &self.by_name.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl CapabilityTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from a list; later entries overwrite earlier ones.
    #[must_use]
    pub fn from_capabilities(capabilities: &[Arc<dyn Capability>]) -> Self {
        let mut table = Self::new();
        for capability in capabilities {
            table.register(Arc::clone(capability));
        }
        table
    }

    /// Registers a capability under its upper-cased name.
    pub fn register(&mut self, capability: Arc<dyn Capability>) {
        let key = capability.name().to_uppercase();
        if self.by_name.insert(key, capability).is_some() {
            tracing::debug!("capability registered twice, keeping the later one");
        }
    }

    /// Resolves a capability by name, ignoring case.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Arc<dyn Capability>> {
        self.by_name.get(&name.to_uppercase())
    }

    /// Names of the registered capabilities, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .by_name
            .values()
            .map(|c| c.name().into_owned())
            .collect();
        names.sort();
        names
    }

    /// `(name, description)` pairs of the registered capabilities, sorted by name.
    #[must_use]
    pub fn descriptions(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .by_name
            .values()
            .map(|c| (c.name().into_owned(), c.description().into_owned()))
            .collect();
        pairs.sort();
        pairs
    }

    /// Returns the number of distinct capabilities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Returns `true` if no capability is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Observation recorded when the model names a capability that does not exist.
#[must_use]
pub fn unknown_capability_observation(name: &str) -> String {
    format!("{name} is not a valid tool, try another one")
}

/// Comma-separated capability names, in registration order.
#[must_use]
pub fn tool_names(capabilities: &[Arc<dyn Capability>]) -> String {
    capabilities
        .iter()
        .map(|c| c.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One `name: description` line per capability, in registration order.
#[must_use]
pub fn tool_descriptions(capabilities: &[Arc<dyn Capability>]) -> String {
    capabilities
        .iter()
        .map(|c| format!("- {}: {}", c.name(), c.description()))
        .collect::<Vec<_>>()
        .join("\n")
}
