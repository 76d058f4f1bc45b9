//! Static dispatch table from tool name to bound implementation.

use std::sync::Arc;

use super::tool::Tool;
use super::types::ToolSpec;
use crate::error::FitError;

/// Tools known at configuration time, in declaration order.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Names must be unique within a registry.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), FitError> {
        if self.get(tool.name()).is_some() {
            return Err(FitError::Configuration(format!(
                "tool '{}' registered twice",
                tool.name()
            )));
        }
        self.tools.push(tool);
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, tool: Arc<dyn Tool>) -> Result<Self, FitError> {
        self.register(tool)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// Declarations for every registered tool, or `None` when empty.
    pub fn specs(&self) -> Option<Vec<ToolSpec>> {
        if self.tools.is_empty() {
            None
        } else {
            Some(self.tools.iter().map(|t| t.spec()).collect())
        }
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.tools.iter().map(|t| t.name()))
            .finish()
    }
}
