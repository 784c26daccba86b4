//! Interpolation context collaborator
//!
//! The template engine that resolves `{{ }}` expressions lives in the
//! surrounding tool. By the time `Config::prepare` runs, every string
//! field holds a literal value; this type only carries the engine's
//! evaluation state across the call boundary.

use std::collections::HashMap;

/// Evaluation context of the external template engine.
///
/// Opaque to validation: `prepare` accepts it for parity with callers
/// that thread it through, but never parses template syntax itself.
#[derive(Debug, Clone, Default)]
pub struct InterpolationContext {
    user_variables: HashMap<String, String>,
}

impl InterpolationContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resolved user variable
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.user_variables.insert(key.into(), value.into());
        self
    }

    /// Look up a resolved user variable
    pub fn variable(&self, key: &str) -> Option<&str> {
        self.user_variables.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_lookup() {
        let ctx = InterpolationContext::new().with_variable("region", "us-east-1");
        assert_eq!(ctx.variable("region"), Some("us-east-1"));
        assert_eq!(ctx.variable("zone"), None);
    }
}
