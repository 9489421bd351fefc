//! Symbolic variables.

use std::fmt;
use std::sync::Arc;

/// An atomic symbolic variable.
///
/// Symbols are compared by name and by whether they are dummies. Dummy
/// symbols are internal bound variables (integration variables, the Adomian
/// perturbation parameter) and never equal a user symbol of the same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    name: Arc<str>,
    dummy: bool,
}

impl Symbol {
    /// Create a user-visible symbol.
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            dummy: false,
        }
    }

    /// Create an internal bound symbol.
    pub fn dummy(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            dummy: true,
        }
    }

    /// The symbol's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if this is an internal bound symbol.
    pub fn is_dummy(&self) -> bool {
        self.dummy
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dummy_never_equals_user_symbol() {
        assert_eq!(Symbol::new("t"), Symbol::new("t"));
        assert_ne!(Symbol::new("t"), Symbol::dummy("t"));
        assert_eq!(Symbol::dummy("t").to_string(), "t");
    }
}
