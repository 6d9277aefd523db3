//! Service references

use std::fmt;

/// What to do when a referenced service does not exist at compile time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidBehavior {
    /// Fail compilation
    #[default]
    Exception,
    /// Substitute a null value
    Null,
    /// Drop the argument or method call
    Ignore,
}

/// Reference to another service by id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Referenced service id
    pub id: String,
    /// Behaviour when the id cannot be resolved
    pub on_invalid: InvalidBehavior,
}

impl Reference {
    /// Create a strict reference
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            on_invalid: InvalidBehavior::Exception,
        }
    }

    /// Set the invalid behaviour
    pub fn with_on_invalid(mut self, on_invalid: InvalidBehavior) -> Self {
        self.on_invalid = on_invalid;
        self
    }

    /// Create a reference that is dropped when the target is missing
    pub fn optional(id: impl Into<String>) -> Self {
        Self::new(id).with_on_invalid(InvalidBehavior::Ignore)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
