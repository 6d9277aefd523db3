//! Service aliases

/// Alternative id pointing at another service id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    /// Id the alias resolves to (may itself be an alias)
    pub target: String,
    /// Whether the alias survives compilation
    pub public: bool,
}

impl Alias {
    /// Create a public alias
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            public: true,
        }
    }

    /// Set visibility
    pub fn with_public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }
}
