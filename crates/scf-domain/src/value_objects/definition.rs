//! Service definitions

use indexmap::IndexMap;
use serde_json::Value;

use super::argument::Argument;
use super::reference::Reference;

/// Attributes attached to one occurrence of a tag
pub type TagAttributes = IndexMap<String, Value>;

/// Method invoked on the service after construction
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    /// Method name
    pub method: String,
    /// Call arguments
    pub arguments: Vec<Argument>,
}

impl MethodCall {
    /// Create a method call
    pub fn new(method: impl Into<String>, arguments: Vec<Argument>) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }
}

/// Declarative description of how a service is built
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    /// Implementation class or type name
    pub class: Option<String>,
    /// Constructor arguments
    pub arguments: Vec<Argument>,
    /// Post-construction method calls
    pub calls: Vec<MethodCall>,
    /// Tag name to every attribute set it was tagged with
    pub tags: IndexMap<String, Vec<TagAttributes>>,
    /// Whether the service may be fetched directly; private unused
    /// services are removed during compilation
    pub public: bool,
    /// Whether one instance is shared by every consumer
    pub shared: bool,
}

impl Default for Definition {
    fn default() -> Self {
        Self {
            class: None,
            arguments: Vec::new(),
            calls: Vec::new(),
            tags: IndexMap::new(),
            public: true,
            shared: true,
        }
    }
}

impl Definition {
    /// Create a definition for a class
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            ..Self::default()
        }
    }

    /// Append a constructor argument
    pub fn with_argument(mut self, argument: impl Into<Argument>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    /// Append a method call
    pub fn with_call(mut self, method: impl Into<String>, arguments: Vec<Argument>) -> Self {
        self.calls.push(MethodCall::new(method, arguments));
        self
    }

    /// Add a tag occurrence
    pub fn with_tag(mut self, name: impl Into<String>, attributes: TagAttributes) -> Self {
        self.add_tag(name, attributes);
        self
    }

    /// Set visibility
    pub fn with_public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    /// Set sharing
    pub fn with_shared(mut self, shared: bool) -> Self {
        self.shared = shared;
        self
    }

    /// Add a tag occurrence; a tag may be added several times
    pub fn add_tag(&mut self, name: impl Into<String>, attributes: TagAttributes) {
        self.tags.entry(name.into()).or_default().push(attributes);
    }

    /// Whether the definition carries a tag
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    /// Attribute sets for a tag, empty when untagged
    pub fn tag(&self, name: &str) -> &[TagAttributes] {
        self.tags.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every reference held in arguments and method calls
    pub fn references(&self) -> Vec<&Reference> {
        let mut found = Vec::new();
        let mut push = |reference| found.push(reference);
        for argument in &self.arguments {
            argument.for_each_reference(&mut push);
        }
        for call in &self.calls {
            for argument in &call.arguments {
                argument.for_each_reference(&mut push);
            }
        }
        found
    }

    /// Walk every reference in arguments and method calls mutably
    pub fn for_each_reference_mut(&mut self, f: &mut impl FnMut(&mut Reference)) {
        for argument in &mut self.arguments {
            argument.for_each_reference_mut(f);
        }
        for call in &mut self.calls {
            for argument in &mut call.arguments {
                argument.for_each_reference_mut(f);
            }
        }
    }

    /// References held in constructor arguments only
    pub fn constructor_references(&self) -> Vec<&Reference> {
        self.arguments.iter().flat_map(Argument::references).collect()
    }
}
