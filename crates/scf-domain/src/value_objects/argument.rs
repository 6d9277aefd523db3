//! Constructor and method-call arguments

use indexmap::IndexMap;
use serde_json::Value;

use super::reference::Reference;

/// Argument passed to a service constructor or method call
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// Literal value, may contain `%parameter%` placeholders until compiled
    Value(Value),
    /// Another service
    Reference(Reference),
    /// Ordered collection of arguments
    List(Vec<Argument>),
    /// Keyed collection of arguments
    Map(IndexMap<String, Argument>),
}

impl Argument {
    /// Literal value argument
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    /// Strict service reference argument
    pub fn reference(id: impl Into<String>) -> Self {
        Self::Reference(Reference::new(id))
    }

    /// Walk every reference, depth first
    pub fn for_each_reference<'a>(&'a self, f: &mut impl FnMut(&'a Reference)) {
        match self {
            Self::Value(_) => {}
            Self::Reference(reference) => f(reference),
            Self::List(items) => items.iter().for_each(|item| item.for_each_reference(f)),
            Self::Map(items) => items.values().for_each(|item| item.for_each_reference(f)),
        }
    }

    /// Walk every reference mutably, depth first
    pub fn for_each_reference_mut(&mut self, f: &mut impl FnMut(&mut Reference)) {
        match self {
            Self::Value(_) => {}
            Self::Reference(reference) => f(reference),
            Self::List(items) => items
                .iter_mut()
                .for_each(|item| item.for_each_reference_mut(f)),
            Self::Map(items) => items
                .values_mut()
                .for_each(|item| item.for_each_reference_mut(f)),
        }
    }

    /// Collect every reference, depth first
    pub fn references(&self) -> Vec<&Reference> {
        let mut found = Vec::new();
        self.for_each_reference(&mut |reference| found.push(reference));
        found
    }
}

impl From<Reference> for Argument {
    fn from(reference: Reference) -> Self {
        Self::Reference(reference)
    }
}

impl From<Value> for Argument {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Self::Value(Value::String(value.to_string()))
    }
}
