//! Parameter storage and placeholder resolution
//!
//! Parameter values are JSON values. Strings may embed other parameters
//! with `%name%`; a string that is exactly one placeholder resolves to the
//! referenced value with its type intact, otherwise the referenced values
//! are interpolated as text. `%%` stands for a literal percent sign.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{Error, Result};

/// Named parameters of a container
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterBag {
    parameters: IndexMap<String, Value>,
    resolved: bool,
}

impl ParameterBag {
    /// Create an empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bag from raw (unresolved) values
    pub fn from_map(parameters: IndexMap<String, Value>) -> Self {
        Self {
            parameters,
            resolved: false,
        }
    }

    /// Create a bag whose values are already resolved
    pub fn resolved_from_map(parameters: IndexMap<String, Value>) -> Self {
        Self {
            parameters,
            resolved: true,
        }
    }

    /// Get a raw parameter value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.parameters.get(name)
    }

    /// Check if a parameter exists
    pub fn has(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    /// Set a parameter, replacing any previous value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.parameters.insert(name.into(), value.into());
    }

    /// Remove a parameter, keeping the order of the rest
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.parameters.shift_remove(name)
    }

    /// Merge parameters in; incoming values win on collision
    pub fn add(&mut self, parameters: IndexMap<String, Value>) {
        self.parameters.extend(parameters);
    }

    /// All parameters in insertion order
    pub fn all(&self) -> &IndexMap<String, Value> {
        &self.parameters
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Whether the bag is empty
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Whether every value has been resolved
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Resolve every placeholder in the bag itself
    pub fn resolve(&mut self) -> Result<()> {
        if self.resolved {
            return Ok(());
        }
        let mut resolved = IndexMap::with_capacity(self.parameters.len());
        for name in self.parameters.keys() {
            let mut stack = Vec::new();
            resolved.insert(name.clone(), self.resolve_named(name, &mut stack)?);
        }
        self.parameters = resolved;
        self.resolved = true;
        Ok(())
    }

    /// Resolve placeholders inside an arbitrary value
    pub fn resolve_value(&self, value: &Value) -> Result<Value> {
        self.resolve_value_inner(value, &mut Vec::new())
    }

    /// Resolve placeholders inside a string
    pub fn resolve_string(&self, value: &str) -> Result<Value> {
        self.resolve_string_inner(value, &mut Vec::new())
    }

    fn resolve_value_inner(&self, value: &Value, stack: &mut Vec<String>) -> Result<Value> {
        match value {
            Value::String(s) => self.resolve_string_inner(s, stack),
            Value::Array(items) => items
                .iter()
                .map(|item| self.resolve_value_inner(item, stack))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            Value::Object(entries) => {
                let mut resolved = serde_json::Map::with_capacity(entries.len());
                for (key, item) in entries {
                    let key = match self.resolve_string_inner(key, stack)? {
                        Value::String(s) => s,
                        other => other.to_string(),
                    };
                    resolved.insert(key, self.resolve_value_inner(item, stack)?);
                }
                Ok(Value::Object(resolved))
            }
            other => Ok(other.clone()),
        }
    }

    fn resolve_string_inner(&self, value: &str, stack: &mut Vec<String>) -> Result<Value> {
        if let Some(name) = whole_placeholder(value) {
            return self.resolve_named(name, stack);
        }

        let mut out = String::with_capacity(value.len());
        let mut rest = value;
        while let Some(pos) = rest.find('%') {
            out.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];
            if let Some(stripped) = after.strip_prefix('%') {
                out.push('%');
                rest = stripped;
                continue;
            }
            match after.find('%') {
                Some(end) if is_parameter_name(&after[..end]) => {
                    let name = &after[..end];
                    let resolved = self.resolve_named(name, stack)?;
                    out.push_str(&interpolate(name, &resolved, value)?);
                    rest = &after[end + 1..];
                }
                _ => {
                    out.push('%');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        Ok(Value::String(out))
    }

    fn resolve_named(&self, name: &str, stack: &mut Vec<String>) -> Result<Value> {
        if let Some(pos) = stack.iter().position(|seen| seen == name) {
            let mut path = stack[pos..].to_vec();
            path.push(name.to_string());
            return Err(Error::ParameterCircularReference { path });
        }

        let raw = self
            .parameters
            .get(name)
            .ok_or_else(|| Error::parameter_not_found(name, stack.last().cloned()))?;
        if self.resolved {
            return Ok(raw.clone());
        }

        stack.push(name.to_string());
        let resolved = self.resolve_value_inner(raw, stack);
        stack.pop();
        resolved
    }
}

fn is_parameter_name(candidate: &str) -> bool {
    !candidate.is_empty() && !candidate.chars().any(char::is_whitespace)
}

fn whole_placeholder(value: &str) -> Option<&str> {
    let inner = value.strip_prefix('%')?.strip_suffix('%')?;
    (is_parameter_name(inner) && !inner.contains('%')).then_some(inner)
}

fn interpolate(name: &str, resolved: &Value, within: &str) -> Result<String> {
    match resolved {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(Error::invalid_argument(format!(
            "A string value must be composed of strings and/or numbers, but found parameter \"{name}\" inside string value \"{within}\""
        ))),
    }
}
