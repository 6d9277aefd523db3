//! Error handling types

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// What kind of registration collided in a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationKind {
    /// Extension keyed by alias
    Extension,
    /// Compiler pass keyed by its identifier
    CompilerPass,
}

impl fmt::Display for RegistrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extension => write!(f, "Extension with alias"),
            Self::CompilerPass => write!(f, "Compiler pass"),
        }
    }
}

/// Main error type for the Shared Container Factory
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (simple form)
    #[error("I/O error: {source}")]
    IoSimple {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON conversion error
    #[error("JSON conversion error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// A registry already holds an entry under this key
    #[error("{kind} '{key}' has already been added")]
    DuplicateRegistration {
        /// Which registry collided
        kind: RegistrationKind,
        /// Alias or pass identifier
        key: String,
    },

    /// Dump target directory does not exist
    #[error("Dump location does not exist: {}", path.display())]
    InvalidTarget {
        /// The requested target directory
        path: PathBuf,
    },

    /// Configuration was given for an alias no extension answers to
    #[error("There is no extension able to load the configuration for '{alias}'")]
    ExtensionNotFound {
        /// The unknown alias
        alias: String,
    },

    /// A reference points to a service that does not exist
    #[error("{}", service_not_found_message(id, referenced_by.as_deref()))]
    ServiceNotFound {
        /// The missing service id
        id: String,
        /// The service holding the reference, if any
        referenced_by: Option<String>,
    },

    /// A placeholder names a parameter that does not exist
    #[error("{}", parameter_not_found_message(name, referenced_by.as_deref()))]
    ParameterNotFound {
        /// The missing parameter name
        name: String,
        /// The parameter or service holding the placeholder, if any
        referenced_by: Option<String>,
    },

    /// Parameters reference each other in a cycle
    #[error("Circular reference detected for parameter \"{}\" (path: {})", path.first().map_or("", String::as_str), path.join(" > "))]
    ParameterCircularReference {
        /// The resolution path, first and last entries are equal
        path: Vec<String>,
    },

    /// Services depend on each other in a cycle
    #[error("Circular reference detected for service \"{}\" (path: {})", path.first().map_or("", String::as_str), path.join(" -> "))]
    ServiceCircularReference {
        /// The dependency path, first and last entries are equal
        path: Vec<String>,
    },

    /// Malformed service definition
    #[error("Invalid definition for service \"{id}\": {message}")]
    InvalidDefinition {
        /// The offending service id
        id: String,
        /// Description of the problem
        message: String,
    },

    /// Attempt to mutate a compiled container
    #[error("Cannot {operation} on a compiled container")]
    FrozenContainer {
        /// The rejected operation
        operation: String,
    },

    /// Service-definition file could not be loaded
    #[error("Failed to load \"{}\": {message}", file.display())]
    Loader {
        /// The file being loaded
        file: PathBuf,
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Container could not be rendered or restored
    #[error("Dump error: {message}")]
    Dump {
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Resource not found error
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

fn service_not_found_message(id: &str, referenced_by: Option<&str>) -> String {
    match referenced_by {
        Some(source) => {
            format!("The service \"{source}\" has a dependency on a non-existent service \"{id}\"")
        }
        None => format!("You have requested a non-existent service \"{id}\""),
    }
}

fn parameter_not_found_message(name: &str, referenced_by: Option<&str>) -> String {
    match referenced_by {
        Some(source) => {
            format!("\"{source}\" has a dependency on a non-existent parameter \"{name}\"")
        }
        None => format!("You have requested a non-existent parameter \"{name}\""),
    }
}

// Registry error creation methods
impl Error {
    /// Create a duplicate registration error
    pub fn duplicate<S: Into<String>>(kind: RegistrationKind, key: S) -> Self {
        Self::DuplicateRegistration {
            kind,
            key: key.into(),
        }
    }

    /// Create an invalid dump target error
    pub fn invalid_target<P: Into<PathBuf>>(path: P) -> Self {
        Self::InvalidTarget { path: path.into() }
    }

    /// Create a frozen container error
    pub fn frozen<S: Into<String>>(operation: S) -> Self {
        Self::FrozenContainer {
            operation: operation.into(),
        }
    }
}

// Container error creation methods
impl Error {
    /// Create an extension not found error
    pub fn extension_not_found<S: Into<String>>(alias: S) -> Self {
        Self::ExtensionNotFound {
            alias: alias.into(),
        }
    }

    /// Create a service not found error
    pub fn service_not_found<S: Into<String>>(id: S, referenced_by: Option<String>) -> Self {
        Self::ServiceNotFound {
            id: id.into(),
            referenced_by,
        }
    }

    /// Create a parameter not found error
    pub fn parameter_not_found<S: Into<String>>(name: S, referenced_by: Option<String>) -> Self {
        Self::ParameterNotFound {
            name: name.into(),
            referenced_by,
        }
    }

    /// Create an invalid definition error
    pub fn invalid_definition<I: Into<String>, M: Into<String>>(id: I, message: M) -> Self {
        Self::InvalidDefinition {
            id: id.into(),
            message: message.into(),
        }
    }
}

// I/O and loading error creation methods
impl Error {
    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a loader error
    pub fn loader<P: Into<PathBuf>, S: Into<String>>(file: P, message: S) -> Self {
        Self::Loader {
            file: file.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a loader error with source
    pub fn loader_with_source<
        P: Into<PathBuf>,
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        file: P,
        message: S,
        source: E,
    ) -> Self {
        Self::Loader {
            file: file.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a dump error
    pub fn dump<S: Into<String>>(message: S) -> Self {
        Self::Dump {
            message: message.into(),
            source: None,
        }
    }
}

// Configuration and general error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
