//! Infrastructure layer constants

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "scf.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "scf";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "SCF";

/// Separator between nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "SCF_LOG";

/// Fallback file stem for log files
pub const LOG_FILE_STEM: &str = "scf";

// ============================================================================
// CONTAINER CACHE CONSTANTS
// ============================================================================

/// Class name used for dumped containers when none is configured
pub const DEFAULT_CONTAINER_CLASS: &str = "ProjectServiceContainer";

/// Directory compiled containers are dumped to by default
pub const DEFAULT_CACHE_DIR: &str = "var/cache";

/// Extension of dumped container files
pub const DUMP_FILE_EXTENSION: &str = "yml";

/// First line of every dumped container
pub const DUMP_HEADER: &str = "# This file has been generated by scf. Do not edit.";

// ============================================================================
// SERVICE FILE SYNTAX
// ============================================================================

/// Prefix marking a service reference
pub const REFERENCE_PREFIX: char = '@';

/// Prefix marking a reference ignored when the service is missing
pub const OPTIONAL_REFERENCE_PREFIX: &str = "@?";

/// File extensions handled by the YAML loader
pub const YAML_EXTENSIONS: [&str; 2] = ["yml", "yaml"];
