//! Configuration management module.
//!
//! Handles loading, parsing and validating configuration from a TOML file.
//!
//! # Configuration File
//!
//! The engine reads `config.toml` from the working directory. A default
//! file can be generated with the `--create-config` CLI flag.
//!
//! # Sections
//!
//! - root: log level
//! - `[network]`: connect timeout, buffer size, framing marks
//! - `[cluster]`: discovery port, scan cadence, seed addresses
//!
//! # Example
//!
//! ```rust,ignore
//! use nodemesh::config::structs::configuration::Configuration;
//!
//! // Load configuration from file
//! let config = Configuration::load_from_file(false)?;
//!
//! // Generate default configuration
//! let default_config = Configuration::init();
//! ```

/// Configuration enumerations (load/parse errors).
pub mod enums;

/// Configuration data structures.
pub mod structs;

/// Implementation blocks for configuration loading/saving.
pub mod impls;
