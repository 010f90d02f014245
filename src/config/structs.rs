//! Configuration data structures.
//!
//! This module contains all the struct definitions for configuration options.
//! Each struct corresponds to a section in the TOML configuration file.

/// Root configuration structure containing all settings.
pub mod configuration;

/// Connection engine settings (timeouts, buffers, framing marks).
pub mod network_config;

/// Cluster discovery settings (ports, scan cadence, seeds).
pub mod cluster_config;
