//! Filesystem-backed services: settings file and cache/log directories.

pub mod settings;
