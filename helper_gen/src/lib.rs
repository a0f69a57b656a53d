//! Generates C helper files from an API registry: enum-to-string converters
//! and runtime struct-size routines, including the extension-chain walker.

pub mod catalogue;
pub mod codegen;
pub mod config;
pub mod error;
pub mod registry;

pub use helper_types;
