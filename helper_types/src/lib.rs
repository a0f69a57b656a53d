//! Helper Generator Record Definitions
//!
//! This crate contains the records the helper generator builds from an API
//! registry: classified struct members, their length semantics, the ordered
//! struct catalogue and enum groups. It holds pure data only; registry
//! parsing and code emission live in `helper_gen`.

pub mod length;
pub mod types;

// Re-export commonly used types at the crate root
pub use length::*;
pub use types::*;
