pub mod chain;
pub mod dcls;
pub mod enum_string;
pub mod helpers;
pub mod size;

// Re-export main public functions
pub use chain::{chain_eligible, emit_chain_dispatcher, emit_chain_header, emit_header_asserts};
pub use dcls::emit_prototypes;
pub use enum_string::emit_enum_string_fn;
pub use size::emit_size_fn;
