use super::helpers::{guard_wrap, STRUCT_PTR};
use crate::config::SchemaConventions;
use helper_types::Catalogue;
use std::fmt::Write;

/* Prototypes for the dispatcher and every size routine, guards included */
pub fn emit_prototypes(catalogue: &Catalogue, conventions: &SchemaConventions) -> String {
    let mut output = String::new();
    write!(output, "size_t {}(const void* {});\n", conventions.chain_fn_name, STRUCT_PTR).unwrap();
    for record in catalogue.iter() {
        let prototype = format!(
            "size_t {}(const {}* {});\n",
            conventions.size_fn_name(&record.type_name),
            record.type_name,
            STRUCT_PTR
        );
        output.push_str(&guard_wrap(record.guard_symbol.as_deref(), &prototype));
    }
    output
}
