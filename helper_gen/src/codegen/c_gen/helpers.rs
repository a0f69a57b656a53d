use helper_types::{LengthSpec, POINTER_MEMBER_SEPARATOR};

/// Name of the parameter every emitted routine takes.
pub const STRUCT_PTR: &str = "struct_ptr";

/* Wrap a block in `#ifdef G ... #endif // G` when the struct carries a guard */
pub fn guard_wrap(guard: Option<&str>, body: &str) -> String {
    match guard {
        Some(guard) => format!("#ifdef {}\n{}#endif // {}\n", guard, body, guard),
        None => body.to_string(),
    }
}

/* Render a count as a C expression reading through `struct_ptr` */
pub fn count_expr(spec: &LengthSpec) -> Option<String> {
    match spec {
        LengthSpec::FieldReference(path) => Some(member_access(path)),
        LengthSpec::DividedFieldReference { field, divisor } => {
            Some(format!("({} / {})", member_access(field), divisor))
        }
        LengthSpec::NullTerminated => None,
    }
}

pub fn member_access(path: &str) -> String {
    format!("{}{}{}", STRUCT_PTR, POINTER_MEMBER_SEPARATOR, path)
}

/* `sizeof(void)` is not valid C; count opaque elements as pointers */
pub fn sized_element_type(type_name: &str) -> &str {
    if type_name == "void" { "void*" } else { type_name }
}
