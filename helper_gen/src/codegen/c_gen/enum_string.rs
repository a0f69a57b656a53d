use helper_types::EnumRecord;
use std::fmt::Write;

/// `string_<Group>()`: one `case` per enabled value and an "Unhandled" fallback
/// for anything else the caller passes in.
pub fn emit_enum_string_fn(group: &EnumRecord) -> String {
    let name = &group.group_name;
    let mut output = String::new();
    write!(output, "static inline const char* string_{}({} input_value)\n", name, name).unwrap();
    output.push_str("{\n");
    write!(output, "    switch (({})input_value)\n", name).unwrap();
    output.push_str("    {\n");
    for value in &group.value_names {
        write!(output, "        case {}:\n", value).unwrap();
        write!(output, "            return \"{}\";\n", value).unwrap();
    }
    output.push_str("        default:\n");
    write!(output, "            return \"Unhandled {}\";\n", name).unwrap();
    output.push_str("    }\n");
    output.push_str("}\n");
    output
}
