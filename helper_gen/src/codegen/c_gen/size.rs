use super::helpers::{count_expr, guard_wrap, member_access, sized_element_type, STRUCT_PTR};
use crate::config::SchemaConventions;
use helper_types::{Catalogue, FieldRecord, StructRecord};
use std::fmt::Write;

/// How one member contributes to its struct's size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SizeRule {
    /// Covered by `sizeof` of the enclosing struct.
    Baseline,
    /// Pointer to a catalogued struct; the callee treats NULL as zero.
    NestedStruct { type_name: String },
    /// Counted pointer to catalogued structs.
    StructArray { type_name: String, count: String },
    /// `char*` without an explicit count.
    TerminatedString,
    /// Counted array of `char*`.
    StringArray { count: String },
    /// Counted pointer to anything else.
    OpaqueArray { element: String, count: String },
}

impl SizeRule {
    fn uses_counter(&self) -> bool {
        matches!(self, SizeRule::StructArray { .. } | SizeRule::StringArray { .. })
    }
}

pub fn rule_for(field: &FieldRecord, catalogue: &Catalogue) -> SizeRule {
    if !field.is_pointer {
        return SizeRule::Baseline;
    }
    let count = field.counted_length().and_then(count_expr);

    if catalogue.contains(&field.type_name) {
        return match count {
            Some(count) => SizeRule::StructArray {
                type_name: field.type_name.clone(),
                count,
            },
            None => SizeRule::NestedStruct {
                type_name: field.type_name.clone(),
            },
        };
    }
    if field.type_name == "char" {
        return match count {
            Some(count) => SizeRule::StringArray { count },
            None => SizeRule::TerminatedString,
        };
    }
    match count {
        Some(count) => SizeRule::OpaqueArray {
            element: sized_element_type(&field.type_name).to_string(),
            count,
        },
        /* A single pointee of unknown layout is not measured */
        None => SizeRule::Baseline,
    }
}

fn emit_rule(output: &mut String, rule: &SizeRule, field: &str, conventions: &SchemaConventions) {
    let access = member_access(field);
    match rule {
        SizeRule::Baseline => {}
        SizeRule::NestedStruct { type_name } => {
            write!(
                output,
                "        struct_size += {}({});\n",
                conventions.size_fn_name(type_name),
                access,
            )
            .unwrap();
        }
        SizeRule::StructArray { type_name, count } => {
            write!(output, "        for (i = 0; i < {}; i++) {{\n", count).unwrap();
            write!(
                output,
                "            struct_size += {}(&{}[i]);\n",
                conventions.size_fn_name(type_name),
                access,
            )
            .unwrap();
            output.push_str("        }\n");
        }
        SizeRule::TerminatedString => {
            write!(
                output,
                "        struct_size += ({} != NULL) ? sizeof(char)*(1+strlen({})) : 0;\n",
                access, access,
            )
            .unwrap();
        }
        SizeRule::StringArray { count } => {
            write!(output, "        for (i = 0; i < {}; i++) {{\n", count).unwrap();
            write!(
                output,
                "            struct_size += (sizeof(char*) + (sizeof(char) * (1 + strlen({}[i]))));\n",
                access,
            )
            .unwrap();
            output.push_str("        }\n");
        }
        SizeRule::OpaqueArray { element, count } => {
            write!(output, "        struct_size += {} * sizeof({});\n", count, element).unwrap();
        }
    }
}

/// Emits `size_t <prefix><lower>(const T* struct_ptr)` for one struct.
pub fn emit_size_fn(record: &StructRecord, catalogue: &Catalogue, conventions: &SchemaConventions) -> String {
    let type_name = &record.type_name;
    let mut body = String::new();
    write!(
        body,
        "size_t {}(const {}* {}) {{\n",
        conventions.size_fn_name(type_name),
        type_name,
        STRUCT_PTR,
    )
    .unwrap();
    body.push_str("    size_t struct_size = 0;\n");
    write!(body, "    if ({}) {{\n", STRUCT_PTR).unwrap();
    write!(body, "        struct_size = sizeof({});\n", type_name).unwrap();

    let mut counter_declared = false;
    for field in &record.fields {
        let rule = rule_for(field, catalogue);
        if rule.uses_counter() && !counter_declared {
            body.push_str("        size_t i = 0;\n");
            counter_declared = true;
        }
        emit_rule(&mut body, &rule, &field.field_name, conventions);
    }

    body.push_str("    }\n");
    body.push_str("    return struct_size;\n");
    body.push_str("}\n");
    guard_wrap(record.guard_symbol.as_deref(), &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use helper_types::{LengthSpec, StructCategory};

    fn field(type_name: &str, name: &str, is_pointer: bool, length: Option<LengthSpec>) -> FieldRecord {
        FieldRecord {
            type_name: type_name.to_string(),
            field_name: name.to_string(),
            is_pointer,
            is_const: is_pointer,
            is_count_field: false,
            length,
            extended_by: None,
        }
    }

    fn record(name: &str, fields: Vec<FieldRecord>) -> StructRecord {
        StructRecord {
            type_name: name.to_string(),
            category: StructCategory::Struct,
            fields,
            discriminator_tag: None,
            guard_symbol: None,
        }
    }

    fn catalogue_with(records: Vec<StructRecord>) -> Catalogue {
        let mut catalogue = Catalogue::new();
        for record in records {
            catalogue.insert(record).unwrap();
        }
        catalogue
    }

    fn reference(name: &str) -> Option<LengthSpec> {
        Some(LengthSpec::FieldReference(name.to_string()))
    }

    #[test]
    fn every_field_shape_gets_its_rule() {
        let catalogue = catalogue_with(vec![record("VkExtent2D", vec![])]);
        let cases = [
            (field("uint32_t", "width", false, None), SizeRule::Baseline),
            (
                field("VkExtent2D", "pExtent", true, None),
                SizeRule::NestedStruct {
                    type_name: "VkExtent2D".into(),
                },
            ),
            (
                field("VkExtent2D", "pExtents", true, reference("extentCount")),
                SizeRule::StructArray {
                    type_name: "VkExtent2D".into(),
                    count: "struct_ptr->extentCount".into(),
                },
            ),
            (
                field("char", "pName", true, Some(LengthSpec::NullTerminated)),
                SizeRule::TerminatedString,
            ),
            (
                field("char", "ppNames", true, reference("nameCount")),
                SizeRule::StringArray {
                    count: "struct_ptr->nameCount".into(),
                },
            ),
            (
                field("void", "pData", true, reference("dataSize")),
                SizeRule::OpaqueArray {
                    element: "void*".into(),
                    count: "struct_ptr->dataSize".into(),
                },
            ),
            (field("void", "pUserData", true, None), SizeRule::Baseline),
        ];
        for (field, expected) in cases {
            assert_eq!(rule_for(&field, &catalogue), expected, "{}", field.field_name);
        }
    }

    #[test]
    fn plain_struct_is_sizeof_only() {
        let extent = record(
            "VkExtent2D",
            vec![field("uint32_t", "width", false, None), field("uint32_t", "height", false, None)],
        );
        let catalogue = catalogue_with(vec![extent.clone()]);
        let code = emit_size_fn(&extent, &catalogue, &SchemaConventions::default());
        assert_eq!(
            code,
            "size_t vk_size_vkextent2d(const VkExtent2D* struct_ptr) {\n    size_t struct_size = 0;\n    if (struct_ptr) {\n        struct_size = sizeof(VkExtent2D);\n    }\n    return struct_size;\n}\n"
        );
    }

    #[test]
    fn counter_is_declared_once() {
        let list = record(
            "VkExtentList",
            vec![
                field("uint32_t", "extentCount", false, None),
                field("VkExtentList", "pExtents", true, reference("extentCount")),
                field("char", "ppNames", true, reference("extentCount")),
            ],
        );
        let catalogue = catalogue_with(vec![list.clone()]);
        let code = emit_size_fn(&list, &catalogue, &SchemaConventions::default());
        assert_eq!(code.matches("size_t i = 0;").count(), 1);
        assert_eq!(code.matches("for (i = 0; i < struct_ptr->extentCount; i++)").count(), 2);
        assert!(code.find("size_t i = 0;").unwrap() < code.find("for (i").unwrap());
    }

    #[test]
    fn no_counter_without_arrays() {
        let info = record(
            "VkApplicationInfo",
            vec![field("char", "pApplicationName", true, Some(LengthSpec::NullTerminated))],
        );
        let code = emit_size_fn(&info, &Catalogue::new(), &SchemaConventions::default());
        assert!(!code.contains("size_t i"));
        assert!(code.contains(
            "struct_size += (struct_ptr->pApplicationName != NULL) ? sizeof(char)*(1+strlen(struct_ptr->pApplicationName)) : 0;"
        ));
    }

    #[test]
    fn divided_count_uses_integer_division() {
        let state = record(
            "VkPipelineMultisampleStateCreateInfo",
            vec![field(
                "VkSampleMask",
                "pSampleMask",
                true,
                Some(LengthSpec::DividedFieldReference {
                    field: "rasterizationSamples".into(),
                    divisor: 32,
                }),
            )],
        );
        let code = emit_size_fn(&state, &Catalogue::new(), &SchemaConventions::default());
        assert!(code.contains("struct_size += (struct_ptr->rasterizationSamples / 32) * sizeof(VkSampleMask);"));
    }

    #[test]
    fn guarded_routine_is_wrapped() {
        let mut surface = record("VkWin32SurfaceCreateInfoKHR", vec![]);
        surface.guard_symbol = Some("VK_USE_PLATFORM_WIN32_KHR".into());
        let code = emit_size_fn(&surface, &Catalogue::new(), &SchemaConventions::default());
        assert!(code.starts_with("#ifdef VK_USE_PLATFORM_WIN32_KHR\nsize_t vk_size_vkwin32surfacecreateinfokhr("));
        assert!(code.ends_with("}\n#endif // VK_USE_PLATFORM_WIN32_KHR\n"));
    }
}
