/* Extension-chain dispatcher.
 *
 * Every chain-eligible struct begins with the discriminator and next-pointer
 * members. The source artifact declares that prefix once as
 * `struct_chain_header`, asserts the offsets per struct, and walks the chain
 * through it. */

use super::helpers::{guard_wrap, STRUCT_PTR};
use crate::config::SchemaConventions;
use helper_types::{Catalogue, StructRecord};
use std::collections::HashSet;
use std::fmt::Write;
use tracing::warn;

pub const CHAIN_HEADER: &str = "struct_chain_header";

const UNMAPPED_TAG_MESSAGE: &str = "unmapped structure type in extension chain";

/// Tagged structs that get a `case` in the dispatcher, paired with their tag.
///
/// A struct must carry both header members to be walked through the header
/// view. When two structs resolve to the same tag the first one declared keeps
/// it.
pub fn chain_eligible<'a>(
    catalogue: &'a Catalogue,
    conventions: &SchemaConventions,
) -> Vec<(&'a str, &'a StructRecord)> {
    let mut seen_tags = HashSet::new();
    let mut eligible = Vec::new();
    for (tag, record) in catalogue.tagged() {
        if !record.has_field(&conventions.discriminator_field) || !record.has_field(&conventions.extensible_field) {
            warn!(
                "{} is tagged {} but lacks {}/{}; not walkable in a chain",
                record.type_name, tag, conventions.discriminator_field, conventions.extensible_field
            );
            continue;
        }
        if !seen_tags.insert(tag) {
            warn!("{} repeats discriminator {}; the first declaration keeps the case", record.type_name, tag);
            continue;
        }
        eligible.push((tag, record));
    }
    eligible
}

pub fn emit_chain_header(conventions: &SchemaConventions) -> String {
    let mut output = String::new();
    write!(output, "typedef struct {} {{\n", CHAIN_HEADER).unwrap();
    write!(
        output,
        "    {} {};\n",
        conventions.discriminator_type, conventions.discriminator_field,
    )
    .unwrap();
    write!(output, "    const void* {};\n", conventions.extensible_field).unwrap();
    write!(output, "}} {};\n", CHAIN_HEADER).unwrap();
    output
}

/// One `_Static_assert` pair per eligible struct pinning its header members to
/// the offsets of `struct_chain_header`.
pub fn emit_header_asserts(eligible: &[(&str, &StructRecord)], conventions: &SchemaConventions) -> String {
    let mut output = String::new();
    for (_, record) in eligible {
        let mut asserts = String::new();
        for member in [&conventions.discriminator_field, &conventions.extensible_field] {
            write!(
                asserts,
                "_Static_assert(offsetof({}, {}) == offsetof({}, {}), \"{}.{} is not at the chain header offset\");\n",
                record.type_name, member, CHAIN_HEADER, member, record.type_name, member,
            )
            .unwrap();
        }
        output.push_str(&guard_wrap(record.guard_symbol.as_deref(), &asserts));
    }
    output
}

pub fn emit_chain_dispatcher(eligible: &[(&str, &StructRecord)], conventions: &SchemaConventions) -> String {
    let mut output = String::new();
    write!(
        output,
        "size_t {}(const void* {}) {{\n",
        conventions.chain_fn_name, STRUCT_PTR,
    )
    .unwrap();
    write!(
        output,
        "    const {}* link = (const {}*){};\n",
        CHAIN_HEADER, CHAIN_HEADER, STRUCT_PTR,
    )
    .unwrap();
    output.push_str("    size_t struct_size = 0;\n");
    output.push_str("    while (link) {\n");
    write!(output, "        switch (link->{}) {{\n", conventions.discriminator_field).unwrap();

    for (tag, record) in eligible {
        let mut case = String::new();
        write!(case, "            case {}:\n", tag).unwrap();
        write!(
            case,
            "                struct_size += {}((const {}*)link);\n",
            conventions.size_fn_name(&record.type_name),
            record.type_name,
        )
        .unwrap();
        case.push_str("                break;\n");
        output.push_str(&guard_wrap(record.guard_symbol.as_deref(), &case));
    }

    output.push_str("            default:\n");
    write!(output, "                assert(0 && \"{}\");\n", UNMAPPED_TAG_MESSAGE).unwrap();
    output.push_str("                abort();\n");
    output.push_str("        }\n");
    write!(
        output,
        "        link = (const {}*)link->{};\n",
        CHAIN_HEADER, conventions.extensible_field,
    )
    .unwrap();
    output.push_str("    }\n");
    output.push_str("    return struct_size;\n");
    output.push_str("}\n");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use helper_types::{FieldRecord, StructCategory};

    fn member(type_name: &str, name: &str) -> FieldRecord {
        FieldRecord {
            type_name: type_name.to_string(),
            field_name: name.to_string(),
            is_pointer: name == "pNext",
            is_const: false,
            is_count_field: false,
            length: None,
            extended_by: None,
        }
    }

    fn chained(name: &str, tag: &str, guard: Option<&str>) -> StructRecord {
        StructRecord {
            type_name: name.to_string(),
            category: StructCategory::Struct,
            fields: vec![member("VkStructureType", "sType"), member("void", "pNext")],
            discriminator_tag: Some(tag.to_string()),
            guard_symbol: guard.map(str::to_string),
        }
    }

    fn catalogue_with(records: Vec<StructRecord>) -> Catalogue {
        let mut catalogue = Catalogue::new();
        for record in records {
            catalogue.insert(record).unwrap();
        }
        catalogue
    }

    #[test]
    fn duplicate_tag_keeps_first_declaration() {
        let catalogue = catalogue_with(vec![
            chained("VkFirstInfo", "VK_STRUCTURE_TYPE_SHARED", None),
            chained("VkSecondInfo", "VK_STRUCTURE_TYPE_SHARED", None),
            chained("VkThirdInfo", "VK_STRUCTURE_TYPE_THIRD_INFO", None),
        ]);
        let eligible = chain_eligible(&catalogue, &SchemaConventions::default());
        let names: Vec<&str> = eligible.iter().map(|(_, r)| r.type_name.as_str()).collect();
        assert_eq!(names, vec!["VkFirstInfo", "VkThirdInfo"]);
    }

    #[test]
    fn headerless_struct_is_not_eligible() {
        let mut broken = chained("VkNoNextInfo", "VK_STRUCTURE_TYPE_NO_NEXT_INFO", None);
        broken.fields.pop();
        let catalogue = catalogue_with(vec![broken]);
        assert!(chain_eligible(&catalogue, &SchemaConventions::default()).is_empty());
    }

    #[test]
    fn dispatcher_cases_and_fatal_default() {
        let catalogue = catalogue_with(vec![
            chained("VkApplicationInfo", "VK_STRUCTURE_TYPE_APPLICATION_INFO", None),
            chained("VkTestInfoKHR", "VK_STRUCTURE_TYPE_TEST_INFO_KHR", Some("VK_USE_PLATFORM_TEST")),
        ]);
        let conventions = SchemaConventions::default();
        let eligible = chain_eligible(&catalogue, &conventions);
        let code = emit_chain_dispatcher(&eligible, &conventions);

        assert!(code.starts_with("size_t get_struct_chain_size(const void* struct_ptr) {\n"));
        assert!(code.contains(
            "            case VK_STRUCTURE_TYPE_APPLICATION_INFO:\n                struct_size += vk_size_vkapplicationinfo((const VkApplicationInfo*)link);\n                break;\n"
        ));
        assert!(code.contains("#ifdef VK_USE_PLATFORM_TEST\n            case VK_STRUCTURE_TYPE_TEST_INFO_KHR:\n"));
        assert!(code.contains("                assert(0 && \"unmapped structure type in extension chain\");\n                abort();\n"));
        assert!(code.contains("link = (const struct_chain_header*)link->pNext;"));
    }

    #[test]
    fn header_view_and_asserts_follow_conventions() {
        let conventions = SchemaConventions {
            discriminator_type: "NsStructureType".into(),
            discriminator_field: "kind".into(),
            extensible_field: "next".into(),
            ..SchemaConventions::default()
        };
        assert_eq!(
            emit_chain_header(&conventions),
            "typedef struct struct_chain_header {\n    NsStructureType kind;\n    const void* next;\n} struct_chain_header;\n"
        );

        let record = StructRecord {
            fields: vec![member("NsStructureType", "kind"), member("void", "next")],
            ..chained("NsInfo", "NS_TYPE_INFO", Some("NS_GUARD"))
        };
        let asserts = emit_header_asserts(&[("NS_TYPE_INFO", &record)], &conventions);
        assert!(asserts.starts_with("#ifdef NS_GUARD\n_Static_assert(offsetof(NsInfo, kind) == offsetof(struct_chain_header, kind)"));
        assert_eq!(asserts.matches("_Static_assert").count(), 2);
    }
}
