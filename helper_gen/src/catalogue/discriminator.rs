use crate::config::SchemaConventions;
use regex::Regex;
use std::sync::OnceLock;

/// First discriminator value mentioned anywhere in the raw `<type>` element,
/// be it a `values=` attribute or a comment next to the member.
pub fn explicit_discriminator<'a>(raw_element: &'a str, value_pattern: &Regex) -> Option<&'a str> {
    value_pattern.find(raw_element).map(|m| m.as_str())
}

/// Discriminator value derived from the type name alone:
/// `VkApplicationInfo` -> `VK_APPLICATION_INFO` -> `VK_STRUCTURE_TYPE_APPLICATION_INFO`.
pub fn derive_discriminator(type_name: &str, conventions: &SchemaConventions) -> String {
    static WORD_BOUNDARY: OnceLock<Regex> = OnceLock::new();
    let boundary =
        WORD_BOUNDARY.get_or_init(|| Regex::new(r"([a-z0-9])([A-Z])").expect("word boundary pattern"));

    let upper = boundary
        .replace_all(type_name, "${1}_${2}")
        .to_ascii_uppercase();
    let stem = upper
        .strip_prefix(conventions.namespace_prefix.as_str())
        .unwrap_or(&upper);
    format!("{}{}", conventions.discriminator_value_prefix, stem)
}

pub fn resolve_discriminator(
    type_name: &str,
    raw_element: &str,
    value_pattern: &Regex,
    conventions: &SchemaConventions,
) -> String {
    match explicit_discriminator(raw_element, value_pattern) {
        Some(value) => value.to_string(),
        None => derive_discriminator(type_name, conventions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ns_conventions() -> SchemaConventions {
        SchemaConventions {
            namespace_prefix: "NS_".into(),
            discriminator_value_prefix: "NS_TYPE_".into(),
            ..SchemaConventions::default()
        }
    }

    #[test]
    fn derives_from_camel_case() {
        assert_eq!(derive_discriminator("FooBarBaz", &ns_conventions()), "NS_TYPE_FOO_BAR_BAZ");
        assert_eq!(derive_discriminator("NsFooBarBaz", &ns_conventions()), "NS_TYPE_FOO_BAR_BAZ");
    }

    #[test]
    fn derives_vulkan_names() {
        let conventions = SchemaConventions::default();
        assert_eq!(
            derive_discriminator("VkApplicationInfo", &conventions),
            "VK_STRUCTURE_TYPE_APPLICATION_INFO"
        );
        assert_eq!(
            derive_discriminator("VkWin32SurfaceCreateInfoKHR", &conventions),
            "VK_STRUCTURE_TYPE_WIN32_SURFACE_CREATE_INFO_KHR"
        );
    }

    #[test]
    fn explicit_value_from_comment() {
        let pattern = SchemaConventions::default().discriminator_value_pattern().unwrap();
        let raw = r#"<type category="struct" name="VkPhysicalDevice16BitStorageFeatures">
            <member><type>VkStructureType</type> <name>sType</name></member><!-- VK_STRUCTURE_TYPE_PHYSICAL_DEVICE_16BIT_STORAGE_FEATURES -->
        </type>"#;
        assert_eq!(
            explicit_discriminator(raw, &pattern),
            Some("VK_STRUCTURE_TYPE_PHYSICAL_DEVICE_16BIT_STORAGE_FEATURES")
        );
    }

    #[test]
    fn resolve_prefers_explicit_value() {
        let conventions = SchemaConventions::default();
        let pattern = conventions.discriminator_value_pattern().unwrap();
        let raw = r#"<member values="VK_STRUCTURE_TYPE_LOADER_INSTANCE_CREATE_INFO"><type>VkStructureType</type> <name>sType</name></member>"#;
        assert_eq!(
            resolve_discriminator("VkLayerInstanceCreateInfo", raw, &pattern, &conventions),
            "VK_STRUCTURE_TYPE_LOADER_INSTANCE_CREATE_INFO"
        );
        assert_eq!(
            resolve_discriminator("VkLayerInstanceCreateInfo", "<member/>", &pattern, &conventions),
            "VK_STRUCTURE_TYPE_LAYER_INSTANCE_CREATE_INFO"
        );
    }
}
