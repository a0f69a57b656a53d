use super::ValueDecl;
use roxmltree::Node;
use std::collections::{HashMap, HashSet};

/* What features and extensions contribute to the entities the driver
 * reports: guard symbols for types, excluded types, and enumerants appended
 * to existing groups. */
#[derive(Debug, Default)]
pub(super) struct ExtensionIndex {
    /* First requirer's protect symbol; `None` pins a type as unguarded */
    guards: HashMap<String, Option<String>>,
    enabled_types: HashSet<String>,
    disabled_types: HashSet<String>,
    group_additions: HashMap<String, Vec<ValueDecl>>,
}

impl ExtensionIndex {
    pub(super) fn build(registry: Node<'_, '_>) -> Self {
        let mut index = Self::default();

        let platforms: HashMap<&str, &str> = registry
            .children()
            .filter(|n| n.has_tag_name("platforms"))
            .flat_map(|platforms| platforms.children())
            .filter(|n| n.has_tag_name("platform"))
            .filter_map(|n| Some((n.attribute("name")?, n.attribute("protect")?)))
            .collect();

        for section in registry.children().filter(|n| n.is_element()) {
            match section.tag_name().name() {
                "feature" => index.record_requirements(section, None, false),
                "extensions" => {
                    for extension in section.children().filter(|n| n.has_tag_name("extension")) {
                        let protect = extension.attribute("protect").or_else(|| {
                            extension
                                .attribute("platform")
                                .and_then(|platform| platforms.get(platform).copied())
                        });
                        let disabled = extension.attribute("supported") == Some("disabled");
                        index.record_requirements(extension, protect, disabled);
                    }
                }
                _ => {}
            }
        }
        index
    }

    fn record_requirements(&mut self, owner: Node<'_, '_>, protect: Option<&str>, disabled: bool) {
        for require in owner.children().filter(|n| n.has_tag_name("require")) {
            for item in require.children().filter(|n| n.is_element()) {
                match item.tag_name().name() {
                    "type" => {
                        if let Some(name) = item.attribute("name") {
                            self.record_type(name, protect, disabled);
                        }
                    }
                    "enum" => {
                        if item.attribute("alias").is_some() {
                            continue;
                        }
                        if let (Some(group), Some(name)) =
                            (item.attribute("extends"), item.attribute("name"))
                        {
                            self.group_additions
                                .entry(group.to_string())
                                .or_default()
                                .push(ValueDecl {
                                    name: name.to_string(),
                                    disabled,
                                });
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    fn record_type(&mut self, name: &str, protect: Option<&str>, disabled: bool) {
        if disabled {
            self.disabled_types.insert(name.to_string());
            return;
        }
        self.enabled_types.insert(name.to_string());
        self.guards
            .entry(name.to_string())
            .or_insert_with(|| protect.map(str::to_string));
    }

    pub(super) fn guard_for(&self, type_name: &str) -> Option<&str> {
        self.guards.get(type_name).and_then(|guard| guard.as_deref())
    }

    /* Types that only disabled extensions require are left out entirely */
    pub(super) fn is_excluded(&self, type_name: &str) -> bool {
        self.disabled_types.contains(type_name) && !self.enabled_types.contains(type_name)
    }

    pub(super) fn additions_for(&self, group: &str) -> &[ValueDecl] {
        self.group_additions
            .get(group)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
