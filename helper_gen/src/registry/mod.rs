/* Registry driver: walks an XML API registry once, in document order, and
 * hands every enum group and struct/union declaration to a visitor. */

mod extensions;
mod member;

use crate::catalogue::CatalogueBuilder;
use crate::config::SchemaConventions;
use crate::error::{RegistryError, SchemaError};
use extensions::ExtensionIndex;
use helper_types::{Catalogue, EnumRecord, StructCategory};
use roxmltree::{Document, Node, ParsingOptions};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// One enumerant of a group, as declared or added by a feature/extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueDecl {
    pub name: String,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDecl {
    pub name: String,
    pub values: Vec<ValueDecl>,
}

/// One `<member>` of a struct or union.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberDecl {
    pub type_token: Option<String>,
    pub name_token: Option<String>,
    /// Text following each child element (`* const* `, `[`, ...).
    pub qualifier_tail: Vec<String>,
    /// The member rendered as a C declaration, whitespace collapsed.
    pub declaration: String,
    pub len: Option<String>,
    pub valid_extension_structs: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TypeDecl<'a> {
    pub name: &'a str,
    pub category: StructCategory,
    pub guard_symbol: Option<&'a str>,
    /// Source text of the whole `<type>` element, comments included.
    pub raw_element: &'a str,
    pub members: Vec<MemberDecl>,
}

/// Receives registry entities in document order.
pub trait SchemaVisitor {
    fn on_group_declared(&mut self, group: &GroupDecl) -> Result<(), SchemaError>;
    fn on_type_declared(&mut self, decl: &TypeDecl<'_>) -> Result<(), SchemaError>;
}

/// Catalogue and enum groups built from one registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    pub catalogue: Catalogue,
    pub enums: Vec<EnumRecord>,
}

pub fn load(path: &Path, conventions: &SchemaConventions) -> Result<Registry, RegistryError> {
    let xml = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("loaded registry {} ({} bytes)", path.display(), xml.len());
    parse(&xml, conventions)
}

pub fn parse(xml: &str, conventions: &SchemaConventions) -> Result<Registry, RegistryError> {
    let mut builder = CatalogueBuilder::new(conventions)?;
    walk(xml, &mut builder)?;
    let (catalogue, enums) = builder.finish();
    info!(
        "catalogued {} struct/union types and {} enum groups",
        catalogue.len(),
        enums.len()
    );
    Ok(Registry { catalogue, enums })
}

/// Walks `xml`, invoking `visitor` for each enum group and each struct/union.
pub fn walk<V: SchemaVisitor>(xml: &str, visitor: &mut V) -> Result<(), RegistryError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(xml, options)?;
    let registry = doc.root_element();
    let index = ExtensionIndex::build(registry);

    for section in registry.children().filter(|n| n.is_element()) {
        match section.tag_name().name() {
            "types" => walk_types(xml, section, &index, visitor)?,
            "enums" => walk_group(section, &index, visitor)?,
            _ => {}
        }
    }
    Ok(())
}

fn walk_types<V: SchemaVisitor>(
    xml: &str,
    types: Node<'_, '_>,
    index: &ExtensionIndex,
    visitor: &mut V,
) -> Result<(), SchemaError> {
    for node in types.children().filter(|n| n.has_tag_name("type")) {
        let Some(category) = node.attribute("category").and_then(StructCategory::from_registry)
        else {
            continue;
        };
        let Some(name) = node.attribute("name") else {
            continue;
        };
        /* Aliases carry no members of their own */
        if node.attribute("alias").is_some() {
            debug!("skipping alias type {}", name);
            continue;
        }
        if index.is_excluded(name) {
            debug!("skipping {} (only required by disabled extensions)", name);
            continue;
        }

        let members = node
            .children()
            .filter(|n| n.has_tag_name("member"))
            .map(member::member_decl)
            .collect();
        let decl = TypeDecl {
            name,
            category,
            guard_symbol: index.guard_for(name),
            raw_element: &xml[node.range()],
            members,
        };
        visitor.on_type_declared(&decl)?;
    }
    Ok(())
}

fn walk_group<V: SchemaVisitor>(
    enums: Node<'_, '_>,
    index: &ExtensionIndex,
    visitor: &mut V,
) -> Result<(), SchemaError> {
    if !matches!(enums.attribute("type"), Some("enum") | Some("bitmask")) {
        return Ok(());
    }
    let Some(name) = enums.attribute("name") else {
        return Ok(());
    };
    if index.is_excluded(name) {
        debug!("skipping group {} (only required by disabled extensions)", name);
        return Ok(());
    }

    let declared = enums
        .children()
        .filter(|n| n.has_tag_name("enum") && n.attribute("alias").is_none())
        .filter_map(|n| {
            n.attribute("name").map(|value| ValueDecl {
                name: value.to_string(),
                disabled: n.attribute("supported") == Some("disabled"),
            })
        });

    /* An enumerant required by several extensions is listed once */
    let mut seen = HashSet::new();
    let values = declared
        .chain(index.additions_for(name).iter().cloned())
        .filter(|value| seen.insert(value.name.clone()))
        .collect();

    visitor.on_group_declared(&GroupDecl {
        name: name.to_string(),
        values,
    })
}
