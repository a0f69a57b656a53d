/* Structure catalogue builder.
 *
 * Consumes registry callbacks and turns each struct/union into a StructRecord:
 * members are classified, a pre-pass collects count-field names, every length
 * attribute is resolved against the struct's own members, and the
 * discriminator value is resolved for chain-eligible structs. */

pub mod discriminator;
pub mod field;
pub mod length;

use crate::config::SchemaConventions;
use crate::error::{ConfigError, SchemaError};
use crate::registry::{GroupDecl, SchemaVisitor, TypeDecl};
use discriminator::resolve_discriminator;
use field::ClassifiedMember;
use helper_types::{Catalogue, EnumRecord, FieldRecord, LengthSpec, StructRecord};
use regex::Regex;
use std::collections::HashSet;
use tracing::{debug, warn};

pub struct CatalogueBuilder {
    conventions: SchemaConventions,
    value_pattern: Regex,
    catalogue: Catalogue,
    enums: Vec<EnumRecord>,
}

impl CatalogueBuilder {
    pub fn new(conventions: &SchemaConventions) -> Result<Self, ConfigError> {
        Ok(Self {
            value_pattern: conventions.discriminator_value_pattern()?,
            conventions: conventions.clone(),
            catalogue: Catalogue::new(),
            enums: Vec::new(),
        })
    }

    pub fn build_struct(&self, decl: &TypeDecl<'_>) -> Result<StructRecord, SchemaError> {
        let members: Vec<ClassifiedMember<'_>> = decl
            .members
            .iter()
            .map(|member| field::classify(decl.name, member))
            .collect::<Result<_, _>>()?;

        let lengths: Vec<Option<LengthSpec>> = members
            .iter()
            .zip(&decl.members)
            .map(|(member, raw)| length::resolve(decl.name, member.field_name, raw.len.as_deref()))
            .collect::<Result<_, _>>()?;

        /* Pre-pass: a count may be declared before or after the array it bounds */
        let member_names: HashSet<&str> = members.iter().map(|m| m.field_name).collect();
        let mut count_fields: HashSet<String> = HashSet::new();
        for (member, spec) in members.iter().zip(&lengths) {
            let Some(spec) = spec.as_ref() else {
                continue;
            };
            let (Some(path), Some(root)) = (spec.count_path(), spec.root_field()) else {
                continue;
            };
            if !member_names.contains(root) {
                return Err(SchemaError::UnknownLengthField {
                    type_name: decl.name.to_string(),
                    field: member.field_name.to_string(),
                    reference: path.to_string(),
                });
            }
            /* A member path counts through another struct; its root is not itself a count */
            count_fields.insert(path.to_string());
        }

        let mut discriminator_tag = None;
        let mut fields = Vec::with_capacity(members.len());
        for ((member, spec), raw) in members.iter().zip(lengths).zip(&decl.members) {
            if member.type_name == self.conventions.discriminator_type && discriminator_tag.is_none() {
                discriminator_tag = Some(resolve_discriminator(
                    decl.name,
                    decl.raw_element,
                    &self.value_pattern,
                    &self.conventions,
                ));
            }

            let extended_by = if member.field_name == self.conventions.extensible_field {
                raw.valid_extension_structs.as_deref().map(split_struct_list)
            } else {
                None
            };

            fields.push(FieldRecord {
                type_name: member.type_name.to_string(),
                field_name: member.field_name.to_string(),
                is_pointer: member.is_pointer,
                is_const: member.is_const,
                is_count_field: count_fields.contains(member.field_name),
                length: spec,
                extended_by,
            });
        }

        Ok(StructRecord {
            type_name: decl.name.to_string(),
            category: decl.category,
            fields,
            discriminator_tag,
            guard_symbol: decl.guard_symbol.map(str::to_string),
        })
    }

    /// Hands back the finished catalogue and enum groups.
    ///
    /// When the registry declared the discriminator enum itself, tags that are
    /// not among its values are dropped so the dispatcher never names an
    /// undeclared enumerant.
    pub fn finish(mut self) -> (Catalogue, Vec<EnumRecord>) {
        let known_tags: Option<HashSet<String>> = self
            .enums
            .iter()
            .find(|group| group.group_name == self.conventions.discriminator_type)
            .map(|group| group.value_names.iter().cloned().collect());

        if let Some(known_tags) = known_tags {
            self.catalogue.retain_tags(|record, tag| {
                let known = known_tags.contains(tag);
                if !known {
                    warn!(
                        "{} resolves to undeclared discriminator {}; leaving it out of the chain",
                        record, tag
                    );
                }
                known
            });
        }
        (self.catalogue, self.enums)
    }
}

impl SchemaVisitor for CatalogueBuilder {
    fn on_group_declared(&mut self, group: &GroupDecl) -> Result<(), SchemaError> {
        let value_names: Vec<String> = group
            .values
            .iter()
            .filter(|value| !value.disabled)
            .map(|value| value.name.clone())
            .collect();
        debug!("enum group {} with {} values", group.name, value_names.len());
        self.enums.push(EnumRecord {
            group_name: group.name.clone(),
            value_names,
        });
        Ok(())
    }

    fn on_type_declared(&mut self, decl: &TypeDecl<'_>) -> Result<(), SchemaError> {
        let record = self.build_struct(decl)?;
        debug!(
            "catalogued {} ({} fields, tag {:?}, guard {:?})",
            record.type_name,
            record.fields.len(),
            record.discriminator_tag,
            record.guard_symbol
        );
        self.catalogue
            .insert(record)
            .map_err(|rejected| SchemaError::DuplicateType {
                type_name: rejected.type_name,
            })
    }
}

fn split_struct_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
