use crate::length::LengthSpec;
use indexmap::IndexMap;
use serde_derive::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum StructCategory {
    Struct,
    Union,
}

impl StructCategory {
    pub fn from_registry(category: &str) -> Option<Self> {
        match category {
            "struct" => Some(StructCategory::Struct),
            "union" => Some(StructCategory::Union),
            _ => None,
        }
    }
}

/// One classified struct member.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct FieldRecord {
    pub type_name: String,
    pub field_name: String,
    pub is_pointer: bool,
    pub is_const: bool,
    /// Another member's length refers to this one.
    pub is_count_field: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<LengthSpec>,
    /// Structs allowed to extend this member. Only set on the extensible
    /// (next-pointer) member.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_by: Option<Vec<String>>,
}

impl FieldRecord {
    /// Explicit count for this member, ignoring `NullTerminated`.
    pub fn counted_length(&self) -> Option<&LengthSpec> {
        self.length.as_ref().filter(|spec| spec.is_counted())
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct StructRecord {
    pub type_name: String,
    pub category: StructCategory,
    pub fields: Vec<FieldRecord>,
    /// Concrete discriminator value; present only for structs that carry the
    /// registry's discriminator member.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator_tag: Option<String>,
    /// Conditional-compilation token wrapping everything emitted for this struct.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guard_symbol: Option<String>,
}

impl StructRecord {
    pub fn field(&self, name: &str) -> Option<&FieldRecord> {
        self.fields.iter().find(|field| field.field_name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }
}

/// Struct records keyed by type name, in registry declaration order.
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Eq, Clone)]
#[serde(transparent)]
pub struct Catalogue {
    structs: IndexMap<String, StructRecord>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record. A record whose name is already catalogued is handed
    /// back untouched.
    pub fn insert(&mut self, record: StructRecord) -> Result<(), StructRecord> {
        if self.structs.contains_key(&record.type_name) {
            return Err(record);
        }
        self.structs.insert(record.type_name.clone(), record);
        Ok(())
    }

    pub fn get(&self, type_name: &str) -> Option<&StructRecord> {
        self.structs.get(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.structs.contains_key(type_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StructRecord> {
        self.structs.values()
    }

    /// Records carrying a discriminator tag, paired with that tag.
    pub fn tagged(&self) -> impl Iterator<Item = (&str, &StructRecord)> {
        self.structs
            .values()
            .filter_map(|record| record.discriminator_tag.as_deref().map(|tag| (tag, record)))
    }

    /// Clears every discriminator tag `keep` rejects; called with the type
    /// name and its tag.
    pub fn retain_tags<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, &str) -> bool,
    {
        for record in self.structs.values_mut() {
            if let Some(tag) = &record.discriminator_tag {
                if !keep(&record.type_name, tag) {
                    record.discriminator_tag = None;
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.structs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structs.is_empty()
    }
}

/// Enabled values of one enum group, in declaration order.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct EnumRecord {
    pub group_name: String,
    pub value_names: Vec<String>,
}
