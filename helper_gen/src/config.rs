/* Registry conventions the generator relies on. Defaults match the Vulkan
 * registry; a YAML file can override any subset of them. */

use crate::error::ConfigError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct SchemaConventions {
    /* Prefix of upper-snake type names, replaced when deriving discriminator values */
    pub namespace_prefix: String,
    /* Prefix every discriminator value carries */
    pub discriminator_value_prefix: String,
    /* Member type that marks a struct as chain-eligible */
    pub discriminator_type: String,
    /* Member names forming the shared chain header */
    pub discriminator_field: String,
    pub extensible_field: String,
    pub size_fn_prefix: String,
    pub chain_fn_name: String,
    /* Include token for the API declarations, brackets or quotes included */
    pub api_header: String,
    /* File name the size source uses to include its own header */
    pub size_header_name: String,
}

impl Default for SchemaConventions {
    fn default() -> Self {
        Self {
            namespace_prefix: "VK_".to_string(),
            discriminator_value_prefix: "VK_STRUCTURE_TYPE_".to_string(),
            discriminator_type: "VkStructureType".to_string(),
            discriminator_field: "sType".to_string(),
            extensible_field: "pNext".to_string(),
            size_fn_prefix: "vk_size_".to_string(),
            chain_fn_name: "get_struct_chain_size".to_string(),
            api_header: "<vulkan/vulkan.h>".to_string(),
            size_header_name: "vk_struct_size_helper.h".to_string(),
        }
    }
}

impl SchemaConventions {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yml::Error> {
        serde_yml::from_str(content)
    }

    /// Matches an explicit discriminator value anywhere in raw registry text.
    pub fn discriminator_value_pattern(&self) -> Result<Regex, ConfigError> {
        let pattern = format!(r"{}\w+", regex::escape(&self.discriminator_value_prefix));
        Regex::new(&pattern).map_err(|source| ConfigError::Pattern {
            prefix: self.discriminator_value_prefix.clone(),
            source,
        })
    }

    pub fn size_fn_name(&self, type_name: &str) -> String {
        format!("{}{}", self.size_fn_prefix, type_name.to_ascii_lowercase())
    }
}
