pub mod c;
pub mod c_gen;

use crate::config::SchemaConventions;

pub use c::generate;

/// Which helper file a generation run produces.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum HelperFileType {
    EnumStringHeader,
    StructSizeHeader,
    StructSizeSource,
}

impl HelperFileType {
    pub const ALL: [HelperFileType; 3] = [
        HelperFileType::EnumStringHeader,
        HelperFileType::StructSizeHeader,
        HelperFileType::StructSizeSource,
    ];

    /* The size source includes its header by this name */
    pub fn output_file_name(self, conventions: &SchemaConventions) -> String {
        match self {
            HelperFileType::EnumStringHeader => "vk_enum_string_helper.h".to_string(),
            HelperFileType::StructSizeHeader => conventions.size_header_name.clone(),
            HelperFileType::StructSizeSource => "vk_struct_size_helper.c".to_string(),
        }
    }
}
