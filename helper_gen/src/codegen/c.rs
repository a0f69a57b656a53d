use super::HelperFileType;
use crate::codegen::c_gen::{
    chain_eligible, emit_chain_dispatcher, emit_chain_header, emit_enum_string_fn, emit_header_asserts,
    emit_prototypes, emit_size_fn,
};
use crate::config::SchemaConventions;
use helper_types::{Catalogue, EnumRecord};
use std::fmt::Write;
use tracing::debug;

const GENERATED_BANNER: &str = "// *** THIS FILE IS GENERATED - DO NOT EDIT ***\n// See helper-gen for modifications\n";

pub struct CHelperGenerator<'a> {
    catalogue: &'a Catalogue,
    enums: &'a [EnumRecord],
    conventions: &'a SchemaConventions,
}

impl<'a> CHelperGenerator<'a> {
    pub fn new(catalogue: &'a Catalogue, enums: &'a [EnumRecord], conventions: &'a SchemaConventions) -> Self {
        Self {
            catalogue,
            enums,
            conventions,
        }
    }

    pub fn emit(&self, file_type: HelperFileType) -> String {
        let mut output = String::from(GENERATED_BANNER);
        output.push('\n');
        match file_type {
            HelperFileType::EnumStringHeader => self.emit_enum_string_header(&mut output),
            HelperFileType::StructSizeHeader => self.emit_struct_size_header(&mut output),
            HelperFileType::StructSizeSource => self.emit_struct_size_source(&mut output),
        }
        debug!("emitted {:?}: {} bytes", file_type, output.len());
        output
    }

    fn emit_enum_string_header(&self, output: &mut String) {
        output.push_str("#pragma once\n");
        output.push_str("#ifdef _WIN32\n");
        output.push_str("#pragma warning( disable : 4065 )\n");
        output.push_str("#endif\n\n");
        write!(output, "#include {}\n", self.conventions.api_header).unwrap();
        for group in self.enums {
            output.push('\n');
            output.push_str(&emit_enum_string_fn(group));
        }
    }

    fn emit_struct_size_header(&self, output: &mut String) {
        output.push_str("#pragma once\n\n");
        output.push_str("#include <stddef.h>\n");
        output.push_str("#include <stdio.h>\n");
        output.push_str("#include <stdlib.h>\n");
        write!(output, "#include {}\n\n", self.conventions.api_header).unwrap();
        output.push_str("#ifdef __cplusplus\n");
        output.push_str("extern \"C\" {\n");
        output.push_str("#endif\n\n");
        output.push_str("// Function Prototypes\n");
        output.push_str(&emit_prototypes(self.catalogue, self.conventions));
        output.push_str("\n#ifdef __cplusplus\n");
        output.push_str("}\n");
        output.push_str("#endif\n");
    }

    fn emit_struct_size_source(&self, output: &mut String) {
        write!(output, "#include \"{}\"\n", self.conventions.size_header_name).unwrap();
        output.push_str("#include <stddef.h>\n");
        output.push_str("#include <string.h>\n");
        output.push_str("#include <assert.h>\n\n");
        output.push_str("// Function Definitions\n");

        for record in self.catalogue.iter() {
            output.push('\n');
            output.push_str(&emit_size_fn(record, self.catalogue, self.conventions));
        }

        let eligible = chain_eligible(self.catalogue, self.conventions);
        debug!("{} structs participate in extension chains", eligible.len());
        output.push('\n');
        output.push_str(&emit_chain_header(self.conventions));
        output.push('\n');
        output.push_str(&emit_header_asserts(&eligible, self.conventions));
        output.push('\n');
        output.push_str(&emit_chain_dispatcher(&eligible, self.conventions));
    }
}

/// Renders one helper file for an already-built catalogue.
pub fn generate(
    file_type: HelperFileType,
    catalogue: &Catalogue,
    enums: &[EnumRecord],
    conventions: &SchemaConventions,
) -> String {
    CHelperGenerator::new(catalogue, enums, conventions).emit(file_type)
}
