use clap::{Parser, Subcommand, ValueEnum};
use cmds::analyze::OutputFormat;
use helper_gen::codegen::HelperFileType;
use std::path::PathBuf;

mod cmds;

/// Generates C helper sources (enum strings, struct sizes) from an XML API registry
#[derive(Parser)]
#[command(name = "helper-gen")]
#[command(about = "Helper file generator for XML API registries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate helper files from a registry
    Generate {
        /// Registry XML file (vk.xml)
        #[arg(short = 'r', long = "registry", value_name = "FILE")]
        registry: PathBuf,

        /// Helper file to generate; repeat for several. Defaults to all of them
        #[arg(short = 't', long = "type", value_enum)]
        file_types: Vec<HelperFile>,

        /// Output directory for generated files
        #[arg(short = 'o', long = "output", value_name = "DIR", default_value = ".")]
        output_dir: PathBuf,

        /// YAML file overriding the registry naming conventions
        #[arg(short = 'c', long = "conventions", value_name = "FILE")]
        conventions: Option<PathBuf>,

        /// Enable verbose output
        #[arg(short = 'v', long = "verbose")]
        verbose: bool,
    },

    /// Print the structure catalogue built from a registry
    Analyze {
        /// Registry XML file (vk.xml)
        #[arg(short = 'r', long = "registry", value_name = "FILE")]
        registry: PathBuf,

        /// Format of the catalogue dump
        #[arg(long = "format", value_enum, default_value = "json")]
        format: OutputFormat,

        /// Only show this type, followed by its generated size routine
        #[arg(long = "type", value_name = "TYPE")]
        type_name: Option<String>,

        /// YAML file overriding the registry naming conventions
        #[arg(short = 'c', long = "conventions", value_name = "FILE")]
        conventions: Option<PathBuf>,

        /// Enable verbose output
        #[arg(short = 'v', long = "verbose")]
        verbose: bool,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum HelperFile {
    /// vk_enum_string_helper.h
    EnumStringHeader,
    /// vk_struct_size_helper.h
    StructSizeHeader,
    /// vk_struct_size_helper.c
    StructSizeSource,
}

impl From<HelperFile> for HelperFileType {
    fn from(file: HelperFile) -> Self {
        match file {
            HelperFile::EnumStringHeader => HelperFileType::EnumStringHeader,
            HelperFile::StructSizeHeader => HelperFileType::StructSizeHeader,
            HelperFile::StructSizeSource => HelperFileType::StructSizeSource,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            registry,
            file_types,
            output_dir,
            conventions,
            verbose,
        } => {
            cmds::common::init_tracing(verbose);
            let file_types = file_types.into_iter().map(HelperFileType::from).collect();
            cmds::generate::run(registry, file_types, output_dir, conventions, verbose)?;
        }

        Commands::Analyze {
            registry,
            format,
            type_name,
            conventions,
            verbose,
        } => {
            cmds::common::init_tracing(verbose);
            cmds::analyze::run(registry, format, type_name, conventions, verbose)?;
        }
    }

    Ok(())
}
