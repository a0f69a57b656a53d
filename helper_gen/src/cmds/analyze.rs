/* Analyze command - dump the structure catalogue */

use super::common::{load_conventions, load_registry};
use anyhow::anyhow;
use clap::ValueEnum;
use helper_gen::codegen::c_gen::{chain_eligible, emit_size_fn};
use helper_gen::config::SchemaConventions;
use helper_types::{Catalogue, StructRecord};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum OutputFormat {
    Json,
    Yaml,
}

/* One struct together with the routine generated for it */
#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct TypeReport<'a> {
    record: &'a StructRecord,
    size_routine: String,
}

/* Execute the analyze command. Only the rendered document goes to stdout */
pub fn run(
    registry_path: PathBuf,
    format: OutputFormat,
    type_name: Option<String>,
    conventions_path: Option<PathBuf>,
    verbose: bool,
) -> anyhow::Result<()> {
    if verbose {
        eprintln!("Helper Generator - Registry Analysis Tool");
        eprintln!("=========================================\n");
    }

    let conventions = load_conventions(conventions_path.as_deref())?;
    let registry = load_registry(&registry_path, &conventions, verbose)?;
    let catalogue = &registry.catalogue;

    if verbose {
        let tagged = catalogue.tagged().count();
        let eligible = chain_eligible(catalogue, &conventions).len();
        eprintln!("[~] {} tagged structs, {} dispatched by {}", tagged, eligible, conventions.chain_fn_name);
    }

    println!("{}", analysis(catalogue, &conventions, type_name.as_deref(), format)?);
    Ok(())
}

fn analysis(
    catalogue: &Catalogue,
    conventions: &SchemaConventions,
    type_name: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let Some(type_name) = type_name else {
        return render(catalogue, format);
    };
    let record = catalogue
        .get(type_name)
        .ok_or_else(|| anyhow!("type '{}' is not in the catalogue", type_name))?;
    let report = TypeReport {
        record,
        size_routine: emit_size_fn(record, catalogue, conventions),
    };
    render(&report, format)
}

fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yml::to_string(value)?,
    })
}
