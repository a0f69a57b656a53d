/* Generate command - write helper files for a registry */

use super::common::{load_conventions, load_registry};
use anyhow::Context;
use helper_gen::codegen::{self, HelperFileType};
use std::path::PathBuf;
use tracing::info;

/* Execute the generate command */
pub fn run(
    registry_path: PathBuf,
    mut file_types: Vec<HelperFileType>,
    output_dir: PathBuf,
    conventions_path: Option<PathBuf>,
    verbose: bool,
) -> anyhow::Result<()> {
    if file_types.is_empty() {
        file_types = HelperFileType::ALL.to_vec();
    }
    file_types.sort();
    file_types.dedup();

    if verbose {
        println!("Helper Generator - Code Generation Tool");
        println!("=======================================\n");
        println!("[~] Configuration:");
        println!("  Registry: {}", registry_path.display());
        println!("  Output directory: {}", output_dir.display());
        println!("  Files: {:?}", file_types);
        println!();
    }

    let conventions = load_conventions(conventions_path.as_deref())?;
    let registry = load_registry(&registry_path, &conventions, verbose)?;

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    for file_type in file_types {
        let output = codegen::generate(file_type, &registry.catalogue, &registry.enums, &conventions);
        let path = output_dir.join(file_type.output_file_name(&conventions));
        std::fs::write(&path, output).with_context(|| format!("writing {}", path.display()))?;
        info!("wrote {}", path.display());
        println!("[✓] Generated {}", path.display());
    }

    Ok(())
}
