use std::path::Path;

use anyhow::Result;

use tickruler_core::AppConfig;

pub fn run(config: &AppConfig, path: &Path, show_path: bool) -> Result<()> {
    if show_path {
        println!("{}", path.display());
        return Ok(());
    }

    if !path.exists() {
        println!("# {} not found, showing defaults\n", path.display());
    }
    print!("{}", config.to_toml_string()?);

    Ok(())
}
