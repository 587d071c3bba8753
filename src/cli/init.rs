//! Init command implementation

use anyhow::Result;
use std::path::Path;
use tracing::info;

use terminal_queue::config::Config;

/// Write the default config to `path` (or the global config path)
pub fn init_command(path: Option<&Path>, force: bool) -> Result<()> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::global_config_path);

    if Config::write_default(&path, force)? {
        info!("Wrote default config to {}", path.display());
        println!("Created {}", path.display());
    } else {
        println!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    Ok(())
}
