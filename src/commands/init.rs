use anyhow::{bail, Result};
use std::env;
use tracing::info;

use crate::Config;

pub async fn run(force: bool) -> Result<()> {
    let root = env::current_dir()?;

    if Config::is_initialized(&root) && !force {
        bail!(
            "coursefind is already initialized in {:?} (use --force to overwrite)",
            Config::config_dir(&root)
        );
    }

    let config = Config::default();
    config.save(&root)?;

    info!("Initialized coursefind in {:?}", Config::config_dir(&root));
    println!(
        "✓ Created {} with default configuration",
        Config::config_dir(&root).display()
    );
    println!("\nNext steps:");
    println!(
        "  1. Put your course catalog at {}",
        config.corpus_path(&root).display()
    );
    println!("  2. Run 'coursefind serve' to start the search API");
    println!("  3. Run 'coursefind interactive' to search from the terminal");

    Ok(())
}
