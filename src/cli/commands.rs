//! Handlers for the main conversion and the config/cache subcommands.

use std::io::Write;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::args::{CacheAction, ConfigAction};
use super::enums::OutputFormat;
use crate::config::{default_path as get_config_path, Config, DEFAULT_CONFIG_TOML};
use crate::error::Result;
use crate::renderer::render_svg;
use crate::source::{ImageFetcher, ImageLoader, ImageSource};
use crate::transform::{transform, BlockLayout};

/// Convert `input` into a block layout and write it out.
///
/// Block settings are validated before the image is loaded so a bad
/// configuration never costs a download.
pub async fn generate(
    input: &str,
    config: &Config,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<BlockLayout> {
    let options = config.blocks.to_options();
    options.validate()?;

    let loader = ImageLoader::new(
        ImageFetcher::new(config.source.timeout())?,
        config.source.image_cache(),
    );
    let image = loader.load(&ImageSource::parse(input)).await?;

    let mut rng = match config.blocks.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let layout = transform(&image, &options, &mut rng)?;

    let document = match format {
        OutputFormat::Svg => render_svg(&layout, &config.render.to_options()),
        OutputFormat::Json => serde_json::to_string_pretty(&layout)? + "\n",
    };

    match output {
        Some(path) => {
            tokio::fs::write(path, document).await?;
            log::info!("Wrote {} blocks to {}", layout.rects.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(document.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(layout)
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: &ConfigAction, config_path: Option<&Path>) -> Result<()> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(get_config_path);

    match action {
        ConfigAction::Show => {
            let config = Config::load(Some(&path))?;
            let rendered = toml::to_string_pretty(&config)
                .unwrap_or_else(|e| format!("# failed to render configuration: {}\n", e));

            println!("# Effective configuration");
            if path.exists() {
                println!("# Config file: {} (exists)", path.display());
            } else {
                println!("# Config file: {} (not found, using defaults)", path.display());
            }
            println!();
            print!("{}", rendered);
        }
        ConfigAction::Init => {
            if path.exists() {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    format!(
                        "config file already exists: {} (use 'codeblocks config show' to view it)",
                        path.display()
                    ),
                )
                .into());
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG_TOML)?;

            println!("Created config file: {}", path.display());
        }
    }

    Ok(())
}

/// Handle cache subcommand actions.
pub fn handle_cache_action(action: &CacheAction, config: &Config) -> Result<()> {
    let Some(cache) = config.source.image_cache() else {
        println!("Download cache is disabled in the configuration.");
        return Ok(());
    };

    match action {
        CacheAction::Path => println!("{}", cache.cache_dir().display()),
        CacheAction::Clear => {
            let removed = cache.clear_all()?;
            println!(
                "Removed {} cached image(s) from {}",
                removed,
                cache.cache_dir().display()
            );
        }
    }

    Ok(())
}
