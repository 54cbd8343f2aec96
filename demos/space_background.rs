//! Space background launcher
//!
//! Opens a window with the rotating cube and light-bar ring. Everything the
//! scene does can be tuned from a TOML file; the flags below override the
//! most common settings.
//!
//! ```text
//! space_background --config space.toml --seed 7 --matcap matcap.png
//! space_background --print-config > space.toml
//! ```

use anyhow::Context;
use clap::Parser;
use spacebg_core::{Error, SceneConfig, MAX_SEED};
use spacebg_visualization::SpaceViewer;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Rotating 3D space background rendered with wgpu.
#[derive(Parser, Debug)]
#[command(name = "space_background", version, about)]
struct Args {
    /// Scene configuration file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the light-bar layout.
    #[arg(long, value_parser = clap::value_parser!(u64).range(..=MAX_SEED))]
    seed: Option<u64>,

    /// Window width in logical pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Window height in logical pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Matcap image for the cube.
    #[arg(long)]
    matcap: Option<PathBuf>,

    /// Colour map image for the cube.
    #[arg(long)]
    map: Option<PathBuf>,

    /// Log filter directive (e.g. `debug`, `spacebg_gpu=trace`).
    #[arg(long)]
    log_level: Option<String>,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    print_config: bool,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<SceneConfig> {
    let Some(path) = path else {
        return Ok(SceneConfig::default());
    };
    match SceneConfig::load_from_path(path) {
        Ok(config) => Ok(config),
        Err(Error::Io(e)) => {
            tracing::warn!("Cannot read {}: {e}, using defaults", path.display());
            Ok(SceneConfig::default())
        }
        Err(e) => Err(e).with_context(|| format!("invalid config {}", path.display())),
    }
}

fn apply_overrides(config: &mut SceneConfig, args: &Args) {
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(width) = args.width {
        config.window.width = width;
    }
    if let Some(height) = args.height {
        config.window.height = height;
    }
    if let Some(matcap) = &args.matcap {
        config.textures.matcap = Some(matcap.clone());
    }
    if let Some(map) = &args.map {
        config.textures.map = Some(map.clone());
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_directive = args.log_level.as_deref().unwrap_or("info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .with_context(|| format!("invalid log directive {log_directive:?}"))?,
            ),
        )
        .init();

    tracing::info!("space_background v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, &args);
    config.validate().context("invalid configuration")?;

    if args.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    SpaceViewer::new(config)?.run()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from([
            "space_background",
            "--seed",
            "9",
            "--width",
            "640",
            "--matcap",
            "matcap.png",
        ]);
        let mut config = SceneConfig::default();
        apply_overrides(&mut config, &args);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, SceneConfig::default().window.height);
        assert_eq!(config.textures.matcap, Some(PathBuf::from("matcap.png")));
        assert!(config.textures.map.is_none());
    }

    #[test]
    fn test_missing_config_falls_back_to_defaults() {
        let config = load_config(Some(Path::new("/nonexistent/space.toml"))).unwrap();
        assert_eq!(config, SceneConfig::default());
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("space.toml");
        std::fs::write(&path, "scene = 3").unwrap();
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_seed_must_fit_a_config_file() {
        let args = Args::parse_from(["space_background", "--seed", "9223372036854775807", "--print-config"]);
        let mut config = SceneConfig::default();
        apply_overrides(&mut config, &args);
        assert!(config.to_toml_string().is_ok());

        let too_large = Args::try_parse_from(["space_background", "--seed", "17293822569102704640"]);
        assert!(too_large.is_err());
    }
}
