use std::convert::Infallible;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use case_study_gallery::catalog::Catalog;
use case_study_gallery::config::{self, CarouselConfig};
use case_study_gallery::error::{AppError, Result};

const DEFAULT_CONFIG_FILE: &str = "carousel.toml";
const USAGE: &str = "usage: case-study-gallery <catalog.toml> [project-id] [--config carousel.toml]";

/// Command-line options.
#[derive(Debug)]
pub struct StartupOptions {
    pub catalog_path: PathBuf,
    pub project_id: Option<String>,
    pub config_path: PathBuf,
}

pub fn parse_args(args: impl IntoIterator<Item = OsString>) -> Result<StartupOptions> {
    let mut args = pico_args::Arguments::from_vec(args.into_iter().collect());

    let config_path = args
        .opt_value_from_os_str("--config", to_path)
        .map_err(|e| AppError::Config(e.to_string()))?
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let catalog_path = args
        .opt_free_from_os_str(to_path)
        .map_err(|e| AppError::Catalog(e.to_string()))?
        .ok_or_else(|| AppError::Catalog(USAGE.to_string()))?;
    let project_id = args
        .opt_free_from_os_str(to_project_id)
        .map_err(|e| AppError::Catalog(e.to_string()))?;

    let rest = args.finish();
    if !rest.is_empty() {
        log::warn!("Ignoring extra arguments {:?}", rest);
    }

    Ok(StartupOptions {
        catalog_path,
        project_id,
        config_path,
    })
}

fn to_path(value: &OsStr) -> std::result::Result<PathBuf, Infallible> {
    Ok(PathBuf::from(value))
}

fn to_project_id(value: &OsStr) -> std::result::Result<String, Infallible> {
    Ok(value.to_string_lossy().into_owned())
}

/// Loads config and catalog named by the options.
pub fn load(options: &StartupOptions) -> Result<(CarouselConfig, Catalog)> {
    let config = config::load_from_path(&options.config_path)?;
    let catalog = Catalog::load(&options.catalog_path)?;
    log::info!(
        "Loaded {} projects and {} services from {}",
        catalog.projects.len(),
        catalog.services.len(),
        options.catalog_path.display()
    );
    Ok((config, catalog))
}
