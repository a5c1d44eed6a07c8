mod handlers;
mod startup;

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use case_study_gallery::image_cache;
use case_study_gallery::image_loader::FileImageLoader;
use case_study_gallery::services::CarouselService;
use case_study_gallery::state::{AppState, GalleryState};
use case_study_gallery::ui::TransitionController;

use handlers::Command;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(debug_assertions)]
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .init();
    #[cfg(not(debug_assertions))]
    env_logger::init();

    let options = startup::parse_args(std::env::args_os().skip(1))?;
    let (config, catalog) = startup::load(&options)?;

    let first = options
        .project_id
        .as_deref()
        .and_then(|id| catalog.project(id))
        .or_else(|| catalog.projects.first());
    let Some(first) = first else {
        return Err("catalog has no projects".into());
    };

    let app_state = AppState::new(GalleryState::initialize(Vec::new(), first.image.clone()));
    image_cache::lock(&app_state.image_cache).resize(config.cache_capacity());

    let loader = Arc::new(FileImageLoader::new(config.asset_root.clone()));
    let mut transitions = TransitionController::new(config.transition_duration());
    let service = CarouselService::new(&app_state, loader, config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    handlers::handle(
        Command::Open(first.id.clone()),
        &service,
        &catalog,
        &mut transitions,
        &mut out,
    )?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };
        match handlers::handle(command, &service, &catalog, &mut transitions, &mut out) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                log::error!("{}", e);
                writeln!(out, "error: {e}")?;
            }
        }
    }

    Ok(())
}
