use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use case_study_gallery::catalog::Catalog;
use case_study_gallery::error::LoadError;
use case_study_gallery::image_cache::{self, CachedImage, ImageCache, SharedImageCache};
use case_study_gallery::image_loader::{FileImageLoader, ImageLoader};
use case_study_gallery::services::CarouselService;
use case_study_gallery::state::{AppState, Direction, GalleryState};
use case_study_gallery::ui::GalleryLayout;
use case_study_gallery::{config::CarouselConfig, ImageRef};
use tempfile::tempdir;

const WAIT: Duration = Duration::from_secs(5);

/// Holds every load until the test sends a release token.
struct GatedLoader {
    gate: Mutex<mpsc::Receiver<()>>,
}

impl ImageLoader for GatedLoader {
    fn load(&self, _image: &ImageRef) -> Result<CachedImage, LoadError> {
        let gate = self.gate.lock().unwrap_or_else(|p| p.into_inner());
        gate.recv_timeout(WAIT)
            .map_err(|e| LoadError::Worker(e.to_string()))?;
        Ok(CachedImage::new(vec![255; 3], 1, 1))
    }
}

fn refs(names: &[&str]) -> Vec<ImageRef> {
    names.iter().map(|name| ImageRef::from(*name)).collect()
}

fn carousel(
    images: &[&str],
    loader: Arc<dyn ImageLoader>,
    config: CarouselConfig,
) -> (CarouselService, SharedImageCache) {
    let cache: SharedImageCache = Arc::new(Mutex::new(ImageCache::new(16)));
    let gallery = GalleryState::initialize(refs(images), ImageRef::from("cover.webp"));
    let state = AppState::with_cache(gallery, cache.clone());
    (CarouselService::new(&state, loader, config), cache)
}

#[test]
fn stale_preloads_never_reach_new_gallery() {
    let (release, gate) = mpsc::channel();
    let (service, cache) = carousel(
        &["a.webp", "b.webp", "c.webp"],
        Arc::new(GatedLoader {
            gate: Mutex::new(gate),
        }),
        CarouselConfig::default(),
    );

    // Index 1: neighbours a and c are requested under generation 0.
    service.next();
    assert_eq!(service.preloader().pending(), 2);

    let update = service.reset(refs(&["x.webp", "y.webp", "z.webp"]), ImageRef::from("cover"));
    assert_eq!((update.index, update.direction), (0, Direction::None));
    assert_eq!(update.generation, 1);

    for _ in 0..4 {
        release.send(()).expect("loader gone");
    }
    assert!(service.preloader().wait_idle(WAIT));

    let cache = image_cache::lock(&cache);
    assert!(!cache.contains(&ImageRef::from("a.webp")));
    assert!(!cache.contains(&ImageRef::from("c.webp")));
    assert!(cache.contains(&ImageRef::from("y.webp")));
    assert!(cache.contains(&ImageRef::from("z.webp")));
}

#[test]
fn disabled_preloading_leaves_cache_cold() {
    let (_release, gate) = mpsc::channel();
    let config = CarouselConfig {
        preload_enabled: false,
        ..Default::default()
    };
    let (service, cache) = carousel(
        &["a.webp", "b.webp", "c.webp"],
        Arc::new(GatedLoader {
            gate: Mutex::new(gate),
        }),
        config,
    );

    service.next();
    service.previous();
    assert_eq!(service.preloader().pending(), 0);
    assert!(image_cache::lock(&cache).is_empty());
}

#[test]
fn catalog_project_browsing_with_real_files() {
    let site = tempdir().expect("failed to create temp dir");
    let dir = site.path().join("portfolio").join("powerbird");
    std::fs::create_dir_all(&dir).expect("mkdir failed");
    for (i, shade) in [(1, 40u8), (2, 120), (3, 200)] {
        image::RgbImage::from_pixel(4, 3, image::Rgb([shade, shade, shade]))
            .save(dir.join(format!("{i}.png")))
            .expect("save failed");
    }

    let catalog = Catalog::parse(
        r#"
        [[projects]]
        id = "powerbird"
        title = "Powerbird Elevators"
        category = "Web"
        image = "/portfolio/powerbird/thumb.png"
        gallery = [
            "/portfolio/powerbird/1.png",
            "/portfolio/powerbird/2.png",
            "/portfolio/powerbird/3.png",
            "/portfolio/powerbird/missing.png",
        ]

        [[projects]]
        id = "graphics"
        title = "Graphic Design"
        category = "Design"
        image = "/portfolio/graphics/thumb.png"
        gallery = ["/g/1.png", "/g/2.png", "/g/3.png", "/g/4.png", "/g/5.png"]
    "#,
    )
    .expect("catalog parses");

    let config = CarouselConfig {
        asset_root: site.path().to_path_buf(),
        ..Default::default()
    };
    let (service, cache) = carousel(
        &["placeholder.png"],
        Arc::new(FileImageLoader::new(site.path())),
        config,
    );

    let project = catalog.project("powerbird").expect("project exists");
    service.open_project(project);
    let first = service.load_current().expect("first image loads");
    assert_eq!(first.data[0], 40);

    assert!(service.preloader().wait_idle(WAIT));
    assert!(image_cache::lock(&cache).contains(&ImageRef::from("/portfolio/powerbird/2.png")));

    service.previous();
    assert!(matches!(
        service.load_current(),
        Err(LoadError::NotFound(_))
    ));

    service.go_to(2).expect("valid index");
    assert_eq!(service.load_current().expect("loads").data[0], 200);

    let showcase = catalog.project("graphics").expect("project exists");
    service.open_project(showcase);
    assert_eq!(service.layout(), GalleryLayout::Showcase);
    let rows = service.showcase().expect("showcase rows").rows;
    assert_eq!(rows[0].period(), 3);
    assert_eq!(rows[1].period(), 2);
}
