//! Portfolio catalog: projects shown as case studies and the service offerings.
//!
//! The catalog is plain TOML:
//!
//! ```toml
//! [[projects]]
//! id = "powerbird"
//! title = "Powerbird Elevators"
//! category = "Web"
//! image = "/portfolio/powerbird/thumb.webp"
//! challenge = "Legacy site could not be updated by staff"
//! gallery = ["/portfolio/powerbird/1.webp", "/portfolio/powerbird/2.webp"]
//!
//! [[services]]
//! category = "Engineering"
//! title = "Web & Platforms"
//! features = ["Custom React / Next.js Development"]
//! tools = ["React"]
//! ```

use crate::error::{AppError, Result};
use crate::image_ref::ImageRef;
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// Project category as shown on the case-study badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum ProjectCategory {
    SaaS,
    Web,
    App,
    Design,
}

impl ProjectCategory {
    /// Visual-only work is eligible for the marquee showcase.
    pub fn is_visual_only(self) -> bool {
        matches!(self, ProjectCategory::Design)
    }
}

impl fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProjectCategory::SaaS => "SaaS",
            ProjectCategory::Web => "Web",
            ProjectCategory::App => "App",
            ProjectCategory::Design => "Design",
        };
        f.write_str(label)
    }
}

/// One case study.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub category: ProjectCategory,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub timeline: String,
    #[serde(default)]
    pub description: String,
    /// Long-form write-up shown under the overview heading.
    #[serde(default)]
    pub full_description: String,
    #[serde(default)]
    pub challenge: String,
    #[serde(default)]
    pub solution: String,
    #[serde(default)]
    pub results: Vec<String>,
    #[serde(default)]
    pub stack: Vec<String>,
    /// Cover image, also the carousel fallback.
    pub image: ImageRef,
    #[serde(default)]
    pub gallery: Option<Vec<ImageRef>>,
    #[serde(default)]
    pub live_url: Option<String>,
}

impl Project {
    /// Images the carousel cycles through: the gallery, or just the cover image.
    pub fn gallery_images(&self) -> Vec<ImageRef> {
        match &self.gallery {
            Some(gallery) if !gallery.is_empty() => gallery.clone(),
            _ => vec![self.image.clone()],
        }
    }

    /// The first few stack entries shown in the summary card.
    pub fn core_stack(&self) -> &[String] {
        &self.stack[..self.stack.len().min(4)]
    }
}

/// Service grouping on the services section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum ServiceCategory {
    Engineering,
    Growth,
    #[serde(rename = "Brand & Social")]
    BrandSocial,
    Creative,
}

#[derive(Debug, Deserialize)]
struct RawService {
    category: ServiceCategory,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    features: Vec<String>,
    #[serde(default)]
    tools: Vec<String>,
}

/// A validated service offering.
///
/// Construction guarantees a non-blank title and at least one feature.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawService")]
pub struct Service {
    category: ServiceCategory,
    title: String,
    description: String,
    features: Vec<String>,
    tools: Vec<String>,
}

impl Service {
    pub fn new(
        category: ServiceCategory,
        title: impl Into<String>,
        description: impl Into<String>,
        features: Vec<String>,
        tools: Vec<String>,
    ) -> Result<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(AppError::Catalog("service title is empty".to_string()));
        }
        if features.is_empty() {
            return Err(AppError::Catalog(format!(
                "service '{}' lists no features",
                title
            )));
        }
        Ok(Self {
            category,
            title,
            description: description.into(),
            features,
            tools,
        })
    }

    pub fn category(&self) -> ServiceCategory {
        self.category
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn tools(&self) -> &[String] {
        &self.tools
    }

    /// Message pre-filled into the inquiry form.
    pub fn inquiry_message(&self) -> String {
        format!(
            "Hi, I'm interested in the {} service. I would like to discuss...",
            self.title
        )
    }
}

impl TryFrom<RawService> for Service {
    type Error = AppError;

    fn try_from(raw: RawService) -> Result<Self> {
        Service::new(
            raw.category,
            raw.title,
            raw.description,
            raw.features,
            raw.tools,
        )
    }
}

/// All projects and services.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub services: Vec<Service>,
}

impl Catalog {
    /// Parses and validates catalog TOML.
    pub fn parse(content: &str) -> Result<Self> {
        let catalog: Catalog =
            toml::from_str(content).map_err(|e| AppError::Catalog(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Catalog(format!("{}: {}", path.display(), e)))?;
        Self::parse(&content)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for project in &self.projects {
            if !seen.insert(project.id.as_str()) {
                return Err(AppError::Catalog(format!(
                    "duplicate project id '{}'",
                    project.id
                )));
            }
        }
        Ok(())
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn services_in(&self, category: ServiceCategory) -> impl Iterator<Item = &Service> {
        self.services
            .iter()
            .filter(move |service| service.category == category)
    }
}
