//! Runtime image and resource policy.
//!
//! Pure functions only; no I/O, no async, no filesystem access.

use fleetbox_common::GuestResources;

/// Project types served by the lightweight, pre-warmed JS image.
pub const LIGHTWEIGHT_PROJECT_TYPES: &[&str] = &[
    "node", "nodejs", "javascript", "typescript", "react", "next", "nextjs", "vue", "nuxt",
    "svelte", "sveltekit", "angular", "vite", "express", "remix", "astro", "solid", "gatsby",
];

const CPU_KIND_SHARED: &str = "shared";

/// Which image family a project runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageClass {
    /// Node-based web framework projects.
    Lightweight,
    /// Multi-toolchain image; the default for unknown project types.
    Universal,
}

impl ImageClass {
    /// Classify a declared project type. Missing or unknown types are universal.
    #[must_use]
    pub fn for_project_type(project_type: Option<&str>) -> Self {
        match project_type {
            Some(t) if LIGHTWEIGHT_PROJECT_TYPES.contains(&t.trim().to_ascii_lowercase().as_str()) => {
                Self::Lightweight
            }
            _ => Self::Universal,
        }
    }

    /// Default guest size for the class.
    #[must_use]
    pub fn default_resources(self) -> GuestResources {
        match self {
            Self::Lightweight => GuestResources {
                cpus: 1,
                cpu_kind: CPU_KIND_SHARED.to_string(),
                memory_mb: 1024,
            },
            Self::Universal => GuestResources {
                cpus: 2,
                cpu_kind: CPU_KIND_SHARED.to_string(),
                memory_mb: 2048,
            },
        }
    }
}

/// Image references available to the policy table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCatalog {
    pub lightweight: String,
    pub universal: String,
}

impl ImageCatalog {
    #[must_use]
    pub fn reference(&self, class: ImageClass) -> &str {
        match class {
            ImageClass::Lightweight => &self.lightweight,
            ImageClass::Universal => &self.universal,
        }
    }
}

/// Select the image reference for a declared project type.
#[must_use]
pub fn select_image<'a>(catalog: &'a ImageCatalog, project_type: Option<&str>) -> &'a str {
    catalog.reference(ImageClass::for_project_type(project_type))
}
