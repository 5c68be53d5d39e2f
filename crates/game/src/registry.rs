//! Location registry: the points of interest shown on the career map.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("location index {index} out of range (registry has {len} entries)")]
    OutOfRange { index: usize, len: usize },
    #[error("duplicate location id {0:?}")]
    DuplicateId(String),
    #[error("could not load locations from {path}: {reason}")]
    Load { path: String, reason: String },
}

/// Palette key for an entry's popup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Red,
    Purple,
    Green,
    Blue,
    Pink,
}

/// RGBA colors used to draw a themed popup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemePalette {
    pub border: [f32; 4],
    pub text: [f32; 4],
    pub sub_text: [f32; 4],
    pub button: [f32; 4],
}

impl Theme {
    pub fn name(self) -> &'static str {
        match self {
            Theme::Red => "red",
            Theme::Purple => "purple",
            Theme::Green => "green",
            Theme::Blue => "blue",
            Theme::Pink => "pink",
        }
    }

    pub fn palette(self) -> ThemePalette {
        // Accent, light tint and translucent border per theme.
        let (accent, tint): ([f32; 3], [f32; 3]) = match self {
            Theme::Red => ([0.94, 0.27, 0.27], [1.0, 0.89, 0.89]),
            Theme::Purple => ([0.75, 0.52, 0.99], [0.95, 0.91, 1.0]),
            Theme::Green => ([0.64, 0.90, 0.21], [0.93, 0.99, 0.80]),
            Theme::Blue => ([0.38, 0.65, 0.98], [0.86, 0.92, 1.0]),
            Theme::Pink => ([0.93, 0.28, 0.60], [0.99, 0.91, 0.95]),
        };
        let [r, g, b] = accent;
        let [tr, tg, tb] = tint;
        ThemePalette {
            border: [r, g, b, 0.4],
            text: [tr, tg, tb, 1.0],
            sub_text: [r, g, b, 1.0],
            button: [r, g, b, 1.0],
        }
    }
}

/// One point of interest on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationEntry {
    pub id: String,
    pub title: String,
    pub company: String,
    pub position: [f32; 3],
    #[serde(default)]
    pub image: String,
    pub description: String,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub theme: Option<Theme>,
}

impl LocationEntry {
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    /// Theme to draw with; entries without one use the default palette.
    pub fn theme(&self) -> Theme {
        self.theme.unwrap_or_default()
    }

    /// "Company • Period", or just the company when there is no period.
    pub fn subtitle(&self) -> String {
        match self.period.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            Some(period) => format!("{} \u{2022} {}", self.company, period),
            None => self.company.clone(),
        }
    }
}

/// Ordered, immutable list of map locations.
#[derive(Debug, Clone)]
pub struct LocationRegistry {
    entries: Vec<LocationEntry>,
}

impl LocationRegistry {
    /// Build a registry, rejecting duplicate ids.
    pub fn new(entries: Vec<LocationEntry>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.id.as_str()) {
                return Err(RegistryError::DuplicateId(entry.id.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// The built-in career locations.
    pub fn builtin() -> Self {
        Self {
            entries: builtin_entries(),
        }
    }

    /// Load entries from a RON list.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let load_err = |reason: String| RegistryError::Load {
            path: path.display().to_string(),
            reason,
        };
        let data = std::fs::read_to_string(path).map_err(|e| load_err(e.to_string()))?;
        let entries: Vec<LocationEntry> = ron::from_str(&data).map_err(|e| load_err(e.to_string()))?;
        Self::new(entries)
    }

    /// Load from `path` if given, otherwise (or on failure) use the built-ins.
    pub fn load_or_builtin(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::builtin();
        };
        match Self::load(path) {
            Ok(registry) if !registry.is_empty() => {
                log::info!("Loaded {} locations from {}", registry.len(), path.display());
                registry
            }
            Ok(_) => {
                log::warn!("{} has no locations, using built-in list", path.display());
                Self::builtin()
            }
            Err(e) => {
                log::warn!("{e}, using built-in list");
                Self::builtin()
            }
        }
    }

    /// All entries in registry order.
    pub fn list_all(&self) -> &[LocationEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Result<&LocationEntry, RegistryError> {
        self.entries.get(index).ok_or(RegistryError::OutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn entry(
    id: &str,
    title: &str,
    company: &str,
    position: [f32; 3],
    image: &str,
    description: &str,
    period: Option<&str>,
    tags: &[&str],
    theme: Theme,
) -> LocationEntry {
    LocationEntry {
        id: id.to_string(),
        title: title.to_string(),
        company: company.to_string(),
        position,
        image: image.to_string(),
        description: description.to_string(),
        period: period.map(str::to_string),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        theme: Some(theme),
    }
}

fn builtin_entries() -> Vec<LocationEntry> {
    vec![
        entry(
            "job-1",
            "LMS Lead",
            "Mavex",
            [2.5, 0.2, -2.0],
            "moo1.png",
            "Led LMS platform development, integrating interactive UI and real-time features.",
            Some("2023 \u{2013} 2024"),
            &["React", "Three.js", "UI/UX"],
            Theme::Purple,
        ),
        entry(
            "job-2",
            "Frontend Engineer",
            "Company B",
            [-3.0, 0.2, 2.5],
            "moo2.png",
            "Built scalable front-end systems with performance-focused architecture.",
            Some("2022 \u{2013} 2023"),
            &["TypeScript", "Tailwind"],
            Theme::Blue,
        ),
        entry(
            "job-3",
            "Fullstack Developer",
            "Company C",
            [0.0, 0.2, 4.0],
            "moo3.png",
            "Developed APIs and dashboards supporting real-world business workflows.",
            Some("2021 \u{2013} 2022"),
            &["Node.js", "PostgreSQL"],
            Theme::Red,
        ),
        entry(
            "job-4",
            "AI Research Assistant",
            "University Lab",
            [3.5, 0.2, 1.8],
            "moo4.png",
            "Researched ML models and data pipelines for experimental AI systems.",
            Some("2020 \u{2013} 2021"),
            &["Python", "ML"],
            Theme::Green,
        ),
        entry(
            "job-5",
            "Freelance Developer",
            "Remote",
            [-3.8, 0.2, -3.0],
            "moo5.png",
            "Delivered end-to-end solutions for multiple international clients.",
            None,
            &["Fullstack", "Consulting"],
            Theme::Pink,
        ),
    ]
}

#[cfg(test)]
pub(crate) fn test_entry(id: &str, position: [f32; 3]) -> LocationEntry {
    LocationEntry {
        id: id.to_string(),
        title: format!("Title {id}"),
        company: format!("Company {id}"),
        position,
        image: String::new(),
        description: String::new(),
        period: None,
        tags: Vec::new(),
        theme: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_order_is_stable() {
        let a = LocationRegistry::builtin();
        let b = LocationRegistry::builtin();
        let ids: Vec<&str> = a.list_all().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["job-1", "job-2", "job-3", "job-4", "job-5"]);
        assert_eq!(a.list_all(), b.list_all());
        assert_eq!(a.list_all(), a.list_all());
    }

    #[test]
    fn get_checks_bounds() {
        let r = LocationRegistry::builtin();
        assert_eq!(r.get(4).unwrap().id, "job-5");
        assert_eq!(r.get(5), Err(RegistryError::OutOfRange { index: 5, len: 5 }));
        let empty = LocationRegistry::new(Vec::new()).unwrap();
        assert_eq!(empty.get(0), Err(RegistryError::OutOfRange { index: 0, len: 0 }));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = LocationRegistry::new(vec![test_entry("a", [0.0; 3]), test_entry("a", [1.0; 3])]);
        assert_eq!(err.unwrap_err(), RegistryError::DuplicateId("a".to_string()));
    }

    #[test]
    fn optional_content_is_absent_not_error() {
        let r = LocationRegistry::builtin();
        let freelance = r.get(r.index_of("job-5").unwrap()).unwrap();
        assert_eq!(freelance.subtitle(), "Remote");
        let lead = r.get(0).unwrap();
        assert_eq!(lead.subtitle(), "Mavex \u{2022} 2023 \u{2013} 2024");
        assert_eq!(test_entry("x", [0.0; 3]).theme(), Theme::Red);
    }

    #[test]
    fn ron_entries_load_with_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("locations.ron");
        std::fs::write(
            &path,
            r#"[
                (id: "a", title: "A", company: "Acme", position: (0.0, 0.0, 0.0), description: "first", theme: Some(blue)),
                (id: "b", title: "B", company: "Beta", position: (1.0, 0.0, 0.0), description: "second"),
            ]"#,
        )
        .unwrap();
        let r = LocationRegistry::load(&path).unwrap();
        assert_eq!(r.len(), 2);
        assert_eq!(r.get(0).unwrap().theme(), Theme::Blue);
        assert!(r.get(1).unwrap().tags.is_empty());

        let fallback = LocationRegistry::load_or_builtin(Some(&dir.path().join("missing.ron")));
        assert_eq!(fallback.len(), 5);
    }

    #[test]
    fn every_theme_has_opaque_text() {
        for theme in [Theme::Red, Theme::Purple, Theme::Green, Theme::Blue, Theme::Pink] {
            let p = theme.palette();
            assert_eq!(p.text[3], 1.0);
            assert!(p.border[3] < 1.0);
            assert!(!theme.name().is_empty());
        }
    }
}
