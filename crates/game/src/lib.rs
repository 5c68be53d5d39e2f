//! careermap: the interactive career map, the skills story and the job-match
//! form, driven headlessly.

pub mod app;
pub mod camera_controller;
pub mod config;
pub mod hud;
pub mod marker;
pub mod registry;
pub mod scene;
pub mod selection;
pub mod shell;
pub mod story;
pub mod typewriter;

pub use app::{App, Flow};
pub use config::AppConfig;
pub use registry::{LocationEntry, LocationRegistry, RegistryError, Theme};
pub use scene::{MapScene, PopupView, SceneEvents};
pub use selection::{Controls, MapState, SceneSelection};
