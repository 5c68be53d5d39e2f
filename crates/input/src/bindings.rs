//! Key and mouse bindings for the map and story views.

use glam::Vec2;

use crate::{InputState, KeyCode};

/// High-level action on the career map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapAction {
    /// Primary click at a window pixel position.
    ClickAt(Vec2),
    ViewAll,
    Next,
    Prev,
    Dismiss,
    /// Drag in pixels and zoom steps (negative zooms in) for free orbiting.
    Orbit { drag: Vec2, zoom: f32 },
}

/// High-level action on the story view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryAction {
    /// Finish the current line, or move on to the next scene.
    Advance,
}

/// Which keys drive which actions.
#[derive(Debug, Clone)]
pub struct Bindings {
    pub view_all: KeyCode,
    pub next: Vec<KeyCode>,
    pub prev: Vec<KeyCode>,
    pub dismiss: Vec<KeyCode>,
    pub advance: Vec<KeyCode>,
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            view_all: KeyCode::KeyV,
            next: vec![KeyCode::ArrowRight, KeyCode::KeyD],
            prev: vec![KeyCode::ArrowLeft, KeyCode::KeyA],
            dismiss: vec![KeyCode::Escape, KeyCode::Backspace],
            advance: vec![KeyCode::Space, KeyCode::Enter, KeyCode::NumpadEnter],
        }
    }
}

impl Bindings {
    /// Map actions triggered this frame, in a fixed order: dismiss, view all,
    /// prev, next, click, orbit.
    pub fn map_actions(&self, input: &InputState) -> Vec<MapAction> {
        let mut actions = Vec::new();
        if self.dismiss.iter().any(|k| input.is_key_pressed(*k)) {
            actions.push(MapAction::Dismiss);
        }
        if input.is_key_pressed(self.view_all) {
            actions.push(MapAction::ViewAll);
        }
        if self.prev.iter().any(|k| input.is_key_pressed(*k)) {
            actions.push(MapAction::Prev);
        }
        if self.next.iter().any(|k| input.is_key_pressed(*k)) {
            actions.push(MapAction::Next);
        }
        if input.is_select_clicked() {
            actions.push(MapAction::ClickAt(input.mouse_position()));
        }
        let drag = input.orbit_drag();
        let zoom = match (input.is_scroll_up(), input.is_scroll_down()) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        if drag != Vec2::ZERO || zoom != 0.0 {
            actions.push(MapAction::Orbit { drag, zoom });
        }
        if !actions.is_empty() {
            log::trace!("Map actions this frame: {:?}", actions);
        }
        actions
    }

    /// Story actions triggered this frame. A click anywhere also advances.
    pub fn story_actions(&self, input: &InputState) -> Vec<StoryAction> {
        let advance = self.advance.iter().any(|k| input.is_key_pressed(*k)) || input.is_select_clicked();
        if advance {
            vec![StoryAction::Advance]
        } else {
            Vec::new()
        }
    }
}
