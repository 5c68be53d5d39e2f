//! The career map scene: markers, camera steering and the popup state wired together.

use engine_core::{Label, Pickable, Transform};
use glam::{Vec2, Vec3};
use hecs::World;
use input::MapAction;
use renderer::{Camera, CameraPose, FrameData, Viewport};

use crate::camera_controller::CameraController;
use crate::config::CameraConfig;
use crate::marker::{spawn_markers, update_markers, Marker, MARKER_COLOR};
use crate::registry::{LocationRegistry, Theme, ThemePalette};
use crate::selection::{Controls, MapState, SceneSelection, SelectionMachine, Transition};

/// Tint for the map backdrop instance.
const BACKDROP_COLOR: [f32; 4] = [0.35, 0.38, 0.42, 1.0];

/// What happened during one scene tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneEvents {
    pub camera: CameraPose,
    /// The camera reached its focus target this tick.
    pub arrived: bool,
    /// The popup opened as a result of the arrival.
    pub popup_opened: bool,
}

/// Content of the experience popup.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupView {
    pub entry_id: String,
    pub title: String,
    /// "Company • Period".
    pub subtitle: String,
    pub description: String,
    pub tags: Vec<String>,
    pub image: String,
    pub theme: Theme,
    pub palette: ThemePalette,
    /// "2 / 5" while browsing.
    pub position_label: Option<String>,
}

pub struct MapScene {
    registry: LocationRegistry,
    world: World,
    controller: CameraController,
    machine: SelectionMachine,
    fov_degrees: f32,
    viewport: Viewport,
    /// Seconds of scene time; f64 so marker phases stay precise over long sessions.
    elapsed: f64,
}

impl MapScene {
    pub fn new(registry: LocationRegistry, camera: &CameraConfig) -> Self {
        let mut world = World::new();
        let spawned = spawn_markers(&mut world, &registry);
        log::info!("Map scene ready with {} markers", spawned.len());
        Self {
            machine: SelectionMachine::new(registry.len()),
            registry,
            world,
            controller: CameraController::new(camera),
            fov_degrees: camera.fov_degrees,
            viewport: Viewport::default(),
            elapsed: 0.0,
        }
    }

    pub fn registry(&self) -> &LocationRegistry {
        &self.registry
    }

    pub fn state(&self) -> MapState {
        self.machine.state()
    }

    pub fn selection(&self) -> SceneSelection {
        self.machine.selection()
    }

    pub fn controls(&self) -> Controls {
        self.machine.controls()
    }

    pub fn camera_pose(&self) -> CameraPose {
        self.controller.pose()
    }

    pub fn camera_target(&self) -> Option<Vec3> {
        self.controller.target()
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Perspective camera at the controller's current pose, for the stored viewport.
    pub fn camera(&self) -> Camera {
        self.camera_for(self.viewport)
    }

    fn camera_for(&self, viewport: Viewport) -> Camera {
        let mut camera = Camera::new(self.controller.pose());
        camera.fov_degrees = self.fov_degrees;
        camera.set_aspect(viewport.width, viewport.height);
        camera
    }

    /// Push the machine's new selection to the camera when the transition asks for it.
    fn apply(&mut self, transition: Transition) -> Transition {
        if transition.retarget {
            let target = transition
                .to
                .selected()
                .and_then(|i| self.registry.get(i).ok())
                .map(|e| e.position());
            self.controller.set_target(target);
        }
        if transition.popup_opened() {
            log::info!("Popup opened for {:?}", transition.to);
        }
        transition
    }

    /// A marker was clicked. Unknown ids are ignored.
    pub fn click_marker(&mut self, entry_id: &str) -> Option<Transition> {
        let Some(index) = self.registry.index_of(entry_id) else {
            log::warn!("Click on unknown marker {entry_id:?}");
            return None;
        };
        let t = self.machine.select_entry(index);
        Some(self.apply(t))
    }

    /// Primary click at normalized device coordinates. Picks the nearest marker
    /// under the cursor; ignored while the popup covers the map.
    pub fn click_at(&mut self, ndc: Vec2) -> Option<Transition> {
        if self.machine.state().popup_open() {
            return None;
        }
        let activated = self.pick(ndc)?;
        self.click_marker(&activated)
    }

    /// `click_at` for a pixel in the stored viewport.
    pub fn click_at_pixel(&mut self, pixel: Vec2) -> Option<Transition> {
        let ndc = self.viewport.pixel_to_ndc(pixel);
        self.click_at(ndc)
    }

    /// Id of the closest marker under `ndc`, if any.
    pub fn pick(&self, ndc: Vec2) -> Option<String> {
        let ray = self.camera().screen_ray(ndc);
        let mut query = self.world.query::<(&Transform, &Pickable, &Marker)>();
        let mut best: Option<(f32, usize, &Marker)> = None;
        for (_, (transform, pickable, marker)) in query.iter() {
            let Some(distance) = ray.intersect_sphere(transform.position, pickable.world_radius(transform)) else {
                continue;
            };
            // Ties go to the lower registry index.
            let better = match best {
                None => true,
                Some((d, i, _)) => distance < d || (distance == d && marker.entry_index < i),
            };
            if better {
                best = Some((distance, marker.entry_index, marker));
            }
        }
        best.map(|(_, _, marker)| marker.on_activate().entry_id)
    }

    pub fn view_all(&mut self) -> Transition {
        let t = self.machine.start_browse_all();
        self.apply(t)
    }

    pub fn next(&mut self) -> Transition {
        let t = self.machine.next();
        self.apply(t)
    }

    pub fn prev(&mut self) -> Transition {
        let t = self.machine.prev();
        self.apply(t)
    }

    pub fn dismiss(&mut self) -> Transition {
        let t = self.machine.dismiss();
        self.apply(t)
    }

    /// Free orbit and zoom. Locked while the popup is open; returns whether it applied.
    pub fn orbit(&mut self, drag: Vec2, zoom_steps: f32) -> bool {
        if !self.controls().orbit_enabled {
            return false;
        }
        self.controller.orbit(drag, zoom_steps);
        true
    }

    /// Apply a bound input action.
    pub fn handle(&mut self, action: MapAction) -> Option<Transition> {
        match action {
            MapAction::ClickAt(pixel) => self.click_at_pixel(pixel),
            MapAction::ViewAll => Some(self.view_all()),
            MapAction::Next => Some(self.next()),
            MapAction::Prev => Some(self.prev()),
            MapAction::Dismiss => Some(self.dismiss()),
            MapAction::Orbit { drag, zoom } => {
                self.orbit(drag, zoom);
                None
            }
        }
    }

    /// Advance one frame: animate markers, steer the camera, and open the popup on arrival.
    pub fn tick(&mut self, dt: f32) -> SceneEvents {
        self.elapsed += dt.max(0.0) as f64;
        let camera = self.controller.tick();
        let mut popup_opened = false;
        if camera.arrived {
            log::debug!("Camera arrived at {:?}", camera.pose.look_at);
            let t = self.machine.camera_arrived();
            popup_opened = self.apply(t).popup_opened();
        }
        update_markers(&mut self.world, self.elapsed, self.machine.state().selected());
        SceneEvents {
            camera: camera.pose,
            arrived: camera.arrived,
            popup_opened,
        }
    }

    /// Popup content, when the popup is open.
    pub fn popup(&self) -> Option<PopupView> {
        let state = self.machine.state();
        if !state.popup_open() {
            return None;
        }
        let index = state.selected()?;
        let entry = self.registry.get(index).ok()?;
        let theme = entry.theme();
        Some(PopupView {
            entry_id: entry.id.clone(),
            title: entry.title.clone(),
            subtitle: entry.subtitle(),
            description: entry.description.clone(),
            tags: entry.tags.clone(),
            image: entry.image.clone(),
            theme,
            palette: theme.palette(),
            position_label: state
                .browse_index()
                .map(|i| format!("{} / {}", i + 1, self.registry.len())),
        })
    }

    /// Build the 3D part of the frame: backdrop, marker instances and their labels.
    pub fn frame(&self, viewport: Viewport) -> FrameData {
        let camera = self.camera_for(viewport);
        let mut frame = FrameData::new(&camera, viewport);
        frame.push_instance(&Transform::default(), BACKDROP_COLOR);
        let selected = self.machine.state().selected();
        let mut markers: Vec<(usize, Transform, Label)> = self
            .world
            .query::<(&Transform, &Marker, &Label)>()
            .iter()
            .map(|(_, (t, m, l))| (m.entry_index, *t, l.clone()))
            .collect();
        markers.sort_by_key(|(i, _, _)| *i);
        for (index, transform, label) in &markers {
            let color = match (selected == Some(*index), self.registry.get(*index)) {
                (true, Ok(entry)) => entry.theme().palette().button,
                _ => MARKER_COLOR,
            };
            frame.push_instance(transform, color);
            frame.push_label(&camera, transform, label);
        }
        frame
    }
}
