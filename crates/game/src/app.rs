//! Terminal driver state: owns the scene, the story and the job-match form and
//! feeds them synthesized input one frame at a time.

use engine_core::Time;
use input::{Bindings, ElementState, InputState, KeyCode, MouseButton, StoryAction};
use jobmatch::{HttpJobMatchClient, JobMatchForm, PdfDocument};
use renderer::{OverlayTextBuilder, Viewport};

use crate::config::AppConfig;
use crate::hud;
use crate::registry::LocationRegistry;
use crate::scene::MapScene;
use crate::shell::{MarkerRef, ShellCommand, View, HELP};
use crate::story::StoryPlayer;

/// Whether the driver should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    config: AppConfig,
    scene: MapScene,
    story: StoryPlayer,
    form: JobMatchForm,
    client: Option<HttpJobMatchClient>,
    input: InputState,
    bindings: Bindings,
    time: Time,
    view: View,
    viewport: Viewport,
}

impl App {
    pub fn new(config: AppConfig, registry: LocationRegistry) -> Self {
        let viewport = config.viewport();
        let mut scene = MapScene::new(registry, &config.camera);
        scene.set_viewport(viewport);
        let client = match HttpJobMatchClient::new(&config.job_match.client_config()) {
            Ok(c) => Some(c),
            Err(e) => {
                log::warn!("Job match disabled: {e}");
                None
            }
        };
        Self {
            story: StoryPlayer::builtin(config.story.typing_interval()),
            time: Time::with_fixed_rate(config.tick_rate_hz),
            scene,
            form: JobMatchForm::new(),
            client,
            input: InputState::new(),
            bindings: Bindings::default(),
            view: View::Map,
            viewport,
            config,
        }
    }

    pub fn scene(&self) -> &MapScene {
        &self.scene
    }

    pub fn story(&self) -> &StoryPlayer {
        &self.story
    }

    pub fn form(&self) -> &JobMatchForm {
        &self.form
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn time(&self) -> &Time {
        &self.time
    }

    /// Run one command. Returns the lines to print and whether to continue.
    pub fn execute(&mut self, command: ShellCommand) -> (Vec<String>, Flow) {
        let mut out = Vec::new();
        match command {
            ShellCommand::Key(key) => {
                self.input.process_keyboard(key, ElementState::Pressed);
                self.run_frame();
                self.input.process_keyboard(key, ElementState::Released);
            }
            ShellCommand::ClickPixel(pixel) => {
                self.input.process_cursor_position((pixel.x as f64, pixel.y as f64));
                self.input.process_mouse_button(MouseButton::Left, ElementState::Pressed);
                self.run_frame();
                self.input.process_mouse_button(MouseButton::Left, ElementState::Released);
            }
            ShellCommand::Drag(delta) => {
                self.input.process_mouse_button(MouseButton::Right, ElementState::Pressed);
                self.input.process_mouse_motion((delta.x as f64, delta.y as f64));
                // Motion becomes this frame's delta at the frame boundary.
                self.run_frame();
                self.run_frame();
                self.input.process_mouse_button(MouseButton::Right, ElementState::Released);
            }
            ShellCommand::Zoom(lines) => {
                self.input.process_scroll(lines);
                self.run_frame();
            }
            ShellCommand::ClickMarker(marker) => {
                let id = match marker {
                    MarkerRef::Id(id) => Some(id),
                    MarkerRef::Number(n) => n
                        .checked_sub(1)
                        .and_then(|i| self.scene.registry().get(i).ok())
                        .map(|e| e.id.clone()),
                };
                match id.and_then(|id| self.scene.click_marker(&id)) {
                    Some(_) => self.view = View::Map,
                    None => out.push("No such marker".to_string()),
                }
                self.run_frame();
            }
            ShellCommand::Tick(frames) => {
                for _ in 0..frames {
                    self.run_frame();
                }
            }
            ShellCommand::Show(view) => self.show(view),
            ShellCommand::Pdf(path) => match PdfDocument::from_path(&path) {
                Ok(doc) => {
                    out.push(format!("Attached {} ({} bytes)", doc.file_name, doc.bytes.len()));
                    self.form.set_file(Some(doc));
                }
                Err(e) => out.push(e.to_string()),
            },
            ShellCommand::JobText(text) => self.form.set_text(text),
            ShellCommand::Submit => {
                self.view = View::JobMatch;
                match &self.client {
                    Some(client) => self.form.submit(client),
                    None => out.push("Job match service is not configured".to_string()),
                }
            }
            ShellCommand::Health => match &self.client {
                Some(client) => match client.health() {
                    Ok(h) => out.push(format!("{} {} ({})", h.service, h.version, h.status)),
                    Err(e) => out.push(e.to_string()),
                },
                None => out.push("Job match service is not configured".to_string()),
            },
            ShellCommand::Help => {
                out.extend(HELP.lines().map(str::to_string));
                return (out, Flow::Continue);
            }
            ShellCommand::Quit => {
                if self.view == View::Story {
                    self.story.stop();
                }
                return (out, Flow::Quit);
            }
        }
        out.extend(self.render());
        (out, Flow::Continue)
    }

    fn show(&mut self, view: View) {
        if self.view == View::Story && view != View::Story {
            self.story.stop();
        }
        if view == View::Story && self.view != View::Story {
            // Entering the story always starts from the first scene.
            self.story = StoryPlayer::builtin(self.config.story.typing_interval());
        }
        self.view = view;
    }

    /// One display frame: dispatch this frame's input, then run the fixed ticks it covers.
    fn run_frame(&mut self) {
        match self.view {
            View::Map => {
                for action in self.bindings.map_actions(&self.input) {
                    self.scene.handle(action);
                }
            }
            View::Story => {
                for action in self.bindings.story_actions(&self.input) {
                    match action {
                        StoryAction::Advance => {
                            self.story.advance();
                        }
                    }
                }
            }
            View::JobMatch => {
                if self.input.is_key_pressed(KeyCode::Escape) {
                    self.view = View::Map;
                }
            }
        }

        let step = self.time.fixed_timestep();
        self.time.advance(step);
        while self.time.should_fixed_update() {
            match self.view {
                View::Map => {
                    let events = self.scene.tick(self.time.fixed_timestep_seconds());
                    if events.popup_opened {
                        log::info!("Popup open at frame {}", self.time.frame_count());
                    }
                }
                View::Story => {
                    self.story.tick(step);
                }
                View::JobMatch => {}
            }
        }
        self.input.begin_frame();
    }

    /// Overlay text for the current view.
    pub fn render(&self) -> Vec<String> {
        match self.view {
            View::Map => hud::map_frame(&self.scene, self.viewport).overlay.lines().to_vec(),
            View::Story => {
                let mut tb = OverlayTextBuilder::new(self.viewport.width as f32, self.viewport.height as f32);
                hud::draw_story(&mut tb, &self.story, self.viewport);
                tb.lines().to_vec()
            }
            View::JobMatch => {
                let mut tb = OverlayTextBuilder::new(self.viewport.width as f32, self.viewport.height as f32);
                hud::draw_job_match(&mut tb, &self.form, self.viewport);
                tb.lines().to_vec()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::MapState;
    use crate::shell::parse;

    fn app() -> App {
        App::new(AppConfig::default(), LocationRegistry::builtin())
    }

    fn run(app: &mut App, line: &str) -> Vec<String> {
        let command = parse(line).unwrap().unwrap();
        app.execute(command).0
    }

    #[test]
    fn click_then_wait_opens_popup() {
        let mut app = app();
        run(&mut app, "click 2");
        assert_eq!(app.scene().state(), MapState::Focusing { entry: 1 });
        let out = run(&mut app, "tick 600");
        assert_eq!(app.scene().state(), MapState::Viewing { entry: 1 });
        assert!(out.iter().any(|l| l == "Frontend Engineer"));
        run(&mut app, "back");
        assert_eq!(app.scene().state(), MapState::Idle);
    }

    #[test]
    fn keys_browse_through_bindings() {
        let mut app = app();
        run(&mut app, "all");
        run(&mut app, "next");
        run(&mut app, "next");
        assert_eq!(app.scene().state(), MapState::Browsing { index: 2 });
        let out = run(&mut app, "prev");
        assert!(out.iter().any(|l| l == "2 / 5"));
    }

    #[test]
    fn drag_and_zoom_orbit_only_when_popup_closed() {
        let mut app = app();
        let home = app.scene().camera_pose();
        run(&mut app, "drag -200 0");
        run(&mut app, "zoom in");
        run(&mut app, "tick 600");
        let orbited = app.scene().camera_pose();
        assert!(orbited.distance_to(&home) > 1.0);
        assert!(orbited.position.distance(orbited.look_at) < home.position.distance(home.look_at));
        assert_eq!(app.scene().state(), MapState::Idle);

        run(&mut app, "click 1");
        run(&mut app, "tick 600");
        assert_eq!(app.scene().state(), MapState::Viewing { entry: 0 });
        let viewing = app.scene().camera_pose();
        run(&mut app, "drag -200 0");
        run(&mut app, "zoom out");
        run(&mut app, "tick 60");
        assert!(app.scene().camera_pose().distance_to(&viewing) < 1e-3);
        assert_eq!(app.scene().state(), MapState::Viewing { entry: 0 });
    }

    #[test]
    fn unknown_marker_reports_and_keeps_state() {
        let mut app = app();
        assert_eq!(run(&mut app, "click 0")[0], "No such marker");
        assert_eq!(run(&mut app, "click nope")[0], "No such marker");
        assert_eq!(app.scene().state(), MapState::Idle);
    }

    #[test]
    fn story_restarts_on_entry_and_space_advances() {
        let mut app = app();
        run(&mut app, "story");
        run(&mut app, "space");
        assert!(!app.story().is_typing());
        run(&mut app, "space");
        assert_eq!(app.story().index(), 1);

        run(&mut app, "map");
        run(&mut app, "story");
        assert_eq!(app.story().index(), 0);
    }

    #[test]
    fn empty_submission_shows_validation_error() {
        let mut app = app();
        let out = run(&mut app, "match");
        assert_eq!(app.view(), View::JobMatch);
        assert!(out.iter().any(|l| l.contains("Please upload a PDF")));
    }

    #[test]
    fn fixed_ticks_follow_frames() {
        let mut app = app();
        run(&mut app, "tick 10");
        assert_eq!(app.time().frame_count(), 10);
    }
}
