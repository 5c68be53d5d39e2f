//! Overlay text for the map popup, the browse controls, the story panel and
//! the job-match result.

use jobmatch::{JobMatchForm, SkillBar};
use renderer::{FrameData, OverlayTextBuilder, Viewport, GLYPH_PX_H};

use crate::scene::{MapScene, PopupView};
use crate::selection::Controls;
use crate::story::StoryPlayer;

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const GRAY: [f32; 4] = [0.6, 0.62, 0.68, 1.0];
const PINK: [f32; 4] = [0.96, 0.45, 0.71, 1.0];
const ERROR_RED: [f32; 4] = [0.97, 0.44, 0.44, 1.0];
const BG: [f32; 4] = [0.0, 0.0, 0.0, 0.7];
const SCALE: f32 = 1.5;
const MARGIN: f32 = 8.0;

fn line_height(scale: f32) -> f32 {
    (GLYPH_PX_H + 4.0) * scale
}

/// Scene frame with the map overlay already drawn into it.
pub fn map_frame(scene: &MapScene, viewport: Viewport) -> FrameData {
    let mut frame = scene.frame(viewport);
    draw_map_overlay(&mut frame.overlay, scene.popup().as_ref(), scene.controls(), viewport);
    frame
}

pub fn draw_map_overlay(tb: &mut OverlayTextBuilder, popup: Option<&PopupView>, controls: Controls, viewport: Viewport) {
    let (sw, sh) = (viewport.width as f32, viewport.height as f32);
    let lh = line_height(SCALE);

    if let Some(popup) = popup {
        draw_popup(tb, popup, sw * 0.25, sh * 0.2, sw * 0.5);
    }

    // Bottom: control hints.
    let mut hints = Vec::new();
    if controls.view_all_enabled && !controls.browsing {
        hints.push("[V] View all");
    }
    if controls.browsing {
        if controls.prev_enabled {
            hints.push("[<] Prev");
        }
        if controls.next_enabled {
            hints.push("[>] Next");
        }
    }
    if popup.is_some() {
        hints.push("[Esc] Back to map");
    } else if controls.orbit_enabled {
        hints.push("Click a marker to focus");
        hints.push("Right-drag to orbit, scroll to zoom");
    }
    tb.add_text_with_bg(MARGIN, sh - lh - MARGIN, &hints.join("   "), SCALE, GRAY, BG);
}

fn draw_popup(tb: &mut OverlayTextBuilder, popup: &PopupView, x: f32, y: f32, width: f32) {
    let palette = popup.palette;
    let lh = line_height(SCALE);
    let mut cy = y;
    tb.add_rect(x - 4.0, y - 4.0, width + 8.0, 2.0, palette.border);

    if let Some(label) = &popup.position_label {
        tb.add_text(x, cy, label, 1.0, GRAY);
        cy += line_height(1.0);
    }
    tb.add_text(x, cy, &popup.title, SCALE * 1.5, palette.text);
    cy += line_height(SCALE * 1.5);
    tb.add_text(x, cy, &popup.subtitle, SCALE, palette.sub_text);
    cy += lh;
    if !popup.description.is_empty() {
        cy += tb.add_wrapped_text(x, cy, width, &popup.description, SCALE, WHITE);
    }
    if !popup.tags.is_empty() {
        let tags: Vec<String> = popup.tags.iter().map(|t| format!("#{t}")).collect();
        tb.add_text(x, cy, &tags.join(" "), SCALE, palette.button);
        cy += lh;
    }
    if !popup.image.is_empty() {
        tb.add_text(x, cy, &format!("image: {}", popup.image), 1.0, GRAY);
    }
}

pub fn draw_story(tb: &mut OverlayTextBuilder, player: &StoryPlayer, viewport: Viewport) {
    let Some(scene) = player.current() else {
        return;
    };
    let (sw, sh) = (viewport.width as f32, viewport.height as f32);
    let lh = line_height(SCALE);
    let width = (sw - MARGIN * 2.0).min(900.0);
    let x = (sw - width) * 0.5;
    let mut y = sh * 0.65;

    tb.add_rect(x - 4.0, y - 4.0, width + 8.0, sh - y, BG);
    tb.add_text(x, y, scene.character, SCALE, PINK);
    y += lh;
    let cursor = if player.is_typing() { "_" } else { "" };
    y += tb.add_wrapped_text(x, y, width, &format!("{}{cursor}", player.displayed_text()), SCALE, WHITE);
    if player.skills_visible() {
        let skills: Vec<String> = scene.skills.iter().map(|s| format!("[{s}]")).collect();
        tb.add_text(x, y, &skills.join(" "), SCALE, PINK);
        y += lh;
    }
    if player.continue_prompt_visible() {
        let prompt = if player.is_last() { "The end" } else { "Press Space to continue" };
        tb.add_text(x, y, prompt, 1.0, GRAY);
    }
}

pub fn draw_job_match(tb: &mut OverlayTextBuilder, form: &JobMatchForm, viewport: Viewport) {
    let sw = viewport.width as f32;
    let lh = line_height(SCALE);
    let width = sw - MARGIN * 2.0;
    let x = MARGIN;
    let mut y = MARGIN;

    let file = form.file().map_or("(no file)", |f| f.file_name.as_str());
    tb.add_text(x, y, &format!("Job PDF: {file}"), SCALE, WHITE);
    y += lh;
    tb.add_text(x, y, &format!("[{}]", form.button_label()), SCALE, GRAY);
    y += lh;

    if let Some(error) = form.error() {
        tb.add_text_with_bg(x, y, error, SCALE, ERROR_RED, BG);
        return;
    }
    let Some(result) = form.result() else {
        return;
    };
    tb.add_text(x, y, &format!("Match score: {}%", result.score_percent()), SCALE * 1.5, PINK);
    y += line_height(SCALE * 1.5);
    y += tb.add_wrapped_text(x, y, width, &result.summary, SCALE, WHITE);

    for (title, bars) in [("Strengths", form.strength_bars()), ("Gaps", form.gap_bars())] {
        if bars.is_empty() {
            continue;
        }
        tb.add_text(x, y, title, SCALE, GRAY);
        y += lh;
        for bar in &bars {
            tb.add_text(x, y, &bar_line(bar), SCALE, WHITE);
            y += lh;
        }
    }
    if !result.recommendations.is_empty() {
        tb.add_text(x, y, "Recommendations", SCALE, GRAY);
        y += lh;
        for rec in &result.recommendations {
            y += tb.add_wrapped_text(x, y, width, &format!("- {rec}"), SCALE, WHITE);
        }
    }
}

fn bar_line(bar: &SkillBar) -> String {
    format!("{} {:>3}% {}", progress_bar(bar.value as f32 / 100.0, 20), bar.value, bar.label)
}

fn progress_bar(percent: f32, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 1.0) * width as f32) as usize).min(width);
    format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
}
