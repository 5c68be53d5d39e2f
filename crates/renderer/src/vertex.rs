//! GPU-ready instance and overlay vertex data.

use bytemuck::{Pod, Zeroable};

/// Instance data for instanced rendering.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct InstanceData {
    /// Model matrix (4x4)
    pub model: [[f32; 4]; 4],
    /// Color tint
    pub color: [f32; 4],
}

impl InstanceData {
    pub fn new(model: [[f32; 4]; 4], color: [f32; 4]) -> Self {
        Self { model, color }
    }
}

/// Vertex for screen-space text / UI overlay.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct OverlayVertex {
    /// NDC position (x, y) in -1..1
    pub position: [f32; 2],
    /// UV into font atlas (negative x = solid color quad)
    pub tex_coords: [f32; 2],
    /// RGBA color
    pub color: [f32; 4],
}

/// Helper to build screen-space overlay text geometry.
/// Generates OverlayVertex quads for each character + optional background rects.
/// Every line added is also kept as plain text so headless front-ends can print it.
pub struct OverlayTextBuilder {
    pub vertices: Vec<OverlayVertex>,
    pub indices: Vec<u32>,
    lines: Vec<String>,
    screen_w: f32,
    screen_h: f32,
}

/// Font atlas layout: 16 columns x 6 rows of 6x8 pixel glyphs, covering ASCII 32..127.
const FONT_COLS: f32 = 16.0;
const FONT_ROWS: f32 = 6.0;
pub const GLYPH_PX_W: f32 = 6.0;
pub const GLYPH_PX_H: f32 = 8.0;

impl OverlayTextBuilder {
    pub fn new(screen_w: f32, screen_h: f32) -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            lines: Vec::new(),
            screen_w: screen_w.max(1.0),
            screen_h: screen_h.max(1.0),
        }
    }

    /// Convert pixel coords to NDC.
    fn px_to_ndc(&self, px: f32, py: f32) -> [f32; 2] {
        [
            (px / self.screen_w) * 2.0 - 1.0,
            1.0 - (py / self.screen_h) * 2.0,
        ]
    }

    fn push_quad(&mut self, x: f32, y: f32, w: f32, h: f32, uv: [f32; 4], color: [f32; 4]) {
        let tl = self.px_to_ndc(x, y);
        let br = self.px_to_ndc(x + w, y + h);
        let base = self.vertices.len() as u32;
        let [u0, v0, u1, v1] = uv;
        self.vertices.push(OverlayVertex { position: [tl[0], tl[1]], tex_coords: [u0, v0], color });
        self.vertices.push(OverlayVertex { position: [br[0], tl[1]], tex_coords: [u1, v0], color });
        self.vertices.push(OverlayVertex { position: [br[0], br[1]], tex_coords: [u1, v1], color });
        self.vertices.push(OverlayVertex { position: [tl[0], br[1]], tex_coords: [u0, v1], color });
        self.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Add a solid-color rectangle (for text background). Coordinates in pixels.
    pub fn add_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
        // sentinel: solid color
        self.push_quad(x, y, w, h, [-1.0, -1.0, -1.0, -1.0], color);
    }

    /// Add a string of text at pixel position (x, y) with the given scale and color.
    /// `scale` = 1.0 means each glyph is 6x8 screen pixels; 2.0 doubles that.
    pub fn add_text(&mut self, x: f32, y: f32, text: &str, scale: f32, color: [f32; 4]) {
        let gw = GLYPH_PX_W * scale;
        let gh = GLYPH_PX_H * scale;
        let mut cx = x;
        for ch in text.chars() {
            let code = ch as u32;
            if !(32..=127).contains(&code) {
                cx += gw;
                continue;
            }
            let idx = code - 32;
            let col = (idx % 16) as f32;
            let row = (idx / 16) as f32;
            let uv = [
                col / FONT_COLS,
                row / FONT_ROWS,
                (col + 1.0) / FONT_COLS,
                (row + 1.0) / FONT_ROWS,
            ];
            self.push_quad(cx, y, gw, gh, uv, color);
            cx += gw;
        }
        self.lines.push(text.to_string());
    }

    /// Add text with a dark background behind it. Returns the Y offset for the next line.
    pub fn add_text_with_bg(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        scale: f32,
        text_color: [f32; 4],
        bg_color: [f32; 4],
    ) -> f32 {
        let gw = GLYPH_PX_W * scale;
        let gh = GLYPH_PX_H * scale;
        let padding = 2.0 * scale;
        let text_w = text.chars().count() as f32 * gw;
        self.add_rect(x, y, text_w + padding * 2.0, gh + padding * 2.0, bg_color);
        self.add_text(x + padding, y + padding, text, scale, text_color);
        gh + padding * 2.0
    }

    /// Add text wrapped to `max_width` pixels. Returns the total height used.
    pub fn add_wrapped_text(
        &mut self,
        x: f32,
        y: f32,
        max_width: f32,
        text: &str,
        scale: f32,
        color: [f32; 4],
    ) -> f32 {
        let max_chars = ((max_width / (GLYPH_PX_W * scale)).floor() as usize).max(1);
        let line_h = (GLYPH_PX_H + 2.0) * scale;
        let mut cy = y;
        for line in wrap_words(text, max_chars) {
            self.add_text(x, cy, &line, scale, color);
            cy += line_h;
        }
        cy - y
    }

    /// Plain-text copy of every line added so far, in insertion order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Greedy word wrap on character counts. Words longer than a line are split.
pub fn wrap_words(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > max_chars && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_emits_one_quad_per_printable_char() {
        let mut b = OverlayTextBuilder::new(800.0, 600.0);
        b.add_text(0.0, 0.0, "ab c", 1.0, [1.0; 4]);
        assert_eq!(b.vertices.len(), 16);
        assert_eq!(b.indices.len(), 24);
        assert_eq!(b.lines(), &["ab c".to_string()]);
    }

    #[test]
    fn rect_maps_corners_to_ndc() {
        let mut b = OverlayTextBuilder::new(100.0, 100.0);
        b.add_rect(0.0, 0.0, 100.0, 100.0, [0.0; 4]);
        assert_eq!(b.vertices[0].position, [-1.0, 1.0]);
        assert_eq!(b.vertices[2].position, [1.0, -1.0]);
        assert_eq!(b.vertices[0].tex_coords[0], -1.0);
    }

    #[test]
    fn wrap_keeps_words_within_width() {
        let lines = wrap_words("Led LMS platform development, integrating interactive UI", 16);
        assert!(lines.iter().all(|l| l.chars().count() <= 16));
        assert_eq!(lines.join(" "), "Led LMS platform development, integrating interactive UI");
    }

    #[test]
    fn wrap_splits_overlong_words() {
        let lines = wrap_words("abcdefghij xy", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij", "xy"]);
    }
}
