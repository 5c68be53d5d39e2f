//! Per-frame render data assembled by the scene.

use engine_core::{Label, Transform, TransformRaw};
use glam::{Vec2, Vec3};

use crate::{Camera, CameraUniform, InstanceData, OverlayTextBuilder};

/// Output surface size in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Convert a pixel position (origin top-left) into NDC.
    pub fn pixel_to_ndc(&self, px: Vec2) -> Vec2 {
        let w = self.width.max(1) as f32;
        let h = self.height.max(1) as f32;
        Vec2::new((px.x / w) * 2.0 - 1.0, 1.0 - (px.y / h) * 2.0)
    }

    /// Convert NDC back to pixels.
    pub fn ndc_to_pixel(&self, ndc: Vec2) -> Vec2 {
        let w = self.width.max(1) as f32;
        let h = self.height.max(1) as f32;
        Vec2::new((ndc.x + 1.0) * 0.5 * w, (1.0 - ndc.y) * 0.5 * h)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

/// Screen-space label placed over a world point.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSprite {
    pub text: String,
    /// Pixel position of the label center.
    pub screen: Vec2,
    pub opacity: f32,
    pub scale: f32,
}

/// Everything a backend needs to draw one frame.
pub struct FrameData {
    pub viewport: Viewport,
    pub camera: CameraUniform,
    pub instances: Vec<InstanceData>,
    pub labels: Vec<LabelSprite>,
    pub overlay: OverlayTextBuilder,
}

impl FrameData {
    pub fn new(camera: &Camera, viewport: Viewport) -> Self {
        let mut uniform = CameraUniform::new();
        uniform.update(camera);
        Self {
            viewport,
            camera: uniform,
            instances: Vec::new(),
            labels: Vec::new(),
            overlay: OverlayTextBuilder::new(viewport.width as f32, viewport.height as f32),
        }
    }

    /// Queue one instanced mesh draw.
    pub fn push_instance(&mut self, transform: &Transform, color: [f32; 4]) {
        let raw = TransformRaw::from(transform);
        self.instances.push(InstanceData::new(raw.model, color));
    }

    /// Project a label anchored at `transform` and queue it if on screen.
    pub fn push_label(&mut self, camera: &Camera, transform: &Transform, label: &Label) {
        let Some(ndc) = camera.world_to_ndc(label_anchor(transform, label)) else {
            return;
        };
        if !(-1.0..=1.0).contains(&ndc.z) {
            return;
        }
        self.labels.push(LabelSprite {
            text: label.text.clone(),
            screen: self.viewport.ndc_to_pixel(Vec2::new(ndc.x, ndc.y)),
            opacity: label.opacity,
            scale: label.scale,
        });
    }

    /// Labels that are currently visible.
    pub fn visible_labels(&self) -> impl Iterator<Item = &LabelSprite> {
        self.labels.iter().filter(|l| l.opacity > 0.0)
    }
}

/// World point the label would be anchored at, for callers that place their own sprites.
pub fn label_anchor(transform: &Transform, label: &Label) -> Vec3 {
    transform.to_matrix().transform_point3(label.offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CameraPose;

    #[test]
    fn pixel_ndc_round_trip() {
        let vp = Viewport::new(800, 600);
        let px = Vec2::new(200.0, 450.0);
        let back = vp.ndc_to_pixel(vp.pixel_to_ndc(px));
        assert!((back - px).length() < 1e-3);
        assert_eq!(vp.pixel_to_ndc(Vec2::new(400.0, 300.0)), Vec2::ZERO);
    }

    #[test]
    fn label_in_front_of_camera_is_queued() {
        let camera = Camera::new(CameraPose::new(Vec3::new(0.0, 12.0, 18.0), Vec3::ZERO));
        let mut frame = FrameData::new(&camera, Viewport::default());
        let t = Transform::from_position_yaw_scale(Vec3::ZERO, 0.0, 0.25);
        let label = Label::new("1", Vec3::new(0.0, 1.2, 0.0));
        frame.push_label(&camera, &t, &label);
        frame.push_instance(&t, [0.0, 1.0, 1.0, 1.0]);
        assert_eq!(frame.labels.len(), 1);
        assert_eq!(frame.instances.len(), 1);
        assert_eq!(frame.visible_labels().count(), 1);
        let anchor = label_anchor(&t, &label);
        assert!((anchor.y - 0.3).abs() < 1e-6);
    }

    #[test]
    fn label_behind_camera_is_dropped() {
        let camera = Camera::new(CameraPose::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0)));
        let mut frame = FrameData::new(&camera, Viewport::default());
        let t = Transform::from_position(Vec3::new(0.0, 0.0, 5.0));
        frame.push_label(&camera, &t, &Label::new("2", Vec3::ZERO));
        assert!(frame.labels.is_empty());
    }
}
