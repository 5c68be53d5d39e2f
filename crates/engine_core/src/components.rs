//! Common ECS components used across the scene.

use glam::Vec3;

use crate::Transform;

/// Idle "hover" motion: a vertical bob plus a steady spin around +Y.
///
/// The pose is a pure function of elapsed time so it never drifts and a
/// restarted scene resumes exactly where the clock says it should be.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdleMotion {
    /// Rest position the bob oscillates around.
    pub base: Vec3,
    /// Bob amplitude in world units.
    pub amplitude: f32,
    /// Bob angular rate in radians per second.
    pub bob_rate: f32,
    /// Spin rate in radians per second.
    pub spin_rate: f32,
    /// Uniform scale applied to the sampled transform.
    pub scale: f32,
}

impl IdleMotion {
    pub fn new(base: Vec3, amplitude: f32, bob_rate: f32, spin_rate: f32, scale: f32) -> Self {
        Self {
            base,
            amplitude,
            bob_rate,
            spin_rate,
            scale,
        }
    }

    /// Sample the transform at `elapsed` seconds.
    ///
    /// Phases are taken in f64 so long-running clocks keep sub-frame precision.
    pub fn sample(&self, elapsed: f64) -> Transform {
        let bob = (elapsed * self.bob_rate as f64).sin() as f32;
        let position = Vec3::new(self.base.x, self.base.y + self.amplitude * bob, self.base.z);
        let yaw = (elapsed * self.spin_rate as f64).rem_euclid(std::f64::consts::TAU) as f32;
        Transform::from_position_yaw_scale(position, yaw, self.scale)
    }
}

/// Sphere used for pointer picking, in local units (scaled by the transform).
#[derive(Debug, Clone, Copy)]
pub struct Pickable {
    pub radius: f32,
}

impl Pickable {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    /// World-space radius under `transform`.
    pub fn world_radius(&self, transform: &Transform) -> f32 {
        self.radius * transform.max_scale()
    }
}

/// Floating screen label attached to an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    /// Offset above the entity origin in local units.
    pub offset: Vec3,
    pub opacity: f32,
    pub scale: f32,
}

impl Label {
    pub fn new(text: impl Into<String>, offset: Vec3) -> Self {
        Self {
            text: text.into(),
            offset,
            opacity: 1.0,
            scale: 1.0,
        }
    }

    /// Fade the label out (suppressed) or restore it.
    pub fn set_suppressed(&mut self, suppressed: bool) {
        if suppressed {
            self.opacity = 0.0;
            self.scale = 0.75;
        } else {
            self.opacity = 1.0;
            self.scale = 1.0;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_motion_is_periodic_and_bounded() {
        let m = IdleMotion::new(Vec3::new(2.5, 0.2, -2.0), 0.05, 2.0, 0.6, 0.25);
        for i in 0..500 {
            let t = i as f64 * 0.37;
            let p = m.sample(t).position;
            assert!((p.y - 0.2).abs() <= 0.05 + 1e-6);
            assert_eq!(p.x, 2.5);
            assert_eq!(p.z, -2.0);
        }
        let period = std::f64::consts::TAU / 2.0;
        let a = m.sample(1.0).position.y;
        let b = m.sample(1.0 + period).position.y;
        assert!((a - b).abs() < 1e-4);
    }

    #[test]
    fn idle_motion_same_time_same_pose() {
        let m = IdleMotion::new(Vec3::ZERO, 0.05, 2.0, 0.6, 0.25);
        assert_eq!(m.sample(12.5), m.sample(12.5));
        assert_eq!(m.sample(0.0).position, Vec3::ZERO);
    }

    #[test]
    fn idle_motion_stays_smooth_after_hours() {
        let m = IdleMotion::new(Vec3::ZERO, 0.05, 2.0, 0.6, 0.25);
        let start = 10.0 * 3600.0;
        for k in 0..60 {
            let t = start + k as f64 / 60.0;
            let expected = 0.05 * (t * 2.0).sin() as f32;
            assert!((m.sample(t).position.y - expected).abs() < 1e-6, "frame {k}");
        }
    }

    #[test]
    fn pickable_radius_scales() {
        let p = Pickable::new(0.5);
        let t = Transform::from_position_yaw_scale(Vec3::ZERO, 0.0, 0.25);
        assert!((p.world_radius(&t) - 0.125).abs() < 1e-6);
    }

    #[test]
    fn label_suppression_toggles() {
        let mut l = Label::new("1", Vec3::Y);
        l.set_suppressed(true);
        assert!(!l.is_visible());
        assert_eq!(l.scale, 0.75);
        l.set_suppressed(false);
        assert!(l.is_visible());
        assert_eq!(l.scale, 1.0);
    }
}
