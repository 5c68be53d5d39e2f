//! Clickable markers, one per registry entry, living in the ECS world.

use engine_core::{IdleMotion, Label, Pickable, Transform};
use glam::Vec3;
use hecs::{Entity, World};

use crate::registry::LocationRegistry;

/// Uniform marker scale.
pub const MARKER_SCALE: f32 = 0.25;
/// Marker sphere radius before scaling.
pub const MARKER_RADIUS: f32 = 0.5;
const BOB_AMPLITUDE: f32 = 0.05;
const BOB_RATE: f32 = 2.0;
/// 0.01 rad per frame at 60 Hz.
const SPIN_RATE: f32 = 0.6;
/// Label height above the marker, in local units.
const LABEL_OFFSET: Vec3 = Vec3::new(0.0, 1.2, 0.0);
/// Base marker tint (cyan).
pub const MARKER_COLOR: [f32; 4] = [0.0, 1.0, 1.0, 1.0];

/// Marker component: which registry entry the entity stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub entry_index: usize,
    pub entry_id: String,
}

/// Selection intent emitted when a marker is activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerActivated {
    pub entry_id: String,
}

impl Marker {
    /// Emit the marker's entry id to its owner. No state changes here.
    pub fn on_activate(&self) -> MarkerActivated {
        MarkerActivated {
            entry_id: self.entry_id.clone(),
        }
    }
}

/// Spawn one marker entity per registry entry, numbered from 1.
pub fn spawn_markers(world: &mut World, registry: &LocationRegistry) -> Vec<Entity> {
    registry
        .list_all()
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let motion = IdleMotion::new(entry.position(), BOB_AMPLITUDE, BOB_RATE, SPIN_RATE, MARKER_SCALE);
            world.spawn((
                motion.sample(0.0),
                motion,
                Marker {
                    entry_index: index,
                    entry_id: entry.id.clone(),
                },
                Pickable::new(MARKER_RADIUS),
                Label::new((index + 1).to_string(), LABEL_OFFSET),
            ))
        })
        .collect()
}

/// Pose every marker for `elapsed` seconds and fade the selected one's label.
pub fn update_markers(world: &mut World, elapsed: f64, selected: Option<usize>) {
    for (_, (transform, motion, marker, label)) in
        world.query_mut::<(&mut Transform, &IdleMotion, &Marker, &mut Label)>()
    {
        *transform = motion.sample(elapsed);
        label.set_suppressed(selected == Some(marker.entry_index));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::test_entry;

    fn two_markers() -> (World, Vec<Entity>) {
        let registry =
            LocationRegistry::new(vec![test_entry("a", [0.0, 0.0, 0.0]), test_entry("b", [1.0, 0.0, 0.0])]).unwrap();
        let mut world = World::new();
        let entities = spawn_markers(&mut world, &registry);
        (world, entities)
    }

    #[test]
    fn spawns_numbered_markers() {
        let (world, entities) = two_markers();
        assert_eq!(entities.len(), 2);
        let label = world.get::<&Label>(entities[1]).unwrap();
        assert_eq!(label.text, "2");
        let marker = world.get::<&Marker>(entities[0]).unwrap();
        assert_eq!(marker.on_activate(), MarkerActivated { entry_id: "a".to_string() });
    }

    #[test]
    fn update_animates_without_drift() {
        let (mut world, entities) = two_markers();
        update_markers(&mut world, 0.75, None);
        let first = *world.get::<&Transform>(entities[0]).unwrap();
        for i in 0..1000 {
            update_markers(&mut world, i as f64 * 0.016, None);
        }
        update_markers(&mut world, 0.75, None);
        let again = *world.get::<&Transform>(entities[0]).unwrap();
        assert_eq!(first, again);
        assert!((first.position.y - 0.05 * 1.5f64.sin() as f32).abs() < 1e-6);
    }

    #[test]
    fn selected_label_is_suppressed() {
        let (mut world, entities) = two_markers();
        update_markers(&mut world, 0.0, Some(1));
        assert!(world.get::<&Label>(entities[0]).unwrap().is_visible());
        assert!(!world.get::<&Label>(entities[1]).unwrap().is_visible());
        update_markers(&mut world, 0.0, None);
        assert!(world.get::<&Label>(entities[1]).unwrap().is_visible());
    }
}
