use crate::engine::{Annulus, Binding, Bindings, Engine, PointerEvent};
use crate::layout::{DIAMETER, WheelLayout};
use crate::rotation::{AnimationSettings, GroupId, Groups, RotationSurface, Steps};
use std::time::Duration;
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};

/// The rotation groups of the wheel. Marker rings ride on the outer group
/// and the figure pieces on the inner group; the renderer composes the two
/// angles, groups themselves are stored flat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Ring {
    Outer,
    Dissonance,
    Consonance,
    Inner,
    InnerConsonance,
    InnerDissonance,
}

impl Ring {
    pub fn parent(self) -> Option<Ring> {
        match self {
            Self::Dissonance | Self::Consonance => Some(Self::Outer),
            Self::InnerConsonance | Self::InnerDissonance => Some(Self::Inner),
            Self::Outer | Self::Inner => None,
        }
    }
}

/// A circle of fifths wheel: static layout, its rotation groups and the
/// gesture engine driving them.
#[derive(Debug, Clone)]
pub struct Diagram {
    layout: WheelLayout,
    groups: Groups,
    ids: Vec<GroupId>,
    engine: Engine,
}

impl Diagram {
    pub fn new(ring_thickness: f64, animation: AnimationSettings) -> Self {
        let layout = WheelLayout::new(DIAMETER, ring_thickness);
        let mut groups = Groups::new(animation);
        let ids: Vec<GroupId> = Ring::iter()
            .map(|ring| groups.create_group(ring.as_ref()))
            .collect();

        let bind = |ring: Ring, steps| Binding::new(ids[ring as usize], steps);
        let bindings = Bindings {
            primary: vec![bind(Ring::Outer, Steps::NOTES), bind(Ring::Inner, Steps::NOTES)],
            alternate: vec![
                bind(Ring::Consonance, Steps::QUARTERS),
                bind(Ring::InnerConsonance, Steps::QUARTERS),
            ],
        };
        let engine = Engine::new(DIAMETER, Annulus::from(&layout.ring), bindings);

        Self {
            layout,
            groups,
            ids,
            engine,
        }
    }

    pub fn layout(&self) -> &WheelLayout {
        &self.layout
    }

    pub fn groups(&self) -> &Groups {
        &self.groups
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn group(&self, ring: Ring) -> GroupId {
        self.ids[ring as usize]
    }

    pub fn rotation(&self, ring: Ring) -> f64 {
        self.groups.rotation(self.group(ring))
    }

    /// Angle the ring is drawn at, including its parent's rotation.
    pub fn effective_rotation(&self, ring: Ring) -> f64 {
        ring.parent().map_or(0.0, |p| self.rotation(p)) + self.rotation(ring)
    }

    pub fn pointer_down(&mut self, event: &PointerEvent) -> bool {
        self.engine.pointer_down(event, &mut self.groups)
    }

    pub fn pointer_move(&mut self, event: &PointerEvent) {
        self.engine.pointer_move(event, &mut self.groups);
    }

    pub fn pointer_up(&mut self) {
        self.engine.pointer_up(&mut self.groups);
    }

    pub fn is_animating(&self) -> bool {
        self.groups.is_animating()
    }

    pub fn tick(&mut self, dt: Duration) -> bool {
        self.groups.tick(dt)
    }

    /// Applies new settings without touching the current rotations.
    pub fn reconfigure(&mut self, ring_thickness: f64, animation: AnimationSettings) {
        self.layout = WheelLayout::new(DIAMETER, ring_thickness);
        self.engine.set_annulus(Annulus::from(&self.layout.ring));
        self.groups.set_animation_settings(animation);
    }
}

impl Default for Diagram {
    fn default() -> Self {
        Self::new(crate::layout::RING_THICKNESS, AnimationSettings::default())
    }
}
