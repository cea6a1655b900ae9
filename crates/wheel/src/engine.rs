use crate::geometry::{Bounds, Point, to_local};
use crate::layout::RingGeometry;
use crate::rotation::{GroupId, RotationSurface, Steps};

/// Ring shaped region where a drag may start. Both edges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Annulus {
    pub radius: f64,
    pub thickness: f64,
}

impl Annulus {
    pub fn new(radius: f64, thickness: f64) -> Self {
        Self { radius, thickness }
    }

    pub fn contains(&self, point: Point) -> bool {
        let dist = point.distance_from_origin();
        dist >= self.radius - self.thickness && dist <= self.radius
    }
}

impl From<&RingGeometry> for Annulus {
    fn from(ring: &RingGeometry) -> Self {
        Self::new(ring.radius, ring.thickness)
    }
}

/// A group engaged by a gesture together with the resting orientations it
/// snaps to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binding {
    pub group: GroupId,
    pub steps: Steps,
}

impl Binding {
    pub fn new(group: GroupId, steps: Steps) -> Self {
        Self { group, steps }
    }
}

/// Which groups a press engages, depending on whether the alternate
/// modifier was held.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    pub primary: Vec<Binding>,
    pub alternate: Vec<Binding>,
}

impl Bindings {
    pub fn select(&self, alternate: bool) -> &[Binding] {
        if alternate {
            &self.alternate
        } else {
            &self.primary
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerEvent {
    /// Pointer position in widget pixels.
    pub client: Point,
    /// Where the diagram is drawn inside the widget.
    pub bounds: Bounds,
    pub alternate: bool,
}

impl PointerEvent {
    pub fn new(client: Point, bounds: Bounds, alternate: bool) -> Self {
        Self {
            client,
            bounds,
            alternate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        last: Point,
        engaged: Vec<Binding>,
    },
}

/// Signed angle swept from `last` to `current` around the origin, in degrees.
/// Positive is clockwise on a y-down surface. Non-finite results become 0.
pub fn angle_delta(last: Point, current: Point) -> f64 {
    let delta = (current.angle() - last.angle()).to_degrees();
    if delta.is_finite() { delta } else { 0.0 }
}

/// Pointer gesture state machine. Turns a press on the ring, a series of
/// moves and a release into live rotation followed by a snap animation.
///
/// The engine owns only the drag state; groups live in the
/// [`RotationSurface`] passed to each transition.
#[derive(Debug, Clone)]
pub struct Engine {
    diameter: f64,
    annulus: Annulus,
    bindings: Bindings,
    state: DragState,
}

impl Engine {
    pub fn new(diameter: f64, annulus: Annulus, bindings: Bindings) -> Self {
        Self {
            diameter,
            annulus,
            bindings,
            state: DragState::Idle,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn annulus(&self) -> Annulus {
        self.annulus
    }

    pub fn set_annulus(&mut self, annulus: Annulus) {
        self.annulus = annulus;
    }

    pub fn local(&self, client: Point, bounds: Bounds) -> Point {
        to_local(client, bounds, self.diameter)
    }

    /// Starts a drag if the press lands on the annulus. Returns whether a
    /// drag is now in progress.
    ///
    /// A press arriving mid-drag first releases the running gesture so its
    /// groups still come to rest on a step.
    pub fn pointer_down<S: RotationSurface + ?Sized>(
        &mut self,
        event: &PointerEvent,
        surface: &mut S,
    ) -> bool {
        self.pointer_up(surface);

        let point = self.local(event.client, event.bounds);
        if !self.annulus.contains(point) {
            log::debug!("Press at ({:.1}, {:.1}) outside ring", point.x, point.y);
            return false;
        }

        let engaged = self.bindings.select(event.alternate).to_vec();
        log::debug!(
            "Drag started at ({:.1}, {:.1}), engaging {} group(s)",
            point.x,
            point.y,
            engaged.len()
        );
        self.state = DragState::Dragging {
            last: point,
            engaged,
        };
        true
    }

    /// Rotates every engaged group by the angle the pointer swept since the
    /// previous event. Ignored while idle.
    pub fn pointer_move<S: RotationSurface + ?Sized>(
        &mut self,
        event: &PointerEvent,
        surface: &mut S,
    ) {
        let current = self.local(event.client, event.bounds);
        let DragState::Dragging { last, engaged } = &mut self.state else {
            return;
        };
        if !current.distance_from_origin().is_finite() {
            return;
        }

        let delta = angle_delta(*last, current);
        for binding in engaged.iter() {
            let angle = surface.rotation(binding.group);
            surface.set_rotation(binding.group, angle + delta);
        }
        *last = current;
    }

    /// Ends the gesture, sending each engaged group to its nearest step.
    /// Leave and cancel events are handled the same way. Ignored while idle.
    pub fn pointer_up<S: RotationSurface + ?Sized>(&mut self, surface: &mut S) {
        let DragState::Dragging { engaged, .. } = std::mem::take(&mut self.state) else {
            return;
        };

        for binding in engaged {
            let angle = surface.rotation(binding.group);
            let target = binding.steps.snap(angle);
            log::debug!(
                "Snapping group {} from {:.2} to {} ({} steps)",
                binding.group,
                angle,
                target,
                binding.steps
            );
            surface.animate_rotation_to(binding.group, target);
        }
    }
}
