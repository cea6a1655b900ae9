//! Geometry and drag-to-rotate interaction for a circle of fifths wheel.
//!
//! Nothing in here draws. The application supplies a drawing surface and
//! feeds pointer events into a [`Diagram`].

pub mod diagram;
pub mod engine;
pub mod geometry;
pub mod layout;
pub mod rotation;

pub use diagram::{Diagram, Ring};
pub use engine::{DragState, Engine, PointerEvent};
pub use geometry::{Bounds, Point};
pub use rotation::{AnimationSettings, Easing, GroupId, RotationSurface, Steps};
