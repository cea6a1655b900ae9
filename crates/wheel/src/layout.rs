use crate::geometry::Point;
use std::f64::consts::PI;
use strum::{Display, EnumIter};

pub const NOTE_COUNT: usize = 12;
pub const DIAMETER: f64 = 100.0; // logical units, the drawing surface scales to fit
pub const RING_THICKNESS: f64 = 20.0;
pub const TONIC: usize = 1;
pub const NOTES: [&str; NOTE_COUNT] = [
    "F", "C", "G", "D", "A", "E", "B", "F♯", "D♭", "A♭", "E♭", "B♭",
];

const NOTCH_INSET: f64 = 0.07;
const MARKER_SIZE_FACTOR: f64 = 0.375; // marker radius relative to ring thickness
const LABEL_SIZE_FACTOR: f64 = 0.32;
const FIGURE_RATIO: f64 = 2.0 / 3.0;
pub const FIGURE_STROKE_WIDTH: f64 = 0.5;

/// Angle of slot `index` out of `count`, in radians. Slot 0 sits at the
/// leftmost point and slots advance clockwise on a y-down surface.
pub fn angle(index: usize, count: usize) -> f64 {
    -PI + index as f64 * (2.0 * PI / count as f64)
}

pub fn angle_degrees(index: usize, count: usize) -> f64 {
    -180.0 + index as f64 * (360.0 / count as f64)
}

pub fn position(radius: f64, index: usize, count: usize) -> Point {
    let theta = angle(index, count);
    Point::new(radius * theta.cos(), radius * theta.sin())
}

/// Membership of the highlighted seven-plus-one tone subset.
pub fn in_scale(index: usize) -> bool {
    index < 7 || index == 9
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Tone {
    Consonant,
    Dissonant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub tone: Tone,
    pub tonic: bool,
}

impl Category {
    /// `None` for tones outside the scale.
    pub fn of(index: usize) -> Option<Self> {
        in_scale(index).then(|| Self {
            tone: if index % 3 == 0 {
                Tone::Dissonant
            } else {
                Tone::Consonant
            },
            tonic: index == TONIC,
        })
    }

    pub fn is_dissonant(&self) -> bool {
        self.tone == Tone::Dissonant
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub index: usize,
    pub point: Point,
    pub degrees: f64,
}

impl Position {
    pub fn new(radius: f64, index: usize, count: usize) -> Self {
        Self {
            index,
            point: position(radius, index, count),
            degrees: angle_degrees(index, count),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NoteSlot {
    pub label: &'static str,
    pub position: Position,
    /// Tick from the label point towards the center.
    pub notch: (Point, Point),
    pub category: Option<Category>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub radius: f64,
    pub thickness: f64,
    pub label_radius: f64,
    pub label_size: f64,
    pub marker_radius: f64,
    /// Ring thickness relative to the diagram diameter. Tonic outline widths
    /// are expressed in this unit.
    pub stroke_ratio: f64,
}

impl RingGeometry {
    pub fn new(diameter: f64, thickness: f64) -> Self {
        let radius = diameter / 2.0;
        Self {
            radius,
            thickness,
            label_radius: radius - thickness / 2.0,
            label_size: LABEL_SIZE_FACTOR * thickness,
            marker_radius: MARKER_SIZE_FACTOR * thickness,
            stroke_ratio: thickness / diameter,
        }
    }

    pub fn inner_radius(&self) -> f64 {
        self.radius - self.thickness
    }

    pub fn tonic_stroke_width(&self) -> f64 {
        0.9 * self.stroke_ratio
    }

    pub fn tonic_dash(&self) -> f64 {
        5.9 * self.stroke_ratio
    }
}

/// Figure drawn inside the ring. The diamond joins the dissonant slots, the
/// disc and triangles make up the consonant part.
#[derive(Debug, Clone, PartialEq)]
pub struct InnerFigure {
    pub radius: f64,
    pub small_radius: f64,
    pub disc_radius: f64,
    pub diamond: [Point; 4],
    pub triangles: [[Point; 3]; 2],
}

impl InnerFigure {
    pub fn new(radius: f64) -> Self {
        let small = FIGURE_RATIO * radius;
        let w = FIGURE_STROKE_WIDTH;
        let at = |i| position(small, i, NOTE_COUNT);

        Self {
            radius,
            small_radius: small,
            disc_radius: radius - (radius - small) * FIGURE_RATIO,
            diamond: [at(0), at(3), at(6), at(9)],
            triangles: [
                [Point::new(0.0, small - w / 2.0), at(1), at(5)],
                [Point::new(0.0, small - 3.0 * w / 2.0), at(2), at(4)],
            ],
        }
    }
}

/// Static geometry of the whole wheel in logical units.
#[derive(Debug, Clone)]
pub struct WheelLayout {
    pub diameter: f64,
    pub ring: RingGeometry,
    pub notes: Vec<NoteSlot>,
    pub inner: InnerFigure,
}

impl WheelLayout {
    pub fn new(diameter: f64, thickness: f64) -> Self {
        let ring = RingGeometry::new(diameter, thickness);
        let extension = 1.0 - ring.stroke_ratio - NOTCH_INSET;

        let notes = NOTES
            .iter()
            .enumerate()
            .map(|(i, &label)| {
                let position = Position::new(ring.label_radius, i, NOTE_COUNT);
                NoteSlot {
                    label,
                    position,
                    notch: (position.point, position.point.scale(extension)),
                    category: Category::of(i),
                }
            })
            .collect();

        Self {
            diameter,
            ring,
            notes,
            inner: InnerFigure::new(ring.inner_radius()),
        }
    }

    pub fn markers(&self, tone: Tone) -> impl Iterator<Item = (&NoteSlot, Category)> {
        self.notes.iter().filter_map(move |slot| {
            slot.category
                .filter(|c| c.tone == tone)
                .map(|c| (slot, c))
        })
    }
}

impl Default for WheelLayout {
    fn default() -> Self {
        Self::new(DIAMETER, RING_THICKNESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_positions_lie_on_radius() {
        for count in 1..=24 {
            for i in 0..count {
                let p = position(7.5, i, count);
                assert!(close(p.distance_from_origin(), 7.5), "{i}/{count}");
            }
        }
    }

    #[test]
    fn test_first_position_is_leftmost() {
        for count in 1..=24 {
            let p = position(40.0, 0, count);
            assert!(close(p.x, -40.0) && close(p.y, 0.0));
        }
    }

    #[test]
    fn test_positions_advance_clockwise() {
        // y grows downwards, so a quarter turn from the left lands at the top.
        let p = position(10.0, 3, 12);
        assert!(close(p.x, 0.0) && close(p.y, -10.0));
        assert!(close(angle_degrees(3, 12), -90.0));
        assert!(close(Position::new(10.0, 6, 12).degrees, 0.0));
    }

    #[test]
    fn test_categories() {
        for i in [0, 3, 6, 9] {
            assert_eq!(Category::of(i).map(|c| c.tone), Some(Tone::Dissonant));
        }
        for i in [1, 2, 4, 5] {
            assert_eq!(Category::of(i).map(|c| c.tone), Some(Tone::Consonant));
        }
        for i in [7, 8, 10, 11] {
            assert_eq!(Category::of(i), None);
        }
        let tonics: Vec<_> = (0..NOTE_COUNT)
            .filter(|&i| Category::of(i).is_some_and(|c| c.tonic))
            .collect();
        assert_eq!(tonics, vec![1]);
    }

    #[test]
    fn test_categories_are_deterministic() {
        for i in 0..NOTE_COUNT {
            assert_eq!(Category::of(i), Category::of(i));
        }
    }

    #[test]
    fn test_default_layout_dimensions() {
        let layout = WheelLayout::default();
        assert!(close(layout.ring.radius, 50.0));
        assert!(close(layout.ring.label_radius, 40.0));
        assert!(close(layout.ring.marker_radius, 7.5));
        assert!(close(layout.inner.radius, 30.0));
        assert!(close(layout.inner.small_radius, 20.0));
        assert!(close(layout.inner.disc_radius, 30.0 - 10.0 * 2.0 / 3.0));
        assert_eq!(layout.notes.len(), NOTE_COUNT);
        assert_eq!(layout.notes[7].label, "F♯");
    }

    #[test]
    fn test_notches_point_inwards() {
        let layout = WheelLayout::default();
        for slot in &layout.notes {
            let (outer, inner) = slot.notch;
            assert!(close(outer.distance_from_origin(), 40.0));
            assert!(close(inner.distance_from_origin(), 40.0 * 0.73));
        }
    }

    #[test]
    fn test_diamond_joins_dissonant_slots() {
        let figure = WheelLayout::default().inner;
        for p in figure.diamond {
            assert!(close(p.distance_from_origin(), figure.small_radius));
        }
        assert!(close(figure.diamond[1].x, 0.0) && close(figure.diamond[1].y, -20.0));
    }

    #[test]
    fn test_markers_split_by_tone() {
        let layout = WheelLayout::default();
        let dissonant: Vec<_> = layout
            .markers(Tone::Dissonant)
            .map(|(s, _)| s.position.index)
            .collect();
        let consonant: Vec<_> = layout
            .markers(Tone::Consonant)
            .map(|(s, _)| s.position.index)
            .collect();
        assert_eq!(dissonant, vec![0, 3, 6, 9]);
        assert_eq!(consonant, vec![1, 2, 4, 5]);
    }
}
