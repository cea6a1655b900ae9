/// A point in the diagram's logical plane. The origin is the wheel center and
/// `y` grows downwards, matching the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_from_origin(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Polar angle in radians, as returned by `atan2(y, x)`.
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

/// On-screen rectangle the diagram is drawn into, in widget pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Largest square centered inside a `width` x `height` area.
    pub fn centered_square(width: f64, height: f64) -> Self {
        let side = width.min(height);
        Self::new((width - side) / 2.0, (height - side) / 2.0, side, side)
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Maps a pointer position inside `bounds` to the logical plane of a diagram
/// `diameter` units wide, centered on the origin.
///
/// Degenerate bounds produce non-finite coordinates; callers treat those as
/// misses rather than errors.
pub fn to_local(client: Point, bounds: Bounds, diameter: f64) -> Point {
    let radius = diameter / 2.0;
    Point::new(
        (client.x - bounds.left) / bounds.width * diameter - radius,
        (client.y - bounds.top) / bounds.height * diameter - radius,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_local_maps_bounds_onto_diagram() {
        let bounds = Bounds::new(10.0, 20.0, 200.0, 200.0);

        assert_eq!(to_local(Point::new(110.0, 120.0), bounds, 100.0), Point::default());
        assert_eq!(
            to_local(Point::new(10.0, 20.0), bounds, 100.0),
            Point::new(-50.0, -50.0)
        );
        assert_eq!(
            to_local(Point::new(210.0, 120.0), bounds, 100.0),
            Point::new(50.0, 0.0)
        );
    }

    #[test]
    fn test_to_local_handles_non_square_bounds() {
        let bounds = Bounds::new(0.0, 0.0, 400.0, 100.0);
        let p = to_local(Point::new(300.0, 75.0), bounds, 100.0);
        assert_eq!(p, Point::new(25.0, 25.0));
    }

    #[test]
    fn test_to_local_with_empty_bounds_is_not_finite() {
        let p = to_local(Point::new(5.0, 5.0), Bounds::default(), 100.0);
        assert!(!p.distance_from_origin().is_finite());
    }

    #[test]
    fn test_centered_square() {
        let b = Bounds::centered_square(300.0, 100.0);
        assert_eq!(b, Bounds::new(100.0, 0.0, 100.0, 100.0));
        assert_eq!(b.center(), Point::new(150.0, 50.0));
    }
}
