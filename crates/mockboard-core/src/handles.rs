//! Resize and rotation handles around an element.

use kurbo::{Point, Rect};
use std::fmt;
use std::str::FromStr;

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Short code used by the handle's CSS class (`tl`, `tr`, `bl`, `br`).
    pub fn code(self) -> &'static str {
        match self {
            Corner::TopLeft => "tl",
            Corner::TopRight => "tr",
            Corner::BottomLeft => "bl",
            Corner::BottomRight => "br",
        }
    }

    /// Whether dragging this corner moves the left edge.
    pub fn moves_left(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    /// Whether dragging this corner moves the top edge.
    pub fn moves_top(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }

    /// The diagonally opposite corner.
    pub fn opposite(self) -> Corner {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomLeft => Corner::TopRight,
            Corner::BottomRight => Corner::TopLeft,
        }
    }

    /// Position of this corner on a rect.
    pub fn point_on(self, rect: Rect) -> Point {
        let x = if self.moves_left() { rect.x0 } else { rect.x1 };
        let y = if self.moves_top() { rect.y0 } else { rect.y1 };
        Point::new(x, y)
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Corner {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tl" | "top-left" => Ok(Corner::TopLeft),
            "tr" | "top-right" => Ok(Corner::TopRight),
            "bl" | "bottom-left" => Ok(Corner::BottomLeft),
            "br" | "bottom-right" => Ok(Corner::BottomRight),
            other => Err(format!("unknown corner: {other}")),
        }
    }
}

/// Type of handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    /// Corner resize handle.
    Corner(Corner),
    /// Rotation handle above the top edge.
    Rotate,
}

/// A handle with its position in canvas coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Handle {
    pub position: Point,
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a point hits this handle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= tolerance * tolerance
    }
}

/// Rotate `(dx, dy)` about `center` by `degrees` clockwise (screen coordinates).
pub fn rotate_about(center: Point, dx: f64, dy: f64, degrees: f64) -> Point {
    let (sin_r, cos_r) = degrees.to_radians().sin_cos();
    Point::new(
        center.x + dx * cos_r - dy * sin_r,
        center.y + dx * sin_r + dy * cos_r,
    )
}

/// Corner handles plus the rotation handle for a frame rotated by `rotation` degrees.
pub fn handles_for(frame: Rect, rotation: f64, rotate_offset: f64) -> Vec<Handle> {
    let center = frame.center();
    let half_w = frame.width() / 2.0;
    let half_h = frame.height() / 2.0;

    let mut handles: Vec<Handle> = Corner::ALL
        .into_iter()
        .map(|corner| {
            let dx = if corner.moves_left() { -half_w } else { half_w };
            let dy = if corner.moves_top() { -half_h } else { half_h };
            Handle::new(rotate_about(center, dx, dy, rotation), HandleKind::Corner(corner))
        })
        .collect();
    handles.push(Handle::new(
        rotate_about(center, 0.0, -half_h - rotate_offset, rotation),
        HandleKind::Rotate,
    ));
    handles
}

/// Find which handle (if any) is hit at the given point.
pub fn hit_test_handles(
    frame: Rect,
    rotation: f64,
    rotate_offset: f64,
    point: Point,
    tolerance: f64,
) -> Option<HandleKind> {
    handles_for(frame, rotation, rotate_offset)
        .into_iter()
        .find(|h| h.hit_test(point, tolerance))
        .map(|h| h.kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn test_unrotated_handles() {
        let frame = Rect::new(100.0, 100.0, 400.0, 300.0);
        let handles = handles_for(frame, 0.0, 25.0);
        assert_eq!(handles.len(), 5);
        assert!(close(handles[0].position, Point::new(100.0, 100.0)));
        assert!(close(handles[3].position, Point::new(400.0, 300.0)));
        assert_eq!(handles[4].kind, HandleKind::Rotate);
        assert!(close(handles[4].position, Point::new(250.0, 75.0)));
    }

    #[test]
    fn test_rotated_handle_follows_rotation() {
        let frame = Rect::new(0.0, 0.0, 100.0, 100.0);
        // 90° clockwise: the rotate handle moves to the right of the center
        let handles = handles_for(frame, 90.0, 25.0);
        assert!(close(handles[4].position, Point::new(125.0, 50.0)));
    }

    #[test]
    fn test_hit_test_handles() {
        let frame = Rect::new(100.0, 100.0, 400.0, 300.0);
        assert_eq!(
            hit_test_handles(frame, 0.0, 25.0, Point::new(398.0, 303.0), 8.0),
            Some(HandleKind::Corner(Corner::BottomRight))
        );
        assert_eq!(
            hit_test_handles(frame, 0.0, 25.0, Point::new(250.0, 77.0), 8.0),
            Some(HandleKind::Rotate)
        );
        assert_eq!(hit_test_handles(frame, 0.0, 25.0, Point::new(250.0, 200.0), 8.0), None);
    }

    #[test]
    fn test_opposite_corners() {
        for corner in Corner::ALL {
            assert_eq!(corner.opposite().opposite(), corner);
            assert_ne!(corner.opposite().moves_left(), corner.moves_left());
            assert_ne!(corner.opposite().moves_top(), corner.moves_top());
        }
    }

    #[test]
    fn test_corner_codes() {
        for corner in Corner::ALL {
            assert_eq!(corner.code().parse::<Corner>(), Ok(corner));
        }
        assert!("middle".parse::<Corner>().is_err());
    }
}
