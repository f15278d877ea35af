//! Drag, resize and rotate gestures.
//!
//! A gesture lives from pointer-down to pointer-up. While active it only
//! computes the geometry to display; the editor writes that onto the
//! visual node and syncs the record on release.

use crate::element::ElementId;
use crate::handles::{Corner, rotate_about};
use kurbo::{Point, Rect, Vec2};

/// What a gesture does to its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Drag,
    Resize(Corner),
    Rotate,
}

/// Geometry produced by one pointer move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureFrame {
    pub frame: Rect,
    pub rotation: f64,
}

/// Limits applied while a gesture runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureLimits {
    pub min_size: f64,
    pub rotation_snap: f64,
}

/// State of an active gesture.
#[derive(Debug, Clone)]
pub struct Gesture {
    pub element_id: ElementId,
    pub kind: GestureKind,
    /// Pointer position at pointer-down.
    pub start_pointer: Point,
    /// Latest pointer position.
    pub current_pointer: Point,
    /// Element frame at pointer-down.
    pub start_frame: Rect,
    /// Element rotation at pointer-down.
    pub start_rotation: f64,
}

impl Gesture {
    pub fn begin(
        element_id: ElementId,
        kind: GestureKind,
        start_pointer: Point,
        start_frame: Rect,
        start_rotation: f64,
    ) -> Self {
        Self {
            element_id,
            kind,
            start_pointer,
            current_pointer: start_pointer,
            start_frame,
            start_rotation,
        }
    }

    /// Pointer travel since pointer-down.
    pub fn delta(&self) -> Vec2 {
        self.current_pointer - self.start_pointer
    }

    /// Record a pointer move and compute the geometry to display.
    pub fn update(&mut self, pointer: Point, snap: bool, limits: GestureLimits) -> GestureFrame {
        self.current_pointer = pointer;
        let delta = self.delta();
        match self.kind {
            GestureKind::Drag => GestureFrame {
                frame: translate(self.start_frame, delta),
                rotation: self.start_rotation,
            },
            GestureKind::Resize(corner) => GestureFrame {
                frame: resize_rotated(
                    self.start_frame,
                    corner,
                    delta,
                    self.start_rotation,
                    limits.min_size,
                ),
                rotation: self.start_rotation,
            },
            GestureKind::Rotate => {
                let mut angle = rotation_angle(self.start_frame.center(), pointer);
                if snap {
                    angle = snap_angle(angle, limits.rotation_snap);
                }
                GestureFrame {
                    frame: self.start_frame,
                    rotation: angle,
                }
            }
        }
    }
}

/// Move a frame by a delta.
pub fn translate(frame: Rect, delta: Vec2) -> Rect {
    frame + delta
}

/// Resize from a corner, keeping the opposite edges fixed.
///
/// Width and height never drop below `min_size`.
pub fn resize(frame: Rect, corner: Corner, delta: Vec2, min_size: f64) -> Rect {
    let width = if corner.moves_left() {
        frame.width() - delta.x
    } else {
        frame.width() + delta.x
    }
    .max(min_size);
    let height = if corner.moves_top() {
        frame.height() - delta.y
    } else {
        frame.height() + delta.y
    }
    .max(min_size);

    let x0 = if corner.moves_left() { frame.x1 - width } else { frame.x0 };
    let y0 = if corner.moves_top() { frame.y1 - height } else { frame.y0 };
    Rect::new(x0, y0, x0 + width, y0 + height)
}

/// Resize a frame drawn rotated by `rotation` degrees about its center.
///
/// The canvas delta is taken into the frame's own axes, and the result is
/// shifted so the corner opposite `corner` stays where it was on screen.
pub fn resize_rotated(
    frame: Rect,
    corner: Corner,
    delta: Vec2,
    rotation: f64,
    min_size: f64,
) -> Rect {
    let local = rotate_about(Point::ZERO, delta.x, delta.y, -rotation).to_vec2();
    let resized = resize(frame, corner, local, min_size);

    let anchor = corner.opposite();
    let on_screen = |rect: Rect| {
        let center = rect.center();
        let p = anchor.point_on(rect);
        rotate_about(center, p.x - center.x, p.y - center.y, rotation)
    };
    resized + (on_screen(frame) - on_screen(resized))
}

/// Clockwise angle in degrees of the pointer around `center`.
///
/// Offset by 90° so a pointer straight above the center reads as 0.
/// Normalized into `[0, 360)`.
pub fn rotation_angle(center: Point, pointer: Point) -> f64 {
    let dx = pointer.x - center.x;
    let dy = pointer.y - center.y;
    normalize_degrees(dy.atan2(dx).to_degrees() + 90.0)
}

/// Round an angle to the nearest multiple of `step` degrees.
pub fn snap_angle(angle: f64, step: f64) -> f64 {
    normalize_degrees((angle / step).round() * step)
}

/// Wrap an angle into `[0, 360)`.
pub fn normalize_degrees(angle: f64) -> f64 {
    let normalized = angle.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if normalized >= 360.0 { 0.0 } else { normalized }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMITS: GestureLimits = GestureLimits {
        min_size: 40.0,
        rotation_snap: 15.0,
    };

    fn frame() -> Rect {
        Rect::new(100.0, 100.0, 400.0, 300.0)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_drag_translates() {
        let mut g = Gesture::begin(
            ElementId::from("a"),
            GestureKind::Drag,
            Point::new(150.0, 150.0),
            frame(),
            0.0,
        );
        let out = g.update(Point::new(170.0, 140.0), false, LIMITS);
        assert_eq!(out.frame, Rect::new(120.0, 90.0, 420.0, 290.0));
        // Deltas are always measured from the start, not the last move
        let out = g.update(Point::new(150.0, 150.0), false, LIMITS);
        assert_eq!(out.frame, frame());
    }

    #[test]
    fn test_resize_bottom_right() {
        let out = resize(frame(), Corner::BottomRight, Vec2::new(50.0, -20.0), 40.0);
        assert_eq!(out, Rect::new(100.0, 100.0, 450.0, 280.0));
    }

    #[test]
    fn test_resize_top_left_keeps_opposite_edges() {
        let out = resize(frame(), Corner::TopLeft, Vec2::new(30.0, 10.0), 40.0);
        assert_eq!(out, Rect::new(130.0, 110.0, 400.0, 300.0));
    }

    #[test]
    fn test_resize_clamps_to_minimum() {
        let out = resize(frame(), Corner::BottomRight, Vec2::new(-1000.0, -1000.0), 40.0);
        assert!(approx(out.width(), 40.0));
        assert!(approx(out.height(), 40.0));
        assert_eq!(out.origin(), Point::new(100.0, 100.0));

        let out = resize(frame(), Corner::TopLeft, Vec2::new(1000.0, 1000.0), 40.0);
        assert!(approx(out.width(), 40.0));
        assert!(approx(out.height(), 40.0));
        assert!(approx(out.x1, 400.0));
        assert!(approx(out.y1, 300.0));
    }

    fn close(a: Point, b: Point) -> bool {
        approx(a.x, b.x) && approx(a.y, b.y)
    }

    fn screen_corner(rect: Rect, corner: Corner, rotation: f64) -> Point {
        let center = rect.center();
        let p = corner.point_on(rect);
        rotate_about(center, p.x - center.x, p.y - center.y, rotation)
    }

    #[test]
    fn test_resize_rotated_unrotated_matches_plain() {
        let delta = Vec2::new(30.0, 10.0);
        let out = resize_rotated(frame(), Corner::TopLeft, delta, 0.0, 40.0);
        assert_eq!(out, resize(frame(), Corner::TopLeft, delta, 40.0));
    }

    #[test]
    fn test_resize_half_turn_grows_outward() {
        // At 180° the bottom-right corner is drawn at the top-left (100, 100)
        let delta = Vec2::new(-50.0, -50.0);
        let out = resize_rotated(frame(), Corner::BottomRight, delta, 180.0, 40.0);
        assert!(approx(out.width(), 350.0));
        assert!(approx(out.height(), 250.0));
        assert!(close(screen_corner(out, Corner::TopLeft, 180.0), Point::new(400.0, 300.0)));
        assert!(close(screen_corner(out, Corner::BottomRight, 180.0), Point::new(50.0, 50.0)));
    }

    #[test]
    fn test_resize_quarter_turn_keeps_anchor() {
        // At 90° the bottom-left corner is drawn at (150, 50)
        let before = screen_corner(frame(), Corner::TopRight, 90.0);
        let out = resize_rotated(frame(), Corner::BottomLeft, Vec2::new(-20.0, -20.0), 90.0, 40.0);
        assert!(approx(out.width(), 320.0));
        assert!(approx(out.height(), 220.0));
        assert!(close(screen_corner(out, Corner::TopRight, 90.0), before));
        assert!(close(screen_corner(out, Corner::BottomLeft, 90.0), Point::new(130.0, 30.0)));
    }

    #[test]
    fn test_rotation_angle_offset() {
        let center = Point::new(0.0, 0.0);
        assert!(approx(rotation_angle(center, Point::new(0.0, -10.0)), 0.0));
        assert!(approx(rotation_angle(center, Point::new(10.0, 0.0)), 90.0));
        assert!(approx(rotation_angle(center, Point::new(0.0, 10.0)), 180.0));
        assert!(approx(rotation_angle(center, Point::new(-10.0, 0.0)), 270.0));
    }

    #[test]
    fn test_rotate_gesture_snaps_with_shift() {
        let mut g = Gesture::begin(
            ElementId::from("a"),
            GestureKind::Rotate,
            Point::new(250.0, 75.0),
            frame(),
            0.0,
        );
        // 50° clockwise from straight up around (250, 200)
        let angle = 50f64.to_radians();
        let pointer = Point::new(250.0 + 100.0 * angle.sin(), 200.0 - 100.0 * angle.cos());

        let free = g.update(pointer, false, LIMITS);
        assert!(approx(free.rotation, 50.0));
        assert_eq!(free.frame, frame());

        let snapped = g.update(pointer, true, LIMITS);
        assert!(approx(snapped.rotation, 45.0));
    }

    #[test]
    fn test_snap_wraps() {
        assert!(approx(snap_angle(359.0, 15.0), 0.0));
        assert!(approx(snap_angle(8.0, 15.0), 15.0));
    }
}
