//! The scene driver: every body of the orrery plus the cursor state the
//! renderer needs.
//!
//! The scene is the single owner of its bodies. Frame ticks and cursor
//! updates all funnel through `&mut self`, so no body's angle pair is ever
//! mutated from two places.

use crate::body::CelestialBody;
use crate::geom::Point;

/// Hover state of one body, split by region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hover {
    pub ring: bool,
    pub token: bool,
}

pub struct Scene {
    center: Point,
    bodies: Vec<CelestialBody>,
    hover: Vec<Hover>,
}

impl Scene {
    pub fn new(center: Point, bodies: Vec<CelestialBody>) -> Self {
        let hover = vec![Hover::default(); bodies.len()];
        Self {
            center,
            bodies,
            hover,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// Follows the drawing surface when it is resized.
    pub fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn hover(&self, index: usize) -> Hover {
        self.hover.get(index).copied().unwrap_or_default()
    }

    /// Recomputes hover state for a cursor position in surface
    /// coordinates. Returns true if anything changed and the surface
    /// should redraw.
    pub fn update_cursor(&mut self, cursor: Point) -> bool {
        let rel = cursor.relative_to(self.center);
        let mut changed = false;
        for (body, hover) in self.bodies.iter().zip(self.hover.iter_mut()) {
            let next = Hover {
                ring: body.contains_point_in_ring(rel),
                token: body.contains_point_in_token(rel),
            };
            changed |= next != *hover;
            *hover = next;
        }
        changed
    }

    /// Drops all hover state (the cursor left the surface). Returns true
    /// if anything was highlighted.
    pub fn clear_hover(&mut self) -> bool {
        let mut changed = false;
        for hover in &mut self.hover {
            changed |= *hover != Hover::default();
            *hover = Hover::default();
        }
        changed
    }

    /// Advances every body's destination by one of its own spans.
    pub fn pass_month(&mut self) {
        for body in &mut self.bodies {
            body.pass_division();
        }
    }

    /// Steps every easing body by one frame. Returns true while any body
    /// is still in motion, i.e. the surface should schedule a redraw.
    pub fn advance_frame(&mut self, elapsed_ms: f64) -> bool {
        let mut easing = false;
        for body in &mut self.bodies {
            if body.is_easing() {
                body.advance_frame(elapsed_ms);
                easing = true;
            }
        }
        easing
    }

    pub fn is_idle(&self) -> bool {
        self.bodies.iter().all(|body| !body.is_easing())
    }
}
