//! One celestial body: the ring it rides on and the token that marks its
//! position.
//!
//! A ring is split into `num_divisions` equal angular slots; the token
//! covers `span_divisions` of them. The stored angle is the widdershins
//! (leading) edge of the token in degrees and may accumulate past 360 as
//! the token keeps circling; hit tests normalize before comparing.

use crate::geom::{Point, deg_to_rad, positive_mod, rad_to_deg, vector_angle};
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Milliseconds for a token to cross its own angular width. Motion covers
/// one span per this duration, so a queued multi-span move crosses each
/// span in the same wall-clock time.
pub const EASE_MS: f64 = 1000.0;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct BodyName(String);

crate::impl_string_newtype!(BodyName);

#[derive(Debug, Error)]
pub enum BodyError {
    #[error("body '{name}' needs at least one ring division")]
    NoDivisions { name: BodyName },
    #[error("body '{name}' token must span at least one division")]
    NoSpan { name: BodyName },
    #[error("body '{name}' token spans {span} divisions but the ring only has {divisions}")]
    SpanTooWide {
        name: BodyName,
        span: u32,
        divisions: u32,
    },
}

/// Shape policy for a body's token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    /// Annulus sector filling the token's divisions edge to edge.
    Wedge,
    /// Disc of fixed `radius` riding at `distance` from the orrery center,
    /// centered on the middle of the token's angular span.
    Disc { distance: f64, radius: f64 },
}

/// Drawable geometry of a token at its current position. Rebuilt from the
/// live angle on every call to [`CelestialBody::token_shape`]; never cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenShape {
    Wedge {
        outer_radius: f64,
        inner_radius: f64,
        start_deg: f64,
        end_deg: f64,
    },
    Disc { center: Point, radius: f64 },
}

#[derive(Debug, Clone)]
pub struct CelestialBody {
    name: BodyName,
    num_divisions: u32,
    division_offset: f64,
    span_divisions: u32,
    outer_radius: f64,
    inner_radius: f64,
    token: TokenKind,
    current_angle: f64,
    destination_angle: f64,
}

impl CelestialBody {
    /// Places the token's widdershins edge on `starting_division` and
    /// leaves the body at rest there.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: BodyName,
        num_divisions: u32,
        division_offset: f64,
        span_divisions: u32,
        outer_radius: f64,
        inner_radius: f64,
        token: TokenKind,
        starting_division: u32,
    ) -> Result<Self, BodyError> {
        if num_divisions == 0 {
            return Err(BodyError::NoDivisions { name });
        }
        if span_divisions == 0 {
            return Err(BodyError::NoSpan { name });
        }
        if span_divisions > num_divisions {
            return Err(BodyError::SpanTooWide {
                name,
                span: span_divisions,
                divisions: num_divisions,
            });
        }

        let current_angle =
            (360.0 / num_divisions as f64) * starting_division as f64 + division_offset;
        Ok(Self {
            name,
            num_divisions,
            division_offset,
            span_divisions,
            outer_radius,
            inner_radius,
            token,
            current_angle,
            destination_angle: current_angle,
        })
    }

    pub fn name(&self) -> &BodyName {
        &self.name
    }

    pub fn num_divisions(&self) -> u32 {
        self.num_divisions
    }

    pub fn division_offset(&self) -> f64 {
        self.division_offset
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn token(&self) -> TokenKind {
        self.token
    }

    /// Live widdershins edge of the token in degrees, possibly mid-ease.
    pub fn current_angle(&self) -> f64 {
        self.current_angle
    }

    pub fn destination_angle(&self) -> f64 {
        self.destination_angle
    }

    /// Width of one ring division in degrees.
    pub fn division_width(&self) -> f64 {
        360.0 / self.num_divisions as f64
    }

    /// Angle between the token's widdershins and clockwise edges.
    pub fn token_width(&self) -> f64 {
        self.span_divisions as f64 * self.division_width()
    }

    /// Clockwise (trailing) edge of the token in degrees.
    pub fn trailing_edge(&self) -> f64 {
        self.current_angle + self.token_width()
    }

    /// Ring division currently under the token's widdershins edge.
    pub fn current_division(&self) -> u32 {
        self.division_at(self.current_angle)
    }

    /// Ring division the widdershins edge is headed for.
    pub fn destination_division(&self) -> u32 {
        self.division_at(self.destination_angle)
    }

    fn division_at(&self, angle: f64) -> u32 {
        let deg = positive_mod(angle - self.division_offset, 360.0);
        (deg / self.division_width()).round() as u32 % self.num_divisions
    }

    pub fn is_easing(&self) -> bool {
        self.current_angle < self.destination_angle
    }

    /// Queues one more span of clockwise travel. Calls accumulate.
    pub fn pass_division(&mut self) {
        self.destination_angle += self.token_width();
    }

    /// Moves the token toward its destination by one frame's worth of
    /// travel, clamping exactly onto the destination. No-op at rest.
    pub fn advance_frame(&mut self, elapsed_ms: f64) {
        if self.current_angle >= self.destination_angle {
            return;
        }
        let step = self.token_width() / EASE_MS * elapsed_ms;
        self.current_angle = (self.current_angle + step).min(self.destination_angle);
    }

    /// Whether a point (relative to the orrery center) falls inside the
    /// ring annulus. Both boundaries are excluded so adjacent concentric
    /// rings never double-hit.
    pub fn contains_point_in_ring(&self, point: Point) -> bool {
        let radius = point.x.hypot(point.y);
        radius > self.inner_radius && radius < self.outer_radius
    }

    /// Whether a point (relative to the orrery center) falls inside the
    /// token.
    pub fn contains_point_in_token(&self, point: Point) -> bool {
        match self.token {
            // Normalizing the difference keeps the test correct when the
            // wedge straddles the 0-degree seam.
            TokenKind::Wedge => {
                let angle = rad_to_deg(vector_angle(point.x, point.y));
                self.contains_point_in_ring(point)
                    && positive_mod(angle - self.current_angle, 360.0) < self.token_width()
            }
            TokenKind::Disc { distance, radius } => {
                point.distance(self.bisector_point(distance)) < radius
            }
        }
    }

    /// Builds the token's drawable geometry from the live angle.
    pub fn token_shape(&self) -> TokenShape {
        match self.token {
            TokenKind::Wedge => TokenShape::Wedge {
                outer_radius: self.outer_radius,
                inner_radius: self.inner_radius,
                start_deg: self.current_angle,
                end_deg: self.trailing_edge(),
            },
            TokenKind::Disc { distance, radius } => TokenShape::Disc {
                center: self.bisector_point(distance),
                radius,
            },
        }
    }

    /// Point at `distance` along the bisector of the token's span.
    fn bisector_point(&self, distance: f64) -> Point {
        let mid = deg_to_rad(self.current_angle + self.token_width() / 2.0);
        Point::new(distance * mid.cos(), distance * mid.sin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn wedge(num_divisions: u32, span: u32, starting_division: u32) -> CelestialBody {
        CelestialBody::new(
            BodyName::new("Mars"),
            num_divisions,
            0.0,
            span,
            140.0,
            110.0,
            TokenKind::Wedge,
            starting_division,
        )
        .unwrap()
    }

    #[test]
    fn construction_rejects_zero_divisions() {
        let err = CelestialBody::new(
            BodyName::new("broken"),
            0,
            0.0,
            1,
            100.0,
            50.0,
            TokenKind::Wedge,
            0,
        )
        .unwrap_err();
        assert!(matches!(err, BodyError::NoDivisions { .. }));
    }

    #[test]
    fn construction_rejects_zero_span() {
        let err = CelestialBody::new(
            BodyName::new("broken"),
            12,
            0.0,
            0,
            100.0,
            50.0,
            TokenKind::Wedge,
            0,
        )
        .unwrap_err();
        assert!(matches!(err, BodyError::NoSpan { .. }));
    }

    #[test]
    fn construction_rejects_span_wider_than_ring() {
        let err = CelestialBody::new(
            BodyName::new("broken"),
            12,
            0.0,
            13,
            100.0,
            50.0,
            TokenKind::Wedge,
            0,
        )
        .unwrap_err();
        assert!(matches!(err, BodyError::SpanTooWide { span: 13, .. }));
    }

    #[test]
    fn starting_division_sets_both_angles() {
        // 24 divisions of 15 degrees, 3-division token starting on slot 22.
        let body = wedge(24, 3, 22);
        assert!((body.current_angle() - 330.0).abs() < EPS);
        assert!((body.destination_angle() - 330.0).abs() < EPS);
        assert!((body.token_width() - 45.0).abs() < EPS);
        assert!((body.trailing_edge() - 375.0).abs() < EPS);
        assert!((positive_mod(body.trailing_edge(), 360.0) - 15.0).abs() < EPS);
        assert_eq!(body.current_division(), 22);
    }

    #[test]
    fn division_offset_shifts_the_starting_angle() {
        let body = CelestialBody::new(
            BodyName::new("Saturn"),
            36,
            -5.0,
            1,
            200.0,
            170.0,
            TokenKind::Wedge,
            3,
        )
        .unwrap();
        assert!((body.current_angle() - 25.0).abs() < EPS);
        assert_eq!(body.current_division(), 3);
    }

    #[test]
    fn pass_division_accumulates() {
        let mut body = wedge(24, 3, 22);
        body.pass_division();
        assert!((body.destination_angle() - 375.0).abs() < EPS);
        body.pass_division();
        assert!((body.destination_angle() - 420.0).abs() < EPS);
        assert!((body.current_angle() - 330.0).abs() < EPS);
    }

    #[test]
    fn easing_is_monotone_and_clamps() {
        let mut body = wedge(12, 1, 0);
        body.pass_division();
        let mut previous = body.current_angle();
        let mut frames = 0;
        while body.is_easing() && frames < 1000 {
            body.advance_frame(16.0);
            assert!(body.current_angle() > previous);
            assert!(body.current_angle() <= body.destination_angle() + EPS);
            previous = body.current_angle();
            frames += 1;
        }
        assert!((body.current_angle() - body.destination_angle()).abs() < EPS);

        // Caught up: further frames change nothing.
        let resting = body.current_angle();
        body.advance_frame(16.0);
        assert_eq!(body.current_angle(), resting);
    }

    #[test]
    fn one_span_takes_the_fixed_duration() {
        let mut body = wedge(12, 1, 0);
        body.pass_division();
        body.advance_frame(EASE_MS / 2.0);
        assert!((body.current_angle() - body.token_width() / 2.0).abs() < EPS);
        body.advance_frame(EASE_MS / 2.0);
        assert!(!body.is_easing());
    }

    #[test]
    fn queued_spans_are_crossed_back_to_back() {
        let mut body = wedge(12, 1, 0);
        body.pass_division();
        body.pass_division();
        // Two spans queued: exactly double the single-span duration, and
        // the easing lands on the exact destination with no overshoot.
        body.advance_frame(2.0 * EASE_MS);
        assert!((body.current_angle() - 60.0).abs() < EPS);
        assert!(!body.is_easing());
        body.advance_frame(500.0);
        assert!((body.current_angle() - 60.0).abs() < EPS);
    }

    #[test]
    fn ring_test_excludes_both_boundaries() {
        let body = wedge(24, 3, 0);
        assert!(body.contains_point_in_ring(Point::new(125.0, 0.0)));
        assert!(!body.contains_point_in_ring(Point::new(140.0, 0.0)));
        assert!(!body.contains_point_in_ring(Point::new(110.0, 0.0)));
        assert!(!body.contains_point_in_ring(Point::new(0.0, 141.0)));
        assert!(!body.contains_point_in_ring(Point::new(0.0, 30.0)));
    }

    #[test]
    fn wedge_containment_handles_the_zero_seam() {
        // Token spanning 350 through 10 degrees.
        let body = CelestialBody::new(
            BodyName::new("seam"),
            36,
            0.0,
            2,
            140.0,
            110.0,
            TokenKind::Wedge,
            35,
        )
        .unwrap();
        assert!((body.current_angle() - 350.0).abs() < EPS);
        assert!((body.token_width() - 20.0).abs() < EPS);

        let at = |deg: f64, radius: f64| {
            Point::new(
                radius * deg_to_rad(deg).cos(),
                radius * deg_to_rad(deg).sin(),
            )
        };
        assert!(body.contains_point_in_token(at(5.0, 125.0)));
        assert!(body.contains_point_in_token(at(355.0, 125.0)));
        assert!(!body.contains_point_in_token(at(200.0, 125.0)));
        assert!(!body.contains_point_in_token(at(15.0, 125.0)));
        // Right angle, outside the annulus.
        assert!(!body.contains_point_in_token(at(5.0, 150.0)));
    }

    #[test]
    fn disc_token_rides_the_span_bisector() {
        // 30-degree span starting at 0: the disc sits at 15 degrees.
        let body = CelestialBody::new(
            BodyName::new("Sun"),
            12,
            0.0,
            1,
            250.0,
            200.0,
            TokenKind::Disc {
                distance: 100.0,
                radius: 30.0,
            },
            0,
        )
        .unwrap();
        let TokenShape::Disc { center, radius } = body.token_shape() else {
            panic!("disc body must produce a disc shape");
        };
        assert!((radius - 30.0).abs() < EPS);
        assert!((center.x - 100.0 * deg_to_rad(15.0).cos()).abs() < EPS);
        assert!((center.y - 100.0 * deg_to_rad(15.0).sin()).abs() < EPS);

        assert!(body.contains_point_in_token(center));
        let outside = Point::new(center.x + 30.0 + 1e-6, center.y);
        assert!(!body.contains_point_in_token(outside));
    }

    #[test]
    fn wedge_shape_tracks_the_live_angle() {
        let mut body = wedge(12, 1, 0);
        body.pass_division();
        body.advance_frame(EASE_MS / 3.0);
        let TokenShape::Wedge {
            start_deg, end_deg, ..
        } = body.token_shape()
        else {
            panic!("wedge body must produce a wedge shape");
        };
        assert!((start_deg - body.current_angle()).abs() < EPS);
        assert!((end_deg - body.trailing_edge()).abs() < EPS);
    }

    #[test]
    fn body_name_serializes_transparently() {
        let name = BodyName::new("Jupiter");
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"Jupiter\"");
        let back: BodyName = serde_json::from_str("\"Jupiter\"").unwrap();
        assert_eq!(back, name);
    }
}
