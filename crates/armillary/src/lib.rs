//! Geometry and motion model for a clickable tabletop orrery: concentric
//! rings divided into discrete positions, with tokens that ease clockwise
//! between them.
//!
//! This crate knows nothing about drawing surfaces or input devices. It
//! models angles, ring/token hit-testing and frame-driven easing; a GUI
//! crate queries [`CelestialBody::token_shape`] and the [`Scene`] hover
//! state to render and dispatch clicks.

pub mod body;
pub mod geom;
pub mod scene;
pub mod zodiac;

mod macros;

pub use body::{BodyError, BodyName, CelestialBody, EASE_MS, TokenKind, TokenShape};
pub use geom::Point;
pub use scene::{Hover, Scene};
pub use zodiac::ZodiacSign;
