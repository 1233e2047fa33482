//! The drawing and input surface for the orrery: a GTK4 window that renders
//! the [`armillary`] scene with cairo and feeds pointer events back into it.

pub mod config;
pub mod events;
pub mod gui;
pub mod sys;
