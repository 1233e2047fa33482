//! Cairo rendering of the scene. Shapes come straight from the model's
//! [`TokenShape`] values; nothing here stores geometry between frames.

use crate::gui::theme::{BodyStyle, Stroke, Theme};
use armillary::geom::deg_to_rad;
use armillary::{CelestialBody, Hover, Scene, TokenShape, ZodiacSign};
use cairo::Context;
use palette::Srgba;
use std::f64::consts::PI;
use std::iter::zip;
use strum::IntoEnumIterator;

const LABEL_FONT_SIZE: f64 = 25.0;

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn apply_stroke(cr: &Context, stroke: &Stroke) -> Result<(), cairo::Error> {
    set_source(cr, stroke.color);
    cr.set_line_width(stroke.width);
    cr.set_dash(&stroke.dash, 0.0);
    cr.stroke()?;
    cr.set_dash(&[], 0.0);
    Ok(())
}

struct BodyRenderer<'a> {
    body: &'a CelestialBody,
    style: &'a BodyStyle,
    hover: Hover,
}

impl<'a> BodyRenderer<'a> {
    fn new(body: &'a CelestialBody, style: &'a BodyStyle, hover: Hover) -> Self {
        Self { body, style, hover }
    }

    /// The ring annulus, its division lines and (for the sun) its labels.
    fn draw_ring(&self, cr: &Context) -> Result<(), cairo::Error> {
        set_source(cr, self.style.ring.fill_for(self.hover.ring));
        cr.new_path();
        cr.arc(0.0, 0.0, self.body.outer_radius(), 0.0, 2.0 * PI);
        cr.new_sub_path();
        cr.arc_negative(0.0, 0.0, self.body.inner_radius(), 2.0 * PI, 0.0);
        cr.fill()?;

        self.draw_division_lines(cr)?;
        self.draw_labels(cr)
    }

    fn draw_division_lines(&self, cr: &Context) -> Result<(), cairo::Error> {
        let Some(stroke) = &self.style.division_lines else {
            return Ok(());
        };
        for i in 0..self.body.num_divisions() {
            let angle = deg_to_rad(
                self.body.division_width() * i as f64 + self.body.division_offset(),
            );
            let (sin, cos) = angle.sin_cos();
            cr.move_to(self.body.outer_radius() * cos, self.body.outer_radius() * sin);
            cr.line_to(self.body.inner_radius() * cos, self.body.inner_radius() * sin);
        }
        apply_stroke(cr, stroke)
    }

    /// Sign names around the ring, one per division, each rotated onto the
    /// middle of its slot.
    fn draw_labels(&self, cr: &Context) -> Result<(), cairo::Error> {
        let Some(label) = &self.style.label else {
            return Ok(());
        };
        cr.save()?;
        set_source(cr, label.color);
        cr.select_font_face("serif", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
        cr.set_font_size(LABEL_FONT_SIZE);
        cr.rotate(deg_to_rad(self.body.division_width() / 2.0));
        for sign in ZodiacSign::iter() {
            let text = sign.to_string();
            if let Ok(ext) = cr.text_extents(&text) {
                cr.move_to(-ext.width() / 2.0, -label.radius);
                cr.show_text(&text)?;
            }
            cr.rotate(deg_to_rad(self.body.division_width()));
        }
        cr.restore()
    }

    fn draw_token(&self, cr: &Context) -> Result<(), cairo::Error> {
        match self.body.token_shape() {
            TokenShape::Wedge {
                outer_radius,
                inner_radius,
                start_deg,
                end_deg,
            } => {
                let (start, end) = (deg_to_rad(start_deg), deg_to_rad(end_deg));
                cr.new_path();
                cr.arc(0.0, 0.0, outer_radius, start, end);
                cr.line_to(inner_radius * end.cos(), inner_radius * end.sin());
                cr.arc_negative(0.0, 0.0, inner_radius, end, start);
                cr.close_path();
            }
            TokenShape::Disc { center, radius } => {
                cr.new_path();
                cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
            }
        }

        set_source(cr, self.style.token.fill_for(self.hover.token));
        cr.fill_preserve()?;
        if let Some(stroke) = &self.style.token.stroke {
            apply_stroke(cr, stroke)?;
        }
        cr.new_path();
        Ok(())
    }
}

pub fn draw(
    cr: &Context,
    scene: &Scene,
    theme: &Theme,
    dark_mode: bool,
) -> Result<(), cairo::Error> {
    set_source(cr, theme.background(dark_mode));
    cr.paint()?;

    cr.save()?;
    cr.translate(scene.center().x, scene.center().y);

    draw_rim(cr, theme)?;

    // Rings first so no token is painted over, outermost inward.
    for (i, (body, style)) in zip(scene.bodies(), &theme.bodies).enumerate() {
        BodyRenderer::new(body, style, scene.hover(i)).draw_ring(cr)?;
    }
    for (i, (body, style)) in zip(scene.bodies(), &theme.bodies).enumerate() {
        BodyRenderer::new(body, style, scene.hover(i)).draw_token(cr)?;
    }

    cr.restore()
}

fn draw_rim(cr: &Context, theme: &Theme) -> Result<(), cairo::Error> {
    let Some(rim) = &theme.rim else {
        return Ok(());
    };
    cr.new_path();
    cr.arc(0.0, 0.0, rim.radius, 0.0, 2.0 * PI);
    apply_stroke(cr, &rim.stroke)
}
