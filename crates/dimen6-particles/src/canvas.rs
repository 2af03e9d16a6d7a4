//! Painting the particle field onto a ratatui buffer.

use dimen6_core::ColorTheme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::Span,
    widgets::{
        Widget,
        canvas::{Canvas, Line as CanvasLine, Points},
    },
};

use crate::chars::glyph_for_radius;
use crate::color::fade;
use crate::field::ParticleField;

/// Widget drawing particles and their proximity links.
///
/// Surface coordinates grow downwards while canvas coordinates grow
/// upwards, so every y is flipped on the way in.
#[derive(Debug)]
pub struct ParticleCanvas<'a> {
    field: &'a ParticleField,
    theme: ColorTheme,
}

impl<'a> ParticleCanvas<'a> {
    pub fn new(field: &'a ParticleField, theme: ColorTheme) -> Self {
        Self { field, theme }
    }
}

impl Widget for ParticleCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let size = self.field.size();
        if area.is_empty() || size.is_empty() {
            return;
        }

        let accent = self.theme.rgb();
        let particles = self.field.particles();
        let links = self.field.links();
        let flip = |y: f64| size.height - y;

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, size.width])
            .y_bounds([0.0, size.height])
            .paint(|ctx| {
                for link in links {
                    let a = &particles[link.from];
                    let b = &particles[link.to];
                    ctx.draw(&CanvasLine::new(
                        a.x,
                        flip(a.y),
                        b.x,
                        flip(b.y),
                        fade(accent, link.opacity),
                    ));
                }

                // Particles sit on top of the links.
                ctx.layer();

                for p in particles {
                    let color = fade(accent, p.opacity);
                    match glyph_for_radius(p.radius) {
                        Some(glyph) => {
                            ctx.print(p.x, flip(p.y), Span::styled(glyph, Style::new().fg(color)))
                        }
                        None => ctx.draw(&Points {
                            coords: &[(p.x, flip(p.y))],
                            color,
                        }),
                    }
                }
            })
            .render(area, buf);
    }
}
