use super::{LABEL_FONT, NOTCH_WIDTH};
use crate::gui::theme::ThemeColors;
use cairo::{Context, LinearGradient};
use palette::Srgba;
use std::f64::consts::PI;
use wheel::layout::{FIGURE_STROKE_WIDTH, NoteSlot, Tone, WheelLayout};
use wheel::{Bounds, Diagram, Point, Ring};

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn trace_polygon(cr: &Context, points: &[Point]) {
    if let Some((first, rest)) = points.split_first() {
        cr.move_to(first.x, first.y);
        rest.iter().for_each(|p| cr.line_to(p.x, p.y));
        cr.close_path();
    }
}

struct WheelRenderer<'a> {
    cr: &'a Context,
    diagram: &'a Diagram,
    colors: &'a ThemeColors,
}

impl<'a> WheelRenderer<'a> {
    fn new(cr: &'a Context, diagram: &'a Diagram, colors: &'a ThemeColors) -> Self {
        Self {
            cr,
            diagram,
            colors,
        }
    }

    fn layout(&self) -> &'a WheelLayout {
        self.diagram.layout()
    }

    /// Runs `f` with the context turned to the ring's current angle.
    fn rotated(
        &self,
        ring: Ring,
        f: impl FnOnce(&Self) -> Result<(), cairo::Error>,
    ) -> Result<(), cairo::Error> {
        self.cr.save()?;
        self.cr.rotate(self.diagram.effective_rotation(ring).to_radians());
        let result = f(self);
        self.cr.restore()?;
        result
    }

    fn draw(&self) -> Result<(), cairo::Error> {
        self.draw_notches()?;
        self.draw_ring()?;
        self.rotated(Ring::Dissonance, |r| r.draw_markers(Tone::Dissonant))?;
        self.rotated(Ring::Consonance, |r| r.draw_markers(Tone::Consonant))?;
        self.draw_labels()?;
        self.rotated(Ring::InnerConsonance, Self::draw_consonance_figure)?;
        self.rotated(Ring::InnerDissonance, Self::draw_dissonance_figure)
    }

    fn draw_notches(&self) -> Result<(), cairo::Error> {
        let cr = self.cr;
        set_color(cr, self.colors.background);
        cr.set_line_width(NOTCH_WIDTH);
        for slot in &self.layout().notes {
            let (from, to) = slot.notch;
            cr.move_to(from.x, from.y);
            cr.line_to(to.x, to.y);
        }
        cr.stroke()
    }

    fn draw_ring(&self) -> Result<(), cairo::Error> {
        let ring = &self.layout().ring;
        set_color(self.cr, self.colors.background);
        self.cr.set_line_width(ring.thickness);
        self.cr.new_sub_path();
        self.cr.arc(0.0, 0.0, ring.label_radius, 0.0, 2.0 * PI);
        self.cr.stroke()
    }

    fn draw_markers(&self, tone: Tone) -> Result<(), cairo::Error> {
        let cr = self.cr;
        let ring = &self.layout().ring;
        let fill = match tone {
            Tone::Dissonant => self.colors.dissonance,
            Tone::Consonant => self.colors.consonance,
        };

        for (slot, category) in self.layout().markers(tone) {
            let p = slot.position.point;
            cr.new_sub_path();
            cr.arc(p.x, p.y, ring.marker_radius, 0.0, 2.0 * PI);
            set_color(cr, fill);

            if category.tonic {
                cr.fill_preserve()?;
                // tonic gets a dashed outline in the label color
                cr.save()?;
                set_color(cr, self.colors.notes);
                cr.set_line_width(ring.tonic_stroke_width());
                cr.set_dash(&[ring.tonic_dash()], 0.0);
                cr.stroke()?;
                cr.restore()?;
            } else {
                cr.fill()?;
            }
        }
        Ok(())
    }

    fn draw_labels(&self) -> Result<(), cairo::Error> {
        let cr = self.cr;
        set_color(cr, self.colors.notes);
        cr.select_font_face(LABEL_FONT, cairo::FontSlant::Normal, cairo::FontWeight::Normal);
        cr.set_font_size(self.layout().ring.label_size);
        self.layout()
            .notes
            .iter()
            .try_for_each(|slot| self.draw_label(slot))
    }

    fn draw_label(&self, slot: &NoteSlot) -> Result<(), cairo::Error> {
        let ext = self.cr.text_extents(slot.label)?;
        let p = slot.position.point;
        self.cr.move_to(
            p.x - ext.width() / 2.0 - ext.x_bearing(),
            p.y - ext.height() / 2.0 - ext.y_bearing(),
        );
        self.cr.show_text(slot.label)
    }

    fn draw_consonance_figure(&self) -> Result<(), cairo::Error> {
        let cr = self.cr;
        let figure = &self.layout().inner;
        let r = figure.disc_radius;

        // upper half consonance, lower half dissonance
        let gradient = LinearGradient::new(0.0, -r, 0.0, r);
        for (offset, color) in [
            (0.0, self.colors.consonance),
            (0.5, self.colors.consonance),
            (0.5, self.colors.dissonance),
            (1.0, self.colors.dissonance),
        ] {
            let (red, green, blue, alpha) = color.into_components();
            gradient.add_color_stop_rgba(offset, red, green, blue, alpha);
        }
        cr.new_sub_path();
        cr.arc(0.0, 0.0, r, 0.0, 2.0 * PI);
        cr.set_source(&gradient)?;
        cr.fill()?;

        set_color(cr, self.colors.background);
        cr.set_line_width(FIGURE_STROKE_WIDTH);
        for triangle in &figure.triangles {
            trace_polygon(cr, triangle);
            cr.stroke()?;
        }
        Ok(())
    }

    fn draw_dissonance_figure(&self) -> Result<(), cairo::Error> {
        set_color(self.cr, self.colors.background);
        self.cr.set_line_width(FIGURE_STROKE_WIDTH);
        trace_polygon(self.cr, &self.layout().inner.diamond);
        self.cr.stroke()
    }
}

/// Paints the wheel into `bounds`, scaled from logical units.
pub fn draw(
    cr: &Context,
    diagram: &Diagram,
    bounds: Bounds,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    if bounds.width <= 0.0 {
        return Ok(());
    }
    let center = bounds.center();
    let scale = bounds.width / diagram.layout().diameter;

    cr.save()?;
    cr.translate(center.x, center.y);
    cr.scale(scale, scale);
    let result = WheelRenderer::new(cr, diagram, colors).draw();
    cr.restore()?;
    result
}
