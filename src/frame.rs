use crate::color::{self, charge_color};
use crate::config::FieldConfig;
use crate::glyph::arrow_for;
use crate::grid::sample_grid;
use crate::interaction::{InputEvent, Session, VisualizationMode};
use crate::stream::trace_all;
use crate::surface::Surface;
use glam::DVec2;
use std::fmt;
use tracing::trace;

const HUD_POS: DVec2 = DVec2::new(5.0, 5.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hud {
    pub mode: VisualizationMode,
    pub charge_count: usize,
    pub active_sign: i32,
}

impl fmt::Display for Hud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.active_sign >= 0 { '+' } else { '-' };
        write!(
            f,
            "Mode: {} | Charges: {} | Active: {}{} | F: toggle | R: reset",
            self.mode,
            self.charge_count,
            sign,
            self.active_sign.unsigned_abs()
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub hud: Hud,
    pub samples: usize,
    pub max_magnitude: f64,
    pub arrows: usize,
    pub field_lines: usize,
    pub quit_requested: bool,
}

/// One tick: apply queued input, bind the dragged charge to the pointer,
/// sample the grid, draw arrows or field lines, then charges and the HUD.
///
/// Only `session` carries over to the next call.
pub fn run_frame<S, I>(
    session: &mut Session,
    events: I,
    pointer: DVec2,
    surface: &mut S,
    cfg: &FieldConfig,
) -> FrameReport
where
    S: Surface + ?Sized,
    I: IntoIterator<Item = InputEvent>,
{
    for event in events {
        session.handle(&event);
    }
    session.follow_pointer(pointer);

    let charges = session.charges.as_slice();
    let grid = sample_grid(charges, cfg.width, cfg.height, cfg.grid_spacing, cfg.k, cfg.softening);

    surface.clear(color::BACKGROUND);

    let mut arrows = 0;
    let mut field_lines = 0;
    match session.interaction.mode {
        VisualizationMode::Arrows => {
            for arrow in grid
                .samples
                .iter()
                .filter_map(|s| arrow_for(s, grid.max_magnitude, cfg))
            {
                surface.draw_line(arrow.tail, arrow.tip, cfg.arrow_width, arrow.color);
                surface.fill_polygon(&arrow.head, arrow.color);
                arrows += 1;
            }
        }
        VisualizationMode::FieldLines => {
            for line in trace_all(charges, grid.max_magnitude, cfg) {
                surface.draw_polyline(&line.trace.points, cfg.line_width, line.color);
                field_lines += 1;
            }
        }
    }

    for c in charges {
        surface.fill_circle(c.pos, cfg.charge_radius, charge_color(c.q));
    }

    let hud = Hud {
        mode: session.interaction.mode,
        charge_count: charges.len(),
        active_sign: session.interaction.active_sign,
    };
    surface.draw_text(&hud.to_string(), HUD_POS, color::TEXT);
    surface.present();

    trace!(
        mode = %hud.mode,
        charges = hud.charge_count,
        max_magnitude = grid.max_magnitude,
        arrows,
        field_lines,
        "frame"
    );

    FrameReport {
        hud,
        samples: grid.samples.len(),
        max_magnitude: grid.max_magnitude,
        arrows,
        field_lines,
        quit_requested: session.quit_requested,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hud_text_shows_signed_active_charge() {
        let hud = Hud {
            mode: VisualizationMode::FieldLines,
            charge_count: 3,
            active_sign: -4,
        };
        assert_eq!(
            hud.to_string(),
            "Mode: Field Lines | Charges: 3 | Active: -4 | F: toggle | R: reset"
        );
        let hud = Hud {
            active_sign: 0,
            mode: VisualizationMode::Arrows,
            ..hud
        };
        assert!(hud.to_string().starts_with("Mode: Arrows | Charges: 3 | Active: +0 |"));
    }
}
