use crate::color::Rgb;
use glam::DVec2;

/// Raster target for one frame. Coordinates are pixels, origin top-left.
pub trait Surface {
    fn clear(&mut self, color: Rgb);
    fn draw_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgb);
    fn fill_polygon(&mut self, points: &[DVec2], color: Rgb);
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgb);
    fn draw_text(&mut self, text: &str, at: DVec2, color: Rgb);

    fn draw_polyline(&mut self, points: &[DVec2], width: f64, color: Rgb) {
        for w in points.windows(2) {
            self.draw_line(w[0], w[1], width, color);
        }
    }

    /// Commits the frame. Targets that draw immediately have nothing to do.
    fn present(&mut self) {}
}

/// Tallies primitives without drawing; for headless runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CountingSurface {
    pub clears: usize,
    pub lines: usize,
    pub polygons: usize,
    pub circles: usize,
    pub texts: usize,
    pub polylines: usize,
    pub presents: usize,
}

impl Surface for CountingSurface {
    fn clear(&mut self, _color: Rgb) {
        self.clears += 1;
    }

    fn draw_line(&mut self, _from: DVec2, _to: DVec2, _width: f64, _color: Rgb) {
        self.lines += 1;
    }

    fn fill_polygon(&mut self, _points: &[DVec2], _color: Rgb) {
        self.polygons += 1;
    }

    fn fill_circle(&mut self, _center: DVec2, _radius: f64, _color: Rgb) {
        self.circles += 1;
    }

    fn draw_text(&mut self, _text: &str, _at: DVec2, _color: Rgb) {
        self.texts += 1;
    }

    fn draw_polyline(&mut self, points: &[DVec2], _width: f64, _color: Rgb) {
        if points.len() > 1 {
            self.polylines += 1;
        }
    }

    fn present(&mut self) {
        self.presents += 1;
    }
}
