//! SVG canvas for headless rendering.

use std::path::Path;

use anyhow::Context;
use glam::DVec2;

use crate::canvas::{Canvas, CanvasSize, Fill};

const FONT_SIZE: f64 = 10.0;

#[derive(Clone, Debug)]
pub struct SvgCanvas {
    size: CanvasSize,
    fill: Fill,
    body: String,
}

impl SvgCanvas {
    pub fn new(size: CanvasSize) -> Self {
        let mut canvas = Self {
            size,
            fill: Fill::gray(255.0),
            body: String::new(),
        };
        canvas.clear();
        canvas
    }

    pub fn document(&self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
            w = self.size.width,
            h = self.size.height,
            body = self.body
        )
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        std::fs::write(path, self.document())
            .with_context(|| format!("Failed to write SVG to {}", path.display()))
    }
}

fn paint(fill: Fill) -> String {
    let [r, g, b, a] = fill.to_rgba();
    if a == 255 {
        format!("fill=\"rgb({r},{g},{b})\"")
    } else {
        format!(
            "fill=\"rgb({r},{g},{b})\" fill-opacity=\"{:.3}\"",
            f64::from(a) / 255.0
        )
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl Canvas for SvgCanvas {
    fn clear(&mut self) {
        self.body = format!(
            "<rect width=\"{}\" height=\"{}\" fill=\"rgb(0,0,0)\"/>\n",
            self.size.width, self.size.height
        );
    }

    fn set_fill(&mut self, fill: Fill) {
        self.fill = fill;
    }

    fn draw_circle(&mut self, center: DVec2, diameter: f64) {
        self.body.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\" {}/>\n",
            center.x,
            center.y,
            diameter / 2.0,
            paint(self.fill)
        ));
    }

    fn draw_text(&mut self, text: &str, position: DVec2) {
        self.body.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{}\" {}>{}</text>\n",
            position.x,
            position.y,
            FONT_SIZE,
            paint(self.fill),
            escape(text)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_shapes_and_escapes_text() {
        let mut canvas = SvgCanvas::new(CanvasSize::new(40.0, 20.0));
        canvas.set_fill(Fill::gray(128.0));
        canvas.draw_circle(DVec2::new(10.0, 5.0), 3.0);
        canvas.draw_text("a < b & c", DVec2::new(1.0, 2.0));

        let svg = canvas.document();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("<circle cx=\"10.00\" cy=\"5.00\" r=\"1.5\" fill=\"rgb(128,128,128)\"/>"));
        assert!(svg.contains(">a &lt; b &amp; c</text>"));
    }

    #[test]
    fn clear_resets_to_background() {
        let mut canvas = SvgCanvas::new(CanvasSize::new(40.0, 20.0));
        canvas.draw_circle(DVec2::ZERO, 1.0);
        canvas.clear();

        assert!(!canvas.document().contains("<circle"));
        assert!(canvas.document().contains("fill=\"rgb(0,0,0)\""));
    }
}
