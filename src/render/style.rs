use serde::{Deserialize, Serialize};

/// Physical size of the picture. Marker sizes and fonts are given in points and scale with dpi.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Canvas {
    pub width_in: f32,
    pub height_in: f32,
    pub dpi: f32,
    /// Fraction of each side kept free around the drawing.
    pub margin: f32,
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas {
            width_in: 12.0,
            height_in: 12.0,
            dpi: 300.0,
            margin: 0.08,
        }
    }
}

impl Canvas {
    pub fn width_px(&self) -> u32 {
        (self.width_in * self.dpi).round().max(1.0) as u32
    }

    pub fn height_px(&self) -> u32 {
        (self.height_in * self.dpi).round().max(1.0) as u32
    }

    /// Points (1/72 inch) to pixels.
    pub fn pt(&self, points: f32) -> f32 {
        points * self.dpi / 72.0
    }
}

/// Colours are any SVG colour: names like `skyblue` or `#87ceeb`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub background: String,
    pub student_color: String,
    /// Marker area in pt².
    pub student_size: f32,
    pub teacher_color: String,
    pub teacher_size: f32,
    pub node_alpha: f32,
    pub edge_color: String,
    /// Line width in pt.
    pub edge_width: f32,
    pub edge_dashed: bool,
    pub font_family: String,
    /// Font size in pt, for node and edge labels.
    pub font_size: f32,
    pub node_label_color: String,
    pub edge_label_color: String,
    pub edge_label_background: String,
    /// Turn edge labels along their edge.
    pub rotate_edge_labels: bool,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            background: "white".to_string(),
            student_color: "skyblue".to_string(),
            student_size: 400.0,
            teacher_color: "lightgreen".to_string(),
            teacher_size: 500.0,
            node_alpha: 0.9,
            edge_color: "gray".to_string(),
            edge_width: 2.0,
            edge_dashed: true,
            font_family: "DejaVu Sans, Bitstream Vera Sans, Arial, Helvetica, sans-serif".to_string(),
            font_size: 10.0,
            node_label_color: "black".to_string(),
            edge_label_color: "red".to_string(),
            edge_label_background: "white".to_string(),
            rotate_edge_labels: true,
        }
    }
}

impl Style {
    /// Circle radius in pt for a marker of the given area.
    pub fn marker_radius(area: f32) -> f32 {
        area.max(0.0).sqrt() / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_canvas() {
        let canvas = Canvas::default();
        assert_eq!((canvas.width_px(), canvas.height_px()), (3600, 3600));
        assert!((canvas.pt(72.0) - 300.0).abs() < 1e-4);
    }

    #[test]
    fn test_marker_radius() {
        assert!((Style::marker_radius(400.0) - 10.0).abs() < 1e-6);
        assert_eq!(Style::marker_radius(-1.0), 0.0);
    }
}
