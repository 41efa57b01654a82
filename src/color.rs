use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::{CategoryColumn, Row};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps the labels of one categorical column to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    pub column: CategoryColumn,
    mapping: BTreeMap<&'static str, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new(column: CategoryColumn) -> Self {
        let labels = column.labels();
        let palette = generate_palette(labels.len());
        ColorMap {
            column,
            mapping: labels.into_iter().zip(palette).collect(),
            default_color: Color32::GRAY,
        }
    }

    /// Colour of a row under this column.
    pub fn color_for(&self, row: &Row) -> Color32 {
        self.mapping
            .get(self.column.label_of(row))
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Legend entries in the column's display order.
    pub fn legend_entries(&self) -> Vec<(&'static str, Color32)> {
        self.column
            .labels()
            .into_iter()
            .map(|label| {
                let c = self.mapping.get(label).copied().unwrap_or(self.default_color);
                (label, c)
            })
            .collect()
    }
}
