use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Species;

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
            // Offset so the first species lands on a blue rather than a red.
            let hue = 210.0 + (i as f32 / n as f32) * 360.0;
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
// Color mapping: species → Color32
// ---------------------------------------------------------------------------

/// One colour per species, shared by every chart so the legends agree.
#[derive(Debug, Clone)]
pub struct SpeciesPalette {
    colors: [Color32; 3],
}

impl Default for SpeciesPalette {
    fn default() -> Self {
        let generated = generate_palette(Species::ALL.len());
        let mut colors = [Color32::GRAY; 3];
        for (slot, c) in colors.iter_mut().zip(generated) {
            *slot = c;
        }
        SpeciesPalette { colors }
    }
}

impl SpeciesPalette {
    pub fn color_for(&self, species: Species) -> Color32 {
        self.colors[species.index()]
    }

    /// Return the legend entries (species label → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        Species::ALL
            .iter()
            .map(|s| (s.to_string(), self.color_for(*s)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(5).len(), 5);
    }

    #[test]
    fn species_get_distinct_colours() {
        let palette = SpeciesPalette::default();
        let a = palette.color_for(Species::Adelie);
        let g = palette.color_for(Species::Gentoo);
        let c = palette.color_for(Species::Chinstrap);
        assert_ne!(a, g);
        assert_ne!(g, c);
        assert_ne!(a, c);
        assert_eq!(palette.legend_entries()[0].0, "Adelie");
    }
}
