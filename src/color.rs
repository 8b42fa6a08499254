use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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
// Bar colours
// ---------------------------------------------------------------------------

/// Colours for the bars of one chart.
///
/// The leading (best) bar gets the highlight colour, every other bar is
/// muted, so the winner stands out the same way in each chart.
#[derive(Debug, Clone)]
pub struct BarColors {
    pub highlight: Color32,
    pub muted: Color32,
}

impl BarColors {
    pub fn for_rank(&self, rank: usize) -> Color32 {
        if rank == 0 {
            self.highlight
        } else {
            self.muted
        }
    }
}

/// Series colours for the casual / registered comparison.
pub fn user_series_colors() -> (Color32, Color32) {
    match generate_palette(2).as_slice() {
        [casual, registered] => (*casual, *registered),
        _ => (Color32::LIGHT_RED, Color32::LIGHT_BLUE),
    }
}

/// Highlight for season/weather charts: a hue distinct from the user series.
pub fn ranking_colors() -> BarColors {
    let highlight = generate_palette(3)
        .get(1)
        .copied()
        .unwrap_or(Color32::LIGHT_GREEN);
    BarColors {
        highlight,
        muted: Color32::GRAY,
    }
}
