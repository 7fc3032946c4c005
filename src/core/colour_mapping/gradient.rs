use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::colour_mapping::theme::{ColourStop, Theme};
use crate::core::data::colour::Colour;

/// Clamped piecewise-linear ramp through a theme's stops.
#[derive(Debug, Clone, Copy)]
pub struct ThemeGradient {
    theme: Theme,
    stops: &'static [ColourStop],
}

fn lerp_channel(from: u8, to: u8, t: f64) -> u8 {
    let value = f64::from(from) + (f64::from(to) - f64::from(from)) * t;
    value.round().clamp(0.0, 255.0) as u8
}

impl ThemeGradient {
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            stops: theme.stops(),
        }
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }
}

impl ColourMap<f64> for ThemeGradient {
    /// `value` is a normalised escape value; anything outside `[0, 1]` (or NaN)
    /// is clamped to the nearest end stop.
    fn map(&self, value: f64) -> Colour {
        let t = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };

        let upper = self
            .stops
            .iter()
            .position(|stop| stop.position >= t)
            .unwrap_or(self.stops.len() - 1);

        if upper == 0 {
            return self.stops[0].colour;
        }

        let from = self.stops[upper - 1];
        let to = self.stops[upper];
        let local_t = (t - from.position) / (to.position - from.position);

        Colour {
            r: lerp_channel(from.colour.r, to.colour.r, local_t),
            g: lerp_channel(from.colour.g, to.colour.g, local_t),
            b: lerp_channel(from.colour.b, to.colour.b, local_t),
        }
    }

    fn display_name(&self) -> &str {
        self.theme.display_name()
    }
}
