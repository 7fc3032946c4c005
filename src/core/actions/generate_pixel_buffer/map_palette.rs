use rayon::prelude::*;

use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::colour_mapping::gradient::ThemeGradient;
use crate::core::colour_mapping::nightmare::nightmare_jitter;
use crate::core::colour_mapping::palette::PaletteSelection;
use crate::core::data::colour::Colour;
use crate::core::data::iteration_buffer::{Escape, IterationBuffer};
use crate::core::data::pixel_buffer::{CHANNELS, PixelBuffer};
use crate::core::data::point::Point;

/// Colours an iteration buffer with the selected theme.
///
/// Passes run in a fixed order per cell: interior colour or gradient lookup,
/// then nightmare jitter, then inversion. Every cell depends only on its own
/// value and position, so the output does not depend on how rayon splits the
/// work.
#[must_use]
pub fn map_palette(iterations: &IterationBuffer, palette: PaletteSelection) -> PixelBuffer {
    let gradient = ThemeGradient::new(palette.theme);

    map_palette_with(iterations, &gradient, palette)
}

/// Like [`map_palette`], but with a caller-supplied gradient for escaped cells.
///
/// The interior colour still comes from `palette.theme`.
pub fn map_palette_with<CMap>(
    iterations: &IterationBuffer,
    gradient: &CMap,
    palette: PaletteSelection,
) -> PixelBuffer
where
    CMap: ColourMap<f64> + Sync,
{
    let width = iterations.width();
    let max_iterations = f64::from(iterations.max_iterations());
    let interior = palette.theme.interior();
    let mut pixels = PixelBuffer::new(width, iterations.height());

    pixels
        .buffer_mut()
        .par_chunks_exact_mut(CHANNELS)
        .zip(iterations.cells().par_iter())
        .enumerate()
        .for_each(|(index, (rgb, escape))| {
            let pixel = Point {
                x: (index % width as usize) as u32,
                y: (index / width as usize) as u32,
            };
            let Colour { r, g, b } =
                colour_cell(escape, pixel, gradient, interior, max_iterations, palette);

            rgb[0] = r;
            rgb[1] = g;
            rgb[2] = b;
        });

    pixels
}

fn colour_cell<CMap: ColourMap<f64>>(
    escape: &Escape,
    pixel: Point,
    gradient: &CMap,
    interior: Colour,
    max_iterations: f64,
    palette: PaletteSelection,
) -> Colour {
    let mut colour = if escape.escaped {
        gradient.map(escape.smoothed / max_iterations)
    } else {
        interior
    };

    if palette.nightmare {
        colour = nightmare_jitter(colour, pixel, escape.iterations);
    }

    if palette.invert {
        colour = colour.complement();
    }

    colour
}
