use crate::core::data::colour::Colour;
use crate::core::data::point::Point;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Largest per-channel shift nightmare mode applies.
pub const NIGHTMARE_NOISE: i16 = 30;

fn pixel_seed(pixel: Point, iterations: u32) -> u64 {
    (u64::from(pixel.x) << 42) ^ (u64::from(pixel.y) << 21) ^ u64::from(iterations)
}

/// Adds noise in `[-NIGHTMARE_NOISE, NIGHTMARE_NOISE)` to each channel.
///
/// Seeded from the pixel position and its iteration count only, so a given
/// render always comes out the same.
#[must_use]
pub fn nightmare_jitter(colour: Colour, pixel: Point, iterations: u32) -> Colour {
    let mut rng = StdRng::seed_from_u64(pixel_seed(pixel, iterations));
    let mut jitter = |channel: u8| {
        let noise = rng.gen_range(-NIGHTMARE_NOISE..NIGHTMARE_NOISE);
        (i16::from(channel) + noise).clamp(0, 255) as u8
    };

    Colour {
        r: jitter(colour.r),
        g: jitter(colour.g),
        b: jitter(colour.b),
    }
}
