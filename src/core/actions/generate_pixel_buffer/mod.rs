pub mod map_palette;
pub mod ports;
