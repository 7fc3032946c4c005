pub mod calculate_tile_bands;
pub mod navigation;
pub mod numeric_field;
