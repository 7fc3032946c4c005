pub mod ports;
pub mod render_tiles;
pub mod tile_scheduler;
