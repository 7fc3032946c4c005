pub mod colour;
pub mod complex;
pub mod fractal_config;
pub mod iteration_buffer;
pub mod pixel_buffer;
pub mod point;
pub mod render_request;
