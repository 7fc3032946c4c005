mod controllers;
mod core;
mod presenters;

pub use controllers::cli::args::{AnimateArgs, Cli, Command, RenderArgs, ViewArgs};
pub use controllers::cli::cli_controller::{CliController, CliError};
pub use controllers::ports::file_presenter::FilePresenterPort;
pub use presenters::file::ppm::PpmFilePresenter;

pub use crate::core::actions::cancellation::{
    CANCEL_CHECK_INTERVAL_PIXELS, CancelToken, CancellationToken, NeverCancel,
};
pub use crate::core::actions::generate_fractal::render_tiles::{RenderOutcome, WorkerFault};
pub use crate::core::actions::generate_fractal::tile_scheduler::{
    IterationRender, PixelRender, RenderReport, TileScheduler,
};
pub use crate::core::actions::generate_pixel_buffer::map_palette::{map_palette, map_palette_with};
pub use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
pub use crate::core::actions::worker_pool::WorkerPoolError;
pub use crate::core::animation::animation_plan::{
    AnimationPlan, DEFAULT_FRAME_COUNT, DEFAULT_FRAME_DURATION, interpolate_zoom,
};
pub use crate::core::animation::zoom_animator::{AnimationFrame, FrameSequence, ZoomAnimator};
pub use crate::core::colour_mapping::gradient::ThemeGradient;
pub use crate::core::colour_mapping::palette::PaletteSelection;
pub use crate::core::colour_mapping::theme::{ColourStop, Theme};
pub use crate::core::data::colour::Colour;
pub use crate::core::data::complex::Complex;
pub use crate::core::data::fractal_config::{FractalConfig, MAX_ZOOM};
pub use crate::core::data::iteration_buffer::{Escape, IterationBuffer, IterationBufferError};
pub use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferData, PixelBufferError};
pub use crate::core::data::point::Point;
pub use crate::core::data::render_request::{MAX_DIMENSION, RenderRequest};
pub use crate::core::errors::configuration::ConfigurationError;
pub use crate::core::fractals::escape_time::evaluate::{NumericAnomaly, evaluate};
pub use crate::core::fractals::fractal_kind::FractalKind;
pub use crate::core::fractals::presets::Preset;
pub use crate::core::util::numeric_field::{NumericField, NumericFieldError, pixel_to_point};
