use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueHint};

use crate::core::animation::animation_plan::{AnimationPlan, DEFAULT_FRAME_COUNT};
use crate::core::colour_mapping::palette::PaletteSelection;
use crate::core::colour_mapping::theme::Theme;
use crate::core::data::complex::Complex;
use crate::core::data::fractal_config::{DEFAULT_MAX_ITERATIONS, DEFAULT_POWER, FractalConfig};
use crate::core::data::render_request::RenderRequest;
use crate::core::errors::configuration::ConfigurationError;
use crate::core::fractals::fractal_kind::FractalKind;
use crate::core::fractals::presets::Preset;

#[derive(Debug, Parser)]
#[command(author, version, about = "Escape-time fractal renderer")]
pub struct Cli {
    /// Worker threads for tile rendering [default: one per hardware thread]
    #[arg(long, global = true)]
    pub workers: Option<NonZeroUsize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render a single image to a PPM file
    Render(RenderArgs),

    /// Render a zoom sequence to numbered PPM files
    Animate(AnimateArgs),
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Output file
    #[arg(short, long, default_value = "fractal.ppm", value_hint = ValueHint::FilePath)]
    pub output: PathBuf,
}

#[derive(Debug, Args)]
pub struct AnimateArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Zoom of the last frame
    #[arg(long, default_value_t = 100.0)]
    pub end_zoom: f64,

    /// Real part of the last frame's center [default: starting center]
    #[arg(long, allow_negative_numbers = true)]
    pub end_center_re: Option<f64>,

    /// Imaginary part of the last frame's center [default: starting center]
    #[arg(long, allow_negative_numbers = true)]
    pub end_center_im: Option<f64>,

    /// Number of frames
    #[arg(long, default_value_t = DEFAULT_FRAME_COUNT)]
    pub frames: usize,

    /// Display time per frame in milliseconds
    #[arg(long, default_value_t = 100)]
    pub frame_ms: u64,

    /// Directory receiving frame_0000.ppm, frame_0001.ppm, ...
    #[arg(long, default_value = "frames", value_hint = ValueHint::DirPath)]
    pub output_dir: PathBuf,
}

/// Everything that makes up one view of one fractal.
#[derive(Debug, Args)]
pub struct ViewArgs {
    /// Mandelbrot, Julia, Burning Ship or Tricorn
    #[arg(long, default_value = "mandelbrot")]
    pub fractal: FractalKind,

    /// Start from a built-in view (spiral, seahorse); replaces fractal, center, zoom, power and Julia constant
    #[arg(long)]
    pub preset: Option<Preset>,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub center_re: f64,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub center_im: f64,

    #[arg(long, default_value_t = 1.0)]
    pub zoom: f64,

    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub iterations: u32,

    #[arg(long, default_value_t = DEFAULT_POWER, allow_negative_numbers = true)]
    pub power: f64,

    #[arg(long, default_value_t = -0.7, allow_negative_numbers = true)]
    pub julia_re: f64,

    #[arg(long, default_value_t = 0.27, allow_negative_numbers = true)]
    pub julia_im: f64,

    /// Horizontal drag in pixels applied to the view
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub pan_x: f64,

    /// Vertical drag in pixels applied to the view
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub pan_y: f64,

    /// Scroll-wheel notches applied after panning; negative zooms out
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub zoom_steps: i32,

    #[arg(long, default_value_t = 800)]
    pub width: u32,

    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Forest, City, Dream, Ocean, Desert, Space, Rainbow, Fire, Ice or Inferno
    #[arg(long, default_value = "dream")]
    pub theme: Theme,

    #[arg(long)]
    pub invert: bool,

    #[arg(long)]
    pub nightmare: bool,
}

impl ViewArgs {
    #[must_use]
    pub fn config(&self) -> FractalConfig {
        let base = match self.preset {
            Some(preset) => FractalConfig {
                max_iterations: self.iterations,
                ..preset.config()
            },
            None => FractalConfig {
                kind: self.fractal,
                center: Complex::new(self.center_re, self.center_im),
                zoom: self.zoom,
                max_iterations: self.iterations,
                power: self.power,
                julia_constant: Complex::new(self.julia_re, self.julia_im),
            },
        };

        let panned = if self.pan_x != 0.0 || self.pan_y != 0.0 {
            base.panned_by_pixels(self.pan_x, self.pan_y, self.width, self.height)
        } else {
            base
        };

        if self.zoom_steps != 0 {
            panned.zoomed_by_steps(self.zoom_steps)
        } else {
            panned
        }
    }

    #[must_use]
    pub fn palette(&self) -> PaletteSelection {
        PaletteSelection::new(self.theme)
            .inverted(self.invert)
            .nightmare(self.nightmare)
    }

    pub fn request(&self) -> Result<RenderRequest, ConfigurationError> {
        RenderRequest::new(self.config(), self.width, self.height, self.palette())
    }
}

impl AnimateArgs {
    pub fn plan(&self) -> Result<AnimationPlan, ConfigurationError> {
        let start = self.view.request()?;
        let start_center = start.config().center;
        let end_center = Complex::new(
            self.end_center_re.unwrap_or(start_center.real),
            self.end_center_im.unwrap_or(start_center.imag),
        );

        AnimationPlan::towards(
            &start,
            end_center,
            self.end_zoom,
            self.frames,
            Duration::from_millis(self.frame_ms),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::fractal_config::DEFAULT_JULIA_CONSTANT;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("fractal_weaver").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn render_defaults_match_the_base_view() {
        let Command::Render(args) = parse(&["render"]).command else {
            panic!("expected render");
        };
        let request = args.view.request().unwrap();

        assert_eq!(*request.config(), FractalConfig::default());
        assert_eq!(request.config().julia_constant, DEFAULT_JULIA_CONSTANT);
        assert_eq!((request.width(), request.height()), (800, 600));
        assert_eq!(request.palette(), PaletteSelection::new(Theme::Dream));
        assert_eq!(args.output, PathBuf::from("fractal.ppm"));
    }

    #[test]
    fn names_and_negative_numbers_parse() {
        let cli = parse(&[
            "--workers",
            "3",
            "render",
            "--fractal",
            "burning-ship",
            "--center-re",
            "-1.75",
            "--power",
            "-2",
            "--theme",
            "Inferno",
            "--invert",
        ]);
        let Command::Render(args) = cli.command else {
            panic!("expected render");
        };
        let config = args.view.config();

        assert_eq!(cli.workers, NonZeroUsize::new(3));
        assert_eq!(config.kind, FractalKind::BurningShip);
        assert_eq!(config.center, Complex::new(-1.75, 0.0));
        assert_eq!(config.power, -2.0);
        assert!(args.view.palette().invert);
        assert_eq!(args.view.palette().theme, Theme::Inferno);
    }

    #[test]
    fn unknown_theme_is_rejected_by_the_parser() {
        let result = Cli::try_parse_from(["fractal_weaver", "render", "--theme", "neon"]);

        assert!(result.is_err());
    }

    #[test]
    fn invalid_view_surfaces_configuration_error() {
        let Command::Render(args) = parse(&["render", "--zoom", "0"]).command else {
            panic!("expected render");
        };

        assert!(matches!(
            args.view.request(),
            Err(ConfigurationError::ZoomOutOfRange { .. })
        ));
    }

    #[test]
    fn preset_replaces_view_but_keeps_iterations() {
        let Command::Render(args) =
            parse(&["render", "--preset", "seahorse", "--iterations", "500"]).command
        else {
            panic!("expected render");
        };
        let config = args.view.config();

        assert_eq!(config.zoom, 100.0);
        assert_eq!(config.center, Complex::new(-0.75, 0.1));
        assert_eq!(config.max_iterations, 500);
    }

    #[test]
    fn zoom_steps_apply_wheel_zoom() {
        let Command::Render(args) = parse(&["render", "--zoom-steps", "2"]).command else {
            panic!("expected render");
        };

        assert!((args.view.config().zoom - 1.44).abs() < 1e-12);
    }

    #[test]
    fn animate_plan_uses_frame_arguments() {
        let Command::Animate(args) = parse(&[
            "animate",
            "--frames",
            "5",
            "--frame-ms",
            "40",
            "--end-zoom",
            "16",
            "--end-center-re",
            "-0.5",
        ])
        .command
        else {
            panic!("expected animate");
        };
        let plan = args.plan().unwrap();

        assert_eq!(plan.frame_count(), 5);
        assert_eq!(plan.frame_duration(), Duration::from_millis(40));
        assert_eq!(plan.frames()[4].config().zoom, 16.0);
        assert_eq!(plan.frames()[4].config().center, Complex::new(-0.5, 0.0));
        assert_eq!(args.output_dir, PathBuf::from("frames"));
    }
}
