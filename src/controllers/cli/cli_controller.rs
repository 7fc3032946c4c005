use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::controllers::cli::args::Command;
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::actions::cancellation::CancelToken;
use crate::core::actions::generate_fractal::render_tiles::RenderOutcome;
use crate::core::actions::generate_fractal::tile_scheduler::{RenderReport, TileScheduler};
use crate::core::animation::animation_plan::AnimationPlan;
use crate::core::animation::zoom_animator::ZoomAnimator;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::render_request::RenderRequest;
use crate::core::errors::configuration::ConfigurationError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("rendering was cancelled")]
    Cancelled,
}

/// Runs CLI commands against a scheduler and hands images to a presenter.
pub struct CliController<'s, P: FilePresenterPort> {
    presenter: P,
    scheduler: &'s TileScheduler,
}

impl<'s, P: FilePresenterPort> CliController<'s, P> {
    pub fn new(presenter: P, scheduler: &'s TileScheduler) -> Self {
        Self {
            presenter,
            scheduler,
        }
    }

    pub fn run<C: CancelToken>(&self, command: &Command, cancel: &C) -> Result<(), CliError> {
        match command {
            Command::Render(args) => {
                let request = args.view.request()?;
                self.render(&request, &args.output, cancel)?;
            }
            Command::Animate(args) => {
                let plan = args.plan()?;
                self.animate(&plan, &args.output_dir, cancel)?;
            }
        }

        Ok(())
    }

    pub fn render<C: CancelToken>(
        &self,
        request: &RenderRequest,
        output: &Path,
        cancel: &C,
    ) -> Result<RenderReport, CliError> {
        let config = request.config();

        info!(
            "Rendering {} at zoom {} ({}x{}, {} iterations)",
            config.kind,
            config.zoom,
            request.width(),
            request.height(),
            config.max_iterations
        );

        let render = match self.scheduler.render_pixels(request, cancel) {
            RenderOutcome::Completed(render) => render,
            RenderOutcome::Cancelled => return Err(CliError::Cancelled),
        };

        log_report(&render.report);
        self.write(&render.pixels, output)?;
        info!("Wrote {}", output.display());

        Ok(render.report)
    }

    /// Writes one numbered file per frame and returns how many were written.
    ///
    /// Frames written before a cancellation stay on disk.
    pub fn animate<C: CancelToken>(
        &self,
        plan: &AnimationPlan,
        output_dir: &Path,
        cancel: &C,
    ) -> Result<usize, CliError> {
        std::fs::create_dir_all(output_dir).map_err(|source| CliError::Write {
            path: output_dir.to_path_buf(),
            source,
        })?;

        info!(
            "Animating {} frames into {}",
            plan.frame_count(),
            output_dir.display()
        );

        let animator = ZoomAnimator::new(self.scheduler);
        let mut frames = animator.run(plan, cancel);
        let mut written = 0;

        for frame in frames.by_ref() {
            let path = output_dir.join(format!(
                "frame_{:04}.{}",
                frame.index,
                self.presenter.extension()
            ));

            log_report(&frame.report);
            self.write(&frame.pixels, &path)?;
            info!(
                "Frame {}/{} at zoom {:.3}",
                frame.index + 1,
                plan.frame_count(),
                frame.config.zoom
            );
            written += 1;
        }

        if frames.was_cancelled() {
            warn!(written, "animation cancelled");
            return Err(CliError::Cancelled);
        }

        Ok(written)
    }

    fn write(&self, pixels: &PixelBuffer, path: &Path) -> Result<(), CliError> {
        self.presenter
            .present(pixels, path)
            .map_err(|source| CliError::Write {
                path: path.to_path_buf(),
                source,
            })
    }
}

// anomalies and faults are logged where they are found
fn log_report(report: &RenderReport) {
    info!("Duration:   {:?}", report.elapsed);
}
