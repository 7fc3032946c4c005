use crate::core::colour_mapping::palette::PaletteSelection;
use crate::core::data::fractal_config::FractalConfig;
use crate::core::errors::configuration::ConfigurationError;

pub const MAX_DIMENSION: u32 = 16_384;

/// A validated snapshot of everything one render needs.
///
/// Construction is the only validation point; holding a `RenderRequest`
/// means the engine can compute it without further checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest {
    config: FractalConfig,
    width: u32,
    height: u32,
    palette: PaletteSelection,
}

impl RenderRequest {
    pub fn new(
        config: FractalConfig,
        width: u32,
        height: u32,
        palette: PaletteSelection,
    ) -> Result<Self, ConfigurationError> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(ConfigurationError::InvalidDimensions {
                width,
                height,
                max: MAX_DIMENSION,
            });
        }

        config.validate()?;

        Ok(Self {
            config,
            width,
            height,
            palette,
        })
    }

    /// Same size and palette, different view.
    pub fn with_config(&self, config: FractalConfig) -> Result<Self, ConfigurationError> {
        Self::new(config, self.width, self.height, self.palette)
    }

    #[must_use]
    pub fn config(&self) -> &FractalConfig {
        &self.config
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn palette(&self) -> PaletteSelection {
        self.palette
    }
}
