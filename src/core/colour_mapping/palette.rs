use crate::core::colour_mapping::theme::Theme;

/// Theme plus the two post-gradient flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaletteSelection {
    pub theme: Theme,
    pub invert: bool,
    pub nightmare: bool,
}

impl PaletteSelection {
    #[must_use]
    pub const fn new(theme: Theme) -> Self {
        Self {
            theme,
            invert: false,
            nightmare: false,
        }
    }

    #[must_use]
    pub const fn inverted(self, invert: bool) -> Self {
        Self { invert, ..self }
    }

    #[must_use]
    pub const fn nightmare(self, nightmare: bool) -> Self {
        Self { nightmare, ..self }
    }
}
