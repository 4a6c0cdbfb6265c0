use clap::ValueEnum;
use supports_color::Stream;

/// When listings are painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum ColorWhen {
    /// Only when stdout is a terminal that supports color.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorWhen {
    pub fn is_enabled(self) -> bool {
        match self {
            ColorWhen::Auto => supports_color::on(Stream::Stdout).is_some(),
            ColorWhen::Always => true,
            ColorWhen::Never => false,
        }
    }
}
