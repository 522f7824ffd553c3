use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create pixel surface: {0}")]
    Surface(#[from] pixels::Error),

    #[error("failed to read font {}: {source}", path.display())]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("font data is not a valid TrueType/OpenType font")]
    FontParse,
}

pub type Result<T> = std::result::Result<T, PanelError>;
