use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("cannot plot a {0}-dimensional walk; only 1, 2 and 3 dimensions are drawn")]
    UnsupportedDimensions(usize),

    #[error("cannot plot an empty walk")]
    EmptyPath,

    #[error("event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("surface: {0}")]
    Surface(String),

    #[error("renderer: {0}")]
    Renderer(String),
}
