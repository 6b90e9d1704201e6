// A tiny error type so we don't rely on anyhow/thiserror.
// Every variant states *where* things went wrong.
use std::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    WindowInit(String),   // Creating the window failed
    WindowUpdate(String), // Updating the window buffer failed
    CameraInit(String),   // Opening/starting the camera failed
    CameraFrame(String),  // Grabbing/decoding a frame failed
    SizeMismatch(String), // Two rasters that must line up don't
    Export(String),       // Writing a painting to disk failed
}

impl Display for Error {
    // This decides how the error is printed to your console.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::CameraInit(s) => write!(f, "Camera init error: {s}"),
            Error::CameraFrame(s) => write!(f, "Camera frame error: {s}"),
            Error::SizeMismatch(s) => write!(f, "Raster size mismatch: {s}"),
            Error::Export(s) => write!(f, "Export error: {s}"),
        }
    }
}

impl std::error::Error for Error {}
