// Opens the default camera and converts frames into a buffer suitable for the window.
// Visual expectation: when main.rs calls `next_frame()`, you get a FrameBuffer
// of 0x00RRGGBB pixels, or a black placeholder when the camera can't deliver.

use air_painter::{Error, FrameBuffer};
use log::{info, warn};

// Bring in nokhwa types for camera control.
use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

// A small wrapper around nokhwa::Camera so our main loop stays clean.
pub struct CameraCapture {
    cam: Camera,
    width: u32,
    height: u32,
}

impl CameraCapture {
    /// Try to open camera `index` at a target resolution (falls back if not exact).
    /// On success, nothing is shown on screen yet — we just hold an open stream.
    pub fn new(index: u32, width: u32, height: u32) -> Result<Self, Error> {
        let idx = CameraIndex::Index(index);

        let fmt = CameraFormat::new(
            Resolution::new(width, height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            30,                // target FPS
        );

        // Ask for RGB frames, closest to our request.
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        let mut cam = Camera::new(idx, req)
            .map_err(|e| Error::CameraInit(format!("Create camera: {e}")))?;

        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        // The actual stream might choose a slightly different resolution.
        let actual = cam.resolution();

        Ok(Self {
            cam,
            width: actual.width(),
            height: actual.height(),
        })
    }

    /// Grab one frame from the camera and convert it to 0x00RRGGBB pixels.
    /// Blocks until the camera has a new frame.
    pub fn next_frame(&mut self) -> Result<FrameBuffer, Error> {
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;

        let rgb_img = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        let (w, h) = rgb_img.dimensions();
        let pixels = rgb_img
            .pixels()
            .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
            .collect();

        Ok(FrameBuffer { width: w as usize, height: h as usize, pixels })
    }

    /// Report the actual resolution the camera is delivering.
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Video for the frame loop. Never fails: without a working camera it hands
/// out black frames so painting still works (e.g. with the mouse).
pub struct VideoSource {
    camera: Option<CameraCapture>,
    width: usize,
    height: usize,
    placeholder: FrameBuffer,
}

impl VideoSource {
    pub fn open(index: u32, width: u32, height: u32) -> Self {
        let (camera, (w, h)) = match CameraCapture::new(index, width, height) {
            Ok(cam) => {
                let res = cam.resolution();
                info!("Camera {index} streaming at {}x{}", res.0, res.1);
                (Some(cam), res)
            }
            Err(e) => {
                warn!("{e}; continuing with a blank video feed");
                (None, (width, height))
            }
        };
        let (width, height) = (w as usize, h as usize);
        Self { camera, width, height, placeholder: FrameBuffer::black(width, height) }
    }

    pub fn resolution(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Next live frame, or the placeholder if capture failed or changed size.
    pub fn next_frame(&mut self) -> FrameBuffer {
        let Some(cam) = self.camera.as_mut() else {
            return self.placeholder.clone();
        };
        match cam.next_frame() {
            Ok(frame) if frame.width == self.width && frame.height == self.height => frame,
            Ok(frame) => {
                warn!(
                    "Camera delivered {}x{} instead of {}x{}, dropping frame",
                    frame.width, frame.height, self.width, self.height
                );
                self.placeholder.clone()
            }
            Err(e) => {
                warn!("{e}");
                self.placeholder.clone()
            }
        }
    }
}
