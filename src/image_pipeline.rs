//! Decodes image files into RGBA frames ready for the iced image
//! widget, and picks how the current frame should fit the viewport.
//!
//! GIFs are decoded whole, one handle per frame, so the browser can
//! step through them on a timer. Everything else decodes to a single
//! frame. Dropping a `LoadedImage` releases all of its frames, which is
//! what scopes animation ticks to the image currently on screen.

use iced::widget::image::Handle;
use iced::{ContentFit, Size};
use image::codecs::gif::GifDecoder;
use image::AnimationDecoder;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Images with both dimensions under this are shown centered and
/// unscaled; anything larger is scaled to fit the viewport.
pub const UNSCALED_MAX: u32 = 700;

/// Floor for GIF frame delays, so zero-delay frames still animate at a
/// sane rate.
const MIN_FRAME_DELAY: Duration = Duration::from_millis(20);

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("{path} contains no frames")]
    Empty { path: String },
}

#[derive(Debug, Clone)]
pub struct Frame {
    pub handle: Handle,
    pub delay: Duration,
}

/// A fully decoded image: one frame for static formats, every frame of
/// an animated GIF.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    frames: Vec<Frame>,
    current: usize,
    width: u32,
    height: u32,
}

impl LoadedImage {
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        log::info!("Loading image: {}", path.display());
        let is_gif = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("gif"));

        if is_gif {
            Self::load_gif(path)
        } else {
            Self::load_static(path)
        }
    }

    fn load_static(path: &Path) -> Result<Self, LoadError> {
        let decoded = image::open(path).map_err(|err| LoadError::Decode {
            path: path.display().to_string(),
            source: err,
        })?;
        let rgba = decoded.into_rgba8();
        let (width, height) = rgba.dimensions();
        let handle = Handle::from_rgba(width, height, rgba.into_raw());

        Ok(Self {
            frames: vec![Frame {
                handle,
                delay: Duration::ZERO,
            }],
            current: 0,
            width,
            height,
        })
    }

    fn load_gif(path: &Path) -> Result<Self, LoadError> {
        let file = File::open(path).map_err(|err| LoadError::Open {
            path: path.display().to_string(),
            source: err,
        })?;
        let decoder = GifDecoder::new(BufReader::new(file)).map_err(|err| LoadError::Decode {
            path: path.display().to_string(),
            source: err,
        })?;

        let mut frames = Vec::new();
        let mut dimensions = None;
        for frame in decoder.into_frames() {
            let frame = frame.map_err(|err| LoadError::Decode {
                path: path.display().to_string(),
                source: err,
            })?;
            let delay = Duration::from(frame.delay()).max(MIN_FRAME_DELAY);
            let buffer = frame.into_buffer();
            let (width, height) = buffer.dimensions();
            dimensions.get_or_insert((width, height));
            frames.push(Frame {
                handle: Handle::from_rgba(width, height, buffer.into_raw()),
                delay,
            });
        }

        let (width, height) = dimensions.ok_or_else(|| LoadError::Empty {
            path: path.display().to_string(),
        })?;

        Ok(Self {
            frames,
            current: 0,
            width,
            height,
        })
    }

    pub fn current_handle(&self) -> &Handle {
        &self.frames[self.current].handle
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }

    /// Delay until the next frame tick, for the animation subscription.
    pub fn frame_delay(&self) -> Duration {
        self.frames[self.current].delay
    }

    pub fn advance_frame(&mut self) {
        if self.frames.len() > 1 {
            self.current = (self.current + 1) % self.frames.len();
        }
    }

    pub fn fit_mode(&self, viewport: Size) -> ContentFit {
        fit_mode(self.width, self.height, viewport)
    }
}

/// Center small images at their native size; scale everything else to
/// fit the viewport, preserving aspect ratio. A small image that no
/// longer fits a shrunken viewport falls back to scale-to-fit, which is
/// why this is re-evaluated on every window resize.
pub fn fit_mode(width: u32, height: u32, viewport: Size) -> ContentFit {
    let fits_viewport = width as f32 <= viewport.width && height as f32 <= viewport.height;
    if width < UNSCALED_MAX && height < UNSCALED_MAX && fits_viewport {
        ContentFit::None
    } else {
        ContentFit::Contain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Delay, Rgba, RgbaImage};
    use tempfile::tempdir;

    const VIEWPORT: Size = Size {
        width: 1920.0,
        height: 1080.0,
    };

    #[test]
    fn small_image_is_shown_unscaled() {
        assert_eq!(fit_mode(699, 699, VIEWPORT), ContentFit::None);
        assert_eq!(fit_mode(64, 64, VIEWPORT), ContentFit::None);
    }

    #[test]
    fn large_image_is_scaled_to_fit() {
        assert_eq!(fit_mode(700, 100, VIEWPORT), ContentFit::Contain);
        assert_eq!(fit_mode(100, 700, VIEWPORT), ContentFit::Contain);
        assert_eq!(fit_mode(4000, 3000, VIEWPORT), ContentFit::Contain);
    }

    #[test]
    fn small_image_in_tiny_viewport_is_scaled_to_fit() {
        let viewport = Size {
            width: 320.0,
            height: 240.0,
        };
        assert_eq!(fit_mode(640, 480, viewport), ContentFit::Contain);
    }

    #[test]
    fn load_static_png() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("swatch.png");
        RgbaImage::from_pixel(8, 6, Rgba([200, 10, 10, 255]))
            .save(&path)
            .expect("failed to write png");

        let loaded = LoadedImage::load(&path).expect("png should decode");

        assert_eq!(loaded.dimensions(), (8, 6));
        assert!(!loaded.is_animated());
    }

    #[test]
    fn load_animated_gif_applies_delay_floor() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("anim.gif");
        {
            let file = File::create(&path).expect("failed to create gif");
            let mut encoder = image::codecs::gif::GifEncoder::new(file);
            let frames = (0..2u8).map(|i| {
                image::Frame::from_parts(
                    RgbaImage::from_pixel(4, 4, Rgba([i * 100, 0, 0, 255])),
                    0,
                    0,
                    Delay::from_numer_denom_ms(0, 1),
                )
            });
            encoder
                .encode_frames(frames)
                .expect("failed to encode gif");
        }

        let mut loaded = LoadedImage::load(&path).expect("gif should decode");

        assert!(loaded.is_animated());
        assert!(loaded.frame_delay() >= Duration::from_millis(20));

        loaded.advance_frame();
        loaded.advance_frame();
        // Two frames: advancing twice wraps back to the first.
        assert!(loaded.is_animated());
    }

    #[test]
    fn load_of_corrupt_file_fails_without_panicking() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"definitely not a jpeg").expect("write fixture");

        assert!(matches!(
            LoadedImage::load(&path),
            Err(LoadError::Decode { .. })
        ));
    }

    #[test]
    fn load_of_missing_gif_reports_open_error() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("missing.gif");

        assert!(matches!(
            LoadedImage::load(&path),
            Err(LoadError::Open { .. })
        ));
    }
}
