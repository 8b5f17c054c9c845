//! Collaborators that supply frames to the pipeline and receive annotated
//! frames from it.

use crate::{CornerError, Result};
use image::{DynamicImage, ImageFormat, RgbaImage};
use log::*;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// Supplies frames until the stream ends.
pub trait FrameSource {
    /// The next frame, or `None` once the stream is exhausted.
    fn next_frame(&mut self) -> Result<Option<DynamicImage>>;
}

/// Receives each annotated frame.
pub trait FrameSink {
    fn show(&mut self, frame: &RgbaImage) -> Result<()>;
}

/// Where frames come from, classified from a user-supplied source string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// `camera`: the only camera on the system.
    Camera,
    /// `camera:N`: the N-th camera, counting from 1.
    SelectedCamera(u32),
    /// Anything containing `://`.
    Stream(String),
    /// An image file or a directory of images.
    File(PathBuf),
}

impl SourceKind {
    pub fn parse(source: &str) -> Self {
        if source == "camera" {
            SourceKind::Camera
        } else if let Some(index) = source
            .strip_prefix("camera:")
            .and_then(|index| index.parse().ok())
        {
            SourceKind::SelectedCamera(index)
        } else if source.contains("://") {
            SourceKind::Stream(source.to_owned())
        } else {
            SourceKind::File(PathBuf::from(source))
        }
    }

    /// Opens the source. Only image files and directories of images can be
    /// read; capture devices and streams are rejected.
    pub fn open(&self) -> Result<ImageSequence> {
        match self {
            SourceKind::Camera | SourceKind::SelectedCamera(_) => {
                Err(CornerError::UnsupportedSource("camera".to_owned()))
            }
            SourceKind::Stream(uri) => {
                Err(CornerError::UnsupportedSource(format!("stream {}", uri)))
            }
            SourceKind::File(path) if !path.exists() => {
                Err(CornerError::SourceNotFound(path.clone()))
            }
            SourceKind::File(path) if path.is_dir() => ImageSequence::from_directory(path),
            SourceKind::File(path) if is_image_path(path) => {
                Ok(ImageSequence::new(vec![path.clone()]))
            }
            SourceKind::File(path) => Err(CornerError::UnsupportedSource(format!(
                "video file {}",
                path.display()
            ))),
        }
    }
}

fn is_image_path(path: &Path) -> bool {
    ImageFormat::from_path(path).is_ok()
}

/// Frames read one by one from image files.
#[derive(Debug, Clone)]
pub struct ImageSequence {
    paths: VecDeque<PathBuf>,
}

impl ImageSequence {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self {
            paths: paths.into(),
        }
    }

    /// Every image in the directory, in file name order.
    pub fn from_directory(directory: impl AsRef<Path>) -> Result<Self> {
        let mut paths = std::fs::read_dir(directory.as_ref())?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        paths.retain(|path| path.is_file() && is_image_path(path));
        paths.sort();
        info!(
            "Found {} frames in {}",
            paths.len(),
            directory.as_ref().display()
        );
        Ok(Self::new(paths))
    }

    pub fn remaining(&self) -> usize {
        self.paths.len()
    }
}

impl FrameSource for ImageSequence {
    fn next_frame(&mut self) -> Result<Option<DynamicImage>> {
        let path = match self.paths.pop_front() {
            Some(path) => path,
            None => return Ok(None),
        };
        trace!("Reading frame {}", path.display());
        image::open(&path)
            .map(Some)
            .map_err(|source| CornerError::FrameImage { path, source })
    }
}

/// Frames already in memory.
#[derive(Debug, Clone)]
pub struct Frames<I>(pub I);

impl<I> FrameSource for Frames<I>
where
    I: Iterator<Item = DynamicImage>,
{
    fn next_frame(&mut self) -> Result<Option<DynamicImage>> {
        Ok(self.0.next())
    }
}

/// Writes every frame as a numbered PNG file.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    directory: PathBuf,
    written: usize,
}

impl DirectorySink {
    pub fn create(directory: impl Into<PathBuf>) -> Result<Self> {
        let directory = directory.into();
        std::fs::create_dir_all(&directory)?;
        Ok(Self {
            directory,
            written: 0,
        })
    }

    pub fn written(&self) -> usize {
        self.written
    }
}

impl FrameSink for DirectorySink {
    fn show(&mut self, frame: &RgbaImage) -> Result<()> {
        let path = self.directory.join(format!("frame_{:06}.png", self.written));
        frame
            .save(&path)
            .map_err(|source| CornerError::SinkImage { path, source })?;
        self.written += 1;
        Ok(())
    }
}

/// Discards frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn show(&mut self, _frame: &RgbaImage) -> Result<()> {
        Ok(())
    }
}
