use crate::error::{LivewireError, Result};
use crate::geometry::limits::in_image_bounds;
use crate::geometry::transform::SliceTransform;
use crate::model::Pixel;

/// One 2D image plane as handed over by a viewport.
#[derive(Clone, Debug)]
pub struct SliceImage {
    pub scalars: Vec<f32>,
    pub width: u32,
    pub height: u32,
    /// 1 (grayscale) or 3 (interleaved RGB)
    pub channels: u32,
    pub transform: SliceTransform,
    /// Window (VOI) range used to normalise intensities, if the view has one.
    pub voi_range: Option<(f32, f32)>,
    pub modality: Option<String>,
}

impl SliceImage {
    pub fn new(scalars: Vec<f32>, width: u32, height: u32, channels: u32, transform: SliceTransform) -> Result<Self> {
        let img = SliceImage {
            scalars,
            width,
            height,
            channels,
            transform,
            voi_range: None,
            modality: None,
        };
        img.validate()?;
        Ok(img)
    }

    pub fn with_voi_range(mut self, lower: f32, upper: f32) -> Self {
        self.voi_range = Some((lower, upper));
        self
    }

    pub fn with_modality(mut self, modality: &str) -> Self {
        self.modality = Some(modality.to_string());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !in_image_bounds(self.width, self.height) || !(self.channels == 1 || self.channels == 3) {
            return Err(LivewireError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let expected = self.width as usize * self.height as usize * self.channels as usize;
        if self.scalars.len() != expected {
            return Err(LivewireError::ImageSizeMismatch {
                expected,
                got: self.scalars.len(),
                width: self.width,
                height: self.height,
                channels: self.channels,
            });
        }
        if self.scalars.iter().any(|v| !v.is_finite()) {
            return Err(LivewireError::NonFiniteImage);
        }
        Ok(())
    }

    pub fn contains(&self, p: Pixel) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as u32) < self.width && (p.y as u32) < self.height
    }

    /// Single-channel view of the scalars; RGB is reduced with Rec.601 luma.
    pub fn grayscale(&self) -> Vec<f32> {
        match self.channels {
            3 => self
                .scalars
                .chunks_exact(3)
                .map(|c| 0.299 * c[0] + 0.587 * c[1] + 0.114 * c[2])
                .collect(),
            _ => self.scalars.clone(),
        }
    }
}
