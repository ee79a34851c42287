use ndarray::{Array2, ArrayView3};

use super::error::CoreError;

/// A sampled video frame: contiguous pixel bytes in row-major order.
///
/// Pixel layout is `height x width x channels`. One channel is grayscale,
/// three or more are RGB with any extra channel ignored.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
        channels: u8,
        index: usize,
    ) -> Result<Self, CoreError> {
        let expected = (width as usize) * (height as usize) * (channels as usize);
        if data.len() != expected || channels == 0 {
            return Err(CoreError::FrameShape {
                actual: data.len(),
                width,
                height,
                channels,
            });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
            index,
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Position of this frame in the source stream.
    pub fn index(&self) -> usize {
        self.index
    }

    /// `height x width x channels` view of the pixel bytes.
    pub fn as_ndarray(&self) -> Result<ArrayView3<'_, u8>, CoreError> {
        ArrayView3::from_shape(
            (
                self.height as usize,
                self.width as usize,
                self.channels as usize,
            ),
            &self.data,
        )
        .map_err(|_| self.shape_error())
    }

    /// Luma of the pixel at `(row, col)` using BT.601 weights.
    pub fn luma(&self, row: usize, col: usize) -> u8 {
        let i = (row * self.width as usize + col) * self.channels as usize;
        if self.channels < 3 {
            return self.data[i];
        }
        let r = self.data[i] as f64;
        let g = self.data[i + 1] as f64;
        let b = self.data[i + 2] as f64;
        (0.299 * r + 0.587 * g + 0.114 * b).round().min(255.0) as u8
    }

    /// Luma of every pixel, `height x width`.
    pub fn luma_plane(&self) -> Array2<u8> {
        Array2::from_shape_fn((self.height as usize, self.width as usize), |(r, c)| {
            self.luma(r, c)
        })
    }

    fn shape_error(&self) -> CoreError {
        CoreError::FrameShape {
            actual: self.data.len(),
            width: self.width,
            height: self.height,
            channels: self.channels,
        }
    }
}
