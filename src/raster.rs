//! Grayscale rasters handed to region providers.

use crate::types::Rect;

/// A row-major 8-bit grayscale buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayRaster {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl GrayRaster {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(data.len(), (width as usize) * (height as usize));
        Self {
            data,
            width,
            height,
        }
    }

    pub fn from_fn<F>(width: u32, height: u32, f: F) -> Self
    where
        F: Fn(u32, u32) -> u8,
    {
        let mut data = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Take ownership of an `image` luma buffer.
    pub fn from_luma(image: image::GrayImage) -> Self {
        let (width, height) = image.dimensions();
        Self::new(image.into_raw(), width, height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Intensity at `(x, y)`, or 0 outside the raster.
    pub fn get_pixel(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return 0;
        }
        self.data[(y as usize) * (self.width as usize) + x as usize]
    }

    /// Spread intensities over the full 0..=255 range using the cumulative
    /// histogram. A raster holding a single intensity is returned as is.
    pub fn equalize_histogram(&self) -> Self {
        let mut histogram = [0u64; 256];
        for &value in &self.data {
            histogram[value as usize] += 1;
        }

        let total = self.data.len() as u64;
        let Some(first) = histogram.iter().position(|&count| count > 0) else {
            return self.clone();
        };
        let cdf_min = histogram[first];
        if cdf_min == total {
            return self.clone();
        }

        let scale = 255.0 / (total - cdf_min) as f64;
        let mut lut = [0u8; 256];
        let mut cdf = 0u64;
        for (value, &count) in histogram.iter().enumerate() {
            cdf += count;
            if value > first {
                lut[value] = ((cdf - cdf_min) as f64 * scale).round().min(255.0) as u8;
            }
        }

        let data = self.data.iter().map(|&v| lut[v as usize]).collect();
        Self::new(data, self.width, self.height)
    }

    /// Intersection of `rect` with the raster, or `None` when they do not
    /// overlap.
    pub fn clip(&self, rect: &Rect) -> Option<Rect> {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = (i64::from(rect.x) + i64::from(rect.w)).min(i64::from(self.width)) as i32;
        let y1 = (i64::from(rect.y) + i64::from(rect.h)).min(i64::from(self.height)) as i32;
        Rect::new(x0, y0, x1 - x0, y1 - y0).ok()
    }

    /// Copy out the part of the raster covered by `rect`, clipped to bounds.
    ///
    /// Returns the sub-raster together with the clipped box, whose origin is
    /// the sub-raster's offset within this raster.
    pub fn crop(&self, rect: &Rect) -> Option<(Self, Rect)> {
        let bounds = self.clip(rect)?;
        let (x0, y0) = (bounds.x as usize, bounds.y as usize);
        let (w, h) = (bounds.w as usize, bounds.h as usize);
        let stride = self.width as usize;

        let mut data = Vec::with_capacity(w * h);
        for row in y0..y0 + h {
            let start = row * stride + x0;
            data.extend_from_slice(&self.data[start..start + w]);
        }
        Some((Self::new(data, bounds.w as u32, bounds.h as u32), bounds))
    }
}
