//! Video frame types and processing

use image::RgbImage;

/// Decoded RGB video frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFrame {
    /// RGB pixel data (width * height * 3)
    pub data: Vec<u8>,
    /// Frame width
    pub width: u32,
    /// Frame height
    pub height: u32,
    /// Capture timestamp (nanoseconds)
    pub timestamp_ns: u64,
    /// Frame sequence number
    pub sequence: u32,
}

impl VideoFrame {
    /// Create a new video frame from raw RGB data.
    ///
    /// Returns `None` if the buffer length does not match the dimensions.
    pub fn new(data: Vec<u8>, width: u32, height: u32, timestamp_ns: u64, sequence: u32) -> Option<Self> {
        if data.len() != (width as usize) * (height as usize) * 3 {
            return None;
        }
        Some(Self {
            data,
            width,
            height,
            timestamp_ns,
            sequence,
        })
    }

    /// Create a frame filled with a single color.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..(width * height) {
            data.extend_from_slice(&rgb);
        }
        Self {
            data,
            width,
            height,
            timestamp_ns: 0,
            sequence: 0,
        }
    }

    /// Get pixel at (x, y)
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 3) as usize;
        Some([self.data[idx], self.data[idx + 1], self.data[idx + 2]])
    }

    /// Set pixel at (x, y); out-of-bounds writes are ignored.
    pub fn put_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = ((y * self.width + x) * 3) as usize;
        self.data[idx..idx + 3].copy_from_slice(&rgb);
    }

    /// Pixel coordinates of the frame center (floor division).
    pub fn center(&self) -> (i32, i32) {
        ((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Convert to grayscale
    pub fn to_grayscale(&self) -> Vec<u8> {
        let mut gray = Vec::with_capacity((self.width * self.height) as usize);
        for pixel in self.data.chunks(3) {
            // Luminance formula: 0.299*R + 0.587*G + 0.114*B
            let y = (pixel[0] as f32 * 0.299
                   + pixel[1] as f32 * 0.587
                   + pixel[2] as f32 * 0.114) as u8;
            gray.push(y);
        }
        gray
    }

    /// View this frame as an [`RgbImage`], consuming the buffer.
    ///
    /// The caller writes the buffer back with [`VideoFrame::restore`]. Used
    /// by the overlay renderer to draw in place without copying pixels.
    pub fn take_image(&mut self) -> RgbImage {
        RgbImage::from_raw(self.width, self.height, std::mem::take(&mut self.data))
            .expect("frame buffer matches dimensions")
    }

    /// Write an image buffer back after [`VideoFrame::take_image`].
    pub fn restore(&mut self, image: RgbImage) {
        debug_assert_eq!(image.dimensions(), (self.width, self.height));
        self.data = image.into_raw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_buffer_length() {
        assert!(VideoFrame::new(vec![0; 4 * 4 * 3], 4, 4, 0, 0).is_some());
        assert!(VideoFrame::new(vec![0; 10], 4, 4, 0, 0).is_none());
    }

    #[test]
    fn test_pixel_roundtrip() {
        let mut frame = VideoFrame::filled(8, 8, [0, 0, 0]);
        frame.put_pixel(3, 5, [10, 20, 30]);
        assert_eq!(frame.get_pixel(3, 5), Some([10, 20, 30]));
        assert_eq!(frame.get_pixel(8, 0), None);

        // Out-of-bounds write is a no-op
        frame.put_pixel(100, 100, [1, 1, 1]);
    }

    #[test]
    fn test_center_uses_floor_division() {
        let frame = VideoFrame::filled(641, 481, [0, 0, 0]);
        assert_eq!(frame.center(), (320, 240));
    }

    #[test]
    fn test_grayscale_luminance() {
        let mut frame = VideoFrame::filled(2, 1, [0, 0, 0]);
        frame.put_pixel(0, 0, [255, 255, 255]);
        let gray = frame.to_grayscale();
        assert_eq!(gray.len(), 2);
        assert!(gray[0] >= 254);
        assert_eq!(gray[1], 0);
    }

    #[test]
    fn test_take_and_restore_preserves_pixels() {
        let mut frame = VideoFrame::filled(4, 4, [7, 8, 9]);
        let copy = frame.clone();
        let img = frame.take_image();
        frame.restore(img);
        assert_eq!(frame, copy);
    }
}
