//! In-memory 1bpp framebuffer for the 2.7" panel.

use crate::protocol::{BUFFER_SIZE, HEIGHT, LINE_BYTES, WIDTH};

/// 1bpp framebuffer in the panel's native portrait orientation.
///
/// Bit mapping within one line byte: bit 7 is the first pixel in that byte.
/// A set bit is a white pixel (the panel convention); `set_pixel(.., true)`
/// inks the pixel black.
#[derive(Clone)]
pub struct FrameBuffer {
    bytes: [u8; BUFFER_SIZE],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Creates a new all-white framebuffer.
    pub const fn new() -> Self {
        Self {
            bytes: [0xFF; BUFFER_SIZE],
        }
    }

    /// Returns the underlying framebuffer bytes.
    pub fn bytes(&self) -> &[u8; BUFFER_SIZE] {
        &self.bytes
    }

    /// Clears the framebuffer to black (`on = true`) or white (`on = false`).
    pub fn clear(&mut self, on: bool) {
        self.bytes.fill(if on { 0x00 } else { 0xFF });
    }

    /// Sets a pixel; `on = true` inks it black.
    ///
    /// Returns `true` when the pixel is in bounds, `false` otherwise.
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }

        let byte_index = y * LINE_BYTES + (x / 8);
        let bit_mask = 1u8 << (7 - (x % 8));

        if on {
            self.bytes[byte_index] &= !bit_mask;
        } else {
            self.bytes[byte_index] |= bit_mask;
        }

        true
    }

    /// Reads a pixel state; `Some(true)` is black.
    pub fn pixel(&self, x: usize, y: usize) -> Option<bool> {
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }

        let byte_index = y * LINE_BYTES + (x / 8);
        let bit_mask = 1u8 << (7 - (x % 8));
        Some((self.bytes[byte_index] & bit_mask) == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_framebuffer_is_white() {
        let fb = FrameBuffer::new();
        assert!(fb.bytes().iter().all(|b| *b == 0xFF));
        assert_eq!(fb.pixel(0, 0), Some(false));
    }

    #[test]
    fn pixel_bit_mapping_is_msb_first_within_byte() {
        let mut fb = FrameBuffer::new();

        assert!(fb.set_pixel(0, 0, true));
        assert!(fb.set_pixel(7, 0, true));
        assert!(fb.set_pixel(8, 0, true));

        assert_eq!(fb.bytes()[0], 0b0111_1110);
        assert_eq!(fb.bytes()[1], 0b0111_1111);
    }

    #[test]
    fn out_of_bounds_pixel_is_ignored() {
        let mut fb = FrameBuffer::new();

        assert!(!fb.set_pixel(WIDTH, 0, true));
        assert!(!fb.set_pixel(0, HEIGHT, true));
        assert_eq!(fb.bytes()[0], 0xFF);
    }

    #[test]
    fn set_and_read_last_pixel() {
        let mut fb = FrameBuffer::new();

        assert!(fb.set_pixel(WIDTH - 1, HEIGHT - 1, true));
        assert_eq!(fb.pixel(WIDTH - 1, HEIGHT - 1), Some(true));
        assert_eq!(fb.pixel(WIDTH, HEIGHT), None);
    }

    #[test]
    fn ink_then_erase_restores_white() {
        let mut fb = FrameBuffer::new();

        assert!(fb.set_pixel(10, 10, true));
        assert_eq!(fb.pixel(10, 10), Some(true));
        assert!(fb.set_pixel(10, 10, false));
        assert_eq!(fb.pixel(10, 10), Some(false));
    }
}
