//! Quantized output image and PPM serialization.

use bytemuck::{Pod, Zeroable};
use std::fmt;
use std::io::{self, Write};

/// One 8-bit RGB pixel.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Fixed-size grid of quantized pixels, row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at column `x`, row `y`.
    pub fn get(&self, x: u32, y: u32) -> Rgb {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at column `x`, row `y`.
    pub fn set(&mut self, x: u32, y: u32, rgb: Rgb) {
        let index = self.index(x, y);
        self.pixels[index] = rgb;
    }

    /// All pixels, indexed `row * width + col`.
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Rgb] {
        &mut self.pixels
    }

    /// Tightly packed RGB bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Serialize as a plain-text (P3) PPM image.
    pub fn write_ppm<W: Write>(&self, mut writer: W) -> io::Result<()> {
        write!(writer, "{self}")?;
        writer.flush()
    }

    /// The PPM serialization as a string.
    pub fn to_ppm_string(&self) -> String {
        self.to_string()
    }
}

/// Formats as a P3 PPM document: one `r g b` line per pixel, top row
/// first, left to right.
impl fmt::Display for ImageBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "P3")?;
        writeln!(f, "{} {}", self.width, self.height)?;
        writeln!(f, "255")?;

        for rgb in &self.pixels {
            writeln!(f, "{} {} {}", rgb.r, rgb.g, rgb.b)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_black() {
        let image = ImageBuffer::new(4, 3);
        assert_eq!(image.pixels().len(), 12);
        assert!(image.pixels().iter().all(|p| *p == Rgb::BLACK));
    }

    #[test]
    fn test_row_major_indexing() {
        let mut image = ImageBuffer::new(3, 2);
        image.set(2, 1, Rgb::new(1, 2, 3));

        assert_eq!(image.get(2, 1), Rgb::new(1, 2, 3));
        assert_eq!(image.pixels()[5], Rgb::new(1, 2, 3));
    }

    #[test]
    fn test_as_bytes() {
        let mut image = ImageBuffer::new(2, 1);
        image.set(0, 0, Rgb::new(10, 20, 30));
        image.set(1, 0, Rgb::new(40, 50, 60));
        assert_eq!(image.as_bytes(), &[10, 20, 30, 40, 50, 60]);
    }

    #[test]
    fn test_write_ppm() {
        let mut image = ImageBuffer::new(2, 2);
        image.set(0, 0, Rgb::new(255, 0, 0));
        image.set(1, 0, Rgb::new(0, 255, 0));
        image.set(0, 1, Rgb::new(0, 0, 255));
        image.set(1, 1, Rgb::new(7, 8, 9));

        let expected = "P3\n2 2\n255\n255 0 0\n0 255 0\n0 0 255\n7 8 9\n";
        assert_eq!(image.to_ppm_string(), expected);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_ppm_matches_string() {
        let mut image = ImageBuffer::new(3, 1);
        image.set(1, 0, Rgb::new(12, 34, 56));

        let mut bytes = Vec::new();
        image.write_ppm(&mut bytes).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), image.to_ppm_string());
    }

    #[test]
    fn test_write_ppm_reports_writer_errors() {
        let image = ImageBuffer::new(2, 2);
        let err = image.write_ppm(BrokenPipe).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
