use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

#[derive(Default, Debug, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Sum for Color {
    fn sum<I: Iterator<Item=Self>>(iter: I) -> Self {
        let mut acc = Color::BLACK;
        for color in iter {
            acc += color;
        }
        acc
    }
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(value: f64) -> Self {
        Self::new(value, value, value)
    }

    pub fn magnitude(&self) -> f64 {
        (self.r * self.r + self.g * self.g + self.b * self.b).sqrt()
    }

    pub fn clamp(&self, lo: f64, hi: f64) -> Self {
        Color::new(
            self.r.clamp(lo, hi),
            self.g.clamp(lo, hi),
            self.b.clamp(lo, hi),
        )
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Self) -> Self::Output {
        Color::new(
            self.r + rhs.r,
            self.g + rhs.g,
            self.b + rhs.b,
        )
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, rhs: f64) -> Self::Output {
        Color::new(
            self.r * rhs,
            self.g * rhs,
            self.b * rhs,
        )
    }
}

impl Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, rhs: Color) -> Self::Output {
        rhs * self
    }
}

/// Component-wise product, used to filter one color through another.
impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Self::Output {
        Color::new(
            self.r * rhs.r,
            self.g * rhs.g,
            self.b * rhs.b,
        )
    }
}

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub struct RGB8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl From<Color> for RGB8 {
    fn from(value: Color) -> Self {
        let value = value.clamp(0.0, 1.0);
        RGB8::new(quantize(value.r), quantize(value.g), quantize(value.b))
    }
}

fn quantize(value: f64) -> u8 {
    (value * 255.0).round() as u8
}

impl RGB8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        RGB8 { r, g, b }
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Row-major pixel grid, top row first.
#[derive(Clone, Debug, PartialEq)]
pub struct Picture<T> {
    pixels: Vec<T>,
    size: (u32, u32),
}

impl<T: Clone> Picture<T> {
    pub fn filled(width: u32, height: u32, value: T) -> Self {
        Picture {
            pixels: vec![value; width as usize * height as usize],
            size: (width, height),
        }
    }
}

impl<T> Picture<T> {
    /// Returns `None` when the buffer length does not match `width * height`.
    pub fn from_pixels(pixels: Vec<T>, size: (u32, u32)) -> Option<Self> {
        (pixels.len() == size.0 as usize * size.1 as usize).then_some(Picture { pixels, size })
    }

    pub fn width(&self) -> u32 {
        self.size.0
    }

    pub fn height(&self) -> u32 {
        self.size.1
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    fn to_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width() as usize + x as usize
    }

    pub fn pixel(&self, x: u32, y: u32) -> &T {
        &self.pixels[self.to_index(x, y)]
    }

    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut T {
        let index = self.to_index(x, y);
        &mut self.pixels[index]
    }

    pub fn buffer(&self) -> &[T] {
        &self.pixels
    }

    pub fn buffer_mut(&mut self) -> &mut [T] {
        &mut self.pixels
    }

    pub fn rows(&self) -> impl Iterator<Item=&[T]> {
        // chunks(0) panics, an empty picture has no rows anyway
        self.pixels.chunks(self.width().max(1) as usize)
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Picture<U> {
        Picture {
            pixels: self.pixels.iter().map(f).collect(),
            size: self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantizes_with_rounding_and_clamping() {
        assert_eq!(RGB8::from(Color::new(1.0, 0.0, 0.5)), RGB8::new(255, 0, 128));
        assert_eq!(RGB8::from(Color::new(2.5, -1.0, 0.2)), RGB8::new(255, 0, 51));
    }

    #[test]
    fn sums_colors() {
        let total: Color = [Color::new(0.1, 0.2, 0.3), Color::new(0.4, 0.5, 0.6)].into_iter().sum();
        assert!((total.r - 0.5).abs() < 1e-12);
        assert!((total.g - 0.7).abs() < 1e-12);
        assert!((total.b - 0.9).abs() < 1e-12);
    }

    #[test]
    fn multiplies_component_wise() {
        let filtered = Color::new(0.5, 1.0, 0.0) * Color::new(0.5, 0.25, 1.0);
        assert_eq!(filtered, Color::new(0.25, 0.25, 0.0));
    }

    #[test]
    fn indexes_row_major() {
        let mut picture = Picture::filled(3, 2, 0u8);
        *picture.pixel_mut(2, 1) = 7;
        assert_eq!(picture.buffer()[5], 7);
        assert_eq!(picture.rows().count(), 2);
        assert_eq!(picture.rows().nth(1), Some(&[0u8, 0, 7][..]));
    }

    #[test]
    fn rejects_mismatched_buffer() {
        assert!(Picture::from_pixels(vec![0u8; 5], (3, 2)).is_none());
        assert!(Picture::from_pixels(vec![0u8; 6], (3, 2)).is_some());
    }
}
