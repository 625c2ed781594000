//! Binary PPM (P6) images: writing rendered framebuffers and reading
//! reference images back for comparison.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use thiserror::Error;

use crate::picture::{Color, Picture, RGB8};

const MAGIC: &str = "P6";
const MAX_VALUE: u32 = 255;

/// Fraction of pixels allowed to differ before two images count as different.
pub const MISMATCH_TOLERANCE: f64 = 0.001;

#[derive(Debug, Error)]
pub enum PpmError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("unexpected magic number {0:?}, only binary P6 is supported")]
    BadMagic(String),
    #[error("malformed header: {0}")]
    BadHeader(String),
    #[error("unsupported max color value {0}, expected 255")]
    UnsupportedMaxValue(u32),
    #[error("pixel data truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
    #[error("image size {actual:?} does not match {expected:?}")]
    SizeMismatch { expected: (u32, u32), actual: (u32, u32) },
}

pub fn write_ppm<W: Write>(mut writer: W, picture: &Picture<Color>) -> io::Result<()> {
    write!(writer, "{}\n{} {}\n{}\n", MAGIC, picture.width(), picture.height(), MAX_VALUE)?;
    for row in picture.rows() {
        let bytes: Vec<u8> = row.iter()
            .flat_map(|color| RGB8::from(*color).channels())
            .collect();
        writer.write_all(&bytes)?;
    }
    writer.flush()
}

pub fn save_ppm(path: impl AsRef<Path>, picture: &Picture<Color>) -> io::Result<()> {
    let file = File::create(path)?;
    write_ppm(BufWriter::new(file), picture)
}

/// Reads the next whitespace separated header token, skipping `#` comments.
/// Consumes exactly one whitespace byte after the token.
fn header_token<R: BufRead>(reader: &mut R) -> Result<String, PpmError> {
    let mut token = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        if reader.read(&mut byte)? == 0 {
            break;
        }
        match byte[0] {
            b'#' if token.is_empty() => {
                let mut comment = Vec::new();
                reader.read_until(b'\n', &mut comment)?;
            }
            b if b.is_ascii_whitespace() => {
                if !token.is_empty() {
                    break;
                }
            }
            b => token.push(b),
        }
    }
    if token.is_empty() {
        return Err(PpmError::BadHeader("unexpected end of header".to_string()));
    }
    String::from_utf8(token).map_err(|_| PpmError::BadHeader("header is not ascii".to_string()))
}

fn header_number<R: BufRead>(reader: &mut R, name: &str) -> Result<u32, PpmError> {
    let token = header_token(reader)?;
    token.parse()
        .map_err(|_| PpmError::BadHeader(format!("invalid {} {:?}", name, token)))
}

pub fn read_ppm<R: BufRead>(mut reader: R) -> Result<Picture<RGB8>, PpmError> {
    let magic = header_token(&mut reader)?;
    if magic != MAGIC {
        return Err(PpmError::BadMagic(magic));
    }
    let width = header_number(&mut reader, "width")?;
    let height = header_number(&mut reader, "height")?;
    let max_value = header_number(&mut reader, "max value")?;
    if max_value != MAX_VALUE {
        return Err(PpmError::UnsupportedMaxValue(max_value));
    }

    let expected = (width as usize).checked_mul(height as usize)
        .and_then(|count| count.checked_mul(3))
        .ok_or_else(|| PpmError::BadHeader(format!("image size {}x{} is too large", width, height)))?;
    // grows with the data actually present, never with the header's claim
    let mut data = Vec::new();
    reader.take(expected as u64).read_to_end(&mut data)?;
    if data.len() != expected {
        return Err(PpmError::Truncated { expected, actual: data.len() });
    }

    let pixels = data.chunks_exact(3)
        .map(|rgb| RGB8::new(rgb[0], rgb[1], rgb[2]))
        .collect();
    Picture::from_pixels(pixels, (width, height))
        .ok_or_else(|| PpmError::BadHeader("pixel count does not match size".to_string()))
}

pub fn load_ppm(path: impl AsRef<Path>) -> Result<Picture<RGB8>, PpmError> {
    let file = File::open(path)?;
    read_ppm(BufReader::new(file))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Comparison {
    pub mismatched: usize,
    pub total: usize,
}

impl Comparison {
    pub fn mismatch_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.mismatched as f64 / self.total as f64
        }
    }

    pub fn matches(&self) -> bool {
        self.mismatched as f64 <= MISMATCH_TOLERANCE * self.total as f64
    }
}

/// Counts pixels of `picture` that differ from `reference` by more than one
/// quantization step in any channel.
pub fn compare(reference: &Picture<RGB8>, picture: &Picture<Color>) -> Result<Comparison, PpmError> {
    if reference.size() != picture.size() {
        return Err(PpmError::SizeMismatch {
            expected: reference.size(),
            actual: picture.size(),
        });
    }

    let mismatched = reference.buffer()
        .iter()
        .zip(picture.buffer())
        .filter(|(expected, color)| {
            let actual = RGB8::from(**color);
            expected.channels()
                .iter()
                .zip(actual.channels())
                .any(|(e, a)| e.abs_diff(a) > 1)
        })
        .count();

    Ok(Comparison { mismatched, total: reference.buffer().len() })
}
