//! # Artwork Persistence
//!
//! The exchangeable artwork blob is a flat sequence of `u32` words:
//!
//! ```text
//! word[0]          codec version (CODEC_VERSION)
//! word[1]          N, number of encoded words (always even)
//! word[2..2+N]     interleaved (color, run_length) pairs
//! word[2+N]        width
//! word[2+N+1]      height
//! ```
//!
//! Total length is exactly `N + 4`. Previously saved artwork depends on this
//! layout, so it must not change without bumping the version.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::buffer::PixelBuffer;
use crate::error::{Error, Result};
use crate::rle;

/// Revision of the blob layout written by [`compress`].
pub const CODEC_VERSION: u32 = 1;

/// Header (version, encoded length) plus trailer (width, height).
const FRAME_WORDS: usize = 4;

/// Decoded artwork: pixels plus the grid they belong to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artwork {
    pub pixels: Vec<u32>,
    pub width: u32,
    pub height: u32,
}

impl Artwork {
    pub fn from_buffer(buffer: &PixelBuffer) -> Self {
        Self {
            pixels: buffer.cells().to_vec(),
            width: buffer.width(),
            height: buffer.height(),
        }
    }

    pub fn into_buffer(self) -> Result<PixelBuffer> {
        PixelBuffer::from_cells(self.width, self.height, self.pixels)
    }
}

/// Builds the artwork blob for a flattened pixel array.
pub fn compress(pixels: &[u32], width: u32, height: u32) -> Vec<u32> {
    let encoded = rle::encode(pixels);
    let mut blob = Vec::with_capacity(encoded.len() + FRAME_WORDS);
    blob.push(CODEC_VERSION);
    blob.push(encoded.len() as u32);
    blob.extend_from_slice(&encoded);
    blob.push(width);
    blob.push(height);
    blob
}

/// Parses and expands an artwork blob.
///
/// The version is checked before anything else is trusted; a blob from an
/// unknown revision is reported as [`Error::UnsupportedVersion`] rather than
/// decoded on the assumption that it is compatible.
pub fn decompress(blob: &[u32]) -> Result<Artwork> {
    if blob.len() < FRAME_WORDS {
        return Err(Error::TruncatedBlob { len: blob.len() });
    }

    let version = blob[0];
    if version != CODEC_VERSION {
        tracing::warn!(found = version, expected = CODEC_VERSION, "Rejected artwork blob");
        return Err(Error::UnsupportedVersion {
            found: version,
            expected: CODEC_VERSION,
        });
    }

    let declared = blob[1] as usize;
    let available = blob.len() - FRAME_WORDS;
    if declared != available {
        return Err(Error::EncodedLengthOutOfRange {
            declared,
            available,
        });
    }

    let width = blob[blob.len() - 2];
    let height = blob[blob.len() - 1];
    let expected = width as usize * height as usize;
    let pixels = rle::decode_exact(&blob[2..2 + declared], expected)?;

    Ok(Artwork {
        pixels,
        width,
        height,
    })
}

/// Little-endian byte form of a blob, for files and binary transports.
pub fn blob_to_bytes(blob: &[u32]) -> Vec<u8> {
    blob.iter().flat_map(|word| word.to_le_bytes()).collect()
}

pub fn blob_from_bytes(bytes: &[u8]) -> Result<Vec<u32>> {
    if bytes.len() % 4 != 0 {
        return Err(Error::MisalignedBytes { len: bytes.len() });
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|w| u32::from_le_bytes([w[0], w[1], w[2], w[3]]))
        .collect())
}

/// Standard base64 of the little-endian bytes, for text channels.
pub fn blob_to_base64(blob: &[u32]) -> String {
    STANDARD.encode(blob_to_bytes(blob))
}

pub fn blob_from_base64(text: &str) -> Result<Vec<u32>> {
    let bytes = STANDARD.decode(text.trim())?;
    blob_from_bytes(&bytes)
}
