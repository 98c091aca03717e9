//! PNG Encoding
//!
//! Serializes a [`Canvas`] as an 8-bit truecolor, non-interlaced PNG.
//!
//! Stream layout:
//! ```text
//! +-----------+------+------+------+
//! | signature | IHDR | IDAT | IEND |
//! +-----------+------+------+------+
//! ```
//!
//! Every chunk is framed by [`ChunkWriter`]:
//! ```text
//! +----------------+-----------+---------+--------------------+
//! | length (4 BE)  | type (4)  | data    | crc32(type+data) BE |
//! +----------------+-----------+---------+--------------------+
//! ```

use crate::canvas::Canvas;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// PNG file signature
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Largest chunk payload (and image dimension) PNG allows: 2^31 - 1
pub const MAX_CHUNK_SIZE: usize = i32::MAX as usize;

/// Bytes per RGB pixel
const BYTES_PER_PIXEL: usize = 3;

/// Scanline filter type 0 (None)
const FILTER_NONE: u8 = 0;

/// Errors that can occur while encoding a PNG
#[derive(Debug, Error)]
pub enum PngError {
    /// The canvas has a zero dimension
    #[error("cannot encode an empty canvas ({width}x{height})")]
    EmptyCanvas {
        /// Canvas width
        width: u32,
        /// Canvas height
        height: u32,
    },

    /// A dimension does not fit PNG's 31-bit field
    #[error("image dimension {0} exceeds the PNG limit")]
    DimensionTooLarge(u32),

    /// Chunk payload exceeds [`MAX_CHUNK_SIZE`]
    #[error("chunk too large: {size} bytes (max {max} bytes)")]
    ChunkTooLarge {
        /// Payload length
        size: usize,
        /// Allowed maximum
        max: usize,
    },

    /// zlib compression failed
    #[error("compression failed: {0}")]
    Compression(#[source] std::io::Error),

    /// Writing the output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Four-byte ASCII chunk tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkType([u8; 4]);

impl ChunkType {
    /// Image header
    pub const IHDR: ChunkType = ChunkType(*b"IHDR");
    /// Image data
    pub const IDAT: ChunkType = ChunkType(*b"IDAT");
    /// Image trailer
    pub const IEND: ChunkType = ChunkType(*b"IEND");

    /// Raw tag bytes
    pub fn bytes(&self) -> [u8; 4] {
        self.0
    }
}

impl std::fmt::Display for ChunkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

/// CRC-32 over the chunk type followed by its data
pub fn chunk_crc(chunk_type: ChunkType, data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&chunk_type.0);
    hasher.update(data);
    hasher.finalize()
}

/// Length-prefixed, CRC-suffixed chunk framing
///
/// Knows nothing about chunk contents; the CRC is always recomputed from the
/// bytes being written.
pub struct ChunkWriter<W: Write> {
    writer: W,
}

impl<W: Write> ChunkWriter<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write one framed chunk
    pub fn write_chunk(&mut self, chunk_type: ChunkType, data: &[u8]) -> Result<(), PngError> {
        let len = data.len();
        if len > MAX_CHUNK_SIZE {
            return Err(PngError::ChunkTooLarge {
                size: len,
                max: MAX_CHUNK_SIZE,
            });
        }

        self.writer.write_all(&(len as u32).to_be_bytes())?;
        self.writer.write_all(&chunk_type.0)?;
        self.writer.write_all(data)?;
        self.writer
            .write_all(&chunk_crc(chunk_type, data).to_be_bytes())?;
        Ok(())
    }

    /// Consume and return the inner writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// IHDR payload for an 8-bit RGB, non-interlaced image
pub fn ihdr_data(width: u32, height: u32) -> [u8; 13] {
    let mut data = [0u8; 13];
    data[0..4].copy_from_slice(&width.to_be_bytes());
    data[4..8].copy_from_slice(&height.to_be_bytes());
    data[8] = 8; // bit depth
    data[9] = 2; // color type: truecolor
    data[10] = 0; // compression method: deflate
    data[11] = 0; // filter method: adaptive (type 0 per line)
    data[12] = 0; // interlace: none
    data
}

/// Raw scanlines: a filter byte of 0 followed by RGB triples, per row
pub fn scanlines(canvas: &Canvas) -> Vec<u8> {
    let row_len = 1 + canvas.width() as usize * BYTES_PER_PIXEL;
    let mut raw = Vec::with_capacity(row_len * canvas.height() as usize);
    for row in canvas.rows() {
        raw.push(FILTER_NONE);
        for pixel in row {
            raw.extend_from_slice(&pixel.to_array());
        }
    }
    raw
}

/// Canvas → PNG byte stream
#[derive(Debug, Clone, Copy)]
pub struct PngEncoder {
    compression: Compression,
}

impl Default for PngEncoder {
    fn default() -> Self {
        Self {
            compression: Compression::best(),
        }
    }
}

impl PngEncoder {
    /// Encoder using maximum compression
    pub fn new() -> Self {
        Self::default()
    }

    /// Encoder with a specific zlib level (0-9)
    pub fn with_level(level: u32) -> Self {
        Self {
            compression: Compression::new(level.min(9)),
        }
    }

    /// Encode `canvas` into a complete PNG file
    pub fn encode(&self, canvas: &Canvas) -> Result<Vec<u8>, PngError> {
        let (width, height) = (canvas.width(), canvas.height());
        if width == 0 || height == 0 {
            return Err(PngError::EmptyCanvas { width, height });
        }
        for dim in [width, height] {
            if dim as usize > MAX_CHUNK_SIZE {
                return Err(PngError::DimensionTooLarge(dim));
            }
        }

        let idat = self.compress(&scanlines(canvas))?;

        let mut out = Vec::with_capacity(PNG_SIGNATURE.len() + 3 * 12 + 13 + idat.len());
        out.extend_from_slice(&PNG_SIGNATURE);

        let mut chunks = ChunkWriter::new(out);
        chunks.write_chunk(ChunkType::IHDR, &ihdr_data(width, height))?;
        chunks.write_chunk(ChunkType::IDAT, &idat)?;
        chunks.write_chunk(ChunkType::IEND, &[])?;
        let out = chunks.into_inner();

        tracing::debug!(width, height, bytes = out.len(), "encoded png");
        Ok(out)
    }

    fn compress(&self, raw: &[u8]) -> Result<Vec<u8>, PngError> {
        let mut encoder = ZlibEncoder::new(Vec::new(), self.compression);
        encoder.write_all(raw).map_err(PngError::Compression)?;
        encoder.finish().map_err(PngError::Compression)
    }
}

/// Encode with maximum compression
pub fn encode_png(canvas: &Canvas) -> Result<Vec<u8>, PngError> {
    PngEncoder::new().encode(canvas)
}

/// Encode `canvas` and write it to `path`
///
/// Encoding completes before the file is created, so a failed encode never
/// leaves a partial file behind.
pub fn write_png(canvas: &Canvas, path: impl AsRef<Path>) -> Result<(), PngError> {
    let bytes = encode_png(canvas)?;
    std::fs::write(path.as_ref(), bytes)?;
    Ok(())
}
