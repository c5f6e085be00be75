//! Zlib compression and decompression for entry payloads

use crate::{Error, Result};
use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use std::io::{Read, Write};

/// Zlib header bytes for a default-window, best-compression stream
pub const ZLIB_BEST_HEADER: [u8; 2] = [0x78, 0xDA];

/// Compress a payload the way HashFS stores compressed entries
///
/// The output is a complete zlib stream at best compression, so it begins
/// with the `0x78 0xDA` header the format expects. A stream with any other
/// framing is refused rather than written.
pub fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder
        .write_all(data)
        .map_err(|e| Error::compression(format!("deflate failed: {e}")))?;
    let compressed = encoder
        .finish()
        .map_err(|e| Error::compression(format!("deflate failed: {e}")))?;

    if !compressed.starts_with(&ZLIB_BEST_HEADER) {
        return Err(Error::compression(format!(
            "unexpected zlib framing: {:02X?}",
            &compressed[..2.min(compressed.len())]
        )));
    }

    Ok(compressed)
}

/// Decompress a stored zlib stream
///
/// `expected_size` is the uncompressed length recorded in the catalog; it is
/// used to size the output buffer, and callers are expected to verify the
/// result length against their record.
pub fn inflate(data: &[u8], expected_size: usize) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data);
    let mut decompressed = Vec::with_capacity(expected_size);
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| Error::compression(format!("inflate failed: {e}")))?;
    Ok(decompressed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let original = b"SiiNunit\n{\nmanifest: .manifest\n{\n  package_version: \"1.49\"\n}\n}\n";

        let compressed = deflate(original).unwrap();
        let decompressed = inflate(&compressed, original.len()).unwrap();
        assert_eq!(decompressed, original);
    }

    #[test]
    fn test_best_compression_framing() {
        let compressed = deflate(b"framing check").unwrap();
        assert_eq!(&compressed[..2], &ZLIB_BEST_HEADER);
    }

    #[test]
    fn test_inflate_rejects_garbage() {
        let err = inflate(b"not a zlib stream", 64).unwrap_err();
        assert!(matches!(err, Error::Compression(_)));
    }

    #[test]
    fn test_compresses_repetitive_data() {
        let original = vec![b'x'; 4096];
        let compressed = deflate(&original).unwrap();
        assert!(compressed.len() < original.len());
    }
}
