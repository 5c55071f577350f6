//! Content hashing for deterministic rendering verification.
//!
//! Produces a SHA-256 hash of frame buffer data so repeated renders of the
//! same parameter and configuration can be compared bit for bit.

use sha2::{Digest, Sha256};

use crate::frame::FrameBuffer;

/// A content hash digest (SHA-256, 32 bytes).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash {
    bytes: [u8; 32],
}

impl ContentHash {
    /// Create from raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Get the hash as a hex string.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    fn from_hasher(hasher: Sha256) -> Self {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hasher.finalize());
        Self::from_bytes(bytes)
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

fn update_with_frame(hasher: &mut Sha256, frame: &FrameBuffer) {
    // Dimensions are part of the digest so equal bytes at different sizes differ.
    hasher.update(frame.width.to_le_bytes());
    hasher.update(frame.height.to_le_bytes());
    hasher.update(&frame.data);
}

/// Compute the content hash of a single frame buffer.
pub fn hash_frame(frame: &FrameBuffer) -> ContentHash {
    let mut hasher = Sha256::new();
    update_with_frame(&mut hasher, frame);
    ContentHash::from_hasher(hasher)
}

/// Incremental hash of an ordered frame sequence, fed one frame at a time so
/// the frames never have to be held together.
#[derive(Clone, Default)]
pub struct SequenceHasher {
    hasher: Sha256,
    frames: u64,
}

impl SequenceHasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, frame: &FrameBuffer) {
        update_with_frame(&mut self.hasher, frame);
        self.frames += 1;
    }

    /// Number of frames hashed so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn finish(mut self) -> ContentHash {
        self.hasher.update(self.frames.to_le_bytes());
        ContentHash::from_hasher(self.hasher)
    }
}
