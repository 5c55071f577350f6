use std::iter::Peekable;

use paranim_core::hash::{ContentHash, SequenceHasher};
use paranim_core::{FrameBuffer, ParanimError, ParanimResult};

/// Per-frame display time, derived from a playback rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameDelay {
    fps: u32,
}

impl FrameDelay {
    pub fn from_fps(fps: u32) -> ParanimResult<Self> {
        if fps == 0 {
            return Err(ParanimError::invalid("fps", "must be positive"));
        }
        Ok(Self { fps })
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Exact delay in milliseconds.
    pub fn as_millis_f64(&self) -> f64 {
        1000.0 / self.fps as f64
    }

    /// GIF delay in centiseconds. Most viewers slow anything under 2cs
    /// down to 10cs, so shorter delays are clamped to 2.
    pub fn gif_centiseconds(&self) -> u16 {
        ((100.0 / self.fps as f64).round() as u16).max(2)
    }

    /// APNG delay as a numerator/denominator pair of seconds.
    pub fn apng_fraction(&self) -> ParanimResult<(u16, u16)> {
        let den = u16::try_from(self.fps)
            .map_err(|_| ParanimError::Encode(format!("fps {} too high for APNG", self.fps)))?;
        Ok((1, den))
    }
}

/// How many times a viewer should play the animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopMode {
    #[default]
    Infinite,
    /// Total number of plays, including the first. `Finite(0)` plays once.
    Finite(u16),
}

impl LoopMode {
    /// `None` or `Some(0)` loop forever.
    pub fn from_count(count: Option<u16>) -> Self {
        match count {
            None | Some(0) => LoopMode::Infinite,
            Some(n) => LoopMode::Finite(n),
        }
    }

    /// Total plays, `None` for forever.
    pub fn plays(&self) -> Option<u16> {
        match self {
            LoopMode::Infinite => None,
            LoopMode::Finite(n) => Some((*n).max(1)),
        }
    }
}

/// Ordered frames plus timing, pulled one frame at a time while encoding.
///
/// Frames are produced lazily by the wrapped iterator, so an export holds a
/// single raw frame at a time. Each yielded frame is checked against the
/// first frame's dimensions and folded into the sequence's content hash.
pub struct AnimationSequence<I: Iterator<Item = FrameBuffer>> {
    frames: Peekable<I>,
    delay: FrameDelay,
    width: u32,
    height: u32,
    len: usize,
    yielded: usize,
    hasher: SequenceHasher,
}

impl<I: ExactSizeIterator<Item = FrameBuffer>> AnimationSequence<I> {
    /// Rejects empty sequences. Renders the first frame to learn the dimensions.
    pub fn new(frames: I, delay: FrameDelay) -> ParanimResult<Self> {
        let len = frames.len();
        let mut frames = frames.peekable();
        let Some(first) = frames.peek() else {
            return Err(ParanimError::Encode("no frames to encode".into()));
        };
        let (width, height) = (first.width, first.height);
        Ok(Self {
            frames,
            delay,
            width,
            height,
            len,
            yielded: 0,
            hasher: SequenceHasher::new(),
        })
    }
}

impl<I: Iterator<Item = FrameBuffer>> AnimationSequence<I> {
    pub fn delay(&self) -> FrameDelay {
        self.delay
    }

    /// Number of frames the sequence will yield.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Fails unless every announced frame has been yielded.
    pub fn ensure_complete(&self) -> ParanimResult<()> {
        if self.yielded != self.len {
            return Err(ParanimError::Encode(format!(
                "sequence ended after {} of {} frames",
                self.yielded, self.len
            )));
        }
        Ok(())
    }

    /// Hash of the frames yielded so far, in order.
    pub fn content_hash(&self) -> ContentHash {
        self.hasher.clone().finish()
    }
}

impl<I: Iterator<Item = FrameBuffer>> Iterator for AnimationSequence<I> {
    type Item = ParanimResult<FrameBuffer>;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.frames.next()?;
        let index = self.yielded;
        self.yielded += 1;

        if frame.width != self.width || frame.height != self.height {
            return Some(Err(ParanimError::Encode(format!(
                "frame {} has dimensions {}x{}, expected {}x{}",
                index, frame.width, frame.height, self.width, self.height
            ))));
        }
        if !frame.is_well_formed() {
            return Some(Err(ParanimError::Encode(format!(
                "frame {} holds {} bytes, which does not match {}x{}",
                index,
                frame.data.len(),
                frame.width,
                frame.height
            ))));
        }
        self.hasher.update(&frame);
        Some(Ok(frame))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len.saturating_sub(self.yielded);
        (remaining, Some(remaining))
    }
}
