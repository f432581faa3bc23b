//! Typed frame storage and the observations cut from it.
//!
//! Each sensor owns one [`SensorBuffer`], allocated once from its spec and
//! reused for every frame read-back.  Renderers deliver frames bottom-left
//! origin; [`SensorBuffer::to_observation`] flips rows to top-left and hands
//! out a fresh copy, so an [`Observation`] is always safe to keep after the
//! buffer is overwritten by the next read.

use eb_core::{SensorSpec, SensorType};

// ── SensorBuffer ──────────────────────────────────────────────────────────────

/// Preallocated read-back target, typed per modality.
///
/// Color frames are tightly packed `height * width * channels` bytes; depth
/// and semantic frames are one element per pixel.
#[derive(Debug)]
pub enum SensorBuffer {
    Color(Vec<u8>),
    Depth(Vec<f32>),
    Semantic(Vec<u32>),
}

impl SensorBuffer {
    /// Allocate a zeroed buffer sized for `spec`.
    pub fn for_spec(spec: &SensorSpec) -> Self {
        let pixels = spec.height() as usize * spec.width() as usize;
        match spec.sensor_type {
            SensorType::Color => SensorBuffer::Color(vec![0; pixels * spec.channels as usize]),
            SensorType::Depth => SensorBuffer::Depth(vec![0.0; pixels]),
            SensorType::Semantic => SensorBuffer::Semantic(vec![0; pixels]),
        }
    }

    /// Number of elements (not bytes) this buffer holds.
    pub fn len(&self) -> usize {
        match self {
            SensorBuffer::Color(v) => v.len(),
            SensorBuffer::Depth(v) => v.len(),
            SensorBuffer::Semantic(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cut a top-left-origin [`Observation`] from the current frame.
    pub fn to_observation(&self, spec: &SensorSpec) -> Observation {
        let height = spec.height();
        let width = spec.width();
        match self {
            SensorBuffer::Color(pixels) => Observation::Color {
                height,
                width,
                channels: spec.channels,
                pixels: flip_rows(pixels, height as usize, (width * spec.channels) as usize),
            },
            SensorBuffer::Depth(data) => Observation::Depth {
                height,
                width,
                data: flip_rows(data, height as usize, width as usize),
            },
            SensorBuffer::Semantic(data) => Observation::Semantic {
                height,
                width,
                data: flip_rows(data, height as usize, width as usize),
            },
        }
    }
}

/// Copy `src` with its row order reversed (bottom-left → top-left origin).
fn flip_rows<T: Copy>(src: &[T], height: usize, row_len: usize) -> Vec<T> {
    debug_assert_eq!(src.len(), height * row_len);
    let mut out = Vec::with_capacity(src.len());
    for row in (0..height).rev() {
        out.extend_from_slice(&src[row * row_len..(row + 1) * row_len]);
    }
    out
}

// ── Observation ───────────────────────────────────────────────────────────────

/// One captured frame, top-left origin, owned by the caller.
#[derive(Clone, Debug, PartialEq)]
pub enum Observation {
    /// Interleaved `height × width × channels` bytes.
    Color {
        height: u32,
        width: u32,
        channels: u32,
        pixels: Vec<u8>,
    },
    /// `height × width` metric depth values.
    Depth {
        height: u32,
        width: u32,
        data: Vec<f32>,
    },
    /// `height × width` per-pixel object IDs.
    Semantic {
        height: u32,
        width: u32,
        data: Vec<u32>,
    },
}

impl Observation {
    pub fn height(&self) -> u32 {
        match self {
            Observation::Color { height, .. }
            | Observation::Depth { height, .. }
            | Observation::Semantic { height, .. } => *height,
        }
    }

    pub fn width(&self) -> u32 {
        match self {
            Observation::Color { width, .. }
            | Observation::Depth { width, .. }
            | Observation::Semantic { width, .. } => *width,
        }
    }

    /// Channel count; `None` for the single-plane modalities.
    pub fn channels(&self) -> Option<u32> {
        match self {
            Observation::Color { channels, .. } => Some(*channels),
            Observation::Depth { .. } | Observation::Semantic { .. } => None,
        }
    }
}
