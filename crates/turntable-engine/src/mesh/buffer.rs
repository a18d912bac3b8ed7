use bytemuck::{Pod, Zeroable};

/// Floats per interleaved vertex: position (3) followed by color (3).
pub const FLOATS_PER_VERTEX: usize = 6;

/// Byte stride between consecutive vertices in the interleaved buffer.
pub const VERTEX_STRIDE: u64 = (FLOATS_PER_VERTEX * std::mem::size_of::<f32>()) as u64;

/// Byte offset of the color attribute inside one vertex.
pub const COLOR_OFFSET: u64 = (3 * std::mem::size_of::<f32>()) as u64;

/// Derives the display color of a vertex from its position.
///
/// Maps each axis from the unit cube range `[-1, 1]` onto `[0, 1]`.
#[inline]
pub fn vertex_color(position: [f32; 3]) -> [f32; 3] {
    position.map(|c| (c + 1.0) / 2.0)
}

/// One interleaved vertex, laid out exactly as in [`InterleavedBuffer`].
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ColoredVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl ColoredVertex {
    pub fn from_position(position: [f32; 3]) -> Self {
        Self {
            position,
            color: vertex_color(position),
        }
    }
}

/// Flat vertex data: `[x, y, z, r, g, b]` per vertex, in file order.
///
/// The length is always a multiple of [`FLOATS_PER_VERTEX`]; vertices are
/// never reordered or deduplicated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterleavedBuffer {
    data: Vec<f32>,
}

impl InterleavedBuffer {
    /// Interleaves parallel position and color lists.
    ///
    /// Both lists are indexed by vertex; entry `i` of each becomes vertex `i`.
    pub fn interleave(positions: &[[f32; 3]], colors: &[[f32; 3]]) -> Self {
        debug_assert_eq!(positions.len(), colors.len());

        let mut data = Vec::with_capacity(positions.len() * FLOATS_PER_VERTEX);
        for (position, color) in positions.iter().zip(colors) {
            data.extend_from_slice(position);
            data.extend_from_slice(color);
        }

        Self { data }
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Raw bytes for GPU upload.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Number of floats (not vertices).
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.data.len() / FLOATS_PER_VERTEX
    }

    /// Upload size in bytes (`vertex_count × 6 × 4`).
    #[inline]
    pub fn byte_len(&self) -> u64 {
        (self.data.len() * std::mem::size_of::<f32>()) as u64
    }

    /// Iterates vertices in buffer order.
    pub fn vertices(&self) -> impl Iterator<Item = ColoredVertex> + '_ {
        self.data.chunks_exact(FLOATS_PER_VERTEX).map(|v| ColoredVertex {
            position: [v[0], v[1], v[2]],
            color: [v[3], v[4], v[5]],
        })
    }
}

/// A loaded model. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    buffer: InterleavedBuffer,
}

impl MeshData {
    pub fn new(buffer: InterleavedBuffer) -> Self {
        Self { buffer }
    }

    #[inline]
    pub fn buffer(&self) -> &InterleavedBuffer {
        &self.buffer
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.buffer.vertex_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
