use crate::{Error, Result, vertex::Vertex};

/// Fixed-capacity vertex/index storage shared by the shape & sprite batchers
///
/// Both buffers are allocated once at construction & never grow. Counters track
/// how much of each is in use; indices are stored absolute (already offset by
/// the vertex count at allocation time)
pub struct GeometryBatch {
    vertices: Box<[Vertex]>,
    indices: Box<[u16]>,
    vertex_count: usize,
    index_count: usize,
}

impl GeometryBatch {
    pub fn new(max_vertices: usize, max_indices: usize) -> Self {
        debug_assert!(max_vertices <= u16::MAX as usize + 1);
        Self {
            vertices: vec![Vertex::default(); max_vertices].into_boxed_slice(),
            indices: vec![0; max_indices].into_boxed_slice(),
            vertex_count: 0,
            index_count: 0,
        }
    }

    pub fn max_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn max_indices(&self) -> usize {
        self.indices.len()
    }

    /// Errors if a single shape of this size could never fit, even when empty
    pub fn check_capacity(&self, vert_count: usize, idx_count: usize) -> Result<()> {
        if vert_count > self.max_vertices() {
            return Err(Error::VertexCapacity {
                required: vert_count,
                capacity: self.max_vertices(),
            });
        }
        if idx_count > self.max_indices() {
            return Err(Error::IndexCapacity {
                required: idx_count,
                capacity: self.max_indices(),
            });
        }
        Ok(())
    }

    // Returns true if adding verts/indices would exceed the remaining room
    pub fn would_overflow(&self, vert_count: usize, idx_count: usize) -> bool {
        self.max_vertices() - self.vertex_count < vert_count
            || self.max_indices() - self.index_count < idx_count
    }

    /// Reserves room for a shape, returning its vertex & index slots and the base index
    ///
    /// Returns `None` without touching the counters if the shape doesn't fit
    pub fn try_allocate(
        &mut self,
        vert_count: usize,
        idx_count: usize,
    ) -> Option<(&mut [Vertex], &mut [u16], u16)> {
        if self.would_overflow(vert_count, idx_count) {
            return None;
        }

        let base = self.vertex_count;
        let idx_start = self.index_count;
        self.vertex_count += vert_count;
        self.index_count += idx_count;

        Some((
            &mut self.vertices[base..self.vertex_count],
            &mut self.indices[idx_start..self.index_count],
            base as u16,
        ))
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices[..self.vertex_count]
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices[..self.index_count]
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn index_count(&self) -> usize {
        self.index_count
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0 || self.index_count == 0
    }

    pub fn clear(&mut self) {
        self.vertex_count = 0;
        self.index_count = 0;
    }
}
