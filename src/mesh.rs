// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2023, 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the lsystem-turtle crate.

//! Reduction of 3D segments into a vertex/edge mesh, and wavefront style export of it.


use crate::{LSystemError, turtle::Segment3D};
use rustc_hash::FxHashMap;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use vector_traits::glam::DVec3;

/// Assigns one index per distinct vertex value, in first-seen order.
///
/// Vertices are compared by exact value, `-0.0` and `0.0` are the same vertex.
#[derive(Default)]
pub(crate) struct VertexDeduplicator3D {
    set: FxHashMap<[u64; 3], usize>,
    pub vertices: Vec<DVec3>,
}

impl VertexDeduplicator3D {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            set: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            vertices: Vec::with_capacity(capacity),
        }
    }

    /// get a previously defined index, or insert the vertex and return the new (0-based) index
    pub fn get_index_or_insert(&mut self, vector: DVec3) -> Result<usize, LSystemError> {
        // try to get rid of the -0.0 value
        let x = vector.x + 0.0;
        let y = vector.y + 0.0;
        let z = vector.z + 0.0;
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            return Err(LSystemError::FloatNotFinite(format!(
                "The vector was not finite ({x:?},{y:?},{z:?})"
            )));
        }
        let index = self
            .set
            .entry([x.to_bits(), y.to_bits(), z.to_bits()])
            .or_insert_with(|| {
                let new_index = self.vertices.len();
                self.vertices.push(DVec3::new(x, y, z));
                new_index
            });
        Ok(*index)
    }
}

/// A de-duplicated set of vertices and the edges between them.
///
/// Edge indices are 1-based, edge `[a, b]` connects `vertices[a - 1]` and `vertices[b - 1]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<DVec3>,
    pub edges: Vec<[usize; 2]>,
}

impl Mesh {
    /// Scans the segments once, every segment becomes one edge in the same order.
    pub fn from_segments(segments: &[Segment3D]) -> Result<Self, LSystemError> {
        let mut dedup = VertexDeduplicator3D::with_capacity(segments.len() + 1);
        let mut edges = Vec::with_capacity(segments.len());
        for [p0, p1] in segments {
            let i0 = dedup.get_index_or_insert(*p0)?;
            let i1 = dedup.get_index_or_insert(*p1)?;
            edges.push([i0 + 1, i1 + 1]);
        }
        tracing::debug!(
            "reduced {} segments into {} vertices",
            segments.len(),
            dedup.vertices.len()
        );
        Ok(Self {
            vertices: dedup.vertices,
            edges,
        })
    }

    /// 1-based vertex lookup
    pub fn vertex(&self, index: usize) -> Option<DVec3> {
        index
            .checked_sub(1)
            .and_then(|i| self.vertices.get(i))
            .copied()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty() && self.vertices.is_empty()
    }

    /// Writes one `v x y z` line per vertex followed by one `l a b` line per edge.
    pub fn write_obj<W: Write>(&self, mut writer: W) -> Result<(), LSystemError> {
        for v in self.vertices.iter() {
            writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
        }
        for [a, b] in self.edges.iter() {
            writeln!(writer, "l {a} {b}")?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Writes the mesh to `path` in the format of [`Mesh::write_obj`]
    pub fn save_obj<P: AsRef<Path>>(&self, path: P) -> Result<(), LSystemError> {
        let file = File::create(path.as_ref())?;
        self.write_obj(BufWriter::new(file))?;
        tracing::debug!(
            "wrote {} vertices and {} edges to {:?}",
            self.vertices.len(),
            self.edges.len(),
            path.as_ref()
        );
        Ok(())
    }
}
