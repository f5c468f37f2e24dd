//! Exact (flat) nearest-neighbor index over Euclidean distance.

use crate::error::{Result, VidseekError};

/// A neighbor returned by [`VectorIndex::query`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Insertion position of the matched vector.
    pub position: usize,
    /// Euclidean (L2) distance to the query.
    pub distance: f32,
}

/// Build-once, query-many L2 index.
///
/// Vectors are stored row-major in one contiguous buffer.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    dimension: usize,
    data: Vec<f32>,
    len: usize,
}

impl VectorIndex {
    /// Build an index over `vectors`; all must share one dimensionality.
    pub fn build(vectors: Vec<Vec<f32>>) -> Result<Self> {
        let dimension = vectors.first().map(Vec::len).unwrap_or(0);
        let len = vectors.len();
        let mut data = Vec::with_capacity(dimension * len);

        for vector in vectors {
            if vector.len() != dimension {
                return Err(VidseekError::DimensionMismatch {
                    expected: dimension,
                    found: vector.len(),
                });
            }
            data.extend(vector);
        }

        Ok(Self {
            dimension,
            data,
            len,
        })
    }

    /// Number of indexed vectors.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Dimensionality of the indexed vectors (0 for an empty index).
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    fn row(&self, position: usize) -> &[f32] {
        let start = position * self.dimension;
        &self.data[start..start + self.dimension]
    }

    /// Return the `k` nearest vectors to `query`, closest first.
    ///
    /// Equal distances keep insertion order.
    pub fn query(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        if k == 0 || k > self.len {
            return Err(VidseekError::InvalidK {
                k,
                available: self.len,
            });
        }
        if query.len() != self.dimension {
            return Err(VidseekError::DimensionMismatch {
                expected: self.dimension,
                found: query.len(),
            });
        }

        let mut scored: Vec<(usize, f32)> = (0..self.len)
            .map(|position| (position, squared_l2(query, self.row(position))))
            .collect();

        scored.sort_by(|a, b| a.1.total_cmp(&b.1));
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .map(|(position, squared)| Neighbor {
                position,
                distance: squared.sqrt(),
            })
            .collect())
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}
