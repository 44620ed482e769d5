//! Vector index abstraction for course passages.
//!
//! An index maps a query vector to the positions of its nearest stored
//! vectors. Positions address the passage store; the index itself knows
//! nothing about text.

use tutor_core::{AppError, AppResult};

/// Position reported for a result slot with no stored vector behind it.
pub const NO_MATCH: i64 = -1;

/// One search hit: a store position and its squared L2 distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub position: i64,
    pub distance: f32,
}

/// Trait for vector index backends.
///
/// `search` returns exactly `k` neighbors ordered by ascending distance.
/// When fewer than `k` vectors are stored, the remaining slots carry
/// [`NO_MATCH`] and an infinite distance.
pub trait VectorIndex: Send + Sync {
    /// Dimension every stored and query vector must have.
    fn dimensions(&self) -> usize;

    /// Number of stored vectors.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find the `k` nearest stored vectors to `query`.
    fn search(&self, query: &[f32], k: usize) -> AppResult<Vec<Neighbor>>;
}

/// Brute-force squared-L2 index held in memory.
#[derive(Debug, Clone)]
pub struct FlatIndex {
    dimensions: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatIndex {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            vectors: Vec::new(),
        }
    }

    /// Append a vector; its position is the number of vectors added before it.
    pub fn add(&mut self, vector: Vec<f32>) -> AppResult<i64> {
        if vector.len() != self.dimensions {
            return Err(AppError::Knowledge(format!(
                "Vector has {} dimensions, index expects {}",
                vector.len(),
                self.dimensions
            )));
        }
        self.vectors.push(vector);
        Ok(self.vectors.len() as i64 - 1)
    }
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

impl VectorIndex for FlatIndex {
    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn len(&self) -> usize {
        self.vectors.len()
    }

    fn search(&self, query: &[f32], k: usize) -> AppResult<Vec<Neighbor>> {
        // an empty index matches nothing, whatever the query's dimension
        if !self.vectors.is_empty() && query.len() != self.dimensions {
            return Err(AppError::Knowledge(format!(
                "Query has {} dimensions, index expects {}",
                query.len(),
                self.dimensions
            )));
        }

        let mut scored: Vec<Neighbor> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(position, vector)| Neighbor {
                position: position as i64,
                distance: squared_l2(query, vector),
            })
            .collect();

        // sort_by is stable, so equal distances keep insertion order
        scored.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        scored.truncate(k);

        while scored.len() < k {
            scored.push(Neighbor {
                position: NO_MATCH,
                distance: f32::INFINITY,
            });
        }

        tracing::debug!("Flat search over {} vectors (k={})", self.vectors.len(), k);
        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> FlatIndex {
        let mut index = FlatIndex::new(2);
        index.add(vec![0.0, 0.0]).unwrap();
        index.add(vec![1.0, 0.0]).unwrap();
        index.add(vec![5.0, 5.0]).unwrap();
        index
    }

    #[test]
    fn test_nearest_first() {
        let results = index().search(&[0.9, 0.1], 2).unwrap();
        let positions: Vec<i64> = results.iter().map(|n| n.position).collect();
        assert_eq!(positions, vec![1, 0]);
        assert!(results[0].distance <= results[1].distance);
    }

    #[test]
    fn test_pads_with_no_match() {
        let results = index().search(&[0.0, 0.0], 5).unwrap();
        assert_eq!(results.len(), 5);
        assert_eq!(results[3].position, NO_MATCH);
        assert_eq!(results[4].position, NO_MATCH);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut index = FlatIndex::new(1);
        index.add(vec![1.0]).unwrap();
        index.add(vec![-1.0]).unwrap();
        let results = index.search(&[0.0], 2).unwrap();
        assert_eq!(results[0].position, 0);
        assert_eq!(results[1].position, 1);
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut index = FlatIndex::new(3);
        assert!(index.add(vec![1.0]).is_err());
        index.add(vec![1.0, 0.0, 0.0]).unwrap();
        assert!(index.search(&[1.0, 2.0], 1).is_err());
    }

    #[test]
    fn test_empty_index() {
        let index = FlatIndex::new(2);
        assert!(index.is_empty());
        let results = index.search(&[0.0, 0.0, 0.0], 3).unwrap();
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|n| n.position == NO_MATCH));
    }
}
