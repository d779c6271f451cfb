//! On-disk JSON snapshot of a vector index.

use serde::{Deserialize, Serialize};
use sift_core::{Embedding, Error, Metadata, Result};

/// Parallel-array layout shared with other tooling:
/// `dimension`, `vectors`, `documents`, `metadata`.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct IndexSnapshot {
    /// Vector length, `0` while no dimension is established
    pub dimension: usize,
    /// One vector per entry
    pub vectors: Vec<Embedding>,
    /// One text per entry
    pub documents: Vec<String>,
    /// One metadata object per entry
    pub metadata: Vec<Metadata>,
}

impl IndexSnapshot {
    /// Check the parallel-array and dimension invariants.
    ///
    /// # Errors
    /// Returns `CorruptData` describing the first violation
    pub fn validate(&self) -> Result<()> {
        let count = self.vectors.len();
        if self.documents.len() != count || self.metadata.len() != count {
            return Err(Error::CorruptData(format!(
                "parallel arrays disagree: {} vectors, {} documents, {} metadata",
                count,
                self.documents.len(),
                self.metadata.len()
            )));
        }

        if self.dimension == 0 {
            if count > 0 {
                return Err(Error::CorruptData(
                    "dimension is 0 but vectors are present".to_owned(),
                ));
            }
            return Ok(());
        }

        if let Some((position, vector)) = self
            .vectors
            .iter()
            .enumerate()
            .find(|(_, vector)| vector.len() != self.dimension)
        {
            return Err(Error::CorruptData(format!(
                "vector {position} has length {}, expected {}",
                vector.len(),
                self.dimension
            )));
        }

        Ok(())
    }
}
