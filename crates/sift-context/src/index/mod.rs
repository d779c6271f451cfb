//! In-memory vector index with exact cosine search and JSON persistence.

mod similarity;
mod snapshot;

pub use similarity::cosine_similarity;

use serde::Serialize;
use sift_core::{Embedding, Error, Metadata, Result};
use similarity::select_top_k;
use snapshot::IndexSnapshot;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

/// One stored vector together with its text and metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    /// Embedding vector
    pub vector: Embedding,
    /// Chunk text the vector was computed from
    pub text: String,
    /// Metadata supplied when the entry was added
    pub metadata: Metadata,
}

/// Search result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    /// Insertion position of the matched entry
    pub position: usize,
    /// Stored text
    pub text: String,
    /// Cosine similarity in `[-1, 1]`
    pub score: f32,
    /// Stored metadata
    pub metadata: Metadata,
}

/// Brute-force vector index
///
/// Entries keep insertion order. The dimension is fixed by the first
/// successful insert (or by [`VectorIndex::with_dimension`]) and every later
/// vector must match it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorIndex {
    dimension: Option<usize>,
    entries: Vec<IndexEntry>,
}

impl VectorIndex {
    /// Create an empty index with no dimension established
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty index that only accepts vectors of `dimension` components
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if `dimension` is zero
    pub fn with_dimension(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(Error::InvalidConfiguration(
                "index dimension must be positive".to_owned(),
            ));
        }
        Ok(Self {
            dimension: Some(dimension),
            entries: Vec::new(),
        })
    }

    /// Open a persisted index
    ///
    /// # Errors
    /// See [`VectorIndex::load`]
    pub fn open(path: &Path) -> Result<Self> {
        let mut index = Self::new();
        index.load(path)?;
        Ok(index)
    }

    /// Established dimension, if any
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at an insertion position
    pub fn get(&self, position: usize) -> Option<&IndexEntry> {
        self.entries.get(position)
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Append a batch of vectors with their texts and optional metadata
    ///
    /// The whole batch is validated before anything is stored, so a failed
    /// call leaves the index untouched. Missing metadata defaults to an empty
    /// object per entry.
    ///
    /// # Errors
    /// - `LengthMismatch` if the three sequences differ in length
    /// - `DimensionMismatch` if any vector disagrees with the index dimension
    ///   (or, for the first insert, with the first vector of the batch)
    /// - `NonFiniteVector` if any component is NaN or infinite
    /// - `InvalidConfiguration` if the first vector ever inserted is empty
    pub fn add(
        &mut self,
        vectors: Vec<Embedding>,
        texts: Vec<String>,
        metadata: Option<Vec<Metadata>>,
    ) -> Result<()> {
        if vectors.len() != texts.len() {
            return Err(Error::LengthMismatch(format!(
                "{} vectors but {} texts",
                vectors.len(),
                texts.len()
            )));
        }
        if let Some(metadata_len) = metadata.as_ref().map(Vec::len).filter(|len| *len != vectors.len()) {
            return Err(Error::LengthMismatch(format!(
                "{} vectors but {metadata_len} metadata entries",
                vectors.len()
            )));
        }
        let Some(first) = vectors.first() else {
            return Ok(());
        };

        let expected = match self.dimension {
            Some(dimension) => dimension,
            None if first.is_empty() => {
                return Err(Error::InvalidConfiguration(
                    "vectors must have at least one component".to_owned(),
                ));
            }
            None => first.len(),
        };
        if let Some(vector) = vectors.iter().find(|vector| vector.len() != expected) {
            return Err(Error::DimensionMismatch {
                expected,
                actual: vector.len(),
            });
        }
        if let Some(position) = vectors
            .iter()
            .position(|vector| !vector.iter().all(|component| component.is_finite()))
        {
            return Err(Error::NonFiniteVector { position });
        }

        let metadata = metadata.unwrap_or_else(|| vec![Metadata::new(); vectors.len()]);
        let added = vectors.len();
        self.dimension = Some(expected);
        self.entries.extend(
            vectors
                .into_iter()
                .zip(texts)
                .zip(metadata)
                .map(|((vector, text), metadata)| IndexEntry {
                    vector,
                    text,
                    metadata,
                }),
        );

        debug!(
            "Added {added} vectors (dimension {expected}, total {})",
            self.entries.len()
        );
        Ok(())
    }

    /// Return the `top_k` entries most similar to `query`
    ///
    /// Results are ordered by score descending; equal scores keep insertion
    /// order. An empty index or `top_k == 0` yields no hits.
    ///
    /// # Errors
    /// Returns `DimensionMismatch` if the index has a dimension and `query`
    /// has a different length
    pub fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<SearchHit>> {
        if let Some(expected) = self.dimension.filter(|expected| *expected != query.len()) {
            return Err(Error::DimensionMismatch {
                expected,
                actual: query.len(),
            });
        }
        if top_k == 0 || self.entries.is_empty() {
            return Ok(Vec::new());
        }

        let scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (position, cosine_similarity(query, &entry.vector)))
            .collect();

        let hits: Vec<SearchHit> = select_top_k(scored, top_k)
            .into_iter()
            .filter_map(|(position, score)| {
                self.entries.get(position).map(|entry| SearchHit {
                    position,
                    text: entry.text.clone(),
                    score,
                    metadata: entry.metadata.clone(),
                })
            })
            .collect();

        debug!(
            "Search over {} entries returned {} hits",
            self.entries.len(),
            hits.len()
        );
        Ok(hits)
    }

    /// Write the index to `path` as pretty-printed JSON
    ///
    /// Parent directories are created as needed. The file is written to a
    /// temporary sibling first and renamed into place.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file cannot be written
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let snapshot = self.to_snapshot();
        let bytes = serde_json::to_vec_pretty(&snapshot)?;

        let mut temp_name = path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = Path::new(&temp_name);
        fs::write(temp_path, bytes)?;
        fs::rename(temp_path, path)?;

        info!(
            "Saved index with {} entries to {}",
            self.entries.len(),
            path.display()
        );
        Ok(())
    }

    /// Replace the contents of this index with the snapshot at `path`
    ///
    /// The file is fully parsed and validated before the current contents
    /// are touched.
    ///
    /// # Errors
    /// - `NotFound` if the file does not exist
    /// - `CorruptData` if it is not a valid index snapshot
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                return Err(Error::NotFound(path.display().to_string()));
            }
            Err(error) => return Err(error.into()),
        };

        let snapshot: IndexSnapshot = serde_json::from_slice(&bytes).map_err(|error| {
            Error::CorruptData(format!("{}: {error}", path.display()))
        })?;
        snapshot.validate()?;

        *self = Self::from_snapshot(snapshot);
        info!(
            "Loaded index with {} entries from {}",
            self.entries.len(),
            path.display()
        );
        Ok(())
    }

    fn to_snapshot(&self) -> IndexSnapshot {
        let mut snapshot = IndexSnapshot {
            dimension: self.dimension.unwrap_or(0),
            vectors: Vec::with_capacity(self.entries.len()),
            documents: Vec::with_capacity(self.entries.len()),
            metadata: Vec::with_capacity(self.entries.len()),
        };
        for entry in &self.entries {
            snapshot.vectors.push(entry.vector.clone());
            snapshot.documents.push(entry.text.clone());
            snapshot.metadata.push(entry.metadata.clone());
        }
        snapshot
    }

    fn from_snapshot(snapshot: IndexSnapshot) -> Self {
        let dimension = (snapshot.dimension > 0).then_some(snapshot.dimension);
        let entries = snapshot
            .vectors
            .into_iter()
            .zip(snapshot.documents)
            .zip(snapshot.metadata)
            .map(|((vector, text), metadata)| IndexEntry {
                vector,
                text,
                metadata,
            })
            .collect();
        Self { dimension, entries }
    }
}
