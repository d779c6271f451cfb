//! Text splitting into bounded, overlapping chunks ready for embedding.

mod fixed;
mod recursive;
mod text;

pub use fixed::FixedSizeSplitter;
pub use recursive::{DEFAULT_SEPARATORS, RecursiveSplitter};
pub use text::{clean_text, extract_sentences, truncate_preview};

use sift_core::config::{ChunkingConfig, ChunkingStrategy};
use sift_core::{Error, Result};

/// Validated chunk size and overlap, both in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitterConfig {
    chunk_size: usize,
    overlap: usize,
}

impl SplitterConfig {
    /// Create a configuration
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if `chunk_size` is zero or `overlap >= chunk_size`
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::InvalidConfiguration(
                "chunk_size must be positive".to_owned(),
            ));
        }
        if overlap >= chunk_size {
            return Err(Error::InvalidConfiguration(format!(
                "overlap ({overlap}) must be less than chunk_size ({chunk_size})"
            )));
        }
        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    /// Target chunk size in characters.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Overlap between adjacent windows in characters.
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Distance between the starts of adjacent windows (always at least 1).
    pub fn step(&self) -> usize {
        self.chunk_size - self.overlap
    }
}

/// Splits one document's text into an ordered list of chunks.
pub trait TextSplitter: Send + Sync {
    /// Split `text`, preserving left-to-right order. Empty input yields no chunks.
    fn split(&self, text: &str) -> Vec<String>;

    /// The size/overlap pair this splitter was built with.
    fn config(&self) -> SplitterConfig;
}

/// Build the splitter described by the chunking section of the config.
///
/// # Errors
/// Returns `InvalidConfiguration` if the size/overlap pair is invalid
pub fn build_splitter(config: &ChunkingConfig) -> Result<Box<dyn TextSplitter>> {
    let splitter_config = SplitterConfig::new(config.chunk_size, config.overlap)?;
    Ok(match config.strategy {
        ChunkingStrategy::Recursive => Box::new(RecursiveSplitter::new(splitter_config)),
        ChunkingStrategy::Fixed => Box::new(FixedSizeSplitter::new(splitter_config)),
    })
}

/// Number of characters (Unicode scalar values) in `text`.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Slice `text` into windows of `size` characters starting every `step` characters.
///
/// Stops at the first window that reaches the end of `text`.
pub(crate) fn char_windows(text: &str, size: usize, step: usize) -> Vec<&str> {
    let mut bounds: Vec<usize> = text.char_indices().map(|(offset, _)| offset).collect();
    let total = bounds.len();
    bounds.push(text.len());

    let mut windows = Vec::new();
    let mut start = 0;
    while start < total {
        let end = (start + size).min(total);
        windows.push(&text[bounds[start]..bounds[end]]);
        if end == total {
            break;
        }
        start += step;
    }
    windows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_rejects_overlap_not_smaller() {
        assert!(matches!(
            SplitterConfig::new(10, 10),
            Err(Error::InvalidConfiguration(_))
        ));
        assert!(matches!(
            SplitterConfig::new(10, 25),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_config_rejects_zero_size() {
        assert!(matches!(
            SplitterConfig::new(0, 0),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_config_step() {
        let config = SplitterConfig::new(50, 10).unwrap();
        assert_eq!(config.step(), 40);
        assert_eq!(config.chunk_size(), 50);
        assert_eq!(config.overlap(), 10);
    }

    #[test]
    fn test_char_windows_overlap() {
        let windows = char_windows("abcdefghij", 4, 3);
        assert_eq!(windows, vec!["abcd", "defg", "ghij"]);
    }

    #[test]
    fn test_char_windows_stops_at_end() {
        // A run that fits in one window yields exactly one window.
        assert_eq!(char_windows("abc", 5, 2), vec!["abc"]);
        assert_eq!(char_windows("abcde", 5, 2), vec!["abcde"]);
        assert!(char_windows("", 5, 2).is_empty());
    }

    #[test]
    fn test_char_windows_multibyte() {
        let windows = char_windows("añbñc", 2, 2);
        assert_eq!(windows, vec!["añ", "bñ", "c"]);
    }

    #[test]
    fn test_build_splitter_from_config() {
        let config = ChunkingConfig {
            strategy: ChunkingStrategy::Fixed,
            chunk_size: 4,
            overlap: 1,
        };
        let splitter = build_splitter(&config).unwrap();
        assert_eq!(splitter.split("abcdefg"), vec!["abcd", "defg"]);
        assert_eq!(splitter.config().step(), 3);

        let bad = ChunkingConfig {
            strategy: ChunkingStrategy::Recursive,
            chunk_size: 4,
            overlap: 4,
        };
        assert!(build_splitter(&bad).is_err());
    }
}
