//! Plain sliding-window splitting.

use super::{SplitterConfig, TextSplitter, char_windows};

/// Slices text into `chunk_size`-character windows every `chunk_size - overlap`
/// characters, ignoring text structure.
///
/// Windows are returned untrimmed so neighbours overlap by exactly `overlap`
/// characters; whitespace-only windows are dropped.
#[derive(Debug, Clone, Copy)]
pub struct FixedSizeSplitter {
    config: SplitterConfig,
}

impl FixedSizeSplitter {
    /// Create a new fixed-size splitter
    pub fn new(config: SplitterConfig) -> Self {
        Self { config }
    }
}

impl TextSplitter for FixedSizeSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        char_windows(text, self.config.chunk_size(), self.config.step())
            .into_iter()
            .filter(|window| !window.trim().is_empty())
            .map(str::to_owned)
            .collect()
    }

    fn config(&self) -> SplitterConfig {
        self.config
    }
}
