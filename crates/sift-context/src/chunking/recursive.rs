//! Coarse-to-fine recursive splitting on natural text boundaries.

use super::{SplitterConfig, TextSplitter, char_len, char_windows};

/// Separators from coarsest to finest: paragraph, line, sentence, word, character.
pub const DEFAULT_SEPARATORS: [&str; 5] = ["\n\n", "\n", ". ", " ", ""];

/// Splits on the coarsest separator first and only descends to finer
/// separators for pieces that are still larger than the chunk size.
///
/// Runs of small pieces are re-joined with the separator that produced them
/// and re-sliced into `chunk_size` windows with `overlap` characters shared
/// between neighbours.
#[derive(Debug, Clone)]
pub struct RecursiveSplitter {
    config: SplitterConfig,
    separators: Vec<String>,
}

impl RecursiveSplitter {
    /// Create a splitter using [`DEFAULT_SEPARATORS`].
    pub fn new(config: SplitterConfig) -> Self {
        Self::with_separators(config, &DEFAULT_SEPARATORS)
    }

    /// Create a splitter with a custom separator cascade (coarsest first).
    ///
    /// The character-level separator `""` is appended when missing so that
    /// every piece eventually fits.
    pub fn with_separators(config: SplitterConfig, separators: &[&str]) -> Self {
        let mut cascade: Vec<String> = separators
            .iter()
            .filter(|separator| !separator.is_empty())
            .map(|separator| (*separator).to_owned())
            .collect();
        cascade.push(String::new());
        Self {
            config,
            separators: cascade,
        }
    }

    /// Separator cascade in use.
    pub fn separators(&self) -> &[String] {
        &self.separators
    }

    fn split_level(&self, text: &str, level: usize, out: &mut Vec<String>) {
        let separator = self.separators[level].as_str();
        let size = self.config.chunk_size();

        let pieces: Vec<&str> = if separator.is_empty() {
            text.char_indices()
                .map(|(offset, character)| &text[offset..offset + character.len_utf8()])
                .collect()
        } else {
            text.split(separator).collect()
        };

        let mut pending: Vec<&str> = Vec::new();
        for piece in pieces {
            let length = char_len(piece);
            if length < size {
                pending.push(piece);
                continue;
            }

            self.merge_into(&pending, separator, out);
            pending.clear();

            if length > size && level + 1 < self.separators.len() {
                self.split_level(piece, level + 1, out);
            } else {
                self.merge_into(&[piece], separator, out);
            }
        }
        self.merge_into(&pending, separator, out);
    }

    /// Join a run of pieces with `separator` and slice it into overlapping windows.
    fn merge_into(&self, pieces: &[&str], separator: &str, out: &mut Vec<String>) {
        if pieces.is_empty() {
            return;
        }
        let merged = pieces.join(separator);
        out.extend(
            char_windows(&merged, self.config.chunk_size(), self.config.step())
                .into_iter()
                .map(str::to_owned),
        );
    }
}

impl TextSplitter for RecursiveSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut raw = Vec::new();
        self.split_level(text, 0, &mut raw);

        raw.iter()
            .map(|chunk| chunk.trim())
            .filter(|chunk| !chunk.is_empty())
            .map(str::to_owned)
            .collect()
    }

    fn config(&self) -> SplitterConfig {
        self.config
    }
}
