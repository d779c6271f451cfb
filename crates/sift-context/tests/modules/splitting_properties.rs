//! Size and coverage properties of the splitters over realistic text.

#[cfg(test)]
mod tests {
    use sift_context::chunking::{FixedSizeSplitter, RecursiveSplitter, SplitterConfig, TextSplitter as _};

    const ARTICLE: &str = "Vector search finds the nearest neighbours of a query.\n\n\
        Exact search compares the query with every stored vector. It is slow for \
        very large collections but simple and precise.\n\n\
        Chunking splits long documents into passages.\nEach passage is embedded \
        separately.\nOverlap keeps sentences that straddle a boundary retrievable.\n\n\
        Ünïcödé tëxt shöüld nëvër bë çüt ïn thë mïddlë öf ä chäräctër.";

    fn char_count(text: &str) -> usize {
        text.chars().count()
    }

    #[test]
    fn test_recursive_chunks_respect_size() {
        for (chunk_size, overlap) in [(20, 0), (50, 10), (80, 79), (200, 20), (1000, 100)] {
            let splitter = RecursiveSplitter::new(SplitterConfig::new(chunk_size, overlap).unwrap());
            let chunks = splitter.split(ARTICLE);
            assert!(!chunks.is_empty());
            for chunk in &chunks {
                assert!(char_count(chunk) <= chunk_size);
                assert_eq!(chunk.trim(), chunk);
            }
        }
    }

    #[test]
    fn test_every_word_is_covered() {
        let splitter = RecursiveSplitter::new(SplitterConfig::new(60, 10).unwrap());
        let chunks = splitter.split(ARTICLE);
        let joined = chunks.join(" ");
        for word in ["nearest", "precise.", "boundary", "chäräctër."] {
            assert!(joined.contains(word), "missing {word}");
        }
    }

    #[test]
    fn test_large_chunk_keeps_whole_text() {
        let splitter = RecursiveSplitter::new(SplitterConfig::new(10_000, 0).unwrap());
        assert_eq!(splitter.split(ARTICLE), vec![ARTICLE.trim().to_owned()]);
    }

    #[test]
    fn test_fixed_splitter_covers_text() {
        let splitter = FixedSizeSplitter::new(SplitterConfig::new(64, 16).unwrap());
        let chunks = splitter.split(ARTICLE);
        assert!(chunks.iter().all(|chunk| char_count(chunk) <= 64));
        assert!(ARTICLE.starts_with(chunks[0].as_str()));
        let last = chunks.last().unwrap();
        assert!(ARTICLE.ends_with(last.as_str()));
    }
}
