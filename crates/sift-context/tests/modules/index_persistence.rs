//! Vector index persistence across save and load.

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use sift_context::VectorIndex;
    use sift_core::{Error, Metadata};
    use std::fs;
    use tempfile::TempDir;

    fn entry_metadata(index: usize) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.insert("chunk_index".to_owned(), json!(index));
        metadata.insert("tags".to_owned(), json!(["a", "b"]));
        metadata
    }

    #[test]
    fn test_search_results_survive_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("index.json");

        let mut index = VectorIndex::new();
        let vectors: Vec<Vec<f32>> = (0..20)
            .map(|seed| {
                let base = seed as f32;
                vec![base.sin(), base.cos(), (base * 0.5).sin(), 0.1]
            })
            .collect();
        let texts: Vec<String> = (0..20).map(|seed| format!("chunk {seed}")).collect();
        let metadata: Vec<Metadata> = (0..20).map(entry_metadata).collect();
        index.add(vectors, texts, Some(metadata)).unwrap();
        index.save(&path).unwrap();

        let loaded = VectorIndex::open(&path).unwrap();
        assert_eq!(loaded.len(), 20);
        assert_eq!(loaded.dimension(), Some(4));

        let queries = [[1.0, 0.0, 0.0, 0.0], [0.2, -0.4, 0.9, 0.0], [0.0; 4]];
        for query in &queries {
            for top_k in 0..25 {
                let before = index.search(query, top_k).unwrap();
                let after = loaded.search(query, top_k).unwrap();
                assert_eq!(before, after);
                assert_eq!(before.len(), top_k.min(20));
            }
        }
    }

    #[test]
    fn test_snapshot_written_by_other_tools_loads() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("external.json");
        fs::write(
            &path,
            r#"{"dimension":3,"vectors":[[1,0,0],[0,1,0]],"documents":["A","B"],"metadata":[{"source":"a.txt"},{}]}"#,
        )
        .unwrap();

        let index = VectorIndex::open(&path).unwrap();
        let hits = index.search(&[1.0, 0.0, 0.0], 1).unwrap();
        assert_eq!(hits[0].text, "A");
        assert_eq!(hits[0].metadata.get("source"), Some(&json!("a.txt")));
    }

    #[test]
    fn test_save_overwrites_previous_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("index.json");

        let mut index = VectorIndex::new();
        index
            .add(vec![vec![1.0, 0.0]], vec!["first".to_owned()], None)
            .unwrap();
        index.save(&path).unwrap();
        index
            .add(vec![vec![0.0, 1.0]], vec!["second".to_owned()], None)
            .unwrap();
        index.save(&path).unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["documents"], json!(["first", "second"]));
        assert!(!temp_dir.path().join("index.json.tmp").exists());
    }

    #[test]
    fn test_metadata_must_be_objects() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("index.json");
        fs::write(
            &path,
            r#"{"dimension":1,"vectors":[[1]],"documents":["A"],"metadata":["not an object"]}"#,
        )
        .unwrap();

        assert!(matches!(
            VectorIndex::open(&path),
            Err(Error::CorruptData(_))
        ));
    }
}
