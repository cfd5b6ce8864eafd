//! Word-vector similarity source.
//!
//! Vectors are stored row-major in one flat buffer alongside their norms, so
//! cosine similarity is a single dot product per pair.

use std::collections::HashMap;
use std::io::BufRead;

use quartet_core::{QuartetError, Result, SimilaritySource};

/// Vocabulary of words with dense `f32` vectors, compared by cosine similarity.
///
/// # Examples
///
/// ```
/// use quartet_core::SimilaritySource;
/// use quartet_scoring::VectorTable;
///
/// let text = "3 2\nking 1.0 0.0\nqueen 0.9 0.1\nbanana 0.0 1.0\n";
/// let table = VectorTable::from_text(text.as_bytes()).unwrap();
///
/// assert_eq!(table.len(), 3);
/// assert!(table.similarity("king", "queen").unwrap() > 0.9);
/// assert!(table.similarity("king", "banana").unwrap().abs() < 1e-6);
/// assert!(table.similarity("king", "castle").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct VectorTable {
    dimensions: usize,
    words: Vec<String>,
    index: HashMap<String, usize>,
    vectors: Vec<f32>,
    norms: Vec<f32>,
}

impl VectorTable {
    /// Creates an empty table for vectors of `dimensions` components.
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            ..Self::default()
        }
    }

    /// Rebuilds a table from its flat parts.
    pub(crate) fn from_parts(dimensions: usize, words: Vec<String>, vectors: Vec<f32>) -> Result<Self> {
        if vectors.len() != words.len() * dimensions {
            return Err(QuartetError::Snapshot(format!(
                "{} words with {} dimensions need {} components, found {}",
                words.len(),
                dimensions,
                words.len() * dimensions,
                vectors.len()
            )));
        }

        let mut table = Self::new(dimensions);
        for (word, vector) in words.into_iter().zip(vectors.chunks_exact(dimensions.max(1))) {
            table.insert(word, vector.to_vec())?;
        }
        Ok(table)
    }

    /// Parses word2vec/GloVe text format: one `word v1 v2 ...` entry per line.
    ///
    /// An optional leading `count dimensions` header line is skipped. The
    /// first entry fixes the dimensionality; later duplicates of a word are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`QuartetError::Snapshot`] on unparsable components or
    /// inconsistent dimensions, and [`QuartetError::Io`] on read failures.
    pub fn from_text<R: BufRead>(reader: R) -> Result<Self> {
        let mut table: Option<VectorTable> = None;

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else {
                continue;
            };
            let rest: Vec<&str> = fields.collect();

            if line_no == 0 && rest.len() == 1 && is_header(word, rest[0]) {
                continue;
            }

            let vector = rest
                .iter()
                .map(|component| component.parse::<f32>())
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| {
                    QuartetError::Snapshot(format!("line {}: {}", line_no + 1, e))
                })?;

            let table = table.get_or_insert_with(|| VectorTable::new(vector.len()));
            if table.contains(word) {
                continue;
            }
            table.insert(word, vector).map_err(|e| match e {
                QuartetError::Snapshot(msg) => {
                    QuartetError::Snapshot(format!("line {}: {}", line_no + 1, msg))
                }
                other => other,
            })?;
        }

        Ok(table.unwrap_or_default())
    }

    /// Adds or replaces a word's vector.
    ///
    /// # Errors
    ///
    /// Returns [`QuartetError::Snapshot`] if the vector has the wrong length.
    pub fn insert(&mut self, word: impl Into<String>, vector: Vec<f32>) -> Result<()> {
        if vector.len() != self.dimensions {
            return Err(QuartetError::Snapshot(format!(
                "expected {} dimensions, found {}",
                self.dimensions,
                vector.len()
            )));
        }

        let word = word.into();
        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        match self.index.get(&word) {
            Some(&row) => {
                let start = row * self.dimensions;
                self.vectors[start..start + self.dimensions].copy_from_slice(&vector);
                self.norms[row] = norm;
            }
            None => {
                self.index.insert(word.clone(), self.words.len());
                self.words.push(word);
                self.vectors.extend_from_slice(&vector);
                self.norms.push(norm);
            }
        }
        Ok(())
    }

    #[inline]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in insertion order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// The flat row-major component buffer.
    pub(crate) fn raw_vectors(&self) -> &[f32] {
        &self.vectors
    }

    /// The vector stored for `word`.
    pub fn vector(&self, word: &str) -> Option<&[f32]> {
        let row = *self.index.get(word)?;
        let start = row * self.dimensions;
        Some(&self.vectors[start..start + self.dimensions])
    }

    fn cosine(&self, a: usize, b: usize) -> f64 {
        let denom = self.norms[a] as f64 * self.norms[b] as f64;
        if denom == 0.0 {
            return 0.0;
        }
        let (ra, rb) = (a * self.dimensions, b * self.dimensions);
        let dot: f64 = self.vectors[ra..ra + self.dimensions]
            .iter()
            .zip(&self.vectors[rb..rb + self.dimensions])
            .map(|(x, y)| *x as f64 * *y as f64)
            .sum();
        (dot / denom).clamp(-1.0, 1.0)
    }
}

fn is_header(first: &str, second: &str) -> bool {
    first.parse::<usize>().is_ok() && second.parse::<usize>().is_ok()
}

impl SimilaritySource for VectorTable {
    fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    fn similarity(&self, a: &str, b: &str) -> Option<f64> {
        let a = *self.index.get(a)?;
        let b = *self.index.get(b)?;
        Some(self.cosine(a, b))
    }

    fn vocabulary_size(&self) -> Option<usize> {
        Some(self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_without_header() {
        let table = VectorTable::from_text("a 1 0 0\nb 0 1 0\n".as_bytes()).unwrap();
        assert_eq!(table.dimensions(), 3);
        assert_eq!(table.words(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_inconsistent_dimensions_fail() {
        let err = VectorTable::from_text("a 1 0\nb 0 1 0\n".as_bytes()).unwrap_err();
        match err {
            QuartetError::Snapshot(msg) => assert!(msg.starts_with("line 2")),
            other => panic!("expected Snapshot, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_component_fails() {
        let err = VectorTable::from_text("a 1 x\n".as_bytes()).unwrap_err();
        assert!(matches!(err, QuartetError::Snapshot(_)));
    }

    #[test]
    fn test_duplicate_word_keeps_first() {
        let table = VectorTable::from_text("a 1 0\na 0 1\n".as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.vector("a"), Some(&[1.0f32, 0.0][..]));
    }

    #[test]
    fn test_zero_vector_has_zero_similarity() {
        let mut table = VectorTable::new(2);
        table.insert("zero", vec![0.0, 0.0]).unwrap();
        table.insert("x", vec![1.0, 0.0]).unwrap();
        assert_eq!(table.similarity("zero", "x"), Some(0.0));
    }

    #[test]
    fn test_opposite_vectors() {
        let mut table = VectorTable::new(2);
        table.insert("up", vec![0.0, 2.0]).unwrap();
        table.insert("down", vec![0.0, -1.0]).unwrap();
        let s = table.similarity("up", "down").unwrap();
        assert!((s + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut table = VectorTable::new(2);
        table.insert("a", vec![1.0, 0.0]).unwrap();
        table.insert("b", vec![1.0, 0.0]).unwrap();
        table.insert("a", vec![0.0, 1.0]).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.similarity("a", "b").unwrap().abs() < 1e-9);
    }
}
