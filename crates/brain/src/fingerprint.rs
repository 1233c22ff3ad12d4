use std::collections::HashMap;

/// A small, fixed stopword list so the fingerprint reflects content, not grammar.
const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "is", "are", "was", "were", "be", "been", "being", "to", "of", "in", "on",
    "for", "with", "as", "at", "by", "that", "this", "it", "from", "not", "we", "you", "they", "i", "he", "she",
];

/// Compute a retrieval-surrogate fingerprint: L2-normalized term frequencies over the
/// alphanumeric tokens of `text`, stopwords removed.
///
/// Normalizing to unit length lets [`cosine_similarity`] collapse to a plain dot
/// product, since `cos(a, b) = (a . b) / (|a| |b|) = a . b` when both are unit vectors.
pub fn fingerprint(text: &str) -> HashMap<String, f32> {
    let mut counts: HashMap<String, f32> = HashMap::new();

    for token in text.split(|c: char| !c.is_alphanumeric()) {
        if token.is_empty() {
            continue;
        }
        let token = token.to_lowercase();
        if token.len() < 2 || STOPWORDS.contains(&token.as_str()) {
            continue;
        }
        *counts.entry(token).or_insert(0.0) += 1.0;
    }

    let norm = counts.values().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in counts.values_mut() {
            *value /= norm;
        }
    }

    counts
}

/// Cosine similarity between two fingerprints produced by [`fingerprint`].
pub fn cosine_similarity(a: &HashMap<String, f32>, b: &HashMap<String, f32>) -> f32 {
    let (smaller, larger) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    smaller.iter().filter_map(|(term, weight)| larger.get(term).map(|other| weight * other)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_text_has_similarity_one() {
        let fp = fingerprint("Rust ownership borrowing lifetimes ownership");
        let similarity = cosine_similarity(&fp, &fp);
        assert!((similarity - 1.0).abs() < 1e-5);
    }

    #[test]
    fn unrelated_text_has_low_similarity() {
        let a = fingerprint("sourdough bread baking yeast fermentation kitchen");
        let b = fingerprint("rocket propulsion orbital mechanics thrust vector");
        assert!(cosine_similarity(&a, &b) < 0.1);
    }

    #[test]
    fn stopwords_are_excluded() {
        let fp = fingerprint("the quick brown fox");
        assert!(!fp.contains_key("the"));
        assert!(fp.contains_key("quick"));
    }
}
