//! Frequency analysis: lower-case, split on whitespace, count, rank.
//!
//! Pure computation over an in-memory string. Nothing here can fail: any
//! input, including punctuation-only or mixed-script text, produces a
//! (possibly empty) table.
//!
//! ## Tie-break
//!
//! Tokens with equal counts keep the order in which they were first seen.
//! Counting goes through an [`IndexMap`] (insertion-ordered) and ranking uses
//! a stable sort, so `"b a b a c"` ranks as `b, a, c`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Iterate the tokens of `blob`: lower-cased, split on runs of separators.
///
/// A separator is Unicode whitespace or one of the ASCII information
/// separators `\x1c`..=`\x1f`. No punctuation stripping and no
/// normalisation beyond case folding: `"Hello,"` and `"hello"` are different
/// tokens.
pub fn tokenize(blob: &str) -> impl Iterator<Item = String> + '_ {
    blob.split(is_separator)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Untruncated token counts in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyMap {
    counts: IndexMap<String, usize>,
    total_tokens: usize,
}

impl FrequencyMap {
    /// Count every token of `blob`.
    pub fn from_blob(blob: &str) -> Self {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        let mut total_tokens = 0usize;
        for token in tokenize(blob) {
            *counts.entry(token).or_insert(0) += 1;
            total_tokens += 1;
        }
        Self {
            counts,
            total_tokens,
        }
    }

    /// Number of whitespace-delimited tokens counted.
    pub fn total_tokens(&self) -> usize {
        self.total_tokens
    }

    /// Number of distinct tokens.
    pub fn distinct_tokens(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn get(&self, token: &str) -> Option<usize> {
        self.counts.get(token).copied()
    }

    /// `(token, count)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(t, &c)| (t.as_str(), c))
    }

    /// Rank by count (descending, stable on first-seen order) and keep `n` rows.
    pub fn top(&self, n: usize) -> TokenFrequencyTable {
        let mut rows: Vec<TokenCount> = self
            .counts
            .iter()
            .map(|(token, &count)| TokenCount {
                token: token.clone(),
                count,
            })
            .collect();
        // `sort_by` is stable: equal counts keep insertion (first-seen) order.
        rows.sort_by(|a, b| b.count.cmp(&a.count));
        rows.truncate(n);
        TokenFrequencyTable { rows }
    }
}

/// One row of the ranked table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCount {
    pub token: String,
    pub count: usize,
}

/// Ranked `(token, count)` rows, highest count first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenFrequencyTable {
    rows: Vec<TokenCount>,
}

impl TokenFrequencyTable {
    pub fn rows(&self) -> &[TokenCount] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TokenCount> {
        self.rows.iter()
    }

    /// Sum of the counts shown in the table.
    pub fn total(&self) -> usize {
        self.rows.iter().map(|r| r.count).sum()
    }

    /// Share of row `index` in the table total, in percent.
    pub fn percentage(&self, index: usize) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        self.rows
            .get(index)
            .map(|r| r.count as f64 * 100.0 / total as f64)
    }

    /// `(label, value)` pairs in rank order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, usize)> {
        self.rows.iter().map(|r| (r.token.as_str(), r.count))
    }
}

impl<'a> IntoIterator for &'a TokenFrequencyTable {
    type Item = &'a TokenCount;
    type IntoIter = std::slice::Iter<'a, TokenCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Result of analysing one blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub table: TokenFrequencyTable,
    pub total_tokens: usize,
    pub distinct_tokens: usize,
}

/// Count `blob` and keep the `top_n` most frequent tokens.
pub fn analyze(blob: &str, top_n: usize) -> Analysis {
    let frequencies = FrequencyMap::from_blob(blob);
    Analysis {
        table: frequencies.top(top_n),
        total_tokens: frequencies.total_tokens(),
        distinct_tokens: frequencies.distinct_tokens(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(table: &TokenFrequencyTable) -> Vec<(&str, usize)> {
        table.pairs().collect()
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let a = analyze("b a b a c", 10);
        assert_eq!(pairs(&a.table), vec![("b", 2), ("a", 2), ("c", 1)]);
    }

    #[test]
    fn pdf_scenario_counts() {
        let a = analyze("Hello world Hello again ", 10);
        assert_eq!(pairs(&a.table), vec![("hello", 2), ("world", 1), ("again", 1)]);
        assert_eq!(a.total_tokens, 4);
        assert_eq!(a.distinct_tokens, 3);
    }

    #[test]
    fn information_separators_split_tokens() {
        let a = analyze("a\u{1c}b a\u{1f}b\u{1d}\u{1e}c", 10);
        assert_eq!(pairs(&a.table), vec![("a", 2), ("b", 2), ("c", 1)]);
        assert_eq!(a.total_tokens, 5);
    }

    #[test]
    fn other_control_characters_stay_inside_tokens() {
        let a = analyze("a\u{1b}b", 10);
        assert_eq!(pairs(&a.table), vec![("a\u{1b}b", 1)]);
    }

    #[test]
    fn truncates_to_top_n() {
        let blob = (0..25).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let a = analyze(&blob, 10);
        assert_eq!(a.table.len(), 10);
        assert_eq!(a.table.rows()[0].token, "w0");
        assert_eq!(a.distinct_tokens, 25);
    }

    #[test]
    fn case_folds_but_keeps_punctuation() {
        let a = analyze("Data, data DATA data.", 10);
        assert_eq!(pairs(&a.table), vec![("data", 2), ("data,", 1), ("data.", 1)]);
    }

    #[test]
    fn unicode_whitespace_and_case() {
        let a = analyze("ÉCOLE\u{3000}école\u{00A0}Straße straße 東京 東京", 10);
        assert_eq!(
            pairs(&a.table),
            vec![("école", 2), ("straße", 2), ("東京", 2)]
        );
    }

    #[test]
    fn blank_blob_gives_empty_table() {
        let a = analyze(" \n\t ", 10);
        assert!(a.table.is_empty());
        assert_eq!(a.total_tokens, 0);
        assert_eq!(a.table.percentage(0), None);
    }

    #[test]
    fn punctuation_only_is_fine() {
        let a = analyze("! ? ! -- ...", 10);
        assert_eq!(pairs(&a.table), vec![("!", 2), ("?", 1), ("--", 1), ("...", 1)]);
    }

    #[test]
    fn percentages_sum_to_hundred() {
        let a = analyze("x x x y", 10);
        assert_eq!(a.table.percentage(0), Some(75.0));
        assert_eq!(a.table.percentage(1), Some(25.0));
        assert_eq!(a.table.percentage(2), None);
    }

    #[test]
    fn frequency_map_lookup() {
        let map = FrequencyMap::from_blob("One two ONE");
        assert_eq!(map.get("one"), Some(2));
        assert_eq!(map.get("One"), None);
        let order: Vec<_> = map.iter().map(|(t, _)| t).collect();
        assert_eq!(order, vec!["one", "two"]);
    }

    #[test]
    fn table_serialises_as_array() {
        let a = analyze("a b a", 10);
        let json = serde_json::to_string(&a.table).unwrap();
        assert_eq!(
            json,
            r#"[{"token":"a","count":2},{"token":"b","count":1}]"#
        );
    }
}
