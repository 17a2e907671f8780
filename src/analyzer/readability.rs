//! Plain-text readability statistics: Flesch Reading Ease, sentence length
//! and lexical complexity over the extracted visible text.

use super::{AnalyzerOutput, PageAnalyzer};
use crate::snapshot::PageSnapshot;
use crate::text::{split_sentences, split_words};
use crate::{AnalysisError, Category, Finding, MetricId, MetricValue, RawMetric, Severity};

/// Words with at least this many syllables count as complex.
const COMPLEX_WORD_SYLLABLES: usize = 3;
/// Complex-word ratio above this is flagged.
const COMPLEX_RATIO_LIMIT: f64 = 0.15;
/// Flesch scores below this read as very difficult.
const DIFFICULT_FLESCH: f64 = 30.0;
/// Average sentence length above this is flagged.
const LONG_SENTENCE_WORDS: f64 = 20.0;

/// Analyzer for the text readability category.
pub struct TextReadabilityAnalyzer;

impl TextReadabilityAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

/// Flesch Reading Ease from totals. Callers guarantee non-zero counts.
pub fn flesch_reading_ease(words: usize, sentences: usize, syllables: usize) -> f64 {
    let words_per_sentence = words as f64 / sentences as f64;
    let syllables_per_word = syllables as f64 / words as f64;
    206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word
}

/// Count syllables as maximal vowel-group clusters, with a silent trailing
/// "e" dropped when more than one cluster was found. Every word counts as at
/// least one syllable.
pub fn count_syllables(word: &str) -> usize {
    let word = word.to_ascii_lowercase();
    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');

    let mut clusters = 0;
    let mut prev_vowel = false;
    for c in word.chars() {
        let vowel = is_vowel(c);
        if vowel && !prev_vowel {
            clusters += 1;
        }
        prev_vowel = vowel;
    }

    if clusters > 1 && word.ends_with('e') {
        clusters -= 1;
    }
    clusters.max(1)
}

impl Default for TextReadabilityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageAnalyzer for TextReadabilityAnalyzer {
    fn category(&self) -> Category {
        Category::TextReadability
    }

    fn analyze(&self, snapshot: &PageSnapshot) -> Result<AnalyzerOutput, AnalysisError> {
        let sentences = split_sentences(&snapshot.visible_text);
        let words = split_words(&snapshot.visible_text);

        if sentences.is_empty() {
            return Err(AnalysisError::InsufficientText(
                "no sentences in extracted text".to_string(),
            ));
        }
        if words.is_empty() {
            return Err(AnalysisError::InsufficientText(
                "no words in extracted text".to_string(),
            ));
        }

        let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();
        let complex_words = words
            .iter()
            .filter(|w| count_syllables(w) >= COMPLEX_WORD_SYLLABLES)
            .count();

        let flesch = flesch_reading_ease(words.len(), sentences.len(), syllables);
        let avg_sentence_length = words.len() as f64 / sentences.len() as f64;
        let complexity = complex_words as f64 / words.len() as f64;

        let mut out = AnalyzerOutput::default();
        out.metrics.push(RawMetric::new(
            MetricId::FleschReadingEase,
            MetricValue::Scale(flesch),
        ));
        out.metrics.push(RawMetric::new(
            MetricId::AvgSentenceLength,
            MetricValue::Scale(avg_sentence_length),
        ));
        out.metrics.push(RawMetric::new(
            MetricId::LexicalComplexity,
            MetricValue::Ratio(complexity),
        ));

        if flesch < DIFFICULT_FLESCH {
            out.findings.push(Finding::new(
                Category::TextReadability,
                Severity::Warning,
                format!("text is very difficult to read (Flesch {:.1})", flesch),
            ));
        }
        if avg_sentence_length > LONG_SENTENCE_WORDS {
            out.findings.push(Finding::new(
                Category::TextReadability,
                Severity::Info,
                format!(
                    "long sentences (average {:.1} words)",
                    avg_sentence_length
                ),
            ));
        }
        if complexity > COMPLEX_RATIO_LIMIT {
            out.findings.push(Finding::new(
                Category::TextReadability,
                Severity::Info,
                format!(
                    "{:.0}% of words have {}+ syllables",
                    complexity * 100.0,
                    COMPLEX_WORD_SYLLABLES
                ),
            ));
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_syllables() {
        assert_eq!(count_syllables("test"), 1);
        assert_eq!(count_syllables("testing"), 2);
        assert_eq!(count_syllables("sophisticated"), 5);
        assert_eq!(count_syllables("comprehensive"), 4);
        // trailing silent e
        assert_eq!(count_syllables("side"), 1);
        // every word has at least one syllable
        assert_eq!(count_syllables("tsk"), 1);
        assert_eq!(count_syllables("be"), 1);
    }

    #[test]
    fn test_flesch_known_value() {
        // 1 sentence, 10 words, 15 syllables:
        // 206.835 - 1.015*10 - 84.6*1.5 = 69.785
        let score = flesch_reading_ease(10, 1, 15);
        assert!((score - 69.785).abs() < 0.01, "score was {}", score);
    }

    #[test]
    fn test_empty_text_is_insufficient() {
        let snapshot = PageSnapshot::from_html("https://example.com/", "<html><body></body></html>");
        let err = TextReadabilityAnalyzer::new().analyze(&snapshot).unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientText(_)));
    }

    #[test]
    fn test_simple_text_metrics() {
        let snapshot = PageSnapshot::from_html(
            "https://example.com/",
            "<body><p>This is a simple test. It has two sentences.</p></body>",
        );
        let out = TextReadabilityAnalyzer::new().analyze(&snapshot).unwrap();

        let avg = out
            .metrics
            .iter()
            .find(|m| m.id == MetricId::AvgSentenceLength)
            .unwrap();
        match avg.value {
            MetricValue::Scale(v) => assert!((v - 4.5).abs() < 1e-9, "avg was {}", v),
            other => panic!("expected scale, got {:?}", other),
        }

        let flesch = out
            .metrics
            .iter()
            .find(|m| m.id == MetricId::FleschReadingEase)
            .unwrap();
        match flesch.value {
            MetricValue::Scale(v) => assert!(v > 60.0, "flesch was {}", v),
            other => panic!("expected scale, got {:?}", other),
        }
    }

    #[test]
    fn test_complex_text_flagged() {
        let snapshot = PageSnapshot::from_html(
            "https://example.com/",
            "<body><p>Sophisticated comprehensive organizational exponential \
             methodologies necessitate considerable interdisciplinary \
             collaboration alongside institutional prioritization.</p></body>",
        );
        let out = TextReadabilityAnalyzer::new().analyze(&snapshot).unwrap();
        assert!(out
            .findings
            .iter()
            .any(|f| f.message.contains("syllables")));
    }
}
