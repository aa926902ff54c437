/// Feed analytics — pure, stateless functions over a collection of users.
///
/// Nothing here is cached; every call recomputes from the feeds it is
/// given.
///
/// Two scoring modes exist. `Scoring::Compat` reproduces the historical
/// keyword check byte for byte: the entry text is lowercased and then
/// matched against the literal keywords "good", "great", and "Excellent",
/// so the capitalized third keyword can never match. `Scoring::Corrected`
/// folds the lexicon to lowercase as well and is the default.
///
/// The percentage is the historical formula in both modes: entries
/// containing a keyword, divided by total words, times 100. The numerator
/// counts entries and the denominator counts words; the mismatch is part
/// of the preserved contract, not an error here.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::registry::user::User;

/// Keywords exactly as the historical analyzer spelled them.
const COMPAT_KEYWORDS: [&str; 3] = ["good", "great", "Excellent"];

/// Lowercased lexicon used by `Scoring::Corrected`.
static CORRECTED_KEYWORDS: Lazy<Vec<String>> =
    Lazy::new(|| COMPAT_KEYWORDS.iter().map(|k| k.to_lowercase()).collect());

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scoring {
    /// Historical behavior: "Excellent" never matches the lowercased text.
    Compat,
    /// Case-insensitive matching for every keyword.
    #[default]
    Corrected,
}

// ---------------------------------------------------------------------------
// FeedScorer
// ---------------------------------------------------------------------------

/// Injectable scorer: a scoring mode plus its keyword lexicon. The free
/// functions below wrap a scorer with the built-in lexicon; callers with
/// their own keyword set construct one via `with_keywords`.
#[derive(Clone, Debug)]
pub struct FeedScorer {
    scoring: Scoring,
    keywords: Vec<String>,
}

impl FeedScorer {
    pub fn new(scoring: Scoring) -> Self {
        let keywords = match scoring {
            Scoring::Compat => COMPAT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            Scoring::Corrected => CORRECTED_KEYWORDS.clone(),
        };
        FeedScorer { scoring, keywords }
    }

    /// Custom lexicon. Under `Corrected` the keywords are folded to
    /// lowercase up front; under `Compat` they are matched verbatim
    /// against the lowercased text, however they are spelled.
    pub fn with_keywords(scoring: Scoring, keywords: Vec<String>) -> Self {
        let keywords = match scoring {
            Scoring::Compat => keywords,
            Scoring::Corrected => keywords.iter().map(|k| k.to_lowercase()).collect(),
        };
        FeedScorer { scoring, keywords }
    }

    pub fn scoring(&self) -> Scoring {
        self.scoring
    }

    /// Whether one feed entry counts as positive: the lowercased text
    /// contains at least one lexicon keyword.
    pub fn entry_is_positive(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }

    /// Count of feed entries (not words) containing a keyword.
    pub fn positive_entries(&self, users: &[User]) -> usize {
        users
            .iter()
            .flat_map(|user| user.feed_texts())
            .filter(|text| self.entry_is_positive(text))
            .count()
    }

    /// Positive entries over total words, as a percentage. 0.0 when there
    /// are no words at all.
    pub fn positive_percentage(&self, users: &[User]) -> f64 {
        let words = total_words(users);
        if words == 0 {
            return 0.0;
        }
        self.positive_entries(users) as f64 / words as f64 * 100.0
    }
}

impl Default for FeedScorer {
    fn default() -> Self {
        FeedScorer::new(Scoring::default())
    }
}

// ---------------------------------------------------------------------------
// Free functions (built-in lexicon)
// ---------------------------------------------------------------------------

/// Total whitespace-separated words across every feed entry of every
/// user. Runs of whitespace count once; empty entries count zero.
pub fn total_words(users: &[User]) -> usize {
    users
        .iter()
        .flat_map(|user| user.feed_texts())
        .map(|text| text.split_whitespace().count())
        .sum()
}

/// Count of feed entries containing at least one positive keyword.
pub fn positive_entries(users: &[User], scoring: Scoring) -> usize {
    FeedScorer::new(scoring).positive_entries(users)
}

/// Positive-entry-per-word ratio as a percentage (see module docs).
pub fn positive_percentage(users: &[User], scoring: Scoring) -> f64 {
    FeedScorer::new(scoring).positive_percentage(users)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_feed(id: &str, entries: &[&str]) -> User {
        let mut user = User::new(id);
        for entry in entries {
            user.post(*entry);
        }
        user
    }

    // -------------------------------------------------------------------
    // Word counting
    // -------------------------------------------------------------------

    #[test]
    fn test_total_words_splits_on_whitespace_runs() {
        let users = vec![
            user_with_feed("alice", &["this is good", "  spaced   out  "]),
            user_with_feed("bob", &["", "one"]),
        ];
        // 3 + 2 + 0 + 1
        assert_eq!(total_words(&users), 6);
    }

    #[test]
    fn test_total_words_empty_collection() {
        assert_eq!(total_words(&[]), 0);
    }

    // -------------------------------------------------------------------
    // Entry scoring
    // -------------------------------------------------------------------

    #[test]
    fn test_positive_entries_counts_entries_not_words() {
        let users = vec![user_with_feed("alice", &["good good good", "nothing here"])];
        // One entry matches, however many keywords it contains.
        assert_eq!(positive_entries(&users, Scoring::Corrected), 1);
    }

    #[test]
    fn test_scoring_is_case_insensitive_on_text() {
        let users = vec![user_with_feed("alice", &["GREAT stuff", "Good day"])];
        assert_eq!(positive_entries(&users, Scoring::Compat), 2);
        assert_eq!(positive_entries(&users, Scoring::Corrected), 2);
    }

    #[test]
    fn test_compat_excellent_keyword_never_matches() {
        // The historical lexicon spells "Excellent" capitalized but checks
        // it against lowercased text, so it can never match. Compat keeps
        // that behavior; Corrected fixes it.
        let users = vec![user_with_feed("alice", &["Excellent work", "excellent work"])];
        assert_eq!(positive_entries(&users, Scoring::Compat), 0);
        assert_eq!(positive_entries(&users, Scoring::Corrected), 2);
    }

    #[test]
    fn test_keyword_matches_inside_words() {
        // Substring containment, not word-boundary matching.
        let users = vec![user_with_feed("alice", &["goodness gracious"])];
        assert_eq!(positive_entries(&users, Scoring::Corrected), 1);
    }

    // -------------------------------------------------------------------
    // Percentage
    // -------------------------------------------------------------------

    #[test]
    fn test_percentage_of_empty_collection_is_zero() {
        assert_eq!(positive_percentage(&[], Scoring::Corrected), 0.0);
        let silent = vec![user_with_feed("alice", &[])];
        assert_eq!(positive_percentage(&silent, Scoring::Corrected), 0.0);
    }

    #[test]
    fn test_percentage_is_entries_over_words() {
        // "this is good": 1 positive entry, 3 words. The historical ratio
        // divides entry count by word count, so this is 100/3, not 100.
        let users = vec![user_with_feed("alice", &["this is good"])];
        let pct = positive_percentage(&users, Scoring::Corrected);
        assert!((pct - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_percentage_across_users() {
        let users = vec![
            user_with_feed("alice", &["good morning"]), // positive, 2 words
            user_with_feed("bob", &["just noise"]),     // 2 words
        ];
        let pct = positive_percentage(&users, Scoring::Corrected);
        assert!((pct - 25.0).abs() < 1e-9); // 1 entry / 4 words
    }

    // -------------------------------------------------------------------
    // Injectable scorer
    // -------------------------------------------------------------------

    #[test]
    fn test_custom_lexicon() {
        let users = vec![user_with_feed("alice", &["ship it", "hold off"])];
        let scorer =
            FeedScorer::with_keywords(Scoring::Corrected, vec!["SHIP".to_string()]);
        assert_eq!(scorer.positive_entries(&users), 1);
        assert!((scorer.positive_percentage(&users) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_scorer_is_corrected() {
        let scorer = FeedScorer::default();
        assert_eq!(scorer.scoring(), Scoring::Corrected);
        assert!(scorer.entry_is_positive("simply excellent"));
    }
}
