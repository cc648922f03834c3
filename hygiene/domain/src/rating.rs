use crate::Establishment;
use std::collections::HashMap;

/// One entry of a rating breakdown: the share of establishments carrying a
/// given raw rating value.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingBucket {
    label: String,
    raw: String,
    count: usize,
    percentage: f64,
}

impl RatingBucket {
    /// Display form of the rating, e.g. `"3-Star"` or `"Exempt"`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The rating value exactly as the upstream authority reported it.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Share of the batch in the range `0..=100`. Not rounded.
    pub fn percentage(&self) -> f64 {
        self.percentage
    }
}

/// Builds the percentage distribution of rating values across `establishments`,
/// ordered by label.
///
/// Buckets are keyed by the raw rating string, so two raw values that render to
/// the same label (`"Pass"` and `"pass"`) stay separate buckets. Equal labels
/// are ordered by their raw value. An empty batch yields an empty breakdown.
pub fn aggregate_ratings(establishments: &[Establishment]) -> Vec<RatingBucket> {
    let total = establishments.len();
    if total == 0 {
        return Vec::new();
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for establishment in establishments {
        *counts.entry(establishment.rating()).or_insert(0) += 1;
    }

    let mut buckets: Vec<RatingBucket> = counts
        .into_iter()
        .map(|(raw, count)| RatingBucket {
            label: rating_label(raw),
            raw: raw.to_string(),
            count,
            percentage: (count as f64 / total as f64) * 100.0,
        })
        .collect();

    buckets.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.raw.cmp(&b.raw)));
    buckets
}

/// Converts a raw rating value into its display label.
///
/// `"1"`..`"5"` become `"<n>-Star"`; every other value is title cased.
pub fn rating_label(raw: &str) -> String {
    match raw {
        "1" | "2" | "3" | "4" | "5" => format!("{}-Star", raw),
        _ => title_case(raw),
    }
}

/// Title-cases the first letter of each word and leaves the rest untouched.
/// The label always has as many chars as the raw value.
fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for c in value.chars() {
        out.push(if at_word_start { to_title(c) } else { c });
        at_word_start = is_word_separator(c);
    }
    out
}

/// Single-char titlecase mapping. Characters whose uppercase form expands to
/// several chars (`ß`, `ﬁ`) are kept as they are.
fn to_title(c: char) -> char {
    match c {
        // Latin digraphs have a dedicated titlecase form.
        '\u{01C4}'..='\u{01C6}' => '\u{01C5}',
        '\u{01C7}'..='\u{01C9}' => '\u{01C8}',
        '\u{01CA}'..='\u{01CC}' => '\u{01CB}',
        '\u{01F1}'..='\u{01F3}' => '\u{01F2}',
        // Greek with ypogegrammeni: the titlecase form keeps the prosgegrammeni.
        '\u{1F80}'..='\u{1F87}' | '\u{1F90}'..='\u{1F97}' | '\u{1FA0}'..='\u{1FA7}' => {
            char::from_u32(c as u32 + 8).unwrap_or(c)
        }
        '\u{1FB3}' => '\u{1FBC}',
        '\u{1FC3}' => '\u{1FCC}',
        '\u{1FF3}' => '\u{1FFC}',
        // Georgian Mkhedruli has an uppercase (Mtavruli) but is its own titlecase.
        '\u{10D0}'..='\u{10FA}' | '\u{10FD}'..='\u{10FF}' => c,
        _ => {
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(mapped), None) => mapped,
                _ => c,
            }
        }
    }
}

fn is_word_separator(c: char) -> bool {
    if c.is_ascii() {
        return !(c.is_ascii_alphanumeric() || c == '_');
    }
    if c.is_alphanumeric() {
        return false;
    }
    c.is_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn establishments(ratings: &[&str]) -> Vec<Establishment> {
        ratings
            .iter()
            .enumerate()
            .map(|(i, rating)| Establishment::new(format!("estab-{}", i), rating.to_string()))
            .collect()
    }

    fn labels_and_percentages(buckets: &[RatingBucket]) -> Vec<(&str, f64)> {
        buckets
            .iter()
            .map(|bucket| (bucket.label(), bucket.percentage()))
            .collect()
    }

    #[test]
    fn test_empty_batch_yields_no_buckets() {
        assert!(aggregate_ratings(&[]).is_empty());
    }

    #[test]
    fn test_single_establishment() {
        let buckets = aggregate_ratings(&establishments(&["3"]));
        assert_eq!(labels_and_percentages(&buckets), vec![("3-Star", 100.0)]);
        assert_eq!(buckets[0].count(), 1);
    }

    #[test]
    fn test_same_rating_collapses_into_one_bucket() {
        let buckets = aggregate_ratings(&establishments(&["3", "3"]));
        assert_eq!(labels_and_percentages(&buckets), vec![("3-Star", 100.0)]);
        assert_eq!(buckets[0].count(), 2);
    }

    #[test]
    fn test_buckets_sorted_by_label() {
        let buckets = aggregate_ratings(&establishments(&["4", "3"]));
        assert_eq!(
            labels_and_percentages(&buckets),
            vec![("3-Star", 50.0), ("4-Star", 50.0)]
        );
    }

    #[test]
    fn test_mixed_star_and_categorical_ratings() {
        let buckets = aggregate_ratings(&establishments(&[
            "5",
            "exempt",
            "5",
            "AwaitingInspection",
        ]));
        assert_eq!(
            labels_and_percentages(&buckets),
            vec![("5-Star", 50.0), ("AwaitingInspection", 25.0), ("Exempt", 25.0)]
        );
    }

    #[test]
    fn test_labels_colliding_after_title_case_stay_separate() {
        let buckets = aggregate_ratings(&establishments(&["pass", "Pass", "pass"]));

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].label(), "Pass");
        assert_eq!(buckets[0].raw(), "Pass");
        assert_eq!(buckets[0].count(), 1);
        assert_eq!(buckets[1].label(), "Pass");
        assert_eq!(buckets[1].raw(), "pass");
        assert_eq!(buckets[1].count(), 2);
    }

    #[test]
    fn test_percentages_are_not_normalized() {
        let buckets = aggregate_ratings(&establishments(&["1", "2", "3"]));
        let third = (1.0_f64 / 3.0) * 100.0;
        for bucket in &buckets {
            assert_eq!(bucket.percentage(), third);
        }
    }

    #[test]
    fn test_rating_label_empty() {
        assert_eq!(rating_label(""), "");
    }

    #[test]
    fn test_rating_label_numeric_outside_star_range() {
        assert_eq!(rating_label("341"), "341");
        assert_eq!(rating_label("0"), "0");
    }

    #[test]
    fn test_rating_label_lowercase_alpha() {
        assert_eq!(rating_label("alpha"), "Alpha");
    }

    #[test]
    fn test_rating_label_uppercase_alpha() {
        assert_eq!(rating_label("ALPHA"), "ALPHA");
    }

    #[test]
    fn test_rating_label_one_to_five() {
        for i in 1..=5 {
            assert_eq!(rating_label(&i.to_string()), format!("{}-Star", i));
        }
    }

    #[test]
    fn test_rating_label_capitalizes_every_word() {
        assert_eq!(rating_label("pass and eat safe"), "Pass And Eat Safe");
        assert_eq!(rating_label("improvement-required"), "Improvement-Required");
        assert_eq!(rating_label("awaiting_inspection"), "Awaiting_inspection");
    }

    #[test]
    fn test_rating_label_keeps_letters_without_single_char_titlecase() {
        assert_eq!(rating_label("ßeta"), "ßeta");
        assert_eq!(rating_label("\u{FB01}ne"), "\u{FB01}ne");
    }

    #[test]
    fn test_rating_label_uses_titlecase_digraphs() {
        assert_eq!(rating_label("\u{01C6}ump"), "\u{01C5}ump");
        assert_eq!(rating_label("\u{01C4}UMP"), "\u{01C5}UMP");
        assert_eq!(rating_label("\u{01C9}ubljana \u{01CC}ow"), "\u{01C8}ubljana \u{01CB}ow");
        assert_eq!(rating_label("\u{01F3}"), "\u{01F2}");
    }

    #[test]
    fn test_rating_label_non_ascii_letters() {
        assert_eq!(rating_label("éclair"), "Éclair");
        assert_eq!(rating_label("\u{1FB3}"), "\u{1FBC}");
        assert_eq!(rating_label("\u{1F80}"), "\u{1F88}");
        assert_eq!(rating_label("\u{10D0}\u{10DC}\u{10D0}"), "\u{10D0}\u{10DC}\u{10D0}");
    }

    proptest! {
        #[test]
        fn prop_label_keeps_char_count(raw in "\\PC{0,12}") {
            prop_assume!(!["1", "2", "3", "4", "5"].contains(&raw.as_str()));
            prop_assert_eq!(rating_label(&raw).chars().count(), raw.chars().count());
        }

        #[test]
        fn prop_single_rating_is_one_full_bucket(n in 1usize..500, rating in ".{0,12}") {
            let batch: Vec<Establishment> = (0..n)
                .map(|i| Establishment::new(format!("estab-{}", i), rating.clone()))
                .collect();

            let buckets = aggregate_ratings(&batch);
            prop_assert_eq!(buckets.len(), 1);
            prop_assert_eq!(buckets[0].percentage(), 100.0);
            prop_assert_eq!(buckets[0].count(), n);
        }

        #[test]
        fn prop_counts_cover_the_batch(ratings in proptest::collection::vec("[a-cA-C1-5]{0,2}", 0..200)) {
            let batch: Vec<Establishment> = ratings
                .iter()
                .enumerate()
                .map(|(i, rating)| Establishment::new(format!("estab-{}", i), rating.clone()))
                .collect();
            let distinct: std::collections::HashSet<&String> = ratings.iter().collect();

            let buckets = aggregate_ratings(&batch);
            let counted: usize = buckets.iter().map(RatingBucket::count).sum();
            prop_assert_eq!(counted, batch.len());
            prop_assert_eq!(buckets.len(), distinct.len());
        }

        #[test]
        fn prop_buckets_sorted_by_label(ratings in proptest::collection::vec(".{0,6}", 0..100)) {
            let batch: Vec<Establishment> = ratings
                .into_iter()
                .enumerate()
                .map(|(i, rating)| Establishment::new(format!("estab-{}", i), rating))
                .collect();

            let buckets = aggregate_ratings(&batch);
            for pair in buckets.windows(2) {
                prop_assert!(pair[0].label() <= pair[1].label());
            }
        }

        #[test]
        fn prop_round_robin_distribution(amount in 100usize..10_100) {
            let ratings = ["a", "b", "c", "d", "e"];
            let batch: Vec<Establishment> = (0..amount)
                .map(|i| Establishment::new(format!("estab-{}", i), ratings[i % ratings.len()].to_string()))
                .collect();

            let buckets = aggregate_ratings(&batch);
            prop_assert_eq!(buckets.len(), ratings.len());
            for (index, bucket) in buckets.iter().enumerate() {
                let expected_count = amount / ratings.len() + usize::from(index < amount % ratings.len());
                prop_assert_eq!(bucket.label(), ratings[index].to_uppercase());
                prop_assert_eq!(bucket.count(), expected_count);
                prop_assert_eq!(bucket.percentage(), (expected_count as f64 / amount as f64) * 100.0);
            }
        }
    }
}
