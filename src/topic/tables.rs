//! Declarative keyword tables used by the topic resolution cascade.
//!
//! Each table is an ordered list of `(keyword, label)` rules. Matching is a
//! case-insensitive substring test and the first matching rule wins, so more
//! specific keywords must come before the general ones they contain.

/// One `keyword → label` rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRule {
    pub keyword: &'static str,
    pub label: &'static str,
}

const fn rule(keyword: &'static str, label: &'static str) -> KeywordRule {
    KeywordRule { keyword, label }
}

/// Rules matched against free-text hints such as a chart's question wording.
pub static HINT_KEYWORDS: &[KeywordRule] = &[
    rule("gender", "Gender"),
    rule("housing", "Housing Type"),
    rule("household income", "Household Income"),
    rule("household size", "Household Size"),
    rule("people live in your household", "Household Size"),
    rule("children", "Children in Household"),
    rule("income", "Household Income"),
    rule("age group", "Age Group"),
    rule("how old", "Age Group"),
    rule("ethnic", "Ethnicity"),
    rule("sexual orientation", "Sexual Orientation"),
    rule("disabilit", "Disability"),
    rule("education", "Education Level"),
    rule("qualification", "Education Level"),
    rule("employment", "Employment Status"),
    rule("occupation", "Employment Status"),
    rule("marital", "Marital Status"),
    rule("religio", "Religion"),
    rule("trust", "Trust in Institutions"),
    rule("satisf", "Life Satisfaction"),
    rule("lonel", "Loneliness"),
    rule("region", "Region"),
];

/// Rules matched against the trailing fragment segment on the household page.
pub static HOUSEHOLD_KEYWORDS: &[KeywordRule] = &[
    rule("income", "Household Income"),
    rule("size", "Household Size"),
    rule("children", "Children in Household"),
    rule("composition", "Household Composition"),
    rule("tenure", "Housing Tenure"),
    rule("housing", "Housing Type"),
];

/// Returns the label of the first rule whose keyword occurs in `text`.
///
/// # Example
///
/// ```rust
/// use survey_lens::topic::tables::{first_match, HINT_KEYWORDS};
///
/// assert_eq!(
///     first_match(HINT_KEYWORDS, "What type of housing do you live in?"),
///     Some("Housing Type")
/// );
/// assert_eq!(first_match(HINT_KEYWORDS, "Favourite colour"), None);
/// ```
#[must_use]
pub fn first_match(table: &[KeywordRule], text: &str) -> Option<&'static str> {
    let text = text.to_lowercase();
    table
        .iter()
        .find(|rule| text.contains(&rule.keyword.to_lowercase()))
        .map(|rule| rule.label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specific_keywords_precede_general_ones() {
        assert_eq!(
            first_match(HINT_KEYWORDS, "How many people live in your household?"),
            Some("Household Size")
        );
        assert_eq!(
            first_match(HINT_KEYWORDS, "What is your total household income?"),
            Some("Household Income")
        );
        assert_eq!(
            first_match(HINT_KEYWORDS, "Personal income before tax"),
            Some("Household Income")
        );
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(first_match(HINT_KEYWORDS, "GENDER IDENTITY"), Some("Gender"));
        assert_eq!(first_match(HOUSEHOLD_KEYWORDS, "Household-Income"), Some("Household Income"));
    }

    #[test]
    fn table_order_breaks_ties() {
        // Both "housing" and "income" occur; "housing" is listed first.
        assert_eq!(
            first_match(HINT_KEYWORDS, "Housing costs as a share of income"),
            Some("Housing Type")
        );
    }

    #[test]
    fn household_segments_map_to_labels() {
        assert_eq!(first_match(HOUSEHOLD_KEYWORDS, "household-size"), Some("Household Size"));
        assert_eq!(first_match(HOUSEHOLD_KEYWORDS, "children-under-16"), Some("Children in Household"));
        assert_eq!(first_match(HOUSEHOLD_KEYWORDS, "pets"), None);
    }

    #[test]
    fn every_keyword_is_lowercase() {
        for rule in HINT_KEYWORDS.iter().chain(HOUSEHOLD_KEYWORDS) {
            assert_eq!(rule.keyword, rule.keyword.to_lowercase());
        }
    }
}
