//! Activity matching and pricing.
//!
//! Package inclusion lists and add-on selections carry freeform activity names
//! ("Ushaka Marine World & Wet 'n Wild", "2hrs harbour cruise") that have to be
//! resolved against a destination's rate catalog before they can be priced.
//! Matching runs in three stages and stops at the first that succeeds:
//!
//! 1. exact match of the normalized names
//! 2. substring containment, in either direction
//! 3. token-overlap scoring with a few domain boosts, accepted at 0.34 or more
//!
//! Names that fail all three are reported as unmatched and left out of the total.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::Serialize;

use super::children::{activity_child_price, AgeRange};

/// Minimum overlap score for a fuzzy match to be accepted.
pub const MATCH_THRESHOLD: f64 = 0.34;

/// Keywords that strongly identify an activity, with the score boost applied
/// when both names contain them as a token.
const KEYWORD_BOOSTS: &[(&str, f64)] = &[
    ("ushaka", 3.0),
    ("cruise", 2.0),
    ("shuttle", 2.0),
    ("bus", 1.0),
    ("tour", 1.0),
];

/// Per-head rates for an activity.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRates {
    pub adult: Decimal,
    pub child: Decimal,
    /// Children strictly younger than this go free.
    pub free_age: u8,
    /// When set, only children in this range are charged.
    pub child_age_range: Option<AgeRange>,
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub name: String,
    pub rates: ActivityRates,
    pub is_shuttle: bool,
    /// Flat booking cost for shuttles, independent of party size.
    pub shuttle_base_cost: Option<Decimal>,
}

/// How a name was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Substring,
    Scored { score: f64 },
}

/// A resolved catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityMatch<'a> {
    pub activity: &'a Activity,
    pub kind: MatchKind,
}

/// A catalog entry with its overlap score for a query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate<'a> {
    pub activity: &'a Activity,
    pub score: f64,
}

/// Priced activity for a party.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityCost {
    pub adult_cost: Decimal,
    pub child_cost: Decimal,
    pub total: Decimal,
}

/// Normalize a name for comparison.
///
/// Lowercases, spells out `&`, drops punctuation, collapses whitespace and
/// folds "hours"/"hrs"/"hr" into "hour" (also when glued to a number, "2hrs").
pub fn normalize_name(name: &str) -> String {
    let mut cleaned = String::with_capacity(name.len());
    for ch in name.chars().flat_map(char::to_lowercase) {
        match ch {
            '&' => cleaned.push_str(" and "),
            '\'' | '\u{2019}' => {}
            c if c.is_alphanumeric() => cleaned.push(c),
            _ => cleaned.push(' '),
        }
    }

    cleaned
        .split_whitespace()
        .map(normalize_hour_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn normalize_hour_word(word: &str) -> String {
    let digits_end = word
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(word.len());
    let (number, unit) = word.split_at(digits_end);

    match unit {
        "hour" | "hours" | "hrs" | "hr" if number.is_empty() => "hour".to_string(),
        "hour" | "hours" | "hrs" | "hr" => format!("{} hour", number),
        _ => word.to_string(),
    }
}

/// Tokens of two or more characters from an already-normalized name.
fn tokens(normalized: &str) -> BTreeSet<&str> {
    normalized
        .split_whitespace()
        .filter(|token| token.chars().count() >= 2)
        .collect()
}

/// Overlap score between two normalized names.
///
/// Shared tokens over the smaller token set, plus boosts for keywords that are
/// whole tokens of both names. A name sharing no tokens always scores zero.
pub fn overlap_score(query: &str, candidate: &str) -> f64 {
    let query_tokens = tokens(query);
    let candidate_tokens = tokens(candidate);
    let smaller = query_tokens.len().min(candidate_tokens.len());
    if smaller == 0 {
        return 0.0;
    }

    let shared = query_tokens.intersection(&candidate_tokens).count();
    let mut score = shared as f64 / smaller as f64;

    for (keyword, boost) in KEYWORD_BOOSTS {
        if query_tokens.contains(keyword) && candidate_tokens.contains(keyword) {
            score += boost;
        }
    }
    score
}

/// Every catalog entry scored against `query`, best first.
///
/// Equal scores keep catalog order.
pub fn rank_candidates<'a>(query: &str, catalog: &'a [Activity]) -> Vec<ScoredCandidate<'a>> {
    let normalized = normalize_name(query);
    let mut ranked: Vec<_> = catalog
        .iter()
        .map(|activity| ScoredCandidate {
            activity,
            score: overlap_score(&normalized, &normalize_name(&activity.name)),
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// Resolve a freeform name against a catalog. `None` means unmatched.
pub fn match_activity<'a>(query: &str, catalog: &'a [Activity]) -> Option<ActivityMatch<'a>> {
    let normalized = normalize_name(query);
    if normalized.is_empty() {
        return None;
    }

    let names: Vec<String> = catalog.iter().map(|a| normalize_name(&a.name)).collect();

    if let Some(index) = names.iter().position(|name| *name == normalized) {
        return Some(ActivityMatch {
            activity: &catalog[index],
            kind: MatchKind::Exact,
        });
    }

    if let Some(index) = names.iter().position(|name| {
        !name.is_empty() && (name.contains(&normalized) || normalized.contains(name.as_str()))
    }) {
        return Some(ActivityMatch {
            activity: &catalog[index],
            kind: MatchKind::Substring,
        });
    }

    rank_candidates(query, catalog)
        .into_iter()
        .next()
        .filter(|best| best.score >= MATCH_THRESHOLD)
        .map(|best| ActivityMatch {
            activity: best.activity,
            kind: MatchKind::Scored { score: best.score },
        })
}

/// Price an activity for a party.
///
/// Adults pay per head, except shuttles which cost a flat amount per booking.
/// Each child is priced by the activity's child rules.
pub fn price_activity(activity: &Activity, adults: u32, child_ages: &[u8]) -> ActivityCost {
    let adult_cost = match (activity.is_shuttle, activity.shuttle_base_cost) {
        (true, Some(base)) => base,
        _ => activity.rates.adult * Decimal::from(adults),
    };
    let child_cost: Decimal = child_ages
        .iter()
        .map(|&age| activity_child_price(&activity.rates, age))
        .sum();

    ActivityCost {
        adult_cost,
        child_cost,
        total: adult_cost + child_cost,
    }
}
