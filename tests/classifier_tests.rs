// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fintrack::classifier::{Classifier, KeywordClassifier, default_rules};
use fintrack::error::Error;
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn keyword_match_wins_regardless_of_amount() {
    let c = KeywordClassifier::default();
    assert_eq!(
        c.categorize("Dinner at restaurant", dec("65.25")).unwrap(),
        "food"
    );
    // High amount does not override a keyword hit
    assert_eq!(
        c.categorize("Dinner at restaurant", dec("900")).unwrap(),
        "food"
    );
}

#[test]
fn earlier_category_wins_on_double_match() {
    let c = KeywordClassifier::default();
    // 'groceries' (food) and 'uber' (transport) both match; food is
    // declared first in the rule set.
    assert_eq!(
        c.categorize("uber trip to buy groceries", dec("40")).unwrap(),
        "food"
    );
}

#[test]
fn matching_is_case_insensitive_substring() {
    let c = KeywordClassifier::default();
    assert_eq!(c.categorize("  COFFEE at dawn  ", dec("4.50")).unwrap(), "food");
    // substring, not word match: 'gaslight' contains 'gas'
    assert_eq!(c.categorize("gaslight tickets", dec("50")).unwrap(), "transport");
}

#[test]
fn amount_fallback_when_no_keyword_matches() {
    let c = KeywordClassifier::default();
    assert_eq!(c.categorize("random text", dec("500")).unwrap(), "shopping");
    assert_eq!(c.categorize("random text", dec("10")).unwrap(), "miscellaneous");
    assert_eq!(c.categorize("random text", dec("100")).unwrap(), "general");
}

#[test]
fn fallback_boundaries_are_exclusive() {
    let c = KeywordClassifier::default();
    // exactly 30 and exactly 300 both land in 'general'
    assert_eq!(c.categorize("random text", dec("30")).unwrap(), "general");
    assert_eq!(c.categorize("random text", dec("300")).unwrap(), "general");
    assert_eq!(c.categorize("random text", dec("300.01")).unwrap(), "shopping");
    assert_eq!(c.categorize("random text", dec("29.99")).unwrap(), "miscellaneous");
}

#[test]
fn rejects_empty_and_whitespace_descriptions() {
    let c = KeywordClassifier::default();
    for desc in ["", "   ", "\t\n"] {
        let err = c.categorize(desc, dec("50")).unwrap_err();
        assert!(matches!(err, Error::Validation { field: "description", .. }));
    }
}

#[test]
fn rejects_non_positive_amounts() {
    let c = KeywordClassifier::default();
    for amt in ["0", "-1", "-0.01"] {
        let err = c.categorize("coffee", dec(amt)).unwrap_err();
        assert!(matches!(err, Error::Validation { field: "amount", .. }));
    }
}

#[test]
fn categorize_is_deterministic() {
    let c = KeywordClassifier::default();
    let a = c.categorize("Dinner at restaurant", dec("65.25")).unwrap();
    let b = c.categorize("Dinner at restaurant", dec("65.25")).unwrap();
    assert_eq!(a, b);
}

#[test]
fn every_category_reachable_by_its_own_keywords() {
    let c = KeywordClassifier::default();
    let rules = default_rules();
    for (name, probe) in [
        ("food", "supermarket run"),
        ("transport", "petrol refill"),
        ("entertainment", "cinema night"),
        ("shopping", "fashion outlet"),
        ("bills", "mortgage payment"),
        ("healthcare", "pharmacy pickup"),
        ("education", "tuition fee"),
        ("miscellaneous", "donation drive"),
    ] {
        assert!(rules.category_names().contains(&name));
        assert_eq!(c.categorize(probe, dec("50")).unwrap(), name);
    }
}
