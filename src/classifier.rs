// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use crate::error::{Error, Result};

/// A category paired with the lowercase substrings that select it.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Ordered rule set. Order is load order and is significant: when a
/// description matches keywords from two categories, the earlier one wins.
#[derive(Debug, Clone)]
pub struct CategoryRuleSet {
    rules: Vec<CategoryRule>,
}

impl CategoryRuleSet {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        CategoryRuleSet { rules }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryRule> {
        self.rules.iter()
    }

    pub fn category_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name.as_str()).collect()
    }
}

fn rule(name: &str, keywords: &[&str]) -> CategoryRule {
    CategoryRule {
        name: name.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

/// The built-in rule set. Immutable at runtime.
pub fn default_rules() -> CategoryRuleSet {
    CategoryRuleSet::new(vec![
        rule(
            "food",
            &[
                "restaurant",
                "groceries",
                "cafe",
                "food",
                "eat",
                "dining",
                "supermarket",
                "coffee",
            ],
        ),
        rule(
            "transport",
            &[
                "uber", "taxi", "bus", "train", "fuel", "petrol", "metro", "transport", "gas",
            ],
        ),
        rule(
            "entertainment",
            &[
                "movie",
                "netflix",
                "concert",
                "game",
                "entertainment",
                "cinema",
            ],
        ),
        rule(
            "shopping",
            &["mall", "clothes", "amazon", "shopping", "store", "fashion"],
        ),
        rule(
            "bills",
            &[
                "electricity",
                "water",
                "internet",
                "bill",
                "utility",
                "rent",
                "mortgage",
            ],
        ),
        rule(
            "healthcare",
            &["hospital", "doctor", "pharmacy", "medical", "health"],
        ),
        rule(
            "education",
            &["course", "book", "tuition", "school", "university"],
        ),
        rule(
            "miscellaneous",
            &["misc", "other", "miscellaneous", "gift", "donation"],
        ),
    ])
}

/// Capability seam so a smarter classifier can replace the keyword one
/// without touching the service contract.
pub trait Classifier {
    fn categorize(&self, description: &str, amount: Decimal) -> Result<String>;
}

/// Rule-based classifier: first keyword match wins, with an amount-based
/// fallback when nothing matches. Pure over an immutable rule set.
pub struct KeywordClassifier {
    rules: CategoryRuleSet,
}

impl KeywordClassifier {
    pub fn new(rules: CategoryRuleSet) -> Self {
        KeywordClassifier { rules }
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        KeywordClassifier::new(default_rules())
    }
}

impl Classifier for KeywordClassifier {
    fn categorize(&self, description: &str, amount: Decimal) -> Result<String> {
        if amount <= Decimal::ZERO {
            return Err(Error::validation("amount", "must be a positive number"));
        }

        let desc = description.trim().to_lowercase();
        if desc.is_empty() {
            return Err(Error::validation("description", "must be non-empty text"));
        }

        for rule in self.rules.iter() {
            if rule.keywords.iter().any(|kw| desc.contains(kw.as_str())) {
                return Ok(rule.name.clone());
            }
        }

        // Amount fallback. Exactly 30 and exactly 300 land in 'general'.
        if amount > Decimal::from(300) {
            Ok("shopping".to_string())
        } else if amount < Decimal::from(30) {
            Ok("miscellaneous".to_string())
        } else {
            Ok("general".to_string())
        }
    }
}
