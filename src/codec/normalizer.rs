//! Direction token normalization
//!
//! Bank exports spell the direction of a row in many ways. This is a lookup
//! table, not a parser: extending the vocabulary means adding a token below.

use crate::models::EntryKind;

/// Tokens that mean money coming in
pub const INCOME_TOKENS: &[&str] = &["income", "доход", "in", "приход", "+", "credit", "кредит"];

/// Tokens that mean money going out
pub const EXPENSE_TOKENS: &[&str] = &["expense", "расход", "out", "-", "debit", "дебет"];

/// Classify a raw type token
///
/// Matching is case-insensitive and ignores surrounding whitespace. Returns
/// `None` for anything unrecognized, including the empty string; deciding
/// what to do with such rows is up to the caller.
pub fn normalize_kind(token: &str) -> Option<EntryKind> {
    let token = token.trim().to_lowercase();
    if token.is_empty() {
        return None;
    }

    if INCOME_TOKENS.contains(&token.as_str()) {
        Some(EntryKind::Income)
    } else if EXPENSE_TOKENS.contains(&token.as_str()) {
        Some(EntryKind::Expense)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_income_tokens() {
        for token in ["income", "доход", "in", "приход", "+", "credit", "кредит"] {
            assert_eq!(normalize_kind(token), Some(EntryKind::Income), "{}", token);
        }
    }

    #[test]
    fn test_expense_tokens() {
        for token in ["expense", "расход", "out", "-", "debit", "дебет"] {
            assert_eq!(normalize_kind(token), Some(EntryKind::Expense), "{}", token);
        }
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(normalize_kind("  CREDIT "), Some(EntryKind::Income));
        assert_eq!(normalize_kind("Debit"), Some(EntryKind::Expense));
        assert_eq!(normalize_kind("ДОХОД"), Some(EntryKind::Income));
        assert_eq!(normalize_kind("Расход"), Some(EntryKind::Expense));
    }

    #[test]
    fn test_unknown_tokens() {
        assert_eq!(normalize_kind(""), None);
        assert_eq!(normalize_kind("   "), None);
        assert_eq!(normalize_kind("transfer"), None);
        assert_eq!(normalize_kind("incoming"), None);
        assert_eq!(normalize_kind("+-"), None);
    }

    #[test]
    fn test_vocabularies_do_not_overlap() {
        for token in INCOME_TOKENS {
            assert!(!EXPENSE_TOKENS.contains(token));
        }
    }
}
