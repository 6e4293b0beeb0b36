//! Pre-dispatch input validation: length cap and profanity denylist.
//! Runs before any session mutation; a rejected query changes nothing.

use thiserror::Error;

/// Hard limit on a single query, in characters.
pub const MAX_QUERY_LEN: usize = 500;

/// Fixed denylist, matched case-insensitively as substrings.
const DENYLIST: &[&str] = &[
    "fuck",
    "shit",
    "bitch",
    "asshole",
    "bastard",
    "dickhead",
    "cunt",
    "motherfucker",
    "wanker",
    "bullshit",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("query exceeds {} characters", MAX_QUERY_LEN)]
    QueryTooLong,

    #[error("query contains inappropriate language")]
    InappropriateLanguage,
}

impl RejectReason {
    /// Machine-readable reason code surfaced to the caller.
    pub fn code(&self) -> &'static str {
        match self {
            RejectReason::QueryTooLong => "query_too_long",
            RejectReason::InappropriateLanguage => "inappropriate_language",
        }
    }
}

/// Checks a trimmed query before dispatch.
pub fn check(query: &str) -> Result<(), RejectReason> {
    if query.chars().count() > MAX_QUERY_LEN {
        return Err(RejectReason::QueryTooLong);
    }

    let lowered = query.to_lowercase();
    if DENYLIST.iter().any(|term| lowered.contains(term)) {
        return Err(RejectReason::InappropriateLanguage);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinary_queries_pass() {
        assert!(check("I have a headache and a mild fever").is_ok());
        assert!(check("see cardiologist").is_ok());
    }

    #[test]
    fn boundary_length_is_allowed_one_more_is_not() {
        let at_cap: String = "a".repeat(MAX_QUERY_LEN);
        assert!(check(&at_cap).is_ok());

        let over: String = "a".repeat(MAX_QUERY_LEN + 1);
        assert_eq!(check(&over), Err(RejectReason::QueryTooLong));
    }

    #[test]
    fn denylist_matches_are_case_insensitive_substrings() {
        assert_eq!(
            check("this is BULLSHIT"),
            Err(RejectReason::InappropriateLanguage)
        );
        assert_eq!(
            check("what the Fuck is this rash"),
            Err(RejectReason::InappropriateLanguage)
        );
    }

    #[test]
    fn reason_codes_are_stable() {
        assert_eq!(RejectReason::QueryTooLong.code(), "query_too_long");
        assert_eq!(
            RejectReason::InappropriateLanguage.code(),
            "inappropriate_language"
        );
    }
}
