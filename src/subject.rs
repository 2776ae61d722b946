//! Subject patterns and matching.
//!
//! Subjects are dot-delimited tokens (`app.user.created`). A subscription
//! pattern may use two wildcard tokens:
//!
//! - `*` matches exactly one non-empty token (`app.*.created`)
//! - `>` as the last token matches one or more non-empty tokens (`app.>`)
//!
//! Wildcards are whole tokens. `app.us*` is a literal pattern and only
//! matches the subject `app.us*`.

use std::fmt;

const SEPARATOR: char = '.';
const SINGLE: &str = "*";
const TAIL: &str = ">";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Single,
    Tail,
}

/// A parsed subscription pattern.
///
/// Parsing happens once at registration; matching at publish time is a
/// token-by-token comparison against the published subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectPattern {
    raw: String,
    /// `None` for patterns without wildcard tokens (exact string match).
    tokens: Option<Vec<Token>>,
}

impl SubjectPattern {
    /// Parse a pattern.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let mut parts: Vec<&str> = raw.split(SEPARATOR).collect();
        let last = parts.pop();

        let has_wildcard = parts.iter().any(|t| *t == SINGLE)
            || matches!(last, Some(SINGLE) | Some(TAIL));

        let tokens = if has_wildcard {
            let mut tokens: Vec<Token> = parts.iter().map(|t| literal_or_single(t)).collect();
            match last {
                Some(TAIL) => tokens.push(Token::Tail),
                Some(t) => tokens.push(literal_or_single(t)),
                None => {}
            }
            Some(tokens)
        } else {
            None
        };

        Self { raw, tokens }
    }

    /// The pattern as registered.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the pattern contains wildcard tokens.
    pub fn is_wildcard(&self) -> bool {
        self.tokens.is_some()
    }

    /// Check whether a published subject matches this pattern.
    pub fn matches(&self, subject: &str) -> bool {
        let Some(tokens) = &self.tokens else {
            return self.raw == subject;
        };

        let segments: Vec<&str> = subject.split(SEPARATOR).collect();

        match tokens.split_last() {
            Some((Token::Tail, head)) => {
                segments.len() > head.len()
                    && matches_pairwise(head, &segments[..head.len()])
                    && segments[head.len()..].iter().all(|s| !s.is_empty())
            }
            _ => segments.len() == tokens.len() && matches_pairwise(tokens, &segments),
        }
    }
}

impl fmt::Display for SubjectPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Check whether `subject` matches `pattern` without keeping the parsed form.
pub fn matches(pattern: &str, subject: &str) -> bool {
    SubjectPattern::parse(pattern).matches(subject)
}

fn literal_or_single(token: &str) -> Token {
    if token == SINGLE {
        Token::Single
    } else {
        Token::Literal(token.to_string())
    }
}

fn matches_pairwise(tokens: &[Token], segments: &[&str]) -> bool {
    tokens.iter().zip(segments).all(|(token, segment)| match token {
        Token::Literal(literal) => literal == segment,
        Token::Single => !segment.is_empty(),
        // Only valid in last position; parse never produces it elsewhere.
        Token::Tail => false,
    })
}
