//! Loose versions for strings outside the strict grammar
//!
//! Any string parses. It is split into digit runs, lowercase letter runs
//! and whatever lies between them; `.` separators are dropped.
//! `2021.08-beta` becomes `[2021, 8, "-", "beta"]`.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;

static LOOSE_COMPONENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+|[a-z]+|\.").expect("loose component pattern"));

/// One component of a loose version.
///
/// Alphanumeric components order before numeric ones, so `1.0beta`
/// sorts before `1.0.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LooseToken {
    Alpha(String),
    Numeric(u64),
}

impl LooseToken {
    fn from_piece(piece: &str) -> Self {
        if piece.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = piece.parse() {
                return LooseToken::Numeric(n);
            }
        }
        LooseToken::Alpha(piece.to_string())
    }
}

static ZERO: LooseToken = LooseToken::Numeric(0);

#[derive(Debug, Clone)]
pub struct LooseVersion {
    original: String,
    tokens: Vec<LooseToken>,
}

impl LooseVersion {
    pub fn parse(input: &str) -> Self {
        let mut pieces = Vec::new();
        let mut last = 0;
        for m in LOOSE_COMPONENT.find_iter(input) {
            if m.start() > last {
                pieces.push(&input[last..m.start()]);
            }
            pieces.push(m.as_str());
            last = m.end();
        }
        if last < input.len() {
            pieces.push(&input[last..]);
        }

        let tokens = pieces
            .into_iter()
            .filter(|piece| !piece.is_empty() && *piece != ".")
            .map(LooseToken::from_piece)
            .collect();

        Self {
            original: input.to_string(),
            tokens,
        }
    }

    pub fn tokens(&self) -> &[LooseToken] {
        &self.tokens
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Tokens without trailing numeric zeros, which never affect ordering
    fn significant_tokens(&self) -> &[LooseToken] {
        let end = self
            .tokens
            .iter()
            .rposition(|token| *token != ZERO)
            .map_or(0, |i| i + 1);
        &self.tokens[..end]
    }
}

impl fmt::Display for LooseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl PartialEq for LooseVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for LooseVersion {}

impl Hash for LooseVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.significant_tokens().hash(state);
    }
}

impl PartialOrd for LooseVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LooseVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.tokens.len().max(other.tokens.len());
        (0..len)
            .map(|i| {
                let left = self.tokens.get(i).unwrap_or(&ZERO);
                let right = other.tokens.get(i).unwrap_or(&ZERO);
                left.cmp(right)
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}
