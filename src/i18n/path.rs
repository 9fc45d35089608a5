//! Key paths: addresses of labels inside a resource tree.
//!
//! A path is written the way the editor scripts address their label objects:
//! dotted segments (`table.cell.merge`), with bracket segments for keys that
//! would not survive a dot split (`common["a.b"]`, `common['x']`, `common[x]`).

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error produced when a key path string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyPathError {
    #[error("key path is empty")]
    Empty,

    #[error("empty segment in key path '{0}'")]
    EmptySegment(String),

    #[error("unexpected '{found}' at byte {at} in key path '{path}'")]
    Unexpected {
        path: String,
        found: char,
        at: usize,
    },

    #[error("unterminated bracket in key path '{0}'")]
    Unterminated(String),
}

/// A parsed key path: a non-empty sequence of non-empty key segments.
///
/// The root path (no segments) only exists while walking a tree; parsing
/// never produces it.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyPath {
    segments: Vec<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Bare,
    AfterDot,
    AfterBracket,
}

impl KeyPath {
    /// The empty path addressing the tree itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dotted/bracketed key path.
    ///
    /// # Example
    /// ```ignore
    /// let path = KeyPath::parse("table.cell['merge']")?;
    /// assert_eq!(path.segments(), ["table", "cell", "merge"]);
    /// ```
    pub fn parse(input: &str) -> Result<Self, KeyPathError> {
        if input.is_empty() {
            return Err(KeyPathError::Empty);
        }

        let unexpected = |found: char, at: usize| KeyPathError::Unexpected {
            path: input.to_string(),
            found,
            at,
        };

        let mut segments = Vec::new();
        let mut current = String::new();
        let mut state = State::Start;
        let mut chars = input.char_indices().peekable();

        while let Some((at, c)) = chars.next() {
            match (state, c) {
                (State::Start | State::AfterDot, '.') => {
                    return Err(KeyPathError::EmptySegment(input.to_string()));
                }
                (State::AfterDot, '[') | (_, ']') => return Err(unexpected(c, at)),
                (State::Bare, '.') => {
                    segments.push(std::mem::take(&mut current));
                    state = State::AfterDot;
                }
                (State::AfterBracket, '.') => state = State::AfterDot,
                (State::Start | State::Bare | State::AfterBracket, '[') => {
                    if state == State::Bare {
                        segments.push(std::mem::take(&mut current));
                    }
                    segments.push(Self::parse_bracket(input, &mut chars)?);
                    state = State::AfterBracket;
                }
                (State::AfterBracket, _) => return Err(unexpected(c, at)),
                (_, _) => {
                    current.push(c);
                    state = State::Bare;
                }
            }
        }

        match state {
            State::Bare => segments.push(current),
            State::AfterBracket => {}
            State::Start => return Err(KeyPathError::Empty),
            State::AfterDot => return Err(KeyPathError::EmptySegment(input.to_string())),
        }

        Ok(Self { segments })
    }

    /// Read a bracket segment; the opening `[` is already consumed.
    fn parse_bracket(
        input: &str,
        chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    ) -> Result<String, KeyPathError> {
        let mut segment = String::new();

        match chars.peek().map(|&(_, c)| c) {
            Some(quote @ ('"' | '\'')) => {
                chars.next();
                loop {
                    match chars.next() {
                        Some((_, '\\')) => match chars.next() {
                            Some((_, escaped)) => segment.push(escaped),
                            None => return Err(KeyPathError::Unterminated(input.to_string())),
                        },
                        Some((_, c)) if c == quote => break,
                        Some((_, c)) => segment.push(c),
                        None => return Err(KeyPathError::Unterminated(input.to_string())),
                    }
                }
                match chars.next() {
                    Some((_, ']')) => {}
                    Some((at, found)) => {
                        return Err(KeyPathError::Unexpected {
                            path: input.to_string(),
                            found,
                            at,
                        })
                    }
                    None => return Err(KeyPathError::Unterminated(input.to_string())),
                }
            }
            _ => loop {
                match chars.next() {
                    Some((_, ']')) => break,
                    Some((at, '[')) => {
                        return Err(KeyPathError::Unexpected {
                            path: input.to_string(),
                            found: '[',
                            at,
                        })
                    }
                    Some((_, c)) => segment.push(c),
                    None => return Err(KeyPathError::Unterminated(input.to_string())),
                }
            },
        }

        if segment.is_empty() {
            return Err(KeyPathError::EmptySegment(input.to_string()));
        }
        Ok(segment)
    }

    /// The key segments, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Descend one level.
    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    /// Return to the parent level.
    pub fn pop(&mut self) -> Option<String> {
        self.segments.pop()
    }

    /// A new path one level below this one.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut path = self.clone();
        path.push(segment);
        path
    }

    /// Whether a segment can be written without brackets.
    fn is_bare(segment: &str) -> bool {
        !segment.is_empty()
            && !segment
                .chars()
                .any(|c| matches!(c, '.' | '[' | ']' | '"' | '\'' | '\\'))
    }
}

impl fmt::Display for KeyPath {
    /// Writes the path so that `KeyPath::parse` reads it back unchanged.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if Self::is_bare(segment) {
                if i > 0 {
                    f.write_str(".")?;
                }
                f.write_str(segment)?;
            } else {
                f.write_str("[\"")?;
                for c in segment.chars() {
                    if matches!(c, '"' | '\\') {
                        f.write_str("\\")?;
                    }
                    write!(f, "{}", c)?;
                }
                f.write_str("\"]")?;
            }
        }
        Ok(())
    }
}

impl FromStr for KeyPath {
    type Err = KeyPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<S: Into<String>> FromIterator<S> for KeyPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}
