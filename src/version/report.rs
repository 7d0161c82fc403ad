//! Rendering of collected versions as a report string

use serde::{Deserialize, Deserializer};

use crate::version::value::VersionValue;

/// Line terminator of the multi-line report
pub const LINE_ENDING: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Layout of a report: a single line, or one indented line per entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Indent {
    #[default]
    Off,
    /// One line per entry, indented by a single space
    On,
    /// One line per entry with the given indent; empty means [`Indent::Off`]
    With(String),
}

impl Indent {
    /// The indent string, or `None` for a single-line report
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Indent::Off => None,
            Indent::On => Some(" "),
            Indent::With(s) if s.is_empty() => None,
            Indent::With(s) => Some(s.as_str()),
        }
    }
}

impl From<bool> for Indent {
    fn from(on: bool) -> Self {
        if on { Indent::On } else { Indent::Off }
    }
}

impl From<&str> for Indent {
    fn from(indent: &str) -> Self {
        Indent::With(indent.to_string())
    }
}

impl From<String> for Indent {
    fn from(indent: String) -> Self {
        Indent::With(indent)
    }
}

impl From<Option<String>> for Indent {
    fn from(indent: Option<String>) -> Self {
        indent.map_or(Indent::Off, Indent::With)
    }
}

impl<'de> Deserialize<'de> for Indent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Flag(on) => on.into(),
            Raw::Text(s) => s.into(),
        })
    }
}

/// Render `name=version` entries sorted by name.
///
/// Single line: `"<preamble> a=1.0 b=UNKNOWN"`. Indented: the preamble,
/// then each entry on its own indented line, every line terminated.
pub fn render<'a, I>(entries: I, indent: &Indent, preamble: &str) -> String
where
    I: IntoIterator<Item = (&'a str, &'a VersionValue)>,
{
    let mut entries: Vec<_> = entries.into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    let items: Vec<String> = entries
        .into_iter()
        .map(|(name, version)| format!("{name}={version}"))
        .collect();

    let mut out = preamble.to_string();
    match indent.as_str() {
        Some(indent) => {
            for item in &items {
                out.push_str(LINE_ENDING);
                out.push_str(indent);
                out.push_str(item);
            }
            out.push_str(LINE_ENDING);
        }
        None => {
            out.push(' ');
            out.push_str(&items.join(" "));
        }
    }
    out
}
