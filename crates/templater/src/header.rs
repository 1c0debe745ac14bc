//! Header block parser.
//!
//! Input files may start with a small header of variables between `---`
//! marker lines:
//!
//! ```text
//! ---
//! title: Hello
//! tags:
//!   - a
//!   - b
//! ---
//! Body text...
//! ```
//!
//! Each trimmed line is split on whitespace and classified by shape:
//!
//! | Shape | Effect |
//! |-------|--------|
//! | `key: value` (two tokens, first not `-`) | scalar `key = "value"` |
//! | `key:` (one token) | empty list `key`, becomes the active list |
//! | `- item ...` | appends `item` to the active list |
//! | anything else | ignored |
//!
//! Trailing colons are stripped from keys. Only the value's first token is
//! kept, so `title: Hello World` (three tokens) is ignored.
//!
//! The `---` markers toggle an "inside header" flag, but the flag does not
//! gate extraction: the rules apply to every line of the file, body included.
//! A body line such as `Hello there` therefore defines `Hello = "there"`.
//! Templates written against existing documents depend on this.

use crate::vars::{VarValue, Variables};

/// Line that opens or closes a header block.
pub const HEADER_MARKER: &str = "---";

/// Leading token of a list item line.
pub const LIST_ITEM: &str = "-";

/// Errors raised while reading header lines.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeaderError {
    /// A `- item` line appeared before any `key:` line.
    #[error("line {line}: list item {item:?} has no list to append to")]
    NoActiveList { line: usize, item: String },

    /// The active list was later reassigned to a scalar.
    #[error("line {line}: cannot append to `{key}`, which is no longer a list")]
    NotAList { line: usize, key: String },
}

/// Variables parsed from a file, plus the marker toggle's final state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderVariables {
    variables: Variables,
    markers: usize,
}

impl HeaderVariables {
    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn into_variables(self) -> Variables {
        self.variables
    }

    /// Number of `---` lines seen.
    pub fn marker_count(&self) -> usize {
        self.markers
    }

    /// Whether the toggle ended outside a header (even marker count).
    pub fn header_closed(&self) -> bool {
        self.markers % 2 == 0
    }
}

/// Line-at-a-time header parser.
#[derive(Debug, Default)]
pub struct HeaderParser {
    inside_header: bool,
    current_list: Option<String>,
    markers: usize,
    line_no: usize,
    variables: Variables,
}

impl HeaderParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the last marker seen opened a header.
    pub fn inside_header(&self) -> bool {
        self.inside_header
    }

    /// Feeds the next line of the file.
    pub fn feed(&mut self, line: &str) -> Result<(), HeaderError> {
        self.line_no += 1;
        let trimmed = line.trim();

        if trimmed == HEADER_MARKER {
            self.inside_header = !self.inside_header;
            self.markers += 1;
            return Ok(());
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        match tokens.as_slice() {
            [key, value] if *key != LIST_ITEM => {
                self.variables.insert(normalize_key(key), *value);
            }
            [key] => {
                let key = normalize_key(key);
                self.variables.insert(key.clone(), Vec::<String>::new());
                self.current_list = Some(key);
            }
            [first, item, ..] if *first == LIST_ITEM => self.append(item)?,
            _ => {}
        }
        Ok(())
    }

    fn append(&mut self, item: &str) -> Result<(), HeaderError> {
        let Some(key) = self.current_list.as_deref() else {
            return Err(HeaderError::NoActiveList {
                line: self.line_no,
                item: item.to_string(),
            });
        };
        match self.variables.get_mut(key) {
            Some(VarValue::List(items)) => {
                items.push(item.to_string());
                Ok(())
            }
            _ => Err(HeaderError::NotAList {
                line: self.line_no,
                key: key.to_string(),
            }),
        }
    }

    /// Finishes parsing and returns the collected variables.
    pub fn finish(self) -> HeaderVariables {
        if self.inside_header {
            tracing::debug!(markers = self.markers, "header block is not closed");
        }
        HeaderVariables {
            variables: self.variables,
            markers: self.markers,
        }
    }
}

/// Parses header variables from a sequence of lines.
pub fn parse_header<'a, I>(lines: I) -> Result<HeaderVariables, HeaderError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut parser = HeaderParser::new();
    for line in lines {
        parser.feed(line)?;
    }
    Ok(parser.finish())
}

/// Parses header variables from a whole document.
pub fn parse_header_str(text: &str) -> Result<HeaderVariables, HeaderError> {
    parse_header(text.lines())
}

fn normalize_key(token: &str) -> String {
    token.trim_end_matches(':').to_string()
}
