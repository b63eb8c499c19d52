//! Lexing of `@tag` directives inside a comment block.
//!
//! The tag vocabulary is closed: [`TagName`] lists every directive that is understood,
//! and any other `@name` line is dropped whole.

use indexmap::IndexMap;

/// A recognised annotation directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagName {
    Description,
    Route,
    Model,
    Return,
    Param,
    Tag,
}

impl TagName {
    /// Maps a directive name (without `@`) to its tag, if it is in the vocabulary.
    ///
    /// `tags` is accepted as an alias of `tag`.
    pub fn from_name(name: &str) -> Option<TagName> {
        match name {
            "description" => Some(TagName::Description),
            "route" => Some(TagName::Route),
            "model" => Some(TagName::Model),
            "return" => Some(TagName::Return),
            "param" => Some(TagName::Param),
            "tag" | "tags" => Some(TagName::Tag),
            _ => None,
        }
    }

    /// The canonical directive name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TagName::Description => "description",
            TagName::Route => "route",
            TagName::Model => "model",
            TagName::Return => "return",
            TagName::Param => "param",
            TagName::Tag => "tag",
        }
    }
}

/// Tag arguments collected from one comment block.
///
/// Keys appear in order of first occurrence; each key's arguments are in order of
/// appearance. Free-text lines before the first `@` line are kept separately as the
/// preamble.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagTable {
    entries: IndexMap<TagName, Vec<String>>,
    preamble: Vec<String>,
}

impl TagTable {
    /// All arguments recorded for `tag`, or an empty slice.
    pub fn get(&self, tag: TagName) -> &[String] {
        self.entries.get(&tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The first argument recorded for `tag`.
    pub fn first(&self, tag: TagName) -> Option<&str> {
        self.get(tag).first().map(String::as_str)
    }

    /// Tags present in the table, in order of first occurrence.
    pub fn keys(&self) -> impl Iterator<Item = TagName> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Non-empty free-text lines that precede the first `@` line.
    pub fn preamble(&self) -> &[String] {
        &self.preamble
    }

    /// The block's description: the first non-empty `@description` argument, otherwise
    /// the preamble joined with single spaces.
    pub fn description(&self) -> Option<String> {
        if let Some(explicit) = self.first(TagName::Description).filter(|d| !d.is_empty()) {
            return Some(explicit.to_string());
        }
        if self.preamble.is_empty() {
            None
        } else {
            Some(self.preamble.join(" "))
        }
    }

    fn push(&mut self, tag: TagName, argument: String) {
        self.entries.entry(tag).or_default().push(argument);
    }
}

/// Splits comment-block text lines into a [`TagTable`].
///
/// A line starting with `@` is split on whitespace; its first token names the tag and
/// the remaining tokens, re-joined with single spaces, become one argument. Lines naming
/// an unknown tag are discarded entirely. Other lines never continue a previous tag.
pub fn lex_tags<S: AsRef<str>>(lines: &[S]) -> TagTable {
    let mut table = TagTable::default();
    let mut seen_directive = false;

    for line in lines {
        let line = line.as_ref();

        if !line.starts_with('@') {
            if !seen_directive && !line.trim().is_empty() {
                table.preamble.push(line.trim().to_string());
            }
            continue;
        }
        seen_directive = true;

        let mut parts = line.split_whitespace();
        let name = parts.next().map(|token| &token[1..]).unwrap_or("");

        let Some(tag) = TagName::from_name(name) else {
            continue;
        };

        table.push(tag, parts.collect::<Vec<_>>().join(" "));
    }

    table
}
