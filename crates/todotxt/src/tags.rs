use serde::{Deserialize, Serialize};

/// Kind of inline tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// `@name`
    Context,
    /// `+name`
    Project,
}

impl TagKind {
    /// Leading sigil character.
    #[must_use]
    pub const fn sigil(self) -> char {
        match self {
            Self::Context => '@',
            Self::Project => '+',
        }
    }

    const fn from_sigil(c: char) -> Option<Self> {
        match c {
            '@' => Some(Self::Context),
            '+' => Some(Self::Project),
            _ => None,
        }
    }

    /// Render `name` as it appears in task text.
    #[must_use]
    pub fn render(self, name: &str) -> String {
        format!("{}{name}", self.sigil())
    }
}

/// Tag names found in a piece of task text, in first-occurrence order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tags {
    /// Context names (without `@`).
    pub contexts: Vec<String>,
    /// Project names (without `+`).
    pub projects: Vec<String>,
}

impl Tags {
    fn push(&mut self, kind: TagKind, name: &str) {
        let bucket = match kind {
            TagKind::Context => &mut self.contexts,
            TagKind::Project => &mut self.projects,
        };
        if !bucket.iter().any(|existing| existing == name) {
            bucket.push(name.to_owned());
        }
    }
}

/// Collect the context and project names in `text`.
///
/// A tag starts with its sigil right after whitespace (or at the start of the
/// text) and runs to the next whitespace. Names are case-sensitive and kept
/// verbatim; repeats keep their first position only.
#[must_use]
pub fn extract_tags(text: &str) -> Tags {
    let mut tags = Tags::default();
    let mut chars = text.char_indices().peekable();
    let mut after_space = true;

    while let Some((idx, c)) = chars.next() {
        let kind = if after_space { TagKind::from_sigil(c) } else { None };
        after_space = c.is_whitespace();
        let Some(kind) = kind else {
            continue;
        };

        let start = idx + c.len_utf8();
        let mut end = start;
        while let Some(&(next_idx, next)) = chars.peek() {
            if next.is_whitespace() {
                break;
            }
            end = next_idx + next.len_utf8();
            chars.next();
        }
        if end > start {
            tags.push(kind, &text[start..end]);
        }
    }

    tags
}

/// Whether `name` survives a round trip through task text as one tag.
pub(crate) fn is_tag_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(char::is_whitespace)
}

/// Byte offset of the first whitespace-bounded occurrence of `tag` in `text`.
fn find_bounded(text: &str, tag: &str) -> Option<usize> {
    text.match_indices(tag).map(|(at, _)| at).find(|&at| {
        let before = text[..at].chars().next_back().is_none_or(char::is_whitespace);
        let after = text[at + tag.len()..]
            .chars()
            .next()
            .is_none_or(char::is_whitespace);
        before && after
    })
}

/// Whether `text` already carries `tag` as a standalone token.
pub(crate) fn contains_tag(text: &str, tag: &str) -> bool {
    find_bounded(text, tag).is_some()
}

/// Append `tag` to `text` unless it is already present.
pub(crate) fn append_tag(text: &mut String, tag: &str) {
    if contains_tag(text, tag) {
        return;
    }
    if !text.is_empty() && !text.ends_with(char::is_whitespace) {
        text.push(' ');
    }
    text.push_str(tag);
}

/// Remove every standalone occurrence of `tag` from `text`, along with the
/// separator in front of it. A tag at the start of the text takes the
/// whitespace after it instead.
pub(crate) fn strip_tag(text: &str, tag: &str) -> String {
    let mut out = text.to_owned();
    while let Some(at) = find_bounded(&out, tag) {
        let end = at + tag.len();
        let range = match out[..at].chars().next_back() {
            Some(sep) => at - sep.len_utf8()..end,
            None => at..out.len() - out[end..].trim_start().len(),
        };
        out.replace_range(range, "");
    }
    out
}
