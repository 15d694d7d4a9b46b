use crate::date::TaskDate;
use crate::tags::{self, TagKind, extract_tags};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single todo.txt line in structured form.
///
/// Fields are public and may be assigned directly. Changing `text` by hand
/// leaves `contexts`/`projects` stale until [`Task::sync_tags`] runs; prefer
/// [`Task::set_text`] or the tag mutators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// 1-based line position within the parsed batch.
    #[serde(default)]
    pub number: Option<usize>,
    /// Whether the line carries the `x` completion marker.
    #[serde(default)]
    pub complete: bool,
    /// Date following the completion marker.
    #[serde(default, deserialize_with = "date_repr::deserialize")]
    pub complete_date: Option<TaskDate>,
    /// Priority letter (`A`-`Z`).
    #[serde(default, with = "priority_repr")]
    pub priority: Option<char>,
    /// Creation or due date.
    #[serde(default, deserialize_with = "date_repr::deserialize")]
    pub date: Option<TaskDate>,
    /// Free text, tags included.
    #[serde(default)]
    pub text: String,
    /// Context names found in `text`.
    #[serde(default)]
    pub contexts: Vec<String>,
    /// Project names found in `text`.
    #[serde(default)]
    pub projects: Vec<String>,
}

/// Partial field set used to build a [`Task`].
///
/// Missing fields take their defaults; tag lists are always derived from
/// `text`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskFields {
    /// Line number, if the task came from a batch.
    pub number: Option<usize>,
    /// Completion flag.
    pub complete: bool,
    /// Completion date.
    #[serde(deserialize_with = "date_repr::deserialize")]
    pub complete_date: Option<TaskDate>,
    /// Priority letter.
    #[serde(with = "priority_repr")]
    pub priority: Option<char>,
    /// Creation or due date.
    #[serde(deserialize_with = "date_repr::deserialize")]
    pub date: Option<TaskDate>,
    /// Free text.
    pub text: String,
}

impl Task {
    /// Create an open task with the given text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self::from(TaskFields {
            text: text.into(),
            ..TaskFields::default()
        })
    }

    /// Replace `text` and re-derive the tag lists.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.sync_tags();
    }

    /// Re-derive `contexts` and `projects` from `text`.
    pub fn sync_tags(&mut self) {
        let found = extract_tags(&self.text);
        self.contexts = found.contexts;
        self.projects = found.projects;
    }

    /// Add a context tag. No-op if already present, or if `context` is empty
    /// or contains whitespace.
    pub fn add_context(&mut self, context: &str) {
        self.add_tag(TagKind::Context, context);
    }

    /// Remove a context tag. No-op if absent.
    pub fn remove_context(&mut self, context: &str) {
        self.remove_tag(TagKind::Context, context);
    }

    /// Add a project tag. No-op if already present, or if `project` is empty
    /// or contains whitespace.
    pub fn add_project(&mut self, project: &str) {
        self.add_tag(TagKind::Project, project);
    }

    /// Remove a project tag. No-op if absent.
    pub fn remove_project(&mut self, project: &str) {
        self.remove_tag(TagKind::Project, project);
    }

    fn bucket_mut(&mut self, kind: TagKind) -> &mut Vec<String> {
        match kind {
            TagKind::Context => &mut self.contexts,
            TagKind::Project => &mut self.projects,
        }
    }

    fn add_tag(&mut self, kind: TagKind, name: &str) {
        if !tags::is_tag_name(name) {
            return;
        }
        let bucket = self.bucket_mut(kind);
        if bucket.iter().any(|existing| existing == name) {
            return;
        }
        bucket.push(name.to_owned());
        tags::append_tag(&mut self.text, &kind.render(name));
    }

    fn remove_tag(&mut self, kind: TagKind, name: &str) {
        let bucket = self.bucket_mut(kind);
        let before = bucket.len();
        bucket.retain(|existing| existing != name);
        if bucket.len() == before {
            return;
        }
        self.text = tags::strip_tag(&self.text, &kind.render(name));
    }
}

/// Build a task from a partial field set.
#[must_use]
pub fn make_task(fields: TaskFields) -> Task {
    Task::from(fields)
}

impl From<TaskFields> for Task {
    fn from(fields: TaskFields) -> Self {
        let found = extract_tags(&fields.text);
        Self {
            number: fields.number,
            complete: fields.complete,
            complete_date: fields.complete_date,
            priority: fields.priority,
            date: fields.date,
            text: fields.text,
            contexts: found.contexts,
            projects: found.projects,
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.complete {
            f.write_str("x ")?;
            if let Some(done) = &self.complete_date {
                write!(f, "{done} ")?;
            }
        }
        if let Some(priority) = self.priority {
            write!(f, "({priority}) ")?;
        }
        if let Some(date) = &self.date {
            write!(f, "{date} ")?;
        }
        f.write_str(&self.text)
    }
}

/// Absent priorities travel as `""` rather than `null`.
mod priority_repr {
    use super::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S>(priority: &Option<char>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut buf = [0; 4];
        match priority {
            Some(c) => s.serialize_str(c.encode_utf8(&mut buf)),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<char>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(d)?.unwrap_or_default();
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Ok(None),
            (Some(c), None) => Ok(Some(c)),
            _ => Err(serde::de::Error::custom(format!(
                "priority must be a single character, got {raw:?}"
            ))),
        }
    }
}

/// Dates arrive pre-formatted; empty strings mean no date.
mod date_repr {
    use super::{Deserialize, Deserializer, TaskDate};

    pub fn deserialize<'de, D>(d: D) -> Result<Option<TaskDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw
            .filter(|raw| !raw.is_empty())
            .map(|raw| TaskDate::from_written(&raw)))
    }
}
