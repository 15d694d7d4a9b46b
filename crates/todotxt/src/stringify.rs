use crate::config::LineEnding;
use crate::error::{Result, TodoTxtError};
use crate::task::Task;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// Keys every serialized task carries.
const TASK_KEYS: [&str; 7] = [
    "complete",
    "completeDate",
    "priority",
    "date",
    "text",
    "contexts",
    "projects",
];

/// Highest slot a keyed input may occupy.
pub const MAX_KEYED_SLOT: usize = 1 << 20;

/// Shape of the value handed to [`stringify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stringify<'a> {
    /// No task; stringifies to `None`.
    Null,
    /// One task; stringifies to its line.
    Single(&'a Task),
    /// Ordered slots; `None` slots become empty lines.
    Sequence(&'a [Option<Task>]),
    /// Positional slots keyed by index; missing indices become empty lines.
    /// Indices above [`MAX_KEYED_SLOT`] are rejected.
    Keyed(&'a BTreeMap<usize, Task>),
}

impl<'a> From<&'a Task> for Stringify<'a> {
    fn from(task: &'a Task) -> Self {
        Self::Single(task)
    }
}

impl<'a> From<Option<&'a Task>> for Stringify<'a> {
    fn from(task: Option<&'a Task>) -> Self {
        task.map_or(Self::Null, Self::Single)
    }
}

impl<'a> From<&'a [Option<Task>]> for Stringify<'a> {
    fn from(tasks: &'a [Option<Task>]) -> Self {
        Self::Sequence(tasks)
    }
}

impl<'a> From<&'a Vec<Option<Task>>> for Stringify<'a> {
    fn from(tasks: &'a Vec<Option<Task>>) -> Self {
        Self::Sequence(tasks)
    }
}

impl<'a> From<&'a BTreeMap<usize, Task>> for Stringify<'a> {
    fn from(tasks: &'a BTreeMap<usize, Task>) -> Self {
        Self::Keyed(tasks)
    }
}

/// Render tasks as todo.txt text.
///
/// A single task yields its line and a batch yields its lines joined by
/// `\n` with no trailing newline. [`Stringify::Null`] yields `None`.
///
/// # Errors
///
/// Returns [`TodoTxtError::InvalidInput`] when a keyed input holds an index
/// above [`MAX_KEYED_SLOT`].
pub fn stringify<'a>(input: impl Into<Stringify<'a>>) -> Result<Option<String>> {
    render(input.into(), LineEnding::Lf)
}

/// Render JSON-shaped task data as todo.txt text.
///
/// Accepts `null`, a task object, an array of task objects and nulls, or an
/// object keyed by slot index whose values are task objects.
///
/// # Errors
///
/// Returns [`TodoTxtError::InvalidInput`] for any other shape or for keys
/// above [`MAX_KEYED_SLOT`], [`TodoTxtError::InvalidDate`] when a date field
/// is not a string, and [`TodoTxtError::Json`] when a task object has other
/// ill-typed fields.
pub fn stringify_value(value: &Value) -> Result<Option<String>> {
    render_value(value, LineEnding::Lf)
}

pub(crate) fn render(input: Stringify<'_>, line_ending: LineEnding) -> Result<Option<String>> {
    match input {
        Stringify::Null => Ok(None),
        Stringify::Single(task) => Ok(Some(task.to_string())),
        Stringify::Sequence(tasks) => Ok(Some(join(tasks.iter().map(Option::as_ref), line_ending))),
        Stringify::Keyed(tasks) => render_keyed(tasks, line_ending).map(Some),
    }
}

/// Write each task at its slot, filling gaps with empty lines.
fn render_keyed(tasks: &BTreeMap<usize, Task>, line_ending: LineEnding) -> Result<String> {
    let last = tasks.keys().next_back().copied().unwrap_or_default();
    if last > MAX_KEYED_SLOT {
        debug!(slot = last, "Rejected keyed slot");
        return Err(TodoTxtError::InvalidInput(format!(
            "slot {last} exceeds the highest keyed slot {MAX_KEYED_SLOT}"
        )));
    }

    let sep = line_ending.as_str();
    let mut out = String::new();
    let mut next_line = 0;
    for (&slot, task) in tasks {
        let lines_before = slot - next_line;
        let seps = if next_line == 0 { lines_before } else { lines_before + 1 };
        out.push_str(&sep.repeat(seps));
        out.push_str(&task.to_string());
        next_line = slot + 1;
    }
    Ok(out)
}

fn join<'t>(slots: impl Iterator<Item = Option<&'t Task>>, line_ending: LineEnding) -> String {
    slots
        .map(|slot| slot.map(Task::to_string).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(line_ending.as_str())
}

pub(crate) fn render_value(value: &Value, line_ending: LineEnding) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::Array(items) => {
            let slots = items
                .iter()
                .map(|item| match item {
                    Value::Null => Ok(None),
                    Value::Object(map) if is_task_object(map) => task_from_value(item).map(Some),
                    other => Err(reject(other)),
                })
                .collect::<Result<Vec<_>>>()?;
            render(Stringify::Sequence(&slots), line_ending)
        }
        Value::Object(map) if is_task_object(map) => Ok(Some(task_from_value(value)?.to_string())),
        Value::Object(map) => {
            let mut keyed = BTreeMap::new();
            for (key, item) in map {
                let (Ok(slot), Value::Object(fields)) = (key.parse::<usize>(), item) else {
                    return Err(reject(value));
                };
                if !is_task_object(fields) {
                    return Err(reject(value));
                }
                keyed.insert(slot, task_from_value(item)?);
            }
            render(Stringify::Keyed(&keyed), line_ending)
        }
        other => Err(reject(other)),
    }
}

fn is_task_object(map: &Map<String, Value>) -> bool {
    TASK_KEYS.iter().all(|key| map.contains_key(*key))
}

fn task_from_value(value: &Value) -> Result<Task> {
    for key in ["completeDate", "date"] {
        match value.get(key) {
            None | Some(Value::Null | Value::String(_)) => {}
            Some(other) => return Err(TodoTxtError::InvalidDate(other.to_string())),
        }
    }
    Ok(Task::deserialize(value)?)
}

fn reject(value: &Value) -> TodoTxtError {
    let kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    debug!(kind, "Rejected stringify input");
    TodoTxtError::InvalidInput(format!("expected a task or a list of tasks, got {kind}"))
}
