use crate::date::{DATE_TOKEN_LEN, TaskDate, is_date_shaped};
use crate::encoding::Encoding;
use crate::task::{Task, TaskFields};
use tracing::trace;

/// Input accepted by [`parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source<'a> {
    /// A whole file; split on `\n` / `\r\n` after trimming.
    Text(&'a str),
    /// Lines already split by the caller.
    Lines(Vec<&'a str>),
    /// Raw bytes in the given encoding.
    Bytes(&'a [u8], Encoding),
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for Source<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a [&'a str]> for Source<'a> {
    fn from(lines: &'a [&'a str]) -> Self {
        Self::Lines(lines.to_vec())
    }
}

impl<'a> From<&'a [String]> for Source<'a> {
    fn from(lines: &'a [String]) -> Self {
        Self::Lines(lines.iter().map(String::as_str).collect())
    }
}

impl<'a> From<(&'a [u8], Encoding)> for Source<'a> {
    fn from((bytes, encoding): (&'a [u8], Encoding)) -> Self {
        Self::Bytes(bytes, encoding)
    }
}

/// Parse a batch of lines.
///
/// The result has one entry per line; blank lines are `None`. Line numbers
/// count blank lines too, so removing a task never renumbers the others.
///
/// Each line is trimmed and then consumed left to right:
///
/// 1. `x ` completion marker
/// 2. completion date, only right after the marker
/// 3. `(A) ` priority
/// 4. `YYYY-MM-DD ` date
/// 5. the remainder is the task text
///
/// Every prefix is optional. A prefix that does not match exactly is left in
/// the text, so a non-blank line always yields a task.
#[must_use]
pub fn parse<'a>(source: impl Into<Source<'a>>) -> Vec<Option<Task>> {
    match source.into() {
        Source::Text(text) => parse_text(text),
        Source::Lines(lines) => parse_lines(lines),
        Source::Bytes(bytes, encoding) => parse_text(&encoding.decode(bytes)),
    }
}

fn parse_text(text: &str) -> Vec<Option<Task>> {
    let content = trim_line(text);
    if content.is_empty() {
        return Vec::new();
    }
    parse_lines(content.lines())
}

fn parse_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<Option<Task>> {
    lines
        .into_iter()
        .enumerate()
        .map(|(idx, line)| parse_line(line, idx + 1))
        .collect()
}

/// Parse one line; `None` when the line is blank.
#[must_use]
pub fn parse_line(line: &str, number: usize) -> Option<Task> {
    let mut rest = trim_line(line);
    if rest.is_empty() {
        return None;
    }

    let mut fields = TaskFields {
        number: Some(number),
        ..TaskFields::default()
    };

    if let Some(after) = strip_completion(rest) {
        fields.complete = true;
        rest = after;
        if let Some((token, after)) = strip_date(rest) {
            fields.complete_date = Some(TaskDate::from_token(token));
            rest = after;
        }
    }

    if let Some((letter, after)) = strip_priority(rest) {
        fields.priority = Some(letter);
        rest = after;
    }

    if let Some((token, after)) = strip_date(rest) {
        fields.date = Some(TaskDate::from_token(token));
        rest = after;
    }

    fields.text = rest.to_owned();
    trace!(
        number,
        complete = fields.complete,
        priority = ?fields.priority,
        dated = fields.date.is_some(),
        "Parsed task line"
    );
    Some(Task::from(fields))
}

/// Trim whitespace and a stray byte-order mark.
fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Consume a mandatory run of whitespace.
fn skip_separator(s: &str) -> Option<&str> {
    s.starts_with(char::is_whitespace).then(|| s.trim_start())
}

fn strip_completion(s: &str) -> Option<&str> {
    s.strip_prefix('x').and_then(skip_separator)
}

fn strip_date(s: &str) -> Option<(&str, &str)> {
    let token = s.get(..DATE_TOKEN_LEN)?;
    if !is_date_shaped(token) {
        return None;
    }
    let rest = skip_separator(&s[DATE_TOKEN_LEN..])?;
    Some((token, rest))
}

fn strip_priority(s: &str) -> Option<(char, &str)> {
    let mut chars = s.chars();
    let (Some('('), Some(letter), Some(')')) = (chars.next(), chars.next(), chars.next()) else {
        return None;
    };
    if !letter.is_ascii_uppercase() {
        return None;
    }
    let rest = skip_separator(chars.as_str())?;
    Some((letter, rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn only(input: &str) -> Task {
        parse_line(input, 1).unwrap_or_else(|| panic!("line {input:?} must yield a task"))
    }

    #[test]
    fn plain_text_gets_defaults() {
        let task = only("Some text");
        assert_eq!(task.text, "Some text");
        assert_eq!(task.number, Some(1));
        assert!(!task.complete);
        assert_eq!(task.complete_date, None);
        assert_eq!(task.priority, None);
        assert_eq!(task.date, None);
        assert!(task.contexts.is_empty());
        assert!(task.projects.is_empty());
    }

    #[test]
    fn completed_task_with_two_dates() {
        let task = only("x 2015-03-20 2015-03-21 Some text");
        assert!(task.complete);
        assert_eq!(
            task.complete_date.as_ref().and_then(TaskDate::as_date),
            Some(date!(2015 - 03 - 20))
        );
        assert_eq!(
            task.date.as_ref().and_then(TaskDate::as_date),
            Some(date!(2015 - 03 - 21))
        );
        assert_eq!(task.text, "Some text");
    }

    #[test]
    fn leading_date_without_marker_is_task_date() {
        let task = only("2015-03-17 another task");
        assert!(!task.complete);
        assert_eq!(task.complete_date, None);
        assert_eq!(
            task.date.as_ref().and_then(TaskDate::as_date),
            Some(date!(2015 - 03 - 17))
        );
    }

    #[test]
    fn priority_then_date() {
        let task = only("(A) 2015-03-21 Some text");
        assert_eq!(task.priority, Some('A'));
        assert!(task.date.is_some());
        assert_eq!(task.text, "Some text");
    }

    #[test]
    fn everything_at_once() {
        let task = only(
            "x 2015-03-20 (B) 2015-03-21 Some text with @Context and @Context and again @OtherContext attached to a +Project",
        );
        assert!(task.complete);
        assert_eq!(task.priority, Some('B'));
        assert_eq!(task.date.as_ref().and_then(TaskDate::as_date).map(time::Date::day), Some(21));
        assert_eq!(
            task.complete_date.as_ref().and_then(TaskDate::as_date).map(time::Date::day),
            Some(20)
        );
        assert_eq!(task.contexts, vec!["Context".to_owned(), "OtherContext".to_owned()]);
        assert_eq!(task.projects, vec!["Project".to_owned()]);
        assert_eq!(
            task.text,
            "Some text with @Context and @Context and again @OtherContext attached to a +Project"
        );
    }

    #[test]
    fn prefixes_need_trailing_whitespace() {
        assert_eq!(only("x").text, "x");
        assert!(!only("xylophone lessons").complete);
        assert_eq!(only("(A)").priority, None);
        assert_eq!(only("(A)rgh").text, "(A)rgh");
        assert_eq!(only("2015-03-20").date, None);
        assert_eq!(only("2015-03-20").text, "2015-03-20");
    }

    #[test]
    fn malformed_prefixes_stay_in_text() {
        let task = only("(a) 2015-3-20 lower priority");
        assert_eq!(task.priority, None);
        assert_eq!(task.date, None);
        assert_eq!(task.text, "(a) 2015-3-20 lower priority");

        let task = only("X 2015-03-20 capital marker");
        assert!(!task.complete);
        assert_eq!(task.date, None);
        assert_eq!(task.text, "X 2015-03-20 capital marker");
    }

    #[test]
    fn separator_runs_are_consumed() {
        let task = only("x \t 2015-03-20   (C)  text  with  gaps");
        assert!(task.complete);
        assert!(task.complete_date.is_some());
        assert_eq!(task.priority, Some('C'));
        assert_eq!(task.text, "text  with  gaps");
    }

    #[test]
    fn non_calendar_date_is_accepted() {
        let task = only("2015-13-45 odd date");
        let date = task.date.unwrap_or_else(|| panic!("shape-valid date is captured"));
        assert!(!date.is_calendar());
        assert_eq!(date.to_string(), "2015-13-45");
        assert_eq!(task.text, "odd date");
    }

    #[test]
    fn blank_lines_are_none() {
        assert_eq!(parse_line("", 1), None);
        assert_eq!(parse_line(" \t ", 2), None);
        assert_eq!(parse_line("\u{feff}", 3), None);
    }

    #[test]
    fn whitespace_only_blob_is_empty() {
        assert!(parse("").is_empty());
        assert!(parse(" \n\r\n\t").is_empty());
    }

    #[test]
    fn line_slices_keep_positions() {
        let lines = ["Task 1", "", "  ", "Task 2"];
        let tasks = parse(&lines[..]);
        assert_eq!(tasks.len(), 4);
        assert_eq!(tasks[0].as_ref().and_then(|t| t.number), Some(1));
        assert!(tasks[1].is_none());
        assert!(tasks[2].is_none());
        assert_eq!(tasks[3].as_ref().and_then(|t| t.number), Some(4));
    }

    #[test]
    fn crlf_blob_is_split() {
        let tasks = parse("(A) one\r\n\r\nx two\r\n");
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].as_ref().map(|t| t.text.as_str()), Some("one"));
        assert!(tasks[1].is_none());
        assert_eq!(tasks[2].as_ref().map(|t| t.text.as_str()), Some("two"));
    }

    #[test]
    fn bytes_are_decoded_before_parsing() {
        let bytes = "x caf\u{e9} @t\n".as_bytes();
        let tasks = parse((bytes, Encoding::Utf8));
        assert_eq!(tasks.len(), 1);
        let task = tasks[0].as_ref().unwrap_or_else(|| panic!("task expected"));
        assert!(task.complete);
        assert_eq!(task.text, "café @t");
    }
}
