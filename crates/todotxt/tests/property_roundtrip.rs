#![cfg(feature = "property-tests")]

#![allow(clippy::expect_used)]

use proptest::prelude::*;

use todotxt::{Task, extract_tags, format_date, parse, parse_date, stringify};

fn word_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9]{0,7}"
}

fn tag_name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_-]{0,7}"
}

/// Names handed to the mutators, including ones that cannot become a tag.
fn added_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => tag_name_strategy(),
        1 => Just(String::new()),
        1 => (tag_name_strategy(), "[ \t]{1,2}", tag_name_strategy())
            .prop_map(|(head, gap, tail)| format!("{head}{gap}{tail}")),
    ]
}

fn date_strategy() -> impl Strategy<Value = String> {
    (1000u16..=2999, 1u8..=12, 1u8..=28).prop_map(|(y, m, d)| format!("{y:04}-{m:02}-{d:02}"))
}

fn token_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => word_strategy(),
        1 => tag_name_strategy().prop_map(|name| format!("@{name}")),
        1 => tag_name_strategy().prop_map(|name| format!("+{name}")),
    ]
}

/// A grammar-conformant line: single spaces, no trailing whitespace.
fn line_strategy() -> impl Strategy<Value = String> {
    (
        any::<bool>(),
        proptest::option::of(date_strategy()),
        proptest::option::of(proptest::char::range('A', 'Z')),
        proptest::option::of(date_strategy()),
        word_strategy(),
        prop::collection::vec(token_strategy(), 0..6),
    )
        .prop_map(|(complete, done, priority, date, head, tail)| {
            let mut parts = Vec::new();
            if complete {
                parts.push("x".to_owned());
                if let Some(done) = done {
                    parts.push(done);
                }
            }
            if let Some(priority) = priority {
                parts.push(format!("({priority})"));
            }
            if let Some(date) = date {
                parts.push(date);
            }
            parts.push(head);
            parts.extend(tail);
            parts.join(" ")
        })
}

proptest! {
    #[test]
    fn date_format_roundtrip(raw in date_strategy()) {
        let parsed = parse_date(&raw).expect("generated dates are date-shaped");
        prop_assert!(parsed.is_calendar());
        prop_assert_eq!(format_date(&parsed), raw);
    }

    #[test]
    fn parse_stringify_roundtrip(lines in prop::collection::vec(prop_oneof![4 => line_strategy(), 1 => Just(String::new())], 1..16)) {
        prop_assume!(!lines.first().is_some_and(String::is_empty));
        prop_assume!(!lines.last().is_some_and(String::is_empty));
        let text = lines.join("\n");
        let tasks = parse(text.as_str());
        prop_assert_eq!(tasks.len(), lines.len());
        prop_assert_eq!(stringify(&tasks).expect("sequence renders"), Some(text));
    }

    #[test]
    fn add_is_idempotent(line in line_strategy(), context in added_name_strategy(), project in added_name_strategy()) {
        let mut once = parse(line.as_str()).into_iter().flatten().next().expect("line yields a task");
        once.add_context(&context);
        once.add_project(&project);

        let mut twice: Task = once.clone();
        twice.add_context(&context);
        twice.add_project(&project);
        prop_assert_eq!(&once, &twice);

        let fresh = extract_tags(&once.text);
        prop_assert_eq!(&once.contexts, &fresh.contexts);
        prop_assert_eq!(&once.projects, &fresh.projects);
    }

    #[test]
    fn remove_keeps_tags_in_sync(line in line_strategy()) {
        let mut task = parse(line.as_str()).into_iter().flatten().next().expect("line yields a task");
        let contexts = task.contexts.clone();
        for context in &contexts {
            task.remove_context(context);
        }
        let projects = task.projects.clone();
        for project in &projects {
            task.remove_project(project);
        }
        task.remove_context("never-present");

        let fresh = extract_tags(&task.text);
        prop_assert!(task.contexts.is_empty());
        prop_assert!(task.projects.is_empty());
        prop_assert!(fresh.contexts.is_empty());
        prop_assert!(fresh.projects.is_empty());
    }
}
