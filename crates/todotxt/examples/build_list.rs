//! Build a short list by hand, edit it, and print the todo.txt text.

mod support;

use anyhow::Result;
use todotxt::{Task, TaskFields, make_task, stringify};
use tracing::Level;

fn main() -> Result<()> {
    support::init_logging(Level::INFO);

    let mut items = vec![
        Some(make_task(TaskFields {
            text: "Hello +Project".into(),
            complete: true,
            ..TaskFields::default()
        })),
        None,
        Some(Task::new("Another task")),
    ];

    if let Some(task) = items[2].as_mut() {
        task.add_context("SomeContext");
        task.date = Some("2015-03-20".parse()?);
    }

    println!("{}", stringify(&items)?.unwrap_or_default());
    Ok(())
}
