//! Parse a todo.txt blob and report the state of each line.

mod support;

use todotxt::parse;
use tracing::Level;

const SAMPLE: &str = "Hello @Home @Alone
Hello (2)

Hello (again) @Home +Project1 +Project2

First task
x 2015-03-19 Second task
(A) Third task
2015-03-17 another task
";

fn main() {
    support::init_logging(Level::DEBUG);

    for slot in parse(SAMPLE) {
        match slot {
            None => println!("    // deleted task"),
            Some(task) if task.complete => println!("[x] Complete task: {}", task.text),
            Some(task) => println!("[ ] Incomplete task: {}", task.text),
        }
    }
}
