//! Spinner around a single awaited request

use super::context::UiContext;
use super::output::{report, Status};
use console::style;
use std::future::Future;

/// Await `work` behind a spinner, then close the line with `finish`'s verdict
///
/// Without a terminal the spinner is a single `...` line and the verdict is
/// printed as a regular report line.
pub async fn spin<T, F, D>(ctx: &UiContext, message: &str, work: F, finish: D) -> T
where
    F: Future<Output = T>,
    D: FnOnce(&T) -> (Status, String),
{
    let spinner = if ctx.use_fancy_output() {
        let spinner = cliclack::spinner();
        spinner.start(message);
        Some(spinner)
    } else {
        println!("{} {}", style("...").dim(), message);
        None
    };

    let result = work.await;
    let (status, text) = finish(&result);

    match spinner {
        Some(spinner) if status == Status::Ok => spinner.stop(text),
        Some(spinner) => spinner.error(text),
        None => report(ctx, status, &text, None),
    }

    result
}
