//! Line-oriented command output
//!
//! In a terminal, lines go through cliclack's log gutter. Otherwise each
//! result line is tagged `[OK]`, `[WARN]` or `[FAIL]` so scripts can grep
//! for it.

use super::context::UiContext;
use console::style;

/// Outcome of a reported step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Warn,
    Fail,
}

impl Status {
    pub(crate) fn tag(self) -> String {
        match self {
            Self::Ok => style("[OK]").green().to_string(),
            Self::Warn => style("[WARN]").yellow().to_string(),
            Self::Fail => style("[FAIL]").red().to_string(),
        }
    }

    fn paint(self, value: &str) -> String {
        match self {
            Self::Ok => style(value).green().to_string(),
            Self::Warn => style(value).yellow().to_string(),
            Self::Fail => style(value).red().to_string(),
        }
    }
}

/// Report a finished step, with an optional detail shown dimmed
pub fn report(ctx: &UiContext, status: Status, message: &str, detail: Option<&str>) {
    let detail = detail.map(|d| format!(" ({})", d)).unwrap_or_default();

    if ctx.use_fancy_output() {
        let line = format!("{}{}", message, style(detail).dim());
        let _ = match status {
            Status::Ok => cliclack::log::success(line),
            Status::Warn => cliclack::log::warning(line),
            Status::Fail => cliclack::log::error(line),
        };
    } else {
        println!("  {} {}{}", status.tag(), message, detail);
    }
}

/// Title above a block of fields
pub fn heading(ctx: &UiContext, title: &str) {
    if ctx.use_fancy_output() {
        let _ = cliclack::log::step(style(title).bold());
    } else {
        println!("{}", title);
    }
}

/// Secondary text that is not a result
pub fn note(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        let _ = cliclack::log::remark(message);
    } else {
        println!("  {}", style(message).dim());
    }
}

/// Aligned `label: value` row; a status colors the value
pub fn field(ctx: &UiContext, label: &str, value: &str, status: Option<Status>) {
    let value = match (status, ctx.use_fancy_output()) {
        (Some(s), true) => s.paint(value),
        _ => value.to_string(),
    };
    println!("  {:<12} {}", format!("{}:", label), value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_tags() {
        console::set_colors_enabled(false);
        assert_eq!(Status::Ok.tag(), "[OK]");
        assert_eq!(Status::Warn.tag(), "[WARN]");
        assert_eq!(Status::Fail.tag(), "[FAIL]");
    }

    #[test]
    fn plain_output_does_not_panic() {
        let ctx = UiContext::non_interactive();
        heading(&ctx, "avatars for platformA");
        field(&ctx, "State", "fresh", Some(Status::Ok));
        field(&ctx, "TTL", "24h", None);
        report(&ctx, Status::Warn, "Cached 2 of 3 avatars", Some("limit is 2"));
        note(&ctx, "Nothing to do");
    }
}
