//! Rendering primitives for CLI output.

use super::context::UiContext;
use super::theme::{styled, styles, Badge};

/// Render a badge with optional message.
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let badge_text = kind.display(ctx.unicode);
    let colored_badge = styled(badge_text, kind.style(), ctx.color);

    if message.is_empty() {
        colored_badge
    } else {
        format!("{} {}", colored_badge, message)
    }
}

/// Render a key-value pair.
///
/// Pretty mode: "Key: value" with dim key
/// Plain mode: "key=value"
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.is_pretty() {
        let styled_key = styled(&format!("{}:", key), styles::dim(), ctx.color);
        format!("{} {}", styled_key, value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

/// Render completed pipeline steps, one `[OK]` line each.
pub fn steps(ctx: &UiContext, done: &[String]) -> String {
    done.iter()
        .map(|step| badge(ctx, Badge::Ok, step))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print a message to stdout unless quiet.
pub fn print(ctx: &UiContext, message: &str) {
    if !ctx.quiet {
        println!("{}", message);
    }
}
