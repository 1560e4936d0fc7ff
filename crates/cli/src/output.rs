//! Plain-text rendering of render trees for the terminal

use colored::{ColoredString, Colorize};
use screenwright_core::Tone;
use screenwright_runtime::render::{Header, MetricTile};
use screenwright_runtime::{ActionButton, Cell, RenderNode, RenderTree};
use std::fmt::Write;

/// Format a render tree as indented text
pub fn format_tree(tree: &RenderTree) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", tree.title.bold());
    if let Some(subtitle) = &tree.subtitle {
        let _ = writeln!(out, "{}", subtitle.dimmed());
    }
    if !tree.breadcrumbs.is_empty() {
        let trail: Vec<&str> = tree.breadcrumbs.iter().map(|c| c.label.as_str()).collect();
        let _ = writeln!(out, "{}", trail.join(" / ").dimmed());
    }
    if !tree.actions.is_empty() {
        let _ = writeln!(out, "Actions: {}", buttons(&tree.actions));
    }
    for node in &tree.body {
        out.push('\n');
        write_node(&mut out, node, 0);
    }
    out
}

fn write_node(out: &mut String, node: &RenderNode, depth: usize) {
    let pad = "  ".repeat(depth);
    match node {
        RenderNode::Tab {
            label, actions, children, ..
        } => {
            let _ = writeln!(out, "{}{} {}", pad, "Tab:".cyan().bold(), label.bold());
            if !actions.is_empty() {
                let _ = writeln!(out, "{}  Actions: {}", pad, buttons(actions));
            }
            for child in children {
                write_node(out, child, depth + 1);
            }
        }
        RenderNode::Table {
            id,
            title,
            headers,
            rows,
            empty_message,
            actions,
        } => {
            heading(out, &pad, title.as_deref().unwrap_or(id), "table", actions);
            if rows.is_empty() {
                let message = empty_message.as_deref().unwrap_or("No rows");
                let _ = writeln!(out, "{}  {}", pad, message.dimmed());
                return;
            }
            let _ = writeln!(out, "{}  {}", pad, header_line(headers).underline());
            for row in rows {
                let cells: Vec<String> = row.iter().map(|c| paint(c).to_string()).collect();
                let _ = writeln!(out, "{}  {}", pad, cells.join(" | "));
            }
        }
        RenderNode::MetricsGrid {
            id,
            title,
            metrics,
            actions,
        } => {
            heading(out, &pad, title.as_deref().unwrap_or(id), "metrics", actions);
            for metric in metrics {
                let _ = writeln!(out, "{}  {}", pad, metric_line(metric));
            }
        }
        RenderNode::Timeline {
            id,
            title,
            entries,
            actions,
        } => {
            heading(out, &pad, title.as_deref().unwrap_or(id), "timeline", actions);
            for entry in entries {
                let _ = write!(out, "{}  {}  {}", pad, entry.timestamp.dimmed(), entry.title);
                if let Some(description) = &entry.description {
                    let _ = write!(out, " ({})", description);
                }
                out.push('\n');
            }
        }
        RenderNode::InfoCard {
            id,
            title,
            fields,
            actions,
        } => {
            heading(out, &pad, title.as_deref().unwrap_or(id), "info", actions);
            for field in fields {
                let _ = writeln!(out, "{}  {}: {}", pad, field.label, paint(&field.value));
            }
        }
        RenderNode::Custom {
            id,
            title,
            component,
            actions,
            ..
        } => {
            heading(out, &pad, title.as_deref().unwrap_or(id), "custom", actions);
            let _ = writeln!(out, "{}  <{}>", pad, component.magenta());
        }
        RenderNode::Misconfigured { section_id, message } => {
            let target = section_id.as_deref().unwrap_or("screen");
            let _ = writeln!(out, "{}{} {}: {}", pad, "Misconfigured".red().bold(), target, message);
        }
        RenderNode::FetchError { message, retryable } => {
            let hint = if *retryable { " (retry)" } else { "" };
            let _ = writeln!(out, "{}{} {}{}", pad, "Failed to load:".red().bold(), message, hint);
        }
    }
}

fn heading(out: &mut String, pad: &str, title: &str, kind: &str, actions: &[ActionButton]) {
    let _ = write!(out, "{}{} {}", pad, title.bold(), format!("[{}]", kind).dimmed());
    if !actions.is_empty() {
        let _ = write!(out, "  {}", buttons(actions));
    }
    out.push('\n');
}

fn header_line(headers: &[Header]) -> String {
    headers.iter().map(|h| h.label.as_str()).collect::<Vec<_>>().join(" | ")
}

fn metric_line(metric: &MetricTile) -> String {
    let mut line = format!("{}: {}", metric.label, metric.value);
    if let Some(target) = &metric.target {
        line.push_str(&format!(" / {}", target));
    }
    match (metric.percent, metric.tone) {
        (Some(percent), Some(tone)) => format!("{} {}", line, tint(&format!("({}%)", percent), tone)),
        (Some(percent), None) => format!("{} ({}%)", line, percent),
        _ => line,
    }
}

fn buttons(actions: &[ActionButton]) -> String {
    actions
        .iter()
        .map(|a| {
            let label = format!("[{}]", a.label);
            if a.confirm { format!("{}*", label) } else { label }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn paint(cell: &Cell) -> ColoredString {
    match cell.tone {
        Some(tone) => tint(&cell.text, tone),
        None => cell.text.normal(),
    }
}

fn tint(text: &str, tone: Tone) -> ColoredString {
    match tone {
        Tone::Neutral => text.normal(),
        Tone::Gray => text.bright_black(),
        Tone::Blue => text.blue(),
        Tone::Green => text.green(),
        Tone::Amber | Tone::Orange => text.yellow(),
        Tone::Red => text.red(),
        Tone::Purple => text.magenta(),
    }
}
