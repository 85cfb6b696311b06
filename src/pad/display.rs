//! Textual rendering of PAD values (spec §4.7 "Display").

use super::codec::Pad;

/// Selects the token-prefix convention. `hwhile()` prefixes symbolic tokens
/// with `@` (the HWHILE convention); `pure()` omits the prefix. Numbers and
/// the literal `nil` are never prefixed either way. The 4-space default
/// indent width is configurable (spec §9 Open Question (c)).
#[derive(Debug, Clone, Copy)]
pub struct PadFormat {
    pub token_prefix: &'static str,
    pub indent_width: usize,
}

impl PadFormat {
    pub fn hwhile() -> Self {
        Self { token_prefix: "@", indent_width: 4 }
    }

    pub fn pure() -> Self {
        Self { token_prefix: "", indent_width: 4 }
    }
}

/// Renders `pad` as bracketed, comma-separated tokens. Lists in block
/// positions (a program body, a `while` body, an `if` branch) render
/// multi-line with one element per line; lists in expression positions
/// (`[@cons, …]`, `[@var, 0]`) render inline (spec §4.7).
pub fn display_pad(pad: &Pad, format: PadFormat) -> String {
    let mut out = render(pad, 0, &format);
    out.push('\n');
    out
}

fn render(pad: &Pad, depth: usize, format: &PadFormat) -> String {
    match pad {
        Pad::Int(n) => n.to_string(),
        Pad::Sym(s) if s == "nil" => "nil".to_string(),
        Pad::Sym(s) => format!("{}{}", format.token_prefix, s),
        Pad::List(items) => render_list(items, depth, format),
    }
}

fn render_list(items: &[Pad], depth: usize, format: &PadFormat) -> String {
    match items.first() {
        Some(Pad::Sym(tag)) if tag == ":=" => render_inline(items, depth, format),
        Some(Pad::Sym(tag)) if matches!(tag.as_str(), "var" | "quote" | "hd" | "tl" | "cons") => {
            render_inline(items, depth, format)
        }
        Some(Pad::Sym(tag)) if tag == "if" && items.len() == 4 => {
            let head = render(&items[0], depth, format);
            let cond = render(&items[1], depth, format);
            let then = render_block(&items[2], depth, format);
            let otherwise = render_block(&items[3], depth, format);
            format!("[{head}, {cond}, {then}, {otherwise}]")
        }
        Some(Pad::Sym(tag)) if tag == "while" && items.len() == 3 => {
            let head = render(&items[0], depth, format);
            let cond = render(&items[1], depth, format);
            let body = render_block(&items[2], depth, format);
            format!("[{head}, {cond}, {body}]")
        }
        Some(Pad::Int(_)) if items.len() == 3 => {
            // The program frame `[input_index, body, output_index]`: the
            // wrapping list itself is inline, but its body element is a
            // block position.
            let input = render(&items[0], depth, format);
            let body = render_block(&items[1], depth, format);
            let output = render(&items[2], depth, format);
            format!("[{input}, {body}, {output}]")
        }
        _ => render_block_items(items, depth, format),
    }
}

/// Renders `pad` (expected to be a list of command lists) as a block:
/// multi-line, one element per line, indented one level deeper than `depth`.
fn render_block(pad: &Pad, depth: usize, format: &PadFormat) -> String {
    match pad {
        Pad::List(items) => render_block_items(items, depth, format),
        other => render(other, depth, format),
    }
}

fn render_block_items(items: &[Pad], depth: usize, format: &PadFormat) -> String {
    if items.is_empty() {
        return "[]".to_string();
    }
    let inner_indent = " ".repeat(format.indent_width * (depth + 1));
    let close_indent = " ".repeat(format.indent_width * depth);
    let mut out = String::from("[\n");
    for (i, item) in items.iter().enumerate() {
        out.push_str(&inner_indent);
        out.push_str(&render(item, depth + 1, format));
        if i + 1 < items.len() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str(&close_indent);
    out.push(']');
    out
}

fn render_inline(items: &[Pad], depth: usize, format: &PadFormat) -> String {
    let parts: Vec<String> = items.iter().map(|item| render(item, depth, format)).collect();
    format!("[{}]", parts.join(", "))
}
