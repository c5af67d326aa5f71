//! Small pure string helpers shared by the renderers.
//!
//! ## Minimum-indent stripping
//!
//! Multi-line blocks in the content files (guide prose, demo text, API
//! descriptions, code examples) are indented to line up with the surrounding
//! TOML. [`dedent`] removes that indentation before the block is read as
//! Markdown or code:
//!
//! ```text
//! "\n    function spry.start()\n      x = 0\n    end\n  "
//!   → "function spry.start()\n  x = 0\nend"
//! ```

/// Strip the minimum common indentation and surrounding blank lines.
///
/// - The indentation width is the smallest count of leading spaces/tabs
///   across lines that are not blank.
/// - That many characters are removed from the start of every line. Blank
///   lines, which may be shorter, become empty.
/// - Leading and trailing empty lines are dropped.
pub fn dedent(text: &str) -> String {
    let width = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(indent_width)
        .min()
        .unwrap_or(0);

    let lines: Vec<&str> = text
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                &line[width..]
            }
        })
        .collect();

    let start = lines.iter().position(|l| !l.is_empty());
    let end = lines.iter().rposition(|l| !l.is_empty());
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}

/// Prefix every non-blank line with `width` spaces.
///
/// Inverse of [`dedent`] for uniformly indented blocks.
pub fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn indent_width(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

/// Fragment id for an API entry: the lowercased name.
///
/// `spry.key_down` → `spry.key_down`, `Image:draw` → `image:draw`.
pub fn anchor_id(name: &str) -> String {
    name.to_lowercase()
}

/// Call signature from a name and its argument names.
///
/// Arguments starting with `.` are fields of a preceding table argument and
/// are left out: `spry.conf` with `t`, `.hot_reload` → `spry.conf(t)`.
pub fn signature<'a>(name: &str, args: impl IntoIterator<Item = &'a str>) -> String {
    let params: Vec<&str> = args.into_iter().filter(|a| !a.starts_with('.')).collect();
    format!("{}({})", name, params.join(", "))
}
