//! Cursor positioning and word-wrapping helpers.

use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display column of the cursor in unwrapped single-line text, clamped
/// to `u16::MAX` for inputs wider than any terminal.
pub(super) fn cursor_column(content: &str, cursor_char: usize) -> u16 {
    let col: usize = content
        .chars()
        .take(cursor_char)
        .map(|c| c.width().unwrap_or(1))
        .sum();
    u16::try_from(col).unwrap_or(u16::MAX)
}

/// Horizontal scroll for a single-line field `width` columns wide so the
/// cursor stays visible.
pub(super) fn input_scroll(content: &str, cursor_char: usize, width: u16) -> u16 {
    let col = cursor_column(content, cursor_char);
    if width == 0 {
        return 0;
    }
    col.saturating_add(1).saturating_sub(width)
}

/// Wrap plain text into lines at most `max_width` columns wide. Explicit
/// newlines are kept; blank lines survive as empty lines.
pub(super) fn wrap_text(text: &str, max_width: usize) -> Vec<Line<'static>> {
    text.split('\n')
        .flat_map(|raw| wrap_line(Line::from(raw.trim_end_matches('\r').to_string()), max_width))
        .collect()
}

/// Word-wrap a single `Line` at `max_width` display columns, preserving span styles.
/// Returns the line unchanged if it already fits.
pub(super) fn wrap_line(line: Line<'static>, max_width: usize) -> Vec<Line<'static>> {
    if max_width == 0 {
        return vec![line];
    }

    let total: usize = line.spans.iter().map(|s| s.content.width()).sum();
    if total <= max_width {
        return vec![line];
    }

    let mut result: Vec<Line<'static>> = Vec::new();
    let mut current_spans: Vec<Span<'static>> = Vec::new();
    let mut current_width: usize = 0;

    for span in line.spans {
        let style = span.style;
        let text: String = span.content.into();

        let mut remaining = text.as_str();
        while !remaining.is_empty() {
            let rem_width = remaining.width();

            if current_width + rem_width <= max_width {
                current_spans.push(Span::styled(remaining.to_string(), style));
                current_width += rem_width;
                break;
            }

            // Walk characters to the last space that still fits.
            let available = max_width.saturating_sub(current_width);
            let mut col: usize = 0;
            let mut byte_at_limit: usize = 0;
            let mut last_space_byte: Option<usize> = None;

            for (i, ch) in remaining.char_indices() {
                let ch_w = ch.width().unwrap_or(0);
                if col + ch_w > available {
                    break;
                }
                col += ch_w;
                byte_at_limit = i + ch.len_utf8();
                if ch == ' ' {
                    last_space_byte = Some(i + ch.len_utf8());
                }
            }

            let split_at = last_space_byte.unwrap_or(byte_at_limit);

            if split_at == 0 {
                if current_spans.is_empty() {
                    // Not even one char fits; take one anyway to make progress.
                    if let Some(ch) = remaining.chars().next() {
                        current_spans.push(Span::styled(ch.to_string(), style));
                        remaining = &remaining[ch.len_utf8()..];
                    }
                }
                result.push(Line::from(std::mem::take(&mut current_spans)));
                current_width = 0;
            } else {
                let (before, after) = remaining.split_at(split_at);
                current_spans.push(Span::styled(before.to_string(), style));
                result.push(Line::from(std::mem::take(&mut current_spans)));
                current_width = 0;
                remaining = after;
            }
        }
    }

    if !current_spans.is_empty() {
        result.push(Line::from(current_spans));
    }

    if result.is_empty() {
        result.push(Line::from(""));
    }

    result
}
