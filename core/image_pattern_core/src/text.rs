use crate::elements::{Point, Text};
use crate::error::{PatternError, Result};
use crate::fonts::TextMeasure;
use crate::geometry::Rect;

#[derive(Debug, Clone, PartialEq)]
pub struct LaidLine {
    pub text: String,
    /// Top-left corner of the line.
    pub origin: Point,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    /// The text box the lines are aligned in.
    pub bounds: Rect,
    pub line_height: f32,
    pub lines: Vec<LaidLine>,
}

/// Breaks `text` into lines and places each one inside the text box.
///
/// Paragraphs are separated by `\n`. With `max_width` set, words are
/// wrapped greedily and words wider than the box are split between
/// characters. With `max_height` set, lines that do not fit entirely are
/// dropped.
pub fn layout_text(text: &Text, measure: &dyn TextMeasure) -> Result<TextLayout> {
    let size = text.font_size;
    if !(size.is_finite() && size > 0.0) {
        return Err(PatternError::InvalidFontSize(size));
    }

    let mut lines: Vec<String> = Vec::new();
    for paragraph in text.text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        match text.max_width {
            Some(max_width) => wrap_paragraph(paragraph, max_width, size, measure, &mut lines),
            None => lines.push(paragraph.to_owned()),
        }
    }

    let line_height = text.line_height.unwrap_or_else(|| measure.line_height(size));
    if let Some(max_height) = text.max_height {
        if line_height > 0.0 {
            let fit = (max_height / line_height).floor().max(0.0) as usize;
            if lines.len() > fit {
                log::debug!("dropping {} overflowing text lines", lines.len() - fit);
                lines.truncate(fit);
            }
        }
    }

    let widths: Vec<f32> = lines.iter().map(|l| measure.text_width(l, size)).collect();
    let widest = widths.iter().copied().fold(0.0_f32, f32::max);
    let block_height = lines.len() as f32 * line_height;

    let box_width = text.max_width.unwrap_or(widest);
    let box_height = text.max_height.unwrap_or(block_height);
    let top_left = text.position.top_left(text.start_point, box_width, box_height);
    let top = top_left.y + text.vertical_alignment.offset(box_height, block_height);

    let lines = lines
        .into_iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (line, width))| LaidLine {
            origin: Point {
                x: top_left.x + text.horizontal_alignment.offset(box_width, width),
                y: top + i as f32 * line_height,
            },
            text: line,
            width,
        })
        .collect();

    Ok(TextLayout {
        bounds: Rect::from_origin_size(top_left, box_width, box_height),
        line_height,
        lines,
    })
}

fn wrap_paragraph(
    paragraph: &str,
    max_width: f32,
    size: f32,
    measure: &dyn TextMeasure,
    out: &mut Vec<String>,
) {
    let produced = out.len();
    let mut current = String::new();

    for word in paragraph.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_owned()
        } else {
            format!("{current} {word}")
        };
        if measure.text_width(&candidate, size) <= max_width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
        if measure.text_width(word, size) <= max_width {
            current = word.to_owned();
            continue;
        }

        // Too wide on its own; split between characters, keeping at least
        // one per line.
        for c in word.chars() {
            let mut candidate = current.clone();
            candidate.push(c);
            if !current.is_empty() && measure.text_width(&candidate, size) > max_width {
                out.push(std::mem::replace(&mut current, c.to_string()));
            } else {
                current = candidate;
            }
        }
    }

    if !current.is_empty() || out.len() == produced {
        out.push(current);
    }
}
