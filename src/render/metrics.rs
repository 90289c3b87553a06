//! Advance widths for the two standard Type1 fonts used on the invoice.
//!
//! Widths are in thousandths of the font size, taken from the Adobe AFM
//! files for the printable ASCII range. Anything outside that range is
//! measured with the width of a digit.

use super::layout::Font;

const FALLBACK_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,      // 'p'..'~'
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width of one character in thousandths of the font size.
pub fn char_width(font: Font, ch: char) -> u16 {
    let table = match font {
        Font::Regular => &HELVETICA,
        Font::Bold => &HELVETICA_BOLD,
    };
    match ch as u32 {
        code @ 32..=126 => table[(code - 32) as usize],
        _ => FALLBACK_WIDTH,
    }
}

/// Width of `text` in points at `font_size`.
pub fn text_width(text: &str, font: Font, font_size: f64) -> f64 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(font, c))).sum();
    f64::from(units) * font_size / 1000.0
}

/// Greedy word wrap of a single line of text into lines no wider than
/// `max_width`. Words wider than a whole line are broken by character.
/// Always returns at least one (possibly empty) line.
pub fn wrap_text(text: &str, font: Font, font_size: f64, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let space = text_width(" ", font, font_size);
    let mut current_width = 0.0;

    for word in text.split_whitespace() {
        let word_width = text_width(word, font, font_size);

        if word_width > max_width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }
            for piece in break_word(word, font, font_size, max_width) {
                let piece_width = text_width(&piece, font, font_size);
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                current = piece;
                current_width = piece_width;
            }
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + space + word_width <= max_width {
            current.push(' ');
            current.push_str(word);
            current_width += space + word_width;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
            current_width = word_width;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn break_word(word: &str, font: Font, font_size: f64, max_width: f64) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0;
    for ch in word.chars() {
        let w = f64::from(char_width(font, ch)) * font_size / 1000.0;
        if !piece.is_empty() && width + w > max_width {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(ch);
        width += w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_ascii() {
        // "Hi" = H(722) + i(222) at 10pt
        assert!((text_width("Hi", Font::Regular, 10.0) - 9.44).abs() < 1e-9);
        assert!(text_width("Hi", Font::Bold, 10.0) > text_width("Hi", Font::Regular, 10.0));
    }

    #[test]
    fn non_ascii_uses_fallback_width() {
        assert_eq!(char_width(Font::Regular, 'ü'), FALLBACK_WIDTH);
    }

    #[test]
    fn wraps_on_word_boundaries() {
        let lines = wrap_text("aaa bbb ccc", Font::Regular, 10.0, 40.0);
        // each word is 16.68pt wide, two words plus a space fit in 40pt
        assert_eq!(lines, vec!["aaa bbb", "ccc"]);
    }

    #[test]
    fn breaks_words_longer_than_a_line() {
        let lines = wrap_text("abcdefghij", Font::Regular, 10.0, 20.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), "abcdefghij");
        for line in &lines {
            assert!(text_width(line, Font::Regular, 10.0) <= 20.0);
        }
    }

    #[test]
    fn empty_text_yields_one_empty_line() {
        assert_eq!(wrap_text("", Font::Regular, 10.0, 100.0), vec![String::new()]);
        assert_eq!(wrap_text("   ", Font::Bold, 10.0, 100.0), vec![String::new()]);
    }
}
