//! An additional helper module for working with terminal strings.

use std::cmp::Ordering;

/// Highlights a value in color depending on the color configuration.
pub fn highlight(s: &str) -> String {
    use colored::Colorize;
    s.reversed().to_string()
}

/// Calculate the "width" so it corresponds to columns in terminal.
pub fn ansi_width(s: &str) -> usize {
    ansi_width::ansi_width(s)
}

/// Take characters while it fits in the maximum width.
pub fn cut_end(s: &str, maximum_width: usize) -> &str {
    let mut width_this_far = 0;
    for (i, c) in s.char_indices() {
        width_this_far += ansi_width(c.encode_utf8(&mut [0; 4]));
        if width_this_far > maximum_width {
            return &s[..i];
        }
    }
    s
}

/// Fits strings in an exact terminal width by padding with a filler of width 1 or cutting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aligner {
    filler: char,
}

impl Aligner {
    /// Aligns everything with space.
    pub const SPACE: Self = Self { filler: ' ' };

    /// Create an aligner, `None` if the filler does not have a width of exactly 1.
    pub fn new(filler: char) -> Option<Self> {
        (ansi_width(filler.encode_utf8(&mut [0; 4])) == 1).then_some(Self { filler })
    }

    fn filler(&self, width: usize) -> String {
        std::iter::repeat_n(self.filler, width).collect()
    }

    /// Fit `s` in `width` with the padding going where `split` (left, right) says.
    fn fit(&self, s: &str, width: usize, split: impl Fn(usize) -> (usize, usize)) -> String {
        let actual_width = ansi_width(s);
        match actual_width.cmp(&width) {
            Ordering::Less => {
                let (left, right) = split(width - actual_width);
                self.filler(left) + s + &self.filler(right)
            }
            Ordering::Equal => s.to_owned(),
            Ordering::Greater => cut_end(s, width).to_owned(),
        }
    }

    /// Shift the given string to the right.
    pub fn right(&self, s: &str, width: usize) -> String {
        self.fit(s, width, |padding| (padding, 0))
    }

    /// Append the filler to the end to fit the exact width.
    pub fn left(&self, s: &str, width: usize) -> String {
        self.fit(s, width, |padding| (0, padding))
    }

    /// Shift the value to the center, preferring "a " over " a" when it cannot be exact.
    pub fn center(&self, s: &str, width: usize) -> String {
        self.fit(s, width, |padding| (padding / 2, padding - padding / 2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cut_end() {
        assert_eq!("", cut_end("", 5));
        assert_eq!("", cut_end("12345", 0));
        assert_eq!("12345", cut_end("1234567", 5));
        assert_eq!("x", cut_end("x\u{01F980}", 2));
        assert_eq!("x\u{01F980}", cut_end("x\u{01F980}", 3));
    }

    #[test]
    fn test_alignments() {
        let dot = Aligner::new('·').unwrap();
        assert_eq!(dot.center("12345", 11), "···12345···");
        assert_eq!(dot.center("1234", 11), "···1234····");
        assert_eq!(dot.right("7", 3), "··7");
        assert_eq!(dot.left("7", 3), "7··");
        assert_eq!(Aligner::SPACE.right("1234", 2), "12");
    }

    #[test]
    fn test_persian_width() {
        // Persian letters and digits take one column each
        assert_eq!(Aligner::SPACE.right("۱", 2), " ۱");
        assert_eq!(Aligner::SPACE.center("فروردین", 9), " فروردین ");
    }

    #[test]
    fn test_wide_filler() {
        assert_eq!(Aligner::new('\u{01F980}'), None);
    }
}
