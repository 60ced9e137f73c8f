//! Structures a Jalali calendar for printing.
//!
//! A [`Layout`] is rows of [`Column`]s, each holding the [`Grid`] of one month:
//! ```text
//! .--------<ROW>---------.
//! | COLUMN | ... | COLUMN |
//! `-----------------------*
//!
//! .---<COLUMN>---.
//! |    HEADER    | } month name (and year)
//! |   WEEKDAYS   | } 1 line
//! |     GRID     | } 6 lines
//! `--------------*
//! ```
//! Every column has the same height and width so rows are joined line by line. In full year mode
//! an extra line with the year sits on top.

use std::array;

use taqvim::{
    JALALI_MONTHS, JALALI_MONTHS_FA, Ymd,
    calendar::{WEEK_COUNT, WEEK_DAYS, Weekday, add_jalali_months, jalali_month_grid},
    fmt::Digits,
    strftime::jalali_day_of_year,
};

use crate::string::{Aligner, ansi_width, highlight};

/// Separates the cells of a column.
pub const CELL_DELIMITER: &str = " ";

/// Separates the columns of a row.
pub const COLUMN_DELIMITER: &str = "   ";

/// A 7x6 grid of one Jalali month.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Year and month to print, the day is ignored.
    pub month: Ymd,
    /// If true, prints day of year instead of day of month.
    pub ordinal_mode: bool,
    /// The start of the week.
    pub base_weekday: Weekday,
    pub digits: Digits,
}

impl Grid {
    /// How many characters make a single cell.
    pub fn day_cell_width(&self) -> usize {
        if self.ordinal_mode { 3 } else { 2 }
    }

    /// Put a value in a cell size of this grid.
    pub fn format_in_day_cell(&self, s: &str) -> String {
        Aligner::SPACE.right(s, self.day_cell_width())
    }

    /// Weekday names from the base, fitted in cells.
    pub fn format_weekdays(&self) -> [String; WEEK_DAYS] {
        array::from_fn(|offset| {
            let weekday = self.base_weekday.forward(offset);
            let name = match self.digits {
                Digits::Persian => weekday.abbreviation(),
                Digits::Latin => &weekday.english_abbreviation()[..2],
            };
            self.format_in_day_cell(name)
        })
    }

    /// Format the week rows, optionally with a day brighter.
    pub fn format(&self, highlight_day: Option<&Ymd>) -> [[String; WEEK_DAYS]; WEEK_COUNT] {
        let Ymd { year, month, .. } = self.month;
        let cells = jalali_month_grid(year, month).cells_from(self.base_weekday);
        cells.map(|week| {
            week.map(|day| {
                if day == 0 {
                    return self.format_in_day_cell("");
                }
                let date = Ymd::new(year, month, day);
                let label = if self.ordinal_mode {
                    self.digits.apply(jalali_day_of_year(&date))
                } else {
                    self.digits.apply(day)
                };
                let cell = self.format_in_day_cell(&label);
                if highlight_day == Some(&date) {
                    highlight(&cell)
                } else {
                    cell
                }
            })
        })
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            month: Ymd::new(1, 1, 1),
            ordinal_mode: false,
            base_weekday: Weekday::SAT,
            digits: Digits::Latin,
        }
    }
}

/// A month with its header.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Column {
    pub grid: Grid,
    /// If true, year is written next to the month name.
    pub year_in_header: bool,
}

impl Column {
    /// How many lines every column has.
    pub const HEIGHT: usize = WEEK_COUNT + 2;

    /// What will be the width of this column.
    pub fn width(&self) -> usize {
        WEEK_DAYS * self.grid.day_cell_width() + (WEEK_DAYS - 1) * ansi_width(CELL_DELIMITER)
    }

    /// Month name in the language of the digits.
    pub fn month_name(&self) -> &'static str {
        let i = (self.grid.month.month as usize).saturating_sub(1) % 12;
        match self.grid.digits {
            Digits::Persian => JALALI_MONTHS_FA[i],
            Digits::Latin => JALALI_MONTHS[i],
        }
    }

    fn format_header(&self) -> String {
        let header = if self.year_in_header {
            format!(
                "{} {}",
                self.month_name(),
                self.grid.digits.apply(self.grid.month.year)
            )
        } else {
            self.month_name().to_owned()
        };
        Aligner::SPACE.center(&header, self.width())
    }

    /// Return [`Self::HEIGHT`] lines of exactly [`Self::width`].
    pub fn format(&self, highlight_day: Option<&Ymd>) -> Vec<String> {
        let mut lines = Vec::with_capacity(Self::HEIGHT);
        lines.push(self.format_header());
        lines.push(self.grid.format_weekdays().join(CELL_DELIMITER));
        for week in self.grid.format(highlight_day) {
            lines.push(week.join(CELL_DELIMITER));
        }
        lines
    }
}

/// Manages a whole calendar to print and format.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    /// Formatting of every month, its grid month is the first month to print.
    pub column: Column,
    /// How many months to print, at least one is printed.
    pub months: usize,
    /// After this many months go to the next row (0 and 1 behave the same).
    pub columns: usize,
    /// Print the year once on top instead of in each month header.
    pub year_header: bool,
    /// What day to highlight.
    pub highlight: Option<Ymd>,
}

impl Layout {
    /// Given a width, the maximum number of columns that fit (at least 1).
    pub fn columns_in_width(&self, maximum_width: usize) -> usize {
        let column_width = self.column.width();
        let Some(rest) = maximum_width.checked_sub(column_width) else {
            return 1;
        };
        1 + rest / (column_width + ansi_width(COLUMN_DELIMITER))
    }

    fn row_width(&self, columns: usize) -> usize {
        columns * self.column.width() + columns.saturating_sub(1) * ansi_width(COLUMN_DELIMITER)
    }

    /// Every line of this calendar without trailing spaces.
    pub fn format(&self) -> Vec<String> {
        let months = self.months.max(1);
        let per_row = self.columns.clamp(1, months);
        let start = self.column.grid.month;
        let mut lines = Vec::new();

        if self.year_header {
            let year = self.column.grid.digits.apply(start.year);
            lines.push(Aligner::SPACE.center(&year, self.row_width(per_row)));
            lines.push(String::new());
        }

        let columns = (0..months).map(|i| {
            let mut column = self.column.clone();
            column.grid.month = add_jalali_months(start, i as i64);
            column.year_in_header = !self.year_header;
            column
        });

        let mut row: Vec<Vec<String>> = Vec::with_capacity(per_row);
        let mut rows_printed = 0;
        let mut flush = |row: &mut Vec<Vec<String>>, lines: &mut Vec<String>| {
            if rows_printed > 0 {
                lines.push(String::new());
            }
            for i in 0..Column::HEIGHT {
                let line = row
                    .iter()
                    .map(|column| column[i].as_str())
                    .collect::<Vec<_>>()
                    .join(COLUMN_DELIMITER);
                lines.push(line);
            }
            row.clear();
            rows_printed += 1;
        };

        for column in columns {
            row.push(column.format(self.highlight.as_ref()));
            if row.len() == per_row {
                flush(&mut row, &mut lines);
            }
        }
        if !row.is_empty() {
            flush(&mut row, &mut lines);
        }

        for line in &mut lines {
            line.truncate(line.trim_end().len());
        }
        lines
    }

    /// Print this value directly to stdout.
    pub fn print(&self) {
        for line in self.format() {
            println!("{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn layout(month: Ymd, months: usize, columns: usize) -> Layout {
        Layout {
            column: Column {
                grid: Grid {
                    month,
                    ..Default::default()
                },
                year_in_header: true,
            },
            months,
            columns,
            year_header: false,
            highlight: None,
        }
    }

    #[test]
    fn test_farvardin_1403() {
        assert_eq!(
            layout(Ymd::new(1403, 1, 1), 1, 1).format(),
            vec![
                "   Farvardin 1403",
                "Sa Su Mo Tu We Th Fr",
                "             1  2  3",
                " 4  5  6  7  8  9 10",
                "11 12 13 14 15 16 17",
                "18 19 20 21 22 23 24",
                "25 26 27 28 29 30 31",
                "",
            ]
        );
    }

    #[test]
    fn test_esfand_1403_sunday_based() {
        let mut layout = layout(Ymd::new(1403, 12, 1), 1, 1);
        layout.column.grid.base_weekday = Weekday::SUN;
        assert_eq!(
            layout.format(),
            vec![
                "    Esfand 1403",
                "Su Mo Tu We Th Fr Sa",
                "          1  2  3  4",
                " 5  6  7  8  9 10 11",
                "12 13 14 15 16 17 18",
                "19 20 21 22 23 24 25",
                "26 27 28 29 30",
                "",
            ]
        );
    }

    #[test]
    fn test_two_columns_cross_year() {
        let lines = layout(Ymd::new(1403, 12, 1), 2, 2).format();
        assert_eq!(
            lines[..3],
            [
                "    Esfand 1403           Farvardin 1404",
                "Sa Su Mo Tu We Th Fr   Sa Su Mo Tu We Th Fr",
                "             1  2  3                      1",
            ]
        );
        assert_eq!(lines[7], "                       30 31");
    }

    #[test]
    fn test_rows_are_separated() {
        let lines = layout(Ymd::new(1404, 1, 1), 3, 2).format();
        assert_eq!(lines.len(), Column::HEIGHT * 2 + 1);
        assert_eq!(lines[Column::HEIGHT], "");
        assert_eq!(lines[Column::HEIGHT + 1], "    Khordad 1404");
    }

    #[test]
    fn test_year_header() {
        let mut layout = layout(Ymd::new(1404, 1, 1), 12, 3);
        layout.year_header = true;
        let lines = layout.format();
        assert_eq!(lines[0], "                               1404");
        assert_eq!(lines[1], "");
        assert_eq!(
            lines[2],
            "     Farvardin".to_owned() + &" ".repeat(13) + "Ordibehesht" + &" ".repeat(14) + "Khordad"
        );
        assert_eq!(lines.len(), 2 + 4 * Column::HEIGHT + 3);
        // every column keeps its width of 20 even when the name is short
        assert_eq!(lines[3].len(), 3 * 20 + 2 * COLUMN_DELIMITER.len());
    }

    #[test]
    fn test_persian() {
        let mut layout = layout(Ymd::new(1403, 1, 1), 1, 1);
        layout.column.grid.digits = Digits::Persian;
        let lines = layout.format();
        assert_eq!(lines[0], "    فروردین ۱۴۰۳");
        assert_eq!(lines[1], " ش  ی  د  س  چ  پ  ج");
        assert_eq!(lines[2], "             ۱  ۲  ۳");
    }

    #[test]
    fn test_ordinal() {
        let mut layout = layout(Ymd::new(1403, 7, 1), 1, 1);
        layout.column.grid.ordinal_mode = true;
        let lines = layout.format();
        assert_eq!(lines[1], " Sa  Su  Mo  Tu  We  Th  Fr");
        assert_eq!(lines[0], "         Mehr 1403");
        assert_eq!(lines[2], "    187 188 189 190 191 192");
        assert_eq!(lines[6], "214 215 216");
    }

    #[test]
    fn test_highlight() {
        let grid = Grid {
            month: Ymd::new(1403, 1, 1),
            ..Default::default()
        };
        let cells = grid.format(Some(&Ymd::new(1403, 1, 2)));
        assert_eq!(cells[0][5], highlight(" 2"));
        assert_eq!(cells[0][4], " 1");
    }

    #[test]
    fn test_columns_in_width() {
        let layout = layout(Ymd::new(1403, 1, 1), 12, 3);
        assert_eq!(layout.columns_in_width(0), 1);
        assert_eq!(layout.columns_in_width(20), 1);
        assert_eq!(layout.columns_in_width(42), 1);
        assert_eq!(layout.columns_in_width(43), 2);
        assert_eq!(layout.columns_in_width(80), 3);
    }
}
