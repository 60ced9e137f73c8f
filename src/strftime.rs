//! Holds `strftime`-like functions for Jalali dates and related helpers.
//!
//! The date directives are resolved here, anything else (time, offsets, time zones, week based
//! years) is left to [`jiff::fmt::strtime`] and therefore stays in the Gregorian calendar.

use jiff::Zoned;

use crate::{
    JALALI_MONTHS, JALALI_MONTHS_ABB,
    calendar::jalali_weekday,
    date::Ymd,
    error::Result,
    fmt::{Digits, pad2},
};

/// Holds an exploded list of directives and literals.
#[derive(Debug, Clone, PartialEq)]
pub struct Formatter<'a> {
    directives: Vec<(usize, &'a str)>,
    original: &'a str,
}

impl<'a> Formatter<'a> {
    pub fn new(format: &'a str) -> Self {
        let mut chars = format.char_indices().peekable();
        let mut directives = Vec::new();
        let mut selection_start = None;

        while let Some((i, c)) = chars.next() {
            // a directive is '%', then anything but '%', up to an ASCII letter other than E and O
            if c == '%' {
                let next = chars.peek();
                if next.is_some_and(|(_, c)| *c != '%') {
                    selection_start = Some(i);
                    continue;
                }

                // "%%" is a literal and a lone '%' at the end is not a directive, either way the
                // caller gets them as is
                if next.is_some() {
                    chars.next();
                }
                selection_start = None;
                continue;
            }

            if let Some(start) = selection_start.take() {
                if c.is_ascii_alphabetic() && c != 'E' && c != 'O' {
                    // ASCII so `i` is the last byte of the directive
                    directives.push((start, &format[start..=i]));
                } else {
                    selection_start = Some(start);
                }
            }
        }

        Self {
            directives,
            original: format,
        }
    }

    /// The directives found and where they start.
    pub fn directives(&self) -> &[(usize, &'a str)] {
        &self.directives
    }

    /// Rebuild the format, replacing each directive `f` returns a value for.
    ///
    /// `f` gets whole directives such as `%-d` or `%^B`, whether known or not. Literals and the
    /// directives it returns `None` for are kept intact.
    pub fn lenient_reconstruct_with<F: Fn(&str) -> Option<String>>(&self, f: F) -> String {
        let mut new = String::with_capacity(self.original.len());
        let mut previous_end = 0;
        for (start, directive) in &self.directives {
            new.push_str(&self.original[previous_end..*start]);
            match f(directive) {
                Some(s) => new.push_str(&s),
                None => new.push_str(directive),
            }
            previous_end = start + directive.len();
        }
        new.push_str(&self.original[previous_end..]);
        new
    }
}

/// How to pad a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pad {
    None,
    Space,
    Zero,
}

/// Flags and width of a single directive like `%_3j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Directive {
    pad: Option<Pad>,
    upper: bool,
    width: Option<usize>,
    conversion: char,
}

impl Directive {
    /// Split a directive or return `None` if it has anything this module does not handle.
    fn parse(s: &str) -> Option<Self> {
        let body = s.strip_prefix('%')?;
        let conversion = body.chars().last()?;
        let mut directive = Self {
            conversion,
            ..Default::default()
        };

        let mut width = String::new();
        for c in body[..body.len() - conversion.len_utf8()].chars() {
            match c {
                '-' if width.is_empty() => directive.pad = Some(Pad::None),
                '_' if width.is_empty() => directive.pad = Some(Pad::Space),
                '0' if width.is_empty() => directive.pad = Some(Pad::Zero),
                '^' if width.is_empty() => directive.upper = true,
                '#' if width.is_empty() => {}
                '0'..='9' => width.push(c),
                'E' | 'O' => {}
                _ => return None,
            }
        }
        directive.width = width.parse().ok();
        Some(directive)
    }

    fn number(&self, n: i64, default_pad: Pad, default_width: usize) -> String {
        let width = self.width.unwrap_or(default_width);
        match self.pad.unwrap_or(default_pad) {
            Pad::None => n.to_string(),
            Pad::Space => format!("{n:>width$}"),
            Pad::Zero => format!("{n:0width$}"),
        }
    }

    fn text(&self, s: &str) -> String {
        if self.upper {
            s.to_uppercase()
        } else {
            s.to_owned()
        }
    }
}

/// Day of the Jalali year, 1 based.
pub const fn jalali_day_of_year(date: &Ymd) -> u16 {
    let day = date.day as u16;
    match date.month {
        0 => day,
        m @ 1..=6 => (m as u16 - 1) * 31 + day,
        m => 186 + (m as u16 - 7) * 30 + day,
    }
}

/// Create a "reconstructor" for [`Formatter`] that resolves date directives of a Jalali date.
///
/// Handles `%Y %y %C %m %d %e %j %B %b %h %A %a %u %w %F %D %x %q`, with the `-`, `_`, `0` and
/// `^` flags and an optional width. `%c` is resolved to its date part followed by `%T`.
///
/// The month must be in `1..=12`.
pub fn jalali_date_resolve(date: Ymd) -> impl Fn(&str) -> Option<String> {
    move |s: &str| {
        let d = Directive::parse(s)?;
        let weekday = jalali_weekday(&date);
        let month_index = (date.month as usize).checked_sub(1)?;
        let year = date.year as i64;
        let ymd = |sep: char| format!("{year:04}{sep}{}{sep}{}", pad2(date.month), pad2(date.day));

        Some(match d.conversion {
            'Y' => d.number(year, Pad::Zero, 4),
            'y' => d.number(year.rem_euclid(100), Pad::Zero, 2),
            'C' => d.number(year.div_euclid(100), Pad::Zero, 2),
            'm' => d.number(date.month.into(), Pad::Zero, 2),
            'd' => d.number(date.day.into(), Pad::Zero, 2),
            'e' => d.number(date.day.into(), Pad::Space, 2),
            'j' => d.number(jalali_day_of_year(&date).into(), Pad::Zero, 3),
            'q' => d.number(month_index as i64 / 3 + 1, Pad::None, 1),
            'u' => match weekday.to_sunday_zero() {
                0 => d.number(7, Pad::None, 1),
                w => d.number(w.into(), Pad::None, 1),
            },
            'w' => d.number(weekday.to_sunday_zero().into(), Pad::None, 1),
            'B' => d.text(JALALI_MONTHS.get(month_index)?),
            'b' | 'h' => d.text(JALALI_MONTHS_ABB.get(month_index)?),
            'A' => d.text(weekday.english_name()),
            'a' => d.text(weekday.english_abbreviation()),
            'F' => ymd('-'),
            'x' => ymd('/'),
            'D' => format!(
                "{}/{}/{}",
                pad2(date.month),
                pad2(date.day),
                pad2(year.rem_euclid(100))
            ),
            'c' => format!("{} {} %T", weekday.english_abbreviation(), ymd('/')),
            _ => return None,
        })
    }
}

/// Format a time with its date in Jalali.
///
/// ```
/// use jiff::{civil, tz::TimeZone};
/// use taqvim::{fmt::Digits, strftime::jalali_strftime};
///
/// let tm = civil::date(2024, 3, 20).at(12, 30, 0, 0).to_zoned(TimeZone::UTC).unwrap();
/// assert_eq!(
///     jalali_strftime("%A %Y/%m/%d %H:%M", &tm, Digits::Latin).unwrap(),
///     "Wednesday 1403/01/01 12:30",
/// );
/// ```
///
/// # Errors
///
/// If [`jiff`] cannot format what is left after the date directives are resolved.
pub fn jalali_strftime(format: &str, now: &Zoned, digits: Digits) -> Result<String> {
    let date = Ymd::from(now.date()).gregorian_to_jalali();
    let format = Formatter::new(format).lenient_reconstruct_with(jalali_date_resolve(date));
    let formatted = jiff::fmt::strtime::format(format.as_bytes(), now)?;
    Ok(digits.apply(formatted))
}

#[cfg(test)]
mod tests {
    use jiff::{civil, tz::TimeZone};

    use super::*;

    /// 1404/02/31, a day that does not exist in Gregorian month 2.
    fn ordibehesht_31() -> Zoned {
        civil::date(2025, 5, 21)
            .at(0, 0, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap()
    }

    fn f(format: &str) -> String {
        jalali_strftime(format, &ordibehesht_31(), Digits::Latin).unwrap()
    }

    #[test]
    fn test_formatter_identification() {
        assert_eq!(Formatter::new("Hello There").directives(), &[]);
        assert_eq!(Formatter::new("Hello%sThere").directives(), &[(5, "%s")]);
        assert_eq!(Formatter::new("Hello%^sThere").directives(), &[(5, "%^s")]);
        assert_eq!(Formatter::new("%0_V").directives(), &[(0, "%0_V")]);
        assert_eq!(Formatter::new("%%0_V").directives(), &[]);
        assert_eq!(Formatter::new("%__%0_V").directives(), &[(3, "%0_V")]);
        assert_eq!(Formatter::new("%__0_").directives(), &[]);
        assert_eq!(
            Formatter::new("%%%Y/%m(%j)-\u{625}-%Od%%").directives(),
            &[(2, "%Y"), (5, "%m"), (8, "%j"), (15, "%Od")]
        );
    }

    #[test]
    fn test_reconstruct_keeps_unknown() {
        let s = Formatter::new("a%Yb%Hc%%").lenient_reconstruct_with(|d| {
            (d == "%Y").then(|| "Y".to_owned())
        });
        assert_eq!(s, "aYb%Hc%%");
    }

    #[test]
    fn test_date_directives() {
        assert_eq!(f("::.%Y/%m/%d.::"), "::.1404/02/31.::");
        assert_eq!(f("%%"), "%");
        assert_eq!(f("%A"), "Wednesday");
        assert_eq!(f("%a"), "Wed");
        assert_eq!(f("%B"), "Ordibehesht");
        assert_eq!(f("%b"), "Ord");
        assert_eq!(f("%h"), "Ord");
        assert_eq!(f("%C"), "14");
        assert_eq!(f("%D"), "02/31/04");
        assert_eq!(f("%d"), "31");
        assert_eq!(f("%e"), "31");
        assert_eq!(f("%F"), "1404-02-31");
        assert_eq!(f("%j"), "062");
        assert_eq!(f("%m"), "02");
        assert_eq!(f("%q"), "1");
        assert_eq!(f("%u"), "3");
        assert_eq!(f("%w"), "3");
        assert_eq!(f("%x"), "1404/02/31");
        assert_eq!(f("%Y"), "1404");
        assert_eq!(f("%y"), "04");
        assert_eq!(f("%c"), "Wed 1404/02/31 00:00:00");
    }

    #[test]
    fn test_time_directives_pass_through() {
        assert_eq!(f("%H:%M:%S"), "00:00:00");
        assert_eq!(f("%T"), "00:00:00");
        assert_eq!(f("%s"), "1747785600");
        assert_eq!(f("%z"), "+0000");
        assert_eq!(f("%n"), "\n");
    }

    #[test]
    fn test_flags() {
        assert_eq!(f("%^B"), "ORDIBEHESHT");
        assert_eq!(f("%^a"), "WED");
        assert_eq!(f("%010B"), "Ordibehesht");
        assert_eq!(f("%-m"), "2");
        assert_eq!(f("%_m"), " 2");
        assert_eq!(f("%5Y"), "01404");
        assert_eq!(f("%_5Y"), " 1404");
        assert_eq!(f("%-j"), "62");
    }

    #[test]
    fn test_day_padding() {
        let tm = civil::date(2024, 3, 20)
            .at(8, 5, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap();
        let f = |s| jalali_strftime(s, &tm, Digits::Latin).unwrap();
        assert_eq!(f("%e"), " 1");
        assert_eq!(f("%-e"), "1");
        assert_eq!(f("%0e"), "01");
        assert_eq!(f("%j"), "001");
        assert_eq!(f("%u %w %A"), "3 3 Wednesday");
    }

    #[test]
    fn test_persian_digits() {
        assert_eq!(
            jalali_strftime("%Y/%m/%d %H:%M", &ordibehesht_31(), Digits::Persian).unwrap(),
            "۱۴۰۴/۰۲/۳۱ ۰۰:۰۰"
        );
    }

    #[test]
    fn test_sunday_and_saturday() {
        // 1404/01/03 is a Sunday, 1404/01/02 a Saturday
        let sunday = civil::date(2025, 3, 23).at(0, 0, 0, 0).to_zoned(TimeZone::UTC).unwrap();
        assert_eq!(jalali_strftime("%u %w", &sunday, Digits::Latin).unwrap(), "7 0");
        let saturday = civil::date(2025, 3, 22).at(0, 0, 0, 0).to_zoned(TimeZone::UTC).unwrap();
        assert_eq!(jalali_strftime("%u %w", &saturday, Digits::Latin).unwrap(), "6 6");
    }

    #[test]
    fn test_day_of_year() {
        assert_eq!(jalali_day_of_year(&Ymd::new(1403, 1, 1)), 1);
        assert_eq!(jalali_day_of_year(&Ymd::new(1403, 7, 1)), 187);
        assert_eq!(jalali_day_of_year(&Ymd::new(1403, 12, 30)), 366);
    }
}
