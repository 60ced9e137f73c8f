use clap::{
    Arg, ArgAction, ArgMatches, Command, CommandFactory, FromArgMatches, command,
    error::ErrorKind, value_parser,
};
use taqvim::{
    Ymd,
    calendar::{Weekday, add_jalali_months},
    clap_helper::{ArgMatchesExt, CommandFactoryExt, StaticMap, persian_arg, verbose_arg},
    clock::{SystemClock, today_jalali},
    fmt::to_latin_digits,
    parser::{parse_jalali_month, parse_weekday, parse_ymd_jalali},
};

use crate::layout::{Column, Grid, Layout};

#[derive(Debug, Clone, PartialEq)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub const PARSER_DEFAULT: &'static str = "auto";

    pub const PARSER_MAP: StaticMap<&'static Self> = StaticMap(&[
        (Self::PARSER_DEFAULT, &Self::Auto),
        ("always", &Self::Always),
        ("never", &Self::Never),
    ]);
}

#[derive(Debug, PartialEq)]
pub struct Args {
    /// Non-zero, how many months to print.
    pub months: usize,
    /// Put `now` in the middle of the printed months.
    pub span: bool,
    pub color: ColorMode,
    /// How many months in a row.
    pub columns: usize,
    /// If true, up to this number of columns will be set but may be less if cannot fit in terminal.
    pub auto_columns: bool,
    /// The width of the terminal/space in characters.
    pub width_chars: usize,
    /// The given Jalali date or today, highlighted unless only a year or month is given.
    pub now: Ymd,
    pub highlight: bool,
    pub full_year_mode: bool,
    pub verbosity: u8,
    /// Formatting of every month, the grid month is set by [`Self::layout`].
    pub column: Column,
}

impl Args {
    /// What is the earliest month to be printed.
    pub fn start_month(&self) -> Ymd {
        let first = Ymd::new(self.now.year, self.now.month, 1);
        if self.full_year_mode {
            return Ymd::new(self.now.year, 1, 1);
        }
        if !self.span || self.months == 1 {
            return first;
        }
        // the odd one goes before now
        let months_before = i64::try_from(self.months / 2).unwrap_or(i64::MAX);
        add_jalali_months(first, -months_before)
    }

    /// How many months in a row given the terminal width.
    pub fn suggested_columns(&self, layout: &Layout) -> usize {
        if self.auto_columns {
            layout
                .columns_in_width(self.width_chars)
                .min(self.columns)
                .max(1)
        } else {
            self.columns
        }
    }

    /// The calendar these arguments ask for.
    pub fn layout(&self) -> Layout {
        let mut layout = Layout {
            column: Column {
                grid: Grid {
                    month: self.start_month(),
                    ..self.column.grid.clone()
                },
                year_in_header: true,
            },
            months: self.months,
            columns: 1,
            year_header: self.full_year_mode,
            highlight: self.highlight.then_some(self.now),
        };
        layout.columns = self.suggested_columns(&layout);
        layout
    }
}

impl Args {
    pub const MONTHS_1_LONG: &str = "one";
    pub const MONTHS_3_LONG: &str = "three";
    pub const MONTHS_LONG: &str = "months";
    pub const YEAR_LONG: &str = "year";
    pub const SPAN_LONG: &str = "span";
    pub const SUNDAY_LONG: &str = "sunday";
    pub const WEEKDAY_LONG: &str = "weekday";
    pub const ORDINAL_LONG: &str = "julian";
    pub const COLUMNS_LONG: &str = "columns";
    pub const COLOR_LONG: &str = "color";
    pub const POSITIONAL_1_ID: &str = "opt1";
    pub const POSITIONAL_2_ID: &str = "opt2";

    pub const MONTHS_SETTERS_ARGS: &[&str] = &[
        Self::MONTHS_1_LONG,
        Self::MONTHS_3_LONG,
        Self::MONTHS_LONG,
        Self::YEAR_LONG,
    ];
    pub const WEEKDAY_SETTERS_ARGS: &[&str] = &[Self::SUNDAY_LONG, Self::WEEKDAY_LONG];

    pub fn args() -> [Arg; 14] {
        [
            Arg::new(Self::MONTHS_1_LONG)
                .long(Self::MONTHS_1_LONG)
                .short('1')
                .overrides_with_all(Self::MONTHS_SETTERS_ARGS)
                .help("print one month (default)")
                .action(ArgAction::SetTrue),
            Arg::new(Self::MONTHS_3_LONG)
                .long(Self::MONTHS_3_LONG)
                .short('3')
                .overrides_with_all(Self::MONTHS_SETTERS_ARGS)
                .help("print the previous, current and next month (equal to `--months 3 --span`)")
                .action(ArgAction::SetTrue),
            Arg::new(Self::MONTHS_LONG)
                .long(Self::MONTHS_LONG)
                .short('n')
                .overrides_with_all(Self::MONTHS_SETTERS_ARGS)
                .help("print the number of months (starting with this one if not spanning)")
                .value_parser(value_parser!(usize)),
            Arg::new(Self::YEAR_LONG)
                .long(Self::YEAR_LONG)
                .short('y')
                .overrides_with_all(Self::MONTHS_SETTERS_ARGS)
                .help("print the whole Jalali year")
                .action(ArgAction::SetTrue),
            Arg::new(Self::SPAN_LONG)
                .long(Self::SPAN_LONG)
                .short('S')
                .help("put the current month in the middle of multiple months")
                .action(ArgAction::SetTrue),
            Arg::new(Self::SUNDAY_LONG)
                .long(Self::SUNDAY_LONG)
                .short('s')
                .overrides_with_all(Self::WEEKDAY_SETTERS_ARGS)
                .help("set Sunday as the first weekday (equal to `--weekday sunday`)")
                .action(ArgAction::SetTrue),
            Arg::new(Self::WEEKDAY_LONG)
                .long(Self::WEEKDAY_LONG)
                .overrides_with_all(Self::WEEKDAY_SETTERS_ARGS)
                .value_parser(parse_weekday)
                .help("set the first weekday (`saturday = 0`, default)"),
            Arg::new(Self::ORDINAL_LONG)
                .long(Self::ORDINAL_LONG)
                .short('j')
                .overrides_with(Self::ORDINAL_LONG)
                .help("use day of year instead of day of month")
                .action(ArgAction::SetTrue),
            Arg::new(Self::COLUMNS_LONG)
                .long(Self::COLUMNS_LONG)
                .short('c')
                .overrides_with(Self::COLUMNS_LONG)
                .value_parser(|s: &str| -> Result<Option<usize>, String> {
                    if s == "auto" {
                        return Ok(None);
                    }
                    let v: usize = s.parse().map_err(|e: std::num::ParseIntError| e.to_string())?;
                    Ok(Some(v.max(1)))
                })
                .help("how many months to fit in one row (`auto` for the width of the terminal)"),
            Arg::new(Self::COLOR_LONG)
                .long(Self::COLOR_LONG)
                .overrides_with(Self::COLOR_LONG)
                .num_args(0..=1)
                .default_missing_value(ColorMode::PARSER_DEFAULT)
                .value_parser(ColorMode::PARSER_MAP)
                .ignore_case(true)
                .help("set coloring behavior"),
            persian_arg().help("print in Persian digits and names"),
            verbose_arg(),
            Arg::new(Self::POSITIONAL_1_ID)
                .value_name("[MONTH] YEAR|MONTH|Y/M/D")
                .help("a Jalali year, month (name or number) and year, a month or a date"),
            Arg::new(Self::POSITIONAL_2_ID).hide(true),
        ]
    }
}

impl CommandFactory for Args {
    fn command() -> Command {
        command!(/* with version, about and author */).args(Self::args())
    }

    fn command_for_update() -> Command {
        Self::command()
    }
}

impl Default for Args {
    fn default() -> Self {
        Self {
            months: 1,
            span: false,
            color: ColorMode::Auto,
            columns: 3,
            auto_columns: true,
            width_chars: terminal_size::terminal_size()
                .map(|(w, _)| w.0)
                .unwrap_or(80) as usize,
            now: today_jalali(&SystemClock::default()),
            highlight: true,
            full_year_mode: false,
            verbosity: 0,
            column: Column::default(),
        }
    }
}

/// A year in ASCII or Persian digits.
fn parse_year(s: &str) -> Option<i32> {
    to_latin_digits(s.trim()).parse().ok()
}

impl FromArgMatches for Args {
    fn from_arg_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let mut v = Self::default();
        v.update_from_arg_matches(matches)?;
        Ok(v)
    }

    fn update_from_arg_matches(&mut self, matches: &ArgMatches) -> Result<(), clap::Error> {
        self.verbosity = matches.verbosity();
        self.column.grid.digits = matches.digits();

        if matches.get_flag(Self::SPAN_LONG) {
            self.span = true;
        }
        if matches.get_flag(Self::ORDINAL_LONG) {
            self.column.grid.ordinal_mode = true;
        }

        // MONTHS_SETTERS_ARGS
        let months_explicit = Self::MONTHS_SETTERS_ARGS
            .iter()
            .any(|id| matches.is_explicit(id));
        if matches.get_flag(Self::MONTHS_1_LONG) {
            self.months = 1;
        } else if matches.get_flag(Self::MONTHS_3_LONG) {
            self.months = 3;
            self.span = true;
        } else if let Some(&months) = matches.get_one::<usize>(Self::MONTHS_LONG) {
            self.months = months.max(1);
        } else if matches.get_flag(Self::YEAR_LONG) {
            self.months = 12;
            self.full_year_mode = true;
        }

        // WEEKDAY_SETTERS_ARGS
        if matches.get_flag(Self::SUNDAY_LONG) {
            self.column.grid.base_weekday = Weekday::SUN;
        } else if let Some(&weekday) = matches.get_one::<Weekday>(Self::WEEKDAY_LONG) {
            self.column.grid.base_weekday = weekday;
        }

        if let Some(columns) = matches.get_one::<Option<usize>>(Self::COLUMNS_LONG) {
            (self.columns, self.auto_columns) = match columns {
                Some(v) => (*v, false),
                None => (usize::MAX, true),
            };
        }

        if let Some(&color) = matches.get_one::<&ColorMode>(Self::COLOR_LONG) {
            self.color = color.clone();
        }

        // POSITIONAL
        let pos1 = matches.get_one::<String>(Self::POSITIONAL_1_ID);
        let pos2 = matches.get_one::<String>(Self::POSITIONAL_2_ID);
        match (pos1, pos2) {
            (None, _) => {}
            (Some(date), None) if date.contains('/') => {
                self.now = parse_ymd_jalali(date).map_err(Self::invalid_value)?;
            }
            (Some(year_or_month), None) => match parse_year(year_or_month) {
                // a lone number is a whole year unless the months are set otherwise
                Some(year) if !months_explicit => {
                    self.now = Ymd::new(year, 1, 1);
                    self.months = 12;
                    self.full_year_mode = true;
                    self.highlight = false;
                }
                Some(year) => {
                    self.now = Ymd::new(year, 1, 1);
                    self.highlight = false;
                }
                None => {
                    let month = parse_jalali_month(year_or_month).map_err(Self::invalid_value)?;
                    self.now = Ymd::new(self.now.year, month, 1);
                    self.highlight = false;
                }
            },
            (Some(month), Some(year)) => {
                let month = parse_jalali_month(month).map_err(Self::invalid_value)?;
                let year = parse_year(year).ok_or_else(|| {
                    Self::error(ErrorKind::InvalidValue, format!("invalid year `{year}`"))
                })?;
                self.now = Ymd::new(year, month, 1);
                self.highlight = false;
            }
        }

        tracing::debug!(now = %self.now, months = self.months, "calendar arguments");
        Ok(())
    }
}
