use std::{convert::Infallible, path::PathBuf};

use clap::{
    Arg, ArgAction, ArgGroup, ArgMatches, Command, CommandFactory, FromArgMatches, command,
    error::ErrorKind, value_parser,
};
use jiff::{Zoned, civil::Time, tz::TimeZone};
use taqvim::{
    clap_helper::{ArgMatchesExt, CommandFactoryExt, StaticMap, persian_arg, verbose_arg},
    fmt::Digits,
    parser::parse_ymd_jalali,
};

/// Provides lines each having a date to convert.
#[derive(Debug, Clone, PartialEq)]
pub enum Reader {
    File(PathBuf),
    Stdin,
}

#[derive(Debug, PartialEq)]
pub enum When {
    /// Delay the value as far as possible.
    Now,
    /// Stored Gregorian dates, one per line.
    Reader(Reader),
    /// The edit time of a file as set in `reference` flag
    Reference(PathBuf),
    /// The given time.
    Given(Zoned),
}

#[derive(Debug, PartialEq)]
pub struct Args {
    pub format: String,
    pub timezone: TimeZone,
    pub when: When,
    /// Print in Jalali, otherwise like a plain `date`.
    pub jalali: bool,
    pub digits: Digits,
    pub verbosity: u8,
}

/// Parse a free form date relative to `now`, keeping the time zone of `now`.
pub fn parse_datetime(s: &str, now: &Zoned) -> Result<Zoned, String> {
    let parsed = parse_datetime::parse_datetime_at_date(now.clone(), s)
        .or_else(|_| parse_datetime::parse_datetime(s))
        .map_err(|e| format!("invalid date `{s}`: {e}"))?;
    Ok(parsed.with_time_zone(now.time_zone().clone()))
}

/// The start of a Gregorian day in the zone of `now`.
pub fn at_midnight(now: &Zoned, date: jiff::civil::Date) -> Result<Zoned, jiff::Error> {
    now.with().date(date).time(Time::midnight()).build()
}

impl Args {
    pub const UTC_LONG: &str = "utc";
    pub const DATE_LONG: &str = "date";
    pub const FILE_LONG: &str = "file";
    pub const REFERENCE_LONG: &str = "reference";
    pub const GREGORIAN_LONG: &str = "gregorian";
    pub const GREGORIAN_OUTPUT_LONG: &str = "gregorian-output";
    pub const RFC_3339_LONG: &str = "rfc-3339";
    pub const RFC_3339_PAIRS: StaticMap<&'static str> = StaticMap(&[
        ("date", "%Y-%m-%d"),
        ("seconds", "%Y-%m-%d %H:%M:%S%:z"),
        ("ns", "%Y-%m-%d %H:%M:%S.%N%:z"),
    ]);
    pub const ISO_8601_LONG: &str = "iso-8601";
    pub const ISO_8601_DEFAULT: &str = "date";
    pub const ISO_8601_PAIRS: StaticMap<&'static str> = StaticMap(&[
        (Self::ISO_8601_DEFAULT, "%Y-%m-%d"),
        ("hours", "%Y-%m-%dT%H%:z"),
        ("minutes", "%Y-%m-%dT%H:%M%:z"),
        ("seconds", "%Y-%m-%dT%H:%M:%S%:z"),
        ("ns", "%Y-%m-%dT%H:%M:%S,%N%:z"),
    ]);
    pub const POSITIONAL_ID: &str = "opt";

    pub const DATE_SETTERS_GROUP: &str = "whens";
    pub const DATE_SETTERS_ARGS: &[&str] = &[
        Self::REFERENCE_LONG,
        Self::FILE_LONG,
        Self::DATE_LONG,
        Self::GREGORIAN_LONG,
    ];

    pub const FORMAT_SETTERS_GROUP: &str = "formatters";
    pub const FORMAT_SETTERS_ARGS: &[&str] = &[Self::ISO_8601_LONG, Self::RFC_3339_LONG];

    pub const DEFAULT_FORMAT: &str = "%a %b %e %H:%M:%S %Z %Y";
    /// What a Jalali date is printed as by `-g` and `-f`.
    pub const DATE_ONLY_FORMAT: &str = "%Y/%m/%d";
    pub const GREGORIAN_DATE_FORMAT: &str = "%Y-%m-%d";

    pub fn groups() -> [ArgGroup; 2] {
        [
            ArgGroup::new(Self::DATE_SETTERS_GROUP)
                .multiple(false)
                .args(Self::DATE_SETTERS_ARGS),
            ArgGroup::new(Self::FORMAT_SETTERS_GROUP)
                .multiple(true)
                .args(Self::FORMAT_SETTERS_ARGS),
        ]
    }

    pub fn args() -> [Arg; 11] {
        [
            Arg::new(Self::UTC_LONG)
                .long(Self::UTC_LONG)
                .short('u')
                .visible_alias("universal")
                .help("as if timezone is Coordinated Universal Time (UTC)")
                .action(ArgAction::SetTrue),
            Arg::new(Self::GREGORIAN_OUTPUT_LONG)
                .long(Self::GREGORIAN_OUTPUT_LONG)
                .short('G')
                .help("print in Gregorian like a plain `date`")
                .action(ArgAction::SetTrue),
            Arg::new(Self::GREGORIAN_LONG)
                .long(Self::GREGORIAN_LONG)
                .short('g')
                .value_name("Y/M/D")
                .help("print the given Jalali date in Gregorian (`%Y-%m-%d` unless +FORMAT)"),
            Arg::new(Self::DATE_LONG)
                .long(Self::DATE_LONG)
                .short('d')
                .overrides_with(Self::DATE_LONG)
                .help("as if `now` is the given (only the last of multiple values takes effect)"),
            Arg::new(Self::FILE_LONG)
                .long(Self::FILE_LONG)
                .short('f')
                .help("convert every stored `YYYY-MM-DD` line of a file to Jalali (use '-' for STDIN)")
                .value_parser(|s: &str| -> Result<Reader, Infallible> {
                    Ok(if s == "-" {
                        Reader::Stdin
                    } else {
                        Reader::File(PathBuf::from(s))
                    })
                }),
            Arg::new(Self::REFERENCE_LONG)
                .long(Self::REFERENCE_LONG)
                .short('r')
                .help("as if `now` is the modification time of the given file")
                .value_parser(value_parser!(PathBuf)),
            Arg::new(Self::RFC_3339_LONG)
                .long(Self::RFC_3339_LONG)
                .value_name("SPEC")
                .overrides_with_all(Self::FORMAT_SETTERS_ARGS)
                .help("output in a specification of RFC 3339")
                .value_parser(Self::RFC_3339_PAIRS),
            Arg::new(Self::ISO_8601_LONG)
                .long(Self::ISO_8601_LONG)
                .short('I')
                .value_name("SPEC")
                .num_args(0..=1)
                .default_missing_value(Self::ISO_8601_DEFAULT)
                .overrides_with_all(Self::FORMAT_SETTERS_ARGS)
                .help(format!(
                    "output in a specification of ISO 8601 [default SPEC: {}]",
                    Self::ISO_8601_DEFAULT,
                ))
                .value_parser(Self::ISO_8601_PAIRS),
            persian_arg(),
            verbose_arg(),
            Arg::new(Self::POSITIONAL_ID)
                .value_name("+FORMAT")
                .help("the output format, `%`-directives resolved in the printed calendar"),
        ]
    }
}

impl CommandFactory for Args {
    fn command() -> Command {
        command!(/* with version, about and author */)
            .after_help(
                "Date directives (%Y %m %d %B %A %j ...) are Jalali unless --gregorian-output.\n\
                 Time and zone directives follow\n\
                 https://docs.rs/jiff/latest/jiff/fmt/strtime/index.html",
            )
            .args(Self::args())
            .groups(Self::groups())
    }

    fn command_for_update() -> Command {
        Self::command()
    }
}

impl Default for Args {
    /// `date` compatible defaults, in Jalali.
    fn default() -> Self {
        Self {
            format: Self::DEFAULT_FORMAT.to_owned(),
            timezone: TimeZone::system(),
            when: When::Now,
            jalali: true,
            digits: Digits::Latin,
            verbosity: 0,
        }
    }
}

impl FromArgMatches for Args {
    fn from_arg_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let mut v = Self::default();
        v.update_from_arg_matches(matches)?;
        Ok(v)
    }

    fn update_from_arg_matches(&mut self, matches: &ArgMatches) -> Result<(), clap::Error> {
        self.verbosity = matches.verbosity();
        self.digits = matches.digits();

        if matches.get_flag(Self::UTC_LONG) {
            self.timezone = TimeZone::UTC;
        };
        if matches.get_flag(Self::GREGORIAN_OUTPUT_LONG) {
            self.jalali = false;
        }

        let now = Zoned::now().with_time_zone(self.timezone.clone());

        if let Some(v) = matches.get_one::<&'static str>(Self::RFC_3339_LONG) {
            self.format = v.to_string();
        } else if let Some(v) = matches.get_one::<&'static str>(Self::ISO_8601_LONG) {
            self.format = v.to_string();
        }

        // try date, then gregorian, then file, then reference
        if let Some(v) = matches.get_one::<String>(Self::DATE_LONG) {
            self.when = When::Given(
                parse_datetime(v, &now).map_err(|e| Self::error(ErrorKind::InvalidValue, e))?,
            );
        } else if let Some(v) = matches.get_one::<String>(Self::GREGORIAN_LONG) {
            let date = parse_ymd_jalali(v)
                .and_then(|d| jiff::civil::Date::try_from(d.jalali_to_gregorian()))
                .map_err(Self::invalid_value)?;
            let date = at_midnight(&now, date)
                .map_err(|e| Self::error(ErrorKind::InvalidValue, e))?;
            self.when = When::Given(date);
            self.jalali = false;
            if !matches.is_explicit(Self::FORMAT_SETTERS_GROUP) {
                self.format = Self::GREGORIAN_DATE_FORMAT.to_owned();
            }
        } else if let Some(v) = matches.get_one::<Reader>(Self::FILE_LONG) {
            self.when = When::Reader(v.clone());
            if !matches.is_explicit(Self::FORMAT_SETTERS_GROUP) {
                self.format = Self::DATE_ONLY_FORMAT.to_owned();
            }
        } else if let Some(v) = matches.get_one::<PathBuf>(Self::REFERENCE_LONG) {
            self.when = When::Reference(v.clone());
        }

        if let Some(input) = matches.get_one::<String>(Self::POSITIONAL_ID) {
            let Some(format) = input.strip_prefix('+') else {
                return Err(Self::error(
                    ErrorKind::InvalidValue,
                    format!("unexpected `{input}`, a format starts with '+', see -d for dates"),
                ));
            };
            if matches.is_explicit(Self::FORMAT_SETTERS_GROUP) {
                return Err(Self::error(
                    ErrorKind::ArgumentConflict,
                    "unexpected +FORMAT when other options set the format",
                ));
            }
            self.format = format.to_owned();
        }

        tracing::debug!(format = %self.format, jalali = self.jalali, "date arguments");
        Ok(())
    }
}
