//! A collection of clap helpers shared by `cal` and `date`.
// the builder API is used without the derive feature, these fill the gaps

use clap::{
    Arg, ArgAction, ArgMatches, CommandFactory, FromArgMatches,
    builder::{PossibleValue, PossibleValuesParser, TypedValueParser},
    error::ErrorKind,
    parser::ValueSource,
};

use crate::fmt::Digits;

/// Id and long name of the shared verbosity flag.
pub const VERBOSE_LONG: &str = "verbose";

/// Id and long name of the shared Persian digits flag.
pub const PERSIAN_LONG: &str = "persian";

/// Pairs from strings to values for parsing without ValueEnum trait of clap.
#[derive(Clone, Debug)]
pub struct StaticMap<T: 'static>(pub &'static [(&'static str, T)]);

impl<T> StaticMap<T> {
    /// Get all the keys of this map.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        self.0.iter().map(|(k, _)| *k)
    }

    /// Get the value for this key.
    pub fn get(&self, key: &str) -> Option<&'static T> {
        self.0.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Get the value for this key ignoring ASCII case.
    pub fn get_ignore_case(&self, key: &str) -> Option<&'static T> {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }
}

impl<T> TypedValueParser for StaticMap<T>
where
    T: Sync + Send + Clone + 'static,
{
    type Value = T;

    fn parse_ref(
        &self,
        cmd: &clap::Command,
        arg: Option<&clap::Arg>,
        value: &std::ffi::OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let key = PossibleValuesParser::new(self.keys()).parse_ref(cmd, arg, value)?;
        let found = if arg.is_some_and(|i| i.is_ignore_case_set()) {
            self.get_ignore_case(&key)
        } else {
            self.get(&key)
        };
        // PossibleValuesParser only lets the keys through
        found
            .cloned()
            .ok_or_else(|| clap::Error::new(ErrorKind::InvalidValue).with_cmd(cmd))
    }

    fn possible_values(&self) -> Option<Box<dyn Iterator<Item = PossibleValue> + '_>> {
        Some(Box::new(self.keys().map(PossibleValue::new)))
    }
}

/// The `-v` flag, counted.
pub fn verbose_arg() -> Arg {
    Arg::new(VERBOSE_LONG)
        .long(VERBOSE_LONG)
        .short('v')
        .help("log more to STDERR (-v info, -vv debug, -vvv trace; RUST_LOG overrides)")
        .action(ArgAction::Count)
}

/// The `-p` flag for Persian digits.
pub fn persian_arg() -> Arg {
    Arg::new(PERSIAN_LONG)
        .long(PERSIAN_LONG)
        .short('p')
        .help("print numbers in Persian digits")
        .action(ArgAction::SetTrue)
}

/// Extension helper functions for [`CommandFactory`].
pub trait CommandFactoryExt: CommandFactory {
    /// Throw a stylish but probably expensive error.
    fn error(kind: ErrorKind, message: impl std::fmt::Display) -> clap::Error {
        Self::command().error(kind, message)
    }

    /// Report a rejected value with the message of the library error.
    fn invalid_value(e: crate::Error) -> clap::Error {
        Self::error(ErrorKind::InvalidValue, e)
    }
}

impl<T> CommandFactoryExt for T where T: CommandFactory {}

/// Extension helper functions for [`ArgMatches`].
pub trait ArgMatchesExt {
    /// Return true if given on the command line, not by a default.
    fn is_explicit(&self, id: &str) -> bool;

    /// Value of [`verbose_arg`], 0 if not defined.
    fn verbosity(&self) -> u8;

    /// Value of [`persian_arg`].
    fn digits(&self) -> Digits;
}

impl ArgMatchesExt for ArgMatches {
    fn is_explicit(&self, id: &str) -> bool {
        !matches!(self.value_source(id), None | Some(ValueSource::DefaultValue))
    }

    fn verbosity(&self) -> u8 {
        self.try_get_one::<u8>(VERBOSE_LONG)
            .ok()
            .flatten()
            .copied()
            .unwrap_or_default()
    }

    fn digits(&self) -> Digits {
        if self.try_get_one::<bool>(PERSIAN_LONG).ok().flatten() == Some(&true) {
            Digits::Persian
        } else {
            Digits::Latin
        }
    }
}

/// Replace the clap parse function in no derive environment.
pub trait Parse: CommandFactory + FromArgMatches {
    /// Just like parse in derive feature.
    fn parse() -> Self {
        match Self::from_arg_matches(&Self::command().get_matches()) {
            Ok(v) => v,
            Err(e) => e.exit(),
        }
    }
}

impl<T> Parse for T where T: CommandFactory + FromArgMatches {}

#[cfg(test)]
mod tests {
    use clap::Command;

    use super::*;

    const MAP: StaticMap<u8> = StaticMap(&[("one", 1), ("two", 2)]);

    fn command() -> Command {
        Command::new("test")
            .no_binary_name(true)
            .args([verbose_arg(), persian_arg()])
            .arg(Arg::new("n").long("n").value_parser(MAP).ignore_case(true))
    }

    #[test]
    fn test_static_map() {
        assert_eq!(MAP.get("two"), Some(&2));
        assert_eq!(MAP.get("TWO"), None);
        assert_eq!(MAP.get_ignore_case("TWO"), Some(&2));
        assert_eq!(MAP.keys().collect::<Vec<_>>(), ["one", "two"]);
    }

    #[test]
    fn test_static_map_parser() {
        let m = command().get_matches_from(["--n", "One"]);
        assert_eq!(m.get_one::<u8>("n"), Some(&1));
        assert!(command().try_get_matches_from(["--n", "three"]).is_err());
    }

    #[test]
    fn test_shared_args() {
        let m = command().get_matches_from(["-vv", "-p"]);
        assert_eq!(m.verbosity(), 2);
        assert_eq!(m.digits(), Digits::Persian);
        assert!(m.is_explicit(PERSIAN_LONG));

        let m = command().get_matches_from(Vec::<&str>::new());
        assert_eq!(m.verbosity(), 0);
        assert_eq!(m.digits(), Digits::Latin);
        assert!(!m.is_explicit(PERSIAN_LONG));
        assert!(!m.is_explicit("n"));
    }
}
