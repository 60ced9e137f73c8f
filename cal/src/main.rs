//! Prints a Jalali calendar, a `cal` for the Solar Hijri calendar.

use taqvim::{clap_helper::Parse, logging};

use crate::arg_parser::{Args, ColorMode};

mod arg_parser;
mod layout;
mod string;

fn main() {
    let config = Args::parse();
    logging::init(config.verbosity);

    match config.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => colored::control::unset_override(),
    }

    let layout = config.layout();
    tracing::debug!(
        start = %layout.column.grid.month,
        months = layout.months,
        columns = layout.columns,
        "printing calendar"
    );
    layout.print()
}
