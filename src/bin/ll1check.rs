// Copyright (c) 2016-2021 Fabian Schuiki

//! An LL(1) analyzer for context-free grammars.

extern crate clap;
extern crate ll1check;
#[macro_use]
extern crate log;

use clap::{App, Arg};
use ll1check::errors::*;
use ll1check::*;
use log::LevelFilter;

fn main() {
    let matches = App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about("Checks whether a context-free grammar is LL(1).")
        .arg(
            Arg::with_name("verbosity")
                .short("v")
                .multiple(true)
                .help("Increase message verbosity"),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .help("Silence all log output"),
        )
        .arg(
            Arg::with_name("section")
                .short("s")
                .long("section")
                .value_name("SECTION")
                .help("Only print the given report sections")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .possible_values(Sections::NAMES),
        )
        .arg(
            Arg::with_name("INPUT")
                .help("The grammar description file to analyze")
                .required(true),
        )
        .get_matches();

    // Configure the logger.
    let (level, filters) = log_filters(
        matches.is_present("quiet"),
        matches.occurrences_of("verbosity"),
        std::env::var("RUST_LOG").ok(),
    );
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(level);
    if let Some(filters) = filters {
        builder.parse_filters(&filters);
    }
    builder.init();

    // Configure the session.
    let mut session = Session::new();
    if let Some(names) = matches.values_of("section") {
        session.opts.sections = names.filter_map(Sections::from_name).collect();
    }
    debug!("report sections {:?}", session.opts.sections);

    // Invoke the analyzer.
    let filename = matches.value_of("INPUT").unwrap_or_default();
    let (grammar, analysis) = match analyze_file(&session, filename) {
        Ok(x) => x,
        Err(()) => std::process::exit(1),
    };

    // Print the report.
    let stdout = std::io::stdout();
    if let Err(e) = report::write_report(
        &mut stdout.lock(),
        &grammar,
        &analysis,
        session.opts.sections,
    ) {
        session.emit(DiagBuilder2::fatal(format!("unable to write report: {}", e)));
        std::process::exit(1);
    }

    if !analysis.is_ll1() {
        std::process::exit(1);
    }
}

/// Determine the log level and the `RUST_LOG` filters to apply. Quiet mode
/// ignores the environment.
fn log_filters(
    quiet: bool,
    verbosity: u64,
    env_filters: Option<String>,
) -> (LevelFilter, Option<String>) {
    if quiet {
        return (LevelFilter::Off, None);
    }
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    (level, env_filters)
}
