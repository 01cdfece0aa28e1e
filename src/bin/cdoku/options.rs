use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use clap::ArgMatches;

const DEFAULT_SIZE: usize = 6;
const DEFAULT_ITERATIONS: u32 = 40;

#[derive(Clone, Copy, PartialEq)]
pub(crate) enum Command {
    Print,
    Solve,
    Examine,
    GenGrid,
    Harden,
    Generate,
}

#[derive(Clone)]
pub(crate) struct Options {
    pub command: Command,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub unicode: bool,
    pub two_cell: bool,
    pub size: usize,
    pub iterations: u32,
    pub max_difficulty: Option<u32>,
    pub target_difficulty: Option<u32>,
    pub seed: Option<u64>,
}

impl Options {
    pub fn from_args() -> Result<Self> {
        Self::from_arg_matches(&clap_app().get_matches())
    }

    fn from_arg_matches(matches: &ArgMatches<'_>) -> Result<Self> {
        let command = match matches.value_of("command").unwrap() {
            "print" => Command::Print,
            "solve" => Command::Solve,
            "examine" => Command::Examine,
            "gen-grid" => Command::GenGrid,
            "harden" => Command::Harden,
            "generate" => Command::Generate,
            other => return Err(anyhow!("unknown command: {}", other)),
        };
        let options = Self {
            command,
            input: matches.value_of("input").map(PathBuf::from),
            output: matches.value_of("output").map(PathBuf::from),
            unicode: matches.is_present("unicode"),
            two_cell: matches.is_present("two_cell"),
            size: parse_value(matches, "size")?.unwrap_or(DEFAULT_SIZE),
            iterations: parse_value(matches, "iterations")?.unwrap_or(DEFAULT_ITERATIONS),
            max_difficulty: parse_value(matches, "max_difficulty")?,
            target_difficulty: parse_value(matches, "target_difficulty")?,
            seed: parse_value(matches, "seed")?,
        };
        if options.size < 1 || options.size > 16 {
            return Err(anyhow!("size must be between 1 and 16"));
        }
        Ok(options)
    }
}

fn parse_value<T: FromStr>(matches: &ArgMatches<'_>, name: &str) -> Result<Option<T>> {
    matches
        .value_of(name)
        .map(|s| {
            s.parse::<T>()
                .map_err(|_| anyhow!("invalid value for {}: {}", name, s))
        })
        .transpose()
}

fn clap_app() -> clap::App<'static, 'static> {
    use clap::{App, AppSettings, Arg};

    App::new("cdoku")
        .about("Solve and generate Calcudoku puzzles")
        .setting(AppSettings::ArgRequiredElseHelp)
        .arg(
            Arg::with_name("command")
                .required(true)
                .possible_values(&["print", "solve", "examine", "gen-grid", "harden", "generate"])
                .help("what to do"),
        )
        .arg(
            Arg::with_name("input")
                .short("i")
                .long("input")
                .takes_value(true)
                .value_name("FILE")
                .help("read the puzzle from a file (default stdin)"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .value_name("FILE")
                .help("write output to a file (default stdout)"),
        )
        .arg(
            Arg::with_name("unicode")
                .short("u")
                .long("unicode")
                .help("draw grids with Unicode box characters"),
        )
        .arg(
            Arg::with_name("two_cell")
                .short("T")
                .long("two-cell")
                .help("restrict difference and ratio cages to two cells"),
        )
        .arg(
            Arg::with_name("size")
                .short("s")
                .long("size")
                .takes_value(true)
                .value_name("N")
                .help("size of generated grids"),
        )
        .arg(
            Arg::with_name("iterations")
                .short("w")
                .long("iterations")
                .takes_value(true)
                .value_name("ITER")
                .help("hardening iteration limit"),
        )
        .arg(
            Arg::with_name("max_difficulty")
                .short("m")
                .long("max-difficulty")
                .takes_value(true)
                .value_name("DIFF")
                .help("difficulty cap for generated puzzles"),
        )
        .arg(
            Arg::with_name("target_difficulty")
                .short("t")
                .long("target-difficulty")
                .takes_value(true)
                .value_name("DIFF")
                .help("stop hardening at this difficulty"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .takes_value(true)
                .value_name("SEED")
                .help("seed the random number generator"),
        )
}
