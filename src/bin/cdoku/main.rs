#![warn(rust_2018_idioms)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused_qualifications)]

use std::fs;
use std::io::{self, Read, Write};

use anyhow::{anyhow, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use cdoku::generate::{generate, generate_grid, harden_until, GenerateOptions};
use cdoku::puzzle::print::{
    format_puzzle, write_puzzle, Template, TEMPLATE_ASCII, TEMPLATE_UNICODE,
};
use cdoku::solve::{solve, SolveResult};
use cdoku::{Grid, Puzzle};

use crate::options::{Command, Options};

mod options;

fn main() -> Result<()> {
    env_logger::init();
    let options = Options::from_args()?;
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    match options.command {
        Command::Print => cmd_print(&options),
        Command::Solve => cmd_solve(&options, true),
        Command::Examine => cmd_solve(&options, false),
        Command::GenGrid => cmd_gen_grid(&options, &mut rng),
        Command::Harden => cmd_harden(&options, &mut rng),
        Command::Generate => cmd_generate(&options, &mut rng),
    }
}

fn cmd_print(options: &Options) -> Result<()> {
    let puzzle = read_puzzle(options)?;
    let mut out = open_output(options)?;
    render(options, &puzzle, puzzle.givens(), &mut out)
}

fn cmd_solve(options: &Options, want_solution: bool) -> Result<()> {
    let puzzle = read_puzzle(options)?;
    let result = solve(&puzzle);
    let data = result
        .solved()
        .ok_or_else(|| anyhow!("puzzle is not solvable"))?;
    let mut out = open_output(options)?;
    if want_solution {
        render(options, &puzzle, &data.solution, &mut out)?;
        writeln!(out)?;
    }
    writeln!(
        out,
        "Solution is {}unique. Difficulty: {}",
        if result.is_unique() { "" } else { "not " },
        data.difficulty
    )?;
    Ok(())
}

fn cmd_gen_grid(options: &Options, rng: &mut StdRng) -> Result<()> {
    let grid = generate_grid(options.size, rng);
    let puzzle = Puzzle::new(options.size);
    let mut out = open_output(options)?;
    render(options, &puzzle, &grid, &mut out)
}

fn cmd_generate(options: &Options, rng: &mut StdRng) -> Result<()> {
    let grid = generate_grid(options.size, rng);
    let (puzzle, difficulty) = generate(&grid, options.size, &generate_options(options), rng);
    let mut out = open_output(options)?;
    render(options, &puzzle, puzzle.givens(), &mut out)?;
    writeln!(out)?;
    writeln!(out, "Difficulty: {}", difficulty)?;
    Ok(())
}

fn cmd_harden(options: &Options, rng: &mut StdRng) -> Result<()> {
    let mut puzzle = read_puzzle(options)?;
    let data = match solve(&puzzle) {
        SolveResult::Unique(data) => data,
        SolveResult::Multiple(_) => {
            return Err(anyhow!("puzzle must be uniquely solvable before hardening"))
        }
        SolveResult::Unsolvable => return Err(anyhow!("puzzle is not solvable")),
    };

    let gen_options = generate_options(options);
    let best = harden_until(&mut puzzle, &data.solution, data.difficulty, &gen_options, rng);
    puzzle.normalize_labels();

    let mut out = open_output(options)?;
    render(options, &puzzle, puzzle.givens(), &mut out)?;
    writeln!(out)?;
    writeln!(out, "Difficulty: {}", best)?;
    Ok(())
}

fn generate_options(options: &Options) -> GenerateOptions {
    GenerateOptions {
        two_cell: options.two_cell,
        iterations: options.iterations,
        max_difficulty: options.max_difficulty,
        target_difficulty: options.target_difficulty,
    }
}

fn read_puzzle(options: &Options) -> Result<Puzzle> {
    let text = match &options.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("cannot read stdin")?;
            buf
        }
    };
    Ok(Puzzle::parse(&text)?)
}

fn open_output(options: &Options) -> Result<Box<dyn Write>> {
    Ok(match &options.output {
        Some(path) => Box::new(
            fs::File::create(path).with_context(|| format!("cannot write {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    })
}

fn template(options: &Options) -> &'static Template {
    if options.unicode {
        &TEMPLATE_UNICODE
    } else {
        &TEMPLATE_ASCII
    }
}

/// Write the parseable form followed by the drawn grid
fn render(
    options: &Options,
    puzzle: &Puzzle,
    values: &Grid,
    out: &mut impl Write,
) -> Result<()> {
    write_puzzle(puzzle, values, out)?;
    writeln!(out)?;
    format_puzzle(template(options), puzzle, values, out)?;
    Ok(())
}
