use std::io::{self, stdout};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use crossterm::{
    cursor::{MoveLeft, MoveRight, MoveUp},
    execute,
    style::{Attribute, Color as TermColor, SetBackgroundColor, Stylize},
};
use cubesolver::{
    cubie::CubieCube,
    error::Error,
    facelet::{Color, FaceCube},
    scramble::{gen_scramble, scramble_from_str, scramble_to_str},
    Session, SolverConfig,
};
use spinners::Spinner;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "solves the cube using two-phase algorithm")]
    #[clap(group(
    clap::ArgGroup::new("state")
        .required(true)
        .args(&["scramble", "facelet"]),
    ))]
    Solve {
        #[arg(short, long)]
        scramble: Option<String>,

        #[arg(short, long)]
        facelet: Option<String>,

        /// Longest solution accepted [default: 24, or the config file value]
        #[arg(short, long)]
        max: Option<usize>,

        /// Seconds after which the best solution so far is returned
        #[arg(short, long)]
        timeout: Option<f32>,

        /// Phase 1 candidates completed before the search stops
        #[arg(short, long)]
        candidates: Option<usize>,

        /// Directory where the tables are stored and loaded from
        #[arg(long)]
        tables: Option<PathBuf>,

        /// TOML file with solver settings
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(short, long)]
        verbose: bool,

        #[arg(short, long)]
        preview: bool,
    },

    #[command(about = "generates scramble")]
    Scramble {
        #[arg(short, long, default_value_t = 20)]
        length: usize,
        #[arg(short, long)]
        preview: bool,
    },
}

struct SolveArgs {
    max: Option<usize>,
    timeout: Option<f32>,
    candidates: Option<usize>,
    tables: Option<PathBuf>,
    config: Option<PathBuf>,
}

impl SolveArgs {
    /// Command line values override the config file, which overrides the defaults.
    fn config(&self) -> Result<SolverConfig, Error> {
        let mut config = match &self.config {
            Some(path) => SolverConfig::load(path)?,
            None => SolverConfig::default(),
        };
        if let Some(max) = self.max {
            config = config.with_max_length(max);
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout_secs(timeout);
        }
        if let Some(candidates) = self.candidates {
            config = config.with_phase1_candidates(candidates);
        }
        if let Some(dir) = &self.tables {
            config = config.with_table_dir(dir);
        }
        Ok(config)
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "cubesolver=debug" } else { "cubesolver=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn solve(
    scramble: &Option<String>,
    facelet: &Option<String>,
    args: SolveArgs,
    preview: bool,
) -> Result<(), Error> {
    let session = Session::new(args.config()?);

    let start = Instant::now();
    let mut spinner = Spinner::new(spinners::Spinners::Dots, "Preparing tables".to_owned());
    let solver = session.solver();
    spinner.stop_with_newline();
    let solver = solver?;

    let state = match (scramble, facelet) {
        (Some(scramble), _) => CubieCube::from(&scramble_from_str(scramble)?),
        (None, Some(facelet)) => CubieCube::from_facelets(facelet)?,
        (None, None) => return Ok(()),
    };
    if preview {
        print_facelet(&FaceCube::from(&state))?;
    }

    let mut spinner = Spinner::new(spinners::Spinners::Dots, "Solving".to_owned());
    let result = solver.solve(&state);
    spinner.stop_with_newline();
    let result = result?;
    let end = Instant::now();

    println!("Solution: {result}");
    println!("Move count: {}", result.len());
    println!("Phase 1 moves: {}", result.phase1_length);
    println!("Solve time: {:?}", result.solve_time);
    println!("Total time: {:?}", end - start);

    Ok(())
}

fn color_to_termcolor(color: Color) -> TermColor {
    match color {
        Color::U => TermColor::White,
        Color::R => TermColor::Red,
        Color::F => TermColor::Green,
        Color::D => TermColor::Yellow,
        Color::L => TermColor::Magenta,
        Color::B => TermColor::Blue,
    }
}

fn print_face(face: &[Color; 9], offset: u16) -> Result<(), io::Error> {
    for row in face.chunks(3) {
        let layer = format!(
            "{}  {}  {}  {}",
            SetBackgroundColor(color_to_termcolor(row[0])),
            SetBackgroundColor(color_to_termcolor(row[1])),
            SetBackgroundColor(color_to_termcolor(row[2])),
            SetBackgroundColor(TermColor::Reset)
        );

        println!("{layer}");

        if offset != 0 {
            execute!(stdout(), MoveRight(offset))?;
        }
    }

    Ok(())
}

/// Print the net of the cube: U on top, then L F R B, then D.
fn print_facelet(facelet: &FaceCube) -> Result<(), io::Error> {
    let stdout = stdout();

    println!();
    execute!(&stdout, MoveRight(6))?;
    print_face(facelet.face(Color::U), 6)?;
    execute!(&stdout, MoveLeft(6))?;
    print_face(facelet.face(Color::L), 0)?;
    execute!(&stdout, MoveRight(6), MoveUp(3))?;
    print_face(facelet.face(Color::F), 6)?;
    execute!(&stdout, MoveLeft(12), MoveUp(3), MoveRight(12))?;
    print_face(facelet.face(Color::R), 12)?;
    execute!(&stdout, MoveLeft(12), MoveUp(3), MoveRight(18))?;
    print_face(facelet.face(Color::B), 18)?;
    execute!(&stdout, MoveLeft(12))?;
    print_face(facelet.face(Color::D), 6)?;
    execute!(&stdout, MoveLeft(12))?;
    println!();

    Ok(())
}

fn scramble(length: usize, preview: bool) -> Result<(), Error> {
    let ss = gen_scramble(length);
    let cc = CubieCube::from(&ss);
    println!("Scramble: {}", scramble_to_str(&ss));
    if preview {
        print_facelet(&FaceCube::from(&cc))?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let program = Cli::parse();

    let result = match program.command {
        Some(Commands::Solve {
            scramble,
            facelet,
            max,
            timeout,
            candidates,
            tables,
            config,
            verbose,
            preview,
        }) => {
            init_logging(verbose);
            let args = SolveArgs {
                max,
                timeout,
                candidates,
                tables,
                config,
            };
            solve(&scramble, &facelet, args, preview)
        }
        Some(Commands::Scramble { length, preview }) => scramble(length, preview),
        None => Ok(()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let styled = "Error:".with(TermColor::Red).attribute(Attribute::Bold);
            eprintln!("{styled} {error}");
            ExitCode::FAILURE
        }
    }
}
