//! Argument definitions and dispatch for the `fahmatrix` binary.
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Arg, ArgMatches, Command, ValueHint};

use fahmatrix::io::MatrixFormat;

use crate::commands::{self, input, output, Task};
use crate::config::{load_cli_config, CliConfig};

fn matrix_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .help(help)
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn subcommand(task: Task) -> Command {
    let cmd = Command::new(task.name());
    match task {
        Task::Describe => cmd
            .about("Per-column summary statistics")
            .arg(matrix_arg("input", "Matrix file")),
        Task::Transpose => cmd
            .about("Transpose a matrix")
            .arg(matrix_arg("input", "Matrix file")),
        Task::Determinant => cmd
            .about("Determinant of a square matrix")
            .arg(matrix_arg("input", "Matrix file")),
        Task::Inverse => cmd
            .about("Inverse of a square matrix")
            .arg(matrix_arg("input", "Matrix file")),
        Task::Rank => cmd
            .about("Numerical rank of a matrix")
            .arg(matrix_arg("input", "Matrix file")),
        Task::Add => cmd
            .about("Elementwise sum A + B")
            .arg(matrix_arg("a", "Left operand"))
            .arg(matrix_arg("b", "Right operand")),
        Task::Subtract => cmd
            .about("Elementwise difference A - B")
            .arg(matrix_arg("a", "Left operand"))
            .arg(matrix_arg("b", "Right operand")),
        Task::Multiply => cmd
            .about("Matrix product A x B")
            .arg(matrix_arg("a", "Left operand"))
            .arg(matrix_arg("b", "Right operand")),
        Task::Solve => cmd
            .about("Solve A X = B for X")
            .arg(matrix_arg("a", "Square coefficient matrix"))
            .arg(matrix_arg("b", "Right-hand side, one column per system")),
        Task::Scale => cmd
            .about("Multiply every element by a scalar")
            .arg(matrix_arg("input", "Matrix file"))
            .arg(
                Arg::new("factor")
                    .help("Scalar factor")
                    .required(true)
                    .allow_negative_numbers(true)
                    .value_parser(clap::value_parser!(f64)),
            ),
    }
}

/// The full `fahmatrix` command definition.
pub fn build_cli() -> Command {
    Command::new("fahmatrix")
        .version(clap::crate_version!())
        .about("Dense matrix arithmetic, decompositions and solvers")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .global(true)
                .help("Write the result to this file instead of stdout")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .global(true)
                .help("Matrix file format. Inferred from the file extension when omitted.")
                .value_parser(["csv", "tsv", "json", "json-records"]),
        )
        .arg(
            Arg::new("precision")
                .long("precision")
                .global(true)
                .help("Digits after the decimal point when printing")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("tolerance")
                .long("tolerance")
                .global(true)
                .help("Relative pivot tolerance for singularity detection (positive)")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("Path to a JSON configuration file")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .subcommands(Task::ALL.iter().map(|&task| subcommand(task)))
}

/// Load `--config` (or defaults) and apply command line overrides.
pub fn resolve_config(matches: &ArgMatches) -> Result<CliConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => {
            log::info!("[fahmatrix] Using config: {:?}", path);
            load_cli_config(path)?
        }
        None => CliConfig::default(),
    };

    if let Some(&precision) = matches.get_one::<usize>("precision") {
        config.precision = precision;
    }
    if let Some(&tolerance) = matches.get_one::<f64>("tolerance") {
        config.tolerance = tolerance;
    }
    Ok(config)
}

fn selected_format(matches: &ArgMatches) -> Result<Option<MatrixFormat>> {
    matches
        .get_one::<String>("format")
        .map(|f| f.parse::<MatrixFormat>())
        .transpose()
}

/// Run the subcommand `name` and print or write its result.
pub fn execute(name: &str, matches: &ArgMatches) -> Result<()> {
    let task = Task::from_name(name).ok_or_else(|| anyhow!("Unknown subcommand: {}", name))?;
    let config = resolve_config(matches)?;
    let format = selected_format(matches)?;

    let paths: Vec<&PathBuf> = match task.operands() {
        2 => vec![
            matches.get_one::<PathBuf>("a").ok_or_else(|| anyhow!("missing A"))?,
            matches.get_one::<PathBuf>("b").ok_or_else(|| anyhow!("missing B"))?,
        ],
        _ => vec![matches
            .get_one::<PathBuf>("input")
            .ok_or_else(|| anyhow!("missing input"))?],
    };
    let operands = input::load_operands(&paths, format.as_ref())?;
    let factor = matches.try_get_one::<f64>("factor").ok().flatten().copied();

    log::info!("[fahmatrix] Running {}", task);
    let result = commands::run(task, &operands, factor, &config)?;

    match matches.get_one::<PathBuf>("output") {
        Some(path) => output::write_output(&result, path, format.as_ref(), &config)?,
        None => println!("{}", output::render(&result, &config)),
    }
    Ok(())
}
