//! Subcommand execution, independent of argument parsing.
pub mod input;
pub mod output;

use std::fmt;

use anyhow::{bail, Result};

use fahmatrix::math::{self, Matrix};
use fahmatrix::stats::{self, ColumnSummary};

use crate::config::CliConfig;

/// One `fahmatrix` subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Describe,
    Transpose,
    Determinant,
    Inverse,
    Rank,
    Add,
    Subtract,
    Multiply,
    Solve,
    Scale,
}

impl Task {
    pub const ALL: [Task; 10] = [
        Task::Describe,
        Task::Transpose,
        Task::Determinant,
        Task::Inverse,
        Task::Rank,
        Task::Add,
        Task::Subtract,
        Task::Multiply,
        Task::Solve,
        Task::Scale,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Task::Describe => "describe",
            Task::Transpose => "transpose",
            Task::Determinant => "det",
            Task::Inverse => "inverse",
            Task::Rank => "rank",
            Task::Add => "add",
            Task::Subtract => "subtract",
            Task::Multiply => "multiply",
            Task::Solve => "solve",
            Task::Scale => "scale",
        }
    }

    pub fn from_name(name: &str) -> Option<Task> {
        Task::ALL.iter().copied().find(|t| t.name() == name)
    }

    /// Number of matrix operands read from disk.
    pub fn operands(self) -> usize {
        match self {
            Task::Add | Task::Subtract | Task::Multiply | Task::Solve => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a subcommand, before rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    Matrix(Matrix),
    Scalar(f64),
    Count(usize),
    Summary(Vec<ColumnSummary>),
}

/// Run `task` on already loaded operands. `factor` is only read by
/// [`Task::Scale`].
pub fn run(
    task: Task,
    operands: &[Matrix],
    factor: Option<f64>,
    config: &CliConfig,
) -> Result<CommandOutput> {
    if operands.len() != task.operands() {
        bail!(
            "{} expects {} matrix operand(s), got {}",
            task,
            task.operands(),
            operands.len()
        );
    }
    let engine = config.engine();
    let first = &operands[0];

    let output = match task {
        Task::Describe => CommandOutput::Summary(stats::describe(first)),
        Task::Transpose => CommandOutput::Matrix(first.transpose()),
        Task::Determinant => CommandOutput::Scalar(math::determinant(first)?),
        Task::Inverse => CommandOutput::Matrix(engine.inverse(first)?),
        Task::Rank => CommandOutput::Count(engine.rank(first)?),
        Task::Add => CommandOutput::Matrix(first.add(&operands[1])?),
        Task::Subtract => CommandOutput::Matrix(first.subtract(&operands[1])?),
        Task::Multiply => CommandOutput::Matrix(first.multiply(&operands[1])?),
        Task::Solve => CommandOutput::Matrix(engine.solve(first, &operands[1])?),
        Task::Scale => match factor {
            Some(k) => CommandOutput::Matrix(first.scalar_multiply(k)),
            None => bail!("scale requires a scalar factor"),
        },
    };
    Ok(output)
}
