use anyhow::Result;
use log::LevelFilter;

use fahmatrix_cli::cli::{build_cli, execute};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("FAHMATRIX_LOG", "error,fahmatrix=info"))
        .init();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some((name, sub_m)) => match execute(name, sub_m) {
            Ok(()) => Ok(()),
            Err(e) => {
                log::error!("{} failed: {:#}", name, e);
                std::process::exit(1)
            }
        },
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}
