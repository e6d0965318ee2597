mod cli;
mod commands;

use cli::{CheckParams, CompileParams, DecompileParams, DumpParams, LabelsParams, build_cli};
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("compile", m)) => {
            let params = CompileParams::from_matches(m);
            commands::compile::run(params.into());
        }
        Some(("decompile", m)) => {
            let params = DecompileParams::from_matches(m);
            commands::decompile::run(params.into());
        }
        Some(("dump", m)) => {
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into());
        }
        Some(("labels", m)) => {
            let params = LabelsParams::from_matches(m);
            commands::labels::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}

/// Library crates log through `log`; `RUST_LOG` picks the level (default warn).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
