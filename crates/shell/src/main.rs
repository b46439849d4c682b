//! CLI for SSV-Tree, encoding the columns of comma-separated data sets.

mod commands;
mod logging;

use std::path::PathBuf;

use clap::Parser;

use commands::Commands;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The directory holding the data sets.
    #[arg(short('d'), long)]
    dir: PathBuf,

    /// The maximum level of messages written to the log file.
    #[arg(short('l'), long, default_value = "info")]
    log_level: logging::LogLevel,

    /// The subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), String> {
    let args = Args::parse();

    let (_guard, log_path) = logging::configure_logger("ssv", args.log_level)?;
    ftlog::info!("{args:?}");
    ftlog::info!("Log file: {log_path:?}");

    let source = ssv_tree::data::DataSource::new(&args.dir);

    match args.command {
        Commands::List => commands::data::list(&source)?,
        Commands::Columns { name } => commands::data::columns(&source, &name)?,
        Commands::Encode {
            name,
            column,
            out_path,
            parallel,
        } => commands::encode::encode(&source, &name, &column, out_path, parallel)?,
        Commands::Transform {
            name,
            keep,
            ordinal,
            one_hot,
            out_path,
        } => commands::transform::transform(&source, &name, &keep, &ordinal, &one_hot, out_path)?,
    }

    Ok(())
}
