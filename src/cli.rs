use std::path::PathBuf;

use clap::{Args, Parser};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Build a SQLite init script from the movie, rating, tag and user files",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub generate: GenerateArgs,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Directory holding movies.csv, ratings.csv, tags.csv and users.txt
    /// (defaults to the directory of the executable)
    #[arg(short = 'd', long = "data-dir")]
    pub data_dir: Option<PathBuf>,
    /// Destination script (defaults to <data-dir>/db_init.sql, '-' for stdout)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Character encoding of the input files (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}
