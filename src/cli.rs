// Author: kelexine (https://github.com/kelexine)
// cli.rs — CLI argument parsing via clap derive

use clap::Parser;

/// get-lines — count lines in the code files of a project
///
/// Walks a directory, keeps files that look like code, drops anything
/// excluded by `.gitignore`, and prints a table of line counts.
#[derive(Parser, Debug)]
#[command(
    name = "get-lines",
    version,
    about = "Count lines in code files, honoring .gitignore and tolerating odd encodings",
    after_help = "\
EXAMPLES:
  get-lines                      Analyse the current directory
  get-lines src/                 Analyse a specific directory
  get-lines --min 100            Only list files with at least 100 lines
  get-lines --flat-ignore        Apply every ancestor .gitignore pattern everywhere
  get-lines -e report.json       Also export the listed files to JSON
  get-lines -e report.csv        ... or CSV (.jsonl also supported)

SIZE CLASSES:
  Tiny < 100, Small 100-500, Medium 501-1000, Large > 1000 lines"
)]
pub struct Args {
    /// Directory to scan (default: current directory)
    #[arg(default_value = ".")]
    pub path: String,

    /// Hide files with fewer than this many lines from the report
    #[arg(long = "min", value_name = "LINES")]
    pub min: Option<usize>,

    /// Merge every ancestor .gitignore into one unscoped pattern list
    #[arg(long = "flat-ignore")]
    pub flat_ignore: bool,

    /// Count files on a single thread
    #[arg(long = "no-parallel")]
    pub no_parallel: bool,

    /// Export listed files to FILE (.json, .jsonl, or .csv)
    #[arg(short = 'e', long = "export", value_name = "FILE")]
    pub export: Option<String>,

    /// Print diagnostic logging to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}
