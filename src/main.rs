use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use fillgrid::{find_fill, load_template, load_word_list, render_grid, SolverConfig};

/// Fill a crossword grid with words from a word list.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Grid structure file: `_` or `.` for open cells, `#` for blocks
    structure: PathBuf,

    /// Word list file, one word per line
    words: PathBuf,

    /// Also write the filled grid to this file
    output: Option<PathBuf>,

    /// Don't use the same word in more than one slot
    #[arg(short, long)]
    distinct: bool,
}

fn main() -> ExitCode {
    fillgrid::logging::init_logger(std::env::var("FILLGRID_DEBUG").is_ok());

    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let template = load_template(&cli.structure)?;
    let word_list = load_word_list(&cli.words)?;
    let graph = template.constraint_graph()?;
    log::debug!("{} slots, {} words", graph.slot_count(), word_list.len());

    let config = SolverConfig { distinct_words: cli.distinct, ..SolverConfig::default() };

    match find_fill(&graph, &word_list, &config) {
        Ok(result) => {
            log::info!("{:?}", result.statistics);

            let display_grid = render_grid(&template, &graph, &word_list, &result.assignment);
            println!("{}", display_grid);

            if let Some(output) = &cli.output {
                fs::write(output, display_grid + "\n")?;
                log::info!("written grid to {}", output.display());
            }
        }
        Err(failure) => {
            log::info!("fill failed: {}", failure);
            println!("No solution.");
        }
    }

    Ok(())
}
