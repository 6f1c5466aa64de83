use std::io;
use std::process::ExitCode;
use wordle_weights::cli::{CliInterface, parse_cli};
use wordle_weights::game_state::{GameInterface, game_loop};
use wordle_weights::logging::init_logging;
use wordle_weights::tui::TuiWrapper;
use wordle_weights::wordbank::{Lexicon, LexiconSource};
use wordle_weights::{Result, SolverConfig, SolverError};

fn run() -> Result<()> {
    let cli = parse_cli();
    if let Some(path) = init_logging(cli.verbose, cli.tui || cli.log_file) {
        log::info!("Logging to {}", path.display());
    }

    let config = cli.solver_config()?;
    let lexicon = Lexicon::load(
        cli.wordbank_path.as_deref(),
        cli.source_path.as_deref(),
        cli.language,
        config.puzzle_size,
    )?;
    log::info!(
        "Loaded {} words, {} frequency source words",
        lexicon.len(),
        lexicon.frequency_source().len()
    );

    if cli.tui {
        let mut interface = TuiWrapper::new(config.puzzle_size, config.top_k).map_err(|e| {
            SolverError::Configuration(format!("cannot start the terminal interface: {e}"))
        })?;
        play(&lexicon, &config, &mut interface);
    } else {
        println!("Loaded {} words.", lexicon.len());
        let mut interface = CliInterface::new(io::stdin().lock(), config.top_k);
        play(&lexicon, &config, &mut interface);
    }
    Ok(())
}

fn play(lexicon: &Lexicon, config: &SolverConfig, interface: &mut dyn GameInterface) {
    let outcomes = game_loop(lexicon, config, interface);
    log::info!("Sessions finished: {outcomes:?}");
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
