mod cli;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use calcdeck::ai::{ExplainPanel, LlmExplainer};
use calcdeck::calculator::{copy_to_clipboard, evaluate_expression};
use calcdeck::config::Config;
use calcdeck::keypad::{Action, Keypad, parse_actions};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Command::Eval { expression, copy } => {
            run_eval(&expression, copy || config.calculator.copy_results)
        }
        Command::Keypad => run_keypad(config.calculator.copy_results),
        Command::Explain { formula } => run_explain(&formula.join(" "), &config),
        Command::Config => {
            print!("{}", config.to_toml()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Log to stderr so stdout only carries results.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "calcdeck=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_eval(expression: &str, copy: bool) -> Result<ExitCode> {
    let Some(result) = evaluate_expression(expression) else {
        info!(%expression, "nothing to evaluate");
        return Ok(ExitCode::SUCCESS);
    };

    println!("{}", result.display());

    if copy && let Some(text) = result.clipboard() {
        copy_to_clipboard(text)?;
    }

    Ok(if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_keypad(copy: bool) -> Result<ExitCode> {
    let mut keypad = Keypad::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        if matches!(line.trim(), "quit" | "exit") {
            break;
        }

        let actions = match parse_actions(&line) {
            Ok(actions) => actions,
            Err(err) => {
                eprintln!("{}", err);
                continue;
            }
        };

        let evaluated = actions.contains(&Action::Equals);
        for action in actions {
            keypad.apply(action);
        }

        writeln!(stdout, "  {}", keypad.history())?;
        writeln!(stdout, "= {}", keypad.display())?;
        stdout.flush()?;

        if copy
            && evaluated
            && let Some(text) = keypad.last_result().and_then(|result| result.clipboard())
            && let Err(err) = copy_to_clipboard(text)
        {
            warn!("{:#}", err);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn run_explain(formula: &str, config: &Config) -> Result<ExitCode> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let mut panel = ExplainPanel::new(formula);
    match LlmExplainer::from_config(&config.ai) {
        Ok(explainer) => runtime.block_on(panel.submit(&explainer)),
        Err(err) => panel.fail(err),
    }

    if let Some(message) = panel.error() {
        eprintln!("Error: {}", message);
        return Ok(ExitCode::FAILURE);
    }

    if let Some(explanation) = panel.explanation() {
        println!("Explanation:\n{}\n", explanation.explanation.trim());
        println!("Application area: {}", explanation.application_area.trim());
    }

    Ok(ExitCode::SUCCESS)
}
