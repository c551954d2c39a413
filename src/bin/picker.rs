//! Command-line picker.
//!
//! Prompts for comma-separated languages, types and genres on stdin (Enter skips a
//! field) and prints one random recommendation from the Notion catalog.
//! Requires NOTION_API_KEY and NOTION_DATABASE_ID in the environment (.env supported).

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use watch_roulette::{
    config::Config,
    error::AppResult,
    models::{FilterOptions, FilterSelection, PickOutcome},
    render::text,
    services::{catalog::NotionClient, WatchRoulette},
};

fn prompt(
    input: &mut impl BufRead,
    output: &mut impl Write,
    message: &str,
) -> anyhow::Result<String> {
    write!(output, "{}", message).context("failed to write prompt")?;
    output.flush().context("failed to flush stdout")?;

    let mut line = String::new();
    input.read_line(&mut line).context("failed to read stdin")?;
    Ok(line)
}

fn print_hints(options: &FilterOptions) {
    let list = |tags: &[String]| {
        if tags.is_empty() {
            "—".to_string()
        } else {
            tags.join(", ")
        }
    };
    println!("Possible languages: {}", list(&options.languages));
    println!("Possible types: {}", list(&options.types));
    println!("Possible genres: {}", list(&options.genres));
}

/// Prints the pick result; false when the pick failed
fn report(
    result: &AppResult<PickOutcome>,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<bool> {
    match result {
        Ok(outcome) => {
            writeln!(out, "\n{}", text::outcome(outcome))?;
            Ok(true)
        }
        Err(e) => {
            writeln!(err, "{}", text::error(e))?;
            Ok(false)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::from_env()?;
    let roulette = WatchRoulette::new(
        Arc::new(NotionClient::from_config(&config)?),
        config.property_names(),
    );

    // Hints only; free-text entry works without them
    match roulette.filter_options().await {
        Ok(options) => print_hints(&options),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load filter options");
            eprintln!("Option hints unavailable: {}", e);
        }
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    let languages = prompt(
        &mut input,
        &mut output,
        "Languages (comma-separated, e.g. Chinese, Korean) or Enter to skip: ",
    )?;
    let types = prompt(&mut input, &mut output, "Types (comma-separated) or Enter to skip: ")?;
    let genres = prompt(
        &mut input,
        &mut output,
        "Genres (comma-separated, e.g. Romance, Thriller) or Enter to skip: ",
    )?;
    drop(input);

    let selection = FilterSelection::from_lines(&languages, &types, &genres);

    let result = roulette.pick(&selection).await;
    if report(&result, &mut output, &mut io::stderr())? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
