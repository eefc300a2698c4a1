//! tripwise - travel recommendations from the command line
//!
//! Entry point for the tripwise application.

use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;
use tripwise::cli::{AskArgs, Cli, Commands, ConfigCommands, LoginArgs, RecommendArgs};
use tripwise::config::Config;
use tripwise::error::exit_code;
use tripwise::models::AssistantResult;
use tripwise::{CredentialStore, TravelClient, TripwiseError};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Configuration decides where logs go, so it is loaded first
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(e.exit_code() as u8);
        }
    };

    if let Err(e) = config.logging.init(cli.requested_log_level()) {
        eprintln!("{}", e);
        return ExitCode::from(exit_code::GENERAL_ERROR as u8);
    }

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = %e.code(), "{}", e);
            if e.requires_login() {
                eprintln!("Run `tripwise login --token <TOKEN>` to sign in.");
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// Main application logic.
fn run(cli: &Cli, config: &Config) -> tripwise::Result<()> {
    match &cli.command {
        Commands::Config(subcmd) => return cmd_config(cli, config, subcmd),
        Commands::Login(args) => return cmd_login(config, args),
        Commands::Logout => return cmd_logout(config),
        _ => {}
    }

    let client = TravelClient::from_config(config)?;
    tracing::debug!(client = ?client, "Created API client");

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| TripwiseError::config_with_source("Failed to create async runtime", e))?;

    runtime.block_on(async {
        match &cli.command {
            Commands::Ask(args) => cmd_ask(cli, &client, args).await,
            Commands::Whoami => cmd_whoami(cli, &client).await,
            Commands::Recommend(args) => cmd_recommend(cli, &client, args).await,
            Commands::History => cmd_history(cli, &client).await,
            Commands::Config(_) | Commands::Login(_) | Commands::Logout => Ok(()),
        }
    })
}

/// Handle the `ask` command.
async fn cmd_ask(cli: &Cli, client: &TravelClient, args: &AskArgs) -> tripwise::Result<()> {
    let prompt = args.prompt();
    tracing::info!(prompt = %prompt, "Asking the travel assistant");

    let result = client.fetch_assistant_response(&prompt).await?;
    if cli.json {
        return print_json(&result);
    }

    match &result {
        AssistantResult::Itinerary {
            country,
            cities,
            itinerary,
            ..
        } => {
            if let Some(country) = country {
                println!("Country: {}", country);
            }
            if let Some(cities) = cities {
                println!("Cities: {}", cities.join(", "));
            }
            for day in itinerary.iter().flatten() {
                let heading = day.title.as_deref().or(day.city.as_deref()).unwrap_or("");
                println!("\nDay {} {}", day.day, heading);
                for activity in day.activities.iter().flatten() {
                    println!("  - {}", activity);
                }
            }
        }
        AssistantResult::Places {
            location,
            category,
            places,
            ..
        } => {
            println!(
                "{} in {}",
                category.as_deref().unwrap_or("Places"),
                location.as_deref().unwrap_or("your destination")
            );
            for place in places.iter().flatten() {
                match place.rating {
                    Some(rating) => println!("  - {} ({:.1})", place.name, rating),
                    None => println!("  - {}", place.name),
                }
                if let Some(description) = &place.description {
                    println!("    {}", description);
                }
            }
        }
        AssistantResult::Unsupported { .. } | AssistantResult::General { .. } => {
            println!("{}", result.message().unwrap_or_default());
        }
        AssistantResult::Error { message, raw, .. } => {
            println!(
                "The assistant failed: {}",
                message.as_deref().unwrap_or("no details")
            );
            if let Some(raw) = raw {
                tracing::debug!(raw = %raw, "Raw assistant output");
            }
        }
    }

    Ok(())
}

/// Handle the `whoami` command.
async fn cmd_whoami(cli: &Cli, client: &TravelClient) -> tripwise::Result<()> {
    let user = client.fetch_current_user().await?;
    if cli.json {
        return print_json(&user);
    }

    println!("ID: {}", user.id);
    println!("Name: {}", user.name.as_deref().unwrap_or("-"));
    println!("Email: {}", user.email.as_deref().unwrap_or("-"));
    Ok(())
}

/// Handle the `recommend` command.
async fn cmd_recommend(
    cli: &Cli,
    client: &TravelClient,
    args: &RecommendArgs,
) -> tripwise::Result<()> {
    let result = client
        .fetch_personalized_recommendations(Some(args.top_k))
        .await?;
    if cli.json {
        return print_json(&result);
    }

    if let Some(summary) = &result.summary {
        println!("{}", summary);
    }
    if !result.search_queries.is_empty() {
        println!("Based on: {}", result.search_queries.join(", "));
    }
    println!();
    for (rank, item) in result.recommendations.iter().enumerate() {
        let place = [item.city.as_deref(), item.country.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");
        let mut line = format!("{:>2}. {}", rank + 1, item.name);
        if !place.is_empty() {
            line.push_str(&format!(" - {}", place));
        }
        if let Some(category) = &item.category {
            line.push_str(&format!(" [{}]", category));
        }
        if let Some(score) = item.score {
            line.push_str(&format!(" ({:.2})", score));
        }
        println!("{}", line);
        if let Some(description) = &item.description {
            println!("    {}", description);
        }
    }
    Ok(())
}

/// Handle the `history` command.
async fn cmd_history(cli: &Cli, client: &TravelClient) -> tripwise::Result<()> {
    let history = client.fetch_search_history().await?;
    if cli.json {
        return print_json(&history);
    }

    if history.is_empty() {
        println!("No searches yet");
        return Ok(());
    }

    for entry in &history {
        let when = entry
            .timestamp_utc()
            .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| entry.timestamp.clone());
        match &entry.response_type {
            Some(kind) => println!("{}  {} [{}]", when, entry.query, kind),
            None => println!("{}  {}", when, entry.query),
        }
    }
    Ok(())
}

/// Handle the `login` command.
fn cmd_login(config: &Config, args: &LoginArgs) -> tripwise::Result<()> {
    let store = config.credentials.store()?;
    store.set(&config.credentials.key, args.token.trim())?;

    tracing::info!(store = store.name(), path = %store.path().display(), "Saved credential");
    println!("Logged in");
    Ok(())
}

/// Handle the `logout` command.
fn cmd_logout(config: &Config) -> tripwise::Result<()> {
    let store = config.credentials.store()?;
    store.remove(&config.credentials.key)?;

    tracing::info!(store = store.name(), path = %store.path().display(), "Removed credential");
    println!("Logged out");
    Ok(())
}

/// Handle the `config` subcommand.
fn cmd_config(cli: &Cli, config: &Config, subcmd: &ConfigCommands) -> tripwise::Result<()> {
    match subcmd {
        ConfigCommands::Validate => {
            // load_config already validated the file
            println!("✓ Configuration is valid");
            tracing::debug!(?config, path = ?cli.config, "Validated configuration");
            Ok(())
        }
        ConfigCommands::Show => {
            let yaml = serde_yaml::to_string(config).map_err(|e| {
                TripwiseError::config_with_source("Failed to serialize configuration", e)
            })?;
            println!("{}", yaml);
            Ok(())
        }
    }
}

/// Load configuration and apply command-line overrides.
fn load_config(cli: &Cli) -> tripwise::Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;

    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
        config.validate()?;
    }

    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> tripwise::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
