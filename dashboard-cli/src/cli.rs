use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use dashboard_core::{Config, DashboardSnapshot, ViewModel, providers_from_config};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};

use crate::render::Dashboard;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dash", version, about = "Weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the API key and provider endpoints.
    Configure,

    /// Fetch current weather and the forecast once, then print the dashboard.
    Show {
        /// Location name; defaults to the configured default location.
        location: Option<String>,

        /// Forecast start date (YYYY-MM-DD); defaults to today.
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// Print the snapshot as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Interactive dashboard: search locations until you quit.
    Watch {
        /// Location shown first; defaults to the configured default location.
        location: Option<String>,
    },
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got '{value}': {e}"))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show {
                location,
                date,
                json,
            } => show(location, date, json).await,
            Command::Watch { location } => watch(location).await,
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load_file()?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key.trim().to_string());
    }

    config.default_location = Text::new("Default location:")
        .with_default(&config.default_location)
        .prompt()
        .context("Failed to read default location")?;

    config.forecast_endpoint = Text::new("Forecast endpoint:")
        .with_default(&config.forecast_endpoint)
        .prompt()
        .context("Failed to read forecast endpoint")?;

    config.forecast_location = Text::new("Forecast location label:")
        .with_default(&config.forecast_location)
        .prompt()
        .context("Failed to read forecast location")?;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

fn mount(location: Option<String>, date: NaiveDate) -> Result<ViewModel> {
    let config = Config::load()?;
    let providers = providers_from_config(&config)?;

    let location = location.unwrap_or_else(|| config.default_location.clone());
    tracing::debug!(location = %location, %date, "starting dashboard");

    let mut vm = ViewModel::new(providers, config.forecast_location);
    vm.mount(&location, date);

    Ok(vm)
}

async fn show(location: Option<String>, date: Option<NaiveDate>, json: bool) -> Result<()> {
    let mut vm = mount(location, date.unwrap_or_else(today))?;
    vm.settle().await;

    let snapshot = vm.snapshot();
    if json {
        let text =
            serde_json::to_string_pretty(&snapshot).context("Failed to serialize snapshot")?;
        println!("{text}");
    } else {
        print!("{}", Dashboard(&snapshot));
    }

    Ok(())
}

enum Input {
    Search(String),
    Refresh,
    Quit,
}

fn parse_input(line: &str) -> Input {
    match line.trim() {
        ":q" | ":quit" => Input::Quit,
        ":r" | ":refresh" => Input::Refresh,
        other => Input::Search(other.to_string()),
    }
}

/// Draw the dashboard now, then again after every outcome that changes it,
/// until neither source is loading.
async fn draw_until_settled(vm: &mut ViewModel, mut draw: impl FnMut(&DashboardSnapshot)) {
    draw(&vm.snapshot());
    while vm.next_update().await {
        draw(&vm.snapshot());
    }
}

async fn watch(location: Option<String>) -> Result<()> {
    let mut vm = mount(location, today())?;

    loop {
        draw_until_settled(&mut vm, |snapshot| print!("{}", Dashboard(snapshot))).await;

        let line = tokio::task::spawn_blocking(|| {
            Text::new("Search location:")
                .with_help_message(":r to refresh, :q to quit")
                .prompt()
        })
        .await
        .context("Prompt task failed")?;

        let line = match line {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read search input"),
        };

        match parse_input(&line) {
            Input::Quit => break,
            Input::Refresh => {
                vm.refresh_current();
                vm.refresh_forecast(today());
            }
            Input::Search(query) => {
                vm.submit_search(&query);
            }
        }
    }

    Ok(())
}
