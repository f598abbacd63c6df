use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use journey_check::clock::SystemClock;
use journey_check::domain::{JourneyParameters, ParamKey};
use journey_check::scenario::{JourneyOrchestrator, ScenarioContext};
use journey_check::tfl::{DEFAULT_BASE_URL, TflClient, TflConfig};
use journey_check::url_builder::UrlBuilder;
use journey_check::validate::{DEFAULT_FRESHNESS_TOLERANCE_MINS, ValidationConfig};

#[derive(Parser, Debug)]
#[command(name = "journey-check")]
#[command(about = "Plan a journey with the TfL API and validate the result.", long_about = None)]
struct Cli {
    /// Where the journey starts (free text, postcode, or stop id).
    from: String,
    /// Where the journey ends.
    to: String,
    /// Journey preference, e.g. "leasttime".
    #[arg(long)]
    preference: Option<String>,
    /// Extra query parameter as key=value; may be repeated.
    #[arg(long = "param", value_parser = parse_param)]
    params: Vec<(ParamKey, String)>,
    /// How far before the request the fastest journey may start.
    #[arg(long, default_value_t = DEFAULT_FRESHNESS_TOLERANCE_MINS)]
    tolerance_mins: u32,
    /// API base URL.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Application key (or set TFL_APP_KEY).
    #[arg(long)]
    app_key: Option<String>,
    /// Don't probe the API root before planning.
    #[arg(long)]
    skip_availability: bool,
}

fn parse_param(raw: &str) -> Result<(ParamKey, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty parameter name in {raw:?}"));
    }
    Ok((ParamKey::parse(key), value.trim().to_string()))
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("journey_check=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("journey check failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = TflConfig::new().with_base_url(&cli.base_url);
    if let Some(key) = cli.app_key.or_else(|| std::env::var("TFL_APP_KEY").ok()) {
        config = config.with_app_key(key);
    }
    let client = TflClient::new(config)?;
    let urls = UrlBuilder::new(&cli.base_url)?;

    if !cli.skip_availability {
        if !client.is_available().await? {
            return Err(format!("{} is not available", client.base_url()).into());
        }
        info!(base_url = client.base_url(), "API available");
    }

    let mut parameters = JourneyParameters::new();
    for (key, value) in cli.params {
        parameters.set(key, value);
    }
    if let Some(preference) = cli.preference {
        parameters.set(ParamKey::JourneyPreference, preference);
    }

    let mut ctx = ScenarioContext::new(cli.from, cli.to).with_parameters(parameters);
    let clock = SystemClock;
    let orchestrator = JourneyOrchestrator::new(&client, &urls, &clock);
    let validation = ValidationConfig::new(cli.tolerance_mins);

    let journeys = orchestrator.plan_and_validate(&mut ctx, &validation).await?;
    let fastest = journeys.fastest();

    println!("From: {}", ctx.canonical_origin());
    println!("To:   {}", ctx.canonical_destination());
    let arrival = fastest
        .arrival
        .or_else(|| fastest.start.checked_add_signed(fastest.duration()))
        .map_or_else(|| "?".to_string(), |t| t.format("%H:%M").to_string());
    println!(
        "{} journeys; fastest takes {} min, leaving {} and arriving {}",
        journeys.itineraries.len(),
        fastest.duration_mins,
        fastest.start.format("%Y-%m-%d %H:%M"),
        arrival,
    );
    match fastest.disrupted_legs() {
        0 => {}
        n => println!("{n} of {} legs disrupted", fastest.legs.len()),
    }
    for leg in &fastest.legs {
        let flag = if leg.is_disrupted { " (disrupted)" } else { "" };
        println!("  {:>3} min  {}{}", leg.duration_mins, leg.summary, flag);
    }

    Ok(())
}
