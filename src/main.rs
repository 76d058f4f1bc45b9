//! fitcast binary entry point.

use std::io::{self, BufRead, Write};

use fitcast::advisor::{ActivityRequest, OutfitAdvisor};
use fitcast::cli::{Cli, Commands, RecommendArgs, WeatherArgs};
use fitcast::config::FitcastConfig;
use fitcast::error::FitError;
use fitcast::weather::{WeatherClient, WeatherLookup};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    let result = match FitcastConfig::load(cli.config.as_deref()) {
        Ok(config) => match cli.command {
            Commands::Recommend(args) => handle_recommend(config, args).await,
            Commands::Weather(args) => handle_weather(&config, args).await,
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "fitcast=debug" } else { "fitcast=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn handle_recommend(config: FitcastConfig, args: RecommendArgs) -> Result<(), FitError> {
    let config = match args.model {
        Some(model) => config.with_chat_model(model),
        None => config,
    };

    if args.location.is_none() || args.activity.is_none() {
        println!("Hi! Welcome to suggest a fit!");
        println!(
            "Just tell us where you're planning to go, and what you're planning to do, \
             and we'll do the rest. Feel free to speak in natural language!"
        );
    }
    let location = match args.location {
        Some(location) => location,
        None => ask("Please input a location: ")?,
    };
    let activity = match args.activity {
        Some(activity) => activity,
        None => ask("What activity are you planning on doing: ")?,
    };

    let request = ActivityRequest::new(location, activity)?;
    let advisor = OutfitAdvisor::from_config(&config)?;

    println!("User: {}\n---", request.prompt());
    let recommendation = advisor.recommend(&request).await?;
    println!("AI: {}\n---", recommendation.text);

    if args.illustrate {
        eprintln!("Generating illustration, this may take up to a minute...");
        let illustration = advisor.illustrate(&recommendation).await?;
        println!("Illustration: {}", illustration.url);
    }

    Ok(())
}

async fn handle_weather(config: &FitcastConfig, args: WeatherArgs) -> Result<(), FitError> {
    let report = WeatherClient::new(config).lookup(&args.location).await?;
    println!("{}", report.trim_end());
    Ok(())
}

fn ask(question: &str) -> Result<String, FitError> {
    println!("{question}");
    io::stdout()
        .flush()
        .map_err(|e| FitError::InvalidInput(format!("cannot write prompt: {e}")))?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| FitError::InvalidInput(format!("cannot read input: {e}")))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
