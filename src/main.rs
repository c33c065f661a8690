use anyhow::Context;
use clap::Parser;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tenki_core::{App, AppError, ConfigError};
use tenki_forecast::{
    build_chart, today_in, ChartRequest, ChartView, ForecastProvider, ForecastService,
    LoadOutcome, RawForecastResponse,
};

mod cli;
mod render;

use cli::Cli;

const RETRY_HINT: &str = "Run `tenki --refresh` to try again.";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = tenki_core::init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    if let Err(e) = run(cli).await {
        tracing::error!("{}", e);
        eprintln!("{}", e.user_message());
        if e.is_retryable() {
            eprintln!("{}", RETRY_HINT);
        }
        std::process::exit(e.exit_code());
    }
}

/// Load config and stored preferences; any failure is a configuration error
fn load_app(config_path: Option<&Path>) -> Result<App, AppError> {
    App::from_config_path(config_path)
        .map_err(|e| ConfigError::Invalid(format!("{:#}", e)).into())
}

/// The response to chart, `None` when a newer load took over
fn ready_response(outcome: LoadOutcome) -> Result<Option<Arc<RawForecastResponse>>, AppError> {
    match outcome.into_result() {
        Some(result) => Ok(Some(result?)),
        None => {
            tracing::debug!("Forecast load superseded, nothing to show");
            Ok(None)
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let mut app = load_app(cli.config.as_deref())?;

    let prefs = cli.apply_to(app.prefs());
    app.set_prefs(prefs.clone());
    if let Err(e) = app.shutdown() {
        tracing::warn!("Failed to save preferences: {:#}", e);
    }

    let forecast = &app.config().forecast;
    let provider = ForecastProvider::new(
        &forecast.base_url,
        forecast.request_timeout(),
        &forecast.reference_timezone,
    )?;
    let service = ForecastService::new(provider, forecast.cache_ttl(), forecast.load_timeout());

    tracing::info!("Loading {} forecast for {}", prefs.period, prefs.city);
    let outcome = if cli.refresh {
        service.refresh(prefs.city, prefs.period).await
    } else {
        service.load(prefs.city, prefs.period).await
    };

    let Some(response) = ready_response(outcome)? else {
        return Ok(());
    };

    let reference_date = today_in(forecast.reference_zone());
    let request = ChartRequest {
        metrics: prefs.metrics,
        period: prefs.period,
        temp_unit: prefs.temp_unit,
        wind_unit: prefs.wind_unit,
    };
    let chart = build_chart(&response, &request, &reference_date);
    let view = ChartView::new(chart, request.period, &reference_date);

    let mut stdout = std::io::stdout().lock();
    if cli.json {
        let json = serde_json::to_string_pretty(&view).context("Failed to serialize chart")?;
        writeln!(stdout, "{}", json)?;
    } else {
        writeln!(stdout, "{}", prefs.city.name())?;
        write!(stdout, "{}", render::render_chart(&view))?;
    }

    Ok(())
}
