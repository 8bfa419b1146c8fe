//! Crew Route - Command-Line Front End
//!
//! Reads a day's crew routes from JSON, estimates them with `crew-route-lib` and renders
//! a report as text or JSON.

pub mod logging;
mod metadata;
mod report;
pub mod settings;

pub use metadata::{log_version_info, short_version_info};
pub use settings::{OutputFormat, Settings};

use crew_route_lib::{DispatchBoard, RouteError, RouteInput};

/// Error types for the command-line front end
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid route file: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("No route for crew {0:?}")]
    UnknownCrew(String),

    #[error("Failed to render report: {0}")]
    Format(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;

/// Read the input file named in `settings` and render the report
pub fn run(settings: &Settings) -> Result<String> {
    #[cfg(feature = "profiling")]
    profiling::scope!("cli::run");

    let json = std::fs::read_to_string(&settings.input).map_err(|source| CliError::Io {
        path: settings.input.display().to_string(),
        source,
    })?;
    run_with_json(&json, settings)
}

/// Estimate the routes in `json` and render the report
pub fn run_with_json(json: &str, settings: &Settings) -> Result<String> {
    let inputs: Vec<RouteInput> = serde_json::from_str(json)?;
    tracing::info!(routes = inputs.len(), "Loaded crew routes");

    let mut board = DispatchBoard::new(settings.config());
    board.add_routes_parallel(inputs)?;

    let routes = match &settings.crew {
        Some(crew) => vec![
            board
                .find_crew(crew)
                .ok_or_else(|| CliError::UnknownCrew(crew.clone()))?,
        ],
        None => board.routes().iter().collect(),
    };
    let reports = routes
        .into_iter()
        .map(|route| route.report())
        .collect::<std::result::Result<Vec<_>, _>>()?;

    match settings.format {
        OutputFormat::Text => Ok(report::render_text(&reports, &board.get_info())?),
        OutputFormat::Json => report::render_json(&reports, &board.get_info()),
    }
}
