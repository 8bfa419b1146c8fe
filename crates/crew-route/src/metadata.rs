/// Log the name and version of the running binary
pub fn log_version_info() {
    tracing::info!("{}", short_version_info());
    tracing::debug!(
        "Estimator library: crew-route-lib (profiling {})",
        if cfg!(feature = "profiling") {
            "enabled"
        } else {
            "disabled"
        }
    );
}

pub fn short_version_info() -> String {
    format!(
        "{} {}{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        if cfg!(debug_assertions) { " (debug)" } else { "" }
    )
}
