use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use lazy_static::lazy_static;

// sqlx logs every statement at info, keep it quiet unless LOG_LEVEL asks for it
const DEFAULT_FILTER: &str = "info,sqlx=warn";

lazy_static! {
    pub static ref QUIZ_QUESTIONS_CNTR: IntCounterVec = register_int_counter_vec!(
        "quiz_questions_served_total",
        "Number of questions handed out by the quiz endpoint",
        &["category"]
    )
    .unwrap();
    pub static ref QUESTIONS_CREATED_CNTR: IntCounter = register_int_counter!(
        "questions_created_total",
        "Number of questions added through the API"
    )
    .unwrap();
}

/// Installs the global subscriber. Fails on a malformed `LOG_LEVEL` or when a
/// subscriber is already set.
pub fn init_tracing() -> anyhow::Result<()> {
    let span_events = match std::env::var("INCLUDE_SPAN_EVENTS") {
        Ok(value) if value.eq_ignore_ascii_case("true") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::NONE,
    };
    let filter_layer = match std::env::var("LOG_LEVEL") {
        Ok(directives) => EnvFilter::try_new(directives)?,
        Err(_) => EnvFilter::new(DEFAULT_FILTER),
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_span_events(span_events))
        .try_init()?;
    Ok(())
}
