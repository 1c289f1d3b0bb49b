use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use ecomdash::{
    config::{Args, OutputFormat, Settings},
    dashboard::Dashboard,
    load,
    render::{JsonPresenter, Presenter, TextPresenter},
    session,
};
use std::io;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr) // stdout carries the dashboard itself
        .init();

    // ─── 2) resolve settings ─────────────────────────────────────────
    let settings = Settings::resolve(Args::parse())?;
    info!(data = %settings.data, format = ?settings.format, "startup");

    // ─── 3) load once ────────────────────────────────────────────────
    let table = load::load(&settings.data)?;
    let dashboard = Dashboard::new(table, settings.display);
    let range = dashboard.resolve_range(settings.start, settings.end, Utc::now().date_naive())?;

    // ─── 4) render ───────────────────────────────────────────────────
    let stdout = io::stdout();
    let mut presenter: Box<dyn Presenter> = match settings.format {
        OutputFormat::Text => Box::new(TextPresenter::new(stdout.lock())),
        OutputFormat::Json => Box::new(JsonPresenter::new(stdout.lock())),
    };

    if settings.interactive {
        if let Some(bounds) = dashboard.bounds() {
            info!(
                "enter `START END` between {} and {}, `all` to reset, `quit` to stop",
                bounds.min, bounds.max
            );
        }
        session::run(&dashboard, range, io::stdin().lock(), presenter.as_mut())?;
    } else {
        dashboard.render(range, presenter.as_mut())?;
    }

    info!("done");
    Ok(())
}
