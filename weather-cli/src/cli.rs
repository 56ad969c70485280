use clap::Parser;
use weather_lookup_core::{Config, OpenWeatherClient};

use crate::{
    console::TerminalConsole,
    session::{ExitReason, Pacing, Session},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather",
    version,
    about = "Interactive current-weather lookup",
    long_about = "Interactive current-weather lookup.\n\n\
                  Reads the OpenWeather API key from the OPENWEATHER_API_KEY environment \
                  variable (or `api_key` in the config file). Type a city name at the \
                  prompt, or `exit` to quit."
)]
pub struct Cli {}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;
        let credential = config.credential();
        if credential.is_empty() {
            tracing::debug!("no API key configured; requests will be rejected");
        }

        let provider = OpenWeatherClient::new(credential)?;
        let mut session = Session::new(TerminalConsole::new(), provider, Pacing::default());

        let reason = session.run_until(interrupted()).await;
        tracing::debug!(?reason, "exiting");

        if reason == ExitReason::Interrupted {
            // A blocking stdin read may still be parked; don't wait for it.
            std::process::exit(0);
        }

        Ok(())
    }
}

/// Resolves on Ctrl-C. Never resolves if the handler can't be installed.
async fn interrupted() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "cannot listen for interrupts");
        std::future::pending::<()>().await;
    }
}
