//! The interactive read, validate, fetch, render loop.

use chrono::Utc;
use std::{future::Future, ops::ControlFlow, time::Duration};
use weather_lookup_core::{ValidationOutcome, WeatherProvider, WeatherQuery, validate};

use crate::{
    console::{Console, Input},
    render,
};

pub const CITY_PROMPT: &str = "🌍 Enter city name (or 'exit' to quit):";
pub const ACK_PROMPT: &str = "Press Enter to continue...";

/// Why the loop stopped. Every reason is a clean exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    ExitKeyword,
    Interrupted,
    EndOfInput,
}

/// Delays used by the cosmetic animations.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    pub startup_frame: Duration,
    pub fetch_frame: Duration,
    pub shutdown_frame: Duration,
    pub after_error: Duration,
    pub after_ack: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            startup_frame: Duration::from_millis(800),
            fetch_frame: Duration::from_millis(400),
            shutdown_frame: Duration::from_secs(1),
            after_error: Duration::from_secs(1),
            after_ack: Duration::from_millis(300),
        }
    }
}

#[cfg(test)]
impl Pacing {
    pub fn instant() -> Self {
        Self {
            startup_frame: Duration::ZERO,
            fetch_frame: Duration::ZERO,
            shutdown_frame: Duration::ZERO,
            after_error: Duration::ZERO,
            after_ack: Duration::ZERO,
        }
    }
}

pub struct Session<C, P> {
    console: C,
    provider: P,
    pacing: Pacing,
}

impl<C: Console, P: WeatherProvider> Session<C, P> {
    pub fn new(console: C, provider: P, pacing: Pacing) -> Self {
        Self { console, provider, pacing }
    }

    /// Run until the user leaves. Lookups are strictly one at a time.
    pub async fn run(&mut self) -> ExitReason {
        self.startup().await;

        loop {
            if let ControlFlow::Break(reason) = self.step().await {
                tracing::debug!(?reason, "session finished");
                return reason;
            }
        }
    }

    /// Like [`Session::run`], but stop as soon as `interrupt` resolves, even
    /// in the middle of a fetch or an animation.
    pub async fn run_until<F>(&mut self, interrupt: F) -> ExitReason
    where
        F: Future<Output = ()>,
    {
        let finished = tokio::select! {
            reason = self.run() => Some(reason),
            () = interrupt => None,
        };

        match finished {
            Some(reason) => reason,
            None => {
                self.say_interrupted();
                tracing::debug!("session interrupted");
                ExitReason::Interrupted
            }
        }
    }

    async fn step(&mut self) -> ControlFlow<ExitReason> {
        self.console.show(&render::banner());
        self.console.show("");

        let line = self.read(CITY_PROMPT).await?;

        match validate(&line) {
            Ok(ValidationOutcome::ExitRequested) => {
                self.shutdown().await;
                ControlFlow::Break(ExitReason::ExitKeyword)
            }
            Ok(ValidationOutcome::City(query)) => self.lookup(query).await,
            Err(err) => {
                tracing::debug!(input = %line.trim(), ?err, "rejected input");
                self.fail(&err.to_string()).await
            }
        }
    }

    async fn lookup(&mut self, query: WeatherQuery) -> ControlFlow<ExitReason> {
        self.console
            .animate("Fetching weather", 3, self.pacing.fetch_frame)
            .await;

        match self.provider.fetch(&query).await {
            Ok(report) => {
                self.console.show(&render::render_report(&report, Utc::now()));
                self.acknowledge().await
            }
            Err(err) => self.fail(&err.to_string()).await,
        }
    }

    async fn fail(&mut self, message: &str) -> ControlFlow<ExitReason> {
        self.console.show(&render::render_failure(message));
        self.console.sleep(self.pacing.after_error).await;
        self.acknowledge().await
    }

    async fn acknowledge(&mut self) -> ControlFlow<ExitReason> {
        self.console.show("");
        self.read(ACK_PROMPT).await?;
        self.console.sleep(self.pacing.after_ack).await;
        ControlFlow::Continue(())
    }

    /// Read one line, turning interrupt and end of input into a loop exit.
    async fn read(&mut self, prompt: &str) -> ControlFlow<ExitReason, String> {
        match self.console.read_line(prompt).await {
            Input::Line(line) => ControlFlow::Continue(line),
            Input::Interrupted => {
                self.say_interrupted();
                ControlFlow::Break(ExitReason::Interrupted)
            }
            Input::Closed => ControlFlow::Break(ExitReason::EndOfInput),
        }
    }

    fn say_interrupted(&mut self) {
        self.console.show(&format!("\n\n{}\n", render::INTERRUPT_FAREWELL));
    }

    async fn startup(&mut self) {
        for i in 0..3 {
            self.console.show(&format!(" Starting{}", ".".repeat(i + 1)));
            self.console.sleep(self.pacing.startup_frame).await;
            self.console.clear();
        }
    }

    async fn shutdown(&mut self) {
        for i in 0..3 {
            self.console.show(&format!("Exiting{}", ".".repeat(i + 1)));
            self.console.sleep(self.pacing.shutdown_frame).await;
            self.console.clear();
        }
        self.console.show(&format!("{}\n", render::EXIT_FAREWELL));
    }
}
