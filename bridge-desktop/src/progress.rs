//! Terminal Progress Indicators
//!
//! Each indicator is a small actor: a spawned task owns an
//! [`indicatif::ProgressBar`] and applies the commands it receives over an
//! unbounded channel, so `update` never waits on drawing. indicatif redraws on
//! a steady tick. `finish` sends `Stop` and awaits the task, which clears the
//! line before exiting; nothing is drawn for the indicator afterwards.

use async_trait::async_trait;
use bridge_traits::progress::{ProgressDisplay, ProgressMode, ProgressSink};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::{self, IsTerminal};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::debug;

/// Redraw cadence
pub const REDRAW_INTERVAL: Duration = Duration::from_millis(100);

const SPINNER_TEMPLATE: &str = "{msg} {spinner}";
const BAR_TEMPLATE: &str = "{msg} [{bar:30}] {pos}/{len} ({percent}%)";
const SPINNER_FRAMES: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ";
const BAR_CHARS: &str = "█░";

/// Messages accepted by an indicator task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProgressCommand {
    Update { current: usize, total: usize },
    Stop,
}

/// Where indicators are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DrawTarget {
    Stdout,
    Hidden,
}

impl DrawTarget {
    fn build(self) -> ProgressDrawTarget {
        match self {
            DrawTarget::Stdout => ProgressDrawTarget::stdout(),
            DrawTarget::Hidden => ProgressDrawTarget::hidden(),
        }
    }
}

fn style_for(mode: ProgressMode) -> ProgressStyle {
    match mode {
        ProgressMode::Spinner => ProgressStyle::with_template(SPINNER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(SPINNER_FRAMES),
        ProgressMode::Bar { .. } => ProgressStyle::with_template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars(BAR_CHARS),
    }
}

fn new_bar(message: &str, mode: ProgressMode, target: ProgressDrawTarget) -> ProgressBar {
    let length = match mode {
        ProgressMode::Spinner => None,
        ProgressMode::Bar { total } => Some(total as u64),
    };
    let bar = ProgressBar::with_draw_target(length, target);
    bar.set_style(style_for(mode));
    bar.set_message(message.to_string());
    bar.enable_steady_tick(REDRAW_INTERVAL);
    bar
}

async fn run_indicator(
    bar: ProgressBar,
    mode: ProgressMode,
    mut commands: UnboundedReceiver<ProgressCommand>,
) {
    while let Some(command) = commands.recv().await {
        match command {
            ProgressCommand::Update { current, total } => {
                if let ProgressMode::Bar { .. } = mode {
                    bar.set_length(total as u64);
                }
                bar.set_position(current as u64);
            }
            ProgressCommand::Stop => break,
        }
    }

    bar.finish_and_clear();
    debug!(position = bar.position(), "Progress indicator stopped");
}

/// Handle to a running indicator
struct IndicatorHandle {
    commands: UnboundedSender<ProgressCommand>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl IndicatorHandle {
    fn spawn(bar: ProgressBar, mode: ProgressMode) -> Self {
        let (commands, receiver) = unbounded_channel();
        let task = tokio::spawn(run_indicator(bar, mode, receiver));
        Self {
            commands,
            task: Mutex::new(Some(task)),
        }
    }
}

#[async_trait]
impl ProgressSink for IndicatorHandle {
    fn update(&self, current: usize, total: usize) {
        // The task only goes away after Stop, so a send error means finished
        let _ = self.commands.send(ProgressCommand::Update { current, total });
    }

    async fn finish(&self) {
        let _ = self.commands.send(ProgressCommand::Stop);
        let task = self
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = task {
            let _ = task.await;
        }
    }
}

/// Progress display drawing spinners and bars on a terminal
///
/// Must be used from within a Tokio runtime.
#[derive(Debug, Clone, Copy)]
pub struct TerminalProgress {
    target: DrawTarget,
}

impl TerminalProgress {
    /// Draw on standard output, or nowhere when stdout is not a terminal
    pub fn stdout() -> Self {
        if io::stdout().is_terminal() {
            Self {
                target: DrawTarget::Stdout,
            }
        } else {
            Self::hidden()
        }
    }

    /// Track progress without drawing anything
    pub fn hidden() -> Self {
        Self {
            target: DrawTarget::Hidden,
        }
    }
}

impl Default for TerminalProgress {
    fn default() -> Self {
        Self::stdout()
    }
}

impl ProgressDisplay for TerminalProgress {
    fn start(&self, message: &str, mode: ProgressMode) -> Box<dyn ProgressSink> {
        let bar = new_bar(message, mode, self.target.build());
        Box::new(IndicatorHandle::spawn(bar, mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hidden_bar(mode: ProgressMode) -> ProgressBar {
        new_bar("Checking albums in library...", mode, ProgressDrawTarget::hidden())
    }

    #[tokio::test]
    async fn test_updates_move_the_bar() {
        let bar = hidden_bar(ProgressMode::Bar { total: 4 });
        let handle = IndicatorHandle::spawn(bar.clone(), ProgressMode::Bar { total: 4 });

        handle.update(1, 4);
        handle.update(3, 4);
        handle.finish().await;

        assert_eq!(bar.position(), 3);
        assert!(bar.is_finished());
    }

    #[tokio::test]
    async fn test_finish_clears_without_updates() {
        let bar = hidden_bar(ProgressMode::Spinner);
        let handle = IndicatorHandle::spawn(bar.clone(), ProgressMode::Spinner);

        handle.finish().await;

        assert!(bar.is_finished());
        assert_eq!(bar.position(), 0);
    }

    #[tokio::test]
    async fn test_updates_after_finish_are_ignored() {
        let bar = hidden_bar(ProgressMode::Bar { total: 2 });
        let handle = IndicatorHandle::spawn(bar.clone(), ProgressMode::Bar { total: 2 });

        handle.update(1, 2);
        handle.finish().await;
        handle.update(2, 2);
        handle.finish().await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(bar.position(), 1);
    }

    #[tokio::test]
    async fn test_empty_bar_finishes() {
        let bar = hidden_bar(ProgressMode::Bar { total: 0 });
        let handle = IndicatorHandle::spawn(bar.clone(), ProgressMode::Bar { total: 0 });

        handle.update(0, 0);
        handle.finish().await;

        assert!(bar.is_finished());
    }

    #[tokio::test]
    async fn test_hidden_display_runs_both_phases() {
        let display = TerminalProgress::hidden();

        let spinner = display.start("Fetching Last.fm top albums...", ProgressMode::Spinner);
        spinner.finish().await;

        let bar = display.start("Checking albums in library...", ProgressMode::Bar { total: 3 });
        bar.update(1, 3);
        bar.update(3, 3);
        bar.finish().await;
    }

    #[test]
    fn test_templates_parse() {
        assert!(ProgressStyle::with_template(SPINNER_TEMPLATE).is_ok());
        assert!(ProgressStyle::with_template(BAR_TEMPLATE).is_ok());
    }
}
