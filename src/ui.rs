//! Terminal feedback while a job is being waited on.
//!
//! [`JobProgress`] draws an `indicatif` spinner on stderr and updates it with
//! every status the tracker observes. It never writes to stdout, which only
//! carries the verb's result line.

use std::time::Duration;

use console::Style;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::error::ControlError;
use crate::tracking::{Job, JobStatus, StatusObserver};

pub struct JobProgress {
    pb: ProgressBar,
    green: Style,
    red: Style,
    yellow: Style,
}

impl JobProgress {
    /// Start the spinner with an initial message.
    pub fn start(message: &str) -> Self {
        let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self {
            pb,
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
        }
    }

    /// A spinner that draws nothing (for `--quiet` style use and tests).
    pub fn hidden() -> Self {
        Self {
            pb: ProgressBar::hidden(),
            green: Style::new(),
            red: Style::new(),
            yellow: Style::new(),
        }
    }

    /// Clear the spinner and print a one-line summary to stderr.
    pub fn finish<T>(&self, result: &Result<T, ControlError>) {
        self.pb.finish_and_clear();
        if self.pb.is_hidden() {
            return;
        }
        match result {
            Ok(_) => eprintln!("  {} done", self.green.apply_to("✓")),
            Err(ControlError::TimedOut { .. } | ControlError::Cancelled { .. }) => {
                eprintln!("  {} gave up waiting", self.yellow.apply_to("…"))
            }
            Err(_) => eprintln!("  {} failed", self.red.apply_to("✗")),
        }
    }

    fn label(&self, job: &Job) -> String {
        let status = match &job.status {
            JobStatus::Pending | JobStatus::Running => {
                self.yellow.apply_to(job.status.to_string()).to_string()
            }
            JobStatus::Succeeded => self.green.apply_to(job.status.to_string()).to_string(),
            JobStatus::Failed(_) => self.red.apply_to(job.status.to_string()).to_string(),
        };
        match &job.description {
            Some(description) => format!("{description} [{}]: {status}", job.id),
            None => format!("job {}: {status}", job.id),
        }
    }
}

impl StatusObserver for JobProgress {
    fn observe(&self, job: &Job) {
        self.pb.set_message(self.label(job));
    }
}
