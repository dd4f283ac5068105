use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::cell::RefCell;
use std::time::Duration;

const TICK_INTERVAL: Duration = Duration::from_millis(80);

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// This adapter implements the ProgressReporter port with an indicatif
/// spinner, so stdout stays clean for the query result. indicatif hides the
/// spinner when stderr is not a terminal.
pub struct StderrProgressReporter {
    spinner: RefCell<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: RefCell::new(None),
        }
    }

    fn get_or_create_spinner(&self) -> ProgressBar {
        let mut spinner_option = self.spinner.borrow_mut();
        if let Some(spinner) = spinner_option.as_ref() {
            return spinner.clone();
        }

        let spinner = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(TICK_INTERVAL);
        *spinner_option = Some(spinner.clone());
        spinner
    }

    fn clear(&self) {
        if let Some(spinner) = self.spinner.borrow_mut().take() {
            spinner.finish_and_clear();
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        self.get_or_create_spinner().set_message(message.to_string());
    }

    fn report_warning(&self, message: &str) {
        let spinner = self.spinner.borrow();
        match spinner.as_ref() {
            Some(spinner) => spinner.suspend(|| eprintln!("⚠️  {}", message)),
            None => eprintln!("⚠️  {}", message),
        }
    }

    fn report_completion(&self, message: &str) {
        self.clear();
        tracing::debug!("{}", message);
    }
}
