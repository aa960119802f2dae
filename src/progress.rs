use std::{cell::RefCell, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{info, success, warning};

/// Receives progress and status messages from long-running operations.
///
/// The collector reports through this trait instead of branching on a
/// silent flag: a console implementation draws spinners and prints status
/// lines, the silent implementation drops everything.
pub trait ProgressReporter {
    /// Starts a task. `total` is `None` when the amount of work is not yet known.
    fn begin(&self, message: &str, total: Option<u64>);
    fn advance(&self, delta: u64);
    fn finish(&self);

    fn info(&self, message: &str);
    fn success(&self, message: &str);
    fn warning(&self, message: &str);
}

pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn begin(&self, _message: &str, _total: Option<u64>) {}
    fn advance(&self, _delta: u64) {}
    fn finish(&self) {}
    fn info(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
    fn warning(&self, _message: &str) {}
}

#[derive(Default)]
pub struct ConsoleReporter {
    bar: RefCell<Option<ProgressBar>>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.blue} {msg} [{bar:30.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .progress_chars("=> ")
    }

    /// Runs `print` with the active bar suspended so status lines do not
    /// interleave with the spinner.
    fn print_line(&self, print: impl FnOnce()) {
        match self.bar.borrow().as_ref() {
            Some(pb) => pb.suspend(print),
            None => print(),
        }
    }
}

impl ProgressReporter for ConsoleReporter {
    fn begin(&self, message: &str, total: Option<u64>) {
        let pb = match total {
            Some(len) => {
                let pb = ProgressBar::new(len);
                pb.set_style(Self::bar_style());
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(Self::spinner_style());
                pb
            }
        };
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Some(previous) = self.bar.replace(Some(pb)) {
            previous.finish_and_clear();
        }
    }

    fn advance(&self, delta: u64) {
        if let Some(pb) = self.bar.borrow().as_ref() {
            pb.inc(delta);
        }
    }

    fn finish(&self) {
        if let Some(pb) = self.bar.take() {
            pb.finish_and_clear();
        }
    }

    fn info(&self, message: &str) {
        self.print_line(|| info!("{}", message));
    }

    fn success(&self, message: &str) {
        self.print_line(|| success!("{}", message));
    }

    fn warning(&self, message: &str) {
        self.print_line(|| warning!("{}", message));
    }
}

pub fn reporter_for(silent: bool) -> Box<dyn ProgressReporter> {
    if silent {
        Box::new(SilentReporter)
    } else {
        Box::new(ConsoleReporter::new())
    }
}
