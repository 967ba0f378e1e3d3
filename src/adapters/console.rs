use crate::domain::ports::Reporter;
use std::sync::atomic::{AtomicU32, Ordering};

/// Prints notifications to the terminal and mirrors them into the log.
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    percent: AtomicU32,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for ConsoleReporter {
    fn info(&self, message: &str) {
        tracing::info!("✅ {}", message);
        println!("✅ {}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("❌ {}", message);
        eprintln!("❌ {}", message);
    }

    fn begin(&self, title: &str) {
        self.percent.store(0, Ordering::Relaxed);
        tracing::info!("⏳ {}", title);
        println!("⏳ {}", title);
    }

    fn report(&self, increment: u8, message: Option<&str>) {
        let step = u32::from(increment);
        let previous = self
            .percent
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |p| {
                Some((p + step).min(100))
            })
            .unwrap_or_else(|p| p);
        let percent = (previous + step).min(100);
        match message {
            Some(message) => println!("   [{:>3}%] {}", percent, message),
            None => println!("   [{:>3}%]", percent),
        }
    }

    fn finish(&self) {
        tracing::debug!("Progress finished at {}%", self.percent.load(Ordering::Relaxed));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_accumulates_caps_at_100_and_resets() {
        let reporter = ConsoleReporter::new();
        reporter.begin("Backing up: a.txt");
        reporter.report(0, Some("Starting..."));
        reporter.report(60, None);
        reporter.report(60, None);
        assert_eq!(reporter.percent.load(Ordering::Relaxed), 100);

        reporter.begin("again");
        assert_eq!(reporter.percent.load(Ordering::Relaxed), 0);
    }
}
