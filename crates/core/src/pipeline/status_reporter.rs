/// User-facing status channel for the scanner.
///
/// The host wires this to whatever UI it has; the scanner only reports
/// platform-level problems that leave it idle.
pub trait StatusReporter: Send {
    fn report(&mut self, message: &str);
}

/// Forwards status messages to the `log` facade.
pub struct LogStatusReporter;

impl StatusReporter for LogStatusReporter {
    fn report(&mut self, message: &str) {
        log::warn!("{message}");
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Arc, Mutex};

    use super::StatusReporter;

    /// Collects messages into a shared list the test can inspect.
    #[derive(Clone, Default)]
    pub(crate) struct RecordingReporter {
        pub(crate) messages: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingReporter {
        pub(crate) fn messages(&self) -> Vec<String> {
            self.messages.lock().unwrap().clone()
        }
    }

    impl StatusReporter for RecordingReporter {
        fn report(&mut self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }
}
