use std::time::{Duration, Instant};

use crate::pipeline::status_reporter::StatusReporter;
use crate::shared::constants::PERMISSION_TIMEOUT_SECS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    Pending,
}

/// Platform camera permission query.
pub trait CameraPermission: Send {
    fn status(&mut self) -> PermissionStatus;
}

/// Permission source for hosts that need no runtime grant (files, tests).
pub struct AlwaysGranted;

impl CameraPermission for AlwaysGranted {
    fn status(&mut self) -> PermissionStatus {
        PermissionStatus::Granted
    }
}

/// Monotonic time source. Only differences between readings matter.
pub trait Clock: Send {
    fn now(&self) -> Duration;
}

pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateState {
    Waiting,
    Open,
    Failed,
}

/// Holds the scanner back until camera permission is granted.
///
/// Polled once per frame callback. The deadline starts at the first poll;
/// denial or timeout is reported once and the gate then stays failed.
pub struct StartupGate {
    permission: Box<dyn CameraPermission>,
    clock: Box<dyn Clock>,
    timeout: Duration,
    deadline: Option<Duration>,
    state: GateState,
}

impl StartupGate {
    pub fn new(
        permission: Box<dyn CameraPermission>,
        clock: Box<dyn Clock>,
        timeout: Duration,
    ) -> Self {
        Self {
            permission,
            clock,
            timeout,
            deadline: None,
            state: GateState::Waiting,
        }
    }

    /// Gate with the default permission timeout on the system clock.
    pub fn with_default_timeout(permission: Box<dyn CameraPermission>) -> Self {
        Self::new(
            permission,
            Box::new(MonotonicClock::new()),
            Duration::from_secs(PERMISSION_TIMEOUT_SECS),
        )
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn poll(&mut self, reporter: &mut dyn StatusReporter) -> GateState {
        if self.state != GateState::Waiting {
            return self.state;
        }
        let now = self.clock.now();
        let deadline = *self.deadline.get_or_insert(now + self.timeout);

        match self.permission.status() {
            PermissionStatus::Granted => {
                log::info!("Camera permission granted");
                self.state = GateState::Open;
            }
            PermissionStatus::Denied => {
                reporter.report("Camera permission denied");
                self.state = GateState::Failed;
            }
            PermissionStatus::Pending if now >= deadline => {
                reporter.report(&format!(
                    "Timed out after {:.0}s waiting for camera permission",
                    self.timeout.as_secs_f64()
                ));
                self.state = GateState::Failed;
            }
            PermissionStatus::Pending => {}
        }
        self.state
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{ManualClock, ScriptedPermission};
    use super::*;
    use crate::pipeline::status_reporter::test_support::RecordingReporter;

    fn gate(permission: &ScriptedPermission, clock: &ManualClock) -> StartupGate {
        StartupGate::new(
            Box::new(permission.clone()),
            Box::new(clock.clone()),
            Duration::from_secs(10),
        )
    }

    #[test]
    fn test_granted_opens_immediately() {
        let mut reporter = RecordingReporter::default();
        let mut gate = StartupGate::with_default_timeout(Box::new(AlwaysGranted));
        assert_eq!(gate.poll(&mut reporter), GateState::Open);
        assert!(reporter.messages().is_empty());
    }

    #[test]
    fn test_pending_then_granted() {
        let permission = ScriptedPermission::new(PermissionStatus::Pending);
        let clock = ManualClock::default();
        let mut reporter = RecordingReporter::default();
        let mut gate = gate(&permission, &clock);

        assert_eq!(gate.poll(&mut reporter), GateState::Waiting);
        clock.advance(Duration::from_secs(9));
        assert_eq!(gate.poll(&mut reporter), GateState::Waiting);

        permission.set(PermissionStatus::Granted);
        assert_eq!(gate.poll(&mut reporter), GateState::Open);
        assert!(reporter.messages().is_empty());
    }

    #[test]
    fn test_timeout_reported_once() {
        let permission = ScriptedPermission::new(PermissionStatus::Pending);
        let clock = ManualClock::default();
        let mut reporter = RecordingReporter::default();
        let mut gate = gate(&permission, &clock);

        gate.poll(&mut reporter);
        clock.advance(Duration::from_secs(10));
        assert_eq!(gate.poll(&mut reporter), GateState::Failed);
        clock.advance(Duration::from_secs(5));
        assert_eq!(gate.poll(&mut reporter), GateState::Failed);

        let messages = reporter.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("Timed out"));
    }

    #[test]
    fn test_late_grant_after_timeout_stays_failed() {
        let permission = ScriptedPermission::new(PermissionStatus::Pending);
        let clock = ManualClock::default();
        let mut reporter = RecordingReporter::default();
        let mut gate = gate(&permission, &clock);

        gate.poll(&mut reporter);
        clock.advance(Duration::from_secs(11));
        gate.poll(&mut reporter);
        permission.set(PermissionStatus::Granted);
        assert_eq!(gate.poll(&mut reporter), GateState::Failed);
    }

    #[test]
    fn test_denied_reported_once() {
        let permission = ScriptedPermission::new(PermissionStatus::Denied);
        let clock = ManualClock::default();
        let mut reporter = RecordingReporter::default();
        let mut gate = gate(&permission, &clock);

        assert_eq!(gate.poll(&mut reporter), GateState::Failed);
        assert_eq!(gate.poll(&mut reporter), GateState::Failed);
        assert_eq!(
            reporter.messages(),
            vec!["Camera permission denied".to_string()]
        );
    }

    #[test]
    fn test_deadline_starts_at_first_poll() {
        let permission = ScriptedPermission::new(PermissionStatus::Pending);
        let clock = ManualClock::default();
        clock.advance(Duration::from_secs(60));
        let mut reporter = RecordingReporter::default();
        let mut gate = gate(&permission, &clock);

        assert_eq!(gate.poll(&mut reporter), GateState::Waiting);
        assert_eq!(gate.state(), GateState::Waiting);
    }
}
