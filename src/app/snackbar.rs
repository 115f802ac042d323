//! Transient notification shown at the bottom of the screen

use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

/// What the UI needs to draw a visible snackbar
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnackbarView {
    pub message: String,
    pub severity: Severity,
}

#[derive(Clone, Debug)]
pub struct Snackbar {
    message: String,
    severity: Severity,
    visible: bool,
    duration: Duration,
    expires_at: Option<Instant>,
}

impl Snackbar {
    /// A zero `duration` keeps messages up until dismissed
    pub fn new(duration: Duration) -> Self {
        Snackbar {
            message: String::new(),
            severity: Severity::Info,
            visible: false,
            duration,
            expires_at: None,
        }
    }

    pub fn show(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        self.message = message.into();
        self.severity = severity;
        self.visible = true;
        self.expires_at = if self.duration.is_zero() {
            None
        } else {
            Some(now + self.duration)
        };
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
        self.expires_at = None;
    }

    /// Hide the message once its time is up; returns whether anything changed
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) if self.visible && now >= deadline => {
                self.dismiss();
                true
            }
            _ => false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn view(&self) -> Option<SnackbarView> {
        self.visible.then(|| SnackbarView {
            message: self.message.clone(),
            severity: self.severity,
        })
    }
}
