//! # Notification Sinks
//!
//! Reminders leave the core through a [`NotificationSink`]. A sink owns a
//! three-valued permission flag; delivery is only attempted once it is
//! [`Permission::Granted`].
//!
//! - [`TerminalSink`]: writes notifications to a terminal stream.
//! - [`RecordingSink`]: keeps delivered notifications in memory, for tests and embedding.

use crate::error::Result;
use colored::Colorize;
use std::io::Write;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Default,
    Granted,
    Denied,
}

pub trait NotificationSink {
    fn permission(&self) -> Permission;

    /// Asks for permission. Only meaningful while the permission is `Default`.
    fn request_permission(&mut self) -> Permission;

    fn deliver(&mut self, title: &str, body: &str) -> Result<()>;
}

/// Prints notifications to a writer (stdout by default).
pub struct TerminalSink<W: Write> {
    out: W,
    permission: Permission,
}

impl TerminalSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            permission: Permission::Default,
        }
    }

    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.permission = permission;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> NotificationSink for TerminalSink<W> {
    fn permission(&self) -> Permission {
        self.permission
    }

    fn request_permission(&mut self) -> Permission {
        // The user's own terminal needs no consent dialog; a denial sticks.
        if self.permission == Permission::Default {
            self.permission = Permission::Granted;
        }
        self.permission
    }

    fn deliver(&mut self, title: &str, body: &str) -> Result<()> {
        writeln!(self.out, "{} {}", "🔔".yellow(), title.bold())?;
        writeln!(self.out, "   {}", body.dimmed())?;
        self.out.flush()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivered {
    pub title: String,
    pub body: String,
}

/// In-memory sink. Clones share the same delivery log, so a clone can be moved
/// into a timer callback while the original is inspected.
#[derive(Debug, Clone)]
pub struct RecordingSink {
    permission: Arc<Mutex<Permission>>,
    on_request: Permission,
    delivered: Arc<Mutex<Vec<Delivered>>>,
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new(Permission::Default, Permission::Granted)
    }
}

impl RecordingSink {
    /// `initial` is the current permission, `on_request` is what a request resolves to.
    pub fn new(initial: Permission, on_request: Permission) -> Self {
        Self {
            permission: Arc::new(Mutex::new(initial)),
            on_request,
            delivered: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn delivered(&self) -> Vec<Delivered> {
        self.delivered
            .lock()
            .map(|d| d.clone())
            .unwrap_or_default()
    }
}

impl NotificationSink for RecordingSink {
    fn permission(&self) -> Permission {
        self.permission
            .lock()
            .map(|p| *p)
            .unwrap_or(Permission::Denied)
    }

    fn request_permission(&mut self) -> Permission {
        match self.permission.lock() {
            Ok(mut p) => {
                if *p == Permission::Default {
                    *p = self.on_request;
                }
                *p
            }
            Err(_) => Permission::Denied,
        }
    }

    fn deliver(&mut self, title: &str, body: &str) -> Result<()> {
        if let Ok(mut log) = self.delivered.lock() {
            log.push(Delivered {
                title: title.to_string(),
                body: body.to_string(),
            });
        }
        Ok(())
    }
}
