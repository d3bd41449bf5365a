//! Diagnostics broadcaster.
//!
//! Any code holding a [`Diagnostics`] handle can write text; every registered
//! [`LogSink`] receives it. Registration is scoped: [`Diagnostics::register`]
//! returns a [`SinkRegistration`] guard that removes the sink when released
//! or dropped.
//!
//! [`DiagnosticsLogger`] bridges the `log` facade into a broadcaster so that
//! `log::info!` and friends end up in every sink (e.g. the console).

use std::sync::{Arc, Mutex, MutexGuard, Weak};

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Receiver of diagnostic text.
pub trait LogSink: Send + Sync {
    fn write(&self, text: &str);
    fn write_line(&self, text: &str);
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    sinks: Vec<(u64, Arc<dyn LogSink>)>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Cloneable handle to a set of sinks.
#[derive(Clone, Default)]
pub struct Diagnostics {
    registry: Arc<Mutex<Registry>>,
}

impl std::fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics")
            .field("sinks", &self.sink_count())
            .finish()
    }
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sink. It stays registered until the guard is released.
    #[must_use = "dropping the registration removes the sink immediately"]
    pub fn register(&self, sink: Arc<dyn LogSink>) -> SinkRegistration {
        let mut registry = lock(&self.registry);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.sinks.push((id, sink));
        SinkRegistration {
            id,
            registry: Arc::downgrade(&self.registry),
            active: true,
        }
    }

    pub fn sink_count(&self) -> usize {
        lock(&self.registry).sinks.len()
    }

    pub fn write(&self, text: &str) {
        for sink in self.sinks() {
            sink.write(text);
        }
    }

    pub fn write_line(&self, text: &str) {
        for sink in self.sinks() {
            sink.write_line(text);
        }
    }

    // Sinks are called outside the registry lock so a sink may itself
    // register, deregister or write diagnostics.
    fn sinks(&self) -> Vec<Arc<dyn LogSink>> {
        lock(&self.registry)
            .sinks
            .iter()
            .map(|(_, sink)| Arc::clone(sink))
            .collect()
    }
}

/// Scoped sink registration. Released on drop.
#[derive(Debug)]
pub struct SinkRegistration {
    id: u64,
    registry: Weak<Mutex<Registry>>,
    active: bool,
}

impl SinkRegistration {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Remove the sink. Calling this more than once is a no-op, as is
    /// releasing after the broadcaster itself is gone.
    pub fn release(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry).sinks.retain(|(id, _)| *id != self.id);
        }
    }
}

impl Drop for SinkRegistration {
    fn drop(&mut self) {
        self.release();
    }
}

/// `log` backend that forwards records into a [`Diagnostics`] broadcaster.
#[derive(Debug, Clone)]
pub struct DiagnosticsLogger {
    diagnostics: Diagnostics,
    level: LevelFilter,
}

impl DiagnosticsLogger {
    pub fn new(diagnostics: Diagnostics, level: LevelFilter) -> Self {
        Self { diagnostics, level }
    }

    /// Install as the global `log` backend.
    pub fn init(self) -> Result<(), SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }

    /// Format used for forwarded records.
    pub fn format(record: &Record<'_>) -> String {
        format!("[{}] {}", record.level(), record.args())
    }
}

impl Log for DiagnosticsLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // Multi-line messages are split by the sinks' `write`.
        let mut text = Self::format(record);
        text.push('\n');
        self.diagnostics.write(&text);
    }

    fn flush(&self) {}
}

/// Log level from `RUST_LOG`, falling back to `default`.
pub fn level_from_env(default: LevelFilter) -> LevelFilter {
    std::env::var("RUST_LOG")
        .map(|v| match v.to_lowercase().as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => default,
        })
        .unwrap_or(default)
}
