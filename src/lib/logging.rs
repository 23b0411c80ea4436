//! Tracing subscriber setup. Host builds log to stderr (optionally as JSON);
//! browser builds forward formatted events to the developer console.
//! Events must never carry tokens or passwords.

use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable consulted before `RUST_LOG`.
pub const LOG_ENV: &str = "ALUMNI_LOG";
const DEFAULT_DIRECTIVE: &str = "info";

/// Maps a verbosity value (`0..=4` or a level name) to a filter directive.
#[must_use]
pub fn level_directive(level: &str) -> Option<&'static str> {
    if let Ok(parsed) = level.trim().parse::<u8>() {
        return match parsed {
            0 => Some("error"),
            1 => Some("warn"),
            2 => Some("info"),
            3 => Some("debug"),
            4 => Some("trace"),
            _ => None,
        };
    }

    match level.trim().to_lowercase().as_str() {
        "error" => Some("error"),
        "warn" => Some("warn"),
        "info" => Some("info"),
        "debug" => Some("debug"),
        "trace" => Some("trace"),
        _ => None,
    }
}

fn env_filter() -> EnvFilter {
    let from_env = std::env::var(LOG_ENV)
        .ok()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .filter(|value| !value.trim().is_empty());

    match from_env {
        Some(value) => {
            let directive = level_directive(&value).map_or(value.clone(), str::to_string);
            EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
        }
        None => EnvFilter::new(DEFAULT_DIRECTIVE),
    }
}

/// Installs the global subscriber. Calling it again is a no-op.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(json: bool) {
    let registry = Registry::default().with(env_filter());

    let result = if json {
        registry.with(fmt::layer().json().with_target(true)).try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Installs the global subscriber. Calling it again is a no-op.
#[cfg(target_arch = "wasm32")]
pub fn init(json: bool) {
    let registry = Registry::default().with(env_filter());

    // wasm32-unknown-unknown has no system clock; timestamps come from the console
    let result = if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .without_time()
                    .with_writer(console::ConsoleWriter::default),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_ansi(false)
                    .without_time()
                    .with_writer(console::ConsoleWriter::default),
            )
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(target_arch = "wasm32")]
mod console {
    use std::io;

    /// Buffers one formatted event and hands it to `console.log` when dropped.
    #[derive(Default)]
    pub struct ConsoleWriter {
        buffer: Vec<u8>,
    }

    impl io::Write for ConsoleWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            if self.buffer.is_empty() {
                return Ok(());
            }
            let line = String::from_utf8_lossy(&self.buffer);
            web_sys::console::log_1(&line.trim_end().into());
            self.buffer.clear();
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            let _ = io::Write::flush(self);
        }
    }
}
