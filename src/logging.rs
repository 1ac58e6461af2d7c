//! `tracing` setup for the browser console.
//!
//! Each formatted event is buffered and handed to the console method that
//! matches its level once the formatter is done with it. Native builds (the
//! test runner) write to stderr instead.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::config::DEFAULT_LOG_FILTER;

/// Builds the filter from a directive string, falling back to the default
/// directive when it does not parse.
pub fn env_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Installs the global subscriber. A second call is a no-op.
pub fn init(directives: &str) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter(directives))
        .with_writer(ConsoleMakeWriter)
        .with_ansi(false)
        .without_time()
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(filter = directives, "logging_ready");
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ConsoleMethod {
    Error,
    Warn,
    Log,
}

fn console_method(level: &Level) -> ConsoleMethod {
    match *level {
        Level::ERROR => ConsoleMethod::Error,
        Level::WARN => ConsoleMethod::Warn,
        _ => ConsoleMethod::Log,
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleLine;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleLine::new(ConsoleMethod::Log)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleLine::new(console_method(meta.level()))
    }
}

/// One formatted event on its way to the console.
pub struct ConsoleLine {
    method: ConsoleMethod,
    buffer: Vec<u8>,
}

impl ConsoleLine {
    fn new(method: ConsoleMethod) -> Self {
        Self {
            method,
            buffer: Vec::new(),
        }
    }

    fn text(&self) -> String {
        String::from_utf8_lossy(&self.buffer).trim_end().to_string()
    }
}

impl io::Write for ConsoleLine {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleLine {
    fn drop(&mut self) {
        let text = self.text();
        if !text.is_empty() {
            emit(self.method, &text);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(method: ConsoleMethod, text: &str) {
    let message = wasm_bindgen::JsValue::from_str(text);
    match method {
        ConsoleMethod::Error => web_sys::console::error_1(&message),
        ConsoleMethod::Warn => web_sys::console::warn_1(&message),
        ConsoleMethod::Log => web_sys::console::log_1(&message),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_method: ConsoleMethod, text: &str) {
    eprintln!("{text}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn levels_map_to_console_methods() {
        assert_eq!(console_method(&Level::ERROR), ConsoleMethod::Error);
        assert_eq!(console_method(&Level::WARN), ConsoleMethod::Warn);
        assert_eq!(console_method(&Level::INFO), ConsoleMethod::Log);
        assert_eq!(console_method(&Level::TRACE), ConsoleMethod::Log);
    }

    #[test]
    fn line_collects_partial_writes() {
        let mut line = ConsoleLine::new(ConsoleMethod::Log);
        write!(line, "section_mount ").expect("buffered");
        writeln!(line, "section=\"about\"").expect("buffered");

        assert_eq!(line.text(), "section_mount section=\"about\"");
    }

    #[test]
    fn init_twice_is_harmless() {
        init("scrollfolio=debug");
        init("not a [valid filter");
        tracing::info!("still logging");
    }
}
