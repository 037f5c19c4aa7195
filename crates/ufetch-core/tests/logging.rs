//! The fetcher logs through whatever tracing subscriber is in scope.

use std::io::{self, Write};
use std::process::Output;
use std::sync::{Arc, Mutex};
use ufetch_core::{
    CommandRunner, CurlFetcher, ExternalTool, ManualDownloader, SecureTransportMarkers, UrlFetcher,
};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

struct Missing;

impl CommandRunner for Missing {
    fn run(&self, _program: &str, _args: &[String]) -> io::Result<Output> {
        Err(io::Error::new(io::ErrorKind::NotFound, "not installed"))
    }
}

fn run_fallback_at(level: tracing::Level) -> String {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let fetcher = UrlFetcher::new(
        CurlFetcher::default(),
        ManualDownloader::new(Missing, vec![ExternalTool::curl(), ExternalTool::wget()]),
    )
    .with_markers(SecureTransportMarkers(vec!["unknown url type".into()]));

    tracing::subscriber::with_default(subscriber, || {
        let _ = fetcher.retrieve("ufetchtest://example.invalid/x", None);
    });
    captured.text()
}

#[test]
fn debug_tier_logs_url_and_reason_but_not_commands() {
    let out = run_fallback_at(tracing::Level::DEBUG);
    assert!(out.contains("retrieving URL: ufetchtest://example.invalid/x timeout=None"));
    assert!(out.contains("error.reason = unknown url type: ufetchtest"));
    assert!(out.contains("unable to call curl"));
    assert!(!out.contains("about to execute"));
}

#[test]
fn trace_tier_adds_command_lines() {
    let out = run_fallback_at(tracing::Level::TRACE);
    assert!(out.contains("about to execute: curl --silent -L ufetchtest://example.invalid/x"));
    assert!(out.contains("about to execute: wget --quiet -O- ufetchtest://example.invalid/x"));
}
