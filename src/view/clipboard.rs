use log::debug;
use parking_lot::Mutex;
use std::process::Stdio;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::{ConsoleError, Result};

#[async_trait::async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<()>;
}

/// Keeps every write in memory; handy wherever no system clipboard exists.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    writes: Arc<Mutex<Vec<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<String> {
        self.writes.lock().last().cloned()
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().clone()
    }
}

#[async_trait::async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        self.writes.lock().push(text.to_string());
        Ok(())
    }
}

/// Known clipboard helpers, tried in order
const HELPERS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("pbcopy", &[]),
];

/// Pipes text into the first clipboard helper that runs successfully.
#[derive(Debug, Clone, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    async fn pipe(program: &str, args: &[&str], text: &str) -> std::io::Result<bool> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
        }
        Ok(child.wait().await?.success())
    }
}

#[async_trait::async_trait]
impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        for (program, args) in HELPERS {
            match Self::pipe(program, args, text).await {
                Ok(true) => return Ok(()),
                Ok(false) => debug!("{} exited with failure", program),
                Err(e) => debug!("{} unavailable: {}", program, e),
            }
        }
        Err(ConsoleError::Clipboard(
            "no clipboard helper found (tried wl-copy, xclip, xsel, pbcopy)".to_string(),
        ))
    }
}
