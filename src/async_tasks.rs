//! Async task management for background operations
//!
//! This module handles the work that must not stall the frame loop:
//! - CV download (file copy)
//! - Resize debouncing

use crate::download::copy_cv;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Messages sent from background tasks to the main thread
#[derive(Debug)]
pub enum TaskMessage {
    /// CV copied into the downloads folder
    CvSaved { path: PathBuf },

    /// CV copy failed
    CvFailed { error: String },

    /// Resize event after debounce timeout
    ResizeComplete { width: u16, height: u16 },
}

/// Manages spawning and communication with background tasks
pub struct AsyncTaskRunner {
    tx: mpsc::UnboundedSender<TaskMessage>,
}

impl AsyncTaskRunner {
    /// Create a new task runner
    pub fn new(tx: mpsc::UnboundedSender<TaskMessage>) -> Self {
        Self { tx }
    }

    /// Spawn a task copying the CV at `source` into `dest_dir`
    pub fn spawn_cv_download(&self, source: PathBuf, dest_dir: PathBuf) -> JoinHandle<()> {
        let tx = self.tx.clone();
        tokio::spawn(async move { cv_download_task(source, dest_dir, tx).await })
    }

    /// Spawn a resize debouncer
    ///
    /// Collects resize events and sends a single resize message after debounce timeout
    pub fn spawn_resize_debouncer(&self, debounce_ms: u64) -> mpsc::UnboundedSender<(u16, u16)> {
        let tx = self.tx.clone();
        let (resize_tx, resize_rx) = mpsc::unbounded_channel::<(u16, u16)>();

        tokio::spawn(async move { resize_debounce_task(resize_rx, tx, debounce_ms).await });

        resize_tx
    }
}

/// Background task for copying the CV
async fn cv_download_task(
    source: PathBuf,
    dest_dir: PathBuf,
    tx: mpsc::UnboundedSender<TaskMessage>,
) {
    tracing::info!("Starting CV download: {}", source.display());

    // File copy is blocking I/O
    let result = tokio::task::spawn_blocking(move || copy_cv(&source, &dest_dir)).await;

    let message = match result {
        Ok(Ok(path)) => TaskMessage::CvSaved { path },
        Ok(Err(e)) => {
            tracing::error!("CV download failed: {}", e);
            TaskMessage::CvFailed {
                error: e.to_string(),
            }
        }
        Err(e) => {
            tracing::error!("Task join error during CV download: {}", e);
            TaskMessage::CvFailed {
                error: format!("Task join error: {}", e),
            }
        }
    };
    let _ = tx.send(message);
}

/// Background task for debouncing resize events
async fn resize_debounce_task(
    mut resize_rx: mpsc::UnboundedReceiver<(u16, u16)>,
    tx: mpsc::UnboundedSender<TaskMessage>,
    debounce_ms: u64,
) {
    tracing::debug!("Resize debouncer started (debounce: {}ms)", debounce_ms);
    let mut last_size: Option<(u16, u16)> = None;

    loop {
        match tokio::time::timeout(Duration::from_millis(debounce_ms), resize_rx.recv()).await {
            Ok(Some(size)) => {
                last_size = Some(size);
            }
            Ok(None) => {
                tracing::debug!("Resize channel closed");
                break;
            }
            Err(_) => {
                // Quiet for a full debounce period
                if let Some((width, height)) = last_size.take() {
                    tracing::info!("Debounced resize event: {}x{}", width, height);
                    let _ = tx.send(TaskMessage::ResizeComplete { width, height });
                }
            }
        }
    }
}
