use super::TinctApp;
use crate::export;
use crate::image::FilterOutput;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// Everything the save worker needs, detached from the UI state.
#[derive(Debug, Clone)]
pub(super) struct ExportPayload {
    pub output: FilterOutput,
    pub quality: u8,
}

pub(super) struct PendingExportTask {
    rx: Receiver<ExportResult>,
}

enum ExportResult {
    Success(PathBuf),
    Error(String),
}

impl TinctApp {
    pub(crate) fn start_export_job(&mut self, path: PathBuf, payload: ExportPayload) {
        if self.pending_export.is_some() {
            self.set_status("Save already in progress.");
            return;
        }
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let result = match export::save_jpeg(&path, &payload.output, payload.quality) {
                Ok(()) => ExportResult::Success(path),
                Err(err) => ExportResult::Error(err.to_string()),
            };
            let _ = tx.send(result);
        });
        self.pending_export = Some(PendingExportTask { rx });
        self.set_status("Saving output…");
    }

    pub(crate) fn poll_export_job(&mut self) {
        let Some(task) = self.pending_export.take() else {
            return;
        };
        match task.rx.try_recv() {
            Ok(ExportResult::Success(path)) => {
                self.set_status(format!("Saved {}", path.display()));
            }
            Ok(ExportResult::Error(err)) => {
                self.set_status(format!("Save failed: {err}"));
            }
            Err(TryRecvError::Empty) => {
                self.pending_export = Some(task);
            }
            Err(TryRecvError::Disconnected) => {
                self.set_status("Save failed: worker disconnected.");
            }
        }
    }
}
