use super::TinctApp;
use crate::image::{ImageMeta, LoadedImage, decode_image_from_bytes, decode_image_from_path};
use egui::Context;
use image::RgbImage;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::SystemTime;

enum ImageLoadRequest {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

pub(super) struct PendingImageTask {
    rx: Receiver<ImageLoadResult>,
    meta: PendingImageMeta,
}

enum ImageLoadResult {
    Success(RgbImage),
    Error(String),
}

#[derive(Clone)]
enum PendingImageMeta {
    Path {
        path: PathBuf,
    },
    DroppedBytes {
        name: Option<String>,
        byte_len: usize,
        last_modified: Option<SystemTime>,
    },
}

impl PendingImageMeta {
    fn description(&self) -> String {
        match self {
            Self::Path { path } => path
                .file_name()
                .and_then(|s| s.to_str())
                .map_or_else(|| path.display().to_string(), str::to_string),
            Self::DroppedBytes { name, .. } => name
                .as_deref()
                .map_or_else(|| "dropped bytes".to_string(), str::to_string),
        }
    }

    fn into_image_meta(self) -> ImageMeta {
        match self {
            Self::Path { path } => ImageMeta::from_path(&path),
            Self::DroppedBytes {
                name,
                byte_len,
                last_modified,
            } => ImageMeta::from_dropped_bytes(name.as_deref(), byte_len, last_modified),
        }
    }
}

impl TinctApp {
    pub(crate) fn start_loading_image_from_path(&mut self, path: PathBuf) {
        self.remember_image_dir_from_path(&path);
        let meta = PendingImageMeta::Path { path: path.clone() };
        self.start_image_load(ImageLoadRequest::Path(path), meta);
    }

    pub(crate) fn start_loading_image_from_bytes(
        &mut self,
        name: Option<String>,
        bytes: Vec<u8>,
        last_modified: Option<SystemTime>,
    ) {
        let meta = PendingImageMeta::DroppedBytes {
            name,
            byte_len: bytes.len(),
            last_modified,
        };
        self.start_image_load(ImageLoadRequest::Bytes(bytes), meta);
    }

    fn start_image_load(&mut self, request: ImageLoadRequest, meta: PendingImageMeta) {
        let description = meta.description();
        let cfg = self.config.clone();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let result = match request {
                ImageLoadRequest::Path(path) => decode_image_from_path(&cfg, &path),
                ImageLoadRequest::Bytes(bytes) => decode_image_from_bytes(&cfg, bytes),
            };
            let msg = match result {
                Ok(pixels) => ImageLoadResult::Success(pixels),
                Err(err) => ImageLoadResult::Error(err.to_string()),
            };
            let _ = tx.send(msg);
        });
        self.image.pending_task = Some(PendingImageTask { rx, meta });
        self.set_status(format!("Loading {description}…"));
    }

    pub(crate) fn poll_image_loader(&mut self, ctx: &Context) {
        let Some(task) = self.image.pending_task.take() else {
            return;
        };
        match task.rx.try_recv() {
            Ok(ImageLoadResult::Success(pixels)) => {
                let meta = task.meta.into_image_meta();
                let name = meta.display_name();
                let loaded = LoadedImage::from_rgb(ctx, pixels);
                self.set_loaded_image(loaded, Some(meta));
                self.set_status(format!("Loaded {name}"));
            }
            Ok(ImageLoadResult::Error(err)) => {
                let label = task.meta.description();
                self.set_status(format!("Failed to load {label}: {err}"));
            }
            Err(TryRecvError::Empty) => {
                self.image.pending_task = Some(task);
            }
            Err(TryRecvError::Disconnected) => {
                let label = task.meta.description();
                self.set_status(format!("Loading {label} failed: worker disconnected."));
            }
        }
    }

    pub(crate) fn remember_image_dir_from_path(&mut self, path: &Path) {
        let dir = path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        self.last_image_dir = Some(dir);
    }
}
