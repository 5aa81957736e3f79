//! Archive download: every regular file of a run directory, zipped.

use crate::types::error_response;
use crate::ApiState;
use anyhow::Result;
use axum::{
    extract::{Path as UrlPath, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use tracing::{error, info};
use zip::write::SimpleFileOptions;

/// Bundle every regular file directly inside the run directory into one zip.
/// Subdirectories are not descended into; `report.md` and the JSON documents
/// are carried through as opaque bytes.
pub async fn download_run(State(state): State<ApiState>, UrlPath(id): UrlPath<String>) -> Response {
    let dir = state.store.run_dir(&id);
    if !dir.is_dir() {
        info!(run = %id, "download requested for unknown run");
        return error_response(StatusCode::NOT_FOUND, format!("run `{id}` not found"))
            .into_response();
    }

    match build_archive(&dir) {
        Ok(bytes) => {
            info!(run = %id, size = bytes.len(), "serving run archive");
            (
                [
                    (header::CONTENT_TYPE, "application/zip".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"sanity-run-{id}.zip\""),
                    ),
                ],
                bytes,
            )
                .into_response()
        }
        Err(e) => {
            error!(run = %id, "failed to build archive: {e}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to build archive".to_string(),
            )
            .into_response()
        }
    }
}

fn build_archive(dir: &Path) -> Result<Vec<u8>> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut entries: Vec<_> = fs::read_dir(dir)?.collect::<std::io::Result<_>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        writer.start_file(name, options)?;
        writer.write_all(&fs::read(entry.path())?)?;
    }

    Ok(writer.finish()?.into_inner())
}
