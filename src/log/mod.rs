use crate::form::FormState;
use crate::wire::{GenerationRequest, GenerationResult};
use fs_err as fs;
use serde::Serialize;
use serde_json::to_string_pretty;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct SavedPaths {
    pub dir: PathBuf,
    pub request: PathBuf,
    pub response: PathBuf,
}

#[derive(Serialize)]
struct RequestRecord<'a> {
    tx: Uuid,
    form: &'a FormState,
    request: &'a GenerationRequest,
}

fn tx_dir(out_dir: &Path, tx: Uuid) -> PathBuf {
    out_dir.join("tx").join(tx.to_string())
}

/// Persist what was sent and what came back for one generation.
pub fn save_generation(
    out_dir: &Path,
    tx: Uuid,
    form: &FormState,
    req: &GenerationRequest,
    result: &GenerationResult,
) -> anyhow::Result<SavedPaths> {
    let dir = tx_dir(out_dir, tx);
    fs::create_dir_all(&dir)?;

    let request = dir.join("generate.request.json");
    fs::write(&request, to_string_pretty(&RequestRecord { tx, form, request: req })?)?;

    let response = dir.join("generate.response.md");
    fs::write(&response, &result.text)?;

    tracing::debug!(dir = %dir.display(), "saved generation artifacts");
    Ok(SavedPaths { dir, request, response })
}
