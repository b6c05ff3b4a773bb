use crate::config;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Create a directory (and all parents) if it doesn't exist, and return the path.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
    let p = path.as_ref();
    fs::create_dir_all(p)?;
    Ok(p.to_path_buf())
}

/// Ensure the parent directory of a *file path* exists (no-op if none).
pub fn ensure_parent_dir<P: AsRef<Path>>(file_path: P) -> io::Result<()> {
    if let Some(parent) = file_path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Global storage root (absolute), from `config::sheet_storage_root()`.
/// If relative in env, resolve against current_dir().
pub fn storage_root() -> PathBuf {
    let root = config::sheet_storage_root();
    let p = PathBuf::from(root);
    if p.is_absolute() {
        p
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(p)
    }
}

/// A single exam folder: {STORAGE_ROOT}/exam_{exam_id}
pub fn exam_dir(exam_id: i64) -> PathBuf {
    storage_root().join(format!("exam_{exam_id}"))
}

/// Question paper location for an exam (does not create).
/// Example: question_paper_path(3, "paper.pdf") → .../exam_3/question_paper/paper.pdf
pub fn question_paper_path(exam_id: i64, filename: &str) -> PathBuf {
    exam_dir(exam_id).join("question_paper").join(filename)
}

/// Folder holding one student's uploaded answer sheet:
/// {STORAGE_ROOT}/exam_{exam_id}/sheet_{sheet_id}
pub fn sheet_dir(exam_id: i64, sheet_id: i64) -> PathBuf {
    exam_dir(exam_id).join(format!("sheet_{sheet_id}"))
}

/// Build a path for an answer sheet file (does not create).
pub fn answer_sheet_path(exam_id: i64, sheet_id: i64, filename: &str) -> PathBuf {
    sheet_dir(exam_id, sheet_id).join(filename)
}

/// Relative form stored on the `answer_sheets` row, so the storage root can move.
pub fn answer_sheet_rel_path(exam_id: i64, sheet_id: i64, filename: &str) -> String {
    format!("exam_{exam_id}/sheet_{sheet_id}/{filename}")
}
