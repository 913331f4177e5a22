//! Golden-file comparison for rendered tables.

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::{BuildError, Result};

/// Compare `html` byte-for-byte with the file at `golden`.
///
/// On mismatch, writes `<failed_dir>/<golden file name>` holding the control
/// table followed by the failed result, and returns
/// [`BuildError::GoldenMismatch`].
pub fn check_golden(
    html: &str,
    golden: impl AsRef<Path>,
    failed_dir: impl AsRef<Path>,
) -> Result<()> {
    let golden = golden.as_ref();
    let failed_dir = failed_dir.as_ref();

    let control = fs::read_to_string(golden).map_err(|source| BuildError::Io {
        path: golden.to_path_buf(),
        source,
    })?;
    if control == html {
        return Ok(());
    }

    let file_name = golden
        .file_name()
        .ok_or_else(|| BuildError::Invalid(format!("{} has no file name", golden.display())))?;
    let artifact = failed_dir.join(file_name);

    fs::create_dir_all(failed_dir).map_err(|source| BuildError::Io {
        path: failed_dir.to_path_buf(),
        source,
    })?;
    let report = format!(
        "<p>Control table:</p>{}<p>Failed result:</p>{}",
        control, html
    );
    fs::write(&artifact, report).map_err(|source| BuildError::Io {
        path: artifact.clone(),
        source,
    })?;

    warn!(golden = %golden.display(), artifact = %artifact.display(), "golden mismatch");
    Err(BuildError::GoldenMismatch {
        golden: golden.to_path_buf(),
        artifact,
    })
}
