//! Writing the sample contract to disk.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;

use crate::builder::{PdfBuildError, PdfBuilder};
use crate::contract::{self, OUTPUT_FILE_NAME};

/// Returns the fixed output path next to the running executable.
pub fn default_output_path() -> Result<PathBuf, PdfBuildError> {
    let exe = env::current_exe().map_err(PdfBuildError::OutputPath)?;
    let directory = exe.parent().ok_or_else(|| {
        PdfBuildError::OutputPath(io::Error::new(
            io::ErrorKind::NotFound,
            format!("executable {} has no parent directory", exe.display()),
        ))
    })?;
    Ok(directory.join(OUTPUT_FILE_NAME))
}

/// Renders the sample contract and writes it to [`default_output_path`].
pub fn build() -> Result<PathBuf, PdfBuildError> {
    let path = default_output_path()?;
    write_contract(&path)?;
    Ok(path)
}

/// Renders the sample contract into `directory` under the fixed file name.
///
/// The directory must already exist.  An existing file is replaced.
pub fn build_in(directory: impl AsRef<Path>) -> Result<PathBuf, PdfBuildError> {
    let path = directory.as_ref().join(OUTPUT_FILE_NAME);
    write_contract(&path)?;
    Ok(path)
}

fn write_contract(path: &Path) -> Result<(), PdfBuildError> {
    let pdf = PdfBuilder::new(contract::sample_contract()).render()?;
    fs::write(path, &pdf.bytes).map_err(|source| PdfBuildError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "Wrote {} ({} bytes, {} page(s))",
        path.display(),
        pdf.bytes.len(),
        pdf.page_count
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_uses_fixed_file_name() {
        let path = default_output_path().expect("resolve output path");
        assert_eq!(
            path.file_name().and_then(|name| name.to_str()),
            Some("ces-cmr-2024-0042.pdf")
        );
        let exe = env::current_exe().expect("current exe");
        assert_eq!(path.parent(), exe.parent());
    }
}
