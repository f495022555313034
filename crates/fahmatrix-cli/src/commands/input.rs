use std::path::Path;

use anyhow::{bail, Result};

use fahmatrix::io::{read_matrix, MatrixFormat};
use fahmatrix::Matrix;

/// Read one operand, using `format` when given and the extension otherwise.
pub fn load_operand<P: AsRef<Path>>(path: P, format: Option<&MatrixFormat>) -> Result<Matrix> {
    let path = path.as_ref();
    if !path.exists() {
        bail!("File does not exist: {}", path.display());
    }
    let format = match format {
        Some(format) => format.clone(),
        None => MatrixFormat::from_path(path)?,
    };
    let matrix = read_matrix(path, &format)?;
    log::info!(
        "[fahmatrix] Loaded {} matrix from {}",
        matrix.shape(),
        path.display()
    );
    Ok(matrix)
}

pub fn load_operands<P: AsRef<Path>>(
    paths: &[P],
    format: Option<&MatrixFormat>,
) -> Result<Vec<Matrix>> {
    paths.iter().map(|p| load_operand(p, format)).collect()
}
