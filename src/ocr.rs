use crate::config::OcrConfig;
use crate::error::MenuError;
use log::debug;
use std::io::Write;
use std::path::Path;
use tokio::process::Command;

/// Performs OCR on image data with the configured engine
///
/// The bytes are written to a temporary file that is removed when this
/// function returns, whether or not recognition succeeded.
///
/// # Errors
/// Returns an error if:
/// - The temporary file cannot be written
/// - The OCR engine cannot be started or exits unsuccessfully
/// - The engine output is not valid UTF-8
pub async fn ocr_image_data(config: &OcrConfig, image_data: &[u8]) -> Result<String, MenuError> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(image_data)?;
    file.flush()?;

    ocr_image_file(config, file.path()).await
}

/// Runs the OCR engine on an image file and returns the recognized text
pub async fn ocr_image_file(config: &OcrConfig, image_path: &Path) -> Result<String, MenuError> {
    debug!(
        "Running {} on {} ({} mode {})",
        config.command,
        image_path.display(),
        config.language,
        config.page_segmentation
    );

    let output = Command::new(&config.command)
        .arg("--psm")
        .arg(config.page_segmentation.to_string())
        .arg("-l")
        .arg(&config.language)
        .arg(image_path)
        .arg("-")
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(MenuError::OcrError(format!(
            "{} exited with {}: {}",
            config.command,
            output.status,
            stderr.trim()
        )));
    }

    let text = String::from_utf8(output.stdout)
        .map_err(|e| MenuError::OcrError(format!("Output is not UTF-8: {}", e)))?;

    debug!("Extracted text from image: {} characters", text.len());

    Ok(text)
}
