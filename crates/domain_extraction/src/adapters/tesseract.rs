//! OCR through the Tesseract command-line tool

use std::fs::{self, File};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, OcrEngine, PortError};

/// Time one page may spend in tesseract before the process is killed
pub const DEFAULT_OCR_TIMEOUT: Duration = Duration::from_secs(60);

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Shells out to a `tesseract` binary, one process per image.
///
/// Each run works in its own temp directory and is killed once it exceeds
/// the configured timeout.
#[derive(Debug, Clone)]
pub struct TesseractCli {
    binary: PathBuf,
    language: String,
    timeout: Duration,
}

impl TesseractCli {
    pub fn new(binary: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            language: language.into(),
            timeout: DEFAULT_OCR_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn spawn_error(&self, error: std::io::Error) -> PortError {
        if error.kind() == std::io::ErrorKind::NotFound {
            PortError::unavailable(format!("tesseract ({})", self.binary.display()))
        } else {
            PortError::Io(error)
        }
    }

    fn wait_with_deadline(&self, child: &mut Child) -> Result<ExitStatus, PortError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                // the process may exit between the check and the kill
                let _ = child.kill();
                let _ = child.wait();
                tracing::warn!(
                    binary = %self.binary.display(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Killed tesseract after timeout"
                );
                return Err(PortError::timeout("OCR", self.timeout));
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self::new("tesseract", "eng")
    }
}

impl OcrEngine for TesseractCli {
    fn recognize(&self, image: &[u8]) -> Result<String, PortError> {
        let workdir = tempfile::Builder::new().prefix("ocr-").tempdir()?;
        let input = workdir.path().join("page.png");
        let output_base = workdir.path().join("page");
        let stderr_log = workdir.path().join("stderr.log");
        fs::write(&input, image)?;

        let mut child = Command::new(&self.binary)
            .arg(&input)
            .arg(&output_base)
            .arg("-l")
            .arg(&self.language)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(File::create(&stderr_log)?)
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let status = self.wait_with_deadline(&mut child)?;
        if !status.success() {
            let stderr = fs::read_to_string(&stderr_log).unwrap_or_default();
            return Err(PortError::processing(
                "OCR",
                format!("tesseract exited with {status}: {}", stderr.trim()),
            ));
        }

        let text = fs::read(output_base.with_extension("txt"))?;
        Ok(String::from_utf8_lossy(&text).into_owned())
    }
}

#[async_trait::async_trait]
impl HealthCheckable for TesseractCli {
    fn adapter_id(&self) -> &str {
        "tesseract-cli"
    }

    async fn health_check(&self) -> HealthCheckResult {
        let started = Instant::now();
        let version = tokio::process::Command::new(&self.binary)
            .arg("--version")
            .kill_on_drop(true)
            .output();

        let mut result = match tokio::time::timeout(self.timeout, version).await {
            Ok(Ok(output)) if output.status.success() => HealthCheckResult::healthy(self.adapter_id()),
            Ok(Ok(output)) => HealthCheckResult::unhealthy(
                self.adapter_id(),
                format!("tesseract --version exited with {}", output.status),
            ),
            Ok(Err(e)) => HealthCheckResult::unhealthy(self.adapter_id(), self.spawn_error(e).to_string()),
            Err(_) => HealthCheckResult::unhealthy(
                self.adapter_id(),
                PortError::timeout("tesseract --version", self.timeout).to_string(),
            ),
        };
        result.latency_ms = started.elapsed().as_millis() as u64;
        result
    }
}

impl DomainPort for TesseractCli {}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::AdapterHealth;

    #[test]
    fn missing_binary_is_reported_unavailable() {
        let ocr = TesseractCli::new("/nonexistent/bin/tesseract-claimpilot", "eng");
        let error = ocr.recognize(b"\x89PNG").unwrap_err();
        assert!(matches!(error, PortError::Unavailable { .. }));
    }

    /// Writes an executable shell script standing in for tesseract
    #[cfg(unix)]
    fn fake_tesseract(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.path().join("tesseract");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn reads_text_written_next_to_output_base() {
        let dir = tempfile::tempdir().unwrap();
        let binary = fake_tesseract(&dir, r#"printf 'Claim Amount: 500' > "$2.txt""#);

        let text = TesseractCli::new(binary, "eng").recognize(b"png").unwrap();
        assert_eq!(text, "Claim Amount: 500");
    }

    #[cfg(unix)]
    #[test]
    fn failing_run_reports_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let binary = fake_tesseract(&dir, "echo 'Failed loading language xyz' >&2; exit 1");

        let error = TesseractCli::new(binary, "xyz").recognize(b"png").unwrap_err();
        assert!(matches!(error, PortError::Processing { .. }));
        assert!(error.to_string().contains("Failed loading language xyz"));
    }

    #[cfg(unix)]
    #[test]
    fn hung_process_is_killed_at_the_deadline() {
        let dir = tempfile::tempdir().unwrap();
        let binary = fake_tesseract(&dir, "exec sleep 10");
        let ocr = TesseractCli::new(binary, "eng").with_timeout(Duration::from_millis(200));

        let started = Instant::now();
        let error = ocr.recognize(b"png").unwrap_err();

        assert!(started.elapsed() < Duration::from_secs(3), "took {:?}", started.elapsed());
        assert!(matches!(error, PortError::Timeout { duration_ms: 200, .. }));
    }

    #[tokio::test]
    async fn missing_binary_fails_health_check() {
        let ocr = TesseractCli::new("/nonexistent/bin/tesseract-claimpilot", "eng");
        let result = ocr.health_check().await;
        assert_eq!(result.status, AdapterHealth::Unhealthy);
        assert!(result.message.unwrap().contains("tesseract"));
    }
}
