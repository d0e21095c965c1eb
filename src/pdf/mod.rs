//! PDF build - runs a LaTeX engine over the rendered document
//!
//! The engine binary comes from the `TURBOCB3K_LATEX_ENGINE` environment
//! variable (default `pdflatex`) and must be on `PATH`; the document is
//! compiled in a throwaway temp directory and the finished bytes are read
//! back for saving.

use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use tracing::debug;

/// Name of the environment variable overriding the LaTeX engine.
pub const ENGINE_ENV_VAR: &str = "TURBOCB3K_LATEX_ENGINE";

/// A finished PDF, held in memory until the user picks a destination.
pub struct PdfDocument {
    data: Vec<u8>,
}

impl PdfDocument {
    /// Persist the document.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, &self.data)
            .with_context(|| format!("failed to write PDF to {}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Compile a rendered LaTeX document into a PDF.
pub fn build_pdf(source: &str) -> Result<PdfDocument> {
    let build_dir = std::env::temp_dir().join(format!(
        "turbocb3k_{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default()
    ));
    fs::create_dir_all(&build_dir)?;

    let result = run_engine(source, &build_dir);

    // The build tree is only scratch space, whatever the outcome.
    let _ = fs::remove_dir_all(&build_dir);

    result
}

fn run_engine(source: &str, build_dir: &Path) -> Result<PdfDocument> {
    let tex_path = build_dir.join("catalog.tex");
    fs::write(&tex_path, source)?;

    let engine = latex_engine();
    debug!(engine = %engine, dir = %build_dir.display(), "compiling catalog");

    // Two passes, so layout material that settles on the first pass
    // (references, aux data) lands correctly.
    for pass in 1..=2 {
        let output = engine_command(&engine)
            .args(["-interaction=nonstopmode", "-halt-on-error"])
            .arg("catalog.tex")
            .current_dir(build_dir)
            .output()
            .with_context(|| format!("failed to run LaTeX engine '{engine}'"))?;

        if !output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "LaTeX engine failed on pass {pass}:\n{}\n{}",
                stdout.trim_end(),
                stderr.trim_end()
            );
        }
    }

    let pdf_path = build_dir.join("catalog.pdf");
    let data = fs::read(&pdf_path)
        .with_context(|| format!("engine produced no PDF at {}", pdf_path.display()))?;

    Ok(PdfDocument { data })
}

/// Probe the engine once so the GUI can warn before the user gets as far as
/// a build.
pub fn is_engine_available() -> bool {
    engine_command(&latex_engine())
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn latex_engine() -> String {
    std::env::var(ENGINE_ENV_VAR).unwrap_or_else(|_| "pdflatex".to_string())
}

fn engine_command(engine: &str) -> Command {
    #[allow(unused_mut)]
    let mut command = Command::new(engine);

    // Spawning a console program from a GUI process flashes a console
    // window on Windows unless suppressed.
    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        const CREATE_NO_WINDOW: u32 = 0x08000000;
        command.creation_flags(CREATE_NO_WINDOW);
    }

    command
}
