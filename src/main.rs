//! CLI entry point.
//!
//! Execution flow:
//!
//! 1. Parse flags and initialize file logging (logs/apkrename.<date>)
//! 2. Validate the input APK path before anything else
//! 3. Resolve the external toolchain (flags or libs/ defaults)
//! 4. Drive the pipeline: decompile -> rename app -> build -> sign
//! 5. Optional cleanup: delete the working tree, reveal the output folder
//!
//! Any validation or stage failure terminates the process with a non-zero
//! status; the stages themselves only return errors, the decision to exit is
//! made here.

use anyhow::{Context, Result};
use apkrename::cli::Cli;
use apkrename::services::runner;
use apkrename::{APP_NAME, EditError, PackageSession, ResourceEditor, Toolchain, VERSION, status};
use camino::Utf8Path;
use clap::Parser;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // The guard keeps the non-blocking file appender alive until shutdown
    let _guard = apkrename::logging::init("logs", APP_NAME, cli.debug)
        .context("Failed to initialize logging")?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    // Fail fast on a bad input path, before any tool resolution or subprocess
    if !cli.input.exists() {
        status::error("Argument", "APK path does not exist!");
        return Ok(ExitCode::FAILURE);
    }

    let toolchain = match Toolchain::resolve(cli.apktool.clone(), cli.apksigner.clone()) {
        Ok(toolchain) => toolchain,
        Err(e) => {
            status::error("Toolchain", &e.to_string());
            return Ok(ExitCode::FAILURE);
        }
    };
    status::success("Toolchain", "apktool and apksigner located");

    let editor = ResourceEditor::new(toolchain);
    let session = match run_pipeline(&editor, &cli).await {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Pipeline failed: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    if cli.delete_workdir {
        std::fs::remove_dir_all(&session.decompile_dir)
            .with_context(|| format!("Failed to delete {}", session.decompile_dir))?;
        status::success("Folder deleted", session.decompile_dir.as_str());
    }

    if cli.open_folder {
        if let Some(artifact) = session.last_generated_apk.as_deref() {
            let folder = artifact.parent().unwrap_or(Utf8Path::new("."));
            reveal_folder(folder).await;
        }
    }

    tracing::info!("Run complete");
    Ok(ExitCode::SUCCESS)
}

/// The four pipeline stages in their required order. Each stage gates the
/// next; `?` short-circuits the rest of the run on the first failure.
async fn run_pipeline(editor: &ResourceEditor, cli: &Cli) -> Result<PackageSession, EditError> {
    let mut session = editor.decompile(&cli.input, None, cli.overwrite).await?;
    editor.rename_app(&session, &cli.instring, &cli.outstring)?;
    editor.build(&mut session, None).await?;
    editor.sign(&mut session, cli.output.as_deref()).await?;
    Ok(session)
}

/// Open the host file browser at `folder`. Failure only warns: the pipeline
/// already finished, a missing file browser should not change the exit code.
async fn reveal_folder(folder: &Utf8Path) {
    let program = if cfg!(target_os = "windows") {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };

    match runner::run(program, &[folder.to_string()], None).await {
        Ok(result) if result.success() => {}
        Ok(result) => {
            tracing::warn!("{program} exited with {:?}: {}", result.code, result.stderr);
        }
        Err(e) => {
            tracing::warn!("Failed to launch {program}: {e}");
        }
    }
}
