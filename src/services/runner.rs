use camino::Utf8Path;
use tokio::process::Command;

/// Captured result of one external command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code, if the process exited normally
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// The process exited with code zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Execute `program` with `args`, optionally in `cwd`, and wait for it to
/// finish. At most one subprocess runs at a time; there is no timeout and no
/// streaming. Spawn failures (program missing, permissions) surface as `Err`.
pub async fn run(
    program: &str,
    args: &[String],
    cwd: Option<&Utf8Path>,
) -> std::io::Result<CommandOutput> {
    tracing::debug!("Executing: {}", render(program, args));

    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let output = cmd.output().await?;

    let result = CommandOutput {
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };

    tracing::debug!(
        "{} exited with {:?} ({} bytes stdout, {} bytes stderr)",
        program,
        result.code,
        result.stdout.len(),
        result.stderr.len()
    );

    Ok(result)
}

/// Render a command line for display.
pub fn render(program: &str, args: &[String]) -> String {
    let mut parts = vec![program.to_string()];
    parts.extend(args.iter().cloned());
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let args = vec!["-jar".to_string(), "tool.jar".to_string(), "d".to_string()];
        assert_eq!(render("java", &args), "java -jar tool.jar d");
    }

    #[test]
    fn test_success_requires_zero_exit() {
        let ok = CommandOutput {
            code: Some(0),
            stdout: String::new(),
            // Warnings on stderr do not make a run a failure
            stderr: "W: something noisy".to_string(),
        };
        assert!(ok.success());

        let failed = CommandOutput {
            code: Some(1),
            stdout: String::new(),
            stderr: String::new(),
        };
        assert!(!failed.success());

        let killed = CommandOutput {
            code: None,
            stdout: String::new(),
            stderr: String::new(),
        };
        assert!(!killed.success());
    }
}
