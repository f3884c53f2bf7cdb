use camino::{Utf8Path, Utf8PathBuf};
use regex::{NoExpand, Regex, RegexBuilder};
use std::fs;
use thiserror::Error;

use crate::models::{PackageSession, Toolchain};
use crate::services::runner;
use crate::status;

/// Lines in the strings resource are only eligible for substitution when they
/// contain this marker key.
pub const APP_NAME_MARKER: &str = "app_name";

/// Errors that can occur while editing a package
#[derive(Error, Debug)]
pub enum EditError {
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} exited with code {code}")]
    ToolFailed { stage: &'static str, code: i32 },

    #[error("{path} not found")]
    MissingFile { path: Utf8PathBuf },

    #[error("no package attribute in {path}")]
    PackageNameNotFound { path: Utf8PathBuf },

    #[error("nothing to sign, run build first")]
    NothingBuilt,

    #[error("no occurrences of \"{0}\" were replaced")]
    NothingReplaced(String),

    #[error("invalid search string: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Sequences the pipeline stages against the external toolchain.
///
/// Stages run in a fixed order, each gated on the previous one:
///
/// 1. [`decompile`](Self::decompile) - unpack the APK into an editable tree
/// 2. [`rename_app`](Self::rename_app) - substitute the display name in the
///    strings resource
/// 3. [`build`](Self::build) - rebuild the package from the edited tree
/// 4. [`sign`](Self::sign) - resign the rebuilt package
///
/// [`rename_package`](Self::rename_package) also exists but is not part of
/// the default pipeline; rewriting the package name tends to break the
/// rebuild, so callers have to opt into it deliberately.
///
/// The editor never terminates the process: every stage reports through the
/// status logger and returns `Result`, and the driver decides what a failure
/// means. Subprocess success is the exit status - stderr is captured and
/// logged as diagnostics only.
pub struct ResourceEditor {
    toolchain: Toolchain,

    /// Matches the `package="..."` attribute in the manifest
    package_attr_pattern: Regex,
}

impl ResourceEditor {
    pub fn new(toolchain: Toolchain) -> Self {
        Self {
            toolchain,
            package_attr_pattern: Regex::new(r#"package="([^"]+)""#)
                .expect("Invalid package attribute regex"),
        }
    }

    /// Arguments for the decompile invocation:
    /// `java -jar <apktool> d <apk> [-o <output>] [-f]`
    pub fn decompile_args(
        &self,
        apk_path: &Utf8Path,
        output: Option<&Utf8Path>,
        overwrite: bool,
    ) -> Vec<String> {
        let mut args = vec![
            "-jar".to_string(),
            self.toolchain.apktool.to_string(),
            "d".to_string(),
            apk_path.to_string(),
        ];
        if let Some(out) = output {
            args.push("-o".to_string());
            args.push(out.to_string());
        }
        if overwrite {
            args.push("-f".to_string());
        }
        args
    }

    /// Decompile an APK into an editable tree.
    ///
    /// On success returns the session for the rest of the pipeline, with the
    /// decompiled directory either at `output` or at `<cwd>/<apk-stem>` (the
    /// decompiler's own default).
    pub async fn decompile(
        &self,
        apk_path: &Utf8Path,
        output: Option<&Utf8Path>,
        overwrite: bool,
    ) -> Result<PackageSession, EditError> {
        let args = self.decompile_args(apk_path, output, overwrite);

        status::info("Command", &runner::render("java", &args));
        status::info("Decompile", "Trying to decompile the package...");

        let result = runner::run("java", &args, None)
            .await
            .map_err(|source| EditError::Launch {
                program: "java".to_string(),
                source,
            })?;

        if !result.success() {
            tracing::error!("apktool d failed: {}", result.stderr);
            status::error("Decompile", result.stderr.trim());
            return Err(EditError::ToolFailed {
                stage: "decompile",
                code: result.code.unwrap_or(-1),
            });
        }

        // Without -o the decompiler unpacks next to where it was invoked
        let directory = match output {
            Some(out) => out.to_path_buf(),
            None => {
                let cwd = Utf8PathBuf::try_from(std::env::current_dir()?)
                    .map_err(|e| EditError::Io(e.into_io_error()))?;
                PackageSession::default_decompile_dir(&cwd, apk_path)
            }
        };

        status::success("Status", "Package decompiled successfully");
        status::info("Path", &format!("The decompiled package is in: {directory}"));

        Ok(PackageSession::new(apk_path.to_path_buf(), directory))
    }

    /// Rewrite the package name in the manifest.
    ///
    /// Extracts the current name from the `package` attribute, strips the
    /// literal `com.app.` prefix to get the short name, and substitutes
    /// `new_name` for it (case-insensitive) inside that attribute only - the
    /// rest of the manifest is left untouched. Not wired into the default
    /// pipeline: packages renamed this way frequently fail to rebuild.
    pub fn rename_package(
        &self,
        session: &PackageSession,
        new_name: &str,
    ) -> Result<(), EditError> {
        let manifest_path = &session.manifest_path;
        if !manifest_path.exists() {
            status::error(
                "Rename Package",
                &format!("Manifest not found in: {}", session.decompile_dir),
            );
            return Err(EditError::MissingFile {
                path: manifest_path.clone(),
            });
        }

        let manifest = fs::read_to_string(manifest_path)?;
        status::success("Manifest found", manifest_path.as_str());

        let attr = self.package_attr_pattern.captures(&manifest).ok_or_else(|| {
            EditError::PackageNameNotFound {
                path: manifest_path.clone(),
            }
        })?;
        let package_name = attr.get(1).map(|m| m.as_str()).unwrap_or_default();
        status::success("Package name found", package_name);

        // "com.app.example" -> "example"
        let short_name = package_name.strip_prefix("com.app.").unwrap_or(package_name);

        let pattern = literal_ci(short_name)?;
        let new_value = pattern.replace_all(package_name, NoExpand(new_name));
        let new_attr = format!(r#"package="{new_value}""#);

        let old_attr = attr.get(0).map(|m| m.as_str()).unwrap_or_default();
        let new_manifest = manifest.replacen(old_attr, &new_attr, 1);

        fs::write(manifest_path, new_manifest)?;
        status::success("Manifest updated", manifest_path.as_str());

        Ok(())
    }

    /// Substitute the display name in the strings resource.
    ///
    /// Only lines containing [`APP_NAME_MARKER`] are touched; on those lines
    /// every case-insensitive occurrence of `old` (taken literally, not as a
    /// pattern) becomes `new`. Producing output identical to the input means
    /// nothing matched, which is reported as [`EditError::NothingReplaced`]
    /// and the file is left alone.
    pub fn rename_app(
        &self,
        session: &PackageSession,
        old: &str,
        new: &str,
    ) -> Result<(), EditError> {
        let strings_path = &session.strings_path;
        if !strings_path.exists() {
            status::error(
                "Status",
                &format!("strings.xml not found in: {}", session.decompile_dir),
            );
            return Err(EditError::MissingFile {
                path: strings_path.clone(),
            });
        }

        let strings = fs::read_to_string(strings_path)?;
        status::success("File found", strings_path.as_str());

        let pattern = literal_ci(old)?;

        let mut lines = Vec::new();
        for line in strings.lines() {
            if line.contains(APP_NAME_MARKER) {
                lines.push(pattern.replace_all(line, NoExpand(new)).into_owned());
            } else {
                lines.push(line.to_string());
            }
        }
        let new_strings = lines.join("\n") + "\n";

        if new_strings == strings {
            status::error("Rename", "No values replaced!");
            return Err(EditError::NothingReplaced(old.to_string()));
        }

        fs::write(strings_path, new_strings)?;
        status::success("Rename", "Values replaced!");

        Ok(())
    }

    /// Arguments for the rebuild invocation:
    /// `java -jar <apktool> b <dir> [-o <output>] --use-aapt2`
    pub fn build_args(&self, decompile_dir: &Utf8Path, output: Option<&Utf8Path>) -> Vec<String> {
        let mut args = vec![
            "-jar".to_string(),
            self.toolchain.apktool.to_string(),
            "b".to_string(),
            decompile_dir.to_string(),
        ];
        if let Some(out) = output {
            args.push("-o".to_string());
            args.push(out.to_string());
        }
        args.push("--use-aapt2".to_string());
        args
    }

    /// Rebuild the package from the decompiled tree.
    ///
    /// On success `session.last_generated_apk` points at `output` or at the
    /// rebuilder's default `dist/<apk-basename>` under the decompiled tree.
    pub async fn build(
        &self,
        session: &mut PackageSession,
        output: Option<&Utf8Path>,
    ) -> Result<(), EditError> {
        status::info("Status", "Trying to build the new package...");

        let args = self.build_args(&session.decompile_dir, output);
        status::info("Command", &runner::render("java", &args));

        let result = runner::run("java", &args, None)
            .await
            .map_err(|source| EditError::Launch {
                program: "java".to_string(),
                source,
            })?;

        if !result.success() {
            tracing::error!("apktool b failed: {}", result.stderr);
            status::error("Status", "Couldn't build the package");
            return Err(EditError::ToolFailed {
                stage: "build",
                code: result.code.unwrap_or(-1),
            });
        }

        session.last_generated_apk = Some(match output {
            Some(out) => out.to_path_buf(),
            None => session
                .decompile_dir
                .join("dist")
                .join(session.apk_file_name()),
        });

        status::success("Built", "The package has been built successfully");
        Ok(())
    }

    /// Arguments for the signer invocation:
    /// `java -jar <apksigner> --apks <unsigned> [-o <output>]`
    pub fn sign_args(&self, unsigned: &Utf8Path, output: Option<&Utf8Path>) -> Vec<String> {
        let mut args = vec![
            "-jar".to_string(),
            self.toolchain.apksigner.to_string(),
            "--apks".to_string(),
            unsigned.to_string(),
        ];
        if let Some(out) = output {
            args.push("-o".to_string());
            args.push(out.to_string());
        }
        args
    }

    /// Sign the most recently built package.
    ///
    /// The recorded artifact path is updated before the signer runs: either
    /// `output`, or the signer's default naming
    /// `dist/<apk-stem>-aligned-debugSigned.apk`. The default is an
    /// assumption about the tool's behavior, so the recorded path is only
    /// correct when the signer keeps its standard naming.
    pub async fn sign(
        &self,
        session: &mut PackageSession,
        output: Option<&Utf8Path>,
    ) -> Result<(), EditError> {
        status::info("Status", "Trying to sign the package...");

        let unsigned = session
            .last_generated_apk
            .clone()
            .ok_or(EditError::NothingBuilt)?;

        let args = self.sign_args(&unsigned, output);

        session.last_generated_apk = Some(match output {
            Some(out) => out.to_path_buf(),
            None => session
                .decompile_dir
                .join("dist")
                .join(format!("{}-aligned-debugSigned.apk", session.apk_stem())),
        });

        status::info("Command", &runner::render("java", &args));

        let result = runner::run("java", &args, None)
            .await
            .map_err(|source| EditError::Launch {
                program: "java".to_string(),
                source,
            })?;

        if !result.success() {
            tracing::error!("signer failed: {}", result.stderr);
            status::error("Status", "Couldn't sign the package");
            return Err(EditError::ToolFailed {
                stage: "sign",
                code: result.code.unwrap_or(-1),
            });
        }

        let signed = session
            .last_generated_apk
            .as_deref()
            .unwrap_or(&unsigned);
        status::success("Signed", "Successfully signed the package!");
        status::info("Find your signed package in", signed.as_str());

        Ok(())
    }
}

/// Case-insensitive regex matching `text` literally.
fn literal_ci(text: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&regex::escape(text))
        .case_insensitive(true)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> ResourceEditor {
        ResourceEditor::new(Toolchain {
            apktool: Utf8PathBuf::from("libs/apktool/apktool.jar"),
            apksigner: Utf8PathBuf::from("libs/apksigner/apksigner.jar"),
        })
    }

    #[test]
    fn test_decompile_args_default() {
        let args = editor().decompile_args(Utf8Path::new("app.apk"), None, true);
        assert_eq!(
            args,
            ["-jar", "libs/apktool/apktool.jar", "d", "app.apk", "-f"]
        );
    }

    #[test]
    fn test_decompile_args_with_output_no_overwrite() {
        let args = editor().decompile_args(
            Utf8Path::new("app.apk"),
            Some(Utf8Path::new("work/app")),
            false,
        );
        assert_eq!(
            args,
            ["-jar", "libs/apktool/apktool.jar", "d", "app.apk", "-o", "work/app"]
        );
    }

    #[test]
    fn test_build_args_enable_aapt2() {
        let args = editor().build_args(Utf8Path::new("work/app"), None);
        assert_eq!(
            args,
            ["-jar", "libs/apktool/apktool.jar", "b", "work/app", "--use-aapt2"]
        );

        let args = editor().build_args(Utf8Path::new("work/app"), Some(Utf8Path::new("out.apk")));
        assert_eq!(args[4..], ["-o", "out.apk", "--use-aapt2"]);
    }

    #[test]
    fn test_sign_args() {
        let args = editor().sign_args(Utf8Path::new("work/app/dist/app.apk"), None);
        assert_eq!(
            args,
            [
                "-jar",
                "libs/apksigner/apksigner.jar",
                "--apks",
                "work/app/dist/app.apk"
            ]
        );
    }

    #[test]
    fn test_literal_ci_escapes_metacharacters() {
        // A display name with regex metacharacters must match literally
        let pattern = literal_ci("My.App (Beta)").unwrap();
        assert!(pattern.is_match("my.app (beta)"));
        assert!(!pattern.is_match("myxapp (beta)"));
    }
}
