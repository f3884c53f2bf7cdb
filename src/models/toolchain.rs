use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};

/// Locations of the two external jars the pipeline drives.
///
/// Both tools are opaque collaborators - they are only ever invoked as
/// `java -jar <path> ...` subprocesses, never linked against.
#[derive(Debug, Clone)]
pub struct Toolchain {
    /// Decompiler/rebuilder jar (apktool)
    pub apktool: Utf8PathBuf,

    /// Signer jar (apksigner / uber-apk-signer)
    pub apksigner: Utf8PathBuf,
}

impl Toolchain {
    /// Resolve both tool locations.
    ///
    /// An explicitly supplied path wins; otherwise the tool is expected under
    /// `libs/` next to the executable (`libs/apktool/apktool.jar`,
    /// `libs/apksigner/apksigner.jar`). Either way the resolved path must
    /// exist on disk before any subprocess is spawned.
    pub fn resolve(
        apktool: Option<Utf8PathBuf>,
        apksigner: Option<Utf8PathBuf>,
    ) -> Result<Self> {
        let root = default_root()?;

        Ok(Self {
            apktool: resolve_tool("apktool", apktool, &root)?,
            apksigner: resolve_tool("apksigner", apksigner, &root)?,
        })
    }
}

/// Directory the default `libs/` tree is searched under: the directory
/// holding the running executable.
fn default_root() -> Result<Utf8PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    let root = exe
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_default();
    Utf8PathBuf::from_path_buf(root)
        .map_err(|p| anyhow::anyhow!("Executable directory is not valid UTF-8: {}", p.display()))
}

fn resolve_tool(name: &str, explicit: Option<Utf8PathBuf>, root: &Utf8Path) -> Result<Utf8PathBuf> {
    let path = match explicit {
        Some(path) => path,
        None => root.join("libs").join(name).join(format!("{name}.jar")),
    };

    if !path.exists() {
        bail!("{name} jar not found at {path}. Place it under libs/{name} or pass --{name}");
    }

    tracing::debug!("Resolved {} to {}", name, path);
    Ok(path)
}
