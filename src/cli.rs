use camino::Utf8PathBuf;
use clap::Parser;

/// Command-line interface.
///
/// The pipeline itself is non-interactive: everything that used to be a
/// console prompt (delete the working tree, open the output folder) is an
/// explicit opt-in flag, so the tool stays scriptable.
#[derive(Parser, Debug)]
#[command(
    name = "apkrename",
    version,
    about = "Rename an Android app's display name, then rebuild and resign the APK"
)]
pub struct Cli {
    /// APK input path
    #[arg(short, long)]
    pub input: Utf8PathBuf,

    /// String to be replaced in the strings resource
    #[arg(long)]
    pub instring: String,

    /// Replacement display name
    #[arg(long)]
    pub outstring: String,

    /// Signed APK output path (defaults to the signer's dist location)
    #[arg(short, long)]
    pub output: Option<Utf8PathBuf>,

    /// Path to the apktool jar (defaults to libs/apktool/apktool.jar)
    #[arg(long)]
    pub apktool: Option<Utf8PathBuf>,

    /// Path to the apksigner jar (defaults to libs/apksigner/apksigner.jar)
    #[arg(long)]
    pub apksigner: Option<Utf8PathBuf>,

    /// Overwrite an existing decompile directory
    #[arg(short = 'w', long)]
    pub overwrite: bool,

    /// Delete the decompiled working tree after a successful run
    #[arg(long)]
    pub delete_workdir: bool,

    /// Reveal the signed APK's folder in the host file browser afterwards
    #[arg(long)]
    pub open_folder: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}
