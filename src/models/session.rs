use camino::{Utf8Path, Utf8PathBuf};

/// Paths of one package-editing run.
///
/// A session exists only after a successful decompile: the resource paths are
/// derived from the decompiled directory at construction time, so the rename
/// operations can never run against a package that was not unpacked first.
/// `last_generated_apk` starts empty and is overwritten by both the build and
/// the sign stage - after a full pipeline run it points at the signed APK.
#[derive(Debug, Clone)]
pub struct PackageSession {
    /// The input APK this run is editing
    pub apk_path: Utf8PathBuf,

    /// Root of the decompiled tree
    pub decompile_dir: Utf8PathBuf,

    /// `AndroidManifest.xml` inside the decompiled tree
    pub manifest_path: Utf8PathBuf,

    /// `res/values/strings.xml` inside the decompiled tree
    pub strings_path: Utf8PathBuf,

    /// Path of the most recently produced package artifact
    pub last_generated_apk: Option<Utf8PathBuf>,
}

impl PackageSession {
    pub fn new(apk_path: Utf8PathBuf, decompile_dir: Utf8PathBuf) -> Self {
        let manifest_path = decompile_dir.join("AndroidManifest.xml");
        let strings_path = decompile_dir.join("res").join("values").join("strings.xml");
        Self {
            apk_path,
            decompile_dir,
            manifest_path,
            strings_path,
            last_generated_apk: None,
        }
    }

    /// File name of the input APK (`some/dir/app.apk` -> `app.apk`).
    pub fn apk_file_name(&self) -> &str {
        self.apk_path
            .file_name()
            .unwrap_or_else(|| self.apk_path.as_str())
    }

    /// File stem of the input APK (`some/dir/app.apk` -> `app`).
    pub fn apk_stem(&self) -> &str {
        self.apk_path
            .file_stem()
            .unwrap_or_else(|| self.apk_path.as_str())
    }

    /// Default location the decompiler unpacks into when no output path is
    /// given: `<parent>/<apk-stem>` under the given root.
    pub fn default_decompile_dir(root: &Utf8Path, apk_path: &Utf8Path) -> Utf8PathBuf {
        let stem = apk_path.file_stem().unwrap_or_else(|| apk_path.as_str());
        root.join(stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_paths_derived_from_decompile_dir() {
        let session = PackageSession::new(
            Utf8PathBuf::from("input/app.apk"),
            Utf8PathBuf::from("work/app"),
        );

        assert_eq!(session.manifest_path, "work/app/AndroidManifest.xml");
        assert_eq!(session.strings_path, "work/app/res/values/strings.xml");
        assert!(session.last_generated_apk.is_none());
    }

    #[test]
    fn test_apk_name_helpers() {
        let session = PackageSession::new(
            Utf8PathBuf::from("some/dir/example.apk"),
            Utf8PathBuf::from("example"),
        );

        assert_eq!(session.apk_file_name(), "example.apk");
        assert_eq!(session.apk_stem(), "example");
    }

    #[test]
    fn test_default_decompile_dir() {
        let dir = PackageSession::default_decompile_dir(
            Utf8Path::new("/tmp/work"),
            Utf8Path::new("input/example.apk"),
        );
        assert_eq!(dir, "/tmp/work/example");
    }
}
