//! The downloads table printed above the changelog.
//!
//! Lists every release artifact found in the artifact directory together
//! with its SHA-512 digest and a link to where it will be published.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha512};
use tracing::debug;

use crate::error::{Error, Result};

/// Bucket that production releases are published from.
pub const PRODUCTION_BUCKET: &str = "kubernetes-release";

/// Canonical download host for [`PRODUCTION_BUCKET`].
const PRODUCTION_URL_PREFIX: &str = "https://dl.k8s.io";

/// Storage host used for every other bucket.
const STORAGE_URL_PREFIX: &str = "https://storage.googleapis.com";

const DOCUMENTATION_URL: &str = "https://docs.k8s.io";

/// A set of artifacts listed under one table.
#[derive(Debug, Clone, Copy)]
pub struct ArtifactGroup {
    /// Table heading; the first group has none.
    pub heading: Option<&'static str>,
    /// File name patterns, relative to the artifact directory.
    pub patterns: &'static [&'static str],
}

/// Artifact groups, in the order their tables are printed.
pub const ARTIFACT_GROUPS: &[ArtifactGroup] = &[
    ArtifactGroup {
        heading: None,
        patterns: &["kubernetes.tar.gz", "kubernetes-src.tar.gz"],
    },
    ArtifactGroup {
        heading: Some("Client Binaries"),
        patterns: &["kubernetes-client*.tar.gz"],
    },
    ArtifactGroup {
        heading: Some("Server Binaries"),
        patterns: &["kubernetes-server*.tar.gz"],
    },
    ArtifactGroup {
        heading: Some("Node Binaries"),
        patterns: &["kubernetes-node*.tar.gz"],
    },
];

/// Base URL that artifacts in `bucket` are served from.
#[must_use]
pub fn url_prefix(bucket: &str) -> String {
    if bucket == PRODUCTION_BUCKET {
        PRODUCTION_URL_PREFIX.to_string()
    } else {
        format!("{STORAGE_URL_PREFIX}/{bucket}/release")
    }
}

/// Compute the lower-case hex SHA-512 digest of a file's contents.
///
/// The file is streamed into the hasher and closed before returning, on
/// success or failure.
///
/// # Errors
///
/// Returns [`Error::ArtifactOpen`] or [`Error::ArtifactRead`] if the file
/// cannot be opened or read to completion.
pub fn sha512_file(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|source| Error::ArtifactOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let mut hasher = Sha512::new();
    io::copy(&mut file, &mut hasher).map_err(|source| Error::ArtifactRead {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(format!("{:x}", hasher.finalize()))
}

/// Expand an artifact pattern under `artifact_dir`.
fn matching_artifacts(artifact_dir: &str, pattern: &str) -> Result<Vec<PathBuf>> {
    let full_pattern = Path::new(artifact_dir).join(pattern);
    let full_pattern = full_pattern.to_string_lossy();

    let paths = glob::glob(&full_pattern).map_err(|source| Error::GlobPattern {
        pattern: full_pattern.to_string(),
        source,
    })?;

    paths.map(|entry| entry.map_err(Error::from)).collect()
}

/// Write the downloads table for a release.
///
/// Does nothing when `artifact_dir` is empty. Otherwise both tags are
/// required and are checked before anything is written.
///
/// # Errors
///
/// Returns [`Error::MissingReleaseTags`] if a tag is empty, and an I/O
/// class error if a pattern is malformed, an artifact can't be read, or the
/// writer fails. Output already written is left in place.
pub fn write_downloads_table<W: Write>(
    w: &mut W,
    bucket: &str,
    artifact_dir: &str,
    previous_tag: &str,
    new_tag: &str,
) -> Result<()> {
    if artifact_dir.is_empty() {
        return Ok(());
    }
    if previous_tag.is_empty() || new_tag.is_empty() {
        return Err(Error::missing_release_tags(previous_tag, new_tag));
    }

    write!(w, "# {new_tag}\n\n")?;
    write!(w, "[Documentation]({DOCUMENTATION_URL})\n\n")?;
    write!(w, "## Downloads for {new_tag}\n\n")?;

    let prefix = url_prefix(bucket);

    for group in ARTIFACT_GROUPS {
        if let Some(heading) = group.heading {
            write!(w, "### {heading}\n\n")?;
        }
        writeln!(w, "filename | sha512 hash")?;
        writeln!(w, "-------- | -----------")?;

        for pattern in group.patterns {
            for path in matching_artifacts(artifact_dir, pattern)? {
                let digest = sha512_file(&path)?;
                let file_name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                debug!(artifact = %path.display(), sha512 = %digest, "Hashed artifact");

                writeln!(
                    w,
                    "[{file_name}]({prefix}/{new_tag}/{file_name}) | `{digest}`"
                )?;
            }
        }

        writeln!(w)?;
    }

    write!(w, "## Changelog since {previous_tag}\n\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    // sha512("")
    const EMPTY_SHA512: &str = "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce\
                                47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e";

    // sha512("abc")
    const ABC_SHA512: &str = "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
                              2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f";

    #[test]
    fn test_url_prefix_production_bucket() {
        assert_eq!(url_prefix("kubernetes-release"), "https://dl.k8s.io");
    }

    #[test]
    fn test_url_prefix_other_bucket() {
        assert_eq!(
            url_prefix("kubernetes-release-dev"),
            "https://storage.googleapis.com/kubernetes-release-dev/release"
        );
    }

    #[test]
    fn test_sha512_file() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty");
        let abc = dir.path().join("abc");
        fs::write(&empty, b"").unwrap();
        fs::write(&abc, b"abc").unwrap();

        assert_eq!(sha512_file(&empty).unwrap(), EMPTY_SHA512);
        assert_eq!(sha512_file(&abc).unwrap(), ABC_SHA512);
    }

    #[test]
    fn test_sha512_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = sha512_file(&dir.path().join("missing.tar.gz")).unwrap_err();
        assert!(matches!(err, Error::ArtifactOpen { .. }));
        assert!(err.is_io_error());
    }

    #[test]
    fn test_empty_artifact_dir_writes_nothing() {
        let mut out = Vec::new();
        write_downloads_table(&mut out, PRODUCTION_BUCKET, "", "", "").unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_missing_previous_tag_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        let err = write_downloads_table(
            &mut out,
            PRODUCTION_BUCKET,
            &dir.path().to_string_lossy(),
            "",
            "v1.15.0",
        )
        .unwrap_err();

        assert!(matches!(err, Error::MissingReleaseTags { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_missing_new_tag_is_config_error() {
        let mut out = Vec::new();
        let err = write_downloads_table(&mut out, PRODUCTION_BUCKET, "/out", "v1.14.0", "")
            .unwrap_err();
        assert!(err.is_config_error());
        assert!(out.is_empty());
    }

    #[test]
    fn test_table_lists_matching_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("kubernetes.tar.gz"), b"abc").unwrap();
        fs::write(dir.path().join("kubernetes-client-linux-amd64.tar.gz"), b"").unwrap();
        fs::write(dir.path().join("unrelated.txt"), b"ignored").unwrap();

        let mut out = Vec::new();
        write_downloads_table(
            &mut out,
            PRODUCTION_BUCKET,
            &dir.path().to_string_lossy(),
            "v1.14.0",
            "v1.15.0",
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("# v1.15.0\n\n[Documentation](https://docs.k8s.io)\n\n"));
        assert!(text.contains("## Downloads for v1.15.0\n\n"));
        assert!(text.contains(&format!(
            "[kubernetes.tar.gz](https://dl.k8s.io/v1.15.0/kubernetes.tar.gz) | `{ABC_SHA512}`\n"
        )));
        assert!(text.contains(&format!(
            "[kubernetes-client-linux-amd64.tar.gz](https://dl.k8s.io/v1.15.0/kubernetes-client-linux-amd64.tar.gz) | `{EMPTY_SHA512}`\n"
        )));
        assert!(!text.contains("unrelated.txt"));
        assert_eq!(text.matches("filename | sha512 hash").count(), 4);
        assert!(text.contains("### Client Binaries\n\n"));
        assert!(text.contains("### Server Binaries\n\n"));
        assert!(text.contains("### Node Binaries\n\n"));
        assert!(text.ends_with("## Changelog since v1.14.0\n\n"));
    }

    #[test]
    fn test_malformed_pattern_is_io_error() {
        let mut out = Vec::new();
        let err = write_downloads_table(&mut out, PRODUCTION_BUCKET, "/tmp/[", "v1", "v2")
            .unwrap_err();
        assert!(matches!(err, Error::GlobPattern { .. }));
        assert!(err.is_io_error());
    }
}
