//! Manifest handling - reading and rewriting the version held in project files
//!
//! Every supported file name maps to a [`VersionFileFormat`] describing which
//! line carries the version and how to capture it. Supporting a new manifest
//! only means adding an entry to the format table.

pub mod finder;

pub use finder::VersionFileFinder;

use std::fs;
use std::io::Write;
use std::path::Path;

use regex::Regex;
use tracing::debug;

use crate::error::{Result, VrsnError};

const SEMVER_GROUP: &str = "semver";

const TOML_PATTERN: &str = r#"(.*)(version *=* *"*)(?P<semver>\d+.\d+.\d+)(.*)"#;

/// How to find and replace the version inside one kind of manifest.
#[derive(Debug, Clone, Copy)]
pub struct VersionFileFormat {
    /// Name used in "unable to read version from ..." errors
    pub description: &'static str,
    locator: VersionLine,
}

/// Where the version sits inside a manifest.
#[derive(Debug, Clone, Copy)]
enum VersionLine {
    /// The trimmed first line is the version
    FirstLine,
    /// The first line selected by `matcher` that `pattern` captures
    /// (groups 1, 2 and 4 surround the `semver` group)
    Matching {
        matcher: fn(&str) -> bool,
        pattern: &'static str,
    },
}

fn toml_line(line: &str) -> bool {
    line.contains("version =")
}

fn package_json_line(line: &str) -> bool {
    line.contains(r#""version": ""#)
}

fn setup_py_line(line: &str) -> bool {
    line.contains("version=")
}

fn cmake_line(line: &str) -> bool {
    line.contains("project(")
}

const TOML: VersionFileFormat = VersionFileFormat {
    description: "toml file",
    locator: VersionLine::Matching {
        matcher: toml_line,
        pattern: TOML_PATTERN,
    },
};

// gradle files are not toml, but the version assignment looks the same
const GRADLE: VersionFileFormat = VersionFileFormat {
    description: "build.gradle",
    locator: VersionLine::Matching {
        matcher: toml_line,
        pattern: TOML_PATTERN,
    },
};

const CMAKE: VersionFileFormat = VersionFileFormat {
    description: "CMakeLists.txt",
    locator: VersionLine::Matching {
        matcher: cmake_line,
        pattern: r"(project\(.*)(VERSION ){1}(?P<semver>\d+.\d+.\d+)(.*\))",
    },
};

const PACKAGE_JSON: VersionFileFormat = VersionFileFormat {
    description: "package.json",
    locator: VersionLine::Matching {
        matcher: package_json_line,
        pattern: r#"(.*)("version": *"){1}(?P<semver>\d+.\d+.\d+)(".*)"#,
    },
};

const SETUP_PY: VersionFileFormat = VersionFileFormat {
    description: "setup.py",
    locator: VersionLine::Matching {
        matcher: setup_py_line,
        pattern: r#"(.*)(version=['"])(?P<semver>\d+.\d+.\d+)(.*)"#,
    },
};

const VERSION_FILE: VersionFileFormat = VersionFileFormat {
    description: "VERSION file",
    locator: VersionLine::FirstLine,
};

/// Supported version file names and their formats.
pub const SUPPORTED_FILES: &[(&str, VersionFileFormat)] = &[
    ("build.gradle", GRADLE),
    ("build.gradle.kts", GRADLE),
    ("Cargo.toml", TOML),
    ("CMakeLists.txt", CMAKE),
    ("package.json", PACKAGE_JSON),
    ("pyproject.toml", TOML),
    ("setup.py", SETUP_PY),
    ("VERSION", VERSION_FILE),
];

/// Returns true when `file_name` is one of the supported manifests.
pub fn is_supported(file_name: &str) -> bool {
    SUPPORTED_FILES.iter().any(|(name, _)| *name == file_name)
}

/// Looks up the format for a version file path.
///
/// Only the final path component is considered so relative paths passed
/// with `--file` work.
pub fn format_for(path: &Path) -> Result<&'static VersionFileFormat> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();

    SUPPORTED_FILES
        .iter()
        .find(|(name, _)| *name == file_name)
        .map(|(_, format)| format)
        .ok_or_else(|| VrsnError::UnsupportedVersionFile(file_name.to_string()))
}

impl VersionFileFormat {
    fn not_found(&self) -> VrsnError {
        VrsnError::version_not_found(self.description)
    }

    /// Extracts the version from manifest contents.
    ///
    /// First-line formats return the trimmed first line. Other formats
    /// return the capture from the first selected line the pattern matches.
    pub fn extract_version(&self, contents: &str) -> Result<String> {
        let (matcher, pattern) = match self.locator {
            VersionLine::FirstLine => {
                let first = contents.lines().next().map(str::trim).unwrap_or_default();
                if first.is_empty() {
                    return Err(self.not_found());
                }
                return Ok(first.to_string());
            }
            VersionLine::Matching { matcher, pattern } => (matcher, pattern),
        };

        let re = Regex::new(pattern)?;
        contents
            .lines()
            .filter(|line| matcher(line))
            .find_map(|line| {
                re.captures(line)
                    .and_then(|caps| caps.name(SEMVER_GROUP))
                    .map(|m| m.as_str().to_string())
            })
            .ok_or_else(|| self.not_found())
    }

    /// Returns `contents` with the version replaced by `new_version`.
    ///
    /// Only the line the version is read from is rewritten; all other lines
    /// are kept as they are.
    pub fn replace_version(&self, contents: &str, new_version: &str) -> Result<String> {
        let (matcher, pattern) = match self.locator {
            VersionLine::FirstLine => return Ok(format!("{}\n", new_version)),
            VersionLine::Matching { matcher, pattern } => (matcher, pattern),
        };

        let re = Regex::new(pattern)?;
        let replacement = format!("${{1}}${{2}}{}${{4}}", new_version);
        let mut replaced = false;
        let mut lines = Vec::new();

        for line in contents.lines() {
            if !replaced && matcher(line) && re.is_match(line) {
                lines.push(re.replace(line, replacement.as_str()).into_owned());
                replaced = true;
                continue;
            }
            lines.push(line.to_string());
        }

        if !replaced {
            return Err(self.not_found());
        }

        let mut output = lines.join("\n");
        output.push('\n');
        Ok(output)
    }
}

/// Reads the version from `file`, resolved relative to `dir`.
pub fn read_version_from_file(dir: &Path, file: &Path) -> Result<String> {
    let format = format_for(file)?;
    let contents = fs::read_to_string(dir.join(file))?;
    format.extract_version(&contents)
}

/// Extracts the version from contents that were already read, e.g. the
/// version file as of another branch.
pub fn read_version_from_str(file: &Path, contents: &str) -> Result<String> {
    format_for(file)?.extract_version(contents)
}

/// Rewrites the version in `file` in place.
///
/// The new contents go to a temporary file in the same directory which then
/// replaces the original, so a failed write leaves the manifest untouched.
pub fn write_version_to_file(dir: &Path, file: &Path, new_version: &str) -> Result<()> {
    let format = format_for(file)?;
    let path = dir.join(file);
    let contents = fs::read_to_string(&path)?;
    let updated = format.replace_version(&contents, new_version)?;

    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(dir);
    let mut tmp = tempfile::Builder::new()
        .prefix("vrsn-tmp-")
        .tempfile_in(parent)?;
    tmp.write_all(updated.as_bytes())?;
    fs::set_permissions(tmp.path(), fs::metadata(&path)?.permissions())?;
    tmp.persist(&path).map_err(|e| VrsnError::Io(e.error))?;

    debug!("wrote version {} to {}", new_version, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_for_supported_files() {
        for (name, _) in SUPPORTED_FILES {
            assert!(format_for(Path::new(name)).is_ok(), "{} should be supported", name);
        }
        assert!(format_for(Path::new("sub/dir/package.json")).is_ok());
    }

    #[test]
    fn test_format_for_unsupported_file() {
        let err = format_for(Path::new("foo.txt")).unwrap_err();
        assert!(matches!(err, VrsnError::UnsupportedVersionFile(ref name) if name == "foo.txt"));
    }

    #[test]
    fn test_extract_from_cargo_toml() {
        let contents = "[package]\nname = \"demo\"\nversion = \"2.14.741\"\nedition = \"2021\"\n";
        assert_eq!(TOML.extract_version(contents).unwrap(), "2.14.741");
    }

    #[test]
    fn test_extract_skips_selected_lines_without_semver() {
        let contents = "[package]\nrust-version = \"1.70\"\nversion = \"0.3.1\"\n";
        assert_eq!(TOML.extract_version(contents).unwrap(), "0.3.1");
    }

    #[test]
    fn test_extract_from_package_json() {
        let contents = "{\n  \"name\": \"demo\",\n  \"version\": \"1.0.4\",\n  \"main\": \"index.js\"\n}\n";
        assert_eq!(PACKAGE_JSON.extract_version(contents).unwrap(), "1.0.4");
    }

    #[test]
    fn test_extract_from_setup_py() {
        let contents = "setup(\n    name='demo',\n    version='0.2.0',\n)\n";
        assert_eq!(SETUP_PY.extract_version(contents).unwrap(), "0.2.0");
    }

    #[test]
    fn test_extract_from_cmake() {
        let contents = "cmake_minimum_required(VERSION 3.10)\nproject(Demo VERSION 1.3.0 LANGUAGES CXX)\n";
        assert_eq!(CMAKE.extract_version(contents).unwrap(), "1.3.0");
    }

    #[test]
    fn test_extract_from_version_file() {
        assert_eq!(VERSION_FILE.extract_version("v6.6.6\n").unwrap(), "v6.6.6");
    }

    #[test]
    fn test_version_file_takes_whole_first_line() {
        // no pattern is applied, so the line is returned as written
        assert_eq!(
            VERSION_FILE.extract_version("  1.2\nsecond 3.4.5\n").unwrap(),
            "1.2"
        );
        assert_eq!(
            VERSION_FILE.replace_version("1.2\nsecond 3.4.5\n", "1.3.0").unwrap(),
            "1.3.0\n"
        );
    }

    #[test]
    fn test_patterns_compile_with_semver_group() {
        for (name, format) in SUPPORTED_FILES {
            if let VersionLine::Matching { pattern, .. } = format.locator {
                let re = Regex::new(pattern).unwrap();
                assert!(
                    re.capture_names().flatten().any(|n| n == SEMVER_GROUP),
                    "{} pattern has no semver group",
                    name
                );
                assert_eq!(re.captures_len(), 5, "{} pattern group count", name);
            }
        }
    }

    #[test]
    fn test_extract_not_found() {
        let err = VERSION_FILE.extract_version("").unwrap_err();
        assert!(matches!(err, VrsnError::VersionNotFound { ref format } if format == "VERSION file"));

        let err = PACKAGE_JSON.extract_version("{\n  \"name\": \"demo\"\n}\n").unwrap_err();
        assert!(matches!(err, VrsnError::VersionNotFound { ref format } if format == "package.json"));
    }

    #[test]
    fn test_replace_only_rewrites_version_line() {
        let contents = "[package]\nname = \"demo\"\nversion = \"0.1.0\"\n\n[dependencies]\nserde = { version = \"1.0.228\" }\n";
        let updated = TOML.replace_version(contents, "0.2.0").unwrap();
        assert_eq!(
            updated,
            "[package]\nname = \"demo\"\nversion = \"0.2.0\"\n\n[dependencies]\nserde = { version = \"1.0.228\" }\n"
        );
    }

    #[test]
    fn test_replace_keeps_surrounding_text() {
        let contents = "project(Demo VERSION 1.3.0 LANGUAGES CXX)\n";
        assert_eq!(
            CMAKE.replace_version(contents, "1.4.0").unwrap(),
            "project(Demo VERSION 1.4.0 LANGUAGES CXX)\n"
        );

        let contents = "  \"version\": \"1.0.4\",\n";
        assert_eq!(
            PACKAGE_JSON.replace_version(contents, "10.0.0").unwrap(),
            "  \"version\": \"10.0.0\",\n"
        );
    }

    #[test]
    fn test_replace_version_file() {
        assert_eq!(VERSION_FILE.replace_version("1.0.0\n", "1.0.1").unwrap(), "1.0.1\n");
    }

    #[test]
    fn test_replace_not_found() {
        assert!(SETUP_PY.replace_version("setup(name='demo')\n", "1.0.0").is_err());
    }

    #[test]
    fn test_is_supported() {
        assert!(is_supported("Cargo.toml"));
        assert!(!is_supported("cargo.toml"));
    }
}
