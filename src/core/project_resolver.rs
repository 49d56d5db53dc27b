// src/core/project_resolver.rs

//! Picks the project file: the explicit argument, or the single match in a directory.

use crate::models::{ProjectSource, ResolvedProject};
use regex::{Regex, RegexBuilder};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Failures while deciding which project to build.
#[derive(Error, Debug)]
pub enum ProjectError {
    /// No file in the directory matches a project pattern.
    #[error(
        "Couldn't find a project to run. \
         Ensure a project exists in '{dir}', or pass the path to the project."
    )]
    NotFound {
        /// The scanned directory.
        dir: String,
    },
    /// More than one file matches.
    #[error(
        "Specify which project file to use because '{dir}' \
         contains more than one project file: {found}."
    )]
    Ambiguous {
        /// The scanned directory.
        dir: String,
        /// The matching file names, comma separated.
        found: String,
    },
    /// The directory itself could not be listed.
    #[error("Could not read directory '{dir}': {source}")]
    Scan {
        /// The scanned directory.
        dir: String,
        /// The walk error.
        #[source]
        source: walkdir::Error,
    },
    /// A configured pattern does not compile.
    #[error("Invalid project pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as configured.
        pattern: String,
        /// The regex error for its translation.
        #[source]
        source: regex::Error,
    },
    /// The pattern list is empty.
    #[error("No project patterns are configured.")]
    NoPatterns,
}

/// Decides whether a file name looks like a project file.
///
/// Patterns are simple globs over the file name only: `*` matches any run of
/// characters and `?` a single character. Matching ignores case on Windows.
#[derive(Debug, Clone)]
pub struct ProjectMatcher {
    patterns: Vec<Regex>,
}

impl ProjectMatcher {
    /// Compiles the globs. At least one is required.
    pub fn new<S: AsRef<str>>(globs: &[S]) -> Result<Self, ProjectError> {
        if globs.is_empty() {
            return Err(ProjectError::NoPatterns);
        }
        let patterns = globs
            .iter()
            .map(|glob| compile_glob(glob.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// True if the last path component of `candidate` matches any pattern.
    pub fn matches(&self, candidate: &str) -> bool {
        let file_name = Path::new(candidate)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(candidate);
        self.patterns.iter().any(|re| re.is_match(file_name))
    }
}

fn compile_glob(glob: &str) -> Result<Regex, ProjectError> {
    let mut source = String::with_capacity(glob.len() + 8);
    source.push('^');
    for c in glob.chars() {
        match c {
            '*' => source.push_str(r"[^/\\]*"),
            '?' => source.push_str(r"[^/\\]"),
            other => source.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }
    source.push('$');

    RegexBuilder::new(&source)
        .case_insensitive(cfg!(windows))
        .build()
        .map_err(|e| ProjectError::InvalidPattern {
            pattern: glob.to_string(),
            source: e,
        })
}

/// Resolves the project to hand to the build tool.
///
/// An explicit argument is returned as given, without touching the filesystem.
/// Otherwise `dir` is scanned (one level, regular files only) and exactly one
/// matching file must exist.
pub fn resolve_project(
    explicit: Option<&Path>,
    dir: &Path,
    matcher: &ProjectMatcher,
) -> Result<ResolvedProject, ProjectError> {
    if let Some(project) = explicit {
        log::debug!("Using explicit project argument '{}'.", project.display());
        return Ok(ResolvedProject {
            path: project.to_path_buf(),
            source: ProjectSource::Explicit,
        });
    }

    let mut found = find_project_files(dir, matcher)?;
    log::debug!("Project scan of '{}' found {:?}", dir.display(), found);

    match found.len() {
        0 => Err(ProjectError::NotFound {
            dir: dir.display().to_string(),
        }),
        1 => {
            let path = found.remove(0);
            Ok(ResolvedProject {
                path,
                source: ProjectSource::Discovered,
            })
        }
        _ => Err(ProjectError::Ambiguous {
            dir: dir.display().to_string(),
            found: found
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

/// Lists the project files directly inside `dir`, sorted by file name.
///
/// Symlinks count when they point at a regular file. Entries that cannot be read
/// (dangling links, permission errors) are skipped; only an unreadable `dir` fails.
pub fn find_project_files(
    dir: &Path,
    matcher: &ProjectMatcher,
) -> Result<Vec<PathBuf>, ProjectError> {
    let dir = dunce::simplified(dir);
    let mut found = Vec::new();

    let walker = WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() > 0 => {
                log::debug!("Skipping unreadable entry in '{}': {}", dir.display(), e);
                continue;
            }
            Err(e) => {
                return Err(ProjectError::Scan {
                    dir: dir.display().to_string(),
                    source: e,
                });
            }
        };
        // `Path::is_file` follows links and is false for dangling ones.
        if !entry.path().is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str()
            && matcher.matches(name)
        {
            found.push(entry.into_path());
        }
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn default_matcher() -> ProjectMatcher {
        ProjectMatcher::new(&["*.*proj"]).unwrap()
    }

    fn touch(dir: &TempDir, name: &str) {
        fs::write(dir.path().join(name), "<Project />").unwrap();
    }

    // --- Matcher Tests ---

    #[test]
    fn test_matcher_accepts_project_suffixes() {
        let matcher = default_matcher();
        assert!(matcher.matches("App.csproj"));
        assert!(matcher.matches("Lib.fsproj"));
        assert!(matcher.matches("tests/Unit.Tests.vbproj"));
        assert!(!matcher.matches("App.sln"));
        assert!(!matcher.matches("csproj"));
        assert!(!matcher.matches("App.csproj.user"));
    }

    #[test]
    fn test_matcher_escapes_regex_metacharacters() {
        let matcher = ProjectMatcher::new(&["a+b.proj"]).unwrap();
        assert!(matcher.matches("a+b.proj"));
        assert!(!matcher.matches("aab.proj"));
        assert!(!matcher.matches("a+bxproj"));
    }

    #[test]
    fn test_matcher_question_mark_is_single_char() {
        let matcher = ProjectMatcher::new(&["?.sln"]).unwrap();
        assert!(matcher.matches("a.sln"));
        assert!(!matcher.matches("ab.sln"));
    }

    #[test]
    fn test_matcher_requires_patterns() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            ProjectMatcher::new(&empty),
            Err(ProjectError::NoPatterns)
        ));
    }

    // --- Resolution Tests ---

    #[test]
    fn test_resolve_single_project_in_directory() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "App.Tests.csproj");
        touch(&dir, "README.md");

        let resolved = resolve_project(None, dir.path(), &default_matcher()).unwrap();

        assert_eq!(resolved.source, ProjectSource::Discovered);
        assert_eq!(
            resolved.path.file_name().unwrap().to_str(),
            Some("App.Tests.csproj")
        );
        assert!(resolved.path.is_file());
    }

    #[test]
    fn test_resolve_fails_without_projects() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "notes.txt");

        let err = resolve_project(None, dir.path(), &default_matcher()).unwrap_err();

        assert!(matches!(err, ProjectError::NotFound { .. }));
        assert!(err.to_string().contains("Couldn't find a project to run"));
    }

    #[test]
    fn test_resolve_fails_with_multiple_projects() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "B.fsproj");
        touch(&dir, "A.csproj");

        let err = resolve_project(None, dir.path(), &default_matcher()).unwrap_err();

        match err {
            ProjectError::Ambiguous { found, .. } => assert_eq!(found, "A.csproj, B.fsproj"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_explicit_project_wins_regardless_of_directory() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "A.csproj");
        touch(&dir, "B.csproj");

        let explicit = Path::new("other/Thing.csproj");
        let resolved = resolve_project(Some(explicit), dir.path(), &default_matcher()).unwrap();

        assert_eq!(resolved.source, ProjectSource::Explicit);
        assert_eq!(resolved.path, PathBuf::from("other/Thing.csproj"));
    }

    #[test]
    fn test_scan_ignores_directories_and_nested_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("Looks.csproj")).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("Deep.csproj"), "").unwrap();
        touch(&dir, "Top.csproj");

        let found = find_project_files(dir.path(), &default_matcher()).unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].file_name().unwrap().to_str(), Some("Top.csproj"));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_does_not_break_the_scan() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "App.csproj");
        std::os::unix::fs::symlink("/nonexistent/target", dir.path().join("stale.link")).unwrap();
        std::os::unix::fs::symlink("/nonexistent/Gone.csproj", dir.path().join("Gone.csproj"))
            .unwrap();

        let resolved = resolve_project(None, dir.path(), &default_matcher()).unwrap();

        assert_eq!(resolved.source, ProjectSource::Discovered);
        assert_eq!(
            resolved.path.file_name().unwrap().to_str(),
            Some("App.csproj")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_project_file_is_found() {
        let target_dir = TempDir::new().unwrap();
        touch(&target_dir, "Real.csproj");
        let dir = TempDir::new().unwrap();
        std::os::unix::fs::symlink(
            target_dir.path().join("Real.csproj"),
            dir.path().join("Linked.csproj"),
        )
        .unwrap();

        let found = find_project_files(dir.path(), &default_matcher()).unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].file_name().unwrap().to_str(), Some("Linked.csproj"));
    }

    #[test]
    fn test_missing_directory_is_a_scan_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("gone");

        let err = find_project_files(&missing, &default_matcher()).unwrap_err();

        assert!(matches!(err, ProjectError::Scan { .. }));
    }
}
