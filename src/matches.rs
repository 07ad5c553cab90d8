//! # Path Matching
//!
//! Predicates used by the file-iterator filters:
//!
//! | Function | Matches against | Semantics |
//! |----------|-----------------|-----------|
//! | [`matches_base_path`] | resolved path | component-wise ancestry, not string prefix |
//! | [`matches_glob`] | path as given | shell-style glob, `*` also crosses `/` |
//! | [`matches_regex`] | any text | full match against any of the patterns |
//!
//! Every function accepts either one pattern or a list of them; a list is an
//! OR, matching if any element matches.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use regex::Regex;

use crate::{Expansion, FsError, expand_path};

/// One or more glob patterns (or extensions).
pub trait Patterns {
    /// Collect the patterns.
    fn into_patterns(self) -> Vec<String>;
}

impl Patterns for &str {
    fn into_patterns(self) -> Vec<String> {
        vec![self.to_owned()]
    }
}

impl Patterns for String {
    fn into_patterns(self) -> Vec<String> {
        vec![self]
    }
}

impl<S: AsRef<str>> Patterns for Vec<S> {
    fn into_patterns(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_owned()).collect()
    }
}

impl<S: AsRef<str>> Patterns for &[S] {
    fn into_patterns(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_owned()).collect()
    }
}

impl<S: AsRef<str>, const N: usize> Patterns for [S; N] {
    fn into_patterns(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_owned()).collect()
    }
}

/// One or more base paths.
pub trait PathList {
    /// Collect the paths.
    fn into_paths(self) -> Vec<PathBuf>;
}

impl PathList for &str {
    fn into_paths(self) -> Vec<PathBuf> {
        vec![PathBuf::from(self)]
    }
}

impl PathList for String {
    fn into_paths(self) -> Vec<PathBuf> {
        vec![PathBuf::from(self)]
    }
}

impl PathList for &Path {
    fn into_paths(self) -> Vec<PathBuf> {
        vec![self.to_path_buf()]
    }
}

impl PathList for PathBuf {
    fn into_paths(self) -> Vec<PathBuf> {
        vec![self]
    }
}

impl<P: AsRef<Path>> PathList for Vec<P> {
    fn into_paths(self) -> Vec<PathBuf> {
        self.iter().map(|p| p.as_ref().to_path_buf()).collect()
    }
}

impl<P: AsRef<Path>> PathList for &[P] {
    fn into_paths(self) -> Vec<PathBuf> {
        self.iter().map(|p| p.as_ref().to_path_buf()).collect()
    }
}

impl<P: AsRef<Path>, const N: usize> PathList for [P; N] {
    fn into_paths(self) -> Vec<PathBuf> {
        self.iter().map(|p| p.as_ref().to_path_buf()).collect()
    }
}

/// One or more regular expressions, raw or pre-compiled.
///
/// Compiled expressions are re-anchored so that they must match the whole
/// text.
pub trait RegexList {
    /// Compile (or re-anchor) the expressions.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidPattern`] if an expression does not compile
    fn into_regexes(self) -> Result<Vec<Regex>, FsError>;
}

impl RegexList for &str {
    fn into_regexes(self) -> Result<Vec<Regex>, FsError> {
        compile_regex([self])
    }
}

impl RegexList for String {
    fn into_regexes(self) -> Result<Vec<Regex>, FsError> {
        compile_regex([self])
    }
}

impl RegexList for Vec<&str> {
    fn into_regexes(self) -> Result<Vec<Regex>, FsError> {
        compile_regex(self)
    }
}

impl RegexList for Vec<String> {
    fn into_regexes(self) -> Result<Vec<Regex>, FsError> {
        compile_regex(self)
    }
}

impl RegexList for &[&str] {
    fn into_regexes(self) -> Result<Vec<Regex>, FsError> {
        compile_regex(self)
    }
}

impl<const N: usize> RegexList for [&str; N] {
    fn into_regexes(self) -> Result<Vec<Regex>, FsError> {
        compile_regex(self)
    }
}

impl RegexList for Regex {
    fn into_regexes(self) -> Result<Vec<Regex>, FsError> {
        compile_regex([self.as_str()])
    }
}

impl RegexList for &Regex {
    fn into_regexes(self) -> Result<Vec<Regex>, FsError> {
        compile_regex([self.as_str()])
    }
}

impl RegexList for Vec<Regex> {
    fn into_regexes(self) -> Result<Vec<Regex>, FsError> {
        compile_regex(self.iter().map(Regex::as_str))
    }
}

/// Compile each pattern so that it only matches an entire string.
///
/// # Errors
///
/// - [`FsError::InvalidPattern`] for the first pattern that fails to compile
pub fn compile_regex<I>(patterns: I) -> Result<Vec<Regex>, FsError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    patterns
        .into_iter()
        .map(|pattern| {
            let pattern = pattern.as_ref();
            Regex::new(&format!("^(?:{pattern})$")).map_err(|e| FsError::InvalidPattern {
                pattern: pattern.to_owned(),
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Compile glob patterns into a single matcher.
///
/// # Errors
///
/// - [`FsError::InvalidPattern`] for the first pattern that fails to compile
pub(crate) fn compile_globs(patterns: &[String]) -> Result<GlobSet, FsError> {
    let invalid = |pattern: &str, e: globset::Error| FsError::InvalidPattern {
        pattern: pattern.to_owned(),
        reason: e.to_string(),
    };

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).map_err(|e| invalid(pattern, e))?);
    }
    builder.build().map_err(|e| invalid(&patterns.join(","), e))
}

/// Returns `true` if `path` equals or lies below one of the resolved `base_paths`.
pub(crate) fn is_within(path: &Path, base_paths: &[PathBuf]) -> bool {
    base_paths.iter().any(|base| path.starts_with(base))
}

/// Returns `true` if `path` lies inside (or is) any of `base_paths`.
///
/// Both sides are resolved with [`Expansion::ALL`] first; containment is
/// checked per path component, so `/home/usernameX` is not inside
/// `/home/username`.
///
/// ```rust
/// use fluentfs::matches_base_path;
///
/// assert!(matches_base_path("/home/username/a.txt", "/home/username").unwrap());
/// assert!(!matches_base_path("/home/usernameX/a.txt", "/home/username").unwrap());
/// ```
///
/// # Errors
///
/// - [`FsError::Io`] if a relative path needs the unavailable working directory
pub fn matches_base_path(path: impl AsRef<Path>, base_paths: impl PathList) -> Result<bool, FsError> {
    let path = expand_path(path, Expansion::ALL)?;
    let base_paths = base_paths
        .into_paths()
        .into_iter()
        .map(|base| expand_path(base, Expansion::ALL))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(is_within(&path, &base_paths))
}

/// Returns `true` if `path`, exactly as given, matches any glob pattern.
///
/// # Errors
///
/// - [`FsError::InvalidPattern`] if a pattern does not compile
pub fn matches_glob(path: impl AsRef<Path>, patterns: impl Patterns) -> Result<bool, FsError> {
    let globs = compile_globs(&patterns.into_patterns())?;
    Ok(globs.is_match(path.as_ref()))
}

/// Returns `true` if any expression fully matches `text`.
///
/// # Errors
///
/// - [`FsError::InvalidPattern`] if an expression does not compile
pub fn matches_regex(text: &str, regex: impl RegexList) -> Result<bool, FsError> {
    Ok(matches_compiled_regex(text, &regex.into_regexes()?))
}

/// Returns `true` if any of the compiled expressions matches `text`.
///
/// The expressions are expected to come from [`compile_regex`] (or
/// [`RegexList`]) so that they are anchored at both ends.
pub fn matches_compiled_regex(text: &str, regexes: &[Regex]) -> bool {
    regexes.iter().any(|regex| regex.is_match(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_path_is_component_wise() {
        assert!(matches_base_path("/home/username", "/home/username").unwrap());
        assert!(matches_base_path("/home/username/x/y", "/home/username/").unwrap());
        assert!(!matches_base_path("/home/usernameX", "/home/username").unwrap());
        assert!(!matches_base_path("/home", "/home/username").unwrap());
    }

    #[test]
    fn base_path_list_is_an_or() {
        let bases = ["/srv/a", "/srv/b"];
        assert!(matches_base_path("/srv/b/file", bases).unwrap());
        assert!(!matches_base_path("/srv/c/file", bases).unwrap());
        assert!(!matches_base_path("/srv/c/file", Vec::<PathBuf>::new()).unwrap());
    }

    #[test]
    fn base_path_normalizes_dots() {
        assert!(matches_base_path("/srv/a/../b/file", "/srv/b").unwrap());
    }

    #[test]
    fn glob_star_crosses_separators() {
        assert!(matches_glob("/project/src/lib.rs", "*.rs").unwrap());
        assert!(matches_glob("/project/src/lib.rs", "/project/*").unwrap());
        assert!(!matches_glob("/project/src/lib.rs", "*.toml").unwrap());
        assert!(matches_glob("/project/Cargo.toml", vec!["*.rs", "*.toml"]).unwrap());
    }

    #[test]
    fn glob_character_classes() {
        assert!(matches_glob("/a/file1", "*file[0-9]").unwrap());
        assert!(!matches_glob("/a/fileX", "*file[0-9]").unwrap());
    }

    #[test]
    fn glob_invalid_pattern() {
        assert!(matches!(
            matches_glob("/a", "[unclosed"),
            Err(FsError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn regex_requires_full_match() {
        assert!(matches_regex("abc", "a.c").unwrap());
        assert!(!matches_regex("xabc", "a.c").unwrap());
        assert!(!matches_regex("abcx", "a.c").unwrap());
        assert!(matches_regex("ab", "a|ab").unwrap());
    }

    #[test]
    fn regex_list_is_an_or() {
        assert!(matches_regex("b.txt", ["a.*", "b.*"]).unwrap());
        assert!(!matches_regex("c.txt", vec!["a.*", "b.*"]).unwrap());
    }

    #[test]
    fn precompiled_regex_is_anchored() {
        let regex = Regex::new("a.c").unwrap();
        assert!(!matches_regex("xabc", &regex).unwrap());
        assert!(matches_regex("abc", regex).unwrap());
    }

    #[test]
    fn invalid_regex() {
        assert!(matches!(
            matches_regex("x", "(unclosed"),
            Err(FsError::InvalidPattern { .. })
        ));
    }
}
