//! Command option structures
//!
//! Built from parsed CLI arguments and passed to each command's `run()`.
//! Fields borrow from [`Cli`](crate::cli::Cli) to avoid clones.

use std::path::Path;

/// Compare command options
///
/// # Example
/// ```no_run
/// use wikilens::commands::options::CompareOptions;
///
/// let articles = vec!["en=berlin.en.txt".to_string(), "de=berlin.de.txt".to_string()];
/// let options = CompareOptions {
///     articles: &articles,
///     output_language: "English",
///     humor: false,
///     tier: "free",
///     json: false,
///     colored: true,
/// };
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CompareOptions<'a> {
    /// `LANG=FILE` pairs
    pub articles: &'a [String],
    pub output_language: &'a str,
    pub humor: bool,
    /// Raw tier string, parsed by the command
    pub tier: &'a str,
    pub json: bool,
    pub colored: bool,
}

/// Chat command options
#[derive(Debug, Clone, Copy)]
pub struct ChatOptions<'a> {
    pub comparison: &'a Path,
    pub title: &'a str,
    pub languages: &'a [String],
    pub history: Option<&'a Path>,
    pub message: &'a str,
    pub json: bool,
    pub colored: bool,
}

impl CompareOptions<'_> {
    /// Spinner and colors are disabled in JSON mode.
    pub fn effective_colored(&self) -> bool {
        self.colored && !self.json
    }
}

impl ChatOptions<'_> {
    pub fn effective_colored(&self) -> bool {
        self.colored && !self.json
    }
}
