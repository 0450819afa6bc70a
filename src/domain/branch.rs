use crate::warning::ConversionWarning;
use regex::Regex;
use std::sync::LazyLock;

static LISTING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\*\s+)?([^\s*]\S*)$").expect("listing line pattern is valid")
});

/// Remote branch names split by role
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchListing {
    /// Branches under the tags prefix, in listing order
    pub tag_candidates: Vec<String>,
    /// Everything else, trunk included, in listing order
    pub other_branches: Vec<String>,
}

impl BranchListing {
    /// Whether any remote branch is exactly `trunk_name`
    pub fn contains_trunk(&self, trunk_name: &str) -> bool {
        self.other_branches.iter().any(|b| b == trunk_name)
    }

    /// Total number of classified names
    pub fn len(&self) -> usize {
        self.tag_candidates.len() + self.other_branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ref names recovered from `git branch -r` output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedListing {
    pub names: Vec<String>,
    pub warnings: Vec<ConversionWarning>,
}

/// Normalize a tags path so it ends with exactly one `/`
///
/// Example: "tags" -> "tags/", "tags//" -> "tags/"
pub fn normalize_prefix(prefix: &str) -> String {
    format!("{}/", prefix.trim().trim_end_matches('/'))
}

/// Parse `git branch -r` output into ref names.
///
/// Each line is an optional `* ` marker followed by one ref name. Blank lines
/// are ignored. Symbolic lines (`origin/HEAD -> origin/trunk`) and anything
/// else with inner whitespace are reported and skipped.
pub fn parse_listing(output: &str) -> ParsedListing {
    let mut parsed = ParsedListing::default();

    for raw in output.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        match LISTING_LINE.captures(line) {
            Some(caps) => parsed.names.push(caps[1].to_string()),
            None => parsed.warnings.push(ConversionWarning::UnparsableBranchLine {
                line: line.to_string(),
            }),
        }
    }

    parsed
}

/// Partition remote branch names into tag candidates and other branches.
///
/// Entries are trimmed; an entry is a tag candidate iff it starts with the
/// normalized `tags_prefix`, compared literally. Order is preserved in both
/// halves.
pub fn classify<S: AsRef<str>>(raw_branches: &[S], tags_prefix: &str) -> BranchListing {
    let prefix = normalize_prefix(tags_prefix);

    let (tag_candidates, other_branches): (Vec<String>, Vec<String>) = raw_branches
        .iter()
        .map(|b| b.as_ref().trim().to_string())
        .partition(|b| b.starts_with(&prefix));

    BranchListing {
        tag_candidates,
        other_branches,
    }
}
