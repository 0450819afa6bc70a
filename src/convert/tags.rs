use tracing::debug;

use crate::convert::ConversionSummary;
use crate::domain::strip_tag_prefix;
use crate::error::Result;
use crate::runner::Runner;
use crate::warning::ConversionWarning;

/// Turn each tag-candidate branch into a real tag.
///
/// Candidates are processed in the given order. A candidate that does not
/// resolve to a valid reference is reported and skipped; every other failure
/// aborts. Without `force`, tagging a name that already exists fails and the
/// existing tag is left untouched.
///
/// # Arguments
/// * `candidates` - Remote branches under the tags prefix
/// * `tags_prefix` - Prefix removed from each candidate to form the tag name
/// * `strip` - Optional further prefix removed from the tag name
/// * `force` - Overwrite existing tags
pub fn materialize_tags<R: Runner>(
    runner: &R,
    candidates: &[String],
    tags_prefix: &str,
    strip: Option<&str>,
    force: bool,
    summary: &mut ConversionSummary,
) -> Result<()> {
    for candidate in candidates {
        if !runner.succeeds(&["git", "rev-parse", "--verify", "--quiet", candidate.as_str()]) {
            summary.warn(ConversionWarning::InvalidReference {
                name: candidate.clone(),
            });
            continue;
        }

        let tag = strip_tag_prefix(candidate, tags_prefix, strip);
        if tag.is_empty() {
            summary.warn(ConversionWarning::EmptyTagName {
                candidate: candidate.clone(),
            });
        }

        runner.run(&["git", "checkout", candidate.as_str()])?;

        let mut argv = vec!["git", "tag"];
        if force {
            argv.push("-f");
        }
        argv.push(tag.as_str());
        runner.run(&argv)?;

        debug!(%candidate, %tag, force, "created tag");
        summary.tags.push(tag);
    }

    Ok(())
}
