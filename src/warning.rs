use std::fmt;

/// Non-fatal problems met during a conversion.
/// They are reported to the user and the affected item is skipped or kept as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionWarning {
    /// A tag candidate does not resolve to a valid reference
    InvalidReference { name: String },
    /// Stripping prefixes from a tag candidate left nothing
    EmptyTagName { candidate: String },
    /// A line of the remote branch listing is not a single ref name
    UnparsableBranchLine { line: String },
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionWarning::InvalidReference { name } => {
                write!(f, "'{}' is not a valid reference, skipping", name)
            }
            ConversionWarning::EmptyTagName { candidate } => {
                write!(f, "tag name derived from '{}' is empty", candidate)
            }
            ConversionWarning::UnparsableBranchLine { line } => {
                write!(f, "cannot parse remote branch line '{}', skipping", line)
            }
        }
    }
}
