//! Domain logic - pure naming rules independent of command execution

pub mod branch;
pub mod refs;
pub mod tag;

pub use branch::{classify, normalize_prefix, parse_listing, BranchListing, ParsedListing};
pub use refs::{remote_name_from_refspec, RemoteRefs};
pub use tag::strip_tag_prefix;
