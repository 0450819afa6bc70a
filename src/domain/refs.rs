use crate::domain::branch::normalize_prefix;

/// Remote ref name git-svn gives the trunk under an empty `--prefix`
pub const GIT_SVN_TRUNK: &str = "trunk";

/// Remote ref prefix git-svn gives tags under an empty `--prefix`
pub const GIT_SVN_TAGS: &str = "tags/";

/// Names git-svn uses for trunk and tags in `git branch -r`.
///
/// These do not depend on the Subversion layout paths: `--trunk=mainline`
/// still fetches into `refs/remotes/trunk`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRefs {
    pub trunk: String,
    /// Always ends with `/`
    pub tags_prefix: String,
}

impl Default for RemoteRefs {
    fn default() -> Self {
        RemoteRefs {
            trunk: GIT_SVN_TRUNK.to_string(),
            tags_prefix: GIT_SVN_TAGS.to_string(),
        }
    }
}

impl RemoteRefs {
    /// Build from the `svn-remote.svn.fetch` and `svn-remote.svn.tags`
    /// values of a git-svn mirror.
    ///
    /// Each argument is the multi-line output of `git config --get-all`.
    /// The first refspec that yields a name wins; missing or unusable
    /// values fall back to the git-svn defaults.
    pub fn from_refspecs(fetch: Option<&str>, tags: Option<&str>) -> Self {
        let defaults = RemoteRefs::default();

        let trunk = fetch
            .and_then(|out| out.lines().find_map(remote_name_from_refspec))
            .unwrap_or(defaults.trunk);

        let tags_prefix = tags
            .and_then(|out| {
                out.lines()
                    .find_map(remote_name_from_refspec)
                    .and_then(|dst| dst.strip_suffix('*').map(normalize_prefix))
            })
            .unwrap_or(defaults.tags_prefix);

        RemoteRefs { trunk, tags_prefix }
    }
}

/// Local side of a git-svn refspec, relative to `refs/remotes/`.
///
/// Example: "mainline:refs/remotes/trunk" -> "trunk",
/// "releases/*:refs/remotes/origin/tags/*" -> "origin/tags/*"
pub fn remote_name_from_refspec(refspec: &str) -> Option<String> {
    let (_, dst) = refspec.trim().rsplit_once(':')?;
    let name = dst.strip_prefix("refs/remotes/")?;

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
