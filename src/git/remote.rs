/// Owner and repository name of a remote on its web host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCoordinates {
    pub owner: String,
    pub name: String,
}

impl RemoteCoordinates {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        RemoteCoordinates {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parses a remote URL into owner and repository name.
    ///
    /// Supports scp-like (`git@github.com:owner/repo.git`) and URL forms
    /// (`https://github.com/owner/repo`, `ssh://git@host/owner/repo.git`).
    pub fn from_url(url: &str) -> Option<Self> {
        let url = url.trim().trim_end_matches('/');
        let path = match url.split_once("://") {
            Some((_, rest)) => rest.split_once('/')?.1,
            None => url.split_once(':')?.1,
        };
        let path = path.strip_suffix(".git").unwrap_or(path);

        let mut segments = path.rsplit('/');
        let name = segments.next().filter(|s| !s.is_empty())?;
        let owner = segments.next().filter(|s| !s.is_empty())?;
        Some(RemoteCoordinates::new(owner, name))
    }

    /// `<host_url>/<owner>/<name>`
    pub fn web_url(&self, host_url: &str) -> String {
        format!(
            "{}/{}/{}",
            host_url.trim_end_matches('/'),
            self.owner,
            self.name
        )
    }
}
