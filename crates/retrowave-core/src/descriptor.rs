//! The unit of work handed to the retrieval engine.

/// One remote artifact to materialize as `target_dir/name`.
///
/// `id` is the catalog's identifying key; descriptors with an empty key (or an
/// empty name) are dropped by the engine before counting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadDescriptor {
    pub id: String,
    pub name: String,
    pub remote_url: String,
}

impl DownloadDescriptor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        remote_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            remote_url: remote_url.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.id.is_empty() && !self.name.is_empty()
    }
}
