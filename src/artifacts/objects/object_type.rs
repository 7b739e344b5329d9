/// Kind tag for store objects
///
/// Determines the directory an object lives in (`blobs/` or `commits/`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Commit,
}

impl ObjectType {
    /// Directory name under the repository root for this kind
    pub fn dir_name(&self) -> &'static str {
        match self {
            ObjectType::Blob => "blobs",
            ObjectType::Commit => "commits",
        }
    }
}
