//! Identifier and validated scalar types for the reply-command domain.

use super::ReplyDomainError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a persisted command entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Creates a new random entry identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an entry identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for EntryId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Positive pull request number from the hosting provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Creates a validated pull request number.
    ///
    /// # Errors
    ///
    /// Returns [`ReplyDomainError::InvalidPullRequestNumber`] when the value
    /// is zero.
    pub const fn new(value: u64) -> Result<Self, ReplyDomainError> {
        if value == 0 {
            return Err(ReplyDomainError::InvalidPullRequestNumber(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PullRequestNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalized repository identifier in `owner/repo` format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepositoryFullName(String);

impl RepositoryFullName {
    /// Creates a validated repository name.
    ///
    /// # Errors
    ///
    /// Returns [`ReplyDomainError::InvalidRepository`] if the value does not
    /// contain exactly one slash-delimited owner and repository segment.
    pub fn new(value: impl Into<String>) -> Result<Self, ReplyDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        let mut segments = normalized.split('/');
        let owner = segments.next().unwrap_or_default();
        let repo = segments.next().unwrap_or_default();
        let has_more_segments = segments.next().is_some();
        let is_valid = !owner.is_empty()
            && !repo.is_empty()
            && !has_more_segments
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(ReplyDomainError::InvalidRepository(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the repository name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RepositoryFullName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RepositoryFullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Correlation reference to the pull request conversation a command came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThreadRef {
    repository: RepositoryFullName,
    pull_request: PullRequestNumber,
}

impl ThreadRef {
    /// Creates a thread reference from its parts.
    #[must_use]
    pub const fn new(repository: RepositoryFullName, pull_request: PullRequestNumber) -> Self {
        Self {
            repository,
            pull_request,
        }
    }

    /// Creates a thread reference from raw values.
    ///
    /// # Errors
    ///
    /// Returns [`ReplyDomainError`] when the repository name or pull request
    /// number is invalid.
    pub fn from_parts(
        repository: impl Into<String>,
        pull_request: u64,
    ) -> Result<Self, ReplyDomainError> {
        Ok(Self {
            repository: RepositoryFullName::new(repository)?,
            pull_request: PullRequestNumber::new(pull_request)?,
        })
    }

    /// Returns the repository the thread belongs to.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryFullName {
        &self.repository
    }

    /// Returns the pull request number.
    #[must_use]
    pub const fn pull_request(&self) -> PullRequestNumber {
        self.pull_request
    }
}

impl fmt::Display for ThreadRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.repository, self.pull_request)
    }
}

/// Opaque reference to a posted comment, issued by the comment surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentRef(String);

impl CommentRef {
    /// Creates a validated comment reference.
    ///
    /// # Errors
    ///
    /// Returns [`ReplyDomainError::EmptyCommentRef`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, ReplyDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(ReplyDomainError::EmptyCommentRef);
        }
        Ok(Self(raw))
    }

    /// Returns the comment reference as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to a build project on the external job service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectRef(String);

impl ProjectRef {
    /// Creates a validated project reference.
    ///
    /// # Errors
    ///
    /// Returns [`ReplyDomainError::EmptyProjectRef`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, ReplyDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(ReplyDomainError::EmptyProjectRef);
        }
        Ok(Self(raw))
    }

    /// Returns the project reference as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Short identifier of an external build job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    /// Creates a validated job identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ReplyDomainError::EmptyJobId`] when the value is empty after
    /// trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, ReplyDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(ReplyDomainError::EmptyJobId);
        }
        Ok(Self(raw))
    }

    /// Returns the job identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Full reference string locating a job on the external service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobHandle(String);

impl JobHandle {
    /// Creates a validated job handle.
    ///
    /// # Errors
    ///
    /// Returns [`ReplyDomainError::EmptyJobHandle`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, ReplyDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(ReplyDomainError::EmptyJobHandle);
        }
        Ok(Self(raw))
    }

    /// Returns the job handle as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Container image tag as typed in a command argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageTag(String);

impl ImageTag {
    /// Creates a validated image tag.
    ///
    /// # Errors
    ///
    /// Returns [`ReplyDomainError::EmptyImageTag`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, ReplyDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(ReplyDomainError::EmptyImageTag);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the image tag as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Content-addressed image digest pinned at launch time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageDigest(String);

impl ImageDigest {
    /// Creates a validated image digest.
    ///
    /// # Errors
    ///
    /// Returns [`ReplyDomainError::InvalidImageDigest`] when the value lacks
    /// the `sha256:` prefix or carries an empty hex part.
    pub fn new(value: impl Into<String>) -> Result<Self, ReplyDomainError> {
        let raw = value.into();
        let valid = raw
            .strip_prefix("sha256:")
            .is_some_and(|hex| !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()));
        if !valid {
            return Err(ReplyDomainError::InvalidImageDigest(raw));
        }
        Ok(Self(raw))
    }

    /// Derives a digest from raw content bytes.
    #[must_use]
    pub fn from_content(content: &[u8]) -> Self {
        Self(format!("sha256:{:x}", Sha256::digest(content)))
    }

    /// Returns the digest as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
