use std::fmt;
use std::str::FromStr;

use crate::shared::error::ImageRefError;

/// A reference to a container image: registry, repository, tag, and an
/// optional digest.
///
/// The canonical identifier takes the form `registry/repository:tag[@digest]`:
///
/// ```text
/// docker.io/library/alpine:latest
/// cgr.dev/chainguard/nginx:latest@sha256:9a5330218c81bdeb5d63702...
/// ```
///
/// `ImageRef` is immutable and carries nothing beyond the image identity.
/// Application and publisher labels travel separately (see `PlannedImage`),
/// never inside the identity type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef {
    registry: String,
    repository: String,
    tag: String,
    digest: Option<String>,
}

impl ImageRef {
    /// Creates an image reference, defaulting the tag to `latest` when absent.
    pub fn new(
        registry: String,
        repository: String,
        tag: Option<String>,
        digest: Option<String>,
    ) -> Result<Self, ImageRefError> {
        let input = format!("{}/{}", registry, repository);
        if registry.is_empty() {
            return Err(ImageRefError::MissingRegistry { input });
        }
        if repository.is_empty() {
            return Err(ImageRefError::MissingRepository { input });
        }
        if let Some(ref tag) = tag {
            if tag.is_empty() {
                return Err(ImageRefError::EmptyTag { input });
            }
        }
        if let Some(ref digest) = digest {
            if digest.is_empty() {
                return Err(ImageRefError::EmptyDigest { input });
            }
        }
        Ok(Self {
            registry,
            repository,
            tag: tag.unwrap_or_else(|| "latest".to_string()),
            digest,
        })
    }

    /// Parses a canonical identifier string.
    ///
    /// The first `/` separates the registry from the repository, so
    /// registries with ports (`localhost:5000/app`) parse correctly. The
    /// last `:` after that point separates the tag, and a single `@`
    /// separates the digest. A missing tag defaults to `latest`.
    pub fn parse(input: &str) -> Result<Self, ImageRefError> {
        let (body, digest) = match input.split_once('@') {
            Some((body, digest)) => {
                if digest.is_empty() {
                    return Err(ImageRefError::EmptyDigest {
                        input: input.to_string(),
                    });
                }
                (body, Some(digest.to_string()))
            }
            None => (input, None),
        };

        let (registry, rest) = body.split_once('/').ok_or(ImageRefError::MissingRepository {
            input: input.to_string(),
        })?;
        if registry.is_empty() {
            return Err(ImageRefError::MissingRegistry {
                input: input.to_string(),
            });
        }

        let (repository, tag) = match rest.rsplit_once(':') {
            Some((_, tag)) if tag.is_empty() => {
                return Err(ImageRefError::EmptyTag {
                    input: input.to_string(),
                });
            }
            Some((repository, tag)) => (repository, tag.to_string()),
            None => (rest, "latest".to_string()),
        };
        if repository.is_empty() {
            return Err(ImageRefError::MissingRepository {
                input: input.to_string(),
            });
        }

        Ok(Self {
            registry: registry.to_string(),
            repository: repository.to_string(),
            tag,
            digest,
        })
    }

    /// Returns the canonical identifier, the inverse of [`ImageRef::parse`].
    pub fn identifier(&self) -> String {
        let mut output = format!("{}/{}:{}", self.registry, self.repository, self.tag);
        if let Some(ref digest) = self.digest {
            output.push('@');
            output.push_str(digest);
        }
        output
    }

    pub fn registry(&self) -> &str {
        &self.registry
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

impl FromStr for ImageRef {
    type Err = ImageRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
