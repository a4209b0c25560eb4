//! Stand-ins for network services that are not configured.

use super::{
    IdSource, MediaKind, MetadataLookup, PeopleSearch, ServiceError, TitleRecord, VersionSource,
};

/// Metadata lookup that always reports the database as unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableMetadata;

impl MetadataLookup for UnavailableMetadata {
    fn lookup(&self, source: IdSource, _id: &str, _kind: MediaKind) -> Result<TitleRecord, ServiceError> {
        Err(ServiceError::Unavailable(source.label().to_string()))
    }
}

/// People search that always reports the database as unavailable.
#[derive(Debug, Clone)]
pub struct UnavailablePeople {
    name: String,
}

impl UnavailablePeople {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl PeopleSearch for UnavailablePeople {
    fn name(&self) -> &str {
        &self.name
    }

    fn search(&self, _name: &str) -> Result<Vec<String>, ServiceError> {
        Err(ServiceError::Unavailable(self.name.clone()))
    }
}

/// Version source for when the mkvtoolnix release feed is not configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableVersions;

impl VersionSource for UnavailableVersions {
    fn latest_version_line(&self) -> Result<String, ServiceError> {
        Err(ServiceError::Unavailable("mkvtoolnix release feed".to_string()))
    }
}
