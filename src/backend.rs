//! Landmark data source picked by configuration.

use crate::api::{ApiError, Contact, Landmark, LandmarkDraft, LandmarkType, SightApi};
use crate::config::{Config, DataSource};
use crate::store::MemoryStore;

/// Answers landmark, type and contact requests from the backend or from the
/// in-memory store.
///
#[derive(Clone)]
pub enum Backend {
    Remote(SightApi),
    Memory(MemoryStore),
}

impl Backend {
    /// Return the data source named in the configuration.
    ///
    pub fn from_config(config: &Config) -> Result<Backend, ApiError> {
        Ok(match config.data_source {
            DataSource::Remote => Backend::Remote(SightApi::new(&config.api_url)?),
            DataSource::Memory => Backend::Memory(MemoryStore::seeded()),
        })
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Backend::Remote(_))
    }

    pub async fn landmark_types(&self) -> Result<Vec<LandmarkType>, ApiError> {
        match self {
            Backend::Remote(api) => api.landmark_types().await,
            Backend::Memory(store) => Ok(store.landmark_types()),
        }
    }

    pub async fn landmarks(&self) -> Result<Vec<Landmark>, ApiError> {
        match self {
            Backend::Remote(api) => api.landmarks().await,
            Backend::Memory(store) => Ok(store.landmarks()),
        }
    }

    pub async fn landmark(&self, info_id: i64) -> Result<Landmark, ApiError> {
        match self {
            Backend::Remote(api) => api.landmark(info_id).await,
            Backend::Memory(store) => store.landmark(info_id),
        }
    }

    pub async fn contacts(&self, landmark_id: Option<i64>) -> Result<Vec<Contact>, ApiError> {
        match self {
            Backend::Remote(api) => api.contacts(landmark_id).await,
            Backend::Memory(store) => Ok(store.contacts(landmark_id)),
        }
    }

    /// Create a landmark. The remote backend may not echo the record.
    ///
    pub async fn create_landmark(
        &mut self,
        draft: &LandmarkDraft,
    ) -> Result<Option<Landmark>, ApiError> {
        match self {
            Backend::Remote(api) => api.create_landmark(draft).await,
            Backend::Memory(store) => store.create_landmark(draft).map(Some),
        }
    }

    pub async fn update_landmark(
        &mut self,
        info_id: i64,
        draft: &LandmarkDraft,
    ) -> Result<Option<Landmark>, ApiError> {
        match self {
            Backend::Remote(api) => api.update_landmark(info_id, draft).await,
            Backend::Memory(store) => store.update_landmark(info_id, draft).map(Some),
        }
    }

    pub async fn delete_landmark(&mut self, info_id: i64) -> Result<(), ApiError> {
        match self {
            Backend::Remote(api) => api.delete_landmark(info_id).await,
            Backend::Memory(store) => store.delete_landmark(info_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ContactDraft, ContactKind};

    #[test]
    fn from_config_follows_data_source() {
        let mut config = Config::new();
        assert!(Backend::from_config(&config).unwrap().is_remote());
        config.data_source = DataSource::Memory;
        assert!(!Backend::from_config(&config).unwrap().is_remote());
    }

    #[test]
    fn from_config_rejects_bad_url() {
        let mut config = Config::new();
        config.api_url = "::nope".to_string();
        assert!(matches!(
            Backend::from_config(&config),
            Err(ApiError::InvalidUrl { .. })
        ));
    }

    #[tokio::test]
    async fn memory_create_then_list() -> Result<(), ApiError> {
        let mut backend = Backend::Memory(MemoryStore::seeded());
        let draft = LandmarkDraft {
            name: "Mount Malarayat".to_string(),
            landmark_type: 3,
            address: "Barangay Talisay, Lipa, Batangas".to_string(),
            total_rooms: None,
            attraction_code: Some("MM-01".to_string()),
            contact_person: Some(ContactDraft {
                name: "Ranger Station".to_string(),
                contact_type: ContactKind::Phone,
                value: "0917 000 1111".to_string(),
            }),
        };
        let created = backend.create_landmark(&draft).await?.unwrap();
        let listed = backend.landmarks().await?;
        let found = listed.iter().find(|l| l.info_id == created.info_id).unwrap();
        assert_eq!(found.name, draft.name);
        assert_eq!(found.address, draft.address);
        assert_eq!(found.attraction_code, draft.attraction_code);
        assert_eq!(backend.contacts(Some(created.info_id)).await?.len(), 1);
        Ok(())
    }
}
