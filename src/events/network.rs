use crate::api::{ApiError, LandmarkDraft};
use crate::auth::Authenticator;
use crate::backend::Backend;
use crate::state::{LandmarkFormMode, State};
use anyhow::Result;
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different network event types.
///
#[derive(Debug, Clone)]
pub enum Event {
    Login {
        username: String,
        password: String,
    },
    LandmarkTypes,
    Landmarks,
    LandmarkDetail {
        info_id: i64,
    },
    CreateLandmark {
        draft: LandmarkDraft,
    },
    UpdateLandmark {
        info_id: i64,
        draft: LandmarkDraft,
    },
    DeleteLandmark {
        info_id: i64,
    },
}

/// Specify struct for managing state with network events.
///
pub struct Handler<'a> {
    state: &'a Arc<Mutex<State>>,
    backend: &'a mut Backend,
    authenticator: &'a Authenticator,
}

impl<'a> Handler<'a> {
    /// Return new instance with reference to state.
    ///
    pub fn new(
        state: &'a Arc<Mutex<State>>,
        backend: &'a mut Backend,
        authenticator: &'a Authenticator,
    ) -> Self {
        Handler {
            state,
            backend,
            authenticator,
        }
    }

    /// Handle network events by type.
    ///
    pub async fn handle(&mut self, event: Event) -> Result<()> {
        match &event {
            Event::Login { username, .. } => debug!("Processing login event for '{}'...", username),
            other => debug!("Processing network event '{:?}'...", other),
        }
        match event {
            Event::Login { username, password } => self.login(username, password).await?,
            Event::LandmarkTypes => self.landmark_types().await?,
            Event::Landmarks => self.landmarks().await?,
            Event::LandmarkDetail { info_id } => self.landmark_detail(info_id).await?,
            Event::CreateLandmark { draft } => self.create_landmark(draft).await?,
            Event::UpdateLandmark { info_id, draft } => self.update_landmark(info_id, draft).await?,
            Event::DeleteLandmark { info_id } => self.delete_landmark(info_id).await?,
        }
        Ok(())
    }

    /// Check credentials and apply the outcome.
    ///
    async fn login(&mut self, username: String, password: String) -> Result<()> {
        info!("Signing in as '{}'...", username);
        let outcome = self.authenticator.authenticate(&username, &password).await;
        let mut state = self.state.lock().await;
        state.apply_login(outcome);
        Ok(())
    }

    /// Update state with landmark types.
    ///
    async fn landmark_types(&mut self) -> Result<()> {
        info!("Fetching landmark types...");
        match self.backend.landmark_types().await {
            Ok(types) => {
                info!("Received {} landmark types.", types.len());
                self.state.lock().await.set_landmark_types(types);
                Ok(())
            }
            Err(e) => {
                self.state.lock().await.apply_request_failure(&e);
                Err(e.into())
            }
        }
    }

    /// Update state with landmarks and their contacts.
    ///
    async fn landmarks(&mut self) -> Result<()> {
        info!("Fetching landmarks...");
        let result = match self.backend.landmarks().await {
            Ok(landmarks) => self
                .backend
                .contacts(None)
                .await
                .map(|contacts| (landmarks, contacts)),
            Err(e) => Err(e),
        };
        match result {
            Ok((landmarks, contacts)) => {
                info!(
                    "Received {} landmarks with {} contacts.",
                    landmarks.len(),
                    contacts.len()
                );
                self.state.lock().await.set_landmarks(landmarks, contacts);
                Ok(())
            }
            Err(e) => {
                self.state.lock().await.apply_request_failure(&e);
                Err(e.into())
            }
        }
    }

    /// Refresh the landmark being edited together with its contacts.
    ///
    async fn landmark_detail(&mut self, info_id: i64) -> Result<()> {
        info!("Fetching landmark {}...", info_id);
        let mut landmark = match self.backend.landmark(info_id).await {
            Ok(landmark) => landmark,
            Err(ApiError::LandmarkNotFound { .. }) => {
                self.state.lock().await.apply_edit_missing(info_id);
                return Ok(());
            }
            Err(e) => {
                // The form keeps the record it was opened with.
                warn!("Failed to fetch landmark {}: {}", info_id, e);
                return Ok(());
            }
        };
        match self.backend.contacts(Some(info_id)).await {
            Ok(contacts) => {
                landmark.contacts = contacts;
                self.state.lock().await.set_edit_detail(landmark);
            }
            Err(e) => warn!("Failed to fetch contacts for landmark {}: {}", info_id, e),
        }
        Ok(())
    }

    /// Create a landmark and apply the result.
    ///
    async fn create_landmark(&mut self, draft: LandmarkDraft) -> Result<()> {
        info!("Creating landmark '{}'...", draft.name);
        let result = self.backend.create_landmark(&draft).await.map(|created| {
            if let Some(landmark) = created {
                info!("Landmark created with id {}.", landmark.info_id);
            }
        });
        let mut state = self.state.lock().await;
        state.apply_landmark_write(LandmarkFormMode::Add, result);
        Ok(())
    }

    /// Update a landmark and apply the result.
    ///
    async fn update_landmark(&mut self, info_id: i64, draft: LandmarkDraft) -> Result<()> {
        info!("Updating landmark {}...", info_id);
        let result = self
            .backend
            .update_landmark(info_id, &draft)
            .await
            .map(|_| info!("Landmark {} updated.", info_id));
        let mut state = self.state.lock().await;
        state.apply_landmark_write(LandmarkFormMode::Edit { info_id }, result);
        Ok(())
    }

    /// Delete a landmark and apply the result.
    ///
    async fn delete_landmark(&mut self, info_id: i64) -> Result<()> {
        info!("Deleting landmark {}...", info_id);
        let result = self.backend.delete_landmark(info_id).await;
        let mut state = self.state.lock().await;
        state.apply_delete(info_id, result);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ContactDraft, ContactKind, SightApi};
    use crate::config::Config;
    use crate::state::{Route, RouteParams, Screen, LANDMARK_GONE_MESSAGE};
    use crate::store::MemoryStore;
    use httpmock::MockServer;
    use serde_json::json;

    fn offline() -> (Arc<Mutex<State>>, Backend, Authenticator) {
        let mut config = Config::new();
        config.force_offline();
        (
            Arc::new(Mutex::new(State::default())),
            Backend::Memory(MemoryStore::seeded()),
            Authenticator::from_config(&config).unwrap(),
        )
    }

    fn draft() -> LandmarkDraft {
        LandmarkDraft {
            name: "Lipa Cathedral Museum".to_string(),
            landmark_type: 3,
            address: "P. Torres St, Lipa, Batangas".to_string(),
            total_rooms: None,
            attraction_code: None,
            contact_person: Some(ContactDraft {
                name: "Curator".to_string(),
                contact_type: ContactKind::Email,
                value: "museum@lipa.ph".to_string(),
            }),
        }
    }

    #[tokio::test]
    async fn login_then_load_landmarks() -> Result<()> {
        let (state, mut backend, authenticator) = offline();
        let mut handler = Handler::new(&state, &mut backend, &authenticator);
        handler
            .handle(Event::Login {
                username: "admin".to_string(),
                password: "admin".to_string(),
            })
            .await?;
        handler.handle(Event::LandmarkTypes).await?;
        handler.handle(Event::Landmarks).await?;

        let state = state.lock().await;
        assert_eq!(state.current_screen(), Screen::Dashboard);
        assert!(state.is_admin());
        assert_eq!(state.landmark_types().len(), 5);
        assert_eq!(state.landmarks().len(), 5);
        assert_eq!(state.landmark(1).unwrap().contacts.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn failed_login_raises_alert() -> Result<()> {
        let (state, mut backend, authenticator) = offline();
        let mut handler = Handler::new(&state, &mut backend, &authenticator);
        handler
            .handle(Event::Login {
                username: "admin".to_string(),
                password: "wrong".to_string(),
            })
            .await?;
        let state = state.lock().await;
        assert_eq!(state.current_screen(), Screen::Login);
        assert_eq!(state.alert().unwrap().title, "Login Failed");
        Ok(())
    }

    #[tokio::test]
    async fn created_landmark_appears_in_list() -> Result<()> {
        let (state, mut backend, authenticator) = offline();
        let mut handler = Handler::new(&state, &mut backend, &authenticator);
        handler.handle(Event::CreateLandmark { draft: draft() }).await?;
        handler.handle(Event::Landmarks).await?;

        let state = state.lock().await;
        assert_eq!(state.current_route(), &Route::Landmarks);
        assert!(state.alert().is_none());
        let created = state
            .landmarks()
            .iter()
            .find(|l| l.name == "Lipa Cathedral Museum")
            .unwrap();
        assert_eq!(created.landmark_type, 3);
        assert_eq!(created.address, "P. Torres St, Lipa, Batangas");
        assert_eq!(created.contacts[0].label(), "Curator (museum@lipa.ph)");
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_landmark() -> Result<()> {
        let (state, mut backend, authenticator) = offline();
        let mut handler = Handler::new(&state, &mut backend, &authenticator);
        handler.handle(Event::Landmarks).await?;
        handler.handle(Event::DeleteLandmark { info_id: 4 }).await?;
        handler.handle(Event::Landmarks).await?;

        let state = state.lock().await;
        assert_eq!(state.alert().unwrap().message, "Landmark Deleted");
        assert_eq!(state.landmarks().len(), 4);
        assert!(state.landmark(4).is_err());
        Ok(())
    }

    #[tokio::test]
    async fn edit_detail_fills_contact() -> Result<()> {
        let (state, mut backend, authenticator) = offline();
        let mut handler = Handler::new(&state, &mut backend, &authenticator);
        handler
            .handle(Event::Login {
                username: "admin".to_string(),
                password: "admin".to_string(),
            })
            .await?;
        handler.handle(Event::Landmarks).await?;
        {
            let mut state = state.lock().await;
            let mut stale = state.landmark(1)?.clone();
            stale.contacts.clear();
            state.navigate(Route::EditLandmark, Some(RouteParams::Landmark(stale)));
            assert!(state.landmark_form().unwrap().contact_name.is_empty());
        }
        handler.handle(Event::LandmarkDetail { info_id: 1 }).await?;

        let state = state.lock().await;
        let form = state.landmark_form().unwrap();
        assert!(!form.contact_name.is_empty());
        assert!(!form.has_changes());
        assert!(matches!(
            state.route_params(),
            Some(RouteParams::Landmark(landmark)) if landmark.contacts.len() == 1
        ));
        Ok(())
    }

    #[tokio::test]
    async fn edit_detail_of_deleted_landmark_closes_form() -> Result<()> {
        let (state, mut backend, authenticator) = offline();
        let mut handler = Handler::new(&state, &mut backend, &authenticator);
        handler
            .handle(Event::Login {
                username: "admin".to_string(),
                password: "admin".to_string(),
            })
            .await?;
        handler.handle(Event::Landmarks).await?;
        let gone = state.lock().await.landmark(4)?.clone();
        handler.handle(Event::DeleteLandmark { info_id: 4 }).await?;
        {
            let mut state = state.lock().await;
            state.dismiss_alert();
            state.navigate(Route::EditLandmark, Some(RouteParams::Landmark(gone)));
            assert_eq!(state.current_screen(), Screen::EditLandmark);
        }
        handler.handle(Event::LandmarkDetail { info_id: 4 }).await?;

        let state = state.lock().await;
        assert!(state.landmark_form().is_none());
        assert_eq!(state.current_route(), &Route::Landmarks);
        assert_eq!(state.alert().unwrap().message, LANDMARK_GONE_MESSAGE);
        Ok(())
    }

    #[tokio::test]
    async fn remote_failure_without_details_has_no_reason() -> Result<()> {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/api/landmarks");
                then.status(500)
                    .json_body(json!({ "error": "Failed to create landmark" }));
            })
            .await;

        let state = Arc::new(Mutex::new(State::default()));
        let api = SightApi::new(&server.url("/api"))?;
        let mut backend = Backend::Remote(api.clone());
        let authenticator = Authenticator::Remote(api);
        let mut handler = Handler::new(&state, &mut backend, &authenticator);
        handler.handle(Event::CreateLandmark { draft: draft() }).await?;

        let state = state.lock().await;
        assert_eq!(state.alert().unwrap().message, "Failed to add landmark.");
        Ok(())
    }

    #[tokio::test]
    async fn remote_write_failure_reports_reason() -> Result<()> {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("PUT").path("/api/landmarks/2");
                then.status(400)
                    .json_body(json!({ "error": "Bad Request", "details": "landmark_type is invalid" }));
            })
            .await;

        let state = Arc::new(Mutex::new(State::default()));
        let api = SightApi::new(&server.url("/api"))?;
        let mut backend = Backend::Remote(api.clone());
        let authenticator = Authenticator::Remote(api);
        let mut handler = Handler::new(&state, &mut backend, &authenticator);
        handler
            .handle(Event::UpdateLandmark {
                info_id: 2,
                draft: draft(),
            })
            .await?;

        let state = state.lock().await;
        assert_eq!(
            state.alert().unwrap().message,
            "Failed to update landmark.\nReason: landmark_type is invalid"
        );
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_backend_reports_network_error() {
        let state = Arc::new(Mutex::new(State::default()));
        let api = SightApi::new("http://127.0.0.1:9/api").unwrap();
        let mut backend = Backend::Remote(api.clone());
        let authenticator = Authenticator::Remote(api);
        let mut handler = Handler::new(&state, &mut backend, &authenticator);

        assert!(handler.handle(Event::Landmarks).await.is_err());
        handler
            .handle(Event::CreateLandmark { draft: draft() })
            .await
            .unwrap();
        let state = state.lock().await;
        assert_eq!(state.alert().unwrap().message, "Network error.");
    }
}
