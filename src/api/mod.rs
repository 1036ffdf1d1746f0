//! SIGHT-Lipa backend API module.
//!
//! This module provides the client for the backend's JSON endpoints,
//! including:
//! - Low-level HTTP plumbing (`client`)
//! - Wire records and their client-side forms (`resource`)
//! - API error handling (`error`)

mod client;
mod error;
mod resource;

pub use error::ApiError;
pub use resource::*;

use client::Client;
use log::*;
use reqwest::Method;
use serde::Deserialize;

/// Responsible for asynchronous interaction with the backend including
/// transformation of response data into explicitly-defined types.
///
#[derive(Clone)]
pub struct SightApi {
    client: Client,
}

/// Write endpoints answer either with the landmark itself or with it
/// wrapped under `landmark`.
///
#[derive(Deserialize)]
#[serde(untagged)]
enum WriteResponse {
    Bare(Landmark),
    Wrapped { landmark: Landmark },
}

impl SightApi {
    /// Returns a new instance for the given base URL.
    ///
    pub fn new(base_url: &str) -> Result<SightApi, ApiError> {
        debug!("Initializing backend client for {}...", base_url);
        Ok(SightApi {
            client: Client::new(base_url)?,
        })
    }

    /// Check credentials against `POST /users/login`. The backend reports a
    /// rejected login in the body, so the status is not checked here.
    ///
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        debug!("Requesting login for user '{}'...", username);
        let body = serde_json::json!({ "username": username, "password": password });
        self.client
            .send_unchecked(Method::POST, "users/login", &body)
            .await
    }

    /// Returns all landmark types.
    ///
    pub async fn landmark_types(&self) -> Result<Vec<LandmarkType>, ApiError> {
        debug!("Requesting landmark types...");
        let types: Vec<LandmarkType> = self.client.get("landmark_type", None).await?;
        debug!("Retrieved {} landmark types", types.len());
        Ok(types)
    }

    /// Returns all landmarks. Contacts are not included.
    ///
    pub async fn landmarks(&self) -> Result<Vec<Landmark>, ApiError> {
        debug!("Requesting landmarks...");
        let landmarks: Vec<Landmark> = self.client.get("landmarks", None).await?;
        debug!("Retrieved {} landmarks", landmarks.len());
        Ok(landmarks)
    }

    /// Returns the landmark with the given id.
    ///
    pub async fn landmark(&self, info_id: i64) -> Result<Landmark, ApiError> {
        debug!("Requesting landmark {}...", info_id);
        self.client
            .get(&format!("landmarks/{}", info_id), None)
            .await
            .map_err(|e| match e {
                ApiError::Status { status: 404, .. } => ApiError::LandmarkNotFound { info_id },
                other => other,
            })
    }

    /// Returns contacts, for one landmark when `landmark_id` is given.
    ///
    pub async fn contacts(&self, landmark_id: Option<i64>) -> Result<Vec<Contact>, ApiError> {
        debug!("Requesting contacts (landmark: {:?})...", landmark_id);
        let params = landmark_id.map(|id| vec![("landmark_info", id.to_string())]);
        let rows: Vec<ContactRow> = self.client.get("contacts", params).await?;
        Ok(rows.into_iter().map(Contact::from_row).collect())
    }

    /// Create a landmark and its contact person. Returns the stored record
    /// when the backend echoes it.
    ///
    pub async fn create_landmark(&self, draft: &LandmarkDraft) -> Result<Option<Landmark>, ApiError> {
        debug!("Creating landmark '{}'...", draft.name);
        let body = self.client.send(Method::POST, "landmarks", Some(draft)).await?;
        Ok(body.and_then(landmark_from_body))
    }

    /// Update a landmark and its contact person.
    ///
    pub async fn update_landmark(
        &self,
        info_id: i64,
        draft: &LandmarkDraft,
    ) -> Result<Option<Landmark>, ApiError> {
        debug!("Updating landmark {}...", info_id);
        let body = self
            .client
            .send(Method::PUT, &format!("landmarks/{}", info_id), Some(draft))
            .await?;
        Ok(body.and_then(landmark_from_body))
    }

    /// Delete a landmark. The backend removes its contacts with it.
    ///
    pub async fn delete_landmark(&self, info_id: i64) -> Result<(), ApiError> {
        debug!("Deleting landmark {}...", info_id);
        self.client
            .send::<()>(Method::DELETE, &format!("landmarks/{}", info_id), None)
            .await?;
        Ok(())
    }
}

fn landmark_from_body(body: serde_json::Value) -> Option<Landmark> {
    match serde_json::from_value::<WriteResponse>(body) {
        Ok(WriteResponse::Bare(landmark)) | Ok(WriteResponse::Wrapped { landmark }) => Some(landmark),
        Err(e) => {
            debug!("Write response carried no landmark record: {}", e);
            None
        }
    }
}
