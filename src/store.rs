//! In-memory landmark store used as the offline data source.
//!
//! Answers the same questions as the backend's landmark, type and contact
//! endpoints, seeded with a handful of Lipa landmarks.

use crate::api::{ApiError, Contact, ContactDraft, ContactKind, Landmark, LandmarkDraft, LandmarkType};
use log::*;

/// Holds landmark types, landmarks and contacts in insertion order.
///
#[derive(Clone, Debug)]
pub struct MemoryStore {
    landmark_types: Vec<LandmarkType>,
    landmarks: Vec<Landmark>,
    contacts: Vec<Contact>,
    next_info_id: i64,
    next_contact_id: i64,
}

impl MemoryStore {
    /// Return an empty store with the given landmark types.
    ///
    pub fn new(landmark_types: Vec<LandmarkType>) -> Self {
        MemoryStore {
            landmark_types,
            landmarks: vec![],
            contacts: vec![],
            next_info_id: 1,
            next_contact_id: 1,
        }
    }

    /// Return a store holding the sample Lipa data set.
    ///
    pub fn seeded() -> Self {
        let types = [
            (1, "Hotels"),
            (2, "Resorts"),
            (3, "Churches"),
            (4, "Restaurants"),
            (5, "Golf Courses"),
        ];
        let mut store = MemoryStore::new(
            types
                .iter()
                .map(|(type_id, type_name)| LandmarkType {
                    type_id: *type_id,
                    type_name: type_name.to_string(),
                })
                .collect(),
        );

        let samples = [
            ("Matabungkay Beach Resort", 2, "Matabungkay, Lipa, Batangas", Some(25)),
            ("San Sebastian Cathedral", 3, "P. Torres St, Lipa, Batangas", None),
            ("The Farm at San Benito", 1, "San Benito, Lipa, Batangas", Some(50)),
            ("Villa Jovita", 4, "J.P. Laurel Highway, Lipa, Batangas", None),
            ("Splendido Taal Golf Course", 5, "Talisay, Batangas", None),
        ];
        for (name, landmark_type, address, total_rooms) in samples.iter() {
            store.insert_landmark(LandmarkDraft {
                name: name.to_string(),
                landmark_type: *landmark_type,
                address: address.to_string(),
                total_rooms: *total_rooms,
                attraction_code: None,
                contact_person: None,
            });
        }
        store.insert_contact(
            1,
            &ContactDraft {
                name: "John Doe".to_string(),
                contact_type: ContactKind::Email,
                value: "john@example.com".to_string(),
            },
        );
        store.insert_contact(
            2,
            &ContactDraft {
                name: "Jane Smith".to_string(),
                contact_type: ContactKind::Phone,
                value: "555-1234".to_string(),
            },
        );
        store
    }

    pub fn landmark_types(&self) -> Vec<LandmarkType> {
        self.landmark_types.clone()
    }

    /// Return all landmarks without their contacts, like the list endpoint.
    ///
    pub fn landmarks(&self) -> Vec<Landmark> {
        self.landmarks.clone()
    }

    pub fn landmark(&self, info_id: i64) -> Result<Landmark, ApiError> {
        self.landmarks
            .iter()
            .find(|l| l.info_id == info_id)
            .cloned()
            .ok_or(ApiError::LandmarkNotFound { info_id })
    }

    /// Return contacts, for one landmark when `landmark_id` is given.
    ///
    pub fn contacts(&self, landmark_id: Option<i64>) -> Vec<Contact> {
        self.contacts
            .iter()
            .filter(|c| landmark_id.map_or(true, |id| c.landmark_info == id))
            .cloned()
            .collect()
    }

    /// Store a new landmark and its contact person.
    ///
    pub fn create_landmark(&mut self, draft: &LandmarkDraft) -> Result<Landmark, ApiError> {
        self.check_type(draft.landmark_type)?;
        let landmark = self.insert_landmark(draft.clone());
        if let Some(contact) = &draft.contact_person {
            self.insert_contact(landmark.info_id, contact);
        }
        debug!("Stored landmark {} in memory", landmark.info_id);
        Ok(landmark)
    }

    /// Overwrite a landmark and replace its contact person.
    ///
    pub fn update_landmark(
        &mut self,
        info_id: i64,
        draft: &LandmarkDraft,
    ) -> Result<Landmark, ApiError> {
        self.check_type(draft.landmark_type)?;
        let landmark = self
            .landmarks
            .iter_mut()
            .find(|l| l.info_id == info_id)
            .ok_or(ApiError::LandmarkNotFound { info_id })?;
        landmark.name = draft.name.to_owned();
        landmark.landmark_type = draft.landmark_type;
        landmark.address = draft.address.to_owned();
        landmark.total_rooms = draft.total_rooms;
        landmark.attraction_code = draft.attraction_code.to_owned();
        let updated = landmark.to_owned();

        let existing = self.contacts.iter().position(|c| c.landmark_info == info_id);
        match (&draft.contact_person, existing) {
            (Some(person), Some(index)) => {
                let contact = &mut self.contacts[index];
                contact.name = person.name.to_owned();
                contact.kind = Some(person.contact_type);
                contact.value = person.value.to_owned();
            }
            (Some(person), None) => self.insert_contact(info_id, person),
            (None, _) => self.contacts.retain(|c| c.landmark_info != info_id),
        }
        Ok(updated)
    }

    /// Remove a landmark together with its contacts.
    ///
    pub fn delete_landmark(&mut self, info_id: i64) -> Result<(), ApiError> {
        let before = self.landmarks.len();
        self.landmarks.retain(|l| l.info_id != info_id);
        if self.landmarks.len() == before {
            return Err(ApiError::LandmarkNotFound { info_id });
        }
        self.contacts.retain(|c| c.landmark_info != info_id);
        Ok(())
    }

    fn check_type(&self, type_id: i64) -> Result<(), ApiError> {
        if self.landmark_types.iter().any(|t| t.type_id == type_id) {
            Ok(())
        } else {
            Err(ApiError::LandmarkTypeNotFound { type_id })
        }
    }

    fn insert_landmark(&mut self, draft: LandmarkDraft) -> Landmark {
        let landmark = Landmark {
            info_id: self.next_info_id,
            name: draft.name,
            landmark_type: draft.landmark_type,
            address: draft.address,
            total_rooms: draft.total_rooms,
            attraction_code: draft.attraction_code,
            contacts: vec![],
        };
        self.next_info_id += 1;
        self.landmarks.push(landmark.clone());
        landmark
    }

    fn insert_contact(&mut self, landmark_info: i64, person: &ContactDraft) {
        self.contacts.push(Contact {
            contact_id: self.next_contact_id,
            landmark_info,
            name: person.name.to_owned(),
            kind: Some(person.contact_type),
            value: person.value.to_owned(),
        });
        self.next_contact_id += 1;
    }
}
