//! Records exchanged with the SIGHT-Lipa backend.
//!
//! Wire shapes follow the backend's column names (`info_id`, `type_id`,
//! `landmark_info`, ...) so that serde can map responses directly.

use fake::Dummy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type names whose landmarks take overnight guests.
///
pub const LODGING_TYPE_NAMES: [&str; 4] = ["Hotel", "Hotels", "Resort", "Resorts"];

/// Return whether the landmark type name denotes lodging.
///
pub fn is_lodging_type_name(type_name: &str) -> bool {
    LODGING_TYPE_NAMES.contains(&type_name)
}

/// Defines the role carried by a session.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
}

/// Least privilege when the backend omits the role.
///
impl Default for Role {
    fn default() -> Self {
        Role::Staff
    }
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Defines the authenticated user held by the auth state.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub display_name: String,
    #[dummy(expr = "Role::Staff")]
    pub role: Role,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// User object returned by a successful login.
///
#[derive(Clone, Debug, Deserialize)]
pub struct UserPayload {
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl From<UserPayload> for Session {
    fn from(user: UserPayload) -> Self {
        let display_name = user
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| user.username.clone());
        Session {
            username: user.username,
            display_name,
            role: user.role,
        }
    }
}

/// Body of `POST /users/login`.
///
#[derive(Clone, Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub user: Option<UserPayload>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Defines landmark type data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandmarkType {
    pub type_id: i64,
    pub type_name: String,
}

/// Channel through which a contact person is reached.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    Phone,
    Telephone,
    Email,
}

impl ContactKind {
    pub const ALL: [ContactKind; 3] = [ContactKind::Phone, ContactKind::Telephone, ContactKind::Email];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactKind::Phone => "phone",
            ContactKind::Telephone => "telephone",
            ContactKind::Email => "email",
        }
    }
}

impl fmt::Display for ContactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contact row as stored by the backend: one column per channel.
///
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ContactRow {
    pub contact_id: i64,
    pub landmark_info: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub telephone: Option<String>,
}

/// Defines contact person data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub contact_id: i64,
    pub landmark_info: i64,
    pub name: String,
    #[dummy(expr = "Some(ContactKind::Phone)")]
    pub kind: Option<ContactKind>,
    pub value: String,
}

impl Contact {
    /// Collapse the backend's three channel columns into one kind/value
    /// pair. Email wins over phone, phone over telephone.
    ///
    pub fn from_row(row: ContactRow) -> Contact {
        let pick = |value: &Option<String>| value.as_deref().filter(|v| !v.is_empty()).map(str::to_owned);
        let (kind, value) = if let Some(email) = pick(&row.email) {
            (Some(ContactKind::Email), email)
        } else if let Some(phone) = pick(&row.phone) {
            (Some(ContactKind::Phone), phone)
        } else if let Some(telephone) = pick(&row.telephone) {
            (Some(ContactKind::Telephone), telephone)
        } else {
            (None, String::new())
        };
        Contact {
            contact_id: row.contact_id,
            landmark_info: row.landmark_info,
            name: row.name,
            kind,
            value,
        }
    }

    /// Card label, e.g. `Jane Smith (555-1234)`.
    ///
    pub fn label(&self) -> String {
        if self.value.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.value)
        }
    }
}

/// Defines landmark data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Landmark {
    pub info_id: i64,
    pub name: String,
    pub landmark_type: i64,
    pub address: String,
    #[serde(default)]
    pub total_rooms: Option<u32>,
    #[serde(default)]
    pub attraction_code: Option<String>,
    #[serde(skip)]
    pub contacts: Vec<Contact>,
}

/// Contact part of a landmark write.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub contact_type: ContactKind,
    pub value: String,
}

/// Body of `POST /landmarks` and `PUT /landmarks/{id}`.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandmarkDraft {
    pub name: String,
    pub landmark_type: i64,
    pub address: String,
    pub total_rooms: Option<u32>,
    pub attraction_code: Option<String>,
    pub contact_person: Option<ContactDraft>,
}

/// Residency or visitor category picked on the tourist form.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Allocation {
    LipaResidency,
    LipaResidencyWithForeign,
    OtherProvince,
    OtherProvinceWithForeign,
    ForeignResidency,
}

impl Allocation {
    pub const ALL: [Allocation; 5] = [
        Allocation::LipaResidency,
        Allocation::LipaResidencyWithForeign,
        Allocation::OtherProvince,
        Allocation::OtherProvinceWithForeign,
        Allocation::ForeignResidency,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Allocation::LipaResidency => "Lipa Residency",
            Allocation::LipaResidencyWithForeign => "Lipa Residency with Foreign",
            Allocation::OtherProvince => "Other Province",
            Allocation::OtherProvinceWithForeign => "Other Province with Foreign",
            Allocation::ForeignResidency => "Foreign Residency",
        }
    }

    /// Whether the nationality and foreign visitor counts apply.
    ///
    pub fn includes_foreign(&self) -> bool {
        matches!(
            self,
            Allocation::LipaResidencyWithForeign
                | Allocation::OtherProvinceWithForeign
                | Allocation::ForeignResidency
        )
    }

    /// Whether the non-foreign part of the group lives in Lipa.
    ///
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Allocation::LipaResidency | Allocation::LipaResidencyWithForeign
        )
    }
}

/// Head counts entered on the tourist form.
///
#[derive(Clone, Copy, Debug, Default, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorCounts {
    pub male: u32,
    pub female: u32,
    pub foreign_male: u32,
    pub foreign_female: u32,
}

impl VisitorCounts {
    /// Sum of the four counts, saturating at `u32::MAX`.
    ///
    pub fn total(&self) -> u32 {
        [self.female, self.foreign_male, self.foreign_female]
            .iter()
            .fold(self.male, |sum, n| sum.saturating_add(*n))
    }
}

/// Defines a recorded tourist visit.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouristVisit {
    #[dummy(expr = "Allocation::LipaResidency")]
    pub allocation: Allocation,
    pub nationality: Option<String>,
    pub visited_landmark: i64,
    pub landmark_name: String,
    pub counts: VisitorCounts,
    pub stay_duration: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};

    #[test]
    fn lodging_names_are_exact_matches() {
        assert!(is_lodging_type_name("Hotel"));
        assert!(is_lodging_type_name("Resorts"));
        assert!(!is_lodging_type_name("hotel"));
        assert!(!is_lodging_type_name("Churches"));
        assert!(!is_lodging_type_name("Golf Courses"));
    }

    #[test]
    fn contact_from_row_prefers_email() {
        let row = ContactRow {
            contact_id: 1,
            landmark_info: 1,
            name: "John Doe".to_string(),
            email: Some("john@example.com".to_string()),
            phone: Some("09171234567".to_string()),
            telephone: None,
        };
        let contact = Contact::from_row(row);
        assert_eq!(contact.kind, Some(ContactKind::Email));
        assert_eq!(contact.value, "john@example.com");
        assert_eq!(contact.label(), "John Doe (john@example.com)");
    }

    #[test]
    fn contact_from_row_skips_empty_columns() {
        let row = ContactRow {
            contact_id: 2,
            landmark_info: 2,
            name: "Jane Smith".to_string(),
            email: Some(String::new()),
            phone: Some("555-1234".to_string()),
            telephone: Some(String::new()),
        };
        let contact = Contact::from_row(row);
        assert_eq!(contact.kind, Some(ContactKind::Phone));
        assert_eq!(contact.value, "555-1234");
    }

    #[test]
    fn contact_without_channel_has_no_kind() {
        let row = ContactRow {
            contact_id: 3,
            landmark_info: 1,
            name: "Nobody".to_string(),
            ..ContactRow::default()
        };
        let contact = Contact::from_row(row);
        assert_eq!(contact.kind, None);
        assert_eq!(contact.label(), "Nobody");
    }

    #[test]
    fn session_from_user_payload_falls_back_to_username() {
        let user: UserPayload =
            serde_json::from_value(serde_json::json!({ "username": "admin", "role": "admin" })).unwrap();
        let session = Session::from(user);
        assert_eq!(session.display_name, "admin");
        assert!(session.is_admin());
    }

    #[test]
    fn missing_role_defaults_to_staff() {
        let user: UserPayload =
            serde_json::from_value(serde_json::json!({ "username": "clerk", "name": "Clerk" })).unwrap();
        let session = Session::from(user);
        assert_eq!(session.role, Role::Staff);
        assert_eq!(session.display_name, "Clerk");
    }

    #[test]
    fn landmark_ignores_unknown_columns() {
        let landmark: Landmark = serde_json::from_value(serde_json::json!({
            "info_id": 3,
            "name": "The Farm at San Benito",
            "landmark_type": 3,
            "address": "San Benito, Lipa, Batangas",
            "total_rooms": 50,
            "created_at": "2025-07-01T00:00:00Z",
        }))
        .unwrap();
        assert_eq!(landmark.total_rooms, Some(50));
        assert!(landmark.attraction_code.is_none());
        assert!(landmark.contacts.is_empty());
    }

    #[test]
    fn allocation_foreign_flags() {
        let foreign: Vec<_> = Allocation::ALL.iter().filter(|a| a.includes_foreign()).collect();
        assert_eq!(foreign.len(), 3);
        assert!(!Allocation::LipaResidency.includes_foreign());
        assert!(Allocation::LipaResidencyWithForeign.is_local());
        assert!(!Allocation::ForeignResidency.is_local());
    }

    #[test]
    fn visitor_counts_total() {
        let counts = VisitorCounts {
            male: 2,
            female: 3,
            foreign_male: 1,
            foreign_female: 0,
        };
        assert_eq!(counts.total(), 6);
    }

    #[test]
    fn visitor_counts_total_saturates() {
        let counts = VisitorCounts {
            male: u32::MAX,
            female: 1,
            ..VisitorCounts::default()
        };
        assert_eq!(counts.total(), u32::MAX);
    }

    #[test]
    fn fake_landmark_has_no_contacts_on_the_wire() {
        let mut landmark: Landmark = Faker.fake();
        landmark.contacts = vec![Faker.fake()];
        let json = serde_json::to_value(&landmark).unwrap();
        assert!(json.get("contacts").is_none());
        assert_eq!(json["info_id"], landmark.info_id);
    }
}
