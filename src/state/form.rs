//! Form editing state types.
//!
//! Every form is validated by one function against a declarative rule table.
//! A rule names the field, when the field is required and which format
//! check applies to a non-blank value.

use crate::api::{
    is_lodging_type_name, Allocation, Contact, ContactDraft, ContactKind, Landmark,
    LandmarkDraft, LandmarkType, TouristVisit, VisitorCounts,
};
use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;

pub const REQUIRED: &str = "Required";
pub const INVALID_EMAIL: &str = "Invalid email";
pub const INVALID_NUMBER: &str = "Invalid number";
pub const TOO_MANY_VISITORS: &str = "Too many visitors";

/// Largest head count one form may record per field.
///
pub const MAX_VISITOR_COUNT: u32 = 9_999;

/// Nationalities offered on the tourist form.
///
pub const NATIONALITIES: [&str; 16] = [
    "American",
    "Australian",
    "British",
    "Canadian",
    "Chinese",
    "French",
    "German",
    "Indian",
    "Indonesian",
    "Japanese",
    "Korean",
    "Malaysian",
    "Singaporean",
    "Spanish",
    "Taiwanese",
    "Vietnamese",
];

/// Specifying every field that appears on a form.
///
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum Field {
    Name,
    LandmarkType,
    Address,
    TotalRooms,
    AttractionCode,
    ContactName,
    ContactKind,
    ContactValue,
    Allocation,
    Nationality,
    Male,
    Female,
    ForeignMale,
    ForeignFemale,
    VisitedLandmark,
    StayDuration,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Landmark Name",
            Field::LandmarkType => "Landmark Type",
            Field::Address => "Address",
            Field::TotalRooms => "Total Rooms",
            Field::AttractionCode => "Attraction Code",
            Field::ContactName => "Contact Person",
            Field::ContactKind => "Contact Type",
            Field::ContactValue => "Contact Detail",
            Field::Allocation => "Allocation",
            Field::Nationality => "Nationality",
            Field::Male => "Male",
            Field::Female => "Female",
            Field::ForeignMale => "Foreign Male",
            Field::ForeignFemale => "Foreign Female",
            Field::VisitedLandmark => "Visited Landmark",
            Field::StayDuration => "Stay Duration (days)",
        }
    }

    /// Whether the value is picked from a list rather than typed.
    ///
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            Field::LandmarkType
                | Field::ContactKind
                | Field::Allocation
                | Field::Nationality
                | Field::VisitedLandmark
        )
    }
}

/// Form state a rule can depend on.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Condition {
    /// Selected landmark type takes overnight guests.
    LodgingType,
    ContactIsEmail,
    ForeignAllocation,
    /// Visited landmark is of a lodging type.
    LodgingVisit,
    /// None of the counts shown for the allocation was filled in.
    NoVisitorCounts,
    /// Foreign allocation with none of its counts filled in.
    NoForeignVisitorCounts,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Requirement {
    Always,
    When(Condition),
}

/// Format check applied to a non-blank value.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Check {
    Email,
    PositiveInteger,
    VisitorCount,
}

impl Check {
    fn passes(&self, value: &str) -> bool {
        match self {
            Check::Email => is_valid_email(value),
            Check::PositiveInteger => value.parse::<u32>().map_or(false, |n| n > 0),
            Check::VisitorCount => value.parse::<u32>().map_or(false, |n| n <= MAX_VISITOR_COUNT),
        }
    }

    fn message(&self, value: &str) -> &'static str {
        match self {
            Check::Email => INVALID_EMAIL,
            // A bad room count or stay is reported like a missing one.
            Check::PositiveInteger => REQUIRED,
            Check::VisitorCount if value.parse::<u64>().is_ok() => TOO_MANY_VISITORS,
            Check::VisitorCount => INVALID_NUMBER,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct FieldRule {
    pub field: Field,
    pub required: Requirement,
    pub check: Option<Check>,
    pub check_applies: Requirement,
}

impl FieldRule {
    const fn required(field: Field) -> Self {
        FieldRule {
            field,
            required: Requirement::Always,
            check: None,
            check_applies: Requirement::Always,
        }
    }
}

/// Rules shared by the add and edit landmark forms.
///
pub const LANDMARK_RULES: [FieldRule; 7] = [
    FieldRule::required(Field::Name),
    FieldRule::required(Field::LandmarkType),
    FieldRule::required(Field::Address),
    FieldRule {
        field: Field::TotalRooms,
        required: Requirement::When(Condition::LodgingType),
        check: Some(Check::PositiveInteger),
        check_applies: Requirement::When(Condition::LodgingType),
    },
    FieldRule::required(Field::ContactName),
    FieldRule::required(Field::ContactKind),
    FieldRule {
        field: Field::ContactValue,
        required: Requirement::Always,
        check: Some(Check::Email),
        check_applies: Requirement::When(Condition::ContactIsEmail),
    },
];

const fn count_rule(field: Field) -> FieldRule {
    FieldRule {
        field,
        required: Requirement::When(Condition::NoVisitorCounts),
        check: Some(Check::VisitorCount),
        check_applies: Requirement::Always,
    }
}

/// Foreign counts are hidden, and ignored, for local-only allocations.
///
const fn foreign_count_rule(field: Field) -> FieldRule {
    FieldRule {
        field,
        required: Requirement::When(Condition::NoForeignVisitorCounts),
        check: Some(Check::VisitorCount),
        check_applies: Requirement::When(Condition::ForeignAllocation),
    }
}

/// Rules of the tourist form.
///
pub const TOURIST_RULES: [FieldRule; 8] = [
    FieldRule::required(Field::Allocation),
    FieldRule {
        field: Field::Nationality,
        required: Requirement::When(Condition::ForeignAllocation),
        check: None,
        check_applies: Requirement::Always,
    },
    FieldRule::required(Field::VisitedLandmark),
    count_rule(Field::Male),
    count_rule(Field::Female),
    foreign_count_rule(Field::ForeignMale),
    foreign_count_rule(Field::ForeignFemale),
    FieldRule {
        field: Field::StayDuration,
        required: Requirement::When(Condition::LodgingVisit),
        check: Some(Check::PositiveInteger),
        check_applies: Requirement::When(Condition::LodgingVisit),
    },
];

/// Return whether `value` looks like an email address.
///
pub fn is_valid_email(value: &str) -> bool {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
        .map_or(false, |re| re.is_match(value))
}

/// Read access a rule table needs from a form.
///
pub trait FormModel {
    /// Current value of the field, empty when unset.
    fn value(&self, field: Field) -> String;

    fn holds(&self, condition: Condition) -> bool;

    fn applies(&self, requirement: Requirement) -> bool {
        match requirement {
            Requirement::Always => true,
            Requirement::When(condition) => self.holds(condition),
        }
    }
}

/// Return the error for one field, if any.
///
pub fn validate_field<F: FormModel>(form: &F, rules: &[FieldRule], field: Field) -> Option<&'static str> {
    let rule = rules.iter().find(|r| r.field == field)?;
    let value = form.value(field);
    let value = value.trim();
    if value.is_empty() {
        return form.applies(rule.required).then(|| REQUIRED);
    }
    match rule.check {
        Some(check) if form.applies(rule.check_applies) && !check.passes(value) => Some(check.message(value)),
        _ => None,
    }
}

/// Return the errors of every field in the rule table.
///
pub fn validate<F: FormModel>(form: &F, rules: &[FieldRule]) -> FormErrors {
    let mut errors = FormErrors::default();
    for rule in rules {
        if let Some(message) = validate_field(form, rules, rule.field) {
            errors.set(rule.field, Some(message));
        }
    }
    errors
}

/// Errors per field.
///
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<Field, &'static str>);

impl FormErrors {
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn set(&mut self, field: Field, message: Option<&'static str>) {
        match message {
            Some(message) => self.0.insert(field, message),
            None => self.0.remove(&field),
        };
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Tracks which fields may show their error.
///
#[derive(Debug, Default, Clone)]
pub struct FormStatus {
    touched: HashSet<Field>,
    submitted: bool,
}

impl FormStatus {
    pub fn touch(&mut self, field: Field) {
        self.touched.insert(field);
    }

    pub fn mark_submitted(&mut self) {
        self.submitted = true;
    }

    pub fn is_visible(&self, field: Field) -> bool {
        self.submitted || self.touched.contains(&field)
    }
}

/// Cursor over the visible fields of a form, plus the text editing that
/// goes with it.
///
#[derive(Debug, Default, Clone)]
pub struct Editor {
    pub errors: FormErrors,
    pub status: FormStatus,
    focus: usize,
}

impl Editor {
    pub fn focused(&self, fields: &[Field]) -> Option<Field> {
        fields.get(self.focus.min(fields.len().saturating_sub(1))).copied()
    }

    pub fn focus_next(&mut self, count: usize) {
        if count > 0 {
            self.focus = (self.focus.min(count - 1) + 1) % count;
        }
    }

    pub fn focus_previous(&mut self, count: usize) {
        if count > 0 {
            self.focus = (self.focus.min(count - 1) + count - 1) % count;
        }
    }

    /// Touch the field and re-run its rule only.
    ///
    fn leave<F: FormModel>(&mut self, form: &F, rules: &[FieldRule], field: Field) {
        self.status.touch(field);
        self.errors.set(field, validate_field(form, rules, field));
    }

    fn submit<F: FormModel>(&mut self, form: &F, rules: &[FieldRule]) -> bool {
        self.status.mark_submitted();
        self.errors = validate(form, rules);
        self.errors.is_empty()
    }

    pub fn visible_error(&self, field: Field) -> Option<&'static str> {
        self.status
            .is_visible(field)
            .then(|| self.errors.get(field))
            .flatten()
    }
}

/// Whether the form creates a landmark or edits one.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LandmarkFormMode {
    Add,
    Edit { info_id: i64 },
}

/// Values compared to detect an edit that changes nothing.
///
#[derive(Debug, Default, PartialEq, Eq, Clone)]
struct LandmarkSnapshot {
    name: String,
    landmark_type: Option<i64>,
    address: String,
    total_rooms: String,
    attraction_code: String,
    contact_name: String,
    contact_kind: Option<ContactKind>,
    contact_value: String,
}

/// Defines the add/edit landmark form.
///
#[derive(Debug, Clone)]
pub struct LandmarkForm {
    pub mode: LandmarkFormMode,
    pub name: String,
    pub landmark_type: Option<i64>,
    pub type_name: Option<String>,
    pub address: String,
    pub total_rooms: String,
    pub attraction_code: String,
    pub contact_name: String,
    pub contact_kind: Option<ContactKind>,
    pub contact_value: String,
    pub editor: Editor,
    original: Option<LandmarkSnapshot>,
}

const LANDMARK_FIELDS: [Field; 8] = [
    Field::Name,
    Field::LandmarkType,
    Field::Address,
    Field::TotalRooms,
    Field::AttractionCode,
    Field::ContactName,
    Field::ContactKind,
    Field::ContactValue,
];

impl LandmarkForm {
    /// Return an empty form for a new landmark.
    ///
    pub fn add() -> Self {
        LandmarkForm {
            mode: LandmarkFormMode::Add,
            name: String::new(),
            landmark_type: None,
            type_name: None,
            address: String::new(),
            total_rooms: String::new(),
            attraction_code: String::new(),
            contact_name: String::new(),
            contact_kind: None,
            contact_value: String::new(),
            editor: Editor::default(),
            original: None,
        }
    }

    /// Return a form filled from an existing landmark and its first contact.
    /// With no contact the original contact counts as blank.
    ///
    pub fn edit(landmark: &Landmark, landmark_type: Option<&LandmarkType>) -> Self {
        let mut form = LandmarkForm::add();
        form.mode = LandmarkFormMode::Edit {
            info_id: landmark.info_id,
        };
        form.name = landmark.name.to_owned();
        form.landmark_type = Some(landmark.landmark_type);
        form.type_name = landmark_type.map(|t| t.type_name.to_owned());
        form.address = landmark.address.to_owned();
        form.total_rooms = landmark.total_rooms.map(|n| n.to_string()).unwrap_or_default();
        form.attraction_code = landmark.attraction_code.clone().unwrap_or_default();
        form.fill_contact(landmark.contacts.first());
        form.original = Some(form.snapshot());
        form
    }

    /// Take a freshly fetched contact as the original one. Ignored once the
    /// contact fields were edited.
    ///
    pub fn rebase_contact(&mut self, contact: Option<&Contact>) {
        let untouched = match &self.original {
            Some(original) => {
                let current = self.snapshot();
                original.contact_name == current.contact_name
                    && original.contact_kind == current.contact_kind
                    && original.contact_value == current.contact_value
            }
            None => false,
        };
        if untouched {
            self.fill_contact(contact);
            if let Some(original) = self.original.as_mut() {
                original.contact_name = self.contact_name.to_owned();
                original.contact_kind = self.contact_kind;
                original.contact_value = self.contact_value.to_owned();
            }
        }
    }

    fn fill_contact(&mut self, contact: Option<&Contact>) {
        match contact {
            Some(contact) => {
                self.contact_name = contact.name.to_owned();
                self.contact_kind = contact.kind;
                self.contact_value = contact.value.to_owned();
            }
            None => {
                self.contact_name.clear();
                self.contact_kind = None;
                self.contact_value.clear();
            }
        }
    }

    fn snapshot(&self) -> LandmarkSnapshot {
        LandmarkSnapshot {
            name: self.name.trim().to_owned(),
            landmark_type: self.landmark_type,
            address: self.address.trim().to_owned(),
            total_rooms: self.total_rooms.trim().to_owned(),
            attraction_code: self.attraction_code.trim().to_owned(),
            contact_name: self.contact_name.trim().to_owned(),
            contact_kind: self.contact_kind,
            contact_value: self.contact_value.trim().to_owned(),
        }
    }

    /// Whether an edit form differs from the record it was opened with. An
    /// add form always counts as changed.
    ///
    pub fn has_changes(&self) -> bool {
        match &self.original {
            Some(original) => *original != self.snapshot(),
            None => true,
        }
    }

    pub fn fields(&self) -> &'static [Field] {
        &LANDMARK_FIELDS
    }

    pub fn focused_field(&self) -> Option<Field> {
        self.editor.focused(self.fields())
    }

    pub fn focus_next(&mut self) {
        self.leave_focused();
        self.editor.focus_next(self.fields().len());
    }

    pub fn focus_previous(&mut self) {
        self.leave_focused();
        self.editor.focus_previous(self.fields().len());
    }

    fn leave_focused(&mut self) {
        if let Some(field) = self.focused_field() {
            let mut editor = std::mem::take(&mut self.editor);
            editor.leave(self, &LANDMARK_RULES, field);
            self.editor = editor;
        }
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Name => Some(&mut self.name),
            Field::Address => Some(&mut self.address),
            Field::TotalRooms => Some(&mut self.total_rooms),
            Field::AttractionCode => Some(&mut self.attraction_code),
            Field::ContactName => Some(&mut self.contact_name),
            Field::ContactValue => Some(&mut self.contact_value),
            _ => None,
        }
    }

    pub fn input(&mut self, c: char) {
        if let Some(text) = self.focused_field().and_then(|f| self.text_mut(f)) {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_field().and_then(|f| self.text_mut(f)) {
            text.pop();
        }
    }

    pub fn set_landmark_type(&mut self, landmark_type: &LandmarkType) {
        self.landmark_type = Some(landmark_type.type_id);
        self.type_name = Some(landmark_type.type_name.to_owned());
    }

    /// Select the contact channel. A different channel clears the value.
    ///
    pub fn set_contact_kind(&mut self, kind: ContactKind) {
        if self.contact_kind != Some(kind) {
            self.contact_value.clear();
        }
        self.contact_kind = Some(kind);
    }

    /// Validate every field. Returns whether the form may be sent.
    ///
    pub fn submit(&mut self) -> bool {
        let mut editor = std::mem::take(&mut self.editor);
        let valid = editor.submit(self, &LANDMARK_RULES);
        self.editor = editor;
        valid
    }

    pub fn visible_error(&self, field: Field) -> Option<&'static str> {
        self.editor.visible_error(field)
    }

    /// Return the write body. The contact person is sent only when complete
    /// and the room count only for a lodging type.
    ///
    pub fn to_draft(&self) -> Option<LandmarkDraft> {
        let contact_person = match self.contact_kind {
            Some(contact_type)
                if !self.contact_name.trim().is_empty() && !self.contact_value.trim().is_empty() =>
            {
                Some(ContactDraft {
                    name: self.contact_name.trim().to_owned(),
                    contact_type,
                    value: self.contact_value.trim().to_owned(),
                })
            }
            _ => None,
        };
        let attraction_code = self.attraction_code.trim();
        Some(LandmarkDraft {
            name: self.name.trim().to_owned(),
            landmark_type: self.landmark_type?,
            address: self.address.trim().to_owned(),
            total_rooms: self
                .holds(Condition::LodgingType)
                .then(|| self.total_rooms.trim().parse().ok())
                .flatten(),
            attraction_code: (!attraction_code.is_empty()).then(|| attraction_code.to_owned()),
            contact_person,
        })
    }
}

impl FormModel for LandmarkForm {
    fn value(&self, field: Field) -> String {
        match field {
            Field::Name => self.name.to_owned(),
            Field::LandmarkType => self.landmark_type.map(|id| id.to_string()).unwrap_or_default(),
            Field::Address => self.address.to_owned(),
            Field::TotalRooms => self.total_rooms.to_owned(),
            Field::AttractionCode => self.attraction_code.to_owned(),
            Field::ContactName => self.contact_name.to_owned(),
            Field::ContactKind => self.contact_kind.map(|k| k.to_string()).unwrap_or_default(),
            Field::ContactValue => self.contact_value.to_owned(),
            _ => String::new(),
        }
    }

    fn holds(&self, condition: Condition) -> bool {
        match condition {
            Condition::LodgingType => self.type_name.as_deref().map_or(false, is_lodging_type_name),
            Condition::ContactIsEmail => self.contact_kind == Some(ContactKind::Email),
            _ => false,
        }
    }
}

/// Defines the tourist visit form.
///
#[derive(Debug, Default, Clone)]
pub struct TouristForm {
    pub allocation: Option<Allocation>,
    pub nationality: String,
    pub male: String,
    pub female: String,
    pub foreign_male: String,
    pub foreign_female: String,
    pub visited_landmark: Option<i64>,
    pub landmark_name: String,
    pub visited_type_name: Option<String>,
    pub stay_duration: String,
    pub consent: bool,
    pub editor: Editor,
}

impl TouristForm {
    pub fn new() -> Self {
        TouristForm::default()
    }

    /// Return the fields shown for the current allocation and landmark.
    ///
    pub fn fields(&self) -> Vec<Field> {
        let foreign = self.holds(Condition::ForeignAllocation);
        let mut fields = vec![Field::Allocation];
        if foreign {
            fields.push(Field::Nationality);
        }
        fields.extend([Field::Male, Field::Female]);
        if foreign {
            fields.extend([Field::ForeignMale, Field::ForeignFemale]);
        }
        fields.push(Field::VisitedLandmark);
        if self.holds(Condition::LodgingVisit) {
            fields.push(Field::StayDuration);
        }
        fields
    }

    pub fn focused_field(&self) -> Option<Field> {
        self.editor.focused(&self.fields())
    }

    pub fn focus_next(&mut self) {
        self.leave_focused();
        self.editor.focus_next(self.fields().len());
    }

    pub fn focus_previous(&mut self) {
        self.leave_focused();
        self.editor.focus_previous(self.fields().len());
    }

    fn leave_focused(&mut self) {
        if let Some(field) = self.focused_field() {
            let mut editor = std::mem::take(&mut self.editor);
            editor.leave(self, &TOURIST_RULES, field);
            self.editor = editor;
        }
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Male => Some(&mut self.male),
            Field::Female => Some(&mut self.female),
            Field::ForeignMale => Some(&mut self.foreign_male),
            Field::ForeignFemale => Some(&mut self.foreign_female),
            Field::StayDuration => Some(&mut self.stay_duration),
            _ => None,
        }
    }

    pub fn input(&mut self, c: char) {
        if let Some(text) = self.focused_field().and_then(|f| self.text_mut(f)) {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_field().and_then(|f| self.text_mut(f)) {
            text.pop();
        }
    }

    pub fn set_allocation(&mut self, allocation: Allocation) {
        self.allocation = Some(allocation);
    }

    fn visible_counts(&self) -> Vec<&str> {
        let mut counts = vec![self.male.as_str(), self.female.as_str()];
        if self.holds(Condition::ForeignAllocation) {
            counts.extend([self.foreign_male.as_str(), self.foreign_female.as_str()]);
        }
        counts
    }

    pub fn set_nationality(&mut self, nationality: &str) {
        self.nationality = nationality.to_owned();
    }

    pub fn set_visited_landmark(&mut self, landmark: &Landmark, landmark_type: Option<&LandmarkType>) {
        self.visited_landmark = Some(landmark.info_id);
        self.landmark_name = landmark.name.to_owned();
        self.visited_type_name = landmark_type.map(|t| t.type_name.to_owned());
    }

    pub fn toggle_consent(&mut self) {
        self.consent = !self.consent;
    }

    /// Validate every field. Returns whether the visit may be recorded.
    ///
    pub fn submit(&mut self) -> bool {
        let mut editor = std::mem::take(&mut self.editor);
        let valid = editor.submit(self, &TOURIST_RULES);
        self.editor = editor;
        valid
    }

    pub fn visible_error(&self, field: Field) -> Option<&'static str> {
        self.editor.visible_error(field)
    }

    /// Return the visit described by a valid form. Foreign fields are
    /// dropped for a local-only allocation.
    ///
    pub fn to_visit(&self) -> Option<TouristVisit> {
        let allocation = self.allocation?;
        let count = |value: &str| value.trim().parse::<u32>().unwrap_or(0);
        let foreign = allocation.includes_foreign();
        Some(TouristVisit {
            allocation,
            nationality: (foreign && !self.nationality.is_empty()).then(|| self.nationality.to_owned()),
            visited_landmark: self.visited_landmark?,
            landmark_name: self.landmark_name.to_owned(),
            counts: VisitorCounts {
                male: count(&self.male),
                female: count(&self.female),
                foreign_male: if foreign { count(&self.foreign_male) } else { 0 },
                foreign_female: if foreign { count(&self.foreign_female) } else { 0 },
            },
            stay_duration: self
                .holds(Condition::LodgingVisit)
                .then(|| self.stay_duration.trim().parse().ok())
                .flatten(),
        })
    }
}

impl FormModel for TouristForm {
    fn value(&self, field: Field) -> String {
        match field {
            Field::Allocation => self.allocation.map(|a| a.label().to_owned()).unwrap_or_default(),
            Field::Nationality => self.nationality.to_owned(),
            Field::Male => self.male.to_owned(),
            Field::Female => self.female.to_owned(),
            Field::ForeignMale => self.foreign_male.to_owned(),
            Field::ForeignFemale => self.foreign_female.to_owned(),
            Field::VisitedLandmark => self.visited_landmark.map(|id| id.to_string()).unwrap_or_default(),
            Field::StayDuration => self.stay_duration.to_owned(),
            _ => String::new(),
        }
    }

    fn holds(&self, condition: Condition) -> bool {
        match condition {
            Condition::ForeignAllocation => self.allocation.map_or(false, |a| a.includes_foreign()),
            Condition::LodgingVisit => self.visited_type_name.as_deref().map_or(false, is_lodging_type_name),
            Condition::NoVisitorCounts => self.visible_counts().iter().all(|v| v.trim().is_empty()),
            Condition::NoForeignVisitorCounts => {
                self.holds(Condition::ForeignAllocation) && self.holds(Condition::NoVisitorCounts)
            }
            _ => false,
        }
    }
}

/// Specifying the login form fields.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LoginField {
    Username,
    Password,
}

/// Defines the login form.
///
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub consent: bool,
    pub focus: LoginField,
    pub pending: bool,
}

impl Default for LoginForm {
    fn default() -> Self {
        LoginForm {
            username: String::new(),
            password: String::new(),
            consent: false,
            focus: LoginField::Username,
            pending: false,
        }
    }
}

impl LoginForm {
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    pub fn input(&mut self, c: char) {
        match self.focus {
            LoginField::Username => self.username.push(c),
            LoginField::Password => self.password.push(c),
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            LoginField::Username => self.username.pop(),
            LoginField::Password => self.password.pop(),
        };
    }

    pub fn toggle_consent(&mut self) {
        self.consent = !self.consent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};

    fn landmark_type(type_id: i64, type_name: &str) -> LandmarkType {
        LandmarkType {
            type_id,
            type_name: type_name.to_string(),
        }
    }

    fn filled_form(type_name: &str) -> LandmarkForm {
        let mut form = LandmarkForm::add();
        form.name = "Casa de Segunda".to_string();
        form.set_landmark_type(&landmark_type(1, type_name));
        form.address = "Rizal St, Lipa".to_string();
        form.contact_name = "Ana".to_string();
        form.set_contact_kind(ContactKind::Phone);
        form.contact_value = "0917".to_string();
        form
    }

    fn landmark_with_contact() -> Landmark {
        Landmark {
            info_id: 7,
            name: "The Farm at San Benito".to_string(),
            landmark_type: 1,
            address: "San Benito, Lipa, Batangas".to_string(),
            total_rooms: Some(50),
            attraction_code: None,
            contacts: vec![Contact {
                contact_id: 3,
                landmark_info: 7,
                name: "Reservations".to_string(),
                kind: Some(ContactKind::Email),
                value: "stay@thefarm.ph".to_string(),
            }],
        }
    }

    #[test]
    fn empty_landmark_form_flags_required_fields() {
        let errors = validate(&LandmarkForm::add(), &LANDMARK_RULES);
        assert_eq!(errors.len(), 6);
        assert_eq!(errors.get(Field::Name), Some(REQUIRED));
        assert_eq!(errors.get(Field::ContactKind), Some(REQUIRED));
        assert_eq!(errors.get(Field::TotalRooms), None);
    }

    #[test]
    fn lodging_type_requires_rooms() {
        for name in ["Hotel", "Hotels", "Resort", "Resorts"].iter() {
            let form = filled_form(name);
            assert_eq!(validate_field(&form, &LANDMARK_RULES, Field::TotalRooms), Some(REQUIRED));
        }
        let mut form = filled_form("Resort");
        form.total_rooms = "0".to_string();
        assert_eq!(validate_field(&form, &LANDMARK_RULES, Field::TotalRooms), Some(REQUIRED));
        form.total_rooms = "12".to_string();
        assert!(validate(&form, &LANDMARK_RULES).is_empty());
    }

    #[test]
    fn non_lodging_type_never_requires_rooms() {
        let type_name: String = Faker.fake();
        let form = filled_form(&format!("{} Park", type_name));
        assert_eq!(validate_field(&form, &LANDMARK_RULES, Field::TotalRooms), None);
        assert!(validate(&filled_form("Churches"), &LANDMARK_RULES).is_empty());
    }

    #[test]
    fn email_check_depends_on_contact_kind() {
        let mut form = filled_form("Churches");
        form.set_contact_kind(ContactKind::Email);
        form.contact_value = "not-an-email".to_string();
        assert_eq!(validate_field(&form, &LANDMARK_RULES, Field::ContactValue), Some(INVALID_EMAIL));

        form.contact_kind = Some(ContactKind::Phone);
        assert_eq!(validate_field(&form, &LANDMARK_RULES, Field::ContactValue), None);

        form.contact_kind = Some(ContactKind::Email);
        form.contact_value = "ana@lipa.gov.ph".to_string();
        assert_eq!(validate_field(&form, &LANDMARK_RULES, Field::ContactValue), None);
    }

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.c"));
    }

    #[test]
    fn changing_contact_kind_clears_value() {
        let mut form = filled_form("Churches");
        form.set_contact_kind(ContactKind::Phone);
        assert_eq!(form.contact_value, "0917");
        form.set_contact_kind(ContactKind::Email);
        assert!(form.contact_value.is_empty());
    }

    #[test]
    fn errors_show_only_after_leaving_or_submitting() {
        let mut form = LandmarkForm::add();
        assert_eq!(form.focused_field(), Some(Field::Name));
        form.focus_next();
        assert_eq!(form.visible_error(Field::Name), Some(REQUIRED));
        assert_eq!(form.visible_error(Field::Address), None);

        assert!(!form.submit());
        assert_eq!(form.visible_error(Field::Address), Some(REQUIRED));
    }

    #[test]
    fn leaving_a_field_revalidates_only_that_field() {
        let mut form = LandmarkForm::add();
        form.focus_next();
        assert_eq!(form.editor.errors.len(), 1);
        form.focus_previous();
        assert_eq!(form.editor.errors.get(Field::LandmarkType), Some(REQUIRED));
        form.input('X');
        form.focus_next();
        assert_eq!(form.editor.errors.get(Field::Name), None);
        assert_eq!(form.editor.errors.get(Field::LandmarkType), Some(REQUIRED));
        assert_eq!(form.editor.errors.get(Field::Address), None);
    }

    #[test]
    fn edit_form_without_changes() {
        let landmark = landmark_with_contact();
        let mut form = LandmarkForm::edit(&landmark, Some(&landmark_type(1, "Hotels")));
        assert!(!form.has_changes());
        assert_eq!(form.total_rooms, "50");
        assert_eq!(form.contact_value, "stay@thefarm.ph");

        form.address.push(' ');
        assert!(!form.has_changes());
        form.total_rooms = "51".to_string();
        assert!(form.has_changes());
    }

    #[test]
    fn edit_form_contact_change_counts() {
        let landmark = landmark_with_contact();
        let mut form = LandmarkForm::edit(&landmark, Some(&landmark_type(1, "Hotels")));
        form.set_contact_kind(ContactKind::Phone);
        assert!(form.has_changes());
    }

    #[test]
    fn rebase_contact_updates_untouched_form() {
        let mut landmark = landmark_with_contact();
        landmark.contacts.clear();
        let mut form = LandmarkForm::edit(&landmark, None);
        assert!(form.contact_name.is_empty());

        let contact = landmark_with_contact().contacts.remove(0);
        form.rebase_contact(Some(&contact));
        assert_eq!(form.contact_name, "Reservations");
        assert!(!form.has_changes());

        form.contact_name = "Front Desk".to_string();
        form.rebase_contact(None);
        assert_eq!(form.contact_name, "Front Desk");
    }

    #[test]
    fn add_form_draft() {
        let mut form = filled_form("Hotels");
        form.total_rooms = " 30 ".to_string();
        let draft = form.to_draft().unwrap();
        assert_eq!(draft.total_rooms, Some(30));
        assert_eq!(draft.attraction_code, None);
        assert_eq!(draft.contact_person.unwrap().contact_type, ContactKind::Phone);

        form.contact_value.clear();
        assert!(form.to_draft().unwrap().contact_person.is_none());
        assert!(LandmarkForm::add().to_draft().is_none());
    }

    #[test]
    fn draft_drops_rooms_for_non_lodging_type() {
        let mut form = filled_form("Hotels");
        form.total_rooms = "30".to_string();
        form.set_landmark_type(&landmark_type(4, "Churches"));
        assert_eq!(form.to_draft().unwrap().total_rooms, None);
    }

    #[test]
    fn tourist_form_blank_counts_flag_every_shown_count() {
        let mut form = TouristForm::new();
        form.set_allocation(Allocation::OtherProvinceWithForeign);
        let errors = validate(&form, &TOURIST_RULES);
        for field in [Field::Male, Field::Female, Field::ForeignMale, Field::ForeignFemale].iter() {
            assert_eq!(errors.get(*field), Some(REQUIRED));
        }

        form.female = "2".to_string();
        let errors = validate(&form, &TOURIST_RULES);
        assert_eq!(errors.get(Field::Male), None);
        assert_eq!(errors.get(Field::ForeignFemale), None);

        let mut form = TouristForm::new();
        form.set_allocation(Allocation::OtherProvince);
        let errors = validate(&form, &TOURIST_RULES);
        assert_eq!(errors.get(Field::Male), Some(REQUIRED));
        assert_eq!(errors.get(Field::Female), Some(REQUIRED));
        assert_eq!(errors.get(Field::ForeignMale), None);
        assert_eq!(errors.get(Field::Nationality), None);
    }

    #[test]
    fn tourist_form_ignores_hidden_foreign_counts() {
        let mut form = TouristForm::new();
        form.set_allocation(Allocation::ForeignResidency);
        form.foreign_male = "3".to_string();
        form.foreign_female = "many".to_string();
        form.set_allocation(Allocation::LipaResidency);
        form.visited_landmark = Some(1);

        assert!(!form.fields().contains(&Field::ForeignMale));
        assert!(!form.submit());
        assert_eq!(form.editor.errors.get(Field::Male), Some(REQUIRED));
        assert_eq!(form.editor.errors.get(Field::ForeignFemale), None);

        form.male = "1".to_string();
        assert!(form.submit());
        assert_eq!(form.to_visit().unwrap().counts.total(), 1);
    }

    #[test]
    fn tourist_form_caps_each_count() {
        let mut form = TouristForm::new();
        form.set_allocation(Allocation::LipaResidency);
        form.male = "4294967295".to_string();
        form.female = "1".to_string();
        assert_eq!(validate_field(&form, &TOURIST_RULES, Field::Male), Some(TOO_MANY_VISITORS));

        form.male = MAX_VISITOR_COUNT.to_string();
        assert_eq!(validate_field(&form, &TOURIST_RULES, Field::Male), None);
        form.male = (MAX_VISITOR_COUNT + 1).to_string();
        assert_eq!(validate_field(&form, &TOURIST_RULES, Field::Male), Some(TOO_MANY_VISITORS));
        form.male = "-1".to_string();
        assert_eq!(validate_field(&form, &TOURIST_RULES, Field::Male), Some(INVALID_NUMBER));
    }

    #[test]
    fn tourist_form_foreign_and_lodging_rules() {
        let mut form = TouristForm::new();
        form.set_allocation(Allocation::ForeignResidency);
        form.foreign_male = "1".to_string();
        let resort = Landmark {
            info_id: 1,
            name: "Matabungkay Beach Resort".to_string(),
            landmark_type: 2,
            address: "Matabungkay".to_string(),
            total_rooms: Some(25),
            attraction_code: None,
            contacts: vec![],
        };
        form.set_visited_landmark(&resort, Some(&landmark_type(2, "Resorts")));
        assert!(form.fields().contains(&Field::Nationality));
        assert!(form.fields().contains(&Field::StayDuration));

        let errors = validate(&form, &TOURIST_RULES);
        assert_eq!(errors.get(Field::Nationality), Some(REQUIRED));
        assert_eq!(errors.get(Field::StayDuration), Some(REQUIRED));

        form.set_nationality("Japanese");
        form.stay_duration = "3".to_string();
        assert!(form.submit());
        let visit = form.to_visit().unwrap();
        assert_eq!(visit.nationality.as_deref(), Some("Japanese"));
        assert_eq!(visit.stay_duration, Some(3));
        assert_eq!(visit.counts.total(), 1);
    }

    #[test]
    fn tourist_form_rejects_non_numeric_count() {
        let mut form = TouristForm::new();
        form.set_allocation(Allocation::LipaResidency);
        form.male = "two".to_string();
        assert_eq!(validate_field(&form, &TOURIST_RULES, Field::Male), Some(INVALID_NUMBER));
        assert!(!form.fields().contains(&Field::ForeignMale));
    }

    #[test]
    fn login_form_editing() {
        let mut form = LoginForm::default();
        "admin".chars().for_each(|c| form.input(c));
        form.toggle_focus();
        form.input('x');
        form.backspace();
        form.input('p');
        assert_eq!(form.username, "admin");
        assert_eq!(form.password, "p");
        assert!(!form.consent);
    }
}
