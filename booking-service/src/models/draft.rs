//! Booking draft accumulated by the wizard.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::BookingError;

/// Event duration. Only the hour counts offered by the wizard are representable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DurationHours {
    #[default]
    One,
    Two,
    Three,
    Four,
    Six,
    Eight,
    Twelve,
}

impl DurationHours {
    pub const ALL: [DurationHours; 7] = [
        DurationHours::One,
        DurationHours::Two,
        DurationHours::Three,
        DurationHours::Four,
        DurationHours::Six,
        DurationHours::Eight,
        DurationHours::Twelve,
    ];

    pub fn hours(self) -> u8 {
        match self {
            DurationHours::One => 1,
            DurationHours::Two => 2,
            DurationHours::Three => 3,
            DurationHours::Four => 4,
            DurationHours::Six => 6,
            DurationHours::Eight => 8,
            DurationHours::Twelve => 12,
        }
    }
}

impl TryFrom<u8> for DurationHours {
    type Error = BookingError;

    fn try_from(hours: u8) -> Result<Self, Self::Error> {
        DurationHours::ALL
            .into_iter()
            .find(|d| d.hours() == hours)
            .ok_or(BookingError::InvalidDuration(hours))
    }
}

impl From<DurationHours> for u8 {
    fn from(duration: DurationHours) -> Self {
        duration.hours()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Location {
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postal_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ContactInfo {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
}

/// Wizard steps in their fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Service,
    Schedule,
    EventDetails,
    Contact,
    Review,
}

impl WizardStep {
    /// 1-based position shown to the user.
    pub fn index(self) -> u8 {
        match self {
            WizardStep::Service => 1,
            WizardStep::Schedule => 2,
            WizardStep::EventDetails => 3,
            WizardStep::Contact => 4,
            WizardStep::Review => 5,
        }
    }

    pub fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::Service => Some(WizardStep::Schedule),
            WizardStep::Schedule => Some(WizardStep::EventDetails),
            WizardStep::EventDetails => Some(WizardStep::Contact),
            WizardStep::Contact => Some(WizardStep::Review),
            WizardStep::Review => None,
        }
    }

    pub fn previous(self) -> Option<WizardStep> {
        match self {
            WizardStep::Service => None,
            WizardStep::Schedule => Some(WizardStep::Service),
            WizardStep::EventDetails => Some(WizardStep::Schedule),
            WizardStep::Contact => Some(WizardStep::EventDetails),
            WizardStep::Review => Some(WizardStep::Contact),
        }
    }
}

/// A single field change applied to a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum BookingUpdate {
    Service(String),
    Date(NaiveDate),
    Time(NaiveTime),
    Duration(DurationHours),
    GuestCount(u32),
    Location(Location),
    Contact(ContactInfo),
    SpecialRequests(Option<String>),
}

/// Booking parameters collected so far. Updates produce a new draft; the
/// previous value is never modified in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub service_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub duration: DurationHours,
    pub guest_count: Option<u32>,
    pub location: Location,
    pub contact: ContactInfo,
    pub special_requests: Option<String>,
}

fn trimmed(value: String) -> String {
    value.trim().to_string()
}

impl BookingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&self, update: BookingUpdate) -> BookingDraft {
        let mut next = self.clone();
        match update {
            BookingUpdate::Service(id) => {
                let id = trimmed(id);
                next.service_id = (!id.is_empty()).then_some(id);
            }
            BookingUpdate::Date(date) => next.date = Some(date),
            BookingUpdate::Time(time) => next.time = Some(time),
            BookingUpdate::Duration(duration) => next.duration = duration,
            BookingUpdate::GuestCount(count) => next.guest_count = Some(count),
            BookingUpdate::Location(location) => {
                next.location = Location {
                    address: trimmed(location.address),
                    city: trimmed(location.city),
                    state: trimmed(location.state),
                    postal_code: trimmed(location.postal_code),
                }
            }
            BookingUpdate::Contact(contact) => {
                next.contact = ContactInfo {
                    name: trimmed(contact.name),
                    email: trimmed(contact.email),
                    phone: trimmed(contact.phone),
                }
            }
            BookingUpdate::SpecialRequests(requests) => {
                next.special_requests = requests.map(trimmed).filter(|r| !r.is_empty())
            }
        }
        next
    }

    /// Whether the fields gated by `step` are populated.
    pub fn is_step_complete(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::Service => self.service_id.is_some(),
            WizardStep::Schedule => self.date.is_some() && self.time.is_some(),
            WizardStep::EventDetails => {
                self.guest_count.is_some_and(|count| count >= 1)
                    && self.location.validate().is_ok()
            }
            WizardStep::Contact => self.contact.validate().is_ok(),
            WizardStep::Review => true,
        }
    }

    /// First step whose required fields are missing, if any.
    pub fn first_incomplete_step(&self) -> Option<WizardStep> {
        [
            WizardStep::Service,
            WizardStep::Schedule,
            WizardStep::EventDetails,
            WizardStep::Contact,
        ]
        .into_iter()
        .find(|step| !self.is_step_complete(*step))
    }

    /// Eligible to proceed to payment.
    pub fn is_complete(&self) -> bool {
        self.first_incomplete_step().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> ContactInfo {
        ContactInfo {
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "+91 98450 12345".to_string(),
        }
    }

    #[test]
    fn test_duration_accepts_only_offered_hours() {
        assert_eq!(DurationHours::try_from(6).unwrap(), DurationHours::Six);
        assert_eq!(DurationHours::try_from(12).unwrap().hours(), 12);
        assert!(DurationHours::try_from(5).is_err());
        assert!(DurationHours::try_from(0).is_err());
        assert_eq!(DurationHours::default().hours(), 1);
    }

    #[test]
    fn test_duration_deserializes_from_number() {
        let duration: DurationHours = serde_json::from_str("8").unwrap();
        assert_eq!(duration, DurationHours::Eight);
        assert!(serde_json::from_str::<DurationHours>("7").is_err());
    }

    #[test]
    fn test_apply_returns_new_draft() {
        let draft = BookingDraft::new();
        let updated = draft.apply(BookingUpdate::Service("photo-basic".to_string()));

        assert_eq!(draft.service_id, None);
        assert_eq!(updated.service_id.as_deref(), Some("photo-basic"));
    }

    #[test]
    fn test_blank_service_id_is_not_a_selection() {
        let draft = BookingDraft::new().apply(BookingUpdate::Service("   ".to_string()));
        assert!(!draft.is_step_complete(WizardStep::Service));
    }

    #[test]
    fn test_event_details_need_guests_and_address() {
        let draft = BookingDraft::new().apply(BookingUpdate::GuestCount(0));
        assert!(!draft.is_step_complete(WizardStep::EventDetails));

        let draft = draft.apply(BookingUpdate::GuestCount(150));
        assert!(!draft.is_step_complete(WizardStep::EventDetails));

        let draft = draft.apply(BookingUpdate::Location(Location {
            address: "12 Palace Road".to_string(),
            ..Default::default()
        }));
        assert!(draft.is_step_complete(WizardStep::EventDetails));
    }

    #[test]
    fn test_contact_requires_valid_email() {
        let mut info = contact();
        info.email = "not-an-email".to_string();
        let draft = BookingDraft::new().apply(BookingUpdate::Contact(info));
        assert!(!draft.is_step_complete(WizardStep::Contact));

        let draft = draft.apply(BookingUpdate::Contact(contact()));
        assert!(draft.is_step_complete(WizardStep::Contact));
    }

    #[test]
    fn test_whitespace_contact_fields_are_empty() {
        let mut info = contact();
        info.name = "  ".to_string();
        let draft = BookingDraft::new().apply(BookingUpdate::Contact(info));
        assert!(!draft.is_step_complete(WizardStep::Contact));
    }

    #[test]
    fn test_first_incomplete_step() {
        let draft = BookingDraft::new().apply(BookingUpdate::Service("dj-night".to_string()));
        assert_eq!(draft.first_incomplete_step(), Some(WizardStep::Schedule));
        assert!(!draft.is_complete());
    }

    #[test]
    fn test_update_deserializes_from_tagged_json() {
        let update: BookingUpdate =
            serde_json::from_str(r#"{"field":"duration","value":4}"#).unwrap();
        assert_eq!(update, BookingUpdate::Duration(DurationHours::Four));

        let update: BookingUpdate =
            serde_json::from_str(r#"{"field":"date","value":"2026-12-12"}"#).unwrap();
        assert_eq!(
            update,
            BookingUpdate::Date(NaiveDate::from_ymd_opt(2026, 12, 12).unwrap())
        );
    }
}
