use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::media::VideoData;
use super::patch::{from_object, nullable, Patch};
use super::OwnerDocument;
use crate::apply_present;
use crate::database::store::Collection;
use crate::types::{new_id, now, Timestamp};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimaryAccess {
    pub system_type: Option<String>,
    pub access_method: Option<String>,
    pub location: Option<String>,
    pub pin_code: Option<String>,
    pub battery_type: Option<String>,
    pub battery_changed: Option<String>,
    pub bluetooth_enabled: bool,
    pub lock_type: Option<String>,
    pub description: Option<String>,
    pub video: Option<VideoData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupAccess {
    pub key_type: Option<String>,
    pub key_location: Option<String>,
    pub contact_person: Option<String>,
    pub contact_phone: Option<String>,
    pub availability: Option<String>,
    pub safe_code: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
    pub role: String,
    #[serde(default)]
    pub response_time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmergencyProtocol {
    pub primary_contact: Option<EmergencyContact>,
    pub secondary_contact: Option<EmergencyContact>,
    pub locksmith_contact: Option<EmergencyContact>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationFromStreet {
    pub start_point: Option<String>,
    pub description: Option<String>,
    pub door_code: Option<String>,
    pub mailbox_number: Option<String>,
    pub floor: Option<String>,
    pub video: Option<VideoData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomWalkthrough {
    pub rooms_documented: Option<String>,
    pub description: Option<String>,
    pub video: Option<VideoData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParkingInfo {
    pub garage_spot: Option<String>,
    pub street_parking: Option<String>,
    pub garage_code: Option<String>,
    pub description: Option<String>,
    pub video: Option<VideoData>,
}

// Patches. Video slots are only written by uploads, never by a section PUT.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrimaryAccessPatch {
    #[serde(default, deserialize_with = "nullable")]
    pub system_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub access_method: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub pin_code: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub battery_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub battery_changed: Option<Option<String>>,
    #[serde(default)]
    pub bluetooth_enabled: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub lock_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
}

impl Patch<PrimaryAccess> for PrimaryAccessPatch {
    fn apply_to(self, target: &mut PrimaryAccess) {
        let patch = self;
        apply_present!(patch => target;
            system_type, access_method, location, pin_code, battery_type,
            battery_changed, bluetooth_enabled, lock_type, description);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackupAccessPatch {
    #[serde(default, deserialize_with = "nullable")]
    pub key_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub key_location: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub contact_person: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub contact_phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub availability: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub safe_code: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
}

impl Patch<BackupAccess> for BackupAccessPatch {
    fn apply_to(self, target: &mut BackupAccess) {
        let patch = self;
        apply_present!(patch => target;
            key_type, key_location, contact_person, contact_phone,
            availability, safe_code, description);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmergencyProtocolPatch {
    #[serde(default, deserialize_with = "nullable")]
    pub primary_contact: Option<Option<EmergencyContact>>,
    #[serde(default, deserialize_with = "nullable")]
    pub secondary_contact: Option<Option<EmergencyContact>>,
    #[serde(default, deserialize_with = "nullable")]
    pub locksmith_contact: Option<Option<EmergencyContact>>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
}

impl Patch<EmergencyProtocol> for EmergencyProtocolPatch {
    fn apply_to(self, target: &mut EmergencyProtocol) {
        let patch = self;
        apply_present!(patch => target;
            primary_contact, secondary_contact, locksmith_contact, description);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NavigationFromStreetPatch {
    #[serde(default, deserialize_with = "nullable")]
    pub start_point: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub door_code: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub mailbox_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub floor: Option<Option<String>>,
}

impl Patch<NavigationFromStreet> for NavigationFromStreetPatch {
    fn apply_to(self, target: &mut NavigationFromStreet) {
        let patch = self;
        apply_present!(patch => target; start_point, description, door_code, mailbox_number, floor);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoomWalkthroughPatch {
    #[serde(default, deserialize_with = "nullable")]
    pub rooms_documented: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
}

impl Patch<RoomWalkthrough> for RoomWalkthroughPatch {
    fn apply_to(self, target: &mut RoomWalkthrough) {
        let patch = self;
        apply_present!(patch => target; rooms_documented, description);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParkingInfoPatch {
    #[serde(default, deserialize_with = "nullable")]
    pub garage_spot: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub street_parking: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub garage_code: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
}

impl Patch<ParkingInfo> for ParkingInfoPatch {
    fn apply_to(self, target: &mut ParkingInfo) {
        let patch = self;
        apply_present!(patch => target; garage_spot, street_parking, garage_code, description);
    }
}

/// Named section of an [`AccessAndLocks`] document.
///
/// Parsed from the route segment, accepting either the URL slug
/// (`primary-access`, `navigation`, ...) or the stored field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessSection {
    PrimaryAccess,
    BackupAccess,
    EmergencyProtocol,
    Navigation,
    RoomWalkthrough,
    Parking,
}

impl AccessSection {
    pub const ALL: [AccessSection; 6] = [
        AccessSection::PrimaryAccess,
        AccessSection::BackupAccess,
        AccessSection::EmergencyProtocol,
        AccessSection::Navigation,
        AccessSection::RoomWalkthrough,
        AccessSection::Parking,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            AccessSection::PrimaryAccess => "primary-access",
            AccessSection::BackupAccess => "backup-access",
            AccessSection::EmergencyProtocol => "emergency-protocol",
            AccessSection::Navigation => "navigation",
            AccessSection::RoomWalkthrough => "room-walkthrough",
            AccessSection::Parking => "parking",
        }
    }

    /// Key of the section inside the stored document
    pub fn field_name(&self) -> &'static str {
        match self {
            AccessSection::PrimaryAccess => "primary_access",
            AccessSection::BackupAccess => "backup_access",
            AccessSection::EmergencyProtocol => "emergency_protocol",
            AccessSection::Navigation => "navigation_from_street",
            AccessSection::RoomWalkthrough => "room_walkthrough",
            AccessSection::Parking => "parking_info",
        }
    }

    pub fn has_video_slot(&self) -> bool {
        !matches!(self, AccessSection::BackupAccess | AccessSection::EmergencyProtocol)
    }
}

impl fmt::Display for AccessSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSection(pub String);

impl fmt::Display for UnknownSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown section: {}", self.0)
    }
}

impl std::error::Error for UnknownSection {}

impl FromStr for AccessSection {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AccessSection::ALL
            .into_iter()
            .find(|section| section.slug() == s || section.field_name() == s)
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

/// Typed patch for exactly one section
#[derive(Debug, Clone)]
pub enum SectionPatch {
    PrimaryAccess(PrimaryAccessPatch),
    BackupAccess(BackupAccessPatch),
    EmergencyProtocol(EmergencyProtocolPatch),
    Navigation(NavigationFromStreetPatch),
    RoomWalkthrough(RoomWalkthroughPatch),
    Parking(ParkingInfoPatch),
}

impl SectionPatch {
    /// Decode a request body as the patch type of `section`
    pub fn parse(section: AccessSection, body: Value) -> Result<Self, serde_json::Error> {
        Ok(match section {
            AccessSection::PrimaryAccess => SectionPatch::PrimaryAccess(from_object(body)?),
            AccessSection::BackupAccess => SectionPatch::BackupAccess(from_object(body)?),
            AccessSection::EmergencyProtocol => SectionPatch::EmergencyProtocol(from_object(body)?),
            AccessSection::Navigation => SectionPatch::Navigation(from_object(body)?),
            AccessSection::RoomWalkthrough => SectionPatch::RoomWalkthrough(from_object(body)?),
            AccessSection::Parking => SectionPatch::Parking(from_object(body)?),
        })
    }

    pub fn section(&self) -> AccessSection {
        match self {
            SectionPatch::PrimaryAccess(_) => AccessSection::PrimaryAccess,
            SectionPatch::BackupAccess(_) => AccessSection::BackupAccess,
            SectionPatch::EmergencyProtocol(_) => AccessSection::EmergencyProtocol,
            SectionPatch::Navigation(_) => AccessSection::Navigation,
            SectionPatch::RoomWalkthrough(_) => AccessSection::RoomWalkthrough,
            SectionPatch::Parking(_) => AccessSection::Parking,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessAndLocks {
    pub id: String,
    pub owner_id: String,
    #[serde(default)]
    pub primary_access: PrimaryAccess,
    #[serde(default)]
    pub backup_access: BackupAccess,
    #[serde(default)]
    pub emergency_protocol: EmergencyProtocol,
    #[serde(default)]
    pub navigation_from_street: NavigationFromStreet,
    #[serde(default)]
    pub room_walkthrough: RoomWalkthrough,
    #[serde(default)]
    pub parking_info: ParkingInfo,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AccessAndLocks {
    pub fn apply(&mut self, patch: SectionPatch) {
        match patch {
            SectionPatch::PrimaryAccess(p) => p.apply_to(&mut self.primary_access),
            SectionPatch::BackupAccess(p) => p.apply_to(&mut self.backup_access),
            SectionPatch::EmergencyProtocol(p) => p.apply_to(&mut self.emergency_protocol),
            SectionPatch::Navigation(p) => p.apply_to(&mut self.navigation_from_street),
            SectionPatch::RoomWalkthrough(p) => p.apply_to(&mut self.room_walkthrough),
            SectionPatch::Parking(p) => p.apply_to(&mut self.parking_info),
        }
    }

    pub fn section_json(&self, section: AccessSection) -> Result<Value, serde_json::Error> {
        match section {
            AccessSection::PrimaryAccess => serde_json::to_value(&self.primary_access),
            AccessSection::BackupAccess => serde_json::to_value(&self.backup_access),
            AccessSection::EmergencyProtocol => serde_json::to_value(&self.emergency_protocol),
            AccessSection::Navigation => serde_json::to_value(&self.navigation_from_street),
            AccessSection::RoomWalkthrough => serde_json::to_value(&self.room_walkthrough),
            AccessSection::Parking => serde_json::to_value(&self.parking_info),
        }
    }

    /// The section's single video slot, or `None` for sections without one
    pub fn video_slot_mut(&mut self, section: AccessSection) -> Option<&mut Option<VideoData>> {
        match section {
            AccessSection::PrimaryAccess => Some(&mut self.primary_access.video),
            AccessSection::Navigation => Some(&mut self.navigation_from_street.video),
            AccessSection::RoomWalkthrough => Some(&mut self.room_walkthrough.video),
            AccessSection::Parking => Some(&mut self.parking_info.video),
            AccessSection::BackupAccess | AccessSection::EmergencyProtocol => None,
        }
    }
}

impl OwnerDocument for AccessAndLocks {
    const COLLECTION: Collection = Collection::AccessAndLocks;

    fn new(owner_id: &str) -> Self {
        let created = now();
        Self {
            id: new_id(),
            owner_id: owner_id.to_string(),
            primary_access: PrimaryAccess::default(),
            backup_access: BackupAccess::default(),
            emergency_protocol: EmergencyProtocol::default(),
            navigation_from_street: NavigationFromStreet::default(),
            room_walkthrough: RoomWalkthrough::default(),
            parking_info: ParkingInfo::default(),
            created_at: created,
            updated_at: created,
        }
    }

    fn owner_id(&self) -> &str {
        &self.owner_id
    }

    fn touch(&mut self) {
        self.updated_at = now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_slugs_and_field_names() {
        assert_eq!("primary-access".parse::<AccessSection>(), Ok(AccessSection::PrimaryAccess));
        assert_eq!("navigation_from_street".parse::<AccessSection>(), Ok(AccessSection::Navigation));
        assert_eq!("parking".parse::<AccessSection>(), Ok(AccessSection::Parking));
        assert_eq!("garage".parse::<AccessSection>(), Err(UnknownSection("garage".into())));
    }

    #[test]
    fn video_slots_match_section_shapes() {
        let mut doc = AccessAndLocks::new("o1");
        for section in AccessSection::ALL {
            assert_eq!(section.has_video_slot(), doc.video_slot_mut(section).is_some(), "{section}");
        }
    }

    #[test]
    fn sparse_patch_keeps_untouched_fields() {
        let mut doc = AccessAndLocks::new("o1");
        doc.apply(SectionPatch::parse(AccessSection::PrimaryAccess, json!({"pin_code": "1234", "location": "Door"})).unwrap());
        doc.apply(SectionPatch::parse(AccessSection::PrimaryAccess, json!({"pin_code": "9999"})).unwrap());

        assert_eq!(doc.primary_access.pin_code.as_deref(), Some("9999"));
        assert_eq!(doc.primary_access.location.as_deref(), Some("Door"));
    }

    #[test]
    fn explicit_null_clears_field() {
        let mut doc = AccessAndLocks::new("o1");
        doc.apply(SectionPatch::parse(AccessSection::BackupAccess, json!({"safe_code": "42"})).unwrap());
        doc.apply(SectionPatch::parse(AccessSection::BackupAccess, json!({"safe_code": null})).unwrap());
        assert_eq!(doc.backup_access.safe_code, None);
    }

    #[test]
    fn null_on_bool_field_is_ignored() {
        let mut doc = AccessAndLocks::new("o1");
        doc.apply(SectionPatch::parse(AccessSection::PrimaryAccess, json!({"bluetooth_enabled": true})).unwrap());
        doc.apply(SectionPatch::parse(AccessSection::PrimaryAccess, json!({"bluetooth_enabled": null})).unwrap());
        assert!(doc.primary_access.bluetooth_enabled);
    }

    #[test]
    fn emergency_contact_is_replaced_wholesale() {
        let mut doc = AccessAndLocks::new("o1");
        doc.apply(SectionPatch::parse(
            AccessSection::EmergencyProtocol,
            json!({"primary_contact": {"name": "A", "phone": "1", "role": "Nabo", "response_time": "10 min"}}),
        ).unwrap());
        doc.apply(SectionPatch::parse(
            AccessSection::EmergencyProtocol,
            json!({"primary_contact": {"name": "B", "phone": "2", "role": "Vaktmester"}}),
        ).unwrap());

        let contact = doc.emergency_protocol.primary_contact.unwrap();
        assert_eq!(contact.name, "B");
        assert_eq!(contact.response_time, None);
    }

    #[test]
    fn array_body_is_not_a_section_patch() {
        let err = SectionPatch::parse(AccessSection::PrimaryAccess, json!(["Nøkkelboks", "kode"])).unwrap_err();
        assert!(err.to_string().contains("JSON object"));
        assert!(SectionPatch::parse(AccessSection::Parking, json!("Gateparkering")).is_err());
    }
}
