//! TruckersMP response models.
//!
//! Models are immutable once hydrated and expose read-only accessors. Every
//! listed key is required: a missing or mistyped field fails the whole model
//! with a decode error. Keys the API sends as `null` are modelled as `Option`
//! but must still be present.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use truckersmp_core::timestamp;
use truckersmp_core::{CompanyId, EventId, Game, ServerId};

/// Accepts a present-but-nullable key; an absent key stays an error.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

/// Booleans that the API sometimes encodes as `0`/`1`.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Int(value) => value != 0,
    })
}

/// A place on the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    location: String,
    city: String,
}

impl Location {
    /// Location name, e.g. a company depot.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// City name.
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }
}

/// Attendance counters of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendances {
    confirmed: u32,
    unsure: u32,
}

impl Attendances {
    /// Users who confirmed attendance.
    #[must_use]
    pub const fn confirmed(&self) -> u32 {
        self.confirmed
    }

    /// Users who are unsure whether they can attend.
    #[must_use]
    pub const fn unsure(&self) -> u32 {
        self.unsure
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ServerRef {
    name: String,
}

/// An event hosted by a VTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyEvent {
    id: EventId,
    name: String,
    slug: String,
    game: Game,
    server: ServerRef,
    language: String,
    departure: Location,
    arrival: Location,
    #[serde(with = "timestamp")]
    start_at: DateTime<Utc>,
    #[serde(deserialize_with = "nullable")]
    banner: Option<String>,
    #[serde(deserialize_with = "nullable")]
    map: Option<String>,
    description: String,
    #[serde(deserialize_with = "nullable")]
    voice_link: Option<String>,
    #[serde(deserialize_with = "nullable")]
    external_link: Option<String>,
    attendances: Attendances,
    url: String,
}

impl CompanyEvent {
    /// Event id.
    #[must_use]
    pub const fn id(&self) -> EventId {
        self.id
    }

    /// Event name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// URL slug.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Game the event is driven in.
    #[must_use]
    pub const fn game(&self) -> Game {
        self.game
    }

    /// Name of the server the event is held on.
    #[must_use]
    pub fn server(&self) -> &str {
        &self.server.name
    }

    /// Event language.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Where the convoy starts.
    #[must_use]
    pub const fn departure(&self) -> &Location {
        &self.departure
    }

    /// Where the convoy ends.
    #[must_use]
    pub const fn arrival(&self) -> &Location {
        &self.arrival
    }

    /// Start time in UTC.
    #[must_use]
    pub const fn start_at(&self) -> DateTime<Utc> {
        self.start_at
    }

    /// Banner image URL.
    #[must_use]
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Route map image URL.
    #[must_use]
    pub fn map(&self) -> Option<&str> {
        self.map.as_deref()
    }

    /// Description written by the organiser.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Voice chat link.
    #[must_use]
    pub fn voice_link(&self) -> Option<&str> {
        self.voice_link.as_deref()
    }

    /// External link supplied by the organiser.
    #[must_use]
    pub fn external_link(&self) -> Option<&str> {
        self.external_link.as_deref()
    }

    /// Attendance counters.
    #[must_use]
    pub const fn attendances(&self) -> Attendances {
        self.attendances
    }

    /// Event page on truckersmp.com. Not the organiser's external link.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// A virtual trucking company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    id: CompanyId,
    name: String,
    owner_id: u64,
    owner_username: String,
    #[serde(deserialize_with = "nullable")]
    slogan: Option<String>,
    tag: String,
    #[serde(deserialize_with = "nullable")]
    logo: Option<String>,
    #[serde(deserialize_with = "nullable")]
    cover: Option<String>,
    information: String,
    rules: String,
    requirements: String,
    #[serde(deserialize_with = "nullable")]
    website: Option<String>,
    members_count: u32,
    recruitment: String,
    language: String,
    verified: bool,
    validated: bool,
    #[serde(with = "timestamp")]
    created: DateTime<Utc>,
}

impl Company {
    /// Company id.
    #[must_use]
    pub const fn id(&self) -> CompanyId {
        self.id
    }

    /// Company name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// TruckersMP id of the owner.
    #[must_use]
    pub const fn owner_id(&self) -> u64 {
        self.owner_id
    }

    /// Username of the owner.
    #[must_use]
    pub fn owner_username(&self) -> &str {
        &self.owner_username
    }

    /// Slogan.
    #[must_use]
    pub fn slogan(&self) -> Option<&str> {
        self.slogan.as_deref()
    }

    /// Short tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Logo URL.
    #[must_use]
    pub fn logo(&self) -> Option<&str> {
        self.logo.as_deref()
    }

    /// Cover image URL.
    #[must_use]
    pub fn cover(&self) -> Option<&str> {
        self.cover.as_deref()
    }

    /// Free-form information text.
    #[must_use]
    pub fn information(&self) -> &str {
        &self.information
    }

    /// Company rules.
    #[must_use]
    pub fn rules(&self) -> &str {
        &self.rules
    }

    /// Membership requirements.
    #[must_use]
    pub fn requirements(&self) -> &str {
        &self.requirements
    }

    /// Website URL.
    #[must_use]
    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }

    /// Number of members.
    #[must_use]
    pub const fn members_count(&self) -> u32 {
        self.members_count
    }

    /// Recruitment status as reported, e.g. `Open` or `Close`.
    #[must_use]
    pub fn recruitment(&self) -> &str {
        &self.recruitment
    }

    /// Primary language.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Verified by TruckersMP staff.
    #[must_use]
    pub const fn verified(&self) -> bool {
        self.verified
    }

    /// Validated by TruckersMP staff.
    #[must_use]
    pub const fn validated(&self) -> bool {
        self.validated
    }

    /// Creation time in UTC.
    #[must_use]
    pub const fn created(&self) -> DateTime<Utc> {
        self.created
    }
}

/// In-game rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    rules: String,
    revision: u32,
}

impl Rules {
    /// Rules text (Markdown).
    #[must_use]
    pub fn rules(&self) -> &str {
        &self.rules
    }

    /// Revision number.
    #[must_use]
    pub const fn revision(&self) -> u32 {
        self.revision
    }
}

/// Checksums of the multiplayer client files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checksum {
    dll: String,
    adb: String,
}

impl Checksum {
    /// Checksum of the core DLL.
    #[must_use]
    pub fn dll(&self) -> &str {
        &self.dll
    }

    /// Checksum of the ADB archive.
    #[must_use]
    pub fn adb(&self) -> &str {
        &self.adb
    }
}

/// Current multiplayer mod version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    name: String,
    numeric: String,
    stage: String,
    ets2mp_checksum: Checksum,
    atsmp_checksum: Checksum,
    #[serde(with = "timestamp")]
    time: DateTime<Utc>,
    supported_game_version: String,
    supported_ats_game_version: String,
}

impl Version {
    /// Version name, e.g. `1.4.2.1`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Numeric version string.
    #[must_use]
    pub fn numeric(&self) -> &str {
        &self.numeric
    }

    /// Release stage.
    #[must_use]
    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// ETS2MP client checksums.
    #[must_use]
    pub const fn ets2mp_checksum(&self) -> &Checksum {
        &self.ets2mp_checksum
    }

    /// ATSMP client checksums.
    #[must_use]
    pub const fn atsmp_checksum(&self) -> &Checksum {
        &self.atsmp_checksum
    }

    /// Release time in UTC.
    #[must_use]
    pub const fn time(&self) -> DateTime<Utc> {
        self.time
    }

    /// Supported Euro Truck Simulator 2 version.
    #[must_use]
    pub fn supported_game_version(&self) -> &str {
        &self.supported_game_version
    }

    /// Supported American Truck Simulator version.
    #[must_use]
    pub fn supported_ats_game_version(&self) -> &str {
        &self.supported_ats_game_version
    }
}

/// A multiplayer server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Server {
    id: ServerId,
    game: Game,
    ip: String,
    port: u16,
    name: String,
    shortname: String,
    online: bool,
    players: u32,
    queue: u32,
    maxplayers: u32,
    #[serde(deserialize_with = "flag")]
    speedlimiter: bool,
    collisions: bool,
    promods: bool,
    event: bool,
}

impl Server {
    /// Server id.
    #[must_use]
    pub const fn id(&self) -> ServerId {
        self.id
    }

    /// Game served.
    #[must_use]
    pub const fn game(&self) -> Game {
        self.game
    }

    /// IP address.
    #[must_use]
    pub fn ip(&self) -> &str {
        &self.ip
    }

    /// Port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Short name, e.g. `SIM1`.
    #[must_use]
    pub fn shortname(&self) -> &str {
        &self.shortname
    }

    /// Whether the server is up.
    #[must_use]
    pub const fn online(&self) -> bool {
        self.online
    }

    /// Connected players.
    #[must_use]
    pub const fn players(&self) -> u32 {
        self.players
    }

    /// Players waiting in the queue.
    #[must_use]
    pub const fn queue(&self) -> u32 {
        self.queue
    }

    /// Player slots.
    #[must_use]
    pub const fn max_players(&self) -> u32 {
        self.maxplayers
    }

    /// Whether the speed limiter is enforced.
    #[must_use]
    pub const fn speed_limiter(&self) -> bool {
        self.speedlimiter
    }

    /// Whether collisions are enabled.
    #[must_use]
    pub const fn collisions(&self) -> bool {
        self.collisions
    }

    /// Whether ProMods is required.
    #[must_use]
    pub const fn promods(&self) -> bool {
        self.promods
    }

    /// Whether this is an event server.
    #[must_use]
    pub const fn event(&self) -> bool {
        self.event
    }
}

/// In-game clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameTime {
    game_time: u64,
}

impl GameTime {
    /// Minutes elapsed on the in-game clock.
    #[must_use]
    pub const fn minutes(&self) -> u64 {
        self.game_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn event_json() -> serde_json::Value {
        json!({
            "id": 10,
            "name": "Spring Tour",
            "slug": "spring-tour",
            "game": "ETS2",
            "server": {"name": "Simulation 1"},
            "language": "en",
            "departure": {"location": "Calais", "city": "Calais"},
            "arrival": {"location": "Duisburg", "city": "Duisburg"},
            "start_at": "2024-05-01T18:00:00Z",
            "banner": "b.png",
            "map": "m.png",
            "description": "d",
            "voice_link": "v",
            "external_link": "e",
            "attendances": {"confirmed": 12, "unsure": 3},
            "url": "u"
        })
    }

    #[test]
    fn company_event_accessors_match_source() {
        let event: CompanyEvent = serde_json::from_value(event_json()).unwrap();

        assert_eq!(event.id(), EventId::new(10));
        assert_eq!(event.name(), "Spring Tour");
        assert_eq!(event.game(), Game::Ets2);
        assert_eq!(event.server(), "Simulation 1");
        assert_eq!(event.departure().city(), "Calais");
        assert_eq!(event.arrival().location(), "Duisburg");
        assert_eq!(
            event.start_at(),
            Utc.with_ymd_and_hms(2024, 5, 1, 18, 0, 0).unwrap()
        );
        assert_eq!(event.attendances().confirmed(), 12);
        assert_eq!(event.attendances().unsure(), 3);
        assert_eq!(event.external_link(), Some("e"));
    }

    #[test]
    fn missing_nested_field_fails() {
        let mut value = event_json();
        value["departure"].as_object_mut().unwrap().remove("city");
        let err = serde_json::from_value::<CompanyEvent>(value).unwrap_err();
        assert!(err.to_string().contains("city"));
    }

    #[test]
    fn nullable_key_accepts_null_but_not_absence() {
        let mut value = event_json();
        value["voice_link"] = serde_json::Value::Null;
        let event: CompanyEvent = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(event.voice_link(), None);

        value.as_object_mut().unwrap().remove("voice_link");
        assert!(serde_json::from_value::<CompanyEvent>(value).is_err());
    }

    #[test]
    fn unknown_game_fails() {
        let mut value = event_json();
        value["game"] = json!("FS22");
        assert!(serde_json::from_value::<CompanyEvent>(value).is_err());
    }

    #[test]
    fn server_speed_limiter_accepts_int_or_bool() {
        let mut value = json!({
            "id": 1, "game": "ETS2", "ip": "127.0.0.1", "port": 42860,
            "name": "Simulation 1", "shortname": "SIM1", "online": true,
            "players": 2500, "queue": 0, "maxplayers": 4200,
            "speedlimiter": 1, "collisions": true, "promods": false, "event": false
        });
        let server: Server = serde_json::from_value(value.clone()).unwrap();
        assert!(server.speed_limiter());
        assert_eq!(server.max_players(), 4200);

        value["speedlimiter"] = json!(false);
        let server: Server = serde_json::from_value(value).unwrap();
        assert!(!server.speed_limiter());
    }

    #[test]
    fn game_time_reads_counter() {
        let time: GameTime =
            serde_json::from_value(json!({"error": false, "game_time": 912_345})).unwrap();
        assert_eq!(time.minutes(), 912_345);
    }
}
