//! Conversion of decoded GTFS Realtime messages into plain nested values.
//!
//! A message describes its populated fields through [MessageFields]: each field carries its
//! declared name and is either a single [Node] or a repeated sequence of them. [flatten] walks
//! that tree depth first and produces a [FlatValue] with no reference to the message types.

use gtfs_realtime::{
    Alert, EntitySelector, FeedEntity, FeedHeader, FeedMessage, Position, ReplacementStop, Shape,
    Stop, StopSelector, TimeRange, TranslatedImage, TranslatedString, TripDescriptor,
    TripModifications, TripUpdate, VehicleDescriptor, VehiclePosition, translated_image,
    translated_string, trip_descriptor, trip_modifications, trip_update, vehicle_position,
};
use prost::Message;
use prost::encoding::{self, DecodeContext, WireType};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use tracing::debug;

use crate::error::{DecodeError, Result};

/// A leaf value. Enumerations are carried as their numeric value.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Int(v.into())
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Int(v)
    }
}

impl From<u32> for Scalar {
    fn from(v: u32) -> Self {
        Scalar::UInt(v.into())
    }
}

impl From<u64> for Scalar {
    fn from(v: u64) -> Self {
        Scalar::UInt(v)
    }
}

impl From<f32> for Scalar {
    fn from(v: f32) -> Self {
        Scalar::Float(v.into())
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Text(v)
    }
}

/// Either a leaf, or a message exposing its own fields.
pub enum Node<'a> {
    Scalar(Scalar),
    Message(&'a dyn MessageFields),
}

pub enum FieldValue<'a> {
    Single(Node<'a>),
    Repeated(Vec<Node<'a>>),
}

pub struct Field<'a> {
    pub name: &'static str,
    pub value: FieldValue<'a>,
}

/// Self-description of a decoded message.
pub trait MessageFields {
    /// Populated fields only, in declaration order. Unset optional fields and empty repeated
    /// fields are not returned.
    fn fields(&self) -> Vec<Field<'_>>;
}

/// Plain nested data produced by [flatten].
#[derive(Clone, Debug, PartialEq)]
pub enum FlatValue {
    Scalar(Scalar),
    Sequence(Vec<FlatValue>),
    /// Keys in schema declaration order
    Mapping(Vec<(String, FlatValue)>),
}

impl FlatValue {
    /// Looks up a key of a mapping.
    pub fn get(&self, key: &str) -> Option<&FlatValue> {
        match self {
            FlatValue::Mapping(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn keys(&self) -> Vec<&str> {
        match self {
            FlatValue::Mapping(entries) => entries.iter().map(|(k, _)| k.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    pub fn as_sequence(&self) -> Option<&[FlatValue]> {
        match self {
            FlatValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            FlatValue::Scalar(s) => Some(s),
            _ => None,
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Scalar::Bool(v) => serializer.serialize_bool(*v),
            Scalar::Int(v) => serializer.serialize_i64(*v),
            Scalar::UInt(v) => serializer.serialize_u64(*v),
            Scalar::Float(v) => serializer.serialize_f64(*v),
            Scalar::Text(v) => serializer.serialize_str(v),
        }
    }
}

impl Serialize for FlatValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FlatValue::Scalar(s) => s.serialize(serializer),
            FlatValue::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            FlatValue::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

pub fn flatten(node: Node<'_>) -> FlatValue {
    match node {
        Node::Scalar(s) => FlatValue::Scalar(s),
        Node::Message(message) => flatten_message(message),
    }
}

pub fn flatten_message(message: &dyn MessageFields) -> FlatValue {
    let entries = message
        .fields()
        .into_iter()
        .map(|field| {
            let value = match field.value {
                FieldValue::Single(node) => flatten(node),
                FieldValue::Repeated(nodes) => {
                    FlatValue::Sequence(nodes.into_iter().map(flatten).collect())
                }
            };
            (field.name.to_owned(), value)
        })
        .collect();
    FlatValue::Mapping(entries)
}

/// Flattens every entity of an already decoded feed.
pub fn flatten_feed(feed: &FeedMessage) -> Vec<FlatValue> {
    feed.entity.iter().map(|e| flatten_message(e)).collect()
}

/// Decodes a binary `FeedMessage`. A payload lacking any proto2 `required` field is rejected
/// rather than decoded with a default in its place.
pub fn decode_feed_message(bytes: &[u8]) -> Result<FeedMessage> {
    let feed = FeedMessage::decode(bytes)?;
    check_required(bytes, &FEED_MESSAGE)?;
    Ok(feed)
}

/// Decodes a binary feed and flattens its entities.
pub fn parse_feed_binary(bytes: &[u8]) -> Result<Vec<FlatValue>> {
    let feed = decode_feed_message(bytes)?;
    debug!(
        entities = feed.entity.len(),
        version = feed.header.gtfs_realtime_version.as_str(),
        "decoded realtime feed"
    );
    Ok(flatten_feed(&feed))
}

/// Wire-level schema of the required fields: which tags a message must carry, and which of its
/// length-delimited tags hold a message that has required fields of its own.
struct Presence {
    message: &'static str,
    required: &'static [(u32, &'static str)],
    nested: &'static [(u32, &'static Presence)],
}

static TRANSLATION: Presence = Presence {
    message: "TranslatedString.Translation",
    required: &[(1, "text")],
    nested: &[],
};

static TRANSLATED_STRING: Presence = Presence {
    message: "TranslatedString",
    required: &[],
    nested: &[(1, &TRANSLATION)],
};

static LOCALIZED_IMAGE: Presence = Presence {
    message: "TranslatedImage.LocalizedImage",
    required: &[(1, "url"), (2, "media_type")],
    nested: &[],
};

static TRANSLATED_IMAGE: Presence = Presence {
    message: "TranslatedImage",
    required: &[],
    nested: &[(1, &LOCALIZED_IMAGE)],
};

static POSITION: Presence = Presence {
    message: "Position",
    required: &[(1, "latitude"), (2, "longitude")],
    nested: &[],
};

static TRIP_UPDATE: Presence = Presence {
    message: "TripUpdate",
    required: &[(1, "trip")],
    nested: &[],
};

static VEHICLE_POSITION: Presence = Presence {
    message: "VehiclePosition",
    required: &[],
    nested: &[(2, &POSITION)],
};

static ALERT: Presence = Presence {
    message: "Alert",
    required: &[],
    nested: &[
        (8, &TRANSLATED_STRING),
        (10, &TRANSLATED_STRING),
        (11, &TRANSLATED_STRING),
        (12, &TRANSLATED_STRING),
        (13, &TRANSLATED_STRING),
        (15, &TRANSLATED_IMAGE),
        (16, &TRANSLATED_STRING),
        (17, &TRANSLATED_STRING),
        (18, &TRANSLATED_STRING),
    ],
};

static STOP: Presence = Presence {
    message: "Stop",
    required: &[],
    nested: &[
        (2, &TRANSLATED_STRING),
        (3, &TRANSLATED_STRING),
        (4, &TRANSLATED_STRING),
        (5, &TRANSLATED_STRING),
        (9, &TRANSLATED_STRING),
        (15, &TRANSLATED_STRING),
    ],
};

static FEED_ENTITY: Presence = Presence {
    message: "FeedEntity",
    required: &[(1, "id")],
    nested: &[(3, &TRIP_UPDATE), (4, &VEHICLE_POSITION), (5, &ALERT), (7, &STOP)],
};

static FEED_HEADER: Presence = Presence {
    message: "FeedHeader",
    required: &[(1, "gtfs_realtime_version")],
    nested: &[],
};

static FEED_MESSAGE: Presence = Presence {
    message: "FeedMessage",
    required: &[(1, "header")],
    nested: &[(1, &FEED_HEADER), (2, &FEED_ENTITY)],
};

fn check_required(mut buf: &[u8], presence: &Presence) -> Result<()> {
    let mut seen = Vec::new();
    while !buf.is_empty() {
        let (tag, wire_type) = encoding::decode_key(&mut buf)?;
        let start = buf;
        encoding::skip_field(wire_type, tag, &mut buf, DecodeContext::default())?;
        seen.push(tag);

        if wire_type != WireType::LengthDelimited {
            continue;
        }
        if let Some((_, nested)) = presence.nested.iter().find(|(t, _)| *t == tag) {
            let mut field = &start[..start.len() - buf.len()];
            encoding::decode_varint(&mut field)?;
            check_required(field, nested)?;
        }
    }

    match presence.required.iter().find(|(tag, _)| !seen.contains(tag)) {
        Some(&(_, field)) => Err(DecodeError::MissingRequiredField {
            message: presence.message,
            field,
        }
        .into()),
        None => Ok(()),
    }
}

fn scalar<T: Clone + Into<Scalar>>(value: &T) -> Option<FieldValue<'_>> {
    Some(FieldValue::Single(Node::Scalar(value.clone().into())))
}

fn optional_scalar<T: Clone + Into<Scalar>>(value: &Option<T>) -> Option<FieldValue<'_>> {
    value
        .clone()
        .map(|v| FieldValue::Single(Node::Scalar(v.into())))
}

fn repeated_scalar<T: Clone + Into<Scalar>>(values: &[T]) -> Option<FieldValue<'_>> {
    if values.is_empty() {
        return None;
    }
    Some(FieldValue::Repeated(
        values
            .iter()
            .map(|v| Node::Scalar(v.clone().into()))
            .collect(),
    ))
}

fn message<M: MessageFields>(value: &M) -> Option<FieldValue<'_>> {
    Some(FieldValue::Single(Node::Message(value)))
}

fn optional_message<M: MessageFields>(value: &Option<M>) -> Option<FieldValue<'_>> {
    value
        .as_ref()
        .map(|m| FieldValue::Single(Node::Message(m as &dyn MessageFields)))
}

fn repeated_message<M: MessageFields>(values: &[M]) -> Option<FieldValue<'_>> {
    if values.is_empty() {
        return None;
    }
    Some(FieldValue::Repeated(
        values
            .iter()
            .map(|m| Node::Message(m as &dyn MessageFields))
            .collect(),
    ))
}

/// Implements [MessageFields] from a field list written in declaration order, each field
/// tagged with the helper that knows its cardinality.
macro_rules! message_fields {
    ($ty:ty { $($field:ident: $kind:ident),* $(,)? }) => {
        impl MessageFields for $ty {
            fn fields(&self) -> Vec<Field<'_>> {
                let mut fields = Vec::new();
                $(
                    if let Some(value) = $kind(&self.$field) {
                        fields.push(Field { name: stringify!($field), value });
                    }
                )*
                fields
            }
        }
    };
}

message_fields!(FeedMessage {
    header: message,
    entity: repeated_message,
});

message_fields!(FeedHeader {
    gtfs_realtime_version: scalar,
    incrementality: optional_scalar,
    timestamp: optional_scalar,
    feed_version: optional_scalar,
});

message_fields!(FeedEntity {
    id: scalar,
    is_deleted: optional_scalar,
    trip_update: optional_message,
    vehicle: optional_message,
    alert: optional_message,
    shape: optional_message,
    stop: optional_message,
    trip_modifications: optional_message,
});

message_fields!(TripUpdate {
    trip: message,
    vehicle: optional_message,
    stop_time_update: repeated_message,
    timestamp: optional_scalar,
    delay: optional_scalar,
    trip_properties: optional_message,
});

message_fields!(trip_update::StopTimeEvent {
    delay: optional_scalar,
    time: optional_scalar,
    uncertainty: optional_scalar,
});

message_fields!(trip_update::StopTimeUpdate {
    stop_sequence: optional_scalar,
    stop_id: optional_scalar,
    arrival: optional_message,
    departure: optional_message,
    departure_occupancy_status: optional_scalar,
    schedule_relationship: optional_scalar,
    stop_time_properties: optional_message,
});

message_fields!(trip_update::stop_time_update::StopTimeProperties {
    assigned_stop_id: optional_scalar,
});

message_fields!(trip_update::TripProperties {
    trip_id: optional_scalar,
    start_date: optional_scalar,
    start_time: optional_scalar,
    shape_id: optional_scalar,
});

message_fields!(VehiclePosition {
    trip: optional_message,
    vehicle: optional_message,
    position: optional_message,
    current_stop_sequence: optional_scalar,
    stop_id: optional_scalar,
    current_status: optional_scalar,
    timestamp: optional_scalar,
    congestion_level: optional_scalar,
    occupancy_status: optional_scalar,
    occupancy_percentage: optional_scalar,
    multi_carriage_details: repeated_message,
});

message_fields!(vehicle_position::CarriageDetails {
    id: optional_scalar,
    label: optional_scalar,
    occupancy_status: optional_scalar,
    occupancy_percentage: optional_scalar,
    carriage_sequence: optional_scalar,
});

message_fields!(Alert {
    active_period: repeated_message,
    informed_entity: repeated_message,
    cause: optional_scalar,
    effect: optional_scalar,
    url: optional_message,
    header_text: optional_message,
    description_text: optional_message,
    tts_header_text: optional_message,
    tts_description_text: optional_message,
    severity_level: optional_scalar,
    image: optional_message,
    image_alternative_text: optional_message,
    cause_detail: optional_message,
    effect_detail: optional_message,
});

message_fields!(TimeRange {
    start: optional_scalar,
    end: optional_scalar,
});

message_fields!(Position {
    latitude: scalar,
    longitude: scalar,
    bearing: optional_scalar,
    odometer: optional_scalar,
    speed: optional_scalar,
});

message_fields!(TripDescriptor {
    trip_id: optional_scalar,
    route_id: optional_scalar,
    direction_id: optional_scalar,
    start_time: optional_scalar,
    start_date: optional_scalar,
    schedule_relationship: optional_scalar,
    modified_trip: optional_message,
});

message_fields!(trip_descriptor::ModifiedTripSelector {
    modifications_id: optional_scalar,
    affected_trip_id: optional_scalar,
});

message_fields!(VehicleDescriptor {
    id: optional_scalar,
    label: optional_scalar,
    license_plate: optional_scalar,
    wheelchair_accessible: optional_scalar,
});

message_fields!(EntitySelector {
    agency_id: optional_scalar,
    route_id: optional_scalar,
    route_type: optional_scalar,
    trip: optional_message,
    stop_id: optional_scalar,
    direction_id: optional_scalar,
});

message_fields!(TranslatedString {
    translation: repeated_message,
});

message_fields!(translated_string::Translation {
    text: scalar,
    language: optional_scalar,
});

message_fields!(TranslatedImage {
    localized_image: repeated_message,
});

message_fields!(translated_image::LocalizedImage {
    url: scalar,
    media_type: scalar,
    language: optional_scalar,
});

message_fields!(Shape {
    shape_id: optional_scalar,
    encoded_polyline: optional_scalar,
});

message_fields!(Stop {
    stop_id: optional_scalar,
    stop_code: optional_message,
    stop_name: optional_message,
    tts_stop_name: optional_message,
    stop_desc: optional_message,
    stop_lat: optional_scalar,
    stop_lon: optional_scalar,
    zone_id: optional_scalar,
    stop_url: optional_message,
    parent_station: optional_scalar,
    stop_timezone: optional_scalar,
    wheelchair_boarding: optional_scalar,
    level_id: optional_scalar,
    platform_code: optional_message,
});

message_fields!(TripModifications {
    selected_trips: repeated_message,
    start_times: repeated_scalar,
    service_dates: repeated_scalar,
    modifications: repeated_message,
});

message_fields!(trip_modifications::SelectedTrips {
    trip_ids: repeated_scalar,
    shape_id: optional_scalar,
});

message_fields!(trip_modifications::Modification {
    start_stop_selector: optional_message,
    end_stop_selector: optional_message,
    propagated_modification_delay: optional_scalar,
    replacement_stops: repeated_message,
    service_alert_id: optional_scalar,
    last_modified_time: optional_scalar,
});

message_fields!(StopSelector {
    stop_sequence: optional_scalar,
    stop_id: optional_scalar,
});

message_fields!(ReplacementStop {
    travel_time_to_stop: optional_scalar,
    stop_id: optional_scalar,
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DecodeError, Error};
    use gtfs_realtime::{alert, feed_header};

    fn header() -> FeedHeader {
        FeedHeader {
            gtfs_realtime_version: "2.0".to_string(),
            incrementality: Some(feed_header::Incrementality::FullDataset as i32),
            timestamp: Some(1714552200),
            feed_version: None,
        }
    }

    fn stop_time_update(sequence: u32, delay: i32) -> trip_update::StopTimeUpdate {
        trip_update::StopTimeUpdate {
            stop_sequence: Some(sequence),
            arrival: Some(trip_update::StopTimeEvent {
                delay: Some(delay),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn trip_update_entity() -> FeedEntity {
        FeedEntity {
            id: "trip_1".to_string(),
            trip_update: Some(TripUpdate {
                trip: TripDescriptor {
                    trip_id: Some("1.T2.2-FKN-mjp-1.1.H".to_string()),
                    route_id: Some("2-FKN".to_string()),
                    ..Default::default()
                },
                stop_time_update: vec![
                    stop_time_update(1, 0),
                    stop_time_update(2, 60),
                    stop_time_update(3, 120),
                ],
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_unset_fields_omitted() {
        let entity = FeedEntity {
            id: "empty".to_string(),
            ..Default::default()
        };
        let flat = flatten_message(&entity);
        assert_eq!(
            flat,
            FlatValue::Mapping(vec![(
                "id".to_string(),
                FlatValue::Scalar(Scalar::Text("empty".to_string()))
            )])
        );
    }

    #[test]
    fn test_repeated_order_preserved() {
        let flat = flatten_message(&trip_update_entity());
        let updates = flat
            .get("trip_update")
            .and_then(|t| t.get("stop_time_update"))
            .and_then(FlatValue::as_sequence)
            .unwrap();
        assert_eq!(updates.len(), 3);
        for (i, update) in updates.iter().enumerate() {
            assert_eq!(
                update.get("stop_sequence").and_then(FlatValue::as_scalar),
                Some(&Scalar::UInt(i as u64 + 1))
            );
            assert_eq!(
                update
                    .get("arrival")
                    .and_then(|a| a.get("delay"))
                    .and_then(FlatValue::as_scalar),
                Some(&Scalar::Int(i as i64 * 60))
            );
        }
    }

    #[test]
    fn test_keys_follow_declaration_order() {
        let mut entity = trip_update_entity();
        if let Some(update) = entity.trip_update.as_mut() {
            update.delay = Some(30);
            update.timestamp = Some(1714552200);
            update.vehicle = Some(VehicleDescriptor {
                id: Some("1234T".to_string()),
                ..Default::default()
            });
        }
        let flat = flatten_message(&entity);
        let update = flat.get("trip_update").unwrap();
        assert_eq!(
            update.keys(),
            vec!["trip", "vehicle", "stop_time_update", "timestamp", "delay"]
        );
    }

    #[test]
    fn test_empty_repeated_omitted() {
        let alert = Alert {
            cause: Some(alert::Cause::Maintenance as i32),
            ..Default::default()
        };
        let flat = flatten_message(&alert);
        assert_eq!(flat.keys(), vec!["cause"]);
        assert_eq!(flat.get("cause").and_then(FlatValue::as_scalar), Some(&Scalar::Int(9)));
    }

    #[test]
    fn test_parse_binary_feed() {
        let alert_entity = FeedEntity {
            id: "alert_1".to_string(),
            alert: Some(Alert {
                active_period: vec![TimeRange {
                    start: Some(1714552200),
                    end: None,
                }],
                informed_entity: vec![EntitySelector {
                    route_id: Some("2-FKN".to_string()),
                    ..Default::default()
                }],
                description_text: Some(TranslatedString {
                    translation: vec![translated_string::Translation {
                        text: "Buses replace trains".to_string(),
                        language: Some("en".to_string()),
                    }],
                }),
                ..Default::default()
            }),
            ..Default::default()
        };
        let feed = FeedMessage {
            header: header(),
            entity: vec![trip_update_entity(), alert_entity],
        };

        let entities = parse_feed_binary(&feed.encode_to_vec()).unwrap();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0], flatten_message(&feed.entity[0]));

        let alert = entities[1].get("alert").unwrap();
        assert_eq!(
            alert.keys(),
            vec!["active_period", "informed_entity", "description_text"]
        );
        let json = serde_json::to_value(alert).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "active_period": [{"start": 1714552200u64}],
                "informed_entity": [{"route_id": "2-FKN"}],
                "description_text": {"translation": [{"text": "Buses replace trains", "language": "en"}]}
            })
        );
    }

    #[test]
    fn test_vehicle_position_floats() {
        let entity = FeedEntity {
            id: "v".to_string(),
            vehicle: Some(VehiclePosition {
                position: Some(Position {
                    latitude: -37.5,
                    longitude: 144.25,
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        };
        let flat = flatten_message(&entity);
        let position = flat.get("vehicle").and_then(|v| v.get("position")).unwrap();
        assert_eq!(position.keys(), vec!["latitude", "longitude"]);
        assert_eq!(
            position.get("latitude").and_then(FlatValue::as_scalar),
            Some(&Scalar::Float(-37.5))
        );
    }

    #[test]
    fn test_header_flattened() {
        let feed = FeedMessage {
            header: header(),
            entity: vec![],
        };
        let flat = flatten_message(&feed);
        assert_eq!(flat.keys(), vec!["header"]);
        assert_eq!(
            flat.get("header").unwrap().keys(),
            vec!["gtfs_realtime_version", "incrementality", "timestamp"]
        );
    }

    #[test]
    fn test_malformed_payload() {
        // field 1, length-delimited, claims 5 bytes but carries 1
        let result = parse_feed_binary(&[0x0a, 0x05, 0x01]);
        assert!(matches!(result, Err(Error::Decode(DecodeError::Protobuf(_)))));
    }

    #[test]
    fn test_stop_entity_flattened() {
        let feed = FeedMessage {
            header: header(),
            entity: vec![FeedEntity {
                id: "s".to_string(),
                stop: Some(Stop {
                    stop_id: Some("X".to_string()),
                    stop_name: Some(TranslatedString {
                        translation: vec![translated_string::Translation {
                            text: "Flinders Street".to_string(),
                            language: None,
                        }],
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            }],
        };
        let entities = parse_feed_binary(&feed.encode_to_vec()).unwrap();
        assert_eq!(
            serde_json::to_value(&entities).unwrap(),
            serde_json::json!([{
                "id": "s",
                "stop": {
                    "stop_id": "X",
                    "stop_name": {"translation": [{"text": "Flinders Street"}]}
                }
            }])
        );
    }

    #[test]
    fn test_trip_modifications_flattened() {
        let entity = FeedEntity {
            id: "detour".to_string(),
            trip_modifications: Some(TripModifications {
                selected_trips: vec![trip_modifications::SelectedTrips {
                    trip_ids: vec!["trip_1".to_string(), "trip_2".to_string()],
                    shape_id: Some("detour_shape".to_string()),
                    ..Default::default()
                }],
                service_dates: vec!["20240501".to_string()],
                modifications: vec![trip_modifications::Modification {
                    start_stop_selector: Some(StopSelector {
                        stop_sequence: Some(4),
                        ..Default::default()
                    }),
                    replacement_stops: vec![ReplacementStop {
                        stop_id: Some("1073".to_string()),
                        travel_time_to_stop: Some(120),
                        ..Default::default()
                    }],
                    ..Default::default()
                }],
                ..Default::default()
            }),
            ..Default::default()
        };
        let flat = flatten_message(&entity);
        let modifications = flat.get("trip_modifications").unwrap();
        assert_eq!(
            modifications.keys(),
            vec!["selected_trips", "service_dates", "modifications"]
        );
        assert_eq!(
            serde_json::to_value(modifications).unwrap()["selected_trips"][0]["trip_ids"],
            serde_json::json!(["trip_1", "trip_2"])
        );
        let modification = &modifications.get("modifications").and_then(FlatValue::as_sequence).unwrap()[0];
        assert_eq!(
            modification.keys(),
            vec!["start_stop_selector", "replacement_stops"]
        );
    }

    #[test]
    fn test_modified_trip_flattened() {
        let descriptor = TripDescriptor {
            trip_id: Some("trip_1".to_string()),
            modified_trip: Some(trip_descriptor::ModifiedTripSelector {
                modifications_id: Some("detour".to_string()),
                affected_trip_id: Some("trip_1".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let flat = flatten_message(&descriptor);
        assert_eq!(flat.keys(), vec!["trip_id", "modified_trip"]);
        assert_eq!(
            flat.get("modified_trip").unwrap().keys(),
            vec!["modifications_id", "affected_trip_id"]
        );
    }

    fn header_bytes() -> Vec<u8> {
        FeedMessage {
            header: header(),
            entity: vec![],
        }
        .encode_to_vec()
    }

    #[test]
    fn test_entity_without_id_rejected() {
        // entity (2) { trip_update (3) { trip (1) { }, timestamp (4): 5 } } with no id
        let mut bytes = header_bytes();
        bytes.extend_from_slice(&[0x12, 0x06, 0x1a, 0x04, 0x0a, 0x00, 0x20, 0x05]);
        assert!(FeedMessage::decode(bytes.as_slice()).is_ok());
        assert!(matches!(
            parse_feed_binary(&bytes),
            Err(Error::Decode(DecodeError::MissingRequiredField {
                message: "FeedEntity",
                field: "id"
            }))
        ));
    }

    #[test]
    fn test_trip_update_without_trip_rejected() {
        // entity (2) { id (1): "s", trip_update (3) { timestamp (4): 5 } }
        let mut bytes = header_bytes();
        bytes.extend_from_slice(&[0x12, 0x07, 0x0a, 0x01, b's', 0x1a, 0x02, 0x20, 0x05]);
        assert!(matches!(
            decode_feed_message(&bytes),
            Err(Error::Decode(DecodeError::MissingRequiredField {
                message: "TripUpdate",
                field: "trip"
            }))
        ));
    }

    #[test]
    fn test_translation_without_text_rejected() {
        // entity (2) { id (1): "a", alert (5) { header_text (10) { translation (1) { language (2): "en" } } } }
        let mut bytes = header_bytes();
        bytes.extend_from_slice(&[
            0x12, 0x0d, 0x0a, 0x01, b'a', 0x2a, 0x08, 0x52, 0x06, 0x0a, 0x04, 0x12, 0x02, b'e', b'n',
        ]);
        assert!(matches!(
            decode_feed_message(&bytes),
            Err(Error::Decode(DecodeError::MissingRequiredField {
                message: "TranslatedString.Translation",
                field: "text"
            }))
        ));
    }

    #[test]
    fn test_empty_payload_has_no_header() {
        assert!(matches!(
            decode_feed_message(&[]),
            Err(Error::Decode(DecodeError::MissingRequiredField {
                message: "FeedMessage",
                field: "header"
            }))
        ));
    }
}
