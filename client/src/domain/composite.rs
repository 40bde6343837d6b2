//! Composite entity value objects.
//!
//! The backend stores one logical record as two linked rows: a primary record
//! (for example a ride with its rating) and a detail record (the ride
//! metrics). On the wire both halves travel together under two named keys.
//! [`CompositePayload`] is the only way to express a write, so a primary
//! group can never be submitted without its detail group.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use super::ports::ResourceError;
use super::resource::ResourceDescriptor;

/// One attribute group: field name to JSON value.
pub type FieldGroup = Map<String, Value>;

/// Backend record identifier shared by both halves of a composite entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(i64);

impl EntityId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Read the identifier stored under `key`. Numeric strings are accepted.
    pub fn from_fields(fields: &FieldGroup, key: &str) -> Result<Self, ResourceError> {
        Self::find(fields, key)?
            .ok_or_else(|| ResourceError::decode(format!("record is missing its `{key}`")))
    }

    fn find(fields: &FieldGroup, key: &str) -> Result<Option<Self>, ResourceError> {
        match fields.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(number)) => number.as_i64().map(|raw| Some(Self(raw))).ok_or_else(
                || ResourceError::decode(format!("`{key}` {number} is not an integer")),
            ),
            Some(Value::String(text)) => text.parse().map(Some),
            Some(other) => Err(ResourceError::decode(format!(
                "`{key}` must be a number, got {other}"
            ))),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|err| ResourceError::decode(format!("invalid id {s:?}: {err}")))
    }
}

/// List projection of a record, kept exactly as the server sent it.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimarySummary {
    id: EntityId,
    fields: FieldGroup,
}

impl PrimarySummary {
    /// Build a summary from one element of a `get_all` response.
    ///
    /// The identifier is read from the descriptor's id field.
    pub fn from_value(descriptor: &ResourceDescriptor, value: Value) -> Result<Self, ResourceError> {
        match value {
            Value::Object(fields) => {
                let id = EntityId::from_fields(&fields, descriptor.id_field())?;
                Ok(Self { id, fields })
            }
            other => Err(ResourceError::decode(format!(
                "collection element must be an object, got {other}"
            ))),
        }
    }

    /// Record identifier.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// All fields the server returned, including the identifier.
    pub fn fields(&self) -> &FieldGroup {
        &self.fields
    }
}

/// Write payload bundling both attribute groups of a composite entity.
///
/// # Examples
/// ```
/// use fleet_client::domain::{CompositePayload, ResourceKind};
/// use serde_json::{json, Map};
///
/// let mut primary = Map::new();
/// primary.insert("rating".into(), json!(5));
/// let payload = CompositePayload::new(primary, Map::new());
/// let body = payload.to_body(ResourceKind::Rides.descriptor());
/// assert_eq!(body, json!({ "ride_data": { "rating": 5 }, "ride_info_data": {} }));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompositePayload {
    primary: FieldGroup,
    detail: FieldGroup,
}

impl CompositePayload {
    /// Bundle a primary and a detail group.
    pub fn new(primary: FieldGroup, detail: FieldGroup) -> Self {
        Self { primary, detail }
    }

    /// Fields stored on the primary record.
    pub fn primary(&self) -> &FieldGroup {
        &self.primary
    }

    /// Fields stored on the detail record.
    pub fn detail(&self) -> &FieldGroup {
        &self.detail
    }

    /// Request body with both groups under the descriptor's section keys.
    pub fn to_body(&self, descriptor: &ResourceDescriptor) -> Value {
        let mut body = Map::with_capacity(2);
        body.insert(
            descriptor.primary_key().to_owned(),
            Value::Object(self.primary.clone()),
        );
        body.insert(
            descriptor.detail_key().to_owned(),
            Value::Object(self.detail.clone()),
        );
        Value::Object(body)
    }
}

/// A full record as returned by `get_by_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeEntity {
    id: EntityId,
    primary: FieldGroup,
    detail: FieldGroup,
}

impl CompositeEntity {
    /// Interpret a detail response.
    ///
    /// When the body nests the groups under the descriptor's section keys
    /// they are taken as-is; otherwise a flat object is split by the
    /// descriptor's field lists. Fields named by neither list stay on the
    /// primary group.
    ///
    /// The identifier is read from the descriptor's id field of either group;
    /// when both groups carry one they must agree.
    pub fn from_response(
        descriptor: &ResourceDescriptor,
        value: Value,
    ) -> Result<Self, ResourceError> {
        let Value::Object(mut fields) = value else {
            return Err(ResourceError::decode("detail response must be an object"));
        };

        let nested_primary = take_object(&mut fields, descriptor.primary_key())?;
        let nested_detail = take_object(&mut fields, descriptor.detail_key())?;
        let (primary, detail) = match (nested_primary, nested_detail) {
            (Some(mut primary), Some(detail)) => {
                for (key, value) in fields {
                    primary.entry(key).or_insert(value);
                }
                (primary, detail)
            }
            (None, None) => descriptor.split_flat(fields),
            _ => {
                return Err(ResourceError::decode(format!(
                    "detail response must carry both `{}` and `{}`",
                    descriptor.primary_key(),
                    descriptor.detail_key()
                )));
            }
        };

        let id = shared_id(descriptor.id_field(), &primary, &detail)?;
        Ok(Self {
            id,
            primary,
            detail,
        })
    }

    /// Identifier shared by both groups.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Primary attribute group.
    pub fn primary(&self) -> &FieldGroup {
        &self.primary
    }

    /// Detail attribute group.
    pub fn detail(&self) -> &FieldGroup {
        &self.detail
    }
}

/// Both groups describe one record, so an identifier present in each must
/// match.
fn shared_id(
    key: &str,
    primary: &FieldGroup,
    detail: &FieldGroup,
) -> Result<EntityId, ResourceError> {
    match (EntityId::find(primary, key)?, EntityId::find(detail, key)?) {
        (Some(left), Some(right)) if left != right => Err(ResourceError::decode(format!(
            "groups disagree on `{key}`: {left} and {right}"
        ))),
        (Some(id), _) | (None, Some(id)) => Ok(id),
        (None, None) => Err(ResourceError::decode(format!(
            "record is missing its `{key}`"
        ))),
    }
}

fn take_object(fields: &mut FieldGroup, key: &str) -> Result<Option<FieldGroup>, ResourceError> {
    match fields.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(group)) => Ok(Some(group)),
        Some(other) => Err(ResourceError::decode(format!(
            "`{key}` must be an object, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for parsing and splitting composite records.
    use super::*;
    use crate::domain::ResourceKind;
    use rstest::rstest;
    use serde_json::json;

    fn object(value: Value) -> FieldGroup {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[rstest]
    #[case(json!({ "id": 7 }), "id", 7)]
    #[case(json!({ "id": "12" }), "id", 12)]
    #[case(json!({ "ride_id": 3, "id": 99 }), "ride_id", 3)]
    fn reads_numeric_and_string_ids(#[case] value: Value, #[case] key: &str, #[case] expected: i64) {
        let id = EntityId::from_fields(&object(value), key).expect("id should parse");
        assert_eq!(id, EntityId::new(expected));
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({ "id": null }))]
    #[case(json!({ "id": "seven" }))]
    #[case(json!({ "id": 1.5 }))]
    #[case(json!({ "id": [1] }))]
    fn rejects_missing_or_malformed_ids(#[case] value: Value) {
        let error = EntityId::from_fields(&object(value), "id").expect_err("id must fail");
        assert!(matches!(error, ResourceError::Decode { .. }));
    }

    #[test]
    fn summary_keeps_every_server_field() {
        let summary = PrimarySummary::from_value(
            ResourceKind::Drivers.descriptor(),
            json!({ "id": 3, "firstname": "Ann", "extra": "x" }),
        )
        .expect("summary");
        assert_eq!(summary.id(), EntityId::new(3));
        assert_eq!(summary.fields().len(), 3);
        assert_eq!(summary.fields().get("extra"), Some(&json!("x")));
    }

    #[test]
    fn ride_summaries_are_keyed_by_ride_id() {
        let summary = PrimarySummary::from_value(
            ResourceKind::Rides.descriptor(),
            json!({ "ride_id": 1, "driver_id": 2, "car_id": 3, "rating": 5 }),
        )
        .expect("ride summary");
        assert_eq!(summary.id(), EntityId::new(1));
        assert_eq!(summary.fields().get("ride_id"), Some(&json!(1)));
    }

    #[test]
    fn ride_summary_without_ride_id_is_rejected() {
        let error = PrimarySummary::from_value(
            ResourceKind::Rides.descriptor(),
            json!({ "id": 1, "rating": 5 }),
        )
        .expect_err("rides are keyed by ride_id");
        assert!(error.to_string().contains("ride_id"));
    }

    #[test]
    fn summary_rejects_non_objects() {
        let error = PrimarySummary::from_value(ResourceKind::Rides.descriptor(), json!([1, 2]))
            .expect_err("must fail");
        assert!(matches!(error, ResourceError::Decode { .. }));
    }

    #[test]
    fn body_always_carries_both_sections() {
        let payload = CompositePayload::new(object(json!({ "firstname": "Ada" })), FieldGroup::new());
        let body = payload.to_body(ResourceKind::Drivers.descriptor());
        assert_eq!(
            body,
            json!({ "user_data": { "firstname": "Ada" }, "driver_data": {} })
        );
    }

    #[test]
    fn splits_flat_detail_response_by_field_lists() {
        let entity = CompositeEntity::from_response(
            ResourceKind::Rides.descriptor(),
            json!({ "ride_id": 1, "rating": 5, "driver_id": 2, "distance": 12.5, "speed_max": 90 }),
        )
        .expect("entity");

        assert_eq!(entity.id(), EntityId::new(1));
        assert_eq!(entity.primary().get("rating"), Some(&json!(5)));
        assert_eq!(entity.primary().get("ride_id"), Some(&json!(1)));
        assert_eq!(entity.detail().get("distance"), Some(&json!(12.5)));
        assert!(entity.detail().get("rating").is_none());
    }

    #[test]
    fn takes_nested_groups_as_is() {
        let entity = CompositeEntity::from_response(
            ResourceKind::Mechanics.descriptor(),
            json!({
                "id": 4,
                "user_data": { "firstname": "Lin" },
                "mechanic_data": { "id": 4, "car_times_repaired": 9 }
            }),
        )
        .expect("entity");

        assert_eq!(entity.id(), EntityId::new(4));
        assert_eq!(entity.primary().get("firstname"), Some(&json!("Lin")));
        assert_eq!(entity.detail().get("car_times_repaired"), Some(&json!(9)));
    }

    #[test]
    fn takes_the_id_from_the_detail_group_when_primary_lacks_it() {
        let entity = CompositeEntity::from_response(
            ResourceKind::Drivers.descriptor(),
            json!({
                "user_data": { "firstname": "Ann" },
                "driver_data": { "id": 6, "age": 31 }
            }),
        )
        .expect("entity");

        assert_eq!(entity.id(), EntityId::new(6));
    }

    #[test]
    fn rejects_groups_with_different_ids() {
        let error = CompositeEntity::from_response(
            ResourceKind::Mechanics.descriptor(),
            json!({
                "user_data": { "id": 4 },
                "mechanic_data": { "id": 5 }
            }),
        )
        .expect_err("groups must share one id");

        assert!(matches!(error, ResourceError::Decode { .. }));
        assert!(error.to_string().contains("disagree"));
    }

    #[test]
    fn rejects_responses_without_any_id() {
        let error = CompositeEntity::from_response(
            ResourceKind::Rides.descriptor(),
            json!({ "rating": 5, "distance": 3 }),
        )
        .expect_err("no ride_id");
        assert!(error.to_string().contains("ride_id"));
    }

    #[test]
    fn rejects_half_nested_responses() {
        let error = CompositeEntity::from_response(
            ResourceKind::Rides.descriptor(),
            json!({ "ride_id": 1, "ride_data": { "rating": 5 } }),
        )
        .expect_err("detail group missing");
        assert!(error.to_string().contains("ride_info_data"));
    }
}
