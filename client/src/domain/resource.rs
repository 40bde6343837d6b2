//! Resource descriptors: where a composite resource lives and how its fields
//! divide between the two groups.

use serde_json::Value;

use super::composite::{CompositePayload, EntityId, FieldGroup};

/// Static description of one composite resource.
///
/// ## Invariants
/// - `primary_fields` and `detail_fields` are disjoint.
/// - `update_fields` is a subset of `primary_fields`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    base_path: &'static str,
    id_field: &'static str,
    primary_key: &'static str,
    detail_key: &'static str,
    primary_fields: &'static [&'static str],
    detail_fields: &'static [&'static str],
    update_fields: &'static [&'static str],
}

impl ResourceDescriptor {
    /// Describe a resource.
    ///
    /// `base_path` is the first path segment (`rides`), `id_field` names the
    /// identifier in response records (`ride_id`), the keys name the two
    /// body sections (`ride_data`, `ride_info_data`), and `update_fields`
    /// lists the primary fields an update may change.
    pub const fn new(
        base_path: &'static str,
        id_field: &'static str,
        primary_key: &'static str,
        detail_key: &'static str,
        primary_fields: &'static [&'static str],
        detail_fields: &'static [&'static str],
        update_fields: &'static [&'static str],
    ) -> Self {
        Self {
            base_path,
            id_field,
            primary_key,
            detail_key,
            primary_fields,
            detail_fields,
            update_fields,
        }
    }

    /// First path segment of every endpoint.
    pub const fn base_path(&self) -> &'static str {
        self.base_path
    }

    /// Response field holding the record identifier.
    pub const fn id_field(&self) -> &'static str {
        self.id_field
    }

    /// Body key of the primary group.
    pub const fn primary_key(&self) -> &'static str {
        self.primary_key
    }

    /// Body key of the detail group.
    pub const fn detail_key(&self) -> &'static str {
        self.detail_key
    }

    /// `GET` path returning every summary.
    pub fn list_path(&self) -> String {
        format!("{}/get_all", self.base_path)
    }

    /// `GET` path returning one full record.
    pub fn detail_path(&self, id: EntityId) -> String {
        format!("{}/get_by_id/{id}", self.base_path)
    }

    /// `POST` path creating a record.
    pub fn create_path(&self) -> String {
        format!("{}/add", self.base_path)
    }

    /// `PUT` path updating a record.
    pub fn update_path(&self, id: EntityId) -> String {
        format!("{}/update/{id}", self.base_path)
    }

    /// `DELETE` path removing a record.
    pub fn delete_path(&self, id: EntityId) -> String {
        format!("{}/delete/{id}", self.base_path)
    }

    /// `PUT` path with which an account updates its own profile.
    pub fn profile_path(&self) -> String {
        format!("{}/update", self.base_path)
    }

    /// Split a flat form into the two groups for a create.
    ///
    /// Keys belonging to neither group are dropped.
    pub fn create_payload(&self, form: &FieldGroup) -> CompositePayload {
        CompositePayload::new(
            pick(form, self.primary_fields),
            pick(form, self.detail_fields),
        )
    }

    /// Split a flat form for an update.
    ///
    /// Only the updatable primary fields are sent; the rest are left for the
    /// backend to keep as they are.
    pub fn update_payload(&self, form: &FieldGroup) -> CompositePayload {
        CompositePayload::new(
            pick(form, self.update_fields),
            pick(form, self.detail_fields),
        )
    }

    pub(crate) fn split_flat(&self, fields: FieldGroup) -> (FieldGroup, FieldGroup) {
        let (detail, primary): (Vec<(String, Value)>, Vec<(String, Value)>) = fields
            .into_iter()
            .partition(|(key, _)| self.detail_fields.contains(&key.as_str()));
        (primary.into_iter().collect(), detail.into_iter().collect())
    }
}

fn pick(form: &FieldGroup, names: &[&str]) -> FieldGroup {
    names
        .iter()
        .filter_map(|name| {
            form.get(*name)
                .map(|value| ((*name).to_owned(), value.clone()))
        })
        .collect()
}

const RIDE_FIELDS: &[&str] = &["driver_id", "car_id", "rating"];
const RIDE_INFO_FIELDS: &[&str] = &[
    "ride_date",
    "ride_duration",
    "ride_cost",
    "speed_avg",
    "speed_max",
    "stop_times",
    "distance",
    "refueling",
    "user_ride_quality",
    "deviation_normal",
];
const RIDE_UPDATE_FIELDS: &[&str] = &["rating"];

const USER_FIELDS: &[&str] = &["firstname", "lastname", "email", "password_hash", "role"];
const USER_UPDATE_FIELDS: &[&str] = &["firstname", "lastname", "email"];
const DRIVER_FIELDS: &[&str] = &[
    "age",
    "sex",
    "driver_rating",
    "driver_rides",
    "driver_time_accidents",
    "first_ride_date",
];
const MECHANIC_FIELDS: &[&str] = &["age", "sex", "mechanic_rating", "car_times_repaired"];

static RIDES: ResourceDescriptor = ResourceDescriptor::new(
    "rides",
    "ride_id",
    "ride_data",
    "ride_info_data",
    RIDE_FIELDS,
    RIDE_INFO_FIELDS,
    RIDE_UPDATE_FIELDS,
);

static DRIVERS: ResourceDescriptor = ResourceDescriptor::new(
    "drivers",
    "id",
    "user_data",
    "driver_data",
    USER_FIELDS,
    DRIVER_FIELDS,
    USER_UPDATE_FIELDS,
);

static MECHANICS: ResourceDescriptor = ResourceDescriptor::new(
    "mechanics",
    "id",
    "user_data",
    "mechanic_data",
    USER_FIELDS,
    MECHANIC_FIELDS,
    USER_UPDATE_FIELDS,
);

/// Composite resources exposed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Rides: `ride_data` + `ride_info_data`.
    Rides,
    /// Drivers: `user_data` + `driver_data`.
    Drivers,
    /// Mechanics: `user_data` + `mechanic_data`.
    Mechanics,
}

impl ResourceKind {
    /// Every composite resource.
    pub const ALL: [Self; 3] = [Self::Rides, Self::Drivers, Self::Mechanics];

    /// Descriptor for this resource.
    pub fn descriptor(self) -> &'static ResourceDescriptor {
        match self {
            Self::Rides => &RIDES,
            Self::Drivers => &DRIVERS,
            Self::Mechanics => &MECHANICS,
        }
    }

    /// Resolve a resource by its base path.
    pub fn from_base_path(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.descriptor().base_path() == raw.trim())
    }
}
