//! Account registration payloads.
//!
//! Admin accounts register as a flat user record. Driver and mechanic accounts
//! are composite: the user record plus a role-specific profile record, sent in
//! one request like any other composite write.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value, json};
use zeroize::Zeroizing;

use super::composite::{CompositePayload, FieldGroup};
use super::role::Role;

/// Domain error returned when a registration form is incomplete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// One of first name, last name, email, or password was blank.
    MissingAccountField,
    /// A driver or mechanic registration had no age.
    MissingAge,
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAccountField => write!(f, "All fields are required!"),
            Self::MissingAge => write!(f, "Age is required for drivers and mechanics!"),
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

/// Account fields shared by every registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountFields {
    /// Given name.
    pub firstname: String,
    /// Family name.
    pub lastname: String,
    /// Login email.
    pub email: String,
    /// Plain password; the backend stores it under `password_hash`.
    pub password: Zeroizing<String>,
}

impl AccountFields {
    fn validate(&self) -> Result<(), RegistrationValidationError> {
        let blank = [
            self.firstname.as_str(),
            self.lastname.as_str(),
            self.email.as_str(),
            self.password.as_str(),
        ]
        .into_iter()
        .any(|value| value.trim().is_empty());
        if blank {
            Err(RegistrationValidationError::MissingAccountField)
        } else {
            Ok(())
        }
    }

    fn to_fields(&self, role: &str) -> FieldGroup {
        let mut fields = Map::new();
        fields.insert("firstname".to_owned(), json!(self.firstname.trim()));
        fields.insert("lastname".to_owned(), json!(self.lastname.trim()));
        fields.insert("email".to_owned(), json!(self.email.trim()));
        fields.insert("password_hash".to_owned(), json!(self.password.as_str()));
        fields.insert("role".to_owned(), json!(role));
        fields
    }
}

/// Biological sex as the backend records it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    /// Male.
    #[default]
    Male,
    /// Female.
    Female,
}

/// Driver profile record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DriverProfile {
    /// Age in years; must be non-zero.
    pub age: u32,
    /// Recorded sex.
    pub sex: Sex,
    /// Initial rating.
    pub driver_rating: f64,
    /// Rides completed before registration.
    pub driver_rides: u32,
    /// Accidents recorded before registration.
    pub driver_time_accidents: u32,
    /// Date of the first ride; today when absent.
    pub first_ride_date: Option<NaiveDate>,
}

/// Mechanic profile record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MechanicProfile {
    /// Age in years; must be non-zero.
    pub age: u32,
    /// Recorded sex.
    pub sex: Sex,
    /// Initial rating.
    pub mechanic_rating: f64,
    /// Repairs completed before registration.
    pub car_times_repaired: u32,
}

/// A registration form for one of the three account kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Registration {
    /// Administrator account.
    Admin(AccountFields),
    /// Driver account with its profile.
    Driver(AccountFields, DriverProfile),
    /// Mechanic account with its profile.
    Mechanic(AccountFields, MechanicProfile),
}

/// A validated registration ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationRequest {
    /// Role segment of `/access/registration/{role}`.
    pub role: &'static str,
    /// JSON request body.
    pub body: Value,
}

impl Registration {
    /// Role being registered.
    pub fn role(&self) -> Role {
        match self {
            Self::Admin(_) => Role::Admin,
            Self::Driver(..) => Role::Driver,
            Self::Mechanic(..) => Role::Mechanic,
        }
    }

    /// Check required fields.
    pub fn validate(&self) -> Result<(), RegistrationValidationError> {
        match self {
            Self::Admin(account) => account.validate(),
            Self::Driver(account, profile) => {
                account.validate()?;
                require_age(profile.age)
            }
            Self::Mechanic(account, profile) => {
                account.validate()?;
                require_age(profile.age)
            }
        }
    }

    /// Validate and build the request.
    ///
    /// `today` fills a driver's missing first-ride date.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use fleet_client::domain::{AccountFields, DriverProfile, Registration};
    /// use zeroize::Zeroizing;
    ///
    /// let account = AccountFields {
    ///     firstname: "Ada".into(),
    ///     lastname: "Byron".into(),
    ///     email: "ada@fleet.test".into(),
    ///     password: Zeroizing::new("pw".into()),
    /// };
    /// let profile = DriverProfile { age: 30, ..DriverProfile::default() };
    /// let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    /// let request = Registration::Driver(account, profile).into_request(today).unwrap();
    /// assert_eq!(request.role, "driver");
    /// assert_eq!(request.body["driver_data"]["first_ride_date"], "2024-05-01");
    /// ```
    pub fn into_request(
        self,
        today: NaiveDate,
    ) -> Result<RegistrationRequest, RegistrationValidationError> {
        self.validate()?;
        let role = self.role();
        let slug = role.registration_slug().unwrap_or("admin");
        let body = match self {
            Self::Admin(account) => Value::Object(account.to_fields(slug)),
            Self::Driver(account, profile) => {
                let mut detail = Map::new();
                detail.insert("age".to_owned(), json!(profile.age));
                detail.insert("sex".to_owned(), json!(profile.sex));
                detail.insert("driver_rating".to_owned(), json!(profile.driver_rating));
                detail.insert("driver_rides".to_owned(), json!(profile.driver_rides));
                detail.insert(
                    "driver_time_accidents".to_owned(),
                    json!(profile.driver_time_accidents),
                );
                let first_ride = profile.first_ride_date.unwrap_or(today);
                detail.insert(
                    "first_ride_date".to_owned(),
                    json!(first_ride.format("%Y-%m-%d").to_string()),
                );
                composite_body(slug, account.to_fields(slug), detail)
            }
            Self::Mechanic(account, profile) => {
                let mut detail = Map::new();
                detail.insert("age".to_owned(), json!(profile.age));
                detail.insert("sex".to_owned(), json!(profile.sex));
                detail.insert("mechanic_rating".to_owned(), json!(profile.mechanic_rating));
                detail.insert(
                    "car_times_repaired".to_owned(),
                    json!(profile.car_times_repaired),
                );
                composite_body(slug, account.to_fields(slug), detail)
            }
        };
        Ok(RegistrationRequest { role: slug, body })
    }
}

fn require_age(age: u32) -> Result<(), RegistrationValidationError> {
    if age == 0 {
        Err(RegistrationValidationError::MissingAge)
    } else {
        Ok(())
    }
}

fn composite_body(slug: &str, primary: FieldGroup, detail: FieldGroup) -> Value {
    let payload = CompositePayload::new(primary, detail);
    let mut body = Map::with_capacity(2);
    body.insert("user_data".to_owned(), Value::Object(payload.primary().clone()));
    body.insert(format!("{slug}_data"), Value::Object(payload.detail().clone()));
    Value::Object(body)
}
