//! Account roles and the screens each role is routed to.
//!
//! [`Role::home`] is the single role-to-destination table; both post-login
//! routing and [`Role::may_access`] are derived from it.

use std::fmt;

/// Backend account role.
///
/// Parsed leniently from the login response: the backend serialises its
/// enum as `UserRoleEnum.ADMIN`, but bare `ADMIN`/`admin` are accepted too.
/// Anything else becomes [`Role::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Fleet administrator with access to every admin screen.
    Admin,
    /// Driver managing their own profile.
    Driver,
    /// Mechanic managing their own profile.
    Mechanic,
    /// Unrecognised role string.
    Unknown,
}

const BACKEND_ENUM_PREFIX: &str = "UserRoleEnum.";

impl Role {
    /// Every role value, including the fallback.
    pub const ALL: [Self; 4] = [Self::Admin, Self::Driver, Self::Mechanic, Self::Unknown];

    /// Parse a role string returned by the backend.
    ///
    /// # Examples
    /// ```
    /// use fleet_client::domain::Role;
    ///
    /// assert_eq!(Role::parse("UserRoleEnum.MECHANIC"), Role::Mechanic);
    /// assert_eq!(Role::parse("driver"), Role::Driver);
    /// assert_eq!(Role::parse("superuser"), Role::Unknown);
    /// ```
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let bare = trimmed.strip_prefix(BACKEND_ENUM_PREFIX).unwrap_or(trimmed);
        if bare.eq_ignore_ascii_case("admin") {
            Self::Admin
        } else if bare.eq_ignore_ascii_case("driver") {
            Self::Driver
        } else if bare.eq_ignore_ascii_case("mechanic") {
            Self::Mechanic
        } else {
            Self::Unknown
        }
    }

    /// Destination a freshly authenticated user lands on.
    pub const fn home(self) -> Destination {
        match self {
            Self::Admin => Destination::AdminArea,
            Self::Driver => Destination::DriverProfile,
            Self::Mechanic => Destination::MechanicProfile,
            Self::Unknown => Destination::Landing,
        }
    }

    /// Whether a user holding this role may open `destination`.
    ///
    /// The landing page is open to everyone; admins may open any admin
    /// screen; every other destination is reachable only as the role's home.
    pub fn may_access(self, destination: Destination) -> bool {
        let home = self.home();
        destination == Destination::Landing
            || destination == home
            || (home == Destination::AdminArea && destination.is_admin())
    }

    /// Path segment used by the registration endpoint.
    pub const fn registration_slug(self) -> Option<&'static str> {
        match self {
            Self::Admin => Some("admin"),
            Self::Driver => Some("driver"),
            Self::Mechanic => Some("mechanic"),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Admin => "ADMIN",
            Self::Driver => "DRIVER",
            Self::Mechanic => "MECHANIC",
            Self::Unknown => "UNKNOWN",
        })
    }
}

/// Per-resource pages reachable from the admin area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminSection {
    /// Mechanic accounts.
    Mechanics,
    /// Driver accounts.
    Drivers,
    /// Fleet cars.
    Cars,
    /// Repair records.
    Fixes,
    /// Completed rides.
    Rides,
}

impl AdminSection {
    /// Every admin section.
    pub const ALL: [Self; 5] = [
        Self::Mechanics,
        Self::Drivers,
        Self::Cars,
        Self::Fixes,
        Self::Rides,
    ];

    const fn path(self) -> &'static str {
        match self {
            Self::Mechanics => "/admin-page-mechanics",
            Self::Drivers => "/admin-page-drivers",
            Self::Cars => "/admin-page-cars",
            Self::Fixes => "/admin-page-fixes",
            Self::Rides => "/admin-page-rides",
        }
    }
}

/// A screen the presentation layer can route to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    /// Public landing page.
    Landing,
    /// Admin dashboard.
    AdminArea,
    /// One of the admin resource pages.
    AdminResource(AdminSection),
    /// Driver self-service profile page.
    DriverProfile,
    /// Mechanic self-service profile page.
    MechanicProfile,
}

impl Destination {
    /// Route path for this destination.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::AdminArea => "/admin-page-main",
            Self::AdminResource(section) => section.path(),
            Self::DriverProfile => "/driver-update",
            Self::MechanicProfile => "/mechanic-update",
        }
    }

    /// Whether the destination belongs to the admin area.
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::AdminArea | Self::AdminResource(_))
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
