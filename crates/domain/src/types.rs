// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime};

/// A wall-clock timestamp with second precision.
///
/// Timestamps are persisted as text in the canonical `YYYY-MM-DDTHH:MM:SS`
/// form, so lexical order of the stored value matches chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Timestamp(PrimitiveDateTime);

impl Timestamp {
    /// Returns the current UTC wall-clock time truncated to whole seconds.
    #[must_use]
    pub fn now() -> Self {
        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let wall: PrimitiveDateTime = PrimitiveDateTime::new(now.date(), now.time());
        Self(wall.replace_nanosecond(0).unwrap_or(wall))
    }

    /// Parses a timestamp from user input.
    ///
    /// Accepted forms are `YYYY-MM-DDTHH:MM[:SS]`, `YYYY-MM-DD HH:MM[:SS]`
    /// and a bare `YYYY-MM-DD`, which resolves to midnight.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimestamp` if none of the forms match.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed: &str = input.trim();

        let parsed: Option<PrimitiveDateTime> = PrimitiveDateTime::parse(
            trimmed,
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        )
        .or_else(|_| {
            PrimitiveDateTime::parse(
                trimmed,
                format_description!("[year]-[month]-[day]T[hour]:[minute]"),
            )
        })
        .or_else(|_| {
            PrimitiveDateTime::parse(
                trimmed,
                format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
            )
        })
        .or_else(|_| {
            PrimitiveDateTime::parse(
                trimmed,
                format_description!("[year]-[month]-[day] [hour]:[minute]"),
            )
        })
        .ok()
        .or_else(|| {
            Date::parse(trimmed, format_description!("[year]-[month]-[day]"))
                .ok()
                .map(Date::midnight)
        });

        parsed
            .map(Self)
            .ok_or_else(|| DomainError::InvalidTimestamp(trimmed.to_string()))
    }

    /// Returns the canonical `YYYY-MM-DDTHH:MM:SS` representation.
    #[must_use]
    pub fn canonical(&self) -> String {
        self.0
            .format(format_description!(
                "[year]-[month]-[day]T[hour]:[minute]:[second]"
            ))
            .unwrap_or_else(|_| self.0.to_string())
    }

    /// Returns the underlying date-time value.
    #[must_use]
    pub const fn value(&self) -> PrimitiveDateTime {
        self.0
    }

    /// Seconds since the Unix epoch, interpreting the wall clock as UTC.
    #[must_use]
    pub fn unix_timestamp(&self) -> i64 {
        self.0.assume_utc().unix_timestamp()
    }

    /// Adds a duration, returning `None` on overflow.
    #[must_use]
    pub fn checked_add(&self, duration: Duration) -> Option<Self> {
        self.0.checked_add(duration).map(Self)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

impl FromStr for Timestamp {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Timestamp> for String {
    fn from(value: Timestamp) -> Self {
        value.canonical()
    }
}

impl TryFrom<String> for Timestamp {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// A user-supplied ship identifier (e.g. `BR2000`).
///
/// Ship IDs are the primary key of the ships table and are compared
/// exactly as entered, minus surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShipId {
    value: String,
}

impl ShipId {
    /// Creates a new ship ID.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidShipId` if the value is empty after trimming.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidShipId(String::from(
                "Ship ID cannot be empty",
            )));
        }
        Ok(Self {
            value: trimmed.to_string(),
        })
    }

    /// Returns the ship ID value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for ShipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A scheduled port call.
///
/// A `Ship` can only be constructed with a departure strictly after its
/// arrival.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    ship_id: ShipId,
    name: String,
    arrival: Timestamp,
    departure: Timestamp,
    created_at: Timestamp,
}

impl Ship {
    /// Creates a new ship record.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or if departure is not
    /// strictly after arrival.
    pub fn new(
        ship_id: ShipId,
        name: &str,
        arrival: Timestamp,
        departure: Timestamp,
        created_at: Timestamp,
    ) -> Result<Self, DomainError> {
        let name: &str = crate::validation::validate_required("name", name)?;
        crate::validation::validate_schedule(&arrival, &departure)?;
        Ok(Self {
            ship_id,
            name: name.to_string(),
            arrival,
            departure,
            created_at,
        })
    }

    #[must_use]
    pub const fn ship_id(&self) -> &ShipId {
        &self.ship_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn arrival(&self) -> Timestamp {
        self.arrival
    }

    #[must_use]
    pub const fn departure(&self) -> Timestamp {
        self.departure
    }

    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Length of the docking window.
    #[must_use]
    pub fn docking_window(&self) -> Duration {
        self.departure.value() - self.arrival.value()
    }
}

/// A persisted docking invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// The database-assigned identifier.
    pub id: i64,
    /// The invoiced ship.
    pub ship_id: ShipId,
    /// The charge breakdown.
    pub charge: crate::invoice::InvoiceCharge,
    /// When the invoice was issued.
    pub issued_at: Timestamp,
}

/// An administrative notice, optionally with an attached file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circular {
    /// The database-assigned identifier.
    pub id: i64,
    /// The circular title.
    pub title: String,
    /// The stored attachment name, if a file was uploaded.
    pub filename: Option<String>,
    /// When the circular was uploaded.
    pub uploaded_at: Timestamp,
}
