use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type DestinationId = i32;
pub type BookingId = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Gender should be male or female")]
pub struct InvalidGender;

impl FromStr for Gender {
    type Err = InvalidGender;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(InvalidGender),
        }
    }
}

/// A booking request that already passed field validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub birthday: NaiveDate,
    pub launchpad_id: String,
    pub destination_id: DestinationId,
    pub launch_date: NaiveDate,
}

impl BookingRequest {
    /// Row to persist once the request has been accepted.
    pub fn into_new_booking(self) -> NewBooking {
        NewBooking {
            first_name: self.first_name,
            last_name: self.last_name,
            gender: self.gender,
            birthday: self.birthday,
            launchpad_id: self.launchpad_id,
            destination_id: self.destination_id,
            launch_date: self.launch_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub id: DestinationId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Launchpad {
    pub id: String,
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub locality: Option<String>,
    pub region: Option<String>,
    pub status: Option<String>,
}

impl Launchpad {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            full_name: None,
            locality: None,
            region: None,
            status: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingLaunch {
    pub id: Option<String>,
    pub name: Option<String>,
    pub launchpad_id: String,
    pub date_utc: DateTime<Utc>,
}

impl UpcomingLaunch {
    /// True when this launch occupies `launchpad_id` on the UTC calendar day `date`.
    pub fn occupies(&self, launchpad_id: &str, date: NaiveDate) -> bool {
        self.launchpad_id == launchpad_id && self.date_utc.date_naive() == date
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub birthday: NaiveDate,
    pub launchpad_id: String,
    pub destination_id: DestinationId,
    pub launch_date: NaiveDate,
}

/// Booking fields before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub birthday: NaiveDate,
    pub launchpad_id: String,
    pub destination_id: DestinationId,
    pub launch_date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFilter {
    pub launch_date: Option<NaiveDate>,
    pub offset: Option<u32>,
    /// `None` means no limit.
    pub limit: Option<u32>,
}

impl BookingFilter {
    pub fn on_date(launch_date: NaiveDate) -> Self {
        Self {
            launch_date: Some(launch_date),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_gender_parsing() {
        assert_eq!("male".parse::<Gender>(), Ok(Gender::Male));
        assert_eq!("female".parse::<Gender>(), Ok(Gender::Female));
        assert_eq!("Male".parse::<Gender>(), Err(InvalidGender));
        assert_eq!("".parse::<Gender>(), Err(InvalidGender));
    }

    #[test]
    fn test_launch_occupies_same_utc_day_only() {
        let launch = UpcomingLaunch {
            id: None,
            name: None,
            launchpad_id: "pad1".to_string(),
            date_utc: Utc.with_ymd_and_hms(2022, 10, 3, 23, 59, 0).unwrap(),
        };
        let day = NaiveDate::from_ymd_opt(2022, 10, 3).unwrap();

        assert!(launch.occupies("pad1", day));
        assert!(!launch.occupies("pad2", day));
        assert!(!launch.occupies("pad1", day.succ_opt().unwrap()));
    }
}
