//! Wire shapes of the SpaceX REST API. Only the fields we read are declared.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use spacetrouble_core::{Launchpad, UpcomingLaunch};
use tracing::warn;

#[derive(Debug, Deserialize)]
pub(crate) struct LaunchpadDto {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl From<LaunchpadDto> for Launchpad {
    fn from(dto: LaunchpadDto) -> Self {
        Launchpad {
            id: dto.id,
            name: dto.name,
            full_name: dto.full_name,
            locality: dto.locality,
            region: dto.region,
            status: dto.status,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LaunchDto {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub launchpad: Option<String>,
    #[serde(default)]
    pub date_utc: Option<String>,
}

impl LaunchDto {
    /// Launches without a pad or with an unreadable date cannot occupy a pad, so they are dropped.
    pub(crate) fn into_upcoming(self) -> Option<UpcomingLaunch> {
        let launchpad_id = self.launchpad?;
        let raw_date = self.date_utc.unwrap_or_default();
        let date_utc = match DateTime::parse_from_rfc3339(&raw_date) {
            Ok(date) => date.with_timezone(&Utc),
            Err(err) => {
                warn!("failed to parse upcoming launch time {:?}: {}", raw_date, err);
                return None;
            }
        };

        Some(UpcomingLaunch {
            id: self.id,
            name: self.name,
            launchpad_id,
            date_utc,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn launch(launchpad: Option<&str>, date_utc: &str) -> LaunchDto {
        LaunchDto {
            id: Some("62dd70d5202306255024d139".to_string()),
            name: Some("Crew-5".to_string()),
            launchpad: launchpad.map(str::to_string),
            date_utc: Some(date_utc.to_string()),
        }
    }

    #[test]
    fn test_launch_date_normalised_to_utc() {
        let upcoming = launch(Some("pad1"), "2022-10-03T23:30:00-02:00").into_upcoming().unwrap();
        assert_eq!(upcoming.date_utc, Utc.with_ymd_and_hms(2022, 10, 4, 1, 30, 0).unwrap());
        assert_eq!(upcoming.launchpad_id, "pad1");
    }

    #[test]
    fn test_unusable_launches_dropped() {
        assert!(launch(None, "2022-10-03T05:40:00.000Z").into_upcoming().is_none());
        assert!(launch(Some("pad1"), "soon").into_upcoming().is_none());
    }
}
