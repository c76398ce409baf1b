use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::DestinationId;

/// Daily rotation of destinations across launchpads.
///
/// The mapping depends only on the launch date, the *set* of launchpad ids and
/// the number of destinations, so recomputing it with the same inputs always
/// yields the same assignment. Destination ids are assumed to be `1..=count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timetable {
    launch_date: NaiveDate,
    assignments: BTreeMap<String, DestinationId>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimetableError {
    #[error("Launchpad {0} is not part of the timetable")]
    NotFound(String),
    #[error("At least one destination is required to build a timetable")]
    NoDestinations,
    #[error("At least one launchpad is required to build a timetable")]
    NoLaunchpads,
    #[error("Too many destinations for a timetable: {0}")]
    TooManyDestinations(usize),
}

impl Timetable {
    /// Compute the launchpad to destination mapping for `launch_date`.
    ///
    /// Launchpads are enumerated in ascending id order. The first one gets the
    /// destination after `(day_of_year % count) + 1`, each following pad the
    /// next one, wrapping around within `1..=count`.
    pub fn compute<I, S>(
        launch_date: NaiveDate,
        launchpad_ids: I,
        destination_count: usize,
    ) -> Result<Self, TimetableError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if destination_count == 0 {
            return Err(TimetableError::NoDestinations);
        }
        if DestinationId::try_from(destination_count).is_err() {
            return Err(TimetableError::TooManyDestinations(destination_count));
        }

        // BTreeMap keys give us the sorted, de-duplicated enumeration.
        let mut assignments: BTreeMap<String, DestinationId> = launchpad_ids
            .into_iter()
            .map(|id| (id.as_ref().to_string(), 0))
            .collect();
        if assignments.is_empty() {
            return Err(TimetableError::NoLaunchpads);
        }

        let base = (launch_date.ordinal() as usize % destination_count) + 1;
        for (index, destination) in assignments.values_mut().enumerate() {
            *destination = ((base + index) % destination_count + 1) as DestinationId;
        }

        Ok(Self {
            launch_date,
            assignments,
        })
    }

    pub fn launch_date(&self) -> NaiveDate {
        self.launch_date
    }

    pub fn destination_for(&self, launchpad_id: &str) -> Result<DestinationId, TimetableError> {
        self.assignments
            .get(launchpad_id)
            .copied()
            .ok_or_else(|| TimetableError::NotFound(launchpad_id.to_string()))
    }

    pub fn assignments(&self) -> &BTreeMap<String, DestinationId> {
        &self.assignments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_single_launchpad_rotation() {
        // 2022-10-08 is day 281, 281 % 7 = 1
        let timetable = Timetable::compute(date(2022, 10, 8), ["pad1"], 7).unwrap();
        assert_eq!(timetable.destination_for("pad1").unwrap(), 3);

        // 2022-10-03 is day 276, 276 % 7 = 3
        let timetable = Timetable::compute(date(2022, 10, 3), ["pad1"], 7).unwrap();
        assert_eq!(timetable.destination_for("pad1").unwrap(), 5);
    }

    #[test]
    fn test_launchpads_enumerated_in_sorted_order() {
        let timetable = Timetable::compute(date(2022, 10, 8), ["pad-b", "pad-a", "pad-c"], 7).unwrap();

        assert_eq!(timetable.destination_for("pad-a").unwrap(), 3);
        assert_eq!(timetable.destination_for("pad-b").unwrap(), 4);
        assert_eq!(timetable.destination_for("pad-c").unwrap(), 5);
    }

    #[test]
    fn test_wraps_past_last_destination() {
        // Day 7 of the year with 7 destinations: base is 1, first pad gets 2.
        let timetable = Timetable::compute(date(2023, 1, 7), ["a", "b", "c", "d", "e", "f", "g"], 7).unwrap();
        let values: Vec<_> = timetable.assignments().values().copied().collect();
        assert_eq!(values, vec![2, 3, 4, 5, 6, 7, 1]);
    }

    #[test]
    fn test_more_launchpads_than_destinations_stay_in_range() {
        let timetable = Timetable::compute(date(2022, 1, 2), ["a", "b", "c", "d", "e"], 3).unwrap();
        let values: Vec<_> = timetable.assignments().values().copied().collect();
        assert_eq!(values, vec![1, 2, 3, 1, 2]);
    }

    #[test]
    fn test_range_invariant_over_a_year() {
        let pads: Vec<String> = (0..13).map(|i| format!("pad-{i:02}")).collect();
        for count in 1..=9 {
            let mut day = date(2024, 1, 1);
            while day.year() == 2024 {
                let timetable = Timetable::compute(day, &pads, count).unwrap();
                for destination in timetable.assignments().values() {
                    assert!((1..=count as DestinationId).contains(destination));
                }
                day = day.succ_opt().unwrap();
            }
        }
    }

    #[test]
    fn test_deterministic_and_order_independent() {
        let first = Timetable::compute(date(2022, 6, 15), ["x", "a", "m"], 5).unwrap();
        let again = Timetable::compute(date(2022, 6, 15), ["x", "a", "m"], 5).unwrap();
        let shuffled = Timetable::compute(date(2022, 6, 15), ["m", "x", "a", "a"], 5).unwrap();

        assert_eq!(first, again);
        assert_eq!(first, shuffled);
    }

    #[test]
    fn test_unknown_launchpad_is_not_found() {
        let timetable = Timetable::compute(date(2022, 10, 8), ["pad1"], 7).unwrap();
        assert_eq!(
            timetable.destination_for("pad2"),
            Err(TimetableError::NotFound("pad2".to_string()))
        );
    }

    #[test]
    fn test_rejects_empty_inputs() {
        assert_eq!(
            Timetable::compute(date(2022, 10, 8), ["pad1"], 0),
            Err(TimetableError::NoDestinations)
        );
        assert_eq!(
            Timetable::compute(date(2022, 10, 8), Vec::<String>::new(), 7),
            Err(TimetableError::NoLaunchpads)
        );
    }
}
