use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::orbit::{OrbitType, LEO_CEILING_KM};

/// Freshness policy applied to a whole batch.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IngestMode {
    /// Narrow windows for live position tracking.
    #[default]
    Tracking,
    /// Wide windows for building modelling datasets.
    Prediction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
pub enum ActivityStatus {
    Active,
    Inactive,
}

/// Whole days from `epoch` to `now`, truncated. Future epochs give negative ages.
pub fn age_days(now: DateTime<Utc>, epoch: DateTime<Utc>) -> i64 {
    (now - epoch).num_days()
}

/// Maximum element age, in days, for an object to still count as active.
pub fn activity_cutoff_days(orbit_type: OrbitType, perigee_alt_km: f64, mode: IngestMode) -> i64 {
    use IngestMode::*;
    use OrbitType::*;

    match (orbit_type, mode) {
        (Leo, Tracking) => 7,
        (Leo, Prediction) => 30,
        (Meo, Tracking) => 30,
        (Meo, Prediction) => 180,
        (Heo, _) if perigee_alt_km < LEO_CEILING_KM => 30,
        (Heo, Tracking) => 90,
        (Heo, Prediction) => 365,
        (Geo, Tracking) => 180,
        (Geo, Prediction) => 730,
    }
}

pub fn classify_activity(
    orbit_type: OrbitType,
    age_days: i64,
    perigee_alt_km: f64,
    mode: IngestMode,
) -> ActivityStatus {
    if age_days > activity_cutoff_days(orbit_type, perigee_alt_km, mode) {
        ActivityStatus::Inactive
    } else {
        ActivityStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rstest::rstest;

    #[rstest]
    #[case(OrbitType::Leo, 400.0, 7, 30)]
    #[case(OrbitType::Meo, 20000.0, 30, 180)]
    #[case(OrbitType::Heo, 500.0, 30, 30)]
    #[case(OrbitType::Heo, 1999.9, 30, 30)]
    #[case(OrbitType::Heo, 2000.0, 90, 365)]
    #[case(OrbitType::Geo, 35780.0, 180, 730)]
    fn cutoff_table(
        #[case] orbit_type: OrbitType,
        #[case] perigee: f64,
        #[case] tracking: i64,
        #[case] prediction: i64,
    ) {
        assert_eq!(activity_cutoff_days(orbit_type, perigee, IngestMode::Tracking), tracking);
        assert_eq!(
            activity_cutoff_days(orbit_type, perigee, IngestMode::Prediction),
            prediction
        );
    }

    #[test]
    fn leo_boundary_under_tracking() {
        let status = |age| classify_activity(OrbitType::Leo, age, 400.0, IngestMode::Tracking);
        assert_eq!(status(7), ActivityStatus::Active);
        assert_eq!(status(8), ActivityStatus::Inactive);
    }

    #[test]
    fn prediction_mode_tolerates_older_elements() {
        assert_eq!(
            classify_activity(OrbitType::Leo, 8, 400.0, IngestMode::Prediction),
            ActivityStatus::Active
        );
        assert_eq!(
            classify_activity(OrbitType::Geo, 731, 35780.0, IngestMode::Prediction),
            ActivityStatus::Inactive
        );
    }

    #[test]
    fn future_epochs_are_active() {
        assert_eq!(
            classify_activity(OrbitType::Leo, -2, 400.0, IngestMode::Tracking),
            ActivityStatus::Active
        );
    }

    #[test]
    fn age_truncates_to_whole_days() {
        let epoch = Utc.with_ymd_and_hms(2023, 1, 28, 17, 0, 0).unwrap();
        assert_eq!(age_days(epoch + Duration::hours(23), epoch), 0);
        assert_eq!(age_days(epoch + Duration::days(7) + Duration::hours(23), epoch), 7);
        assert_eq!(age_days(epoch + Duration::days(8), epoch), 8);
        assert_eq!(age_days(epoch - Duration::hours(30), epoch), -1);
    }

    #[test]
    fn mode_names() {
        assert_eq!(IngestMode::Tracking.to_string(), "tracking");
        assert_eq!(IngestMode::Prediction.to_string(), "prediction");
        assert_eq!(IngestMode::default(), IngestMode::Tracking);
    }
}
