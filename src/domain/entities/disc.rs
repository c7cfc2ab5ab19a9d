//! Vehicle discs and the expiry computation.

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::payment::PaymentOrder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscStatus {
    Active,
    Expired,
}

/// The registration credential attached to exactly one vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDisc {
    pub disc_id: u64,
    pub issue_date: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub registration_fee: u32,
    pub status: DiscStatus,
}

impl VehicleDisc {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date < now
    }
}

/// Disc create/renew payload. Carries the disc id on renewal so the backend
/// updates the existing disc instead of minting a second one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscOrder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disc_id: Option<u64>,
    pub vehicle_id: u64,
    pub issue_date: DateTime<Utc>,
    pub expiry_date: DateTime<Utc>,
    pub registration_fee: u32,
    pub payment: PaymentOrder,
}

/// Same instant one calendar year later; Feb 29 issues fall back to 365 days.
pub fn one_year_after(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.with_year(instant.year() + 1).unwrap_or_else(|| instant + Duration::days(365))
}

/// Disc validity for a freshly registered vehicle.
///
/// The year bands mirror the backend's observed behavior, pending product
/// clarification: model years up to 2023 get a near-immediate expiry, the
/// 2024-2026 band and anything later a full year.
pub fn disc_validity(vehicle_year: i32, issued_at: DateTime<Utc>) -> DateTime<Utc> {
    match vehicle_year {
        ..=2023 => issued_at + Duration::minutes(2),
        2024..=2026 => one_year_after(issued_at),
        _ => one_year_after(issued_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 10, 30, 0).unwrap()
    }

    #[test]
    fn current_band_gets_one_full_year_to_the_day() {
        let issued = instant(2025, 9, 15);
        assert_eq!(disc_validity(2025, issued), instant(2026, 9, 15));
    }

    #[test]
    fn old_model_years_expire_almost_immediately() {
        let issued = instant(2025, 9, 15);
        assert_eq!(disc_validity(2019, issued), issued + Duration::minutes(2));
        assert_eq!(disc_validity(2023, issued), issued + Duration::minutes(2));
    }

    #[test]
    fn future_years_also_get_one_year() {
        let issued = instant(2025, 9, 15);
        assert_eq!(disc_validity(2027, issued), instant(2026, 9, 15));
    }

    #[test]
    fn leap_day_issue_falls_back_to_365_days() {
        let issued = Utc.with_ymd_and_hms(2024, 2, 29, 8, 0, 0).unwrap();
        assert_eq!(one_year_after(issued), issued + Duration::days(365));
    }

    #[test]
    fn expiry_comparison_drives_disc_status() {
        let disc = VehicleDisc {
            disc_id: 7,
            issue_date: instant(2024, 1, 1),
            expiry_date: instant(2025, 1, 1),
            registration_fee: 850,
            status: DiscStatus::Active,
        };
        assert!(disc.is_expired(instant(2025, 6, 1)));
        assert!(!disc.is_expired(instant(2024, 6, 1)));
    }
}
