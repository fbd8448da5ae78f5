use std::collections::BTreeMap;

use chrono::NaiveDate;
use http::Method;
use serde::Deserialize;

use crate::{
    api::{Api, ApiError, Booking},
    prelude::*,
    quantity::Money,
};

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub report_period: ReportPeriod,
    pub summary: Summary,

    #[serde(default)]
    pub bookings: Vec<Booking>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ReportPeriod {
    pub from: String,
    pub to: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    #[serde(default)]
    pub total_revenue: Money,

    #[serde(default)]
    pub total_bookings: u32,

    /// Booked units per room type.
    #[serde(default)]
    pub occupancy_by_room_type: BTreeMap<String, u32>,
}

impl Api {
    #[instrument(skip_all, fields(start = %start, end = %end))]
    pub async fn summary_report(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<SummaryReport, ApiError> {
        info!("fetching the report…");
        let query = [("startDate", start.to_string()), ("endDate", end.to_string())];
        let request = self.request(Method::GET, &["reports", "summary"])?.query(&query);
        Self::decode(Self::send(request).await?).await
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_deserialize_report_ok() -> Result {
        // language=JSON
        const RESPONSE: &str = r#"
            {
                "reportPeriod": {"from": "2025-06-01", "to": "2025-06-30"},
                "summary": {
                    "totalRevenue": 1234.5,
                    "totalBookings": 7,
                    "occupancyByRoomType": {"Deluxe": 4, "Standard": 3}
                },
                "bookings": []
            }
        "#;
        let report = serde_json::from_str::<SummaryReport>(RESPONSE)?;
        assert_eq!(report.report_period.to, "2025-06-30");
        assert_abs_diff_eq!(report.summary.total_revenue.0, 1234.5);
        assert_eq!(report.summary.total_bookings, 7);
        assert_eq!(report.summary.occupancy_by_room_type["Deluxe"], 4);
        Ok(())
    }
}
