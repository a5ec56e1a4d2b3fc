use anyhow::Result;

use crate::engine::CandidateRecord;
use crate::network::minimum_ops::MinimumOperations;
use crate::round_trip::RoundTripRecord;

pub fn candidates_to_csv(records: &[CandidateRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "date",
        "departure",
        "arrival",
        "departure_country",
        "arrival_country",
        "type",
        "direction",
        "departure_time",
        "flight_minutes",
        "recommended_max_operations",
        "price",
        "demand",
        "revenue",
        "scale",
        "seats",
        "min_viable_revenue",
        "captains",
        "first_officers",
        "personnel_index",
        "turnaround_pre",
        "turnaround_post",
        "priority_score",
    ])?;
    for r in records {
        writer.write_record([
            r.date.to_string(),
            r.route.departure.clone(),
            r.route.arrival.clone(),
            r.route.departure_country.clone(),
            r.route.arrival_country.clone(),
            r.route.route_type.to_string(),
            format!("{:?}", r.route.direction).to_lowercase(),
            r.departure_time.to_string(),
            r.flight_minutes.to_string(),
            r.recommended_max_operations.to_string(),
            r.price.to_string(),
            r.demand.to_string(),
            r.revenue.to_string(),
            r.scale.to_string(),
            r.seats.to_string(),
            r.min_viable_revenue.to_string(),
            r.captains.to_string(),
            r.first_officers.to_string(),
            r.personnel_index.to_string(),
            r.turnaround_pre.to_string(),
            r.turnaround_post.to_string(),
            format!("{:.7}", r.priority_score),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn round_trips_to_csv(pairs: &[RoundTripRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "outbound_date",
        "outbound_departure",
        "outbound_arrival",
        "outbound_time",
        "outbound_priority",
        "inbound_date",
        "inbound_time",
        "inbound_priority",
        "score",
        "gap_hours",
        "resource_waste_score",
        "combined_priority",
    ])?;
    for p in pairs {
        writer.write_record([
            p.outbound_date.to_string(),
            p.outbound_departure.clone(),
            p.outbound_arrival.clone(),
            p.outbound_time.to_string(),
            format!("{:.7}", p.outbound_priority),
            p.inbound_date.to_string(),
            p.inbound_time.to_string(),
            format!("{:.7}", p.inbound_priority),
            p.score.score.to_string(),
            format!("{:.2}", p.score.gap_hours),
            format!("{:.1}", p.score.resource_waste_score),
            format!("{:.4}", p.score.combined_priority),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn minimum_ops_to_csv(rows: &[MinimumOperations]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "departure_country",
        "departure",
        "arrival_country",
        "arrival",
        "type",
        "popularity",
        "strategic_weight",
        "band_min",
        "band_max",
        "monthly_minimum",
    ])?;
    for row in rows {
        writer.write_record([
            row.route.departure_country.clone(),
            row.route.departure.clone(),
            row.route.arrival_country.clone(),
            row.route.arrival.clone(),
            row.route.route_type.to_string(),
            format!("{:.4}", row.popularity),
            format!("{:.4}", row.strategic_weight),
            row.band.min.to_string(),
            row.band.max.to_string(),
            row.monthly_minimum.to_string(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::airline::loader::AirlineFile;
    use crate::airline::AirlineProfile;
    use crate::engine::{CandidateEvaluator, MonthSchedule};
    use crate::network::minimum_ops::minimum_operations_table;
    use crate::network::routes::sample_routes;

    #[test]
    fn candidate_csv_has_one_row_per_record() {
        let evaluator = Arc::new(CandidateEvaluator::new(AirlineFile::sample(), 1));
        let schedule = MonthSchedule::from_window(2025, 3, "08:00", "09:00", 60).expect("schedule");
        let route = &sample_routes()[0];
        let records = evaluator.evaluate_route(route, &schedule).expect("records");

        let csv = candidates_to_csv(&records).expect("csv");
        let mut lines = csv.lines();
        let header = lines.next().expect("header");
        assert!(header.starts_with("date,departure,arrival"));
        assert_eq!(lines.count(), 31 * 2);
        assert!(csv.contains("2025-03-01,HND,ICN"));
        assert!(csv.contains(",international,departure,08:00,"));
    }

    #[test]
    fn empty_round_trip_csv_is_header_only() {
        let csv = round_trips_to_csv(&[]).expect("csv");
        assert_eq!(csv.lines().count(), 1);
        assert!(csv.trim_end().ends_with("combined_priority"));
    }

    #[test]
    fn minimum_ops_csv_rows_keep_route_columns() {
        let rows = minimum_operations_table(&AirlineProfile::sample(), &sample_routes(), 3);
        let csv = minimum_ops_to_csv(&rows).expect("csv");
        assert_eq!(csv.lines().count(), rows.len() + 1);
        assert!(csv.starts_with("departure_country,departure,arrival_country,arrival,type"));
        assert!(csv.lines().skip(1).all(|line| line.split(',').count() == 10));
    }
}
