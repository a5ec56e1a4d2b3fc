use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::airline::OperationScale;
use crate::engine::CandidateRecord;
use crate::network::minimum_ops::MinimumOperations;
use crate::round_trip::RoundTripRecord;
use crate::weights::WeightsReport;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn render_candidates_table(records: &[CandidateRecord]) -> String {
    let mut table = new_table();
    table.set_header(vec![
        "Rank", "Date", "Route", "Time", "Flight", "Price", "Demand", "Revenue", "Scale",
        "Seats", "Crew", "Priority",
    ]);

    for (idx, r) in records.iter().enumerate() {
        let scale_cell = match r.scale {
            OperationScale::Large => Cell::new(r.scale.to_string()).fg(Color::Green),
            OperationScale::Medium => Cell::new(r.scale.to_string()).fg(Color::Yellow),
            OperationScale::Small => Cell::new(r.scale.to_string()),
        };
        table.add_row(Row::from(vec![
            Cell::new(idx + 1),
            Cell::new(r.date.to_string()),
            Cell::new(r.route.label()),
            Cell::new(r.departure_time.to_string()),
            Cell::new(format!("{}m", r.flight_minutes)),
            Cell::new(format!("¥{}", r.price)),
            Cell::new(r.demand),
            Cell::new(format!("¥{}", r.revenue)),
            scale_cell,
            Cell::new(r.seats),
            Cell::new(format!("{}/{}", r.captains, r.first_officers)),
            Cell::new(format!("{:.7}", r.priority_score)),
        ]));
    }
    table.to_string()
}

pub fn render_round_trip_table(pairs: &[RoundTripRecord]) -> String {
    let mut table = new_table();
    table.set_header(vec![
        "Rank",
        "Outbound",
        "Out Time",
        "Inbound Date",
        "In Time",
        "Gap (h)",
        "Waste",
        "Combined",
        "Score",
    ]);

    for (idx, p) in pairs.iter().enumerate() {
        let gap_cell = if p.score.is_feasible() {
            Cell::new(format!("{:.2}", p.score.gap_hours))
        } else {
            Cell::new(format!("{:.2}", p.score.gap_hours)).fg(Color::Red)
        };
        table.add_row(Row::from(vec![
            Cell::new(idx + 1),
            Cell::new(format!(
                "{} {} -> {}",
                p.outbound_date, p.outbound_departure, p.outbound_arrival
            )),
            Cell::new(p.outbound_time.to_string()),
            Cell::new(p.inbound_date.to_string()),
            Cell::new(p.inbound_time.to_string()),
            gap_cell,
            Cell::new(format!("{:.1}", p.score.resource_waste_score)),
            Cell::new(format!("{:.4}", p.score.combined_priority)),
            Cell::new(p.score.score),
        ]));
    }
    table.to_string()
}

pub fn render_minimum_ops_table(rows: &[MinimumOperations]) -> String {
    let mut table = new_table();
    table.set_header(vec![
        "Route",
        "Type",
        "Popularity",
        "Strategic",
        "Band",
        "Monthly Min",
    ]);
    for row in rows {
        table.add_row(Row::from(vec![
            Cell::new(row.route.label()),
            Cell::new(row.route.route_type.to_string()),
            Cell::new(format!("{:.4}", row.popularity)),
            Cell::new(format!("{:.4}", row.strategic_weight)),
            Cell::new(format!("{}-{}", row.band.min, row.band.max)),
            Cell::new(row.monthly_minimum).fg(Color::Cyan),
        ]));
    }
    table.to_string()
}

pub fn render_weights_table(report: &WeightsReport) -> String {
    let mut table = new_table();
    table.set_header(vec!["Field", "Value"]);
    let airline = if report.airline.is_empty() {
        "-".to_string()
    } else {
        report.airline.clone()
    };
    table.add_row(vec!["Airline".to_string(), airline]);
    table.add_row(vec![
        "Classification".to_string(),
        report.classification.clone(),
    ]);
    table.add_row(vec![
        "Operation scales".to_string(),
        report.scale_count.to_string(),
    ]);
    table.add_row(vec![
        "Avg route count".to_string(),
        format!("{:.1}", report.avg_route_count),
    ]);
    table.add_row(vec![
        "Resource abundance".to_string(),
        format!("{:.4}", report.weights.resource_abundance),
    ]);
    table.add_row(vec![
        "Waste weight".to_string(),
        format!("{:.3}", report.weights.waste_weight),
    ]);
    table.add_row(vec![
        "Priority weight".to_string(),
        format!("{:.3}", report.weights.priority_weight),
    ]);
    table.to_string()
}
