use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::network::{Direction, Route, RouteType};

/// Loads the route list from `.json` (array of routes) or `.csv` with the
/// header `departure,arrival,departure_country,arrival_country,type,direction`.
pub fn load_routes(path: &Path) -> Result<Vec<Route>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed reading routes file: {}", path.display()))?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let routes = if is_json {
        serde_json::from_str(&data)
            .with_context(|| format!("failed parsing JSON routes: {}", path.display()))?
    } else {
        parse_routes_csv(&data)
            .with_context(|| format!("failed parsing CSV routes: {}", path.display()))?
    };
    Ok(routes)
}

pub fn parse_routes_csv(data: &str) -> Result<Vec<Route>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());
    let mut routes = Vec::new();
    for row in reader.deserialize() {
        let route: Route = row?;
        routes.push(route);
    }
    Ok(routes)
}

/// Small Tokyo-centred network used when no routes file is configured.
pub fn sample_routes() -> Vec<Route> {
    let international = [
        ("HND", "ICN", "韓国"),
        ("NRT", "TPE", "台湾"),
        ("HND", "SIN", "シンガポール"),
    ];
    let domestic = [("HND", "FUK"), ("HND", "CTS")];

    let mut routes = Vec::new();
    for (home, abroad, country) in international {
        routes.push(route(
            home,
            abroad,
            "日本",
            country,
            RouteType::International,
            Direction::Departure,
        ));
        routes.push(route(
            abroad,
            home,
            country,
            "日本",
            RouteType::International,
            Direction::Arrival,
        ));
    }
    for (from, to) in domestic {
        routes.push(route(from, to, "日本", "日本", RouteType::Domestic, Direction::Both));
        routes.push(route(to, from, "日本", "日本", RouteType::Domestic, Direction::Both));
    }
    routes
}

fn route(
    departure: &str,
    arrival: &str,
    departure_country: &str,
    arrival_country: &str,
    route_type: RouteType,
    direction: Direction,
) -> Route {
    Route {
        departure: departure.to_string(),
        arrival: arrival.to_string(),
        departure_country: departure_country.to_string(),
        arrival_country: arrival_country.to_string(),
        route_type,
        direction,
    }
}
