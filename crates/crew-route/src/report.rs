//! Report rendering

use crew_route_lib::{BoardInfo, Priority, RouteReport};
use serde::Serialize;
use std::fmt::Write;

#[derive(Serialize)]
struct JsonReport<'a> {
    routes: &'a [RouteReport],
    board: &'a BoardInfo,
}

pub fn render_json(reports: &[RouteReport], board: &BoardInfo) -> crate::Result<String> {
    Ok(serde_json::to_string_pretty(&JsonReport {
        routes: reports,
        board,
    })?)
}

pub fn render_text(reports: &[RouteReport], board: &BoardInfo) -> Result<String, std::fmt::Error> {
    let mut out = String::new();

    for report in reports {
        let metrics = &report.metrics;
        writeln!(out, "{} (start {})", report.crew, report.start_time)?;
        writeln!(
            out,
            "  Drive {} min | Billable {:.2} h | Distance {:.2} mi | Fuel ${:.2} | Efficiency {:.1}%",
            metrics.drive_time,
            metrics.billable_hours,
            metrics.distance_miles(),
            metrics.fuel_cost_usd(),
            report.efficiency
        )?;

        for (i, point) in report.timeline.iter().enumerate() {
            let priority = match point.stop.priority {
                Some(Priority::High) => " [high]",
                Some(Priority::Medium) => " [medium]",
                Some(Priority::Low) => " [low]",
                None => "",
            };
            writeln!(
                out,
                "  {:>2}. {:>8} - {:>8}  {} ({}){}",
                i + 1,
                point.arrival_time,
                point.departure_time,
                point.stop.address,
                point.stop.id,
                priority
            )?;
        }

        if !report.suggestions.is_empty() {
            writeln!(out, "  Suggestions:")?;
            for suggestion in &report.suggestions {
                writeln!(out, "   - {suggestion}")?;
            }
        }
        writeln!(out)?;
    }

    write!(
        out,
        "Board: {} routes, {} stops | Drive {} min | Billable {:.2} h | Distance {:.2} mi | Fuel ${:.2} | Efficiency {:.1}%",
        board.route_count,
        board.stop_count,
        board.total_drive_time,
        board.total_billable_hours,
        board.total_distance_miles,
        board.total_fuel_cost,
        board.efficiency
    )?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crew_route_lib::{RouteMetrics, RoutePoint, Stop};

    fn create_test_report() -> RouteReport {
        let stop = Stop::new("wo-9", "9 Cedar Ln", 34.0, -118.0, 1.5).with_priority(Priority::Low);
        RouteReport {
            crew: "Crew C".to_string(),
            start_time: "09:00".to_string(),
            metrics: RouteMetrics {
                drive_time: 0,
                billable_hours: 1.5,
                total_distance: Some(0.0),
                fuel_cost: Some(0.0),
            },
            efficiency: 100.0,
            timeline: vec![RoutePoint {
                stop,
                arrival_time: "9:00 AM".to_string(),
                departure_time: "10:30 AM".to_string(),
                arrival_ms: 32_400_000,
                departure_ms: 37_800_000,
            }],
            suggestions: Vec::new(),
        }
    }

    #[test]
    fn test_render_text() {
        let board = BoardInfo {
            route_count: 1,
            stop_count: 1,
            total_billable_hours: 1.5,
            efficiency: 100.0,
            ..BoardInfo::default()
        };
        let text = render_text(&[create_test_report()], &board).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Crew C (start 09:00)");
        assert!(lines[1].contains("Billable 1.50 h"));
        assert!(lines[1].contains("Efficiency 100.0%"));
        assert_eq!(lines[2], "   1.  9:00 AM - 10:30 AM  9 Cedar Ln (wo-9) [low]");
        assert!(!text.contains("Suggestions"));
        assert!(lines.last().unwrap().starts_with("Board: 1 routes, 1 stops"));
    }

    #[test]
    fn test_render_json_shape() {
        let json = render_json(&[create_test_report()], &BoardInfo::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["routes"][0]["timeline"][0]["priority"], "low");
        assert_eq!(value["routes"][0]["timeline"][0]["estimatedHours"], 1.5);
        assert_eq!(value["board"]["stopCount"], 0);
    }
}
