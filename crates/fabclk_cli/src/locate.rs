//! `fabclk locate`: report where each assigned clock lands.

use fabclk_setting::{DeviceGeometry, LocateOutcome, LocatedClocks};

use crate::options::build_options;
use crate::{GlobalArgs, LocateArgs, ReportFormat, EXIT_SKIPPED};

/// Runs the `fabclk locate` command.
pub fn run(args: &LocateArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let options = build_options(&args.inputs, None, None, false, global)?;

    let (geometry, clocks) = match fabclk_setting::locate(&options)? {
        LocateOutcome::Located { geometry, clocks } => (geometry, clocks),
        LocateOutcome::Skipped { reason } => {
            eprintln!(
                "warning: nothing located: device size `{}`: {reason}",
                options.device_size
            );
            return Ok(EXIT_SKIPPED);
        }
    };

    match args.format {
        ReportFormat::Text => print!("{}", render_text(&geometry, &clocks)),
        ReportFormat::Json => println!("{}", render_json(&geometry, &clocks)?),
    }
    Ok(0)
}

/// Renders a fixed-width table, one clock per line.
fn render_text(geometry: &DeviceGeometry, clocks: &LocatedClocks) -> String {
    let mut out = format!("device {geometry}\n");
    let width = clocks.keys().map(String::len).max().unwrap_or(0).max(10);
    out.push_str(&format!(
        "{:<width$}  {:<6}  {:>5}  {:>5}  {:>5}  edge\n",
        "identifier", "domain", "index", "x", "y"
    ));
    for (identifier, clock) in clocks {
        let domain = if clock.assignment.domain.is_soc() {
            "soc"
        } else {
            "fabric"
        };
        out.push_str(&format!(
            "{identifier:<width$}  {domain:<6}  {:>5}  {:>5}  {:>5}  {}\n",
            clock.assignment.clock_index, clock.x, clock.y, clock.edge
        ));
    }
    out
}

fn render_json(
    geometry: &DeviceGeometry,
    clocks: &LocatedClocks,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "geometry": geometry,
        "clocks": clocks,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fabclk_setting::{ClockAssignment, ClockDomain, Edge, LocatedClock};

    fn sample() -> (DeviceGeometry, LocatedClocks) {
        let mut clocks = LocatedClocks::new();
        clocks.insert(
            "clk".to_string(),
            LocatedClock {
                assignment: ClockAssignment {
                    clock_index: 3,
                    domain: ClockDomain::Fabric,
                    line: 1,
                },
                x: 2,
                y: 1,
                edge: Edge::Bottom,
                pin_row: Some(4),
            },
        );
        clocks.insert(
            "soc_ref".to_string(),
            LocatedClock::new(ClockAssignment {
                clock_index: 9,
                domain: ClockDomain::Soc,
                line: 2,
            }),
        );
        (DeviceGeometry::new(10, 8), clocks)
    }

    #[test]
    fn text_table() {
        let (geometry, clocks) = sample();
        let text = render_text(&geometry, &clocks);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "device 10x8");
        assert!(lines[1].starts_with("identifier"));
        assert_eq!(
            lines[2],
            "clk         fabric      3      2      1  bottom"
        );
        assert_eq!(
            lines[3],
            "soc_ref     soc         9      0      0  unknown"
        );
    }

    #[test]
    fn json_report() {
        let (geometry, clocks) = sample();
        let json = render_json(&geometry, &clocks).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["geometry"]["width"], 10);
        assert_eq!(value["clocks"]["clk"]["edge"], "bottom");
        assert_eq!(value["clocks"]["soc_ref"]["domain"], "soc");
        assert!(value["clocks"]["soc_ref"]["pin_row"].is_null());
    }
}
