//! Demo gallery: prints an HTML page with four differently-styled gauges to
//! stdout. Stands in for the host application that mounts the widget.

use arcgauge::config::{BarStyle, LabelStyle, PercentageStyle};
use arcgauge::{ArcGauge, GaugeConfig};

fn main() {
    let gauges = vec![
        ArcGauge::new(
            GaugeConfig::builder()
                .progress(20.0)
                .show_percentage(true)
                .bar(BarStyle {
                    color: Some("indianred".to_string()),
                })
                .percentage(PercentageStyle {
                    font_family: Some("monospace".to_string()),
                    ..Default::default()
                })
                .build(),
        ),
        ArcGauge::new(GaugeConfig::builder().progress(30.0).build()),
        ArcGauge::new(
            GaugeConfig::builder()
                .progress(50.0)
                .show_percentage(true)
                .bar(BarStyle {
                    color: Some("darkgreen".to_string()),
                })
                .label(LabelStyle {
                    font_family: Some("math".to_string()),
                    ..Default::default()
                })
                .percentage(PercentageStyle {
                    font_family: Some("math".to_string()),
                    ..Default::default()
                })
                .build(),
        ),
        ArcGauge::new(
            GaugeConfig::builder()
                .progress(80.0)
                .bar(BarStyle {
                    color: Some("yellow".to_string()),
                })
                .build(),
        ),
    ];

    println!("<!DOCTYPE html>");
    println!("<html>");
    println!("<body>");
    println!("<div style=\"display: flex; flex-direction: row\">");
    for mut gauge in gauges {
        println!("  {}", gauge.to_svg());
    }
    println!("</div>");
    println!("</body>");
    println!("</html>");
}
