use crate::domain::{ServiceStatus, StatusReport};
use colored::Colorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Container Name")]
    name: String,
    #[tabled(rename = "Port")]
    port: u16,
}

fn styled_status(status: ServiceStatus) -> String {
    let label = status.to_string();
    match status {
        ServiceStatus::Running => label.green().on_black().to_string(),
        ServiceStatus::Stopped => label.red().on_black().to_string(),
    }
}

/// Renders reconciled rows in the order given, showing the port status
pub fn status_table(reports: &[StatusReport]) -> String {
    let rows = reports.iter().map(|report| StatusRow {
        service: report.key.to_string(),
        status: styled_status(report.port_status),
        name: report.name.clone(),
        port: report.port,
    });

    Table::new(rows).with(Style::rounded()).to_string()
}
