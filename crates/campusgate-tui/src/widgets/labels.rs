//! Status dots, severity badges, and enum display labels.

use ratatui::style::{Color, Style};
use ratatui::text::Span;

use campusgate_core::{AlertSeverity, DeviceStatus, DeviceType, PolicyAction, PolicyCategory};

use crate::theme;

/// Styled ●/○/◐ dot for a device status.
pub fn status_span(status: DeviceStatus) -> Span<'static> {
    let (symbol, color) = match status {
        DeviceStatus::Active => ("●", theme::GREEN),
        DeviceStatus::Inactive => ("○", theme::RED),
        DeviceStatus::Warning => ("◐", theme::AMBER),
    };
    Span::styled(symbol, Style::default().fg(color))
}

pub fn severity_color(severity: AlertSeverity) -> Color {
    match severity {
        AlertSeverity::Critical => theme::RED,
        AlertSeverity::High => theme::ORANGE,
        AlertSeverity::Medium => theme::AMBER,
        AlertSeverity::Low => theme::SKY,
    }
}

/// Fixed-width severity badge, e.g. `CRIT`, `HIGH`.
pub fn severity_span(severity: AlertSeverity) -> Span<'static> {
    let label = match severity {
        AlertSeverity::Critical => "CRIT",
        AlertSeverity::High => "HIGH",
        AlertSeverity::Medium => "MED ",
        AlertSeverity::Low => "LOW ",
    };
    Span::styled(label, Style::default().fg(severity_color(severity)))
}

pub fn category_label(category: PolicyCategory) -> &'static str {
    match category {
        PolicyCategory::SocialMedia => "Social Media",
        PolicyCategory::Streaming => "Streaming",
        PolicyCategory::Gaming => "Gaming",
        PolicyCategory::Education => "Education",
        PolicyCategory::Research => "Research",
        PolicyCategory::Malware => "Malware",
        PolicyCategory::AdultContent => "Adult Content",
        PolicyCategory::Custom => "Custom",
    }
}

pub fn action_span(action: PolicyAction) -> Span<'static> {
    match action {
        PolicyAction::Allow => Span::styled("allow", Style::default().fg(theme::GREEN)),
        PolicyAction::Block => Span::styled("block", Style::default().fg(theme::RED)),
        PolicyAction::Warn => Span::styled("warn", Style::default().fg(theme::AMBER)),
    }
}

pub fn device_type_label(device_type: DeviceType) -> &'static str {
    match device_type {
        DeviceType::Router => "Router",
        DeviceType::Firewall => "Firewall",
        DeviceType::Switch => "Switch",
        DeviceType::Utm => "UTM",
        DeviceType::StudentDevice => "Student Device",
        DeviceType::Server => "Server",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_badges_are_fixed_width() {
        for severity in [
            AlertSeverity::Critical,
            AlertSeverity::High,
            AlertSeverity::Medium,
            AlertSeverity::Low,
        ] {
            assert_eq!(severity_span(severity).content.len(), 4);
        }
    }
}
