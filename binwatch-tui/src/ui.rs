use binwatch_core::BinStatus;
use chrono::{DateTime, Utc};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap},
};

use crate::app::{App, Focus, Screen};

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    // Title / header
    let header = Paragraph::new(format!(
        "binwatch – waste bins and alerts · {}",
        app.client.base_url()
    ))
    .block(Block::default().borders(Borders::ALL).title("Binwatch"));
    frame.render_widget(header, *header_area);

    // Main screen
    match app.screen {
        Screen::CitySelect => draw_city_select(frame, app, *content_area),
        Screen::Dashboard => draw_dashboard(frame, app, *content_area),
    }

    // Status bar
    let nav_hint = match app.screen {
        Screen::CitySelect => "↑/↓ move · Enter/Space seed demo city · q/Ctrl-C quit",
        Screen::Dashboard => {
            "Tab focus · ↑/↓ move · m toggle bin · a alert at bin · n new bin · d dismiss alert · r refresh · c clear · Esc back · q quit"
        }
    };

    let status_text = if app.is_loading {
        format!("Loading… · {nav_hint}")
    } else if let Some(msg) = &app.error_message {
        format!("{msg} · {nav_hint}")
    } else if let Some(msg) = &app.info_message {
        format!("{msg} · {nav_hint}")
    } else {
        nav_hint.to_owned()
    };

    let status_style = if app.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else if app.is_loading {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn draw_city_select(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let items = app
        .cities
        .iter()
        .enumerate()
        .map(|(idx, dataset)| {
            let prefix = if idx == app.city_list_index {
                "> "
            } else {
                "  "
            };
            ListItem::new(format!(
                "{prefix}{} ({:.4}, {:.4}) · {} bins",
                dataset.name,
                dataset.center.lat,
                dataset.center.lng,
                dataset.bins.len()
            ))
        })
        .collect::<Vec<ListItem<'_>>>();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Seed demo city (↑/↓, Enter) · replaces all bins and alerts"),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !app.cities.is_empty() {
        state.select(Some(app.city_list_index));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_dashboard(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [bins_area, alerts_area] = chunks else {
        return;
    };

    draw_bins(frame, app, *bins_area);
    draw_alerts(frame, app, *alerts_area);
}

fn panel(title: String, focused: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
}

fn draw_bins(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let focused = app.focus == Focus::Bins;
    let title = format!("Bins in {} ({})", app.city_name(), app.bins.len());

    if app.bins.is_empty() {
        let paragraph = Paragraph::new("No bins. Press n to register one or Esc to seed a city.")
            .block(panel(title, focused))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let rows = app.bins.iter().map(|bin| {
        Row::new(vec![
            Cell::from(bin.id.to_string()),
            Cell::from(format!("{:.4}", bin.lat)),
            Cell::from(format!("{:.4}", bin.lng)),
            Cell::from(bin.status.to_string()),
        ])
        .style(Style::default().fg(status_color(&bin.status)))
    });

    let column_widths = [
        Constraint::Length(14),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Min(12),
    ];

    let table = Table::new(rows, column_widths)
        .header(
            Row::new(vec!["Id", "Lat", "Lng", "Status"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(panel(title, focused))
        .row_highlight_style(highlight(focused))
        .column_spacing(1);

    let mut state = TableState::default();
    state.select(Some(app.bin_index));
    frame.render_stateful_widget(table, area, &mut state);
}

fn draw_alerts(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let focused = app.focus == Focus::Alerts;
    let title = format!("Alerts ({})", app.alerts.len());

    if app.alerts.is_empty() {
        let paragraph = Paragraph::new("No active alerts.")
            .block(panel(title, focused))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let now = Utc::now();
    let rows = app.alerts.iter().map(|alert| {
        Row::new(vec![
            Cell::from(alert.id.to_string()),
            Cell::from(format!("{:.4}, {:.4}", alert.lat, alert.lng)),
            Cell::from(alert.category.clone()),
            Cell::from(relative_age_label(alert.timestamp, now)),
        ])
    });

    let column_widths = [
        Constraint::Length(14),
        Constraint::Length(18),
        Constraint::Length(10),
        Constraint::Min(10),
    ];

    let table = Table::new(rows, column_widths)
        .header(
            Row::new(vec!["Id", "Position", "Type", "Reported"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(panel(title, focused))
        .row_highlight_style(highlight(focused))
        .column_spacing(1);

    let mut state = TableState::default();
    state.select(Some(app.alert_index));
    frame.render_stateful_widget(table, area, &mut state);
}

fn highlight(focused: bool) -> Style {
    if focused {
        Style::default()
            .add_modifier(Modifier::REVERSED)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::UNDERLINED)
    }
}

fn status_color(status: &BinStatus) -> Color {
    match status {
        BinStatus::Active => Color::Green,
        BinStatus::Maintenance => Color::Yellow,
        BinStatus::Other(_) => Color::Magenta,
    }
}

fn relative_age_label(reported: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - reported).num_minutes();
    match minutes {
        ..=0 => "just now".to_owned(),
        1 => "1 min ago".to_owned(),
        2..60 => format!("{minutes} min ago"),
        _ => format!("{} h ago", minutes / 60),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn ages_read_naturally() {
        let now = Utc::now();
        assert_eq!(relative_age_label(now, now), "just now");
        assert_eq!(relative_age_label(now - Duration::minutes(1), now), "1 min ago");
        assert_eq!(relative_age_label(now - Duration::minutes(45), now), "45 min ago");
        assert_eq!(relative_age_label(now - Duration::minutes(130), now), "2 h ago");
    }
}
