//! Terminal dashboard for binwatch that lets operators seed demo cities and manage bins and alerts.

mod app;
mod client;
mod input;
mod ui;

use std::{env, io, time::Duration as StdDuration};

use anyhow::Result;
use binwatch_core::DEFAULT_ALERT_CATEGORY;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use reqwest::Client;

use crate::app::{App, Screen, toggled_status};
use crate::client::ApiClient;
use crate::input::Action;

const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

#[tokio::main]
async fn main() -> Result<()> {
    // HTTP client setup
    let client = Client::builder()
        .user_agent(concat!("binwatch-tui/", env!("CARGO_PKG_VERSION")))
        .timeout(StdDuration::from_secs(10))
        .build()?;
    let base_url = env::var("BINWATCH_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_owned());

    // App state
    let app = App::new(ApiClient::new(client, &base_url));

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        // Draw current UI
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            let action = input::handle_key_event(key, &mut app);

            match action {
                Action::Quit => break,
                Action::None => continue,
                _ => {}
            }

            app.is_loading = true;
            terminal.draw(|frame| ui::draw(frame, &app))?;

            let outcome = perform(&mut app, action).await;
            app.report(outcome);

            if app.screen == Screen::Dashboard {
                refresh(&mut app).await;
            }
            app.is_loading = false;
        }
    }

    Ok(())
}

/// Run one mutating action; the message ends up in the status bar.
async fn perform(app: &mut App, action: Action) -> Result<String, String> {
    match action {
        Action::Quit | Action::None | Action::Refresh => Ok("Refreshed".to_owned()),
        Action::InitializeDemo => {
            let Some(city) = app.highlighted_city() else {
                return Err("Select a city first".to_owned());
            };
            let summary = app
                .client
                .initialize_demo(city)
                .await
                .map_err(|err| format!("Demo setup failed: {err}"))?;
            app.selected_city = Some(summary.city);
            app.screen = Screen::Dashboard;
            Ok(format!(
                "Seeded {} bins and {} alerts for {}",
                summary.bins,
                summary.alerts,
                app.city_name()
            ))
        }
        Action::ClearDemo => {
            app.client
                .clear_demo()
                .await
                .map_err(|err| format!("Clear failed: {err}"))?;
            Ok("Cleared all bins and alerts".to_owned())
        }
        Action::ToggleBinStatus => {
            let Some(bin) = app.selected_bin() else {
                return Err("No bin selected".to_owned());
            };
            let (id, status) = (bin.id, toggled_status(&bin.status));
            let updated = app
                .client
                .set_bin_status(id, &status)
                .await
                .map_err(|err| format!("Status update failed: {err}"))?;
            Ok(format!("Bin {} is now {}", updated.id, updated.status))
        }
        Action::DeleteAlert => {
            let Some(alert) = app.selected_alert() else {
                return Err("No alert selected".to_owned());
            };
            let id = alert.id;
            app.client
                .dismiss_alert(id)
                .await
                .map_err(|err| format!("Delete failed: {err}"))?;
            Ok(format!("Alert {id} dismissed"))
        }
        Action::ReportAlertAtBin => {
            let Some(bin) = app.selected_bin() else {
                return Err("No bin selected".to_owned());
            };
            let (bin_id, position) = (bin.id, bin.position());
            let alert = app
                .client
                .report_alert(position, DEFAULT_ALERT_CATEGORY)
                .await
                .map_err(|err| format!("Report failed: {err}"))?;
            Ok(format!("Alert {} reported at bin {bin_id}", alert.id))
        }
        Action::RegisterBin => {
            let bin = app
                .client
                .register_bin(app.city_center())
                .await
                .map_err(|err| format!("Registration failed: {err}"))?;
            Ok(format!("Bin {} registered at the city center", bin.id))
        }
    }
}

async fn refresh(app: &mut App) {
    let bins = app.client.bins().await;
    let alerts = app.client.alerts().await;
    match (bins, alerts) {
        (Ok(bins), Ok(alerts)) => app.set_data(bins, alerts),
        (Err(err), _) | (_, Err(err)) => {
            app.error_message = Some(format!("Refresh failed: {err}"));
        }
    }
}
