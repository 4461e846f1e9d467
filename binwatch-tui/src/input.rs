use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Screen};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Action {
    None,
    Quit,
    /// Seed the highlighted city and switch to the dashboard
    InitializeDemo,
    Refresh,
    ClearDemo,
    /// Flip the selected bin between active and maintenance
    ToggleBinStatus,
    DeleteAlert,
    /// Report a waste alert at the selected bin
    ReportAlertAtBin,
    /// Register a bin at the city center
    RegisterBin,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{BackTab, Char, Down, Enter, Esc, Left, Tab, Up};

    // Global quit shortcuts
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    if key.code == Char('q') && key.modifiers.is_empty() {
        return Action::Quit;
    }

    let mut action = Action::None;

    match app.screen {
        Screen::CitySelect => match key.code {
            Up | Char('k') => {
                if app.city_list_index > 0 {
                    app.city_list_index -= 1;
                }
            }
            Down | Char('j') => {
                if app.city_list_index + 1 < app.cities.len() {
                    app.city_list_index += 1;
                }
            }
            Enter | Char(' ') => {
                action = Action::InitializeDemo;
            }
            _ => {}
        },

        Screen::Dashboard => match key.code {
            Up | Char('k') => app.move_selection(false),
            Down | Char('j') => app.move_selection(true),
            Tab | BackTab => app.toggle_focus(),
            Char('m') => action = Action::ToggleBinStatus,
            Char('d') => action = Action::DeleteAlert,
            Char('a') => action = Action::ReportAlertAtBin,
            Char('n') => action = Action::RegisterBin,
            Char('r') => action = Action::Refresh,
            Char('c') => action = Action::ClearDemo,
            Left | Esc => {
                app.screen = Screen::CitySelect;
                app.error_message = None;
                app.info_message = None;
            }
            _ => {}
        },
    }
    action
}
