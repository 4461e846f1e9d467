use binwatch_core::{Alert, Bin, BinStatus, Coordinate, DemoCatalog, DemoCity, DemoCityDataset};

use crate::client::ApiClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    CitySelect,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    Bins,
    Alerts,
}

pub(crate) struct App {
    pub client: ApiClient,

    pub screen: Screen,
    pub cities: &'static [DemoCityDataset],
    pub city_list_index: usize,
    pub selected_city: Option<DemoCity>,

    pub bins: Vec<Bin>,
    pub bin_index: usize,
    pub alerts: Vec<Alert>,
    pub alert_index: usize,
    pub focus: Focus,

    pub is_loading: bool,
    pub error_message: Option<String>,
    pub info_message: Option<String>,
}

impl App {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self {
            client,
            screen: Screen::CitySelect,
            cities: DemoCatalog.cities(),
            city_list_index: 0,
            selected_city: None,
            bins: Vec::new(),
            bin_index: 0,
            alerts: Vec::new(),
            alert_index: 0,
            focus: Focus::Bins,
            is_loading: false,
            error_message: None,
            info_message: None,
        }
    }

    pub(crate) fn highlighted_city(&self) -> Option<DemoCity> {
        self.cities
            .get(self.city_list_index)
            .map(|dataset| dataset.city)
    }

    pub(crate) fn city_name(&self) -> &'static str {
        let city = self.selected_city.unwrap_or(DemoCatalog::FALLBACK);
        DemoCatalog.dataset(city).name
    }

    /// Center of the selected city; new bins are placed here.
    pub(crate) fn city_center(&self) -> Coordinate {
        let city = self.selected_city.unwrap_or(DemoCatalog::FALLBACK);
        DemoCatalog.dataset(city).center
    }

    pub(crate) fn selected_bin(&self) -> Option<&Bin> {
        self.bins.get(self.bin_index)
    }

    pub(crate) fn selected_alert(&self) -> Option<&Alert> {
        self.alerts.get(self.alert_index)
    }

    pub(crate) fn set_data(&mut self, bins: Vec<Bin>, alerts: Vec<Alert>) {
        self.bins = bins;
        self.alerts = alerts;
        self.bin_index = self.bin_index.min(self.bins.len().saturating_sub(1));
        self.alert_index = self.alert_index.min(self.alerts.len().saturating_sub(1));
    }

    pub(crate) fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Bins => Focus::Alerts,
            Focus::Alerts => Focus::Bins,
        };
    }

    pub(crate) fn move_selection(&mut self, down: bool) {
        let (index, len) = match self.focus {
            Focus::Bins => (&mut self.bin_index, self.bins.len()),
            Focus::Alerts => (&mut self.alert_index, self.alerts.len()),
        };
        if down {
            if *index + 1 < len {
                *index += 1;
            }
        } else if *index > 0 {
            *index -= 1;
        }
    }

    pub(crate) fn report(&mut self, result: Result<String, String>) {
        match result {
            Ok(info) => {
                self.info_message = Some(info);
                self.error_message = None;
            }
            Err(err) => {
                self.error_message = Some(err);
                self.info_message = None;
            }
        }
    }
}

/// Status a bin should switch to when toggled.
pub(crate) fn toggled_status(current: &BinStatus) -> BinStatus {
    match current {
        BinStatus::Maintenance => BinStatus::Active,
        BinStatus::Active | BinStatus::Other(_) => BinStatus::Maintenance,
    }
}

#[cfg(test)]
mod tests {
    use binwatch_core::{BinId, DemoCity};
    use reqwest::Client;

    use super::*;

    fn app() -> App {
        App::new(ApiClient::new(Client::new(), "http://localhost:3000/"))
    }

    fn bin(id: u64) -> Bin {
        Bin {
            id: BinId(id),
            lat: 0.0,
            lng: 0.0,
            status: BinStatus::Active,
        }
    }

    #[test]
    fn toggling_flips_between_active_and_maintenance() {
        assert_eq!(toggled_status(&BinStatus::Active), BinStatus::Maintenance);
        assert_eq!(toggled_status(&BinStatus::Maintenance), BinStatus::Active);
        assert_eq!(
            toggled_status(&BinStatus::Other("full".to_owned())),
            BinStatus::Maintenance
        );
    }

    #[test]
    fn selection_stays_in_bounds_after_refresh() {
        let mut app = app();
        app.set_data(vec![bin(1), bin(2), bin(3)], Vec::new());
        app.move_selection(true);
        app.move_selection(true);
        app.move_selection(true);
        assert_eq!(app.bin_index, 2);

        app.set_data(vec![bin(1)], Vec::new());
        assert_eq!(app.bin_index, 0);
        assert_eq!(app.selected_bin().map(|bin| bin.id), Some(BinId(1)));
    }

    #[test]
    fn city_defaults_to_the_fallback_until_seeded() {
        let mut app = app();
        assert_eq!(app.city_name(), "Delhi");
        assert_eq!(app.client.base_url(), "http://localhost:3000");

        app.city_list_index = 1;
        assert_eq!(app.highlighted_city(), Some(DemoCity::Mumbai));
        app.selected_city = app.highlighted_city();
        assert_eq!(app.city_center(), Coordinate::new(19.0760, 72.8777));
    }
}
