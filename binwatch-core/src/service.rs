//! High-level service facade over the stores and the demo controller.

use std::sync::Arc;

use crate::catalog::{DemoCatalog, DemoCityDataset};
use crate::demo::{DemoController, DemoSummary};
use crate::model::{Alert, AlertId, Bin, BinId, BinStatus, Coordinate, DEFAULT_ALERT_CATEGORY};
use crate::ports::{JitterSource, StoreError};
use crate::store::{AlertStore, BinStore};

/// Public entry point for everything the dashboard can do.
pub struct MonitoringService {
    alerts: Arc<AlertStore>,
    bins: Arc<BinStore>,
    demo: DemoController,
}

impl MonitoringService {
    /// Create a service over empty stores, placing demo alerts with `jitter`.
    #[must_use]
    pub fn new(jitter: impl JitterSource + 'static) -> Self {
        Self::with_stores(Arc::new(AlertStore::new()), Arc::new(BinStore::new()), jitter)
    }

    /// Create a service over existing stores.
    #[must_use]
    pub fn with_stores(
        alerts: Arc<AlertStore>,
        bins: Arc<BinStore>,
        jitter: impl JitterSource + 'static,
    ) -> Self {
        let demo = DemoController::new(DemoCatalog, Arc::clone(&alerts), Arc::clone(&bins), jitter);
        Self { alerts, bins, demo }
    }

    /// All alerts in reporting order.
    #[must_use]
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.list()
    }

    /// Report an alert; a missing category becomes `waste`.
    pub fn report_alert(&self, position: Coordinate, category: Option<String>) -> Alert {
        let category = category.unwrap_or_else(|| DEFAULT_ALERT_CATEGORY.to_owned());
        self.alerts.create(position, category)
    }

    /// Dismiss an alert. Dismissing an unknown alert is a no-op, never an error.
    ///
    /// Returns whether a record was removed.
    pub fn dismiss_alert(&self, id: AlertId) -> bool {
        self.alerts.delete(id)
    }

    /// Number of live alerts.
    #[must_use]
    pub fn alert_count(&self) -> usize {
        self.alerts.len()
    }

    /// Number of registered bins.
    #[must_use]
    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    /// All bins in registration order.
    #[must_use]
    pub fn bins(&self) -> Vec<Bin> {
        self.bins.list()
    }

    /// Register a new active bin.
    pub fn register_bin(&self, position: Coordinate) -> Bin {
        self.bins.create(position)
    }

    /// Change the status of a bin.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::BinNotFound`] if no bin has that id.
    pub fn set_bin_status(&self, id: BinId, status: impl Into<BinStatus>) -> Result<Bin, StoreError> {
        self.bins.update_status(id, status)
    }

    /// Seed the demo dataset for `city_key`, replacing all live data.
    pub fn initialize_demo(&self, city_key: &str) -> DemoSummary {
        self.demo.initialize(city_key)
    }

    /// Remove all alerts and bins.
    pub fn clear_demo(&self) {
        self.demo.clear();
    }

    /// Datasets available for seeding.
    #[must_use]
    pub fn demo_cities(&self) -> &'static [DemoCityDataset] {
        self.demo.catalog().cities()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn service() -> MonitoringService {
        MonitoringService::new(StdRng::seed_from_u64(11))
    }

    #[test]
    fn report_defaults_category_to_waste() {
        let service = service();
        let alert = service.report_alert(Coordinate::new(1.0, 2.0), None);
        let smoke = service.report_alert(Coordinate::new(1.0, 2.0), Some("smoke".to_owned()));

        assert_eq!(alert.category, "waste");
        assert_eq!(smoke.category, "smoke");
        assert_eq!(service.alerts().len(), 2);
    }

    #[test]
    fn bin_scenario_create_update_list() {
        let service = service();
        let bin = service.register_bin(Coordinate::new(28.615, 77.210));
        assert_eq!(bin.status, BinStatus::Active);

        let updated = service
            .set_bin_status(bin.id, "maintenance")
            .expect("bin was just created");
        assert_eq!(updated.id, bin.id);
        assert_eq!(updated.status, BinStatus::Maintenance);

        assert_eq!(service.bins(), vec![updated]);
    }

    #[test]
    fn dismissing_twice_is_fine() {
        let service = service();
        let alert = service.report_alert(Coordinate::new(0.0, 0.0), None);

        assert!(service.dismiss_alert(alert.id));
        assert!(!service.dismiss_alert(alert.id));

        assert!(service.alerts().is_empty());
    }

    #[test]
    fn clear_after_mixed_operations_leaves_nothing() {
        let service = service();
        service.register_bin(Coordinate::new(0.0, 0.0));
        service.initialize_demo("chennai");
        service.report_alert(Coordinate::new(0.0, 0.0), None);
        service.initialize_demo("kolkata");

        service.clear_demo();

        assert!(service.alerts().is_empty());
        assert!(service.bins().is_empty());
    }

    #[test]
    fn counts_follow_the_stores() {
        let service = service();
        assert_eq!((service.alert_count(), service.bin_count()), (0, 0));

        service.initialize_demo("mumbai");
        service.report_alert(Coordinate::new(19.0, 72.9), None);
        assert_eq!((service.alert_count(), service.bin_count()), (3, 5));

        service.clear_demo();
        assert_eq!((service.alert_count(), service.bin_count()), (0, 0));
    }

    #[test]
    fn lists_demo_cities_in_catalog_order() {
        let keys: Vec<_> = service()
            .demo_cities()
            .iter()
            .map(|dataset| dataset.city.key())
            .collect();
        assert_eq!(keys, ["delhi", "mumbai", "bangalore", "chennai", "kolkata"]);
    }
}
