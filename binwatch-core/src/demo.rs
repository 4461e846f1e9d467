//! Seeding and clearing the demo dataset.

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::DemoCatalog;
use crate::model::{Alert, Coordinate, DEFAULT_ALERT_CATEGORY, DemoCity};
use crate::ports::JitterSource;
use crate::store::{AlertStore, BinStore};

/// How far (in degrees, per axis) demo alerts may land from the city center.
pub const ALERT_JITTER_DEGREES: f64 = 0.01;

/// Number of alerts generated by each demo initialization.
pub const DEMO_ALERT_COUNT: usize = 2;

/// Outcome of [`DemoController::initialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoSummary {
    /// Bins installed.
    pub bins: usize,
    /// Alerts installed.
    pub alerts: usize,
    /// City the request resolved to.
    pub city: DemoCity,
}

/// Replaces the live stores with demo data, or empties them.
pub struct DemoController {
    catalog: DemoCatalog,
    alerts: Arc<AlertStore>,
    bins: Arc<BinStore>,
    /// Held for the whole of `initialize` and `clear` so both stores always
    /// change together.
    jitter: Mutex<Box<dyn JitterSource>>,
}

impl DemoController {
    /// Build a controller over the given stores using `jitter` for alert placement.
    #[must_use]
    pub fn new(
        catalog: DemoCatalog,
        alerts: Arc<AlertStore>,
        bins: Arc<BinStore>,
        jitter: impl JitterSource + 'static,
    ) -> Self {
        Self {
            catalog,
            alerts,
            bins,
            jitter: Mutex::new(Box::new(jitter)),
        }
    }

    /// Catalog the controller seeds from.
    #[must_use]
    pub fn catalog(&self) -> &DemoCatalog {
        &self.catalog
    }

    /// Replace both collections with the dataset for `city_key`.
    ///
    /// Bins are the dataset's literal records; alerts are
    /// [`DEMO_ALERT_COUNT`] fresh `waste` alerts around the city center.
    /// Anything previously stored is discarded. Unknown keys seed Delhi.
    pub fn initialize(&self, city_key: &str) -> DemoSummary {
        let dataset = self.catalog.dataset_for(city_key);
        let mut jitter = self.jitter.lock().unwrap_or_else(PoisonError::into_inner);

        let alerts: Vec<Alert> = (0..DEMO_ALERT_COUNT)
            .map(|_| {
                let position = Coordinate::new(
                    dataset.center.lat + jitter.offset(ALERT_JITTER_DEGREES),
                    dataset.center.lng + jitter.offset(ALERT_JITTER_DEGREES),
                );
                self.alerts.draft(position, DEFAULT_ALERT_CATEGORY)
            })
            .collect();

        let bins = dataset.bins();
        let summary = DemoSummary {
            bins: bins.len(),
            alerts: alerts.len(),
            city: dataset.city,
        };

        let dropped_bins = self.bins.replace(bins).len();
        let dropped_alerts = self.alerts.replace(alerts).len();
        drop(jitter);

        info!(
            requested = city_key,
            city = %summary.city,
            bins = summary.bins,
            alerts = summary.alerts,
            dropped_bins,
            dropped_alerts,
            "demo data initialized"
        );
        summary
    }

    /// Empty both collections.
    pub fn clear(&self) {
        let guard = self.jitter.lock().unwrap_or_else(PoisonError::into_inner);
        let bins = self.bins.clear();
        let alerts = self.alerts.clear();
        drop(guard);
        info!(bins, alerts, "demo data cleared");
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::ids::IdentityGenerator;
    use crate::model::{AlertStatus, BinStatus};

    /// Always nudges by the same fraction of the radius.
    struct FixedJitter(f64);

    impl JitterSource for FixedJitter {
        fn offset(&mut self, radius: f64) -> f64 {
            radius * self.0
        }
    }

    fn controller(jitter: impl JitterSource + 'static) -> (DemoController, Arc<AlertStore>, Arc<BinStore>) {
        let alerts = Arc::new(AlertStore::new());
        let bins = Arc::new(BinStore::new());
        let demo = DemoController::new(
            DemoCatalog,
            Arc::clone(&alerts),
            Arc::clone(&bins),
            jitter,
        );
        (demo, alerts, bins)
    }

    #[test]
    fn mumbai_replaces_everything_with_seed_data() {
        let (demo, alerts, bins) = controller(StdRng::seed_from_u64(7));
        alerts.create(Coordinate::new(0.0, 0.0), "old");
        bins.create(Coordinate::new(0.0, 0.0));
        bins.create(Coordinate::new(1.0, 1.0));

        let summary = demo.initialize("mumbai");

        assert_eq!(
            summary,
            DemoSummary {
                bins: 5,
                alerts: 2,
                city: DemoCity::Mumbai
            }
        );
        assert_eq!(bins.list(), DemoCatalog.dataset(DemoCity::Mumbai).bins());

        let center = Coordinate::new(19.0760, 72.8777);
        let live = alerts.list();
        assert_eq!(live.len(), 2);
        for alert in &live {
            assert!((alert.lat - center.lat).abs() <= ALERT_JITTER_DEGREES);
            assert!((alert.lng - center.lng).abs() <= ALERT_JITTER_DEGREES);
            assert_eq!(alert.category, "waste");
            assert_eq!(alert.status, AlertStatus::Active);
        }
        assert_ne!(live[0].id, live[1].id);
    }

    #[test]
    fn seeded_rng_gives_reproducible_positions() {
        let (demo, alerts, _bins) = controller(StdRng::seed_from_u64(42));
        demo.initialize("chennai");

        let mut replay = StdRng::seed_from_u64(42);
        let center = DemoCatalog.dataset(DemoCity::Chennai).center;
        for alert in alerts.list() {
            let lat = center.lat + replay.offset(ALERT_JITTER_DEGREES);
            let lng = center.lng + replay.offset(ALERT_JITTER_DEGREES);
            assert_eq!(alert.position(), Coordinate::new(lat, lng));
        }
    }

    #[test]
    fn fixed_jitter_places_alerts_exactly() {
        let (demo, alerts, _bins) = controller(FixedJitter(0.5));
        demo.initialize("kolkata");

        let expected = Coordinate::new(22.5726 + 0.005, 88.3639 + 0.005);
        for alert in alerts.list() {
            assert_eq!(alert.position(), expected);
        }
    }

    #[test]
    fn unknown_city_behaves_like_delhi() {
        let (demo, _alerts, bins) = controller(FixedJitter(0.0));

        let summary = demo.initialize("atlantis");

        assert_eq!(summary.city, DemoCity::Delhi);
        assert_eq!(bins.list(), DemoCatalog.dataset(DemoCity::Delhi).bins());
    }

    #[test]
    fn reinitializing_does_not_append() {
        let (demo, alerts, bins) = controller(StdRng::seed_from_u64(1));
        demo.initialize("delhi");
        demo.initialize("bangalore");

        assert_eq!(bins.len(), 5);
        assert_eq!(alerts.len(), 2);
        assert!(bins.list().iter().all(|bin| bin.lat < 13.0));
    }

    #[test]
    fn clear_empties_both_stores() {
        let (demo, alerts, bins) = controller(StdRng::seed_from_u64(3));
        demo.initialize("delhi");
        alerts.create(Coordinate::new(1.0, 2.0), "waste");
        bins.create(Coordinate::new(1.0, 2.0));

        demo.clear();

        assert!(alerts.is_empty());
        assert!(bins.is_empty());
    }

    #[test]
    fn concurrent_initialize_and_clear_never_mix_cities() {
        let (demo, alerts, bins) = controller(StdRng::seed_from_u64(9));
        let demo = Arc::new(demo);

        let workers: Vec<_> = (0..4)
            .map(|worker| {
                let demo = Arc::clone(&demo);
                std::thread::spawn(move || {
                    for round in 0..100 {
                        match (worker + round) % 3 {
                            0 => {
                                demo.initialize("mumbai");
                            }
                            1 => {
                                demo.initialize("kolkata");
                            }
                            _ => demo.clear(),
                        }
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().expect("worker panicked");
        }

        let (bins, alerts) = (bins.list(), alerts.list());
        if bins.is_empty() {
            assert!(alerts.is_empty(), "alerts left without bins: {alerts:?}");
            return;
        }

        let city = if bins[0].lat < 20.0 {
            DemoCity::Mumbai
        } else {
            DemoCity::Kolkata
        };
        let dataset = DemoCatalog.dataset(city);
        assert_eq!(bins, dataset.bins());
        assert_eq!(alerts.len(), DEMO_ALERT_COUNT);
        for alert in &alerts {
            assert!((alert.lat - dataset.center.lat).abs() <= ALERT_JITTER_DEGREES);
            assert!((alert.lng - dataset.center.lng).abs() <= ALERT_JITTER_DEGREES);
        }
    }

    #[test]
    fn seeded_bins_can_be_updated_and_new_ids_stay_clear_of_them() {
        let alerts = Arc::new(AlertStore::new());
        let bins = Arc::new(BinStore::with_ids(IdentityGenerator::starting_at(1)));
        let demo = DemoController::new(DemoCatalog, alerts, Arc::clone(&bins), FixedJitter(0.0));
        demo.initialize("delhi");

        let updated = bins
            .update_status(crate::model::BinId(4), BinStatus::Active)
            .expect("seeded bin 4 exists");
        assert_eq!(updated.status, BinStatus::Active);

        let fresh = bins.create(Coordinate::new(28.6, 77.2));
        assert!(fresh.id.0 > 5, "fresh id {} collides with seed data", fresh.id);
    }
}
