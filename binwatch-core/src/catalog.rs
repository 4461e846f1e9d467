//! Read-only seed data for the demo cities.

use crate::model::{Bin, BinId, BinStatus, Coordinate, DemoCity};

/// A bin as written in the seed table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedBin {
    /// Fixed identifier.
    pub id: u64,
    /// Location.
    pub position: Coordinate,
    /// Whether the bin starts out in maintenance.
    pub maintenance: bool,
}

impl SeedBin {
    const fn active(id: u64, lat: f64, lng: f64) -> Self {
        Self {
            id,
            position: Coordinate::new(lat, lng),
            maintenance: false,
        }
    }

    const fn maintenance(id: u64, lat: f64, lng: f64) -> Self {
        Self {
            id,
            position: Coordinate::new(lat, lng),
            maintenance: true,
        }
    }

    /// Copy this seed into a live bin record.
    #[must_use]
    pub fn to_bin(&self) -> Bin {
        Bin {
            id: BinId(self.id),
            lat: self.position.lat,
            lng: self.position.lng,
            status: if self.maintenance {
                BinStatus::Maintenance
            } else {
                BinStatus::Active
            },
        }
    }
}

/// Demo data for one city.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoCityDataset {
    /// City this dataset belongs to.
    pub city: DemoCity,
    /// Display name.
    pub name: &'static str,
    /// Map center; demo alerts are scattered around it.
    pub center: Coordinate,
    /// Fixed bin set, in display order.
    pub bins: &'static [SeedBin],
}

impl DemoCityDataset {
    /// Fresh copies of the seeded bins.
    #[must_use]
    pub fn bins(&self) -> Vec<Bin> {
        self.bins.iter().map(SeedBin::to_bin).collect()
    }
}

static DATASETS: [DemoCityDataset; 5] = [
    DemoCityDataset {
        city: DemoCity::Delhi,
        name: "Delhi",
        center: Coordinate::new(28.6139, 77.2090),
        bins: &[
            SeedBin::active(1, 28.615, 77.210),
            SeedBin::active(2, 28.620, 77.200),
            SeedBin::active(3, 28.610, 77.220),
            SeedBin::maintenance(4, 28.625, 77.215),
            SeedBin::active(5, 28.605, 77.205),
        ],
    },
    DemoCityDataset {
        city: DemoCity::Mumbai,
        name: "Mumbai",
        center: Coordinate::new(19.0760, 72.8777),
        bins: &[
            SeedBin::active(1, 19.078, 72.879),
            SeedBin::active(2, 19.082, 72.875),
            SeedBin::active(3, 19.074, 72.881),
            SeedBin::maintenance(4, 19.080, 72.883),
            SeedBin::active(5, 19.072, 72.873),
        ],
    },
    DemoCityDataset {
        city: DemoCity::Bangalore,
        name: "Bangalore",
        center: Coordinate::new(12.9716, 77.5946),
        bins: &[
            SeedBin::active(1, 12.973, 77.596),
            SeedBin::active(2, 12.978, 77.592),
            SeedBin::active(3, 12.969, 77.598),
            SeedBin::maintenance(4, 12.975, 77.600),
            SeedBin::active(5, 12.967, 77.590),
        ],
    },
    DemoCityDataset {
        city: DemoCity::Chennai,
        name: "Chennai",
        center: Coordinate::new(13.0827, 80.2707),
        bins: &[
            SeedBin::active(1, 13.084, 80.272),
            SeedBin::active(2, 13.089, 80.268),
            SeedBin::active(3, 13.081, 80.274),
            SeedBin::maintenance(4, 13.087, 80.276),
            SeedBin::active(5, 13.079, 80.266),
        ],
    },
    DemoCityDataset {
        city: DemoCity::Kolkata,
        name: "Kolkata",
        center: Coordinate::new(22.5726, 88.3639),
        bins: &[
            SeedBin::active(1, 22.574, 88.365),
            SeedBin::active(2, 22.579, 88.361),
            SeedBin::active(3, 22.571, 88.367),
            SeedBin::maintenance(4, 22.577, 88.369),
            SeedBin::active(5, 22.569, 88.359),
        ],
    },
];

/// Lookup over the built-in demo datasets.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoCatalog;

impl DemoCatalog {
    /// City used when a key is not recognized.
    pub const FALLBACK: DemoCity = DemoCity::Delhi;

    /// All datasets, in catalog order.
    #[must_use]
    pub fn cities(&self) -> &'static [DemoCityDataset] {
        &DATASETS
    }

    /// Dataset for a known city.
    #[must_use]
    pub fn dataset(&self, city: DemoCity) -> &'static DemoCityDataset {
        match city {
            DemoCity::Delhi => &DATASETS[0],
            DemoCity::Mumbai => &DATASETS[1],
            DemoCity::Bangalore => &DATASETS[2],
            DemoCity::Chennai => &DATASETS[3],
            DemoCity::Kolkata => &DATASETS[4],
        }
    }

    /// Dataset for a wire key. Unknown keys resolve to [`Self::FALLBACK`].
    #[must_use]
    pub fn dataset_for(&self, key: &str) -> &'static DemoCityDataset {
        self.dataset(DemoCity::from_key(key).unwrap_or(Self::FALLBACK))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_city_has_its_own_dataset() {
        let catalog = DemoCatalog;
        for city in DemoCity::ALL {
            assert_eq!(catalog.dataset(city).city, city);
            assert_eq!(catalog.dataset_for(city.key()).city, city);
        }
        assert_eq!(catalog.cities().len(), DemoCity::ALL.len());
    }

    #[test]
    fn unknown_keys_fall_back_to_delhi() {
        let catalog = DemoCatalog;
        assert_eq!(catalog.dataset_for("atlantis"), catalog.dataset(DemoCity::Delhi));
        assert_eq!(catalog.dataset_for(""), catalog.dataset(DemoCity::Delhi));
    }

    #[test]
    fn each_city_seeds_four_active_and_one_maintenance_bin() {
        for dataset in DemoCatalog.cities() {
            let bins = dataset.bins();
            let ids: Vec<_> = bins.iter().map(|bin| bin.id.0).collect();
            assert_eq!(ids, vec![1, 2, 3, 4, 5], "{}", dataset.name);

            let maintenance = bins
                .iter()
                .filter(|bin| bin.status == BinStatus::Maintenance)
                .count();
            assert_eq!(maintenance, 1, "{}", dataset.name);
        }
    }

    #[test]
    fn seeded_bins_stay_near_the_center() {
        for dataset in DemoCatalog.cities() {
            for bin in dataset.bins() {
                assert!((bin.lat - dataset.center.lat).abs() < 0.02, "{}", dataset.name);
                assert!((bin.lng - dataset.center.lng).abs() < 0.02, "{}", dataset.name);
            }
        }
    }

    #[test]
    fn mumbai_bins_match_the_seed_table() {
        let mumbai = DemoCatalog.dataset_for("mumbai");
        assert_eq!(mumbai.center, Coordinate::new(19.0760, 72.8777));

        let bins = mumbai.bins();
        assert_eq!(bins[3].id, BinId(4));
        assert_eq!(bins[3].position(), Coordinate::new(19.080, 72.883));
        assert_eq!(bins[3].status, BinStatus::Maintenance);
    }
}
