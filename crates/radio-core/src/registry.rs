//! StationRegistry: the ordered list of stations currently loaded.

use crate::station::Station;

#[derive(Debug, Clone, Default)]
pub struct StationRegistry {
    stations: Vec<Station>,
}

impl StationRegistry {
    pub fn new(stations: Vec<Station>) -> Self {
        Self { stations }
    }

    /// Swap in a new list wholesale.  No merge, no dedup.
    pub fn replace(&mut self, stations: Vec<Station>) {
        self.stations = stations;
    }

    pub fn get(&self, idx: usize) -> Option<&Station> {
        self.stations.get(idx)
    }

    pub fn first(&self) -> Option<&Station> {
        self.stations.first()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }
}
