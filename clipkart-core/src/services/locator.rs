//! Store locator - which store the map is centred on
//!
//! Holds the fixed store list plus the selection, list-visibility and
//! detail-sheet state of the map screen.

use crate::domain::result::{Error, Result};
use crate::domain::{default_locations, Location, MapRegion};

#[derive(Debug, Clone)]
pub struct StoreLocator {
    locations: Vec<Location>,
    current: usize,
    list_visible: bool,
    detail: Option<usize>,
}

impl Default for StoreLocator {
    fn default() -> Self {
        Self {
            locations: default_locations(),
            current: 0,
            list_visible: false,
            detail: None,
        }
    }
}

impl StoreLocator {
    /// Start on the first location
    pub fn new(locations: Vec<Location>) -> Result<Self> {
        if locations.is_empty() {
            return Err(Error::invalid_input("Store locator needs at least one location"));
        }
        Ok(Self {
            locations,
            current: 0,
            list_visible: false,
            detail: None,
        })
    }

    pub fn current(&self) -> &Location {
        &self.locations[self.current]
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Move to the next location, wrapping to the first after the last
    pub fn advance(&mut self) -> &Location {
        self.current = (self.current + 1) % self.locations.len();
        self.current()
    }

    /// Jump to a location and close the list
    ///
    /// Returns false (and changes nothing) for an unknown location.
    pub fn select(&mut self, location: &Location) -> bool {
        match self.index_of(location) {
            Some(index) => {
                self.current = index;
                self.list_visible = false;
                true
            }
            None => false,
        }
    }

    pub fn toggle_list(&mut self) -> bool {
        self.list_visible = !self.list_visible;
        self.list_visible
    }

    pub fn is_list_visible(&self) -> bool {
        self.list_visible
    }

    /// Map area centred on the current location
    pub fn region(&self) -> MapRegion {
        MapRegion::around(self.current().coordinates)
    }

    /// Open the detail sheet for a location; false if unknown
    pub fn show_details(&mut self, location: &Location) -> bool {
        match self.index_of(location) {
            Some(index) => {
                self.detail = Some(index);
                true
            }
            None => false,
        }
    }

    pub fn hide_details(&mut self) {
        self.detail = None;
    }

    pub fn detail(&self) -> Option<&Location> {
        self.detail.map(|i| &self.locations[i])
    }

    fn index_of(&self, location: &Location) -> Option<usize> {
        self.locations.iter().position(|l| l.same_place(location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_rejected() {
        let err = StoreLocator::new(Vec::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_advance_wraps() {
        let mut locator = StoreLocator::default();
        assert_eq!(locator.current().city_name, "Delhi");

        let cities: Vec<String> = (0..4).map(|_| locator.advance().city_name.clone()).collect();
        assert_eq!(cities, vec!["Kolkata", "Mumbai", "Bengaluru", "Delhi"]);
    }

    #[test]
    fn test_region_follows_current() {
        let mut locator = StoreLocator::default();
        locator.advance();
        let region = locator.region();
        assert_eq!(region.center, locator.current().coordinates);
        assert_eq!(region.latitude_delta, 0.1);
    }

    #[test]
    fn test_select_closes_list() {
        let mut locator = StoreLocator::default();
        let mumbai = locator.locations()[2].clone();

        assert!(locator.toggle_list());
        assert!(locator.select(&mumbai));
        assert_eq!(locator.current().city_name, "Mumbai");
        assert!(!locator.is_list_visible());
    }

    #[test]
    fn test_select_unknown_location() {
        let mut locator = StoreLocator::default();
        let mut elsewhere = locator.locations()[1].clone();
        elsewhere.city_name = "Chennai".to_string();

        locator.toggle_list();
        assert!(!locator.select(&elsewhere));
        assert_eq!(locator.current().city_name, "Delhi");
        assert!(locator.is_list_visible());
        assert!(!locator.show_details(&elsewhere));
    }

    #[test]
    fn test_details() {
        let mut locator = StoreLocator::default();
        assert!(locator.detail().is_none());

        let kolkata = locator.locations()[1].clone();
        assert!(locator.show_details(&kolkata));
        assert_eq!(locator.detail().map(|l| l.name.as_str()), Some("East shop"));

        locator.hide_details();
        assert!(locator.detail().is_none());
    }
}
