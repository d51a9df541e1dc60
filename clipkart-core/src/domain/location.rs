//! Store location reference data

use serde::{Deserialize, Serialize};

/// Degrees of latitude/longitude shown around the selected store
pub const MAP_SPAN_DEGREES: f64 = 0.1;

/// WGS84 coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A physical store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub city_name: String,
    pub coordinates: Coordinates,
    pub description: String,
    pub image_names: Vec<String>,
    pub link: String,
}

impl Location {
    /// Stores are identified by name and city
    pub fn same_place(&self, other: &Location) -> bool {
        self.name == other.name && self.city_name == other.city_name
    }
}

/// Visible map area
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapRegion {
    pub center: Coordinates,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl MapRegion {
    pub fn around(center: Coordinates) -> Self {
        Self {
            center,
            latitude_delta: MAP_SPAN_DEGREES,
            longitude_delta: MAP_SPAN_DEGREES,
        }
    }
}

fn location(
    name: &str,
    city_name: &str,
    latitude: f64,
    longitude: f64,
    description: &str,
    image_names: [&str; 2],
    link: &str,
) -> Location {
    Location {
        name: name.to_string(),
        city_name: city_name.to_string(),
        coordinates: Coordinates { latitude, longitude },
        description: description.to_string(),
        image_names: image_names.iter().map(|s| s.to_string()).collect(),
        link: link.to_string(),
    }
}

/// The built-in store list
pub fn default_locations() -> Vec<Location> {
    vec![
        location(
            "Central shop",
            "Delhi",
            28.6139,
            77.2090,
            "A popular retail store in the heart of Delhi, offering a wide range of fashion, \
             accessories, and lifestyle products. The store attracts both local customers and \
             tourists who wish to explore Indian fashion trends.",
            ["3", "4"],
            "https://en.wikipedia.org/wiki/Delhi",
        ),
        location(
            "East shop",
            "Kolkata",
            22.5726,
            88.3639,
            "This retail store in Kolkata offers a variety of traditional and modern apparel, \
             including sarees, suits, and casual wear, reflecting the rich cultural heritage of \
             Bengal.",
            ["1", "4"],
            "https://en.wikipedia.org/wiki/Kolkata",
        ),
        location(
            "West shop",
            "Mumbai",
            19.0760,
            72.8777,
            "Located in Mumbai, this retail store offers an eclectic mix of western and Indian \
             fashion. It is one of the city's most visited shopping destinations, popular for its \
             trendy collection and international brands.",
            ["1", "2"],
            "https://en.wikipedia.org/wiki/Mumbai",
        ),
        location(
            "South shop",
            "Bengaluru",
            12.9716,
            77.5946,
            "This retail store in Bengaluru is known for its premium collection of tech gadgets, \
             home decor, and fashion wear. It is a go-to spot for tech enthusiasts and \
             fashion-conscious customers alike.",
            ["2", "3"],
            "https://en.wikipedia.org/wiki/Bangalore",
        ),
    ]
}
