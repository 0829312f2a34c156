use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(format!(
                "Invalid latitude: {} (must be between -90 and 90)",
                lat
            ));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(format!(
                "Invalid longitude: {} (must be between -180 and 180)",
                lng
            ));
        }
        Ok(Coordinates { lat, lng })
    }

    /// Re-run range validation on coordinates that came in through serde.
    pub fn validate(&self) -> Result<(), String> {
        Coordinates::new(self.lat, self.lng).map(|_| ())
    }

    /// Calculate distance between two coordinates using Haversine formula
    /// Returns distance in kilometers
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        const EARTH_RADIUS_KM: f64 = 6371.0;

        let lat1_rad = self.lat.to_radians();
        let lat2_rad = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_validation() {
        assert!(Coordinates::new(0.3476, 32.5825).is_ok());
        assert!(Coordinates::new(91.0, 0.0).is_err()); // Invalid lat
        assert!(Coordinates::new(0.0, 181.0).is_err()); // Invalid lng

        let smuggled = Coordinates { lat: -95.0, lng: 30.0 };
        assert!(smuggled.validate().is_err());
    }

    #[test]
    fn test_distance_calculation() {
        let kampala = Coordinates::new(0.3476, 32.5825).unwrap();
        let jinja = Coordinates::new(0.4244, 33.2042).unwrap();

        let distance = kampala.distance_to(&jinja);
        // Kampala to Jinja is roughly 70 km as the crow flies
        assert!((distance - 70.0).abs() < 10.0, "got {}km", distance);
        assert_eq!(kampala.distance_to(&kampala), 0.0);
    }
}
