//! Planetary and stellar parameters fed to the scorer.

use serde::{Deserialize, Serialize};

/// Six numeric inputs describing a planet and its host star.
///
/// No range is enforced here. Out-of-range values fall through to the
/// lowest branch of each sub-score instead of being rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetParameters {
    /// Planet radius in Earth radii.
    pub planet_radius: f64,
    /// Orbital period in days.
    pub orbital_period: f64,
    /// Host star mass in solar masses.
    pub stellar_mass: f64,
    /// Equilibrium temperature in Kelvin.
    #[serde(alias = "equilibriumTemp")]
    pub equilibrium_temperature: f64,
    /// Orbital eccentricity, 0 = circular.
    pub eccentricity: f64,
    /// Host star radius in solar radii.
    pub stellar_radius: f64,
}

impl Default for PlanetParameters {
    /// The starting values of the prediction form: Earth around the Sun
    /// with a slightly elliptical orbit.
    fn default() -> Self {
        Self {
            planet_radius: 1.0,
            orbital_period: 365.0,
            stellar_mass: 1.0,
            equilibrium_temperature: 288.0,
            eccentricity: 0.1,
            stellar_radius: 1.0,
        }
    }
}

impl PlanetParameters {
    /// Earth's reference values.
    pub fn earth() -> Self {
        Self {
            planet_radius: 1.0,
            orbital_period: 365.25,
            stellar_mass: 1.0,
            equilibrium_temperature: 288.0,
            eccentricity: 0.017,
            stellar_radius: 1.0,
        }
    }

    /// Mars' reference values.
    pub fn mars() -> Self {
        Self {
            planet_radius: 0.53,
            orbital_period: 687.0,
            stellar_mass: 1.0,
            equilibrium_temperature: 210.0,
            eccentricity: 0.093,
            stellar_radius: 1.0,
        }
    }

    /// Field names paired with their values, in wire order.
    pub fn fields(&self) -> [(&'static str, f64); 6] {
        [
            ("planetRadius", self.planet_radius),
            ("orbitalPeriod", self.orbital_period),
            ("stellarMass", self.stellar_mass),
            ("equilibriumTemperature", self.equilibrium_temperature),
            ("eccentricity", self.eccentricity),
            ("stellarRadius", self.stellar_radius),
        ]
    }

    /// Name of the first field holding NaN or an infinity, if any.
    pub fn first_non_finite(&self) -> Option<&'static str> {
        self.fields()
            .into_iter()
            .find(|(_, v)| !v.is_finite())
            .map(|(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_params_pass() {
        assert_eq!(PlanetParameters::earth().first_non_finite(), None);
        // Negative values are finite and are left to the step functions.
        let p = PlanetParameters {
            planet_radius: -1.0,
            ..PlanetParameters::default()
        };
        assert_eq!(p.first_non_finite(), None);
    }

    #[test]
    fn test_first_non_finite_reports_field() {
        let p = PlanetParameters {
            eccentricity: f64::NAN,
            stellar_radius: f64::INFINITY,
            ..PlanetParameters::default()
        };
        assert_eq!(p.first_non_finite(), Some("eccentricity"));
    }

    #[test]
    fn test_camel_case_wire_names() {
        let json = serde_json::to_value(PlanetParameters::earth()).unwrap();
        assert_eq!(json["planetRadius"], 1.0);
        assert_eq!(json["equilibriumTemperature"], 288.0);
        assert_eq!(json["stellarRadius"], 1.0);
    }

    #[test]
    fn test_accepts_short_temperature_name() {
        let p: PlanetParameters = serde_json::from_str(
            r#"{"planetRadius":1.0,"orbitalPeriod":365,"stellarMass":1.0,
                "equilibriumTemp":288,"eccentricity":0.1,"stellarRadius":1.0}"#,
        )
        .unwrap();
        assert_eq!(p, PlanetParameters::default());
    }
}
