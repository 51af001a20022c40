//! Static province/city reference list for the career location fields.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Province {
    pub key: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    pub name: String,
    /// Key of the owning province
    pub province: String,
}

const PHILIPPINE_PROVINCES: &[(&str, &str)] = &[
    ("NCR", "Metro Manila"),
    ("CEB", "Cebu"),
    ("DAS", "Davao del Sur"),
    ("LAG", "Laguna"),
    ("CAV", "Cavite"),
    ("PAM", "Pampanga"),
    ("BEN", "Benguet"),
    ("ILI", "Iloilo"),
];

const PHILIPPINE_CITIES: &[(&str, &str)] = &[
    ("Manila", "NCR"),
    ("Makati", "NCR"),
    ("Quezon City", "NCR"),
    ("Taguig", "NCR"),
    ("Pasig", "NCR"),
    ("Cebu City", "CEB"),
    ("Mandaue", "CEB"),
    ("Lapu-Lapu", "CEB"),
    ("Davao City", "DAS"),
    ("Digos", "DAS"),
    ("Santa Rosa", "LAG"),
    ("Calamba", "LAG"),
    ("San Pedro", "LAG"),
    ("Bacoor", "CAV"),
    ("Imus", "CAV"),
    ("Dasmariñas", "CAV"),
    ("Angeles", "PAM"),
    ("San Fernando", "PAM"),
    ("Baguio", "BEN"),
    ("La Trinidad", "BEN"),
    ("Iloilo City", "ILI"),
    ("Passi", "ILI"),
];

/// Provinces and the cities inside them, in display order
#[derive(Debug, Clone)]
pub struct LocationCatalog {
    provinces: Vec<Province>,
    cities: Vec<City>,
}

impl LocationCatalog {
    pub fn new(provinces: Vec<Province>, cities: Vec<City>) -> Self {
        Self { provinces, cities }
    }

    /// The built-in Philippine reference list
    pub fn philippines() -> Self {
        let provinces = PHILIPPINE_PROVINCES
            .iter()
            .map(|(key, name)| Province {
                key: key.to_string(),
                name: name.to_string(),
            })
            .collect();
        let cities = PHILIPPINE_CITIES
            .iter()
            .map(|(name, province)| City {
                name: name.to_string(),
                province: province.to_string(),
            })
            .collect();
        Self::new(provinces, cities)
    }

    pub fn provinces(&self) -> &[Province] {
        &self.provinces
    }

    /// Cities of the province with the given display name
    pub fn cities_in(&self, province_name: &str) -> Vec<&City> {
        let Some(province) = self.provinces.iter().find(|p| p.name == province_name) else {
            return Vec::new();
        };
        self.cities
            .iter()
            .filter(|c| c.province == province.key)
            .collect()
    }

    pub fn contains(&self, province_name: &str, city_name: &str) -> bool {
        self.cities_in(province_name).iter().any(|c| c.name == city_name)
    }

    /// First province and its first city
    pub fn default_location(&self) -> Option<(&str, &str)> {
        let province = self.provinces.first()?;
        let city = self.cities.iter().find(|c| c.province == province.key)?;
        Some((province.name.as_str(), city.name.as_str()))
    }
}

impl Default for LocationCatalog {
    fn default() -> Self {
        Self::philippines()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cities_follow_their_province() {
        let catalog = LocationCatalog::philippines();
        let names: Vec<&str> = catalog.cities_in("Cebu").iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Cebu City", "Mandaue", "Lapu-Lapu"]);
        assert!(catalog.cities_in("Atlantis").is_empty());
    }

    #[test]
    fn membership_check() {
        let catalog = LocationCatalog::philippines();
        assert!(catalog.contains("Metro Manila", "Makati"));
        assert!(!catalog.contains("Metro Manila", "Cebu City"));
    }

    #[test]
    fn default_is_first_province_and_city() {
        let catalog = LocationCatalog::philippines();
        assert_eq!(catalog.default_location(), Some(("Metro Manila", "Manila")));
        assert_eq!(LocationCatalog::new(Vec::new(), Vec::new()).default_location(), None);
    }
}
