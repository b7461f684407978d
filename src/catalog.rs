//! Reference Catalogs
//!
//! Static lookup data consulted for cross-field checks: the valid countries
//! and the major cities registered for each of them.

use std::collections::{BTreeMap, BTreeSet};

/// Country and city reference data
pub trait Catalog: Send + Sync {
    /// Every valid country name
    fn countries(&self) -> Vec<String>;

    /// Cities registered for `country`, or `None` when it has no list
    fn cities_for(&self, country: &str) -> Option<Vec<String>>;

    /// Every city across all countries, sorted and deduplicated
    fn all_cities(&self) -> Vec<String>;

    fn has_country(&self, country: &str) -> bool {
        self.countries().iter().any(|c| c == country)
    }
}

/// Major countries and their best-known cities
const COUNTRY_TO_CITIES: &[(&str, &[&str])] = &[
    (
        "United States",
        &[
            "New York",
            "Los Angeles",
            "San Francisco",
            "Seattle",
            "Chicago",
            "Boston",
            "Houston",
            "Miami",
        ],
    ),
    ("Canada", &["Toronto", "Vancouver", "Montreal", "Ottawa"]),
    ("Mexico", &["Mexico City", "Guadalajara", "Monterrey"]),
    ("Brazil", &["São Paulo", "Rio de Janeiro", "Brasília"]),
    ("Argentina", &["Buenos Aires", "Cordoba", "Rosario"]),
    ("Chile", &["Santiago", "Valparaiso"]),
    ("Colombia", &["Bogotá", "Medellín", "Cali"]),
    ("Peru", &["Lima", "Cusco"]),
    ("Venezuela", &["Caracas", "Maracaibo"]),
    ("Uruguay", &["Montevideo"]),
    ("Paraguay", &["Asunción"]),
    ("Ecuador", &["Quito", "Guayaquil"]),
    ("United Kingdom", &["London", "Manchester", "Birmingham", "Edinburgh"]),
    ("Ireland", &["Dublin", "Cork"]),
    ("France", &["Paris", "Lyon", "Marseille"]),
    ("Germany", &["Berlin", "Munich", "Frankfurt", "Hamburg"]),
    ("Spain", &["Madrid", "Barcelona", "Valencia", "Seville"]),
    ("Portugal", &["Lisbon", "Porto"]),
    ("Italy", &["Rome", "Milan", "Florence", "Naples"]),
    ("Netherlands", &["Amsterdam", "Rotterdam", "Utrecht"]),
    ("Belgium", &["Brussels", "Antwerp"]),
    ("Luxembourg", &["Luxembourg City"]),
    ("Switzerland", &["Zurich", "Geneva", "Basel"]),
    ("Austria", &["Vienna", "Salzburg"]),
    ("Monaco", &["Monaco"]),
    ("Liechtenstein", &["Vaduz"]),
    ("Norway", &["Oslo", "Bergen"]),
    ("Sweden", &["Stockholm", "Gothenburg"]),
    ("Finland", &["Helsinki", "Tampere"]),
    ("Denmark", &["Copenhagen", "Aarhus"]),
    ("Iceland", &["Reykjavik"]),
    ("Poland", &["Warsaw", "Krakow", "Gdansk"]),
    ("Czechia", &["Prague", "Brno"]),
    ("Hungary", &["Budapest", "Debrecen"]),
    ("Romania", &["Bucharest", "Cluj-Napoca"]),
    ("Bulgaria", &["Sofia", "Plovdiv"]),
    ("Slovakia", &["Bratislava", "Košice"]),
    ("Slovenia", &["Ljubljana", "Maribor"]),
    ("Croatia", &["Zagreb", "Split"]),
    ("Greece", &["Athens", "Thessaloniki"]),
    ("Türkiye", &["Istanbul", "Ankara", "Izmir"]),
    ("Ukraine", &["Kyiv", "Lviv"]),
    ("United Arab Emirates", &["Dubai", "Abu Dhabi"]),
    ("Saudi Arabia", &["Riyadh", "Jeddah", "Dammam"]),
    ("Qatar", &["Doha"]),
    ("Kuwait", &["Kuwait City"]),
    ("Oman", &["Muscat"]),
    ("Bahrain", &["Manama"]),
    ("Israel", &["Tel Aviv", "Jerusalem", "Haifa"]),
    ("Egypt", &["Cairo", "Alexandria", "Giza"]),
    ("South Africa", &["Johannesburg", "Cape Town", "Durban"]),
    ("Nigeria", &["Lagos", "Abuja"]),
    ("Kenya", &["Nairobi", "Mombasa"]),
    ("Morocco", &["Casablanca", "Rabat", "Marrakesh"]),
    ("Algeria", &["Algiers", "Oran"]),
    ("Tunisia", &["Tunis", "Sfax"]),
    ("Ethiopia", &["Addis Ababa", "Dire Dawa"]),
    ("Tanzania", &["Dar es Salaam", "Arusha"]),
    ("China", &["Beijing", "Shanghai", "Shenzhen", "Guangzhou", "Chengdu", "Hangzhou", "Wuhan"]),
    ("Japan", &["Tokyo", "Osaka", "Nagoya", "Fukuoka", "Sapporo"]),
    ("South Korea", &["Seoul", "Busan", "Incheon"]),
    ("Hong Kong", &["Hong Kong"]),
    ("Macao", &["Macao"]),
    ("Taiwan", &["Taipei", "Taichung", "Kaohsiung"]),
    ("India", &["New Delhi", "Mumbai", "Bengaluru", "Chennai"]),
    ("Pakistan", &["Karachi", "Lahore", "Islamabad"]),
    ("Bangladesh", &["Dhaka", "Chittagong"]),
    ("Sri Lanka", &["Colombo", "Kandy"]),
    ("Singapore", &["Singapore"]),
    ("Malaysia", &["Kuala Lumpur", "Penang", "Johor Bahru"]),
    ("Thailand", &["Bangkok", "Chiang Mai", "Phuket"]),
    ("Vietnam", &["Hanoi", "Ho Chi Minh City", "Da Nang"]),
    ("Philippines", &["Manila", "Cebu", "Davao"]),
    ("Indonesia", &["Jakarta", "Surabaya", "Bali"]),
    ("Cambodia", &["Phnom Penh", "Siem Reap"]),
    ("Laos", &["Vientiane", "Luang Prabang"]),
    ("Myanmar", &["Yangon", "Mandalay"]),
    ("Mongolia", &["Ulaanbaatar"]),
    ("Nepal", &["Kathmandu", "Pokhara"]),
    ("Australia", &["Sydney", "Melbourne", "Brisbane"]),
    ("New Zealand", &["Auckland", "Wellington", "Christchurch"]),
];

/// The catalog compiled into the crate
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl Catalog for BuiltinCatalog {
    fn countries(&self) -> Vec<String> {
        COUNTRY_TO_CITIES
            .iter()
            .map(|(country, _)| country.to_string())
            .collect()
    }

    fn cities_for(&self, country: &str) -> Option<Vec<String>> {
        COUNTRY_TO_CITIES
            .iter()
            .find(|(name, _)| *name == country)
            .map(|(_, cities)| cities.iter().map(|c| c.to_string()).collect())
    }

    fn all_cities(&self) -> Vec<String> {
        let cities: BTreeSet<&str> = COUNTRY_TO_CITIES
            .iter()
            .flat_map(|(_, cities)| cities.iter().copied())
            .collect();
        cities.into_iter().map(str::to_string).collect()
    }

    fn has_country(&self, country: &str) -> bool {
        COUNTRY_TO_CITIES.iter().any(|(name, _)| *name == country)
    }
}

/// Catalog built at runtime, for deployments with their own reference data
///
/// Countries added without cities have no city list, so their clients only
/// get the soft global-city check.
#[derive(Debug, Clone, Default)]
pub struct MapCatalog {
    countries: BTreeMap<String, Option<Vec<String>>>,
}

impl MapCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a country with its city list
    pub fn with_cities<I, S>(mut self, country: impl Into<String>, cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cities = cities.into_iter().map(Into::into).collect();
        self.countries.insert(country.into(), Some(cities));
        self
    }

    /// Register a country without a city list
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.countries.entry(country.into()).or_insert(None);
        self
    }
}

impl Catalog for MapCatalog {
    fn countries(&self) -> Vec<String> {
        self.countries.keys().cloned().collect()
    }

    fn cities_for(&self, country: &str) -> Option<Vec<String>> {
        self.countries.get(country).cloned().flatten()
    }

    fn all_cities(&self) -> Vec<String> {
        let cities: BTreeSet<&String> = self.countries.values().flatten().flatten().collect();
        cities.into_iter().cloned().collect()
    }

    fn has_country(&self, country: &str) -> bool {
        self.countries.contains_key(country)
    }
}
