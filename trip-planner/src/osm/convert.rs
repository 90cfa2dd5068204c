//! Conversion from OSM-family DTOs to domain types.
//!
//! Category mapping is table-driven: an OSM tag or a Wikipedia title word is
//! looked up in a static list, first match wins.

use crate::domain::{Category, LatLon, LodgingOption, PoiSource, PointOfInterest};
use crate::planner::{PlaceName, ProviderError};

use super::types::{NominatimPlace, OverpassElement, WikiGeoSearchHit};

/// Matches every value of the tag key.
const ANY: &str = "*";

/// OSM `(key, value, category)` for attractions, in match order.
pub const ATTRACTION_TAGS: &[(&str, &str, Category)] = &[
    ("tourism", "museum", Category::Museum),
    ("tourism", "gallery", Category::Museum),
    ("tourism", "zoo", Category::Zoo),
    ("tourism", "aquarium", Category::Zoo),
    ("tourism", "theme_park", Category::Entertainment),
    ("tourism", "viewpoint", Category::Viewpoint),
    ("tourism", "artwork", Category::Cultural),
    ("tourism", "picnic_site", Category::Park),
    ("tourism", "attraction", Category::Attraction),
    ("historic", ANY, Category::Cultural),
    ("amenity", "theatre", Category::Entertainment),
    ("amenity", "arts_centre", Category::Cultural),
    ("leisure", "water_park", Category::Family),
    ("leisure", "playground", Category::Family),
    ("leisure", "nature_reserve", Category::Nature),
    ("leisure", "park", Category::Park),
    ("natural", "peak", Category::Nature),
    ("natural", "waterfall", Category::Nature),
    ("natural", "beach", Category::Nature),
    ("boundary", "national_park", Category::Nature),
];

/// OSM `(key, value, category)` for places to eat.
pub const FOOD_TAGS: &[(&str, &str, Category)] = &[
    ("amenity", "restaurant", Category::Food),
    ("amenity", "cafe", Category::Food),
    ("amenity", "fast_food", Category::Food),
    ("amenity", "pub", Category::Food),
];

/// OSM `(key, value, category)` for places to stay.
pub const LODGING_TAGS: &[(&str, &str, Category)] = &[
    ("tourism", "hotel", Category::Hotel),
    ("tourism", "motel", Category::Motel),
    ("tourism", "guest_house", Category::Guesthouse),
    ("tourism", "chalet", Category::Guesthouse),
    ("tourism", "hostel", Category::Hostel),
    ("tourism", "camp_site", Category::Campground),
];

/// Title words that hint at a Wikipedia article's category, in match order.
pub const WIKI_TITLE_WORDS: &[(&str, Category)] = &[
    ("museum", Category::Museum),
    ("gallery", Category::Museum),
    ("zoo", Category::Zoo),
    ("aquarium", Category::Zoo),
    ("castle", Category::Cultural),
    ("cathedral", Category::Cultural),
    ("church", Category::Cultural),
    ("abbey", Category::Cultural),
    ("monument", Category::Cultural),
    ("memorial", Category::Cultural),
    ("fort", Category::Cultural),
    ("theatre", Category::Entertainment),
    ("theater", Category::Entertainment),
    ("falls", Category::Nature),
    ("lake", Category::Nature),
    ("mountain", Category::Nature),
    ("canyon", Category::Nature),
    ("forest", Category::Nature),
    ("overlook", Category::Viewpoint),
    ("viewpoint", Category::Viewpoint),
    ("park", Category::Park),
];

/// Category of an OSM element according to `table`.
pub fn category_from_tags(element: &OverpassElement, table: &[(&str, &str, Category)]) -> Option<Category> {
    table.iter().find_map(|&(key, value, category)| {
        let tag = element.tags.get(key)?;
        (value == ANY || tag == value).then_some(category)
    })
}

/// Overpass filter clauses for `table`, one per tag key.
///
/// e.g. `["tourism"~"^(hotel|motel)$"]`, or `["historic"]` for a wildcard.
pub fn tag_filters(table: &[(&str, &str, Category)]) -> Vec<String> {
    let mut keys: Vec<&str> = Vec::new();
    for &(key, _, _) in table {
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys.into_iter()
        .map(|key| {
            let values: Vec<&str> = table
                .iter()
                .filter(|(k, _, _)| *k == key)
                .map(|&(_, v, _)| v)
                .collect();
            if values.contains(&ANY) {
                format!("[\"{key}\"]")
            } else {
                format!("[\"{key}\"~\"^({})$\"]", values.join("|"))
            }
        })
        .collect()
}

/// Position of an element: its own for nodes, its centre otherwise.
pub fn element_position(element: &OverpassElement) -> Option<LatLon> {
    match (element.lat, element.lon, element.center) {
        (Some(lat), Some(lon), _) => Some(LatLon::new(lat, lon)),
        (_, _, Some(c)) => Some(LatLon::new(c.lat, c.lon)),
        _ => None,
    }
}

pub fn element_url(element: &OverpassElement) -> String {
    format!(
        "https://www.openstreetmap.org/{}/{}",
        element.element_type, element.id
    )
}

fn element_name(element: &OverpassElement) -> Option<&str> {
    element
        .tags
        .get("name")
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
}

/// Leading star count from a `stars` tag such as `"4"`, `"3S"` or `"4.5"`.
pub fn parse_stars(raw: &str) -> Option<u8> {
    let digits: String = raw.trim().chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok().filter(|s| (1..=7).contains(s))
}

/// Convert an Overpass element to a lodging option near `from`.
///
/// Unnamed or unpositioned elements are skipped.
pub fn to_lodging(element: &OverpassElement, from: LatLon) -> Option<LodgingOption> {
    let title = element_name(element)?;
    let position = element_position(element)?;
    let category = category_from_tags(element, LODGING_TAGS).unwrap_or(Category::Hotel);
    let phone = element
        .tags
        .get("phone")
        .or_else(|| element.tags.get("contact:phone"))
        .cloned();

    Some(LodgingOption {
        title: title.to_string(),
        lat: position.lat,
        lon: position.lon,
        distance_meters: from.haversine_m(&position),
        category,
        stars: element.tags.get("stars").and_then(|s| parse_stars(s)),
        phone,
        source: PoiSource::Osm,
    })
}

/// Convert an Overpass element to a point of interest near `from`.
pub fn to_poi(
    element: &OverpassElement,
    from: LatLon,
    table: &[(&str, &str, Category)],
) -> Option<PointOfInterest> {
    let title = element_name(element)?;
    let position = element_position(element)?;
    let category = category_from_tags(element, table).unwrap_or(Category::Attraction);

    Some(PointOfInterest {
        title: title.to_string(),
        lat: position.lat,
        lon: position.lon,
        distance_meters: from.haversine_m(&position),
        category,
        source: PoiSource::Osm,
        url: Some(element_url(element)),
    })
}

/// Guess a category from an article title's words.
pub fn category_from_title(title: &str) -> Category {
    let words: Vec<String> = title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();
    WIKI_TITLE_WORDS
        .iter()
        .find(|(word, _)| words.iter().any(|w| w == word))
        .map_or(Category::Attraction, |&(_, category)| category)
}

pub fn wiki_to_poi(hit: &WikiGeoSearchHit, base_url: &str) -> PointOfInterest {
    PointOfInterest {
        title: hit.title.clone(),
        lat: hit.lat,
        lon: hit.lon,
        distance_meters: hit.dist,
        category: category_from_title(&hit.title),
        source: PoiSource::Wikipedia,
        url: Some(format!("{base_url}/?curid={}", hit.pageid)),
    }
}

/// Parse Nominatim's string coordinates.
pub fn place_position(place: &NominatimPlace) -> Result<LatLon, ProviderError> {
    let lat: f64 = place.lat.trim().parse().map_err(|_| ProviderError::Json {
        message: format!("bad latitude {:?}", place.lat),
    })?;
    let lon: f64 = place.lon.trim().parse().map_err(|_| ProviderError::Json {
        message: format!("bad longitude {:?}", place.lon),
    })?;
    LatLon::parse(lat, lon).map_err(|e| ProviderError::Json {
        message: e.to_string(),
    })
}

/// Short name (the settlement) and full address of a Nominatim result.
pub fn place_name(place: &NominatimPlace) -> Option<PlaceName> {
    let display = place.display_name.as_deref().map(str::trim).unwrap_or("");
    let settlement = place.address.as_ref().and_then(|a| {
        [
            &a.city,
            &a.town,
            &a.village,
            &a.hamlet,
            &a.municipality,
            &a.county,
        ]
        .into_iter()
        .find_map(|part| part.as_deref())
    });

    let name = match settlement {
        Some(name) => name.to_string(),
        None => display.split(',').next()?.trim().to_string(),
    };
    if name.is_empty() {
        return None;
    }

    let full_address = if display.is_empty() {
        name.clone()
    } else {
        display.to_string()
    };
    Some(PlaceName { name, full_address })
}
