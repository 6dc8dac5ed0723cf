//! Region inference from known city and province names.

use crate::content::model::Region;

/// Known place-name substrings per region, checked in this order.
const REGION_PLACES: &[(Region, &[&str])] = &[
    (
        Region::Luzon,
        &[
            "Manila", "Makati", "Quezon", "Baguio", "Vigan", "Ilocos", "Laoag", "Pagudpud",
            "Batanes", "Sagada", "Banaue", "Tagaytay", "Batangas", "Pampanga", "Clark",
            "Subic", "Zambales", "La Union", "Albay", "Legazpi", "Donsol", "Palawan",
            "El Nido", "Coron", "Puerto Princesa", "Mindoro", "Puerto Galera", "Baler",
        ],
    ),
    (
        Region::Visayas,
        &[
            "Cebu", "Bohol", "Panglao", "Boracay", "Aklan", "Iloilo", "Guimaras", "Bacolod",
            "Negros", "Dumaguete", "Siquijor", "Leyte", "Tacloban", "Samar", "Moalboal",
            "Oslob", "Malapascua", "Bantayan", "Antique", "Capiz",
        ],
    ),
    (
        Region::Mindanao,
        &[
            "Davao", "Siargao", "Surigao", "Cagayan de Oro", "Bukidnon", "Camiguin",
            "Zamboanga", "General Santos", "Dapitan", "Butuan", "Cotabato", "Samal",
            "Lake Sebu", "Iligan", "Tawi-Tawi",
        ],
    ),
];

/// The region whose known place names appear in `name`.
///
/// Matching is a case-sensitive substring test; the first region with a hit
/// wins, otherwise `default`.
///
/// # Examples
///
/// ```
/// use travel_content::content::{infer_region, Region};
///
/// assert_eq!(infer_region("Cebu City", Region::Luzon), Region::Visayas);
/// assert_eq!(infer_region("Somewhere Else", Region::Luzon), Region::Luzon);
/// ```
pub fn infer_region(name: &str, default: Region) -> Region {
    REGION_PLACES
        .iter()
        .find(|(_, places)| places.iter().any(|p| name.contains(p)))
        .map_or(default, |(region, _)| *region)
}
