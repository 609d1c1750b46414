//! Deep links into external navigation applications.
//!
//! The server never talks to these applications; it hands the client a
//! URL (via a redirect) and the navigation app takes over.

use url::Url;

const GOOGLE_MAPS_DIR_URL: &str = "https://www.google.com/maps/dir/";
const WAZE_URL: &str = "https://waze.com/ul";

/// Build a Google Maps directions deep link for an ordered address list.
///
/// - empty list: `None`
/// - one address: destination-only link
/// - more: origin = first, destination = last, the rest as ordered
///   waypoints (`|`-separated)
#[must_use]
pub fn google_maps_url(addresses: &[String]) -> Option<Url> {
    let (first, rest) = addresses.split_first()?;

    let mut url = Url::parse(GOOGLE_MAPS_DIR_URL).ok()?;

    match rest.split_last() {
        None => {
            url.query_pairs_mut()
                .append_pair("api", "1")
                .append_pair("destination", first);
        }
        Some((last, middle)) => {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("api", "1")
                .append_pair("origin", first)
                .append_pair("destination", last);
            if !middle.is_empty() {
                pairs.append_pair("waypoints", &middle.join("|"));
            }
        }
    }

    Some(url)
}

/// Build a Waze deep link for a single destination.
#[must_use]
pub fn waze_url(address: &str) -> Url {
    let mut url = Url::parse(WAZE_URL).unwrap_or_else(|_| unreachable!("static URL parses"));
    url.query_pairs_mut()
        .append_pair("q", address)
        .append_pair("navigate", "yes");
    url
}
