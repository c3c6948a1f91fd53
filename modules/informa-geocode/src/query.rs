use informa_common::GeocodeRequest;

pub const TARGET_COUNTRY: &str = "Jamaica";

/// Used when no location field carries any text.
pub const FALLBACK_QUERY: &str = "Jamaica latitude and longitude coordinates";

/// Build the search query for a request.
///
/// Blank fields are skipped; the rest are joined with `", "` in canonical order.
pub fn build_query(request: &GeocodeRequest) -> String {
    let parts: Vec<&str> = request
        .fields()
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        return FALLBACK_QUERY.to_string();
    }

    format!(
        "latitude and longitude coordinates of {} in {}",
        parts.join(", "),
        TARGET_COUNTRY
    )
}
