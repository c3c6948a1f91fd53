use informa_common::WantedPerson;

/// Keep records whose police station and alias contain the given fragments,
/// case-insensitively. Both filters must match. Empty filters are ignored.
pub fn filter_records(
    items: &[WantedPerson],
    station: Option<&str>,
    alias: Option<&str>,
) -> Vec<WantedPerson> {
    let station = station.filter(|s| !s.is_empty()).map(str::to_lowercase);
    let alias = alias.filter(|a| !a.is_empty()).map(str::to_lowercase);

    items
        .iter()
        .filter(|person| {
            contains(person.police_station.as_deref(), station.as_deref())
                && contains(person.alias.as_deref(), alias.as_deref())
        })
        .cloned()
        .collect()
}

fn contains(field: Option<&str>, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(needle) => field.is_some_and(|value| value.to_lowercase().contains(needle)),
    }
}
