use dns01_core::{Dns01Error, Result};

/// Splits a fully-qualified record name into its zone-relative label.
///
/// Providers that address records relative to the zone apex want
/// `_acme-challenge.www` rather than `_acme-challenge.www.example.com`.
/// The apex itself maps to `@`. A name outside the configured zone is a
/// configuration error, never something to guess about.
pub fn relative_name(name: &str, zone: &str) -> Result<String> {
    let name = name.trim_end_matches('.');
    let zone = zone.trim_end_matches('.');

    if name == zone {
        return Ok("@".to_string());
    }

    name.strip_suffix(zone)
        .and_then(|prefix| prefix.strip_suffix('.'))
        .filter(|label| !label.is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| Dns01Error::Config(format!("record name {name} is not inside zone {zone}")))
}
