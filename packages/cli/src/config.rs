//! Map configuration and catalog loading.
//!
//! Configuration comes from a TOML file named by `--config`, or by the
//! `RENT_MAP_CONFIG` environment variable when the flag is absent. Missing
//! keys fall back to [`MapConfig::default`].

use std::path::{Path, PathBuf};

use rent_map_heatmap_models::MapConfig;
use rent_map_listing::{ListingCatalog, ListingError};
use rent_map_listing_models::Coordinates;

/// Environment variable consulted when `--config` is not given.
pub const CONFIG_ENV: &str = "RENT_MAP_CONFIG";

/// Errors raised while loading configuration or parsing arguments.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file is not valid TOML for the expected shape.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The listing catalog failed validation.
    #[error(transparent)]
    Listing(#[from] ListingError),

    /// A `lat,lng` argument could not be parsed.
    #[error("Invalid center '{input}': expected lat,lng")]
    InvalidCenter { input: String },
}

pub fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the map configuration from `path`, then from [`CONFIG_ENV`], and
/// otherwise returns the defaults.
///
/// # Errors
///
/// * If the file cannot be read or parsed
pub fn load_config(path: Option<&Path>) -> Result<MapConfig, ConfigError> {
    let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);

    let Some(path) = path.map(Path::to_path_buf).or(from_env) else {
        log::debug!("No config file given; using defaults");
        return Ok(MapConfig::default());
    };

    log::info!("Loading map config from {}", path.display());
    parse_config(&read_file(&path)?)
}

/// Parses a map configuration TOML document.
///
/// # Errors
///
/// * If the document is not valid TOML or has mistyped keys
pub fn parse_config(toml_str: &str) -> Result<MapConfig, ConfigError> {
    Ok(toml::de::from_str(toml_str)?)
}

/// Loads the listing catalog from `path`, or the built-in Hanover catalog.
///
/// # Errors
///
/// * If the file cannot be read, parsed, or fails validation
pub fn load_catalog(path: Option<&Path>) -> Result<ListingCatalog, ConfigError> {
    let Some(path) = path else {
        return Ok(ListingCatalog::hanover());
    };

    log::info!("Loading listings from {}", path.display());
    Ok(ListingCatalog::from_toml(&read_file(path)?)?)
}

/// Parses a `lat,lng` pair.
///
/// # Errors
///
/// * If the input is not two comma-separated numbers forming a valid
///   coordinate
pub fn parse_center(input: &str) -> Result<Coordinates, ConfigError> {
    let invalid = || ConfigError::InvalidCenter {
        input: input.to_string(),
    };

    let (lat, lng) = input.split_once(',').ok_or_else(invalid)?;
    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let lng: f64 = lng.trim().parse().map_err(|_| invalid())?;

    let center = Coordinates::new(lat, lng);
    if !center.is_valid() {
        return Err(invalid());
    }

    Ok(center)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = parse_config("selectedZoom = 15.0\nrecenterOnSelect = false\n").unwrap();
        assert!((config.selected_zoom - 15.0).abs() < f64::EPSILON);
        assert!(!config.recenter_on_select);
        assert!((config.initial_zoom - 13.0).abs() < f64::EPSILON);
        assert!((config.width - 1232.0).abs() < f64::EPSILON);
    }

    #[test]
    fn campus_table() {
        let config = parse_config("[campus]\nlat = 40.0\nlng = -74.0\n").unwrap();
        assert_eq!(config.campus, Coordinates::new(40.0, -74.0));
    }

    #[test]
    fn empty_config_is_default() {
        assert_eq!(parse_config("").unwrap(), MapConfig::default());
    }

    #[test]
    fn mistyped_config_is_rejected() {
        assert!(matches!(
            parse_config("initialZoom = \"high\""),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_config(Some(Path::new("/nonexistent/rent_map.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/rent_map.toml"));
    }

    #[test]
    fn default_catalog() {
        assert_eq!(load_catalog(None).unwrap().len(), 30);
    }

    #[test]
    fn parses_center() {
        let center = parse_center("43.7044, -72.2887").unwrap();
        assert_eq!(center, Coordinates::new(43.7044, -72.2887));
    }

    #[test]
    fn rejects_bad_centers() {
        for input in ["43.7", "north,west", "95.0,-72.0", "43.7,-72.2,1"] {
            assert!(
                matches!(parse_center(input), Err(ConfigError::InvalidCenter { .. })),
                "{input}"
            );
        }
    }
}
