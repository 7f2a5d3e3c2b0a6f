use super::{Catalog, CatalogError, CatalogFile};
use std::path::Path;

/// Catalog shipped with the binary
pub const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

impl Catalog {
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(raw)?;
        Catalog::try_from(file)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(raw)?;
        Catalog::try_from(file)
    }

    /// Load a catalog file, picking the parser from the extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            "json" => Self::from_json_str(&raw),
            "toml" => Self::from_toml_str(&raw),
            other => Err(CatalogError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Load the configured catalog, or the built-in one when no path is set
pub fn load_catalog(path: Option<&str>) -> Result<Catalog, CatalogError> {
    let catalog = match path.map(str::trim).filter(|p| !p.is_empty()) {
        Some(path) => {
            tracing::info!("Loading catalog from {}", path);
            Catalog::from_path(path)?
        }
        None => {
            tracing::info!("Loading built-in catalog");
            Catalog::builtin()?
        }
    };

    tracing::debug!(
        "Catalog ready: {} criteria, {} locations",
        catalog.criteria().len(),
        catalog.locations().len()
    );

    Ok(catalog)
}
