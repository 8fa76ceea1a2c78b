//! The data-loading collaborator: where the two sheet exports come from.
//!
//! The derivation engine only ever sees a fully parsed [`Catalog`]; this
//! seam is where an HTTP fetcher for the published spreadsheets would plug
//! in. The repo ships the file-backed source.

use mealpalette_catalog::Catalog;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Both sheets failing is the terminal load error; the caller keeps whatever
/// catalog it already had.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("data source unavailable: {0}")]
    Unavailable(SourceError),

    #[error("data source unavailable (primary: {primary}; fallback: {fallback})")]
    UnavailableWithFallback {
        primary: SourceError,
        fallback: SourceError,
    },
}

/// The raw text of the two sheets, fetched together so the catalog can be
/// rebuilt in one atomic swap.
#[derive(Debug, Clone)]
pub struct RawSheets {
    pub meals_csv: String,
    pub inventory_csv: String,
}

pub trait CatalogSource {
    fn fetch(&self) -> Result<RawSheets, SourceError>;

    /// Short description for log lines.
    fn describe(&self) -> String;
}

/// Reads the two sheets from local CSV files.
#[derive(Debug, Clone)]
pub struct FileSource {
    meals: PathBuf,
    inventory: PathBuf,
}

impl FileSource {
    pub fn new(meals: impl Into<PathBuf>, inventory: impl Into<PathBuf>) -> Self {
        FileSource {
            meals: meals.into(),
            inventory: inventory.into(),
        }
    }
}

impl CatalogSource for FileSource {
    fn fetch(&self) -> Result<RawSheets, SourceError> {
        Ok(RawSheets {
            meals_csv: read_file(&self.meals)?,
            inventory_csv: read_file(&self.inventory)?,
        })
    }

    fn describe(&self) -> String {
        format!("{}, {}", self.meals.display(), self.inventory.display())
    }
}

fn read_file(path: &Path) -> Result<String, SourceError> {
    std::fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: path.display().to_string(),
        source,
    })
}

/// Fetch and parse a catalog, trying `primary` first and `fallback` when the
/// primary is unavailable. Parsing itself never fails; only fetching can.
pub fn load_catalog(
    primary: &dyn CatalogSource,
    fallback: Option<&dyn CatalogSource>,
) -> Result<Catalog, LoadError> {
    let sheets = match primary.fetch() {
        Ok(sheets) => sheets,
        Err(primary_err) => {
            let Some(fallback) = fallback else {
                return Err(LoadError::Unavailable(primary_err));
            };
            tracing::warn!(
                source = primary.describe(),
                error = %primary_err,
                "primary data source failed, trying fallback"
            );
            fallback
                .fetch()
                .map_err(|fallback_err| LoadError::UnavailableWithFallback {
                    primary: primary_err,
                    fallback: fallback_err,
                })?
        }
    };

    let catalog = Catalog::from_csv(&sheets.meals_csv, &sheets.inventory_csv);
    tracing::info!(
        meals = catalog.meals().len(),
        inventory_items = catalog.inventory().len(),
        "catalog loaded"
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticSource(&'static str, &'static str);

    impl CatalogSource for StaticSource {
        fn fetch(&self) -> Result<RawSheets, SourceError> {
            Ok(RawSheets {
                meals_csv: self.0.to_string(),
                inventory_csv: self.1.to_string(),
            })
        }

        fn describe(&self) -> String {
            "static".to_string()
        }
    }

    struct BrokenSource;

    impl CatalogSource for BrokenSource {
        fn fetch(&self) -> Result<RawSheets, SourceError> {
            Err(SourceError::Read {
                path: "nowhere".to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        }

        fn describe(&self) -> String {
            "broken".to_string()
        }
    }

    const MEALS: &str = "name,ingredients\nToast,bread\n";
    const INVENTORY: &str = "name,category,location,quantity,expires_soon\nbread,carb,counter,2,false\n";

    #[test]
    fn test_primary_source_wins() {
        let catalog = load_catalog(&StaticSource(MEALS, INVENTORY), Some(&BrokenSource)).unwrap();
        assert_eq!(catalog.meals().len(), 1);
    }

    #[test]
    fn test_fallback_used_when_primary_fails() {
        let catalog = load_catalog(&BrokenSource, Some(&StaticSource(MEALS, INVENTORY))).unwrap();
        assert_eq!(catalog.meals().len(), 1);
        assert_eq!(catalog.info_of("bread").quantity, 2);
    }

    #[test]
    fn test_both_failing_is_terminal() {
        let err = load_catalog(&BrokenSource, Some(&BrokenSource)).unwrap_err();
        assert!(matches!(err, LoadError::UnavailableWithFallback { .. }));
    }

    #[test]
    fn test_no_fallback_configured() {
        let err = load_catalog(&BrokenSource, None).unwrap_err();
        assert!(matches!(err, LoadError::Unavailable(_)));
    }

    #[test]
    fn test_file_source_reports_path() {
        let source = FileSource::new("no/such/meals.csv", "no/such/inventory.csv");
        let err = source.fetch().unwrap_err();
        let SourceError::Read { path, .. } = err;
        assert!(path.contains("meals.csv"));
    }
}
