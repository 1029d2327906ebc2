use crate::domain::model::{ClothingItem, TagRecord};
use crate::domain::ports::{CatalogSource, ClosetSettings};
use crate::utils::error::{FitError, Result};
use crate::utils::validation::validate_non_empty_string;
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

pub const DEFAULT_RECORD_EXTENSION: &str = "json";

/// A record that was skipped during loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    pub file: String,
    pub reason: String,
}

impl LoadWarning {
    pub fn into_error(self) -> FitError {
        FitError::MalformedRecord {
            file: self.file,
            reason: self.reason,
        }
    }
}

impl std::fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Could not decode {}: {}", self.file, self.reason)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub items: Vec<ClothingItem>,
    pub warnings: Vec<LoadWarning>,
}

/// Reads every `*.<extension>` file in `folder` as one clothing record.
///
/// Bad records are skipped with a warning. A missing folder is an error.
pub fn load_catalog(folder: &Path, extension: &str) -> Result<LoadReport> {
    let entries = match fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound || folder.is_file() => {
            return Err(FitError::CatalogNotFound {
                path: folder.display().to_string(),
            })
        }
        Err(e) => return Err(FitError::IoError(e)),
    };

    let suffix = format!(".{}", extension);
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if file_name.ends_with(&suffix) && entry.path().is_file() {
            files.push((file_name, entry.path()));
        }
    }
    // 依檔名排序，固定種子時結果可重現
    files.sort_by(|a, b| a.0.cmp(&b.0));

    let mut report = LoadReport::default();
    for (file_name, path) in files {
        match read_record(&path) {
            Ok(item) => {
                tracing::debug!("Loaded {} from {}", item, file_name);
                report.items.push(item);
            }
            Err(reason) => {
                let warning = LoadWarning {
                    file: file_name,
                    reason,
                };
                tracing::warn!("{}", warning);
                report.warnings.push(warning);
            }
        }
    }

    tracing::info!(
        "Loaded {} clothing items from {} ({} skipped)",
        report.items.len(),
        folder.display(),
        report.warnings.len()
    );

    Ok(report)
}

fn read_record(path: &Path) -> std::result::Result<ClothingItem, String> {
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    match serde_json::from_str::<Value>(&content).map_err(|e| e.to_string())? {
        Value::Object(fields) => Ok(ClothingItem::from_fields(&fields)),
        other => Err(format!("expected a JSON object, found {}", json_kind(&other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Catalog backed by a directory of per-item JSON records.
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    folder: PathBuf,
    extension: String,
}

impl DirectoryCatalog {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            extension: DEFAULT_RECORD_EXTENSION.to_string(),
        }
    }

    pub fn from_settings<C: ClosetSettings>(settings: &C) -> Self {
        Self {
            folder: PathBuf::from(settings.closet_path()),
            extension: settings.record_extension().trim_start_matches('.').to_string(),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn record_path(&self, stem: &str) -> PathBuf {
        self.folder.join(format!("{}.{}", stem, self.extension))
    }

    /// Stores a tagged record as `<folder>/<stem>.<extension>`, creating the
    /// folder if needed. An existing record is never replaced.
    pub fn add(&self, record: &TagRecord, stem: &str) -> Result<PathBuf> {
        self.store(record, stem, false)
    }

    /// Like [`DirectoryCatalog::add`] but replaces an existing record.
    pub fn overwrite(&self, record: &TagRecord, stem: &str) -> Result<PathBuf> {
        self.store(record, stem, true)
    }

    fn store(&self, record: &TagRecord, stem: &str, replace: bool) -> Result<PathBuf> {
        validate_record_stem(stem)?;
        fs::create_dir_all(&self.folder)?;

        let path = self.record_path(stem);
        let mut options = OpenOptions::new();
        options.write(true);
        if replace {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }

        let mut file = match options.open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(FitError::RecordExists {
                    path: path.display().to_string(),
                })
            }
            Err(e) => return Err(FitError::IoError(e)),
        };
        let content = serde_json::to_string_pretty(record)?;
        file.write_all(content.as_bytes())?;

        tracing::info!("Saved {} {} to {}", record.color, record.item_type, path.display());
        Ok(path)
    }
}

fn validate_record_stem(stem: &str) -> Result<()> {
    validate_non_empty_string("stem", stem)?;
    if stem.contains(&['/', '\\'][..]) || stem == "." || stem == ".." {
        return Err(FitError::InvalidConfigValueError {
            field: "stem".to_string(),
            value: stem.to_string(),
            reason: "Record name must not contain path separators".to_string(),
        });
    }
    Ok(())
}

impl CatalogSource for DirectoryCatalog {
    fn load(&self) -> Result<LoadReport> {
        load_catalog(&self.folder, &self.extension)
    }

    fn describe(&self) -> String {
        self.folder.display().to_string()
    }
}

/// Immutable snapshot of the loaded inventory.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<ClothingItem>,
}

impl Catalog {
    pub fn new(items: Vec<ClothingItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ClothingItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<LoadReport> for Catalog {
    fn from(report: LoadReport) -> Self {
        Self::new(report.items)
    }
}

/// Shared catalog that readers snapshot and reloads swap wholesale.
///
/// A reader holding a snapshot keeps seeing that catalog in full even if a
/// reload lands mid-request.
#[derive(Debug, Default)]
pub struct CatalogHandle {
    current: RwLock<Arc<Catalog>>,
}

impl CatalogHandle {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    pub fn snapshot(&self) -> Arc<Catalog> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Installs `catalog` and returns the one it replaced.
    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let fresh = Arc::new(catalog);
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        std::mem::replace(&mut *guard, fresh)
    }

    /// Loads from `source` and swaps only if the load succeeded.
    pub fn reload<S: CatalogSource + ?Sized>(&self, source: &S) -> Result<LoadReport> {
        let report = source.load()?;
        self.replace(Catalog::new(report.items.clone()));
        Ok(report)
    }
}
