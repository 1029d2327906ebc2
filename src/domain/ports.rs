use crate::core::catalog::LoadReport;
use crate::utils::error::Result;

/// Anything that can produce a full catalog snapshot.
pub trait CatalogSource: Send + Sync {
    fn load(&self) -> Result<LoadReport>;
    fn describe(&self) -> String;
}

pub trait ClosetSettings: Send + Sync {
    fn closet_path(&self) -> &str;
    fn record_extension(&self) -> &str;
}
