use crate::core::Storage;
use crate::utils::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::Dataset;
    use std::io::Write;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_dataset_from_disk() {
        let dir = TempDir::new().unwrap();
        let mut file = std::fs::File::create(dir.path().join("seed.json")).unwrap();
        file.write_all(serde_json::to_string(&Dataset::seed()).unwrap().as_bytes())
            .unwrap();

        let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
        let dataset = Dataset::load(&storage, "seed.json").await.unwrap();

        assert_eq!(dataset, Dataset::seed());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());

        let result = Dataset::load(&storage, "missing.json").await;

        assert!(matches!(
            result,
            Err(crate::utils::error::PricingError::IoError(_))
        ));
    }
}
