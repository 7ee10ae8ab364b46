use crate::core::Result;
use crate::modules::locales::repositories::locale_repository::{LocaleRepository, LocaleResource};

/// Locale resource access for payment method strings
pub struct LocaleService {
    repository: LocaleRepository,
}

impl LocaleService {
    pub fn new(repository: LocaleRepository) -> Self {
        Self { repository }
    }

    /// Resource value, or the given default when the resource is not
    /// installed
    pub async fn get_or(&self, name: &str, default: &str) -> Result<String> {
        Ok(self
            .repository
            .get(name)
            .await?
            .unwrap_or_else(|| default.to_string()))
    }

    pub async fn list_by_prefix(&self, prefix: &str) -> Result<Vec<LocaleResource>> {
        self.repository.list_by_prefix(prefix).await
    }

    /// Install or refresh a resource set
    pub async fn install_resources(&self, resources: &[(&str, &str)]) -> Result<()> {
        for (name, value) in resources {
            self.repository.upsert(name, value).await?;
        }
        Ok(())
    }

    /// Remove every resource under a name prefix
    pub async fn delete_by_prefix(&self, prefix: &str) -> Result<u64> {
        self.repository.delete_by_prefix(prefix).await
    }
}
