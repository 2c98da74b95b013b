//! Settings Repository (Singleton)

use std::path::PathBuf;
use std::sync::Arc;

use shared::models::{PublicSettings, Settings, SettingsPatch};
use tokio::sync::Mutex;

use super::RepoResult;
use crate::db::json_file::{read_json, write_json_atomic};
use crate::utils::validation::validate_email_list;

#[derive(Clone)]
pub struct SettingsRepository {
    inner: Arc<Inner>,
}

struct Inner {
    path: PathBuf,
    settings: Mutex<Settings>,
}

impl SettingsRepository {
    /// Load `settings.json`, writing the defaults on first boot
    pub async fn open(path: impl Into<PathBuf>) -> RepoResult<Self> {
        let path = path.into();
        let settings = match read_json::<Settings>(&path).await? {
            Some(settings) => settings,
            None => {
                let settings = Settings::default();
                write_json_atomic(&path, &settings).await?;
                tracing::info!(path = %path.display(), "Created default settings file");
                settings
            }
        };

        Ok(Self {
            inner: Arc::new(Inner {
                path,
                settings: Mutex::new(settings),
            }),
        })
    }

    /// Current settings document
    pub async fn get(&self) -> Settings {
        self.inner.settings.lock().await.clone()
    }

    /// Fields safe to show unauthenticated visitors
    pub async fn public_view(&self) -> PublicSettings {
        PublicSettings::from(&*self.inner.settings.lock().await)
    }

    /// Merge a partial update and persist it
    ///
    /// The in-memory document only changes once the file is installed.
    pub async fn merge_update(&self, patch: SettingsPatch) -> RepoResult<Settings> {
        if let Some(emails) = &patch.notification_emails {
            validate_email_list(emails)?;
        }

        let mut current = self.inner.settings.lock().await;
        let mut next = current.clone();
        next.merge(patch);

        write_json_atomic(&self.inner.path, &next).await?;
        *current = next.clone();

        tracing::info!("Settings updated");
        Ok(next)
    }
}
