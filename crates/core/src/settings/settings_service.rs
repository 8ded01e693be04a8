use std::sync::Arc;

use crate::errors::Result;
use crate::settings::settings_repository::SettingsRepositoryTrait;
use crate::settings::{Settings, SettingsUpdate, Theme};

const THEME_KEY: &str = "theme";
const FINNHUB_KEY: &str = "finnhub_api_key";
const ALPHA_VANTAGE_KEY: &str = "alphavantage_api_key";

/// Environment variables consulted when no API key is stored.
const FINNHUB_KEY_ENV: &str = "FINNHUB_API_KEY";
const ALPHA_VANTAGE_KEY_ENV: &str = "ALPHAVANTAGE_API_KEY";

// Define the trait for SettingsService
pub trait SettingsServiceTrait: Send + Sync {
    fn get_settings(&self) -> Result<Settings>;
    fn update_settings(&self, update: &SettingsUpdate) -> Result<Settings>;

    fn get_setting_value(&self, key: &str) -> Result<Option<String>>;
    fn set_setting_value(&self, key: &str, value: &str) -> Result<()>;

    fn theme(&self) -> Result<Theme>;
    fn set_theme(&self, theme: Theme) -> Result<()>;

    /// Resolve the Finnhub API key: stored setting first, then the
    /// `FINNHUB_API_KEY` environment variable.
    fn finnhub_api_key(&self) -> Option<String>;

    /// Resolve the Alpha Vantage API key: stored setting first, then
    /// the `ALPHAVANTAGE_API_KEY` environment variable.
    fn alpha_vantage_api_key(&self) -> Option<String>;
}

pub struct SettingsService {
    repository: Arc<dyn SettingsRepositoryTrait>,
}

impl SettingsService {
    pub fn new(repository: Arc<dyn SettingsRepositoryTrait>) -> Self {
        SettingsService { repository }
    }
}

impl SettingsServiceTrait for SettingsService {
    fn get_settings(&self) -> Result<Settings> {
        let all = self.repository.get_all()?;
        let theme = all
            .get(THEME_KEY)
            .map(|v| parse_theme(v))
            .unwrap_or_default();
        Ok(Settings {
            theme,
            finnhub_api_key: all.get(FINNHUB_KEY).cloned(),
            alpha_vantage_api_key: all.get(ALPHA_VANTAGE_KEY).cloned(),
        })
    }

    fn update_settings(&self, update: &SettingsUpdate) -> Result<Settings> {
        if let Some(theme) = update.theme {
            self.repository.update_setting(THEME_KEY, theme.as_str())?;
        }
        if let Some(ref key) = update.finnhub_api_key {
            self.repository.update_setting(FINNHUB_KEY, key)?;
        }
        if let Some(ref key) = update.alpha_vantage_api_key {
            self.repository.update_setting(ALPHA_VANTAGE_KEY, key)?;
        }
        self.get_settings()
    }

    fn get_setting_value(&self, key: &str) -> Result<Option<String>> {
        self.repository.get_setting(key)
    }

    fn set_setting_value(&self, key: &str, value: &str) -> Result<()> {
        self.repository.update_setting(key, value)
    }

    fn theme(&self) -> Result<Theme> {
        Ok(self
            .repository
            .get_setting(THEME_KEY)?
            .map(|v| parse_theme(&v))
            .unwrap_or_default())
    }

    fn set_theme(&self, theme: Theme) -> Result<()> {
        self.repository.update_setting(THEME_KEY, theme.as_str())
    }

    fn finnhub_api_key(&self) -> Option<String> {
        self.repository
            .get_setting(FINNHUB_KEY)
            .ok()
            .flatten()
            .or_else(|| std::env::var(FINNHUB_KEY_ENV).ok())
    }

    fn alpha_vantage_api_key(&self) -> Option<String> {
        self.repository
            .get_setting(ALPHA_VANTAGE_KEY)
            .ok()
            .flatten()
            .or_else(|| std::env::var(ALPHA_VANTAGE_KEY_ENV).ok())
    }
}

/// Unknown stored values fall back to the default theme.
fn parse_theme(value: &str) -> Theme {
    match value {
        "light" => Theme::Light,
        _ => Theme::Dark,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::settings_repository::FileSettingsRepository;

    fn service(dir: &tempfile::TempDir) -> SettingsService {
        let repo = Arc::new(FileSettingsRepository::new(dir.path().join("settings.json")));
        SettingsService::new(repo)
    }

    #[test]
    fn test_theme_defaults_to_dark() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(&dir);
        assert_eq!(svc.theme().unwrap(), Theme::Dark);
    }

    #[test]
    fn test_theme_update_persists() {
        let dir = tempfile::tempdir().unwrap();
        service(&dir).set_theme(Theme::Light).unwrap();

        let reloaded = service(&dir);
        assert_eq!(reloaded.theme().unwrap(), Theme::Light);
    }

    #[test]
    fn test_partial_update_leaves_other_fields() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(&dir);

        svc.update_settings(&SettingsUpdate {
            finnhub_api_key: Some("fh-key".to_string()),
            ..Default::default()
        })
        .unwrap();
        let settings = svc
            .update_settings(&SettingsUpdate {
                theme: Some(Theme::Light),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(settings.finnhub_api_key.as_deref(), Some("fh-key"));
        assert_eq!(settings.theme, Theme::Light);
    }

    #[test]
    fn test_stored_key_wins_over_environment() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(&dir);

        svc.set_setting_value("finnhub_api_key", "stored-key").unwrap();
        assert_eq!(svc.finnhub_api_key().as_deref(), Some("stored-key"));
    }

    #[test]
    fn test_generic_accessors_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(&dir);

        assert!(svc.get_setting_value("refresh_interval").unwrap().is_none());
        svc.set_setting_value("refresh_interval", "30").unwrap();
        assert_eq!(
            svc.get_setting_value("refresh_interval").unwrap().as_deref(),
            Some("30")
        );
    }
}
