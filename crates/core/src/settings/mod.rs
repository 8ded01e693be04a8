pub mod settings_model;
pub mod settings_repository;
pub mod settings_service;

pub use settings_model::{Settings, SettingsUpdate, Theme};
pub use settings_repository::{FileSettingsRepository, SettingsRepositoryTrait};
pub use settings_service::{SettingsService, SettingsServiceTrait};
