use crate::assets::loader::ResourceLoader;
use crate::error::ResourceError;

/// Looks up translated strings in loaded locale tables.
#[derive(Debug, Clone)]
pub struct Locale {
    language: String,
}

impl Locale {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Text for `key` in the current language from the locale `locale_name`.
    ///
    /// A key or language missing from the table yields `"<locale_name>.<key>"`.
    /// A locale that was never loaded is an error.
    pub fn get(&self, loader: &ResourceLoader, locale_name: &str, key: &str) -> Result<String, ResourceError> {
        let table = loader.get_locale_by_name(locale_name)?;
        Ok(table
            .get(key)
            .and_then(|translations| translations.get(&self.language))
            .cloned()
            .unwrap_or_else(|| format!("{locale_name}.{key}")))
    }

    /// Like [`Locale::get`], but an unavailable locale also falls back to the key.
    pub fn get_or_key(&self, loader: &ResourceLoader, locale_name: &str, key: &str) -> String {
        self.get(loader, locale_name, key).unwrap_or_else(|err| {
            log::warn!("{err}");
            format!("{locale_name}.{key}")
        })
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new("en")
    }
}
