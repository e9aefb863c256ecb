// SPDX-License-Identifier: MPL-2.0
use crate::config::Config;
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use unic_langid::{langid, LanguageIdentifier};

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

/// Locale used when nothing else matches.
#[must_use]
pub fn default_locale() -> LanguageIdentifier {
    langid!("en-US")
}

pub struct I18n {
    bundles: HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    pub available_locales: Vec<LanguageIdentifier>,
    current_locale: LanguageIdentifier,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(None, &Config::default())
    }
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("available_locales", &self.available_locales)
            .field("current_locale", &self.current_locale)
            .finish_non_exhaustive()
    }
}

impl I18n {
    pub fn new(cli_lang: Option<String>, config: &Config) -> Self {
        let mut bundles = HashMap::new();
        let mut available_locales = Vec::new();

        for file in Asset::iter() {
            let filename = file.as_ref();
            let Some(locale) = filename
                .strip_suffix(".ftl")
                .and_then(|stem| stem.parse::<LanguageIdentifier>().ok())
            else {
                continue;
            };
            let Some(content) = Asset::get(filename) else {
                continue;
            };

            let source = String::from_utf8_lossy(content.data.as_ref()).to_string();
            let resource = match FluentResource::try_new(source) {
                Ok(resource) => resource,
                Err((resource, errors)) => {
                    log::error!("{filename}: {} parse errors, keeping valid entries", errors.len());
                    resource
                }
            };

            let mut bundle = FluentBundle::new(vec![locale.clone()]);
            bundle.set_use_isolating(false);
            if let Err(errors) = bundle.add_resource(resource) {
                log::error!("{filename}: {} duplicate messages", errors.len());
            }
            bundles.insert(locale.clone(), bundle);
            available_locales.push(locale);
        }
        available_locales.sort_by_key(ToString::to_string);

        let current_locale =
            resolve_locale(cli_lang, config, &available_locales).unwrap_or_else(default_locale);
        log::debug!("using locale {current_locale}");

        Self {
            bundles,
            available_locales,
            current_locale,
        }
    }

    pub fn set_locale(&mut self, locale: LanguageIdentifier) {
        if self.bundles.contains_key(&locale) {
            self.current_locale = locale;
        }
    }

    #[must_use]
    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }

    pub fn tr(&self, key: &str) -> String {
        self.format(key, None)
    }

    /// Translates `key` with named arguments (`{ $name }` in the `.ftl`).
    pub fn tr_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, FluentValue::from(*value));
        }
        self.format(key, Some(&fluent_args))
    }

    fn format(&self, key: &str, args: Option<&FluentArgs>) -> String {
        if let Some(bundle) = self.bundles.get(&self.current_locale) {
            if let Some(msg) = bundle.get_message(key) {
                if let Some(pattern) = msg.value() {
                    let mut errors = vec![];
                    let value = bundle.format_pattern(pattern, args, &mut errors);
                    if errors.is_empty() {
                        return value.to_string();
                    }
                    log::warn!("formatting {key}: {errors:?}");
                }
            }
        }
        format!("MISSING: {key}")
    }
}

fn resolve_locale(
    cli_lang: Option<String>,
    config: &Config,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    let pick = |lang_str: &str| {
        lang_str
            .parse::<LanguageIdentifier>()
            .ok()
            .filter(|lang| available.contains(lang))
    };

    // 1. CLI
    if let Some(lang) = cli_lang.as_deref().and_then(pick) {
        return Some(lang);
    }

    // 2. Config file
    if let Some(lang) = config.general.language.as_deref().and_then(pick) {
        return Some(lang);
    }

    // 3. OS locale
    sys_locale::get_locale().as_deref().and_then(pick)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, GeneralConfig};

    fn available() -> Vec<LanguageIdentifier> {
        vec![langid!("en-US"), langid!("zh-CN")]
    }

    #[test]
    fn resolve_locale_prefers_cli() {
        let config = Config {
            general: GeneralConfig {
                language: Some("en-US".to_string()),
            },
            ..Config::default()
        };
        let lang = resolve_locale(Some("zh-CN".to_string()), &config, &available());
        assert_eq!(lang, Some(langid!("zh-CN")));
    }

    #[test]
    fn resolve_locale_falls_back_to_config() {
        let config = Config {
            general: GeneralConfig {
                language: Some("zh-CN".to_string()),
            },
            ..Config::default()
        };
        let lang = resolve_locale(Some("xx-YY".to_string()), &config, &available());
        assert_eq!(lang, Some(langid!("zh-CN")));
    }

    #[test]
    fn resolve_locale_os_result_is_available() {
        // System dependent: only check that whatever comes back is shipped.
        if let Some(lang) = resolve_locale(None, &Config::default(), &available()) {
            assert!(available().contains(&lang));
        }
    }

    #[test]
    fn bundled_locales_are_loaded() {
        let i18n = I18n::new(Some("en-US".to_string()), &Config::default());
        assert_eq!(i18n.available_locales, available());
        assert_eq!(i18n.current_locale(), &langid!("en-US"));
    }

    #[test]
    fn missing_key_is_marked() {
        let i18n = I18n::new(Some("en-US".to_string()), &Config::default());
        assert_eq!(i18n.tr("no-such-key"), "MISSING: no-such-key");
    }

    #[test]
    fn arguments_are_interpolated() {
        let i18n = I18n::new(Some("en-US".to_string()), &Config::default());
        assert_eq!(
            i18n.tr_with_args("notification-generate-success", &[("count", "3")]),
            "Generated 3 images"
        );
    }

    #[test]
    fn every_english_key_is_translated() {
        let en = I18n::new(Some("en-US".to_string()), &Config::default());
        let mut zh = I18n::new(Some("en-US".to_string()), &Config::default());
        zh.set_locale(langid!("zh-CN"));
        for key in [
            "gallery-empty",
            "notification-nav-first",
            "notification-nav-last",
            "notification-server-error",
        ] {
            assert!(!en.tr(key).starts_with("MISSING"), "{key}");
            assert!(!zh.tr(key).starts_with("MISSING"), "{key}");
        }
    }
}
