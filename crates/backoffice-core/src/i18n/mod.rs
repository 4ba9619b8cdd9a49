//! Internationalization and localization.
//!
//! The `en-US` and `zh-CN` catalogs are embedded into the crate.
//! Any `{locale}.ftl` file in the `locale` subdirectory of the config directory
//! adds a new catalog or overrides the messages of an embedded one.

use crate::{
    bail, error::Error, extension::TomlTableExt, state::State, warn, LazyLock, SharedString,
};
use fluent::{bundle::FluentBundle, FluentArgs, FluentResource};
use intl_memoizer::concurrent::IntlLangMemoizer;
use std::{fs, io::ErrorKind, path::Path};
use unic_langid::LanguageIdentifier;

/// A namespace for internationalization formatters.
#[derive(Debug, Clone, Copy)]
pub struct Intl;

impl Intl {
    /// Returns the default locale.
    #[inline]
    pub fn default_locale() -> &'static str {
        &DEFAULT_LOCALE
    }

    /// Returns the supported locales.
    #[inline]
    pub fn supported_locales() -> &'static [&'static str] {
        SUPPORTED_LOCALES.as_slice()
    }

    /// Selects a language from the supported locales.
    pub fn select_language(accepted_languages: &str) -> Option<&'static str> {
        select_language(accepted_languages, Self::supported_locales())
    }

    /// Translates the localization message.
    pub fn translate(
        locale: &LanguageIdentifier,
        message: &str,
        args: Option<FluentArgs<'_>>,
    ) -> Result<SharedString, Error> {
        let bundle = LOCALIZATION
            .iter()
            .find_map(|(lang_id, bundle)| (lang_id == locale).then_some(bundle))
            .or_else(|| {
                let lang = locale.language;
                LOCALIZATION
                    .iter()
                    .find_map(|(lang_id, bundle)| (lang_id.language == lang).then_some(bundle))
            })
            .or(*DEFAULT_BUNDLE)
            .ok_or_else(|| warn!("localization bundle does not exist"))?;
        let pattern = bundle
            .get_message(message)
            .ok_or_else(|| warn!("fail to get the localization message for `{}`", message))?
            .value()
            .ok_or_else(|| {
                warn!(
                    "fail to retrieve an option of the pattern for `{}`",
                    message
                )
            })?;

        let mut errors = vec![];
        if let Some(args) = args {
            let mut value = String::new();
            bundle.write_pattern(&mut value, pattern, Some(&args), &mut errors)?;
            if errors.is_empty() {
                Ok(value.into())
            } else {
                bail!("{:?}", errors);
            }
        } else {
            let value = bundle.format_pattern(pattern, None, &mut errors);
            if errors.is_empty() {
                Ok(value)
            } else {
                bail!("{:?}", errors);
            }
        }
    }
}

/// Selects a language from the candidates according to the `Accept-Language` header value.
fn select_language<'a>(accepted_languages: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let mut languages = accepted_languages
        .split(',')
        .filter_map(|s| {
            let (language, quality) = if let Some((language, quality)) = s.split_once(';') {
                let quality = quality.trim().strip_prefix("q=")?.parse::<f32>().ok()?;
                (language.trim(), quality)
            } else {
                (s.trim(), 1.0)
            };
            if language.is_empty() {
                return None;
            }
            candidates.iter().find_map(|&locale| {
                matches_language(locale, language).then_some((locale, quality))
            })
        })
        .collect::<Vec<_>>();
    languages.sort_by(|a, b| b.1.total_cmp(&a.1));
    languages.first().map(|&(language, _)| language)
}

/// Returns `true` if the locale equals the language tag or starts with it as a subtag prefix.
fn matches_language(locale: &str, language: &str) -> bool {
    let len = language.len();
    locale.eq_ignore_ascii_case(language)
        || (locale.as_bytes().get(len) == Some(&b'-')
            && locale
                .get(..len)
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(language)))
}

/// Parses an FTL string, keeping the valid entries of a malformed resource.
fn parse_resource(ftl_string: String, origin: &str) -> FluentResource {
    FluentResource::try_new(ftl_string).unwrap_or_else(|(resource, errors)| {
        tracing::error!("fail to parse the FTL resource `{origin}`: {errors:?}");
        resource
    })
}

/// Creates a new bundle for the locale.
fn new_bundle(lang: LanguageIdentifier) -> Translation {
    let mut bundle = FluentBundle::new_concurrent(vec![lang]);
    bundle.set_use_isolating(false);
    bundle
}

/// Loads the catalogs from the locale directory.
fn load_locale_dir(locale_dir: &Path, locales: &mut Vec<(LanguageIdentifier, Translation)>) {
    let entries = match fs::read_dir(locale_dir) {
        Ok(entries) => entries,
        Err(err) => {
            if err.kind() != ErrorKind::NotFound {
                tracing::error!("{err}");
            }
            return;
        }
    };
    for file in entries.filter_map(|entry| entry.ok()) {
        let locale_file = file.path();
        let Some(locale) = file
            .file_name()
            .to_str()
            .and_then(|s| s.strip_suffix(".ftl"))
            .map(|s| s.to_owned())
        else {
            continue;
        };
        let Ok(lang) = locale.parse::<LanguageIdentifier>() else {
            tracing::error!("fail to parse the language identifier `{locale}`");
            continue;
        };
        let ftl_string = match fs::read_to_string(&locale_file) {
            Ok(ftl_string) => ftl_string,
            Err(err) => {
                tracing::error!("fail to read `{}`: {err}", locale_file.display());
                continue;
            }
        };
        let resource = parse_resource(ftl_string, &locale);
        if let Some((_, bundle)) = locales.iter_mut().find(|(lang_id, _)| lang_id == &lang) {
            bundle.add_resource_overriding(resource);
        } else {
            let mut bundle = new_bundle(lang.clone());
            bundle.add_resource_overriding(resource);
            locales.push((lang, bundle));
        }
        tracing::info!(locale = locale.as_str(), "`{}` loaded", locale_file.display());
    }
}

/// Translation type.
type Translation = FluentBundle<FluentResource, IntlLangMemoizer>;

/// Embedded catalogs.
const EMBEDDED_CATALOGS: [(&str, &str); 2] = [
    ("en-US", include_str!("../../locale/en-US.ftl")),
    ("zh-CN", include_str!("../../locale/zh-CN.ftl")),
];

/// Localization.
static LOCALIZATION: LazyLock<Vec<(LanguageIdentifier, Translation)>> = LazyLock::new(|| {
    let mut locales = Vec::new();
    for (locale, ftl_string) in EMBEDDED_CATALOGS {
        let Ok(lang) = locale.parse::<LanguageIdentifier>() else {
            tracing::error!("fail to parse the language identifier `{locale}`");
            continue;
        };
        let resource = parse_resource(ftl_string.to_owned(), locale);
        let mut bundle = new_bundle(lang.clone());
        bundle.add_resource_overriding(resource);
        locales.push((lang, bundle));
    }
    load_locale_dir(&State::config_dir().join("locale"), &mut locales);
    locales
});

/// Default bundle.
static DEFAULT_BUNDLE: LazyLock<Option<&'static Translation>> = LazyLock::new(|| {
    let default_locale = LazyLock::force(&DEFAULT_LOCALE);
    LOCALIZATION
        .iter()
        .find_map(|(lang_id, bundle)| (lang_id == default_locale).then_some(bundle))
});

/// Default locale.
static DEFAULT_LOCALE: LazyLock<&'static str> = LazyLock::new(|| {
    if let Some(i18n) = State::shared().get_config("i18n") {
        i18n.get_str("default-locale").unwrap_or("en-US")
    } else {
        "en-US"
    }
});

/// Supported locales.
static SUPPORTED_LOCALES: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    LOCALIZATION
        .iter()
        .map(|(key, _)| {
            let language: &'static str = key.to_string().leak();
            language
        })
        .collect::<Vec<_>>()
});
