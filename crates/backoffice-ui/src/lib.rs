#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]

use backoffice_core::{i18n::Intl, SharedString};
use fluent::FluentArgs;
use unic_langid::LanguageIdentifier;

pub mod field;
pub mod tabs;

/// Translates the message, falling back to the message key.
pub(crate) fn localize(
    locale: &LanguageIdentifier,
    message: &'static str,
    args: Option<FluentArgs<'_>>,
) -> SharedString {
    Intl::translate(locale, message, args).unwrap_or_else(|err| {
        tracing::warn!(message, "fail to translate the message: {err}");
        message.into()
    })
}
