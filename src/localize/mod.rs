//! Localized strings.
//!
//! Rendering code never reaches for a global string table. It receives a
//! [`Localizer`] and asks it for templates by [`StringKey`].

mod catalog;
mod keys;

pub use catalog::{Locale, PluralCategory, StringCatalog, StringTable};
pub use keys::StringKey;

use std::fmt::{self, Write};

/// Resolves resource keys to text in some locale.
///
/// Implementors only provide [`Localizer::template`]; formatting and plural
/// selection are layered on top.
pub trait Localizer: Send + Sync {
    /// Returns the raw template for `key`. When `count` is given the plural
    /// form matching it is chosen.
    fn template(&self, key: StringKey, count: Option<u64>) -> String;

    fn localize(&self, key: StringKey) -> String {
        self.template(key, None)
    }

    fn localize_format(&self, key: StringKey, args: &[&dyn fmt::Display]) -> String {
        format_template(&self.template(key, None), args)
    }

    fn localize_plural(&self, key: StringKey, count: u64, args: &[&dyn fmt::Display]) -> String {
        format_template(&self.template(key, Some(count)), args)
    }
}

impl<L: Localizer + ?Sized> Localizer for &L {
    fn template(&self, key: StringKey, count: Option<u64>) -> String {
        (**self).template(key, count)
    }
}

/// Substitutes `{0}`, `{1}`, ... in `template` with `args`.
///
/// Placeholders whose index is out of range, and braces that do not form a
/// placeholder, are copied through unchanged.
pub fn format_template(template: &str, args: &[&dyn fmt::Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            let arg = args.get(index)?;
            let _ = write!(out, "{}", arg);
            Some(close)
        });
        match substituted {
            Some(close) => rest = &after[close + 1..],
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
