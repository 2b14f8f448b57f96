//! Font descriptor codec
//!
//! labwc stores each titlebar font as four discrete rc.xml fields (`name`,
//! `size`, `weight`, `slant`) while the font chooser speaks Pango descriptor
//! strings. This module converts between the two, once, dispatched over the
//! three scopes a font can apply to.

use crate::config::ConfigStore;
use log::warn;
use pango::FontDescription;

/// Descriptor used when a scope has no `name` field at all.
pub const FALLBACK_DESCRIPTOR: &str = "Sans 10";

/// Point size substituted when the size field is absent or unset.
const DEFAULT_SIZE: i32 = 10;

/// Numeric Pango weight at which a font counts as bold.
const BOLD_THRESHOLD: i32 = 700;

/// Which window element a font applies to. Each scope owns an independent
/// set of the four fields under its own path prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontScope {
    Default,
    ActiveWindow,
    InactiveWindow,
}

impl FontScope {
    pub const ALL: [FontScope; 3] = [
        FontScope::Default,
        FontScope::ActiveWindow,
        FontScope::InactiveWindow,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FontScope::Default => "Window Font",
            FontScope::ActiveWindow => "Active Titlebar Font",
            FontScope::InactiveWindow => "Inactive Titlebar Font",
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            FontScope::Default => "/labwc_config/theme/font",
            FontScope::ActiveWindow => "/labwc_config/theme/font[@place='ActiveWindow']",
            FontScope::InactiveWindow => "/labwc_config/theme/font[@place='InactiveWindow']",
        }
    }

    fn field(self, leaf: &str) -> String {
        format!("{}/{}", self.prefix(), leaf)
    }
}

/// Weight keyword as persisted. Intermediate Pango weights collapse: anything
/// at or above bold is `Bold`, everything else `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    fn from_pango(weight: pango::Weight) -> Self {
        if weight_value(weight) >= BOLD_THRESHOLD {
            FontWeight::Bold
        } else {
            FontWeight::Normal
        }
    }

    fn to_pango(self) -> pango::Weight {
        match self {
            FontWeight::Normal => pango::Weight::Normal,
            FontWeight::Bold => pango::Weight::Bold,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontSlant {
    #[default]
    Normal,
    Italic,
    Oblique,
}

impl FontSlant {
    fn from_pango(style: pango::Style) -> Self {
        match style {
            pango::Style::Italic => FontSlant::Italic,
            pango::Style::Oblique => FontSlant::Oblique,
            _ => FontSlant::Normal,
        }
    }

    fn to_pango(self) -> pango::Style {
        match self {
            FontSlant::Normal => pango::Style::Normal,
            FontSlant::Italic => pango::Style::Italic,
            FontSlant::Oblique => pango::Style::Oblique,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            FontSlant::Normal => "normal",
            FontSlant::Italic => "italic",
            FontSlant::Oblique => "oblique",
        }
    }
}

/// PangoWeight doesn't impl Into<i32>, map it by hand.
fn weight_value(weight: pango::Weight) -> i32 {
    match weight {
        pango::Weight::Thin => 100,
        pango::Weight::Ultralight => 200,
        pango::Weight::Light => 300,
        pango::Weight::Semilight => 350,
        pango::Weight::Book => 380,
        pango::Weight::Normal => 400,
        pango::Weight::Medium => 500,
        pango::Weight::Semibold => 600,
        pango::Weight::Bold => 700,
        pango::Weight::Ultrabold => 800,
        pango::Weight::Heavy => 900,
        pango::Weight::Ultraheavy => 1000,
        pango::Weight::__Unknown(v) => v,
        _ => 400,
    }
}

/// One font as persisted: family plus the three collapsed attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    pub family: String,
    pub size: i32,
    pub weight: FontWeight,
    pub slant: FontSlant,
}

impl FontSpec {
    /// Parse a descriptor with the platform parser. Not validated further:
    /// whatever Pango makes of a malformed string (including an empty
    /// family) is accepted.
    pub fn parse(descriptor: &str) -> Self {
        Self::from_description(&FontDescription::from_string(descriptor))
    }

    pub fn from_description(desc: &FontDescription) -> Self {
        let family = desc.family().map(|f| f.to_string()).unwrap_or_default();
        let size = if desc.size() > 0 {
            desc.size() / pango::SCALE
        } else {
            DEFAULT_SIZE
        };
        Self {
            family,
            size,
            weight: FontWeight::from_pango(desc.weight()),
            slant: FontSlant::from_pango(desc.style()),
        }
    }

    pub fn to_description(&self) -> FontDescription {
        let mut desc = FontDescription::new();
        desc.set_family(&self.family);
        desc.set_size(self.size * pango::SCALE);
        desc.set_weight(self.weight.to_pango());
        desc.set_style(self.slant.to_pango());
        desc
    }

    /// Serialize through Pango so the descriptor re-parses to the same spec.
    pub fn to_descriptor(&self) -> String {
        self.to_description().to_str().to_string()
    }
}

/// Compose the descriptor seeding a scope's font button: the four fields in
/// fixed order with `10`/`normal`/`normal` substituted for absent values.
/// Without a `name` field the other three are not read at all and the
/// fallback descriptor is returned.
pub fn initial_descriptor(store: &ConfigStore, scope: FontScope) -> String {
    let Some(name) = store.get(&scope.field("name")) else {
        return FALLBACK_DESCRIPTOR.to_string();
    };
    let size = store.get(&scope.field("size")).unwrap_or("10");
    let weight = store.get(&scope.field("weight")).unwrap_or("normal");
    let slant = store.get(&scope.field("slant")).unwrap_or("normal");
    format!("{} {} {} {}", name, size, weight, slant)
}

/// Replace all four fields of a scope from `spec`, then flush to disk.
/// Best-effort: a failed save is logged and otherwise ignored.
pub fn write_font(store: &mut ConfigStore, scope: FontScope, spec: &FontSpec) {
    store.set(&scope.field("name"), &spec.family);
    store.set(&scope.field("size"), &spec.size.to_string());
    store.set(&scope.field("weight"), spec.weight.keyword());
    store.set(&scope.field("slant"), spec.slant.keyword());
    if let Err(e) = store.save() {
        warn!("failed to persist {}: {}", scope.label(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_rc(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("labwc-tweaks-font-{}-{}.xml", std::process::id(), name))
    }

    #[test]
    fn test_descriptor_round_trip() {
        let weights = [FontWeight::Normal, FontWeight::Bold];
        let slants = [FontSlant::Normal, FontSlant::Italic, FontSlant::Oblique];
        for family in ["Sans", "DejaVu Sans"] {
            for size in [8, 10, 14] {
                for weight in weights {
                    for slant in slants {
                        let spec = FontSpec {
                            family: family.to_string(),
                            size,
                            weight,
                            slant,
                        };
                        assert_eq!(FontSpec::parse(&spec.to_descriptor()), spec);
                    }
                }
            }
        }
    }

    #[test]
    fn test_parse_defaults() {
        let spec = FontSpec::parse("Sans");
        assert_eq!(spec.family, "Sans");
        assert_eq!(spec.size, 10);
        assert_eq!(spec.weight, FontWeight::Normal);
        assert_eq!(spec.slant, FontSlant::Normal);
    }

    #[test]
    fn test_weight_collapse_threshold() {
        let mut desc = FontDescription::new();
        desc.set_family("Sans");
        desc.set_size(10 * pango::SCALE);

        desc.set_weight(pango::Weight::Semibold);
        assert_eq!(
            FontSpec::from_description(&desc).weight,
            FontWeight::Normal
        );

        desc.set_weight(pango::Weight::Bold);
        assert_eq!(FontSpec::from_description(&desc).weight, FontWeight::Bold);

        desc.set_weight(pango::Weight::Heavy);
        assert_eq!(FontSpec::from_description(&desc).weight, FontWeight::Bold);
        // heavy weights still serialize as plain "bold"
        assert_eq!(FontSpec::from_description(&desc).weight.keyword(), "bold");
    }

    #[test]
    fn test_descriptor_omits_normal_keywords() {
        let spec = FontSpec {
            family: "Sans".to_string(),
            size: 10,
            weight: FontWeight::Normal,
            slant: FontSlant::Normal,
        };
        let descriptor = spec.to_descriptor();
        assert!(!descriptor.contains("Bold"));
        assert!(!descriptor.contains("Italic"));
        assert!(!descriptor.contains("Oblique"));
    }

    #[test]
    fn test_initial_descriptor_fallback_without_family() {
        let mut store = ConfigStore::empty(temp_rc("fallback"));
        // size present without a name does not change the fallback
        store.set("/labwc_config/theme/font/size", "14");
        assert_eq!(
            initial_descriptor(&store, FontScope::Default),
            FALLBACK_DESCRIPTOR
        );
    }

    #[test]
    fn test_initial_descriptor_substitutes_defaults() {
        let mut store = ConfigStore::empty(temp_rc("defaults"));
        store.set("/labwc_config/theme/font/name", "DejaVu Sans");
        store.set("/labwc_config/theme/font/size", "11");
        assert_eq!(
            initial_descriptor(&store, FontScope::Default),
            "DejaVu Sans 11 normal normal"
        );
    }

    #[test]
    fn test_initial_descriptor_reads_scoped_fields() {
        let mut store = ConfigStore::empty(temp_rc("scoped"));
        store.set("/labwc_config/theme/font/name", "Sans");
        store.set(
            "/labwc_config/theme/font[@place='ActiveWindow']/name",
            "Noto Sans",
        );
        store.set(
            "/labwc_config/theme/font[@place='ActiveWindow']/weight",
            "bold",
        );
        assert_eq!(
            initial_descriptor(&store, FontScope::ActiveWindow),
            "Noto Sans 10 bold normal"
        );
    }

    #[test]
    fn test_write_font_writes_four_fields_and_persists() {
        let path = temp_rc("write");
        let _ = std::fs::remove_file(&path);
        let mut store = ConfigStore::empty(&path);
        let spec = FontSpec {
            family: "Noto Sans".to_string(),
            size: 12,
            weight: FontWeight::Bold,
            slant: FontSlant::Italic,
        };
        write_font(&mut store, FontScope::ActiveWindow, &spec);

        let prefix = "/labwc_config/theme/font[@place='ActiveWindow']";
        assert_eq!(store.get(&format!("{prefix}/name")), Some("Noto Sans"));
        assert_eq!(store.get(&format!("{prefix}/size")), Some("12"));
        assert_eq!(store.get(&format!("{prefix}/weight")), Some("bold"));
        assert_eq!(store.get(&format!("{prefix}/slant")), Some("italic"));
        // the bare path resolves to the same first font element
        assert_eq!(store.get("/labwc_config/theme/font/slant"), Some("italic"));

        let reloaded = ConfigStore::load(&path).expect("persisted");
        assert_eq!(reloaded.get(&format!("{prefix}/size")), Some("12"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_scope_field_paths() {
        assert_eq!(
            FontScope::Default.field("name"),
            "/labwc_config/theme/font/name"
        );
        assert_eq!(
            FontScope::InactiveWindow.field("slant"),
            "/labwc_config/theme/font[@place='InactiveWindow']/slant"
        );
    }
}
