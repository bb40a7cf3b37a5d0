use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Font configuration for the default glyph rasterizer.
///
/// Only standard library types appear here; the fontdb database is built
/// from it by [`font_config_to_fontdb`] the first time text is drawn or
/// measured.
#[derive(Clone, Debug)]
pub struct FontConfig {
    /// Raw font files to register.
    pub custom_fonts: Vec<CustomFont>,
    /// Mappings from generic CSS family names to concrete font family names.
    pub generic_families: GenericFamilyMap,
    /// Whether to load system fonts (default: true).
    pub load_system_fonts: bool,
    /// Additional directories to scan for font files.
    pub font_dirs: Vec<PathBuf>,
    /// Whether glyph outlines are hinted (default: false).
    pub hinting_enabled: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            custom_fonts: Vec::new(),
            generic_families: GenericFamilyMap::defaults(),
            load_system_fonts: true,
            font_dirs: Vec::new(),
            hinting_enabled: false,
        }
    }
}

/// Raw font file data (TTF/OTF). Arc-wrapped so configs clone cheaply.
#[derive(Clone, Debug)]
pub struct CustomFont {
    pub data: Arc<Vec<u8>>,
}

/// Concrete families for each generic CSS family, in priority order.
#[derive(Clone, Debug, Default)]
pub struct GenericFamilyMap {
    pub serif: Vec<String>,
    pub sans_serif: Vec<String>,
    pub monospace: Vec<String>,
    pub cursive: Vec<String>,
    pub fantasy: Vec<String>,
}

impl GenericFamilyMap {
    /// Browser-like default preferences.
    pub fn defaults() -> Self {
        Self {
            sans_serif: vec![
                "Arial".into(),
                "Helvetica".into(),
                "Liberation Sans".into(),
                "DejaVu Sans".into(),
            ],
            monospace: vec![
                "Courier New".into(),
                "Courier".into(),
                "Liberation Mono".into(),
                "DejaVu Sans Mono".into(),
            ],
            serif: vec![
                "Times New Roman".into(),
                "Times".into(),
                "Liberation Serif".into(),
                "DejaVu Serif".into(),
            ],
            cursive: vec!["Comic Sans MS".into(), "Apple Chancery".into()],
            fantasy: vec!["Impact".into(), "Papyrus".into()],
        }
    }
}

/// Build a [`fontdb::Database`] from a [`FontConfig`].
pub fn font_config_to_fontdb(config: &FontConfig) -> fontdb::Database {
    let mut db = fontdb::Database::new();

    if config.load_system_fonts {
        db.load_system_fonts();
    }

    for dir in &config.font_dirs {
        db.load_fonts_dir(dir);
    }

    for font in &config.custom_fonts {
        db.load_font_data(Vec::from(font.data.as_slice()));
    }

    apply_generic_families(&mut db, &config.generic_families);
    log::debug!(target: "canvas", "font database ready with {} faces", db.len());

    db
}

/// Point each generic family at the first available family in its list.
fn apply_generic_families(db: &mut fontdb::Database, families: &GenericFamilyMap) {
    let available: HashSet<String> = db
        .faces()
        .flat_map(|face| face.families.iter().map(|(fam, _lang)| fam.clone()))
        .collect();

    let pick = |list: &[String]| list.iter().find(|f| available.contains(*f)).cloned();

    if let Some(family) = pick(&families.sans_serif) {
        db.set_sans_serif_family(family);
    }
    if let Some(family) = pick(&families.monospace) {
        db.set_monospace_family(family);
    }
    if let Some(family) = pick(&families.serif) {
        db.set_serif_family(family);
    }
    if let Some(family) = pick(&families.cursive) {
        db.set_cursive_family(family);
    }
    if let Some(family) = pick(&families.fantasy) {
        db.set_fantasy_family(family);
    }
}
