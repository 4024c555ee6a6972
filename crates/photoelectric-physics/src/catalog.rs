//! Registries of metals and light sources
//!
//! Both catalogs are append-only. Names are not deduplicated; a lookup returns
//! the most recently registered entry with that name.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::spectrum::Rgb;

/// Default short edge of a source's emission band (nm)
pub const DEFAULT_BAND_MIN_NM: f64 = 100.0;
/// Default long edge of a source's emission band (nm)
pub const DEFAULT_BAND_MAX_NM: f64 = 850.0;

/// A photo-emissive metal plate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metal {
    pub name: String,
    /// Minimum energy (J) needed to free a carrier from the surface
    pub work_function: f64,
    /// Plate color for rendering
    pub color: Rgb,
}

impl Metal {
    pub fn new(name: impl Into<String>, work_function: f64, color: Rgb) -> Self {
        Self {
            name: name.into(),
            work_function,
            color,
        }
    }
}

fn default_band_min() -> f64 {
    DEFAULT_BAND_MIN_NM
}

fn default_band_max() -> f64 {
    DEFAULT_BAND_MAX_NM
}

/// A light source: where quanta appear and which wavelengths it can produce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    /// Emission point in screen space
    pub origin: DVec2,
    /// Mean of the Gaussian jitter added to both axes
    pub mean_offset: f64,
    /// Standard deviation of the jitter
    pub std_dev: f64,
    /// Inclusive emission band (nm)
    #[serde(default = "default_band_min")]
    pub accepted_min_nm: f64,
    #[serde(default = "default_band_max")]
    pub accepted_max_nm: f64,
}

impl Source {
    /// New source emitting across the default 100-850 nm band
    pub fn new(name: impl Into<String>, x: f64, y: f64, mean_offset: f64, std_dev: f64) -> Self {
        Self {
            name: name.into(),
            origin: DVec2::new(x, y),
            mean_offset,
            std_dev,
            accepted_min_nm: DEFAULT_BAND_MIN_NM,
            accepted_max_nm: DEFAULT_BAND_MAX_NM,
        }
    }

    /// Restrict the emission band
    pub fn with_band(mut self, min_nm: f64, max_nm: f64) -> Self {
        self.accepted_min_nm = min_nm;
        self.accepted_max_nm = max_nm;
        self
    }

    pub fn with_min(mut self, min_nm: f64) -> Self {
        self.accepted_min_nm = min_nm;
        self
    }

    /// Whether the source produces light of this wavelength (nm)
    pub fn accepts(&self, wavelength_nm: f64) -> bool {
        self.accepted_min_nm <= wavelength_nm && wavelength_nm <= self.accepted_max_nm
    }
}

/// Named metals the user can pick from
#[derive(Debug, Clone, Default)]
pub struct MetalCatalog {
    metals: Vec<Metal>,
}

impl MetalCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The ten classroom metals, sodium first
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        catalog.register("Sodium", 3.65e-19, [255, 252, 238]);
        catalog.register("Copper", 7.53e-19, [184, 115, 51]);
        catalog.register("Zinc", 6.89e-19, [146, 137, 138]);
        catalog.register("Magnesium", 5.90e-19, [193, 194, 195]);
        catalog.register("Aluminum", 6.53688e-19, [217, 218, 217]);
        catalog.register("Beryllium", 8.0109e-19, [139, 129, 135]);
        catalog.register("Calcium", 4.6463e-19, [242, 244, 232]);
        catalog.register("Gold", 8.1711e-19, [212, 175, 55]);
        catalog.register("Platinum", 1.01738e-19, [229, 228, 226]);
        catalog.register("Iron", 7.2098e-19, [161, 157, 148]);
        catalog
    }

    pub fn register(&mut self, name: impl Into<String>, work_function: f64, color: Rgb) {
        self.push(Metal::new(name, work_function, color));
    }

    pub fn push(&mut self, metal: Metal) {
        if self.find(&metal.name).is_some() {
            log::warn!("Metal '{}' registered twice, the new entry shadows the old", metal.name);
        }
        log::debug!(
            "Registered metal '{}' (work function {:.3e} J)",
            metal.name,
            metal.work_function
        );
        self.metals.push(metal);
    }

    /// Last registered metal with this name
    pub fn find(&self, name: &str) -> Option<&Metal> {
        self.metals.iter().rev().find(|m| m.name == name)
    }

    /// Names in registration order (for a dropdown)
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.metals.iter().map(|m| m.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Metal> {
        self.metals.iter()
    }

    pub fn first(&self) -> Option<&Metal> {
        self.metals.first()
    }

    pub fn len(&self) -> usize {
        self.metals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metals.is_empty()
    }
}

/// Named light sources the user can pick from
#[derive(Debug, Clone, Default)]
pub struct SourceCatalog {
    sources: Vec<Source>,
}

impl SourceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The five classroom sources, the lamp first.
    /// Origins are offsets from the lamp image drawn at (500, 150).
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        catalog.register(Source::new("Lamp", 500.0 + 16.0, 150.0 + 54.0, 60.0, 30.0).with_min(350.0));
        catalog.register(Source::new("Laser", 500.0 + 16.0, 150.0 + 84.0, 60.0, 1.0));
        catalog.register(Source::new("Led", 500.0, 150.0 + 5.0, 60.0, 5.0).with_band(400.0, 700.0));
        catalog.register(Source::new("Infrared", 478.0, 150.0 + 40.0, 60.0, 20.0).with_min(700.0));
        catalog.register(Source::new("Bulb", 480.0, 150.0 + 38.0, 60.0, 18.0).with_band(450.0, 650.0));
        catalog
    }

    pub fn register(&mut self, source: Source) {
        if self.find(&source.name).is_some() {
            log::warn!("Source '{}' registered twice, the new entry shadows the old", source.name);
        }
        log::debug!(
            "Registered source '{}' at ({:.0}, {:.0}), band {}-{} nm",
            source.name,
            source.origin.x,
            source.origin.y,
            source.accepted_min_nm,
            source.accepted_max_nm
        );
        self.sources.push(source);
    }

    /// Last registered source with this name
    pub fn find(&self, name: &str) -> Option<&Source> {
        self.sources.iter().rev().find(|s| s.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|s| s.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Source> {
        self.sources.iter()
    }

    pub fn first(&self) -> Option<&Source> {
        self.sources.first()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
