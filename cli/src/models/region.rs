use serde::{Deserialize, Serialize};
use std::fmt;

/// Brazilian macro-regions (IBGE "Grandes Regiões", geographic level N2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MacroRegion {
    Norte,
    Nordeste,
    Sudeste,
    Sul,
    CentroOeste,
}

impl MacroRegion {
    pub const ALL: [MacroRegion; 5] = [
        MacroRegion::Norte,
        MacroRegion::Nordeste,
        MacroRegion::Sudeste,
        MacroRegion::Sul,
        MacroRegion::CentroOeste,
    ];

    /// Map a macro-region code ("1".."5") as reported by the N2 level
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "1" => Some(MacroRegion::Norte),
            "2" => Some(MacroRegion::Nordeste),
            "3" => Some(MacroRegion::Sudeste),
            "4" => Some(MacroRegion::Sul),
            "5" => Some(MacroRegion::CentroOeste),
            _ => None,
        }
    }

    /// Derive the macro-region from a finer region identifier.
    ///
    /// IBGE geographic codes start with the macro-region digit, so a
    /// metropolitan area "3550308" belongs to region "3" (Sudeste).
    pub fn from_region_id(region_id: &str) -> Option<Self> {
        let first = region_id.trim().chars().next()?;
        Self::from_code(first.encode_utf8(&mut [0; 4]))
    }

    pub fn code(&self) -> &'static str {
        match self {
            MacroRegion::Norte => "1",
            MacroRegion::Nordeste => "2",
            MacroRegion::Sudeste => "3",
            MacroRegion::Sul => "4",
            MacroRegion::CentroOeste => "5",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MacroRegion::Norte => "Norte",
            MacroRegion::Nordeste => "Nordeste",
            MacroRegion::Sudeste => "Sudeste",
            MacroRegion::Sul => "Sul",
            MacroRegion::CentroOeste => "Centro-Oeste",
        }
    }

    /// Approximate (lat, lon) used to place the region on the map view
    pub fn centroid(&self) -> (f64, f64) {
        match self {
            MacroRegion::Norte => (-3.11, -60.02),
            MacroRegion::Nordeste => (-12.97, -38.51),
            MacroRegion::Sudeste => (-23.55, -46.63),
            MacroRegion::Sul => (-30.03, -51.23),
            MacroRegion::CentroOeste => (-15.79, -47.88),
        }
    }
}

impl fmt::Display for MacroRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
