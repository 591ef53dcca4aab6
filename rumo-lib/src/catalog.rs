//! Static catalogs: bookable expeditions, internal sellers and record statuses.

use getset::CopyGetters;
use rust_decimal::Decimal;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// A bookable tour package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CopyGetters)]
pub struct Expedition {
    #[getset(get_copy = "pub")]
    id: &'static str,
    /// A human friendly display name
    #[getset(get_copy = "pub")]
    name: &'static str,
    /// Default package price, in whole reais
    default_reais: u32,
}

impl Expedition {
    const fn new(id: &'static str, name: &'static str, default_reais: u32) -> Self {
        Self {
            id,
            name,
            default_reais,
        }
    }

    /// The package value a freshly selected expedition starts with.
    pub fn default_value(&self) -> Decimal {
        Decimal::from(self.default_reais)
    }
}

pub const EXPEDITIONS: &[Expedition] = &[
    Expedition::new("utv2LLeste", "UTV 2L - Leste", 450),
    Expedition::new("utv2LOeste", "UTV 2L - Oeste", 450),
    Expedition::new("utv2LExtremoOeste", "UTV 2L - Extremo Oeste", 600),
    Expedition::new(
        "utv2LLestePorSol",
        "UTV 2L - Leste C/ Pôr Do Sol Barrinha",
        600,
    ),
    Expedition::new("utv2L2h", "UTV 2L - 2 Horas / 2", 1650),
    Expedition::new("utv4L2h", "UTV 4L - 2 Horas / 4", 1850),
    Expedition::new("utv2L5h", "UTV 2L - 5 Horas / 2", 2200),
    Expedition::new("utv4L5h", "UTV 4L - 5 Horas / 4", 2800),
    Expedition::new("utv2LDunaFunil", "UTV 2L - Duna do Funil", 2600),
    Expedition::new("utv4LDunaFunil", "UTV 4L - Duna do Funil", 2900),
    Expedition::new("utv2LIlhaAmor", "UTV 2L - Ilha do Amor", 2900),
    Expedition::new("utv4LIlhaAmor", "UTV 4L - Ilha do Amor", 3200),
    // Same display name as `utv2LLestePorSol`; lookups by name resolve to the first entry.
    Expedition::new(
        "utv2LLestePorSolExt",
        "UTV 2L - Leste C/ Pôr Do Sol Barrinha",
        2600,
    ),
    Expedition::new(
        "utv4LLestePorSolExt",
        "UTV 4L - Leste C/ Pôr Do Sol Barrinha",
        2900,
    ),
];

/// Look up an expedition by its identifier.
pub fn expedition(id: &str) -> Option<&'static Expedition> {
    EXPEDITIONS.iter().find(|exp| exp.id == id)
}

/// Resolve a remote expedition label to a catalog entry, matching either the display
/// name or the identifier. The first catalog entry that matches wins.
pub fn resolve_expedition(label: &str) -> Option<&'static Expedition> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }

    EXPEDITIONS
        .iter()
        .find(|exp| exp.name == label || exp.id == label)
}

pub const SELLERS: &[&str] = &["Rosinha", "Izaias"];

/// Whether a revenue entry is still open for edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Status {
    #[strum(serialize = "ABERTO")]
    Open,
    #[strum(serialize = "FECHADO")]
    Closed,
}
