/// Object categories a cutout can belong to.
///
/// The class of a cutout is the name of the directory it lives in under
/// `flag_imgs/`. Id 0 is reserved for "no object" in masks and is never
/// handed out here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FlagClass {
    AryanNations,
    IiiPercenters,
    IronCross,
    OdalRune,
    /// Any directory name not in the table.
    Other,
}

impl FlagClass {
    pub const ALL: [FlagClass; 5] = [
        FlagClass::AryanNations,
        FlagClass::IiiPercenters,
        FlagClass::IronCross,
        FlagClass::OdalRune,
        FlagClass::Other,
    ];

    /// Resolve a class from a cutout's parent directory name
    pub fn from_dir_name(name: &str) -> Self {
        match name {
            "Aryan Nations" => FlagClass::AryanNations,
            "III Percenters" => FlagClass::IiiPercenters,
            "Iron Cross" => FlagClass::IronCross,
            "Odal Rune" => FlagClass::OdalRune,
            _ => FlagClass::Other,
        }
    }

    /// Value written to channel 0 of a mask
    pub fn id(self) -> u8 {
        match self {
            FlagClass::AryanNations => 1,
            FlagClass::IiiPercenters => 2,
            FlagClass::IronCross => 3,
            FlagClass::OdalRune => 4,
            FlagClass::Other => 5,
        }
    }

    pub fn dir_name(self) -> Option<&'static str> {
        match self {
            FlagClass::AryanNations => Some("Aryan Nations"),
            FlagClass::IiiPercenters => Some("III Percenters"),
            FlagClass::IronCross => Some("Iron Cross"),
            FlagClass::OdalRune => Some("Odal Rune"),
            FlagClass::Other => None,
        }
    }
}
