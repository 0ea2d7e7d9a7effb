/* ************************************************************************ **
** This file is part of molsym, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                      **
**                                                                         **
**     http://www.apache.org/licenses/LICENSE-2.0                          **
**     http://opensource.org/licenses/MIT                                  **
** ************************************************************************ */

use std::collections::HashMap;
use std::fmt;
use std::str;
use failure::Backtrace;

/// Represents a specific atomic number.
///
/// Only elements with tabulated standard atomic weights are supported
/// (up to uranium).  This limitation enables methods to return
/// `&'static str` and an infallible weight.
#[derive(Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Element(u16);

const MAX_ATOMIC_NUMBER: u32 = 92;

#[derive(Debug, Fail)]
#[fail(display = "Unable to parse {}: {:?}", kind, text)]
pub struct ElementParseError {
    text: String,
    kind: &'static str, // "element", "element symbol"
    backtrace: Backtrace,
}

impl ElementParseError {
    fn new(kind: &'static str, s: &str) -> Self
    { ElementParseError {
        text: s.to_string(),
        kind: kind,
        backtrace: Backtrace::new(),
    }}
}

impl Element {
    pub fn from_atomic_number(n: u32) -> Option<Self>
    {
        if Self::is_valid_number(n) { Some(Element(n as u16)) }
        else { None }
    }

    fn is_valid_number(n: u32) -> bool
    { 1 <= n && n <= MAX_ATOMIC_NUMBER }

    pub fn from_symbol(s: &str) -> Result<Self, ElementParseError>
    {
        let &n = SYMBOL_TO_NUMBER.get(s).ok_or_else(|| ElementParseError::new("element symbol", s))?;
        debug_assert!(Self::is_valid_number(n.into()));
        Ok(Element(n))
    }

    pub fn atomic_number(&self) -> u32
    { self.0.into() }

    pub fn symbol(&self) -> &'static str
    { TABLE_BY_NUMBER[&self.0].1 }

    pub fn name(&self) -> &'static str
    { TABLE_BY_NUMBER[&self.0].2 }

    /// Standard atomic weight, in unified atomic mass units.
    ///
    /// This is the mass used when weighting the center of mass and the
    /// inertia tensor of a molecule.
    pub fn weight(&self) -> f64
    { TABLE_BY_NUMBER[&self.0].3 }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    { fmt::Display::fmt(self.symbol(), f) }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match f.alternate() {
            false => fmt::Debug::fmt(self.symbol(), f),
            true  => fmt::Debug::fmt(self.name(), f),
        }
    }
}

impl str::FromStr for Element {
    type Err = ElementParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        let &n = DWIM_STR_TO_NUMBER.get(s).ok_or_else(|| ElementParseError::new("element", s))?;
        debug_assert!(Self::is_valid_number(n.into()));
        Ok(Element(n))
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;
    use serde::{Serialize, Deserialize, ser, de};

    impl Serialize for Element {
        fn serialize<S: ser::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            self.symbol().serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for Element {
        fn deserialize<D: de::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let raw: &str = <&str>::deserialize(deserializer)?;
            raw.parse().map_err(|_| {
                de::Error::invalid_value(de::Unexpected::Str(raw), &"an element name or symbol")
            })
        }
    }
}

// Atomic number, symbol, name, and standard atomic weight.
const ELEMENT_TABLE: &'static [(u16, &'static str, &'static str, f64)] = &[
    (001,  "H", "Hydrogen",      1.0079),
    (002, "He", "Helium",        4.0026),
    (003, "Li", "Lithium",       6.9412),
    (004, "Be", "Beryllium",     9.0122),
    (005,  "B", "Boron",        10.8117),
    (006,  "C", "Carbon",       12.0108),
    (007,  "N", "Nitrogen",     14.0067),
    (008,  "O", "Oxygen",       15.9994),
    (009,  "F", "Fluorine",     18.9984),
    (010, "Ne", "Neon",         20.1798),
    (011, "Na", "Sodium",       22.9898),
    (012, "Mg", "Magnesium",    24.3051),
    (013, "Al", "Aluminum",     26.9815),
    (014, "Si", "Silicon",      28.0855),
    (015,  "P", "Phosphorus",   30.9738),
    (016,  "S", "Sulfur",       32.0655),
    (017, "Cl", "Chlorine",     35.4532),
    (018, "Ar", "Argon",        39.9481),
    (019,  "K", "Potassium",    39.0983),
    (020, "Ca", "Calcium",      40.0784),
    (021, "Sc", "Scandium",     44.9559),
    (022, "Ti", "Titanium",     47.8671),
    (023,  "V", "Vanadium",     50.9415),
    (024, "Cr", "Chromium",     51.9962),
    (025, "Mn", "Manganese",    54.9380),
    (026, "Fe", "Iron",         55.8452),
    (027, "Co", "Cobalt",       58.9332),
    (028, "Ni", "Nickel",       58.6934),
    (029, "Cu", "Copper",       63.5463),
    (030, "Zn", "Zinc",         65.3820),
    (031, "Ga", "Gallium",      69.7231),
    (032, "Ge", "Germanium",    72.6410),
    (033, "As", "Arsenic",      74.9216),
    (034, "Se", "Selenium",     78.9630),
    (035, "Br", "Bromine",      79.9041),
    (036, "Kr", "Krypton",      83.7982),
    (037, "Rb", "Rubidium",     85.4678),
    (038, "Sr", "Strontium",    87.6210),
    (039,  "Y", "Yttrium",      88.9059),
    (040, "Zr", "Zirconium",    91.2242),
    (041, "Nb", "Niobium",      92.9064),
    (042, "Mo", "Molybdenum",   95.9620),
    (043, "Tc", "Technetium",   98.0),
    (044, "Ru", "Ruthenium",   101.0720),
    (045, "Rh", "Rhodium",     102.9055),
    (046, "Pd", "Palladium",   106.4210),
    (047, "Ag", "Silver",      107.8682),
    (048, "Cd", "Cadmium",     112.4118),
    (049, "In", "Indium",      114.8183),
    (050, "Sn", "Tin",         118.7107),
    (051, "Sb", "Antimony",    121.7601),
    (052, "Te", "Tellurium",   127.6030),
    (053,  "I", "Iodine",      126.9045),
    (054, "Xe", "Xenon",       131.2936),
    (055, "Cs", "Caesium",     132.9055),
    (056, "Ba", "Barium",      137.3277),
    (057, "La", "Lanthanum",   138.9055),
    (058, "Ce", "Cerium",      140.1161),
    (059, "Pr", "Praseodymium", 140.9077),
    (060, "Nd", "Neodymium",   144.2423),
    (061, "Pm", "Promethium",  145.0),
    (062, "Sm", "Samarium",    150.3620),
    (063, "Eu", "Europium",    151.9641),
    (064, "Gd", "Gadolinium",  157.2530),
    (065, "Tb", "Terbium",     158.9254),
    (066, "Dy", "Dysprosium",  162.5001),
    (067, "Ho", "Holmium",     164.9303),
    (068, "Er", "Erbium",      167.2593),
    (069, "Tm", "Thulium",     168.9342),
    (070, "Yb", "Ytterbium",   173.0545),
    (071, "Lu", "Lutetium",    174.9668),
    (072, "Hf", "Hafnium",     178.4920),
    (073, "Ta", "Tantalum",    180.9479),
    (074,  "W", "Tungsten",    183.8410),
    (075, "Re", "Rhenium",     186.2071),
    (076, "Os", "Osmium",      190.2330),
    (077, "Ir", "Iridium",     192.2173),
    (078, "Pt", "Platinum",    195.0849),
    (079, "Au", "Gold",        196.9666),
    (080, "Hg", "Mercury",     200.5920),
    (081, "Tl", "Thallium",    204.3833),
    (082, "Pb", "Lead",        207.2100),
    (083, "Bi", "Bismuth",     208.9804),
    (084, "Po", "Polonium",    209.0),
    (085, "At", "Astatine",    210.0),
    (086, "Rn", "Radon",       222.0),
    (087, "Fr", "Francium",    223.0),
    (088, "Ra", "Radium",      226.0),
    (089, "Ac", "Actinium",    227.0),
    (090, "Th", "Thorium",     232.0381),
    (091, "Pa", "Protactinium", 231.0359),
    (092,  "U", "Uranium",     238.0289),
];

lazy_static!{
    static ref SYMBOL_TO_NUMBER: HashMap<&'static str, u16> =
    {
        ELEMENT_TABLE.iter()
            .map(|&(num, sym, _, _)| (sym, num))
            .collect()
    };

    static ref TABLE_BY_NUMBER: HashMap<u16, (u16, &'static str, &'static str, f64)> =
    {
        ELEMENT_TABLE.iter()
            .map(|&row| (row.0, row))
            .collect()
    };

    static ref DWIM_STR_TO_NUMBER: DwimMap =
    {
        let mut map = DwimMap::new();

        for &(num, sym, name, _) in ELEMENT_TABLE {
            map.insert(sym, num);
            map.insert(name, num);
        }
        map
    };
}

use self::dwim::DwimMap;
mod dwim {
    use super::*;
    /// Case-insensitive lookup that allows either the symbol or the name
    pub struct DwimMap(HashMap<String, u16>);

    impl DwimMap {
        pub fn new() -> DwimMap
        { DwimMap(Default::default()) }

        pub fn insert(&mut self, key: &str, value: u16)
        { self.0.insert(Self::canonicalize(key), value); }

        pub fn get(&self, key: &str) -> Option<&u16>
        { self.0.get(&Self::canonicalize(key)) }

        fn canonicalize(s: &str) -> String {
            let mut s = s.to_string();
            s.make_ascii_lowercase();
            s
        }
    }
}

macro_rules! define_consts {
    (
        pub mod $consts:ident {
            $( pub const $NAME:ident: Element = Element($num:expr); )+
        }
    ) => {
        // Define associated constants for convenience
        impl Element {
            $( pub const $NAME: Element = Element($num); )+
        }

        // Also put them in a mod, where they can be imported to be used unqualified.
        pub mod $consts {
            use super::*;

            $( pub const $NAME: Element = Element::$NAME; )+
        }
    };
}

define_consts! {
    pub mod consts {
        pub const HYDROGEN: Element = Element(001);
        pub const HELIUM: Element = Element(002);
        pub const LITHIUM: Element = Element(003);
        pub const BERYLLIUM: Element = Element(004);
        pub const BORON: Element = Element(005);
        pub const CARBON: Element = Element(006);
        pub const NITROGEN: Element = Element(007);
        pub const OXYGEN: Element = Element(008);
        pub const FLUORINE: Element = Element(009);
        pub const NEON: Element = Element(010);
        pub const SODIUM: Element = Element(011);
        pub const MAGNESIUM: Element = Element(012);
        pub const ALUMINUM: Element = Element(013);
        pub const SILICON: Element = Element(014);
        pub const PHOSPHORUS: Element = Element(015);
        pub const SULFUR: Element = Element(016);
        pub const CHLORINE: Element = Element(017);
        pub const ARGON: Element = Element(018);
        pub const POTASSIUM: Element = Element(019);
        pub const CALCIUM: Element = Element(020);
        pub const SCANDIUM: Element = Element(021);
        pub const TITANIUM: Element = Element(022);
        pub const VANADIUM: Element = Element(023);
        pub const CHROMIUM: Element = Element(024);
        pub const MANGANESE: Element = Element(025);
        pub const IRON: Element = Element(026);
        pub const COBALT: Element = Element(027);
        pub const NICKEL: Element = Element(028);
        pub const COPPER: Element = Element(029);
        pub const ZINC: Element = Element(030);
        pub const GALLIUM: Element = Element(031);
        pub const GERMANIUM: Element = Element(032);
        pub const ARSENIC: Element = Element(033);
        pub const SELENIUM: Element = Element(034);
        pub const BROMINE: Element = Element(035);
        pub const KRYPTON: Element = Element(036);
        pub const RUBIDIUM: Element = Element(037);
        pub const STRONTIUM: Element = Element(038);
        pub const YTTRIUM: Element = Element(039);
        pub const ZIRCONIUM: Element = Element(040);
        pub const NIOBIUM: Element = Element(041);
        pub const MOLYBDENUM: Element = Element(042);
        pub const TECHNETIUM: Element = Element(043);
        pub const RUTHENIUM: Element = Element(044);
        pub const RHODIUM: Element = Element(045);
        pub const PALLADIUM: Element = Element(046);
        pub const SILVER: Element = Element(047);
        pub const CADMIUM: Element = Element(048);
        pub const INDIUM: Element = Element(049);
        pub const TIN: Element = Element(050);
        pub const ANTIMONY: Element = Element(051);
        pub const TELLURIUM: Element = Element(052);
        pub const IODINE: Element = Element(053);
        pub const XENON: Element = Element(054);
        pub const CAESIUM: Element = Element(055);
        pub const BARIUM: Element = Element(056);
        pub const LANTHANUM: Element = Element(057);
        pub const CERIUM: Element = Element(058);
        pub const PRASEODYMIUM: Element = Element(059);
        pub const NEODYMIUM: Element = Element(060);
        pub const PROMETHIUM: Element = Element(061);
        pub const SAMARIUM: Element = Element(062);
        pub const EUROPIUM: Element = Element(063);
        pub const GADOLINIUM: Element = Element(064);
        pub const TERBIUM: Element = Element(065);
        pub const DYSPROSIUM: Element = Element(066);
        pub const HOLMIUM: Element = Element(067);
        pub const ERBIUM: Element = Element(068);
        pub const THULIUM: Element = Element(069);
        pub const YTTERBIUM: Element = Element(070);
        pub const LUTETIUM: Element = Element(071);
        pub const HAFNIUM: Element = Element(072);
        pub const TANTALUM: Element = Element(073);
        pub const TUNGSTEN: Element = Element(074);
        pub const RHENIUM: Element = Element(075);
        pub const OSMIUM: Element = Element(076);
        pub const IRIDIUM: Element = Element(077);
        pub const PLATINUM: Element = Element(078);
        pub const GOLD: Element = Element(079);
        pub const MERCURY: Element = Element(080);
        pub const THALLIUM: Element = Element(081);
        pub const LEAD: Element = Element(082);
        pub const BISMUTH: Element = Element(083);
        pub const POLONIUM: Element = Element(084);
        pub const ASTATINE: Element = Element(085);
        pub const RADON: Element = Element(086);
        pub const FRANCIUM: Element = Element(087);
        pub const RADIUM: Element = Element(088);
        pub const ACTINIUM: Element = Element(089);
        pub const THORIUM: Element = Element(090);
        pub const PROTACTINIUM: Element = Element(091);
        pub const URANIUM: Element = Element(092);
    }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;

    #[test]
    fn lookups_agree() {
        for &(num, sym, name, weight) in ELEMENT_TABLE {
            let elem = Element::from_symbol(sym).unwrap();
            assert_eq!(elem.atomic_number(), u32::from(num));
            assert_eq!(elem.symbol(), sym);
            assert_eq!(elem.name(), name);
            assert_eq!(elem.weight(), weight);
            assert_eq!(sym.parse::<Element>().unwrap(), elem);
            assert_eq!(name.parse::<Element>().unwrap(), elem);
        }
    }

    #[test]
    fn dwim_is_case_insensitive() {
        assert_eq!("carbon".parse::<Element>().unwrap(), Element::CARBON);
        assert_eq!("CARBON".parse::<Element>().unwrap(), Element::CARBON);
        assert_eq!("c".parse::<Element>().unwrap(), Element::CARBON);
    }

    #[test]
    fn bogus_symbols_are_rejected() {
        assert!(Element::from_symbol("Xx").is_err());
        assert!("".parse::<Element>().is_err());
        assert!(Element::from_atomic_number(0).is_none());
        assert!(Element::from_atomic_number(93).is_none());
    }
}
