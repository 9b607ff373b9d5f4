//! INSEE region codes and Île-de-France department names.
//!
//! Region codes follow the 2016 regional reform.

/// Region code of Île-de-France.
pub const ILE_DE_FRANCE: u32 = 11;

/// Île-de-France departments as `(code, name)` pairs.
pub const ILE_DE_FRANCE_DEPARTMENTS: &[(&str, &str)] = &[
    ("75", "Paris"),
    ("77", "Seine-et-Marne"),
    ("78", "Yvelines"),
    ("91", "Essonne"),
    ("92", "Hauts-de-Seine"),
    ("93", "Seine-Saint-Denis"),
    ("94", "Val-de-Marne"),
    ("95", "Val-d'Oise"),
];

/// Looks up the region name for an INSEE region code.
#[must_use]
pub const fn lookup_region(code: u32) -> Option<&'static str> {
    Some(match code {
        1 => "Guadeloupe",
        2 => "Martinique",
        3 => "Guyane",
        4 => "La Réunion",
        6 => "Mayotte",
        11 => "Île-de-France",
        24 => "Centre-Val de Loire",
        27 => "Bourgogne-Franche-Comté",
        28 => "Normandie",
        32 => "Hauts-de-France",
        44 => "Grand Est",
        52 => "Pays de la Loire",
        53 => "Bretagne",
        75 => "Nouvelle-Aquitaine",
        76 => "Occitanie",
        84 => "Auvergne-Rhône-Alpes",
        93 => "Provence-Alpes-Côte d'Azur",
        94 => "Corse",
        _ => return None,
    })
}

/// Maps an INSEE region code to the region name.
///
/// Returns `"Inconnue"` for unrecognized codes.
#[must_use]
pub const fn region_name(code: u32) -> &'static str {
    match lookup_region(code) {
        Some(name) => name,
        None => "Inconnue",
    }
}

/// Returns `true` if `code` is a known INSEE region code.
#[must_use]
pub const fn is_known_region(code: u32) -> bool {
    lookup_region(code).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ile_de_france_is_known() {
        assert_eq!(region_name(ILE_DE_FRANCE), "Île-de-France");
        assert!(is_known_region(ILE_DE_FRANCE));
    }

    #[test]
    fn unknown_region() {
        assert_eq!(region_name(99), "Inconnue");
        assert!(!is_known_region(99));
    }

    #[test]
    fn ile_de_france_departments_are_padded() {
        assert_eq!(ILE_DE_FRANCE_DEPARTMENTS.len(), 8);
        for (code, name) in ILE_DE_FRANCE_DEPARTMENTS {
            assert_eq!(code.len(), 2, "Code {code} for {name} should be 2 chars");
        }
    }
}
