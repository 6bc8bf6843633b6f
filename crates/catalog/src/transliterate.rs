// crates/catalog/src/transliterate.rs
//! Sort letters for the first character of an author or title

/// Returned for any character without a Latin sort letter
pub const FALLBACK_MARKER: char = '_';

const CYRILLIC_TO_LATIN: [(char, char); 31] = [
    ('А', 'A'),
    ('Б', 'B'),
    ('В', 'V'),
    ('Г', 'G'),
    ('Д', 'D'),
    ('Е', 'E'),
    ('Ё', 'E'),
    ('Ж', 'Z'),
    ('З', 'Z'),
    ('И', 'I'),
    ('Й', 'I'),
    ('К', 'K'),
    ('Л', 'L'),
    ('М', 'M'),
    ('Н', 'N'),
    ('О', 'O'),
    ('П', 'P'),
    ('Р', 'R'),
    ('С', 'S'),
    ('Т', 'T'),
    ('У', 'U'),
    ('Ф', 'F'),
    ('Х', 'H'),
    ('Ц', 'C'),
    ('Ч', 'C'),
    ('Ш', 'W'),
    ('Щ', 'W'),
    ('Ы', 'Y'),
    ('Э', 'E'),
    ('Ю', 'U'),
    ('Я', 'A'),
];

/// Maps a character to its Latin sort letter.
///
/// Only Cyrillic letters are in the table. Latin letters, digits and
/// punctuation all land on [`FALLBACK_MARKER`], as do `Ъ` and `Ь`.
pub fn transliterate(ch: char) -> char {
    let upper = ch.to_uppercase().next().unwrap_or(ch);
    CYRILLIC_TO_LATIN
        .iter()
        .find(|(cyrillic, _)| *cyrillic == upper)
        .map(|(_, latin)| *latin)
        .unwrap_or(FALLBACK_MARKER)
}

/// Returns true if `ch` can start an index prefix
pub fn is_sort_letter(ch: char) -> bool {
    ch.is_ascii_uppercase() || ch == FALLBACK_MARKER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_entry_maps_to_ascii_uppercase() {
        for (cyrillic, latin) in CYRILLIC_TO_LATIN {
            assert_eq!(transliterate(cyrillic), latin);
            assert!(latin.is_ascii_uppercase());
        }
    }

    #[test]
    fn test_lowercase_cyrillic() {
        assert_eq!(transliterate('т'), 'T');
        assert_eq!(transliterate('ё'), 'E');
        assert_eq!(transliterate('щ'), 'W');
        assert_eq!(transliterate('я'), 'A');
    }

    #[test]
    fn test_latin_and_digits_fall_back() {
        for ch in ('a'..='z').chain('A'..='Z').chain('0'..='9') {
            assert_eq!(transliterate(ch), FALLBACK_MARKER, "char {ch:?}");
        }
    }

    #[test]
    fn test_signs_and_punctuation_fall_back() {
        for ch in ['Ъ', 'ь', '«', '-', ' ', 'ß', 'é'] {
            assert_eq!(transliterate(ch), FALLBACK_MARKER, "char {ch:?}");
        }
    }

    #[test]
    fn test_is_sort_letter() {
        assert!(is_sort_letter('A'));
        assert!(is_sort_letter('_'));
        assert!(!is_sort_letter('a'));
        assert!(!is_sort_letter('Т'));
    }
}
