//! Static per-letter data.

/// Lowercase anchor strengths.
pub static ANCHOR_LOWERCASE: &[(char, f64)] = &[
    ('a', 0.28),
    ('b', 0.16),
    ('c', 0.34),
    ('d', 0.22),
    ('e', 0.32),
    ('f', 0.12),
    ('g', 0.26),
    ('h', 0.16),
    ('i', 0.10),
    ('j', 0.11),
    ('k', 0.13),
    ('l', 0.10),
    ('m', 0.20),
    ('n', 0.18),
    ('o', 0.32),
    ('p', 0.22),
    ('q', 0.22),
    ('r', 0.18),
    ('s', 0.24),
    ('t', 0.16),
    ('u', 0.22),
    ('v', 0.14),
    ('w', 0.16),
    ('x', 0.12),
    ('y', 0.16),
    ('z', 0.12),
];

/// Uppercase anchor strengths.
pub static ANCHOR_UPPERCASE: &[(char, f64)] = &[
    ('A', 0.08),
    ('B', 0.20),
    ('C', 0.22),
    ('D', 0.20),
    ('E', 0.22),
    ('F', 0.20),
    ('G', 0.22),
    ('H', 0.18),
    ('I', 0.00),
    ('J', 0.20),
    ('K', 0.20),
    ('L', 0.22),
    ('M', 0.20),
    ('N', 0.20),
    ('O', 0.22),
    ('P', 0.20),
    ('Q', 0.22),
    ('R', 0.20),
    ('S', 0.22),
    ('T', 0.18),
    ('U', 0.20),
    ('V', 0.16),
    ('W', 0.18),
    ('X', 0.14),
    ('Y', 0.16),
    ('Z', 0.14),
];

/// Greek and Cyrillic letters and the Latin letter whose anchor they share.
pub static BASE_LETTER_MAP: &[(char, char)] = &[
    // Greek uppercase
    ('Α', 'A'),
    ('Β', 'B'),
    ('Γ', 'C'),
    ('Δ', 'A'),
    ('Ε', 'E'),
    ('Ζ', 'Z'),
    ('Η', 'H'),
    ('Θ', 'O'),
    ('Ι', 'I'),
    ('Κ', 'K'),
    ('Λ', 'A'),
    ('Μ', 'M'),
    ('Ν', 'N'),
    ('Ξ', 'E'),
    ('Ο', 'O'),
    ('Π', 'H'),
    ('Ρ', 'P'),
    ('Σ', 'S'),
    ('Τ', 'T'),
    ('Υ', 'Y'),
    ('Φ', 'F'),
    ('Χ', 'X'),
    ('Ψ', 'Y'),
    ('Ω', 'O'),
    // Greek lowercase
    ('α', 'a'),
    ('β', 'b'),
    ('γ', 'c'),
    ('δ', 'a'),
    ('ε', 'e'),
    ('ζ', 'z'),
    ('η', 'h'),
    ('θ', 'o'),
    ('ι', 'i'),
    ('κ', 'k'),
    ('λ', 'a'),
    ('μ', 'm'),
    ('ν', 'n'),
    ('ξ', 'e'),
    ('ο', 'o'),
    ('π', 'h'),
    ('ρ', 'p'),
    ('σ', 's'),
    ('τ', 't'),
    ('υ', 'u'),
    ('φ', 'f'),
    ('χ', 'x'),
    ('ψ', 'y'),
    ('ω', 'o'),
    // Cyrillic
    ('А', 'A'),
    ('В', 'B'),
    ('С', 'C'),
    ('Е', 'E'),
    ('Н', 'H'),
    ('К', 'K'),
    ('М', 'M'),
    ('О', 'O'),
    ('Р', 'P'),
    ('Т', 'T'),
    ('У', 'Y'),
    ('Х', 'X'),
    ('а', 'a'),
    ('в', 'b'),
    ('е', 'e'),
    ('к', 'k'),
    ('м', 'm'),
    ('н', 'n'),
    ('о', 'o'),
    ('р', 'p'),
    ('с', 'c'),
    ('т', 't'),
    ('у', 'y'),
    ('х', 'x'),
];

/// Advance width nudges as a fraction of the em.
pub static MICRO_SPACING_EM: &[(char, f64)] = &[
    ('m', 0.010),
    ('w', 0.009),
    ('M', 0.012),
    ('W', 0.012),
    ('g', 0.008),
    ('G', 0.010),
    ('Q', 0.010),
    ('8', 0.010),
    ('0', 0.006),
    ('n', 0.006),
    ('h', 0.006),
    ('u', 0.006),
    ('r', 0.004),
    ('p', 0.004),
    ('q', 0.004),
    ('o', -0.002),
    ('O', -0.009),
    ('i', -0.005),
    ('l', -0.006),
    ('I', -0.006),
    ('1', -0.006),
    ('|', -0.006),
    ('t', -0.004),
    ('f', -0.003),
    ('j', -0.003),
    (':', -0.003),
    (';', -0.003),
];

/// Code point ranges eligible for optical anchoring: Latin, Latin
/// Extended-A/B, Latin Extended Additional, Greek and Cyrillic.
pub static ANCHOR_BLOCKS: &[(u32, u32)] = &[
    (0x0000, 0x024F),
    (0x1E00, 0x1EFF),
    (0x0370, 0x03FF),
    (0x0400, 0x04FF),
];

fn lookup<K: PartialEq + Copy, V: Copy>(table: &[(K, V)], key: K) -> Option<V> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Anchor strength for a base letter, lowercase table first.
pub fn anchor_strength(base: char) -> Option<f64> {
    lookup(ANCHOR_LOWERCASE, base).or_else(|| lookup(ANCHOR_UPPERCASE, base))
}

/// Latin analogue of a Greek or Cyrillic letter.
pub fn mapped_base(c: char) -> Option<char> {
    lookup(BASE_LETTER_MAP, c)
}

pub fn micro_spacing(c: char) -> Option<f64> {
    lookup(MICRO_SPACING_EM, c)
}

pub fn in_anchor_blocks(c: char) -> bool {
    let cp = c as u32;
    ANCHOR_BLOCKS.iter().any(|&(lo, hi)| (lo..=hi).contains(&cp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_tables_cover_alphabet() {
        assert_eq!(ANCHOR_LOWERCASE.len(), 26);
        assert_eq!(ANCHOR_UPPERCASE.len(), 26);
        assert!(('a'..='z').all(|c| anchor_strength(c).is_some()));
        assert!(('A'..='Z').all(|c| anchor_strength(c).is_some()));
    }

    #[test]
    fn test_lookups() {
        assert_eq!(anchor_strength('o'), Some(0.32));
        assert_eq!(anchor_strength('I'), Some(0.0));
        assert_eq!(anchor_strength('1'), None);
        assert_eq!(mapped_base('Ω'), Some('O'));
        assert_eq!(mapped_base('у'), Some('y'));
        assert_eq!(micro_spacing('O'), Some(-0.009));
        assert_eq!(micro_spacing('x'), None);
    }

    #[test]
    fn test_anchor_blocks() {
        assert!(in_anchor_blocks('a'));
        assert!(in_anchor_blocks('ǿ'));
        assert!(in_anchor_blocks('ạ'));
        assert!(in_anchor_blocks('Ж'));
        assert!(!in_anchor_blocks('\u{2212}'));
        assert!(!in_anchor_blocks('ա'));
    }
}
