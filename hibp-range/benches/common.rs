use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Printable ASCII plus a few multi-byte characters, so the digest sees
/// passwords whose UTF-8 length differs from their char count.
const PASSWORD_CHARS: &[char] = &[
    'a', 'e', 'k', 'q', 'z', 'A', 'M', 'Z', '0', '3', '7', '9', '!', '#', '%', '?', '_', ' ',
    'é', 'ß', 'ø', 'Ж', '漢', '🔑',
];

/// Seeded passwords of 8 to 64 chars, reproducible across bench runs.
pub fn generate_random_passwords(count: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|_| {
            let len = rng.gen_range(8..=64);
            (0..len).filter_map(|_| PASSWORD_CHARS.choose(&mut rng)).collect()
        })
        .collect()
}

/// Builds a range body shaped like a padded API response: `lines` random
/// suffixes, a quarter of them zero-count padding, joined with CRLF.
pub fn generate_range_body(lines: usize) -> String {
    let mut rng = StdRng::seed_from_u64(7);
    (0..lines)
        .map(|i| {
            let suffix: String = (0..35)
                .map(|_| b"0123456789ABCDEF"[rng.gen_range(0..16)] as char)
                .collect();
            let count = if i % 4 == 0 { 0 } else { rng.gen_range(1..100_000u64) };
            format!("{suffix}:{count}")
        })
        .collect::<Vec<_>>()
        .join("\r\n")
}
