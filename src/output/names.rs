// src/output/names.rs

use crate::config::NAME_PARTICLES;

/// Turn an all-caps name into "Capitalised" form.
///
/// The name is split on spaces, each part on `-`. Every hyphen piece keeps
/// its first character and lowercases the rest; pieces that are exactly a
/// particle (`VAN`, `VON`) are dropped from their group. A group made only of
/// particles becomes empty, which leaves a stray space in the result.
pub fn normalize_name_casing(raw: &str) -> String {
    raw.split(' ')
        .map(|part| {
            part.split('-')
                .filter(|piece| !NAME_PARTICLES.contains(piece))
                .map(capitalise)
                .collect::<Vec<_>>()
                .join("-")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalise(piece: &str) -> String {
    let mut chars = piece.chars();
    match chars.next() {
        Some(first) => first.to_string() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
