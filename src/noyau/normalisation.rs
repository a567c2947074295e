// src/noyau/normalisation.rs

/// Retire les espaces et remplace chaque `,` par `.`.
///
/// Aucune validation ici : un texte mal formé passe tel quel (à la substitution près).
pub fn normaliser(brut: &str) -> String {
    brut.chars()
        .filter(|&c| c != ' ')
        .map(|c| if c == ',' { '.' } else { c })
        .collect()
}
