// src/noyau/format.rs

use super::reduction::SENTINELLE;

/// Écrit `valeur` avec exactement `decimales` chiffres après le point.
///
/// La sentinelle de division par zéro est écrite en entier (pas de notation "inf").
pub fn format_decimal(valeur: f64, decimales: usize) -> String {
    format!("{valeur:.decimales$}")
}

/// Vrai si `valeur` est la sentinelle rendue pour une division par zéro.
pub fn est_sentinelle(valeur: f64) -> bool {
    valeur == SENTINELLE
}
