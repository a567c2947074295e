//! Noyau : évaluation (pipeline réel)
//!
//! normalisation -> validation -> parenthèses (de l’intérieur vers l’extérieur)
//!        -> réduction du reste plat -> écriture décimale
//!
//! Utilisé par l’interface (valeur + démarche).

use super::expression::Expression;
use super::format::{est_sentinelle, format_decimal};

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub normalisee: String,
    pub groupes: String,
    pub aplatie: String,
    pub note: String,
}

/// API publique : évalue une expression déjà posée et retourne :
/// - la valeur écrite avec `decimales` chiffres après le point
/// - la démarche (texte normalisé, groupes résolus, reste plat)
///
/// Erreur : message lisible (validation ou évaluation).
pub fn evaluer(
    expression: &Expression,
    decimales: usize,
) -> Result<(String, DemarcheNoyau), String> {
    // 1) Normalisation (faite à la pose)
    log::debug!("expression normalisée: {:?}", expression.texte());

    // 2) Validation
    expression
        .is_correct()
        .map_err(|e| format!("Expression incorrecte ({e})"))?;

    // 3) Parenthèses puis 4) reste plat
    let mut groupes = String::new();
    let (aplatie, valeur) = expression
        .resoudre(&mut groupes)
        .map_err(|e| format!("Évaluation impossible ({e})"))?;
    log::debug!("{:?} = {valeur}", expression.texte());

    let note = if est_sentinelle(valeur) {
        "Division par zéro : valeur maximale rendue à la place du résultat.".to_string()
    } else {
        "Pipeline: normalisation → validation → parenthèses internes d’abord → * et / puis + et -."
            .to_string()
    };

    let d = DemarcheNoyau {
        normalisee: expression.texte().to_string(),
        groupes,
        aplatie,
        note,
    };

    Ok((format_decimal(valeur, decimales), d))
}
