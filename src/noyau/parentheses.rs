// src/noyau/parentheses.rs
//
// Résolution des parenthèses, de la plus interne vers l’extérieur.
//
// Un seul passage gauche -> droite sur un texte modifié sur place :
// - '(' : on empile sa position
// - ')' : on dépile, le contenu entre les deux est déjà plat (les groupes internes
//   ont été remplacés plus tôt dans ce même passage), on le réduit et on remplace
//   le groupe entier (parenthèses comprises) par la valeur écrite en décimal.
// - on reprend juste après la valeur insérée.
//
// Un groupe doit être séparé de ses voisins par un opérateur : "2(3)", "(2)3" ou
// "(3)(4)" sont refusés, sinon les chiffres seraient collés au remplacement.

use super::reduction::{reduire, ErreurCalcul};
use super::validation::est_operateur;

/// Avant '(' : début, opérateur ou autre '('.
fn voisin_gauche_ok(travail: &str, debut: usize) -> bool {
    match travail[..debut].chars().next_back() {
        None => true,
        Some(c) => est_operateur(c) || c == '(',
    }
}

/// Après ')' : fin, opérateur ou autre ')'.
fn voisin_droit_ok(travail: &str, fin: usize) -> bool {
    match travail[fin + 1..].chars().next() {
        None => true,
        Some(c) => est_operateur(c) || c == ')',
    }
}

/// Rend un texte sans parenthèses équivalent à `texte` (normalisé).
///
/// Chaque groupe résolu ajoute une ligne `(contenu) → valeur` à `journal`.
pub fn resoudre_parentheses(texte: &str, journal: &mut String) -> Result<String, ErreurCalcul> {
    let mut travail = texte.to_string();
    let mut ouvertes: Vec<usize> = Vec::new();
    let mut i = 0;

    while i < travail.len() {
        match travail.as_bytes()[i] {
            b'(' => {
                ouvertes.push(i);
                i += 1;
            }
            b')' => {
                let debut = ouvertes.pop().ok_or(ErreurCalcul::Parentheses)?;
                if !voisin_gauche_ok(&travail, debut) || !voisin_droit_ok(&travail, i) {
                    return Err(ErreurCalcul::OperateurManquant { position: debut });
                }
                let contenu = &travail[debut + 1..i];
                let valeur = reduire(contenu)?;
                let rendu = valeur.to_string();

                log::trace!("({contenu}) -> {rendu}");
                if !journal.is_empty() {
                    journal.push('\n');
                }
                journal.push_str(&format!("({contenu}) → {rendu}"));

                travail.replace_range(debut..=i, &rendu);
                i = debut + rendu.len();
            }
            _ => i += 1,
        }
    }

    if !ouvertes.is_empty() {
        return Err(ErreurCalcul::Parentheses);
    }
    Ok(travail)
}
