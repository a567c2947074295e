// src/noyau/validation.rs
//
// Validation du texte brut (avant toute évaluation).
//
// Deux contrôles, dans cet ordre :
// - équilibre des parenthèses (compteur signé, jamais négatif, nul à la fin)
// - caractères autorisés : chiffres, + - * /, '.', ',', '(', ')', espace

use thiserror::Error;

/// Raison du refus d’une expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Invalidite {
    #[error("séquence de parenthèses invalide")]
    Parentheses,

    #[error("caractère interdit '{caractere}' en position {position}")]
    CaractereInterdit { caractere: char, position: usize },
}

pub fn est_operateur(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/')
}

fn est_autorise(c: char) -> bool {
    est_operateur(c) || c.is_ascii_digit() || matches!(c, '.' | ',' | '(' | ')' | ' ')
}

/// Vérifie une expression. `Ok(())` si elle peut être évaluée.
pub fn verifier(texte: &str) -> Result<(), Invalidite> {
    if !parentheses_equilibrees(texte) {
        return Err(Invalidite::Parentheses);
    }
    match texte.chars().enumerate().find(|&(_, c)| !est_autorise(c)) {
        Some((position, caractere)) => Err(Invalidite::CaractereInterdit {
            caractere,
            position,
        }),
        None => Ok(()),
    }
}

/// Équilibre des parenthèses : chaque ')' ferme une '(' antérieure, et toutes sont fermées.
pub fn parentheses_equilibrees(texte: &str) -> bool {
    let mut balance: i64 = 0;
    for c in texte.chars() {
        match c {
            '(' => balance += 1,
            ')' => {
                balance -= 1;
                if balance < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    balance == 0
}
