// src/noyau/expression.rs

use super::normalisation::normaliser;
use super::parentheses::resoudre_parentheses;
use super::reduction::{reduire, ErreurCalcul};
use super::validation::{verifier, Invalidite};

/// Une expression saisie : le texte tel que tapé (pour la validation, dont les
/// positions doivent correspondre à la saisie) et sa forme normalisée
/// (sans espaces, séparateur décimal '.') pour le calcul.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Expression {
    brut: String,
    texte: String,
}

impl Expression {
    pub fn new(texte: &str) -> Self {
        Self {
            brut: texte.to_string(),
            texte: normaliser(texte),
        }
    }

    /// Remplace l’expression courante.
    pub fn set_expression(&mut self, texte: &str) {
        self.brut = texte.to_string();
        self.texte = normaliser(texte);
    }

    pub fn texte(&self) -> &str {
        &self.texte
    }

    /// Parenthèses équilibrées et caractères autorisés, sur le texte tapé.
    pub fn is_correct(&self) -> Result<(), Invalidite> {
        verifier(&self.brut)
    }

    /// Valeur de l’expression. À n’appeler qu’après un `is_correct()` réussi :
    /// le résultat n’est pas garanti sinon.
    ///
    /// Une division par zéro rend [`super::reduction::SENTINELLE`].
    pub fn solve(&self) -> Result<f64, ErreurCalcul> {
        self.resoudre(&mut String::new()).map(|(_, valeur)| valeur)
    }

    /// Comme `solve`, en rendant aussi le texte aplati ; les groupes résolus
    /// sont ajoutés à `journal`.
    pub fn resoudre(&self, journal: &mut String) -> Result<(String, f64), ErreurCalcul> {
        let plat = resoudre_parentheses(&self.texte, journal)?;
        let valeur = reduire(&plat)?;
        Ok((plat, valeur))
    }
}
