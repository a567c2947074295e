//! Noyau décimal
//!
//! Organisation interne :
//! - normalisation.rs : espaces retirés, ',' -> '.'
//! - validation.rs    : parenthèses équilibrées + caractères autorisés
//! - reduction.rs     : expression plate (* / puis + -), union-find des cases
//! - parentheses.rs   : groupes résolus de l’intérieur vers l’extérieur
//! - expression.rs    : Expression (set / is_correct / solve)
//! - format.rs        : écriture à N décimales, sentinelle
//! - eval.rs          : pipeline complet + démarche

pub mod eval;
pub mod expression;
pub mod format;
pub mod normalisation;
pub mod parentheses;
pub mod reduction;
pub mod validation;


#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use eval::evaluer;
pub use expression::Expression;
