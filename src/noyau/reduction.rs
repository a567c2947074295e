// src/noyau/reduction.rs
//
// Réduction d’une expression "plate" (sans parenthèses, déjà normalisée).
//
// 1) Lecture : une liste de nombres + une liste d’opérations (op, case gauche, case droite).
//    - '-' est un signe (collé au nombre) en tête de texte ou juste après un opérateur.
//    - tout autre caractère non-opérateur appartient au nombre en cours.
// 2) Réduction : * et / d’abord, puis + et -, dans l’ordre d’apparition à l’intérieur
//    de chaque palier. Les cases déjà réduites sont fusionnées (union-find), la valeur
//    vivante d’un groupe est portée par sa racine.
//
// Division par zéro : la réduction s’arrête et renvoie la sentinelle (f64::MAX).

use num_traits::Float;
use thiserror::Error;

use super::validation::est_operateur;

/// Valeur rendue à la place d’une division par zéro.
pub const SENTINELLE: f64 = f64::MAX;

/// Échec d’évaluation (texte accepté par la validation mais non interprétable).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurCalcul {
    #[error("parenthèses non appariées")]
    Parentheses,

    #[error("nombre invalide: {texte:?}")]
    NombreInvalide { texte: String },

    #[error("opérande manquant après '{operation}'")]
    OperandeManquant { operation: char },

    /// Groupe collé à un nombre ou à un autre groupe ; `position` est celle de sa '('.
    #[error("opérateur manquant autour de la parenthèse en position {position}")]
    OperateurManquant { position: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Plus,
    Moins,
    Fois,
    Divise,
}

impl Operation {
    fn depuis(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operation::Plus),
            '-' => Some(Operation::Moins),
            '*' => Some(Operation::Fois),
            '/' => Some(Operation::Divise),
            _ => None,
        }
    }

    fn symbole(self) -> char {
        match self {
            Operation::Plus => '+',
            Operation::Moins => '-',
            Operation::Fois => '*',
            Operation::Divise => '/',
        }
    }

    /// 0 = réduit en premier.
    fn palier(self) -> u8 {
        match self {
            Operation::Fois | Operation::Divise => 0,
            Operation::Plus | Operation::Moins => 1,
        }
    }

    /// `None` pour une division par zéro.
    pub fn appliquer<F: Float>(self, a: F, b: F) -> Option<F> {
        match self {
            Operation::Plus => Some(a + b),
            Operation::Moins => Some(a - b),
            Operation::Fois => Some(a * b),
            Operation::Divise => {
                if b.is_zero() {
                    None
                } else {
                    Some(a / b)
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Entree {
    op: Operation,
    gauche: usize,
    droite: usize,
}

/// Union-find des cases : chaque groupe de cases contiguës déjà réduites
/// partage une racine, qui porte la valeur à jour.
struct Alias {
    parent: Vec<usize>,
    valeur: Vec<f64>,
}

impl Alias {
    fn new(nombres: Vec<f64>) -> Self {
        Self {
            parent: (0..nombres.len()).collect(),
            valeur: nombres,
        }
    }

    fn racine(&mut self, case: usize) -> usize {
        let mut r = case;
        while self.parent[r] != r {
            r = self.parent[r];
        }
        // compression de chemin
        let mut c = case;
        while self.parent[c] != r {
            let suivant = self.parent[c];
            self.parent[c] = r;
            c = suivant;
        }
        r
    }

    fn valeur(&mut self, case: usize) -> f64 {
        let r = self.racine(case);
        self.valeur[r]
    }

    /// Fusionne les deux groupes ; la plus petite racine devient celle du groupe.
    fn fusionner(&mut self, a: usize, b: usize, v: f64) {
        let ra = self.racine(a);
        let rb = self.racine(b);
        let (basse, haute) = if ra <= rb { (ra, rb) } else { (rb, ra) };
        self.parent[haute] = basse;
        self.valeur[basse] = v;
    }
}

fn fermer_nombre(tampon: &mut String, nombres: &mut Vec<f64>) -> Result<(), ErreurCalcul> {
    let v = tampon
        .parse::<f64>()
        .map_err(|_| ErreurCalcul::NombreInvalide {
            texte: tampon.clone(),
        })?;
    nombres.push(v);
    tampon.clear();
    Ok(())
}

fn lire(texte: &str) -> Result<(Vec<f64>, Vec<Entree>), ErreurCalcul> {
    let mut nombres: Vec<f64> = Vec::new();
    let mut entrees: Vec<Entree> = Vec::new();
    let mut tampon = String::new();
    let mut precedent: Option<char> = None;

    for c in texte.chars() {
        match Operation::depuis(c) {
            Some(Operation::Moins) if precedent.map_or(true, est_operateur) => tampon.push(c),
            Some(op) => {
                fermer_nombre(&mut tampon, &mut nombres)?;
                entrees.push(Entree {
                    op,
                    gauche: nombres.len() - 1,
                    droite: nombres.len(),
                });
            }
            None => tampon.push(c),
        }
        precedent = Some(c);
    }
    if !tampon.is_empty() {
        fermer_nombre(&mut tampon, &mut nombres)?;
    }

    Ok((nombres, entrees))
}

/// Évalue une expression plate. Texte vide => 0.
pub fn reduire(texte: &str) -> Result<f64, ErreurCalcul> {
    let (nombres, mut entrees) = lire(texte)?;

    if entrees.is_empty() {
        return Ok(nombres.first().copied().unwrap_or(0.0));
    }
    if let Some(e) = entrees.iter().find(|e| e.droite >= nombres.len()) {
        return Err(ErreurCalcul::OperandeManquant {
            operation: e.op.symbole(),
        });
    }

    // tri stable : l’ordre d’apparition est conservé dans chaque palier
    entrees.sort_by_key(|e| e.op.palier());

    let mut alias = Alias::new(nombres);
    for e in &entrees {
        let a = alias.valeur(e.gauche);
        let b = alias.valeur(e.droite);
        let Some(v) = e.op.appliquer(a, b) else {
            log::debug!("division par zéro dans {texte:?}, sentinelle rendue");
            return Ok(SENTINELLE);
        };
        log::trace!("{a} {} {b} = {v}", e.op.symbole());
        alias.fusionner(e.gauche, e.droite, v);
    }

    Ok(alias.valeur(0))
}
