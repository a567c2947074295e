//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le noyau sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : sur une expression bien formée, `solve` donne la même valeur
//!   qu’un évaluateur de référence (descente récursive classique), sauf division par zéro.

use std::time::{Duration, Instant};

use super::expression::Expression;
use super::normalisation::normaliser;
use super::validation::parentheses_equilibrees;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_espaces(rng: &mut Rng) -> &'static str {
    match rng.pick(4) {
        0 => " ",
        1 => "   ",
        _ => "",
    }
}

/// Le signe est toujours permis : un facteur suit un opérateur, une '(' ou le début.
fn gen_nombre(rng: &mut Rng) -> String {
    let entier = rng.pick(100);
    let signe = if rng.pick(4) == 0 { "-" } else { "" };
    match rng.pick(3) {
        0 => format!("{signe}{entier}"),
        1 => format!("{signe}{entier}.{}", rng.pick(10)),
        _ => format!("{signe}{entier},{}", rng.pick(100)),
    }
}

fn gen_facteur(rng: &mut Rng, profondeur: u32) -> String {
    if profondeur == 0 || rng.pick(3) != 0 {
        return gen_nombre(rng);
    }
    if rng.pick(8) == 0 {
        return "()".to_string();
    }
    format!("({})", gen_expr(rng, profondeur - 1))
}

fn gen_expr(rng: &mut Rng, profondeur: u32) -> String {
    let n = 1 + rng.pick(4);
    let mut out = gen_facteur(rng, profondeur);
    for _ in 1..n {
        let op = ['+', '-', '*', '/'][rng.pick(4) as usize];
        out.push_str(gen_espaces(rng));
        out.push(op);
        out.push_str(gen_espaces(rng));
        out.push_str(&gen_facteur(rng, profondeur));
    }
    out
}

/* ------------------------ Évaluateur de référence ------------------------ */

/// Descente récursive sur le texte normalisé.
/// `None` si une division par zéro est rencontrée.
struct Reference<'a> {
    s: &'a [u8],
    i: usize,
}

impl Reference<'_> {
    fn eval(texte: &str) -> Option<f64> {
        let mut r = Reference {
            s: texte.as_bytes(),
            i: 0,
        };
        if r.s.is_empty() {
            return Some(0.0);
        }
        let v = r.expr()?;
        assert_eq!(r.i, r.s.len(), "reste non lu dans {texte:?}");
        Some(v)
    }

    fn peek(&self) -> Option<u8> {
        self.s.get(self.i).copied()
    }

    fn expr(&mut self) -> Option<f64> {
        let mut acc = self.terme()?;
        while let Some(c @ (b'+' | b'-')) = self.peek() {
            self.i += 1;
            let b = self.terme()?;
            acc = if c == b'+' { acc + b } else { acc - b };
        }
        Some(acc)
    }

    fn terme(&mut self) -> Option<f64> {
        let mut acc = self.facteur()?;
        while let Some(c @ (b'*' | b'/')) = self.peek() {
            self.i += 1;
            let b = self.facteur()?;
            if c == b'*' {
                acc *= b;
            } else {
                if b == 0.0 {
                    return None;
                }
                acc /= b;
            }
        }
        Some(acc)
    }

    fn facteur(&mut self) -> Option<f64> {
        if self.peek() == Some(b'(') {
            self.i += 1;
            let v = if self.peek() == Some(b')') {
                0.0
            } else {
                self.expr()?
            };
            assert_eq!(self.peek(), Some(b')'));
            self.i += 1;
            return Some(v);
        }
        let debut = self.i;
        if self.peek() == Some(b'-') {
            self.i += 1;
        }
        while matches!(self.peek(), Some(b'0'..=b'9' | b'.')) {
            self.i += 1;
        }
        let lit = std::str::from_utf8(&self.s[debut..self.i]).ok()?;
        Some(lit.parse::<f64>().unwrap_or_else(|_| panic!("littéral {lit:?}")))
    }
}

fn proches(a: f64, b: f64) -> bool {
    let echelle = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= 1e-9 * echelle
}

/* ------------------------ Campagnes ------------------------ */

#[test]
fn fuzz_parentheses_dyck() {
    let start = Instant::now();
    let mut rng = Rng::new(0xC0FFEE);

    for _ in 0..2_000 {
        budget(start, Duration::from_secs(5));

        let n = rng.pick(13);
        let s: String = (0..n).map(|_| if rng.coin() { '(' } else { ')' }).collect();

        // référence : pile de '(' en attente
        let mut pile = 0usize;
        let mut dyck = true;
        for c in s.chars() {
            if c == '(' {
                pile += 1;
            } else if pile == 0 {
                dyck = false;
                break;
            } else {
                pile -= 1;
            }
        }
        dyck &= pile == 0;

        assert_eq!(parentheses_equilibrees(&s), dyck, "s={s:?}");
        assert_eq!(Expression::new(&s).is_correct().is_ok(), dyck, "s={s:?}");
    }
}

#[test]
fn fuzz_caractere_interdit_toujours_refuse() {
    const INTERDITS: [char; 10] = ['a', 'x', '!', '^', '\t', 'π', '_', '%', '=', 'Z'];

    let start = Instant::now();
    let mut rng = Rng::new(42);

    for _ in 0..1_000 {
        budget(start, Duration::from_secs(5));

        let base = gen_expr(&mut rng, 3);
        let mut chars: Vec<char> = base.chars().collect();
        let pos = rng.pick(chars.len() as u32 + 1) as usize;
        let intrus = INTERDITS[rng.pick(INTERDITS.len() as u32) as usize];
        chars.insert(pos, intrus);

        // parfois on casse aussi les parenthèses : le refus doit tenir quand même
        if rng.pick(4) == 0 {
            chars.push(')');
        }

        let s: String = chars.into_iter().collect();
        assert!(Expression::new(&s).is_correct().is_err(), "s={s:?}");
    }
}

#[test]
fn fuzz_solve_contre_reference() {
    let start = Instant::now();
    let mut rng = Rng::new(0xDEC1_7A1E);
    let mut comparees = 0;

    for _ in 0..3_000 {
        budget(start, Duration::from_secs(10));

        let s = gen_expr(&mut rng, 4);
        let e = Expression::new(&s);
        assert!(e.is_correct().is_ok(), "s={s:?}");

        let Some(attendu) = Reference::eval(&normaliser(&s)) else {
            // division par zéro : seule la sentinelle est attendue quelque part
            continue;
        };

        let obtenu = e.solve().unwrap_or_else(|err| panic!("s={s:?} err={err}"));
        assert!(
            proches(obtenu, attendu),
            "s={s:?} obtenu={obtenu} attendu={attendu}"
        );
        comparees += 1;
    }

    // le générateur ne doit pas produire que des divisions par zéro
    assert!(comparees > 1_000, "trop peu de comparaisons: {comparees}");
}

#[test]
fn fuzz_deterministe() {
    let mut a = Rng::new(7);
    let mut b = Rng::new(7);
    for _ in 0..50 {
        let sa = gen_expr(&mut a, 3);
        let sb = gen_expr(&mut b, 3);
        assert_eq!(sa, sb);
        assert_eq!(Expression::new(&sa).solve(), Expression::new(&sb).solve());
    }
}
