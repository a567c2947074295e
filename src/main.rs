// src/main.rs
//
// Calculatrice décimale : point d’entrée NATIF + WEB (WASM)
// ----------------------------------------------------------
// - NATIF sans argument : fenêtre eframe
// - NATIF avec arguments : ligne de commande (l’expression = les arguments joints,
//   ou une ligne lue sur l’entrée standard si l’unique argument est "-")
// - WEB (wasm32) : eframe::WebRunner sur <canvas id="the_canvas_id">
//
// Logs : env_logger en natif (RUST_LOG=debug pour suivre le pipeline).

#![cfg_attr(target_arch = "wasm32", allow(unused_imports))]

use eframe::egui;

mod app;
mod noyau;

use app::AppCalc;

/// Titre unique (natif + web).
const TITRE_APP: &str = "Calculatrice décimale";

/* ------------------------ Entrée NATIF (PC) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        return cli::run(&args);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([480.0, 640.0])
            .with_min_inner_size([400.0, 540.0]),
        ..Default::default()
    };

    match eframe::run_native(
        TITRE_APP,
        options,
        Box::new(|_cc| Ok(Box::<AppCalc>::default())),
    ) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            log::error!("fenêtre impossible: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::io::{self, BufRead};
    use std::process::ExitCode;

    use crate::app::etat::DECIMALES_DEFAUT;
    use crate::noyau::format::{est_sentinelle, format_decimal};
    use crate::noyau::Expression;

    /// Évalue une expression et l’écrit à deux décimales.
    /// Expression refusée => message sur stderr + code de sortie non nul,
    /// mêmes libellés que l’interface ("Expression incorrecte (...)", "Évaluation impossible (...)").
    pub fn run(args: &[String]) -> ExitCode {
        let texte = if args.len() == 1 && args[0] == "-" {
            let mut ligne = String::new();
            if let Err(e) = io::stdin().lock().read_line(&mut ligne) {
                eprintln!("Lecture impossible ({e})");
                return ExitCode::FAILURE;
            }
            ligne.trim_end_matches(['\n', '\r']).to_string()
        } else {
            args.join(" ")
        };

        match evaluer_ligne(&texte) {
            Ok(resultat) => {
                println!("{resultat}");
                ExitCode::SUCCESS
            }
            Err(message) => {
                eprintln!("{message}");
                ExitCode::FAILURE
            }
        }
    }

    /// Résultat à deux décimales, ou le message à afficher sur stderr.
    fn evaluer_ligne(texte: &str) -> Result<String, String> {
        let expression = Expression::new(texte);
        expression
            .is_correct()
            .map_err(|raison| format!("Expression incorrecte ({raison})"))?;

        let valeur = expression
            .solve()
            .map_err(|e| format!("Évaluation impossible ({e})"))?;
        if est_sentinelle(valeur) {
            log::warn!("division par zéro dans {:?}", expression.texte());
        }
        Ok(format_decimal(valeur, DECIMALES_DEFAUT))
    }

}

/* ------------------------ Entrée WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
fn main() {
    // En wasm32, le démarrage réel passe par `start()` (wasm_bindgen).
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{AppCalc, TITRE_APP};

    use wasm_bindgen::JsCast;
    use web_sys::{window, HtmlCanvasElement};

    /// ID du canvas attendu dans index.html.
    const CANVAS_ID: &str = "the_canvas_id";

    /// Point d’entrée automatique au chargement de la page.
    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
        let w = window().ok_or_else(|| js_err("window() indisponible"))?;
        let d = w
            .document()
            .ok_or_else(|| js_err("document() indisponible"))?;

        d.set_title(TITRE_APP);

        let el = d
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| js_err("canvas introuvable (id incorrect dans index.html)"))?;

        let canvas: HtmlCanvasElement = el
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_err("l’élément trouvé n’est pas un <canvas>"))?;

        let web_options = eframe::WebOptions::default();

        eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|_cc| Ok(Box::<AppCalc>::default())),
            )
            .await
    }

    fn js_err(msg: &str) -> wasm_bindgen::JsValue {
        wasm_bindgen::JsValue::from_str(msg)
    }
}
