// ============================================================================
// Structure : RateTable
// ============================================================================
// Table des taux de base : prix de 1 USD exprimé dans chaque devise
//
// C'est la seule donnée mutable de l'application :
// - Les prix des paires sont DÉRIVÉS à la demande (ratio de deux taux)
// - La simulation de tick perturbe les taux en place
//
// CONCEPTS RUST :
// 1. HashMap<String, f64> : table de hachage owned
// 2. Option<f64> : un taux absent n'est pas une erreur, juste None
// 3. Generics avec trait bound : simulate_tick<R: Rng> pour tester
//    avec un générateur seedé (déterministe)
// ============================================================================

use std::collections::HashMap;

use rand::Rng;
use tracing::debug;

/// Codes dont le taux n'est PAS perturbé par la simulation de tick
///
/// CONCEPT : Valeurs "pegged" pour la démo
/// - Les métaux et le BTC restent fixes, seules les devises bougent
pub const PEGGED_CODES: [&str; 3] = ["XAU", "XAG", "BTC"];

/// Amplitude de la perturbation aléatoire (±0.1% par tick)
const TICK_AMPLITUDE: f64 = 0.001;

/// Table des taux de base relative à 1 USD
///
/// Invariant : toutes les valeurs sont strictement positives
#[derive(Debug, Clone)]
pub struct RateTable {
    /// code devise -> valeur de 1 USD dans cette devise
    rates: HashMap<String, f64>,
}

impl RateTable {
    /// Crée la table avec les valeurs de démo
    ///
    /// Valeurs approximatives, relatives à 1 USD :
    /// - XAU : 1 USD = 0.00045 oz d'or (~2220 $/oz)
    /// - XAG : 1 USD = 0.038 oz d'argent (~26 $/oz)
    /// - BTC : placeholder
    pub fn new() -> Self {
        let rates = [
            ("USD", 1.00),
            ("EUR", 0.93),
            ("GBP", 0.78),
            ("JPY", 151.0),
            ("CHF", 0.90),
            ("CAD", 1.36),
            ("AUD", 1.50),
            ("NZD", 1.67),
            ("XAU", 0.00045),
            ("XAG", 0.038),
            ("BTC", 0.000017),
        ]
        .into_iter()
        .map(|(code, value)| (code.to_string(), value))
        .collect();

        Self { rates }
    }

    /// Applique des taux personnalisés par-dessus les valeurs de démo
    ///
    /// CONCEPT : Overrides partiels
    /// - Seuls les codes fournis sont remplacés
    /// - Les overrides non positifs sont ignorés (invariant : taux > 0)
    /// - Permet aussi d'ajouter de nouvelles devises (ex: SEK)
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, f64>) {
        for (code, value) in overrides {
            if *value > 0.0 {
                debug!(code = %code, value = *value, "Applying rate override");
                self.rates.insert(code.to_uppercase(), *value);
            } else {
                debug!(code = %code, value = *value, "Ignoring non-positive rate override");
            }
        }
    }

    /// Retourne le taux de base d'un code, s'il existe
    pub fn get(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    /// Vérifie si un code est présent dans la table
    pub fn contains(&self, code: &str) -> bool {
        self.rates.contains_key(code)
    }

    /// Dérive le prix d'une paire "AAABBB" : taux(BBB) / taux(AAA)
    ///
    /// CONCEPT RUST : Option chaining avec ?
    /// - Chaque lookup peut échouer -> early return None
    /// - Pas d'exception, pas de null : le type dit tout
    ///
    /// Exemple : EURUSD = taux(USD) / taux(EUR) = 1.00 / 0.93 ≈ 1.0753
    pub fn pair_price(&self, pair: &str) -> Option<f64> {
        // Une paire est toujours composée de deux codes de 3 caractères
        if pair.len() != 6 || !pair.is_ascii() {
            return None;
        }

        let base = self.get(&pair[0..3])?;
        let quote = self.get(&pair[3..6])?;
        Some(quote / base)
    }

    /// Convertit un montant d'une devise vers une autre, via la base USD
    ///
    /// CONCEPT : Conversion en deux étapes
    /// - montant / taux(from) : repasse en USD
    /// - * taux(to) : convertit vers la cible
    /// - None si l'une des deux devises est inconnue
    pub fn convert(&self, amount: f64, from: &str, to: &str) -> Option<f64> {
        let from_rate = self.get(from)?;
        let to_rate = self.get(to)?;
        Some(amount / from_rate * to_rate)
    }

    /// Applique un tick simulé : perturbation uniforme ±0.1% de chaque taux
    ///
    /// CONCEPT RUST : RNG injecté en paramètre générique
    /// - R: Rng : n'importe quel générateur (thread_rng en prod, StdRng seedé en test)
    /// - Les codes "pegged" (XAU, XAG, BTC) ne bougent pas
    /// - Multiplication par (1 + u), u ∈ [-0.001, 0.001] : le taux reste positif
    pub fn simulate_tick<R: Rng>(&mut self, rng: &mut R) {
        for (code, value) in self.rates.iter_mut() {
            if PEGGED_CODES.contains(&code.as_str()) {
                continue;
            }

            let bump = rng.gen_range(-TICK_AMPLITUDE..=TICK_AMPLITUDE);
            *value *= 1.0 + bump;
        }

        debug!("Simulated tick applied to rate table");
    }

    /// Nombre de devises dans la table
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Vérifie si la table est vide
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

// ============================================================================
// Trait Default
// ============================================================================
// Convention Rust : si new() ne prend pas de paramètres, implémenter Default
// ============================================================================

impl Default for RateTable {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_table_has_demo_codes() {
        let table = RateTable::new();
        assert_eq!(table.len(), 11);
        assert_eq!(table.get("USD"), Some(1.00));
        assert_eq!(table.get("EUR"), Some(0.93));
        assert_eq!(table.get("SEK"), None);
    }

    #[test]
    fn test_pair_price_is_ratio_of_base_rates() {
        let table = RateTable::new();

        // EURUSD = taux(USD) / taux(EUR)
        let eurusd = table.pair_price("EURUSD").unwrap();
        assert!((eurusd - 1.00 / 0.93).abs() < 1e-12);

        // USDJPY = taux(JPY) / taux(USD)
        let usdjpy = table.pair_price("USDJPY").unwrap();
        assert!((usdjpy - 151.0).abs() < 1e-12);
    }

    #[test]
    fn test_pair_price_unknown_code() {
        let table = RateTable::new();
        assert!(table.pair_price("SEKUSD").is_none());
        assert!(table.pair_price("EURSEK").is_none());
        // Paire mal formée
        assert!(table.pair_price("EUR").is_none());
        assert!(table.pair_price("EURUSDX").is_none());
    }

    #[test]
    fn test_convert_through_usd_base() {
        let table = RateTable::new();

        // 100 EUR -> USD : 100 / 0.93 * 1.00
        let out = table.convert(100.0, "EUR", "USD").unwrap();
        assert!((out - 100.0 / 0.93).abs() < 1e-9);

        // 100 EUR -> JPY : 100 / 0.93 * 151.0
        let out = table.convert(100.0, "EUR", "JPY").unwrap();
        assert!((out - 100.0 / 0.93 * 151.0).abs() < 1e-9);
    }

    #[test]
    fn test_convert_unsupported_currency() {
        let table = RateTable::new();
        assert!(table.convert(100.0, "SEK", "USD").is_none());
        assert!(table.convert(100.0, "USD", "SEK").is_none());
    }

    #[test]
    fn test_simulate_tick_skips_pegged_codes() {
        let mut table = RateTable::new();
        let mut rng = StdRng::seed_from_u64(42);

        table.simulate_tick(&mut rng);

        // Les codes pegged n'ont pas bougé
        assert_eq!(table.get("XAU"), Some(0.00045));
        assert_eq!(table.get("XAG"), Some(0.038));
        assert_eq!(table.get("BTC"), Some(0.000017));
    }

    #[test]
    fn test_simulate_tick_stays_within_amplitude() {
        let mut table = RateTable::new();
        let mut rng = StdRng::seed_from_u64(7);

        let eur_before = table.get("EUR").unwrap();
        table.simulate_tick(&mut rng);
        let eur_after = table.get("EUR").unwrap();

        // Variation relative bornée par ±0.1%
        let rel = (eur_after - eur_before).abs() / eur_before;
        assert!(rel <= TICK_AMPLITUDE + 1e-12);
    }

    #[test]
    fn test_simulate_tick_keeps_rates_positive() {
        let mut table = RateTable::new();
        let mut rng = StdRng::seed_from_u64(1);

        // Beaucoup de ticks : les taux restent strictement positifs
        for _ in 0..1000 {
            table.simulate_tick(&mut rng);
        }

        for code in ["USD", "EUR", "GBP", "JPY", "CHF", "CAD", "AUD", "NZD"] {
            assert!(table.get(code).unwrap() > 0.0);
        }
    }

    #[test]
    fn test_apply_overrides() {
        let mut table = RateTable::new();
        let mut overrides = HashMap::new();
        overrides.insert("EUR".to_string(), 0.95);
        overrides.insert("SEK".to_string(), 10.5);
        overrides.insert("GBP".to_string(), -1.0); // ignoré : non positif

        table.apply_overrides(&overrides);

        assert_eq!(table.get("EUR"), Some(0.95));
        assert_eq!(table.get("SEK"), Some(10.5));
        assert_eq!(table.get("GBP"), Some(0.78)); // valeur de démo conservée
    }
}
