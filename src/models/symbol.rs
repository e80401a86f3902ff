// ============================================================================
// Structure : SymbolInfo
// ============================================================================
// Représente une paire affichée sur le board (devise, métal, crypto)
//
// CONCEPTS RUST :
// 1. #[derive(...)] : génère automatiquement l'implémentation de traits
//    - Debug : permet d'afficher la structure avec {:?}
//    - Clone : permet de dupliquer la valeur
//    - PartialEq : permet de comparer deux symboles avec ==
//
// 2. &'static str vs String :
//    - La liste des paires est fixe et connue à la compilation
//    - &'static str : string littérale dans le binaire, zéro allocation
// ============================================================================

use serde::{Deserialize, Serialize};

/// Classe d'actif d'une paire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetClass {
    Fx,     // Devise (ex: EURUSD)
    Metal,  // Métal précieux (ex: XAUUSD)
    Crypto, // Cryptomonnaie (ex: BTCUSD)
}

impl AssetClass {
    /// Retourne le tag affiché sur la carte de prix
    pub fn label(&self) -> &'static str {
        match self {
            AssetClass::Fx => "FX",
            AssetClass::Metal => "Metal",
            AssetClass::Crypto => "Crypto",
        }
    }
}

/// Métadonnées d'une paire affichée sur le board
///
/// CONCEPT : Données statiques
/// - La liste des paires n'est jamais mutée (contrairement à la table de taux)
/// - Seul le prix dérivé change au fil des ticks
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolInfo {
    /// Code de la paire (ex: "EURUSD")
    pub pair: &'static str,

    /// Nom complet (ex: "Euro / US Dollar")
    pub name: &'static str,

    /// Classe d'actif (FX, Metal, Crypto)
    pub class: AssetClass,
}

impl SymbolInfo {
    /// Code de la devise de base (3 premiers caractères)
    ///
    /// CONCEPT RUST : Slicing de string
    /// - &self.pair[0..3] : slice des 3 premiers octets
    /// - Sûr ici car les codes sont toujours en ASCII
    pub fn base(&self) -> &str {
        &self.pair[0..3]
    }

    /// Code de la devise de cotation (3 derniers caractères)
    pub fn quote(&self) -> &str {
        &self.pair[3..]
    }
}

// ============================================================================
// Liste des paires du board
// ============================================================================
// CONCEPT RUST : const avec array de structs
// - Connue à la compilation, aucune allocation au démarrage
// - L'ordre est l'ordre d'affichage sur le board
// ============================================================================

/// Les 9 paires affichées sur le board (ordre d'affichage)
pub const BOARD_SYMBOLS: [SymbolInfo; 9] = [
    SymbolInfo { pair: "EURUSD", name: "Euro / US Dollar", class: AssetClass::Fx },
    SymbolInfo { pair: "GBPUSD", name: "British Pound / US Dollar", class: AssetClass::Fx },
    SymbolInfo { pair: "USDJPY", name: "US Dollar / Japanese Yen", class: AssetClass::Fx },
    SymbolInfo { pair: "USDCHF", name: "US Dollar / Swiss Franc", class: AssetClass::Fx },
    SymbolInfo { pair: "USDCAD", name: "US Dollar / Canadian Dollar", class: AssetClass::Fx },
    SymbolInfo { pair: "AUDUSD", name: "Australian Dollar / US Dollar", class: AssetClass::Fx },
    SymbolInfo { pair: "XAUUSD", name: "Gold / US Dollar", class: AssetClass::Metal },
    SymbolInfo { pair: "XAGUSD", name: "Silver / US Dollar", class: AssetClass::Metal },
    SymbolInfo { pair: "BTCUSD", name: "Bitcoin / US Dollar", class: AssetClass::Crypto },
];

/// Les 5 paires du panneau snapshot (ordre d'affichage)
pub const SNAPSHOT_PAIRS: [&str; 5] = ["EURUSD", "GBPUSD", "USDJPY", "XAUUSD", "BTCUSD"];

/// Les devises proposées par le convertisseur (ordre des sélecteurs)
pub const CURRENCY_LIST: [&str; 11] = [
    "USD", "EUR", "GBP", "JPY", "CHF", "CAD", "AUD", "NZD", "XAU", "XAG", "BTC",
];

// ============================================================================
// Précision décimale par classe d'actif
// ============================================================================
// CONCEPT : "Pip precision"
// - Les paires cotées en JPY s'affichent avec moins de décimales
// - Les métaux et le BTC avec 2 décimales (gros prix)
// - Les paires FX classiques avec 5 décimales (pips)
// ============================================================================

/// Nombre de décimales pour le prix d'une paire sur le board
pub fn price_decimals(pair: &str) -> usize {
    if pair.ends_with("JPY") {
        3
    } else if pair.contains("XAU") || pair.contains("XAG") || pair.contains("BTC") {
        2
    } else {
        5
    }
}

/// Nombre de décimales pour la variation affichée à côté du prix
///
/// Règle héritée du board : 4 décimales quand le prix en utilise plus de 3,
/// sinon 3 (les paires JPY / métaux gardent une variation lisible)
pub fn change_decimals(pair: &str) -> usize {
    if price_decimals(pair) > 3 {
        4
    } else {
        3
    }
}

/// Nombre de décimales pour le résultat du convertisseur, selon la cible
pub fn convert_decimals(to: &str) -> usize {
    if to == "JPY" {
        2
    } else if matches!(to, "XAU" | "XAG" | "BTC") {
        6
    } else {
        4
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_and_quote() {
        let eurusd = &BOARD_SYMBOLS[0];
        assert_eq!(eurusd.base(), "EUR");
        assert_eq!(eurusd.quote(), "USD");

        let usdjpy = &BOARD_SYMBOLS[2];
        assert_eq!(usdjpy.base(), "USD");
        assert_eq!(usdjpy.quote(), "JPY");
    }

    #[test]
    fn test_price_decimals_per_class() {
        assert_eq!(price_decimals("EURUSD"), 5);
        assert_eq!(price_decimals("USDJPY"), 3);
        assert_eq!(price_decimals("XAUUSD"), 2);
        assert_eq!(price_decimals("XAGUSD"), 2);
        assert_eq!(price_decimals("BTCUSD"), 2);
    }

    #[test]
    fn test_change_decimals() {
        // 5 décimales de prix -> 4 pour la variation
        assert_eq!(change_decimals("EURUSD"), 4);
        // 3 décimales de prix (JPY) -> 3 pour la variation
        assert_eq!(change_decimals("USDJPY"), 3);
        // 2 décimales de prix (métaux/crypto) -> 3 pour la variation
        assert_eq!(change_decimals("XAUUSD"), 3);
    }

    #[test]
    fn test_convert_decimals() {
        assert_eq!(convert_decimals("JPY"), 2);
        assert_eq!(convert_decimals("XAU"), 6);
        assert_eq!(convert_decimals("BTC"), 6);
        assert_eq!(convert_decimals("USD"), 4);
    }

    #[test]
    fn test_snapshot_pairs_exist_on_board() {
        for pair in SNAPSHOT_PAIRS {
            assert!(BOARD_SYMBOLS.iter().any(|s| s.pair == pair));
        }
    }
}
