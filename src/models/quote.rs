// ============================================================================
// Structure : Quote
// ============================================================================
// Prix dérivé d'une paire, prêt à afficher sur le board
//
// CONCEPTS RUST :
// 1. Composition : Quote reprend les métadonnées du SymbolInfo
// 2. Méthodes de formatage : le modèle sait produire ses strings d'affichage
// 3. f64 et précision : le nombre de décimales dépend de la classe d'actif
// ============================================================================

use crate::models::symbol::{change_decimals, price_decimals, AssetClass, SymbolInfo};

/// Un prix dérivé avec sa variation depuis le dernier rafraîchissement
///
/// CONCEPT : Delta directionnel
/// - delta = prix courant - dernier prix affiché (cache)
/// - Sert uniquement à colorer/signer la variation sur la carte
/// - Au premier affichage, delta = 0 (pas d'historique)
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// Code de la paire (ex: "EURUSD")
    pub pair: &'static str,

    /// Nom complet (ex: "Euro / US Dollar")
    pub name: &'static str,

    /// Classe d'actif (FX, Metal, Crypto)
    pub class: AssetClass,

    /// Prix dérivé de la table de taux
    pub price: f64,

    /// Variation depuis le dernier prix affiché
    pub delta: f64,
}

impl Quote {
    /// Crée une quote à partir des métadonnées et des prix courant/précédent
    pub fn new(symbol: &SymbolInfo, price: f64, previous: f64) -> Self {
        Self {
            pair: symbol.pair,
            name: symbol.name,
            class: symbol.class,
            price,
            delta: price - previous,
        }
    }

    /// Retourne true si la variation est positive ou nulle
    pub fn is_up(&self) -> bool {
        self.delta >= 0.0
    }

    /// Vérifie si la quote correspond à une recherche
    ///
    /// CONCEPT : Filtre insensible à la casse
    /// - La requête est déjà en majuscules (normalisée par l'appelant)
    /// - Match sur le code de la paire OU sur le nom complet
    pub fn matches(&self, query: &str) -> bool {
        self.pair.contains(query) || self.name.to_uppercase().contains(query)
    }

    /// Prix formaté avec la précision de la classe d'actif
    ///
    /// Format : "1.07527" (FX), "151.000" (JPY), "2222.22" (métaux/crypto)
    pub fn price_text(&self) -> String {
        format!("{:.*}", price_decimals(self.pair), self.price)
    }

    /// Variation formatée avec flèche directionnelle
    ///
    /// Format : "▲ 0.0004" ou "▼ 0.012"
    pub fn change_text(&self) -> String {
        let arrow = if self.is_up() { "▲" } else { "▼" };
        format!("{} {:.*}", arrow, change_decimals(self.pair), self.delta.abs())
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::symbol::BOARD_SYMBOLS;

    #[test]
    fn test_quote_delta() {
        let eurusd = &BOARD_SYMBOLS[0];
        let quote = Quote::new(eurusd, 1.0760, 1.0750);

        assert!((quote.delta - 0.001).abs() < 1e-12);
        assert!(quote.is_up());
    }

    #[test]
    fn test_quote_first_render_is_flat() {
        // Premier affichage : previous == price, delta nul, flèche haussière
        let eurusd = &BOARD_SYMBOLS[0];
        let quote = Quote::new(eurusd, 1.0753, 1.0753);

        assert_eq!(quote.delta, 0.0);
        assert!(quote.is_up());
    }

    #[test]
    fn test_price_text_precision() {
        let eurusd = &BOARD_SYMBOLS[0];
        let quote = Quote::new(eurusd, 1.075268817, 1.075268817);
        assert_eq!(quote.price_text(), "1.07527");

        let usdjpy = &BOARD_SYMBOLS[2];
        let quote = Quote::new(usdjpy, 151.0, 151.0);
        assert_eq!(quote.price_text(), "151.000");

        let xauusd = &BOARD_SYMBOLS[6];
        let quote = Quote::new(xauusd, 2222.222222, 2222.222222);
        assert_eq!(quote.price_text(), "2222.22");
    }

    #[test]
    fn test_matches_on_code_and_name() {
        let xauusd = &BOARD_SYMBOLS[6];
        let quote = Quote::new(xauusd, 2222.22, 2222.22);

        assert!(quote.matches("XAU"));
        assert!(quote.matches("GOLD"));
        assert!(!quote.matches("BITCOIN"));
    }

    #[test]
    fn test_change_text_down() {
        let eurusd = &BOARD_SYMBOLS[0];
        let quote = Quote::new(eurusd, 1.0740, 1.0750);

        // Flèche baissière, valeur absolue, 4 décimales pour une paire FX
        assert_eq!(quote.change_text(), "▼ 0.0010");
    }

    #[test]
    fn test_change_text_jpy_precision() {
        let usdjpy = &BOARD_SYMBOLS[2];
        let quote = Quote::new(usdjpy, 151.012, 151.0);

        // Paires JPY : 3 décimales pour la variation
        assert_eq!(quote.change_text(), "▲ 0.012");
    }
}
