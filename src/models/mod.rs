// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données de l'application
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module publique (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod symbol; // Métadonnées des paires et règles de précision
pub mod rates;  // Table des taux de base (la seule donnée mutable)
pub mod quote;  // Prix dérivé avec variation, prêt à afficher

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use forexboard::models::rates::RateTable;
// On peut faire : use forexboard::models::RateTable;
pub use quote::Quote;
pub use rates::{RateTable, PEGGED_CODES};
pub use symbol::{
    change_decimals, convert_decimals, price_decimals, AssetClass, SymbolInfo, BOARD_SYMBOLS,
    CURRENCY_LIST, SNAPSHOT_PAIRS,
};
