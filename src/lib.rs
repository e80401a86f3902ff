// ============================================================================
// ForexBoard - Library
// ============================================================================
// Expose les modules publics pour les exemples et tests
// ============================================================================

pub mod config; // Chargement du fichier de configuration JSON
pub mod models; // Structures de données (taux, paires, quotes)
pub mod app;    // État de l'application
pub mod ui;     // Interface utilisateur
