// ============================================================================
// Module : ui
// ============================================================================
// Gère toute l'interface utilisateur (Terminal User Interface)
// ============================================================================

pub mod events;    // Gestion des événements clavier
pub mod board;     // Rendu du rate board (cartes, snapshot, recherche)
pub mod converter; // Rendu du convertisseur de devises

// Re-exports pour simplifier les imports
pub use events::{Event, EventHandler};
pub use board::render;
