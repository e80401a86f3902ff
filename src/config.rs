// ============================================================================
// Module : config
// ============================================================================
// Chargement de la configuration utilisateur (fichier JSON optionnel)
//
// Le board fonctionne sans aucun fichier : les taux de démo et le tick rate
// par défaut suffisent. Un fichier de config permet seulement d'ajuster les
// taux de base et la cadence de la boucle d'événements.
//
// CONCEPTS RUST :
// 1. serde + #[serde(default)] : fichier partiel = valeurs par défaut
// 2. anyhow::Context : enrichir les erreurs d'I/O avec le chemin concerné
// 3. dirs : emplacement cross-platform du répertoire de config
// ============================================================================

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Tick rate par défaut de la boucle d'événements (ms)
/// 250ms : assez fin pour une horloge à la seconde, sans charger le CPU
const DEFAULT_TICK_RATE_MS: u64 = 250;

/// Configuration de l'application
///
/// CONCEPT RUST : #[serde(default)]
/// - Chaque champ absent du JSON prend sa valeur par défaut
/// - Un fichier `{}` est donc une config valide
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Timeout du poll d'événements, en millisecondes
    pub tick_rate_ms: u64,

    /// Overrides partiels de la table de taux (code -> taux de base)
    /// Ex: { "EUR": 0.95, "SEK": 10.5 }
    pub rates: HashMap<String, f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            rates: HashMap::new(),
        }
    }
}

impl Config {
    /// Chemin du fichier de config
    ///
    /// - Linux/WSL : ~/.config/forexboard/config.json
    /// - macOS : ~/Library/Application Support/forexboard/config.json
    /// - Windows : C:\Users\<user>\AppData\Roaming\forexboard\config.json
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("forexboard").join("config.json"))
    }

    /// Charge la config depuis l'emplacement par défaut
    ///
    /// CONCEPT : Fichier optionnel
    /// - Fichier absent : config par défaut (cas normal)
    /// - Fichier présent mais invalide : erreur avec contexte (on ne devine pas)
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => {
                info!(path = %path.display(), "Loading config file");
                Self::from_file(&path)
            }
            _ => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Charge et parse un fichier de config donné
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Échec de la lecture de {}", path.display()))?;

        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("Config JSON invalide : {}", path.display()))?;

        Ok(config)
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.tick_rate_ms, 250);
        assert!(config.rates.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "tick_rate_ms": 500,
            "rates": { "EUR": 0.95, "SEK": 10.5 }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.tick_rate_ms, 500);
        assert_eq!(config.rates.get("EUR"), Some(&0.95));
        assert_eq!(config.rates.get("SEK"), Some(&10.5));
    }

    #[test]
    fn test_parse_partial_config() {
        // Champs absents -> valeurs par défaut (serde(default))
        let json = r#"{ "rates": { "EUR": 0.95 } }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.tick_rate_ms, 250);
        assert_eq!(config.rates.len(), 1);
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.tick_rate_ms, 250);
        assert!(config.rates.is_empty());
    }

    #[test]
    fn test_from_file_missing() {
        let result = Config::from_file(Path::new("/nonexistent/config.json"));
        assert!(result.is_err());
    }
}
