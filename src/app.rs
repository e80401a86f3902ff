// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
// 3. Encapsulation : les composants UI lisent App, les handlers le modifient
//
// PATTERN : Cette structure suit le pattern "Application State"
// - Tous les composants de l'UI lisent depuis App
// - Toutes les modifications passent par les méthodes de App
// - Garantit la cohérence de l'état (quotes toujours alignées sur les taux)
// ============================================================================

use std::collections::HashMap;

use rand::Rng;
use tracing::{debug, info};

use crate::config::Config;
use crate::models::{convert_decimals, Quote, RateTable, BOARD_SYMBOLS, CURRENCY_LIST, SNAPSHOT_PAIRS};

// ============================================================================
// Enum : Screen
// ============================================================================
// CONCEPT RUST : Enums pour state machines
// - Représente les différents écrans (onglets) de l'application
// - Pattern "State Machine" : un seul écran actif à la fois
// - Le compilateur force à gérer tous les cas (exhaustivité)
// ============================================================================

/// Écrans de l'application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Onglet principal : grille de cartes de prix + panneau snapshot
    Board,

    /// Onglet convertisseur : montant, devise source, devise cible
    Converter,

    /// Mode saisie : capture la requête de recherche de paire
    /// CONCEPT : Modal input mode (Vim-like)
    /// - Capture les touches pour construire un buffer
    /// - Enter applique le filtre, ESC annule
    SearchInput,
}

/// Champ actif du convertisseur
///
/// CONCEPT : Focus cyclique
/// - ←→ (ou h/l) déplace le focus : Amount → From → To → Amount
/// - ↑↓ (ou j/k) fait défiler la devise du sélecteur focalisé
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConverterFocus {
    Amount,
    From,
    To,
}

impl ConverterFocus {
    /// Champ suivant (cycle)
    pub fn next(&self) -> Self {
        match self {
            ConverterFocus::Amount => ConverterFocus::From,
            ConverterFocus::From => ConverterFocus::To,
            ConverterFocus::To => ConverterFocus::Amount,
        }
    }

    /// Champ précédent (cycle inverse)
    pub fn previous(&self) -> Self {
        match self {
            ConverterFocus::Amount => ConverterFocus::To,
            ConverterFocus::From => ConverterFocus::Amount,
            ConverterFocus::To => ConverterFocus::From,
        }
    }
}

// ============================================================================
// Structure : ConverterState
// ============================================================================

/// État du convertisseur de devises
#[derive(Debug, Clone)]
pub struct ConverterState {
    /// Index de la devise source dans CURRENCY_LIST
    pub from_index: usize,

    /// Index de la devise cible dans CURRENCY_LIST
    pub to_index: usize,

    /// Montant saisi (buffer texte, parsé au moment de la conversion)
    /// Buffer vide = montant 0 (comme le champ vide du formulaire d'origine)
    pub amount_buffer: String,

    /// Champ actuellement focalisé
    pub focus: ConverterFocus,

    /// Dernière ligne de résultat affichée (None avant la première conversion)
    pub result: Option<String>,
}

impl ConverterState {
    /// Crée le convertisseur avec les valeurs par défaut : EUR -> USD
    pub fn new() -> Self {
        Self {
            // CONCEPT RUST : position() sur iterator
            // - Retrouve l'index du code dans la liste fixe des devises
            from_index: CURRENCY_LIST.iter().position(|c| *c == "EUR").unwrap_or(0),
            to_index: CURRENCY_LIST.iter().position(|c| *c == "USD").unwrap_or(0),
            amount_buffer: String::new(),
            focus: ConverterFocus::Amount,
            result: None,
        }
    }

    /// Code de la devise source
    pub fn from_code(&self) -> &'static str {
        CURRENCY_LIST[self.from_index]
    }

    /// Code de la devise cible
    pub fn to_code(&self) -> &'static str {
        CURRENCY_LIST[self.to_index]
    }

    /// Montant parsé depuis le buffer (buffer vide ou invalide = 0)
    ///
    /// CONCEPT RUST : parse() et unwrap_or
    /// - "100.5".parse::<f64>() : Result<f64, _>
    /// - Le formulaire d'origine traite le champ vide comme 0
    pub fn amount(&self) -> f64 {
        self.amount_buffer.parse().unwrap_or(0.0)
    }
}

impl Default for ConverterState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Structure : App
// ============================================================================

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Écran actuellement affiché
    pub current_screen: Screen,

    /// Indique si l'utilisateur a demandé à quitter (attend confirmation)
    /// CONCEPT : Two-step quit pour éviter les sorties accidentelles
    /// - Première pression de 'q' : confirm_quit = true
    /// - Deuxième pression de 'q' : running = false (quit réel)
    /// - N'importe quelle autre touche : confirm_quit = false (annulation)
    pub confirm_quit: bool,

    /// Table des taux de base (la seule donnée mutable du domaine)
    pub rates: RateTable,

    /// Quotes du board, recalculées à chaque rafraîchissement
    pub quotes: Vec<Quote>,

    /// Cache du dernier prix affiché par paire
    /// CONCEPT : Last-price cache
    /// - Sert uniquement à signer/colorer la prochaine variation
    /// - Écrasé à chaque rafraîchissement du board
    last_prices: HashMap<&'static str, f64>,

    /// Filtre de recherche appliqué au board (vide = toutes les paires)
    pub search_query: String,

    /// Buffer de saisie pour le mode SearchInput
    pub input_buffer: String,

    /// Prompt affiché en mode SearchInput
    pub input_prompt: String,

    /// État du convertisseur
    pub converter: ConverterState,
}

impl App {
    /// Crée l'application à partir de la configuration
    ///
    /// CONCEPT : Construction en deux temps
    /// - La table de taux reçoit d'abord les overrides de config
    /// - Puis un premier rafraîchissement peuple les quotes (delta nul)
    pub fn new(config: &Config) -> Self {
        let mut rates = RateTable::new();
        rates.apply_overrides(&config.rates);

        let mut app = Self {
            running: true,
            current_screen: Screen::Board,
            confirm_quit: false,
            rates,
            quotes: Vec::new(),
            last_prices: HashMap::new(),
            search_query: String::new(),
            input_buffer: String::new(),
            input_prompt: String::new(),
            converter: ConverterState::new(),
        };

        app.refresh_quotes();
        app
    }

    /// Quitte l'application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Vérifie si l'application doit continuer
    pub fn is_running(&self) -> bool {
        self.running
    }

    // ========================================================================
    // Board : quotes, snapshot et simulation de tick
    // ========================================================================

    /// Recalcule les quotes du board depuis la table de taux
    ///
    /// CONCEPT : Rendu "wholesale"
    /// - Pas de diff incrémental : tout le board est recalculé
    /// - Le delta se mesure contre le cache du dernier prix affiché
    /// - Premier passage : previous = prix courant, delta nul
    /// - Une paire non dérivable (code absent) est simplement ignorée
    pub fn refresh_quotes(&mut self) {
        self.quotes.clear();

        for symbol in &BOARD_SYMBOLS {
            let Some(price) = self.rates.pair_price(symbol.pair) else {
                debug!(pair = %symbol.pair, "Pair not derivable, skipping");
                continue;
            };

            let previous = self.last_prices.get(symbol.pair).copied().unwrap_or(price);
            self.quotes.push(Quote::new(symbol, price, previous));

            // Écrase le cache pour le prochain delta
            self.last_prices.insert(symbol.pair, price);
        }
    }

    /// Quotes visibles selon le filtre de recherche courant
    ///
    /// CONCEPT RUST : Retourner des références
    /// - Vec<&Quote> : pas de clone, juste des emprunts sur self.quotes
    /// - Requête vide : board complet
    pub fn visible_quotes(&self) -> Vec<&Quote> {
        if self.search_query.is_empty() {
            return self.quotes.iter().collect();
        }

        self.quotes
            .iter()
            .filter(|q| q.matches(&self.search_query))
            .collect()
    }

    /// Quotes du panneau snapshot (top 5, dans l'ordre fixe)
    pub fn snapshot_quotes(&self) -> Vec<&Quote> {
        SNAPSHOT_PAIRS
            .iter()
            .filter_map(|pair| self.quotes.iter().find(|q| q.pair == *pair))
            .collect()
    }

    /// Applique un tick simulé puis rafraîchit le board
    ///
    /// CONCEPT RUST : RNG injecté (testabilité)
    /// - En prod : rand::thread_rng()
    /// - En test : StdRng seedé, comportement déterministe
    pub fn simulate_tick<R: Rng>(&mut self, rng: &mut R) {
        info!("User triggered simulated tick");
        self.rates.simulate_tick(rng);
        self.refresh_quotes();
    }

    // ========================================================================
    // Navigation entre onglets
    // ========================================================================

    /// Affiche l'onglet board
    pub fn show_board(&mut self) {
        self.current_screen = Screen::Board;
    }

    /// Affiche l'onglet convertisseur
    pub fn show_converter(&mut self) {
        self.current_screen = Screen::Converter;
    }

    /// Bascule entre les deux onglets
    ///
    /// CONCEPT : Tab navigation
    /// - Équivalent TUI de la barre d'onglets de la page d'origine
    /// - Le mode SearchInput n'est pas un onglet : Tab y est ignoré
    pub fn toggle_tab(&mut self) {
        self.current_screen = match self.current_screen {
            Screen::Board => Screen::Converter,
            Screen::Converter => Screen::Board,
            Screen::SearchInput => Screen::SearchInput,
        };
    }

    /// Vérifie si on est sur le board
    pub fn is_on_board(&self) -> bool {
        self.current_screen == Screen::Board
    }

    /// Vérifie si on est sur le convertisseur
    pub fn is_on_converter(&self) -> bool {
        self.current_screen == Screen::Converter
    }

    // ========================================================================
    // Two-step quit
    // ========================================================================

    /// Demande la confirmation de quitter
    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    /// Annule la demande de quit
    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    /// Vérifie si on attend la confirmation de quit
    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    // ========================================================================
    // Search Input Mode
    // ========================================================================

    /// Entre en mode recherche
    ///
    /// CONCEPT : Modal input (Vim-like)
    /// - Le buffer repart de la requête courante (édition du filtre actif)
    pub fn start_search(&mut self) {
        self.current_screen = Screen::SearchInput;
        self.input_buffer = self.search_query.clone();
        self.input_prompt = "Search pair: ".to_string();
    }

    /// Annule le mode recherche et retourne au board (filtre inchangé)
    pub fn cancel_input(&mut self) {
        self.current_screen = Screen::Board;
        self.input_buffer.clear();
        self.input_prompt.clear();
    }

    /// Valide la recherche : applique le filtre et retourne au board
    ///
    /// CONCEPT : Normalisation de la requête
    /// - trim + uppercase, comme la barre de recherche d'origine
    /// - Requête vide = filtre levé (board complet)
    pub fn submit_search(&mut self) {
        self.search_query = self.input_buffer.trim().to_uppercase();
        self.current_screen = Screen::Board;
        self.input_buffer.clear();
        self.input_prompt.clear();

        debug!(query = %self.search_query, "Search filter applied");
    }

    /// Ajoute un caractère au buffer de saisie
    pub fn append_char(&mut self, c: char) {
        self.input_buffer.push(c);
    }

    /// Supprime le dernier caractère du buffer
    pub fn backspace(&mut self) {
        self.input_buffer.pop();
    }

    /// Vérifie si on est en mode saisie
    pub fn is_in_input_mode(&self) -> bool {
        self.current_screen == Screen::SearchInput
    }

    // ========================================================================
    // Convertisseur
    // ========================================================================

    /// Déplace le focus du convertisseur vers le champ suivant
    pub fn converter_focus_next(&mut self) {
        self.converter.focus = self.converter.focus.next();
    }

    /// Déplace le focus du convertisseur vers le champ précédent
    pub fn converter_focus_previous(&mut self) {
        self.converter.focus = self.converter.focus.previous();
    }

    /// Fait défiler la devise du sélecteur focalisé (vers le bas de la liste)
    ///
    /// CONCEPT : Cycle avec modulo
    /// - (index + 1) % len : wrap en fin de liste
    /// - Sans effet quand le focus est sur le montant
    pub fn converter_cycle_down(&mut self) {
        match self.converter.focus {
            ConverterFocus::From => {
                self.converter.from_index = (self.converter.from_index + 1) % CURRENCY_LIST.len();
            }
            ConverterFocus::To => {
                self.converter.to_index = (self.converter.to_index + 1) % CURRENCY_LIST.len();
            }
            ConverterFocus::Amount => {}
        }
    }

    /// Fait défiler la devise du sélecteur focalisé (vers le haut de la liste)
    pub fn converter_cycle_up(&mut self) {
        let len = CURRENCY_LIST.len();
        match self.converter.focus {
            ConverterFocus::From => {
                self.converter.from_index = (self.converter.from_index + len - 1) % len;
            }
            ConverterFocus::To => {
                self.converter.to_index = (self.converter.to_index + len - 1) % len;
            }
            ConverterFocus::Amount => {}
        }
    }

    /// Ajoute un chiffre (ou le point décimal) au montant
    ///
    /// Le filtrage des caractères est fait par le handler d'événements ;
    /// ici on accepte le caractère tel quel dans le buffer
    pub fn converter_append_digit(&mut self, c: char) {
        self.converter.amount_buffer.push(c);
    }

    /// Supprime le dernier caractère du montant
    pub fn converter_backspace(&mut self) {
        self.converter.amount_buffer.pop();
    }

    /// Effectue la conversion et stocke la ligne de résultat
    ///
    /// CONCEPT : Mapper None vers un message utilisateur
    /// - RateTable::convert retourne None si une devise est inconnue
    /// - L'UI affiche alors "Unsupported currency." (message d'origine)
    ///
    /// Format du résultat : "100 EUR ≈ 107.5269 USD"
    pub fn convert(&mut self) {
        let amount = self.converter.amount();
        let from = self.converter.from_code();
        let to = self.converter.to_code();

        self.converter.result = match self.rates.convert(amount, from, to) {
            Some(out) => {
                info!(amount, from, to, out, "Conversion performed");
                Some(format!(
                    "{} {} ≈ {:.*} {}",
                    amount,
                    from,
                    convert_decimals(to),
                    out,
                    to
                ))
            }
            None => {
                info!(from, to, "Conversion with unsupported currency");
                Some("Unsupported currency.".to_string())
            }
        };
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

    fn test_app() -> App {
        App::new(&Config::default())
    }

    #[test]
    fn test_app_creation() {
        let app = test_app();
        assert!(app.is_running());
        assert!(app.is_on_board());
        // Les 9 paires du board sont dérivables avec la table de démo
        assert_eq!(app.quotes.len(), 9);
    }

    #[test]
    fn test_first_refresh_has_flat_deltas() {
        let app = test_app();
        for quote in &app.quotes {
            assert_eq!(quote.delta, 0.0);
        }
    }

    #[test]
    fn test_simulate_tick_updates_deltas() {
        let mut app = test_app();
        let mut rng = StdRng::seed_from_u64(42);

        app.simulate_tick(&mut rng);

        // Après un tick, au moins une paire FX a bougé
        assert!(app.quotes.iter().any(|q| q.delta != 0.0));

        // Toutes les paires restent dérivables
        assert_eq!(app.quotes.len(), 9);
    }

    #[test]
    fn test_search_filter() {
        let mut app = test_app();

        app.start_search();
        assert!(app.is_in_input_mode());

        for c in "usd".chars() {
            app.append_char(c);
        }
        app.submit_search();

        assert!(app.is_on_board());
        assert_eq!(app.search_query, "USD");
        // Toutes les paires du board contiennent USD
        assert_eq!(app.visible_quotes().len(), 9);

        // Filtre par nom complet
        app.start_search();
        app.input_buffer = "gold".to_string();
        app.submit_search();
        let visible = app.visible_quotes();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].pair, "XAUUSD");
    }

    #[test]
    fn test_empty_search_restores_board() {
        let mut app = test_app();
        app.start_search();
        app.input_buffer = "JPY".to_string();
        app.submit_search();
        assert_eq!(app.visible_quotes().len(), 1);

        // Requête vide : filtre levé
        app.start_search();
        app.input_buffer.clear();
        app.submit_search();
        assert_eq!(app.visible_quotes().len(), 9);
    }

    #[test]
    fn test_cancel_search_keeps_previous_filter() {
        let mut app = test_app();
        app.start_search();
        app.input_buffer = "JPY".to_string();
        app.submit_search();

        // On rentre en recherche puis on annule : le filtre reste JPY
        app.start_search();
        app.input_buffer = "EUR".to_string();
        app.cancel_input();

        assert_eq!(app.search_query, "JPY");
    }

    #[test]
    fn test_snapshot_order() {
        let app = test_app();
        let snapshot = app.snapshot_quotes();

        assert_eq!(snapshot.len(), 5);
        let pairs: Vec<&str> = snapshot.iter().map(|q| q.pair).collect();
        assert_eq!(pairs, vec!["EURUSD", "GBPUSD", "USDJPY", "XAUUSD", "BTCUSD"]);
    }

    #[test]
    fn test_tab_navigation() {
        let mut app = test_app();
        assert!(app.is_on_board());

        app.toggle_tab();
        assert!(app.is_on_converter());

        app.toggle_tab();
        assert!(app.is_on_board());
    }

    #[test]
    fn test_two_step_quit() {
        let mut app = test_app();

        app.request_quit();
        assert!(app.is_awaiting_quit_confirmation());
        assert!(app.is_running());

        app.quit();
        assert!(!app.is_running());
    }

    #[test]
    fn test_converter_defaults() {
        let app = test_app();
        assert_eq!(app.converter.from_code(), "EUR");
        assert_eq!(app.converter.to_code(), "USD");
        assert_eq!(app.converter.amount(), 0.0); // buffer vide = 0
    }

    #[test]
    fn test_converter_focus_cycle() {
        let mut app = test_app();
        assert_eq!(app.converter.focus, ConverterFocus::Amount);

        app.converter_focus_next();
        assert_eq!(app.converter.focus, ConverterFocus::From);
        app.converter_focus_next();
        assert_eq!(app.converter.focus, ConverterFocus::To);
        app.converter_focus_next();
        assert_eq!(app.converter.focus, ConverterFocus::Amount);

        app.converter_focus_previous();
        assert_eq!(app.converter.focus, ConverterFocus::To);
    }

    #[test]
    fn test_converter_currency_cycle_wraps() {
        let mut app = test_app();
        app.converter.focus = ConverterFocus::To;
        app.converter.to_index = 0; // USD

        app.converter_cycle_up();
        // Wrap vers la fin de la liste : BTC
        assert_eq!(app.converter.to_code(), "BTC");

        app.converter_cycle_down();
        assert_eq!(app.converter.to_code(), "USD");
    }

    #[test]
    fn test_convert_eur_to_usd() {
        let mut app = test_app();
        for c in "100".chars() {
            app.converter_append_digit(c);
        }

        app.convert();

        // 100 / 0.93 * 1.00 = 107.5269 (4 décimales pour USD)
        assert_eq!(
            app.converter.result.as_deref(),
            Some("100 EUR ≈ 107.5269 USD")
        );
    }

    #[test]
    fn test_convert_to_jpy_precision() {
        let mut app = test_app();
        app.converter.amount_buffer = "100".to_string();
        app.converter.to_index = CURRENCY_LIST.iter().position(|c| *c == "JPY").unwrap();

        app.convert();

        // 100 / 0.93 * 151.0 = 16236.56 (2 décimales pour JPY)
        assert_eq!(
            app.converter.result.as_deref(),
            Some("100 EUR ≈ 16236.56 JPY")
        );
    }

    #[test]
    fn test_convert_empty_amount_is_zero() {
        let mut app = test_app();
        app.convert();

        assert_eq!(app.converter.result.as_deref(), Some("0 EUR ≈ 0.0000 USD"));
    }
}
