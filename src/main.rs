// ============================================================================
// ForexBoard - Rate board TUI
// ============================================================================
// Board de taux de change statique (démo) : cartes de prix, snapshot,
// convertisseur, recherche de paire et simulation de ticks aléatoires.
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle infinie qui gère événements et rendering
// 3. RAII : restauration du terminal même en cas d'erreur
// 4. Single-threaded : aucun réseau, aucune concurrence — l'état vit
//    dans une seule structure App mutée par les handlers
// ============================================================================

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use forexboard::app::App;
use forexboard::config::Config;
use forexboard::ui::{events::EventHandler, render};

// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : Logging dans une app TUI
// - Les println! ne fonctionnent pas une fois le TUI lancé
// - On log vers un fichier à la place
// - Tracing : framework moderne de logging structuré
// - Rotation quotidienne automatique des logs
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// Les logs sont écrits dans :
/// - Linux/WSL : ~/.local/share/forexboard/logs/forexboard.log
/// - macOS : ~/Library/Application Support/forexboard/logs/forexboard.log
/// - Windows : C:\Users\<user>\AppData\Local\forexboard\logs\forexboard.log
/// (repli sur ./logs si le répertoire système est introuvable)
///
/// # Utilisation
/// ```bash
/// # Voir les logs en temps réel
/// tail -f ~/.local/share/forexboard/logs/forexboard.log
///
/// # Contrôler le niveau de log
/// RUST_LOG=debug cargo run
/// RUST_LOG=forexboard=trace cargo run
/// ```
fn init_logging() -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = dirs::data_local_dir()
        .map(|dir| dir.join("forexboard").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"));

    // Crée le répertoire s'il n'existe pas
    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    // Configure la rotation quotidienne des logs
    // CONCEPT : Log rotation
    // - Rotation::DAILY : nouveau fichier chaque jour
    // - Évite que les logs deviennent trop gros
    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "forexboard.log");

    // Configure le subscriber (receveur de logs)
    // CONCEPT : Builder pattern avec layers
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender) // Écrit dans le fichier
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true) // Inclut le module (ex: forexboard::app)
                .with_line_number(true), // Inclut le numéro de ligne
        )
        .with(
            // Filtre les logs par niveau
            // CONCEPT : EnvFilter
            // - RUST_LOG=debug : tous les logs debug+
            // - Par défaut : debug pour forexboard, info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forexboard=debug,info".into()),
        )
        .init();

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    // Initialize logging FIRST
    // CONCEPT : Logging avant tout le reste
    // - Si init échoue, on affiche l'erreur et continue quand même
    init_logging().unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    info!("ForexBoard starting up");

    // Charge la configuration (fichier optionnel, sinon valeurs par défaut)
    let config = Config::load().context("Échec du chargement de la configuration")?;
    debug!(tick_rate_ms = config.tick_rate_ms, overrides = config.rates.len(), "Config loaded");

    // Crée l'état de l'application (table de démo + overrides de config)
    let mut app = App::new(&config);

    // Setup du terminal en mode TUI
    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    // Crée le gestionnaire d'événements (le poll cadence l'horloge)
    let events = EventHandler::new(config.tick_rate_ms);

    // Exécute l'event loop
    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &events);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// CONCEPT : Game Loop / Event Loop Pattern
// - Loop infinie : while app.is_running()
// - À chaque itération :
//   1. Dessiner l'interface (render) — l'horloge GMT est lue au rendu
//   2. Traiter les événements (input)
// ============================================================================

/// Exécute la boucle principale de l'application
///
/// CONCEPT RUST : Emprunt mutable simple
/// - Pas de réseau, pas de worker : un seul thread, un seul &mut App
/// - Le timeout du poll d'événements fait office de tick d'horloge
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    while app.is_running() {
        // ========================================
        // 1. RENDER : Dessine l'interface
        // ========================================
        terminal.draw(|frame| render(frame, app))?;

        // ========================================
        // 2. INPUT : Traite les événements
        // ========================================
        match events.next() {
            Ok(event) => handle_event(app, event),
            Err(e) => {
                // Erreur lors de la lecture d'événement : loggée, non fatale
                error!(error = ?e, "Failed to read terminal event");
            }
        }
    }

    Ok(())
}

// ============================================================================
// Gestion des événements
// ============================================================================
// CONCEPT : Event Handler Pattern
// - Sépare la logique de gestion des événements
// - Modifie l'état de app selon l'événement et l'écran actif
// ============================================================================

/// Traite un événement et met à jour l'état de l'application
///
/// CONCEPT RUST : Pattern matching complexe avec guards
/// - Guard clauses (if) pour filtrer les événements
/// - Navigation contextuelle selon l'écran actuel :
///   les chiffres basculent les onglets sur le board, mais alimentent
///   le montant sur le convertisseur
fn handle_event(app: &mut App, event: forexboard::ui::events::Event) {
    use forexboard::app::ConverterFocus;
    use forexboard::ui::events::{
        get_char_from_event, is_amount_char_event, is_backspace_event, is_board_tab_event,
        is_converter_tab_event, is_down_event, is_enter_event, is_escape_event, is_left_event,
        is_quit_event, is_right_event, is_search_char_event, is_search_event, is_simulate_event,
        is_tab_event, is_up_event, Event,
    };

    match event {
        // Touche 'q' : quit confirmation two-step (sauf en mode saisie)
        // CONCEPT : Two-step confirmation pour éviter les quits accidentels
        // - Première pression : active confirm_quit
        // - Deuxième pression : quit réel
        Event::Key(_) if is_quit_event(&event) && !app.is_in_input_mode() => {
            if app.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                app.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                app.request_quit();
            }
        }

        // ========================================
        // Search Input Mode : Gestion de la saisie
        // ========================================

        // ESC : annuler la recherche (filtre précédent conservé)
        Event::Key(_) if is_escape_event(&event) && app.is_in_input_mode() => {
            info!("User cancelled search input");
            app.cancel_input();
        }

        // Enter : appliquer le filtre de recherche
        Event::Key(_) if is_enter_event(&event) && app.is_in_input_mode() => {
            info!(query = %app.input_buffer, "User applied search filter");
            app.submit_search();
        }

        // Backspace : supprimer le dernier caractère de la requête
        Event::Key(_) if is_backspace_event(&event) && app.is_in_input_mode() => {
            app.backspace();
        }

        // Caractères : ajouter à la requête
        Event::Key(_) if is_search_char_event(&event) && app.is_in_input_mode() => {
            if let Some(c) = get_char_from_event(&event) {
                app.append_char(c);
            }
        }

        // ========================================
        // Navigation entre onglets
        // ========================================

        // Tab : bascule board <-> convertisseur
        Event::Key(_) if is_tab_event(&event) && !app.is_in_input_mode() => {
            app.cancel_quit();
            debug!("User toggled tab");
            app.toggle_tab();
        }

        // '1' / '2' : sélection directe d'onglet (uniquement sur le board,
        // sur le convertisseur les chiffres alimentent le montant)
        Event::Key(_) if is_board_tab_event(&event) && app.is_on_board() => {
            app.cancel_quit();
            app.show_board();
        }
        Event::Key(_) if is_converter_tab_event(&event) && app.is_on_board() => {
            app.cancel_quit();
            debug!("User opened converter tab");
            app.show_converter();
        }

        // ========================================
        // Board : recherche et simulation
        // ========================================

        // '/' : ouvrir la recherche de paire
        Event::Key(_) if is_search_event(&event) && app.is_on_board() => {
            app.cancel_quit();
            info!("User opened search input");
            app.start_search();
        }

        // 's' : simuler un tick (perturbation aléatoire des taux)
        Event::Key(_) if is_simulate_event(&event) && app.is_on_board() => {
            app.cancel_quit();
            app.simulate_tick(&mut rand::thread_rng());
        }

        // ========================================
        // Convertisseur : focus, sélecteurs, montant
        // ========================================

        // ←→ (ou h/l) : déplacer le focus entre les champs
        Event::Key(_) if is_left_event(&event) && app.is_on_converter() => {
            app.cancel_quit();
            app.converter_focus_previous();
        }
        Event::Key(_) if is_right_event(&event) && app.is_on_converter() => {
            app.cancel_quit();
            app.converter_focus_next();
        }

        // ↑↓ (ou j/k) : faire défiler la devise du sélecteur focalisé
        Event::Key(_) if is_up_event(&event) && app.is_on_converter() => {
            app.cancel_quit();
            app.converter_cycle_up();
        }
        Event::Key(_) if is_down_event(&event) && app.is_on_converter() => {
            app.cancel_quit();
            app.converter_cycle_down();
        }

        // Enter : effectuer la conversion
        Event::Key(_) if is_enter_event(&event) && app.is_on_converter() => {
            app.cancel_quit();
            app.convert();
        }

        // Chiffres et '.' : éditer le montant (si le champ est focalisé)
        Event::Key(_)
            if is_amount_char_event(&event)
                && app.is_on_converter()
                && app.converter.focus == ConverterFocus::Amount =>
        {
            app.cancel_quit();
            if let Some(c) = get_char_from_event(&event) {
                app.converter_append_digit(c);
            }
        }

        // Backspace : supprimer le dernier caractère du montant
        Event::Key(_)
            if is_backspace_event(&event)
                && app.is_on_converter()
                && app.converter.focus == ConverterFocus::Amount =>
        {
            app.converter_backspace();
        }

        Event::Tick => {
            // Tick régulier : rien à mettre à jour, le prochain draw
            // relit l'horloge GMT
        }

        Event::Key(_) => {
            // Toute autre touche : annule la confirmation de quit si active
            app.cancel_quit();
        }
    }
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================
// CONCEPT RUST : Terminal raw mode
// - Raw mode : on reçoit tous les caractères directement
// - Alternate screen : écran secondaire (ne pollue pas l'historique)
// - Crossterm gère tout ça de manière cross-platform
//
// IMPORTANT : Toujours restaurer le terminal avant de quitter !
// ============================================================================

/// Configure le terminal en mode TUI
///
/// CONCEPT RUST : Error propagation avec ?
/// - Chaque opération peut échouer
/// - ? propage automatiquement les erreurs
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Active le raw mode
    enable_raw_mode()?;

    // Configure le terminal
    // CONCEPT : Alternate screen
    // - Écran secondaire qui ne pollue pas l'historique
    // - Quand on quitte, l'écran précédent est restauré
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Crée le backend crossterm puis le terminal ratatui
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Restaure le terminal à son état normal
///
/// CONCEPT : Cleanup et RAII
/// - Appelé dans main() même en cas d'erreur
/// - Restaure le terminal pour ne pas le laisser cassé
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    terminal.show_cursor()?;

    Ok(())
}

// ============================================================================
// API-ready hooks pour la v2
// ============================================================================
// Le board v1 est volontairement statique. La v2 remplacera la table de
// démo par un fetch périodique, normalisé en base USD pour le convertisseur :
//
//   async fn fetch_live(rates: &mut RateTable) -> Result<()> {
//       let res = reqwest::get("https://api.yourfeed.com/latest?base=USD&apikey=YOUR_KEY")
//           .await?
//           .json::<LiveRates>()
//           .await?;
//       rates.apply_overrides(&res.rates);
//       Ok(())
//   }
//
// Un worker thread (mpsc command/result, comme une watchlist classique)
// rafraîchira les taux toutes les 10s sans bloquer l'event loop.
// ============================================================================
