// ============================================================================
// Board - Rendu de l'interface principale
// ============================================================================
// Dessine le rate board en utilisant les widgets de ratatui
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Widgets : composants UI (Block, Paragraph, Tabs, List, etc.)
// 3. Layout : découpage de l'espace en zones (grille de cartes)
// 4. Style : couleurs et attributs de texte
//
// L'équivalent TUI de la grille de cartes de prix de la page d'origine :
// chaque carte affiche code, nom, tag de classe, prix et variation colorée.
// ============================================================================

use chrono::{Datelike, Utc};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, Screen};
use crate::models::Quote;
use crate::ui::converter;

/// Nombre de cartes par ligne de la grille
const CARDS_PER_ROW: usize = 3;

/// Hauteur d'une carte (3 lignes de contenu + 2 bordures)
const CARD_HEIGHT: u16 = 5;

// ============================================================================
// Fonction principale de rendu
// ============================================================================

/// Dessine l'interface complète
///
/// CONCEPT RUST : Routing avec match sur enum
/// - Pattern matching sur app.current_screen
/// - Le compilateur garantit l'exhaustivité (tous les cas gérés)
///
/// # Arguments
/// * `frame` - Surface de dessin ratatui
/// * `app` - État de l'application
pub fn render(frame: &mut Frame, app: &App) {
    match app.current_screen {
        Screen::Board => {
            render_board(frame, app);
        }
        Screen::Converter => {
            converter::render_converter(frame, app);
        }
        Screen::SearchInput => {
            // Board en arrière-plan, ligne de saisie dans le footer
            render_search_input(frame, app);
        }
    }
}

/// Dessine l'écran board (grille de cartes + snapshot)
fn render_board(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());

    render_header(frame, app, chunks[0]);
    render_main_content(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);
}

// ============================================================================
// Layout : Découpage de l'écran
// ============================================================================
// CONCEPT RATATUI : Layout
// - split() découpe un Rect en plusieurs zones
// - Constraints définissent les tailles (Length, Min, Percentage)
// ============================================================================

/// Crée le layout principal (header, content, footer)
pub fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header : onglets + horloge
            Constraint::Min(0),    // Content : tout le reste
            Constraint::Length(3), // Footer : raccourcis + année
        ])
        .split(area)
        .to_vec()
}

// ============================================================================
// Header : Onglets et horloge GMT
// ============================================================================

/// Dessine le header : barre d'onglets à gauche, horloge GMT à droite
///
/// CONCEPT RATATUI : Widget Tabs
/// - Équivalent de la barre d'onglets de la page d'origine
/// - select() surligne l'onglet actif
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(16)])
        .split(area);

    // Onglet actif : le mode recherche garde le board surligné
    let selected = match app.current_screen {
        Screen::Converter => 1,
        _ => 0,
    };

    let tabs = Tabs::new(vec![" Rates ", " Converter "])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" ForexBoard ")
                .title_alignment(Alignment::Left),
        )
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, halves[0]);

    // Horloge GMT, rafraîchie par le tick de l'event loop
    // CONCEPT : Horloge lue au rendu
    // - Pas d'état dédié : Utc::now() au moment du draw suffit
    let clock = Paragraph::new(Line::from(Span::styled(
        format!("{} GMT", Utc::now().format("%H:%M:%S")),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    )
    .alignment(Alignment::Center);

    frame.render_widget(clock, halves[1]);
}

// ============================================================================
// Main Content : Grille de cartes + panneau snapshot
// ============================================================================

/// Dessine le contenu principal : cartes de prix à gauche, snapshot à droite
fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
        .split(area);

    render_cards(frame, app, halves[0]);
    render_snapshot(frame, app, halves[1]);
}

/// Dessine la grille de cartes de prix
///
/// CONCEPT : Grille de cartes
/// - Les quotes visibles (filtrées) sont découpées en lignes de 3
/// - Chaque carte est un Block indépendant avec son propre style
fn render_cards(frame: &mut Frame, app: &App, area: Rect) {
    let title = if app.search_query.is_empty() {
        " Live Rates ".to_string()
    } else {
        format!(" Live Rates — filter: {} ", app.search_query)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let quotes = app.visible_quotes();

    // Aucune paire ne correspond au filtre : message centré
    if quotes.is_empty() {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No pairs match the search",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(text).alignment(Alignment::Center);
        frame.render_widget(paragraph, inner);
        return;
    }

    // Découpe la zone en lignes de cartes
    // CONCEPT RUST : chunks() sur slice
    // - quotes.chunks(3) : groupes de 3 quotes max (dernière ligne partielle)
    let rows = quotes.chunks(CARDS_PER_ROW);

    let row_constraints: Vec<Constraint> = rows
        .clone()
        .map(|_| Constraint::Length(CARD_HEIGHT))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(row_constraints)
        .split(inner);

    for (row_index, row_quotes) in rows.enumerate() {
        // Trois colonnes par ligne, même pour une ligne partielle
        let card_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(33),
                Constraint::Percentage(33),
                Constraint::Percentage(34),
            ])
            .split(row_areas[row_index]);

        for (card_index, quote) in row_quotes.iter().enumerate() {
            render_card(frame, quote, card_areas[card_index]);
        }
    }
}

/// Dessine une carte de prix individuelle
///
/// Carte (équivalent de la card HTML d'origine) :
/// - Ligne 1 : code + nom, tag de classe à droite
/// - Ligne 2 : prix formaté + variation colorée (▲/▼)
/// - Ligne 3 : placeholder du mini chart (v2)
fn render_card(frame: &mut Frame, quote: &Quote, area: Rect) {
    // Vert si hausse (ou stable), rouge si baisse
    let change_color = if quote.is_up() { Color::Green } else { Color::Red };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let name_width = area.width.saturating_sub(12) as usize;
    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{:<8}", quote.pair),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{:<width$}", truncate(quote.name, name_width), width = name_width),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(
                format!("[{}]", quote.class.label()),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(vec![
            Span::styled(
                format!("{:<14}", quote.price_text()),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(quote.change_text(), Style::default().fg(change_color)),
        ]),
        Line::from(Span::styled(
            "mini chart (v2)",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
    ];

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// Tronque un nom avec ellipse s'il dépasse la largeur disponible
fn truncate(name: &str, max: usize) -> String {
    if max == 0 || name.chars().count() <= max {
        return name.to_string();
    }

    let truncated: String = name.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", truncated)
}

/// Dessine le panneau snapshot (top 5 des paires)
///
/// CONCEPT RATATUI : List widget
/// - Une ligne par paire : code à gauche, prix à droite
fn render_snapshot(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Market Snapshot ");

    let width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = app
        .snapshot_quotes()
        .iter()
        .map(|quote| {
            let price = quote.price_text();
            let pad = width.saturating_sub(quote.pair.len() + price.len());

            let line = Line::from(vec![
                Span::styled(quote.pair, Style::default().fg(Color::Gray)),
                Span::raw(" ".repeat(pad)),
                Span::styled(
                    price,
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

// ============================================================================
// Footer : Raccourcis et année
// ============================================================================

/// Dessine le footer avec les raccourcis clavier et l'année courante
///
/// CONCEPT : Confirmation de quit two-step
/// - Si app.is_awaiting_quit_confirmation(), affiche message d'avertissement
/// - Sinon, affiche les raccourcis normaux
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let shortcuts = if app.is_awaiting_quit_confirmation() {
        // Message de confirmation de quit
        // CONCEPT : Style avec BLINK pour attirer l'attention
        Line::from(vec![
            Span::styled(
                "⚠  Appuyez sur ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " à nouveau pour quitter, ou n'importe quelle autre touche pour annuler ⚠",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        // Shortcuts normaux avec différentes couleurs
        // CONCEPT RATATUI : Spans multiples dans une Line
        Line::from(vec![
            Span::styled("[Tab]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(" Switch  "),
            Span::styled("[/]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(" Search  "),
            Span::styled("[s]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" Simulate tick  "),
            Span::styled("[q]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" Quit  "),
            Span::styled(
                format!("© {} ForexBoard", Utc::now().year()),
                Style::default().fg(Color::DarkGray),
            ),
        ])
    };

    let paragraph = Paragraph::new(vec![shortcuts])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Search Input Mode : Saisie de la recherche
// ============================================================================

/// Dessine le board avec le mode recherche actif
///
/// CONCEPT : Modal input (Vim-like)
/// - Affiche le board en arrière-plan
/// - Affiche une ligne d'input en bas pour saisir la requête
/// - ESC annule, Enter applique le filtre
fn render_search_input(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());

    render_header(frame, app, chunks[0]);
    render_main_content(frame, app, chunks[1]);
    render_input_footer(frame, app, chunks[2]);
}

/// Dessine le footer en mode recherche avec la ligne de saisie
fn render_input_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green)); // Vert pour indiquer mode input

    let input_line = Line::from(vec![
        Span::styled(
            &app.input_prompt,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(&app.input_buffer, Style::default().fg(Color::White)),
        Span::styled(
            "█", // Curseur
            Style::default().fg(Color::White).add_modifier(Modifier::SLOW_BLINK),
        ),
    ]);

    let help_line = Line::from(vec![
        Span::styled(
            "[Enter]",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Apply filter  "),
        Span::styled(
            "[ESC]",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Cancel"),
    ]);

    let paragraph = Paragraph::new(vec![input_line, help_line])
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_name() {
        assert_eq!(truncate("Euro / US Dollar", 20), "Euro / US Dollar");
    }

    #[test]
    fn test_truncate_long_name() {
        let truncated = truncate("Australian Dollar / US Dollar", 10);
        assert_eq!(truncated.chars().count(), 10);
        assert!(truncated.ends_with('…'));
    }

    #[test]
    fn test_truncate_zero_width() {
        // Largeur nulle : on rend le nom tel quel plutôt que de paniquer
        assert_eq!(truncate("EURUSD", 0), "EURUSD");
    }

    #[test]
    fn test_layout_has_three_zones() {
        let chunks = create_layout(Rect::new(0, 0, 120, 40));
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].height, 3); // header
        assert_eq!(chunks[2].height, 3); // footer
    }
}
