// ============================================================================
// Converter - Rendu de l'onglet convertisseur
// ============================================================================
// Équivalent TUI du formulaire de conversion de la page d'origine :
// un montant, une devise source, une devise cible, une ligne de résultat.
//
// CONCEPTS RATATUI :
// 1. Focus visuel : le champ actif est surligné (REVERSED)
// 2. Sélecteurs : ◂ EUR ▸ remplace le <select> HTML, ↑↓ fait défiler
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, ConverterFocus};
use crate::ui::board;

/// Dessine l'écran convertisseur complet (header, formulaire, footer)
pub fn render_converter(frame: &mut Frame, app: &App) {
    let chunks = board::create_layout(frame.size());

    board::render_header(frame, app, chunks[0]);
    render_form(frame, app, chunks[1]);
    render_converter_footer(frame, app, chunks[2]);
}

/// Dessine le formulaire de conversion
///
/// Lignes du formulaire :
/// - Amount : buffer de saisie avec curseur
/// - From / To : sélecteurs cycliques sur la liste fixe des devises
/// - Résultat : "100 EUR ≈ 107.5269 USD" ou "Unsupported currency."
fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Currency Converter ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Centre verticalement le formulaire (4 lignes utiles)
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1), // Amount
            Constraint::Length(1), // From
            Constraint::Length(1), // To
            Constraint::Length(1), // (vide)
            Constraint::Length(1), // Résultat
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(amount_line(app), rows[1]);
    frame.render_widget(selector_line(app, ConverterFocus::From), rows[2]);
    frame.render_widget(selector_line(app, ConverterFocus::To), rows[3]);
    frame.render_widget(result_line(app), rows[5]);
}

/// Construit la ligne du montant
///
/// CONCEPT : Focus visuel
/// - Champ actif : label surligné + curseur clignotant
/// - Buffer vide : "0" grisé (le formulaire d'origine convertit 0)
fn amount_line(app: &App) -> Paragraph<'_> {
    let focused = app.converter.focus == ConverterFocus::Amount;

    let label_style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let mut spans = vec![
        Span::styled(" Amount ", label_style),
        Span::raw("  "),
    ];

    if app.converter.amount_buffer.is_empty() {
        spans.push(Span::styled("0", Style::default().fg(Color::DarkGray)));
    } else {
        spans.push(Span::styled(
            app.converter.amount_buffer.as_str(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
    }

    if focused {
        spans.push(Span::styled(
            "█",
            Style::default().fg(Color::White).add_modifier(Modifier::SLOW_BLINK),
        ));
    }

    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}

/// Construit la ligne d'un sélecteur de devise (From ou To)
fn selector_line(app: &App, field: ConverterFocus) -> Paragraph<'_> {
    let (label, code) = match field {
        ConverterFocus::From => (" From   ", app.converter.from_code()),
        ConverterFocus::To => (" To     ", app.converter.to_code()),
        // Jamais appelé avec Amount ; on garde le match exhaustif
        ConverterFocus::Amount => (" ?      ", "?"),
    };

    let focused = app.converter.focus == field;

    let label_style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let arrows_style = if focused {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let spans = vec![
        Span::styled(label, label_style),
        Span::raw("  "),
        Span::styled("◂ ", arrows_style),
        Span::styled(
            code,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▸", arrows_style),
    ];

    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}

/// Construit la ligne de résultat
fn result_line(app: &App) -> Paragraph<'_> {
    let line = match app.converter.result.as_deref() {
        Some("Unsupported currency.") => Line::from(Span::styled(
            "Unsupported currency.",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Some(result) => Line::from(Span::styled(
            result,
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        None => Line::from(Span::styled(
            "Press [Enter] to convert",
            Style::default().fg(Color::DarkGray),
        )),
    };

    Paragraph::new(line).alignment(Alignment::Center)
}

/// Dessine le footer du convertisseur (raccourcis dédiés)
fn render_converter_footer(frame: &mut Frame, app: &App, area: Rect) {
    // Le two-step quit s'affiche aussi sur cet écran : on réutilise
    // le footer du board qui gère déjà la confirmation
    if app.is_awaiting_quit_confirmation() {
        board::render_footer(frame, app, area);
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let shortcuts = Line::from(vec![
        Span::styled("[←→]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw(" Field  "),
        Span::styled("[↑↓]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw(" Currency  "),
        Span::styled("[0-9 .]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw(" Amount  "),
        Span::styled("[Enter]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw(" Convert  "),
        Span::styled("[Tab]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw(" Switch  "),
        Span::styled("[q]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::raw(" Quit"),
    ]);

    let paragraph = Paragraph::new(vec![shortcuts])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
