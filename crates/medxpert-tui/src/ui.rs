use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use medxpert_core::PENDING_INDICATOR;
use unicode_width::UnicodeWidthChar;
use crate::app::App;
use crate::details::format_extra;

/// Parse a line of text and convert **bold** markdown to styled spans
fn parse_markdown_line(text: &str) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find("**") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("**") else {
            break;
        };

        if start > 0 {
            spans.push(Span::raw(rest[..start].to_string()));
        }
        let bold = &after[..end];
        if bold.is_empty() {
            spans.push(Span::raw("****"));
        } else {
            spans.push(Span::styled(
                bold.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        }
        rest = &after[end + 2..];
    }

    if !rest.is_empty() {
        spans.push(Span::raw(rest.to_string()));
    }

    if spans.is_empty() {
        Line::default()
    } else {
        Line::from(spans)
    }
}

/// Terminal columns taken by the first `cursor` chars of `input`.
/// Combining marks take no column.
fn cursor_column(input: &str, cursor: usize) -> u16 {
    let width: usize = input
        .chars()
        .take(cursor)
        .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
        .sum();
    width.min(u16::MAX as usize) as u16
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    let details = app
        .last_response
        .as_ref()
        .and_then(|r| r.payload.extra.as_ref())
        .map(format_extra)
        .unwrap_or_default();
    let details_height = if details.is_empty() {
        0
    } else {
        (details.len().min(8) + 2) as u16 // +2 for borders
    };

    // Main layout: header, chips, answer, details (if any), input, footer
    let [header_area, chips_area, answer_area, details_area, input_area, footer_area] =
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(details_height),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(area);

    render_header(app, frame, header_area);
    render_chips(app, frame, chips_area);
    render_answer(app, frame, answer_area);
    if details_height > 0 {
        render_details(&details, frame, details_area);
    }
    render_input(app, frame, input_area);
    render_footer(frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" MedXpert ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(app.client.base_url().to_string(), Style::default().fg(Color::Gray)),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_chips(app: &App, frame: &mut Frame, area: Rect) {
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);

    let mut spans = Vec::new();
    for (i, chip) in app.chips.iter().take(9).enumerate() {
        spans.push(Span::styled(format!(" F{} ", i + 1), key_style));
        spans.push(Span::raw(format!(" {}  ", chip.label)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Quick questions ");

    let chips = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(chips, area);
}

fn render_answer(app: &mut App, frame: &mut Frame, area: Rect) {
    app.answer_area = Some(area);

    let title = match app.last_response.as_ref().and_then(|r| r.kind.as_ref()) {
        Some(kind) => format!(" Answer [{}] ", kind.as_str()),
        None => " Answer ".to_string(),
    };
    let border_color = if app.is_pending() { Color::Yellow } else { Color::Cyan };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title);

    let text = if app.is_pending() && app.view.display == PENDING_INDICATOR {
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        Text::from(Span::styled(
            format!("Thinking{}", dots),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        ))
    } else if app.view.display.is_empty() {
        Text::from(Span::styled(
            "Ask a health question, or pick a quick question above...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Text::from(
            app.view
                .display
                .lines()
                .map(parse_markdown_line)
                .collect::<Vec<_>>(),
        )
    };

    let answer = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.view.display_scroll, 0));
    frame.render_widget(answer, area);
}

fn render_details(details: &[String], frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Details ");

    let lines: Vec<Line> = details.iter().map(|d| Line::from(d.as_str())).collect();
    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Ask [{}] ", app.view.language.display_name()));

    // Keep the cursor inside the box by scrolling long prompts
    let inner_width = area.width.saturating_sub(2);
    let cursor = cursor_column(&app.view.prompt_input, app.view.prompt_cursor);
    let offset = cursor.saturating_sub(inner_width.saturating_sub(1));

    let input = Paragraph::new(app.view.prompt_input.as_str())
        .block(block)
        .scroll((0, offset));
    frame.render_widget(input, area);

    frame.set_cursor_position((area.x + 1 + cursor - offset, area.y + 1));
}

fn render_footer(frame: &mut Frame, area: Rect) {
    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let hints = vec![
        Span::styled(" Enter ", key_style),
        Span::styled(" send ", label_style),
        Span::styled(" F1-F9 ", key_style),
        Span::styled(" quick question ", label_style),
        Span::styled(" Tab ", key_style),
        Span::styled(" language ", label_style),
        Span::styled(" ↑/↓ ", key_style),
        Span::styled(" scroll ", label_style),
        Span::styled(" Esc ", key_style),
        Span::styled(" quit ", label_style),
    ];

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}
