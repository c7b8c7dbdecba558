use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::{app::App, clock::Clock, metrics::format_wpm};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;

impl<R: Rng, C: Clock> Widget for &App<R, C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.session;

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_dim_style = Style::default().patch(dim_style).add_modifier(Modifier::ITALIC);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // wpm title
                Constraint::Length(3), // input box
                Constraint::Min(0),    // words
                Constraint::Length(1), // status
            ])
            .split(area);

        Paragraph::new(Span::styled(
            format_wpm(session.wpm()),
            Style::default().patch(bold_style).fg(Color::Cyan),
        ))
        .render(chunks[0], buf);

        // keep the end of long input visible, cursor included
        let inner_width = chunks[1].width.saturating_sub(2) as usize;
        let shown = tail_fitting(session.input(), inner_width.saturating_sub(1));
        let input_line = Line::from(vec![
            Span::raw(shown),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]);
        Paragraph::new(input_line)
            .block(Block::default().borders(Borders::ALL).title("Type here"))
            .render(chunks[1], buf);

        let items: Vec<ListItem> = session
            .displayed()
            .iter()
            .map(|word| {
                ListItem::new(vec![
                    Line::from(Span::styled(word.as_str(), bold_style)),
                    Line::from(""),
                ])
            })
            .collect();
        List::new(items)
            .block(Block::default().borders(Borders::NONE))
            .render(chunks[2], buf);

        Paragraph::new(Span::styled(
            format!(
                "{} words typed · (ctrl+u) clear · (esc)ape",
                session.match_count()
            ),
            italic_dim_style,
        ))
        .alignment(Alignment::Right)
        .render(chunks[3], buf);
    }
}

// Longest suffix of `s` that fits in `width` terminal columns
fn tail_fitting(s: &str, width: usize) -> &str {
    if s.width() <= width {
        return s;
    }
    let mut start = s.len();
    let mut used = 0;
    for (idx, ch) in s.char_indices().rev() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    &s[start..]
}
