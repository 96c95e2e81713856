pub mod layout;

use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::{
    app::App,
    session::{target_label, Status},
    ui::layout::AppLayout,
    util::format_elapsed,
};

const NOTICE_WIDTH: u16 = 44;
const NOTICE_HEIGHT: u16 = 5;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = AppLayout::new(area);

        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);

        let status_style = match self.status() {
            Some(Status::Over) => bold_style.fg(Color::Red),
            Some(Status::Cleared) => bold_style.fg(Color::Green),
            _ => bold_style,
        };
        Paragraph::new(Span::styled(self.status_label(), status_style))
            .alignment(Alignment::Center)
            .render(layout.status, buf);

        let input_line = if self.input.is_empty() {
            Line::from(vec![
                Span::styled(" ", dim_style.add_modifier(Modifier::UNDERLINED)),
                Span::styled("Enter Points", dim_style.add_modifier(Modifier::ITALIC)),
            ])
        } else {
            Line::from(vec![
                Span::raw(self.input.clone()),
                Span::styled(" ", dim_style.add_modifier(Modifier::UNDERLINED)),
            ])
        };
        Paragraph::new(input_line)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled("Point:", bold_style)),
            )
            .render(layout.input, buf);

        Paragraph::new(Line::from(vec![
            Span::styled("Time: ", bold_style),
            Span::styled(format_elapsed(self.game.elapsed_ms()), bold_style),
        ]))
        .render(layout.time, buf);

        Paragraph::new(Span::styled("Play", bold_style))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            )
            .render(layout.play_button, buf);

        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(" Esc to quit ", dim_style))
            .render(layout.board, buf);

        render_targets(self, &layout, buf);

        if let Some(message) = &self.notice {
            render_notice(message, area, buf);
        }
    }
}

fn render_targets(app: &App, layout: &AppLayout, buf: &mut Buffer) {
    let Some(session) = app.game.session() else {
        return;
    };

    let live_style = Style::default()
        .fg(Color::Black)
        .bg(Color::White)
        .add_modifier(Modifier::BOLD);
    let clicked_style = Style::default().fg(Color::White).bg(Color::Red);

    // Fading targets go underneath: they can no longer be hit.
    // Within each layer, paint low z first so target 1 ends up on top.
    let (live, fading): (Vec<_>, Vec<_>) = session
        .targets()
        .iter()
        .sorted_by_key(|t| t.z_index)
        .partition(|t| !t.clicked);

    for target in fading.into_iter().chain(live) {
        let style = if !target.clicked {
            live_style
        } else {
            match app.fade_for(target.id) {
                Some(fade) if fade.remaining * 2 > app.fade_duration => clicked_style,
                Some(_) => clicked_style.add_modifier(Modifier::DIM),
                None => continue,
            }
        };

        let rect = layout.target_rect(session, target);
        if rect.is_empty() {
            continue;
        }

        Paragraph::new(Span::styled(target_label(target.id), style))
            .style(style)
            .alignment(Alignment::Center)
            .render(rect, buf);
    }
}

fn render_notice(message: &str, area: Rect, buf: &mut Buffer) {
    let width = NOTICE_WIDTH.min(area.width);
    let height = NOTICE_HEIGHT.min(area.height);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    Clear.render(popup, buf);
    Paragraph::new(vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "[Enter] OK",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title("Notice"),
    )
    .render(popup, buf);
}
