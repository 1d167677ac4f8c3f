use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::App;
use keydash::session::Phase;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);
        let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);

        if let Some(notice) = &self.notice {
            render_notice(notice, area, buf);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints(
                [
                    Constraint::Length(2), // countdown
                    Constraint::Length(2), // displayed word
                    Constraint::Length(2), // input line
                    Constraint::Min(1),    // results / hints
                ]
                .as_ref(),
            )
            .split(area);

        let timer = Paragraph::new(Span::styled(
            format!("Time remaining: {}", self.session.remaining_secs()),
            dim_bold_style,
        ))
        .alignment(Alignment::Center);
        timer.render(chunks[0], buf);

        let word_line = match self.session.phase() {
            Phase::Idle => Span::styled("Press Enter to begin the typing test", italic_style),
            Phase::Running => Span::styled(self.session.current_word().to_string(), bold_style),
            Phase::Finished => Span::styled("Time's up!", bold_style),
        };
        Paragraph::new(word_line)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[1], buf);

        if self.session.phase() == Phase::Running {
            let input = Line::from(vec![
                Span::styled(self.session.input().to_string(), bold_style),
                Span::styled("_", dim_bold_style),
            ]);
            Paragraph::new(input)
                .alignment(Alignment::Center)
                .render(chunks[2], buf);
        } else if let Some(status) = &self.status {
            Paragraph::new(Span::styled(status.to_string(), red_bold_style))
                .alignment(Alignment::Center)
                .render(chunks[2], buf);
        }

        let mut footer: Vec<Line> = Vec::new();
        if let Some(results) = self.session.results() {
            footer.push(Line::from(Span::styled(
                format!("Total words typed: {}", results.total_words),
                bold_style,
            )));
            footer.push(Line::from(Span::styled(
                format!("Correct words typed: {}", results.correct_words),
                bold_style,
            )));
            footer.push(Line::from(Span::styled(
                format!("Incorrect words typed: {}", results.incorrect_words),
                bold_style,
            )));
            footer.push(Line::from(Span::styled(
                format!("Accuracy: {:.2}%", results.accuracy_percent),
                bold_style,
            )));
            footer.push(Line::default());
        }
        footer.push(Line::from(Span::styled(
            match self.session.phase() {
                Phase::Running => "(type the word and press enter)",
                _ => "(enter)start (esc)quit",
            },
            italic_style,
        )));

        Paragraph::new(footer)
            .alignment(Alignment::Center)
            .render(chunks[3], buf);
    }
}

fn render_notice(notice: &str, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints(
            [
                Constraint::Min(0),
                Constraint::Length(2),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(area);

    let message = Paragraph::new(vec![
        Line::from(Span::styled(
            notice.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "press any key to continue",
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    message.render(chunks[1], buf);
}
