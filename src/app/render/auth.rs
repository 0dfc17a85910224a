//! Sign-in / sign-up screen rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::app::state::AuthField;

impl App {
    /// Renders the auth screen as a centered card.
    pub(crate) fn render_auth(&self, frame: &mut Frame) {
        let area = frame.area();

        let popup_width = 52u16.min(area.width);
        let popup_height = 12u16.min(area.height);
        let x = area.width.saturating_sub(popup_width) / 2;
        let y = area.height.saturating_sub(popup_height) / 2;
        let popup_area = Rect::new(x, y, popup_width, popup_height);

        let action = if self.auth.signing_up {
            "Sign Up"
        } else {
            "Sign In"
        };

        let email_focused = self.auth.focused == AuthField::Email;
        let field_style = |focused: bool| {
            if focused {
                self.theme.highlight_style()
            } else {
                self.theme.normal_style()
            }
        };
        let cursor = |focused: bool| if focused { "▌" } else { "" };

        let masked_password: String = "•".repeat(self.auth.password.chars().count());

        let mut lines = vec![
            Line::from(Span::styled(
                "Multi-AI Platform",
                self.theme.header_style(),
            )),
            Line::from(Span::styled(
                "Chat with multiple AI models simultaneously",
                self.theme.muted_style(),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Email     ", self.theme.muted_style()),
                Span::styled(
                    format!("{}{}", self.auth.email, cursor(email_focused)),
                    field_style(email_focused),
                ),
            ]),
            Line::from(vec![
                Span::styled("Password  ", self.theme.muted_style()),
                Span::styled(
                    format!("{masked_password}{}", cursor(!email_focused)),
                    field_style(!email_focused),
                ),
            ]),
            Line::from(""),
        ];

        if let Some(status) = &self.status_line {
            lines.push(Line::from(Span::styled(
                status.clone(),
                self.theme.error_style(),
            )));
        } else {
            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![
            Span::styled("[Enter] ", self.theme.highlight_style()),
            Span::styled(format!("{action}  "), self.theme.muted_style()),
            Span::styled("[Tab] ", self.theme.highlight_style()),
            Span::styled("Switch field  ", self.theme.muted_style()),
            Span::styled("[Ctrl+T] ", self.theme.highlight_style()),
            Span::styled(
                if self.auth.signing_up {
                    "Have an account? Sign in"
                } else {
                    "No account? Sign up"
                },
                self.theme.muted_style(),
            ),
        ]));

        let block = Block::default()
            .title(format!(" {action} "))
            .title_style(self.theme.header_style())
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());

        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }
}
