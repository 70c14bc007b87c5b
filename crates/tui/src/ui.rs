//! Rendering. Pure function of [`App`] onto a ratatui frame.

use crate::{
    app::{App, Focus, QUIT_ROW},
    card, grid,
    status::StatusKind,
};
use discotui_types::DataSource;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

const MENU_WIDTH: u16 = 40;

fn border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub fn render(frame: &mut Frame<'_>, app: &App) {
    let [body, footer] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());
    let [left, preview] =
        Layout::horizontal([Constraint::Length(MENU_WIDTH), Constraint::Min(0)]).areas(body);

    render_menu(frame, app, left);
    render_preview(frame, app, preview);
    render_footer(frame, app, footer);
    if app.modal {
        render_modal(frame, app);
    }
}

fn render_menu(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let [menu, info] = Layout::vertical([Constraint::Min(0), Constraint::Length(4)]).areas(area);

    let mut items: Vec<ListItem> = DataSource::all()
        .iter()
        .map(|s| {
            ListItem::new(vec![
                Line::from(format!("({}) {}", s.index(), s.title())),
                Line::from(Span::styled(
                    format!("    {}", s.description()),
                    Style::default().fg(Color::Gray),
                )),
            ])
        })
        .collect();
    items.push(ListItem::new(vec![
        Line::from("(q) Quit"),
        Line::from(Span::styled("    Press to exit", Style::default().fg(Color::Gray))),
    ]));

    let list = List::new(items)
        .block(
            Block::bordered()
                .title("Menu [ Ctrl-A ]")
                .border_style(border(app.focus == Focus::Menu)),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(Some(app.menu_row.min(QUIT_ROW)));
    frame.render_stateful_widget(list, menu, &mut state);

    let who = Paragraph::new(vec![
        Line::from(Span::styled(
            "DiscoTUI",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Logged in as {}", app.username)),
    ])
    .alignment(Alignment::Center)
    .block(Block::bordered().border_style(border(false)));
    frame.render_widget(who, info);
}

fn render_preview(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let cards = app.cards(app.source);
    let page_size = app.grid.page_size();
    let selected = app.selected();
    let (page, pages) = grid::page_position(selected, cards.len(), page_size);

    let block = Block::bordered()
        .title(format!(
            "Preview [ Ctrl-D ] · {} · {}/{}",
            app.source.title(),
            page,
            pages
        ))
        .border_style(border(app.focus == Focus::Grid));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if cards.is_empty() {
        let msg = if app.loading {
            "Loading..."
        } else {
            "Nothing to show"
        };
        frame.render_widget(
            Paragraph::new(msg)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let rows = Layout::vertical(vec![Constraint::Fill(1); app.grid.rows.max(1)]).split(inner);
    let cells: Vec<_> = rows
        .iter()
        .map(|row| Layout::horizontal(vec![Constraint::Fill(1); app.grid.cols.max(1)]).split(*row))
        .collect();

    for index in grid::visible_range(selected, cards.len(), page_size) {
        let (r, c) = grid::cell(index, app.grid.cols, page_size);
        let Some(area) = cells.get(r).and_then(|row| row.get(c)) else {
            continue;
        };
        let focused = app.focus == Focus::Grid && index == selected;
        let release = &cards[index];
        let widget = Paragraph::new(card::card_text(release))
            .wrap(Wrap { trim: false })
            .block(
                Block::bordered()
                    .title(release.title.as_str())
                    .border_style(border(focused)),
            );
        frame.render_widget(widget, *area);
    }
}

fn render_footer(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let (kind, text) = app.footer.line();
    let color = match kind {
        StatusKind::Help => Color::Gray,
        StatusKind::Info => Color::Green,
        StatusKind::Warning => Color::Yellow,
        StatusKind::Error => Color::Red,
    };
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(color)),
        area,
    );
}

fn render_modal(frame: &mut Frame<'_>, app: &App) {
    let Some(release) = app.selected_card() else {
        return;
    };
    let area = centered(frame.area(), 60, 60);
    let lines: Vec<Line> = card::detail_rows(release)
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(
                    format!("{label:>10}: "),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(value),
            ])
        })
        .collect();
    let widget = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .block(
            Block::bordered()
                .title("Release")
                .title_bottom(Line::from("[ Close: Enter / Esc ]").right_aligned())
                .border_style(border(true)),
        );
    frame.render_widget(Clear, area);
    frame.render_widget(widget, area);
}

/// A `percent_x` by `percent_y` rectangle centered in `area`.
fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(mid);
    center
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::LoadEvent;
    use discotui_config::GridConfig;
    use discotui_types::ReleaseModel;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    fn app_with(n: usize) -> App {
        let mut app = App::new("digger", GridConfig { rows: 2, cols: 2 });
        app.apply(LoadEvent::Loaded {
            source: DataSource::Collection,
            rows: (0..n)
                .map(|i| ReleaseModel {
                    title: format!("Record{i}"),
                    artist: "Someone".into(),
                    ..ReleaseModel::default()
                })
                .collect(),
        });
        app
    }

    #[test]
    fn test_menu_and_user() {
        let screen = draw(&app_with(0));
        assert!(screen.contains("Menu [ Ctrl-A ]"));
        assert!(screen.contains("(1) Wish list"));
        assert!(screen.contains("Logged in as digger"));
        assert!(screen.contains("Nothing to show"));
    }

    #[test]
    fn test_only_current_page_is_drawn() {
        let mut app = app_with(6);
        let screen = draw(&app);
        assert!(screen.contains("Record3"));
        assert!(!screen.contains("Record4"));
        assert!(screen.contains("1/2"));

        app.focus = Focus::Grid;
        app.handle_key(crossterm::event::KeyEvent::from(crossterm::event::KeyCode::Down));
        app.handle_key(crossterm::event::KeyEvent::from(crossterm::event::KeyCode::Down));
        let screen = draw(&app);
        assert!(screen.contains("Record4"));
        assert!(!screen.contains("Record0"));
        assert!(screen.contains("2/2"));
    }

    #[test]
    fn test_modal_shows_details() {
        let mut app = app_with(1);
        app.focus = Focus::Grid;
        app.modal = true;
        let screen = draw(&app);
        assert!(screen.contains("Close: Enter / Esc"));
        assert!(screen.contains("Someone"));
    }
}
