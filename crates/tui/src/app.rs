//! Application state and key handling. No terminal I/O happens here.

use crate::{
    grid::{self, Direction},
    loader::LoadEvent,
    status::{Footer, StatusKind},
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use discotui_config::GridConfig;
use discotui_types::{DataSource, ReleaseModel};

/// Which pane receives arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Menu,
    Grid,
}

/// What the event loop must do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Reload,
    Quit,
}

/// Menu rows: the three sources, then Quit.
pub const MENU_LEN: usize = 4;
pub const QUIT_ROW: usize = 3;

#[derive(Debug, Default)]
pub struct App {
    pub username: String,
    pub source: DataSource,
    pub focus: Focus,
    pub menu_row: usize,
    pub grid: GridConfig,
    pub modal: bool,
    pub loading: bool,
    pub footer: Footer,
    cards: [Vec<ReleaseModel>; 3],
    selected: [usize; 3],
}

impl App {
    #[must_use]
    pub fn new(username: impl Into<String>, grid: GridConfig) -> Self {
        let mut app = Self {
            username: username.into(),
            grid,
            ..Self::default()
        };
        app.footer.show(
            StatusKind::Info,
            "Initializing... Loading your Discogs data in background",
        );
        app
    }

    #[must_use]
    pub fn cards(&self, source: DataSource) -> &[ReleaseModel] {
        &self.cards[source.index()]
    }

    /// Index of the highlighted card in the current source.
    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected[self.source.index()]
    }

    #[must_use]
    pub fn selected_card(&self) -> Option<&ReleaseModel> {
        self.cards(self.source).get(self.selected())
    }

    /// Apply a grid shape from a reloaded config.
    pub fn set_grid(&mut self, grid: GridConfig) {
        self.grid = grid;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => return Action::Quit,
            KeyCode::Char('q') => return Action::Quit,
            _ => {}
        }

        if self.modal {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.modal = false;
            }
            return Action::None;
        }

        match key.code {
            KeyCode::Char('a') if ctrl => self.focus = Focus::Menu,
            KeyCode::Char('d') if ctrl => self.focus_grid(),
            KeyCode::Char(c @ '0'..='2') => {
                if let Some(source) = DataSource::from_shortcut(c) {
                    self.switch_source(source);
                }
            }
            KeyCode::Char('r') => {
                self.footer.show(StatusKind::Info, "Reloading...");
                return Action::Reload;
            }
            KeyCode::Up => self.arrow(Direction::Up),
            KeyCode::Down => self.arrow(Direction::Down),
            KeyCode::Left => self.arrow(Direction::Left),
            KeyCode::Right => self.arrow(Direction::Right),
            KeyCode::Enter => return self.enter(),
            _ => {}
        }
        Action::None
    }

    fn enter(&mut self) -> Action {
        match self.focus {
            Focus::Menu if self.menu_row == QUIT_ROW => Action::Quit,
            Focus::Menu => {
                self.focus_grid();
                Action::None
            }
            Focus::Grid => {
                self.modal = self.selected_card().is_some();
                Action::None
            }
        }
    }

    fn arrow(&mut self, dir: Direction) {
        match self.focus {
            Focus::Menu => {
                let row = match dir {
                    Direction::Up => self.menu_row.saturating_sub(1),
                    Direction::Down => (self.menu_row + 1).min(MENU_LEN - 1),
                    _ => return,
                };
                self.menu_row = row;
                if let Some(source) = DataSource::from_index(row).filter(|s| *s != self.source) {
                    self.switch_source(source);
                }
            }
            Focus::Grid => {
                let len = self.cards(self.source).len();
                let i = self.source.index();
                self.selected[i] = grid::step(self.selected[i], len, self.grid.cols, dir);
            }
        }
    }

    fn focus_grid(&mut self) {
        self.focus = Focus::Grid;
        self.clamp(self.source);
    }

    fn switch_source(&mut self, source: DataSource) {
        self.source = source;
        self.menu_row = source.index();
        self.selected[source.index()] = 0;
        self.modal = false;
    }

    fn clamp(&mut self, source: DataSource) {
        let i = source.index();
        let len = self.cards[i].len();
        self.selected[i] = self.selected[i].min(len.saturating_sub(1));
    }

    pub fn apply(&mut self, event: LoadEvent) {
        match event {
            LoadEvent::Started => {
                self.loading = true;
                self.footer
                    .show(StatusKind::Info, "Loading your Discogs data...");
            }
            LoadEvent::Loaded { source, rows } => {
                self.footer.show(
                    StatusKind::Info,
                    format!("Loaded {} {source} items", rows.len()),
                );
                self.cards[source.index()] = rows;
                self.clamp(source);
            }
            LoadEvent::Failed { source, error } => {
                self.cards[source.index()].clear();
                self.clamp(source);
                if source == DataSource::Collection {
                    self.footer.show(StatusKind::Error, error);
                } else {
                    self.footer.show(
                        StatusKind::Warning,
                        format!("Failed to load {source}: {error}"),
                    );
                }
            }
            LoadEvent::Finished { ok } => {
                self.loading = false;
                if ok {
                    self.footer
                        .show(StatusKind::Info, "✓ Data loading complete!");
                }
            }
        }
        if self.modal && self.selected_card().is_none() {
            self.modal = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn rows(n: usize) -> Vec<ReleaseModel> {
        (0..n)
            .map(|i| ReleaseModel {
                title: format!("r{i}"),
                ..ReleaseModel::default()
            })
            .collect()
    }

    fn loaded(n: usize) -> App {
        let mut app = App::new("digger", GridConfig { rows: 2, cols: 3 });
        app.apply(LoadEvent::Loaded {
            source: DataSource::Collection,
            rows: rows(n),
        });
        app
    }

    #[test]
    fn test_quit_keys() {
        let mut app = loaded(0);
        assert_eq!(app.handle_key(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(app.handle_key(ctrl('c')), Action::Quit);
    }

    #[test]
    fn test_focus_switching() {
        let mut app = loaded(4);
        assert_eq!(app.focus, Focus::Menu);
        app.handle_key(ctrl('d'));
        assert_eq!(app.focus, Focus::Grid);
        app.handle_key(key(KeyCode::Right));
        app.handle_key(ctrl('a'));
        assert_eq!(app.focus, Focus::Menu);
        app.handle_key(ctrl('d'));
        // Selection is restored.
        assert_eq!(app.selected(), 1);
    }

    #[test]
    fn test_grid_navigation_stays_in_bounds() {
        let mut app = loaded(5);
        app.handle_key(ctrl('d'));
        for _ in 0..5 {
            app.handle_key(key(KeyCode::Right));
        }
        assert_eq!(app.selected(), 2);
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected(), 2, "no card below index 2");
        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected(), 4);
        for code in [KeyCode::Down, KeyCode::Right, KeyCode::Down] {
            app.handle_key(key(code));
            assert!(app.selected() < 5);
        }
    }

    #[test]
    fn test_menu_arrows_switch_source() {
        let mut app = loaded(3);
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.source, DataSource::Wishlist);
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.source, DataSource::Orders);
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.menu_row, QUIT_ROW);
        assert_eq!(app.source, DataSource::Orders);
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.menu_row, QUIT_ROW);
        assert_eq!(app.handle_key(key(KeyCode::Enter)), Action::Quit);
    }

    #[test]
    fn test_menu_enter_focuses_grid() {
        let mut app = loaded(3);
        assert_eq!(app.handle_key(key(KeyCode::Enter)), Action::None);
        assert_eq!(app.focus, Focus::Grid);
    }

    #[test]
    fn test_shortcuts_reset_selection() {
        let mut app = loaded(6);
        app.handle_key(ctrl('d'));
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Char('1')));
        assert_eq!(app.source, DataSource::Wishlist);
        assert_eq!(app.menu_row, 1);
        app.handle_key(key(KeyCode::Char('0')));
        assert_eq!(app.source, DataSource::Collection);
        assert_eq!(app.selected(), 0);
        app.handle_key(key(KeyCode::Char('2')));
        assert_eq!(app.source, DataSource::Orders);
    }

    #[test]
    fn test_modal_open_and_close() {
        let mut app = loaded(2);
        app.handle_key(ctrl('d'));
        app.handle_key(key(KeyCode::Enter));
        assert!(app.modal);
        // Arrows are swallowed while the modal is open.
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.selected(), 0);
        app.handle_key(key(KeyCode::Esc));
        assert!(!app.modal);
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Enter));
        assert!(!app.modal);
    }

    #[test]
    fn test_modal_needs_a_card() {
        let mut app = loaded(0);
        app.handle_key(ctrl('d'));
        app.handle_key(key(KeyCode::Enter));
        assert!(!app.modal);
    }

    #[test]
    fn test_reload_key() {
        let mut app = loaded(0);
        assert_eq!(app.handle_key(key(KeyCode::Char('r'))), Action::Reload);
        assert_eq!(app.footer.line().1, "Reloading...");
    }

    #[test]
    fn test_reload_shrinking_list_clamps_selection() {
        let mut app = loaded(6);
        app.handle_key(ctrl('d'));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.selected(), 4);
        app.apply(LoadEvent::Loaded {
            source: DataSource::Collection,
            rows: rows(2),
        });
        assert_eq!(app.selected(), 1);
    }

    #[test]
    fn test_load_statuses() {
        let mut app = loaded(1);
        app.apply(LoadEvent::Started);
        assert!(app.loading);
        app.apply(LoadEvent::Failed {
            source: DataSource::Wishlist,
            error: "status=500".into(),
        });
        let (kind, text) = app.footer.line();
        assert_eq!(kind, StatusKind::Warning);
        assert!(text.contains("wishlist"));
        assert!(app.cards(DataSource::Wishlist).is_empty());

        app.apply(LoadEvent::Failed {
            source: DataSource::Collection,
            error: "unauthorized".into(),
        });
        assert_eq!(app.footer.line().0, StatusKind::Error);
        assert!(app.cards(DataSource::Collection).is_empty());
        app.apply(LoadEvent::Finished { ok: false });
        assert!(!app.loading);
        // The error stays visible.
        assert_eq!(app.footer.line().0, StatusKind::Error);
    }
}
