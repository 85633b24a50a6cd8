//! Terminal view for the task list.
//!
//! One screen: the task collection, a create form, an inline edit session
//! for at most one task at a time, and a confirmation dialog in front of
//! every delete. All server state flows through `TaskStore`; the view never
//! edits the list locally, it refetches after each successful mutation.

use anyhow::Result;
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io;

use taskboard_core::{CreateTask, Task, UpdateTask};

use crate::form::{Field, TaskForm};
use crate::store::TaskStore;
use crate::transport::Transport;

#[derive(Debug, PartialEq)]
pub enum Mode {
    Normal,
    Creating,
    /// Edit popup for the task in `editing_id`. The popup captures all key
    /// input, so other tasks cannot be toggled until the session ends —
    /// narrower than a pointer-driven UI, where rows stay clickable during
    /// an edit.
    Editing,
    ConfirmDelete,
    Help,
}

pub struct App<T: Transport> {
    store: TaskStore<T>,
    tasks: Vec<Task>,
    list_state: ListState,
    pub mode: Mode,
    /// The single edit slot: at most one task is in edit mode at a time.
    pub editing_id: Option<i64>,
    pub create_form: TaskForm,
    pub edit_form: TaskForm,
    delete_target: Option<(i64, String)>,
    loading: bool,
    load_failed: Option<String>,
    status: Option<String>,
}

impl<T: Transport> App<T> {
    pub fn new(store: TaskStore<T>) -> Self {
        Self {
            store,
            tasks: Vec::new(),
            list_state: ListState::default(),
            mode: Mode::Normal,
            editing_id: None,
            create_form: TaskForm::new(),
            edit_form: TaskForm::new(),
            delete_target: None,
            loading: true,
            load_failed: None,
            status: None,
        }
    }

    /// First fetch. A failure here is terminal for the session: the view
    /// shows a static error message with no retry affordance.
    pub fn initial_load(&mut self) {
        let mut failed = None;
        match self.store.tasks() {
            Ok(tasks) => self.tasks = tasks.to_vec(),
            Err(e) => failed = Some(e.to_string()),
        }
        self.loading = false;
        if let Some(msg) = failed {
            self.load_failed = Some(msg);
        } else if !self.tasks.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    /// Re-read the collection after a mutation invalidated the cache,
    /// keeping the selection in range. On failure the last fetched list
    /// stays on screen.
    fn refetch(&mut self) {
        let prev = self.list_state.selected();
        let mut failed = None;
        match self.store.tasks() {
            Ok(tasks) => self.tasks = tasks.to_vec(),
            Err(e) => failed = Some(e.to_string()),
        }
        match failed {
            Some(msg) => {
                self.status = Some(format!("refresh failed: {msg}"));
                if let Some(known) = self.store.last_known() {
                    self.tasks = known.to_vec();
                }
            }
            None => self.status = None,
        }
        if self.tasks.is_empty() {
            self.list_state.select(None);
        } else {
            let i = prev.unwrap_or(0).min(self.tasks.len() - 1);
            self.list_state.select(Some(i));
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn load_failed(&self) -> Option<&str> {
        self.load_failed.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn selected_task(&self) -> Option<&Task> {
        self.list_state.selected().and_then(|i| self.tasks.get(i))
    }

    pub fn next_task(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i >= self.tasks.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous_task(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.tasks.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn start_creating(&mut self) {
        self.create_form.reset();
        self.mode = Mode::Creating;
    }

    /// Validate and submit the create form. Invalid forms never reach the
    /// network; messages appear next to the offending fields.
    pub fn submit_create(&mut self) {
        if !self.create_form.validate() {
            return;
        }
        let input = CreateTask {
            title: self.create_form.title.trim().to_string(),
            description: self.create_form.description.trim().to_string(),
            completed: false,
        };
        match self.store.create(&input) {
            Ok(_) => self.refetch(),
            Err(e) => self.status = Some(format!("create failed: {e}")),
        }
        self.create_form.reset();
        self.mode = Mode::Normal;
    }

    pub fn cancel_creating(&mut self) {
        self.create_form.reset();
        self.mode = Mode::Normal;
    }

    /// Open the edit session for the selected task, pre-filling the form.
    /// Any previously active edit session is implicitly closed.
    pub fn start_edit(&mut self) {
        let Some(task) = self.selected_task().cloned() else {
            return;
        };
        self.editing_id = Some(task.id);
        self.edit_form = TaskForm::prefill(&task.title, &task.description);
        self.mode = Mode::Editing;
    }

    /// Save the edit form: sends title and description only, never the
    /// completion flag. Clears the edit slot whether or not the request
    /// succeeded.
    pub fn save_edit(&mut self) {
        let Some(id) = self.editing_id else {
            return;
        };
        if !self.edit_form.validate() {
            return;
        }
        let input = UpdateTask::edit(
            self.edit_form.title.trim().to_string(),
            self.edit_form.description.trim().to_string(),
        );
        match self.store.update(id, &input) {
            Ok(_) => self.refetch(),
            Err(e) => self.status = Some(format!("update failed: {e}")),
        }
        self.editing_id = None;
        self.edit_form.reset();
        self.mode = Mode::Normal;
    }

    pub fn cancel_edit(&mut self) {
        self.editing_id = None;
        self.edit_form.reset();
        self.mode = Mode::Normal;
    }

    /// Flip the completion flag of the selected task; the request body
    /// carries only `completed`.
    pub fn toggle_selected(&mut self) {
        let Some(task) = self.selected_task().cloned() else {
            return;
        };
        match self.store.update(task.id, &UpdateTask::toggle(!task.completed)) {
            Ok(_) => self.refetch(),
            Err(e) => self.status = Some(format!("update failed: {e}")),
        }
    }

    pub fn start_delete_confirm(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        self.delete_target = Some((task.id, task.title.clone()));
        self.mode = Mode::ConfirmDelete;
    }

    /// The delete request fires only from here, after explicit confirmation.
    pub fn confirm_delete(&mut self) {
        let Some((id, _)) = self.delete_target.take() else {
            return;
        };
        self.mode = Mode::Normal;
        match self.store.delete(id) {
            Ok(_) => self.refetch(),
            Err(e) => self.status = Some(format!("delete failed: {e}")),
        }
    }

    /// Declining leaves the list untouched; no request is issued.
    pub fn cancel_delete_confirm(&mut self) {
        self.delete_target = None;
        self.mode = Mode::Normal;
    }

    pub fn show_help(&mut self) {
        self.mode = Mode::Help;
    }

    pub fn hide_help(&mut self) {
        self.mode = Mode::Normal;
    }
}

pub fn run_app<T: Transport>(store: TaskStore<T>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store);
    // Show the loading placeholder while the first fetch runs.
    terminal.draw(|f| ui(f, &mut app))?;
    app.initial_load();

    let res = run_app_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app_loop<T: Transport>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<T>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if app.load_failed.is_some() {
                if key.code == KeyCode::Char('q') {
                    return Ok(());
                }
                continue;
            }
            match app.mode {
                Mode::Normal => match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Down | KeyCode::Char('j') => app.next_task(),
                    KeyCode::Up | KeyCode::Char('k') => app.previous_task(),
                    KeyCode::Char('a') => app.start_creating(),
                    KeyCode::Char('e') => app.start_edit(),
                    KeyCode::Char('c') | KeyCode::Char(' ') => app.toggle_selected(),
                    KeyCode::Char('D') => app.start_delete_confirm(),
                    KeyCode::Char('?') => app.show_help(),
                    _ => {}
                },
                Mode::Creating => match key.code {
                    KeyCode::Enter => app.submit_create(),
                    KeyCode::Esc => app.cancel_creating(),
                    KeyCode::Tab => app.create_form.next_field(),
                    KeyCode::Backspace => app.create_form.pop(),
                    KeyCode::Char(c) => app.create_form.push(c),
                    _ => {}
                },
                Mode::Editing => match key.code {
                    KeyCode::Enter => app.save_edit(),
                    KeyCode::Esc => app.cancel_edit(),
                    KeyCode::Tab => app.edit_form.next_field(),
                    KeyCode::Backspace => app.edit_form.pop(),
                    KeyCode::Char(c) => app.edit_form.push(c),
                    _ => {}
                },
                Mode::ConfirmDelete => match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                        app.cancel_delete_confirm()
                    }
                    _ => {}
                },
                Mode::Help => match key.code {
                    KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => app.hide_help(),
                    _ => {}
                },
            }
        }
    }
}

fn ui<T: Transport>(f: &mut Frame, app: &mut App<T>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(f.area());

    if app.loading {
        let placeholder = Paragraph::new("Loading...")
            .block(Block::default().title("tasks").borders(Borders::ALL))
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(placeholder, chunks[0]);
        return;
    }

    if let Some(msg) = app.load_failed() {
        let error = Paragraph::new(format!("Error loading tasks\n\n{msg}"))
            .block(Block::default().title("tasks").borders(Borders::ALL))
            .style(Style::default().fg(Color::Red));
        f.render_widget(error, chunks[0]);
        let hint = Paragraph::new("q: quit").style(Style::default().fg(Color::DarkGray));
        f.render_widget(hint, chunks[1]);
        return;
    }

    if app.tasks.is_empty() {
        let empty = Paragraph::new("No tasks yet. Press 'a' to add one.")
            .block(Block::default().title("tasks").borders(Borders::ALL))
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(empty, chunks[0]);
    } else {
        let items: Vec<ListItem> = app
            .tasks
            .iter()
            .map(|t| {
                let marker = if t.completed { "✓" } else { " " };
                let style = if t.completed {
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(Line::from(vec![
                    Span::raw(format!("[{marker}] ")),
                    Span::styled(t.title.clone(), style),
                    Span::styled(
                        format!("  {}", t.description),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title("tasks").borders(Borders::ALL))
            .highlight_style(Style::default().add_modifier(Modifier::BOLD))
            .highlight_symbol(">> ");
        f.render_stateful_widget(list, chunks[0], &mut app.list_state);
    }

    let status_line = match app.status() {
        Some(msg) => Paragraph::new(msg.to_string()).style(Style::default().fg(Color::Red)),
        None => Paragraph::new("a: add | e: edit | c/space: toggle | D: delete | ?: help | q: quit")
            .style(Style::default().fg(Color::DarkGray)),
    };
    f.render_widget(status_line, chunks[1]);

    match app.mode {
        Mode::Creating => render_form_popup(f, &app.create_form, "new task"),
        Mode::Editing => render_form_popup(f, &app.edit_form, "edit task"),
        Mode::ConfirmDelete => {
            let popup_area = centered_rect(60, 20, f.area());
            f.render_widget(Clear, popup_area);

            let target = app
                .delete_target
                .as_ref()
                .map(|(_, title)| title.as_str())
                .unwrap_or("task");
            let confirm_text = format!(
                "Delete '{target}'? This action cannot be undone.\n\ny: confirm | n/esc: cancel"
            );
            let confirm = Paragraph::new(confirm_text)
                .block(Block::default().title("confirm delete").borders(Borders::ALL))
                .style(Style::default().fg(Color::Red));
            f.render_widget(confirm, popup_area);
        }
        Mode::Help => {
            let popup_area = centered_rect(80, 60, f.area());
            f.render_widget(Clear, popup_area);

            let help_text = "HELP\n\nNavigation:\n  j/k: move up/down the list\n\nActions:\n  a: add a new task\n  e: edit the selected task\n  c or space: toggle completion\n  D: delete the selected task (asks for confirmation)\n  ?: show/hide this help\n  q: quit\n\nPress ? or ESC to close";
            let help = Paragraph::new(help_text)
                .block(Block::default().title("help").borders(Borders::ALL))
                .style(Style::default().fg(Color::White));
            f.render_widget(help, popup_area);
        }
        Mode::Normal => {}
    }
}

/// Two-field form popup with inline validation messages.
fn render_form_popup(f: &mut Frame, form: &TaskForm, title: &str) {
    let popup_area = centered_rect(60, 45, f.area());
    f.render_widget(Clear, popup_area);
    f.render_widget(
        Block::default().title(title).borders(Borders::ALL),
        popup_area,
    );

    let inner = popup_area.inner(ratatui::layout::Margin {
        horizontal: 1,
        vertical: 1,
    });
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let field_block = |label: &str, focused: bool| {
        let block = Block::default().title(label.to_string()).borders(Borders::ALL);
        if focused {
            block.border_style(Style::default().fg(Color::Yellow))
        } else {
            block
        }
    };

    let title_input = Paragraph::new(form.title.as_str())
        .block(field_block("title", form.focus == Field::Title));
    f.render_widget(title_input, rows[0]);

    if let Some(msg) = form.title_error {
        let error = Paragraph::new(msg).style(Style::default().fg(Color::Red));
        f.render_widget(error, rows[1]);
    }

    let description_input = Paragraph::new(form.description.as_str())
        .block(field_block("description", form.focus == Field::Description));
    f.render_widget(description_input, rows[2]);

    if let Some(msg) = form.description_error {
        let error = Paragraph::new(msg).style(Style::default().fg(Color::Red));
        f.render_widget(error, rows[3]);
    }

    let hint = Paragraph::new("enter: save | tab: switch field | esc: cancel")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(hint, rows[4]);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
