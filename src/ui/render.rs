//! Pure rendering: data in, widgets out. Nothing here mutates state or
//! talks to the network, so every view is a function of the state container.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    BarChart, Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap,
};

use crate::dto::dashboard::{DashboardStats, upcoming_events};
use crate::dto::rows::{Badge, BadgeTone, CallRow, CandidateRow, ClientRow, EventRow};
use crate::forms::FieldKind;
use crate::ui::app::{App, NoticeLevel, Repository, View, ViewState};
use crate::ui::chart::StatusChart;
use crate::ui::modal::Modal;

const LOADING_PLACEHOLDER: &str = "Cargando información...";
const ERROR_PLACEHOLDER: &str = "Ocurrió un error cargando la vista.";

pub fn draw<R: Repository>(frame: &mut Frame, app: &App<R>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(2),
        ])
        .split(frame.area());

    draw_tabs(frame, chunks[0], app.state.current_view);
    draw_body(frame, chunks[1], app);
    draw_footer(frame, chunks[2], app);

    if let Some(modal) = app.modal.active() {
        let area = frame.area();
        draw_modal(frame, area, modal);
    }
}

fn draw_tabs(frame: &mut Frame, area: Rect, current: View) {
    let titles: Vec<Line> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(format!("{} {}", i + 1, view.title())))
        .collect();
    let selected = View::ALL.iter().position(|v| *v == current).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title("coders-crm"));
    frame.render_widget(tabs, area);
}

fn draw_body<R: Repository>(frame: &mut Frame, area: Rect, app: &App<R>) {
    match app.state.view_state {
        ViewState::Idle | ViewState::Loading => {
            draw_placeholder(frame, area, LOADING_PLACEHOLDER, Color::Gray);
        }
        ViewState::Error => draw_placeholder(frame, area, ERROR_PLACEHOLDER, Color::Red),
        ViewState::Rendered => match app.state.current_view {
            View::Dashboard => draw_dashboard(frame, area, app),
            View::Candidates => draw_candidates(frame, area, app),
            View::Clients => draw_clients(frame, area, app),
            View::Events => draw_events(frame, area, app),
            View::Calls => draw_calls(frame, area, app),
        },
    }
}

fn draw_placeholder(frame: &mut Frame, area: Rect, text: &str, color: Color) {
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_dashboard<R: Repository>(frame: &mut Frame, area: Rect, app: &App<R>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    let stats = DashboardStats {
        total_candidates: app.state.candidates.len(),
        total_clients: app.state.clients.len(),
        total_events: app.state.events.len(),
        total_calls: app.state.calls.len(),
    };
    draw_stat_cards(frame, rows[0], &stats);

    let grid = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    if let Some(chart) = app.chart.current() {
        draw_status_chart(frame, grid[0], chart);
    } else {
        draw_placeholder(frame, grid[0], LOADING_PLACEHOLDER, Color::Gray);
    }
    draw_upcoming_events(frame, grid[1], app);
}

fn draw_stat_cards(frame: &mut Frame, area: Rect, stats: &DashboardStats) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let entries = [
        ("Total Coders", stats.total_candidates),
        ("Total Clientes", stats.total_clients),
        ("Total Eventos", stats.total_events),
        ("Llamadas Registradas", stats.total_calls),
    ];
    for (i, (label, value)) in entries.iter().enumerate() {
        let card = Paragraph::new(Line::from(vec![
            Span::styled(
                value.to_string(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  {label}")),
        ]))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(card, cards[i]);
    }
}

fn draw_status_chart(frame: &mut Frame, area: Rect, chart: &StatusChart) {
    let data = [
        (StatusChart::PENDING_LABEL, chart.pending as u64),
        (StatusChart::IN_PROCESS_LABEL, chart.in_process as u64),
        (StatusChart::OTHER_LABEL, chart.other as u64),
    ];
    let widget = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Distribución de Estados (Candidatos)"),
        )
        .data(&data)
        .bar_width(10)
        .bar_style(Style::default().fg(Color::Yellow))
        .value_style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(widget, area);
}

fn draw_upcoming_events<R: Repository>(frame: &mut Frame, area: Rect, app: &App<R>) {
    let rows: Vec<Row> = upcoming_events(&app.state.events)
        .into_iter()
        .map(|preview| {
            Row::new(vec![
                Cell::from(preview.tipo),
                Cell::from(preview.fecha),
                Cell::from(preview.cupos),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(50),
            Constraint::Percentage(30),
            Constraint::Percentage(20),
        ],
    )
    .header(header_row(&["Tipo", "Fecha", "Cupos"]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Próximos Eventos"),
    );
    frame.render_widget(table, area);
}

fn draw_candidates<R: Repository>(frame: &mut Frame, area: Rect, app: &App<R>) {
    let rows: Vec<Row> = app
        .state
        .candidates
        .iter()
        .map(|candidate| {
            let cells = CandidateRow::from(candidate);
            Row::new(vec![
                Cell::from(cells.name),
                Cell::from(cells.telefono),
                Cell::from(cells.correo),
                Cell::from(cells.ciudad),
                badge_cell(&cells.badge),
            ])
        })
        .collect();

    draw_table(
        frame,
        area,
        "Gestión de Candidatos (Coders)",
        &["Nombre", "Teléfono", "Correo", "Ciudad", "Estado"],
        rows,
        app.selected,
        "No hay candidatos registrados",
    );
}

fn draw_clients<R: Repository>(frame: &mut Frame, area: Rect, app: &App<R>) {
    let rows: Vec<Row> = app
        .state
        .clients
        .iter()
        .map(|client| {
            let cells = ClientRow::from(client);
            Row::new(vec![
                Cell::from(cells.name),
                Cell::from(cells.contact),
                Cell::from(cells.telefono),
            ])
        })
        .collect();

    draw_table(
        frame,
        area,
        "Gestión de Clientes",
        &["Empresa / Nombre", "Contacto", "Teléfono"],
        rows,
        app.selected,
        "No hay clientes registrados",
    );
}

fn draw_events<R: Repository>(frame: &mut Frame, area: Rect, app: &App<R>) {
    let rows: Vec<Row> = app
        .state
        .events
        .iter()
        .map(|event| {
            let cells = EventRow::from(event);
            Row::new(vec![
                Cell::from(cells.tipo),
                Cell::from(cells.fecha),
                Cell::from(cells.capacidad),
                Cell::from(cells.inscritos),
                badge_cell(&cells.badge),
            ])
        })
        .collect();

    draw_table(
        frame,
        area,
        "Gestión de Eventos",
        &["Tipo de Reunión", "Fecha y Hora", "Capacidad", "Inscritos", "Estado"],
        rows,
        app.selected,
        "No hay eventos registrados",
    );
}

fn draw_calls<R: Repository>(frame: &mut Frame, area: Rect, app: &App<R>) {
    let rows: Vec<Row> = app
        .state
        .calls
        .iter()
        .map(|call| {
            let cells = CallRow::from(call);
            Row::new(vec![
                Cell::from(cells.candidate),
                Cell::from(cells.fecha),
                badge_cell(&cells.badge),
                Cell::from(cells.evento),
                Cell::from(cells.resumen),
            ])
        })
        .collect();

    let title = format!("Historial de Llamadas — [w] {}", app.webhook.label());
    draw_table(
        frame,
        area,
        &title,
        &["Candidato", "Fecha/Hora", "Resultado", "Evento Asignado", "Resumen"],
        rows,
        app.selected,
        "No hay llamadas registradas",
    );
}

fn draw_table(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    headers: &[&'static str],
    rows: Vec<Row>,
    selected: usize,
    empty_text: &str,
) {
    if rows.is_empty() {
        let paragraph = Paragraph::new(empty_text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(title.to_string()));
        frame.render_widget(paragraph, area);
        return;
    }

    let count = headers.len() as u32;
    let widths: Vec<Constraint> = headers
        .iter()
        .map(|_| Constraint::Ratio(1, count))
        .collect();

    let table = Table::new(rows, widths)
        .header(header_row(headers))
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default();
    state.select(Some(selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn header_row(headers: &[&'static str]) -> Row<'static> {
    Row::new(
        headers
            .iter()
            .map(|h| Cell::from(*h))
            .collect::<Vec<Cell>>(),
    )
    .style(Style::default().add_modifier(Modifier::BOLD))
}

fn badge_cell(badge: &Badge) -> Cell<'static> {
    let color = match badge.tone {
        BadgeTone::Pending => Color::Yellow,
        BadgeTone::Scheduled => Color::Green,
    };
    Cell::from(Span::styled(
        badge.label.clone(),
        Style::default().fg(color),
    ))
}

fn draw_footer<R: Repository>(frame: &mut Frame, area: Rect, app: &App<R>) {
    let mut lines = vec![Line::from(
        "[1-5] vistas  [↑↓] fila  [n] nuevo  [e] editar  [d] eliminar  [r] recargar  [q] salir",
    )];
    if let Some(notice) = &app.notice {
        let color = match notice.level {
            NoticeLevel::Info => Color::Cyan,
            NoticeLevel::Success => Color::Green,
            NoticeLevel::Error => Color::Red,
        };
        lines.push(Line::from(Span::styled(
            notice.text.clone(),
            Style::default().fg(color),
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_modal(frame: &mut Frame, area: Rect, modal: &Modal) {
    let width = area.width.clamp(30, 64);
    let height = (modal.fields().len() as u16 * 2 + 8).min(area.height);
    let popup = centered_rect(area, width, height);

    frame.render_widget(Clear, popup);

    let border_color = if modal.danger { Color::Red } else { Color::Cyan };
    let style = if modal.is_closing() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(border_color)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(modal.title.clone());

    let mut lines: Vec<Line> = Vec::new();
    if let Some(body) = &modal.body {
        lines.push(Line::from(body.clone()));
        lines.push(Line::default());
    }
    for (i, field) in modal.fields().iter().enumerate() {
        let focused = i == modal.focus();
        let marker = if focused { "› " } else { "  " };
        let required = if field.spec.required { "*" } else { "" };
        let shown = match field.spec.kind {
            FieldKind::Select(_) => {
                format!("‹ {} ›", field.select_label().unwrap_or_default())
            }
            _ => field.value.clone(),
        };
        let label_style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{marker}{}{required}: ", field.spec.label), label_style),
            Span::raw(shown),
        ]));
    }
    lines.push(Line::default());
    if let Some(error) = modal.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(Line::from(format!(
        "[Enter] {}   [Esc] Cancelar",
        modal.submit_label()
    )));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    frame.render_widget(paragraph, popup);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
