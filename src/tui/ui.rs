use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::{App, Focus};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{MessageList, ResultsPanel, TitleBar};

/// Screen regions for one frame.
///
/// ```text
/// ┌──────────────────────── title ────────────────────────┐
/// │ transcript (55%)            │ results (45%)           │
/// │                             │                         │
/// ├──────────────────────── input ────────────────────────┤
/// ```
pub struct ScreenLayout {
    pub title: Rect,
    pub transcript: Rect,
    pub results: Rect,
    pub input: Rect,
}

pub fn layout(area: Rect, input_height: u16) -> ScreenLayout {
    use Constraint::{Length, Min, Percentage};
    let [title, main, input] = Layout::vertical([Length(1), Min(0), Length(input_height)]).areas(area);
    let [transcript, results] = Layout::horizontal([Percentage(55), Percentage(45)]).areas(main);
    ScreenLayout {
        title,
        transcript,
        results,
        input,
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let input_height = tui.input_box.calculate_height(frame.area().width);
    let areas = layout(frame.area(), input_height);

    MessageList::new(&mut tui.message_list, &app.transcript).render(frame, areas.transcript);

    ResultsPanel::new(
        &mut tui.results_panel,
        &app.results,
        app.focus == Focus::Results,
    )
    .render(frame, areas.results);

    TitleBar::new(
        app.service.endpoint().to_string(),
        app.status_message.clone(),
        tui.message_list.has_unseen_content(),
    )
    .render(frame, areas.title);

    tui.input_box.render(frame, areas.input);
}
