//! Frame composition: sidebar beside the main column, title bar on top,
//! welcome screen or message stream below, overlays last.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Position, Rect};
use ratatui::widgets::Block;

use crate::core::state::App;
use crate::core::viewport::Viewport;
use crate::tui::component::Component;
use crate::tui::components::input_box::{REPLY_PLACEHOLDER, WELCOME_PLACEHOLDER};
use crate::tui::components::{
    ClickTarget, MessageList, ModelPicker, Settings, Sidebar, SuggestionPanel, TitleBar,
    WelcomeScreen,
};
use crate::tui::palette::Palette;
use crate::tui::{Overlay, TuiState};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let area = frame.area();
    let viewport = Viewport::new(area.width, area.height, tui.reduced_motion);
    tui.sync_viewport(&viewport);

    let palette = Palette::for_theme(app.theme.theme());
    frame.render_widget(Block::new().style(palette.base()), area);
    tui.hits.clear();

    let [sidebar_area, main_area] =
        Layout::horizontal([Length(Sidebar::width(tui.sidebar_open)), Min(0)]).areas(area);
    let mut sidebar = Sidebar::new(tui.sidebar_open, palette);
    sidebar.render(frame, sidebar_area);
    tui.hits.append(&mut sidebar.hits);

    let [title_area, body] = Layout::vertical([Length(1), Min(0)]).areas(main_area);

    // Props the input box reads from App
    tui.input_box.palette = palette;
    tui.input_box.is_loading = app.is_loading();
    if tui.input_box.model_name != app.model_name {
        tui.input_box.model_name = app.model_name.clone();
    }

    if app.conversation.is_empty() {
        tui.input_box.placeholder = WELCOME_PLACEHOLDER;
        let mut screen = WelcomeScreen::new(&mut tui.input_box, palette);
        screen.render(frame, body);
        tui.hits.append(&mut screen.hits);
    } else {
        tui.input_box.placeholder = REPLY_PLACEHOLDER;
        let body = body.inner(Margin::new(1, 0));
        let input_height = tui.input_box.calculate_height(body.width);
        let [list_area, input_area] =
            Layout::vertical([Min(0), Length(input_height)]).areas(body);

        MessageList::new(
            &mut tui.message_list,
            app.conversation.messages(),
            app.is_loading(),
            palette,
        )
        .animation(spinner_frame, viewport.reduced_motion)
        .render(frame, list_area);
        tui.input_box.render(frame, input_area);
    }

    // After the list so the unseen indicator reflects this frame's scroll
    TitleBar::new(
        &app.model_name,
        &app.status_message,
        tui.message_list.has_unseen_content(),
        palette,
    )
    .render(frame, title_area);

    match tui.overlay.as_mut() {
        Some(Overlay::Suggestions(state)) => SuggestionPanel::new(state, palette).render(frame, area),
        Some(Overlay::ModelPicker(state)) => {
            ModelPicker::new(state, &app.model_name, palette).render(frame, area)
        }
        Some(Overlay::Settings(state)) => {
            Settings::new(state, app.theme.theme(), palette).render(frame, area)
        }
        None => {}
    }
}

/// Topmost clickable region under `(column, row)`.
pub fn hit_test(hits: &[(Rect, ClickTarget)], column: u16, row: u16) -> Option<ClickTarget> {
    let position = Position::new(column, row);
    hits.iter()
        .rev()
        .find(|(rect, _)| rect.contains(position))
        .map(|(_, target)| *target)
}
