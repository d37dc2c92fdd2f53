mod about_panel;
mod ambience_player;
mod call_panel;
mod focus_timer;
mod header_bar;
mod player_controls;
mod player_settings;
mod popup;
mod task_list;
mod task_row;

pub use about_panel::AboutPanel;
pub use ambience_player::AmbiencePlayer;
pub use call_panel::CallPanel;
pub use focus_timer::FocusTimerPanel;
pub use header_bar::HeaderBar;
pub use player_controls::PlayerControls;
pub use player_settings::PlayerSettings;
pub use popup::Popup;
pub use task_list::TaskListPanel;
pub use task_row::TaskRow;
