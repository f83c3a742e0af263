pub mod backdrop;
pub mod dialog;
pub mod pane_chrome;
pub mod path_prompt;
pub mod status_bar;
pub mod toast;
pub mod volume_bar;
