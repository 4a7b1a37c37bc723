pub mod board_panel;
