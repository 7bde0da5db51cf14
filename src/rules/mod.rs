pub mod edit_window;
