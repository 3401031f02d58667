pub mod input_handler;
pub mod layout;
pub mod scene;
pub mod widgets;
