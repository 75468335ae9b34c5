mod color_mode;
mod login;
mod text;

pub use color_mode::ColorMode;
pub use login::is_valid_login;
pub use text::wrap_text_multiline;
