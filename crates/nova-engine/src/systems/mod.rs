pub mod locale;
pub mod sound;
