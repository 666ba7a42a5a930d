use std::{io, time::Duration};

use dialoguer::{theme::ColorfulTheme, Confirm};
use indicatif::{ProgressBar, ProgressStyle};

fn theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

pub fn ask_confirm(prompt: &str, default: bool) -> io::Result<bool> {
    Confirm::with_theme(&theme())
        .with_prompt(prompt)
        .default(default)
        .interact()
}

pub trait SpinnerExt {
    fn with_ticking(self) -> Self;
}

impl SpinnerExt for ProgressBar {
    fn with_ticking(self) -> Self {
        self.enable_steady_tick(Duration::from_millis(50));
        self
    }
}

pub fn new_spinner(msg: impl Into<String>) -> ProgressBar {
    let style = ProgressStyle::default_spinner()
        .template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    ProgressBar::new_spinner()
        .with_style(style)
        .with_message(msg.into())
        .with_ticking()
}
