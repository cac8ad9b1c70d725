use anyhow::Result;
use ratatui::style::{Color, Modifier, Style};

/// Complete theme configuration for ratatui
#[derive(Clone)]
pub struct ThemeConfig {
    #[allow(dead_code)]
    pub background: Color,
    pub list_normal: Style,
    pub list_selected: Style,
    pub border: Style,
    pub border_selected: Style,
    pub title: Style,
    pub text: Style,
    /// Platform and genre tags.
    pub tag: Style,
    /// Error and no-results messages.
    pub error: Style,
    /// Status-bar hints and secondary labels.
    pub hint: Style,
}

/// Resolves a theme by its CLI name.
pub fn by_name(name: &str) -> Result<ThemeConfig> {
    match name {
        "dracula" => Ok(dracula_theme()),
        "solarized" => Ok(solarized_dark()),
        other => anyhow::bail!("Unknown theme: {} (expected dracula or solarized)", other),
    }
}

/// Returns a ThemeConfig based on the Dracula color palette.
pub fn dracula_theme() -> ThemeConfig {
    // Dracula palette
    let bg = Color::Rgb(40, 42, 54);
    let selection = Color::Rgb(68, 71, 90);
    let fg = Color::Rgb(248, 248, 242);
    let comment = Color::Rgb(98, 114, 164);
    let purple = Color::Rgb(189, 147, 249);
    let yellow = Color::Rgb(241, 250, 140);
    let red = Color::Rgb(255, 85, 85);
    let cyan = Color::Rgb(139, 233, 253);

    ThemeConfig {
        background: bg,
        list_normal: Style::default().fg(fg).bg(bg),
        list_selected: Style::default()
            .fg(fg)
            .bg(selection)
            .add_modifier(Modifier::BOLD),
        border: Style::default().fg(comment),
        border_selected: Style::default().fg(purple),
        title: Style::default().fg(purple).add_modifier(Modifier::BOLD),
        text: Style::default().fg(fg).bg(bg),
        tag: Style::default().fg(cyan),
        error: Style::default().fg(red).add_modifier(Modifier::BOLD),
        hint: Style::default().fg(yellow),
    }
}

/// Returns a ThemeConfig based on the Solarized Dark color palette.
pub fn solarized_dark() -> ThemeConfig {
    // Solarized Dark palette
    let base03 = Color::Rgb(0, 43, 54);
    let base02 = Color::Rgb(7, 54, 66);
    let base01 = Color::Rgb(88, 110, 117);
    let base0 = Color::Rgb(131, 148, 150);
    let base3 = Color::Rgb(253, 246, 227);
    let yellow = Color::Rgb(181, 137, 0);
    let red = Color::Rgb(220, 50, 47);
    let blue = Color::Rgb(38, 139, 210);
    let cyan = Color::Rgb(42, 161, 152);

    ThemeConfig {
        background: base03,
        list_normal: Style::default().fg(base0).bg(base02),
        list_selected: Style::default()
            .fg(base3)
            .bg(blue)
            .add_modifier(Modifier::BOLD),
        border: Style::default().fg(base01),
        border_selected: Style::default().fg(blue),
        title: Style::default().fg(blue).add_modifier(Modifier::BOLD),
        text: Style::default().fg(base0).bg(base02),
        tag: Style::default().fg(cyan),
        error: Style::default().fg(red).add_modifier(Modifier::BOLD),
        hint: Style::default().fg(yellow),
    }
}
