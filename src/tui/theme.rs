use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Theme configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeColors {
    // UI elements
    pub border: ColorValue,
    pub border_focused: ColorValue,
    pub header: ColorValue,
    pub status_bar: ColorValue,

    // Text colors
    pub text_primary: ColorValue,
    pub text_secondary: ColorValue,

    // Message colors
    pub user_message: ColorValue,
    pub bot_message: ColorValue,

    // Status colors
    pub waiting: ColorValue,
    pub warning: ColorValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    Rgb { r: u8, g: u8, b: u8 },
    Named(String),
}

impl ColorValue {
    pub fn to_color(&self) -> Color {
        match self {
            ColorValue::Rgb { r, g, b } => Color::Rgb(*r, *g, *b),
            ColorValue::Named(name) => match name.as_str() {
                "black" => Color::Black,
                "red" => Color::Red,
                "green" => Color::Green,
                "yellow" => Color::Yellow,
                "blue" => Color::Blue,
                "magenta" => Color::Magenta,
                "cyan" => Color::Cyan,
                "white" => Color::White,
                "gray" | "grey" => Color::Gray,
                "dark_gray" | "dark_grey" => Color::DarkGray,
                _ => Color::White,
            },
        }
    }
}

fn named(name: &str) -> ColorValue {
    ColorValue::Named(name.to_string())
}

impl Theme {
    /// Pick a theme by its config name, falling back to dark
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Create the default dark theme
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            colors: ThemeColors {
                border: named("dark_gray"),
                border_focused: named("cyan"),
                header: named("cyan"),
                status_bar: named("gray"),

                text_primary: named("white"),
                text_secondary: named("gray"),

                user_message: named("blue"),
                bot_message: named("green"),

                waiting: named("yellow"),
                warning: named("red"),
            },
        }
    }

    /// Create a light theme
    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            colors: ThemeColors {
                border: ColorValue::Rgb {
                    r: 200,
                    g: 200,
                    b: 200,
                },
                border_focused: ColorValue::Rgb {
                    r: 0,
                    g: 100,
                    b: 200,
                },
                header: ColorValue::Rgb {
                    r: 0,
                    g: 100,
                    b: 200,
                },
                status_bar: ColorValue::Rgb {
                    r: 100,
                    g: 100,
                    b: 100,
                },

                text_primary: named("black"),
                text_secondary: ColorValue::Rgb {
                    r: 100,
                    g: 100,
                    b: 100,
                },

                user_message: ColorValue::Rgb {
                    r: 0,
                    g: 50,
                    b: 200,
                },
                bot_message: ColorValue::Rgb {
                    r: 0,
                    g: 150,
                    b: 50,
                },

                waiting: ColorValue::Rgb {
                    r: 200,
                    g: 100,
                    b: 0,
                },
                warning: named("red"),
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
