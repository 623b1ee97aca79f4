//! Theme system for syntax highlighting.
//!
//! Defines token styles and color schemes, including the cyclic rainbow
//! palette used for brace-scope coloring.

use std::collections::HashMap;

/// Token style categories for syntax highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenStyle {
    /// Go keywords (func, var, return, range, etc.)
    Keyword,
    /// String and rune literals
    String,
    /// Numeric literals (integers, floats, imaginaries)
    Number,
    /// Comments, one span per contiguous comment group
    Comment,
    /// Type names
    Type,
    /// Function and method names
    Func,
    /// Unparseable or unrecognized regions
    Bad,
    /// Brace pairs, parameterized by 0-based nesting depth
    Rainbow(usize),
}

/// RGBA color represented as [r, g, b, a] with values 0.0-1.0.
pub type Color = [f32; 4];

/// A syntax highlighting theme.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Theme name.
    pub name: String,
    /// Background color.
    pub background: Color,
    /// Default text color.
    pub foreground: Color,
    /// Colors for each token style.
    colors: HashMap<TokenStyle, Color>,
    /// Cyclic palette for rainbow brace scopes.
    rainbow: Vec<Color>,
}

impl Theme {
    /// Creates a new theme with the given name and default colors.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            background: [0.102, 0.102, 0.122, 1.0], // #1A1A1F
            foreground: [0.902, 0.902, 0.902, 1.0], // #E6E6E6
            colors: HashMap::new(),
            rainbow: Vec::new(),
        }
    }

    /// Sets the color for a token style.
    pub fn set_color(&mut self, style: TokenStyle, color: Color) {
        self.colors.insert(style, color);
    }

    /// Sets the cyclic palette used for rainbow brace scopes.
    pub fn set_rainbow(&mut self, palette: Vec<Color>) {
        self.rainbow = palette;
    }

    /// Gets the color for a token style, falling back to foreground.
    ///
    /// `Rainbow(depth)` draws from the rainbow palette, cycling when the
    /// nesting depth exceeds the palette length.
    pub fn color(&self, style: TokenStyle) -> Color {
        if let TokenStyle::Rainbow(depth) = style {
            if self.rainbow.is_empty() {
                return self.foreground;
            }
            return self.rainbow[depth % self.rainbow.len()];
        }
        self.colors.get(&style).copied().unwrap_or(self.foreground)
    }

    /// Creates the default dark theme (similar to One Dark).
    pub fn dark() -> Self {
        let mut theme = Self::new("Dark");

        theme.background = [0.102, 0.102, 0.122, 1.0]; // #1A1A1F
        theme.foreground = [0.682, 0.710, 0.749, 1.0]; // #ABB2BF

        // Keywords - purple/magenta
        theme.set_color(TokenStyle::Keyword, [0.769, 0.471, 0.839, 1.0]); // #C477D6

        // Strings - green
        theme.set_color(TokenStyle::String, [0.596, 0.765, 0.475, 1.0]); // #98C379

        // Numbers - orange
        theme.set_color(TokenStyle::Number, [0.824, 0.608, 0.467, 1.0]); // #D29B77

        // Comments - gray
        theme.set_color(TokenStyle::Comment, [0.455, 0.506, 0.557, 1.0]); // #74818E

        // Types - yellow/gold
        theme.set_color(TokenStyle::Type, [0.890, 0.780, 0.478, 1.0]); // #E3C77A

        // Functions - blue
        theme.set_color(TokenStyle::Func, [0.380, 0.686, 0.937, 1.0]); // #61AFEF

        // Bad regions - red
        theme.set_color(TokenStyle::Bad, [0.878, 0.286, 0.286, 1.0]); // #E04949

        theme.set_rainbow(vec![
            [0.769, 0.471, 0.839, 1.0], // #C477D6
            [0.380, 0.686, 0.937, 1.0], // #61AFEF
            [0.890, 0.780, 0.478, 1.0], // #E3C77A
            [0.596, 0.765, 0.475, 1.0], // #98C379
            [0.337, 0.788, 0.784, 1.0], // #56C9C8
            [0.824, 0.608, 0.467, 1.0], // #D29B77
        ]);

        theme
    }

    /// Creates a light theme.
    pub fn light() -> Self {
        let mut theme = Self::new("Light");

        theme.background = [0.984, 0.984, 0.984, 1.0]; // #FBFBFB
        theme.foreground = [0.231, 0.259, 0.322, 1.0]; // #3B4252

        theme.set_color(TokenStyle::Keyword, [0.627, 0.314, 0.706, 1.0]); // #A050B4
        theme.set_color(TokenStyle::String, [0.306, 0.604, 0.024, 1.0]); // #4E9A06
        theme.set_color(TokenStyle::Number, [0.114, 0.404, 0.804, 1.0]); // #1D67CD
        theme.set_color(TokenStyle::Comment, [0.502, 0.549, 0.596, 1.0]); // #808C98
        theme.set_color(TokenStyle::Type, [0.016, 0.490, 0.490, 1.0]); // #047D7D
        theme.set_color(TokenStyle::Func, [0.071, 0.345, 0.667, 1.0]); // #1258AA
        theme.set_color(TokenStyle::Bad, [0.753, 0.204, 0.204, 1.0]); // #C03434

        theme.set_rainbow(vec![
            [0.627, 0.314, 0.706, 1.0], // #A050B4
            [0.071, 0.345, 0.667, 1.0], // #1258AA
            [0.016, 0.490, 0.490, 1.0], // #047D7D
            [0.306, 0.604, 0.024, 1.0], // #4E9A06
        ]);

        theme
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
