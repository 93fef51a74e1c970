use ratatui::style::Color;

/// Color palette used by every view.
///
#[derive(Clone, Debug)]
pub struct Theme {
    pub primary: ColorSpec,
    pub banner: ColorSpec,

    pub text: ColorSpec,
    pub text_muted: ColorSpec,

    pub success: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,

    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,
}

/// Color specification that can be serialized/deserialized.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSpec {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        ColorSpec { r, g, b }
    }

    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::ocean()
    }
}

impl Theme {
    /// Blue on slate palette.
    ///
    pub fn ocean() -> Self {
        Theme {
            primary: ColorSpec::rgb(37, 99, 235),
            banner: ColorSpec::rgb(96, 165, 250),
            text: ColorSpec::rgb(226, 232, 240),
            text_muted: ColorSpec::rgb(148, 163, 184),
            success: ColorSpec::rgb(34, 197, 94),
            warning: ColorSpec::rgb(234, 179, 8),
            error: ColorSpec::rgb(239, 68, 68),
            border_active: ColorSpec::rgb(59, 130, 246),
            border_normal: ColorSpec::rgb(71, 85, 105),
            highlight_bg: ColorSpec::rgb(30, 58, 138),
            highlight_fg: ColorSpec::rgb(255, 255, 255),
        }
    }

    /// Color for a performance status cell.
    ///
    pub fn status_color(&self, status: crate::tracker::Status) -> Color {
        use crate::tracker::Status;
        match status {
            Status::Completed => self.success.to_color(),
            Status::InProgress => self.primary.to_color(),
            Status::Blocked => self.error.to_color(),
            Status::NeedsReview => self.warning.to_color(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::Status;

    #[test]
    fn test_color_spec_to_color() {
        assert_eq!(ColorSpec::rgb(1, 2, 3).to_color(), Color::Rgb(1, 2, 3));
    }

    #[test]
    fn test_status_colors_are_distinct() {
        let theme = Theme::default();
        let colors: Vec<Color> = Status::ALL.iter().map(|s| theme.status_color(*s)).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
