//! Icon and color lookups for schedule groups and the schedule header.

/// Icons the screens refer to by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Sunrise,
    Sun,
    Sunset,
    Moon,
    Clock,
}

/// Color families of the design system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Primary,
    Secondary,
    Warm,
    Accent,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub icon: Icon,
    pub palette: Palette,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub fn parse(category: &str) -> Option<Self> {
        match category {
            "morning" => Some(TimeOfDay::Morning),
            "afternoon" => Some(TimeOfDay::Afternoon),
            "evening" => Some(TimeOfDay::Evening),
            "night" => Some(TimeOfDay::Night),
            _ => None,
        }
    }

    pub fn theme(self) -> Theme {
        match self {
            TimeOfDay::Morning => Theme { icon: Icon::Sunrise, palette: Palette::Warm },
            TimeOfDay::Afternoon => Theme { icon: Icon::Sun, palette: Palette::Warm },
            TimeOfDay::Evening => Theme { icon: Icon::Sunset, palette: Palette::Primary },
            TimeOfDay::Night => Theme { icon: Icon::Moon, palette: Palette::Secondary },
        }
    }
}

/// Theme for a stored `time_of_day` value. Unrecognized categories get a
/// clock on a neutral palette.
pub fn time_of_day_theme(category: &str) -> Theme {
    TimeOfDay::parse(category).map_or(
        Theme {
            icon: Icon::Clock,
            palette: Palette::Neutral,
        },
        TimeOfDay::theme,
    )
}

/// Header palette for a primary dosha key; anything else falls back to
/// Vata's.
pub fn dosha_palette(primary: &str) -> Palette {
    match primary {
        "Pitta" => Palette::Warm,
        "Kapha" => Palette::Accent,
        _ => Palette::Primary,
    }
}
