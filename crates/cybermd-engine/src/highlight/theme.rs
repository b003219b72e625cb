//! Color themes for rendering highlight ranges.

use std::str::FromStr;

use super::style::StyleTag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// How one [`StyleTag`] is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSpec {
    pub fg: Rgb,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl StyleSpec {
    const fn plain(fg: Rgb) -> Self {
        Self {
            fg,
            bold: false,
            italic: false,
            underline: false,
        }
    }

    const fn bold(fg: Rgb) -> Self {
        Self {
            bold: true,
            ..Self::plain(fg)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown theme {0:?}, expected \"dark\" or \"light\"")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(UnknownTheme(s.to_string())),
        }
    }
}

impl Theme {
    pub fn name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Foreground for unstyled text.
    pub fn text(self) -> Rgb {
        match self {
            Theme::Dark => Rgb(0xd8, 0xde, 0xe9),
            Theme::Light => Rgb(0x24, 0x29, 0x2e),
        }
    }

    /// Line-number gutter foreground.
    pub fn gutter(self) -> Rgb {
        match self {
            Theme::Dark => Rgb(0x5c, 0x63, 0x70),
            Theme::Light => Rgb(0x9a, 0xa0, 0xa6),
        }
    }

    pub fn style(self, tag: StyleTag) -> StyleSpec {
        match self {
            Theme::Dark => dark(tag),
            Theme::Light => light(tag),
        }
    }
}

fn dark(tag: StyleTag) -> StyleSpec {
    match tag {
        StyleTag::Heading1 => StyleSpec::bold(Rgb(0xff, 0x2e, 0x97)),
        StyleTag::Heading2 => StyleSpec::bold(Rgb(0xff, 0x6a, 0xc1)),
        StyleTag::Heading3 => StyleSpec::bold(Rgb(0xc7, 0x7d, 0xff)),
        StyleTag::Heading4 | StyleTag::Heading5 | StyleTag::Heading6 => {
            StyleSpec::bold(Rgb(0x9d, 0x8c, 0xff))
        }
        StyleTag::Bold => StyleSpec::bold(Rgb(0xff, 0xff, 0xff)),
        StyleTag::Italic => StyleSpec {
            italic: true,
            ..StyleSpec::plain(Rgb(0xe0, 0xe0, 0xe0))
        },
        StyleTag::InlineCode | StyleTag::CodeBlock => StyleSpec::plain(Rgb(0x00, 0xff, 0x9f)),
        StyleTag::Link => StyleSpec {
            underline: true,
            ..StyleSpec::plain(Rgb(0x00, 0xd9, 0xff))
        },
        StyleTag::Quote => StyleSpec {
            italic: true,
            ..StyleSpec::plain(Rgb(0x8a, 0x94, 0xa6))
        },
        StyleTag::ListMarker => StyleSpec::bold(Rgb(0xff, 0xd3, 0x00)),
        StyleTag::Plain => StyleSpec::plain(Theme::Dark.text()),
    }
}

fn light(tag: StyleTag) -> StyleSpec {
    match tag {
        StyleTag::Heading1 => StyleSpec::bold(Rgb(0xc2, 0x18, 0x5b)),
        StyleTag::Heading2 => StyleSpec::bold(Rgb(0xad, 0x14, 0x57)),
        StyleTag::Heading3 => StyleSpec::bold(Rgb(0x6a, 0x1b, 0x9a)),
        StyleTag::Heading4 | StyleTag::Heading5 | StyleTag::Heading6 => {
            StyleSpec::bold(Rgb(0x4a, 0x14, 0x8c))
        }
        StyleTag::Bold => StyleSpec::bold(Rgb(0x00, 0x00, 0x00)),
        StyleTag::Italic => StyleSpec {
            italic: true,
            ..StyleSpec::plain(Rgb(0x30, 0x30, 0x30))
        },
        StyleTag::InlineCode | StyleTag::CodeBlock => StyleSpec::plain(Rgb(0x00, 0x79, 0x6b)),
        StyleTag::Link => StyleSpec {
            underline: true,
            ..StyleSpec::plain(Rgb(0x15, 0x65, 0xc0))
        },
        StyleTag::Quote => StyleSpec {
            italic: true,
            ..StyleSpec::plain(Rgb(0x61, 0x61, 0x61))
        },
        StyleTag::ListMarker => StyleSpec::bold(Rgb(0xe6, 0x51, 0x00)),
        StyleTag::Plain => StyleSpec::plain(Theme::Light.text()),
    }
}
