// SPDX-License-Identifier: MPL-2.0
//! Shared visual constants for the board and the image viewer.
//!
//! Components take colors, spacing and font sizes from here instead of
//! hard-coding them, so the board and the modal stay consistent.

use iced::Color;

pub mod palette {
    use super::Color;

    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_700: Color = Color::from_rgb(0.3, 0.3, 0.3);
    pub const GRAY_400: Color = Color::from_rgb(0.4, 0.4, 0.4);

    // Card accents
    pub const ROSE_100: Color = Color::from_rgb(0.99, 0.91, 0.93);
    pub const ROSE_500: Color = Color::from_rgb(0.88, 0.35, 0.47);
    pub const AMBER_100: Color = Color::from_rgb(1.0, 0.95, 0.84);

    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
    pub const SUCCESS_500: Color = Color::from_rgb(0.263, 0.702, 0.404);
}

pub mod opacity {
    pub const TRANSPARENT: f32 = 0.0;
    /// Modal backdrop dimming.
    pub const BACKDROP: f32 = 0.8;
    pub const OPAQUE: f32 = 1.0;
}

pub mod spacing {
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
}

pub mod sizing {
    use super::spacing;

    pub const BUTTON_HEIGHT: f32 = 36.0;
    /// Image viewer toolbar: one row of buttons plus its padding.
    pub const VIEWER_TOOLBAR_HEIGHT: f32 = BUTTON_HEIGHT + 2.0 * spacing::XS;
    /// Single caption line under the viewer toolbar.
    pub const VIEWER_CAPTION_HEIGHT: f32 = 20.0;
    /// Width of the sign-in and compose forms.
    pub const FORM_WIDTH: f32 = 420.0;
    /// Maximum width of the card column.
    pub const BOARD_WIDTH: f32 = 720.0;
    pub const CARD_EDITOR_HEIGHT: f32 = 120.0;
}

pub mod typography {
    pub const TITLE_LG: f32 = 30.0;
    pub const TITLE_MD: f32 = 20.0;
    pub const TITLE_SM: f32 = 18.0;
    pub const BODY: f32 = 14.0;
    pub const CAPTION: f32 = 12.0;
}

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const LG: f32 = 12.0;
}

const _: () = {
    assert!(spacing::XS > spacing::XXS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    assert!(opacity::TRANSPARENT == 0.0);
    assert!(opacity::OPAQUE == 1.0);
    assert!(opacity::BACKDROP > 0.0 && opacity::BACKDROP < 1.0);

    assert!(typography::TITLE_LG > typography::TITLE_MD);
    assert!(typography::TITLE_MD > typography::TITLE_SM);
    assert!(typography::TITLE_SM > typography::BODY);
    assert!(typography::BODY > typography::CAPTION);

    assert!(sizing::BOARD_WIDTH > sizing::FORM_WIDTH);
    assert!(sizing::VIEWER_TOOLBAR_HEIGHT > sizing::BUTTON_HEIGHT);
    assert!(sizing::VIEWER_CAPTION_HEIGHT > typography::BODY);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_scale_is_consistent() {
        assert_eq!(spacing::MD, spacing::XS * 2.0);
        assert_eq!(spacing::LG, spacing::MD * 1.5);
    }
}
