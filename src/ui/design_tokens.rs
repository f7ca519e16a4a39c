// SPDX-License-Identifier: MPL-2.0
#![doc = r#"
# Design Tokens

Visual constants for the toast widgets.

## Organization

- **Palette**: Base colors, one background and one countdown accent per appearance
- **Opacity**: Standardized opacity levels
- **Spacing**: Spacing scale (8px grid)
- **Sizing**: Component sizes
- **Typography**: Font size scale
- **Border**: Border width scale
- **Radius**: Border radii
- **Shadow**: Shadow definitions

## Examples

```
use iced_toasts::ui::design_tokens::{palette, spacing, opacity};
use iced::Color;

let hover = Color {
    a: opacity::OVERLAY_SUBTLE,
    ..palette::GRAY_400
};

let padding = spacing::MD; // 16px
```
"#]

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    // Grayscale
    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_900: Color = Color::from_rgb(0.1, 0.1, 0.1);
    pub const GRAY_700: Color = Color::from_rgb(0.3, 0.3, 0.3);
    pub const GRAY_400: Color = Color::from_rgb(0.4, 0.4, 0.4);
    pub const GRAY_200: Color = Color::from_rgb(0.75, 0.75, 0.75);

    // Toast backgrounds
    pub const INFO_100: Color = Color::from_rgb(0.804, 0.941, 0.996); // #CDF0FE
    pub const SUCCESS_100: Color = Color::from_rgb(0.925, 0.988, 0.827); // #ECFCD3
    pub const WARNING_100: Color = Color::from_rgb(0.996, 0.980, 0.812); // #FEFACF
    pub const ERROR_100: Color = Color::from_rgb(1.0, 0.886, 0.898); // #FFE2E5

    // Countdown accents
    pub const INFO_500: Color = Color::from_rgb(0.0, 0.706, 0.847); // #00B4D8
    pub const SUCCESS_500: Color = Color::from_rgb(0.361, 0.722, 0.361); // #5CB85C
    pub const WARNING_500: Color = Color::from_rgb(0.941, 0.678, 0.306); // #F0AD4E
    pub const ERROR_500: Color = Color::from_rgb(0.851, 0.325, 0.310); // #D9534F
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const TRANSPARENT: f32 = 0.0;
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    pub const SHADOW: f32 = 0.25;
    pub const OPAQUE: f32 = 1.0;
}

// ============================================================================
// Spacing Scale (8px grid)
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0; // 0.5 unit
    pub const XS: f32 = 8.0; // 1 unit
    pub const SM: f32 = 12.0; // 1.5 units
    pub const MD: f32 = 16.0; // 2 units
    pub const LG: f32 = 24.0; // 3 units
}

// ============================================================================
// Component Sizing
// ============================================================================

pub mod sizing {
    pub const TOAST_WIDTH: f32 = 300.0;
    pub const CLOSE_BUTTON: f32 = 20.0;
    pub const COUNTDOWN_HEIGHT: f32 = 4.0;
    pub const BUTTON_HEIGHT: f32 = 36.0;
}

// ============================================================================
// Typography
// ============================================================================

pub mod typography {
    /// Demo headings.
    pub const TITLE_MD: f32 = 20.0;

    /// Toast body text.
    pub const BODY: f32 = 14.0;

    /// Close glyph and hints.
    pub const CAPTION: f32 = 12.0;

    /// Average glyph advance relative to font size, used to estimate text width.
    pub const GLYPH_WIDTH_RATIO: f32 = 0.55;

    /// Line height relative to font size.
    pub const LINE_HEIGHT_RATIO: f32 = 1.3;
}

// ============================================================================
// Border Widths
// ============================================================================

pub mod border {
    pub const WIDTH_SM: f32 = 1.0;
    pub const WIDTH_MD: f32 = 2.0;
}

// ============================================================================
// Border Radii
// ============================================================================

pub mod radius {
    pub const NONE: f32 = 0.0;
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
}

// ============================================================================
// Shadow Definitions
// ============================================================================

pub mod shadow {
    use super::{opacity, palette};
    use iced::{Color, Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    pub const MD: Shadow = Shadow {
        color: Color {
            a: opacity::SHADOW,
            ..palette::BLACK
        },
        offset: Vector { x: 0.0, y: 4.0 },
        blur_radius: 8.0,
    };
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    // Spacing validation
    assert!(spacing::XS > 0.0);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    // Opacity validation
    assert!(opacity::TRANSPARENT == 0.0);
    assert!(opacity::OPAQUE == 1.0);
    assert!(opacity::SHADOW > 0.0 && opacity::SHADOW < 1.0);

    // Sizing validation
    assert!(sizing::TOAST_WIDTH > sizing::CLOSE_BUTTON);
    assert!(sizing::COUNTDOWN_HEIGHT > 0.0);

    // Typography validation
    assert!(typography::TITLE_MD > typography::BODY);
    assert!(typography::BODY > typography::CAPTION);
    assert!(typography::LINE_HEIGHT_RATIO >= 1.0);

    // Border validation
    assert!(border::WIDTH_MD > border::WIDTH_SM);
};
