// Overlay window visibility and placement, as tracked by the provider

use serde::{Deserialize, Serialize};

use crate::models::MonitorPosition;

const EDGE_MARGIN: f64 = 20.0;
/// Extra clearance above a bottom-docked panel (taskbars, game HUDs).
const BOTTOM_MARGIN: f64 = 60.0;

/// Logical (scale-independent) screen size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: f64,
    pub height: f64,
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Placement {
    pub fn for_position(position: MonitorPosition, screen: ScreenSize) -> Self {
        let (width, height) = panel_size(position);
        let (x, y) = match position {
            MonitorPosition::TopCenter => ((screen.width - width) / 2.0, EDGE_MARGIN),
            MonitorPosition::BottomCenter => (
                (screen.width - width) / 2.0,
                screen.height - height - BOTTOM_MARGIN,
            ),
            MonitorPosition::LeftCenter => (EDGE_MARGIN, (screen.height - height) / 2.0),
            MonitorPosition::RightCenter => (
                screen.width - width - EDGE_MARGIN,
                (screen.height - height) / 2.0,
            ),
        };
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

fn panel_size(position: MonitorPosition) -> (f64, f64) {
    if position.is_vertical() {
        (110.0, 200.0)
    } else {
        (520.0, 42.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayWindow {
    pub visible: bool,
    pub position: MonitorPosition,
    pub placement: Placement,
    #[serde(skip)]
    screen: ScreenSize,
}

impl OverlayWindow {
    pub fn new(position: MonitorPosition, screen: ScreenSize) -> Self {
        Self {
            visible: false,
            position,
            placement: Placement::for_position(position, screen),
            screen,
        }
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Resizes and moves the panel for `position`.
    pub fn reposition(&mut self, position: MonitorPosition) {
        self.placement = Placement::for_position(position, self.screen);
        self.position = position;
    }
}
