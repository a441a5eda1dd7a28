use ratatui::{Frame, layout::Rect, widgets::Clear};

/// Place a popup directly under `anchor`, or above it when there is more
/// room there, clamped to `bounds`
pub fn popup_near_anchor(anchor: Rect, bounds: Rect, width: u16, height: u16) -> Rect {
    let space_below = bounds.bottom().saturating_sub(anchor.bottom());
    let space_above = anchor.y.saturating_sub(bounds.y);
    let popup_width = width.min(bounds.right().saturating_sub(anchor.x));

    if height <= space_below || space_below >= space_above {
        Rect {
            x: anchor.x,
            y: anchor.bottom(),
            width: popup_width,
            height: height.min(space_below),
        }
    } else {
        let popup_height = height.min(space_above);
        Rect {
            x: anchor.x,
            y: anchor.y - popup_height,
            width: popup_width,
            height: popup_height,
        }
    }
}

pub fn clear_area(frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);
}

#[cfg(test)]
#[path = "popup_tests.rs"]
mod popup_tests;
