//! Smooth window scrolling for in-page navigation.

use super::ease::Ease;

/// Space left above a section for the fixed navigation bar.
pub const HEADER_OFFSET: f64 = 80.0;

/// Scroll offset past which the navigation bar turns solid.
pub const NAV_SOLID_AFTER: f64 = 50.0;

pub const GLIDE_SECONDS: f64 = 1.5;

pub fn nav_is_solid(scroll_y: f64) -> bool {
    scroll_y > NAV_SOLID_AFTER
}

/// The collapsible link list that replaces the inline links on narrow
/// screens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggled(self) -> Self {
        Self { open: !self.open }
    }

    /// Following a link closes the menu, whatever state it was in.
    pub fn followed(self) -> Self {
        Self { open: false }
    }
}

/// Scroll target that puts `section_top` just below the header.
pub fn landing_offset(section_top: f64) -> f64 {
    (section_top - HEADER_OFFSET).max(0.0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollGlide {
    pub from: f64,
    pub to: f64,
    pub begins_at: f64,
    pub duration: f64,
    pub ease: Ease,
}

impl ScrollGlide {
    pub fn new(from: f64, to: f64, begins_at: f64) -> Self {
        Self {
            from,
            to,
            begins_at,
            duration: GLIDE_SECONDS,
            ease: Ease::power_in_out(2),
        }
    }

    /// Scroll position at `now`, clamped to the glide's endpoints.
    pub fn sample(&self, now: f64) -> f64 {
        if self.duration <= 0.0 || now >= self.begins_at + self.duration {
            return self.to;
        }
        let progress = ((now - self.begins_at) / self.duration).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * self.ease.apply(progress)
    }

    pub fn is_done(&self, now: f64) -> bool {
        now >= self.begins_at + self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_toggles_and_closes_when_a_link_is_followed() {
        let menu = NavMenu::default();
        assert!(!menu.is_open());

        let open = menu.toggled();
        assert!(open.is_open());
        assert!(!open.toggled().is_open());

        assert!(!open.followed().is_open());
        assert!(!menu.followed().is_open());
    }

    #[test]
    fn glide_eases_between_its_endpoints() {
        let glide = ScrollGlide::new(0.0, 1000.0, 2.0);

        assert_eq!(glide.sample(1.0), 0.0);
        assert_eq!(glide.sample(2.0), 0.0);
        assert!((glide.sample(2.75) - 500.0).abs() < 1e-9);
        assert!(glide.sample(2.3) < 300.0);
        assert_eq!(glide.sample(3.5), 1000.0);
        assert!(glide.is_done(3.5));
        assert!(!glide.is_done(3.4));
    }

    #[test]
    fn landing_leaves_room_for_the_header() {
        assert_eq!(landing_offset(1200.0), 1120.0);
        assert_eq!(landing_offset(30.0), 0.0);
    }

    #[test]
    fn nav_turns_solid_past_fifty_pixels() {
        assert!(!nav_is_solid(0.0));
        assert!(!nav_is_solid(50.0));
        assert!(nav_is_solid(50.5));
    }
}
