use std::time::Duration;

use bevy::prelude::*;

use super::tracker::ReturnNotice;

/// The welcome-back message currently on screen, if any.
#[derive(Resource, Debug, Default)]
pub struct WelcomeBackNotice {
    current: Option<ReturnNotice>,
    timer: Timer,
}

impl WelcomeBackNotice {
    pub fn show(&mut self, notice: ReturnNotice, display_secs: f32) {
        self.timer = Timer::from_seconds(display_secs.max(0.0), TimerMode::Once);
        self.current = Some(notice);
    }

    pub fn tick(&mut self, delta: Duration) {
        if self.current.is_none() {
            return;
        }
        self.timer.tick(delta);
        if self.timer.is_finished() {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<&ReturnNotice> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::absence::tier::{AbsenceLevel, AbsenceTier};

    #[test]
    fn notice_disappears_after_display_time() {
        let mut banner = WelcomeBackNotice::default();
        assert!(banner.current().is_none());

        banner.show(
            ReturnNotice::new(4000.0, AbsenceLevel::Away(AbsenceTier::Long)),
            20.0,
        );
        banner.tick(Duration::from_secs(19));
        assert_eq!(
            banner.current().map(|notice| notice.away_for.as_str()),
            Some("1h 6m")
        );

        banner.tick(Duration::from_secs(1));
        assert!(banner.current().is_none());
    }

    #[test]
    fn showing_again_restarts_the_timer() {
        let mut banner = WelcomeBackNotice::default();
        banner.show(ReturnNotice::new(45.0, AbsenceLevel::Active), 20.0);
        banner.tick(Duration::from_secs(15));
        banner.show(ReturnNotice::new(400.0, AbsenceLevel::Away(AbsenceTier::Short)), 20.0);
        banner.tick(Duration::from_secs(15));

        assert_eq!(
            banner.current().map(|notice| notice.level),
            Some(AbsenceLevel::Away(AbsenceTier::Short))
        );
    }
}
