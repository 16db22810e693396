/// A progress sample taken by the poller.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Progress {
    pub elapsed: f64,
    pub duration: Option<f64>,
}

impl Progress {
    pub fn new(elapsed: f64, duration: Option<f64>) -> Self {
        Self { elapsed, duration }
    }

    /// Percentage played, `None` while the duration is unknown.
    pub fn percent(&self) -> Option<f64> {
        self.duration
            .filter(|d| *d > 0.0)
            .map(|d| (self.elapsed / d * 100.0).clamp(0.0, 100.0))
    }

    pub fn elapsed_label(&self) -> String {
        format_time(self.elapsed)
    }

    /// True once `elapsed` is within `tolerance` seconds of the duration.
    pub fn is_at_end(&self, tolerance: f64) -> bool {
        match self.duration {
            Some(d) => self.elapsed >= d - tolerance,
            None => false,
        }
    }
}

/// Format seconds as `m:ss`, truncating fractions.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_pads_seconds_but_not_minutes() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(30.0), "0:30");
        assert_eq!(format_time(59.99), "0:59");
        assert_eq!(format_time(61.0), "1:01");
        assert_eq!(format_time(3725.0), "62:05");
        assert_eq!(format_time(-3.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
    }

    #[test]
    fn percent_is_elapsed_over_duration() {
        let p = Progress::new(30.0, Some(120.0));
        assert_eq!(p.percent(), Some(25.0));
        assert_eq!(p.elapsed_label(), "0:30");
    }

    #[test]
    fn percent_is_unknown_without_duration() {
        assert_eq!(Progress::new(30.0, None).percent(), None);
        assert_eq!(Progress::new(30.0, Some(0.0)).percent(), None);
    }

    #[test]
    fn end_detection_uses_tolerance_window() {
        assert!(!Progress::new(5.0, Some(10.0)).is_at_end(0.1));
        assert!(!Progress::new(9.85, Some(10.0)).is_at_end(0.1));
        assert!(Progress::new(9.95, Some(10.0)).is_at_end(0.1));
        assert!(Progress::new(10.4, Some(10.0)).is_at_end(0.1));
        assert!(!Progress::new(100.0, None).is_at_end(0.1));
    }
}
