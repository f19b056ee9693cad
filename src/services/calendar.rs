//! Market session gate

use chrono::{DateTime, Datelike, NaiveTime, Utc, Weekday};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OpenMarkets {
    pub nse: bool,
    pub us: bool,
}

impl OpenMarkets {
    pub fn any(&self) -> bool {
        self.nse || self.us
    }

    pub fn intersect(self, other: OpenMarkets) -> OpenMarkets {
        OpenMarkets {
            nse: self.nse && other.nse,
            us: self.us && other.us,
        }
    }
}

pub trait MarketCalendar: Send + Sync {
    fn open_markets(&self, now: DateTime<Utc>) -> OpenMarkets;
}

/// Every market is always open
pub struct AlwaysOpen;

impl MarketCalendar for AlwaysOpen {
    fn open_markets(&self, _now: DateTime<Utc>) -> OpenMarkets {
        OpenMarkets { nse: true, us: true }
    }
}

/// Trading window in UTC, Monday to Friday
#[derive(Debug, Clone, Copy)]
pub struct Session {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl Session {
    pub fn new(open: NaiveTime, close: NaiveTime) -> Self {
        Self { open, close }
    }

    pub fn contains(&self, now: DateTime<Utc>) -> bool {
        if matches!(now.weekday(), Weekday::Sat | Weekday::Sun) {
            return false;
        }
        let time = now.time();
        time >= self.open && time < self.close
    }
}

/// Weekday session windows, no holiday calendar.
///
/// NSE 09:15–15:30 IST is 03:45–10:00 UTC. The US window spans 13:30–21:00 UTC so it
/// covers the regular session on both sides of the daylight-saving switch.
pub struct SessionCalendar {
    nse: Session,
    us: Session,
}

impl SessionCalendar {
    pub fn new(nse: Session, us: Session) -> Self {
        Self { nse, us }
    }
}

impl Default for SessionCalendar {
    fn default() -> Self {
        let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN);
        Self {
            nse: Session::new(at(3, 45), at(10, 0)),
            us: Session::new(at(13, 30), at(21, 0)),
        }
    }
}

impl MarketCalendar for SessionCalendar {
    fn open_markets(&self, now: DateTime<Utc>) -> OpenMarkets {
        OpenMarkets {
            nse: self.nse.contains(now),
            us: self.us.contains(now),
        }
    }
}
